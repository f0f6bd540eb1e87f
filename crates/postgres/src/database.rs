use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

/// Creates a connection pool to the PostgreSQL database.
///
/// The pool is built once at process start and passed down to every
/// request-scoped unit of work; it is the only storage handle in the process.
pub async fn create_connection_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await
}

/// Tests the database connection by executing a simple query.
pub async fn test_connection(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    log::info!("Database connection successful");
    Ok(())
}
