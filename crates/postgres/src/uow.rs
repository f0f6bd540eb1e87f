use sqlx::{PgPool, Postgres, Transaction};

use crate::error::StoreError;
use crate::repository::Repository;
use crate::types::{Booking, Hotel, Room, User};

/// One transaction bounding a group of repository operations.
///
/// Every sub-repository handed out by the accessors runs on the same
/// transaction, so a multi-step request either commits as a whole or not at
/// all. Dropping the unit of work without calling [`commit`](Self::commit)
/// rolls the transaction back (sqlx's drop guarantee), which also covers
/// requests aborted mid-handler. The accessors borrow `&mut self`, so only
/// one repository is live at a time and nesting is unsupported by
/// construction.
pub struct UnitOfWork {
    tx: Transaction<'static, Postgres>,
}

impl UnitOfWork {
    /// Opens a transaction on the shared pool.
    pub async fn begin(pool: &PgPool) -> Result<Self, StoreError> {
        Ok(Self {
            tx: pool.begin().await?,
        })
    }

    /// Repository over the `hotels` table.
    pub fn hotels(&mut self) -> Repository<'_, Hotel> {
        Repository::new(&mut self.tx)
    }

    /// Repository over the `rooms` table.
    pub fn rooms(&mut self) -> Repository<'_, Room> {
        Repository::new(&mut self.tx)
    }

    /// Repository over the `users` table.
    pub fn users(&mut self) -> Repository<'_, User> {
        Repository::new(&mut self.tx)
    }

    /// Repository over the `bookings` table.
    pub fn bookings(&mut self) -> Repository<'_, Booking> {
        Repository::new(&mut self.tx)
    }

    /// Persists every change made through the sub-repositories.
    pub async fn commit(self) -> Result<(), StoreError> {
        Ok(self.tx.commit().await?)
    }

    /// Discards every change. Equivalent to dropping, but explicit.
    pub async fn rollback(self) -> Result<(), StoreError> {
        Ok(self.tx.rollback().await?)
    }
}
