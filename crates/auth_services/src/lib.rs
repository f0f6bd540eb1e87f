//! # Auth Services
//!
//! This crate provides stateless authentication services for the application:
//! password hashing, JWT token handling, and the middleware that
//! authenticates requests.

/// JWT token issuance and verification.
pub mod jwt;
/// Middleware for request authentication via the access-token cookie.
pub mod middleware;
/// Password hashing and verification.
pub mod service;
/// Types and structures used in authentication services.
pub mod types;
