//! # Web Handlers for the Hotel Booking Application
//!
//! This crate provides the web handlers for the hotel booking application.
//! Handlers are thin: each one opens a request-scoped unit of work, delegates
//! to the repositories, commits on success, and serializes the outcome.

/// Authentication handlers (register, login, me, logout)
mod auth_handlers;
pub use auth_handlers::*;

/// Hotel CRUD and search handlers
mod hotel_handlers;
pub use hotel_handlers::*;

/// Room CRUD handlers nested under hotels
mod room_handlers;
pub use room_handlers::*;

/// Booking handlers for authenticated users
mod booking_handlers;
pub use booking_handlers::*;

/// Shared request/response types and the API error taxonomy
pub mod types;
