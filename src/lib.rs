//! Hookup API - Photo Rounds Service
//!
//! This library provides the HTTP API for hookup rounds: one active round
//! per gender, photo submissions from signed-in users, winner selection by
//! admins and the public winner history.
//!
//! # Architecture
//!
//! The application follows a layered architecture:
//! - **Handlers**: HTTP request handlers (thin layer)
//! - **Middleware**: Authentication, role gates and photo uploads
//! - **Services**: Business logic
//! - **Repositories**: Database access
//! - **Models**: Domain models and DTOs

pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod state;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, AppResult};
pub use state::AppState;
