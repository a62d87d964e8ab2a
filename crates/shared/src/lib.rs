//! Shared types, errors, and configuration for BankLink.
//!
//! This crate provides common types used across all other crates:
//! - Application-wide error types
//! - Configuration management
//! - JWT token generation and validation
//! - Authentication request/response types

pub mod auth;
pub mod config;
pub mod error;
pub mod jwt;

pub use auth::{Claims, TokenPair};
pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use jwt::{JwtConfig, JwtError, JwtService};
