//! Core library for FinWise.
//!
//! Provides the authenticated API client (bearer tokens with transparent
//! refresh), the credential store, typed models for transactions, budgets,
//! goals, analytics and AI predictions, and configuration.

pub mod api;
pub mod auth;
pub mod config;
pub mod dashboard;
pub mod models;
pub mod utils;

pub use api::{ApiClient, ApiError, ApiResponse, RequestDescriptor};
pub use auth::{CredentialStore, SessionTerminator, TokenSlot};
pub use config::Config;
