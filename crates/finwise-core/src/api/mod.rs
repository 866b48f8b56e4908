//! REST API client module for the FinWise backend.
//!
//! This module provides the `ApiClient` for talking to the transactions,
//! budgets, goals, analytics, AI and insights endpoints.
//!
//! The API uses JWT bearer token authentication. Expired access tokens are
//! renewed transparently through the `login/refresh/` endpoint.

pub mod client;
pub mod endpoints;
pub mod error;
pub mod request;
pub mod transport;

pub use client::{ApiClient, AuthPhase};
pub use error::ApiError;
pub use request::{ApiResponse, Method, RequestDescriptor, AUTH_FAILURE_STATUS, REFRESH_PATH};
pub use transport::{HttpTransport, Transport, DEFAULT_TIMEOUT_SECS};
