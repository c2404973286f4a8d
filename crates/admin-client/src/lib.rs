//! # Admin Client
//!
//! HTTP client for the realm management REST API, plus the setup/teardown
//! fixtures used by end-to-end suites.
//!
//! ## Overview
//!
//! The admin-client crate handles:
//! - **Authentication**: Password-grant login with token reuse until expiry
//! - **Role Mappings**: Assigned and effective realm/client roles of groups and users
//! - **Resources**: Realms, clients, groups, users, realm roles, client scopes
//! - **Fixtures**: Name-based helpers for creating and removing test data
//!
//! ## Usage
//!
//! ```rust,no_run
//! use admin_client::{AdminClient, AdminConfig};
//! use admin_model::PrincipalKind;
//!
//! async fn show(group_id: &str) -> admin_client::AdminResult<()> {
//!     let client = AdminClient::new(AdminConfig::from_env().with_realm("acme"))?;
//!
//!     let assigned = client
//!         .list_realm_role_mappings(PrincipalKind::Group, group_id)
//!         .await?;
//!     for role in assigned {
//!         println!("{}", role.name);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Errors
//!
//! Every call returns [`AdminResult`]. `401` maps to
//! [`AdminError::AuthenticationFailed`], `404` to [`AdminError::NotFound`] and
//! any other non-success status to [`AdminError::ApiError`].

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod fixtures;
pub mod resources;
pub mod role_mappings;

// Re-export main types
pub use auth::TokenResponse;
pub use client::AdminClient;
pub use config::{AdminConfig, ConfigError};
pub use error::{AdminError, AdminResult};
pub use fixtures::AdminFixtures;
