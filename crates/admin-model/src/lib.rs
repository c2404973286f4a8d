//! # Admin Model
//!
//! Resource representations exchanged with the realm management API and shared
//! by the admin client and the role-mapping engine.
//!
//! ## Overview
//!
//! The admin-model crate handles:
//! - **Roles**: Realm and client roles, including composite markers
//! - **Clients**: Registered applications that own client roles
//! - **Groups & Users**: The principals that can hold role mappings
//! - **Realms & Client Scopes**: Tenant and scope resources used by fixtures
//!
//! ## Architecture
//!
//! ```text
//! Realm
//!   ├─ Roles (realm scope)
//!   ├─ Clients
//!   │     └─ Roles (client scope)
//!   ├─ Groups ─┐
//!   └─ Users  ─┴─ Principal ─→ role mappings (realm + per client)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use admin_model::{Principal, PrincipalKind, Role};
//!
//! let group = Principal::group("g-1", "Admins");
//! assert_eq!(group.kind, PrincipalKind::Group);
//!
//! let role = Role::new("admin").with_id("r-1");
//! assert_eq!(role.name, "admin");
//! ```
//!
//! All wire types use camelCase field names to match the management API.

pub mod client;
pub mod client_scope;
pub mod group;
pub mod principal;
pub mod realm;
pub mod role;
pub mod user;

// Re-export main types for convenience
pub use client::Client;
pub use client_scope::ClientScope;
pub use group::Group;
pub use principal::{CreatedResource, Principal, PrincipalKind};
pub use realm::Realm;
pub use role::Role;
pub use user::User;
