//! # Admin Role Mapping
//!
//! Aggregation and assignment of a principal's role mappings.
//!
//! ## Overview
//!
//! The admin-role-mapping crate handles:
//! - **Collection**: Assigned and effective roles for the realm and every client, fetched concurrently
//! - **Merging**: One ordered row list, realm first, with inherited roles optionally hidden
//! - **Assignment**: Selected rows partitioned by scope, one batch write per scope
//! - **Session**: `load`/`save` surface with a single outcome alert per save
//!
//! Storage is abstracted behind [`RoleMappingStore`]. [`MemoryRoleStore`] runs
//! in process; with the `http` feature (default), [`AdminRoleStore`] talks to
//! the management REST API.
//!
//! ## Usage
//!
//! ```rust
//! use admin_model::{Principal, Role};
//! use admin_role_mapping::{AlertLog, MemoryRoleStore, RoleMappingSession, Row};
//! use std::sync::Arc;
//!
//! # async fn example() -> admin_role_mapping::RoleMappingResult<()> {
//! let store = MemoryRoleStore::new()
//!     .with_realm_role(Role::new("admin").with_id("r-admin"), &["r-base"])
//!     .with_realm_role(Role::new("base").with_id("r-base"), &[])
//!     .with_realm_role(Role::new("audit").with_id("r-audit"), &[])
//!     .with_principal("g-1")
//!     .with_mapping("g-1", "r-admin");
//!
//! let alerts = Arc::new(AlertLog::new());
//! let session = RoleMappingSession::new(
//!     Arc::new(store),
//!     Principal::group("g-1", "Admins"),
//!     alerts.clone(),
//! );
//!
//! let rows = session.load(false).await?;
//! assert_eq!(rows.len(), 2);
//!
//! session
//!     .save(&[Row::realm(Role::new("audit").with_id("r-audit"))])
//!     .await?;
//! assert_eq!(alerts.alerts().len(), 1);
//! # Ok(())
//! # }
//! ```

pub mod alerts;
pub mod assigner;
pub mod collector;
pub mod error;
#[cfg(feature = "http")]
pub mod http;
pub mod memory;
pub mod reducer;
pub mod row;
pub mod session;
pub mod store;

// Re-export main types
pub use alerts::{Alert, AlertLog, AlertSink, AlertVariant};
pub use assigner::{assign, partition, AssignmentPlan, AssignmentSummary};
pub use collector::{collect, ClientRoleSets, CollectedRoles, RoleSets};
pub use error::{RoleMappingError, RoleMappingResult};
#[cfg(feature = "http")]
pub use http::AdminRoleStore;
pub use memory::{MemoryRoleStore, MemoryStoreError, StoreOperation, WriteCall};
pub use reducer::{exclude_assigned, merge, merge_scope};
pub use row::{MappingScope, Row, RowKey, RowScope};
pub use session::RoleMappingSession;
pub use store::{RoleMappingStore, StoreError, StoreResult};
