//! Role-mapping session
//!
//! Binds a store, a principal and an alert sink into the surface the console
//! drives: `load`, `save` and the hide-inherited toggle.

use crate::alerts::{Alert, AlertSink, ROLE_MAPPING_UPDATED, ROLE_MAPPING_UPDATE_FAILED};
use crate::assigner::{assign, AssignmentSummary};
use crate::collector::collect;
use crate::error::RoleMappingResult;
use crate::reducer::{exclude_assigned, merge};
use crate::row::Row;
use crate::store::RoleMappingStore;
use admin_model::Principal;
use std::sync::Arc;
use tracing::{error, instrument};

/// Role mappings of one principal.
///
/// Each `load` and `save` is an independent request; the session keeps no
/// rows between calls. Concurrent calls are not serialized.
pub struct RoleMappingSession<S: ?Sized> {
    store: Arc<S>,
    principal: Principal,
    alerts: Arc<dyn AlertSink>,
    hide_inherited: bool,
}

impl<S: ?Sized> std::fmt::Debug for RoleMappingSession<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoleMappingSession")
            .field("principal", &self.principal)
            .field("hide_inherited", &self.hide_inherited)
            .finish()
    }
}

impl<S> RoleMappingSession<S>
where
    S: RoleMappingStore + ?Sized,
{
    /// Create a session. Inherited roles are shown by default.
    pub fn new(store: Arc<S>, principal: Principal, alerts: Arc<dyn AlertSink>) -> Self {
        Self {
            store,
            principal,
            alerts,
            hide_inherited: false,
        }
    }

    /// The principal whose mappings are edited.
    pub fn principal(&self) -> &Principal {
        &self.principal
    }

    /// Current toggle value used by [`reload`](Self::reload).
    pub fn hide_inherited(&self) -> bool {
        self.hide_inherited
    }

    /// Set the toggle for subsequent reloads.
    pub fn set_hide_inherited(&mut self, hide: bool) {
        self.hide_inherited = hide;
    }

    /// Flip the toggle and return the new value.
    pub fn toggle_hide_inherited(&mut self) -> bool {
        self.hide_inherited = !self.hide_inherited;
        self.hide_inherited
    }

    /// Collect and merge the principal's rows.
    ///
    /// A failed load returns the error and emits no alert.
    #[instrument(skip(self), fields(principal = %self.principal))]
    pub async fn load(&self, hide_inherited: bool) -> RoleMappingResult<Vec<Row>> {
        let collected = collect(self.store.as_ref(), &self.principal.id).await?;
        Ok(merge(&collected, hide_inherited))
    }

    /// Load with the session's current toggle.
    pub async fn reload(&self) -> RoleMappingResult<Vec<Row>> {
        self.load(self.hide_inherited).await
    }

    /// Assign the rows and emit exactly one alert with the outcome.
    #[instrument(skip(self, rows), fields(principal = %self.principal, rows = rows.len()))]
    pub async fn save(&self, rows: &[Row]) -> RoleMappingResult<AssignmentSummary> {
        match assign(self.store.as_ref(), &self.principal.id, rows).await {
            Ok(summary) => {
                self.alerts.add_alert(Alert::success(ROLE_MAPPING_UPDATED));
                Ok(summary)
            }
            Err(e) => {
                error!(error = %e, "Role mapping update failed");
                self.alerts
                    .add_alert(Alert::error(ROLE_MAPPING_UPDATE_FAILED, &e));
                Err(e)
            }
        }
    }

    /// Candidate rows not already directly assigned in `current`.
    pub fn assignable_rows(&self, candidates: Vec<Row>, current: &[Row]) -> Vec<Row> {
        exclude_assigned(candidates, current)
    }
}
