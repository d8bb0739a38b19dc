//! The check-in engine
//!
//! [`CheckinEngine`] is a stateless facade over a [`TableStore`] and a
//! [`Clock`]. Every call works from the table as the store returns it; no
//! session state survives between calls.

use crate::outcome::Outcome;
use crate::validation::{validate, Verdict};
use rollcall_core::{Activity, Clock, IdCode, Participant, StoreResult, Table};
use rollcall_storage::TableStore;
use serde::Serialize;
use std::collections::BTreeMap;
use std::ops::ControlFlow;
use std::sync::Arc;
use tracing::{info, warn};

/// Dashboard counts
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Rows in the table
    pub participants: usize,
    /// Participants with each activity done
    pub done: BTreeMap<Activity, usize>,
}

impl Summary {
    /// Build counts from a table
    pub fn of(table: &Table) -> Self {
        Summary {
            participants: table.len(),
            done: Activity::ALL
                .into_iter()
                .map(|a| (a, table.count_done(a)))
                .collect(),
        }
    }

    /// Participants with `activity` done
    pub fn count(&self, activity: Activity) -> usize {
        self.done.get(&activity).copied().unwrap_or(0)
    }
}

/// Looks up, validates and records check-ins
#[derive(Clone)]
pub struct CheckinEngine {
    store: Arc<TableStore>,
    clock: Arc<dyn Clock>,
}

impl CheckinEngine {
    /// Engine over `store`, reading time from `clock`
    pub fn new(store: Arc<TableStore>, clock: Arc<dyn Clock>) -> Self {
        CheckinEngine { store, clock }
    }

    /// Underlying store
    pub fn store(&self) -> &Arc<TableStore> {
        &self.store
    }

    /// Record `activity` for the participant with `id_code`
    ///
    /// # Steps
    ///
    /// 1. Normalize the ID (trim, case-fold)
    /// 2. Load a fresh table and look the participant up
    /// 3. Validate against today's date in the event zone
    /// 4. Write status and timestamp through [`TableStore::update`], which
    ///    re-validates against the content it is about to overwrite
    ///
    /// Blocked and not-found requests write nothing. A write that landed but
    /// whose acknowledgement was lost is still reported as recorded. A store
    /// failure is returned as [`Outcome::PersistFailed`] and is not retried
    /// here.
    pub fn process(&self, id_code: &str, activity: Activity) -> Outcome {
        let id = IdCode::new(id_code);
        if id.is_empty() {
            return Outcome::NotFound;
        }

        let table = match self.store.load_fresh() {
            Ok(table) => table,
            Err(e) => {
                warn!(id = %id, error = %e, "could not load table");
                return Outcome::PersistFailed(e);
            }
        };
        let Some(participant) = table.participant(&id) else {
            info!(id = %id, %activity, "participant not found");
            return Outcome::NotFound;
        };

        let today = self.clock.today();
        if let Verdict::Blocked(reason) = validate(&participant, activity, today) {
            info!(id = %id, %activity, %reason, "check-in blocked");
            return Outcome::Blocked(reason);
        }

        let name = participant.display_name().to_string();
        let message = activity.describe_for(&name);
        let stamp = self.clock.stamp();

        let written = self.store.update(&message, |fresh| {
            let Some(row) = fresh.find(&id) else {
                return ControlFlow::Break(Outcome::NotFound);
            };
            match validate(&fresh.participant_at(row), activity, today) {
                Verdict::Blocked(reason) => ControlFlow::Break(Outcome::Blocked(reason)),
                Verdict::Allowed => {
                    fresh.record(row, activity, &stamp);
                    ControlFlow::Continue(())
                }
            }
        });

        match written {
            Ok(ControlFlow::Continue(())) => {
                info!(id = %id, %activity, name = %name, at = %stamp, "check-in recorded");
                Outcome::Recorded(name)
            }
            Ok(ControlFlow::Break(outcome)) => {
                info!(id = %id, %activity, outcome = outcome.kind(), "check-in superseded");
                outcome
            }
            Err(e) => {
                warn!(id = %id, %activity, error = %e, "check-in not saved");
                Outcome::PersistFailed(e)
            }
        }
    }

    /// Participant with `id_code`, from a possibly cached table
    pub fn lookup(&self, id_code: &str) -> StoreResult<Option<Participant>> {
        let id = IdCode::new(id_code);
        if id.is_empty() {
            return Ok(None);
        }
        Ok(self.store.load()?.participant(&id))
    }

    /// Read-only table for display and export, possibly cached
    pub fn snapshot(&self) -> StoreResult<Table> {
        self.store.load()
    }

    /// Dashboard counts over the current snapshot
    pub fn summary(&self) -> StoreResult<Summary> {
        Ok(Summary::of(&self.snapshot()?))
    }
}
