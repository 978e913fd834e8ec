use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::trigger::{DisableSwitch, FieldChange, HandlerError, Record, RecordDiff, TriggerEvent, TriggerHandler};

/// One line of the audit trail
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditEntry {
    pub event: TriggerEvent,
    pub record_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub changes: Vec<FieldChange>,
    pub recorded_at: DateTime<Utc>,
}

/// Records an audit entry for every committed change.
///
/// Updates log only records whose fields actually changed; before-phase hooks check
/// that the platform handed over consistent record lists.
#[derive(Debug)]
pub struct AuditTrailHandler {
    name: String,
    switch: DisableSwitch,
    entries: Vec<AuditEntry>,
}

impl AuditTrailHandler {
    pub const NAME: &'static str = "AuditTrailHandler";

    pub fn new(switch: DisableSwitch) -> Self {
        Self::named(Self::NAME, switch)
    }

    pub fn named(name: impl Into<String>, switch: DisableSwitch) -> Self {
        Self {
            name: name.into(),
            switch,
            entries: Vec::new(),
        }
    }

    pub fn entries(&self) -> &[AuditEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<AuditEntry> {
        self.entries
    }

    fn push(&mut self, event: TriggerEvent, record: &Record, changes: Vec<FieldChange>) {
        tracing::info!(
            "Audit {}: record={:?} changed_fields={}",
            event.method_name(),
            record.id(),
            changes.len()
        );
        self.entries.push(AuditEntry {
            event,
            record_id: record.id(),
            changes,
            recorded_at: Utc::now(),
        });
    }

    fn log_all(&mut self, event: TriggerEvent, records: &[Record]) {
        for record in records {
            self.push(event, record, Vec::new());
        }
    }
}

/// Update lists pair old and new snapshots by position
fn check_paired(old: &[Record], new: &[Record]) -> Result<(), HandlerError> {
    if old.len() != new.len() {
        return Err(HandlerError::precondition(format!(
            "update carries {} old and {} new records",
            old.len(),
            new.len()
        )));
    }
    Ok(())
}

impl TriggerHandler for AuditTrailHandler {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_disabled(&self) -> bool {
        self.switch.is_disabled()
    }

    fn before_update(&mut self, old: &[Record], new: &[Record]) -> Result<(), HandlerError> {
        check_paired(old, new)
    }

    fn before_delete(&mut self, old: &[Record]) -> Result<(), HandlerError> {
        match old.iter().position(|record| record.id().is_none()) {
            Some(index) => Err(HandlerError::validation(format!("deleted record #{} has no id", index))),
            None => Ok(()),
        }
    }

    fn after_insert(&mut self, new: &[Record]) -> Result<(), HandlerError> {
        self.log_all(TriggerEvent::AfterInsert, new);
        Ok(())
    }

    fn after_update(&mut self, old: &[Record], new: &[Record]) -> Result<(), HandlerError> {
        check_paired(old, new)?;
        for (before, after) in old.iter().zip(new) {
            let diff = RecordDiff::between(before, after);
            if diff.has_changes() {
                self.push(TriggerEvent::AfterUpdate, after, diff.changes());
            } else {
                tracing::trace!("Audit skipped unchanged record {:?}", after.id());
            }
        }
        Ok(())
    }

    fn after_delete(&mut self, old: &[Record]) -> Result<(), HandlerError> {
        self.log_all(TriggerEvent::AfterDelete, old);
        Ok(())
    }

    fn after_undelete(&mut self, new: &[Record]) -> Result<(), HandlerError> {
        self.log_all(TriggerEvent::AfterUndelete, new);
        Ok(())
    }
}
