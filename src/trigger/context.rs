use serde::Serialize;
use std::collections::HashMap;
use uuid::Uuid;

use crate::trigger::record::Record;
use crate::types::{Operation, Phase};

/// The seven (phase, operation) combinations a platform can deliver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerEvent {
    BeforeInsert,
    BeforeUpdate,
    BeforeDelete,
    AfterInsert,
    AfterUpdate,
    AfterDelete,
    AfterUndelete,
}

impl TriggerEvent {
    pub const ALL: [TriggerEvent; 7] = [
        TriggerEvent::BeforeInsert,
        TriggerEvent::BeforeUpdate,
        TriggerEvent::BeforeDelete,
        TriggerEvent::AfterInsert,
        TriggerEvent::AfterUpdate,
        TriggerEvent::AfterDelete,
        TriggerEvent::AfterUndelete,
    ];

    /// Routing table: (phase, operation) to event. Anything not listed has no handler method.
    pub fn route(phase: Option<Phase>, operation: Operation) -> Option<Self> {
        use Operation::*;
        use Phase::*;

        match (phase, operation) {
            (Some(Before), Insert) => Some(TriggerEvent::BeforeInsert),
            (Some(Before), Update) => Some(TriggerEvent::BeforeUpdate),
            (Some(Before), Delete) => Some(TriggerEvent::BeforeDelete),
            (Some(After), Insert) => Some(TriggerEvent::AfterInsert),
            (Some(After), Update) => Some(TriggerEvent::AfterUpdate),
            (Some(After), Delete) => Some(TriggerEvent::AfterDelete),
            (None, Undelete) => Some(TriggerEvent::AfterUndelete),
            (Some(_), Undelete) | (None, Insert | Update | Delete) => None,
        }
    }

    /// Phase as carried by the context; undelete has none
    pub fn phase(&self) -> Option<Phase> {
        match self {
            TriggerEvent::BeforeInsert | TriggerEvent::BeforeUpdate | TriggerEvent::BeforeDelete => {
                Some(Phase::Before)
            }
            TriggerEvent::AfterInsert | TriggerEvent::AfterUpdate | TriggerEvent::AfterDelete => {
                Some(Phase::After)
            }
            TriggerEvent::AfterUndelete => None,
        }
    }

    pub fn operation(&self) -> Operation {
        match self {
            TriggerEvent::BeforeInsert | TriggerEvent::AfterInsert => Operation::Insert,
            TriggerEvent::BeforeUpdate | TriggerEvent::AfterUpdate => Operation::Update,
            TriggerEvent::BeforeDelete | TriggerEvent::AfterDelete => Operation::Delete,
            TriggerEvent::AfterUndelete => Operation::Undelete,
        }
    }

    /// Name of the handler method this event invokes
    pub fn method_name(&self) -> &'static str {
        match self {
            TriggerEvent::BeforeInsert => "before_insert",
            TriggerEvent::BeforeUpdate => "before_update",
            TriggerEvent::BeforeDelete => "before_delete",
            TriggerEvent::AfterInsert => "after_insert",
            TriggerEvent::AfterUpdate => "after_update",
            TriggerEvent::AfterDelete => "after_delete",
            TriggerEvent::AfterUndelete => "after_undelete",
        }
    }
}

/// Immutable snapshot describing one lifecycle notification
#[derive(Debug, Clone, PartialEq)]
pub struct InvocationContext<R = Record> {
    phase: Option<Phase>,
    operation: Operation,
    new_records: Option<Vec<R>>,
    old_records: Option<Vec<R>>,
}

impl<R> InvocationContext<R> {
    /// Build a context from raw platform parts. Any combination is accepted;
    /// combinations outside the routing table dispatch to nothing.
    pub fn new(
        phase: Option<Phase>,
        operation: Operation,
        new_records: Option<Vec<R>>,
        old_records: Option<Vec<R>>,
    ) -> Self {
        Self {
            phase,
            operation,
            new_records,
            old_records,
        }
    }

    pub fn before_insert(new_records: Vec<R>) -> Self {
        Self::new(Some(Phase::Before), Operation::Insert, Some(new_records), None)
    }

    pub fn before_update(old_records: Vec<R>, new_records: Vec<R>) -> Self {
        Self::new(Some(Phase::Before), Operation::Update, Some(new_records), Some(old_records))
    }

    pub fn before_delete(old_records: Vec<R>) -> Self {
        Self::new(Some(Phase::Before), Operation::Delete, None, Some(old_records))
    }

    pub fn after_insert(new_records: Vec<R>) -> Self {
        Self::new(Some(Phase::After), Operation::Insert, Some(new_records), None)
    }

    pub fn after_update(old_records: Vec<R>, new_records: Vec<R>) -> Self {
        Self::new(Some(Phase::After), Operation::Update, Some(new_records), Some(old_records))
    }

    pub fn after_delete(old_records: Vec<R>) -> Self {
        Self::new(Some(Phase::After), Operation::Delete, None, Some(old_records))
    }

    pub fn after_undelete(new_records: Vec<R>) -> Self {
        Self::new(None, Operation::Undelete, Some(new_records), None)
    }

    pub fn phase(&self) -> Option<Phase> {
        self.phase
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    /// The routed event, `None` when the (phase, operation) pair has no handler method
    pub fn event(&self) -> Option<TriggerEvent> {
        TriggerEvent::route(self.phase, self.operation)
    }

    /// Snapshots after the pending change; empty when the platform supplied none
    pub fn new_records(&self) -> &[R] {
        self.new_records.as_deref().unwrap_or(&[])
    }

    /// Snapshots before the change; empty when the platform supplied none
    pub fn old_records(&self) -> &[R] {
        self.old_records.as_deref().unwrap_or(&[])
    }

    pub fn has_new_records(&self) -> bool {
        self.new_records.is_some()
    }

    pub fn has_old_records(&self) -> bool {
        self.old_records.is_some()
    }

    /// Number of records covered by the notification
    pub fn size(&self) -> usize {
        self.new_records().len().max(self.old_records().len())
    }
}

impl InvocationContext<Record> {
    /// New snapshots keyed by record id; records without an id are left out
    pub fn new_map(&self) -> HashMap<Uuid, &Record> {
        index_by_id(self.new_records())
    }

    /// Old snapshots keyed by record id; records without an id are left out
    pub fn old_map(&self) -> HashMap<Uuid, &Record> {
        index_by_id(self.old_records())
    }
}

fn index_by_id(records: &[Record]) -> HashMap<Uuid, &Record> {
    records
        .iter()
        .filter_map(|record| record.id().map(|id| (id, record)))
        .collect()
}
