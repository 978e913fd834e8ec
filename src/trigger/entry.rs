// Entry point: platform-native notification flags in, one dispatch out

use serde::{Deserialize, Serialize};

use crate::trigger::context::InvocationContext;
use crate::trigger::dispatcher::{DispatchOutcome, Dispatcher};
use crate::trigger::error::EntryError;
use crate::trigger::handler::TriggerHandler;
use crate::trigger::record::Record;
use crate::types::{Operation, Phase};

/// Notification as the platform raises it: one boolean per phase and per operation,
/// plus the record lists it supplies.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformNotification<R = Record> {
    #[serde(alias = "isBefore")]
    pub is_before: bool,
    #[serde(alias = "isAfter")]
    pub is_after: bool,
    #[serde(alias = "isInsert")]
    pub is_insert: bool,
    #[serde(alias = "isUpdate")]
    pub is_update: bool,
    #[serde(alias = "isDelete")]
    pub is_delete: bool,
    #[serde(alias = "isUndelete")]
    pub is_undelete: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new: Option<Vec<R>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old: Option<Vec<R>>,
}

impl<R> PlatformNotification<R> {
    fn operation(&self) -> Result<Operation, EntryError> {
        let flagged: Vec<Operation> = [
            (self.is_insert, Operation::Insert),
            (self.is_update, Operation::Update),
            (self.is_delete, Operation::Delete),
            (self.is_undelete, Operation::Undelete),
        ]
        .into_iter()
        .filter_map(|(set, operation)| set.then_some(operation))
        .collect();

        match flagged.as_slice() {
            [operation] => Ok(*operation),
            [] => Err(EntryError::invalid("no operation flag set")),
            _ => Err(EntryError::invalid(format!("multiple operation flags set: {:?}", flagged))),
        }
    }

    fn phase(&self, operation: Operation) -> Result<Option<Phase>, EntryError> {
        match (self.is_before, self.is_after) {
            (true, true) => Err(EntryError::invalid("both before and after flags set")),
            // Undelete fires after the restore but carries no phase downstream
            (false, _) if operation == Operation::Undelete => Ok(None),
            (true, false) if operation == Operation::Undelete => {
                Err(EntryError::invalid("undelete has no before phase"))
            }
            (true, false) => Ok(Some(Phase::Before)),
            (false, true) => Ok(Some(Phase::After)),
            (false, false) => Err(EntryError::invalid(format!("no phase flag set for {}", operation))),
        }
    }
}

impl<R> TryFrom<PlatformNotification<R>> for InvocationContext<R> {
    type Error = EntryError;

    fn try_from(notification: PlatformNotification<R>) -> Result<Self, Self::Error> {
        let operation = notification.operation()?;
        let phase = notification.phase(operation)?;

        if operation.carries_new_records() && notification.new.is_none() {
            tracing::debug!("{} notification arrived without new records", operation);
        }
        if operation.carries_old_records() && notification.old.is_none() {
            tracing::debug!("{} notification arrived without old records", operation);
        }

        Ok(InvocationContext::new(phase, operation, notification.new, notification.old))
    }
}

/// Entry point adapter: translate once, dispatch once
pub struct TriggerEntry;

impl TriggerEntry {
    /// Translate a platform notification and dispatch it to the handler exactly once
    pub fn fire<R, H>(handler: &mut H, notification: PlatformNotification<R>) -> Result<DispatchOutcome, EntryError>
    where
        H: TriggerHandler<R> + ?Sized,
    {
        let context = InvocationContext::try_from(notification).map_err(|e| {
            tracing::warn!("Rejected notification for {}: {}", handler.name(), e);
            e
        })?;

        let outcome = Dispatcher::run(handler, &context)?;
        tracing::info!(
            "Notification {:?}/{} for {} finished: {:?}",
            context.phase(),
            context.operation(),
            handler.name(),
            outcome
        );
        Ok(outcome)
    }
}
