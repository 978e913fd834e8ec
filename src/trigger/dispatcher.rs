// Stateless router from a lifecycle notification to exactly one handler method

use serde::Serialize;

use crate::trigger::context::{InvocationContext, TriggerEvent};
use crate::trigger::error::HandlerError;
use crate::trigger::handler::TriggerHandler;

/// What a single dispatch did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "event", rename_all = "snake_case")]
pub enum DispatchOutcome {
    /// The handler's gate was closed; nothing ran
    Disabled,
    /// The (phase, operation) pair has no handler method; nothing ran
    Unrouted,
    /// Exactly this handler method ran and returned Ok
    Invoked(TriggerEvent),
}

/// Routes lifecycle notifications to handler methods.
///
/// Holds no state, so calls may nest (a handler firing further notifications) or
/// run in parallel on independent contexts without coordination.
#[derive(Debug, Clone, Copy, Default)]
pub struct Dispatcher;

impl Dispatcher {
    /// Invoke the one handler method matching the context.
    ///
    /// Handler errors come back unmodified; the dispatcher does not retry, wrap, or log them.
    pub fn run<R, H>(handler: &mut H, context: &InvocationContext<R>) -> Result<DispatchOutcome, HandlerError>
    where
        H: TriggerHandler<R> + ?Sized,
    {
        if handler.is_disabled() {
            tracing::debug!("Handler {} is disabled, skipping dispatch", handler.name());
            return Ok(DispatchOutcome::Disabled);
        }

        let event = match context.event() {
            Some(event) => event,
            None => {
                tracing::trace!(
                    "No handler method for phase={:?} operation={}, nothing to dispatch",
                    context.phase(),
                    context.operation()
                );
                return Ok(DispatchOutcome::Unrouted);
            }
        };

        tracing::debug!(
            "Dispatching {} to {}::{} ({} records)",
            context.operation(),
            handler.name(),
            event.method_name(),
            context.size()
        );

        Self::invoke(handler, event, context)?;

        Ok(DispatchOutcome::Invoked(event))
    }

    fn invoke<R, H>(handler: &mut H, event: TriggerEvent, context: &InvocationContext<R>) -> Result<(), HandlerError>
    where
        H: TriggerHandler<R> + ?Sized,
    {
        let new = context.new_records();
        let old = context.old_records();

        match event {
            TriggerEvent::BeforeInsert => handler.before_insert(new),
            TriggerEvent::BeforeUpdate => handler.before_update(old, new),
            TriggerEvent::BeforeDelete => handler.before_delete(old),
            TriggerEvent::AfterInsert => handler.after_insert(new),
            TriggerEvent::AfterUpdate => handler.after_update(old, new),
            TriggerEvent::AfterDelete => handler.after_delete(old),
            TriggerEvent::AfterUndelete => handler.after_undelete(new),
        }
    }
}
