use std::fmt::Debug;

use crate::trigger::{HandlerError, TriggerEvent, TriggerHandler};

/// One observed handler invocation
#[derive(Debug, Clone, PartialEq)]
pub struct Call<R> {
    pub event: TriggerEvent,
    pub old: Vec<R>,
    pub new: Vec<R>,
}

impl<R: Clone> Call<R> {
    pub fn new(event: TriggerEvent, old: &[R], new: &[R]) -> Self {
        Self {
            event,
            old: old.to_vec(),
            new: new.to_vec(),
        }
    }
}

/// Test handler that records every lifecycle call it receives
#[derive(Debug)]
pub struct RecordingHandler<R> {
    pub calls: Vec<Call<R>>,
    disabled: bool,
    fail_on: Option<(TriggerEvent, String)>,
}

impl<R: Clone + Debug> RecordingHandler<R> {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            disabled: false,
            fail_on: None,
        }
    }

    pub fn disabled() -> Self {
        Self {
            disabled: true,
            ..Self::new()
        }
    }

    /// Handler that records the call and then fails with a precondition error
    pub fn failing_on(event: TriggerEvent, message: &str) -> Self {
        Self {
            fail_on: Some((event, message.to_string())),
            ..Self::new()
        }
    }

    fn record(&mut self, event: TriggerEvent, old: &[R], new: &[R]) -> Result<(), HandlerError> {
        self.calls.push(Call::new(event, old, new));
        match &self.fail_on {
            Some((failing, message)) if *failing == event => Err(HandlerError::precondition(message.clone())),
            _ => Ok(()),
        }
    }
}

impl<R: Clone + Debug> TriggerHandler<R> for RecordingHandler<R> {
    fn name(&self) -> &str {
        "RecordingHandler"
    }

    fn is_disabled(&self) -> bool {
        self.disabled
    }

    fn before_insert(&mut self, new: &[R]) -> Result<(), HandlerError> {
        self.record(TriggerEvent::BeforeInsert, &[], new)
    }

    fn before_update(&mut self, old: &[R], new: &[R]) -> Result<(), HandlerError> {
        self.record(TriggerEvent::BeforeUpdate, old, new)
    }

    fn before_delete(&mut self, old: &[R]) -> Result<(), HandlerError> {
        self.record(TriggerEvent::BeforeDelete, old, &[])
    }

    fn after_insert(&mut self, new: &[R]) -> Result<(), HandlerError> {
        self.record(TriggerEvent::AfterInsert, &[], new)
    }

    fn after_update(&mut self, old: &[R], new: &[R]) -> Result<(), HandlerError> {
        self.record(TriggerEvent::AfterUpdate, old, new)
    }

    fn after_delete(&mut self, old: &[R]) -> Result<(), HandlerError> {
        self.record(TriggerEvent::AfterDelete, old, &[])
    }

    fn after_undelete(&mut self, new: &[R]) -> Result<(), HandlerError> {
        self.record(TriggerEvent::AfterUndelete, &[], new)
    }
}
