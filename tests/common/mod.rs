#![allow(dead_code)]

use std::io::Write;
use std::process::{Command, Output, Stdio};

use anyhow::{Context, Result};
use serde_json::Value;
use trigger_dispatch::trigger::{HandlerError, Record, TriggerEvent, TriggerHandler};
use uuid::Uuid;

/// Record fixture with a fresh id and a name field
pub fn record(name: &str) -> Record {
    Record::with_id(Uuid::new_v4()).set("name", name)
}

/// (event, old names, new names) as seen by a Journal
pub type Entry = (TriggerEvent, Vec<String>, Vec<String>);

/// Handler that journals every call by record name
#[derive(Debug, Default)]
pub struct Journal {
    pub entries: Vec<Entry>,
    pub disabled: bool,
    pub fail_with: Option<String>,
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn disabled() -> Self {
        Self { disabled: true, ..Self::default() }
    }

    pub fn failing(message: &str) -> Self {
        Self { fail_with: Some(message.to_string()), ..Self::default() }
    }

    fn note(&mut self, event: TriggerEvent, old: &[Record], new: &[Record]) -> Result<(), HandlerError> {
        self.entries.push((event, names(old), names(new)));
        match &self.fail_with {
            Some(message) => Err(HandlerError::validation(message.clone())),
            None => Ok(()),
        }
    }
}

pub fn names(records: &[Record]) -> Vec<String> {
    records
        .iter()
        .filter_map(|r| r.get("name").and_then(Value::as_str).map(str::to_string))
        .collect()
}

pub fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl TriggerHandler for Journal {
    fn name(&self) -> &str {
        "Journal"
    }

    fn is_disabled(&self) -> bool {
        self.disabled
    }

    fn before_insert(&mut self, new: &[Record]) -> Result<(), HandlerError> {
        self.note(TriggerEvent::BeforeInsert, &[], new)
    }

    fn before_update(&mut self, old: &[Record], new: &[Record]) -> Result<(), HandlerError> {
        self.note(TriggerEvent::BeforeUpdate, old, new)
    }

    fn before_delete(&mut self, old: &[Record]) -> Result<(), HandlerError> {
        self.note(TriggerEvent::BeforeDelete, old, &[])
    }

    fn after_insert(&mut self, new: &[Record]) -> Result<(), HandlerError> {
        self.note(TriggerEvent::AfterInsert, &[], new)
    }

    fn after_update(&mut self, old: &[Record], new: &[Record]) -> Result<(), HandlerError> {
        self.note(TriggerEvent::AfterUpdate, old, new)
    }

    fn after_delete(&mut self, old: &[Record]) -> Result<(), HandlerError> {
        self.note(TriggerEvent::AfterDelete, old, &[])
    }

    fn after_undelete(&mut self, new: &[Record]) -> Result<(), HandlerError> {
        self.note(TriggerEvent::AfterUndelete, &[], new)
    }
}

/// Run the built binary with the given args, env, and stdin
pub fn run_cli(args: &[&str], envs: &[(&str, &str)], stdin: &str) -> Result<Output> {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_trigger-dispatch"));
    cmd.args(args)
        .env_remove("TRIGGER_DISABLE_ALL")
        .env_remove("TRIGGER_DISABLED_HANDLERS")
        .env_remove("TRIGGER_SETTINGS_FILE")
        .env_remove("APP_ENV")
        .env_remove("LOG_FILTER")
        .env("RUST_LOG", "off")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    for (key, value) in envs {
        cmd.env(key, value);
    }

    let mut child = cmd.spawn().context("failed to spawn trigger-dispatch binary")?;
    child
        .stdin
        .take()
        .context("stdin not captured")?
        .write_all(stdin.as_bytes())?;
    child.wait_with_output().context("failed to wait for trigger-dispatch")
}
