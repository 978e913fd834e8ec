use anyhow::Context;
use clap::Args;
use serde_json::json;
use std::io::Read;
use std::path::PathBuf;

use crate::cli::utils::{output_error, output_success};
use crate::cli::OutputFormat;
use crate::config::config;
use crate::handlers::AuditTrailHandler;
use crate::trigger::{DisableSwitch, EntryError, PlatformNotification, TriggerEntry};

#[derive(Args, Debug)]
pub struct FireArgs {
    #[arg(long, short, default_value = "-", help = "Notification JSON file, or - for stdin")]
    pub notification: String,

    #[arg(long, default_value = AuditTrailHandler::NAME, help = "Handler name used for settings lookups")]
    pub handler_name: String,
}

pub fn handle(args: FireArgs, output_format: OutputFormat) -> anyhow::Result<()> {
    let source = read_source(&args.notification)?;
    let notification: PlatformNotification =
        serde_json::from_str(&source).context("notification is not valid JSON")?;

    let switch = DisableSwitch::from_settings(args.handler_name.clone(), config().trigger_settings());
    let mut handler = AuditTrailHandler::named(args.handler_name, switch);

    match TriggerEntry::fire(&mut handler, notification) {
        Ok(outcome) => {
            let entries = handler.into_entries();
            output_success(
                &output_format,
                &format!("Dispatch finished with {} audit entries", entries.len()),
                Some(json!({ "dispatch": outcome, "entries": entries })),
            )?;
            if output_format == OutputFormat::Text {
                for entry in &entries {
                    let fields: Vec<&str> = entry.changes.iter().map(|c| c.field.as_str()).collect();
                    println!("  {} {:?} [{}]", entry.event.method_name(), entry.record_id, fields.join(", "));
                }
            }
            Ok(())
        }
        Err(e) => {
            // Text mode leaves the error line to main
            if output_format == OutputFormat::Json {
                let code = match &e {
                    EntryError::InvalidNotification(_) => "INVALID_NOTIFICATION",
                    EntryError::Handler(_) => "HANDLER_ERROR",
                };
                output_error(&output_format, &e.to_string(), Some(code))?;
            }
            Err(e.into())
        }
    }
}

fn read_source(location: &str) -> anyhow::Result<String> {
    if location == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("failed to read notification from stdin")?;
        Ok(buffer)
    } else {
        let path = PathBuf::from(location);
        std::fs::read_to_string(&path).with_context(|| format!("failed to read {}", path.display()))
    }
}
