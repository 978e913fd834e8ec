use serde_json::json;

use crate::cli::utils::output_success;
use crate::cli::OutputFormat;
use crate::config::config;

pub fn handle(output_format: OutputFormat) -> anyhow::Result<()> {
    let config = config();

    match output_format {
        OutputFormat::Json => output_success(
            &output_format,
            "Effective configuration",
            Some(json!({ "config": config })),
        ),
        OutputFormat::Text => {
            println!("Environment:      {:?}", config.environment);
            println!("Log filter:       {}", config.logging.filter);
            println!("Disable all:      {}", config.triggers.disable_all);
            if config.triggers.disabled_handlers.is_empty() {
                println!("Disabled handlers: (none)");
            } else {
                for name in &config.triggers.disabled_handlers {
                    println!("Disabled handler: {}", name);
                }
            }
            Ok(())
        }
    }
}
