//! Records command implementation

use super::{connect, exit_code_for};
use crate::cli::output::render_records;
use clap::Args;

/// Arguments for the records command
#[derive(Args, Debug)]
pub struct RecordsArgs {
    /// Print records as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

impl RecordsArgs {
    /// Execute the records command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let controller = match connect(config_path).await {
            Ok(controller) => controller,
            Err(code) => return Ok(code),
        };

        if let Err(e) = controller.load_records().await {
            return Ok(exit_code_for(&e));
        }

        let records = controller.records();
        if self.json {
            println!("{}", serde_json::to_string_pretty(&records)?);
        } else if records.is_empty() {
            println!("No records yet");
        } else {
            print!("{}", render_records(&records));
            println!();
            println!("{} record(s)", records.len());
        }

        Ok(0)
    }
}
