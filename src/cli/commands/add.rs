//! Add command implementation
//!
//! Drives the cascading selection non-interactively and submits the
//! resulting record (or composes and discards it with `--dry-run`).

use super::{connect, exit_code_for, ConsoleController};
use crate::cli::output::{empty_placeholder, render_records};
use crate::domain::{
    CentreId, ComposedRecord, Entity, LocationId, PatientId, SelectionLevel, SlotId,
    RECORD_COLUMNS,
};
use clap::Args;
use std::fmt::Display;

/// Arguments for the add command
#[derive(Args, Debug)]
pub struct AddArgs {
    /// Location ID
    #[arg(long)]
    pub location: LocationId,

    /// Vaccination centre ID (must belong to the location)
    #[arg(long)]
    pub centre: CentreId,

    /// Patient ID (must be registered at the centre)
    #[arg(long)]
    pub patient: PatientId,

    /// Vaccination slot ID (must belong to the patient)
    #[arg(long)]
    pub slot: SlotId,

    /// Compose the record and discard it instead of submitting
    #[arg(long)]
    pub dry_run: bool,
}

impl AddArgs {
    /// Execute the add command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(
            location = %self.location,
            centre = %self.centre,
            patient = %self.patient,
            slot = %self.slot,
            dry_run = self.dry_run,
            "Adding vaccination record"
        );

        println!("💉 Adding vaccination record");
        println!();

        let controller = match connect(config_path).await {
            Ok(controller) => controller,
            Err(code) => return Ok(code),
        };

        if let Err(code) = self.select(&controller).await {
            return Ok(code);
        }

        if self.dry_run {
            return Ok(Self::dry_run(&controller));
        }

        match controller.submit().await {
            Ok(persisted) => {
                let mut records = controller.records();
                if records.is_empty() {
                    records.push(persisted);
                }
                println!();
                print!("{}", render_records(&records));
                Ok(0)
            }
            // Already reported by the console surface
            Err(e) => Ok(exit_code_for(&e)),
        }
    }

    /// Walks the cascade, checking each id against the options offered
    async fn select(&self, controller: &ConsoleController) -> Result<(), i32> {
        controller
            .load_locations()
            .await
            .map_err(|e| exit_code_for(&e))?;
        offered(SelectionLevel::Location, self.location, controller.view().locations())?;

        controller
            .select_location(Some(self.location))
            .await
            .map_err(|e| exit_code_for(&e))?;
        offered(SelectionLevel::Centre, self.centre, controller.view().centres())?;

        controller
            .select_centre(Some(self.centre))
            .await
            .map_err(|e| exit_code_for(&e))?;
        offered(SelectionLevel::Patient, self.patient, controller.view().patients())?;

        controller
            .select_patient(Some(self.patient))
            .await
            .map_err(|e| exit_code_for(&e))?;
        offered(SelectionLevel::Slot, self.slot, controller.view().slots())?;

        controller
            .select_slot(Some(self.slot))
            .map_err(|e| exit_code_for(&e))
    }

    fn dry_run(controller: &ConsoleController) -> i32 {
        let code = match controller.compose() {
            Ok(record) => {
                println!("🔍 Dry run: composed record (not submitted)");
                println!();
                print!("{}", describe(&record));
                0
            }
            Err(e) => {
                println!("❌ {e}");
                3 // Validation error exit code
            }
        };

        controller.discard();
        println!();
        println!("🗑️  Selection discarded");
        code
    }
}

/// Fails with the validation exit code when `id` is not among `options`
fn offered<E>(level: SelectionLevel, id: E::Id, options: &[E]) -> Result<(), i32>
where
    E: Entity,
    E::Id: Display,
{
    if options.iter().any(|option| option.id() == id) {
        return Ok(());
    }

    if options.is_empty() {
        println!("❌ {level} {id} is not available: {}", empty_placeholder(level));
    } else {
        let available = options
            .iter()
            .map(|option| option.id().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        println!("❌ {level} {id} is not available (choose from: {available})");
    }
    Err(3) // Validation error exit code
}

fn describe(record: &ComposedRecord) -> String {
    let width = RECORD_COLUMNS
        .iter()
        .map(|column| column.len())
        .max()
        .unwrap_or_default();

    RECORD_COLUMNS
        .iter()
        .zip(record.cells())
        .map(|(column, value)| format!("  {column:<width$}  {value}\n"))
        .collect()
}
