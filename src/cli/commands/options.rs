//! Options command implementation
//!
//! Lists what can be selected at each level for a partial selection.

use super::{connect, exit_code_for};
use crate::cli::output::empty_placeholder;
use crate::core::selection::SelectionState;
use crate::domain::{CentreId, LocationId, PatientId, SelectionLevel};
use clap::Args;

/// Arguments for the options command
#[derive(Args, Debug)]
pub struct OptionsArgs {
    /// Location ID to list centres for
    #[arg(long)]
    pub location: Option<LocationId>,

    /// Centre ID to list patients for (requires --location)
    #[arg(long, requires = "location")]
    pub centre: Option<CentreId>,

    /// Patient ID to list slots for (requires --centre)
    #[arg(long, requires = "centre")]
    pub patient: Option<PatientId>,
}

impl OptionsArgs {
    /// Execute the options command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let controller = match connect(config_path).await {
            Ok(controller) => controller,
            Err(code) => return Ok(code),
        };

        if let Err(e) = controller.load_locations().await {
            return Ok(exit_code_for(&e));
        }

        if let Err(e) = controller.select_location(self.location).await {
            return Ok(exit_code_for(&e));
        }
        if let Err(e) = controller.select_centre(self.centre).await {
            return Ok(exit_code_for(&e));
        }
        if let Err(e) = controller.select_patient(self.patient).await {
            return Ok(exit_code_for(&e));
        }

        print!("{}", render_options(&controller.view()));
        Ok(0)
    }
}

/// Renders every level whose upstream is selected
fn render_options(view: &SelectionState) -> String {
    let mut out = String::new();

    section(
        &mut out,
        "📍 Locations",
        SelectionLevel::Location,
        view.locations()
            .iter()
            .map(|l| format!("{}  {}, {}, {}", l.id, l.city, l.state, l.country)),
    );

    if view.location().is_some() {
        section(
            &mut out,
            "🏥 Centres",
            SelectionLevel::Centre,
            view.centres()
                .iter()
                .map(|c| format!("{}  {} ({})", c.id, c.name, c.address)),
        );
    }

    if view.centre().is_some() {
        section(
            &mut out,
            "🧑 Patients",
            SelectionLevel::Patient,
            view.patients()
                .iter()
                .map(|p| format!("{}  {}, {} ({})", p.id, p.patient_name, p.age, p.gender)),
        );
    }

    if view.patient().is_some() {
        section(
            &mut out,
            "📅 Slots",
            SelectionLevel::Slot,
            view.slots().iter().map(|s| {
                format!(
                    "{}  {} on {} at {} ({} available)",
                    s.id, s.slot_type, s.date, s.time, s.available_slots
                )
            }),
        );
    }

    out
}

fn section(
    out: &mut String,
    title: &str,
    level: SelectionLevel,
    lines: impl Iterator<Item = String>,
) {
    out.push_str(title);
    out.push('\n');

    let mut empty = true;
    for line in lines {
        empty = false;
        out.push_str("  ");
        out.push_str(&line);
        out.push('\n');
    }
    if empty {
        out.push_str("  ");
        out.push_str(empty_placeholder(level));
        out.push('\n');
    }
    out.push('\n');
}
