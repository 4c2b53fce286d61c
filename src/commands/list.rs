use crate::cli::OutputFormat;
use crate::config::Context;
use crate::output::{ScenarioRow, print_json, print_table};
use crate::suite::Scenario;
use anyhow::Result;

/// Print the scenario catalogue.
pub fn execute(ctx: &Context) -> Result<()> {
    let rows: Vec<ScenarioRow> = Scenario::ALL.into_iter().map(ScenarioRow::from).collect();

    match ctx.output_format() {
        OutputFormat::Table => print_table(rows),
        OutputFormat::Json => print_json(&rows)?,
    }
    Ok(())
}
