use crate::cli::RunArgs;
use crate::config::Context;
use crate::exit_codes;
use crate::output::{OutputConfig, print_reports};
use crate::suite::{Scenario, SuiteContext, run_scenarios};
use anyhow::Result;
use tracing::info;

/// Run the selected scenarios and print the report.
///
/// Returns the process exit code derived from the outcomes.
pub async fn execute(ctx: &Context, args: RunArgs) -> Result<i32> {
    let selection = select(&args.scenarios)?;
    let suite = SuiteContext::from_context(ctx)?;

    info!(
        base_url = suite.client.base_url(),
        count = selection.len(),
        "starting run"
    );

    let reports = run_scenarios(&suite, &selection).await;
    print_reports(&reports, &OutputConfig::from_context(ctx))?;

    Ok(exit_codes::from_reports(&reports))
}

/// Resolve scenario names, keeping the catalogue order when none are given.
fn select(names: &[String]) -> Result<Vec<Scenario>> {
    if names.is_empty() {
        return Ok(Scenario::ALL.to_vec());
    }
    names
        .iter()
        .map(|name| Scenario::from_name(name).map_err(Into::into))
        .collect()
}
