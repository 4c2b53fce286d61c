use crate::cli::OutputFormat;
use crate::config::Context;
use crate::suite::{OutcomeKind, Scenario, ScenarioReport};
use console::{Style, style};
use serde::Serialize;
use tabled::{Table, Tabled};

/// Configuration for output formatting.
#[derive(Debug, Clone, Default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub no_color: bool,
}

impl OutputConfig {
    pub fn from_context(ctx: &Context) -> Self {
        Self {
            format: ctx.output_format(),
            no_color: ctx.no_color(),
        }
    }
}

/// Print data as a table
pub fn print_table<T: Tabled>(data: Vec<T>) {
    if data.is_empty() {
        println!("{}", style("No items found").dim());
        return;
    }
    let table = Table::new(data).to_string();
    println!("{}", table);
}

/// Print data as JSON
pub fn print_json<T: Serialize>(data: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(data)?;
    println!("{}", json);
    Ok(())
}

#[derive(Tabled, Serialize)]
pub struct ScenarioRow {
    #[tabled(rename = "SCENARIO")]
    pub name: &'static str,
    #[tabled(rename = "DESCRIPTION")]
    pub description: &'static str,
}

impl From<Scenario> for ScenarioRow {
    fn from(scenario: Scenario) -> Self {
        Self {
            name: scenario.name(),
            description: scenario.description(),
        }
    }
}

#[derive(Tabled)]
pub struct ReportRow {
    #[tabled(rename = "SCENARIO")]
    pub scenario: &'static str,
    #[tabled(rename = "RESULT")]
    pub result: String,
    #[tabled(rename = "TIME")]
    pub time: String,
    #[tabled(rename = "DETAIL")]
    pub detail: String,
}

impl ReportRow {
    pub fn new(report: &ScenarioReport, config: &OutputConfig) -> Self {
        Self {
            scenario: report.scenario,
            result: format_outcome(report.outcome, config.no_color),
            time: format!("{}ms", report.elapsed_ms),
            detail: report.detail.clone().unwrap_or_default(),
        }
    }
}

/// Totals per outcome.
#[derive(Debug, Default, Serialize, PartialEq, Eq)]
pub struct Summary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub setup_failed: usize,
    pub transport_errors: usize,
}

impl Summary {
    pub fn from_reports(reports: &[ScenarioReport]) -> Self {
        let mut summary = Self {
            total: reports.len(),
            ..Self::default()
        };
        for report in reports {
            match report.outcome {
                OutcomeKind::Passed => summary.passed += 1,
                OutcomeKind::Failed => summary.failed += 1,
                OutcomeKind::SetupFailed => summary.setup_failed += 1,
                OutcomeKind::TransportError => summary.transport_errors += 1,
            }
        }
        summary
    }

    pub fn all_passed(&self) -> bool {
        self.passed == self.total
    }
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} scenarios: {} passed, {} failed, {} setup failures, {} transport errors",
            self.total, self.passed, self.failed, self.setup_failed, self.transport_errors
        )
    }
}

#[derive(Serialize)]
struct RunOutput<'a> {
    summary: Summary,
    scenarios: &'a [ScenarioReport],
}

/// Print a finished run in the configured format.
pub fn print_reports(reports: &[ScenarioReport], config: &OutputConfig) -> anyhow::Result<()> {
    let summary = Summary::from_reports(reports);

    match config.format {
        OutputFormat::Json => print_json(&RunOutput {
            summary,
            scenarios: reports,
        })?,
        OutputFormat::Table => {
            print_table(
                reports
                    .iter()
                    .map(|r| ReportRow::new(r, config))
                    .collect::<Vec<_>>(),
            );
            println!();
            if summary.all_passed() {
                print_success_cfg(&summary.to_string(), config);
            } else {
                print_error_cfg(&summary.to_string(), config);
            }
        }
    }
    Ok(())
}

pub fn outcome_style(outcome: OutcomeKind) -> Style {
    match outcome {
        OutcomeKind::Passed => Style::new().green(),
        OutcomeKind::Failed => Style::new().red().bold(),
        OutcomeKind::SetupFailed => Style::new().yellow(),
        OutcomeKind::TransportError => Style::new().magenta(),
    }
}

pub fn format_outcome(outcome: OutcomeKind, no_color: bool) -> String {
    if no_color {
        outcome.as_str().to_string()
    } else {
        outcome_style(outcome).apply_to(outcome.as_str()).to_string()
    }
}

/// Print a success message with config awareness.
pub fn print_success_cfg(msg: &str, config: &OutputConfig) {
    if config.no_color {
        println!("✓ {}", msg);
    } else {
        println!("{} {}", style("✓").green().bold(), msg);
    }
}

/// Print an error message with config awareness.
pub fn print_error_cfg(msg: &str, config: &OutputConfig) {
    if config.no_color {
        eprintln!("✗ {}", msg);
    } else {
        eprintln!("{} {}", style("✗").red().bold(), msg);
    }
}
