//! Exit codes for the suite runner.
//!
//! Lets CI tell a behavioral regression apart from a broken fixture or an
//! unreachable service.

use crate::error::SuiteError;
use crate::suite::{OutcomeKind, ScenarioReport};

/// Success - every selected scenario passed.
pub const SUCCESS: i32 = 0;

/// Failed - at least one scenario assertion did not hold.
pub const FAILED: i32 = 1;

/// Usage error - invalid arguments, unknown scenario, missing credentials.
pub const USAGE: i32 = 2;

/// Setup error - fixture state or local files were not as required.
pub const SETUP: i32 = 3;

/// Network error - the service could not be reached.
pub const NETWORK: i32 = 4;

/// Internal error - unexpected error occurred.
pub const INTERNAL: i32 = 7;

/// Exit code for a finished run. Network beats setup beats assertion.
pub fn from_reports(reports: &[ScenarioReport]) -> i32 {
    let has = |kind: OutcomeKind| reports.iter().any(|r| r.outcome == kind);

    if has(OutcomeKind::TransportError) {
        NETWORK
    } else if has(OutcomeKind::SetupFailed) {
        SETUP
    } else if has(OutcomeKind::Failed) {
        FAILED
    } else {
        SUCCESS
    }
}

/// Exit code for an error that aborted the runner before reporting.
pub fn from_error(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<SuiteError>() {
        Some(SuiteError::Network(_)) => NETWORK,
        Some(SuiteError::PhotoRead { .. }) => SETUP,
        Some(SuiteError::MissingCredentials | SuiteError::UnknownScenario(_)) => USAGE,
        Some(
            SuiteError::ConfigRead(_)
            | SuiteError::ConfigWrite(_)
            | SuiteError::ConfigParse(_)
            | SuiteError::ConfigSerialize(_),
        ) => USAGE,
        _ => INTERNAL,
    }
}
