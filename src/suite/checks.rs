//! Assertion helpers that turn mismatches into [`ScenarioFailure::Assertion`].

use super::ScenarioFailure;
use crate::types::{ApiResponse, Pet};

pub fn expect_status<T>(
    response: &ApiResponse<T>,
    expected: u16,
    operation: &str,
) -> Result<(), ScenarioFailure> {
    if response.status == expected {
        return Ok(());
    }
    Err(ScenarioFailure::assertion(format!(
        "{}: expected status {}, got {}",
        operation, expected, response.status
    )))
}

pub fn expect(condition: bool, msg: impl FnOnce() -> String) -> Result<(), ScenarioFailure> {
    if condition {
        Ok(())
    } else {
        Err(ScenarioFailure::Assertion(msg()))
    }
}

/// The rejected operation must leave the listing exactly as it was.
pub fn expect_unchanged(
    before: &[Pet],
    after: &[Pet],
    operation: &str,
) -> Result<(), ScenarioFailure> {
    if before == after {
        return Ok(());
    }
    Err(ScenarioFailure::assertion(format!(
        "{} was rejected but changed my_pets ({} pets before, {} after{})",
        operation,
        before.len(),
        after.len(),
        first_difference(before, after)
            .map(|d| format!("; {}", d))
            .unwrap_or_default()
    )))
}

fn first_difference(before: &[Pet], after: &[Pet]) -> Option<String> {
    before
        .iter()
        .zip(after)
        .enumerate()
        .find(|(_, (b, a))| b != a)
        .map(|(i, (b, a))| {
            format!(
                "pet #{} was {}/{}/{}/{}, now {}/{}/{}/{}",
                i, b.id, b.name, b.animal_type, b.age, a.id, a.name, a.animal_type, a.age
            )
        })
}
