//! Negative scenarios against the PetFriends API.
//!
//! Each [`Scenario`] is independent and runs against an explicitly passed
//! [`SuiteContext`]. Outcomes separate broken fixtures ([`ScenarioFailure::Setup`])
//! from behavioral regressions ([`ScenarioFailure::Assertion`]) and from the
//! service being unreachable ([`ScenarioFailure::Transport`]).

pub mod checks;
pub mod fixtures;
pub mod scenarios;

use crate::client::PetFriends;
use crate::config::Context;
use crate::error::SuiteError;
use crate::types::Credentials;
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use thiserror::Error;
use tracing::{info, warn};

/// Everything a scenario needs. Built once, passed by reference.
#[derive(Debug, Clone)]
pub struct SuiteContext {
    pub client: PetFriends,
    pub credentials: Credentials,
    pub images_dir: PathBuf,
}

impl SuiteContext {
    pub fn new(client: PetFriends, credentials: Credentials, images_dir: PathBuf) -> Self {
        Self {
            client,
            credentials,
            images_dir,
        }
    }

    pub fn from_context(ctx: &Context) -> Result<Self, SuiteError> {
        Ok(Self::new(
            PetFriends::from_context(ctx)?,
            ctx.credentials()?,
            ctx.images_dir(),
        ))
    }

    pub fn photo(&self, file_name: &str) -> PathBuf {
        self.images_dir.join(file_name)
    }
}

#[derive(Error, Debug)]
pub enum ScenarioFailure {
    #[error("setup failed: {0}")]
    Setup(String),

    #[error("assertion failed: {0}")]
    Assertion(String),

    #[error("transport failed: {0}")]
    Transport(SuiteError),
}

impl ScenarioFailure {
    pub fn setup(msg: impl Into<String>) -> Self {
        Self::Setup(msg.into())
    }

    pub fn assertion(msg: impl Into<String>) -> Self {
        Self::Assertion(msg.into())
    }
}

impl From<SuiteError> for ScenarioFailure {
    fn from(err: SuiteError) -> Self {
        if err.is_transport() {
            Self::Transport(err)
        } else {
            Self::Setup(err.to_string())
        }
    }
}

pub type ScenarioResult = Result<(), ScenarioFailure>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    Passed,
    Failed,
    SetupFailed,
    TransportError,
}

impl OutcomeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Passed => "passed",
            Self::Failed => "failed",
            Self::SetupFailed => "setup_failed",
            Self::TransportError => "transport_error",
        }
    }
}

/// Result of a single scenario run, as reported by the runner.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioReport {
    pub scenario: &'static str,
    pub outcome: OutcomeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    pub elapsed_ms: u128,
}

impl ScenarioReport {
    fn from_result(scenario: Scenario, result: &ScenarioResult, elapsed_ms: u128) -> Self {
        let (outcome, detail) = match result {
            Ok(()) => (OutcomeKind::Passed, None),
            Err(ScenarioFailure::Assertion(msg)) => (OutcomeKind::Failed, Some(msg.clone())),
            Err(ScenarioFailure::Setup(msg)) => (OutcomeKind::SetupFailed, Some(msg.clone())),
            Err(ScenarioFailure::Transport(err)) => {
                (OutcomeKind::TransportError, Some(err.to_string()))
            }
        };
        Self {
            scenario: scenario.name(),
            outcome,
            detail,
            elapsed_ms,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scenario {
    GetApiKeyForInvalidEmail,
    GetApiKeyForInvalidPassword,
    GetAllPetsWithInvalidKey,
    AddNewPetWithInvalidAuthKey,
    AddNewPetWithInvalidDataAge,
    AddNewPetWithInvalidDataName,
    DeleteSelfPetWithInvalidAuthKey,
    UpdateSelfPetInfoWithInvalidAuthKey,
    AddNewPetWithoutPhotoWithInvalidAuthKey,
    AddPhotoOfPetWithInvalidAuthKey,
}

impl Scenario {
    pub const ALL: [Scenario; 10] = [
        Scenario::GetApiKeyForInvalidEmail,
        Scenario::GetApiKeyForInvalidPassword,
        Scenario::GetAllPetsWithInvalidKey,
        Scenario::AddNewPetWithInvalidAuthKey,
        Scenario::AddNewPetWithInvalidDataAge,
        Scenario::AddNewPetWithInvalidDataName,
        Scenario::DeleteSelfPetWithInvalidAuthKey,
        Scenario::UpdateSelfPetInfoWithInvalidAuthKey,
        Scenario::AddNewPetWithoutPhotoWithInvalidAuthKey,
        Scenario::AddPhotoOfPetWithInvalidAuthKey,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::GetApiKeyForInvalidEmail => "get_api_key_for_invalid_email",
            Self::GetApiKeyForInvalidPassword => "get_api_key_for_invalid_password",
            Self::GetAllPetsWithInvalidKey => "get_all_pets_with_invalid_key",
            Self::AddNewPetWithInvalidAuthKey => "add_new_pet_with_invalid_auth_key",
            Self::AddNewPetWithInvalidDataAge => "add_new_pet_with_invalid_data_age",
            Self::AddNewPetWithInvalidDataName => "add_new_pet_with_invalid_data_name",
            Self::DeleteSelfPetWithInvalidAuthKey => {
                "unsuccessful_delete_self_pet_with_invalid_auth_key"
            }
            Self::UpdateSelfPetInfoWithInvalidAuthKey => {
                "unsuccessful_update_self_pet_info_with_invalid_auth_key"
            }
            Self::AddNewPetWithoutPhotoWithInvalidAuthKey => {
                "add_new_pet_without_photo_with_invalid_auth_key"
            }
            Self::AddPhotoOfPetWithInvalidAuthKey => "add_photo_of_pet_with_invalid_auth_key",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::GetApiKeyForInvalidEmail => "Empty email is refused a key (403)",
            Self::GetApiKeyForInvalidPassword => "Wrong password is refused a key (403)",
            Self::GetAllPetsWithInvalidKey => "Listing with a bogus key returns no pets (403)",
            Self::AddNewPetWithInvalidAuthKey => "Creating a pet with a bogus key is refused (403)",
            Self::AddNewPetWithInvalidDataAge => "A 45-digit age is rejected (400)",
            Self::AddNewPetWithInvalidDataName => "An empty name is rejected (400)",
            Self::DeleteSelfPetWithInvalidAuthKey => {
                "Deleting own pet with a bogus key is refused (403)"
            }
            Self::UpdateSelfPetInfoWithInvalidAuthKey => {
                "Updating own pet with a bogus key is refused (403)"
            }
            Self::AddNewPetWithoutPhotoWithInvalidAuthKey => {
                "Simple create with a bogus key is refused (403)"
            }
            Self::AddPhotoOfPetWithInvalidAuthKey => {
                "Attaching a photo with a bogus key is refused (403)"
            }
        }
    }

    pub fn from_name(name: &str) -> Result<Self, SuiteError> {
        Self::ALL
            .into_iter()
            .find(|s| s.name() == name)
            .ok_or_else(|| SuiteError::UnknownScenario(name.to_string()))
    }

    pub async fn run(self, ctx: &SuiteContext) -> ScenarioResult {
        match self {
            Self::GetApiKeyForInvalidEmail => scenarios::get_api_key_for_invalid_email(ctx).await,
            Self::GetApiKeyForInvalidPassword => {
                scenarios::get_api_key_for_invalid_password(ctx).await
            }
            Self::GetAllPetsWithInvalidKey => scenarios::get_all_pets_with_invalid_key(ctx).await,
            Self::AddNewPetWithInvalidAuthKey => {
                scenarios::add_new_pet_with_invalid_auth_key(ctx).await
            }
            Self::AddNewPetWithInvalidDataAge => {
                scenarios::add_new_pet_with_invalid_data_age(ctx).await
            }
            Self::AddNewPetWithInvalidDataName => {
                scenarios::add_new_pet_with_invalid_data_name(ctx).await
            }
            Self::DeleteSelfPetWithInvalidAuthKey => {
                scenarios::unsuccessful_delete_self_pet_with_invalid_auth_key(ctx).await
            }
            Self::UpdateSelfPetInfoWithInvalidAuthKey => {
                scenarios::unsuccessful_update_self_pet_info_with_invalid_auth_key(ctx).await
            }
            Self::AddNewPetWithoutPhotoWithInvalidAuthKey => {
                scenarios::add_new_pet_without_photo_with_invalid_auth_key(ctx).await
            }
            Self::AddPhotoOfPetWithInvalidAuthKey => {
                scenarios::add_photo_of_pet_with_invalid_auth_key(ctx).await
            }
        }
    }
}

/// Run `selection` one scenario at a time, in order.
pub async fn run_scenarios(ctx: &SuiteContext, selection: &[Scenario]) -> Vec<ScenarioReport> {
    let mut reports = Vec::with_capacity(selection.len());

    for &scenario in selection {
        info!(scenario = scenario.name(), "running scenario");
        let started = Instant::now();
        let result = scenario.run(ctx).await;
        let elapsed_ms = started.elapsed().as_millis();

        if let Err(failure) = &result {
            warn!(scenario = scenario.name(), %failure, "scenario did not pass");
        }
        reports.push(ScenarioReport::from_result(scenario, &result, elapsed_ms));
    }

    reports
}
