//! Remote state the scenarios depend on: a valid key and at least one own pet.

use super::{ScenarioFailure, SuiteContext};
use crate::types::{AuthKey, Filter, Pet};
use tracing::info;

pub const FIXTURE_PET: (&str, &str, &str) = ("Вжик", "мух", "3");
pub const FIXTURE_PHOTO: &str = "cat1.jpg";

/// Authenticate with the configured account.
pub async fn valid_key(ctx: &SuiteContext) -> Result<AuthKey, ScenarioFailure> {
    let response = ctx
        .client
        .get_api_key(&ctx.credentials.email, &ctx.credentials.password)
        .await?;

    response.auth_key().ok_or_else(|| {
        ScenarioFailure::setup(format!(
            "configured credentials were refused a key (status {})",
            response.status
        ))
    })
}

/// Fresh `my_pets` listing. Always re-queried, never cached.
pub async fn my_pets(ctx: &SuiteContext, key: &AuthKey) -> Result<Vec<Pet>, ScenarioFailure> {
    let response = ctx.client.get_list_of_pets(key, &Filter::my_pets()).await?;

    match response.pets() {
        Some(pets) => Ok(pets.to_vec()),
        None => Err(ScenarioFailure::setup(format!(
            "listing my_pets with a valid key failed (status {})",
            response.status
        ))),
    }
}

/// Listing with at least one own pet, creating one first if there is none.
pub async fn ensure_my_pet(
    ctx: &SuiteContext,
    key: &AuthKey,
) -> Result<Vec<Pet>, ScenarioFailure> {
    let pets = my_pets(ctx, key).await?;
    if !pets.is_empty() {
        return Ok(pets);
    }

    let (name, animal_type, age) = FIXTURE_PET;
    info!(name, "no own pets, creating fixture pet");
    ctx.client
        .add_new_pet(key, name, animal_type, age, &ctx.photo(FIXTURE_PHOTO))
        .await?;

    let pets = my_pets(ctx, key).await?;
    if pets.is_empty() {
        return Err(ScenarioFailure::setup("fixture pet could not be created"));
    }
    Ok(pets)
}

/// Listing with at least one own pet, or a setup failure when there is none.
pub async fn require_my_pet(
    ctx: &SuiteContext,
    key: &AuthKey,
) -> Result<Vec<Pet>, ScenarioFailure> {
    let pets = my_pets(ctx, key).await?;
    if pets.is_empty() {
        return Err(ScenarioFailure::setup("There is no my pets"));
    }
    Ok(pets)
}
