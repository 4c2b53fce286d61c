use super::checks::{expect, expect_status, expect_unchanged};
use super::fixtures::{ensure_my_pet, my_pets, require_my_pet, valid_key};
use super::{ScenarioFailure, ScenarioResult, SuiteContext};
use crate::types::{AuthKey, Filter};

/// Well-formed but unknown key.
pub const FORGED_KEY: &str = "ea738148a1f19838e1c5d1413877f3691a3731380e733e877b0ae729";
/// Not a key at all.
pub const PLACEHOLDER_KEY: &str = "auth_key";

pub const WRONG_PASSWORD: &str = "1111111";
pub const OVERSIZED_AGE: &str = "999999999999999999999999999999999999999999999";
pub const PHOTO: &str = "fly.jpeg";

const NAME: &str = "Вжик";
const ANIMAL_TYPE: &str = "мух";

pub async fn get_api_key_for_invalid_email(ctx: &SuiteContext) -> ScenarioResult {
    let response = ctx
        .client
        .get_api_key("", &ctx.credentials.password)
        .await?;

    expect_status(&response, 403, "get_api_key")?;
    expect(!response.has_field("key"), || {
        "get_api_key returned a key field for an empty email".to_string()
    })
}

pub async fn get_api_key_for_invalid_password(ctx: &SuiteContext) -> ScenarioResult {
    let response = ctx
        .client
        .get_api_key(&ctx.credentials.email, WRONG_PASSWORD)
        .await?;

    expect_status(&response, 403, "get_api_key")?;
    expect(!response.has_field("key"), || {
        "get_api_key returned a key field for a wrong password".to_string()
    })
}

pub async fn get_all_pets_with_invalid_key(ctx: &SuiteContext) -> ScenarioResult {
    let response = ctx
        .client
        .get_list_of_pets(&AuthKey::new(FORGED_KEY), &Filter::all())
        .await?;

    expect_status(&response, 403, "get_list_of_pets")?;
    expect(!response.has_field("pets"), || {
        "get_list_of_pets returned a pets field for a forged key".to_string()
    })
}

pub async fn add_new_pet_with_invalid_auth_key(ctx: &SuiteContext) -> ScenarioResult {
    let key = valid_key(ctx).await?;
    let before = my_pets(ctx, &key).await?;

    let response = ctx
        .client
        .add_new_pet(
            &AuthKey::new(FORGED_KEY),
            NAME,
            ANIMAL_TYPE,
            "2",
            &ctx.photo(PHOTO),
        )
        .await?;

    expect_status(&response, 403, "add_new_pet")?;
    expect(!response.returns_pet_named(NAME), || {
        format!("add_new_pet echoed a pet named {} for a forged key", NAME)
    })?;

    let after = my_pets(ctx, &key).await?;
    expect_unchanged(&before, &after, "add_new_pet")
}

pub async fn add_new_pet_with_invalid_data_age(ctx: &SuiteContext) -> ScenarioResult {
    let key = valid_key(ctx).await?;
    let before = my_pets(ctx, &key).await?;

    let response = ctx
        .client
        .add_new_pet(&key, NAME, ANIMAL_TYPE, OVERSIZED_AGE, &ctx.photo(PHOTO))
        .await?;

    expect_status(&response, 400, "add_new_pet")?;
    expect(!response.returns_pet_named(NAME), || {
        format!("add_new_pet created {} with a {}-digit age", NAME, OVERSIZED_AGE.len())
    })?;

    let after = my_pets(ctx, &key).await?;
    expect(!after.iter().any(|p| p.age == OVERSIZED_AGE), || {
        "a pet with the oversized age is listed in my_pets".to_string()
    })?;
    expect_unchanged(&before, &after, "add_new_pet")
}

pub async fn add_new_pet_with_invalid_data_name(ctx: &SuiteContext) -> ScenarioResult {
    let key = valid_key(ctx).await?;
    let before = my_pets(ctx, &key).await?;

    let response = ctx
        .client
        .add_new_pet(&key, "", ANIMAL_TYPE, "1", &ctx.photo(PHOTO))
        .await?;

    expect_status(&response, 400, "add_new_pet")?;
    expect(!response.returns_pet_named(""), || {
        "add_new_pet created a pet with an empty name".to_string()
    })?;

    let after = my_pets(ctx, &key).await?;
    expect(!after.iter().any(|p| p.name.is_empty()), || {
        "a pet with an empty name is listed in my_pets".to_string()
    })?;
    expect_unchanged(&before, &after, "add_new_pet")
}

pub async fn unsuccessful_delete_self_pet_with_invalid_auth_key(
    ctx: &SuiteContext,
) -> ScenarioResult {
    let key = valid_key(ctx).await?;
    let before = ensure_my_pet(ctx, &key).await?;
    let pet_id = before[0].id.clone();

    let response = ctx
        .client
        .delete_pet(&AuthKey::new(PLACEHOLDER_KEY), &pet_id)
        .await?;

    let after = my_pets(ctx, &key).await?;

    expect_status(&response, 403, "delete_pet")?;
    expect(after.first().is_some_and(|p| p.id == pet_id), || {
        format!("pet {} no longer leads my_pets after a refused delete", pet_id)
    })?;
    expect_unchanged(&before, &after, "delete_pet")
}

pub async fn unsuccessful_update_self_pet_info_with_invalid_auth_key(
    ctx: &SuiteContext,
) -> ScenarioResult {
    let (name, age) = ("Вжык", "9");

    let key = valid_key(ctx).await?;
    let before = require_my_pet(ctx, &key).await?;

    let response = ctx
        .client
        .update_pet_info(
            &AuthKey::new(PLACEHOLDER_KEY),
            &before[0].id,
            name,
            ANIMAL_TYPE,
            age,
        )
        .await?;

    expect_status(&response, 403, "update_pet_info")?;

    let after = my_pets(ctx, &key).await?;
    expect(after.first().is_none_or(|p| p.age == before[0].age), || {
        format!("age of pet {} changed after a refused update", before[0].id)
    })?;
    expect_unchanged(&before, &after, "update_pet_info")
}

pub async fn add_new_pet_without_photo_with_invalid_auth_key(
    ctx: &SuiteContext,
) -> ScenarioResult {
    let key = valid_key(ctx).await?;
    let before = my_pets(ctx, &key).await?;

    let response = ctx
        .client
        .add_new_pet_without_photo(&AuthKey::new(PLACEHOLDER_KEY), NAME, ANIMAL_TYPE, "7")
        .await?;

    expect_status(&response, 403, "add_new_pet_without_photo")?;

    let after = my_pets(ctx, &key).await?;
    expect_unchanged(&before, &after, "add_new_pet_without_photo")
}

pub async fn add_photo_of_pet_with_invalid_auth_key(ctx: &SuiteContext) -> ScenarioResult {
    let key = valid_key(ctx).await?;

    let created = ctx
        .client
        .add_new_pet_without_photo(&key, NAME, ANIMAL_TYPE, "5")
        .await?;
    if !created.is_success() {
        return Err(ScenarioFailure::setup(format!(
            "photo-less fixture pet could not be created (status {})",
            created.status
        )));
    }

    let Some(pet_id) = created.json().and_then(|body| body.id.clone()) else {
        return Err(ScenarioFailure::setup(
            "photo-less fixture pet was created but its id was not returned",
        ));
    };

    let before = my_pets(ctx, &key).await?;
    match before.iter().find(|p| p.id == pet_id) {
        None => {
            return Err(ScenarioFailure::setup(format!(
                "fixture pet {} is missing from my_pets",
                pet_id
            )));
        }
        Some(pet) if !pet.pet_photo.is_empty() => {
            return Err(ScenarioFailure::setup(format!(
                "fixture pet {} already has a photo",
                pet_id
            )));
        }
        Some(_) => {}
    }

    let response = ctx
        .client
        .add_photo_of_pet(&AuthKey::new(PLACEHOLDER_KEY), &pet_id, &ctx.photo(PHOTO))
        .await?;

    expect_status(&response, 403, "add_photo_of_pet")?;

    let after = my_pets(ctx, &key).await?;
    expect(
        after
            .iter()
            .find(|p| p.id == pet_id)
            .is_some_and(|p| p.pet_photo.is_empty()),
        || format!("pet {} gained a photo after a refused upload", pet_id),
    )?;
    expect_unchanged(&before, &after, "add_photo_of_pet")
}
