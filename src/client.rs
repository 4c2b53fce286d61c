use crate::config::Context;
use crate::error::SuiteError;
use crate::types::{ApiResponse, AuthKey, Body, Filter, KeyBody, PetBody, PetsBody};
use crate::ua::user_agent;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

const TIMEOUT_SECS: u64 = 30;

/// Client for the PetFriends API.
///
/// Holds transport configuration only. Every method performs exactly one
/// request and hands back the status and body whatever the status is;
/// `Err` means the request never completed.
#[derive(Debug, Clone)]
pub struct PetFriends {
    client: Client,
    base_url: String,
}

impl PetFriends {
    pub fn new(base_url: &str) -> Result<Self, SuiteError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(TIMEOUT_SECS))
            .user_agent(user_agent())
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_context(ctx: &Context) -> Result<Self, SuiteError> {
        Self::new(&ctx.base_url())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /api/key` with the credentials in the `email` / `password` headers.
    pub async fn get_api_key(
        &self,
        email: &str,
        password: &str,
    ) -> Result<ApiResponse<KeyBody>, SuiteError> {
        let request = self
            .client
            .get(self.url("/api/key"))
            .header("email", email)
            .header("password", password);

        self.execute("GET /api/key", request).await
    }

    /// `GET /api/pets?filter=...`
    pub async fn get_list_of_pets(
        &self,
        auth_key: &AuthKey,
        filter: &Filter,
    ) -> Result<ApiResponse<PetsBody>, SuiteError> {
        let request = self
            .client
            .get(self.url("/api/pets"))
            .header("auth_key", auth_key.as_str())
            .query(&[("filter", filter.as_str())]);

        self.execute("GET /api/pets", request).await
    }

    /// `POST /api/pets` as multipart, photo attached as `pet_photo`.
    pub async fn add_new_pet(
        &self,
        auth_key: &AuthKey,
        name: &str,
        animal_type: &str,
        age: &str,
        photo_path: &Path,
    ) -> Result<ApiResponse<PetBody>, SuiteError> {
        let form = Form::new()
            .text("name", name.to_string())
            .text("animal_type", animal_type.to_string())
            .text("age", age.to_string())
            .part("pet_photo", photo_part(photo_path).await?);

        let request = self
            .client
            .post(self.url("/api/pets"))
            .header("auth_key", auth_key.as_str())
            .multipart(form);

        self.execute("POST /api/pets", request).await
    }

    /// `POST /api/create_pet_simple` as a urlencoded form.
    pub async fn add_new_pet_without_photo(
        &self,
        auth_key: &AuthKey,
        name: &str,
        animal_type: &str,
        age: &str,
    ) -> Result<ApiResponse<PetBody>, SuiteError> {
        let request = self
            .client
            .post(self.url("/api/create_pet_simple"))
            .header("auth_key", auth_key.as_str())
            .form(&[("name", name), ("animal_type", animal_type), ("age", age)]);

        self.execute("POST /api/create_pet_simple", request).await
    }

    /// `POST /api/pets/set_photo/{pet_id}`
    pub async fn add_photo_of_pet(
        &self,
        auth_key: &AuthKey,
        pet_id: &str,
        photo_path: &Path,
    ) -> Result<ApiResponse<PetBody>, SuiteError> {
        let form = Form::new().part("pet_photo", photo_part(photo_path).await?);

        let request = self
            .client
            .post(self.url(&format!("/api/pets/set_photo/{}", pet_id)))
            .header("auth_key", auth_key.as_str())
            .multipart(form);

        self.execute("POST /api/pets/set_photo", request).await
    }

    /// `PUT /api/pets/{pet_id}`
    pub async fn update_pet_info(
        &self,
        auth_key: &AuthKey,
        pet_id: &str,
        name: &str,
        animal_type: &str,
        age: &str,
    ) -> Result<ApiResponse<PetBody>, SuiteError> {
        let request = self
            .client
            .put(self.url(&format!("/api/pets/{}", pet_id)))
            .header("auth_key", auth_key.as_str())
            .form(&[("name", name), ("animal_type", animal_type), ("age", age)]);

        self.execute("PUT /api/pets", request).await
    }

    /// `DELETE /api/pets/{pet_id}`. Ownership is the service's business.
    pub async fn delete_pet(
        &self,
        auth_key: &AuthKey,
        pet_id: &str,
    ) -> Result<ApiResponse<PetBody>, SuiteError> {
        let request = self
            .client
            .delete(self.url(&format!("/api/pets/{}", pet_id)))
            .header("auth_key", auth_key.as_str());

        self.execute("DELETE /api/pets", request).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        operation: &str,
        request: RequestBuilder,
    ) -> Result<ApiResponse<T>, SuiteError> {
        let response = request.send().await?;
        let status = response.status().as_u16();
        let raw = response.text().await?;

        debug!(operation, status, body_len = raw.len(), "response received");

        Ok(ApiResponse {
            status,
            body: Body::parse(raw),
        })
    }
}

/// Read a photo into a multipart part. The file is closed before returning.
async fn photo_part(path: &Path) -> Result<Part, SuiteError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| SuiteError::PhotoRead {
            path: path.to_path_buf(),
            source,
        })?;

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "photo".to_string());

    Ok(Part::bytes(bytes)
        .file_name(file_name)
        .mime_str(photo_mime(path))?)
}

fn photo_mime(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("png") => "image/png",
        _ => "image/jpeg",
    }
}
