//! Wire types for the PetFriends API.
//!
//! Response bodies are modelled per endpoint as records whose fields are all
//! optional, wrapped in [`Body`]. A rejected request therefore shows up as a
//! `None` field or as raw text, never as a parse error. Field presence is
//! read from the raw JSON object, so an off-schema field still counts as
//! present.

use serde::{Deserialize, Deserializer, Serialize};

/// Account credentials. Forwarded verbatim, never validated locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Opaque auth token. Malformed values are legal: the service decides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthKey {
    key: String,
}

impl AuthKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.key
    }
}

/// Listing filter. `""` lists every pet, `"my_pets"` only the caller's.
/// Any other string is passed through as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter(String);

impl Filter {
    pub fn all() -> Self {
        Self(String::new())
    }

    pub fn my_pets() -> Self {
        Self("my_pets".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Filter {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// A pet as listed by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pet {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
    pub animal_type: String,
    #[serde(deserialize_with = "string_or_number")]
    pub age: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub pet_photo: String,
}

/// Body of `GET /api/key`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct KeyBody {
    pub key: Option<String>,
}

/// Body of `GET /api/pets`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PetsBody {
    pub pets: Option<Vec<Pet>>,
}

/// Body of the endpoints that create or modify a single pet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PetBody {
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub id: Option<String>,
    pub name: Option<String>,
    pub animal_type: Option<String>,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub age: Option<String>,
    pub pet_photo: Option<String>,
}

/// Response payload: JSON (raw, plus the endpoint's shape when it matches),
/// or whatever text came back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body<T> {
    Json {
        raw: serde_json::Value,
        typed: Option<T>,
    },
    Text(String),
}

impl<T: serde::de::DeserializeOwned> Body<T> {
    pub fn parse(raw: String) -> Self {
        match serde_json::from_str::<serde_json::Value>(&raw) {
            Ok(value) => Body::Json {
                typed: T::deserialize(&value).ok(),
                raw: value,
            },
            Err(_) => Body::Text(raw),
        }
    }
}

impl<T> Body<T> {
    /// Raw value of `field` when the body is a JSON object carrying it.
    pub fn field(&self, field: &str) -> Option<&serde_json::Value> {
        match self {
            Body::Json { raw, .. } => raw.get(field),
            Body::Text(_) => None,
        }
    }

    /// True when `field` is present, whatever its value (null included).
    pub fn has_field(&self, field: &str) -> bool {
        self.field(field).is_some()
    }
}

/// Status code plus parsed body. Non-2xx statuses are ordinary values here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse<T> {
    pub status: u16,
    pub body: Body<T>,
}

impl<T> ApiResponse<T> {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The body decoded to the endpoint's shape, if it matched.
    pub fn json(&self) -> Option<&T> {
        match &self.body {
            Body::Json { typed, .. } => typed.as_ref(),
            Body::Text(_) => None,
        }
    }

    pub fn text(&self) -> Option<&str> {
        match &self.body {
            Body::Json { .. } => None,
            Body::Text(text) => Some(text),
        }
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.body.has_field(field)
    }
}

impl ApiResponse<KeyBody> {
    pub fn auth_key(&self) -> Option<AuthKey> {
        self.json()
            .and_then(|body| body.key.as_deref())
            .map(AuthKey::new)
    }
}

impl ApiResponse<PetsBody> {
    pub fn pets(&self) -> Option<&[Pet]> {
        self.json().and_then(|body| body.pets.as_deref())
    }
}

impl ApiResponse<PetBody> {
    /// True when the response describes a pet carrying `name`.
    pub fn returns_pet_named(&self, name: &str) -> bool {
        self.body
            .field("name")
            .and_then(serde_json::Value::as_str)
            .is_some_and(|n| n == name)
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number, got {}",
            other
        ))),
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn opt_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Null => Ok(None),
        serde_json::Value::String(s) => Ok(Some(s)),
        serde_json::Value::Number(n) => Ok(Some(n.to_string())),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number, got {}",
            other
        ))),
    }
}
