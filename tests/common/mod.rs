//! Shared test utilities: a stateful in-process fake of the PetFriends service.
#![allow(dead_code)]

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use petfriends_negative::client::PetFriends;
use petfriends_negative::suite::SuiteContext;
use petfriends_negative::types::{Credentials, Pet};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use wiremock::matchers::any;
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

pub const VALID_EMAIL: &str = "qa@petfriends.test";
pub const VALID_PASSWORD: &str = "correct-horse-battery";
pub const VALID_KEY: &str = "5f1e0c7a9b2d4e6f8a0b1c2d3e4f5a6b7c8d9e0f1a2b3c4d5e6f7a8b";

const FORBIDDEN_PAGE: &str = "<!doctype html>\n<html lang=en>\n<title>403 Forbidden</title>\n\
<h1>Forbidden</h1>\n<p>Please provide 'auth_key' Header</p>\n";
const BAD_REQUEST_PAGE: &str = "<!doctype html>\n<html lang=en>\n<title>400 Bad Request</title>\n\
<h1>Bad Request</h1>\n<p>Provided data is incorrect</p>\n";

pub fn images_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("images")
}

pub fn valid_credentials() -> Credentials {
    Credentials::new(VALID_EMAIL, VALID_PASSWORD)
}

/// Create a client pointing at a mock server
pub fn create_test_client(base_url: &str) -> PetFriends {
    PetFriends::new(base_url).expect("Failed to create test client")
}

/// How closely the fake follows the real service's validation rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct Behavior {
    /// Create pets even with an empty name or an absurd age.
    pub accept_invalid_pets: bool,
    /// Apply deletes whatever key is presented.
    pub ignore_key_on_delete: bool,
    /// Apply updates made with a bad key, but still answer 403.
    pub update_ignores_key: bool,
    /// List pets oldest first instead of newest first.
    pub list_oldest_first: bool,
}

#[derive(Debug, Clone)]
struct StoredPet {
    pet: Pet,
    mine: bool,
}

#[derive(Debug, Default)]
struct State {
    // Newest first, as the service lists them
    pets: Vec<StoredPet>,
}

pub struct FakePetFriends {
    pub server: MockServer,
    state: Arc<Mutex<State>>,
}

impl FakePetFriends {
    pub async fn start() -> Self {
        Self::start_with(Behavior::default()).await
    }

    pub async fn start_with(behavior: Behavior) -> Self {
        let server = MockServer::start().await;
        let state = Arc::new(Mutex::new(State::default()));

        Mock::given(any())
            .respond_with(FakeResponder {
                state: Arc::clone(&state),
                behavior,
            })
            .mount(&server)
            .await;

        Self { server, state }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    pub fn client(&self) -> PetFriends {
        create_test_client(&self.uri())
    }

    pub fn suite_context(&self) -> SuiteContext {
        SuiteContext::new(self.client(), valid_credentials(), images_dir())
    }

    /// Add a pet owned by the test account.
    pub fn seed_my_pet(&self, name: &str, animal_type: &str, age: &str, photo: &str) -> Pet {
        self.seed(name, animal_type, age, photo, true)
    }

    /// Add a pet owned by somebody else.
    pub fn seed_other_pet(&self, name: &str, animal_type: &str, age: &str) -> Pet {
        self.seed(name, animal_type, age, "", false)
    }

    pub fn my_pets(&self) -> Vec<Pet> {
        let state = self.state.lock().unwrap();
        state
            .pets
            .iter()
            .filter(|p| p.mine)
            .map(|p| p.pet.clone())
            .collect()
    }

    pub fn all_pets(&self) -> Vec<Pet> {
        let state = self.state.lock().unwrap();
        state.pets.iter().map(|p| p.pet.clone()).collect()
    }

    fn seed(&self, name: &str, animal_type: &str, age: &str, photo: &str, mine: bool) -> Pet {
        let pet = new_pet(name, animal_type, age, photo.to_string());
        self.state.lock().unwrap().pets.insert(
            0,
            StoredPet {
                pet: pet.clone(),
                mine,
            },
        );
        pet
    }
}

struct FakeResponder {
    state: Arc<Mutex<State>>,
    behavior: Behavior,
}

impl Respond for FakeResponder {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let path = request.url.path().to_string();
        let method = request.method.as_str().to_string();

        if method == "GET" && path == "/api/key" {
            return self.get_key(request);
        }

        let authorized = header(request, "auth_key") == Some(VALID_KEY);
        let mut state = self.state.lock().unwrap();

        match (method.as_str(), path.as_str()) {
            ("GET", "/api/pets") if authorized => {
                list_pets(&state, request, self.behavior.list_oldest_first)
            }
            ("POST", "/api/pets") if authorized => match parse_multipart(request) {
                Some(parts) => {
                    let photo = part_bytes(&parts, "pet_photo");
                    self.create_pet(&mut state, |k| part_text(&parts, k), photo)
                }
                None => bad_request(),
            },
            ("POST", "/api/create_pet_simple") if authorized => {
                let fields = parse_urlencoded(request);
                self.create_pet(&mut state, |k| field(&fields, k), None)
            }
            ("POST", p) if authorized && p.starts_with("/api/pets/set_photo/") => {
                let id = &p["/api/pets/set_photo/".len()..];
                let photo = parse_multipart(request).and_then(|parts| part_bytes(&parts, "pet_photo"));
                set_photo(&mut state, id, photo)
            }
            ("PUT", p) if authorized && p.starts_with("/api/pets/") => {
                let id = &p["/api/pets/".len()..];
                update_pet(&mut state, id, &parse_urlencoded(request))
            }
            ("DELETE", p)
                if (authorized || self.behavior.ignore_key_on_delete)
                    && p.starts_with("/api/pets/") =>
            {
                let id = &p["/api/pets/".len()..];
                delete_pet(&mut state, id)
            }
            ("PUT", p) if self.behavior.update_ignores_key && p.starts_with("/api/pets/") => {
                let id = &p["/api/pets/".len()..];
                let _ = update_pet(&mut state, id, &parse_urlencoded(request));
                forbidden()
            }
            (_, p) if p.starts_with("/api/") && !authorized => forbidden(),
            _ => ResponseTemplate::new(404).set_body_string("Not Found"),
        }
    }
}

impl FakeResponder {
    fn get_key(&self, request: &Request) -> ResponseTemplate {
        let email = header(request, "email");
        let password = header(request, "password");

        if email == Some(VALID_EMAIL) && password == Some(VALID_PASSWORD) {
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "key": VALID_KEY }))
        } else {
            ResponseTemplate::new(403).set_body_string(
                "<!doctype html>\n<title>403 Forbidden</title>\n<p>This user wasn't found in database</p>\n",
            )
        }
    }

    fn create_pet(
        &self,
        state: &mut State,
        get: impl Fn(&str) -> Option<String>,
        photo: Option<Vec<u8>>,
    ) -> ResponseTemplate {
        let name = get("name").unwrap_or_default();
        let animal_type = get("animal_type").unwrap_or_default();
        let age = get("age").unwrap_or_default();

        if !self.behavior.accept_invalid_pets && !valid_pet_fields(&name, &animal_type, &age) {
            return bad_request();
        }

        let pet = new_pet(&name, &animal_type, &age, photo.map(data_uri).unwrap_or_default());
        state.pets.insert(
            0,
            StoredPet {
                pet: pet.clone(),
                mine: true,
            },
        );
        ResponseTemplate::new(200).set_body_json(&pet)
    }
}

fn list_pets(state: &State, request: &Request, oldest_first: bool) -> ResponseTemplate {
    let filter = request
        .url
        .query_pairs()
        .find(|(k, _)| k == "filter")
        .map(|(_, v)| v.into_owned())
        .unwrap_or_default();

    let mut pets: Vec<&Pet> = match filter.as_str() {
        "" => state.pets.iter().map(|p| &p.pet).collect(),
        "my_pets" => state.pets.iter().filter(|p| p.mine).map(|p| &p.pet).collect(),
        _ => return bad_request(),
    };
    if oldest_first {
        pets.reverse();
    }
    ResponseTemplate::new(200).set_body_json(serde_json::json!({ "pets": pets }))
}

fn set_photo(state: &mut State, id: &str, photo: Option<Vec<u8>>) -> ResponseTemplate {
    let (Some(stored), Some(photo)) = (find_mine(state, id), photo) else {
        return bad_request();
    };
    stored.pet.pet_photo = data_uri(photo);
    ResponseTemplate::new(200).set_body_json(&stored.pet)
}

fn update_pet(state: &mut State, id: &str, fields: &[(String, String)]) -> ResponseTemplate {
    let Some(stored) = find_mine(state, id) else {
        return bad_request();
    };
    if let Some(name) = field(fields, "name") {
        stored.pet.name = name;
    }
    if let Some(animal_type) = field(fields, "animal_type") {
        stored.pet.animal_type = animal_type;
    }
    if let Some(age) = field(fields, "age") {
        stored.pet.age = age;
    }
    ResponseTemplate::new(200).set_body_json(&stored.pet)
}

fn delete_pet(state: &mut State, id: &str) -> ResponseTemplate {
    let before = state.pets.len();
    state.pets.retain(|p| !(p.mine && p.pet.id == id));
    if state.pets.len() == before {
        return bad_request();
    }
    ResponseTemplate::new(200).set_body_string("")
}

fn find_mine<'a>(state: &'a mut State, id: &str) -> Option<&'a mut StoredPet> {
    state.pets.iter_mut().find(|p| p.mine && p.pet.id == id)
}

fn valid_pet_fields(name: &str, animal_type: &str, age: &str) -> bool {
    !name.is_empty()
        && !animal_type.is_empty()
        && age.parse::<u32>().is_ok_and(|age| age <= 100)
}

fn new_pet(name: &str, animal_type: &str, age: &str, pet_photo: String) -> Pet {
    Pet {
        id: uuid::Uuid::new_v4().to_string(),
        name: name.to_string(),
        animal_type: animal_type.to_string(),
        age: age.to_string(),
        pet_photo,
    }
}

fn data_uri(bytes: Vec<u8>) -> String {
    format!("data:image/jpeg;base64,{}", STANDARD.encode(bytes))
}

fn forbidden() -> ResponseTemplate {
    ResponseTemplate::new(403).set_body_string(FORBIDDEN_PAGE)
}

fn bad_request() -> ResponseTemplate {
    ResponseTemplate::new(400).set_body_string(BAD_REQUEST_PAGE)
}

pub fn header<'a>(request: &'a Request, name: &str) -> Option<&'a str> {
    request.headers.get(name).and_then(|v| v.to_str().ok())
}

// ============== Body parsing ==============

fn field(fields: &[(String, String)], name: &str) -> Option<String> {
    fields
        .iter()
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.clone())
}

/// Decode an `application/x-www-form-urlencoded` body.
pub fn parse_urlencoded(request: &Request) -> Vec<(String, String)> {
    let body = String::from_utf8_lossy(&request.body);
    let mut url = request.url.clone();
    url.set_query(Some(body.as_ref()));
    url.query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

#[derive(Debug, Clone)]
pub struct FormPart {
    pub name: String,
    pub file_name: Option<String>,
    pub data: Vec<u8>,
}

fn part_text(parts: &[FormPart], name: &str) -> Option<String> {
    parts
        .iter()
        .find(|p| p.name == name)
        .map(|p| String::from_utf8_lossy(&p.data).into_owned())
}

fn part_bytes(parts: &[FormPart], name: &str) -> Option<Vec<u8>> {
    parts
        .iter()
        .find(|p| p.name == name && p.file_name.is_some())
        .map(|p| p.data.clone())
}

/// Decode a `multipart/form-data` body.
pub fn parse_multipart(request: &Request) -> Option<Vec<FormPart>> {
    let content_type = header(request, "content-type")?;
    let boundary = content_type.split("boundary=").nth(1)?.trim_matches('"');
    let delimiter = format!("--{}", boundary).into_bytes();

    let mut parts = Vec::new();
    for chunk in split_bytes(&request.body, &delimiter).into_iter().skip(1) {
        if chunk.starts_with(b"--") {
            break;
        }
        let chunk = chunk.strip_prefix(b"\r\n").unwrap_or(chunk);
        let header_end = find_bytes(chunk, b"\r\n\r\n")?;
        let headers = String::from_utf8_lossy(&chunk[..header_end]);
        let data = &chunk[header_end + 4..];
        let data = data.strip_suffix(b"\r\n").unwrap_or(data);

        parts.push(FormPart {
            name: quoted_param(&headers, "name")?,
            file_name: quoted_param(&headers, "filename"),
            data: data.to_vec(),
        });
    }
    Some(parts)
}

fn quoted_param(headers: &str, param: &str) -> Option<String> {
    let needle = format!("; {}=\"", param);
    let start = headers.find(&needle)? + needle.len();
    let len = headers[start..].find('"')?;
    Some(headers[start..start + len].to_string())
}

fn split_bytes<'a>(haystack: &'a [u8], needle: &[u8]) -> Vec<&'a [u8]> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut i = 0;
    while i + needle.len() <= haystack.len() {
        if &haystack[i..i + needle.len()] == needle {
            out.push(&haystack[start..i]);
            i += needle.len();
            start = i;
        } else {
            i += 1;
        }
    }
    out.push(&haystack[start..]);
    out
}

fn find_bytes(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}
