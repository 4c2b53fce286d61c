//! Helpers shared by the unit tests.
#![allow(unsafe_code)]

/// Every variable `Context` reads.
pub const ENV_VARS: &[&str] = &[
    "PETFRIENDS_URL",
    "PETFRIENDS_EMAIL",
    "PETFRIENDS_PASSWORD",
    "PETFRIENDS_IMAGES",
];

/// Removes env vars for the duration of a test and restores them on drop.
pub struct EnvVarGuard {
    saved: Vec<(&'static str, Option<String>)>,
}

impl EnvVarGuard {
    pub fn new(names: &[&'static str]) -> Self {
        let saved = names
            .iter()
            .map(|name| {
                let original = std::env::var(name).ok();
                // SAFETY: Tests run serially via #[serial] attribute
                unsafe { std::env::remove_var(name) };
                (*name, original)
            })
            .collect();
        Self { saved }
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        for (name, original) in &self.saved {
            // SAFETY: Tests run serially via #[serial] attribute
            match original {
                Some(val) => unsafe { std::env::set_var(name, val) },
                None => unsafe { std::env::remove_var(name) },
            }
        }
    }
}
