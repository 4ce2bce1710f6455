mod sensitive;

use std::fmt;

use camino::Utf8PathBuf;
use sensitive::Sensitive;

use crate::{Config, HoustonProblem};

/// Collects configuration related to a profile.
#[derive(Debug)]
pub struct Profile {
    sensitive: Sensitive,
}

/// Apollo credentials and where they were loaded from.
#[derive(Clone)]
pub struct Credential {
    /// Apollo API Key
    pub api_key: String,

    /// The origin of the credential
    pub origin: CredentialOrigin,
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("api_key", &mask_key(&self.api_key))
            .field("origin", &self.origin)
            .finish()
    }
}

/// Info about where the API key was retrieved
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialOrigin {
    /// The credential is from an environment variable
    EnvVar,

    /// The credential is from a profile
    ConfigFile(String),
}

impl Profile {
    fn dir(name: &str, config: &Config) -> Utf8PathBuf {
        config.home.join("profiles").join(name)
    }

    /// Returns credentials for interacting with Apollo services.
    ///
    /// The override API key on `config` (usually `APOLLO_KEY`) wins; otherwise the
    /// key stored for profile `name` is used.
    pub fn get_credential(name: &str, config: &Config) -> Result<Credential, HoustonProblem> {
        let credential = match &config.override_api_key {
            Some(api_key) => Credential {
                api_key: api_key.to_string(),
                origin: CredentialOrigin::EnvVar,
            },
            None => Credential {
                api_key: Profile::load(name, config)?.sensitive.api_key,
                origin: CredentialOrigin::ConfigFile(name.to_string()),
            },
        };
        tracing::debug!(api_key = %mask_key(&credential.api_key), origin = ?credential.origin);
        Ok(credential)
    }

    /// Loads and deserializes configuration from the file system for a
    /// specific profile.
    fn load(name: &str, config: &Config) -> Result<Profile, HoustonProblem> {
        let dir = Profile::dir(name, config);
        tracing::debug!(dir = %dir, "loading profile");
        if dir.exists() {
            let sensitive = Sensitive::load(&dir)?;
            Ok(Profile { sensitive })
        } else {
            Err(HoustonProblem::ProfileNotFound(name.to_string()))
        }
    }
}

/// Masks all but the first 4 and last 4 characters of an API key with `*`.
/// Keys too short to keep both ends are masked entirely.
pub fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}{}{tail}", "*".repeat(chars.len() - 8))
}
