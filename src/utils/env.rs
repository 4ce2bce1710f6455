use std::collections::HashMap;
use std::{env, fmt, io};

use heck::ToShoutySnakeCase;

/// LanderEnv allows us to mock environment variables while
/// running tests. That way we can run our tests in parallel,
/// and our local development environment will not have unintended
/// side effects on our tests.
#[derive(Debug, Clone)]
pub struct LanderEnv {
    mock_store: Option<HashMap<String, String>>,
}

impl Default for LanderEnv {
    fn default() -> LanderEnv {
        LanderEnv::new()
    }
}

impl LanderEnv {
    /// creates a new environment variable store
    pub fn new() -> LanderEnv {
        let mock_store = if cfg!(test) {
            Some(HashMap::new())
        } else {
            None
        };

        LanderEnv { mock_store }
    }

    /// returns the value of the environment variable if it exists
    pub fn get(&self, key: LanderEnvKey) -> io::Result<Option<String>> {
        let key_str = key.to_string();
        tracing::trace!("Checking for ${}", &key_str);
        let result = match &self.mock_store {
            Some(mock_store) => mock_store.get(&key_str).cloned(),
            None => match env::var(&key_str) {
                Ok(data) => Some(data),
                Err(env::VarError::NotPresent) => None,
                Err(env::VarError::NotUnicode(_)) => {
                    return Err(io::Error::new(
                        io::ErrorKind::InvalidInput,
                        format!(
                            "The value of the environment variable \"{}\" is not valid Unicode.",
                            &key_str
                        ),
                    ));
                }
            },
        };

        if let Some(result) = &result {
            tracing::debug!("read {}", Self::get_debug_value(key, result));
        } else {
            tracing::trace!("could not find ${}", &key_str);
        }

        Ok(result)
    }

    /// whether a boolean flag variable is switched on
    pub fn is_set(&self, key: LanderEnvKey) -> io::Result<bool> {
        Ok(!matches!(
            self.get(key)?.as_deref(),
            None | Some("") | Some("0") | Some("false") | Some("False") | Some("FALSE")
        ))
    }

    fn get_debug_value(key: LanderEnvKey, value: &str) -> String {
        let value = if let LanderEnvKey::Key = key {
            houston::mask_key(value)
        } else {
            value.to_string()
        };

        format!("environment variable ${key} = {value}")
    }

    /// sets a mocked environment variable to a value
    #[cfg(test)]
    pub fn insert(&mut self, key: LanderEnvKey, value: &str) {
        tracing::debug!("writing {}", Self::get_debug_value(key, value));
        if let Some(mock_store) = &mut self.mock_store {
            mock_store.insert(key.to_string(), value.into());
        }
    }
}

/// LanderEnvKey defines all of the environment variables
/// that are respected by lander. Each environment variable is prefixed with
/// `APOLLO_` and the suffix is the name of the key defined here, converted
/// from CamelCase to SHOUTY_SNAKE_CASE.
/// For example, `LanderEnvKey::ConfigHome.to_string()` becomes `APOLLO_CONFIG_HOME`
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LanderEnvKey {
    ConfigHome,
    Key,
    RegistryUrl,
    FrontendUrl,
    TestMode,
}

impl fmt::Display for LanderEnvKey {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        let dbg = format!("{self:?}").to_shouty_snake_case();
        write!(fmt, "APOLLO_{dbg}")
    }
}
