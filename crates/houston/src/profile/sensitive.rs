use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use serde::Deserialize;

use crate::HoustonProblem;

/// Holds sensitive information regarding authentication.
#[derive(Deserialize)]
pub(crate) struct Sensitive {
    pub api_key: String,
}

impl std::fmt::Debug for Sensitive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sensitive")
            .field("api_key", &super::mask_key(&self.api_key))
            .finish()
    }
}

impl Sensitive {
    fn path(profile_dir: &Utf8Path) -> Utf8PathBuf {
        profile_dir.join(".sensitive")
    }

    /// Opens and deserializes `<profile_dir>/.sensitive`.
    pub fn load(profile_dir: &Utf8Path) -> Result<Sensitive, HoustonProblem> {
        let path = Sensitive::path(profile_dir);
        tracing::debug!(%path, "reading sensitive profile config");
        let contents = fs::read_to_string(&path)?;
        Ok(toml::from_str(&contents)?)
    }
}
