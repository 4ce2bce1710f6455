use camino::{Utf8Path, Utf8PathBuf};
use directories_next::ProjectDirs;

use crate::HoustonProblem;

/// Config allows end users to override default settings
/// usually determined by Houston. They are intended to
/// give library consumers a way to support environment variable
/// overrides for end users.
#[derive(Debug, Clone)]
pub struct Config {
    /// home is the path to the user's global config directory
    pub home: Utf8PathBuf,

    /// override_api_key is used for overriding the API key returned
    /// when loading a profile
    pub override_api_key: Option<String>,
}

impl Config {
    /// Creates a new instance of `Config`
    pub fn new(
        override_home: Option<&impl AsRef<Utf8Path>>,
        override_api_key: Option<String>,
    ) -> Result<Config, HoustonProblem> {
        let home = match override_home {
            Some(home) => home.as_ref().to_path_buf(),
            None => {
                // Lin: /home/alice/.config/lander
                // Win: C:\Users\Alice\AppData\Roaming\Apollo\Lander\config
                // Mac: /Users/Alice/Library/Application Support/com.Apollo.Lander
                let config_dir = ProjectDirs::from("com", "Apollo", "Lander")
                    .ok_or(HoustonProblem::DefaultConfigDirNotFound)?
                    .config_dir()
                    .to_path_buf();
                Utf8PathBuf::try_from(config_dir)?
            }
        };
        tracing::trace!(%home, has_override_api_key = override_api_key.is_some());

        Ok(Config {
            home,
            override_api_key,
        })
    }
}
