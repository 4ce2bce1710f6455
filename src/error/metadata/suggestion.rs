use std::fmt::{self, Display};

use lander_std::Style;
use serde::{Serialize, Serializer};

use crate::utils::env::LanderEnvKey;

/// `Suggestion` contains possible suggestions for remedying specific errors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Suggestion {
    SubmitIssue,
    ProvideGraphId,
    CheckGraphNameAndAuth,
    CheckKey,
    SetApiKey { profile_name: String },
    SetConfigHome,
    CheckServerConnection,
    IncreaseClientTimeout,
    FixProjectConfig,
}

impl Display for Suggestion {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suggestion = match self {
            Suggestion::SubmitIssue => {
                format!(
                    "This error was unexpected! Re-run with {} and include the output when reporting it.",
                    Style::Command.paint("--log debug")
                )
            }
            Suggestion::ProvideGraphId => {
                format!(
                    "Pass the graph with {}, set {} in {}, or set {} to a graph API key.",
                    Style::Command.paint("--graph <NAME>"),
                    Style::Command.paint("service.name"),
                    Style::Path.paint(".apollo/config.yaml"),
                    Style::Command.paint(LanderEnvKey::Key.to_string())
                )
            }
            Suggestion::CheckGraphNameAndAuth => {
                "Make sure your graph name is typed correctly, and that your API key is valid and has access to that graph.".to_string()
            }
            Suggestion::CheckKey => {
                "Check your API key to make sure it's valid (are you using the right profile?).".to_string()
            }
            Suggestion::SetApiKey { profile_name } => {
                format!(
                    "Set {} to an API key, or store one for the {} profile.",
                    Style::Command.paint(LanderEnvKey::Key.to_string()),
                    Style::Command.paint(profile_name)
                )
            }
            Suggestion::SetConfigHome => {
                format!(
                    "You can override this path by setting {}.",
                    Style::Command.paint(LanderEnvKey::ConfigHome.to_string())
                )
            }
            Suggestion::CheckServerConnection => {
                format!(
                    "Make sure the Studio endpoint is reachable. You can point lander elsewhere with {}.",
                    Style::Command.paint(LanderEnvKey::RegistryUrl.to_string())
                )
            }
            Suggestion::IncreaseClientTimeout => {
                format!(
                    "You can try increasing the timeout value by passing a higher value to {}.",
                    Style::Command.paint("--client-timeout")
                )
            }
            Suggestion::FixProjectConfig => {
                format!(
                    "Check the contents of {} and the {} variables.",
                    Style::Path.paint(".apollo/config.yaml"),
                    Style::Command.paint("APOLLO_*")
                )
            }
        };
        write!(formatter, "{}", &suggestion)
    }
}

impl Serialize for Suggestion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
