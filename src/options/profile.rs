use std::fmt::Display;

use clap::Parser;

pub const DEFAULT_PROFILE: &str = "default";

#[derive(Debug, Clone, Parser)]
pub struct ProfileOpt {
    /// Name of configuration profile to use
    #[arg(long = "profile", default_value = DEFAULT_PROFILE)]
    pub profile_name: String,
}

impl Display for ProfileOpt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", &self.profile_name)
    }
}
