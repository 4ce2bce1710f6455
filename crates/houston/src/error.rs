use std::io;

use thiserror::Error;

/// HoustonProblem is the type of Error that occured.
#[derive(Error, Debug)]
pub enum HoustonProblem {
    /// DefaultConfigDirNotFound occurs when the default OS config can't be found.
    #[error("Could not determine default OS configuration directory.")]
    DefaultConfigDirNotFound,

    /// ProfileNotFound occurs when a profile with a specified name can't be found.
    #[error("There is no profile named '{0}'.")]
    ProfileNotFound(String),

    /// PathNotUtf8 occurs when Houston encounters a file path that is not valid UTF-8
    #[error(transparent)]
    PathNotUtf8(#[from] camino::FromPathBufError),

    /// TomlDeserialization occurs when a profile's configuration can't be deserialized from a String.
    #[error(transparent)]
    TomlDeserialization(#[from] toml::de::Error),

    /// io::Error occurs when any given std::io::Error arises.
    #[error(transparent)]
    IoError(#[from] io::Error),
}
