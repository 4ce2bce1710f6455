use std::fmt::{self, Display};

use serde::Serialize;
use strum_macros::EnumString;

/// `Code` contains the error codes associated with specific errors.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, EnumString)]
pub enum Code {
    /// No graph id could be found.
    E001,
    /// A graph ref was not of the form `name@variant`.
    E002,
    /// The graph does not exist or the key cannot see it.
    E003,
    /// Studio answered with a shape lander does not understand.
    E004,
    /// Studio answered with GraphQL errors.
    E005,
    /// Studio rejected the API key.
    E006,
    /// The request to Studio failed or timed out.
    E007,
    /// The credential profile could not be loaded.
    E008,
    /// Local configuration is invalid.
    E009,
}

impl Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use speculoos::prelude::*;

    use super::Code;

    #[test]
    fn codes_round_trip_through_strings() {
        assert_that!(Code::from_str("E007")).is_ok().is_equal_to(Code::E007);
        assert_that!(Code::E001.to_string()).is_equal_to("E001".to_string());
    }
}
