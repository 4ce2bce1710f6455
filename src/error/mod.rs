mod metadata;
mod precondition;

pub use metadata::{LanderErrorCode, LanderErrorMetadata};
pub use precondition::PreconditionError;

pub type LanderResult<T> = std::result::Result<T, LanderError>;

use std::borrow::BorrowMut;
use std::fmt::{self, Debug, Display};
use std::io;

use calm_io::stderr;
use lander_std::Style;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use serde_json::{json, Value};

use crate::command::output::JsonOutput;

/// A specialized `Error` type for lander that wraps `anyhow`
/// and provides some extra `Metadata` for end users depending
/// on the specific error they encountered.
#[derive(Serialize, Debug)]
pub struct LanderError {
    #[serde(flatten, serialize_with = "serialize_anyhow")]
    error: anyhow::Error,

    #[serde(flatten)]
    metadata: LanderErrorMetadata,
}

fn serialize_anyhow<S>(error: &anyhow::Error, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut data = serializer.serialize_struct("error", 1)?;
    data.serialize_field("message", &error.to_string())?;
    data.end()
}

impl LanderError {
    pub fn new<E>(error: E) -> Self
    where
        E: Into<anyhow::Error>,
    {
        let mut error = error.into();
        let metadata = LanderErrorMetadata::from(error.borrow_mut());

        Self { error, metadata }
    }

    pub fn message(&self) -> String {
        self.error.to_string()
    }

    pub const fn code(&self) -> Option<LanderErrorCode> {
        self.metadata.code
    }

    /// Reaches for the error this one was built from.
    pub fn downcast_ref<E>(&self) -> Option<&E>
    where
        E: Display + Debug + Send + Sync + 'static,
    {
        self.error.downcast_ref::<E>()
    }

    pub fn print(&self) -> io::Result<()> {
        stderr!("{}", self)?;
        Ok(())
    }

    pub(crate) fn get_json(&self) -> Value {
        json!(JsonOutput::failure(json!(self)))
    }
}

impl Display for LanderError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let error_descriptor_message = if let Some(code) = &self.metadata.code {
            format!("error[{code}]:")
        } else {
            "error:".to_string()
        };
        let error_descriptor = Style::ErrorPrefix.paint(&error_descriptor_message);

        writeln!(formatter, "{} {}", error_descriptor, &self.error)?;

        if let Some(suggestion) = &self.metadata.suggestion {
            writeln!(formatter, "        {suggestion}")?;
        }
        Ok(())
    }
}

impl<E: Into<anyhow::Error>> From<E> for LanderError {
    fn from(error: E) -> Self {
        Self::new(error)
    }
}

#[cfg(test)]
mod tests {
    use lander_client::LanderClientError;
    use speculoos::prelude::*;

    use super::*;

    #[test]
    fn it_prefixes_the_message_with_the_code() {
        let error = LanderError::new(PreconditionError::NoGraphId);

        let printed = console::strip_ansi_codes(&error.to_string()).to_string();

        assert_that!(printed).starts_with("error[E001]: ");
        assert_that!(error.code()).is_equal_to(Some(LanderErrorCode::E001));
    }

    #[test]
    fn it_serializes_the_message_and_code() {
        let error = LanderError::new(LanderClientError::InvalidCredentials);

        let json = error.get_json();

        assert_that!(json["json_version"]).is_equal_to(json!("1"));
        assert_that!(json["data"]["success"]).is_equal_to(json!(false));
        assert_that!(json["error"]["message"]).is_equal_to(json!("Invalid credentials provided."));
        assert_that!(json["error"]["code"]).is_equal_to(json!("E006"));
    }
}
