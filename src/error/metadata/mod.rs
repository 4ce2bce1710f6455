mod code;
mod suggestion;

pub use code::Code as LanderErrorCode;
pub use suggestion::Suggestion as LanderErrorSuggestion;

use houston::HoustonProblem;
use lander_client::LanderClientError;
use lander_http::HttpServiceError;
use serde::Serialize;

use super::PreconditionError;

/// Metadata contains extra information about specific errors
/// Currently this includes an optional error `Code`
/// and an optional `Suggestion`
#[derive(Default, Serialize, Debug)]
pub struct LanderErrorMetadata {
    pub suggestion: Option<LanderErrorSuggestion>,
    pub code: Option<LanderErrorCode>,
}

/// `Metadata` structs can be created from an `anyhow::Error`
/// This works by downcasting the errors to their underlying types
/// and creating `Suggestion`s and `Code`s where applicable
impl From<&mut anyhow::Error> for LanderErrorMetadata {
    fn from(error: &mut anyhow::Error) -> Self {
        if let Some(precondition_error) = error.downcast_ref::<PreconditionError>() {
            let (suggestion, code) = match precondition_error {
                PreconditionError::NoGraphId => (
                    Some(LanderErrorSuggestion::ProvideGraphId),
                    Some(LanderErrorCode::E001),
                ),
                PreconditionError::InvalidProjectConfig { .. }
                | PreconditionError::InvalidUrl { .. } => (
                    Some(LanderErrorSuggestion::FixProjectConfig),
                    Some(LanderErrorCode::E009),
                ),
            };
            return LanderErrorMetadata { suggestion, code };
        }

        if let Some(client_error) = error.downcast_ref::<LanderClientError>() {
            let (suggestion, code) = match client_error {
                LanderClientError::InvalidGraphRef => (None, Some(LanderErrorCode::E002)),
                LanderClientError::GraphNotFound { .. } => (
                    Some(LanderErrorSuggestion::CheckGraphNameAndAuth),
                    Some(LanderErrorCode::E003),
                ),
                LanderClientError::MalformedResponse { .. } => (
                    Some(LanderErrorSuggestion::SubmitIssue),
                    Some(LanderErrorCode::E004),
                ),
                LanderClientError::GraphQl { .. } => (None, Some(LanderErrorCode::E005)),
                LanderClientError::InvalidCredentials => (
                    Some(LanderErrorSuggestion::CheckKey),
                    Some(LanderErrorCode::E006),
                ),
                LanderClientError::SendRequest {
                    source: HttpServiceError::TimedOut,
                } => (
                    Some(LanderErrorSuggestion::IncreaseClientTimeout),
                    Some(LanderErrorCode::E007),
                ),
                LanderClientError::SendRequest { .. } | LanderClientError::ServerError { .. } => (
                    Some(LanderErrorSuggestion::CheckServerConnection),
                    Some(LanderErrorCode::E007),
                ),
                LanderClientError::InvalidHeader(_) => {
                    (Some(LanderErrorSuggestion::CheckKey), None)
                }
                LanderClientError::ClientBuild(_) | LanderClientError::ServiceReady(_) => {
                    (Some(LanderErrorSuggestion::SubmitIssue), None)
                }
            };
            return LanderErrorMetadata { suggestion, code };
        }

        if let Some(houston_problem) = error.downcast_ref::<HoustonProblem>() {
            let suggestion = match houston_problem {
                HoustonProblem::ProfileNotFound(profile_name) => {
                    LanderErrorSuggestion::SetApiKey {
                        profile_name: profile_name.clone(),
                    }
                }
                HoustonProblem::DefaultConfigDirNotFound | HoustonProblem::PathNotUtf8(_) => {
                    LanderErrorSuggestion::SetConfigHome
                }
                HoustonProblem::TomlDeserialization(_) | HoustonProblem::IoError(_) => {
                    LanderErrorSuggestion::SubmitIssue
                }
            };
            return LanderErrorMetadata {
                suggestion: Some(suggestion),
                code: Some(LanderErrorCode::E008),
            };
        }

        LanderErrorMetadata::default()
    }
}
