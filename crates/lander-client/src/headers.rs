use houston::Credential;
use http::{HeaderMap, HeaderValue};

use crate::LanderClientError;

const CLIENT_NAME: &str = "lander";

/// Builds the headers every request to Apollo Studio carries.
///
/// `apollographql-client-name` and `apollographql-client-version` identify
/// lander to Studio; the API key is marked sensitive so it is never logged.
pub fn build_studio_headers(
    credential: &Credential,
    client_version: &str,
) -> Result<HeaderMap, LanderClientError> {
    let mut headers = HeaderMap::new();

    headers.insert(
        "apollographql-client-name",
        HeaderValue::from_static(CLIENT_NAME),
    );
    tracing::debug!(?client_version);
    headers.insert(
        "apollographql-client-version",
        HeaderValue::from_str(client_version)?,
    );

    let mut api_key = HeaderValue::from_str(&credential.api_key)?;
    api_key.set_sensitive(true);
    headers.insert("x-api-key", api_key);

    Ok(headers)
}
