use serde::Serialize;
use serde_json::Value;

/// Version of the shape `--format json` output takes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub(crate) enum JsonVersion {
    #[default]
    #[serde(rename = "1")]
    One,
}

/// The envelope every `--format json` document is wrapped in.
#[derive(Debug, Serialize)]
pub(crate) struct JsonOutput<T: Serialize> {
    json_version: JsonVersion,
    data: JsonData<T>,
    error: Option<Value>,
}

#[derive(Debug, Serialize)]
struct JsonData<T: Serialize> {
    #[serde(flatten)]
    inner: Option<T>,
    success: bool,
}

impl<T: Serialize> JsonOutput<T> {
    pub(crate) const fn success(data: T) -> Self {
        JsonOutput {
            json_version: JsonVersion::default(),
            data: JsonData {
                inner: Some(data),
                success: true,
            },
            error: None,
        }
    }
}

impl JsonOutput<Value> {
    pub(crate) const fn failure(error: Value) -> Self {
        JsonOutput {
            json_version: JsonVersion::default(),
            data: JsonData {
                inner: None,
                success: false,
            },
            error: Some(error),
        }
    }
}
