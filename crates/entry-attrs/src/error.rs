use thiserror::Error;

/// Failure converting a loosely-typed JSON value into a canonical one.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoerceError {
    #[error("expected {expected}, got {found}")]
    UnexpectedType {
        expected: &'static str,
        found: String,
    },

    #[error("could not parse {0:?} as a time")]
    InvalidTime(String),

    #[error("{0} is not a valid size")]
    InvalidSize(String),
}

impl CoerceError {
    pub(crate) fn unexpected(expected: &'static str, found: &serde_json::Value) -> Self {
        CoerceError::UnexpectedType {
            expected,
            found: format!("{} {}", json_type_name(found), found),
        }
    }
}

#[derive(Error, Debug)]
pub enum AttrError {
    #[error("entry attributes must be a JSON object")]
    NotAnObject,

    #[error("entry attributes are not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("could not coerce the {attr} attribute: {source}")]
    Coerce {
        attr: &'static str,
        #[source]
        source: CoerceError,
    },

    #[error("meta is not a JSON object")]
    MetaNotObject,

    #[error("config error: {0}")]
    Config(#[from] confique::Error),
}

pub type Result<T> = std::result::Result<T, AttrError>;

pub(crate) fn json_type_name(value: &serde_json::Value) -> &'static str {
    use serde_json::Value;
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
