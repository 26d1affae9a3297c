use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to parse introspection JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Missing `__schema` in introspection document")]
    MissingSchema,

    #[error("Missing `types` in introspection schema")]
    MissingTypes,

    #[error("Introspection query returned errors: {0}")]
    GraphQl(String),

    #[error("Malformed type `{type_name}` at `{path}`: {message}")]
    FieldShape {
        type_name: String,
        path: String,
        message: String,
    },

    #[error("Failed to parse SDL: {0}")]
    Sdl(String),

    #[error("Type `{type_name}` references undeclared type `{referenced}`")]
    UnknownType {
        type_name: String,
        referenced: String,
    },

    #[error("No emitter registered for language `{0}`")]
    UnknownLanguage(String),

    #[error("Language `{0}` is not listed in the configured languages")]
    LanguageNotConfigured(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP error {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Invalid config file {path}: {message}")]
    Config { path: String, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn field_shape(type_name: &str, path: impl Into<String>, message: impl Into<String>) -> Error {
        Error::FieldShape {
            type_name: type_name.to_string(),
            path: path.into(),
            message: message.into(),
        }
    }
}
