use thiserror::Error;

#[derive(Debug, Error)]
pub enum MetadataError {
    #[error(transparent)]
    IoError(#[from] std::io::Error),

    #[error(transparent)]
    TomlDeError(#[from] toml::de::Error),

    #[error(transparent)]
    TomlSerError(#[from] toml::ser::Error),

    #[error("{0}: unsupported frame")]
    UnsupportedFrame(String),

    #[error("Invalid timestamp value: `{0}`")]
    InvalidTimestamp(String),

    #[error("Invalid APIC type value: `{value}`. Valid values: {valid}")]
    InvalidPictureType { value: String, valid: String },

    #[error("Invalid picture URL value: `{0}`")]
    InvalidPictureUrl(String),

    #[error("Unsupported encoding: `{0}`")]
    UnsupportedEncoding(String),

    #[error("Invalid base64 value: `{0}`")]
    InvalidBase64(String),

    #[error("Malformed metadata document: {0}")]
    MalformedDocument(String),

    #[error("APIC requires exactly one of `url` or `data`")]
    InvalidPictureReference,

    #[error("Reserved MIME type value: `{0}`")]
    ReservedMimeType(String),

    #[error("{0}: repeated frame, only one is stored")]
    DuplicateFrame(String),

    #[error("{frame}: expected {expected}")]
    InvalidFieldType {
        frame: String,
        expected: &'static str,
    },

    #[error("{frame}: {source}")]
    InvalidEntry {
        frame: String,
        #[source]
        source: toml::de::Error,
    },
}

pub type MetadataResult<T> = Result<T, MetadataError>;
