use crate::metadata::error::MetadataError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TagError {
    #[error(transparent)]
    IoError(#[from] std::io::Error),

    #[error(transparent)]
    Id3Error(#[from] id3::Error),

    #[error(transparent)]
    PersistError(#[from] tempfile::PersistError),

    #[error(transparent)]
    SymphoniaError(#[from] symphonia::core::errors::Error),

    #[error(transparent)]
    MetadataError(#[from] MetadataError),

    #[error("No audio track found in {0}")]
    NoAudioTrack(String),
}

pub type TagResult<T> = Result<T, TagError>;
