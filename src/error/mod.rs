use crate::metadata::error::MetadataError;
use crate::tag::error::TagError;
use std::process::ExitStatus;
use std::result;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Id3ManagerError {
    #[error(transparent)]
    IoError(#[from] std::io::Error),

    #[error(transparent)]
    TagError(#[from] TagError),

    #[error(transparent)]
    MetadataError(#[from] MetadataError),

    #[error("Editor exited with {0}, the audio file was not modified")]
    EditorFailed(ExitStatus),

    #[error("The editor command is empty")]
    EmptyEditorCommand,
}

pub type Id3ManagerResult<T> = result::Result<T, Id3ManagerError>;
