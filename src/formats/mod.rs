use crate::formats::text::TextFormat;
use crate::formats::toml::TomlFormat;
use crate::metadata::error::MetadataResult;
use crate::metadata::models::{Frame, Metadata};
use clap::ValueEnum;

pub mod text;
pub mod toml;

/// A human-editable rendition of a tag's frames.
pub trait MetadataFormat {
    fn name(&self) -> &'static str;

    /// File suffix used for editor buffers, so editors pick a syntax mode.
    fn extension(&self) -> &'static str;

    /// Parses a document into frames and the flat chapter list.
    fn read(&self, input: &str) -> MetadataResult<Metadata>;

    /// Renders frames in stored order. CHAP frames render as chapter marks,
    /// CTOC frames are omitted.
    fn write(&self, frames: &[Frame]) -> MetadataResult<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum FormatKind {
    #[default]
    Text,
    Toml,
}

pub fn get_format(kind: FormatKind) -> Box<dyn MetadataFormat> {
    match kind {
        FormatKind::Text => Box::new(TextFormat),
        FormatKind::Toml => Box::new(TomlFormat),
    }
}
