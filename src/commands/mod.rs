use crate::formats::FormatKind;
use crate::metadata::chapters::DEFAULT_TOC_TITLE;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI for viewing and editing ID3 tags and chapters of MP3 files.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Document format used for reading and writing metadata
    #[arg(long, short = 'f', value_enum, global = true, default_value_t)]
    pub format: FormatKind,

    /// Title of the generated table of contents
    #[arg(long, value_name = "TITLE", env = "ID3MANAGER_TOC_TITLE", default_value = DEFAULT_TOC_TITLE)]
    pub toc_title: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Eq, PartialEq)]
pub enum Commands {
    Get(GetCommand),
    Set(SetCommand),
    Edit(EditCommand),
}

/// Prints the metadata of an audio file to stdout.
#[derive(Parser, Debug, Clone, Eq, PartialEq)]
pub struct GetCommand {
    /// Audio file to read the tag from
    #[arg(value_name = "AUDIO")]
    pub audio: PathBuf,
}

/// Replaces the metadata of an audio file with a document read from stdin.
#[derive(Parser, Debug, Clone, Eq, PartialEq)]
pub struct SetCommand {
    /// Audio file to write the tag to
    #[arg(value_name = "AUDIO")]
    pub audio: PathBuf,
}

/// Opens the metadata of an audio file in an editor and saves the result.
#[derive(Parser, Debug, Clone, Eq, PartialEq)]
pub struct EditCommand {
    /// Audio file to edit
    #[arg(value_name = "AUDIO")]
    pub audio: PathBuf,

    /// Editor command, may include arguments
    #[arg(long, env = "EDITOR", default_value = "vi")]
    pub editor: String,
}
