use crate::error::{Id3ManagerError, Id3ManagerResult};
use log::debug;
use std::fs;
use std::io::Write;
use std::process::Command;

/// External editor command, e.g. `vi` or `code --wait`.
pub struct Editor {
    command: String,
}

impl Editor {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    /// Opens `contents` in a temporary `.{extension}` file and returns the
    /// saved buffer once the editor exits successfully.
    pub fn edit(&self, contents: &str, extension: &str) -> Id3ManagerResult<String> {
        let mut buffer = tempfile::Builder::new()
            .prefix("id3manager-")
            .suffix(&format!(".{extension}"))
            .tempfile()?;
        buffer.write_all(contents.as_bytes())?;
        buffer.flush()?;

        let mut parts = self.command.split_whitespace();
        let program = parts.next().ok_or(Id3ManagerError::EmptyEditorCommand)?;

        debug!("Running {} on {}", self.command, buffer.path().display());
        let status = Command::new(program)
            .args(parts)
            .arg(buffer.path())
            .status()?;

        if !status.success() {
            return Err(Id3ManagerError::EditorFailed(status));
        }

        // Editors may replace the file instead of writing through our handle.
        Ok(fs::read_to_string(buffer.path())?)
    }
}
