use crate::metadata::error::MetadataResult;
use crate::metadata::models::Frame;
use crate::tag::convert::{from_id3, to_id3};
use crate::tag::duration::measure_duration_ms;
use crate::tag::error::TagResult;
use id3::{ErrorKind, Tag, TagLike, Version};
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub mod convert;
pub mod duration;
pub mod error;

/// Reads and replaces the ID3v2 tag block of one audio file.
pub struct TagStore {
    path: PathBuf,
}

impl TagStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored frames in tag order, or `None` when the file carries no tag.
    pub fn read_frames(&self) -> TagResult<Option<Vec<Frame>>> {
        let tag = match Tag::read_from_path(&self.path) {
            Ok(tag) => tag,
            Err(err) if matches!(err.kind, ErrorKind::NoTag) => {
                debug!("No ID3 tag in {}", self.path.display());
                return Ok(None);
            }
            Err(err) => return Err(err.into()),
        };

        debug!(
            "Read {:?} tag with {} frames from {}",
            tag.version(),
            tag.frames().count(),
            self.path.display()
        );

        let frames = tag.frames().map(from_id3).collect::<MetadataResult<Vec<_>>>()?;
        Ok(Some(frames))
    }

    /// Replaces the whole tag with `frames`, written as ID3v2.4 in the given order.
    ///
    /// The file is tagged as a copy next to the original which is then renamed
    /// over it, so a failed write leaves the original untouched.
    pub fn write_frames(&self, frames: &[Frame]) -> TagResult<()> {
        let mut tag = Tag::with_version(Version::Id3v24);
        for frame in frames {
            if let Some(replaced) = tag.add_frame(to_id3(frame)) {
                debug!("Frame {} replaced by a later one", replaced.id());
            }
        }

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let staged = NamedTempFile::new_in(dir)?;
        fs::copy(&self.path, staged.path())?;

        tag.write_to_path(staged.path(), Version::Id3v24)?;
        staged.persist(&self.path)?;

        info!("Wrote {} frames to {}", frames.len(), self.path.display());
        Ok(())
    }

    pub fn duration_ms(&self) -> TagResult<u32> {
        measure_duration_ms(&self.path)
    }
}

/// MPEG-1 Layer III, 128 kbit/s, 44.1 kHz, stereo: 417 bytes and 1152 samples per frame.
#[cfg(test)]
pub(crate) fn silent_mp3(frames: usize) -> Vec<u8> {
    let mut frame = vec![0u8; 417];
    frame[..4].copy_from_slice(&[0xFF, 0xFB, 0x90, 0x00]);
    frame.repeat(frames)
}
