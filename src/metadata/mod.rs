use crate::metadata::chapters::reconstruct_chapters;
use crate::metadata::models::{ChapterMark, Frame, Metadata};

pub mod chapters;
pub mod error;
pub mod models;
pub mod picture;
pub mod timestamp;
pub mod vocabulary;

impl Metadata {
    /// Normalizes a stored frame sequence: CHAP frames become marks in stored
    /// order, CTOC frames are dropped since they are always regenerated.
    pub fn from_frames(stored: Vec<Frame>) -> Self {
        let mut metadata = Metadata::default();

        for frame in stored {
            match frame {
                Frame::Chapter(chapter) => metadata.chapters.push(ChapterMark {
                    start_ms: chapter.start_ms,
                    title: chapter.title,
                }),
                Frame::TableOfContents(_) => {}
                other => metadata.frames.push(other),
            }
        }

        metadata
    }

    /// Expands the marks into CHAP/CTOC frames appended after the other frames.
    pub fn into_frames(self, duration_ms: u32, toc_title: &str) -> Vec<Frame> {
        let mut frames = self.frames;
        frames.extend(reconstruct_chapters(&self.chapters, duration_ms, toc_title));
        frames
    }

    pub fn has_chapters(&self) -> bool {
        !self.chapters.is_empty()
    }
}

/// End of the last stored chapter, used to re-derive chapters on the read path.
pub fn last_chapter_end(stored: &[Frame]) -> u32 {
    stored
        .iter()
        .rev()
        .find_map(|frame| match frame {
            Frame::Chapter(chapter) => Some(chapter.end_ms),
            _ => None,
        })
        .unwrap_or_default()
}
