use crate::metadata::models::{ChapterFrame, ChapterMark, Frame, TOC_ELEMENT_ID, TocFrame};
use log::debug;

/// Title of the generated table of contents unless configured otherwise.
pub const DEFAULT_TOC_TITLE: &str = "Розділи";

pub fn chapter_element_id(index: usize) -> String {
    format!("chapter#{index}")
}

/// Expands ordered chapter marks into contiguous CHAP frames followed by one CTOC.
///
/// Each chapter ends where the next one starts and the last one ends at
/// `duration_ms`. Marks are not reordered or validated.
pub fn reconstruct_chapters(marks: &[ChapterMark], duration_ms: u32, toc_title: &str) -> Vec<Frame> {
    if marks.is_empty() {
        return Vec::new();
    }

    let mut chapters = Vec::with_capacity(marks.len());
    for (idx, mark) in marks.iter().enumerate() {
        let end_ms = marks.get(idx + 1).map_or(duration_ms, |next| next.start_ms);
        if end_ms < mark.start_ms {
            debug!(
                "Chapter {idx} ends before it starts ({} > {end_ms})",
                mark.start_ms
            );
        }

        chapters.push(ChapterFrame {
            element_id: chapter_element_id(idx),
            start_ms: mark.start_ms,
            end_ms,
            title: mark.title.clone(),
        });
    }

    let toc = TocFrame {
        element_id: TOC_ELEMENT_ID.to_string(),
        child_ids: chapters.iter().map(|c| c.element_id.clone()).collect(),
        title: toc_title.to_string(),
    };

    let mut frames: Vec<Frame> = chapters.into_iter().map(Frame::Chapter).collect();
    frames.push(Frame::TableOfContents(toc));
    frames
}
