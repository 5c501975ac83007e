use crate::formats::MetadataFormat;
use crate::metadata::error::{MetadataError, MetadataResult};
use crate::metadata::models::{ChapterMark, Frame, FrameCategory, Metadata, TextFrame, UrlFrame};
use crate::metadata::picture::{parse_picture_reference, render_picture_reference};
use crate::metadata::timestamp::{format_timestamp, parse_timestamp};
use crate::metadata::vocabulary::frame_category;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref SECTION_SEPARATOR: Regex = Regex::new(r"(?:\r?\n){2,}").unwrap();
}

/// `KEY = VALUE` lines, a blank line, then `TIMESTAMP TITLE` lines.
#[derive(Debug, Clone, Copy)]
pub struct TextFormat;

impl MetadataFormat for TextFormat {
    fn name(&self) -> &'static str {
        "text"
    }

    fn extension(&self) -> &'static str {
        "txt"
    }

    fn read(&self, input: &str) -> MetadataResult<Metadata> {
        let mut sections = SECTION_SEPARATOR.splitn(input, 2);
        let frames_txt = sections.next().unwrap_or_default();
        let chapters_txt = sections.next().unwrap_or_default();

        Ok(Metadata {
            frames: parse_frames(frames_txt)?,
            chapters: parse_chapters(chapters_txt)?,
        })
    }

    fn write(&self, frames: &[Frame]) -> MetadataResult<String> {
        let mut lines = Vec::new();
        let mut chapters = Vec::new();

        for frame in frames {
            let value = match frame {
                Frame::Text(text) => text.text.clone(),
                Frame::Url(url) => url.url.clone(),
                Frame::Picture(picture) => render_picture_reference(picture),
                Frame::Chapter(chapter) => {
                    let line = format!("{} {}", format_timestamp(chapter.start_ms), chapter.title);
                    chapters.push(line.trim_end().to_string());
                    continue;
                }
                Frame::TableOfContents(_) => continue,
            };
            lines.push(format!("{} = {}", frame.id(), value));
        }

        if !chapters.is_empty() {
            lines.push(String::new());
            lines.append(&mut chapters);
        }

        let mut output = lines.join("\n");
        if !output.is_empty() {
            output.push('\n');
        }
        Ok(output)
    }
}

fn parse_frames(frames_txt: &str) -> MetadataResult<Vec<Frame>> {
    // A repeated key keeps its first position and takes the last value.
    let mut entries: Vec<(&str, &str)> = Vec::new();

    for line in frames_txt.lines().filter(|line| !line.trim().is_empty()) {
        let (key, value) = line.split_once('=').ok_or_else(|| {
            MetadataError::MalformedDocument(format!("expected `KEY = VALUE`, got `{line}`"))
        })?;
        let (key, value) = (key.trim(), value.trim());

        match entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some(entry) => entry.1 = value,
            None => entries.push((key, value)),
        }
    }

    entries
        .into_iter()
        .map(|(key, value)| parse_frame(key, value))
        .collect()
}

fn parse_frame(key: &str, value: &str) -> MetadataResult<Frame> {
    match frame_category(key) {
        Some(FrameCategory::Text) => Ok(Frame::Text(TextFrame {
            id: key.to_string(),
            text: value.to_string(),
        })),
        Some(FrameCategory::Url) => Ok(Frame::Url(UrlFrame {
            id: key.to_string(),
            url: value.to_string(),
        })),
        Some(FrameCategory::Picture) => Ok(Frame::Picture(parse_picture_reference(value)?)),
        Some(FrameCategory::Chapter | FrameCategory::TableOfContents) | None => {
            Err(MetadataError::UnsupportedFrame(key.to_string()))
        }
    }
}

fn parse_chapters(chapters_txt: &str) -> MetadataResult<Vec<ChapterMark>> {
    chapters_txt
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            // A chapter stored without a title renders as a bare timestamp.
            let (timestamp, title) = line.split_once(char::is_whitespace).unwrap_or((line, ""));

            Ok(ChapterMark {
                start_ms: parse_timestamp(timestamp)?,
                title: title.trim_start().to_string(),
            })
        })
        .collect()
}
