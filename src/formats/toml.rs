use crate::formats::MetadataFormat;
use crate::metadata::error::{MetadataError, MetadataResult};
use crate::metadata::models::{ChapterMark, Frame, FrameCategory, Metadata, TextFrame, UrlFrame};
use crate::metadata::picture::{PictureEntry, parse_picture_entry, render_picture_entry};
use crate::metadata::timestamp::{format_timestamp, parse_timestamp};
use crate::metadata::vocabulary::frame_category;
use ::toml::{Table, Value};
use log::debug;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

const MULTI_LINK_FRAME_IDS: [&str; 2] = ["WCOM", "WOAR"];

/// One array of tables per frame code, e.g. `[[TIT2]]` with a `text` key.
#[derive(Debug, Clone, Copy)]
pub struct TomlFormat;

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct TextEntry {
    text: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct UrlEntry {
    url: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct ChapterEntry {
    text: String,
    timestamp: String,
}

impl MetadataFormat for TomlFormat {
    fn name(&self) -> &'static str {
        "toml"
    }

    fn extension(&self) -> &'static str {
        "toml"
    }

    fn read(&self, input: &str) -> MetadataResult<Metadata> {
        let document: Table = ::toml::from_str(input)?;
        let mut metadata = Metadata::default();

        for (id, value) in document {
            let category =
                frame_category(&id).ok_or_else(|| MetadataError::UnsupportedFrame(id.clone()))?;

            for entry in array_of_tables(&id, value)? {
                match category {
                    FrameCategory::Text => {
                        let TextEntry { text } = decode_entry(&id, entry)?;
                        metadata.frames.push(Frame::Text(TextFrame {
                            id: id.clone(),
                            text,
                        }));
                    }
                    FrameCategory::Url => {
                        let UrlEntry { url } = decode_entry(&id, entry)?;
                        metadata.frames.push(Frame::Url(UrlFrame {
                            id: id.clone(),
                            url,
                        }));
                    }
                    FrameCategory::Picture => {
                        let picture: PictureEntry = decode_entry(&id, entry)?;
                        metadata
                            .frames
                            .push(Frame::Picture(parse_picture_entry(&picture)?));
                    }
                    FrameCategory::Chapter => {
                        let ChapterEntry { text, timestamp } = decode_entry(&id, entry)?;
                        metadata.chapters.push(ChapterMark {
                            start_ms: parse_timestamp(&timestamp)?,
                            title: text,
                        });
                    }
                    FrameCategory::TableOfContents => {
                        debug!("Ignoring {id} table, it is regenerated from chapters");
                    }
                }
            }
        }

        reject_conflicting_frames(&metadata.frames)?;
        Ok(metadata)
    }

    fn write(&self, frames: &[Frame]) -> MetadataResult<String> {
        // Kinds appear in first-appearance order, entries keep their order within a kind.
        let mut groups: Vec<(String, Vec<Value>)> = Vec::new();

        for frame in frames {
            let entry = match frame {
                Frame::Text(text) => Value::try_from(TextEntry {
                    text: text.text.clone(),
                })?,
                Frame::Url(url) => Value::try_from(UrlEntry {
                    url: url.url.clone(),
                })?,
                Frame::Picture(picture) => Value::try_from(render_picture_entry(picture))?,
                Frame::Chapter(chapter) => Value::try_from(ChapterEntry {
                    text: chapter.title.clone(),
                    timestamp: format_timestamp(chapter.start_ms),
                })?,
                Frame::TableOfContents(_) => continue,
            };

            match groups.iter_mut().find(|(id, _)| id == frame.id()) {
                Some((_, entries)) => entries.push(entry),
                None => groups.push((frame.id().to_string(), vec![entry])),
            }
        }

        let document: Table = groups
            .into_iter()
            .map(|(id, entries)| (id, Value::Array(entries)))
            .collect();

        Ok(::toml::to_string(&document)?)
    }
}

/// The tag keeps one text frame per code, one link per code (several `WCOM`/`WOAR`
/// with distinct URLs) and one picture per picture type.
fn reject_conflicting_frames(frames: &[Frame]) -> MetadataResult<()> {
    let mut seen: Vec<String> = Vec::with_capacity(frames.len());

    for frame in frames {
        let key = match frame {
            Frame::Url(url) if MULTI_LINK_FRAME_IDS.contains(&url.id.as_str()) => {
                format!("{} {}", url.id, url.url)
            }
            Frame::Picture(picture) => format!("{} {}", frame.id(), picture.picture_type),
            other => other.id().to_string(),
        };

        if seen.contains(&key) {
            return Err(MetadataError::DuplicateFrame(key));
        }
        seen.push(key);
    }

    Ok(())
}

fn array_of_tables(id: &str, value: Value) -> MetadataResult<Vec<Value>> {
    match value {
        Value::Array(entries) if entries.iter().all(Value::is_table) => Ok(entries),
        _ => Err(MetadataError::InvalidFieldType {
            frame: id.to_string(),
            expected: "an array of tables",
        }),
    }
}

fn decode_entry<T: DeserializeOwned>(id: &str, entry: Value) -> MetadataResult<T> {
    entry.try_into().map_err(|source| MetadataError::InvalidEntry {
        frame: id.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::chapters::DEFAULT_TOC_TITLE;
    use crate::metadata::models::{PictureFrame, PictureSource, PictureType};

    const DOCUMENT: &str = r#"
[[TDRC]]
text = "2022-10-14"

[[TRCK]]
text = "12/12"

[[TPE1]]
text = "Ігор, Роман"

[[TIT2]]
text = "Обробка помилок"

[[APIC]]
url = "https://foo.bar/some.png"

[[CHAP]]
text = "Початок"
timestamp = "00:00:00"

[[CHAP]]
text = "Кінець"
timestamp = "00:00:01.123"
"#;

    fn text(id: &str, value: &str) -> Frame {
        Frame::Text(TextFrame {
            id: id.to_string(),
            text: value.to_string(),
        })
    }

    #[test]
    fn reads_tables_in_document_order() {
        let metadata = TomlFormat.read(DOCUMENT).unwrap();

        let ids: Vec<&str> = metadata.frames.iter().map(Frame::id).collect();
        assert_eq!(ids, vec!["TDRC", "TRCK", "TPE1", "TIT2", "APIC"]);
        assert_eq!(metadata.frames[3], text("TIT2", "Обробка помилок"));
        assert_eq!(
            metadata.chapters,
            vec![
                ChapterMark {
                    start_ms: 0,
                    title: "Початок".to_string()
                },
                ChapterMark {
                    start_ms: 1123,
                    title: "Кінець".to_string()
                },
            ]
        );
    }

    #[test]
    fn round_trip_is_stable() {
        let frames = TomlFormat
            .read(DOCUMENT)
            .unwrap()
            .into_frames(5000, DEFAULT_TOC_TITLE);
        let rendered = TomlFormat.write(&frames).unwrap();
        let reparsed = TomlFormat
            .read(&rendered)
            .unwrap()
            .into_frames(5000, DEFAULT_TOC_TITLE);

        assert_eq!(reparsed, frames);
        assert!(!rendered.contains("CTOC"));
    }

    #[test]
    fn remote_picture_renders_sentinel_mime_and_default_type() {
        let frames = TomlFormat.read(DOCUMENT).unwrap().frames;
        let rendered = TomlFormat.write(&frames).unwrap();
        let document: Table = ::toml::from_str(&rendered).unwrap();

        let apic = document["APIC"].as_array().unwrap()[0].as_table().unwrap();
        assert_eq!(apic["url"].as_str(), Some("https://foo.bar/some.png"));
        assert_eq!(apic["mime_type"].as_str(), Some("-->"));
        assert_eq!(apic["picture_type"].as_str(), Some("COVER_FRONT"));
    }

    #[test]
    fn writer_groups_by_kind_in_first_appearance_order() {
        let shop = |url: &str| {
            Frame::Url(UrlFrame {
                id: "WCOM".to_string(),
                url: url.to_string(),
            })
        };
        let frames = vec![shop("https://one"), text("TPE1", "Artist"), shop("https://two")];
        let rendered = TomlFormat.write(&frames).unwrap();
        let metadata = TomlFormat.read(&rendered).unwrap();

        assert_eq!(
            metadata.frames,
            vec![shop("https://one"), shop("https://two"), text("TPE1", "Artist")]
        );
    }

    #[test]
    fn embedded_picture_with_numeric_type() {
        let input = r#"
[[APIC]]
data = "ZHNhZmFzZmFkcw=="
mime_type = "image/jpeg"
picture_type = 10
"#;
        let metadata = TomlFormat.read(input).unwrap();
        assert_eq!(
            metadata.frames,
            vec![Frame::Picture(PictureFrame {
                picture_type: PictureType::Band,
                source: PictureSource::Embedded {
                    mime: "image/jpeg".to_string(),
                    data: b"dsafasfads".to_vec(),
                },
            })]
        );
    }

    #[test]
    fn url_frames_use_the_url_key() {
        let metadata = TomlFormat
            .read("[[WOAF]]\nurl = \"https://example.com\"\n")
            .unwrap();
        assert_eq!(
            metadata.frames,
            vec![Frame::Url(UrlFrame {
                id: "WOAF".to_string(),
                url: "https://example.com".to_string(),
            })]
        );
    }

    #[test]
    fn repeated_frames_the_tag_cannot_hold_are_rejected() {
        let err = TomlFormat
            .read("[[TIT2]]\ntext = \"One\"\n\n[[TIT2]]\ntext = \"Two\"\n")
            .unwrap_err();
        assert_eq!(err.to_string(), "TIT2: repeated frame, only one is stored");

        let input = r#"
[[APIC]]
url = "https://a/1.png"

[[APIC]]
url = "https://a/2.png"

[[TPE1]]
text = "Artist"
"#;
        let err = TomlFormat.read(input).unwrap_err();
        assert!(matches!(err, MetadataError::DuplicateFrame(ref key) if key == "APIC COVER_FRONT"));
    }

    #[test]
    fn distinct_pictures_and_commercial_links_may_repeat() {
        let input = r#"
[[APIC]]
url = "https://a/1.png"

[[APIC]]
url = "https://a/2.png"
picture_type = "COVER_BACK"

[[WCOM]]
url = "https://shop.one"

[[WCOM]]
url = "https://shop.two"
"#;
        let metadata = TomlFormat.read(input).unwrap();
        assert_eq!(metadata.frames.len(), 4);

        let err = TomlFormat
            .read("[[WCOM]]\nurl = \"https://x\"\n\n[[WCOM]]\nurl = \"https://x\"\n")
            .unwrap_err();
        assert!(matches!(err, MetadataError::DuplicateFrame(_)));
    }

    #[test]
    fn toc_tables_are_ignored() {
        let input = "[[CTOC]]\ntext = \"Old\"\n\n[[TIT2]]\ntext = \"Title\"\n";
        let metadata = TomlFormat.read(input).unwrap();
        assert_eq!(metadata.frames, vec![text("TIT2", "Title")]);
        assert!(metadata.chapters.is_empty());
    }

    #[test]
    fn unknown_frame_is_unsupported() {
        let err = TomlFormat.read("[[COMM]]\ntext = \"x\"\n").unwrap_err();
        assert_eq!(err.to_string(), "COMM: unsupported frame");
    }

    #[test]
    fn plain_value_is_not_an_array_of_tables() {
        let err = TomlFormat.read("TIT2 = \"Title\"\n").unwrap_err();
        assert!(matches!(err, MetadataError::InvalidFieldType { ref frame, .. } if frame == "TIT2"));

        let err = TomlFormat.read("TIT2 = [\"Title\"]\n").unwrap_err();
        assert!(matches!(err, MetadataError::InvalidFieldType { .. }));
    }

    #[test]
    fn missing_field_names_the_frame_and_field() {
        let err = TomlFormat.read("[[TIT2]]\nvalue = \"x\"\n").unwrap_err();
        assert!(matches!(err, MetadataError::InvalidEntry { ref frame, .. } if frame == "TIT2"));

        let err = TomlFormat.read("[[CHAP]]\ntext = \"Intro\"\n").unwrap_err();
        assert!(err.to_string().contains("timestamp"));
    }

    #[test]
    fn picture_errors_propagate() {
        let input = "[[APIC]]\nurl = \"data:image/jpeg;base128,ZHNhZmFzZmFkcw==\"\n";
        let err = TomlFormat.read(input).unwrap_err();
        assert!(err.to_string().contains("Unsupported encoding: `base128`"));

        let input = "[[APIC]]\ndata = \"ZHNh\"\npicture_type = \"NON_EXISTING_TYPE\"\n";
        let err = TomlFormat.read(input).unwrap_err();
        assert!(err.to_string().contains("Invalid APIC type value: `NON_EXISTING_TYPE`"));
    }

    #[test]
    fn syntax_errors_surface_as_toml_errors() {
        let err = TomlFormat.read("[[TIT2]\n").unwrap_err();
        assert!(matches!(err, MetadataError::TomlDeError(_)));
    }

    #[test]
    fn empty_document() {
        assert_eq!(TomlFormat.read("").unwrap(), Metadata::default());
        assert_eq!(TomlFormat.write(&[]).unwrap(), "");
    }
}
