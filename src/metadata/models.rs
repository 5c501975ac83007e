use crate::metadata::error::{MetadataError, MetadataResult};
use std::fmt::Display;

/// MIME value marking an APIC frame whose data is a URL rather than image bytes.
pub const REMOTE_PICTURE_MIME: &str = "-->";

pub const TOC_ELEMENT_ID: &str = "toc";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    Text(TextFrame),
    Url(UrlFrame),
    Picture(PictureFrame),
    Chapter(ChapterFrame),
    TableOfContents(TocFrame),
}

impl Frame {
    pub fn id(&self) -> &str {
        match self {
            Frame::Text(frame) => &frame.id,
            Frame::Url(frame) => &frame.id,
            Frame::Picture(_) => "APIC",
            Frame::Chapter(_) => "CHAP",
            Frame::TableOfContents(_) => "CTOC",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextFrame {
    pub id: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlFrame {
    pub id: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PictureFrame {
    pub picture_type: PictureType,
    pub source: PictureSource,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PictureSource {
    /// Image bytes stored in the tag. `mime` is empty when unknown.
    Embedded { mime: String, data: Vec<u8> },
    /// Only the location of the image is stored.
    Remote { url: String },
}

impl PictureFrame {
    /// MIME string as stored in the APIC frame, including the remote sentinel.
    pub fn stored_mime(&self) -> &str {
        match &self.source {
            PictureSource::Embedded { mime, .. } => mime,
            PictureSource::Remote { .. } => REMOTE_PICTURE_MIME,
        }
    }

    /// Payload as stored in the APIC frame: image bytes or the UTF-8 URL.
    pub fn stored_data(&self) -> &[u8] {
        match &self.source {
            PictureSource::Embedded { data, .. } => data,
            PictureSource::Remote { url } => url.as_bytes(),
        }
    }

    /// Inverse of [`Self::stored_mime`] / [`Self::stored_data`].
    pub fn from_stored(mime: &str, data: Vec<u8>, picture_type: PictureType) -> Self {
        let source = if mime == REMOTE_PICTURE_MIME {
            PictureSource::Remote {
                url: String::from_utf8_lossy(&data).into_owned(),
            }
        } else {
            PictureSource::Embedded {
                mime: mime.to_string(),
                data,
            }
        };

        Self {
            picture_type,
            source,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterFrame {
    pub element_id: String,
    pub start_ms: u32,
    pub end_ms: u32,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocFrame {
    pub element_id: String,
    pub child_ids: Vec<String>,
    pub title: String,
}

/// A user-facing chapter marker: only the start and the title are authored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterMark {
    pub start_ms: u32,
    pub title: String,
}

/// Frames plus the flat chapter list, as parsed from a document or normalized
/// from a stored tag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    pub frames: Vec<Frame>,
    pub chapters: Vec<ChapterMark>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameCategory {
    Text,
    Url,
    Picture,
    Chapter,
    TableOfContents,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PictureType {
    Other,
    FileIcon,
    OtherFileIcon,
    #[default]
    CoverFront,
    CoverBack,
    LeafletPage,
    Media,
    LeadArtist,
    Artist,
    Conductor,
    Band,
    Composer,
    Lyricist,
    RecordingLocation,
    DuringRecording,
    DuringPerformance,
    ScreenCapture,
    Fish,
    Illustration,
    BandLogotype,
    PublisherLogotype,
}

impl PictureType {
    pub const ALL: [PictureType; 21] = [
        PictureType::Other,
        PictureType::FileIcon,
        PictureType::OtherFileIcon,
        PictureType::CoverFront,
        PictureType::CoverBack,
        PictureType::LeafletPage,
        PictureType::Media,
        PictureType::LeadArtist,
        PictureType::Artist,
        PictureType::Conductor,
        PictureType::Band,
        PictureType::Composer,
        PictureType::Lyricist,
        PictureType::RecordingLocation,
        PictureType::DuringRecording,
        PictureType::DuringPerformance,
        PictureType::ScreenCapture,
        PictureType::Fish,
        PictureType::Illustration,
        PictureType::BandLogotype,
        PictureType::PublisherLogotype,
    ];

    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(code as usize).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            PictureType::Other => "OTHER",
            PictureType::FileIcon => "FILE_ICON",
            PictureType::OtherFileIcon => "OTHER_FILE_ICON",
            PictureType::CoverFront => "COVER_FRONT",
            PictureType::CoverBack => "COVER_BACK",
            PictureType::LeafletPage => "LEAFLET_PAGE",
            PictureType::Media => "MEDIA",
            PictureType::LeadArtist => "LEAD_ARTIST",
            PictureType::Artist => "ARTIST",
            PictureType::Conductor => "CONDUCTOR",
            PictureType::Band => "BAND",
            PictureType::Composer => "COMPOSER",
            PictureType::Lyricist => "LYRICIST",
            PictureType::RecordingLocation => "RECORDING_LOCATION",
            PictureType::DuringRecording => "DURING_RECORDING",
            PictureType::DuringPerformance => "DURING_PERFORMANCE",
            PictureType::ScreenCapture => "SCREEN_CAPTURE",
            PictureType::Fish => "FISH",
            PictureType::Illustration => "ILLUSTRATION",
            PictureType::BandLogotype => "BAND_LOGOTYPE",
            PictureType::PublisherLogotype => "PUBLISHER_LOGOTYPE",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.name() == name)
    }

    /// `OTHER` (code 0) is rendered without an explicit type suffix.
    pub fn is_explicit(self) -> bool {
        self != PictureType::Other
    }

    /// Resolves a symbolic name or a numeric code; `None` means the default.
    pub fn resolve(value: Option<&str>) -> MetadataResult<Self> {
        let Some(value) = value else {
            return Ok(Self::default());
        };

        let resolved = match value.parse::<u8>() {
            Ok(code) => Self::from_code(code),
            Err(_) => Self::from_name(value),
        };

        resolved.ok_or_else(|| Self::invalid(value))
    }

    pub fn resolve_code(code: i64) -> MetadataResult<Self> {
        u8::try_from(code)
            .ok()
            .and_then(Self::from_code)
            .ok_or_else(|| Self::invalid(&code.to_string()))
    }

    fn invalid(value: &str) -> MetadataError {
        let valid = Self::ALL
            .iter()
            .map(|t| t.name())
            .collect::<Vec<_>>()
            .join(", ");

        MetadataError::InvalidPictureType {
            value: value.to_string(),
            valid,
        }
    }
}

impl Display for PictureType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picture_type_codes_follow_declaration_order() {
        for (code, picture_type) in PictureType::ALL.iter().enumerate() {
            assert_eq!(*picture_type as usize, code);
            assert_eq!(PictureType::from_code(code as u8), Some(*picture_type));
        }
        assert_eq!(PictureType::from_code(21), None);
    }

    #[test]
    fn resolve_defaults_to_cover_front() {
        assert_eq!(PictureType::resolve(None).unwrap(), PictureType::CoverFront);
    }

    #[test]
    fn resolve_accepts_names_and_codes() {
        assert_eq!(PictureType::resolve(Some("BAND")).unwrap(), PictureType::Band);
        assert_eq!(PictureType::resolve(Some("0")).unwrap(), PictureType::Other);
        assert_eq!(
            PictureType::resolve(Some("20")).unwrap(),
            PictureType::PublisherLogotype
        );
        assert_eq!(PictureType::resolve_code(4).unwrap(), PictureType::CoverBack);
    }

    #[test]
    fn resolve_rejects_unknown_values_and_lists_valid_names() {
        let err = PictureType::resolve(Some("NON_EXISTING_TYPE")).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("Invalid APIC type value: `NON_EXISTING_TYPE`"));
        assert!(message.contains("OTHER, FILE_ICON"));
        assert!(message.contains("PUBLISHER_LOGOTYPE"));

        assert!(PictureType::resolve(Some("21")).is_err());
        assert!(PictureType::resolve_code(-1).is_err());
    }

    #[test]
    fn from_stored_recognizes_remote_sentinel() {
        let remote = PictureFrame::from_stored(
            REMOTE_PICTURE_MIME,
            b"https://foo.bar/some.png".to_vec(),
            PictureType::CoverFront,
        );
        assert!(matches!(remote.source, PictureSource::Remote { .. }));
        assert_eq!(remote.stored_mime(), "-->");
        assert_eq!(remote.stored_data(), b"https://foo.bar/some.png");

        let embedded = PictureFrame::from_stored("image/png", vec![1, 2, 3], PictureType::Band);
        assert!(matches!(embedded.source, PictureSource::Embedded { .. }));
        assert_eq!(embedded.stored_mime(), "image/png");
        assert_eq!(embedded.stored_data(), &[1, 2, 3]);
    }
}
