use crate::metadata::error::{MetadataError, MetadataResult};
use crate::metadata::models::{
    ChapterFrame, Frame, FrameCategory, PictureFrame, PictureType, TextFrame, TocFrame, UrlFrame,
};
use crate::metadata::vocabulary::{CHAPTER_FRAME_ID, PICTURE_FRAME_ID, TOC_FRAME_ID, frame_category};
use id3::Frame as Id3Frame;
use id3::frame::{Chapter, Content, Picture, PictureType as Id3PictureType, TableOfContents};

/// Frame holding the title of a chapter or table of contents.
const TITLE_FRAME_ID: &str = "TIT2";

/// Byte offsets are unused: chapters are addressed by time only.
const NO_OFFSET: u32 = u32::MAX;

pub fn from_id3(frame: &Id3Frame) -> MetadataResult<Frame> {
    let id = frame.id();
    let unsupported = || MetadataError::UnsupportedFrame(id.to_string());

    let category = frame_category(id).ok_or_else(unsupported)?;

    let converted = match (category, frame.content()) {
        (FrameCategory::Text, Content::Text(text)) => Frame::Text(TextFrame {
            id: id.to_string(),
            text: first_value(text),
        }),
        (FrameCategory::Url, Content::Link(url)) => Frame::Url(UrlFrame {
            id: id.to_string(),
            url: url.clone(),
        }),
        (FrameCategory::Picture, Content::Picture(picture)) => {
            Frame::Picture(PictureFrame::from_stored(
                &picture.mime_type,
                picture.data.clone(),
                picture_type_from_id3(picture.picture_type)?,
            ))
        }
        (FrameCategory::Chapter, Content::Chapter(chapter)) => Frame::Chapter(ChapterFrame {
            element_id: chapter.element_id.clone(),
            start_ms: chapter.start_time,
            end_ms: chapter.end_time,
            title: embedded_title(&chapter.frames),
        }),
        (FrameCategory::TableOfContents, Content::TableOfContents(toc)) => {
            Frame::TableOfContents(TocFrame {
                element_id: toc.element_id.clone(),
                child_ids: toc.elements.clone(),
                title: embedded_title(&toc.frames),
            })
        }
        _ => return Err(unsupported()),
    };

    Ok(converted)
}

pub fn to_id3(frame: &Frame) -> Id3Frame {
    match frame {
        Frame::Text(text) => Id3Frame::text(&text.id, text.text.clone()),
        Frame::Url(url) => Id3Frame::with_content(&url.id, Content::Link(url.url.clone())),
        Frame::Picture(picture) => Id3Frame::with_content(
            PICTURE_FRAME_ID,
            Content::Picture(Picture {
                mime_type: picture.stored_mime().to_string(),
                picture_type: picture_type_to_id3(picture.picture_type),
                description: String::new(),
                data: picture.stored_data().to_vec(),
            }),
        ),
        Frame::Chapter(chapter) => Id3Frame::with_content(
            CHAPTER_FRAME_ID,
            Content::Chapter(Chapter {
                element_id: chapter.element_id.clone(),
                start_time: chapter.start_ms,
                end_time: chapter.end_ms,
                start_offset: NO_OFFSET,
                end_offset: NO_OFFSET,
                frames: vec![Id3Frame::text(TITLE_FRAME_ID, chapter.title.clone())],
            }),
        ),
        Frame::TableOfContents(toc) => Id3Frame::with_content(
            TOC_FRAME_ID,
            Content::TableOfContents(TableOfContents {
                element_id: toc.element_id.clone(),
                top_level: true,
                ordered: true,
                elements: toc.child_ids.clone(),
                frames: vec![Id3Frame::text(TITLE_FRAME_ID, toc.title.clone())],
            }),
        ),
    }
}

/// ID3v2.4 joins multiple values with NUL; only the first one is modelled.
fn first_value(text: &str) -> String {
    text.split('\0').next().unwrap_or_default().to_string()
}

fn embedded_title(frames: &[Id3Frame]) -> String {
    frames
        .iter()
        .filter(|frame| frame.id() == TITLE_FRAME_ID)
        .find_map(|frame| frame.content().text())
        .map(first_value)
        .unwrap_or_default()
}

fn picture_type_from_id3(picture_type: Id3PictureType) -> MetadataResult<PictureType> {
    Ok(match picture_type {
        Id3PictureType::Other => PictureType::Other,
        Id3PictureType::Icon => PictureType::FileIcon,
        Id3PictureType::OtherIcon => PictureType::OtherFileIcon,
        Id3PictureType::CoverFront => PictureType::CoverFront,
        Id3PictureType::CoverBack => PictureType::CoverBack,
        Id3PictureType::Leaflet => PictureType::LeafletPage,
        Id3PictureType::Media => PictureType::Media,
        Id3PictureType::LeadArtist => PictureType::LeadArtist,
        Id3PictureType::Artist => PictureType::Artist,
        Id3PictureType::Conductor => PictureType::Conductor,
        Id3PictureType::Band => PictureType::Band,
        Id3PictureType::Composer => PictureType::Composer,
        Id3PictureType::Lyricist => PictureType::Lyricist,
        Id3PictureType::RecordingLocation => PictureType::RecordingLocation,
        Id3PictureType::DuringRecording => PictureType::DuringRecording,
        Id3PictureType::DuringPerformance => PictureType::DuringPerformance,
        Id3PictureType::ScreenCapture => PictureType::ScreenCapture,
        Id3PictureType::BrightFish => PictureType::Fish,
        Id3PictureType::Illustration => PictureType::Illustration,
        Id3PictureType::BandLogo => PictureType::BandLogotype,
        Id3PictureType::PublisherLogo => PictureType::PublisherLogotype,
        Id3PictureType::Undefined(code) => PictureType::resolve_code(i64::from(code))?,
    })
}

fn picture_type_to_id3(picture_type: PictureType) -> Id3PictureType {
    match picture_type {
        PictureType::Other => Id3PictureType::Other,
        PictureType::FileIcon => Id3PictureType::Icon,
        PictureType::OtherFileIcon => Id3PictureType::OtherIcon,
        PictureType::CoverFront => Id3PictureType::CoverFront,
        PictureType::CoverBack => Id3PictureType::CoverBack,
        PictureType::LeafletPage => Id3PictureType::Leaflet,
        PictureType::Media => Id3PictureType::Media,
        PictureType::LeadArtist => Id3PictureType::LeadArtist,
        PictureType::Artist => Id3PictureType::Artist,
        PictureType::Conductor => Id3PictureType::Conductor,
        PictureType::Band => Id3PictureType::Band,
        PictureType::Composer => Id3PictureType::Composer,
        PictureType::Lyricist => Id3PictureType::Lyricist,
        PictureType::RecordingLocation => Id3PictureType::RecordingLocation,
        PictureType::DuringRecording => Id3PictureType::DuringRecording,
        PictureType::DuringPerformance => Id3PictureType::DuringPerformance,
        PictureType::ScreenCapture => Id3PictureType::ScreenCapture,
        PictureType::Fish => Id3PictureType::BrightFish,
        PictureType::Illustration => Id3PictureType::Illustration,
        PictureType::BandLogotype => Id3PictureType::BandLogo,
        PictureType::PublisherLogotype => Id3PictureType::PublisherLogo,
    }
}
