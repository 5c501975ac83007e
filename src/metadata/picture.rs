use crate::metadata::error::{MetadataError, MetadataResult};
use crate::metadata::models::{PictureFrame, PictureSource, PictureType, REMOTE_PICTURE_MIME};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::Path;

const DATA_SCHEME: &str = "data:";
const FILE_SCHEME: &str = "file:";
const BASE64_ENCODING: &str = "base64";

/// Picture reference as it appears in an `APIC` table of the structured format.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PictureEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture_type: Option<PictureTypeValue>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PictureTypeValue {
    Name(String),
    Code(i64),
}

impl PictureTypeValue {
    fn resolve(value: Option<&PictureTypeValue>) -> MetadataResult<PictureType> {
        match value {
            None => PictureType::resolve(None),
            Some(PictureTypeValue::Name(name)) => PictureType::resolve(Some(name)),
            Some(PictureTypeValue::Code(code)) => PictureType::resolve_code(*code),
        }
    }
}

/// Parses `<location>[ <picture-type>]` from the text format.
pub fn parse_picture_reference(value: &str) -> MetadataResult<PictureFrame> {
    let value = value.trim();
    let (location, picture_type) = match value.split_once(' ') {
        Some((location, picture_type)) => (location, Some(picture_type.trim())),
        None => (value, None),
    };

    let picture_type = PictureType::resolve(picture_type)?;
    let source = parse_location(location, None)?;

    Ok(PictureFrame {
        picture_type,
        source,
    })
}

/// Parses the structured form: exactly one of `url` / `data`.
pub fn parse_picture_entry(entry: &PictureEntry) -> MetadataResult<PictureFrame> {
    let picture_type = PictureTypeValue::resolve(entry.picture_type.as_ref())?;
    let mime_type = entry.mime_type.as_deref();

    let source = match (&entry.url, &entry.data) {
        (Some(url), None) => parse_location(url, mime_type)?,
        (None, Some(data)) => PictureSource::Embedded {
            mime: user_mime(mime_type)?.unwrap_or_default(),
            data: decode_base64(data)?,
        },
        _ => return Err(MetadataError::InvalidPictureReference),
    };

    Ok(PictureFrame {
        picture_type,
        source,
    })
}

/// Renders the text-format reference: the URL or a `data:` URL, plus the type name.
pub fn render_picture_reference(picture: &PictureFrame) -> String {
    let mut value = match &picture.source {
        PictureSource::Remote { url } => url.clone(),
        PictureSource::Embedded { mime, data } => {
            format!("{DATA_SCHEME}{mime};{BASE64_ENCODING},{}", STANDARD.encode(data))
        }
    };

    if picture.picture_type.is_explicit() {
        value.push(' ');
        value.push_str(picture.picture_type.name());
    }

    value
}

pub fn render_picture_entry(picture: &PictureFrame) -> PictureEntry {
    let mut entry = PictureEntry::default();

    match &picture.source {
        PictureSource::Remote { url } => entry.url = Some(url.clone()),
        PictureSource::Embedded { data, .. } => entry.data = Some(STANDARD.encode(data)),
    }

    let mime = picture.stored_mime();
    if !mime.is_empty() {
        entry.mime_type = Some(mime.to_string());
    }

    if picture.picture_type.is_explicit() {
        entry.picture_type = Some(PictureTypeValue::Name(picture.picture_type.name().to_string()));
    }

    entry
}

fn parse_location(location: &str, mime_type: Option<&str>) -> MetadataResult<PictureSource> {
    if location.starts_with("http://") || location.starts_with("https://") {
        return Ok(PictureSource::Remote {
            url: location.to_string(),
        });
    }

    if let Some(path) = location.strip_prefix(FILE_SCHEME) {
        return read_picture_file(file_url_path(path), mime_type);
    }

    if let Some(rest) = location.strip_prefix(DATA_SCHEME) {
        let (mime, data) = parse_data_url(location, rest)?;
        return Ok(PictureSource::Embedded { mime, data });
    }

    Err(MetadataError::InvalidPictureUrl(location.to_string()))
}

/// `file:///abs`, `file://host/abs` and `file:relative` all name a local path.
fn file_url_path(path: &str) -> &str {
    match path.strip_prefix("//") {
        Some(authority_and_path) => authority_and_path
            .find('/')
            .map_or(authority_and_path, |slash| &authority_and_path[slash..]),
        None => path,
    }
}

fn read_picture_file(path: &str, mime_type: Option<&str>) -> MetadataResult<PictureSource> {
    debug!("Reading picture file: {path}");
    let data = std::fs::read(path)?;

    let mime = match user_mime(mime_type)? {
        Some(mime) => mime,
        None => mime_guess::from_path(Path::new(path))
            .first_raw()
            .unwrap_or_default()
            .to_string(),
    };

    Ok(PictureSource::Embedded { mime, data })
}

/// Splits `[mime][;encoding],<payload>` (RFC 2397) and decodes the payload.
fn parse_data_url(url: &str, rest: &str) -> MetadataResult<(String, Vec<u8>)> {
    let (meta, payload) = rest
        .split_once(',')
        .ok_or_else(|| MetadataError::InvalidPictureUrl(url.to_string()))?;

    let (mime, encoding) = match meta.split_once(';') {
        Some((mime, encoding)) => (mime, Some(encoding)),
        None => (meta, None),
    };

    if let Some(encoding) = encoding.filter(|e| !e.is_empty() && *e != BASE64_ENCODING) {
        return Err(MetadataError::UnsupportedEncoding(encoding.to_string()));
    }

    let mime = user_mime(Some(mime))?.unwrap_or_default();
    Ok((mime, decode_base64(payload)?))
}

fn decode_base64(payload: &str) -> MetadataResult<Vec<u8>> {
    STANDARD
        .decode(payload.trim())
        .map_err(|_| MetadataError::InvalidBase64(payload.to_string()))
}

fn user_mime(mime_type: Option<&str>) -> MetadataResult<Option<String>> {
    match mime_type {
        Some(REMOTE_PICTURE_MIME) => Err(MetadataError::ReservedMimeType(
            REMOTE_PICTURE_MIME.to_string(),
        )),
        Some(mime) => Ok(Some(mime.to_string())),
        None => Ok(None),
    }
}
