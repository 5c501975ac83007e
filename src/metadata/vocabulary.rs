use crate::metadata::models::FrameCategory;

// ID3v2.4 and v2.3 text frames, plus the podcast/iTunes extensions players rely on.
// TIPL and TMCL hold involved-people lists rather than plain text.
pub const TEXT_FRAME_IDS: [&str; 56] = [
    "TALB", "TBPM", "TCAT", "TCMP", "TCOM", "TCON", "TCOP", "TDAT", "TDEN", "TDES", "TDLY",
    "TDOR", "TDRC", "TDRL", "TDTG", "TENC", "TEXT", "TFLT", "TGID", "TIME", "TIT1",
    "TIT2", "TIT3", "TKEY", "TKWD", "TLAN", "TLEN", "TMED", "TMOO", "TOAL", "TOFN",
    "TOLY", "TOPE", "TORY", "TOWN", "TPE1", "TPE2", "TPE3", "TPE4", "TPOS", "TPRO", "TPUB",
    "TRCK", "TRDA", "TRSN", "TRSO", "TSIZ", "TSO2", "TSOA", "TSOC", "TSOP", "TSOT", "TSRC",
    "TSSE", "TSST", "TYER",
];

pub const URL_FRAME_IDS: [&str; 9] = [
    "WCOM", "WCOP", "WFED", "WOAF", "WOAR", "WOAS", "WORS", "WPAY", "WPUB",
];

pub const PICTURE_FRAME_ID: &str = "APIC";
pub const CHAPTER_FRAME_ID: &str = "CHAP";
pub const TOC_FRAME_ID: &str = "CTOC";

/// Looks up which model branch handles a 4-letter frame id.
pub fn frame_category(id: &str) -> Option<FrameCategory> {
    match id {
        PICTURE_FRAME_ID => Some(FrameCategory::Picture),
        CHAPTER_FRAME_ID => Some(FrameCategory::Chapter),
        TOC_FRAME_ID => Some(FrameCategory::TableOfContents),
        _ if TEXT_FRAME_IDS.contains(&id) => Some(FrameCategory::Text),
        _ if URL_FRAME_IDS.contains(&id) => Some(FrameCategory::Url),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categorizes_known_ids() {
        assert_eq!(frame_category("TIT2"), Some(FrameCategory::Text));
        assert_eq!(frame_category("TSSE"), Some(FrameCategory::Text));
        assert_eq!(frame_category("WOAF"), Some(FrameCategory::Url));
        assert_eq!(frame_category("APIC"), Some(FrameCategory::Picture));
        assert_eq!(frame_category("CHAP"), Some(FrameCategory::Chapter));
        assert_eq!(frame_category("CTOC"), Some(FrameCategory::TableOfContents));
    }

    #[test]
    fn rejects_described_and_unknown_ids() {
        assert_eq!(frame_category("TXXX"), None);
        assert_eq!(frame_category("WXXX"), None);
        assert_eq!(frame_category("COMM"), None);
        assert_eq!(frame_category("TIPL"), None);
        assert_eq!(frame_category("TMCL"), None);
        assert_eq!(frame_category("tit2"), None);
    }

    #[test]
    fn id_tables_hold_four_letter_codes() {
        for id in TEXT_FRAME_IDS.iter().chain(URL_FRAME_IDS.iter()) {
            assert_eq!(id.len(), 4, "{id}");
        }
    }
}
