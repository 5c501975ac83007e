use crate::editor::Editor;
use crate::error::Id3ManagerResult;
use crate::formats::{FormatKind, MetadataFormat, get_format};
use crate::metadata::last_chapter_end;
use crate::metadata::models::Metadata;
use crate::tag::TagStore;
use log::{debug, info};

/// Runs `get`, `set` and `edit` through one format adapter.
pub struct MetadataManager {
    format: Box<dyn MetadataFormat>,
    toc_title: String,
}

impl MetadataManager {
    pub fn new(kind: FormatKind, toc_title: impl Into<String>) -> Self {
        let format = get_format(kind);
        debug!("Using {} format", format.name());

        Self {
            format,
            toc_title: toc_title.into(),
        }
    }

    /// Renders the stored tag. An untagged file renders as an empty document.
    pub fn get(&self, store: &TagStore) -> Id3ManagerResult<String> {
        let Some(stored) = store.read_frames()? else {
            return Ok(String::new());
        };

        let duration_ms = last_chapter_end(&stored);
        let frames = Metadata::from_frames(stored).into_frames(duration_ms, &self.toc_title);

        Ok(self.format.write(&frames)?)
    }

    /// Parses `input` and replaces the stored tag with it.
    pub fn set(&self, store: &TagStore, input: &str) -> Id3ManagerResult<()> {
        let metadata = self.format.read(input)?;

        let duration_ms = if metadata.has_chapters() {
            let duration_ms = store.duration_ms()?;
            debug!("Audio duration of {}: {duration_ms} ms", store.path().display());
            duration_ms
        } else {
            0
        };

        let frames = metadata.into_frames(duration_ms, &self.toc_title);
        store.write_frames(&frames)?;
        Ok(())
    }

    /// `get` into an editor buffer, then `set` from what was saved.
    pub fn edit(&self, store: &TagStore, editor: &Editor) -> Id3ManagerResult<()> {
        let current = self.get(store)?;
        let edited = editor.edit(&current, self.format.extension())?;

        if edited == current {
            info!("No changes, rewriting the tag anyway");
        }

        self.set(store, &edited)
    }
}
