use serde::{Deserialize, Serialize};

/// Title displayed for a record whose own title is empty.
pub const UNKNOWN_TITLE: &str = "Titolo sconosciuto";

/// Title of the synthetic record returned when a search matches nothing.
pub const NO_RESULTS_TITLE: &str = "Nessun risultato trovato";

/// Reserved id of the no-results sentinel. Store-assigned ids start at 1,
/// so 0 can never collide with a real record.
pub const SENTINEL_ID: i64 = 0;

/// A binary attachment (photo, audio, or document) with its media type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub data: Vec<u8>,
    /// Media type of the payload (e.g. "image/jpeg", "audio/mpeg").
    pub media_type: String,
}

impl Attachment {
    #[must_use]
    pub fn new(data: Vec<u8>, media_type: impl Into<String>) -> Self {
        Self {
            data,
            media_type: media_type.into(),
        }
    }
}

/// A stored lyric entry.
///
/// The `id` is assigned by the store on insert and is stable for the
/// lifetime of the database.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LyricRecord {
    pub id: i64,
    pub category: String,
    pub title: String,
    pub text: String,
    pub notes: String,
    pub photo: Option<Attachment>,
    pub audio: Option<Attachment>,
    pub doc: Option<Attachment>,
}

impl LyricRecord {
    /// The synthetic "no results found" record.
    ///
    /// Returned instead of an empty result set so that the presentation
    /// layer always has at least one row to render.
    #[must_use]
    pub fn no_results() -> Self {
        Self {
            id: SENTINEL_ID,
            category: String::new(),
            title: NO_RESULTS_TITLE.to_string(),
            text: String::new(),
            notes: String::new(),
            photo: None,
            audio: None,
            doc: None,
        }
    }

    /// Whether this record is the no-results sentinel.
    #[must_use]
    pub fn is_sentinel(&self) -> bool {
        self.id == SENTINEL_ID
    }

    /// The title to display, falling back to [`UNKNOWN_TITLE`] when the
    /// record has no title of its own.
    #[must_use]
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            UNKNOWN_TITLE
        } else {
            &self.title
        }
    }
}

/// A lyric entry that has not been stored yet (no id).
///
/// This is the shape accepted by the store's insert operations and
/// produced from seed document rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewLyricRecord {
    pub category: String,
    pub title: String,
    pub text: String,
    pub notes: String,
    pub photo: Option<Attachment>,
    pub audio: Option<Attachment>,
    pub doc: Option<Attachment>,
}

impl NewLyricRecord {
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    #[must_use]
    pub fn with_photo(mut self, photo: Attachment) -> Self {
        self.photo = Some(photo);
        self
    }

    #[must_use]
    pub fn with_audio(mut self, audio: Attachment) -> Self {
        self.audio = Some(audio);
        self
    }

    #[must_use]
    pub fn with_doc(mut self, doc: Attachment) -> Self {
        self.doc = Some(doc);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_builder() {
        let record = NewLyricRecord::new("Ave Maria")
            .with_category("Maria")
            .with_text("Ave Maria, gratia plena");

        assert_eq!(record.title, "Ave Maria");
        assert_eq!(record.category, "Maria");
        assert!(record.notes.is_empty());
        assert!(record.photo.is_none());
    }

    #[test]
    fn test_sentinel() {
        let sentinel = LyricRecord::no_results();
        assert_eq!(sentinel.id, SENTINEL_ID);
        assert_eq!(sentinel.title, NO_RESULTS_TITLE);
        assert!(sentinel.is_sentinel());
    }

    #[test]
    fn test_display_title_fallback() {
        let mut record = LyricRecord::no_results();
        record.id = 7;
        record.title = String::new();
        assert_eq!(record.display_title(), UNKNOWN_TITLE);

        record.title = "Gloria".to_string();
        assert_eq!(record.display_title(), "Gloria");
    }
}
