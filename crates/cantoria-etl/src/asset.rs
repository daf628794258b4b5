//! Seed document model.
//!
//! The seed asset is a JSON export of the original database: a triply
//! nested `data` wrapper around a collection of named tables, each with a
//! `tableName` and a `rows` array. Only the `lyrics` table is used; any
//! other tables in the export are ignored.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::Deserialize;

use cantoria_core::{Attachment, NewLyricRecord};

use crate::error::{SeedError, SeedResult};

/// Name of the table the seeder reads from the export.
pub const LYRICS_TABLE: &str = "lyrics";

/// The root of the seed asset.
#[derive(Debug, Deserialize)]
pub struct SeedDocument {
    data: ExportWrapper,
}

#[derive(Debug, Deserialize)]
struct ExportWrapper {
    data: TableSet,
}

#[derive(Debug, Deserialize)]
struct TableSet {
    data: Vec<SeedTable>,
}

/// One named table of the export.
#[derive(Debug, Deserialize)]
pub struct SeedTable {
    #[serde(rename = "tableName")]
    pub table_name: String,
    /// Kept as a raw JSON value so that a missing or non-array `rows`
    /// surfaces as [`SeedError::EmptyData`] rather than a parse failure
    /// of the whole document.
    #[serde(default)]
    pub rows: Option<serde_json::Value>,
}

/// A single lyric row of the export. Ids in the export are ignored; the
/// store assigns fresh ones on insert.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SeedRow {
    #[serde(default)]
    category: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    text: String,
    #[serde(default)]
    notes: String,
    #[serde(default)]
    photo: Option<String>,
    #[serde(default)]
    photo_type: Option<String>,
    #[serde(default)]
    audio: Option<String>,
    #[serde(default)]
    audio_type: Option<String>,
    #[serde(default)]
    doc: Option<String>,
    #[serde(default)]
    doc_type: Option<String>,
}

impl SeedDocument {
    /// Parse a seed document from raw JSON bytes.
    pub fn from_slice(body: &[u8]) -> SeedResult<Self> {
        Ok(serde_json::from_slice(body)?)
    }

    /// Locate the lyrics table in the export.
    pub fn lyrics_table(&self) -> SeedResult<&SeedTable> {
        self.data
            .data
            .data
            .iter()
            .find(|table| table.table_name == LYRICS_TABLE)
            .ok_or(SeedError::TableNotFound {
                table: LYRICS_TABLE,
            })
    }
}

impl SeedTable {
    /// Convert this table's rows into insertable records.
    ///
    /// Fails with [`SeedError::EmptyData`] when `rows` is missing, not an
    /// array, or empty.
    pub fn records(&self) -> SeedResult<Vec<NewLyricRecord>> {
        let rows = match &self.rows {
            Some(serde_json::Value::Array(rows)) if !rows.is_empty() => rows,
            Some(serde_json::Value::Array(_)) | None => {
                return Err(SeedError::EmptyData(format!(
                    "no rows in table {:?}",
                    self.table_name
                )));
            }
            Some(other) => {
                return Err(SeedError::EmptyData(format!(
                    "rows of table {:?} is not an array ({})",
                    self.table_name,
                    json_type_name(other)
                )));
            }
        };

        rows.iter()
            .map(|row| {
                let row: SeedRow = serde_json::from_value(row.clone())?;
                Ok(row.into_record())
            })
            .collect()
    }
}

impl SeedRow {
    fn into_record(self) -> NewLyricRecord {
        NewLyricRecord {
            category: self.category,
            title: self.title,
            text: self.text,
            notes: self.notes,
            photo: decode_attachment("photo", self.photo, self.photo_type),
            audio: decode_attachment("audio", self.audio, self.audio_type),
            doc: decode_attachment("doc", self.doc, self.doc_type),
        }
    }
}

/// Decode a base64 attachment payload. An undecodable payload is dropped
/// with a warning; the row itself is still seeded.
fn decode_attachment(
    field: &str,
    payload: Option<String>,
    media_type: Option<String>,
) -> Option<Attachment> {
    let payload = payload?;
    match BASE64.decode(payload.as_bytes()) {
        Ok(data) => Some(Attachment::new(data, media_type.unwrap_or_default())),
        Err(err) => {
            log::warn!("Dropping undecodable {field} attachment: {err}");
            None
        }
    }
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document(json: &str) -> SeedDocument {
        SeedDocument::from_slice(json.as_bytes()).unwrap()
    }

    #[test]
    fn test_locates_lyrics_table_among_others() {
        let doc = document(
            r#"{"data":{"data":{"data":[
                {"tableName":"settings","rows":[]},
                {"tableName":"lyrics","rows":[{"title":"Gloria"}]}
            ]}}}"#,
        );

        let table = doc.lyrics_table().unwrap();
        assert_eq!(table.table_name, "lyrics");

        let records = table.records().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "Gloria");
    }

    #[test]
    fn test_missing_lyrics_table() {
        let doc = document(r#"{"data":{"data":{"data":[{"tableName":"other","rows":[]}]}}}"#);
        let err = doc.lyrics_table().unwrap_err();
        assert!(matches!(err, SeedError::TableNotFound { table: "lyrics" }));
    }

    #[test]
    fn test_empty_rows() {
        let doc = document(r#"{"data":{"data":{"data":[{"tableName":"lyrics","rows":[]}]}}}"#);
        let err = doc.lyrics_table().unwrap().records().unwrap_err();
        assert!(matches!(err, SeedError::EmptyData(_)));
    }

    #[test]
    fn test_missing_rows() {
        let doc = document(r#"{"data":{"data":{"data":[{"tableName":"lyrics"}]}}}"#);
        let err = doc.lyrics_table().unwrap().records().unwrap_err();
        assert!(matches!(err, SeedError::EmptyData(_)));
    }

    #[test]
    fn test_rows_not_a_sequence() {
        let doc =
            document(r#"{"data":{"data":{"data":[{"tableName":"lyrics","rows":"oops"}]}}}"#);
        let err = doc.lyrics_table().unwrap().records().unwrap_err();
        assert!(matches!(err, SeedError::EmptyData(_)));
    }

    #[test]
    fn test_row_defaults_and_extra_fields() {
        let doc = document(
            r#"{"data":{"data":{"data":[{"tableName":"lyrics","rows":[
                {"id":12,"title":"Alleluia","category":"Pasqua","unknown":true}
            ]}]}}}"#,
        );

        let records = doc.lyrics_table().unwrap().records().unwrap();
        assert_eq!(records[0].title, "Alleluia");
        assert_eq!(records[0].category, "Pasqua");
        assert_eq!(records[0].text, "");
    }

    #[test]
    fn test_attachment_decoding() {
        // "ciao" in base64
        let doc = document(
            r#"{"data":{"data":{"data":[{"tableName":"lyrics","rows":[
                {"title":"Con foto","photo":"Y2lhbw==","photoType":"image/png"},
                {"title":"Foto rotta","photo":"!!!not-base64!!!"}
            ]}]}}}"#,
        );

        let records = doc.lyrics_table().unwrap().records().unwrap();
        let photo = records[0].photo.as_ref().unwrap();
        assert_eq!(photo.data, b"ciao");
        assert_eq!(photo.media_type, "image/png");

        // Undecodable payload is dropped, the row survives
        assert!(records[1].photo.is_none());
        assert_eq!(records[1].title, "Foto rotta");
    }
}
