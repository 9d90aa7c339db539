use serde::Deserialize;

/// A note as stored in the realtime database. Every field is optional on the
/// remote side; defaults keep the share page renderable whatever comes back.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NoteView {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: String,
    #[serde(rename = "createdDate", default)]
    pub created_date: Option<CreatedDate>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Creation timestamps arrive either as epoch milliseconds or as an ISO-8601
/// string depending on which client wrote the note.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CreatedDate {
    Millis(i64),
    Text(String),
}
