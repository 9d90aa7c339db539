use std::time::Duration;

use reqwest::Client;
use serde_json::Value;

use crate::error::RelayError;
use crate::models::note::NoteView;

const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(10);

/// Read-only client for the realtime database holding the notes. One
/// unauthenticated GET per lookup, Firebase REST shape: the remote answers
/// `null` for a key that does not exist.
#[derive(Clone)]
pub struct NotesDbService {
    client: Client,
    base_url: String,
}

impl NotesDbService {
    pub fn new(base_url: &str) -> Self {
        let client = Client::builder()
            .timeout(UPSTREAM_TIMEOUT)
            .build()
            .expect("failed to build HTTP client");

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Fetches one note by ID. `Ok(None)` means the note does not exist;
    /// `Err` means the read itself failed. Callers decide whether either
    /// case is fatal — the share page treats neither as such.
    pub async fn fetch_note(&self, note_id: &str) -> Result<Option<NoteView>, RelayError> {
        let url = format!("{}/notes/{}.json", self.base_url, note_id);

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RelayError::Upstream(format!(
                "note fetch returned {}",
                status
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| RelayError::Upstream(format!("note fetch returned invalid JSON: {}", e)))?;

        if body.is_null() {
            return Ok(None);
        }

        let note: NoteView = serde_json::from_value(body).map_err(|e| {
            RelayError::Upstream(format!("note payload has unexpected shape: {}", e))
        })?;

        Ok(Some(note))
    }
}
