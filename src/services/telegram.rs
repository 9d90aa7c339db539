use std::time::Duration;

use reqwest::Client;
use serde_json::{json, Value};

use crate::config::TelegramConfig;
use crate::error::RelayError;

/// Bound on every outbound call so a stalled upstream cannot hang a request.
const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(10);

/// Canonical chat data resolved from a public handle or numeric ID.
#[derive(Debug, Clone)]
pub struct ChatInfo {
    /// Numeric chat ID, kept as a string so large IDs survive JSON clients.
    pub id: String,
    pub title: Option<String>,
}

#[derive(Clone)]
pub struct TelegramService {
    client: Client,
    api_base_url: String,
    bot_token: String,
}

impl TelegramService {
    pub fn new(config: TelegramConfig) -> Self {
        let client = Client::builder()
            .timeout(UPSTREAM_TIMEOUT)
            .build()
            .expect("failed to build HTTP client");

        Self {
            client,
            api_base_url: config.api_base_url,
            bot_token: config.bot_token,
        }
    }

    /// Sends one message to a chat. Markdown parse mode, single attempt, no
    /// retry: a failed send is terminal for the request that triggered it.
    pub async fn send_message(&self, chat_id: &str, text: &str) -> Result<Value, RelayError> {
        let url = format!("{}/bot{}/sendMessage", self.api_base_url, self.bot_token);

        let payload = json!({
            "chat_id": chat_id,
            "text": text,
            "parse_mode": "Markdown",
        });

        let response = self.client.post(&url).json(&payload).send().await?;

        let status = response.status();
        let body_text = response.text().await?;

        if !status.is_success() {
            return Err(RelayError::Upstream(format!(
                "sendMessage returned {}: {}",
                status, body_text
            )));
        }

        let body: Value = serde_json::from_str(&body_text).map_err(|e| {
            RelayError::Upstream(format!("sendMessage returned invalid JSON: {}", e))
        })?;

        Ok(body)
    }

    /// Resolves a channel handle to its canonical numeric ID and title via
    /// `getChat`. Fails when the chat is unknown or the bot cannot see it.
    pub async fn get_chat(&self, chat_id: &str) -> Result<ChatInfo, RelayError> {
        let url = format!("{}/bot{}/getChat", self.api_base_url, self.bot_token);

        let response = self
            .client
            .post(&url)
            .json(&json!({ "chat_id": chat_id }))
            .send()
            .await?;

        let status = response.status();
        let body_text = response.text().await?;

        if !status.is_success() {
            return Err(RelayError::Upstream(format!(
                "getChat returned {}: {}",
                status, body_text
            )));
        }

        let body: Value = serde_json::from_str(&body_text)
            .map_err(|e| RelayError::Upstream(format!("getChat returned invalid JSON: {}", e)))?;

        let result = &body["result"];
        let id = result["id"]
            .as_i64()
            .ok_or_else(|| RelayError::Upstream("getChat response missing chat id".to_string()))?;

        Ok(ChatInfo {
            id: id.to_string(),
            title: result["title"].as_str().map(str::to_string),
        })
    }
}
