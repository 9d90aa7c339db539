use actix_web::web::{Data, Json};
use actix_web::{post, HttpResponse, Result};
use serde::{Deserialize, Serialize};

use crate::error::RelayError;
use crate::handlers::ErrorResponse;
use crate::services::telegram::TelegramService;

#[derive(Debug, Deserialize)]
pub struct NotifyRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub channel_id: String,
}

#[derive(Serialize)]
pub struct NotifyResponse {
    pub success: bool,
    pub message: String,
}

fn validate(payload: &NotifyRequest) -> Result<(), RelayError> {
    if payload.title.is_empty() || payload.content.is_empty() || payload.channel_id.is_empty() {
        return Err(RelayError::Validation(
            "title, content and channel_id are required".to_string(),
        ));
    }
    Ok(())
}

#[post("/notify")]
pub async fn notify(
    telegram: Data<TelegramService>,
    payload: Json<NotifyRequest>,
) -> Result<HttpResponse> {
    if let Err(e) = validate(&payload) {
        return Ok(HttpResponse::BadRequest().json(ErrorResponse {
            error: e.to_string(),
        }));
    }

    log::info!("Received new note: {}", payload.title);

    // Title and content are passed through unescaped. Markdown control
    // characters in either can break the formatting Telegram applies; that
    // matches the mobile app's expectations and is a known limitation.
    let message = format!(
        "📝 *New Note Created*\n\n*Title:* {}\n*Content:* {}",
        payload.title, payload.content
    );

    match telegram.send_message(&payload.channel_id, &message).await {
        Ok(_) => {
            log::info!("Telegram notification sent to {}", payload.channel_id);
            Ok(HttpResponse::Ok().json(NotifyResponse {
                success: true,
                message: "Notification sent".to_string(),
            }))
        }
        Err(e) => {
            log::error!("Error sending to Telegram: {}", e);
            Ok(HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to send notification".to_string(),
            }))
        }
    }
}
