use actix_web::web::{Data, Json};
use actix_web::{post, HttpResponse, Result};
use serde::{Deserialize, Serialize};

use crate::error::RelayError;
use crate::handlers::ErrorResponse;
use crate::services::telegram::{ChatInfo, TelegramService};

/// Generic failure message; the underlying Telegram error is logged only.
const VERIFY_FAILED: &str = "Bot is not admin or channel not accessible";

const CONFIRMATION_TEXT: &str =
    "✅ Channel verified! Your notes app is now connected to this channel.";

#[derive(Debug, Deserialize)]
pub struct VerifyRequest {
    #[serde(default)]
    pub channel_username: String,
}

#[derive(Serialize)]
pub struct VerifyResponse {
    pub success: bool,
    pub channel_id: String,
    pub channel_name: String,
}

#[derive(Serialize)]
pub struct VerifyFailure {
    pub success: bool,
    pub error: String,
}

/// Resolves the handle, then sends the confirmation message. The confirmation
/// send is part of the verification result: a channel the bot can see but
/// cannot post to is reported as not verified, even though resolution itself
/// succeeded.
async fn resolve_and_confirm(
    telegram: &TelegramService,
    handle: &str,
) -> Result<ChatInfo, RelayError> {
    let chat = telegram
        .get_chat(handle)
        .await
        .map_err(|e| RelayError::Verification(format!("resolution of {} failed: {}", handle, e)))?;

    telegram
        .send_message(&chat.id, CONFIRMATION_TEXT)
        .await
        .map_err(|e| {
            RelayError::Verification(format!("confirmation to {} failed: {}", chat.id, e))
        })?;

    Ok(chat)
}

#[post("/verify-telegram")]
pub async fn verify_telegram(
    telegram: Data<TelegramService>,
    payload: Json<VerifyRequest>,
) -> Result<HttpResponse> {
    if payload.channel_username.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ErrorResponse {
            error: "channel_username is required".to_string(),
        }));
    }

    log::info!("Verifying channel {}", payload.channel_username);

    let chat = match resolve_and_confirm(&telegram, &payload.channel_username).await {
        Ok(chat) => chat,
        Err(e) => {
            log::error!("{}", e);
            return Ok(HttpResponse::BadRequest().json(VerifyFailure {
                success: false,
                error: VERIFY_FAILED.to_string(),
            }));
        }
    };

    let channel_name = chat
        .title
        .unwrap_or_else(|| payload.channel_username.clone());

    log::info!("Channel {} verified as {}", payload.channel_username, chat.id);

    Ok(HttpResponse::Ok().json(VerifyResponse {
        success: true,
        channel_id: chat.id,
        channel_name,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TelegramConfig;
    use actix_web::{test, App};
    use mockito::{Matcher, Server, ServerGuard};
    use serde_json::{json, Value};

    fn telegram(base_url: &str) -> TelegramService {
        TelegramService::new(TelegramConfig {
            api_base_url: base_url.to_string(),
            bot_token: "123:testtoken".to_string(),
        })
    }

    async fn mock_get_chat(server: &mut ServerGuard) -> mockito::Mock {
        server
            .mock("POST", "/bot123:testtoken/getChat")
            .with_status(200)
            .with_body(
                r#"{"ok":true,"result":{"id":-1001234567890,"title":"My Channel","type":"channel"}}"#,
            )
            .create_async()
            .await
    }

    #[actix_web::test]
    async fn empty_handle_is_rejected() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let app = test::init_service(
            App::new()
                .app_data(Data::new(telegram(&server.url())))
                .service(verify_telegram),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/verify-telegram")
            .set_json(json!({ "channel_username": "" }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 400);
        mock.assert_async().await;
    }

    #[actix_web::test]
    async fn resolves_channel_and_sends_confirmation() {
        let mut server = Server::new_async().await;
        let get_chat = mock_get_chat(&mut server).await;
        let send = server
            .mock("POST", "/bot123:testtoken/sendMessage")
            .match_body(Matcher::PartialJson(json!({ "chat_id": "-1001234567890" })))
            .with_status(200)
            .with_body(r#"{"ok":true,"result":{"message_id":7}}"#)
            .expect(1)
            .create_async()
            .await;

        let app = test::init_service(
            App::new()
                .app_data(Data::new(telegram(&server.url())))
                .service(verify_telegram),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/verify-telegram")
            .set_json(json!({ "channel_username": "@mychannel" }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 200);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["channel_id"], "-1001234567890");
        assert_eq!(body["channel_name"], "My Channel");
        get_chat.assert_async().await;
        send.assert_async().await;
    }

    #[actix_web::test]
    async fn confirmation_failure_fails_the_whole_verification() {
        let mut server = Server::new_async().await;
        mock_get_chat(&mut server).await;
        server
            .mock("POST", "/bot123:testtoken/sendMessage")
            .with_status(403)
            .with_body(r#"{"ok":false,"description":"Forbidden: not enough rights"}"#)
            .create_async()
            .await;

        let app = test::init_service(
            App::new()
                .app_data(Data::new(telegram(&server.url())))
                .service(verify_telegram),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/verify-telegram")
            .set_json(json!({ "channel_username": "@mychannel" }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        // Resolution succeeded but the send did not; the operation as a whole
        // is reported as failed.
        assert_eq!(resp.status(), 400);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], VERIFY_FAILED);
    }

    #[actix_web::test]
    async fn unresolvable_handle_is_a_generic_failure() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/bot123:testtoken/getChat")
            .with_status(400)
            .with_body(r#"{"ok":false,"description":"Bad Request: chat not found"}"#)
            .create_async()
            .await;
        let send = server
            .mock("POST", "/bot123:testtoken/sendMessage")
            .expect(0)
            .create_async()
            .await;

        let app = test::init_service(
            App::new()
                .app_data(Data::new(telegram(&server.url())))
                .service(verify_telegram),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/verify-telegram")
            .set_json(json!({ "channel_username": "@nope" }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 400);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], VERIFY_FAILED);
        send.assert_async().await;
    }

    #[actix_web::test]
    async fn falls_back_to_submitted_handle_when_title_missing() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/bot123:testtoken/getChat")
            .with_status(200)
            .with_body(r#"{"ok":true,"result":{"id":42,"type":"channel"}}"#)
            .create_async()
            .await;
        server
            .mock("POST", "/bot123:testtoken/sendMessage")
            .with_status(200)
            .with_body(r#"{"ok":true,"result":{"message_id":1}}"#)
            .create_async()
            .await;

        let app = test::init_service(
            App::new()
                .app_data(Data::new(telegram(&server.url())))
                .service(verify_telegram),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/verify-telegram")
            .set_json(json!({ "channel_username": "@mychannel" }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 200);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["channel_name"], "@mychannel");
    }
}
