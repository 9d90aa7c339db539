mod config;
mod error;
mod handlers;
mod models;
mod services;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;

use services::notes_db::NotesDbService;
use services::telegram::TelegramService;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init();

    // Fails here when TELEGRAM_BOT_TOKEN or NOTES_DB_URL is missing; there is
    // no built-in fallback credential.
    let config = config::Config::from_env()
        .expect("TELEGRAM_BOT_TOKEN and NOTES_DB_URL must be set in the environment or .env file");

    let telegram_service = TelegramService::new(config.telegram.clone());
    let notes_db_service = NotesDbService::new(&config.notes_db_url);
    let share_config = config.share.clone();

    let bind_address = format!("0.0.0.0:{}", config.port);

    log::info!("Starting notes relay on http://{}", bind_address);
    log::info!("  POST /notify          - Forward a note notification to Telegram");
    log::info!("  POST /verify-telegram - Verify bot access to a channel");
    log::info!("  GET  /note/{{note_id}}  - Share-link landing page");
    log::info!("  GET  /health          - Health check");
    log::info!("Share page mode: {:?}", share_config.mode);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header(),
            )
            .app_data(web::Data::new(telegram_service.clone()))
            .app_data(web::Data::new(notes_db_service.clone()))
            .app_data(web::Data::new(share_config.clone()))
            .service(handlers::notify::notify)
            .service(handlers::verify::verify_telegram)
            .service(handlers::share::share_note)
            .route("/health", web::get().to(handlers::health::health_check))
    })
    .bind(&bind_address)?
    .run()
    .await
}
