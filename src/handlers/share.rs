use actix_web::web::{Data, Path};
use actix_web::{get, HttpResponse, Result};

use crate::config::ShareConfig;
use crate::models::note::NoteView;
use crate::services::notes_db::NotesDbService;
use crate::services::share_page;

/// Serves the share-link landing page. The page's job is to hand the visitor
/// off to the app, so a failed or empty note fetch degrades to placeholder
/// content instead of failing the request — this route always answers 200.
#[get("/note/{note_id}")]
pub async fn share_note(
    notes_db: Data<NotesDbService>,
    share_config: Data<ShareConfig>,
    path: Path<String>,
) -> Result<HttpResponse> {
    let note_id = path.into_inner();

    let note = match notes_db.fetch_note(&note_id).await {
        Ok(Some(note)) => note,
        Ok(None) => {
            log::warn!("Note {} not found, serving placeholder page", note_id);
            NoteView::default()
        }
        Err(e) => {
            log::warn!("Note fetch for {} failed ({}), serving placeholder page", note_id, e);
            NoteView::default()
        }
    };

    let body = share_page::render(&note_id, &note, &share_config);

    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body))
}
