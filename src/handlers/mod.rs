use serde::Serialize;

pub mod health;
pub mod notify;
pub mod share;
pub mod verify;

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
