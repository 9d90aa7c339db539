pub mod notes_db;
pub mod share_page;
pub mod telegram;
