use std::env;

/// How the share-link page behaves once it loads. Exactly one mode is active
/// per deployment; `SHARE_PAGE_MODE` selects it at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareMode {
    /// Styled note preview with an automatic deep-link attempt and an inline
    /// "read it here" fallback.
    Rich,
    /// Minimal page that tries the deep link immediately and then replaces
    /// itself with the store listing.
    Redirect,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub telegram: TelegramConfig,
    pub notes_db_url: String,
    pub share: ShareConfig,
}

#[derive(Debug, Clone)]
pub struct TelegramConfig {
    pub api_base_url: String,
    pub bot_token: String,
}

#[derive(Debug, Clone)]
pub struct ShareConfig {
    pub mode: ShareMode,
    pub deep_link_scheme: String,
    pub store_url: String,
}

impl Config {
    /// Loads configuration from the environment. The bot token and the notes
    /// database URL have no defaults on purpose: startup fails if either is
    /// missing rather than falling back to a baked-in credential.
    pub fn from_env() -> Result<Self, env::VarError> {
        Ok(Config {
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .unwrap_or(3000),

            telegram: TelegramConfig {
                api_base_url: env::var("TELEGRAM_API_BASE_URL")
                    .unwrap_or_else(|_| "https://api.telegram.org".to_string()),
                bot_token: env::var("TELEGRAM_BOT_TOKEN")?,
            },

            notes_db_url: env::var("NOTES_DB_URL")?,

            share: ShareConfig {
                mode: match env::var("SHARE_PAGE_MODE")
                    .unwrap_or_else(|_| "rich".to_string())
                    .to_lowercase()
                    .as_str()
                {
                    "redirect" => ShareMode::Redirect,
                    "rich" => ShareMode::Rich,
                    other => {
                        log::warn!("Unknown SHARE_PAGE_MODE '{}', using 'rich'", other);
                        ShareMode::Rich
                    }
                },
                deep_link_scheme: env::var("APP_DEEP_LINK_SCHEME")
                    .unwrap_or_else(|_| "notesapp".to_string()),
                store_url: env::var("APP_STORE_URL").unwrap_or_else(|_| {
                    "https://play.google.com/store/apps/details?id=com.example.notes".to_string()
                }),
            },
        })
    }
}
