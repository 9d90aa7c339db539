use chrono::{DateTime, TimeZone, Utc};

use crate::config::{ShareConfig, ShareMode};
use crate::models::note::{CreatedDate, NoteView};

const FALLBACK_TITLE: &str = "Untitled Note";

/// Delay before the page tries the deep link (rich mode).
const DEEP_LINK_DELAY_MS: u32 = 300;
/// Delay before the rich page admits the app probably didn't open.
const STATUS_DELAY_MS: u32 = 2000;
/// Delay before the redirect page replaces itself with the store listing.
const STORE_REDIRECT_DELAY_MS: u32 = 1000;

const RICH_STYLE: &str = "\
body{margin:0;font-family:-apple-system,'Segoe UI',Roboto,sans-serif;background:#f4f5f7;color:#1f2430}\
.card{max-width:560px;margin:48px auto;padding:32px;background:#fff;border-radius:12px;box-shadow:0 2px 12px rgba(0,0,0,.08)}\
h1{margin:0 0 4px;font-size:1.6em}\
.date{margin:0 0 16px;color:#6b7280;font-size:.9em}\
.status{color:#6b7280;font-size:.9em}\
.content{white-space:pre-wrap;line-height:1.5;margin:16px 0}\
.tags{margin:0 0 24px;padding:0;list-style:none}\
.tags li{display:inline-block;margin-right:8px;padding:2px 10px;background:#eef2ff;color:#4338ca;border-radius:999px;font-size:.85em}\
.actions a{display:inline-block;margin-right:12px;padding:10px 20px;border-radius:8px;text-decoration:none}\
.primary{background:#4338ca;color:#fff}\
.secondary{background:#eef2ff;color:#4338ca}";

/// Escapes text for embedding in HTML content or attribute values.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Formats a creation date as a long human-readable date ("January 5, 2024").
/// Unparseable input yields `None` and the page simply omits the date line.
pub fn format_created_date(date: &CreatedDate) -> Option<String> {
    let parsed: DateTime<Utc> = match date {
        CreatedDate::Millis(ms) => Utc.timestamp_millis_opt(*ms).single()?,
        CreatedDate::Text(text) => DateTime::parse_from_rfc3339(text)
            .ok()?
            .with_timezone(&Utc),
    };
    Some(parsed.format("%B %-d, %Y").to_string())
}

/// Renders the share page for a note. Both modes build the same two URLs: a
/// custom-scheme deep link carrying the note ID, and the fixed store listing.
/// The server never learns whether the deep link worked; the generated page
/// handles the fallback with two one-shot timers.
pub fn render(note_id: &str, note: &NoteView, config: &ShareConfig) -> String {
    let deep_link = format!("{}://note/{}", config.deep_link_scheme, note_id);
    match config.mode {
        ShareMode::Rich => render_rich(note, &deep_link, &config.store_url),
        ShareMode::Redirect => render_redirect(&deep_link, &config.store_url),
    }
}

fn render_rich(note: &NoteView, deep_link: &str, store_url: &str) -> String {
    let title = escape_html(note.title.as_deref().unwrap_or(FALLBACK_TITLE));
    let content = escape_html(&note.content);
    let deep_link = escape_html(deep_link);
    let store_url = escape_html(store_url);

    let date_line = note
        .created_date
        .as_ref()
        .and_then(format_created_date)
        .map(|d| format!("<p class=\"date\">{}</p>\n", escape_html(&d)))
        .unwrap_or_default();

    let tags = if note.tags.is_empty() {
        String::new()
    } else {
        let items: String = note
            .tags
            .iter()
            .map(|t| format!("<li>#{}</li>", escape_html(t)))
            .collect();
        format!("<ul class=\"tags\">{}</ul>\n", items)
    };

    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title}</title>\n\
         <style>{style}</style>\n\
         </head>\n\
         <body>\n\
         <main class=\"card\">\n\
         <h1>{title}</h1>\n\
         {date_line}\
         <p id=\"status\" class=\"status\">Opening in the app&hellip;</p>\n\
         <div class=\"content\">{content}</div>\n\
         {tags}\
         <div class=\"actions\">\n\
         <a id=\"open-app\" class=\"primary\" href=\"{deep_link}\">Open in App</a>\n\
         <a class=\"secondary\" href=\"{store_url}\">Get the App</a>\n\
         </div>\n\
         </main>\n\
         <script>\n\
         var deepLink = document.getElementById('open-app').href;\n\
         setTimeout(function () {{ window.location.href = deepLink; }}, {open_delay});\n\
         setTimeout(function () {{\n\
         document.getElementById('status').textContent = \"App didn't open? You can read the note right here.\";\n\
         }}, {status_delay});\n\
         </script>\n\
         </body>\n\
         </html>\n",
        title = title,
        style = RICH_STYLE,
        date_line = date_line,
        content = content,
        tags = tags,
        deep_link = deep_link,
        store_url = store_url,
        open_delay = DEEP_LINK_DELAY_MS,
        status_delay = STATUS_DELAY_MS,
    )
}

fn render_redirect(deep_link: &str, store_url: &str) -> String {
    let deep_link = escape_html(deep_link);
    let store_url = escape_html(store_url);

    // The deep link fires immediately; after the delay the page replaces
    // itself with the store listing whether or not the app opened. The
    // store URL is read back out of the anchor so the script never embeds
    // request-derived text directly.
    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <title>Opening note&hellip;</title>\n\
         </head>\n\
         <body>\n\
         <p>Opening the app&hellip;</p>\n\
         <a id=\"open-app\" href=\"{deep_link}\" hidden>Open in App</a>\n\
         <a id=\"store\" href=\"{store_url}\" hidden>Get the App</a>\n\
         <script>\n\
         window.location.href = document.getElementById('open-app').href;\n\
         setTimeout(function () {{\n\
         window.location.replace(document.getElementById('store').href);\n\
         }}, {store_delay});\n\
         </script>\n\
         </body>\n\
         </html>\n",
        deep_link = deep_link,
        store_url = store_url,
        store_delay = STORE_REDIRECT_DELAY_MS,
    )
}
