//! HTML pages. Templates are compiled into the binary; only the admin page has dynamic content.

use axum::response::Html;

use crate::config::EnvStatus;

const INDEX_HTML: &str = include_str!("../templates/index.html");
const CHAT_HTML: &str = include_str!("../templates/chat.html");
const ADMIN_HTML: &str = include_str!("../templates/admin.html");

const STATUS_ROWS_SLOT: &str = "{{ status_rows }}";

pub fn home() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub fn chat() -> Html<&'static str> {
    Html(CHAT_HTML)
}

/// Render the diagnostics page from a presence report.
pub fn admin(status: &EnvStatus) -> Html<String> {
    let rows: String = status
        .rows
        .iter()
        .map(|(name, value)| {
            format!(
                "        <tr><td><code>{}</code></td><td>{}</td></tr>\n",
                escape_html(name),
                escape_html(value)
            )
        })
        .collect();
    Html(ADMIN_HTML.replace(STATUS_ROWS_SLOT, rows.trim_end()))
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}
