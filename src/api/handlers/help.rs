//! Usage page.

use axum::{
    extract::State,
    http::{HeaderMap, header::HOST},
    response::Html,
};

use crate::api::state::AppState;
use crate::domain::TokenKind;

const TITLE: &str = "Random Number and String Generator";

/// Static HTML page describing the available kinds and the default length.
pub async fn help(State(state): State<AppState>, headers: HeaderMap) -> Html<String> {
    let host = headers
        .get(HOST)
        .and_then(|h| h.to_str().ok())
        .unwrap_or_default();

    Html(render(&escape(host), state.config.generator.default_length))
}

fn render(host: &str, default_length: usize) -> String {
    let kinds: String = TokenKind::ALL
        .iter()
        .map(|kind| format!("    <li>{}: {}</li>\n", kind.as_str(), kind.description()))
        .collect();

    format!(
        "<!DOCTYPE html>
<title>{TITLE}</title>
<h1>{TITLE}</h1>
<p><b>Usage:</b> {host}/get/<i>type</i>/[<i>length</i>]</p>
<div>Types:</div>
<ul>
{kinds}</ul>
<div>Default length is {default_length}</div>
"
    )
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
