//! Embedded-state extraction
//!
//! The sites render their pages on the server and inline the application
//! state as a JSON assignment so the client-side script can hydrate without
//! a second request. This module fetches a page once and offers two views of
//! it: the decoded state blob, and the season hyperlinks scraped from the
//! raw markup for the markets whose state carries no season selector.

use crate::http::{HttpError, HttpGet};
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

/// Token introducing the inline state assignment.
const STATE_MARKER: &str = "window.__DATA__";

static SEASON_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"href="(/seasons/south-park/\w+/\w+-\d+)"#).expect("season link pattern")
});

/// One fetched page, retained as raw text so both extraction passes can
/// share a single request.
pub(crate) struct Page {
    body: String,
}

impl Page {
    pub(crate) fn fetch(http: &impl HttpGet, url: &str) -> Result<Self, HttpError> {
        Ok(Self {
            body: http.get_text(url)?,
        })
    }

    /// Decodes the embedded application state.
    ///
    /// Returns `None` when the marker is absent or the blob does not decode;
    /// callers treat that as "page not scrapeable" and substitute empty
    /// defaults.
    pub(crate) fn state(&self) -> Option<Value> {
        extract_state(&self.body)
    }

    /// Season page paths scraped from the raw HTML, in document order,
    /// behind a leading `None` sentinel standing for "the current page is
    /// itself a season page".
    pub(crate) fn season_links(&self) -> Vec<Option<String>> {
        let mut links = vec![None];
        links.extend(
            SEASON_LINK
                .captures_iter(&self.body)
                .map(|capture| Some(capture[1].to_string())),
        );
        links
    }
}

/// Slices the JSON blob between the assignment following the marker and the
/// first statement terminator, then decodes it. serde_json keeps the last
/// write for duplicate keys, matching the lenient decode the upstream blob
/// requires.
fn extract_state(body: &str) -> Option<Value> {
    let tail = &body[body.find(STATE_MARKER)?..];
    let assign = tail.find('=')?;
    let brace = tail.find("};")?;
    if brace < assign {
        return None;
    }
    serde_json::from_str(tail[assign + 1..=brace].trim()).ok()
}
