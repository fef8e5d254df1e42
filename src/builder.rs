//! Catalog assembly
//!
//! Discovers the season page locations for one market, parses every season
//! page in discovery order, and aggregates the result into an oldest-first
//! catalog stamped with its creation time.

use crate::catalog::{Catalog, Season};
use crate::http::HttpGet;
use crate::locales::LocaleProfile;
use crate::page_state::Page;
use crate::path_access::{Step, lookup, lookup_array};
use crate::season;
use crate::{CatalogError, ProgressEvent};
use chrono::Local;
use serde_json::Value;

/// Retain the very first discovered season even when it parses empty. The
/// upstream behavior this mirrors may be accidental rather than a policy;
/// flip with care.
const KEEP_FIRST_SEASON_WHEN_EMPTY: bool = true;

pub(crate) fn build<F>(
    profile: &'static LocaleProfile,
    http: &impl HttpGet,
    progress: &mut F,
) -> Result<Catalog, CatalogError>
where
    F: FnMut(ProgressEvent),
{
    let listing_url = profile.seasons_url();
    progress(ProgressEvent::FetchingSeasonList {
        url: listing_url.clone(),
    });

    let listing = Page::fetch(http, &listing_url)?;
    // A listing page without embedded state is not scrapeable; everything
    // below degrades through empty defaults.
    let root_state = listing.state().unwrap_or(Value::Null);

    let locations = if profile.uses_html_links {
        listing.season_links()
    } else {
        season_selector_locations(&root_state)
    };
    progress(ProgressEvent::SeasonsDiscovered {
        count: locations.len(),
    });

    let total = locations.len();
    let mut seasons: Vec<Season> = Vec::new();
    for (position, location) in locations.iter().enumerate() {
        // Oldest discovered season gets the lowest chronological index.
        let chronological_index = total - (position + 1);

        let episodes = match location {
            // The sentinel marks the listing page doubling as a season page.
            None => season::parse_season(&root_state, chronological_index, profile, http, progress)?,
            Some(path) => {
                let url = format!("{}{}", profile.site_domain, path);
                let state = Page::fetch(http, &url)?.state().unwrap_or(Value::Null);
                season::parse_season(&state, chronological_index, profile, http, progress)?
            }
        };

        if episodes.is_empty() && (!seasons.is_empty() || !KEEP_FIRST_SEASON_WHEN_EMPTY) {
            continue;
        }
        seasons.push(episodes);
    }
    seasons.reverse();

    Ok(Catalog {
        created: Local::now().format("%Y-%m-%d %H:%M:%S%.6f").to_string(),
        seasons,
    })
}

/// Season page locations from the embedded season selector, in document
/// order; the current season carries no url and becomes the sentinel.
fn season_selector_locations(state: &Value) -> Vec<Option<String>> {
    lookup_array(
        state,
        &[
            Step::Key("children"),
            Step::Filter {
                field: "type",
                value: "MainContainer",
            },
            Step::Key("children"),
            Step::Filter {
                field: "type",
                value: "SeasonSelector",
            },
            Step::Key("props"),
            Step::Key("items"),
        ],
    )
    .iter()
    .map(|item| {
        lookup(item, &[Step::Key("url")])
            .and_then(Value::as_str)
            .map(str::to_string)
    })
    .collect()
}
