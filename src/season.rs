//! Season parsing
//!
//! The raw state's episode-list container differs between markets, so the
//! selection is expressed as two named strategies behind one contract,
//! picked by the profile's capability flag:
//!
//! - link-list markets: take the first line list whose items look like
//!   episode nodes;
//! - video-guide markets: take the line list tagged as a video guide, and
//!   treat a guide whose first item carries no subheader as an unpublished
//!   season.
//!
//! Both strategies follow a "load more" pagination affordance and merge the
//! remainder transparently, continuing the episode numbering.

use crate::ProgressEvent;
use crate::catalog::Season;
use crate::episode;
use crate::http::{HttpError, HttpGet};
use crate::locales::LocaleProfile;
use crate::path_access::{Step, lookup, lookup_array, lookup_str};
use serde_json::Value;
use thiserror::Error;

/// Errors that abort a season parse
#[derive(Debug, Error)]
pub enum SeasonParseError {
    /// A pagination affordance was present but carried no target; a
    /// silently truncated season must not ship
    #[error("Season {season} advertises more episodes but no way to fetch them")]
    IncompleteSeason { season: u32 },

    /// Transport failure while fetching the remainder of a paginated season
    #[error(transparent)]
    Http(#[from] HttpError),
}

/// Parses one season page's state into an ordered episode list.
pub(crate) fn parse_season<F>(
    state: &Value,
    season_index: usize,
    profile: &LocaleProfile,
    http: &impl HttpGet,
    progress: &mut F,
) -> Result<Season, SeasonParseError>
where
    F: FnMut(ProgressEvent),
{
    progress(ProgressEvent::ParsingSeason {
        season: season_index as u32 + 1,
    });

    let line_lists = line_list_props(state);
    let items = if profile.uses_html_links {
        link_list_items(&line_lists)
    } else {
        video_guide_items(&line_lists)
    };
    if items.is_empty() {
        return Ok(Vec::new());
    }

    let mut episodes: Season = items
        .iter()
        .enumerate()
        .map(|(index, raw)| episode::normalize(raw, season_index, index, profile, http, progress))
        .collect();

    if let Some(affordance) = pagination_affordance(&line_lists) {
        let target = lookup_str(affordance, &[Step::Key("loadMore"), Step::Key("url")], "");
        if target.is_empty() {
            return Err(SeasonParseError::IncompleteSeason {
                season: season_index as u32 + 1,
            });
        }

        let remainder = http.get_json(&format!("{}{}", profile.api_domain, target))?;
        let more = lookup_array(&remainder, &[Step::Key("items")]);
        if more.is_empty() {
            // The affordance promised more episodes; a remainder without
            // any must not ship as a truncated season.
            return Err(SeasonParseError::IncompleteSeason {
                season: season_index as u32 + 1,
            });
        }

        let already = episodes.len();
        for (offset, raw) in more.iter().enumerate() {
            episodes.push(episode::normalize(
                raw,
                season_index,
                already + offset,
                profile,
                http,
                progress,
            ));
        }
    }

    Ok(episodes)
}

/// The `props` nodes of every line list under the main container.
fn line_list_props<'v>(state: &'v Value) -> Vec<&'v Value> {
    lookup_array(
        state,
        &[
            Step::Key("children"),
            Step::Filter {
                field: "type",
                value: "MainContainer",
            },
            Step::Key("children"),
        ],
    )
    .iter()
    .filter(|node| lookup_str(node, &[Step::Key("type")], "") == "LineList")
    .filter_map(|node| lookup(node, &[Step::Key("props")]))
    .collect()
}

/// Link-list strategy: the first line list whose items expose a `url`.
fn link_list_items<'v>(line_lists: &[&'v Value]) -> &'v [Value] {
    line_lists
        .iter()
        .map(|props| lookup_array(props, &[Step::Key("items")]))
        .find(|items| items.first().is_some_and(|first| first.get("url").is_some()))
        .unwrap_or(&[])
}

/// Video-guide strategy: the line list tagged as a video guide. A first
/// item without a subheader means the season has no published episodes yet.
fn video_guide_items<'v>(line_lists: &[&'v Value]) -> &'v [Value] {
    let Some(guide) = line_lists
        .iter()
        .copied()
        .find(|props| lookup_str(props, &[Step::Key("type")], "") == "video-guide")
    else {
        return &[];
    };

    let items = lookup_array(guide, &[Step::Key("items")]);
    match items.first() {
        Some(first) if lookup(first, &[Step::Key("meta"), Step::Key("subHeader")]).is_some() => {
            items
        }
        _ => &[],
    }
}

/// The "load more" affordance rides on the video-guide list's props.
fn pagination_affordance<'v>(line_lists: &[&'v Value]) -> Option<&'v Value> {
    line_lists.iter().copied().find(|props| {
        lookup_str(props, &[Step::Key("type")], "") == "video-guide"
            && lookup(props, &[Step::Key("loadMore")]).is_some_and(|value| !value.is_null())
    })
}
