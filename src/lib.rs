//! southpark-catalog - Versioned episode catalog snapshots
//!
//! This library extracts the season and episode catalog of one supported
//! market from the JSON application state the sites embed into their
//! server-rendered pages, resolves every episode to playable stream
//! descriptors through the media-resolution service, and produces an
//! oldest-first, timestamped catalog ready to be written as a snapshot.

mod builder;
mod catalog;
mod episode;
mod http;
mod locales;
mod media;
mod page_state;
mod path_access;
mod season;
mod snapshot;

// Re-export the public surface
pub use catalog::{Catalog, Episode, Season};
pub use http::HttpError;
pub use locales::{LocaleProfile, UnknownLocaleError, profile_for, supported_locales};
pub use media::decode_descriptor;
pub use season::SeasonParseError;
pub use snapshot::{SnapshotError, write_snapshot};

use http::AgentClient;
use thiserror::Error;

/// Progress event emitted during catalog generation
///
/// These events allow library users to track progress and report degraded
/// episodes during a run.
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// Generation started for a locale
    Started { locale: String },

    /// Fetching the seasons listing page
    FetchingSeasonList { url: String },

    /// Season page locations discovered
    SeasonsDiscovered { count: usize },

    /// Parsing the episodes of one season
    ParsingSeason { season: u32 },

    /// An episode resolved to at least one media descriptor
    EpisodeResolved {
        season: u32,
        episode: u32,
        title: String,
        descriptor_count: usize,
    },

    /// An episode was kept with an empty descriptor list.
    ///
    /// `error` is `Some` when resolution failed outright and `None` when the
    /// service simply offered no stream; both degrade identically in the
    /// output data.
    EpisodeUnavailable {
        season: u32,
        episode: u32,
        title: String,
        error: Option<String>,
    },

    /// Generation complete
    Complete { season_count: usize },
}

/// Top-level error type for catalog generation
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The requested locale is not registered
    #[error("Locale error: {0}")]
    UnknownLocale(#[from] UnknownLocaleError),

    /// Transport failure while fetching a listing or season page
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    /// A season could not be parsed completely
    #[error("Season parsing error: {0}")]
    SeasonParse(#[from] SeasonParseError),

    /// The snapshot artifact could not be written
    #[error("Snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),
}

/// Generates the complete catalog for one locale.
///
/// Selects the locale's profile, discovers all season pages, parses their
/// episodes, and resolves each episode's media descriptors. Episodes whose
/// resolution fails are kept with an empty descriptor list; transport
/// failures on listing or season pages abort the run. There is no retry
/// policy anywhere, so a transient failure requires re-running.
///
/// Progress events are emitted through the provided callback, allowing
/// callers to print line-oriented status output or remain silent.
///
/// # Examples
///
/// ```no_run
/// use southpark_catalog::{generate_catalog, write_snapshot, ProgressEvent};
/// use std::path::Path;
///
/// let catalog = generate_catalog("en", |event| {
///     if let ProgressEvent::ParsingSeason { season } = event {
///         println!("parsing episodes from season {season}");
///     }
/// })
/// .unwrap();
/// write_snapshot(&catalog, "en", Path::new(".")).unwrap();
/// ```
pub fn generate_catalog<F>(
    locale_code: &str,
    mut progress_callback: F,
) -> Result<Catalog, CatalogError>
where
    F: FnMut(ProgressEvent),
{
    let profile = locales::profile_for(locale_code)?;
    progress_callback(ProgressEvent::Started {
        locale: profile.code.to_string(),
    });

    let http = AgentClient::new()?;
    let catalog = builder::build(profile, &http, &mut progress_callback)?;

    progress_callback(ProgressEvent::Complete {
        season_count: catalog.seasons.len(),
    });

    Ok(catalog)
}
