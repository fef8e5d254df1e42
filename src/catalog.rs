//! Catalog data model
//!
//! These structures define the snapshot artifact consumed by the playback
//! layer. Season and episode numbers are serialized as decimal strings to
//! keep the on-disk shape stable for existing consumers.

use serde::{Serialize, Serializer};

/// One episode of the catalog.
///
/// Numbers are 1-based and reflect discovery order, not identifiers from the
/// source data. `mediagen` holds opaque-encoded stream descriptors and may
/// be empty when no stream could be resolved; it is never null.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Episode {
    /// Thumbnail image URL
    pub image: String,
    /// Upstream id of the episode
    pub uuid: String,
    /// Short description
    pub details: String,
    /// Original air date, kept as the opaque string the site exposes
    pub date: String,
    /// Episode title
    pub title: String,
    /// Canonical path of the episode page
    pub url: String,
    /// 1-based season number
    #[serde(serialize_with = "as_decimal_string")]
    pub season: u32,
    /// 1-based episode number within the season
    #[serde(serialize_with = "as_decimal_string")]
    pub episode: u32,
    /// Opaque-encoded media descriptors, possibly empty
    pub mediagen: Vec<String>,
}

/// Ordered episodes of one season; the index is implicit in the position.
pub type Season = Vec<Episode>;

/// A complete catalog snapshot, seasons ordered oldest-first.
#[derive(Debug, Clone, Serialize)]
pub struct Catalog {
    /// Local time at which aggregation completed
    pub created: String,
    /// All discovered seasons, oldest first
    pub seasons: Vec<Season>,
}

fn as_decimal_string<S: Serializer>(value: &u32, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_episode_serializes_to_artifact_shape() {
        let episode = Episode {
            image: "https://img.example/1.jpg".to_string(),
            uuid: "abcd-1234".to_string(),
            details: "The one with the probe.".to_string(),
            date: "1997-08-13".to_string(),
            title: "Cartman Gets an Anal Probe".to_string(),
            url: "/episodes/940f8z/south-park-cartman-gets-an-anal-probe-season-1-ep-1".to_string(),
            season: 1,
            episode: 1,
            mediagen: vec!["aHR0cHM6Ly9leGFtcGxl".to_string()],
        };

        let value = serde_json::to_value(&episode).unwrap();
        assert_eq!(
            value,
            json!({
                "image": "https://img.example/1.jpg",
                "uuid": "abcd-1234",
                "details": "The one with the probe.",
                "date": "1997-08-13",
                "title": "Cartman Gets an Anal Probe",
                "url": "/episodes/940f8z/south-park-cartman-gets-an-anal-probe-season-1-ep-1",
                "season": "1",
                "episode": "1",
                "mediagen": ["aHR0cHM6Ly9leGFtcGxl"]
            })
        );
    }
}
