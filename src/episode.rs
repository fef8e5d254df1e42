//! Episode normalization
//!
//! Maps one raw episode node from the page state into a canonical
//! [`Episode`] record and resolves its media descriptors. Resolution
//! failures degrade the descriptor list to empty and are reported as
//! progress events; they never abort the season.

use crate::ProgressEvent;
use crate::catalog::Episode;
use crate::http::HttpGet;
use crate::locales::LocaleProfile;
use crate::media;
use crate::path_access::{Step, lookup_str};
use serde_json::Value;

pub(crate) fn normalize<F>(
    raw: &Value,
    season_index: usize,
    episode_index: usize,
    profile: &LocaleProfile,
    http: &impl HttpGet,
    progress: &mut F,
) -> Episode
where
    F: FnMut(ProgressEvent),
{
    let mut episode = Episode {
        image: field(raw, &[Step::Key("media"), Step::Key("image"), Step::Key("url")]),
        uuid: field(raw, &[Step::Key("id")]),
        details: field(raw, &[Step::Key("meta"), Step::Key("description")]),
        date: field(raw, &[Step::Key("meta"), Step::Key("date")]),
        title: field(raw, &[Step::Key("meta"), Step::Key("subHeader")]),
        url: field(raw, &[Step::Key("url")]),
        season: season_index as u32 + 1,
        episode: episode_index as u32 + 1,
        mediagen: Vec::new(),
    };

    match media::resolve_descriptors(http, profile, &episode.uuid, &episode.url) {
        Ok(descriptors) if !descriptors.is_empty() => {
            episode.mediagen = descriptors
                .iter()
                .map(|descriptor| media::encode_descriptor(descriptor))
                .collect();
            progress(ProgressEvent::EpisodeResolved {
                season: episode.season,
                episode: episode.episode,
                title: episode.title.clone(),
                descriptor_count: episode.mediagen.len(),
            });
        }
        Ok(_) => {
            progress(ProgressEvent::EpisodeUnavailable {
                season: episode.season,
                episode: episode.episode,
                title: episode.title.clone(),
                error: None,
            });
        }
        Err(error) => {
            progress(ProgressEvent::EpisodeUnavailable {
                season: episode.season,
                episode: episode.episode,
                title: episode.title.clone(),
                error: Some(error.to_string()),
            });
        }
    }

    episode
}

fn field(raw: &Value, steps: &[Step<'_>]) -> String {
    lookup_str(raw, steps, "").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::stub::StubHttp;
    use crate::locales::profile_for;
    use serde_json::json;

    fn raw_episode() -> Value {
        json!({
            "id": "ep-1",
            "url": "/episodes/ep-1",
            "media": {"image": {"url": "https://img.example/ep-1.jpg"}},
            "meta": {
                "subHeader": "Weight Gain 4000",
                "description": "Cartman bulks up.",
                "date": "1997-08-20"
            }
        })
    }

    #[test]
    fn test_fields_mapped_and_numbers_one_based() {
        let http = StubHttp::with(&[]);
        let profile = profile_for("de").unwrap();
        let mut events = Vec::new();

        let episode = normalize(&raw_episode(), 0, 2, profile, &http, &mut |e| events.push(e));

        assert_eq!(episode.uuid, "ep-1");
        assert_eq!(episode.title, "Weight Gain 4000");
        assert_eq!(episode.details, "Cartman bulks up.");
        assert_eq!(episode.date, "1997-08-20");
        assert_eq!(episode.image, "https://img.example/ep-1.jpg");
        assert_eq!(episode.url, "/episodes/ep-1");
        assert_eq!(episode.season, 1);
        assert_eq!(episode.episode, 3);
    }

    #[test]
    fn test_missing_fields_default_to_empty_strings() {
        let http = StubHttp::with(&[]);
        let profile = profile_for("de").unwrap();

        let episode = normalize(&json!({}), 0, 0, profile, &http, &mut |_| {});

        assert_eq!(episode.uuid, "");
        assert_eq!(episode.title, "");
        assert_eq!(episode.image, "");
        assert!(episode.mediagen.is_empty());
    }

    #[test]
    fn test_resolution_failure_degrades_to_empty_descriptors() {
        // No stub response at all, so the resolver call fails outright.
        let http = StubHttp::with(&[]);
        let profile = profile_for("de").unwrap();
        let mut events = Vec::new();

        let episode = normalize(&raw_episode(), 0, 0, profile, &http, &mut |e| events.push(e));

        assert!(episode.mediagen.is_empty());
        assert!(matches!(
            events.as_slice(),
            [ProgressEvent::EpisodeUnavailable { error: Some(_), .. }]
        ));
    }

    #[test]
    fn test_resolved_descriptors_are_encoded() {
        let http = StubHttp::with(&[(
            "https://media.mtvnservices.com/pmt/e1/access/index.html?uri=mgid:arc:episode:southpark.intl:ep-1&configtype=edge&ref=https://southpark.de/episodes/ep-1",
            r#"{"feed": {"items": [{"group": {"content": "https://media.example/a?x=1"}}]}}"#,
        )]);
        let profile = profile_for("de").unwrap();
        let mut events = Vec::new();

        let episode = normalize(&raw_episode(), 0, 0, profile, &http, &mut |e| events.push(e));

        assert_eq!(episode.mediagen.len(), 1);
        assert_eq!(
            crate::media::decode_descriptor(&episode.mediagen[0]).unwrap(),
            "https://media.example/a?x=1&format=json&acceptMethods=hls"
        );
        assert!(matches!(
            events.as_slice(),
            [ProgressEvent::EpisodeResolved { descriptor_count: 1, .. }]
        ));
    }
}
