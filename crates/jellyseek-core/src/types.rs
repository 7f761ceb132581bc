//! Data types for Jellyseek
//!
//! Wire types mirror the JSON shapes of the Jellyfin/Emby `/Items` and
//! `/PlaybackInfo` endpoints (PascalCase field names). Result types describe
//! the assembled matches handed back to the caller.

use serde::{Deserialize, Serialize};

/// Kind of a remote catalog item.
///
/// The server reports more kinds than we care about; everything unknown
/// decodes as [`ItemKind::Other`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    Series,
    Season,
    Episode,
    Movie,
    #[default]
    #[serde(other)]
    Other,
}

/// One page of `/Items` results.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ItemsPage {
    #[serde(default)]
    pub items: Vec<CatalogItem>,
    #[serde(default)]
    pub total_record_count: u64,
}

/// A series, season, episode or movie record from the remote server.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CatalogItem {
    /// Server-unique identifier.
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Display name of the containing season, when the server provides it.
    #[serde(default)]
    pub season_name: Option<String>,
    /// Ordinal episode number within its season.
    #[serde(default)]
    pub index_number: Option<u32>,
    #[serde(rename = "Type", default)]
    pub kind: ItemKind,
    #[serde(default)]
    pub can_download: bool,
    #[serde(default)]
    pub media_streams: Vec<MediaStreamInfo>,
}

/// Kind of a single media stream within an item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaStreamKind {
    Video,
    Audio,
    Subtitle,
    #[default]
    #[serde(other)]
    Other,
}

/// One stream (video, audio or subtitle) of a catalog item.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MediaStreamInfo {
    #[serde(rename = "Type", default)]
    pub kind: MediaStreamKind,
    #[serde(default)]
    pub codec: String,
    #[serde(default)]
    pub index: u32,
    #[serde(default)]
    pub is_external: bool,
    #[serde(default)]
    pub is_text_subtitle_stream: bool,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
}

/// Response of `/Items/{id}/PlaybackInfo`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PlaybackInfo {
    #[serde(default)]
    pub media_sources: Vec<PlaybackSource>,
}

/// One playable source of an item.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PlaybackSource {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Direct stream path, when the server exposes one.
    #[serde(default)]
    pub path: Option<String>,
}

/// Which episode(s) a media match covers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum EpisodeRange {
    /// A single episode, identified by its ordinal index.
    Single(u32),
    /// A movie or special that does not belong to a numbered season.
    UnknownSeason,
}

/// Where the media is served from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MatchLocation {
    /// A public internet source.
    Online,
    /// A server on the caller's own network.
    LocalNetwork,
}

/// Delivery mechanism of the media.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MediaKind {
    /// Streamed over HTTP.
    Web,
    /// Fetched via BitTorrent.
    Torrent,
}

/// How the match was established.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MatchConfidence {
    /// Matched by exact identifier lookup.
    Exact,
    /// Matched by substring/heuristic name comparison.
    Fuzzy,
}

/// An external subtitle track of a matched item.
#[derive(Debug, Clone, Serialize)]
pub struct SubtitleTrack {
    pub url: String,
    pub language: Option<String>,
    pub mime: String,
    pub label: Option<String>,
}

/// A playable media item resolved from a search.
#[derive(Debug, Clone, Serialize)]
pub struct MediaMatch {
    /// Identifier of the item on the remote server.
    pub media_id: String,
    /// Identifier of the source adapter that produced this match.
    pub source_id: String,
    /// Canonical URL of the item on the server.
    pub page_url: String,
    /// Direct stream path, or a constructed download URL when none exists.
    pub download_url: String,
    pub title: String,
    pub episodes: EpisodeRange,
    pub subtitles: Vec<SubtitleTrack>,
    pub resolution: String,
    pub languages: Vec<String>,
    pub location: MatchLocation,
    pub kind: MediaKind,
    pub confidence: MatchConfidence,
}

/// Outcome of a connection probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ConnectionStatus {
    Success,
    Failed,
}

/// Display metadata of a media source adapter.
#[derive(Debug, Clone, Serialize)]
pub struct SourceInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub website: &'static str,
    pub icon_url: &'static str,
}

/// A caller's search request: the subject names to look for and the final
/// accept/reject filter applied to every assembled match.
pub trait MediaQuery {
    /// Free-text show titles to search for.
    fn subject_names(&self) -> &[String];

    /// Final acceptance predicate over an assembled match.
    fn accepts(&self, candidate: &MediaMatch) -> bool;
}

/// Minimal [`MediaQuery`] that searches a list of names and accepts every
/// assembled match.
#[derive(Debug, Clone, Default)]
pub struct SubjectQuery {
    names: Vec<String>,
}

impl SubjectQuery {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }
}

impl MediaQuery for SubjectQuery {
    fn subject_names(&self) -> &[String] {
        &self.names
    }

    fn accepts(&self, _candidate: &MediaMatch) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_item_deserialization() {
        let json = r#"{
            "Id": "E1",
            "Name": "Naruto",
            "SeasonName": "Season 1",
            "IndexNumber": 1,
            "Type": "Episode",
            "CanDownload": true,
            "MediaStreams": [
                {
                    "Type": "Subtitle",
                    "Codec": "ass",
                    "Index": 2,
                    "IsExternal": true,
                    "IsTextSubtitleStream": true,
                    "Title": "Simplified",
                    "Language": "chi"
                }
            ]
        }"#;

        let item: CatalogItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.id, "E1");
        assert_eq!(item.kind, ItemKind::Episode);
        assert_eq!(item.season_name.as_deref(), Some("Season 1"));
        assert_eq!(item.index_number, Some(1));
        assert!(item.can_download);

        let stream = &item.media_streams[0];
        assert_eq!(stream.kind, MediaStreamKind::Subtitle);
        assert_eq!(stream.codec, "ass");
        assert_eq!(stream.index, 2);
        assert!(stream.is_external);
        assert!(stream.is_text_subtitle_stream);
    }

    #[test]
    fn test_sparse_catalog_item_uses_defaults() {
        let item: CatalogItem = serde_json::from_str(r#"{"Id": "S1"}"#).unwrap();
        assert_eq!(item.name, "");
        assert_eq!(item.kind, ItemKind::Other);
        assert_eq!(item.index_number, None);
        assert!(!item.can_download);
        assert!(item.media_streams.is_empty());
    }

    #[test]
    fn test_unknown_item_type_decodes_as_other() {
        let item: CatalogItem =
            serde_json::from_str(r#"{"Id": "X", "Type": "BoxSet"}"#).unwrap();
        assert_eq!(item.kind, ItemKind::Other);
    }

    #[test]
    fn test_items_page_deserialization() {
        let json = r#"{"Items": [{"Id": "S1", "Type": "Series"}], "TotalRecordCount": 1}"#;
        let page: ItemsPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.total_record_count, 1);
    }

    #[test]
    fn test_playback_info_deserialization() {
        let json = r#"{
            "MediaSources": [
                {"Id": "M1", "Name": "Naruto 1080p [CHS]", "Path": "/media/naruto/01.mkv"}
            ]
        }"#;
        let info: PlaybackInfo = serde_json::from_str(json).unwrap();
        assert_eq!(info.media_sources.len(), 1);
        assert_eq!(info.media_sources[0].name, "Naruto 1080p [CHS]");
        assert_eq!(
            info.media_sources[0].path.as_deref(),
            Some("/media/naruto/01.mkv")
        );
    }

    #[test]
    fn test_playback_info_without_sources() {
        let info: PlaybackInfo = serde_json::from_str("{}").unwrap();
        assert!(info.media_sources.is_empty());
    }

    #[test]
    fn test_subject_query_accepts_everything() {
        let query = SubjectQuery::new(["Naruto"]);
        assert_eq!(query.subject_names(), ["Naruto"]);

        let candidate = MediaMatch {
            media_id: "E1".to_string(),
            source_id: "jellyfin".to_string(),
            page_url: "http://server/Items/E1".to_string(),
            download_url: "http://server/Videos/E1/stream?api_key=k".to_string(),
            title: "1 Naruto".to_string(),
            episodes: EpisodeRange::Single(1),
            subtitles: Vec::new(),
            resolution: "1080P".to_string(),
            languages: vec!["CHS".to_string()],
            location: MatchLocation::LocalNetwork,
            kind: MediaKind::Web,
            confidence: MatchConfidence::Fuzzy,
        };
        assert!(query.accepts(&candidate));
    }
}
