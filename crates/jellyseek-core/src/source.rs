//! Jellyfin media source
//!
//! This module provides the high-level search API. It walks the remote
//! series→season→episode hierarchy with fuzzy name filtering, enriches every
//! qualifying episode with playback info and subtitle tracks, and hands back
//! the assembled matches as a lazily evaluated stream.

use async_stream::try_stream;
use futures::{Stream, StreamExt};
use tracing::{debug, warn};

use crate::cache::HierarchyCache;
use crate::client::{ClientConfig, JellyfinClient};
use crate::error::Result;
use crate::parser::parse_source_label;
use crate::types::{
    CatalogItem, ConnectionStatus, EpisodeRange, ItemKind, MatchConfidence, MatchLocation,
    MediaKind, MediaMatch, MediaQuery, MediaStreamKind, SourceInfo, SubtitleTrack,
};

/// Resolution reported when the playback-source label carries none.
const DEFAULT_RESOLUTION: &str = "1080P";

/// Language tag reported when the label carries none.
const DEFAULT_LANGUAGE: &str = "CHS";

/// Innocuous search term used by the connection probe.
const PROBE_TERM: &str = "test";

/// Media source backed by a Jellyfin/Emby server.
///
/// Searches are lazy: remote calls happen only as the returned stream is
/// polled, so a consumer that stops early avoids the remaining lookups.
/// Hierarchy lookups are cached for the lifetime of the source (or until
/// [`JellyfinSource::clear_cache`]); playback info is always fetched fresh.
///
/// # Example
/// ```no_run
/// use futures::TryStreamExt;
/// use jellyseek_core::{ClientConfig, JellyfinSource, SubjectQuery};
///
/// # async fn example() -> Result<(), jellyseek_core::JellyseekError> {
/// let source = JellyfinSource::new(ClientConfig::new(
///     "http://nas:8096",
///     "user-id",
///     "api-key",
/// ))?;
///
/// let query = SubjectQuery::new(["Naruto"]);
/// let matches: Vec<_> = source.fetch(&query).try_collect().await?;
/// # Ok(())
/// # }
/// ```
pub struct JellyfinSource {
    client: JellyfinClient,
    cache: HierarchyCache,
}

impl JellyfinSource {
    /// Stable identifier of this media source.
    pub const ID: &'static str = "jellyfin";

    /// Create a source from the given server configuration.
    ///
    /// # Errors
    /// Returns an error when the configuration is invalid or the HTTP
    /// client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self> {
        Ok(Self::with_client(JellyfinClient::new(config)?))
    }

    /// Create a source from a pre-configured client.
    pub fn with_client(client: JellyfinClient) -> Self {
        Self {
            client,
            cache: HierarchyCache::new(),
        }
    }

    /// Display metadata of this source.
    pub fn info() -> SourceInfo {
        SourceInfo {
            id: Self::ID,
            name: "Jellyfin",
            description: "Searches a Jellyfin or Emby server for playable episodes and subtitles",
            website: "https://jellyfin.org",
            icon_url: "https://jellyfin.org/images/favicon.ico",
        }
    }

    /// Probe the configured server with a fixed series search.
    ///
    /// Reports every failure as [`ConnectionStatus::Failed`]; this method
    /// never returns an error.
    pub async fn check_connection(&self) -> ConnectionStatus {
        match self.client.search_series(PROBE_TERM).await {
            Ok(_) => ConnectionStatus::Success,
            Err(err) => {
                warn!(error = %err, "jellyfin connection probe failed");
                ConnectionStatus::Failed
            }
        }
    }

    /// Direct download/stream URL of an item.
    pub fn download_url(&self, item_id: &str) -> String {
        self.client.download_url(item_id)
    }

    /// Drop all cached hierarchy lookups. Intended to be called by the host
    /// application on shutdown or when the server library changed.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Resolve a query to a lazy stream of media matches.
    ///
    /// Items arrive in subject-name order, then series, season and episode
    /// order as returned by the server. The first remote failure terminates
    /// the stream with that error; there are no partial retries.
    pub fn fetch<'a, Q>(&'a self, query: &'a Q) -> impl Stream<Item = Result<MediaMatch>> + 'a
    where
        Q: MediaQuery + ?Sized,
    {
        try_stream! {
            let candidates = self.candidates(query.subject_names());
            futures::pin_mut!(candidates);
            while let Some(candidate) = candidates.next().await {
                let item = candidate?;
                if item.kind != ItemKind::Episode || !item.can_download {
                    continue;
                }
                if let Some(m) = self.assemble(&item).await? {
                    if query.accepts(&m) {
                        yield m;
                    }
                }
            }
        }
    }

    /// Walk the series→season→episode hierarchy for every subject name,
    /// yielding candidate items in order.
    fn candidates<'a>(
        &'a self,
        subjects: &'a [String],
    ) -> impl Stream<Item = Result<CatalogItem>> + 'a {
        try_stream! {
            for subject in subjects {
                let series = self
                    .cache
                    .series(subject, || self.client.search_series(subject))
                    .await?;
                debug!(subject = %subject, found = series.len(), "series search");

                for series_item in series
                    .iter()
                    .filter(|s| contains_ignore_case(&s.name, subject))
                {
                    let seasons = self
                        .cache
                        .seasons(&series_item.id, || self.client.seasons(&series_item.id))
                        .await?;
                    let surviving: Vec<&CatalogItem> = seasons
                        .iter()
                        .filter(|s| contains_ignore_case(&s.name, subject))
                        .collect();

                    if surviving.is_empty() {
                        // Some libraries attach episodes straight to the
                        // series; list them under the series itself, with no
                        // name filter at this level.
                        let episodes = self
                            .cache
                            .episodes(&series_item.id, || self.client.episodes(&series_item.id))
                            .await?;
                        for episode in episodes.iter() {
                            yield episode.clone();
                        }
                    } else {
                        for season in surviving {
                            let episodes = self
                                .cache
                                .episodes(&season.id, || self.client.episodes(&season.id))
                                .await?;
                            for episode in episodes
                                .iter()
                                .filter(|e| contains_ignore_case(&e.name, subject))
                            {
                                yield episode.clone();
                            }
                        }
                    }
                }
            }
        }
    }

    /// Enrich a candidate item into a full match record.
    ///
    /// Returns `Ok(None)` for items that cannot be addressed: episodes the
    /// server never numbered, and kinds other than episode or movie.
    async fn assemble(&self, item: &CatalogItem) -> Result<Option<MediaMatch>> {
        // Playback sources can change server-side; always look them up fresh.
        let playback = self.client.playback_info(&item.id).await?;
        let source = playback.media_sources.first();

        let label = source
            .map(|s| parse_source_label(&s.name))
            .unwrap_or_default();
        let resolution = label
            .resolution
            .unwrap_or_else(|| DEFAULT_RESOLUTION.to_string());
        let languages = if label.languages.is_empty() {
            vec![DEFAULT_LANGUAGE.to_string()]
        } else {
            label.languages
        };

        let (title, episodes) = match item.kind {
            ItemKind::Episode => match item.index_number {
                Some(index) => (
                    format!("{} {}", index, item.name),
                    EpisodeRange::Single(index),
                ),
                None => return Ok(None),
            },
            ItemKind::Movie => (item.name.clone(), EpisodeRange::UnknownSeason),
            _ => return Ok(None),
        };

        let download_url = source
            .and_then(|s| s.path.clone())
            .unwrap_or_else(|| self.client.download_url(&item.id));

        Ok(Some(MediaMatch {
            media_id: item.id.clone(),
            source_id: Self::ID.to_string(),
            page_url: self.client.item_url(&item.id),
            download_url,
            title,
            episodes,
            subtitles: self.subtitle_tracks(item),
            resolution,
            languages,
            location: MatchLocation::LocalNetwork,
            kind: MediaKind::Web,
            confidence: MatchConfidence::Fuzzy,
        }))
    }

    /// Map the item's external text subtitle streams to tracks.
    fn subtitle_tracks(&self, item: &CatalogItem) -> Vec<SubtitleTrack> {
        item.media_streams
            .iter()
            .filter(|s| {
                s.kind == MediaStreamKind::Subtitle && s.is_text_subtitle_stream && s.is_external
            })
            .map(|s| SubtitleTrack {
                url: self.client.subtitle_url(&item.id, s.index, &s.codec),
                language: s.language.clone(),
                mime: subtitle_mime(&s.codec).to_string(),
                label: s.title.clone(),
            })
            .collect()
    }
}

/// Case-insensitive substring check used at every filter level.
fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// MIME type of a subtitle stream, derived from its codec.
fn subtitle_mime(codec: &str) -> &'static str {
    match codec {
        "ass" => "text/x-ass",
        _ => "application/octet-stream",
    }
}
