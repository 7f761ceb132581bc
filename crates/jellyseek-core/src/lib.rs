//! Jellyseek Core Library
//!
//! This crate resolves free-text show names against the catalog of a
//! Jellyfin/Emby media server and returns playable media matches with
//! their subtitle tracks and stream URLs.
//!
//! # Features
//! - Fuzzy series → season → episode search over the server catalog
//! - Lazily evaluated match stream; remote calls happen only when polled
//! - In-memory caching of hierarchy lookups, cleared on demand
//! - Connection probe for validating the configured endpoint and API key

pub mod cache;
pub mod client;
pub mod error;
pub mod parser;
pub mod source;
pub mod types;

// Re-export main types for convenience
pub use client::{ClientConfig, JellyfinClient};
pub use error::{JellyseekError, Result};
pub use parser::{parse_source_label, SourceLabel};
pub use source::JellyfinSource;
pub use types::{
    CatalogItem, ConnectionStatus, EpisodeRange, ItemKind, ItemsPage, MatchConfidence,
    MatchLocation, MediaKind, MediaMatch, MediaQuery, MediaStreamInfo, MediaStreamKind,
    PlaybackInfo, PlaybackSource, SourceInfo, SubjectQuery, SubtitleTrack,
};
