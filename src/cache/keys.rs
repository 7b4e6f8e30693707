//! Cache Key Registry
//!
//! String key builders for every cached resource. Deduplication and
//! pattern invalidation both rely on these formats staying stable: list keys
//! all start with `movies-`, search keys with `search-`, and so on.

use std::fmt;

use strum::{AsRefStr, Display, EnumString};

/// Page used when a caller does not ask for one.
pub const DEFAULT_PAGE: u32 = 1;

// == Movie Category ==
/// Catalog listings served by the metadata provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "kebab-case")]
pub enum MovieCategory {
    Popular,
    TopRated,
    NowPlaying,
    Upcoming,
}

// == Time Window ==
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum TimeWindow {
    Day,
    #[default]
    Week,
}

pub fn genre() -> String {
    "genres".to_string()
}

pub fn language() -> String {
    "languages".to_string()
}

pub fn movie(id: u64) -> String {
    format!("movie-{}", id)
}

/// `kind` is usually a [`MovieCategory`], but any listing name is accepted.
pub fn movie_list(kind: impl fmt::Display, page: u32) -> String {
    format!("movies-{}-{}", kind, page)
}

pub fn search(query: &str, page: u32) -> String {
    format!("search-{}-{}", query, page)
}

pub fn trending(window: TimeWindow, page: u32) -> String {
    format!("trending-{}-{}", window, page)
}

pub fn ai_search(query: &str) -> String {
    format!("ai-search-{}", query)
}

pub fn wishlist(user_id: &str) -> String {
    format!("wishlist-{}", user_id)
}

pub fn recommendations(user_id: &str) -> String {
    format!("recommendations-{}", user_id)
}
