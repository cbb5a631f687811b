//! Derivation of the displayed list from a fetched page.
//!
//! The rendered list is always recomputed from the last fetched items plus the
//! current genre selection and sort settings; the fetched items themselves are
//! never touched.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::CatalogItem;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Title,
    ReleaseDate,
    Rating,
    Popularity,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [SortKey::Rating, SortKey::ReleaseDate, SortKey::Title, SortKey::Popularity];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Title => "title",
            SortKey::ReleaseDate => "release_date",
            SortKey::Rating => "rating",
            SortKey::Popularity => "popularity",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortKey::Title => "Title",
            SortKey::ReleaseDate => "Release Year",
            SortKey::Rating => "Rating",
            SortKey::Popularity => "Popularity",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "title" | "name" => Ok(SortKey::Title),
            "release_date" | "date" | "year" => Ok(SortKey::ReleaseDate),
            "rating" | "vote_average" => Ok(SortKey::Rating),
            "popularity" | "popular" => Ok(SortKey::Popularity),
            other => Err(format!("unknown sort key '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Asc),
            "desc" | "descending" => Ok(SortDirection::Desc),
            other => Err(format!("unknown sort order '{}'", other)),
        }
    }
}

/// Parse an upstream `YYYY-MM-DD` date; anything else counts as the epoch.
pub fn release_date_key(raw: &str) -> NaiveDate {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").unwrap_or_default()
}

/// True when the item carries at least one of the selected genres, or nothing is selected.
pub fn matches_genres(item: &CatalogItem, selected: &HashSet<u64>) -> bool {
    selected.is_empty() || item.genre_ids.iter().any(|id| selected.contains(id))
}

/// Ascending key comparison; direction is applied by the caller.
pub fn compare_by(key: SortKey, a: &CatalogItem, b: &CatalogItem) -> Ordering {
    match key {
        SortKey::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
        SortKey::ReleaseDate => release_date_key(&a.release_date).cmp(&release_date_key(&b.release_date)),
        SortKey::Rating => a.vote_average.total_cmp(&b.vote_average),
        SortKey::Popularity => a.popularity.total_cmp(&b.popularity),
    }
}

/// Filter by genre (union semantics) and sort stably by `key` in `direction`.
pub fn derive_view(
    items: &[CatalogItem],
    selected_genres: &HashSet<u64>,
    key: SortKey,
    direction: SortDirection,
) -> Vec<CatalogItem> {
    let mut out: Vec<CatalogItem> = items
        .iter()
        .filter(|item| matches_genres(item, selected_genres))
        .cloned()
        .collect();
    // sort_by is stable, so equal keys keep fetch order in both directions
    out.sort_by(|a, b| {
        let ord = compare_by(key, a, b);
        match direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });
    out
}
