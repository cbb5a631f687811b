use serde::{Deserialize, Serialize};

/// Summary movie record as returned by the list and search endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub vote_count: u64,
    #[serde(default)]
    pub popularity: f64,
    #[serde(default)]
    pub adult: bool,
    #[serde(default)]
    pub genre_ids: Vec<u64>,
    #[serde(default)]
    pub original_language: String,
    #[serde(default)]
    pub original_title: String,
}

/// Expanded record returned by the single-movie lookup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogItemDetail {
    #[serde(flatten)]
    pub item: CatalogItem,
    #[serde(default)]
    pub budget: u64,
    #[serde(default)]
    pub revenue: u64,
    #[serde(default)]
    pub runtime: Option<u32>, // minutes, null for unreleased titles
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub tagline: String,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub production_companies: Vec<ProductionCompany>,
    #[serde(default)]
    pub production_countries: Vec<ProductionCountry>,
    #[serde(default)]
    pub spoken_languages: Vec<SpokenLanguage>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductionCompany {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub logo_path: Option<String>,
    #[serde(default)]
    pub origin_country: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductionCountry {
    pub iso_3166_1: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpokenLanguage {
    #[serde(default)]
    pub english_name: String,
    pub iso_639_1: String,
    #[serde(default)]
    pub name: String,
}

/// One fetched, numbered batch plus total-count metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub page: u32,
    pub results: Vec<T>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u64,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self { page: 1, results: Vec::new(), total_pages: 0, total_results: 0 }
    }
}

/// Envelope of the genre list endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct GenreList {
    #[serde(default)]
    pub genres: Vec<Genre>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParams {
    pub query: String,
    pub page: u32,
    pub include_adult: bool,
    pub year: Option<i32>,
    pub primary_release_year: Option<i32>,
}

impl SearchParams {
    pub fn new(query: impl Into<String>) -> Self {
        Self { query: query.into(), page: 1, include_adult: false, year: None, primary_release_year: None }
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_tolerates_missing_optional_fields() {
        let json = r#"{"id": 27205, "title": "Inception", "poster_path": null}"#;
        let item: CatalogItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.id, 27205);
        assert_eq!(item.poster_path, None);
        assert!(item.genre_ids.is_empty());
        assert_eq!(item.release_date, "");
    }

    #[test]
    fn detail_flattens_summary_fields() {
        let json = r#"{
            "id": 550, "title": "Fight Club", "vote_average": 8.4, "runtime": 139,
            "status": "Released", "tagline": "Mischief. Mayhem. Soap.",
            "genres": [{"id": 18, "name": "Drama"}],
            "production_companies": [{"id": 508, "name": "Regency Enterprises", "logo_path": null, "origin_country": "US"}],
            "production_countries": [{"iso_3166_1": "US", "name": "United States of America"}],
            "spoken_languages": [{"english_name": "English", "iso_639_1": "en", "name": "English"}]
        }"#;
        let detail: CatalogItemDetail = serde_json::from_str(json).unwrap();
        assert_eq!(detail.item.id, 550);
        assert_eq!(detail.item.title, "Fight Club");
        assert_eq!(detail.runtime, Some(139));
        assert_eq!(detail.genres[0].name, "Drama");
        assert_eq!(detail.production_companies[0].logo_path, None);
    }

    #[test]
    fn search_params_page_is_at_least_one() {
        assert_eq!(SearchParams::new("alien").page(0).page, 1);
        assert_eq!(SearchParams::new("alien").page(3).page, 3);
    }
}
