use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

/// Which TMDB movie listing a catalog page came from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CatalogKind {
    Popular,
    TopRated,
}

impl CatalogKind {
    /// Path segment under `/movie/` on the TMDB API
    pub fn path(&self) -> &'static str {
        match self {
            CatalogKind::Popular => "popular",
            CatalogKind::TopRated => "top_rated",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CatalogKind::Popular => "popular",
            CatalogKind::TopRated => "top rated",
        }
    }
}

/// A catalog movie as listed by TMDB
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    pub id: u64,
    pub title: String,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub release_date: Option<NaiveDate>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub vote_count: u64,
    #[serde(default)]
    pub popularity: f64,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub genre_ids: Vec<u32>,
    #[serde(default)]
    pub overview: String,
}

impl Movie {
    pub fn release_year(&self) -> Option<i32> {
        self.release_date.map(|d| d.year())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Genre {
    pub id: u32,
    pub name: String,
}

/// Body of TMDB's `genre/movie/list`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct GenreList {
    #[serde(default)]
    pub genres: Vec<Genre>,
}

/// One page of a paginated TMDB listing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogPage<T> {
    pub page: u32,
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u64,
}

impl<T> CatalogPage<T> {
    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

// TMDB sends "" for unreleased titles rather than omitting the field
fn deserialize_optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw
        .filter(|s| !s.trim().is_empty())
        .and_then(|s| NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_popular_page() {
        let json = r#"{
            "page": 1,
            "results": [
                {"id": 550, "title": "Fight Club", "release_date": "1999-10-15", "vote_average": 8.4, "vote_count": 26000, "popularity": 61.4, "poster_path": "/pB8BM7pdSp6B6Ih7QZ4DrQ3PmJK.jpg", "genre_ids": [18], "overview": "A ticking-time-bomb insomniac..."},
                {"id": 1, "title": "Untitled Project", "release_date": ""}
            ],
            "total_pages": 500,
            "total_results": 10000
        }"#;

        let page: CatalogPage<Movie> = serde_json::from_str(json).unwrap();
        assert_eq!(page.page, 1);
        assert_eq!(page.len(), 2);
        assert_eq!(page.total_pages, 500);
        assert_eq!(page.results[0].release_year(), Some(1999));
        assert_eq!(page.results[0].genre_ids, vec![18]);
        assert_eq!(page.results[1].release_date, None);
        assert_eq!(page.results[1].vote_average, None);
        assert_eq!(page.results[1].release_year(), None);
    }

    #[test]
    fn test_parse_genre_list() {
        let json = r#"{"genres":[{"id":28,"name":"Action"},{"id":35,"name":"Comedy"}]}"#;
        let list: GenreList = serde_json::from_str(json).unwrap();
        assert_eq!(list.genres.len(), 2);
        assert_eq!(list.genres[1].name, "Comedy");
    }

    #[test]
    fn test_catalog_kind_paths() {
        assert_eq!(CatalogKind::Popular.path(), "popular");
        assert_eq!(CatalogKind::TopRated.path(), "top_rated");
    }
}
