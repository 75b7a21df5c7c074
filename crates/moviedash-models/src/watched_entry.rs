use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One diary record: a movie the user logged as watched.
///
/// `year` and `rating` are optional because diary feeds do not always carry
/// them. Ratings are on a 0-5 star scale regardless of the source they came
/// from (sources normalize before constructing entries).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WatchedEntry {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    pub watched_date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default)]
    pub rewatch: bool,
}

impl WatchedEntry {
    pub fn new(title: impl Into<String>, watched_date: DateTime<Utc>) -> Self {
        Self {
            title: title.into(),
            year: None,
            watched_date,
            rating: None,
            poster_url: None,
            link: None,
            rewatch: false,
        }
    }

    pub fn with_year(mut self, year: Option<i32>) -> Self {
        self.year = year;
        self
    }

    pub fn with_rating(mut self, rating: Option<f64>) -> Self {
        self.rating = rating;
        self
    }

    pub fn with_link(mut self, link: Option<String>) -> Self {
        self.link = link;
        self
    }
}
