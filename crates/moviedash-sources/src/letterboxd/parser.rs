use chrono::NaiveDate;
use csv::ReaderBuilder;
use moviedash_models::WatchedEntry;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

use crate::SourceError;

/// Highest Letterboxd star rating
const MAX_RATING: f64 = 5.0;

/// Parse a Letterboxd rating cell ("3.5", "" when unrated).
///
/// Values off the 0-5 star scale are treated as unrated.
pub fn parse_rating(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    let rating = raw.parse::<f64>().ok()?;
    if (0.0..=MAX_RATING).contains(&rating) {
        Some(rating)
    } else {
        debug!(rating = %raw, "Ignoring rating outside the 0-5 scale");
        None
    }
}

/// Parse a year cell; anything that is not an integer becomes `None`
pub fn parse_year(raw: &str) -> Option<i32> {
    raw.trim().parse::<i32>().ok()
}

pub fn parse_diary_csv_file<P: AsRef<Path>>(path: P) -> Result<Vec<WatchedEntry>, SourceError> {
    let file = std::fs::File::open(path)?;
    parse_diary_csv(file)
}

/// Parse a Letterboxd diary export.
///
/// Expected header: `Date,Name,Year,Letterboxd URI,Rating,Rewatch,Tags,Watched Date`.
/// `Name` and one of `Watched Date`/`Date` are required; the rest are optional.
/// Rows whose date cannot be parsed are skipped.
pub fn parse_diary_csv<R: Read>(input: R) -> Result<Vec<WatchedEntry>, SourceError> {
    let mut reader = ReaderBuilder::new().flexible(true).from_reader(input);

    let headers = reader.headers()?.clone();
    let header_map: HashMap<String, usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| (h.trim().to_string(), i))
        .collect();

    let available_columns: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    debug!("Available CSV columns: {:?}", available_columns);

    let name_col = *header_map.get("Name").ok_or_else(|| {
        SourceError::Parse(format!("Missing required column: Name. Available columns: {:?}", available_columns))
    })?;
    let date_col = header_map
        .get("Watched Date")
        .or_else(|| header_map.get("Date"))
        .copied()
        .ok_or_else(|| {
            SourceError::Parse(format!(
                "Missing required column: Watched Date or Date. Available columns: {:?}",
                available_columns
            ))
        })?;
    let year_col = header_map.get("Year").copied();
    let rating_col = header_map.get("Rating").copied();
    let uri_col = header_map.get("Letterboxd URI").copied();
    let rewatch_col = header_map.get("Rewatch").copied();

    let mut entries = Vec::new();
    let mut row_count = 0;
    let mut skipped = 0;

    for result in reader.records() {
        let record = result?;
        row_count += 1;

        let cell = |col: Option<usize>| col.and_then(|c| record.get(c)).unwrap_or("");

        let title = cell(Some(name_col)).trim().to_string();
        let date_str = cell(Some(date_col)).trim();

        let watched_date = match NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
        {
            Some(naive) => naive.and_utc(),
            None => {
                debug!(row = row_count, date = %date_str, title = %title, "Skipping row with invalid date");
                skipped += 1;
                continue;
            }
        };

        let uri = cell(uri_col).trim();
        let link = if uri.is_empty() { None } else { Some(uri.to_string()) };

        let mut entry = WatchedEntry::new(title, watched_date)
            .with_year(parse_year(cell(year_col)))
            .with_rating(parse_rating(cell(rating_col)))
            .with_link(link);
        entry.rewatch = cell(rewatch_col).trim().eq_ignore_ascii_case("yes");

        entries.push(entry);
    }

    if skipped > 0 {
        warn!(skipped, "Skipped Letterboxd rows with invalid dates");
    }
    debug!(rows = row_count, entries = entries.len(), "Parsed Letterboxd diary");

    Ok(entries)
}

#[cfg(test)]
mod tests;
