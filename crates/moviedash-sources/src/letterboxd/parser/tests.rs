use super::*;
use std::io::Write;
use tempfile::NamedTempFile;

const HEADER: &str = "Date,Name,Year,Letterboxd URI,Rating,Rewatch,Tags,Watched Date";

fn create_diary_csv(rows: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "{}", HEADER).unwrap();
    for row in rows {
        writeln!(file, "{}", row).unwrap();
    }
    file
}

#[test]
fn test_parse_diary_csv() {
    let file = create_diary_csv(&[
        "2024-01-03,Perfect Days,2023,https://boxd.it/abc,4.5,,,2024-01-02",
        "2024-01-05,Heat,1995,https://boxd.it/def,,Yes,crime,2024-01-05",
    ]);

    let entries = parse_diary_csv_file(file.path()).unwrap();
    assert_eq!(entries.len(), 2);

    assert_eq!(entries[0].title, "Perfect Days");
    assert_eq!(entries[0].year, Some(2023));
    assert_eq!(entries[0].rating, Some(4.5));
    assert_eq!(entries[0].link.as_deref(), Some("https://boxd.it/abc"));
    assert_eq!(entries[0].watched_date.format("%Y-%m-%d").to_string(), "2024-01-02");
    assert!(!entries[0].rewatch);

    assert_eq!(entries[1].title, "Heat");
    assert_eq!(entries[1].rating, None);
    assert!(entries[1].rewatch);
}

#[test]
fn test_unparsable_year_becomes_none() {
    let file = create_diary_csv(&["2024-02-01,Mystery Film,unknown,,3,,,2024-02-01"]);
    let entries = parse_diary_csv_file(file.path()).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].year, None);
    assert_eq!(entries[0].rating, Some(3.0));
}

#[test]
fn test_invalid_date_rows_are_skipped() {
    let file = create_diary_csv(&[
        "2024-02-01,Kept,2020,,2,,,2024-02-01",
        "yesterday,Dropped,2021,,2,,,sometime",
    ]);
    let entries = parse_diary_csv_file(file.path()).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].title, "Kept");
}

#[test]
fn test_falls_back_to_date_column() {
    let csv = "Date,Name,Year,Rating\n2023-12-24,Die Hard,1988,5\n";
    let entries = parse_diary_csv(csv.as_bytes()).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].watched_date.format("%Y-%m-%d").to_string(), "2023-12-24");
    assert_eq!(entries[0].link, None);
}

#[test]
fn test_missing_name_column_is_an_error() {
    let csv = "Date,Title,Year\n2023-12-24,Die Hard,1988\n";
    let result = parse_diary_csv(csv.as_bytes());
    assert!(matches!(result, Err(SourceError::Parse(_))));
}

#[test]
fn test_header_only_yields_no_entries() {
    let file = create_diary_csv(&[]);
    let entries = parse_diary_csv_file(file.path()).unwrap();
    assert!(entries.is_empty());
}

#[test]
fn test_parse_rating_and_year_helpers() {
    assert_eq!(parse_rating(" 3.5 "), Some(3.5));
    assert_eq!(parse_rating(""), None);
    assert_eq!(parse_rating("five"), None);
    assert_eq!(parse_year("1999"), Some(1999));
    assert_eq!(parse_year(""), None);
    assert_eq!(parse_year("19x9"), None);
}

#[test]
fn test_off_scale_ratings_are_unrated() {
    assert_eq!(parse_rating("0"), Some(0.0));
    assert_eq!(parse_rating("5"), Some(5.0));
    assert_eq!(parse_rating("7"), None);
    assert_eq!(parse_rating("-1"), None);
    assert_eq!(parse_rating("1e300"), None);
    assert_eq!(parse_rating("NaN"), None);
    assert_eq!(parse_rating("inf"), None);
}

#[test]
fn test_off_scale_rating_row_is_kept_unrated() {
    let csv = "Date,Name,Year,Rating,Watched Date\n2024-01-01,Big,1988,1e300,2024-01-01\n2024-01-02,Heat,1995,4,2024-01-02\n";
    let entries = parse_diary_csv(csv.as_bytes()).unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].title, "Big");
    assert_eq!(entries[0].rating, None);
    assert_eq!(entries[1].rating, Some(4.0));
}

#[tokio::test]
async fn test_letterboxd_export_source() {
    use crate::traits::DiarySource;
    use crate::LetterboxdExport;

    let file = create_diary_csv(&["2024-03-01,Dune: Part Two,2024,,4,,,2024-03-01"]);
    let source = LetterboxdExport::new(file.path().to_path_buf());
    let entries = source.fetch_diary("someone").await.unwrap();
    assert_eq!(source.source_name(), "letterboxd");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].title, "Dune: Part Two");
}
