use super::ui::Spinner;
use super::load_credentials;
use crate::output::Output;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::{Attribute, Cell, CellAlignment, Table};
use moviedash_config::{Config, PathManager};
use moviedash_models::{CatalogKind, CatalogPage, Genre, Movie};
use moviedash_sources::{create_catalog_source, CatalogSource, TmdbClient};
use owo_colors::OwoColorize;
use serde_json::json;

pub(crate) fn catalog_client(config: &Config, paths: &PathManager) -> Result<TmdbClient> {
    let credentials = load_credentials(paths)?;
    Ok(create_catalog_source(config, &credentials)?)
}

pub async fn run_movies(
    kind: CatalogKind,
    page: u32,
    config: &Config,
    paths: &PathManager,
    output: &Output,
) -> Result<()> {
    let client = catalog_client(config, paths)?;

    let spinner = Spinner::start(format!("Fetching {} movies (page {})...", kind.label(), page), output);
    let result = client.movies(kind, page).await;
    spinner.finish();

    let movies = match result {
        Ok(movies) => movies,
        Err(e) => {
            tracing::warn!(kind = kind.path(), page = page, error = %e, "Catalog fetch failed");
            output.error(format!("Failed to fetch {} movies: {}", kind.label(), e));
            return Err(eyre!("catalog fetch failed"));
        }
    };

    output.json(&json!({
        "kind": kind,
        "page": movies.page,
        "total_pages": movies.total_pages,
        "total_results": movies.total_results,
        "results": &movies.results,
    }));

    if movies.is_empty() {
        output.println(format!("No {} movies on page {}", kind.label(), page));
        return Ok(());
    }

    output.println(format!(
        "\n{} {}",
        capitalize(kind.label()).bright_cyan().bold(),
        format!("(page {} of {})", movies.page, movies.total_pages).dimmed()
    ));
    output.println(movie_table(&movies).to_string());

    Ok(())
}

pub async fn run_genres(config: &Config, paths: &PathManager, output: &Output) -> Result<()> {
    let client = catalog_client(config, paths)?;

    let spinner = Spinner::start("Fetching genres...", output);
    let result = client.genres().await;
    spinner.finish();

    let genres = match result {
        Ok(genres) => genres,
        Err(e) => {
            tracing::warn!(error = %e, "Genre fetch failed");
            output.error(format!("Failed to fetch genres: {}", e));
            return Err(eyre!("genre fetch failed"));
        }
    };

    output.json(&json!({ "genres": &genres }));
    output.println(genre_table(&genres).to_string());

    Ok(())
}

fn styled_table(header: Vec<Cell>) -> Table {
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    table.set_header(header);
    table
}

fn movie_table(page: &CatalogPage<Movie>) -> Table {
    let mut table = styled_table(vec![
        Cell::new("#").add_attribute(Attribute::Bold),
        Cell::new("Title").add_attribute(Attribute::Bold),
        Cell::new("Year").add_attribute(Attribute::Bold),
        Cell::new("Rating").add_attribute(Attribute::Bold),
        Cell::new("Votes").add_attribute(Attribute::Bold),
    ]);

    for (idx, movie) in page.results.iter().enumerate() {
        table.add_row(vec![
            Cell::new(idx + 1).set_alignment(CellAlignment::Right),
            Cell::new(&movie.title),
            Cell::new(movie.release_year().map(|y| y.to_string()).unwrap_or_else(|| "-".to_string())),
            Cell::new(
                movie
                    .vote_average
                    .map(|v| format!("{:.1}", v))
                    .unwrap_or_else(|| "-".to_string()),
            )
            .set_alignment(CellAlignment::Right),
            Cell::new(movie.vote_count).set_alignment(CellAlignment::Right),
        ]);
    }

    table
}

fn genre_table(genres: &[Genre]) -> Table {
    let mut table = styled_table(vec![
        Cell::new("ID").add_attribute(Attribute::Bold),
        Cell::new("Genre").add_attribute(Attribute::Bold),
    ]);
    for genre in genres {
        table.add_row(vec![
            Cell::new(genre.id).set_alignment(CellAlignment::Right),
            Cell::new(&genre.name),
        ]);
    }
    table
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("top rated"), "Top rated");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_movie_table_lists_every_result() {
        let page = CatalogPage {
            page: 1,
            results: vec![
                Movie {
                    id: 1,
                    title: "Heat".to_string(),
                    release_date: chrono::NaiveDate::from_ymd_opt(1995, 12, 15),
                    vote_average: Some(7.9),
                    vote_count: 6000,
                    popularity: 40.0,
                    poster_path: None,
                    genre_ids: vec![80],
                    overview: String::new(),
                },
                Movie {
                    id: 2,
                    title: "Untitled".to_string(),
                    release_date: None,
                    vote_average: None,
                    vote_count: 0,
                    popularity: 0.0,
                    poster_path: None,
                    genre_ids: Vec::new(),
                    overview: String::new(),
                },
            ],
            total_pages: 1,
            total_results: 2,
        };

        let rendered = movie_table(&page).to_string();
        assert!(rendered.contains("Heat"));
        assert!(rendered.contains("1995"));
        assert!(rendered.contains("7.9"));
        assert!(rendered.contains("Untitled"));
    }
}
