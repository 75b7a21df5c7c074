use super::ui::Spinner;
use super::{format_stars, load_credentials};
use crate::chart::render_bar_chart;
use crate::output::Output;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::{Attribute, Cell, CellAlignment, Table};
use moviedash_config::{Config, DiarySourceKind, PathManager};
use moviedash_core::{Dashboard, DiarySnapshot, EntryOrder, LoadState};
use moviedash_models::SummaryStats;
use moviedash_sources::{DiaryOptions, DiarySourceRegistry};
use owo_colors::OwoColorize;
use serde_json::{json, Value};
use std::path::PathBuf;

/// Label used for Letterboxd exports when no username is given
const EXPORT_USERNAME: &str = "export";

pub struct DiaryArgs {
    pub username: Option<String>,
    pub source: Option<DiarySourceKind>,
    pub file: Option<PathBuf>,
    pub limit: Option<usize>,
    pub order: EntryOrder,
}

pub async fn run_diary(args: DiaryArgs, config: &Config, paths: &PathManager, output: &Output) -> Result<()> {
    let kind = args.source.unwrap_or(config.diary.default_source);
    let username = resolve_username(kind, args.username.as_deref(), config)?;
    let limit = args.limit.unwrap_or(config.display.list_limit);

    let credentials = load_credentials(paths)?;
    let options = DiaryOptions {
        export_path: args.file,
    };
    let source = DiarySourceRegistry::new().create_source(kind, config, &credentials, &options)?;

    let mut dashboard = Dashboard::new();
    let spinner = Spinner::start(format!("Fetching {}'s diary from {}...", username, kind.as_str()), output);
    dashboard.refresh(source.as_ref(), &username).await;
    spinner.finish();

    match dashboard.state() {
        LoadState::Loaded(snapshot) => {
            output.json(&diary_json(snapshot, args.order, limit));
            if snapshot.is_empty() {
                output.println(format!("No diary entries for {}", username));
            } else {
                print_snapshot(snapshot, args.order, limit, config.display.chart_width, output);
            }
            Ok(())
        }
        LoadState::Failed { message, .. } => {
            output.error(format!("Failed to load diary for {}: {}", username, message));
            Err(eyre!("diary fetch failed"))
        }
        LoadState::Idle | LoadState::Loading { .. } => Err(eyre!("diary fetch did not complete")),
    }
}

fn resolve_username(kind: DiarySourceKind, arg: Option<&str>, config: &Config) -> Result<String> {
    let username = arg
        .or(config.diary.default_username.as_deref())
        .map(str::trim)
        .filter(|u| !u.is_empty());

    match (username, kind) {
        (Some(u), _) => Ok(u.to_string()),
        (None, DiarySourceKind::Letterboxd) => Ok(EXPORT_USERNAME.to_string()),
        (None, DiarySourceKind::Trakt) => Err(eyre!(
            "No username given; pass one or set diary.default_username in the config"
        )),
    }
}

fn summary_lines(stats: &SummaryStats) -> Vec<String> {
    let most_watched = match &stats.most_watched_year {
        Some(yc) => format!(
            "{} ({} {})",
            yc.year,
            yc.count,
            if yc.count == 1 { "movie" } else { "movies" }
        ),
        None => "-".to_string(),
    };

    vec![
        format!("Total movies:      {}", stats.total_movies),
        format!("Average rating:    {:.2}", stats.average_rating),
        format!("Most watched year: {}", most_watched),
    ]
}

fn print_snapshot(snapshot: &DiarySnapshot, order: EntryOrder, limit: usize, chart_width: usize, output: &Output) {
    let query = snapshot.query();
    output.println(format!(
        "\n{} {}",
        format!("{}'s diary", query.username).bright_cyan().bold(),
        format!("({})", query.source).dimmed()
    ));
    for line in summary_lines(snapshot.stats()) {
        output.println(line);
    }

    let entries = snapshot.ordered_entries(order);
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    table.set_header(vec![
        Cell::new("Watched").add_attribute(Attribute::Bold),
        Cell::new("Title").add_attribute(Attribute::Bold),
        Cell::new("Year").add_attribute(Attribute::Bold),
        Cell::new("Rating").add_attribute(Attribute::Bold),
    ]);
    for entry in entries.iter().take(limit) {
        let title = if entry.rewatch {
            format!("{} ↻", entry.title)
        } else {
            entry.title.clone()
        };
        table.add_row(vec![
            Cell::new(entry.watched_date.format("%Y-%m-%d")),
            Cell::new(title),
            Cell::new(entry.year.map(|y| y.to_string()).unwrap_or_else(|| "-".to_string())),
            Cell::new(format_stars(entry.rating)).set_alignment(CellAlignment::Right),
        ]);
    }
    output.println("");
    output.println(table.to_string());
    if entries.len() > limit {
        output.println(format!("{}", format!("... and {} more", entries.len() - limit).dimmed()));
    }

    let chart = render_bar_chart(snapshot.histogram(), chart_width);
    if !chart.is_empty() {
        output.println(format!("\n{}", "Movies by release year".bright_cyan().bold()));
        for line in chart {
            output.println(line);
        }
    }
}

fn diary_json(snapshot: &DiarySnapshot, order: EntryOrder, limit: usize) -> Value {
    let entries: Vec<_> = snapshot.ordered_entries(order).into_iter().take(limit).collect();
    json!({
        "source": snapshot.query().source,
        "username": snapshot.query().username,
        "fetched_at": snapshot.fetched_at(),
        "stats": snapshot.stats(),
        "histogram": snapshot.histogram(),
        "entries": entries,
    })
}
