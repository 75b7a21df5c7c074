use super::catalog::catalog_client;
use super::ui::Spinner;
use crate::output::Output;
use color_eyre::Result;
use moviedash_config::{Config, PathManager};
use moviedash_core::{OverviewState, Slot};
use owo_colors::OwoColorize;
use serde_json::{json, Value};

pub async fn run_overview(page: u32, config: &Config, paths: &PathManager, output: &Output) -> Result<()> {
    let client = catalog_client(config, paths)?;

    let spinner = Spinner::start("Loading catalog overview...", output);
    let state = OverviewState::load(&client, page).await;
    spinner.finish();

    output.json(&json!({
        "page": page,
        "popular": slot_json(&state.popular, |p| p.len()),
        "genres": slot_json(&state.genres, |g| g.len()),
        "top_rated": slot_json(&state.top_rated, |p| p.len()),
    }));

    for line in overview_lines(&state) {
        output.println(line);
    }

    if !state.is_complete() {
        output.warn("Some catalog data could not be loaded; run with -v for details");
    }

    Ok(())
}

fn slot_line<T>(label: &str, slot: &Slot<T>, count: impl Fn(&T) -> usize) -> String {
    match slot {
        Slot::Ready(value) => format!("Number of {} fetched: {}", label, count(value)),
        Slot::Loading => format!("{} {}...", "Loading".dimmed(), label),
        Slot::Failed(message) => format!("{} {}: {}", "Failed to load".red(), label, message),
    }
}

fn overview_lines(state: &OverviewState) -> Vec<String> {
    vec![
        slot_line("popular movies", &state.popular, |p| p.len()),
        slot_line("genres", &state.genres, |g| g.len()),
        slot_line("top rated movies", &state.top_rated, |p| p.len()),
    ]
}

fn slot_json<T>(slot: &Slot<T>, count: impl Fn(&T) -> usize) -> Value {
    match slot {
        Slot::Ready(value) => json!({ "status": "ready", "count": count(value) }),
        Slot::Loading => json!({ "status": "loading" }),
        Slot::Failed(message) => json!({ "status": "failed", "error": message }),
    }
}
