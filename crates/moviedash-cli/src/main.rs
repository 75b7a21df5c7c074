use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{eyre, Context};
use commands::{catalog, config, diary, overview};
use moviedash_config::{Config, DiarySourceKind, PathManager};
use moviedash_core::EntryOrder;
use moviedash_models::CatalogKind;
use std::path::PathBuf;

mod chart;
mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "moviedash")]
#[command(about = "MovieDash - Browse the movie catalog and chart your watch diary")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch popular movies, genres and top rated movies and report what loaded
    Overview {
        /// Catalog page to fetch for both listings
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// List popular movies
    Popular {
        /// Page number (1-500)
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// List top rated movies
    TopRated {
        /// Page number (1-500)
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// List movie genres
    Genres,
    /// Show a user's watch diary with summary stats and a release year chart
    #[command(long_about = "Fetch a user's watch diary, print total movies, average rating and most watched release year, list the entries and draw a bar chart of entries per release year. Entries without a usable year or rating still count towards the total.")]
    Diary {
        /// Username to fetch (defaults to diary.default_username)
        username: Option<String>,

        /// Where to read the diary from (defaults to diary.default_source)
        #[arg(long, value_enum)]
        source: Option<SourceArg>,

        /// Letterboxd diary.csv export (overrides diary.letterboxd_export)
        #[arg(long, value_name = "PATH")]
        file: Option<PathBuf>,

        /// Maximum number of entries to list (defaults to display.list_limit)
        #[arg(long)]
        limit: Option<usize>,

        /// Entry ordering
        #[arg(long, value_enum, default_value = "watched")]
        sort: SortArg,
    },
    /// Manage configuration and API keys
    Config {
        #[command(subcommand)]
        cmd: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration (masks API keys)
    Show {
        /// Show API keys unmasked
        #[arg(long, action = ArgAction::SetTrue)]
        full: bool,
    },
    /// Store an API key in the credentials file
    #[command(long_about = "Store an API key in credentials.toml. Without --value the key is read from a hidden prompt. Environment variables (MOVIEDASH_TMDB_API_KEY, MOVIEDASH_TRAKT_CLIENT_ID) take precedence over stored keys.")]
    SetKey {
        #[arg(value_enum)]
        service: KeyService,

        /// Key value (if not provided, will prompt)
        #[arg(long)]
        value: Option<String>,
    },
    /// Write a default config file
    Init {
        /// Overwrite an existing config file
        #[arg(long, action = ArgAction::SetTrue)]
        force: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SourceArg {
    Trakt,
    Letterboxd,
}

impl From<SourceArg> for DiarySourceKind {
    fn from(arg: SourceArg) -> Self {
        match arg {
            SourceArg::Trakt => DiarySourceKind::Trakt,
            SourceArg::Letterboxd => DiarySourceKind::Letterboxd,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortArg {
    Watched,
    Rating,
    Title,
}

impl From<SortArg> for EntryOrder {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Watched => EntryOrder::Watched,
            SortArg::Rating => EntryOrder::Rating,
            SortArg::Title => EntryOrder::Title,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KeyService {
    Tmdb,
    Trakt,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let paths = PathManager::default();
    let config_file = paths.config_file();
    let app_config = Config::load_or_default(&config_file)
        .map_err(|e| eyre!("Failed to load config from {}: {}", config_file.display(), e))?;
    app_config
        .validate()
        .wrap_err_with(|| format!("Invalid config in {}", config_file.display()))?;

    let log_file = app_config.logging.file.as_deref().map(|file| paths.resolve_log_file(file));
    logging::init_logging(cli.verbose, cli.quiet, log_file)
        .map_err(|e| eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    match cli.command {
        Commands::Overview { page } => overview::run_overview(page, &app_config, &paths, &output).await,
        Commands::Popular { page } => catalog::run_movies(CatalogKind::Popular, page, &app_config, &paths, &output).await,
        Commands::TopRated { page } => catalog::run_movies(CatalogKind::TopRated, page, &app_config, &paths, &output).await,
        Commands::Genres => catalog::run_genres(&app_config, &paths, &output).await,
        Commands::Diary {
            username,
            source,
            file,
            limit,
            sort,
        } => {
            let args = diary::DiaryArgs {
                username,
                source: source.map(Into::into),
                file,
                limit,
                order: sort.into(),
            };
            diary::run_diary(args, &app_config, &paths, &output).await
        }
        Commands::Config { cmd } => config::run_config(cmd, &app_config, &paths, &output),
    }
}
