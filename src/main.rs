//! Pitch trends CLI
//!
//! Fetches a pitcher's Statcast season and reports pitch usage, velocity and
//! spin trends.

use clap::{Parser, Subcommand};
use pitchtrends::{BucketStrategy, Config, PitchError, Result};

#[derive(Parser)]
#[command(name = "pitchtrends")]
#[command(about = "Pitch usage, velocity and spin trends from Statcast data", long_about = None)]
struct Cli {
    /// Config file path
    #[arg(short, long, default_value = "pitchtrends.toml")]
    config: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze one pitcher's season
    Analyze {
        /// Player name ("Garrett Crochet" or "Crochet, Garrett") or MLBAM id
        #[arg(short, long)]
        player: String,
        /// Season year
        #[arg(short, long)]
        season: u16,
        /// Time bucketing: monthly, weekly, or per-game (default from config)
        #[arg(short, long)]
        bucket: Option<BucketStrategy>,
        /// Output format
        #[arg(long, default_value = "table")]
        format: OutputFormat,
        /// Read pitches from a Statcast CSV export instead of Baseball Savant
        #[arg(long)]
        input: Option<String>,
        /// Cache directory for downloaded responses
        #[arg(long)]
        cache: Option<String>,
        /// Use only cached responses (no network requests)
        #[arg(long)]
        offline: bool,
    },
    /// Look up a player's MLBAM id
    Lookup {
        /// Player name
        name: String,
        /// Season whose player list is searched
        #[arg(long, default_value = "2025")]
        season: u16,
    },
    /// List supported seasons
    Seasons,
    /// Show the pitch-type catalog in effect
    Catalog,
    /// Write a default config file
    Init,
}

#[derive(Clone, Debug)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!("Unknown format: {}. Use table, json, or csv.", s)),
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    // Load or create config
    let config = if std::path::Path::new(&cli.config).exists() {
        match Config::load(&cli.config) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading config: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        Config::default()
    };

    let result = match cli.command {
        Commands::Analyze {
            player,
            season,
            bucket,
            format,
            input,
            cache,
            offline,
        } => commands::analyze(
            &config,
            commands::AnalyzeArgs {
                player,
                season,
                bucket,
                format,
                input,
                cache,
                offline,
            },
        ),
        Commands::Lookup { name, season } => commands::lookup(&config, &name, season),
        Commands::Seasons => commands::seasons(),
        Commands::Catalog => commands::catalog(&config),
        Commands::Init => commands::init(&cli.config),
    };

    if let Err(e) = result {
        eprintln!("{}", describe_error(&e));
        std::process::exit(1);
    }
}

/// One message per failure; data halts get a hint since the query was valid
fn describe_error(e: &PitchError) -> String {
    if e.is_no_data() {
        format!("Error: {}\nTry another season or check the player name.", e)
    } else {
        format!("Error: {}", e)
    }
}

mod commands {
    use super::*;
    use pitchtrends::analysis::PitchTypeCatalog;
    use pitchtrends::data::season::all_seasons;
    use pitchtrends::data::sources::{
        CsvFileSource, MlbStatsDirectory, PitchSource, PlayerDirectory, ResponseCache,
        SavantClient,
    };
    use pitchtrends::pipeline::{Analyzer, Pipeline};
    use pitchtrends::report::{render_json, render_table, render_usage_csv};

    pub struct AnalyzeArgs {
        pub player: String,
        pub season: u16,
        pub bucket: Option<BucketStrategy>,
        pub format: OutputFormat,
        pub input: Option<String>,
        pub cache: Option<String>,
        pub offline: bool,
    }

    fn response_cache(config: &Config, cache: Option<String>, offline: bool) -> ResponseCache {
        match cache.or_else(|| config.source.cache_dir.clone()) {
            Some(dir) => ResponseCache::new(dir).offline_only(offline || config.source.offline),
            None => ResponseCache::disabled().offline_only(offline || config.source.offline),
        }
    }

    pub fn init(config_path: &str) -> Result<()> {
        let config = Config::default();
        config.save(config_path)?;
        println!("Created default config at {}", config_path);

        println!("\nNext steps:");
        println!("  1. Edit {} to customize settings", config_path);
        println!("  2. Run 'pitchtrends seasons' to see supported seasons");
        println!("  3. Run 'pitchtrends analyze --player \"Garrett Crochet\" --season 2024'");

        Ok(())
    }

    pub fn analyze(config: &Config, args: AnalyzeArgs) -> Result<()> {
        let mut config = config.clone();
        if let Some(bucket) = args.bucket {
            // An explicit strategy on the command line also picks its own fill
            config.analysis.bucketing = bucket;
            config.analysis.fill = None;
        }
        let analyzer = Analyzer::from_config(&config);
        let catalog = analyzer.catalog().clone();

        let cache = response_cache(&config, args.cache, args.offline);
        let directory = MlbStatsDirectory::new(&config.source)?.with_cache(cache.clone());
        let source: Box<dyn PitchSource> = match args.input {
            Some(path) => Box::new(CsvFileSource::new(path)),
            None => Box::new(SavantClient::new(&config.source)?.with_cache(cache)),
        };

        let pipeline = Pipeline::new(source.as_ref(), &directory, analyzer);
        let analysis = pipeline.run(&args.player, args.season)?;

        match args.format {
            OutputFormat::Table => print!("{}", render_table(&analysis)),
            OutputFormat::Json => {
                println!("{}", render_json(&analysis, &catalog, &config.chart)?)
            }
            OutputFormat::Csv => print!("{}", render_usage_csv(&analysis.usage)?),
        }

        Ok(())
    }

    pub fn lookup(config: &Config, name: &str, season: u16) -> Result<()> {
        let cache = response_cache(config, None, false);
        let directory = MlbStatsDirectory::new(&config.source)?.with_cache(cache);

        let player = directory
            .find_player(name, season)?
            .ok_or_else(|| PitchError::PlayerNotFound(name.to_string()))?;
        println!("{}  {}", player.id, player.name);

        Ok(())
    }

    pub fn seasons() -> Result<()> {
        println!("Supported seasons");
        println!("───────────────────────────────");
        for window in all_seasons()? {
            println!("  {}  {} to {}", window.year, window.start, window.end);
        }
        Ok(())
    }

    pub fn catalog(config: &Config) -> Result<()> {
        let catalog = PitchTypeCatalog::standard().with_overrides(&config.catalog);

        println!("Pitch types");
        println!("───────────────────────────────");
        for (code, name) in catalog.entries() {
            println!("  {:<4}{}", code, name);
        }
        Ok(())
    }
}
