use clap::{Parser, Subcommand, ValueEnum};
use marketmuse_core::{AppConfig, ReferenceCatalog};
use tracing_subscriber::EnvFilter;

mod report;

const DEFAULT_BRIEF: &str = "Identify the optimal influencers and predict campaign outcomes for launching a new sustainable skincare brand targeting Gen Z audiences";

#[derive(Debug, Parser)]
#[command(name = "marketmuse")]
#[command(about = "Influencer selection, forecasting, and campaign recommendations")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Yaml,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run the full pipeline and print the report
    Run {
        /// Campaign brief
        #[arg(long, default_value = DEFAULT_BRIEF)]
        query: String,
        /// Report serialization format
        #[arg(long, value_enum, default_value = "json")]
        format: OutputFormat,
    },
    /// Show how a brief is decomposed into stage parameters
    Plan {
        /// Campaign brief
        #[arg(long)]
        query: String,
    },
    /// Print the creator ranking for a brief
    Rank {
        /// Campaign brief
        #[arg(long, default_value = DEFAULT_BRIEF)]
        query: String,
        /// Maximum number of creators to show
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Validate the configured catalog and print counts
    Catalog,
    /// List the creative test variants and their success thresholds
    TestPlan,
    /// Apply the week-1 go/no-go rules to observed metrics
    Week1 {
        /// Observed CPM in INR
        #[arg(long)]
        cpm: f64,
        /// Observed click-through rate (fraction)
        #[arg(long)]
        ctr: f64,
        /// Observed conversion rate (fraction)
        #[arg(long)]
        cvr: f64,
        /// Share of positive comments (fraction)
        #[arg(long, default_value = "0.0")]
        positive: f64,
        /// Share of negative comments (fraction)
        #[arg(long, default_value = "0.0")]
        negative: f64,
        /// A brand-safety issue was raised
        #[arg(long)]
        brand_safety_issue: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or_else(Commands::default_run);
    execute(command, || {
        let config = marketmuse_core::load_app_config()?;
        let env_filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
        Ok(config)
    })
}

impl Commands {
    fn default_run() -> Self {
        Self::Run {
            query: DEFAULT_BRIEF.to_string(),
            format: OutputFormat::Json,
        }
    }
}

/// Dispatch one command. Config is loaded only by commands that read it, and
/// the catalog only by commands that score creators.
///
/// # Errors
///
/// Returns an error if config or catalog loading fails, or output cannot be serialized.
fn execute<F>(command: Commands, load_config: F) -> anyhow::Result<()>
where
    F: FnOnce() -> anyhow::Result<AppConfig>,
{
    match command {
        Commands::Week1 {
            cpm,
            ctr,
            cvr,
            positive,
            negative,
            brand_safety_issue,
        } => {
            let observed = marketmuse_engine::Week1Observation {
                cpm,
                ctr,
                cvr,
                positive_sentiment: positive,
                negative_sentiment: negative,
                brand_safety_issue,
            };
            report::run_week1(&observed);
        }
        Commands::Plan { query } => {
            let config = load_config()?;
            report::run_plan(&config, &query)?;
        }
        Commands::Run { query, format } => {
            let config = load_config()?;
            let catalog = load_catalog(&config)?;
            report::run_report(&catalog, &config, &query, format)?;
        }
        Commands::Rank { query, limit } => {
            let config = load_config()?;
            let catalog = load_catalog(&config)?;
            report::run_rank(&catalog, &config, &query, limit);
        }
        Commands::Catalog => {
            let config = load_config()?;
            let catalog = load_catalog(&config)?;
            report::run_catalog(&catalog, &config);
        }
        Commands::TestPlan => report::run_test_plan(),
    }

    Ok(())
}

/// Load the catalog named by `MARKETMUSE_CATALOG_PATH`, or the built-in one.
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsed, or fails validation.
fn load_catalog(config: &AppConfig) -> anyhow::Result<ReferenceCatalog> {
    let catalog = match &config.catalog_path {
        Some(path) => {
            tracing::info!(path = %path.display(), "loading catalog file");
            marketmuse_core::load_catalog(path)?
        }
        None => ReferenceCatalog::builtin()?,
    };
    Ok(catalog)
}
