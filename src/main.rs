use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use iceberg_fixtures::artifact::MavenCoordinate;
use iceberg_fixtures::layout::default_root;
use iceberg_fixtures::{
    ensure_warehouse, warehouse_dir, Config, DownloadOutcome, JarDownloader, EXIT_ALREADY_EXISTS,
};
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing::{debug, error, trace};

/// Prepare local fixtures for the Iceberg integration tests
#[derive(Parser)]
#[command(name = "iceberg-fixtures", version)]
#[command(about = "Download the Spark runtime jar and set up the test warehouse", long_about = None)]
struct Cli {
    /// Enable verbose output (-v for debug, -vv for trace, -vvv for all)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Directory the jars and warehouse directories are created under
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    /// Path to configuration file
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Download the Spark runtime jar (default command)
    DownloadJar(JarSource),
    /// Print where the jar is (or would be) downloaded to
    JarPath(JarSource),
    /// Create the test warehouse directory and print its path
    Warehouse {
        /// Only print the path
        #[arg(long)]
        no_create: bool,
    },
}

#[derive(Args, Default)]
struct JarSource {
    /// Full download URL of the jar
    #[arg(long, conflicts_with = "coordinate")]
    url: Option<String>,

    /// Maven coordinate (group:artifact:version[:classifier][@ext])
    #[arg(long)]
    coordinate: Option<String>,

    /// Repository base the coordinate path is appended to
    #[arg(long, requires = "coordinate")]
    repository: Option<String>,
}

impl JarSource {
    fn resolve_url(&self, config: &Config) -> Result<String> {
        if let Some(url) = &self.url {
            return Ok(url.clone());
        }
        match &self.coordinate {
            Some(coordinate) => {
                let coordinate = MavenCoordinate::parse(coordinate)?;
                let repository = self.repository.as_deref().unwrap_or(&config.repository);
                Ok(coordinate.download_url(repository))
            }
            None => Ok(config.jar_url.clone()),
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    let root = cli.root.clone().unwrap_or_else(default_root);
    let config = match Config::load(&root, cli.config.as_deref()).await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let log_level = match cli.verbose {
        0 => config.log_level.clone().unwrap_or_else(|| "warn".to_string()),
        1 => "debug".to_string(),
        2 => "trace".to_string(),
        _ => "trace,hyper=debug,reqwest=debug".to_string(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_writer(std::io::stderr)
        .with_target(cli.verbose >= 2)
        .with_thread_ids(cli.verbose >= 3)
        .with_line_number(cli.verbose >= 3)
        .init();

    debug!("iceberg-fixtures started with verbosity level: {}", cli.verbose);
    trace!("Full CLI args: {:?}", std::env::args().collect::<Vec<_>>());
    debug!("Fixture root: {}", root.display());

    let result = match cli.command {
        Some(Commands::DownloadJar(source)) => run_download(&source, &config, root).await,
        Some(Commands::JarPath(source)) => run_jar_path(&source, &config, root),
        Some(Commands::Warehouse { no_create }) => run_warehouse(no_create, &config, root).await,
        None => run_download(&JarSource::default(), &config, root).await,
    };

    match result {
        Ok(0) => {}
        Ok(code) => std::process::exit(code),
        Err(e) => {
            error!("Fatal error: {:#}", e);
            eprintln!("Error: {e:#}");
            std::process::exit(1);
        }
    }
}

async fn run_download(source: &JarSource, config: &Config, root: PathBuf) -> Result<i32> {
    let url = source.resolve_url(config)?;
    let layout = config.layout(root);

    let downloader = JarDownloader::new(config.timeout())?
        .with_progress(std::io::stderr().is_terminal());

    let outcome = downloader
        .download(&url, &layout)
        .await
        .with_context(|| format!("Failed to download {url}"))?;

    match outcome {
        DownloadOutcome::AlreadyExists(path) => {
            println!("File already exists: {}", path.display());
            Ok(EXIT_ALREADY_EXISTS)
        }
        DownloadOutcome::Downloaded { path, .. } => {
            println!("Jar downloaded to: {}", path.display());
            Ok(0)
        }
    }
}

fn run_jar_path(source: &JarSource, config: &Config, root: PathBuf) -> Result<i32> {
    let url = source.resolve_url(config)?;
    let dest = JarDownloader::destination(&url, &config.layout(root))?;
    println!("{}", dest.display());
    Ok(0)
}

async fn run_warehouse(no_create: bool, config: &Config, root: PathBuf) -> Result<i32> {
    let layout = config.layout(root);
    let dir = if no_create {
        warehouse_dir(&layout)
    } else {
        ensure_warehouse(&layout)
            .await
            .context("Failed to create warehouse directory")?
    };
    println!("{}", dir.display());
    Ok(0)
}
