//! akito - download web novels chapter by chapter
//!
//! Searches supported novel sites, shows novel metadata and downloads
//! chapter ranges with a bounded number of parallel requests.

use anyhow::Result;
use clap::{Parser, Subcommand};

use akito_core::{ProgressContext, Verbosity};
use akito_wuxiaworld::WuxiaWorldCo;

mod cmd;
mod config;

use cmd::Site;
use config::Config;

#[derive(Parser)]
#[command(name = "akito")]
#[command(about = "Search and download web novels")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Config file path (default: ./akito.toml or ~/.config/akito/config.toml)
    #[arg(short, long, global = true)]
    config: Option<std::path::PathBuf>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Maximum concurrent chapter requests
    #[arg(short, long, global = true)]
    workers: Option<usize>,
}

#[derive(Subcommand)]
enum Command {
    /// List supported websites
    Sites,
    /// Search a website for novels by title
    Search(cmd::search::SearchArgs),
    /// Show novel metadata
    Info(cmd::info::InfoArgs),
    /// Download chapters of a novel
    Download(cmd::download::DownloadArgs),
    /// Show current configuration
    Config,
}

fn site(site: Site, config: &Config) -> WuxiaWorldCo {
    match site {
        Site::Wuxiaworld => WuxiaWorldCo::new(config.wuxiaworld()),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let progress = ProgressContext::new();

    // TTY: warnings only unless --debug, progress bars show activity.
    // non-TTY: info, logs are the only progress indicator.
    let is_tty = progress.is_tty();
    let multi = if is_tty { Some(progress.multi()) } else { None };
    let verbosity = match (cli.debug, is_tty) {
        (true, _) => Verbosity::Debug,
        (false, true) => Verbosity::Quiet,
        (false, false) => Verbosity::Normal,
    };
    akito_core::init_logging(verbosity, multi);

    let mut config = if let Some(path) = cli.config {
        Config::from_file(&path)?
    } else {
        Config::load()?
    };

    // CLI overrides config file
    if let Some(timeout) = cli.timeout {
        config.http.timeout_secs = timeout;
    }
    if let Some(workers) = cli.workers {
        config.download.workers = workers;
    }

    match cli.command {
        Command::Sites => {
            cmd::sites::run();
            Ok(())
        }
        Command::Search(args) => cmd::search::run(&args, &site(args.site, &config)),
        Command::Info(args) => cmd::info::run(&args, &site(args.site, &config)),
        Command::Download(args) => cmd::download::run(
            &args,
            &site(args.site, &config),
            &config.download,
            &progress,
        ),
        Command::Config => {
            let mut table = cmd::table(&["Setting", "Value"]);

            table.add_row(vec!["Timeout", &format!("{}s", config.http.timeout_secs)]);
            table.add_row(vec!["User agent", &config.http.user_agent]);
            table.add_row(vec!["Workers", &config.download.workers.to_string()]);
            table.add_row(vec![
                "Early release",
                if config.download.early_release {
                    "on"
                } else {
                    "off"
                },
            ]);
            table.add_row(vec!["WuxiaWorld URL", &config.wuxiaworld.base_url]);
            table.add_row(vec![
                "Max search pages",
                &config.wuxiaworld.max_search_pages.to_string(),
            ]);

            eprintln!("\n{table}");
            Ok(())
        }
    }
}
