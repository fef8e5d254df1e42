use clap::{ArgGroup, Parser};
use southpark_catalog::{ProgressEvent, generate_catalog, write_snapshot};
use std::path::PathBuf;
use std::process;

/// Generates a versioned episode catalog snapshot for one market.
#[derive(Debug, Parser)]
#[command(version, about)]
#[command(group(ArgGroup::new("locale").required(true).args(["en", "es", "de", "se"])))]
struct Cli {
    /// Generate the english catalog
    #[arg(long)]
    en: bool,

    /// Generate the spanish catalog
    #[arg(long)]
    es: bool,

    /// Generate the german catalog
    #[arg(long)]
    de: bool,

    /// Generate the swedish catalog
    #[arg(long)]
    se: bool,

    /// Directory the snapshot file is written to
    #[arg(long, default_value = ".")]
    output: PathBuf,

    /// Print media resolution failures in full
    #[arg(long)]
    debug: bool,
}

impl Cli {
    fn locale(&self) -> &'static str {
        if self.en {
            "en"
        } else if self.es {
            "es"
        } else if self.de {
            "de"
        } else {
            "se"
        }
    }
}

/// Handles progress events and prints line-oriented output to stdout
fn handle_progress_event(event: ProgressEvent, debug: bool) {
    match event {
        ProgressEvent::Started { locale } => {
            println!("Generating catalog for locale '{locale}'...");
        }
        ProgressEvent::FetchingSeasonList { url } => {
            println!("Fetching season listing from {url}");
        }
        ProgressEvent::SeasonsDiscovered { count } => {
            println!("Discovered {count} season page(s)");
        }
        ProgressEvent::ParsingSeason { season } => {
            println!("parsing episodes from season {season}");
        }
        ProgressEvent::EpisodeResolved {
            season,
            episode,
            title,
            ..
        } => {
            println!("available  : {season:2}x{episode:2} {title}");
        }
        ProgressEvent::EpisodeUnavailable {
            season,
            episode,
            title,
            error,
        } => {
            println!("unavailable: {season:2}x{episode:2} {title}");
            if debug {
                if let Some(error) = error {
                    println!("             resolution failed: {error}");
                }
            }
        }
        ProgressEvent::Complete { season_count } => {
            println!("Catalog complete with {season_count} season(s)");
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let locale = cli.locale();
    let debug = cli.debug;

    let catalog = match generate_catalog(locale, |event| handle_progress_event(event, debug)) {
        Ok(catalog) => catalog,
        Err(e) => {
            eprintln!("Error generating catalog: {e}");
            process::exit(1);
        }
    };

    match write_snapshot(&catalog, locale, &cli.output) {
        Ok(path) => println!("Snapshot written to {}", path.display()),
        Err(e) => {
            eprintln!("Error writing snapshot: {e}");
            process::exit(1);
        }
    }
}
