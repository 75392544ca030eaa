use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use court_iq::config::{StoreBackend, StoreConfig};
use court_iq::export::json::{export_json_to_path, import_json};
use court_iq::scheduler::{due_count, get_due_items, record_answer};
use std::path::PathBuf;

/// Inspect and drive basketball IQ review progress from the terminal
#[derive(Parser)]
#[command(name = "court-iq", version)]
struct Cli {
    /// Storage backend, overrides COURT_IQ_STORE
    #[arg(long, value_enum)]
    store: Option<StoreBackend>,

    /// Data directory, overrides COURT_IQ_DATA_DIR
    #[arg(long)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show totals, accuracy, streak and how many items are due
    Status {
        /// Every item id known to the catalog
        #[arg(long, value_delimiter = ',')]
        items: Vec<String>,
    },
    /// List the items due for review, highest priority first
    Due {
        #[arg(long, value_delimiter = ',')]
        items: Vec<String>,
    },
    /// Record an answer (0, 50 or 100) for one item
    Answer {
        item: String,
        #[arg(allow_hyphen_values = true)]
        score: i32,
    },
    /// Write the saved progress to a JSON backup
    Export { path: PathBuf },
    /// Replace the saved progress with a JSON backup
    Import { path: PathBuf },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let mut config = StoreConfig::from_env();
    if let Some(backend) = cli.store {
        config.backend = backend;
    }
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    log::debug!("Using {:?}", config);

    let store = config.open_store();
    let progress = store.load();
    let now = Utc::now();

    match cli.command {
        Command::Status { items } => {
            println!("Answered:  {}", progress.total_answered);
            println!("Accuracy:  {}%", progress.accuracy());
            println!("Streak:    {} day(s)", progress.streak_days);
            println!("Due:       {} of {}", due_count(&progress, &items, now), items.len());
        }
        Command::Due { items } => {
            for id in get_due_items(&progress, &items, now) {
                println!("{}", id);
            }
        }
        Command::Answer { item, score } => {
            let updated = record_answer(&progress, &item, score, now);
            store.save(&updated);

            if let Some(card) = updated.card(&item) {
                println!(
                    "{}: next review in {} day(s), ease {:.2}",
                    item, card.interval, card.ease_factor
                );
            }
        }
        Command::Export { path } => {
            export_json_to_path(&progress, &path)
                .with_context(|| format!("exporting to '{}'", path.display()))?;
        }
        Command::Import { path } => {
            let imported =
                import_json(&path).with_context(|| format!("importing '{}'", path.display()))?;
            store
                .try_save(&imported)
                .context("saving imported progress")?;
            println!("Imported {} cards", imported.cards.len());
        }
    }

    Ok(())
}
