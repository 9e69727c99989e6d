mod attachments;
mod convert;
mod export;
mod model;
mod sic;

use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{error, info};

use convert::folders::FolderRules;
use convert::CardOutput;
use export::Outputs;
use model::Database;

#[derive(Parser)]
#[command(
    name = "sic2lp",
    about = "Convert a SafeInCloud XML export to LastPass CSV imports"
)]
struct Cli {
    /// An exported SafeInCloud XML path and filename
    #[arg(long)]
    db: Option<PathBuf>,
    /// Default folder of unlabelled cards
    #[arg(short = 'f', long = "folder", default_value = "Imported")]
    folder: String,
    /// Priority folder of labels to assign in order (comma delimited)
    #[arg(short = 'p', long = "priority", value_delimiter = ',')]
    priority: Vec<String>,
}

const EXIT_PARSE: i32 = 10;
const EXIT_CARD: i32 = 11;
const EXIT_SITES_CSV: i32 = 12;
const EXIT_NOTES_CSV: i32 = 13;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();
    let Some(db_path) = cli.db else {
        Cli::command().print_help().ok();
        return;
    };
    let rules = FolderRules {
        default_folder: cli.folder,
        priority: cli.priority,
    };

    let db = match sic::parse_file(&db_path) {
        Ok(db) => db,
        Err(e) => {
            error!("{e:#}");
            process::exit(EXIT_PARSE);
        }
    };

    let (outputs, counts) = match convert_all(&db, &rules) {
        Ok(v) => v,
        Err(e) => {
            error!("{e:#}");
            process::exit(EXIT_CARD);
        }
    };

    if let Err(e) = export::write_sites_csv(&outputs.sites) {
        error!("{e:#}");
        process::exit(EXIT_SITES_CSV);
    }
    if let Err(e) = export::write_notes_csv(&outputs.notes) {
        error!("{e:#}");
        process::exit(EXIT_NOTES_CSV);
    }

    info!(
        imported = counts.imported,
        deleted = counts.deleted,
        skipped = counts.skipped,
        sites = outputs.sites.len(),
        notes = outputs.notes.len(),
        "conversion finished"
    );
}

#[derive(Default)]
struct Counts {
    imported: usize,
    deleted: usize,
    skipped: usize,
}

/// One pass over the card list: classify, dump attachments per emitted
/// record, accumulate. Any attachment write failure aborts the whole run.
fn convert_all(db: &Database, rules: &FolderRules) -> Result<(Outputs, Counts)> {
    let pb = ProgressBar::new(db.cards.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} cards")
            .unwrap()
            .progress_chars("#>-"),
    );

    let mut out = Outputs::default();
    let mut counts = Counts::default();

    for card in &db.cards {
        if card.deleted {
            info!(id = %card.id, title = %card.title, "skipping deleted card");
            counts.deleted += 1;
            pb.inc(1);
            continue;
        }
        if card.template {
            info!(id = %card.id, title = %card.title, "skipping template");
            counts.skipped += 1;
            pb.inc(1);
            continue;
        }

        let output = convert::convert_card(card, &db.labels, rules);
        for name in output.names() {
            attachments::dump_card(card, name)
                .with_context(|| format!("card {} ({})", card.id, card.title))?;
        }
        match output {
            CardOutput::Sites(sites) => out.sites.extend(sites),
            CardOutput::Note(note) => out.notes.push(note),
        }
        counts.imported += 1;
        pb.inc(1);
    }

    pb.finish_and_clear();
    Ok((out, counts))
}
