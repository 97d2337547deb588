#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for the SARTopo to faks converter.

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Parser, Subcommand};
use sartopo_faks_convert::{
    ClassificationStats, FolderTable, RawFeatureCollection, classify, classify_features,
};
use sartopo_faks_feature_models::{BoundingBox, Sink};

#[derive(Parser)]
#[command(
    name = "sartopo2faks",
    about = "Convert SARTopo GeoJSON exports into faks sink documents"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert an export and write the eight sink documents
    Convert {
        /// SARTopo `GeoJSON` export to read
        source: PathBuf,
        /// Directory to write the sink documents to (created if missing)
        output_dir: PathBuf,
        /// Folder-to-sink table (TOML). Defaults to the built-in table.
        #[arg(long)]
        folders: Option<PathBuf>,
    },
    /// Classify an export and print what would be written, without writing
    Inspect {
        /// SARTopo `GeoJSON` export to read
        source: PathBuf,
        /// Folder-to-sink table (TOML). Defaults to the built-in table.
        #[arg(long)]
        folders: Option<PathBuf>,
    },
    /// Print the effective folder-to-sink table
    Folders {
        /// Folder-to-sink table (TOML). Defaults to the built-in table.
        #[arg(long)]
        folders: Option<PathBuf>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Convert {
            source,
            output_dir,
            folders,
        } => {
            let start = Instant::now();
            let table = FolderTable::load_or_embedded(folders.as_deref())?;
            let collection = RawFeatureCollection::read(&source)?;

            let report = classify_features(&collection, &output_dir, &table)?;

            println!("{:<26} FEATURES", "SINK");
            println!("{}", "-".repeat(36));
            for (sink, count) in &report.counts {
                println!("{:<26} {count}", sink.file_name());
            }
            print_dropped(&report.stats);

            log::info!(
                "Wrote {} sink documents to {} in {:.2}s",
                report.written.len(),
                output_dir.display(),
                start.elapsed().as_secs_f64()
            );
        }
        Commands::Inspect { source, folders } => {
            let table = FolderTable::load_or_embedded(folders.as_deref())?;
            let collection = RawFeatureCollection::read(&source)?;

            let result = classify(&collection, &table);

            println!("{:<24} {:>8}  EXTENT (lat, lng)", "SINK", "FEATURES");
            println!("{}", "-".repeat(78));
            for sink in Sink::all() {
                let count = result.documents.features(*sink).len();
                let extent = result
                    .documents
                    .extent(*sink)
                    .map_or_else(|| "-".to_string(), format_extent);
                println!("{:<24} {count:>8}  {extent}", sink.to_string());
            }
            print_dropped(&result.stats);
        }
        Commands::Folders { folders } => {
            let table = FolderTable::load_or_embedded(folders.as_deref())?;
            print_folders(&table, folders.as_deref());
        }
    }

    Ok(())
}

fn print_dropped(stats: &ClassificationStats) {
    println!();
    println!("{:<28}{}", "Input features:", stats.input);
    println!("{:<28}{}", "Skipped (no geometry):", stats.without_geometry);
    println!("{:<28}{}", "Dropped (unmapped folder):", stats.unmapped_folders);
    println!("{:<28}{}", "Dropped (unsupported):", stats.unsupported_geometry);
}

fn print_folders(table: &FolderTable, source: Option<&Path>) {
    match source {
        Some(path) => println!("Folder table: {}", path.display()),
        None => println!("Folder table: built-in"),
    }
    println!("{:<32} SINK", "FOLDER TITLE");
    println!("{}", "-".repeat(56));
    for (title, sink) in table.iter() {
        println!("{title:<32} {sink}");
    }
}

fn format_extent(bbox: BoundingBox) -> String {
    format!(
        "{:.5}, {:.5} .. {:.5}, {:.5}",
        bbox.min_lat, bbox.min_lng, bbox.max_lat, bbox.max_lng
    )
}
