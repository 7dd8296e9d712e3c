//!
//! Command-line driver for the trackmerge consolidation engine.
#![allow(clippy::uninlined_format_args, clippy::too_many_lines)]

use clap::{Parser, Subcommand};

use std::path::PathBuf;
use thiserror::Error;
use trackmerge_core::{
    aggregate, assign_sample_ids, feature_histogram, merge, missing_summary,
    rows_with_any_missing, track_counts, unique_per_timepoint, Aggregation, ColumnMissing,
    FilenameMetadata, Table, FRAME_COLUMN, ID2_COLUMN, TRACK_ID_COLUMN,
};
use trackmerge_io::{read_path, write_csv, write_csv_path, ReadOptions};

/// Result type for CLI operations.
type Result<T> = std::result::Result<T, CliError>;

/// CLI error types.
#[derive(Error, Debug)]
enum CliError {
    #[error("I/O error: {0}")]
    TrackmergeIo(#[from] trackmerge_io::Error),

    #[error("Core error: {0}")]
    Core(#[from] trackmerge_core::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Consolidates tracking-pipeline CSV exports into one master table.
#[derive(Parser)]
#[command(name = "trackmerge")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Row-layout arguments shared by every ingesting subcommand.
#[derive(clap::Args)]
struct LayoutArgs {
    /// 0-based index of the header row
    #[arg(long, default_value = "0")]
    header_row: usize,

    /// 0-based index of the first data row (default: the row after the header)
    #[arg(long)]
    data_start_row: Option<usize>,
}

impl LayoutArgs {
    fn to_options(&self) -> ReadOptions {
        ReadOptions {
            header_row: self.header_row,
            data_start_row: self.data_start_row,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Merge CSV files into a master table with metadata and sample ids
    Merge {
        /// Input CSV file(s), in upload order
        #[arg(required = true)]
        input: Vec<PathBuf>,

        /// Output CSV path for the master table
        #[arg(short, long)]
        output: PathBuf,

        #[command(flatten)]
        layout: LayoutArgs,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Report missing-value counts and rows containing missing values
    Quality {
        /// Input CSV file(s)
        #[arg(required = true)]
        input: Vec<PathBuf>,

        /// Emit the report as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        layout: LayoutArgs,
    },

    /// Group the master table and compute per-group counts and means
    Aggregate {
        /// Input CSV file(s)
        #[arg(required = true)]
        input: Vec<PathBuf>,

        /// Column(s) to group by
        #[arg(short, long, required = true, num_args = 1..)]
        group_by: Vec<String>,

        /// Write the summary as CSV instead of printing it
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        layout: LayoutArgs,
    },

    /// Count timepoints per track per experimental unit
    Tracks {
        /// Input CSV file(s)
        #[arg(required = true)]
        input: Vec<PathBuf>,

        /// Experimental-unit column
        #[arg(long, default_value = ID2_COLUMN)]
        unit_column: String,

        /// Track-identifier column
        #[arg(long, default_value = TRACK_ID_COLUMN)]
        track_column: String,

        /// Also count distinct values of this column per timepoint
        #[arg(long)]
        value_column: Option<String>,

        /// Timepoint column for --value-column
        #[arg(long, default_value = FRAME_COLUMN)]
        timepoint_column: String,

        #[command(flatten)]
        layout: LayoutArgs,
    },

    /// Bin a numeric feature into an equal-width histogram
    Histogram {
        /// Input CSV file(s)
        #[arg(required = true)]
        input: Vec<PathBuf>,

        /// Feature column to bin
        #[arg(short, long)]
        column: String,

        /// Number of bins (clamped to 5..=100)
        #[arg(short, long, default_value = "30")]
        bins: usize,

        #[command(flatten)]
        layout: LayoutArgs,
    },

    /// Show per-file shape and parsed filename metadata
    Info {
        /// Input CSV file(s)
        #[arg(required = true)]
        input: Vec<PathBuf>,

        #[command(flatten)]
        layout: LayoutArgs,
    },
}

fn load_master(paths: &[PathBuf], options: &ReadOptions, verbose: bool) -> Result<Table> {
    let mut raw_tables = Vec::with_capacity(paths.len());
    for path in paths {
        if verbose {
            eprintln!("Reading: {}", path.display());
        }
        let raw = read_path(path, options)?;
        if verbose {
            eprintln!(
                "  {} rows, {} columns",
                raw.table.n_rows(),
                raw.table.n_columns()
            );
        }
        raw_tables.push(raw);
    }
    let mut master = merge(&raw_tables)?;
    assign_sample_ids(&mut master)?;
    Ok(master)
}

fn print_table(table: &Table) -> Result<()> {
    let stdout = std::io::stdout();
    write_csv(table, stdout.lock())?;
    Ok(())
}

/// Builds the JSON quality report. Per-column counts are an ordered array
/// so the report keeps the master table's column order.
fn quality_report_json(
    summary: &[ColumnMissing],
    rows_with_missing: usize,
    total_rows: usize,
) -> serde_json::Value {
    serde_json::json!({
        "missing_per_column": summary
            .iter()
            .map(|c| serde_json::json!({ "column": c.column, "missing": c.missing }))
            .collect::<Vec<_>>(),
        "rows_with_missing": rows_with_missing,
        "total_rows": total_rows,
    })
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Merge {
            input,
            output,
            layout,
            verbose,
        } => {
            let master = load_master(&input, &layout.to_options(), verbose)?;
            write_csv_path(&master, &output)?;
            println!(
                "Merged {} files: {} rows, {} columns -> {}",
                input.len(),
                master.n_rows(),
                master.n_columns(),
                output.display()
            );
        }

        Commands::Quality {
            input,
            json,
            layout,
        } => {
            let master = load_master(&input, &layout.to_options(), false)?;
            let summary = missing_summary(&master);
            let flagged = rows_with_any_missing(&master);

            if json {
                let report = quality_report_json(&summary, flagged.n_rows(), master.n_rows());
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{:<24} | missing", "column");
                println!("{:-<36}", "");
                for entry in &summary {
                    println!("{:<24} | {}", entry.column, entry.missing);
                }
                println!(
                    "{} of {} rows contain at least one missing value",
                    flagged.n_rows(),
                    master.n_rows()
                );
            }
        }

        Commands::Aggregate {
            input,
            group_by,
            output,
            layout,
        } => {
            let master = load_master(&input, &layout.to_options(), false)?;
            match aggregate(&master, &group_by)? {
                Aggregation::NoAggregableColumns => {
                    println!(
                        "No aggregable columns remain after grouping by: {}",
                        group_by.join(", ")
                    );
                }
                Aggregation::Summary(summary) => {
                    if let Some(path) = output {
                        write_csv_path(&summary, &path)?;
                        println!("{} groups -> {}", summary.n_rows(), path.display());
                    } else {
                        print_table(&summary)?;
                    }
                }
            }
        }

        Commands::Tracks {
            input,
            unit_column,
            track_column,
            value_column,
            timepoint_column,
            layout,
        } => {
            let master = load_master(&input, &layout.to_options(), false)?;
            let counts = track_counts(&master, &unit_column, &track_column)?;
            println!("{},{},timepoint_count", unit_column, track_column);
            for entry in &counts {
                println!("{},{},{}", entry.unit, entry.track, entry.timepoint_count);
            }

            if let Some(value_column) = value_column {
                let series =
                    unique_per_timepoint(&master, &unit_column, &timepoint_column, &value_column)?;
                println!();
                println!("{},{},unique_{}", unit_column, timepoint_column, value_column);
                for unit in &series {
                    for point in &unit.points {
                        println!("{},{},{}", unit.unit, point.timepoint, point.unique_values);
                    }
                }
            }
        }

        Commands::Histogram {
            input,
            column,
            bins,
            layout,
        } => {
            let master = load_master(&input, &layout.to_options(), false)?;
            let hist = feature_histogram(&master, &column, bins)?;
            if hist.is_empty() {
                println!("No numeric values in column '{}'", column);
            } else {
                println!("bin_start,bin_end,count");
                for (i, count) in hist.counts.iter().enumerate() {
                    println!("{},{},{}", hist.edges[i], hist.edges[i + 1], count);
                }
            }
        }

        Commands::Info { input, layout } => {
            let options = layout.to_options();
            for path in &input {
                let raw = read_path(path, &options)?;
                let meta = FilenameMetadata::parse(&raw.source_filename);
                println!("File: {}", raw.source_filename);
                println!("  Rows: {}", raw.table.n_rows());
                println!("  Columns: {}", raw.table.column_names().join(", "));
                println!("  Mouse: {}", meta.mouse);
                println!("  Position: {}", meta.position.as_deref().unwrap_or("-"));
                println!("  Class: {}", meta.class.as_deref().unwrap_or("-"));
                println!("  Condition2: {}", meta.condition2.as_deref().unwrap_or("-"));
            }
        }
    }

    Ok(())
}
