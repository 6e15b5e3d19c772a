use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use sarf_docx::{ChartBatch, SortDirection, SortDirective};

#[derive(Clone, Copy, ValueEnum)]
enum Sort {
    None,
    Alphabetical,
    Type,
}

#[derive(Parser)]
#[command(name = "sarf-docx", about = "Render Arabic conjugation charts to DOCX")]
struct Args {
    /// JSON file with the charts to render
    input: PathBuf,
    /// Output DOCX file (defaults to input with .docx extension)
    output: Option<PathBuf>,
    /// DOCX whose style sheet is used for the output
    #[arg(long)]
    template: Option<PathBuf>,
    #[arg(long)]
    omit_title: bool,
    #[arg(long)]
    omit_header: bool,
    #[arg(long)]
    omit_toc: bool,
    #[arg(long)]
    omit_abbreviated: bool,
    #[arg(long)]
    omit_detailed: bool,
    /// Chart order (overrides the input file)
    #[arg(long, value_enum)]
    sort: Option<Sort>,
    #[arg(long)]
    descending: bool,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    if !args.input.is_file() {
        eprintln!("Error: not a file: {}", args.input.display());
        std::process::exit(1);
    }

    let batch = match ChartBatch::from_path(&args.input) {
        Ok(batch) => batch,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let mut configuration = batch.configuration.unwrap_or_default();
    configuration.omit_title |= args.omit_title;
    configuration.omit_header |= args.omit_header;
    configuration.omit_toc |= args.omit_toc;
    configuration.omit_abbreviated_conjugation |= args.omit_abbreviated;
    configuration.omit_detailed_conjugation |= args.omit_detailed;
    if let Some(sort) = args.sort {
        configuration.sort_directive = match sort {
            Sort::None => SortDirective::None,
            Sort::Alphabetical => SortDirective::Alphabetical,
            Sort::Type => SortDirective::Type,
        };
    }
    if args.descending {
        configuration.sort_direction = SortDirection::Descending;
    }

    let output = args
        .output
        .unwrap_or_else(|| args.input.with_extension("docx"));

    let result = sarf_docx::convert_charts_to_docx(
        batch.charts,
        configuration,
        &output,
        args.template.as_deref(),
    );
    match result {
        Ok(report) => {
            for failure in report.failures() {
                if let Err(e) = &failure.result {
                    eprintln!("Warning: chart {} ({}) skipped: {e}", failure.index, failure.chart);
                }
            }
        }
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
