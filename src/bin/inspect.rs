use std::{path::PathBuf, process::ExitCode};

use clap::Parser;

use spendmap::{Error, inspect::inspect_file, storage::list_parquet_files};

/// Print the columns, a preview and the most common states of a fetched parquet file.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Directory with the parquet files written by the fetch tool.
    #[arg(long, default_value = "usa_spending_defense")]
    data_dir: PathBuf,

    /// The file to inspect. Defaults to the first file in the data directory.
    file: Option<PathBuf>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{error}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), Error> {
    let files = list_parquet_files(&args.data_dir)?;
    println!("Found {} parquet files.", files.len());

    let path = match args.file {
        Some(path) => path,
        // `list_parquet_files` fails instead of returning an empty list.
        None => files
            .into_iter()
            .next()
            .ok_or_else(|| Error::NoInputData(args.data_dir.clone()))?,
    };

    let report = inspect_file(&path)?;
    print!("{report}");

    Ok(())
}
