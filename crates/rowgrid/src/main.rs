mod cli;
mod table_file;
mod view;

use std::fs::File;
use std::io::{self, BufWriter, Write};

use anyhow::Context;
use clap::Parser;
use log::info;
use rowgrid_export::{ExportFormat, ExportTable, export, write_csv_file};

use crate::cli::Cli;
use crate::table_file::TableFile;

fn main() {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    if let Err(err) = run(&cli) {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}

fn init_logging(verbosity: u8) {
    let default_filter = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp_millis()
        .init();
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let mut store = TableFile::load(&cli.table)?.into_store()?;

    view::apply(&mut store, cli)?;
    info!("Showing {}", view::summary(&store));

    let table = ExportTable::from_page(&store, &[])?;
    let format: ExportFormat = cli.format.into();

    match &cli.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            export(&table, format, &mut writer)?;
            writer.flush()?;
            info!("Wrote {} rows to {}", table.row_count(), path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            export(&table, format, &mut writer)?;
            if matches!(format, ExportFormat::JsonPretty | ExportFormat::JsonCompact) {
                writeln!(writer)?;
            }
            writer.flush()?;
        }
    }

    if let Some(dir) = &cli.export_csv {
        let path = write_csv_file(&store, &[], dir, None)?;
        info!("Saved CSV to {}", path.display());
    }

    Ok(())
}
