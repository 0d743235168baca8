use std::{
    io::{Write, stdout},
    path::PathBuf,
};

use clap::Parser;
use miette::{IntoDiagnostic, Result, miette};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

use scuttle_csv::{CsvEnumerator, CsvOptions, Schema, identity_list};

/// Scan a CSV file and print its typed rows.
#[derive(Parser, Debug)]
#[command(name = "scuttle-csv", version, about)]
struct Cli {
    /// CSV file to scan. The first line is treated as a header.
    file: PathBuf,

    /// Comma separated column types, e.g. `int,string,date`. Leave a slot
    /// empty to read that column as raw text.
    #[arg(long, short = 't', value_delimiter = ',', required = true)]
    types: Vec<String>,

    /// Comma separated column indices to project. Defaults to every column.
    #[arg(long, short = 'f', value_delimiter = ',')]
    fields: Option<Vec<usize>>,

    /// Field delimiter.
    #[arg(long, short = 'd', default_value_t = ',')]
    delimiter: char,

    /// Trim whitespace around every field.
    #[arg(long)]
    trim: bool,

    /// Stop after this many rows.
    #[arg(long, short = 'n')]
    limit: Option<usize>,
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(false)
                .context_lines(3)
                .tab_width(4)
                .break_words(true)
                .build(),
        )
    }))
    .into_diagnostic()?;
    miette::set_panic_hook();

    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let schema = Schema::from_type_names(&cli.types).map_err(|name| {
        miette!(
            help = "known types: string, boolean, byte, short, int, long, float, double, date, time, timestamp",
            "Unknown column type `{name}`"
        )
    })?;

    if !cli.delimiter.is_ascii() {
        return Err(miette!("Delimiter must be a single ASCII character"));
    }
    let options = CsvOptions::default()
        .with_delimiter(cli.delimiter as u8)
        .with_trim(cli.trim);

    let fields = cli
        .fields
        .clone()
        .unwrap_or_else(|| identity_list(schema.len()));

    let mut rows = CsvEnumerator::open_projected(&cli.file, schema, &fields, &options)?;

    let mut stdout = stdout().lock();
    let mut count = 0;

    while cli.limit.is_none_or(|limit| count < limit) && rows.move_next()? {
        if let Some(row) = rows.current() {
            writeln!(stdout, "{row}").into_diagnostic()?;
        }
        count += 1;
    }

    // Early stop leaves the file open.
    rows.close()?;
    stdout.flush().into_diagnostic()?;

    info!(rows = count, file = %cli.file.display(), "scan finished");

    Ok(())
}
