mod cli;
mod error;
mod input;
mod page_range;
mod pager;
mod sink;

use std::io::{self, IsTerminal};

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use error::SelectError;
use input::InputSource;
use page_range::PageRange;
use sink::{ProcessSink, Sink, WriterSink};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();
    run(&cli)?;

    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .init();
}

fn run(cli: &Cli) -> Result<(), SelectError> {
    let range = PageRange::validate(&cli.range_args())?;
    let input = InputSource::from_arg(cli.input.clone());
    tracing::debug!(?range, ?input, destination = ?cli.destination(), "selecting pages");

    let reader = input.open()?;

    let summary = match cli.destination() {
        None => copy_pages(&range, reader, WriterSink::new(io::stdout()))?,
        Some(program) => copy_pages(&range, reader, ProcessSink::spawn(program)?)?,
    };

    range.check_page_count(summary.pages)
}

fn copy_pages<R: io::BufRead, S: Sink>(
    range: &PageRange,
    reader: R,
    mut sink: S,
) -> Result<pager::StreamSummary, SelectError> {
    let summary = pager::stream(range, reader, &mut sink)?;
    sink.finish()?;
    Ok(summary)
}
