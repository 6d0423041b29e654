//! ngram-speller CLI binary.

use std::io::Write;
use std::process;

use clap::Parser;
use env_logger::Builder;

use ngram_speller::cli::args::*;
use ngram_speller::cli::commands::*;
use ngram_speller::spelling::corrector::TRACE_TARGET;

fn main() {
    let args = SpellerArgs::parse();

    let mut builder = Builder::new();
    builder
        .filter_level(args.log_level())
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()));
    // --debug only opens up the candidate trace, not the rest of the crate.
    if let Some(level) = args.trace_level() {
        builder.filter_module(TRACE_TARGET, level);
    }
    builder.init();

    if let Err(e) = execute_command(args) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
