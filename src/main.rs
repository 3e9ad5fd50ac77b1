use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use rayon::prelude::*;
use serde::Serialize;

use sigstrip::message::{InputFormat, read_body, read_body_file};
use sigstrip::{ExtractorConfig, InputError, Outcome, SignatureExtractor};

#[derive(Parser, Debug)]
#[command(
    name = "sigstrip",
    version,
    about = "Split trailing signature blocks off plain-text email bodies"
)]
struct Args {
    /// Files to process. Reads stdin when none are given.
    files: Vec<PathBuf>,

    /// Treat inputs as raw RFC 5322 messages and use their text/plain body.
    #[arg(long)]
    eml: bool,

    /// Print one JSON object per input instead of a text report.
    #[arg(long)]
    json: bool,

    /// Lines longer than this (after trimming) never belong to a signature.
    #[arg(long)]
    too_long_line: Option<usize>,

    /// Only consider the last N non-empty lines as signature candidates (0 disables).
    #[arg(long)]
    max_lines: Option<usize>,
}

#[derive(Serialize)]
struct Report<'a> {
    source: &'a str,
    body: &'a str,
    signature: Option<&'a str>,
    degraded: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();

    let args = Args::parse();
    let format = if args.eml {
        InputFormat::Eml
    } else {
        InputFormat::Text
    };

    let mut config = ExtractorConfig::from_env();
    if let Some(too_long_line) = args.too_long_line {
        config = config.with_too_long_line(too_long_line);
    }
    if let Some(max_lines) = args.max_lines {
        config = config.with_max_signature_lines(Some(max_lines));
    }
    let extractor = SignatureExtractor::new(config);
    log::debug!("using {:?}", extractor.config());

    let inputs: Vec<(String, Result<String, InputError>)> = if args.files.is_empty() {
        vec![("-".to_string(), read_body(io::stdin().lock(), format))]
    } else {
        args.files
            .par_iter()
            .map(|path| (path.display().to_string(), read_body_file(path, format)))
            .collect()
    };

    let mut stdout = io::stdout().lock();
    let mut failed = false;

    for (source, body) in &inputs {
        let body = match body {
            Ok(body) => body,
            Err(e) => {
                log::error!("{}: {}", source, e);
                writeln!(io::stderr(), "error: {source}: {e}")?;
                failed = true;
                continue;
            }
        };

        let outcome = extractor.extract(body);
        if args.json {
            write_json(&mut stdout, source, &outcome)?;
        } else {
            write_text(&mut stdout, source, &outcome, inputs.len() > 1)?;
        }
    }

    if failed {
        std::process::exit(1);
    }
    Ok(())
}

fn write_json(out: &mut impl Write, source: &str, outcome: &Outcome) -> Result<(), InputError> {
    let report = Report {
        source,
        body: outcome.body(),
        signature: outcome.signature(),
        degraded: outcome.is_degraded(),
    };
    serde_json::to_writer(&mut *out, &report)?;
    writeln!(out)?;
    Ok(())
}

fn write_text(
    out: &mut impl Write,
    source: &str,
    outcome: &Outcome,
    with_header: bool,
) -> io::Result<()> {
    if with_header {
        writeln!(out, "==> {source} <==")?;
    }
    writeln!(out, "{}", outcome.body())?;
    match outcome.signature() {
        Some(signature) => writeln!(out, "\n-- signature --\n{signature}")?,
        None if outcome.is_degraded() => writeln!(out, "\n-- extraction failed --")?,
        None => writeln!(out, "\n-- no signature --")?,
    }
    Ok(())
}
