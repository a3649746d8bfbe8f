// afib-cli
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

#![warn(rust_2018_idioms)]
#![forbid(unsafe_code)]

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use afib_core::classifier::{AverageMetrics, RecordSummary};
use afib_core::config::DetectorConfig;
use afib_core::driver::{AnnotationEvent, AnnotationKind, RecordDriver};
use afib_core::error::{Error, Result};

use clap::Parser;

/// Stream `rr,actual` test fixtures through the AF detector and report per-record and
/// averaged confusion-matrix metrics.
///
/// Each input file holds one record: one `rr,actual` pair per line, where `rr` is the
/// RR-interval in sample-clock ticks and `actual` is the ground-truth AF flag (`0`/`1` or
/// `true`/`false`). This is a fixture format for testing the detector in isolation; reading
/// real annotation sources (MIT-BIH, AFDB, LTAFDB) is handled by a separate collaborator, not
/// this binary.
#[derive(Parser)]
#[command(name = "afib-cli", version, about)]
struct Cli {
    /// Record fixture files, each `rr,actual` per line.
    #[arg(required = true)]
    records: Vec<PathBuf>,

    /// Entropy cutoff for the AF decision.
    #[arg(long, default_value_t = afib_core::config::DEFAULT_THRESHOLD)]
    threshold: f32,

    /// Sampling rate (Hz) assumed for this run.
    #[arg(long, default_value_t = afib_core::config::DEFAULT_SPS)]
    sps: f64,

    /// Print a JSON debug line (`y, xl, xh, s, w, h`) per sample to stderr.
    #[arg(long)]
    debug_dump: bool,

    /// Only print the final per-record and averaged summary lines.
    #[arg(long, short = 'q')]
    quiet: bool,
}

fn parse_line(line: &str) -> Option<(u16, bool)> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    let (rr, actual) = line.split_once(',')?;
    let rr: u16 = rr.trim().parse().ok()?;
    let actual = match actual.trim() {
        "1" | "true" => true,
        "0" | "false" => false,
        _ => return None,
    };
    Some((rr, actual))
}

/// Reads one `rr,actual`-per-line fixture file and drives it through [`RecordDriver`] by
/// synthesizing a QRS annotation at each cumulative timestamp and a co-located rhythm
/// annotation carrying that line's ground-truth flag. `orig_ann_frequency` is set equal to
/// `config.sps_override`, making the driver's timestamp rescale an identity: the fixture's
/// `rr` values are already expressed in the configured clock's ticks.
fn run_record(path: &Path, config: DetectorConfig, quiet: bool) -> Result<Option<RecordSummary>> {
    let file = File::open(path).map_err(|e| Error::Source(Box::new(e)))?;

    let mut entries = Vec::new();
    for (lineno, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(|e| Error::Source(Box::new(e)))?;
        match parse_line(&line) {
            Some(entry) => entries.push(entry),
            None if line.trim().is_empty() || line.trim().starts_with('#') => {}
            None => log::warn!("{}:{}: malformed line, skipping", path.display(), lineno + 1),
        }
    }

    if entries.is_empty() {
        log::warn!("{}: no RR intervals found, skipping record", path.display());
        return Ok(None);
    }

    let mut time = 0u64;
    let mut qrs = Vec::with_capacity(entries.len() + 1);
    let mut rhythm = Vec::with_capacity(entries.len());
    qrs.push(AnnotationEvent { time, kind: AnnotationKind::Qrs });
    for (rr, actual) in entries {
        time += rr as u64;
        let aux = if actual { "(AFIB" } else { "(N" };
        rhythm.push(AnnotationEvent { time, kind: AnnotationKind::Rhythm { aux: aux.into() } });
        qrs.push(AnnotationEvent { time, kind: AnnotationKind::Qrs });
    }

    let driver = RecordDriver::new(config, config.sps_override);
    let record = driver.run(qrs, rhythm)?;

    if config.debug_dump {
        for sample in &record.debug {
            match serde_json::to_string(sample) {
                Ok(json) => eprintln!("{}", json),
                Err(e) => log::warn!("failed to serialize debug sample: {}", e),
            }
        }
    }

    let summary = RecordSummary::new(path.display().to_string(), record.confusion);
    if !quiet {
        println!("{}", summary);
    }

    Ok(Some(summary))
}

fn main() -> ExitCode {
    pretty_env_logger::init();

    let cli = Cli::parse();
    let config = DetectorConfig { threshold: cli.threshold, sps_override: cli.sps, debug_dump: cli.debug_dump };

    let mut averages = AverageMetrics::new();
    let mut had_error = false;

    for path in &cli.records {
        match run_record(path, config, cli.quiet) {
            Ok(Some(summary)) => averages.add(&summary.confusion),
            Ok(None) => {}
            Err(Error::EmptyRecord) => {
                log::warn!("{}: record produced no RR intervals", path.display());
            }
            Err(e) => {
                log::error!("{}: {}", path.display(), e);
                had_error = true;
            }
        }
    }

    println!("{}", averages);

    if had_error {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
