use anyhow::{Context, Result};
use indicatif::ProgressBar;
use std::io::{BufRead, Write};

use super::{LineReader, RecordWriter};
use crate::api::{GeocodeError, Geocoder};
use crate::domain::OutputRecord;

/// Per-run counters. `queried` is the number of non-blank input lines.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchStats {
    pub queried: usize,
    pub located: usize,
    pub empty: usize,
    pub failed: usize,
}

impl BatchStats {
    /// Lines written to the output (sentinel lines included).
    pub fn written(&self) -> usize {
        self.located + self.empty
    }
}

/// Sequential Reader -> Geocoder -> Writer loop.
///
/// One address is read, queried and written before the next is read. A
/// failed query never aborts the run: it is reported on the diagnostic
/// channel and produces no output line. Input and output I/O errors do.
pub struct Batch<G> {
    geocoder: G,
    verbose: Option<Box<dyn Write>>,
    progress: Option<ProgressBar>,
}

impl<G: Geocoder> Batch<G> {
    pub fn new(geocoder: G) -> Self {
        Self {
            geocoder,
            verbose: None,
            progress: None,
        }
    }

    /// Announce every query (and every empty answer) on `out`.
    pub fn verbose<V: Write + 'static>(mut self, out: V) -> Self {
        self.verbose = Some(Box::new(out));
        self
    }

    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = Some(progress);
        self
    }

    pub fn run<R, W, D>(
        &mut self,
        input: R,
        output: &mut RecordWriter<W>,
        diagnostics: &mut D,
    ) -> Result<BatchStats>
    where
        R: BufRead,
        W: Write,
        D: Write,
    {
        let mut stats = BatchStats::default();

        for line in LineReader::new(input) {
            let address = line.with_context(|| {
                format!("Failed to read input after {} addresses", stats.queried)
            })?;
            stats.queried += 1;

            if let Some(out) = &mut self.verbose {
                writeln!(out, "Query: {}", address).context("Failed to write progress")?;
            }
            if let Some(pb) = &self.progress {
                pb.set_message(format!("[{}] {}", stats.queried, address));
            }

            let result = match self.geocoder.geocode(&address) {
                Ok(result) => result,
                Err(err) => {
                    stats.failed += 1;
                    self.report_failure(diagnostics, &address, &err)?;
                    continue;
                }
            };

            let record = OutputRecord::from_result(&address, &result);
            if record.located {
                stats.located += 1;
            } else {
                stats.empty += 1;
                log::debug!(
                    "{}: {:?}, {} candidates",
                    address,
                    result.status,
                    result.results.len()
                );
                if let Some(out) = &mut self.verbose {
                    let written = match &result.error_message {
                        Some(msg) => writeln!(out, "  no location ({:?}): {}", result.status, msg),
                        None => writeln!(out, "  no location ({:?})", result.status),
                    };
                    written.context("Failed to write progress")?;
                }
            }

            output
                .write_record(&record)
                .with_context(|| format!("Failed to write record for {:?}", address))?;
        }

        Ok(stats)
    }

    fn report_failure<D: Write>(
        &self,
        diagnostics: &mut D,
        address: &str,
        err: &GeocodeError,
    ) -> Result<()> {
        let mut emit = || writeln!(diagnostics, "Query {} has error {}", address, err);
        let written = match &self.progress {
            Some(pb) => pb.suspend(emit),
            None => emit(),
        };
        written.context("Failed to write diagnostics")
    }
}
