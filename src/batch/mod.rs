pub mod pipeline;
pub mod reader;
pub mod writer;

pub use pipeline::{Batch, BatchStats};
pub use reader::LineReader;
pub use writer::RecordWriter;

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;

use crate::api::Geocoder;

/// Geocode every address in `input` into a freshly truncated `output`.
///
/// The input is opened before the output is touched, so a bad input path
/// leaves an existing output file intact.
pub fn run_files<G, D>(
    batch: &mut Batch<G>,
    input: &Path,
    output: &Path,
    diagnostics: &mut D,
) -> Result<BatchStats>
where
    G: Geocoder,
    D: Write,
{
    let file = File::open(input)
        .with_context(|| format!("Failed to open input file: {}", input.display()))?;
    let mut writer = RecordWriter::create(output)?;

    batch.run(BufReader::new(file), &mut writer, diagnostics)
}
