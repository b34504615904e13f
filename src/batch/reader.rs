use std::io::{self, BufRead};
use std::iter::FusedIterator;

/// Streams addresses out of a newline-delimited input, one line at a time.
///
/// Line terminators (`\n` or `\r\n`) are stripped and blank lines are
/// skipped. Invalid UTF-8 is replaced rather than rejected. A read error is
/// yielded once as `Err` and ends the sequence, so a truncated input is never
/// mistaken for a clean end-of-file.
pub struct LineReader<R> {
    reader: R,
    buf: Vec<u8>,
    done: bool,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            done: false,
        }
    }
}

impl<R: BufRead> Iterator for LineReader<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            self.buf.clear();
            match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => self.done = true,
                Ok(_) => {
                    let line = String::from_utf8_lossy(strip_terminator(&self.buf));
                    // Whitespace-only lines count as blank too, not just zero-length ones
                    if line.trim().is_empty() {
                        continue;
                    }
                    return Some(Ok(line.into_owned()));
                }
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            }
        }
        None
    }
}

impl<R: BufRead> FusedIterator for LineReader<R> {}

fn strip_terminator(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}
