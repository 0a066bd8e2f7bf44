use std::borrow::Cow;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Count lines from a buffered reader.
///
/// `\n`, `\r\n` and a lone `\r` each end one line. A final line without a
/// terminator still counts; empty input is zero lines.
///
/// # Errors
/// Returns an I/O error if reading fails or the content is not valid UTF-8
/// (`ErrorKind::InvalidData`).
pub fn count_lines<R: BufRead>(mut reader: R) -> io::Result<usize> {
    let mut lines = LineTally::default();
    let mut utf8 = Utf8Check::default();

    loop {
        let chunk = reader.fill_buf()?;
        if chunk.is_empty() {
            break;
        }
        utf8.feed(chunk)?;
        lines.feed(chunk);
        let len = chunk.len();
        reader.consume(len);
    }

    utf8.finish()?;
    Ok(lines.finish())
}

/// Count lines of the file at `path`, streaming its content.
///
/// # Errors
/// Returns an I/O error if the file cannot be opened or read, or is not UTF-8.
pub fn count_file_lines(path: &Path) -> io::Result<usize> {
    let file = File::open(path)?;
    count_lines(BufReader::new(file))
}

#[derive(Debug, Default)]
struct LineTally {
    ended: usize,
    after_cr: bool,
    open_line: bool,
}

impl LineTally {
    fn feed(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            match byte {
                // `\r\n` was already counted at the `\r`.
                b'\n' if self.after_cr => self.after_cr = false,
                b'\n' => {
                    self.ended += 1;
                    self.open_line = false;
                }
                b'\r' => {
                    self.ended += 1;
                    self.after_cr = true;
                    self.open_line = false;
                }
                _ => {
                    self.after_cr = false;
                    self.open_line = true;
                }
            }
        }
    }

    fn finish(&self) -> usize {
        self.ended + usize::from(self.open_line)
    }
}

/// Streaming UTF-8 validation; a sequence split across chunks is carried over.
#[derive(Debug, Default)]
struct Utf8Check {
    carry: Vec<u8>,
}

impl Utf8Check {
    fn feed(&mut self, chunk: &[u8]) -> io::Result<()> {
        let bytes: Cow<'_, [u8]> = if self.carry.is_empty() {
            Cow::Borrowed(chunk)
        } else {
            let mut joined = std::mem::take(&mut self.carry);
            joined.extend_from_slice(chunk);
            Cow::Owned(joined)
        };

        match std::str::from_utf8(&bytes) {
            Ok(_) => Ok(()),
            Err(e) if e.error_len().is_none() => {
                self.carry.extend_from_slice(&bytes[e.valid_up_to()..]);
                Ok(())
            }
            Err(_) => Err(invalid_utf8()),
        }
    }

    fn finish(&self) -> io::Result<()> {
        if self.carry.is_empty() {
            Ok(())
        } else {
            Err(invalid_utf8())
        }
    }
}

fn invalid_utf8() -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, "stream did not contain valid UTF-8")
}

#[cfg(test)]
#[path = "lines_tests.rs"]
mod tests;
