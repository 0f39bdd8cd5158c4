use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::core::error::{DirProbeError, Result};
use crate::core::types::Wordlist;

pub trait LoadWordlist {
    fn load(&self, path: &Path) -> Result<Wordlist>;
}

/// Reads newline-delimited wordlists from disk.
///
/// Lines are kept exactly as written apart from the line terminator
/// (`\n` or `\r\n`): no trimming, and empty lines stay in the list as
/// empty entries.
#[derive(Default, Debug)]
pub struct WordlistLoader {}

impl LoadWordlist for WordlistLoader {
    fn load(&self, path: &Path) -> Result<Wordlist> {
        let file = File::open(path).map_err(|source| DirProbeError::WordlistRead {
            path: path.display().to_string(),
            source,
        })?;

        // `file` is dropped on every return path below, including the error one.
        Self::read_lines(BufReader::new(file), &path.display().to_string())
    }
}

impl WordlistLoader {
    /// Collect every line of `reader`, reporting mid-read failures as scan errors.
    ///
    /// Bytes that are not valid UTF-8 are replaced rather than rejected, so an
    /// oddly encoded entry is still requested.
    pub fn read_lines<R: BufRead>(mut reader: R, origin: &str) -> Result<Wordlist> {
        let mut entries = Vec::new();
        let mut buf = Vec::new();

        loop {
            buf.clear();
            let read = reader
                .read_until(b'\n', &mut buf)
                .map_err(|source| DirProbeError::WordlistScan {
                    path: origin.to_string(),
                    source,
                })?;
            if read == 0 {
                break;
            }

            let mut line = buf.as_slice();
            if let Some(rest) = line.strip_suffix(b"\n") {
                line = rest.strip_suffix(b"\r").unwrap_or(rest);
            }
            entries.push(String::from_utf8_lossy(line).into_owned());
        }

        Ok(Wordlist::new(entries))
    }
}
