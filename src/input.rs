/*!
 * Delimited record reader for path lists on stdin
 */

use std::io::{self, BufRead};
use std::path::PathBuf;

/// Streams delimiter-separated records from a reader.
///
/// Records of any length are supported and nothing beyond the current
/// record is buffered. The delimiter is stripped; a final record without a
/// trailing delimiter is still produced.
#[derive(Debug)]
pub struct LineSource<R> {
    reader: R,
    delimiter: u8,
    buf: Vec<u8>,
    done: bool,
}

impl<R: BufRead> LineSource<R> {
    pub fn new(reader: R, delimiter: u8) -> Self {
        Self {
            reader,
            delimiter,
            buf: Vec::new(),
            done: false,
        }
    }

    pub fn delimiter(&self) -> u8 {
        self.delimiter
    }

    /// Read the next record, or `None` at end of input
    pub fn next_record(&mut self) -> io::Result<Option<Vec<u8>>> {
        if self.done {
            return Ok(None);
        }

        self.buf.clear();
        let read = loop {
            match self.reader.read_until(self.delimiter, &mut self.buf) {
                Ok(n) => break n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        };

        if read == 0 {
            self.done = true;
            return Ok(None);
        }

        if self.buf.last() == Some(&self.delimiter) {
            self.buf.pop();
        } else {
            self.done = true;
        }
        Ok(Some(std::mem::take(&mut self.buf)))
    }
}

impl<R: BufRead> Iterator for LineSource<R> {
    type Item = io::Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_record().transpose()
    }
}

/// Turn a raw record into a path without losing non-UTF-8 bytes on Unix
#[cfg(unix)]
pub fn into_path(record: Vec<u8>) -> PathBuf {
    use std::ffi::OsString;
    use std::os::unix::ffi::OsStringExt;

    PathBuf::from(OsString::from_vec(record))
}

#[cfg(not(unix))]
pub fn into_path(record: Vec<u8>) -> PathBuf {
    PathBuf::from(String::from_utf8_lossy(&record).into_owned())
}
