//! Pull-based byte tokenizer over a buffered reader.

use std::io::{self, BufRead};

/// A numeric token read from a table, together with where it started.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub text: String,
    pub offset: u64,
}

impl Field {
    /// Parse the token as a double, returning `None` if it is not a number.
    pub fn parse(&self) -> Option<f64> {
        self.text.parse().ok()
    }
}

/// Streams a results table one byte at a time without materialising it.
///
/// The stream never looks further ahead than the reader's internal buffer, so
/// arbitrarily large result files can be compared in constant memory.
pub struct TableStream<R> {
    reader: R,
    position: u64,
}

impl<R: BufRead> TableStream<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            position: 0,
        }
    }

    /// Number of bytes consumed so far.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Look at the next byte without consuming it. `None` at end of file.
    pub fn peek(&mut self) -> io::Result<Option<u8>> {
        loop {
            match self.reader.fill_buf() {
                Ok(buf) => return Ok(buf.first().copied()),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }

    /// Consume and return the next byte. `None` at end of file.
    pub fn next_byte(&mut self) -> io::Result<Option<u8>> {
        let byte = self.peek()?;
        if byte.is_some() {
            self.reader.consume(1);
            self.position += 1;
        }
        Ok(byte)
    }

    /// Discard any run of ASCII whitespace, including newlines.
    pub fn skip_whitespace(&mut self) -> io::Result<()> {
        while let Some(byte) = self.peek()? {
            if !byte.is_ascii_whitespace() {
                break;
            }
            self.next_byte()?;
        }
        Ok(())
    }

    /// Returns true once every byte has been consumed.
    pub fn is_eof(&mut self) -> io::Result<bool> {
        Ok(self.peek()?.is_none())
    }

    /// Skip leading whitespace and read the longest run of bytes that can make
    /// up a floating point literal (digits, sign, decimal point, exponent and the
    /// letters of `inf`/`nan`).
    ///
    /// Returns `None` if the stream is exhausted before any token starts. The
    /// token may be empty if the next byte cannot start a number.
    pub fn next_field(&mut self) -> io::Result<Option<Field>> {
        self.skip_whitespace()?;
        let offset = self.position;
        let mut text = String::new();
        while let Some(byte) = self.peek()? {
            if !is_number_byte(byte) {
                break;
            }
            text.push(char::from(byte));
            self.next_byte()?;
        }
        if text.is_empty() && self.is_eof()? {
            return Ok(None);
        }
        Ok(Some(Field { text, offset }))
    }
}

fn is_number_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || matches!(byte, b'+' | b'-' | b'.')
}
