use nom::bytes::complete::take;
use nom::number::complete::{le_u16, u8 as byte};
use nom::IResult;

use crate::error::{DecodeError, Result};
use crate::util::string::{string_from_ascii, string_from_utf16_le};

type Parsed<'a, O> = IResult<&'a [u8], O, nom::error::Error<&'a [u8]>>;

/// Forward-only reader over an immutable buffer.
///
/// Every read is bounds checked: asking for more bytes than remain returns
/// [`DecodeError::Truncated`] and leaves the position untouched.
//                 pos
//                  ▼
//     ┌────────────┬───────────────────────┐
// buf │  consumed  │      remaining()      │
//     └────────────┴───────────────────────┘
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        ByteCursor { buf, pos: 0 }
    }

    /// start at `offset`; an offset past the end leaves nothing to read
    pub fn at(buf: &'a [u8], offset: usize) -> Self {
        ByteCursor {
            buf,
            pos: offset.min(buf.len()),
        }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    fn rest(&self) -> &'a [u8] {
        &self.buf[self.pos..]
    }

    fn truncated(&self, needed: usize) -> DecodeError {
        DecodeError::Truncated {
            offset: self.pos,
            needed,
            remaining: self.remaining(),
        }
    }

    /// run a nom parser on the remaining bytes, advancing only on success
    fn run<O>(&mut self, needed: usize, parser: impl FnOnce(&'a [u8]) -> Parsed<'a, O>) -> Result<O> {
        match parser(self.rest()) {
            Ok((rest, out)) => {
                self.pos = self.buf.len() - rest.len();
                Ok(out)
            }
            Err(_) => Err(self.truncated(needed)),
        }
    }

    /// fail with `Truncated` unless at least `n` bytes remain
    pub fn require(&self, n: usize) -> Result<()> {
        if self.remaining() < n {
            return Err(self.truncated(n));
        }
        Ok(())
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        self.run(1, byte)
    }

    pub fn read_u16_le(&mut self) -> Result<u16> {
        self.run(2, le_u16)
    }

    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8]> {
        self.run(n, take(n))
    }

    /// look at the next `n` bytes without consuming them
    pub fn peek_bytes(&self, n: usize) -> Result<&'a [u8]> {
        self.require(n)?;
        Ok(&self.rest()[..n])
    }

    pub fn skip(&mut self, n: usize) -> Result<()> {
        self.read_bytes(n).map(|_| ())
    }

    /// read `n_units` UTF-16LE code units (2 bytes each)
    pub fn decode_utf16le(&mut self, n_units: usize) -> Result<String> {
        self.decode_utf16le_bytes(n_units * 2)
    }

    /// read `n_bytes` bytes as UTF-16LE, a dangling odd byte is dropped
    pub fn decode_utf16le_bytes(&mut self, n_bytes: usize) -> Result<String> {
        self.read_bytes(n_bytes).map(string_from_utf16_le)
    }

    pub fn decode_ascii(&mut self, n_bytes: usize) -> Result<String> {
        self.read_bytes(n_bytes).map(string_from_ascii)
    }
}
