use log::debug;

use crate::error::{DecodeError, Result};
use crate::ime::phonetic::{is_initial, syllable, RAW_CODE};
use crate::ime::{Decoded, Entry};
use crate::util::cursor::ByteCursor;

/// 百度词库 (.bdict/.bcd) record stream.
///
/// The format has no type tag, each record is:
/// pinyin_len(u16 le), freq(u16 le), then a body whose shape is guessed
/// from its first two bytes (peeked, not consumed):
//
//  00 00              -> Compound: 00 00, word_len(u16), pinyin_len utf16 code, word_len utf16 word
//  initial >= 24, !FF -> Literal:  1 skipped byte, pinyin_len ascii bytes (word == pinyin)
//  otherwise          -> Standard: pinyin_len (initial, final) pairs, pinyin_len utf16 word
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RecordKind {
    Compound,
    Literal,
    Standard,
}

/// order matters: compound first, then literal, then standard
fn classify(peek0: u8, peek1: u8) -> RecordKind {
    if peek0 == 0x00 && peek1 == 0x00 {
        RecordKind::Compound
    } else if !is_initial(peek0) && peek0 != RAW_CODE {
        RecordKind::Literal
    } else {
        RecordKind::Standard
    }
}

/// Decode every record from `start` on.
///
/// Stops at the first record that is truncated or carries an out of range
/// syllable index; everything decoded before it is returned.
pub fn decode(data: &[u8], start: usize) -> Decoded {
    let mut cursor = ByteCursor::at(data, start);
    let mut entries = vec![];

    while cursor.remaining() > 4 {
        match read_record(&mut cursor) {
            Ok(entry) => entries.push(entry),
            Err(e) => {
                debug!("baidu decode halted after {} entries: {}", entries.len(), e);
                return Decoded::halted(entries, e);
            }
        }
    }
    debug!("baidu decode finished with {} entries", entries.len());
    Decoded::complete(entries)
}

fn read_record(cursor: &mut ByteCursor) -> Result<Entry> {
    let pinyin_len = cursor.read_u16_le()? as usize;
    let freq = cursor.read_u16_le()? as u32;
    let peek = cursor.peek_bytes(2)?;

    match classify(peek[0], peek[1]) {
        RecordKind::Compound => read_compound(cursor, pinyin_len, freq),
        RecordKind::Literal => read_literal(cursor, pinyin_len, freq),
        RecordKind::Standard => read_standard(cursor, pinyin_len, freq),
    }
}

fn read_compound(cursor: &mut ByteCursor, pinyin_len: usize, freq: u32) -> Result<Entry> {
    cursor.skip(2)?;
    let word_len = cursor.read_u16_le()? as usize;
    // both fields must fit before either is consumed
    cursor.require((pinyin_len + word_len) * 2)?;
    let code = cursor.decode_utf16le(pinyin_len)?;
    let word = cursor.decode_utf16le(word_len)?;
    Ok(Entry::new(word, vec![code], freq))
}

fn read_literal(cursor: &mut ByteCursor, pinyin_len: usize, freq: u32) -> Result<Entry> {
    cursor.skip(1)?;
    let text = cursor.decode_ascii(pinyin_len)?;
    Ok(Entry::new(text.clone(), vec![text], freq))
}

fn read_standard(cursor: &mut ByteCursor, pinyin_len: usize, freq: u32) -> Result<Entry> {
    let mut pinyin = Vec::with_capacity(pinyin_len);
    for _ in 0..pinyin_len {
        let offset = cursor.position();
        let pair = cursor.read_bytes(2)?;
        let s = syllable(pair[0], pair[1]).ok_or_else(|| {
            DecodeError::structural(
                offset,
                format!("syllable index out of range: ({}, {})", pair[0], pair[1]),
            )
        })?;
        pinyin.push(s);
    }
    let word = cursor.decode_utf16le(pinyin_len)?;
    Ok(Entry::new(word, pinyin, freq))
}
