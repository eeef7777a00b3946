use std::collections::HashMap;

use log::debug;

use crate::error::{DecodeError, Result};
use crate::ime::{Decoded, Entry};
use crate::util::cursor::ByteCursor;
use crate::util::leading_u16_le;

/// 搜狗细胞词库 (.scel) 拼音表: syllable index -> syllable.
///
/// Built once per file from the region before `start_chinese` and only read
/// afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PinyinTable {
    syllables: HashMap<u16, String>,
}

impl PinyinTable {
    pub fn get(&self, index: u16) -> Option<&str> {
        self.syllables.get(&index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.syllables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.syllables.is_empty()
    }

    pub fn insert(&mut self, index: u16, syllable: impl Into<String>) {
        self.syllables.insert(index, syllable.into());
    }

    /// Resolve a packed list of u16 le indices, dropping unknown or empty
    /// syllables. A dangling odd byte is ignored.
    pub fn resolve(&self, packed: &[u8]) -> Vec<String> {
        packed
            .chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
            .filter_map(|idx| self.get(idx))
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Phase 1: read `index(u16) len(u16) utf16[len]` items from `start_py + 4`.
///
/// Stops before `start_chinese`, when fewer than 4 bytes remain, or at the
/// first zero or oversized length. Whatever was read so far is the table.
pub fn read_pinyin_table(data: &[u8], start_py: usize, start_chinese: usize) -> PinyinTable {
    // 4 bytes header before the first item
    let mut cursor = ByteCursor::at(data, start_py.saturating_add(4));
    let mut table = PinyinTable::default();

    while cursor.remaining() >= 4 && cursor.position() < start_chinese {
        match read_table_item(&mut cursor) {
            Ok(Some((index, syllable))) => table.insert(index, syllable),
            _ => break,
        }
    }
    debug!("scel pinyin table has {} syllables", table.len());
    table
}

/// `Ok(None)` for a zero or oversized length
fn read_table_item(cursor: &mut ByteCursor) -> Result<Option<(u16, String)>> {
    let index = cursor.read_u16_le()?;
    let len = cursor.read_u16_le()? as usize;
    if len == 0 || len > cursor.remaining() {
        return Ok(None);
    }
    Ok(Some((index, cursor.decode_utf16le_bytes(len)?)))
}

/// Two passes: the pinyin table, then the word groups at `start_chinese`.
pub fn decode(data: &[u8], start_py: usize, start_chinese: usize) -> Decoded {
    let table = read_pinyin_table(data, start_py, start_chinese);
    decode_groups(data, start_chinese, &table)
}

/// Phase 2: word groups sharing one pinyin list.
//
// same(u16) py_idx_len(u16) py_idx[py_idx_len]
//   repeated `same` times: word_len(u16) utf16[word_len] ext_len(u16) ext[ext_len]
//
// ext starts with the frequency as u16 le.
pub fn decode_groups(data: &[u8], start_chinese: usize, table: &PinyinTable) -> Decoded {
    let mut cursor = ByteCursor::at(data, start_chinese);
    let mut entries = vec![];

    while cursor.remaining() > 8 {
        if let Err(e) = read_group(&mut cursor, table, &mut entries) {
            debug!("scel decode halted after {} entries: {}", entries.len(), e);
            return Decoded::halted(entries, e);
        }
    }
    debug!("scel decode finished with {} entries", entries.len());
    Decoded::complete(entries)
}

/// push every word of one group; an error leaves the already pushed ones in place
fn read_group(cursor: &mut ByteCursor, table: &PinyinTable, out: &mut Vec<Entry>) -> Result<()> {
    let same = cursor.read_u16_le()?;
    let offset = cursor.position();
    let py_idx_len = cursor.read_u16_le()? as usize;
    if py_idx_len == 0 {
        return Err(DecodeError::structural(offset, "empty pinyin index list"));
    }
    let pinyin = table.resolve(cursor.read_bytes(py_idx_len)?);

    for _ in 0..same {
        let offset = cursor.position();
        let word_len = cursor.read_u16_le()? as usize;
        if word_len == 0 {
            return Err(DecodeError::structural(offset, "zero word length"));
        }
        let word = cursor.decode_utf16le_bytes(word_len)?;
        let ext_len = cursor.read_u16_le()? as usize;
        let ext = cursor.read_bytes(ext_len)?;
        let freq = leading_u16_le(ext).unwrap_or(0) as u32;
        out.push(Entry::new(word, pinyin.clone(), freq));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn u16le(n: u16) -> [u8; 2] {
        n.to_le_bytes()
    }

    fn utf16(s: &str) -> Vec<u8> {
        s.encode_utf16().flat_map(|u| u.to_le_bytes()).collect()
    }

    fn table_item(index: u16, py: &str) -> Vec<u8> {
        let mut b = vec![];
        b.extend(u16le(index));
        b.extend(u16le((py.len() * 2) as u16));
        b.extend(utf16(py));
        b
    }

    fn word(w: &str, ext: &[u8]) -> Vec<u8> {
        let mut b = vec![];
        b.extend(u16le((w.chars().count() * 2) as u16));
        b.extend(utf16(w));
        b.extend(u16le(ext.len() as u16));
        b.extend(ext);
        b
    }

    fn group(same: u16, idx: &[u8], words: &[Vec<u8>]) -> Vec<u8> {
        let mut b = vec![];
        b.extend(u16le(same));
        b.extend(u16le(idx.len() as u16));
        b.extend(idx);
        for w in words {
            b.extend(w);
        }
        b
    }

    fn ni_hao_table() -> PinyinTable {
        let mut t = PinyinTable::default();
        t.insert(5, "ni");
        t.insert(9, "hao");
        t
    }

    #[test]
    fn builds_table() {
        let mut buf = vec![0xaa; 4];
        buf.extend(table_item(5, "ni"));
        buf.extend(table_item(9, "hao"));
        let start_chinese = buf.len();
        buf.extend([0u8; 16]);
        let table = read_pinyin_table(&buf, 0, start_chinese);
        assert_eq!(table, ni_hao_table());
    }

    #[test]
    fn table_stops_at_zero_length() {
        let mut buf = vec![0; 4];
        buf.extend(table_item(1, "a"));
        buf.extend(u16le(2));
        buf.extend(u16le(0));
        buf.extend(table_item(3, "e"));
        let table = read_pinyin_table(&buf, 0, 1000);
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(1), Some("a"));
        assert_eq!(table.get(3), None);
    }

    #[test]
    fn table_stops_at_oversized_length() {
        let mut buf = vec![0; 4];
        buf.extend(table_item(1, "a"));
        buf.extend(u16le(2));
        buf.extend(u16le(200));
        buf.extend(utf16("ba"));
        let table = read_pinyin_table(&buf, 0, 1000);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn resolve_drops_unknown_and_odd_byte() {
        let t = ni_hao_table();
        assert_eq!(t.resolve(&[5, 0, 7, 0, 9, 0, 1]), vec!["ni", "hao"]);
        assert!(t.resolve(&[]).is_empty());
    }

    #[test]
    fn group_shares_pinyin() {
        let buf = group(
            2,
            &[5, 0, 9, 0],
            &[word("你好", &[0x0a, 0x00]), word("拟好", &[0x03, 0x00, 0xff])],
        );
        let out = decode_groups(&buf, 0, &ni_hao_table());
        assert_eq!(out.halted, None);
        assert_eq!(
            out.entries,
            vec![
                Entry::new("你好", vec!["ni".into(), "hao".into()], 10),
                Entry::new("拟好", vec!["ni".into(), "hao".into()], 3),
            ]
        );
    }

    #[test]
    fn short_extension_means_zero_freq() {
        let buf = group(1, &[5, 0], &[word("泥", &[0x01]), vec![]]);
        let out = decode_groups(&buf, 0, &ni_hao_table());
        assert_eq!(out.entries[0].freq, 0);
    }

    #[test]
    fn zero_index_len_stops() {
        let mut buf = group(1, &[5, 0], &[word("泥", &[1, 0])]);
        buf.extend(u16le(1));
        buf.extend(u16le(0));
        buf.extend([0u8; 8]);
        let out = decode_groups(&buf, 0, &ni_hao_table());
        assert_eq!(out.entries.len(), 1);
        assert!(matches!(
            out.halted,
            Some(DecodeError::StructuralInvalid { .. })
        ));
    }

    #[test]
    fn zero_word_len_stops_whole_decode() {
        let mut buf = vec![];
        buf.extend(u16le(1));
        buf.extend(u16le(2));
        buf.extend([5, 0]);
        buf.extend(u16le(0));
        // a valid group after the broken one is never read
        buf.extend(group(1, &[9, 0], &[word("好", &[2, 0])]));
        let out = decode_groups(&buf, 0, &ni_hao_table());
        assert!(out.entries.is_empty());
        assert!(matches!(
            out.halted,
            Some(DecodeError::StructuralInvalid { offset: 6, .. })
        ));
    }

    #[test]
    fn table_ends_at_start_chinese() {
        let mut buf = vec![0u8; 4];
        buf.extend(table_item(1, "a"));
        let start_chinese = buf.len();
        // well formed item inside the word region
        buf.extend(table_item(2, "b"));
        buf.extend(table_item(3, "c"));
        let table = read_pinyin_table(&buf, 0, start_chinese);
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(1), Some("a"));
        assert_eq!(table.get(2), None);
    }

    #[test]
    fn truncated_word_stops_whole_decode() {
        // the second word of the first group declares more bytes than exist,
        // the following group is never read
        let first = word("号", &[1, 0]);
        let mut buf = group(2, &[9, 0], &[first.clone(), word("好", &[2, 0])]);
        buf.extend(group(1, &[9, 0], &[word("好", &[2, 0])]));
        let cut = 2 + 2 + 2 + first.len();
        buf[cut..cut + 2].copy_from_slice(&u16le(0x4000));
        let out = decode_groups(&buf, 0, &ni_hao_table());
        assert_eq!(out.entries, vec![Entry::new("号", vec!["hao".into()], 1)]);
        assert!(matches!(out.halted, Some(DecodeError::Truncated { .. })));
    }

    #[test]
    fn decode_runs_both_phases() {
        let mut buf = vec![0u8; 4];
        buf.extend(table_item(5, "ni"));
        buf.extend(table_item(9, "hao"));
        let start_chinese = buf.len();
        buf.extend(group(1, &[5, 0, 9, 0], &[word("你好", &[0x0a, 0x00])]));
        let out = decode(&buf, 0, start_chinese);
        assert_eq!(
            out.entries,
            vec![Entry::new("你好", vec!["ni".into(), "hao".into()], 10)]
        );
    }
}
