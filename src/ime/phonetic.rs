//! 百度词库的声母/韵母表, a syllable is stored as an (initial, final) index pair.

/// 声母, index 12 is the zero initial
pub const INITIALS: [&str; 24] = [
    "c", "d", "b", "f", "g", "h", "ch", "j", "k", "l", "m", "n", "", "p", "q", "r", "s", "t", "sh",
    "zh", "w", "x", "y", "z",
];

/// 韵母
pub const FINALS: [&str; 33] = [
    "uang", "iang", "iong", "ang", "eng", "ian", "iao", "ing", "ong", "uai", "uan", "ai", "an",
    "ao", "ei", "en", "er", "ua", "ie", "in", "iu", "ou", "ia", "ue", "ui", "un", "uo", "a", "e",
    "i", "o", "u", "v",
];

/// initial byte marking the final byte as a literal character instead of a table index
pub const RAW_CODE: u8 = 0xFF;

pub fn is_initial(index: u8) -> bool {
    (index as usize) < INITIALS.len()
}

/// Resolve one stored syllable pair.
///
/// Returns `None` when either index falls outside its table.
pub fn syllable(initial: u8, fin: u8) -> Option<String> {
    if initial == RAW_CODE {
        return Some(char::from(fin).to_string());
    }
    let i = INITIALS.get(initial as usize)?;
    let f = FINALS.get(fin as usize)?;
    Some(format!("{i}{f}"))
}
