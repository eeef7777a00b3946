use std::path::Path;

use serde_derive::Serialize;

use crate::config::{Offsets, BAIDU_SUFFIXES, SOGOU_SUFFIXES};
use crate::error::DecodeError;

pub mod baidu;
pub mod phonetic;
pub mod reduce;
pub mod sogou;

/// 词条: one decoded dictionary record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    pub word: String,
    // one string per syllable, may be empty
    pub pinyin: Vec<String>,
    pub freq: u32,
}

impl Entry {
    pub fn new(word: impl Into<String>, pinyin: Vec<String>, freq: u32) -> Self {
        Entry {
            word: word.into(),
            pinyin,
            freq,
        }
    }
}

impl Default for Entry {
    fn default() -> Self {
        Entry {
            word: String::new(),
            pinyin: vec![],
            freq: 1,
        }
    }
}

/// Result of decoding one buffer.
///
/// `halted` is `None` when the decoder ran to the end of its input and holds
/// the reason otherwise. `entries` is kept in both cases.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Decoded {
    pub entries: Vec<Entry>,
    pub halted: Option<DecodeError>,
}

impl Decoded {
    pub(crate) fn complete(entries: Vec<Entry>) -> Self {
        Decoded {
            entries,
            halted: None,
        }
    }

    pub(crate) fn halted(entries: Vec<Entry>, err: DecodeError) -> Self {
        Decoded {
            entries,
            halted: Some(err),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DictFormat {
    /// .bdict / .bcd
    Baidu,
    /// .scel
    Sogou,
}

impl DictFormat {
    /// classify by file extension, case insensitive
    pub fn from_path(path: &Path) -> Option<DictFormat> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        if BAIDU_SUFFIXES.contains(&ext.as_str()) {
            Some(DictFormat::Baidu)
        } else if SOGOU_SUFFIXES.contains(&ext.as_str()) {
            Some(DictFormat::Sogou)
        } else {
            None
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DictFormat::Baidu => "Baidu",
            DictFormat::Sogou => "Sogou",
        }
    }

    pub fn decode(&self, data: &[u8], offsets: &Offsets) -> Decoded {
        match self {
            DictFormat::Baidu => baidu::decode(data, offsets.baidu_start),
            DictFormat::Sogou => sogou::decode(data, offsets.scel_py, offsets.scel_chinese),
        }
    }
}
