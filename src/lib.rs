//! Decode Baidu (.bdict/.bcd) and Sogou (.scel) IME dictionaries into
//! word / pinyin / frequency entries, and export them as a plain word list
//! or a Rime dictionary.
//!
//! ```no_run
//! use ime_dict::{DictFormat, Offsets};
//!
//! let data = std::fs::read("words.scel").unwrap();
//! let decoded = DictFormat::Sogou.decode(&data, &Offsets::default());
//! for e in &decoded.entries {
//!     println!("{}\t{}\t{}", e.word, e.pinyin.join(" "), e.freq);
//! }
//! ```

pub mod config;
pub mod convert;
pub mod error;
pub mod export;
pub mod ime;
pub mod util;

pub use config::Offsets;
pub use error::DecodeError;
pub use ime::reduce::{merge_weighted, unique_words, Weighted};
pub use ime::{Decoded, DictFormat, Entry};
pub use util::cursor::ByteCursor;
