/// 百度词库 word records start here
pub const BAIDU_START_OFFSET: usize = 0x350;
/// 搜狗 .scel pinyin table region
pub const SCEL_START_PY: usize = 0x1540;
/// 搜狗 .scel word groups region
pub const SCEL_START_CHINESE: usize = 0x2628;

/// lower case, without the dot
pub const BAIDU_SUFFIXES: &[&str] = &["bdict", "bcd"];
pub const SOGOU_SUFFIXES: &[&str] = &["scel"];

pub const RIME_VERSION: &str = "0.1";
pub const RIME_SORT: &str = "by_weight";

/// Where each format keeps its records. Not discovered from the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Offsets {
    pub baidu_start: usize,
    pub scel_py: usize,
    pub scel_chinese: usize,
}

impl Default for Offsets {
    fn default() -> Self {
        Offsets {
            baidu_start: BAIDU_START_OFFSET,
            scel_py: SCEL_START_PY,
            scel_chinese: SCEL_START_CHINESE,
        }
    }
}

/// parse `848` or `0x350`
pub fn parse_offset(s: &str) -> Result<usize, String> {
    let s = s.trim();
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => usize::from_str_radix(hex, 16),
        None => s.parse::<usize>(),
    };
    parsed.map_err(|e| format!("invalid offset `{s}`: {e}"))
}

#[test]
fn parse_offset_test() {
    assert_eq!(parse_offset("0x350"), Ok(BAIDU_START_OFFSET));
    assert_eq!(parse_offset("0X2628"), Ok(SCEL_START_CHINESE));
    assert_eq!(parse_offset("848"), Ok(0x350));
    assert!(parse_offset("0xzz").is_err());
    assert!(parse_offset("").is_err());
}
