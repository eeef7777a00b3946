use encoding::all::{ASCII, UTF_16LE};
use encoding::{DecoderTrap, Encoding};

/// utf16 little endian bytes to string.
/// unpaired surrogates and a dangling odd byte are dropped instead of failing the whole slice.
pub fn string_from_utf16_le(slice: &[u8]) -> String {
    UTF_16LE
        .decode(slice, DecoderTrap::Ignore)
        .unwrap_or_default()
}

/// ascii bytes to string, bytes above 0x7f are dropped
pub fn string_from_ascii(slice: &[u8]) -> String {
    ASCII.decode(slice, DecoderTrap::Ignore).unwrap_or_default()
}
