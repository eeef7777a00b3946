use nom::number::complete::le_u16;
use nom::IResult;

pub mod cli;
pub mod cursor;
pub mod string;

/// nom parser: the leading little endian u16 of a slice, None if shorter than 2 bytes
pub fn leading_u16_le(input: &[u8]) -> Option<u16> {
    let parsed: IResult<&[u8], u16> = le_u16(input);
    parsed.ok().map(|(_, n)| n)
}

#[test]
fn leading_u16_le_test() {
    assert_eq!(leading_u16_le(&[0x0a, 0x00, 0xff]), Some(10));
    assert_eq!(leading_u16_le(&[0x0a]), None);
    assert_eq!(leading_u16_le(&[]), None);
}
