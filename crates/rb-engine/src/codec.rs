//! Fixed-width identifier parsing and classpart derivation.

/// Hex digit count of a full identifier.
pub const IDENTIFIER_HEX_LEN: usize = 16;

/// Hex digit count of a classpart.
pub const CLASS_PART_HEX_LEN: usize = 4;

/// Bits of the leading four hex digits that name the table.
pub const CLASS_PART_MASK: u16 = 0xFFF;

/// Bit set on a table id to form its classpart.
pub const CLASS_PART_FLAG: u16 = 0x1000;

/// A parsed identifier and its canonical lower-case hex text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    pub value: u64,
    pub hex: String,
}

impl Identifier {
    /// Classpart taken from the first four hex digits.
    pub fn class_part(&self) -> Option<u16> {
        derive_class_part(&self.hex)
    }
}

/// Parse `text` as an identifier with exactly `required_hex_len` hex digits.
///
/// Hex is tried first, then decimal. A string of decimal digits is therefore
/// always read as hex (`"1234"` is `0x1234`). Decimal input is re-rendered
/// without padding, so `"1"` is never a 16-digit identifier.
pub fn parse_identifier(text: &str, required_hex_len: usize) -> Option<Identifier> {
    let (value, hex) = if let Some(value) = parse_digits(text, 16) {
        (value, text.to_ascii_lowercase())
    } else {
        let value = parse_digits(text, 10)?;
        (value, format!("{value:x}"))
    };

    (hex.len() == required_hex_len).then_some(Identifier { value, hex })
}

/// Classpart of an identifier's hex text: first four digits masked with `0xFFF`.
pub fn derive_class_part(hex: &str) -> Option<u16> {
    let head = hex.get(..CLASS_PART_HEX_LEN)?;
    let value = u16::from_str_radix(head, 16).ok()?;
    Some(value & CLASS_PART_MASK)
}

/// Four-digit classpart text of a table id.
pub fn class_part_text(table_id: u16) -> String {
    format!("{:04x}", table_id | CLASS_PART_FLAG)
}

/// Unsigned parse that only accepts plain digits of the radix (no sign).
fn parse_digits(text: &str, radix: u32) -> Option<u64> {
    if text.is_empty() || !text.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    u64::from_str_radix(text, radix).ok()
}
