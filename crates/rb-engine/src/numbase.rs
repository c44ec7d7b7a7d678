//! Decimal / hex / binary number conversion.

/// A number base the converter understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberBase {
    Decimal,
    Hex,
    Binary,
}

impl NumberBase {
    pub const ALL: [NumberBase; 3] = [Self::Decimal, Self::Hex, Self::Binary];

    pub fn radix(self) -> u32 {
        match self {
            Self::Decimal => 10,
            Self::Hex => 16,
            Self::Binary => 2,
        }
    }

    /// Conventional literal prefix, stripped before parsing.
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Decimal => "",
            Self::Hex => "0x",
            Self::Binary => "0b",
        }
    }

    /// Parse `token` in this base.
    ///
    /// Strips the base prefix and a trailing long-literal `L`, then parses a
    /// signed 64-bit integer.
    pub fn convert(self, token: &str) -> Option<Conversion> {
        let digits = token.strip_prefix(self.prefix()).unwrap_or(token);
        let digits = digits.strip_suffix('L').unwrap_or(digits);
        i64::from_str_radix(digits, self.radix())
            .ok()
            .map(|value| Conversion { value })
    }
}

/// A successfully parsed number, renderable in every base.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Conversion {
    pub value: i64,
}

impl Conversion {
    pub fn decimal(&self) -> String {
        self.value.to_string()
    }

    pub fn hex(&self) -> String {
        signed(self.value, format!("{:x}", self.value.unsigned_abs()))
    }

    pub fn binary(&self) -> String {
        signed(self.value, format!("{:b}", self.value.unsigned_abs()))
    }
}

/// Sign-and-magnitude rendering, as in `-ff`.
fn signed(value: i64, magnitude: String) -> String {
    if value < 0 {
        format!("-{magnitude}")
    } else {
        magnitude
    }
}
