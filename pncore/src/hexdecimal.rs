use num::{
    BigUint,
    Num,
};

use crate::error::{
    ParseDecimalError,
    ParseHexError,
};

/// A non-negative integer of arbitrary precision.
///
/// This is the physical form of a hex backed value, i.e. what actually
/// gets written to storage; application code deals with the hexadecimal
/// string produced by [`decimal_to_hex`].
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Decimal(BigUint);

/// Parse a hexadecimal string into its numeric value.
///
/// Surrounding ASCII whitespace is ignored and a single leading `0x` (of
/// either case) is accepted; every remaining character must be a hex
/// digit of either case.
pub fn hex_to_decimal(value: &str) -> Result<Decimal, ParseHexError> {
    let value = value.trim_ascii();
    if value.is_empty() {
        return Err(ParseHexError::Empty);
    }
    let (offset, digits) = match value.get(..2) {
        Some("0x") | Some("0X") => (2, &value[2..]),
        _ => (0, value),
    };
    if digits.is_empty() {
        return Err(ParseHexError::MissingDigits);
    }
    if let Some((position, digit)) = digits.chars()
        .enumerate()
        .find(|(_, c)| !c.is_ascii_hexdigit())
    {
        return Err(ParseHexError::InvalidDigit {
            digit,
            position: offset + position,
        });
    }
    BigUint::from_str_radix(digits, 16)
        .map(Decimal)
        .map_err(|_| ParseHexError::MissingDigits)
}

/// Format the numeric value as lowercase hexadecimal, without prefix.
pub fn decimal_to_hex(value: &Decimal) -> String {
    value.0.to_str_radix(16)
}

impl Decimal {
    /// The number of significant base-10 digits; zero has one digit.
    pub fn digits(&self) -> usize {
        self.0.to_str_radix(10).len()
    }

    pub fn as_biguint(&self) -> &BigUint {
        &self.0
    }

    pub(crate) fn parse(value: &str) -> Result<Self, ParseDecimalError> {
        if value.is_empty() {
            return Err(ParseDecimalError::Empty);
        }
        if let Some((position, digit)) = value.chars()
            .enumerate()
            .find(|(_, c)| !c.is_ascii_digit())
        {
            return Err(ParseDecimalError::InvalidDigit { digit, position });
        }
        BigUint::from_str_radix(value, 10)
            .map(Decimal)
            .map_err(|_| ParseDecimalError::Empty)
    }
}

mod impls;
#[cfg(feature = "sqlx")]
mod sqlite;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_to_decimal_scenarios() -> anyhow::Result<()> {
        assert_eq!(hex_to_decimal("1a2b3c")?, Decimal::from(1715004u64));
        assert_eq!(hex_to_decimal("0xFF")?, Decimal::from(255u64));
        assert_eq!(hex_to_decimal("0XfF")?, Decimal::from(255u64));
        assert_eq!(hex_to_decimal("0")?, Decimal::from(0u64));
        assert_eq!(hex_to_decimal(" ff\n")?, Decimal::from(255u64));
        Ok(())
    }

    #[test]
    fn hex_to_decimal_rejects() {
        assert_eq!(hex_to_decimal(""), Err(ParseHexError::Empty));
        assert_eq!(hex_to_decimal("   "), Err(ParseHexError::Empty));
        assert_eq!(hex_to_decimal("0x"), Err(ParseHexError::MissingDigits));
        assert_eq!(
            hex_to_decimal("12g4"),
            Err(ParseHexError::InvalidDigit { digit: 'g', position: 2 }),
        );
        assert_eq!(
            hex_to_decimal("0x1 2"),
            Err(ParseHexError::InvalidDigit { digit: ' ', position: 3 }),
        );
        assert_eq!(
            hex_to_decimal("ab0x1"),
            Err(ParseHexError::InvalidDigit { digit: 'x', position: 3 }),
        );
        assert_eq!(
            hex_to_decimal("-1"),
            Err(ParseHexError::InvalidDigit { digit: '-', position: 0 }),
        );
        assert_eq!(
            hex_to_decimal("f_f"),
            Err(ParseHexError::InvalidDigit { digit: '_', position: 1 }),
        );
        // positions count characters, not bytes
        assert_eq!(
            hex_to_decimal("0x1\u{e9}f"),
            Err(ParseHexError::InvalidDigit { digit: '\u{e9}', position: 3 }),
        );
        assert_eq!(
            hex_to_decimal("\u{ff10}"),
            Err(ParseHexError::InvalidDigit { digit: '\u{ff10}', position: 0 }),
        );
    }

    #[test]
    fn decimal_to_hex_lowercase_no_prefix() {
        assert_eq!(decimal_to_hex(&Decimal::from(1715004u64)), "1a2b3c");
        assert_eq!(decimal_to_hex(&Decimal::from(255u64)), "ff");
        assert_eq!(decimal_to_hex(&Decimal::from(0u64)), "0");
    }

    #[test]
    fn wider_than_u64() -> anyhow::Result<()> {
        // a full 64-bit ANDROID_ID does not fit a signed 64-bit column
        let value = hex_to_decimal("ffffffffffffffff")?;
        assert_eq!(value.to_string(), "18446744073709551615");
        assert_eq!(value.digits(), 20);

        let hex = "f".repeat(83);
        let value = hex_to_decimal(&hex)?;
        assert_eq!(value.digits(), 100);
        assert_eq!(decimal_to_hex(&value), hex);
        Ok(())
    }

    #[test]
    fn round_trip() -> anyhow::Result<()> {
        for n in [0u64, 1, 9, 10, 15, 16, 255, 256, 4095, 1715004, u32::MAX as u64, u64::MAX] {
            let value = Decimal::from(n);
            assert_eq!(hex_to_decimal(&decimal_to_hex(&value))?, value);
        }
        for hex in ["0", "1", "a", "10", "ff", "100", "1a2b3c", "deadbeefcafe"] {
            assert_eq!(decimal_to_hex(&hex_to_decimal(hex)?), hex);
        }
        Ok(())
    }

    #[test]
    fn parse_decimal() -> anyhow::Result<()> {
        assert_eq!(Decimal::parse("1715004")?, Decimal::from(1715004u64));
        assert_eq!(Decimal::parse("0")?.digits(), 1);
        assert_eq!(Decimal::parse(""), Err(ParseDecimalError::Empty));
        assert_eq!(
            Decimal::parse("12.5"),
            Err(ParseDecimalError::InvalidDigit { digit: '.', position: 2 }),
        );
        Ok(())
    }
}
