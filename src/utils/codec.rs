//! Identifier codec between numeric record keys and short textual codes.
//!
//! Codes are the positional representation of a key in a fixed radix over
//! the alphabet `0-9a-z`. The default radix is 36.

use thiserror::Error;

/// Digits in ascending order of value. A codec of radix `r` uses the first `r`.
const ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Radix used when none is configured.
pub const DEFAULT_RADIX: u32 = 36;

/// Errors produced while decoding a short code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("code is empty")]
    Empty,

    #[error("character {0:?} is outside the radix-{1} alphabet")]
    InvalidDigit(char, u32),

    #[error("code overflows 64 bits")]
    Overflow,
}

/// Bidirectional mapping between `u64` keys and short codes.
///
/// `decode(encode(k)) == k` holds for every `u64`. Encoding produces the
/// shortest representation, so the only code with a leading `0` is `"0"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Codec {
    radix: u32,
}

impl Codec {
    /// Creates a codec for the given radix.
    ///
    /// Returns `None` if `radix` is outside `2..=36`.
    pub fn new(radix: u32) -> Option<Self> {
        (2..=36).contains(&radix).then_some(Self { radix })
    }

    /// Returns the configured radix.
    pub fn radix(&self) -> u32 {
        self.radix
    }

    /// Encodes a key as a short code.
    ///
    /// # Examples
    ///
    /// ```
    /// use shortener_store::utils::codec::Codec;
    ///
    /// let codec = Codec::default();
    /// assert_eq!(codec.encode(0), "0");
    /// assert_eq!(codec.encode(35), "z");
    /// assert_eq!(codec.encode(36), "10");
    /// ```
    pub fn encode(&self, key: u64) -> String {
        if key == 0 {
            return "0".to_string();
        }

        let radix = u64::from(self.radix);
        let mut digits = Vec::with_capacity(13);
        let mut rest = key;

        while rest > 0 {
            digits.push(ALPHABET[(rest % radix) as usize]);
            rest /= radix;
        }

        digits.reverse();
        digits.into_iter().map(char::from).collect()
    }

    /// Decodes a short code back into its key.
    ///
    /// Only lowercase digits are accepted; `"A"` is rejected even though it
    /// would parse case-insensitively.
    ///
    /// # Errors
    ///
    /// - [`CodecError::Empty`] for an empty code
    /// - [`CodecError::InvalidDigit`] for a character outside the alphabet
    /// - [`CodecError::Overflow`] if the value does not fit in `u64`
    pub fn decode(&self, code: &str) -> Result<u64, CodecError> {
        if code.is_empty() {
            return Err(CodecError::Empty);
        }

        let radix = u64::from(self.radix);

        code.chars().try_fold(0u64, |acc, c| {
            let digit = self
                .digit_value(c)
                .ok_or(CodecError::InvalidDigit(c, self.radix))?;

            acc.checked_mul(radix)
                .and_then(|v| v.checked_add(digit))
                .ok_or(CodecError::Overflow)
        })
    }

    fn digit_value(&self, c: char) -> Option<u64> {
        let value = match c {
            '0'..='9' => c as u64 - '0' as u64,
            'a'..='z' => c as u64 - 'a' as u64 + 10,
            _ => return None,
        };

        (value < u64::from(self.radix)).then_some(value)
    }
}

impl Default for Codec {
    fn default() -> Self {
        Self {
            radix: DEFAULT_RADIX,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_zero() {
        assert_eq!(Codec::default().encode(0), "0");
    }

    #[test]
    fn test_encode_known_values() {
        let codec = Codec::default();
        assert_eq!(codec.encode(1), "1");
        assert_eq!(codec.encode(10), "a");
        assert_eq!(codec.encode(31), "v");
        assert_eq!(codec.encode(36), "10");
        assert_eq!(codec.encode(1295), "zz");
    }

    #[test]
    fn test_encode_max() {
        assert_eq!(Codec::default().encode(u64::MAX), "3w5e11264sgsf");
    }

    #[test]
    fn test_round_trip_samples() {
        let codec = Codec::default();
        let samples = [
            0,
            1,
            35,
            36,
            37,
            1_000,
            123_456_789,
            i64::MAX as u64,
            u64::MAX - 1,
            u64::MAX,
        ];

        for key in samples {
            assert_eq!(codec.decode(&codec.encode(key)), Ok(key), "key {key}");
        }
    }

    #[test]
    fn test_round_trip_every_radix() {
        for radix in 2..=36 {
            let codec = Codec::new(radix).unwrap();
            for key in [0, 1, 2, 99, 65_535, u64::MAX] {
                assert_eq!(codec.decode(&codec.encode(key)), Ok(key));
            }
        }
    }

    #[test]
    fn test_encode_has_no_leading_zero() {
        let codec = Codec::default();
        for key in 1..2_000u64 {
            assert!(!codec.encode(key).starts_with('0'));
        }
    }

    #[test]
    fn test_decode_empty() {
        assert_eq!(Codec::default().decode(""), Err(CodecError::Empty));
    }

    #[test]
    fn test_decode_rejects_uppercase() {
        assert!(matches!(
            Codec::default().decode("A1"),
            Err(CodecError::InvalidDigit('A', 36))
        ));
    }

    #[test]
    fn test_decode_rejects_symbols() {
        assert!(Codec::default().decode("ab-c").is_err());
        assert!(Codec::default().decode("a b").is_err());
        assert!(Codec::default().decode("ж").is_err());
    }

    #[test]
    fn test_decode_rejects_digit_outside_radix() {
        let binary = Codec::new(2).unwrap();
        assert_eq!(binary.decode("101"), Ok(5));
        assert!(matches!(
            binary.decode("102"),
            Err(CodecError::InvalidDigit('2', 2))
        ));
    }

    #[test]
    fn test_decode_overflow() {
        assert_eq!(
            Codec::default().decode("3w5e11264sgsg"),
            Err(CodecError::Overflow)
        );
        assert_eq!(
            Codec::default().decode("zzzzzzzzzzzzzzzz"),
            Err(CodecError::Overflow)
        );
    }

    #[test]
    fn test_decode_accepts_leading_zeros() {
        assert_eq!(Codec::default().decode("00v"), Ok(31));
    }

    #[test]
    fn test_new_rejects_bad_radix() {
        assert!(Codec::new(0).is_none());
        assert!(Codec::new(1).is_none());
        assert!(Codec::new(37).is_none());
        assert_eq!(Codec::new(16).map(|c| c.radix()), Some(16));
    }
}
