//! Decoding a node's leaves into a typed record.
//!
//! A type opts in by implementing [`Decode`], normally through
//! `#[derive(Decode)]`:
//!
//! ```rust
//! use bconf::{Bconf, Decode};
//!
//! #[derive(Decode, Default)]
//! struct Listener {
//!     #[bconf(name = "addr")]
//!     address: String,
//!     port: u16,
//!     backlog: i32,
//! }
//!
//! let mut bc = Bconf::new();
//! bc.load_conf_str("srv.addr=0.0.0.0\nsrv.port=0x1f90\n").unwrap();
//!
//! let listener: Listener = bc.get_node(&["srv"]).unwrap().decode().unwrap();
//! assert_eq!(listener.address, "0.0.0.0");
//! assert_eq!(listener.port, 8080);
//! assert_eq!(listener.backlog, 0);
//! ```
//!
//! Each field is looked up as a direct leaf of the node, by its
//! `#[bconf(name = "...")]` if present, else by the lowercased field name. A
//! missing or empty leaf leaves the field as it was. Coercion goes through
//! [`FromLeaf`]; a field type without an impl is rejected at compile time.
//!
//! Integers accept Go-style literals: an optional sign (signed types only),
//! a `0x`, `0o`, `0b` or leading-`0` octal prefix, and `_` between digits.
//! Floats are decimal only (`1_000.5`, `-1.5e2`, `inf`, `nan`); hexadecimal
//! float literals such as `0x1p-2` are rejected.

use crate::error::{BconfError, Result};
use crate::tree::Bconf;

/// A record that can be filled from the leaves of a bconf node.
pub trait Decode {
    /// Overwrite the fields that have a matching non-empty leaf in `node`.
    ///
    /// Stops at the first field that fails to parse; fields decoded before
    /// it keep their new values.
    fn decode_from(&mut self, node: &Bconf) -> Result<()>;
}

/// Conversion from a leaf string into a field type.
pub trait FromLeaf: Sized {
    fn from_leaf(leaf: &str) -> std::result::Result<Self, String>;
}

/// Decode the leaf `key` of `node` into `field`, if the leaf is non-empty.
///
/// This is what `#[derive(Decode)]` generates a call to for every field.
pub fn decode_field<T: FromLeaf>(node: &Bconf, key: &str, field: &mut T) -> Result<()> {
    let value = node.get_string(&[key]);
    if value.is_empty() {
        return Ok(());
    }
    *field = T::from_leaf(value).map_err(|message| BconfError::Decode {
        key: key.to_string(),
        value: value.to_string(),
        message,
    })?;
    Ok(())
}

impl Bconf {
    /// Fill `target` from the leaves of this node.
    pub fn decode_into<T: Decode + ?Sized>(&self, target: &mut T) -> Result<()> {
        target.decode_from(self)
    }

    /// Decode this node into a fresh `T::default()`.
    pub fn decode<T: Decode + Default>(&self) -> Result<T> {
        let mut target = T::default();
        target.decode_from(self)?;
        Ok(target)
    }
}

impl FromLeaf for String {
    fn from_leaf(leaf: &str) -> std::result::Result<Self, String> {
        Ok(leaf.to_string())
    }
}

macro_rules! signed_from_leaf {
    ($($t:ty),*) => {
        $(impl FromLeaf for $t {
            fn from_leaf(leaf: &str) -> std::result::Result<Self, String> {
                let value = parse_signed(leaf)?;
                <$t>::try_from(value).map_err(|_| out_of_range(stringify!($t)))
            }
        })*
    };
}

macro_rules! unsigned_from_leaf {
    ($($t:ty),*) => {
        $(impl FromLeaf for $t {
            fn from_leaf(leaf: &str) -> std::result::Result<Self, String> {
                let value = parse_magnitude(leaf)?;
                <$t>::try_from(value).map_err(|_| out_of_range(stringify!($t)))
            }
        })*
    };
}

macro_rules! float_from_leaf {
    ($($t:ty),*) => {
        $(impl FromLeaf for $t {
            fn from_leaf(leaf: &str) -> std::result::Result<Self, String> {
                parse_float::<$t>(leaf)
            }
        })*
    };
}

signed_from_leaf!(i8, i16, i32, i64, isize);
unsigned_from_leaf!(u8, u16, u32, u64, usize);
float_from_leaf!(f32, f64);

fn out_of_range(ty: &str) -> String {
    format!("value out of range for {ty}")
}

fn parse_signed(text: &str) -> std::result::Result<i128, String> {
    let (negative, unsigned) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let magnitude = parse_magnitude(unsigned)?;
    let value = i128::try_from(magnitude).map_err(|_| "value out of range".to_string())?;
    Ok(if negative { -value } else { value })
}

/// Parse an unsigned integer literal with an optional radix prefix.
fn parse_magnitude(text: &str) -> std::result::Result<u128, String> {
    let (radix, prefixed, digits) = split_radix(text);

    let cleaned;
    let digits = if digits.contains('_') {
        let misplaced = digits.ends_with('_')
            || digits.contains("__")
            || (!prefixed && digits.starts_with('_'));
        if misplaced {
            return Err(format!("misplaced '_' in '{text}'"));
        }
        cleaned = digits.replace('_', "");
        cleaned.as_str()
    } else {
        digits
    };
    // `from_str_radix` takes a leading `+`, which may surface once `_` is gone.
    if !digits.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return Err(format!("invalid digit in '{text}'"));
    }

    u128::from_str_radix(digits, radix).map_err(|e| e.to_string())
}

/// Parse a decimal float, allowing `_` between digits.
fn parse_float<T>(text: &str) -> std::result::Result<T, String>
where
    T: std::str::FromStr<Err = std::num::ParseFloatError>,
{
    if !text.contains('_') {
        return text.parse().map_err(|e: std::num::ParseFloatError| e.to_string());
    }
    let bytes = text.as_bytes();
    let misplaced = bytes.iter().enumerate().any(|(i, &b)| {
        b == b'_'
            && !(i > 0
                && bytes[i - 1].is_ascii_digit()
                && bytes.get(i + 1).is_some_and(u8::is_ascii_digit))
    });
    if misplaced {
        return Err(format!("misplaced '_' in '{text}'"));
    }
    text.replace('_', "")
        .parse()
        .map_err(|e: std::num::ParseFloatError| e.to_string())
}

fn split_radix(text: &str) -> (u32, bool, &str) {
    const PREFIXES: [(&str, u32); 6] = [
        ("0x", 16),
        ("0X", 16),
        ("0o", 8),
        ("0O", 8),
        ("0b", 2),
        ("0B", 2),
    ];
    for (prefix, radix) in PREFIXES {
        if let Some(rest) = text.strip_prefix(prefix) {
            return (radix, true, rest);
        }
    }
    if text.len() > 1 && text.starts_with('0') {
        return (8, true, &text[1..]);
    }
    (10, false, text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_decimal_and_prefixed_integers() {
        assert_eq!(i32::from_leaf("-4711"), Ok(-4711));
        assert_eq!(i32::from_leaf("+12"), Ok(12));
        assert_eq!(u32::from_leaf("0x1F"), Ok(31));
        assert_eq!(u32::from_leaf("0o17"), Ok(15));
        assert_eq!(u32::from_leaf("017"), Ok(15));
        assert_eq!(u8::from_leaf("0b101"), Ok(5));
        assert_eq!(u64::from_leaf("1_000_000"), Ok(1_000_000));
        assert_eq!(i64::from_leaf("0"), Ok(0));
    }

    #[test]
    fn honors_bit_width() {
        assert_eq!(i8::from_leaf("-128"), Ok(-128));
        assert!(i8::from_leaf("128").is_err());
        assert!(u8::from_leaf("256").is_err());
        assert_eq!(i64::from_leaf("-9223372036854775808"), Ok(i64::MIN));
    }

    #[test]
    fn unsigned_rejects_sign() {
        assert!(u32::from_leaf("-1").is_err());
        assert!(u32::from_leaf("+1").is_err());
    }

    #[test]
    fn rejects_bad_underscores_and_digits() {
        assert!(i32::from_leaf("_1").is_err());
        assert!(i32::from_leaf("1__0").is_err());
        assert!(i32::from_leaf("10_").is_err());
        assert!(i32::from_leaf("08").is_err());
        assert!(i32::from_leaf("0x").is_err());
        assert!(i32::from_leaf("12abc").is_err());
        assert_eq!(u32::from_leaf("0x_ff"), Ok(255));
    }

    #[test]
    fn rejects_sign_hidden_behind_underscore() {
        assert!(u32::from_leaf("0_+5").is_err());
        assert!(u32::from_leaf("0x_+f").is_err());
        assert!(i32::from_leaf("0_+5").is_err());
        assert!(i32::from_leaf("-0x_-f").is_err());
        assert_eq!(i32::from_leaf("-0x_f"), Ok(-15));
    }

    #[test]
    fn parses_floats() {
        assert_eq!(f64::from_leaf("42.0"), Ok(42.0));
        assert_eq!(f32::from_leaf("-1.5e2"), Ok(-150.0));
        assert!(f64::from_leaf("forty-two").is_err());
    }

    #[test]
    fn floats_allow_underscores_between_digits() {
        assert_eq!(f64::from_leaf("1_000.5"), Ok(1000.5));
        assert_eq!(f64::from_leaf("1e1_0"), Ok(1e10));
        for bad in ["_1.0", "1_.5", "1._5", "1__0.0", "1.0_"] {
            assert!(f64::from_leaf(bad).is_err(), "{bad} should be rejected");
        }
        assert!(f64::from_leaf("0x1p-2").is_err());
    }

    #[test]
    fn decode_field_skips_empty_and_reports_key() {
        let mut bc = Bconf::new();
        bc.add_value(&["n"], "").unwrap();
        bc.add_value(&["bad"], "x1").unwrap();

        let mut n = 7_i32;
        decode_field(&bc, "n", &mut n).unwrap();
        decode_field(&bc, "missing", &mut n).unwrap();
        assert_eq!(n, 7);

        let err = decode_field(&bc, "bad", &mut n).unwrap_err();
        assert!(matches!(err, BconfError::Decode { ref key, ref value, .. } if key == "bad" && value == "x1"));
    }
}
