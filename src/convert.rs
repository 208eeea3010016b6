// SegWit Address Library
// Written by
//   The segwit-addr developers
//
// To the extent possible under law, the author(s) have dedicated all
// copyright and related and neighboring rights to this software to
// the public domain worldwide. This software is distributed without
// any warranty.
//
// You should have received a copy of the CC0 Public Domain Dedication
// along with this software.
// If not, see <http://creativecommons.org/publicdomain/zero/1.0/>.
//

//! # Bit-Width Conversion
//!
//! Regrouping of a bit stream between word sizes, most significant bit
//! first. Witness programs travel as bytes and are written as 5-bit
//! symbols.
//!

use std::fmt;

use crate::charset::u5;
use crate::error::{impl_std_error, write_err};

/// Regroups `data`, a stream of `from`-bit words, into `to`-bit words.
///
/// With `pad` set, leftover bits are zero-filled into one final word.
/// Without it the leftover bits must be fewer than `from` and all zero,
/// otherwise the input was not produced by a padded conversion.
///
/// # Panics
///
/// If `from` or `to` is not in the range `1..=8`.
pub fn convert_bits(data: &[u8], from: u32, to: u32, pad: bool) -> Result<Vec<u8>, Error> {
    assert!((1..=8).contains(&from) && (1..=8).contains(&to), "word sizes must be 1 to 8 bits");

    let mut acc: u32 = 0;
    let mut bits: u32 = 0;
    let mut ret: Vec<u8> = Vec::with_capacity(data.len() * from as usize / to as usize + 1);
    let maxv: u32 = (1 << to) - 1;
    let max_acc: u32 = (1 << (from + to - 1)) - 1;
    for &value in data {
        let v = u32::from(value);
        if (v >> from) != 0 {
            return Err(Error::InvalidInputValue(value));
        }
        acc = ((acc << from) | v) & max_acc;
        bits += from;
        while bits >= to {
            bits -= to;
            // maxv is below 256
            ret.push(((acc >> bits) & maxv) as u8);
        }
    }
    if pad {
        if bits > 0 {
            ret.push(((acc << (to - bits)) & maxv) as u8);
        }
    } else if bits >= from {
        return Err(Error::InvalidPadding(PaddingError::TooMuch));
    } else if ((acc << (to - bits)) & maxv) != 0 {
        return Err(Error::InvalidPadding(PaddingError::NonZero));
    }
    Ok(ret)
}

/// Conversion of bytes to 5-bit symbols, zero padding the last one.
pub trait ToBase32 {
    /// Returns the padded base32 form of `self`.
    fn to_base32(&self) -> Vec<u5>;
}

impl<T: AsRef<[u8]>> ToBase32 for T {
    fn to_base32(&self) -> Vec<u5> {
        // Every byte fits 8 bits and padded conversion has no padding errors.
        convert_bits(self.as_ref(), 8, 5, true)
            .expect("8-bit input always fits")
            .into_iter()
            .map(u5::from_masked)
            .collect()
    }
}

/// Conversion of 5-bit symbols back to the bytes they encode.
pub trait FromBase32: Sized {
    /// The associated error which can be returned from parsing.
    type Err;

    /// Converts a base32 slice to `Self`, rejecting non-canonical padding.
    fn from_base32(b32: &[u5]) -> Result<Self, Self::Err>;
}

impl FromBase32 for Vec<u8> {
    type Err = Error;

    fn from_base32(b32: &[u5]) -> Result<Self, Self::Err> {
        let symbols: Vec<u8> = b32.iter().map(|fe| fe.to_u8()).collect();
        convert_bits(&symbols, 5, 8, false)
    }
}

/// Errors converting between word sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// An input value does not fit the declared input word size.
    InvalidInputValue(u8),
    /// The leftover bits of an unpadded conversion are invalid.
    InvalidPadding(PaddingError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::InvalidInputValue(v) => write!(f, "value {} does not fit the input word size", v),
            Error::InvalidPadding(ref e) => write_err!(f, "invalid padding"; e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match *self {
            Error::InvalidPadding(ref e) => Some(e),
            Error::InvalidInputValue(_) => None,
        }
    }
}

#[doc(hidden)]
impl From<PaddingError> for Error {
    fn from(e: PaddingError) -> Error { Error::InvalidPadding(e) }
}

/// Padding errors of an unpadded conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaddingError {
    /// A whole input word is left over.
    TooMuch,
    /// The leftover bits are not zero.
    NonZero,
}

impl fmt::Display for PaddingError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            PaddingError::TooMuch => f.write_str("more padding bits than an input word"),
            PaddingError::NonZero => f.write_str("non-zero padding bits"),
        }
    }
}

impl_std_error!(PaddingError);
