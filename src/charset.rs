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

//! # Bech32 Alphabet
//!
//! The 32 character alphabet and the 5-bit values it encodes.
//!

use std::fmt;

/// Encoding character set. Maps data value -> char
pub const CHARSET: [char; 32] = [
    'q', 'p', 'z', 'r', 'y', '9', 'x', '8', 'g', 'f', '2', 't', 'v', 'd', 'w', '0', 's', '3', 'j',
    'n', '5', '4', 'k', 'h', 'c', 'e', '6', 'm', 'u', 'a', '7', 'l',
];

/// Reverse character set. Maps ASCII byte -> CHARSET index on [0,31]
///
/// Upper and lower case letters map to the same value.
pub const CHARSET_REV: [i8; 128] = [
    -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1,
    -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1,
    -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1,
    15, -1, 10, 17, 21, 20, 26, 30,  7,  5, -1, -1, -1, -1, -1, -1,
    -1, 29, -1, 24, 13, 25,  9,  8, 23, -1, 18, 22, 31, 27, 19, -1,
     1,  0,  3, 16, 11, 28, 12, 14,  6,  4,  2, -1, -1, -1, -1, -1,
    -1, 29, -1, 24, 13, 25,  9,  8, 23, -1, 18, 22, 31, 27, 19, -1,
     1,  0,  3, 16, 11, 28, 12, 14,  6,  4,  2, -1, -1, -1, -1, -1,
];

/// Integer in the range `0..32`, one symbol of a bech32 data part.
#[derive(PartialEq, Eq, Debug, Copy, Clone, Default, PartialOrd, Ord, Hash)]
#[allow(non_camel_case_types)]
pub struct u5(u8);

impl u5 {
    /// The zero value, written as `q`.
    pub const ZERO: u5 = u5(0);

    /// Converts a `u8` to `u5` if in range, `None` otherwise.
    pub fn try_from_u8(value: u8) -> Option<u5> {
        if value > 31 {
            None
        } else {
            Some(u5(value))
        }
    }

    /// Keeps the five low bits of `value`.
    pub(crate) const fn from_masked(value: u8) -> u5 { u5(value & 0x1f) }

    /// Returns a copy of the underlying `u8` value.
    pub fn to_u8(self) -> u8 { self.0 }

    /// Returns the alphabet character for this value, lower case.
    pub fn to_char(self) -> char { CHARSET[usize::from(self.0)] }

    /// Decodes an alphabet character, ignoring case.
    ///
    /// Returns `None` for anything outside the alphabet, including every
    /// non-ASCII character.
    pub fn from_char(c: char) -> Option<u5> {
        if !c.is_ascii() {
            return None;
        }
        // c < 128 since it is ASCII, CHARSET_REV covers the whole ASCII range.
        let num_value = CHARSET_REV[c as usize];
        if num_value < 0 {
            None
        } else {
            Some(u5(num_value as u8))
        }
    }
}

impl AsRef<u8> for u5 {
    fn as_ref(&self) -> &u8 { &self.0 }
}

impl From<u5> for u8 {
    fn from(v: u5) -> u8 { v.0 }
}

impl fmt::Display for u5 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}
