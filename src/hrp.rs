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

//! Rules for the human-readable part.

use std::fmt;

use crate::error::impl_std_error;

/// Longest HRP that still leaves room for the separator and a checksum.
pub const MAX_HRP_LENGTH: usize = 83;

/// Checks that `hrp` is a non-empty string of US-ASCII characters in the
/// range 33 to 126 inclusive, at most [`MAX_HRP_LENGTH`] long.
///
/// Both cases are accepted; the checksum is always computed over the lower
/// case form.
pub fn validate(hrp: &str) -> Result<(), Error> {
    if hrp.is_empty() {
        return Err(Error::Empty);
    }
    for c in hrp.chars() {
        if !c.is_ascii() {
            return Err(Error::NonAsciiChar(c));
        }
        let b = c as u8;
        if b < 33 || b > 126 {
            return Err(Error::InvalidAsciiByte(b));
        }
    }
    if hrp.len() > MAX_HRP_LENGTH {
        return Err(Error::TooLong(hrp.len()));
    }
    Ok(())
}

/// Errors in the human-readable part.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// The human-readable part is empty.
    Empty,
    /// The human-readable part is longer than [`MAX_HRP_LENGTH`].
    TooLong(usize),
    /// Found a non-ASCII character.
    NonAsciiChar(char),
    /// Byte value not within acceptable US-ASCII range.
    InvalidAsciiByte(u8),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::Empty => write!(f, "human-readable part is empty"),
            Error::TooLong(len) => write!(
                f,
                "human-readable part is {} characters, the maximum is {}",
                len, MAX_HRP_LENGTH
            ),
            Error::NonAsciiChar(c) => write!(f, "found non-ASCII character: {:?}", c),
            Error::InvalidAsciiByte(b) => write!(f, "byte value is not valid US-ASCII: 0x{:02x}", b),
        }
    }
}

impl_std_error!(Error);
