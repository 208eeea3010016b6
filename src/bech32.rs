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

//! # Bech32 Strings
//!
//! Encoding and decoding of checksummed bech32 and bech32m strings as
//! specified by [BIP-173] and [BIP-350].
//!
//! A bech32 string is at most 90 characters long and consists of:
//!
//! - The human-readable part, 1 to 83 US-ASCII characters in the range 33
//!   to 126.
//! - The separator, which is always "1". The HRP may itself contain "1", so
//!   the separator is the last one in the string.
//! - The data part, at least 6 characters long, drawn from the alphabet
//!   [`CHARSET`](crate::charset::CHARSET). Its last 6 characters are the
//!   checksum.
//!
//! The whole string must be either all lower case or all upper case.
//!
//! [BIP-173]: <https://github.com/bitcoin/bips/blob/master/bip-0173.mediawiki>
//! [BIP-350]: <https://github.com/bitcoin/bips/blob/master/bip-0350.mediawiki>

use std::fmt::{self, Write};

use crate::charset::u5;
use crate::checksum::{self, Variant, CHECKSUM_LENGTH};
use crate::error::write_err;
use crate::hrp;

/// Human-readable part and data part separator
pub const SEP: char = '1';

/// Maximum length of an encoded string.
pub const MAX_STRING_LENGTH: usize = 90;

/// Encode a bech32 payload to a [fmt::Write].
///
/// The HRP is written in lower case. The outer `Result` reports invalid
/// input, the inner one a failure of the writer.
pub fn encode_to_fmt<W: Write>(
    fmt: &mut W,
    hrp: &str,
    data: &[u5],
    variant: Variant,
) -> Result<fmt::Result, Error> {
    hrp::validate(hrp)?;
    let len = hrp.len() + 1 + data.len() + CHECKSUM_LENGTH;
    if len > MAX_STRING_LENGTH {
        return Err(Error::InvalidLength(len));
    }
    let checksum = checksum::create_checksum(hrp, data, variant)?;

    Ok(write_parts(fmt, hrp, data, &checksum))
}

fn write_parts<W: Write>(fmt: &mut W, hrp: &str, data: &[u5], checksum: &[u5]) -> fmt::Result {
    for b in hrp.bytes() {
        fmt.write_char(char::from(b.to_ascii_lowercase()))?;
    }
    fmt.write_char(SEP)?;
    for fe in data.iter().chain(checksum.iter()) {
        fmt.write_char(fe.to_char())?;
    }
    Ok(())
}

/// Encode a bech32 payload to a string.
///
/// Fails if the HRP is invalid or the result would be longer than
/// [`MAX_STRING_LENGTH`].
pub fn encode(hrp: &str, data: &[u5], variant: Variant) -> Result<String, Error> {
    let mut s = String::with_capacity(hrp.len() + 1 + data.len() + CHECKSUM_LENGTH);
    encode_to_fmt(&mut s, hrp, data, variant)?.expect("writing to string");
    Ok(s)
}

/// Decode a bech32 string into the HRP, the data symbols and the checksum
/// variant that matched.
///
/// The HRP is returned in lower case and the checksum is removed from the
/// data.
pub fn decode(s: &str) -> Result<(String, Vec<u5>, Variant), Error> {
    // Ensure overall length is within bounds
    let len = s.len();
    if len > MAX_STRING_LENGTH {
        return Err(Error::InvalidLength(len));
    }

    // Ensure no mixed case
    let has_lower = s.bytes().any(|b| b.is_ascii_lowercase());
    let has_upper = s.bytes().any(|b| b.is_ascii_uppercase());
    if has_lower && has_upper {
        return Err(Error::MixedCase);
    }

    // Split at the last separator
    let sep = s.rfind(SEP).ok_or(Error::MissingSeparator)?;
    if sep < 1 || len - sep - 1 < CHECKSUM_LENGTH {
        return Err(Error::InvalidSeparatorPosition(sep));
    }
    let (raw_hrp, raw_data) = s.split_at(sep);
    let raw_data = &raw_data[1..];

    for c in raw_hrp.chars() {
        if !c.is_ascii() || (c as u8) < 33 || (c as u8) > 126 {
            return Err(Error::InvalidChar(c));
        }
    }

    let mut data = raw_data
        .chars()
        .map(|c| u5::from_char(c).ok_or(Error::InvalidChar(c)))
        .collect::<Result<Vec<u5>, Error>>()?;

    // Ensure checksum
    let residue = checksum::residue(raw_hrp, &data)?;
    let variant = Variant::from_residue(residue).ok_or(Error::InvalidChecksum)?;

    // Remove checksum from data payload, every data char is ASCII so there
    // are at least CHECKSUM_LENGTH of them.
    data.truncate(data.len() - CHECKSUM_LENGTH);

    Ok((raw_hrp.to_ascii_lowercase(), data, variant))
}

/// Errors encoding or decoding a bech32 string.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// The human-readable part given to the encoder is invalid.
    InvalidHrp(hrp::Error),
    /// The string is, or would be, longer than [`MAX_STRING_LENGTH`].
    InvalidLength(usize),
    /// String does not contain the separator character.
    MissingSeparator,
    /// The separator leaves an empty HRP or no room for a checksum.
    InvalidSeparatorPosition(usize),
    /// Some part of the string contains an invalid character.
    InvalidChar(char),
    /// The whole string must be of one case.
    MixedCase,
    /// The checksum matches neither bech32 nor bech32m.
    InvalidChecksum,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::InvalidHrp(ref e) => write_err!(f, "invalid human-readable part"; e),
            Error::InvalidLength(len) => write!(
                f,
                "bech32 string is {} characters, the maximum is {}",
                len, MAX_STRING_LENGTH
            ),
            Error::MissingSeparator => write!(f, "missing human-readable separator, \"{}\"", SEP),
            Error::InvalidSeparatorPosition(pos) => {
                write!(f, "separator at position {} leaves no room for the hrp or checksum", pos)
            }
            Error::InvalidChar(c) => write!(f, "invalid character: {:?}", c),
            Error::MixedCase => write!(f, "mixed-case strings not allowed"),
            Error::InvalidChecksum => write!(f, "invalid checksum"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match *self {
            Error::InvalidHrp(ref e) => Some(e),
            Error::InvalidLength(_)
            | Error::MissingSeparator
            | Error::InvalidSeparatorPosition(_)
            | Error::InvalidChar(_)
            | Error::MixedCase
            | Error::InvalidChecksum => None,
        }
    }
}

#[doc(hidden)]
impl From<hrp::Error> for Error {
    fn from(e: hrp::Error) -> Error { Error::InvalidHrp(e) }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha20Rng;

    const VALID_BECH32: [&str; 7] = [
        "A12UEL5L",
        "a12uel5l",
        "an83characterlonghumanreadablepartthatcontainsthenumber1andtheexcludedcharactersbio1tt5tgs",
        "abcdef1qpzry9x8gf2tvdw0s3jn54khce6mua7lmqqqxw",
        "11qqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqc8247j",
        "split1checkupstagehandshakeupstreamerranterredcaperred2y9e3w",
        "?1ezyfcl",
    ];

    const VALID_BECH32M: [&str; 7] = [
        "A1LQFN3A",
        "a1lqfn3a",
        "an83characterlonghumanreadablepartthatcontainsthetheexcludedcharactersbioandnumber11sg7hg6",
        "abcdef1l7aum6echk45nj3s0wdvt2fg8x9yrzpqzd3ryx",
        "11llllllllllllllllllllllllllllllllllllllllllllllllllllllllllllllllllllllllllllllllllludsr8",
        "split1checkupstagehandshakeupstreamerranterredcaperredlc445v",
        "?1v759aa",
    ];

    fn fes(values: &[u8]) -> Vec<u5> {
        values.iter().map(|v| u5::try_from_u8(*v).unwrap()).collect()
    }

    #[test]
    fn valid_checksum() {
        for (strings, variant) in &[(VALID_BECH32, Variant::Bech32), (VALID_BECH32M, Variant::Bech32m)] {
            for s in strings.iter() {
                let (hrp, data, got) = decode(s).unwrap_or_else(|e| panic!("{}: {}", s, e));
                assert_eq!(got, *variant, "{}", s);
                assert_eq!(hrp, s[..s.rfind(SEP).unwrap()].to_lowercase());
                let recode = encode(&hrp, &data, *variant).unwrap();
                assert_eq!(recode, s.to_lowercase());
            }
        }
    }

    #[test]
    fn concrete_vectors() {
        let (hrp, data, variant) = decode("A12UEL5L").unwrap();
        assert_eq!((hrp.as_str(), data.len(), variant), ("a", 0, Variant::Bech32));
        assert_eq!(decode("a12uel5l").unwrap(), decode("A12UEL5L").unwrap());

        let (hrp, data, variant) = decode("?1ezyfcl").unwrap();
        assert_eq!((hrp.as_str(), data.len(), variant), ("?", 0, Variant::Bech32));

        let (hrp, data, variant) = decode(VALID_BECH32[4]).unwrap();
        assert_eq!(hrp, "1");
        assert_eq!(data, vec![u5::ZERO; 82]);
        assert_eq!(variant, Variant::Bech32);

        let (hrp, data, _) = decode("bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t4").unwrap();
        assert_eq!(hrp, "bc");
        assert_eq!(
            data,
            fes(&[
                0, 14, 20, 15, 7, 13, 26, 0, 25, 18, 6, 11, 13, 8, 21, 4, 20, 3, 17, 2, 29, 3, 12,
                29, 3, 4, 15, 24, 20, 6, 14, 30, 22,
            ])
        );
    }

    #[test]
    fn bip_173_invalid_fails() {
        let invalid: Vec<(&str, Error)> = vec!(
            ("\u{20}1nwldj5", Error::InvalidChar(' ')),
            ("\u{7F}1axkwrx", Error::InvalidChar('\u{7f}')),
            ("\u{80}1eym55h", Error::InvalidChar('\u{80}')),
            ("an84characterslonghumanreadablepartthatcontainsthenumber1andtheexcludedcharactersbio1569pvx",
             Error::InvalidLength(91)),
            ("pzry9x0s0muk", Error::MissingSeparator),
            ("1pzry9x0s0muk", Error::InvalidSeparatorPosition(0)),
            ("x1b4n0q5v", Error::InvalidChar('b')),
            ("li1dgmt3", Error::InvalidSeparatorPosition(2)),
            ("de1lg7wt\u{ff}", Error::InvalidChar('\u{ff}')),
            ("A1G7SGD8", Error::InvalidChecksum),
            ("10a06t8", Error::InvalidSeparatorPosition(0)),
            ("1qzzfhee", Error::InvalidSeparatorPosition(0)),
        );

        for (s, want) in invalid {
            assert_eq!(decode(s).unwrap_err(), want, "{:?}", s);
        }
    }

    #[test]
    fn bip_350_invalid_fails() {
        let invalid: Vec<(&str, Error)> = vec!(
            ("\u{20}1xj0phk", Error::InvalidChar(' ')),
            ("\u{7F}1g6xzxy", Error::InvalidChar('\u{7f}')),
            ("\u{80}1vctc34", Error::InvalidChar('\u{80}')),
            ("an84characterslonghumanreadablepartthatcontainsthetheexcludedcharactersbioandnumber11d6pts4",
             Error::InvalidLength(91)),
            ("qyrz8wqd2c9m", Error::MissingSeparator),
            ("1qyrz8wqd2c9m", Error::InvalidSeparatorPosition(0)),
            ("y1b0jsk6g", Error::InvalidChar('b')),
            ("lt1igcx5c0", Error::InvalidChar('i')),
            ("in1muywd", Error::InvalidSeparatorPosition(2)),
            ("mm1crxm3i", Error::InvalidChar('i')),
            ("au1s5cgom", Error::InvalidChar('o')),
            ("M1VUXWEZ", Error::InvalidChecksum),
            ("16plkw9", Error::InvalidSeparatorPosition(0)),
            ("1p2gdwpf", Error::InvalidSeparatorPosition(0)),
        );

        for (s, want) in invalid {
            assert_eq!(decode(s).unwrap_err(), want, "{:?}", s);
        }
    }

    #[test]
    fn too_long_fails_regardless_of_content() {
        let s = "a".repeat(MAX_STRING_LENGTH + 1);
        assert_eq!(decode(&s), Err(Error::InvalidLength(91)));
        let s = format!("{}0", VALID_BECH32[4]);
        assert_eq!(decode(&s), Err(Error::InvalidLength(91)));
    }

    #[test]
    fn mixed_case_fails() {
        assert_eq!(decode("A12uel5l"), Err(Error::MixedCase));
        assert_eq!(decode("a12UEL5L"), Err(Error::MixedCase));
        assert_eq!(decode("abcdef1Qpzry9x8gf2tvdw0s3jn54khce6mua7lmqqqxw"), Err(Error::MixedCase));
    }

    #[test]
    fn encode_errors() {
        assert_eq!(encode("", &[], Variant::Bech32), Err(Error::InvalidHrp(hrp::Error::Empty)));
        assert_eq!(
            encode("b c", &[], Variant::Bech32),
            Err(Error::InvalidHrp(hrp::Error::InvalidAsciiByte(b' ')))
        );
        assert_eq!(
            encode("a", &[u5::ZERO; 83], Variant::Bech32m),
            Err(Error::InvalidLength(91))
        );
        assert!(encode("a", &[u5::ZERO; 82], Variant::Bech32m).is_ok());

        let long_hrp = "a".repeat(83);
        assert_eq!(encode(&long_hrp, &[], Variant::Bech32).unwrap().len(), MAX_STRING_LENGTH);
        let long_hrp = "a".repeat(84);
        assert_eq!(
            encode(&long_hrp, &[], Variant::Bech32),
            Err(Error::InvalidHrp(hrp::Error::TooLong(84)))
        );
    }

    #[test]
    fn encode_lowercases_hrp() {
        assert_eq!(encode("BC", &[], Variant::Bech32m).unwrap(), "bc1a8xfp7");
        assert_eq!(encode("bc", &[], Variant::Bech32m).unwrap(), "bc1a8xfp7");
        assert_eq!(
            encode("test", &fes(&[0, 1, 2, 3, 31, 30]), Variant::Bech32).unwrap(),
            "test1qpzrl706wnj2"
        );
    }

    #[test]
    fn encode_to_fmt_matches_encode() {
        let data = fes(&[3, 1, 4, 1, 5, 9, 2, 6]);
        let mut s = String::from("prefix:");
        encode_to_fmt(&mut s, "pi", &data, Variant::Bech32m).unwrap().unwrap();
        assert_eq!(s, format!("prefix:{}", encode("pi", &data, Variant::Bech32m).unwrap()));
    }

    #[test]
    fn single_substitution_detected() {
        for s in VALID_BECH32.iter().chain(VALID_BECH32M.iter()) {
            let s = s.to_lowercase();
            let sep = s.rfind(SEP).unwrap();
            for pos in 0..s.len() {
                if pos == sep {
                    continue;
                }
                let replacements: Vec<char> = if pos < sep {
                    ('a'..='z').chain('0'..='9').collect()
                } else {
                    crate::charset::CHARSET.to_vec()
                };
                for c in replacements {
                    if s[pos..].starts_with(c) {
                        continue;
                    }
                    let mut corrupt = s.clone();
                    corrupt.replace_range(pos..=pos, c.encode_utf8(&mut [0; 4]));
                    assert!(decode(&corrupt).is_err(), "{} -> {} decoded", s, corrupt);
                }
            }
        }
    }

    #[test]
    fn random_round_trip() {
        let mut rng = ChaCha20Rng::seed_from_u64(173);
        for _ in 0..500 {
            let hrp_len = rng.gen_range(1..=20);
            let hrp: String = (0..hrp_len).map(|_| char::from(rng.gen_range(33u8..=126))).collect();
            let hrp = hrp.to_ascii_lowercase();
            let data_len = rng.gen_range(0..=(MAX_STRING_LENGTH - hrp_len - 1 - CHECKSUM_LENGTH));
            let data: Vec<u5> = (0..data_len).map(|_| u5::try_from_u8(rng.gen_range(0..32)).unwrap()).collect();
            let variant = if rng.gen() { Variant::Bech32 } else { Variant::Bech32m };

            let s = encode(&hrp, &data, variant).unwrap();
            assert_eq!(decode(&s).unwrap(), (hrp.clone(), data.clone(), variant));
            assert_eq!(decode(&s.to_uppercase()).unwrap(), (hrp, data, variant));
        }
    }

    #[test]
    fn error_display() {
        assert_eq!(Error::MixedCase.to_string(), "mixed-case strings not allowed");
        assert_eq!(Error::InvalidChar('b').to_string(), "invalid character: 'b'");
        let e = Error::InvalidHrp(hrp::Error::Empty);
        assert_eq!(e.to_string(), "invalid human-readable part");
        assert_eq!(
            std::error::Error::source(&e).map(ToString::to_string),
            Some("human-readable part is empty".to_owned())
        );
    }
}
