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

//! # Bech32 Checksum
//!
//! The BCH code over GF(32) shared by bech32 and bech32m. The two variants
//! differ only in the constant the final residue is compared against.
//!

use std::fmt;

use crate::charset::u5;
use crate::hrp;

/// Number of symbols in a checksum.
pub const CHECKSUM_LENGTH: usize = 6;

/// Residue of a valid bech32 string.
const BECH32_CONST: u32 = 1;

/// Residue of a valid bech32m string.
const BECH32M_CONST: u32 = 0x2bc8_30a3;

/// Generator coefficients
const GEN: [u32; 5] = [0x3b6a_57b2, 0x2650_8e6d, 0x1ea1_19fa, 0x3d42_33dd, 0x2a14_62b3];

/// The checksum variant used to encode a string.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Variant {
    /// The original bech32 checksum of BIP-173, used for witness version 0.
    Bech32,
    /// The bech32m checksum of BIP-350, used for witness versions 1 to 16.
    Bech32m,
}

impl Variant {
    /// The constant a valid checksum of this variant leaves as residue.
    pub const fn constant(self) -> u32 {
        match self {
            Variant::Bech32 => BECH32_CONST,
            Variant::Bech32m => BECH32M_CONST,
        }
    }

    /// Returns the variant whose constant equals `residue`, if any.
    pub fn from_residue(residue: u32) -> Option<Variant> {
        match residue {
            BECH32_CONST => Some(Variant::Bech32),
            BECH32M_CONST => Some(Variant::Bech32m),
            _ => None,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Variant::Bech32 => "bech32",
            Variant::Bech32m => "bech32m",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { f.write_str(self.as_str()) }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Variant {
    fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(self.as_str())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Variant {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        struct Visitor;
        impl<'de> serde::de::Visitor<'de> for Visitor {
            type Value = Variant;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("\"bech32\" or \"bech32m\"")
            }

            fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<Variant, E> {
                match v {
                    "bech32" => Ok(Variant::Bech32),
                    "bech32m" => Ok(Variant::Bech32m),
                    _ => Err(E::invalid_value(serde::de::Unexpected::Str(v), &self)),
                }
            }
        }

        d.deserialize_str(Visitor)
    }
}

/// Multiplies the packed polynomial `pre` by `x`, modulo the generator.
///
/// The caller xors the next input symbol into the five low bits of the
/// result.
#[inline]
pub fn polymod_step(pre: u32) -> u32 {
    let b = (pre >> 25) as u8;
    let mut chk = (pre & 0x1ff_ffff) << 5;
    for (i, gen) in GEN.iter().enumerate() {
        if (b >> i) & 1 == 1 {
            chk ^= gen;
        }
    }
    chk
}

/// Streaming checksum computation.
///
/// Symbols are fed in the order the checksum covers them: the expanded HRP,
/// then the data part, then either the six checksum symbols (to verify) or
/// six zeros (to create one).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Engine {
    residue: u32,
}

impl Default for Engine {
    fn default() -> Self { Engine::new() }
}

impl Engine {
    /// Creates an engine in its initial state.
    pub fn new() -> Engine { Engine { residue: 1 } }

    /// Feeds the expanded HRP: the high bits of each character, a zero, then
    /// the low bits of each character. Upper case is folded to lower case.
    ///
    /// The HRP is not validated here, see [`hrp::validate`].
    pub fn input_hrp(&mut self, hrp: &str) {
        for b in hrp.bytes() {
            self.input_u8(b.to_ascii_lowercase() >> 5);
        }
        self.residue = polymod_step(self.residue);
        for b in hrp.bytes() {
            self.input_u8(b.to_ascii_lowercase() & 0x1f);
        }
    }

    /// Feeds a single data symbol.
    #[inline]
    pub fn input_fe(&mut self, fe: u5) { self.input_u8(fe.to_u8()); }

    /// Feeds one zero symbol per checksum position.
    pub fn input_checksum_padding(&mut self) {
        for _ in 0..CHECKSUM_LENGTH {
            self.residue = polymod_step(self.residue);
        }
    }

    /// The current residue.
    #[inline]
    pub fn residue(&self) -> u32 { self.residue }

    #[inline]
    fn input_u8(&mut self, v: u8) { self.residue = polymod_step(self.residue) ^ u32::from(v); }
}

/// Computes the 30-bit checksum of `data` under `hrp` for `variant`.
pub fn checksum(hrp: &str, data: &[u5], variant: Variant) -> Result<u32, hrp::Error> {
    hrp::validate(hrp)?;
    let mut engine = Engine::new();
    engine.input_hrp(hrp);
    for fe in data {
        engine.input_fe(*fe);
    }
    engine.input_checksum_padding();
    Ok(engine.residue() ^ variant.constant())
}

/// Computes the checksum symbols to append to `data`, most significant first.
pub fn create_checksum(
    hrp: &str,
    data: &[u5],
    variant: Variant,
) -> Result<[u5; CHECKSUM_LENGTH], hrp::Error> {
    let plm = checksum(hrp, data, variant)?;
    let mut ret = [u5::ZERO; CHECKSUM_LENGTH];
    for (p, fe) in ret.iter_mut().enumerate() {
        *fe = u5::from_masked((plm >> (5 * (CHECKSUM_LENGTH - 1 - p))) as u8);
    }
    Ok(ret)
}

/// Residue of `hrp` followed by `data`, where `data` ends in its checksum.
pub fn residue(hrp: &str, data: &[u5]) -> Result<u32, hrp::Error> {
    hrp::validate(hrp)?;
    let mut engine = Engine::new();
    engine.input_hrp(hrp);
    for fe in data {
        engine.input_fe(*fe);
    }
    Ok(engine.residue())
}

/// Checks that `data`, which ends in its checksum, is valid for `variant`.
pub fn verify(hrp: &str, data: &[u5], variant: Variant) -> bool {
    residue(hrp, data).map_or(false, |r| r == variant.constant())
}
