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

//! # Segregated Witness Addresses
//!
//! A witness address is a bech32 string whose first data symbol is the
//! witness version and whose remaining symbols are the witness program,
//! converted from bytes. Version 0 programs are checksummed with
//! [`Variant::Bech32`], every later version with [`Variant::Bech32m`].
//!

use std::convert::TryFrom;
use std::fmt;

use bitcoin::opcodes::all::{OP_PUSHBYTES_0, OP_PUSHNUM_1, OP_PUSHNUM_16};
use bitcoin::script::{self, PushBytes};
use bitcoin::{Script, ScriptBuf};

use crate::bech32;
use crate::charset::u5;
use crate::checksum::Variant;
use crate::convert::{self, FromBase32, ToBase32};
use crate::error::write_err;

/// Highest witness version.
pub const MAX_WITNESS_VERSION: u8 = 16;

/// Shortest witness program.
pub const MIN_PROGRAM_LENGTH: usize = 2;

/// Longest witness program.
pub const MAX_PROGRAM_LENGTH: usize = 40;

/// Version 0 program length of a P2WPKH output.
pub const V0_P2WPKH_LENGTH: usize = 20;

/// Version 0 program length of a P2WSH output.
pub const V0_P2WSH_LENGTH: usize = 32;

/// Encodes a witness version and program as an address under `hrp`.
pub fn encode(hrp: &str, version: u8, program: &[u8]) -> Result<String, AddressError> {
    WitnessProgram::new(version, program.to_vec())?.to_address(hrp)
}

/// Decodes an address expected to carry `hrp` into its witness version and
/// program.
pub fn decode(hrp: &str, address: &str) -> Result<(u8, Vec<u8>), AddressError> {
    let prog = WitnessProgram::from_address(hrp, address)?;
    Ok((prog.version(), prog.into_program()))
}

/// A witness version together with a program that is valid for it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WitnessProgram {
    version: u5,
    program: Vec<u8>,
}

impl WitnessProgram {
    /// Creates a witness program, checking the version and the length rules.
    pub fn new(version: u8, program: Vec<u8>) -> Result<WitnessProgram, AddressError> {
        let version = u5::try_from_u8(version)
            .filter(|v| v.to_u8() <= MAX_WITNESS_VERSION)
            .ok_or(AddressError::InvalidWitnessVersion(version))?;

        if version.to_u8() == 0 && program.len() != V0_P2WPKH_LENGTH && program.len() != V0_P2WSH_LENGTH {
            return Err(AddressError::InvalidSegwitV0ProgramLength(program.len()));
        }
        if program.len() < MIN_PROGRAM_LENGTH || program.len() > MAX_PROGRAM_LENGTH {
            return Err(AddressError::InvalidWitnessProgramLength(program.len()));
        }

        Ok(WitnessProgram { version, program })
    }

    /// The witness version, 0 to 16.
    pub fn version(&self) -> u8 { self.version.to_u8() }

    /// The witness program.
    pub fn program(&self) -> &[u8] { &self.program }

    /// Consumes `self`, returning the witness program.
    pub fn into_program(self) -> Vec<u8> { self.program }

    /// The checksum variant an address of this version must use.
    pub fn variant(&self) -> Variant {
        if self.version.to_u8() == 0 {
            Variant::Bech32
        } else {
            Variant::Bech32m
        }
    }

    /// Encodes the program as an address under `hrp`.
    pub fn to_address(&self, hrp: &str) -> Result<String, AddressError> {
        Ok(bech32::encode(hrp, &self.to_base32(), self.variant())?)
    }

    /// Writes the address under `hrp` to a [fmt::Write].
    ///
    /// As with [`bech32::encode_to_fmt`], the outer `Result` reports invalid
    /// input and the inner one a failure of the writer.
    pub fn write_address<W: fmt::Write>(
        &self,
        fmt: &mut W,
        hrp: &str,
    ) -> Result<fmt::Result, AddressError> {
        Ok(bech32::encode_to_fmt(fmt, hrp, &self.to_base32(), self.variant())?)
    }

    /// Decodes an address, which must carry the HRP `hrp` in either case.
    pub fn from_address(hrp: &str, address: &str) -> Result<WitnessProgram, AddressError> {
        let (found, data, variant) = bech32::decode(address)?;
        let expected = hrp.to_ascii_lowercase();
        if found != expected {
            return Err(AddressError::HrpMismatch { expected, found });
        }
        WitnessProgram::from_base32(&data, variant)
    }

    /// Checks a decoded data part against the witness rules.
    ///
    /// The checks run in a fixed order: version, padding, program length,
    /// version 0 program length, then the checksum variant.
    pub(crate) fn from_base32(data: &[u5], variant: Variant) -> Result<WitnessProgram, AddressError> {
        let (&version, rest) = data.split_first().ok_or(AddressError::MissingWitnessVersion)?;
        if version.to_u8() > MAX_WITNESS_VERSION {
            return Err(AddressError::InvalidWitnessVersion(version.to_u8()));
        }

        let program = Vec::<u8>::from_base32(rest)?;
        if program.len() < MIN_PROGRAM_LENGTH || program.len() > MAX_PROGRAM_LENGTH {
            return Err(AddressError::InvalidWitnessProgramLength(program.len()));
        }
        if version.to_u8() == 0 && program.len() != V0_P2WPKH_LENGTH && program.len() != V0_P2WSH_LENGTH {
            return Err(AddressError::InvalidSegwitV0ProgramLength(program.len()));
        }

        let prog = WitnessProgram { version, program };
        match (prog.variant(), variant) {
            (Variant::Bech32, Variant::Bech32m) => Err(AddressError::InvalidSegwitV0Encoding),
            (Variant::Bech32m, Variant::Bech32) => Err(AddressError::InvalidWitnessEncoding),
            _ => Ok(prog),
        }
    }

    /// The data part of the address: the version followed by the program
    /// as 5-bit symbols.
    fn to_base32(&self) -> Vec<u5> {
        let mut data = Vec::with_capacity(1 + (self.program.len() * 8 + 4) / 5);
        data.push(self.version);
        data.extend(self.program.to_base32());
        data
    }

    /// The output script paying to this program: the version opcode then a
    /// single push of the program.
    pub fn script_pubkey(&self) -> ScriptBuf {
        let program = <&PushBytes>::try_from(self.program.as_slice())
            .expect("witness programs are at most 40 bytes");
        script::Builder::new()
            .push_int(i64::from(self.version.to_u8()))
            .push_slice(program)
            .into_script()
    }

    /// Parses a witness output script.
    pub fn from_script_pubkey(script: &Script) -> Result<WitnessProgram, AddressError> {
        let bytes = script.as_bytes();
        if bytes.len() < 2 + MIN_PROGRAM_LENGTH || bytes.len() > 2 + MAX_PROGRAM_LENGTH {
            return Err(AddressError::InvalidScriptPubKey);
        }
        let version = match bytes[0] {
            op if op == OP_PUSHBYTES_0.to_u8() => 0,
            op if op >= OP_PUSHNUM_1.to_u8() && op <= OP_PUSHNUM_16.to_u8() => {
                op - OP_PUSHNUM_1.to_u8() + 1
            }
            _ => return Err(AddressError::InvalidScriptPubKey),
        };
        if usize::from(bytes[1]) != bytes.len() - 2 {
            return Err(AddressError::InvalidScriptPubKey);
        }
        WitnessProgram::new(version, bytes[2..].to_vec())
    }
}

/// Address error
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AddressError {
    /// Bech32 encoding error
    Bech32(bech32::Error),
    /// The witness program symbols do not convert back to bytes.
    Conversion(convert::Error),
    /// The address carries a different human-readable part.
    HrpMismatch {
        /// The HRP that was asked for, in lower case.
        expected: String,
        /// The HRP found in the address, in lower case.
        found: String,
    },
    /// The data part is empty.
    MissingWitnessVersion,
    /// Script version must be 0 to 16 inclusive
    InvalidWitnessVersion(u8),
    /// The witness program must be between 2 and 40 bytes in length.
    InvalidWitnessProgramLength(usize),
    /// A v0 witness program must be either of length 20 or 32.
    InvalidSegwitV0ProgramLength(usize),
    /// A v1+ witness program must use bech32m not bech32
    InvalidWitnessEncoding,
    /// A v0 witness program must use bech32 not bech32m
    InvalidSegwitV0Encoding,
    /// The script is not a witness output.
    InvalidScriptPubKey,
    /// No known network uses the address prefix.
    UnknownHrp(String),
}

impl fmt::Display for AddressError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            AddressError::Bech32(ref e) => write_err!(f, "bech32 error"; e),
            AddressError::Conversion(ref e) => write_err!(f, "invalid witness program encoding"; e),
            AddressError::HrpMismatch { ref expected, ref found } => {
                write!(f, "expected human-readable part {:?}, found {:?}", expected, found)
            }
            AddressError::MissingWitnessVersion => write!(f, "missing witness version"),
            AddressError::InvalidWitnessVersion(ref wver) => {
                write!(f, "invalid witness script version: {}", wver)
            }
            AddressError::InvalidWitnessProgramLength(ref len) => {
                write!(f, "the witness program must be between 2 and 40 bytes in length, not {}", len)
            }
            AddressError::InvalidSegwitV0ProgramLength(ref len) => {
                write!(f, "a v0 witness program must be length 20 or 32, not {}", len)
            }
            AddressError::InvalidWitnessEncoding => {
                write!(f, "v1+ witness program must use bech32m not bech32")
            }
            AddressError::InvalidSegwitV0Encoding => {
                write!(f, "v0 witness program must use bech32 not bech32m")
            }
            AddressError::InvalidScriptPubKey => write!(f, "script is not a witness output"),
            AddressError::UnknownHrp(ref hrp) => write!(f, "unknown address prefix: {:?}", hrp),
        }
    }
}

impl std::error::Error for AddressError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match *self {
            AddressError::Bech32(ref e) => Some(e),
            AddressError::Conversion(ref e) => Some(e),
            _ => None,
        }
    }
}

#[doc(hidden)]
impl From<bech32::Error> for AddressError {
    fn from(e: bech32::Error) -> AddressError { AddressError::Bech32(e) }
}

#[doc(hidden)]
impl From<convert::Error> for AddressError {
    fn from(e: convert::Error) -> AddressError { AddressError::Conversion(e) }
}
