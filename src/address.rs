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

//! # Addresses
//!

use std::fmt;
use std::str::FromStr;

use bitcoin::{Script, ScriptBuf};

use crate::segwit::{AddressError, WitnessProgram};

/// The parameters to derive addresses.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AddressParams {
    /// The bech32 HRP for segwit addresses, in lower case.
    pub bech_hrp: &'static str,
}

impl AddressParams {
    /// The Bitcoin mainnet address parameters.
    pub const BITCOIN: AddressParams = AddressParams { bech_hrp: "bc" };

    /// The Bitcoin testnet and signet address parameters.
    pub const TESTNET: AddressParams = AddressParams { bech_hrp: "tb" };

    /// The default regtest address parameters.
    pub const REGTEST: AddressParams = AddressParams { bech_hrp: "bcrt" };
}

/// A segwit address.
///
/// Every address has a string form: the HRP of its parameters is valid and
/// leaves room for the program within the bech32 length limit.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address {
    params: &'static AddressParams,
    program: WitnessProgram,
}

impl Address {
    /// Creates an address paying to `program` on the given network.
    ///
    /// Fails when `params` carries an HRP that cannot encode `program`.
    pub fn new(
        program: WitnessProgram,
        params: &'static AddressParams,
    ) -> Result<Address, AddressError> {
        program.to_address(params.bech_hrp)?;
        Ok(Address { params, program })
    }

    /// Creates an address from a witness output script.
    pub fn from_script(
        script: &Script,
        params: &'static AddressParams,
    ) -> Result<Address, AddressError> {
        Address::new(WitnessProgram::from_script_pubkey(script)?, params)
    }

    /// The network parameters.
    pub fn params(&self) -> &'static AddressParams { self.params }

    /// The witness program.
    pub fn program(&self) -> &WitnessProgram { &self.program }

    /// Generates a script pubkey spending to this address.
    pub fn script_pubkey(&self) -> ScriptBuf { self.program.script_pubkey() }

    /// Parse the address using the given parameters.
    /// When using the built-in parameters, you can use [FromStr].
    pub fn parse_with_params(
        s: &str,
        params: &'static AddressParams,
    ) -> Result<Address, AddressError> {
        let program = WitnessProgram::from_address(params.bech_hrp, s)?;
        Ok(Address { params, program })
    }
}

impl fmt::Display for Address {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        // Constructors reject programs the HRP cannot encode
        self.program.write_address(fmt, self.params.bech_hrp).map_err(|_| fmt::Error)?
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result { fmt::Display::fmt(self, fmt) }
}

/// Extract the bech32 prefix.
/// Returns the same slice when no prefix is found.
fn find_prefix(bech32: &str) -> &str {
    // Split at the last occurrence of the separator character '1'.
    match bech32.rfind('1') {
        None => bech32,
        Some(sep) => bech32.split_at(sep).0,
    }
}

/// Checks if both prefixes match, regardless of case.
/// The first prefix can be mixed case, but the second one is expected in
/// lower case.
fn match_prefix(prefix_mixed: &str, prefix_lower: &str) -> bool {
    if prefix_lower.len() != prefix_mixed.len() {
        false
    } else {
        prefix_lower
            .chars()
            .zip(prefix_mixed.chars())
            .all(|(char_lower, char_mixed)| char_lower == char_mixed.to_ascii_lowercase())
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Address, AddressError> {
        let net_arr = [&AddressParams::BITCOIN, &AddressParams::TESTNET, &AddressParams::REGTEST];

        let prefix = find_prefix(s);
        for net in net_arr.iter() {
            if match_prefix(prefix, net.bech_hrp) {
                return Address::parse_with_params(s, net);
            }
        }

        Err(AddressError::UnknownHrp(prefix.to_owned()))
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Address {
    #[inline]
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use std::fmt::Formatter;

        struct Visitor;
        impl<'de> serde::de::Visitor<'de> for Visitor {
            type Value = Address;

            fn expecting(&self, formatter: &mut Formatter) -> fmt::Result {
                formatter.write_str("a segwit address")
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Address::from_str(v).map_err(E::custom)
            }

            fn visit_borrowed_str<E>(self, v: &'de str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                self.visit_str(v)
            }

            fn visit_string<E>(self, v: String) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                self.visit_str(&v)
            }
        }

        deserializer.deserialize_str(Visitor)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Address {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}
