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

//! # SegWit Address Library
//!
//! Encoding and decoding of bech32 and bech32m strings ([BIP-173],
//! [BIP-350]) and of the segregated witness addresses built on them.
//!
//! ```
//! use segwit_addr::segwit;
//!
//! let program = [0x75, 0x1e];
//! let address = segwit::encode("bc", 16, &program).unwrap();
//! assert_eq!(address, "bc1sw50qgdz25j");
//! assert_eq!(segwit::decode("bc", "BC1SW50QGDZ25J").unwrap(), (16, program.to_vec()));
//! ```
//!
//! [BIP-173]: <https://github.com/bitcoin/bips/blob/master/bip-0173.mediawiki>
//! [BIP-350]: <https://github.com/bitcoin/bips/blob/master/bip-0350.mediawiki>
//!

// Coding conventions
#![deny(non_upper_case_globals)]
#![deny(non_camel_case_types)]
#![deny(non_snake_case)]
#![deny(unused_mut)]
#![deny(missing_docs)]

#[cfg(feature = "serde")]
extern crate actual_serde as serde;

mod error;

pub mod address;
pub mod bech32;
pub mod charset;
pub mod checksum;
pub mod convert;
pub mod hrp;
pub mod segwit;

pub use crate::address::{Address, AddressParams};
pub use crate::charset::u5;
pub use crate::checksum::Variant;
pub use crate::convert::{FromBase32, ToBase32};
pub use crate::segwit::{AddressError, WitnessProgram};
