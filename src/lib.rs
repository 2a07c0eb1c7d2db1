// -*- mode: rust; -*-
//
// This file is part of curve25519-oxide.
// See LICENSE for licensing information.

//! # curve25519-oxide
//!
//! A pure-Rust implementation of the group operations on the Edwards
//! and Montgomery forms of Curve25519, and of the protocols built
//! directly on them:
//!
//! * ed25519 signatures per [RFC 8032], with [ZIP215] verification
//!   semantics;
//! * X25519 Diffie-Hellman key exchange per [RFC 7748];
//! * the [Ristretto255] prime-order group.
//!
//! Field arithmetic uses five 51-bit limbs with 128-bit products;
//! scalar arithmetic mod the group order uses five 52-bit limbs with
//! Montgomery reduction.  All operations on secret material are
//! constant-time: no secret-dependent branches and no secret-indexed
//! table lookups.  Variable-time shortcuts exist only where every
//! input is public (signature verification).
//!
//! Out of scope, deliberately: defenses against physical side channels
//! (power, EM, fault injection), batch verification, zeroing of secret
//! buffers on drop, and curves other than Curve25519.
//!
//! [RFC 8032]: https://tools.ietf.org/html/rfc8032
//! [RFC 7748]: https://tools.ietf.org/html/rfc7748
//! [ZIP215]: https://zips.z.cash/zip-0215
//! [Ristretto255]: https://ristretto.group/

#![deny(missing_docs)]
#![allow(clippy::needless_range_loop)]

#[macro_use]
mod macros;

mod curve_models;
mod field;

pub mod constants;
pub mod edwards;
pub mod errors;
pub mod montgomery;
pub mod ristretto;
pub mod scalar;
pub mod traits;
pub mod window;

pub mod signature;
pub mod signing;
pub mod verifying;
pub mod x25519;

/// The length of an ed25519 secret key (seed), in bytes.
pub const SECRET_KEY_LENGTH: usize = 32;

/// The length of an ed25519 public key, in bytes.
pub const PUBLIC_KEY_LENGTH: usize = 32;

/// The length of an ed25519 signature, in bytes.
pub const SIGNATURE_LENGTH: usize = 64;

/// The length of the `seed ‖ public-key` keypair form, in bytes.
pub const KEYPAIR_LENGTH: usize = SECRET_KEY_LENGTH + PUBLIC_KEY_LENGTH;

pub use crate::edwards::{AffinePoint, CompressedEdwardsY, EdwardsPoint};
pub use crate::errors::Error;
pub use crate::montgomery::MontgomeryPoint;
pub use crate::ristretto::{CompressedRistretto, RistrettoPoint};
pub use crate::scalar::{clamp_integer, Scalar};
pub use crate::signature::Signature;
pub use crate::signing::{SecretKey, SigningKey};
pub use crate::traits::{Identity, IsIdentity};
pub use crate::verifying::VerifyingKey;
pub use crate::window::PrecomputedTable;
