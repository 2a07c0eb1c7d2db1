// -*- mode: rust; -*-
//
// This file is part of curve25519-oxide.
// See LICENSE for licensing information.

//! Errors which may occur while decoding wire formats or operating on
//! the curve.

use core::fmt;
use core::fmt::Display;

/// Errors raised by this crate.
///
/// Every failure condition maps to exactly one of these kinds, and the
/// kinds are never conflated: a caller can distinguish a point that is
/// not on the curve from a signature whose scalar is out of range, which
/// matters when error reactions are observable.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Error {
    /// A byte slice had a length other than the one the type requires.
    InvalidLength {
        /// Name of the type being decoded.
        name: &'static str,
        /// The length in bytes the type requires.
        expected: usize,
    },
    /// A compressed Edwards point failed to decompress.
    InvalidPoint,
    /// A signature was structurally malformed: its scalar half was not
    /// a canonical scalar below the group order.
    InvalidSignature,
    /// A 32-byte string was not the canonical encoding of a Ristretto
    /// point.
    InvalidEncoding,
    /// An X25519 exchange produced the all-zero shared secret, meaning
    /// the peer supplied a small-order public key.
    InvalidSharedSecret,
    /// A scalar was outside the range its context requires.
    ScalarOutOfRange,
    /// A precomputation window width other than 2, 4, 8, or 16 was
    /// requested.
    InvalidWindow,
    /// An inversion of zero was requested.
    NonInvertible,
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Error::InvalidLength { name, expected } => {
                write!(f, "{} must be {} bytes in length", name, expected)
            }
            Error::InvalidPoint => write!(f, "Cannot decompress Edwards point"),
            Error::InvalidSignature => {
                write!(f, "Signature scalar is not a canonical scalar below the group order")
            }
            Error::InvalidEncoding => write!(f, "Not the canonical encoding of a Ristretto point"),
            Error::InvalidSharedSecret => {
                write!(f, "X25519 produced a non-contributory (all-zero) shared secret")
            }
            Error::ScalarOutOfRange => write!(f, "Scalar is outside the required range"),
            Error::InvalidWindow => write!(f, "Window width must be one of 2, 4, 8, or 16"),
            Error::NonInvertible => write!(f, "Cannot invert zero"),
        }
    }
}

impl std::error::Error for Error {}
