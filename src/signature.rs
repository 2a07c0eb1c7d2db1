// -*- mode: rust; -*-
//
// This file is part of curve25519-oxide.
// See LICENSE for licensing information.

//! An ed25519 signature.

use core::fmt::Debug;

use crate::edwards::CompressedEdwardsY;
use crate::errors::Error;
use crate::scalar::Scalar;
use crate::SIGNATURE_LENGTH;

/// An ed25519 signature.
///
/// The wire form is 64 bytes: the 32-byte compressed point `R`
/// followed by the 32-byte little-endian scalar `s`.
#[allow(non_snake_case)]
#[derive(Copy, Clone, Eq, PartialEq)]
pub struct Signature {
    /// `R` is a curve point, the commitment to the signing nonce.
    pub(crate) R: CompressedEdwardsY,

    /// `s` is the response scalar, canonical (below the group order).
    pub(crate) s: Scalar,
}

impl Debug for Signature {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Signature( R: {:?}, s: {:?} )", &self.R, &self.s)
    }
}

impl Signature {
    /// Convert this `Signature` to its 64-byte wire form.
    pub fn to_bytes(&self) -> [u8; SIGNATURE_LENGTH] {
        let mut signature_bytes = [0u8; SIGNATURE_LENGTH];

        signature_bytes[..32].copy_from_slice(&self.R.as_bytes()[..]);
        signature_bytes[32..].copy_from_slice(&self.s.as_bytes()[..]);
        signature_bytes
    }

    /// Construct a `Signature` from its 64-byte wire form.
    ///
    /// The scalar half must be canonical: fails with
    /// [`Error::InvalidSignature`] when `s >= l`.  No curve check is
    /// made on `R` here; an undecodable `R` makes verification return
    /// false rather than error, per ZIP215.
    pub fn from_bytes(bytes: &[u8; SIGNATURE_LENGTH]) -> Result<Signature, Error> {
        let mut lower: [u8; 32] = [0u8; 32];
        let mut upper: [u8; 32] = [0u8; 32];

        lower.copy_from_slice(&bytes[..32]);
        upper.copy_from_slice(&bytes[32..]);

        let s = Scalar::from_canonical_bytes(upper).map_err(|_| Error::InvalidSignature)?;

        Ok(Signature {
            R: CompressedEdwardsY(lower),
            s,
        })
    }

    /// Construct a `Signature` from a byte slice.
    pub fn from_slice(bytes: &[u8]) -> Result<Signature, Error> {
        if bytes.len() != SIGNATURE_LENGTH {
            return Err(Error::InvalidLength {
                name: "Signature",
                expected: SIGNATURE_LENGTH,
            });
        }
        let mut arr = [0u8; SIGNATURE_LENGTH];
        arr.copy_from_slice(bytes);
        Signature::from_bytes(&arr)
    }

    /// The `R` half of this signature.
    pub fn r_bytes(&self) -> &[u8; 32] {
        self.R.as_bytes()
    }

    /// The `s` half of this signature.
    pub fn s_bytes(&self) -> &[u8; 32] {
        self.s.as_bytes()
    }
}

impl TryFrom<&[u8]> for Signature {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Signature, Error> {
        Signature::from_slice(bytes)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn round_trip() {
        let mut bytes = [0u8; 64];
        bytes[0] = 1; // R = identity encoding
        bytes[32] = 5; // s = 5
        let sig = Signature::from_bytes(&bytes).unwrap();
        assert_eq!(sig.to_bytes(), bytes);
    }

    #[test]
    fn non_canonical_scalar_is_rejected() {
        // s = l is out of range.
        let mut bytes = [0u8; 64];
        bytes[32..].copy_from_slice(&crate::constants::BASEPOINT_ORDER.to_bytes());
        assert_eq!(Signature::from_bytes(&bytes), Err(Error::InvalidSignature));

        // The high-bit-set scalars of legacy signatures are rejected
        // too.
        let mut bytes = [0u8; 64];
        bytes[63] = 0x80;
        assert_eq!(Signature::from_bytes(&bytes), Err(Error::InvalidSignature));
    }

    #[test]
    fn wrong_length_is_rejected() {
        assert_eq!(
            Signature::from_slice(&[0u8; 63]),
            Err(Error::InvalidLength {
                name: "Signature",
                expected: 64
            })
        );
    }
}
