// -*- mode: rust; -*-
//
// This file is part of curve25519-oxide.
// See LICENSE for licensing information.

//! ed25519 public keys and ZIP215 signature verification.

use core::fmt::Debug;
use core::hash::{Hash, Hasher};

use sha2::{Digest, Sha512};

use crate::constants;
use crate::edwards::{CompressedEdwardsY, EdwardsPoint};
use crate::errors::Error;
use crate::montgomery::MontgomeryPoint;
use crate::scalar::Scalar;
use crate::signature::Signature;
use crate::signing::{ExpandedSecretKey, SigningKey};
use crate::traits::IsIdentity;
use crate::PUBLIC_KEY_LENGTH;

/// An ed25519 public key.
///
/// Holds both the 32-byte encoding exactly as supplied (it enters the
/// challenge hash verbatim) and the decoded curve point.
#[derive(Copy, Clone)]
pub struct VerifyingKey {
    /// The compressed encoding, as supplied at construction.
    pub(crate) compressed: CompressedEdwardsY,
    /// The decoded point.
    pub(crate) point: EdwardsPoint,
}

impl Debug for VerifyingKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "VerifyingKey({:?})", self.compressed)
    }
}

impl PartialEq for VerifyingKey {
    fn eq(&self, other: &Self) -> bool {
        self.compressed == other.compressed
    }
}

impl Eq for VerifyingKey {}

impl Hash for VerifyingKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.compressed.as_bytes().hash(state);
    }
}

impl AsRef<[u8]> for VerifyingKey {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl VerifyingKey {
    /// Construct a `VerifyingKey` from its 32-byte compressed Edwards
    /// encoding.
    ///
    /// Decoding follows the ZIP215 rule: non-canonical
    /// \\(y\\)-coordinates are accepted (the raw bytes are retained
    /// for hashing).  Fails with [`Error::InvalidPoint`] if the bytes
    /// do not name a curve point at all.
    pub fn from_bytes(bytes: &[u8; PUBLIC_KEY_LENGTH]) -> Result<VerifyingKey, Error> {
        let compressed = CompressedEdwardsY(*bytes);
        let point = compressed.decompress_unchecked()?;
        Ok(VerifyingKey { compressed, point })
    }

    /// Derive the `VerifyingKey` of an expanded secret key.
    pub(crate) fn from_expanded(expanded: &ExpandedSecretKey) -> VerifyingKey {
        let point = expanded.public_point();
        VerifyingKey {
            compressed: point.compress(),
            point,
        }
    }

    /// View this public key as an array of bytes.
    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LENGTH] {
        self.compressed.as_bytes()
    }

    /// Convert this public key to an array of bytes.
    pub fn to_bytes(&self) -> [u8; PUBLIC_KEY_LENGTH] {
        self.compressed.to_bytes()
    }

    /// Return true if this key's point is of small order, meaning any
    /// message can be made to verify against it.
    pub fn is_weak(&self) -> bool {
        self.point.is_small_order()
    }

    /// Convert this public key to its Montgomery-form u-coordinate,
    /// for X25519 exchanges against an ed25519 identity.
    pub fn to_montgomery(&self) -> MontgomeryPoint {
        self.point.to_montgomery()
    }

    /// Verify a signature on a message, under the ZIP215 validity
    /// rule.
    ///
    /// Checks the group equation \\([8](sB - R - kA) = O\\) with
    /// \\(k = H(R \| A \| M)\\).  The cofactor multiplication makes
    /// acceptance closed under the small-subgroup coset, and both `R`
    /// and `A` are decoded non-strictly, so verification agrees
    /// bit-for-bit with consensus-critical deployments.
    ///
    /// This function is total: a cryptographically invalid signature
    /// (including one whose `R` fails to decode) returns `false`, not
    /// an error.  All scalar multiplications here are variable-time;
    /// every input is public.
    #[allow(non_snake_case)]
    #[must_use]
    pub fn verify(&self, message: &[u8], signature: &Signature) -> bool {
        let R = match signature.R.decompress_unchecked() {
            Ok(point) => point,
            Err(_) => return false,
        };

        let mut h = Sha512::new();
        h.update(signature.R.as_bytes());
        h.update(self.compressed.as_bytes());
        h.update(message);
        let k = Scalar::from_hash(h);

        let sB = constants::ED25519_BASEPOINT_POINT.vartime_mul(&signature.s);
        let kA = self.point.vartime_mul(&k);

        (&(&sB - &R) - &kA).mul_by_cofactor().is_identity()
    }
}

impl From<&SigningKey> for VerifyingKey {
    fn from(signing_key: &SigningKey) -> VerifyingKey {
        signing_key.verifying_key()
    }
}

impl TryFrom<&[u8]> for VerifyingKey {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<VerifyingKey, Error> {
        if bytes.len() != PUBLIC_KEY_LENGTH {
            return Err(Error::InvalidLength {
                name: "VerifyingKey",
                expected: PUBLIC_KEY_LENGTH,
            });
        }
        let mut arr = [0u8; PUBLIC_KEY_LENGTH];
        arr.copy_from_slice(bytes);
        VerifyingKey::from_bytes(&arr)
    }
}
