// -*- mode: rust; -*-
//
// This file is part of curve25519-oxide.
// See LICENSE for licensing information.

//! ed25519 secret keys, key expansion, and signing (RFC 8032
//! §5.1.5–5.1.6).

use core::fmt::Debug;

use rand_core::CryptoRngCore;
use sha2::{Digest, Sha512};

use crate::edwards::EdwardsPoint;
use crate::errors::Error;
use crate::scalar::{clamp_integer, Scalar};
use crate::signature::Signature;
use crate::verifying::VerifyingKey;
use crate::{KEYPAIR_LENGTH, SECRET_KEY_LENGTH};

/// An ed25519 secret key.
pub type SecretKey = [u8; SECRET_KEY_LENGTH];

/// An ed25519 signing key: a 32-byte seed together with its derived
/// verifying key.
#[derive(Clone)]
pub struct SigningKey {
    /// The seed, from which the signing scalar and the nonce prefix
    /// are expanded.
    pub(crate) secret_key: SecretKey,
    /// The public half, cached at construction.
    pub(crate) verifying_key: VerifyingKey,
}

impl Debug for SigningKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        // The seed stays out of debug output.
        write!(f, "SigningKey( verifying_key: {:?} )", self.verifying_key)
    }
}

impl PartialEq for SigningKey {
    fn eq(&self, other: &Self) -> bool {
        use subtle::ConstantTimeEq;
        self.secret_key.ct_eq(&other.secret_key).into()
    }
}

impl Eq for SigningKey {}

impl SigningKey {
    /// Construct a `SigningKey` from a 32-byte seed.
    pub fn from_bytes(secret_key: &SecretKey) -> SigningKey {
        let expanded = ExpandedSecretKey::from(secret_key);
        let verifying_key = VerifyingKey::from_expanded(&expanded);
        SigningKey {
            secret_key: *secret_key,
            verifying_key,
        }
    }

    /// Construct a `SigningKey` from the 64-byte `seed ‖ public-key`
    /// form emitted by other ed25519 libraries.
    ///
    /// Only the first 32 bytes are used; the public key is re-derived
    /// from the seed.
    pub fn from_keypair_bytes(bytes: &[u8; KEYPAIR_LENGTH]) -> SigningKey {
        let mut seed = [0u8; SECRET_KEY_LENGTH];
        seed.copy_from_slice(&bytes[..SECRET_KEY_LENGTH]);
        SigningKey::from_bytes(&seed)
    }

    /// Generate an ed25519 signing key from a user-provided RNG.
    pub fn generate<R: CryptoRngCore + ?Sized>(csprng: &mut R) -> SigningKey {
        let mut secret = [0u8; SECRET_KEY_LENGTH];
        csprng.fill_bytes(&mut secret);
        SigningKey::from_bytes(&secret)
    }

    /// View the seed of this signing key.
    pub fn as_bytes(&self) -> &SecretKey {
        &self.secret_key
    }

    /// Convert this signing key to its 32-byte seed.
    pub fn to_bytes(&self) -> SecretKey {
        self.secret_key
    }

    /// Convert this signing key to the 64-byte `seed ‖ public-key`
    /// form.
    pub fn to_keypair_bytes(&self) -> [u8; KEYPAIR_LENGTH] {
        let mut bytes = [0u8; KEYPAIR_LENGTH];
        bytes[..SECRET_KEY_LENGTH].copy_from_slice(&self.secret_key);
        bytes[SECRET_KEY_LENGTH..].copy_from_slice(self.verifying_key.as_bytes());
        bytes
    }

    /// The verifying key of this signing key.
    pub fn verifying_key(&self) -> VerifyingKey {
        self.verifying_key
    }

    /// Sign a message with this key, deterministically (RFC 8032
    /// §5.1.6).
    pub fn sign(&self, message: &[u8]) -> Signature {
        ExpandedSecretKey::from(&self.secret_key).sign(message, &self.verifying_key)
    }

    /// Verify a signature on a message with this key's public half.
    pub fn verify(&self, message: &[u8], signature: &Signature) -> bool {
        self.verifying_key.verify(message, signature)
    }

    /// The clamped private scalar bytes of this key, as used by
    /// X25519 when combining an ed25519 identity with a Diffie-Hellman
    /// exchange.
    ///
    /// Note that these are the raw clamped bytes, not reduced mod the
    /// group order.
    pub fn to_scalar_bytes(&self) -> [u8; 32] {
        let hash = Sha512::digest(self.secret_key);
        let mut head = [0u8; 32];
        head.copy_from_slice(&hash[..32]);
        clamp_integer(head)
    }
}

impl TryFrom<&[u8]> for SigningKey {
    type Error = Error;

    /// Construct a `SigningKey` from a slice holding either the
    /// 32-byte seed or the 64-byte `seed ‖ public-key` form.
    fn try_from(bytes: &[u8]) -> Result<SigningKey, Error> {
        match bytes.len() {
            SECRET_KEY_LENGTH => {
                let mut seed = [0u8; SECRET_KEY_LENGTH];
                seed.copy_from_slice(bytes);
                Ok(SigningKey::from_bytes(&seed))
            }
            KEYPAIR_LENGTH => {
                let mut pair = [0u8; KEYPAIR_LENGTH];
                pair.copy_from_slice(bytes);
                Ok(SigningKey::from_keypair_bytes(&pair))
            }
            _ => Err(Error::InvalidLength {
                name: "SigningKey",
                expected: SECRET_KEY_LENGTH,
            }),
        }
    }
}

impl From<&SecretKey> for SigningKey {
    fn from(secret_key: &SecretKey) -> SigningKey {
        SigningKey::from_bytes(secret_key)
    }
}

/// The expansion of a seed: the clamped signing scalar `a` and the
/// 32-byte prefix used to derive the deterministic nonce.
pub(crate) struct ExpandedSecretKey {
    /// The signing scalar, reduced mod the group order.  Reduction
    /// does not change the public key or the signatures produced,
    /// since the scalar only ever multiplies points of order l.
    pub(crate) scalar: Scalar,
    /// The domain-separation prefix for the nonce.
    pub(crate) hash_prefix: [u8; 32],
}

impl From<&SecretKey> for ExpandedSecretKey {
    /// RFC 8032 §5.1.5: hash the seed, clamp the lower half into the
    /// scalar, keep the upper half as the nonce prefix.
    fn from(secret_key: &SecretKey) -> ExpandedSecretKey {
        let hash = Sha512::digest(secret_key);

        let mut head = [0u8; 32];
        let mut hash_prefix = [0u8; 32];
        head.copy_from_slice(&hash[..32]);
        hash_prefix.copy_from_slice(&hash[32..]);

        ExpandedSecretKey {
            scalar: Scalar::from_bytes_mod_order(clamp_integer(head)),
            hash_prefix,
        }
    }
}

impl ExpandedSecretKey {
    /// Compute the public key \\(A = aB\\).
    pub(crate) fn public_point(&self) -> EdwardsPoint {
        EdwardsPoint::mul_base(&self.scalar)
    }

    /// Sign a message (RFC 8032 §5.1.6):
    /// \\(r = H(\text{prefix} \| M)\\), \\(R = rB\\),
    /// \\(k = H(R \| A \| M)\\), \\(s = r + k a \pmod \ell\\).
    #[allow(non_snake_case)]
    pub(crate) fn sign(&self, message: &[u8], verifying_key: &VerifyingKey) -> Signature {
        let mut h = Sha512::new();
        h.update(self.hash_prefix);
        h.update(message);

        let r = Scalar::from_hash(h);
        let R = EdwardsPoint::mul_base(&r).compress();

        let mut h = Sha512::new();
        h.update(R.as_bytes());
        h.update(verifying_key.as_bytes());
        h.update(message);

        let k = Scalar::from_hash(h);
        let s = &(&k * &self.scalar) + &r;

        Signature { R, s }
    }
}
