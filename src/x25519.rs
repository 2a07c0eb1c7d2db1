// -*- mode: rust; -*-
//
// This file is part of curve25519-oxide.
// See LICENSE for licensing information.

//! X25519 Diffie-Hellman key exchange, as specified in RFC 7748.

use rand_core::CryptoRngCore;

use crate::errors::Error;
use crate::montgomery::MontgomeryPoint;
use crate::traits::IsIdentity;

/// The X25519 basepoint, for use with the bare, byte-oriented
/// [`x25519`] function.
pub const X25519_BASEPOINT_BYTES: [u8; 32] = [
    9, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
];

/// The bare, byte-oriented x25519 function, as specified in RFC 7748.
///
/// Fails with [`Error::InvalidSharedSecret`] if the computed
/// u-coordinate is zero, which happens exactly when the peer's point
/// is of small order (a non-contributory exchange).
pub fn x25519(k: [u8; 32], u: [u8; 32]) -> Result<[u8; 32], Error> {
    let shared = MontgomeryPoint(u).mul_clamped(k);
    if shared.is_identity() {
        return Err(Error::InvalidSharedSecret);
    }
    Ok(shared.to_bytes())
}

/// A Diffie-Hellman public key.
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub struct PublicKey(pub(crate) MontgomeryPoint);

impl From<[u8; 32]> for PublicKey {
    /// Given a byte array, construct an x25519 `PublicKey`.
    fn from(bytes: [u8; 32]) -> PublicKey {
        PublicKey(MontgomeryPoint(bytes))
    }
}

impl PublicKey {
    /// Convert this public key to a byte array.
    #[inline]
    pub fn to_bytes(&self) -> [u8; 32] {
        self.0.to_bytes()
    }

    /// View this public key as a byte array.
    #[inline]
    pub fn as_bytes(&self) -> &[u8; 32] {
        self.0.as_bytes()
    }
}

impl AsRef<[u8]> for PublicKey {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

/// A short-lived Diffie-Hellman secret key that can only be used to
/// compute a single [`SharedSecret`].
///
/// This type is identical to [`StaticSecret`], except that
/// [`EphemeralSecret::diffie_hellman`] consumes the secret, so the
/// compiler statically checks that it is used at most once.
pub struct EphemeralSecret(pub(crate) [u8; 32]);

impl EphemeralSecret {
    /// Perform a Diffie-Hellman key agreement between `self` and
    /// `their_public` key to produce a [`SharedSecret`].
    ///
    /// Fails with [`Error::InvalidSharedSecret`] if the exchange was
    /// non-contributory (the peer supplied a small-order point).
    pub fn diffie_hellman(self, their_public: &PublicKey) -> Result<SharedSecret, Error> {
        shared_secret(their_public.0.mul_clamped(self.0))
    }

    /// Generate a new [`EphemeralSecret`] with the supplied RNG.
    pub fn random_from_rng<R: CryptoRngCore + ?Sized>(csprng: &mut R) -> Self {
        // The secret key is random bytes. Clamping is done later.
        let mut bytes = [0u8; 32];
        csprng.fill_bytes(&mut bytes);
        EphemeralSecret(bytes)
    }
}

impl<'a> From<&'a EphemeralSecret> for PublicKey {
    /// Given an x25519 [`EphemeralSecret`] key, compute its
    /// corresponding [`PublicKey`].
    fn from(secret: &'a EphemeralSecret) -> PublicKey {
        PublicKey(crate::edwards::EdwardsPoint::mul_base_clamped(secret.0).to_montgomery())
    }
}

/// A Diffie-Hellman secret key that can be used to compute multiple
/// [`SharedSecret`]s.
///
/// Prefer [`EphemeralSecret`] unless the protocol genuinely requires
/// reusing the secret: key reuse has serious security implications for
/// many protocols.
#[derive(Clone)]
pub struct StaticSecret([u8; 32]);

impl StaticSecret {
    /// Perform a Diffie-Hellman key agreement between `self` and
    /// `their_public` key to produce a [`SharedSecret`].
    ///
    /// Fails with [`Error::InvalidSharedSecret`] if the exchange was
    /// non-contributory (the peer supplied a small-order point).
    pub fn diffie_hellman(&self, their_public: &PublicKey) -> Result<SharedSecret, Error> {
        shared_secret(their_public.0.mul_clamped(self.0))
    }

    /// Generate a new [`StaticSecret`] with the supplied RNG.
    pub fn random_from_rng<R: CryptoRngCore + ?Sized>(csprng: &mut R) -> Self {
        // The secret key is random bytes. Clamping is done later.
        let mut bytes = [0u8; 32];
        csprng.fill_bytes(&mut bytes);
        StaticSecret(bytes)
    }

    /// Extract this key's bytes for serialization.
    #[inline]
    pub fn to_bytes(&self) -> [u8; 32] {
        self.0
    }

    /// View this key as a byte array.
    #[inline]
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl From<[u8; 32]> for StaticSecret {
    /// Load a secret key from a byte array.
    fn from(bytes: [u8; 32]) -> StaticSecret {
        StaticSecret(bytes)
    }
}

impl<'a> From<&'a StaticSecret> for PublicKey {
    /// Given an x25519 [`StaticSecret`] key, compute its corresponding
    /// [`PublicKey`].
    fn from(secret: &'a StaticSecret) -> PublicKey {
        PublicKey(crate::edwards::EdwardsPoint::mul_base_clamped(secret.0).to_montgomery())
    }
}

impl AsRef<[u8]> for StaticSecret {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

/// The result of a Diffie-Hellman key exchange.
///
/// Each party computes this using their secret key and their
/// counterparty's [`PublicKey`].  Construction already guarantees the
/// exchange was contributory; the all-zero secret is unrepresentable.
pub struct SharedSecret(pub(crate) MontgomeryPoint);

fn shared_secret(point: MontgomeryPoint) -> Result<SharedSecret, Error> {
    if point.is_identity() {
        return Err(Error::InvalidSharedSecret);
    }
    Ok(SharedSecret(point))
}

impl SharedSecret {
    /// Convert this shared secret to a byte array.
    #[inline]
    pub fn to_bytes(&self) -> [u8; 32] {
        self.0.to_bytes()
    }

    /// View this shared secret key as a byte array.
    #[inline]
    pub fn as_bytes(&self) -> &[u8; 32] {
        self.0.as_bytes()
    }
}

impl AsRef<[u8]> for SharedSecret {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn low_order_peer_is_rejected() {
        let secret = StaticSecret::from([0x77u8; 32]);
        for low_order_point in &crate::constants::X25519_LOW_ORDER_POINTS {
            let their_public = PublicKey(*low_order_point);
            assert!(matches!(
                secret.diffie_hellman(&their_public),
                Err(Error::InvalidSharedSecret)
            ));
        }
    }

    #[test]
    fn bare_function_matches_typed_api() {
        let a = StaticSecret::from([0x0au8; 32]);
        let b = StaticSecret::from([0x0bu8; 32]);
        let a_public = PublicKey::from(&a);
        let b_public = PublicKey::from(&b);

        let a_shared = a.diffie_hellman(&b_public).unwrap();
        let bare = x25519(a.to_bytes(), b_public.to_bytes()).unwrap();
        assert_eq!(a_shared.to_bytes(), bare);

        let b_shared = b.diffie_hellman(&a_public).unwrap();
        assert_eq!(a_shared.to_bytes(), b_shared.to_bytes());
    }

    #[test]
    fn public_key_from_basepoint_mul() {
        let secret = StaticSecret::from([0x42u8; 32]);
        let public = PublicKey::from(&secret);
        let expected = x25519(secret.to_bytes(), X25519_BASEPOINT_BYTES).unwrap();
        assert_eq!(public.to_bytes(), expected);
    }
}
