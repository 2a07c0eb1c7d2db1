// -*- mode: rust; -*-
//
// This file is part of curve25519-oxide.
// See LICENSE for licensing information.

//! Integration tests for ed25519 signing and ZIP215 verification.

use hex_literal::hex;

use curve25519_oxide::constants::EIGHT_TORSION;
use curve25519_oxide::{Error, Scalar, Signature, SigningKey, VerifyingKey};

/// RFC 8032 §7.1 test vector 1: the empty message.
#[test]
fn rfc8032_test_vector_1() {
    let seed = hex!("9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60");
    let expected_pk = hex!("d75a980182b10ab7d54bfed3c964073a0ee172f3daa62325af021a68f707511a");
    let expected_sig = hex!(
        "e5564300c360ac729086e2cc806e828a84877f1eb8e5d974d873e06522490155"
        "5fb8821590a33bacc61e39701cf9b46bd25bf5f0595bbe24655141438e7a100b"
    );

    let signing_key = SigningKey::from_bytes(&seed);
    assert_eq!(signing_key.verifying_key().to_bytes(), expected_pk);

    let sig = signing_key.sign(b"");
    assert_eq!(sig.to_bytes()[..], expected_sig[..]);
    assert!(signing_key.verifying_key().verify(b"", &sig));
}

/// RFC 8032 §7.1 test vector 2: a one-byte message.
#[test]
fn rfc8032_test_vector_2() {
    let seed = hex!("4ccd089b28ff96da9db6c346ec114e0f5b8a319f35aba624da8cf6ed4fb8a6fb");
    let expected_pk = hex!("3d4017c3e843895a92b70aa74d1b7ebc9c982ccf2ec4968cc0cd55f12af4660c");
    let message = hex!("72");
    let expected_sig = hex!(
        "92a009a9f0d4cab8720e820b5f642540a2b27b5416503f8fb3762223ebdb69da"
        "085ac1e43e15996e458f3613d0f11d8c387b2eaeb4302aeeb00d291612bb0c00"
    );

    let signing_key = SigningKey::from_bytes(&seed);
    assert_eq!(signing_key.verifying_key().to_bytes(), expected_pk);

    let sig = signing_key.sign(&message);
    assert_eq!(sig.to_bytes()[..], expected_sig[..]);
    assert!(signing_key.verifying_key().verify(&message, &sig));
}

/// RFC 8032 §7.1 test vector 3: a two-byte message.
#[test]
fn rfc8032_test_vector_3() {
    let seed = hex!("c5aa8df43f9f837bedb7442f31dcb7b166d38535076f094b85ce3a2e0b4458f7");
    let expected_pk = hex!("fc51cd8e6218a1a38da47ed00230f0580816ed13ba3303ac5deb911548908025");
    let message = hex!("af82");
    let expected_sig = hex!(
        "6291d657deec24024827e69c3abe01a30ce548a284743a445e3680d7db5ac3ac"
        "18ff9b538d16f290ae67f760984dc6594a7c15e9716ed28dc027beceea1ec40a"
    );

    let signing_key = SigningKey::from_bytes(&seed);
    assert_eq!(signing_key.verifying_key().to_bytes(), expected_pk);

    let sig = signing_key.sign(&message);
    assert_eq!(sig.to_bytes()[..], expected_sig[..]);
    assert!(signing_key.verifying_key().verify(&message, &sig));
}

#[test]
fn sign_verify() {
    let good: &[u8] = b"test message";
    let bad: &[u8] = b"wrong message";

    let signing_key = SigningKey::from_bytes(&[0x1du8; 32]);
    let verifying_key = signing_key.verifying_key();

    let good_sig = signing_key.sign(good);
    let bad_sig = signing_key.sign(bad);

    assert!(
        verifying_key.verify(good, &good_sig),
        "Verification of a valid signature failed!"
    );
    assert!(
        !verifying_key.verify(good, &bad_sig),
        "Verification of a signature on a different message passed!"
    );
    assert!(
        !verifying_key.verify(bad, &good_sig),
        "Verification of a signature on a different message passed!"
    );

    // A signature does not transfer to someone else's key.
    let other_key = SigningKey::from_bytes(&[0x1eu8; 32]).verifying_key();
    assert!(!other_key.verify(good, &good_sig));
}

/// Signing the same message twice with the same seed yields
/// byte-identical signatures.
#[test]
fn signing_is_deterministic() {
    let signing_key = SigningKey::from_bytes(&[0x33u8; 32]);
    let message = b"determinism test";
    let sig1 = signing_key.sign(message);
    let sig2 = signing_key.sign(message);
    assert_eq!(sig1.to_bytes(), sig2.to_bytes());

    // And the same through an independently-constructed key.
    let again = SigningKey::from_bytes(&[0x33u8; 32]);
    assert_eq!(again.sign(message).to_bytes(), sig1.to_bytes());
}

/// A signature with `s >= l` must be rejected at decoding, before any
/// curve arithmetic.
#[test]
fn unreduced_scalar_is_invalid_signature() {
    let signing_key = SigningKey::from_bytes(&[0x44u8; 32]);
    let mut sig_bytes = signing_key.sign(b"some message").to_bytes();

    // Add l to s: the signature still satisfies the unreduced
    // verification equation, which is exactly the malleability the
    // canonicity check exists to stop.
    let ell = hex!("edd3f55c1a631258d69cf7a2def9de1400000000000000000000000000000010");
    let mut carry = 0u16;
    for i in 0..32 {
        let v = sig_bytes[32 + i] as u16 + ell[i] as u16 + carry;
        sig_bytes[32 + i] = v as u8;
        carry = v >> 8;
    }

    assert_eq!(
        Signature::from_bytes(&sig_bytes),
        Err(Error::InvalidSignature)
    );
}

/// ZIP215 verification is closed under the 8-torsion coset: with a
/// small-order public key and `s = 0`, any small-order `R` verifies
/// for any message, because `[8](0·B - R - kA) = O` identically.
#[test]
fn zip215_small_order_keys_verify() {
    let weak_pk = VerifyingKey::from_bytes(EIGHT_TORSION[1].compress().as_bytes()).unwrap();
    assert!(weak_pk.is_weak());

    let mut sig_bytes = [0u8; 64];
    sig_bytes[..32].copy_from_slice(EIGHT_TORSION[2].compress().as_bytes());
    sig_bytes[32..].copy_from_slice(&Scalar::ZERO.to_bytes());
    let sig = Signature::from_bytes(&sig_bytes).unwrap();

    assert!(weak_pk.verify(b"arbitrary message", &sig));
    assert!(weak_pk.verify(b"another arbitrary message", &sig));
}

/// The same, with `R` given as a non-canonical encoding: the identity
/// encoded with `y = p + 1`.  Strict RFC 8032 decoding refuses this
/// `R`; ZIP215 accepts it and the cofactored equation holds.
#[test]
fn zip215_accepts_noncanonical_r() {
    let noncanonical_identity =
        hex!("eeffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff7f");

    let weak_pk = VerifyingKey::from_bytes(EIGHT_TORSION[1].compress().as_bytes()).unwrap();

    let mut sig_bytes = [0u8; 64];
    sig_bytes[..32].copy_from_slice(&noncanonical_identity);
    sig_bytes[32..].copy_from_slice(&Scalar::ZERO.to_bytes());
    let sig = Signature::from_bytes(&sig_bytes).unwrap();

    assert!(weak_pk.verify(b"zcash consensus rules", &sig));
}

/// An `R` that does not name a curve point at all makes verification
/// return false, not raise.
#[test]
fn undecodable_r_verifies_false() {
    let signing_key = SigningKey::from_bytes(&[0x55u8; 32]);
    let mut sig_bytes = signing_key.sign(b"msg").to_bytes();
    // y = 2 is not on the curve.
    sig_bytes[..32].copy_from_slice(&[
        2, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
        0, 0,
    ]);
    let sig = Signature::from_bytes(&sig_bytes).unwrap();
    assert!(!signing_key.verifying_key().verify(b"msg", &sig));
}

/// The 64-byte `seed ‖ public-key` form takes the first 32 bytes as
/// the seed.
#[test]
fn keypair_form_uses_first_half() {
    let seed = hex!("9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60");
    let from_seed = SigningKey::from_bytes(&seed);

    let mut keypair_bytes = [0u8; 64];
    keypair_bytes[..32].copy_from_slice(&seed);
    keypair_bytes[32..].copy_from_slice(&from_seed.verifying_key().to_bytes());

    let from_pair = SigningKey::try_from(&keypair_bytes[..]).unwrap();
    assert_eq!(from_pair.to_bytes(), seed);
    assert_eq!(
        from_pair.verifying_key().to_bytes(),
        from_seed.verifying_key().to_bytes()
    );

    assert!(matches!(
        SigningKey::try_from(&keypair_bytes[..40]),
        Err(Error::InvalidLength { .. })
    ));
}

/// Wire-format length errors are distinguishable from all other
/// failures.
#[test]
fn length_errors() {
    assert!(matches!(
        Signature::from_slice(&[0u8; 65]),
        Err(Error::InvalidLength {
            name: "Signature",
            expected: 64
        })
    ));
    assert!(matches!(
        VerifyingKey::try_from(&[0u8; 31][..]),
        Err(Error::InvalidLength {
            name: "VerifyingKey",
            expected: 32
        })
    ));
}

#[test]
fn generate_and_sign() {
    let mut csprng = rand::rngs::OsRng;
    let signing_key = SigningKey::generate(&mut csprng);
    let message = b"generated key roundtrip";
    let sig = signing_key.sign(message);
    assert!(signing_key.verifying_key().verify(message, &sig));
}
