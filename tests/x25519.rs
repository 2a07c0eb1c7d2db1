// -*- mode: rust; -*-
//
// This file is part of curve25519-oxide.
// See LICENSE for licensing information.

//! Integration tests for X25519 key exchange, including the
//! Ed25519-to-X25519 key bridging.

use hex_literal::hex;

use curve25519_oxide::x25519::{x25519, PublicKey, StaticSecret, X25519_BASEPOINT_BYTES};
use curve25519_oxide::{Error, SigningKey};

/// RFC 7748 §5.2 test vector 1.
#[test]
fn rfc7748_vector_1() {
    let scalar = hex!("a546e36bf0527c9d3b16154b82465edd62144c0ac1fc5a18506a2244ba449ac4");
    let u = hex!("e6db6867583030db3594c1a424b15f7c726624ec26b3353b10a903a6d0ab1c4c");
    let expected = hex!("c3da55379de9c6908e94ea4df28d084f32eccf03491c71f754b4075577a28552");

    assert_eq!(x25519(scalar, u).unwrap(), expected);
}

/// RFC 7748 §5.2 test vector 2.
#[test]
fn rfc7748_vector_2() {
    let scalar = hex!("4b66e9d4d1b4673c5ad22691957d6af5c11b6421e0ea01d42ca4169e7918ba0d");
    let u = hex!("e5210f12786811d3f4b7959d0538ae2c31dbe7106fc03c3efc4cd549c715a493");
    let expected = hex!("95cbde9476e8907d7aade45cb4b873f88b595a68799fa152e6f8f7647aac7957");

    assert_eq!(x25519(scalar, u).unwrap(), expected);
}

/// One round of the RFC 7748 §5.2 iteration test.
#[test]
fn rfc7748_iteration_one() {
    let k = X25519_BASEPOINT_BYTES;
    let u = X25519_BASEPOINT_BYTES;
    let expected = hex!("422c8e7a6227d7bca1350b3e2bb7279f7897b87bb6854b783c60e80311ae3079");

    assert_eq!(x25519(k, u).unwrap(), expected);
}

/// RFC 7748 §6.1: the full Diffie-Hellman flow with the documented
/// key pairs.
#[test]
fn rfc7748_diffie_hellman() {
    let alice_secret_bytes =
        hex!("77076d0a7318a57d3c16c17251b26645df4c2f87ebc0992ab177fba51db92c2a");
    let alice_public_expected =
        hex!("8520f0098930a754748b7ddcb43ef75a0dbf3a0d26381af4eba4a98eaa9b4e6a");
    let bob_secret_bytes = hex!("5dab087e624a8a4b79e17f8b83800ee66f3bb1292618b6fd1c2f8b27ff88e0eb");
    let bob_public_expected =
        hex!("de9edb7d7b7dc1b4d35b61c2ece435373f8343c85b78674dadfc7e146f882b4f");
    let shared_expected = hex!("4a5d9d5ba4ce2de1728e3bf480350f25e07e21c947d19e3376f09b3c1e161742");

    let alice_secret = StaticSecret::from(alice_secret_bytes);
    let bob_secret = StaticSecret::from(bob_secret_bytes);

    let alice_public = PublicKey::from(&alice_secret);
    let bob_public = PublicKey::from(&bob_secret);
    assert_eq!(alice_public.to_bytes(), alice_public_expected);
    assert_eq!(bob_public.to_bytes(), bob_public_expected);

    let alice_shared = alice_secret.diffie_hellman(&bob_public).unwrap();
    let bob_shared = bob_secret.diffie_hellman(&alice_public).unwrap();

    assert_eq!(alice_shared.to_bytes(), shared_expected);
    assert_eq!(bob_shared.to_bytes(), shared_expected);
}

/// DH(a, bB) == DH(b, aB) for arbitrary secrets.
#[test]
fn diffie_hellman_commutes() {
    let a = StaticSecret::from([0x21u8; 32]);
    let b = StaticSecret::from([0x43u8; 32]);

    let a_shared = a.diffie_hellman(&PublicKey::from(&b)).unwrap();
    let b_shared = b.diffie_hellman(&PublicKey::from(&a)).unwrap();

    assert_eq!(a_shared.as_bytes(), b_shared.as_bytes());
}

/// A small-order peer point forces the all-zero output, which the API
/// reports as a non-contributory exchange.
#[test]
fn small_order_input_is_noncontributory() {
    let scalar = hex!("a546e36bf0527c9d3b16154b82465edd62144c0ac1fc5a18506a2244ba449ac4");
    let zero_u = [0u8; 32];
    assert_eq!(x25519(scalar, zero_u), Err(Error::InvalidSharedSecret));

    let one_u = {
        let mut u = [0u8; 32];
        u[0] = 1;
        u
    };
    assert_eq!(x25519(scalar, one_u), Err(Error::InvalidSharedSecret));
}

/// X25519 Diffie-Hellman using keys converted from Ed25519.
///
/// Keys from the RFC 8032 §7.1 test vectors.
#[test]
fn ed25519_to_x25519_dh() {
    let ed25519_secret_key_a =
        hex!("9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60");
    let ed25519_secret_key_b =
        hex!("4ccd089b28ff96da9db6c346ec114e0f5b8a319f35aba624da8cf6ed4fb8a6fb");

    let ed25519_signing_key_a = SigningKey::from_bytes(&ed25519_secret_key_a);
    let ed25519_signing_key_b = SigningKey::from_bytes(&ed25519_secret_key_b);

    let scalar_a_bytes = ed25519_signing_key_a.to_scalar_bytes();
    let scalar_b_bytes = ed25519_signing_key_b.to_scalar_bytes();

    assert_eq!(
        scalar_a_bytes,
        hex!("357c83864f2833cb427a2ef1c00a013cfdff2768d980c0a3a520f006904de90f")
    );
    assert_eq!(
        scalar_b_bytes,
        hex!("6ebd9ed75882d52815a97585caf4790a7f6c6b3b7f821c5e259a24b02e502e11")
    );

    let x25519_public_key_a = ed25519_signing_key_a.verifying_key().to_montgomery();
    let x25519_public_key_b = ed25519_signing_key_b.verifying_key().to_montgomery();

    assert_eq!(
        x25519_public_key_a.to_bytes(),
        hex!("d85e07ec22b0ad881537c2f44d662d1a143cf830c57aca4305d85c7a90f6b62e")
    );
    assert_eq!(
        x25519_public_key_b.to_bytes(),
        hex!("25c704c594b88afc00a76b69d1ed2b984d7e22550f3ed0802d04fbcd07d38d47")
    );

    let expected_shared_secret =
        hex!("5166f24a6918368e2af831a4affadd97af0ac326bdf143596c045967cc00230e");

    assert_eq!(
        x25519_public_key_a.mul_clamped(scalar_b_bytes).to_bytes(),
        expected_shared_secret
    );
    assert_eq!(
        x25519_public_key_b.mul_clamped(scalar_a_bytes).to_bytes(),
        expected_shared_secret
    );
}

/// The high bit of the peer's u-coordinate is masked before the
/// ladder, per RFC 7748.
#[test]
fn high_bit_of_u_is_ignored() {
    let scalar = hex!("a546e36bf0527c9d3b16154b82465edd62144c0ac1fc5a18506a2244ba449ac4");
    let mut u = hex!("e6db6867583030db3594c1a424b15f7c726624ec26b3353b10a903a6d0ab1c4c");
    let without_high_bit = x25519(scalar, u).unwrap();
    u[31] |= 0x80;
    let with_high_bit = x25519(scalar, u).unwrap();
    assert_eq!(without_high_bit, with_high_bit);
}
