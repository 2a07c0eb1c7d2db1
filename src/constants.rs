// -*- mode: rust; -*-
//
// This file is part of curve25519-oxide.
// See LICENSE for licensing information.

//! Curve constants: field and scalar moduli helpers, the basepoints,
//! and the 8-torsion subgroup.

#![allow(non_snake_case)]

use crate::edwards::{CompressedEdwardsY, EdwardsPoint};
use crate::field::FieldElement;
use crate::montgomery::MontgomeryPoint;
use crate::ristretto::{CompressedRistretto, RistrettoPoint};
use crate::scalar::{Scalar, UnpackedScalar};

/// Edwards `d` value, equal to `-121665/121666 mod p`.
pub(crate) const EDWARDS_D: FieldElement = FieldElement([
    929955233495203,
    466365720129213,
    1662059464998953,
    2033849074728123,
    1442794654840575,
]);

/// Edwards `2*d` value, equal to `2*(-121665/121666) mod p`.
pub(crate) const EDWARDS_D2: FieldElement = FieldElement([
    1859910466990425,
    932731440258426,
    1072319116312658,
    1815898335770999,
    633789495995903,
]);

/// `= sqrt(a*d - 1)`, where `a = -1 (mod p)` and `d` are the Edwards
/// curve parameters.
pub(crate) const SQRT_AD_MINUS_ONE: FieldElement = FieldElement([
    2241493124984347,
    425987919032274,
    2207028919301688,
    1220490630685848,
    974799131293748,
]);

/// `= 1/sqrt(a-d)`, where `a = -1 (mod p)` and `d` are the Edwards
/// curve parameters.
pub(crate) const INVSQRT_A_MINUS_D: FieldElement = FieldElement([
    278908739862762,
    821645201101625,
    8113234426968,
    1777959178193151,
    2118520810568447,
]);

/// `= 1 - d^2`, used by the Ristretto-flavoured Elligator map.
pub(crate) const ONE_MINUS_D_SQ: FieldElement = FieldElement([
    1136626929484150,
    1998550399581263,
    496427632559748,
    118527312129759,
    45110755273534,
]);

/// `= (d - 1)^2`, used by the Ristretto-flavoured Elligator map.
pub(crate) const D_MINUS_ONE_SQ: FieldElement = FieldElement([
    1507062230895904,
    1572317787530805,
    683053064812840,
    317374165784489,
    1572899562415810,
]);

/// Precomputed value of one of the square roots of -1 (mod p).
pub(crate) const SQRT_M1: FieldElement = FieldElement([
    1718705420411056,
    234908883556509,
    2233514472574048,
    2117202627021982,
    765476049583133,
]);

/// `(A+2)/4` for the Montgomery curve parameter `A = 486662`, used
/// inside the Montgomery ladder.
pub(crate) const APLUS2_OVER_FOUR: FieldElement = FieldElement([121666, 0, 0, 0, 0]);

/// `L` is the order of the base point,
/// \\(\ell = 2^{252} + 27742317777372353535851937790883648493\\),
/// unpacked to 52-bit limbs.
pub(crate) const L: UnpackedScalar = UnpackedScalar([
    0x0002631a5cf5d3ed,
    0x000dea2f79cd6581,
    0x000000000014def9,
    0x0000000000000000,
    0x0000100000000000,
]);

/// `L * LFACTOR = -1 (mod 2^52)`.
pub(crate) const LFACTOR: u64 = 0x51da312547e1b;

/// `R = 2^260 mod L` (the Montgomery modulus, reduced).
pub(crate) const R: UnpackedScalar = UnpackedScalar([
    0x000f48bd6721e6ed,
    0x0003bab5ac67e45a,
    0x000fffffeb35e51b,
    0x000fffffffffffff,
    0x00000fffffffffff,
]);

/// `RR = (2^260)^2 mod L`.
pub(crate) const RR: UnpackedScalar = UnpackedScalar([
    0x0009d265e952d13b,
    0x000d63c715bea69f,
    0x0005be65cb687604,
    0x0003dceec73d217f,
    0x000009411b7c309a,
]);

/// The order of the Ed25519 basepoint and of the Ristretto group,
/// \\(\ell = 2^{252} + 27742317777372353535851937790883648493\\),
/// as a `Scalar`.
///
/// Note that since \\(\ell \geq 2^{252}\\) this is not itself a
/// canonical scalar; it is provided for cofactor and torsion checks.
pub const BASEPOINT_ORDER: Scalar = Scalar {
    bytes: [
        0xed, 0xd3, 0xf5, 0x5c, 0x1a, 0x63, 0x12, 0x58, 0xd6, 0x9c, 0xf7, 0xa2, 0xde, 0xf9, 0xde,
        0x14, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x10,
    ],
};

/// The Ed25519 basepoint, in `CompressedEdwardsY` format.
///
/// This is the little-endian byte encoding of \\(4/5 \pmod p\\), the
/// \\(y\\)-coordinate of the basepoint; the sign bit is 0 since the
/// basepoint has \\(x\\) chosen to be positive.
pub const ED25519_BASEPOINT_COMPRESSED: CompressedEdwardsY = CompressedEdwardsY([
    0x58, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66,
    0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66,
    0x66, 0x66,
]);

/// The Ed25519 basepoint, as an `EdwardsPoint`.
pub const ED25519_BASEPOINT_POINT: EdwardsPoint = EdwardsPoint {
    X: FieldElement([
        1738742601995546,
        1146398526822698,
        2070867633025821,
        562264141797630,
        587772402128613,
    ]),
    Y: FieldElement([
        1801439850948184,
        1351079888211148,
        450359962737049,
        900719925474099,
        1801439850948198,
    ]),
    Z: FieldElement([1, 0, 0, 0, 0]),
    T: FieldElement([
        1841354044333475,
        16398895984059,
        755974180946558,
        900171276175154,
        1821297809914039,
    ]),
};

/// The X25519 basepoint (`u = 9`), in `MontgomeryPoint` format.
pub const X25519_BASEPOINT: MontgomeryPoint = MontgomeryPoint([
    0x09, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00,
]);

/// The Ristretto basepoint, in `CompressedRistretto` format.
pub const RISTRETTO_BASEPOINT_COMPRESSED: CompressedRistretto = CompressedRistretto([
    0xe2, 0xf2, 0xae, 0x0a, 0x6a, 0xbc, 0x4e, 0x71, 0xa8, 0x84, 0xa9, 0x61, 0xc5, 0x00, 0x51,
    0x5f, 0x58, 0xe3, 0x0b, 0x6a, 0xa5, 0x82, 0xdd, 0x8d, 0xb6, 0xa6, 0x59, 0x45, 0xe0, 0x8d,
    0x2d, 0x76,
]);

/// The Ristretto basepoint, as a `RistrettoPoint`.
pub const RISTRETTO_BASEPOINT_POINT: RistrettoPoint = RistrettoPoint(ED25519_BASEPOINT_POINT);

/// X25519 low order points.
///
/// The output of any scalar multiplied by these points is the identity
/// encoding.  Protocols which need "contributory" behaviour must
/// reject them.
///
/// Table adapted from <https://cr.yp.to/ecdh.html>.
#[rustfmt::skip]
pub static X25519_LOW_ORDER_POINTS: [MontgomeryPoint; 7] = [
    // 0 (order 4)
    MontgomeryPoint([0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]),
    // 1 (order 1)
    MontgomeryPoint([0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]),
    // 325606250916557431795983626356110631294008115727848805560023387167927233504 (order 8)
    MontgomeryPoint([0xe0, 0xeb, 0x7a, 0x7c, 0x3b, 0x41, 0xb8, 0xae, 0x16, 0x56, 0xe3, 0xfa, 0xf1, 0x9f, 0xc4, 0x6a, 0xda, 0x09, 0x8d, 0xeb, 0x9c, 0x32, 0xb1, 0xfd, 0x86, 0x62, 0x05, 0x16, 0x5f, 0x49, 0xb8, 0x00]),
    // 39382357235489614581723060781553021112529911719440698176882885853963445705823 (order 8)
    MontgomeryPoint([0x5f, 0x9c, 0x95, 0xbc, 0xa3, 0x50, 0x8c, 0x24, 0xb1, 0xd0, 0xb1, 0x55, 0x9c, 0x83, 0xef, 0x5b, 0x04, 0x44, 0x5c, 0xc4, 0x58, 0x1c, 0x8e, 0x86, 0xd8, 0x22, 0x4e, 0xdd, 0xd0, 0x9f, 0x11, 0x57]),
    // p - 1 (order 2)
    MontgomeryPoint([0xec, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x7f]),
    // p (order 4)
    MontgomeryPoint([0xed, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x7f]),
    // p + 1 (order 1)
    MontgomeryPoint([0xee, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x7f]),
];

/// The 8-torsion subgroup \\(\mathcal E[8]\\).
///
/// In the case of Curve25519, it is cyclic; the \\(i\\)-th element of
/// the array is \\([i]P\\), where \\(P\\) is a point of order \\(8\\)
/// generating \\(\mathcal E[8]\\).
///
/// Thus \\(\mathcal E[4]\\) is the points indexed by `0,2,4,6`, and
/// \\(\mathcal E[2]\\) is the points indexed by `0,4`.
#[rustfmt::skip]
pub static EIGHT_TORSION: [EdwardsPoint; 8] = [
    EdwardsPoint {
        X: FieldElement([0, 0, 0, 0, 0]),
        Y: FieldElement([1, 0, 0, 0, 0]),
        Z: FieldElement([1, 0, 0, 0, 0]),
        T: FieldElement([0, 0, 0, 0, 0]),
    },
    EdwardsPoint {
        X: FieldElement([358744748052810, 1691584618240980, 977650209285361, 1429865912637724, 560044844278676]),
        Y: FieldElement([84926274344903, 473620666599931, 365590438845504, 1028470286882429, 2146499180330972]),
        Z: FieldElement([1, 0, 0, 0, 0]),
        T: FieldElement([1448326834587521, 1857896831960481, 1093722731865333, 1677408490711241, 1915505153018406]),
    },
    EdwardsPoint {
        X: FieldElement([533094393274173, 2016890930128738, 18285341111199, 134597186663265, 1486323764102114]),
        Y: FieldElement([0, 0, 0, 0, 0]),
        Z: FieldElement([1, 0, 0, 0, 0]),
        T: FieldElement([0, 0, 0, 0, 0]),
    },
    EdwardsPoint {
        X: FieldElement([358744748052810, 1691584618240980, 977650209285361, 1429865912637724, 560044844278676]),
        Y: FieldElement([2166873539340326, 1778179147085316, 1886209374839743, 1223329526802818, 105300633354275]),
        Z: FieldElement([1, 0, 0, 0, 0]),
        T: FieldElement([803472979097708, 393902981724766, 1158077081819914, 574391322974006, 336294660666841]),
    },
    EdwardsPoint {
        X: FieldElement([0, 0, 0, 0, 0]),
        Y: FieldElement([2251799813685228, 2251799813685247, 2251799813685247, 2251799813685247, 2251799813685247]),
        Z: FieldElement([1, 0, 0, 0, 0]),
        T: FieldElement([0, 0, 0, 0, 0]),
    },
    EdwardsPoint {
        X: FieldElement([1893055065632419, 560215195444267, 1274149604399886, 821933901047523, 1691754969406571]),
        Y: FieldElement([2166873539340326, 1778179147085316, 1886209374839743, 1223329526802818, 105300633354275]),
        Z: FieldElement([1, 0, 0, 0, 0]),
        T: FieldElement([1448326834587521, 1857896831960481, 1093722731865333, 1677408490711241, 1915505153018406]),
    },
    EdwardsPoint {
        X: FieldElement([1718705420411056, 234908883556509, 2233514472574048, 2117202627021982, 765476049583133]),
        Y: FieldElement([0, 0, 0, 0, 0]),
        Z: FieldElement([1, 0, 0, 0, 0]),
        T: FieldElement([0, 0, 0, 0, 0]),
    },
    EdwardsPoint {
        X: FieldElement([1893055065632419, 560215195444267, 1274149604399886, 821933901047523, 1691754969406571]),
        Y: FieldElement([84926274344903, 473620666599931, 365590438845504, 1028470286882429, 2146499180330972]),
        Z: FieldElement([1, 0, 0, 0, 0]),
        T: FieldElement([803472979097708, 393902981724766, 1158077081819914, 574391322974006, 336294660666841]),
    },
];

#[cfg(test)]
mod test {
    use super::*;
    use crate::traits::{IsIdentity, ValidityCheck};

    #[test]
    fn eight_torsion_has_order_dividing_eight() {
        for point in &EIGHT_TORSION {
            let q = point.mul_by_pow_2(3);
            assert!(q.is_valid());
            assert!(q.is_identity());
        }
    }

    #[test]
    fn four_torsion() {
        for i in (0..8).filter(|i| i % 2 == 0) {
            let q = EIGHT_TORSION[i].mul_by_pow_2(2);
            assert!(q.is_identity());
        }
    }

    #[test]
    fn two_torsion() {
        for i in (0..8).filter(|i| i % 4 == 0) {
            let q = EIGHT_TORSION[i].mul_by_pow_2(1);
            assert!(q.is_identity());
        }
    }

    #[test]
    fn eight_torsion_identity_encoding() {
        let mut expected = [0u8; 32];
        expected[0] = 1;
        assert_eq!(EIGHT_TORSION[0].compress().to_bytes(), expected);
    }

    /// Test that SQRT_M1 is the positive square root of -1.
    #[test]
    fn sqrt_minus_one() {
        let sqrt_m1_sq = &SQRT_M1 * &SQRT_M1;
        assert_eq!(FieldElement::MINUS_ONE, sqrt_m1_sq);
        assert!(bool::from(!SQRT_M1.is_negative()));
    }

    /// Test that d = -121665/121666.
    #[test]
    fn d_vs_ratio() {
        let a = -&FieldElement([121665, 0, 0, 0, 0]);
        let b = FieldElement([121666, 0, 0, 0, 0]);
        let d = &a * &b.invert();
        let d2 = &d + &d;
        assert_eq!(d, EDWARDS_D);
        assert_eq!(d2, EDWARDS_D2);
    }

    #[test]
    fn sqrt_ad_minus_one() {
        let a = FieldElement::MINUS_ONE;
        let ad_minus_one = &(&a * &EDWARDS_D) + &a;
        assert_eq!(SQRT_AD_MINUS_ONE.square(), ad_minus_one);
    }

    #[test]
    fn invsqrt_a_minus_d() {
        let a = FieldElement::MINUS_ONE;
        let a_minus_d = &a - &EDWARDS_D;
        let inv_sq = INVSQRT_A_MINUS_D.square();
        assert_eq!(&inv_sq * &a_minus_d, FieldElement::ONE);
    }

    #[test]
    fn elligator_constants_match_d() {
        let one = FieldElement::ONE;
        let dd = EDWARDS_D.square();
        assert_eq!(ONE_MINUS_D_SQ, &one - &dd);
        let d_minus_one = &EDWARDS_D - &one;
        assert_eq!(D_MINUS_ONE_SQ, d_minus_one.square());
    }

    #[test]
    fn montgomery_a_plus_2_over_four() {
        // (486662 + 2) / 4 = 121666
        let four = FieldElement([4, 0, 0, 0, 0]);
        let a_plus_2 = FieldElement([486664, 0, 0, 0, 0]);
        assert_eq!(&APLUS2_OVER_FOUR * &four, a_plus_2);
    }

    #[test]
    fn basepoint_is_valid_and_matches_compressed() {
        assert!(ED25519_BASEPOINT_POINT.is_valid());
        assert_eq!(
            ED25519_BASEPOINT_POINT.compress(),
            ED25519_BASEPOINT_COMPRESSED
        );
    }

    #[test]
    fn scalar_montgomery_radix_constants() {
        // R = 2^260 mod l: feeding 2^260 through the wide reduction
        // must produce R.
        let mut two_260 = [0u8; 64];
        two_260[32] = 0x10; // bit 260
        let r = UnpackedScalar::from_bytes_wide(&two_260);
        for i in 0..5 {
            assert_eq!(r.0[i], R.0[i]);
        }
        // RR = R^2 mod l
        let rr = UnpackedScalar::mul(&R, &R);
        for i in 0..5 {
            assert_eq!(rr.0[i], RR.0[i]);
        }
    }
}
