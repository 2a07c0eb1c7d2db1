// -*- mode: rust; -*-
//
// This file is part of curve25519-oxide.
// See LICENSE for licensing information.

//! Group operations for Curve25519, in Edwards form.

// We allow non snake_case names because coordinates in projective space
// are traditionally denoted by the capitalisation of their respective
// counterparts in affine space.
#![allow(non_snake_case)]

use core::fmt::Debug;
use core::ops::{Add, AddAssign};
use core::ops::{Mul, MulAssign};
use core::ops::{Neg, Sub, SubAssign};

use subtle::Choice;
use subtle::ConditionallyNegatable;
use subtle::ConditionallySelectable;
use subtle::ConstantTimeEq;

use crate::constants;
use crate::curve_models::{CompletedPoint, ProjectiveNielsPoint, ProjectivePoint};
use crate::errors::Error;
use crate::field::FieldElement;
use crate::montgomery::MontgomeryPoint;
use crate::scalar::{clamp_integer, Scalar};
use crate::traits::{Identity, IsIdentity, ValidityCheck};
use crate::window;

// ------------------------------------------------------------------------
// Compressed points
// ------------------------------------------------------------------------

/// In "Edwards y" / "Ed25519" format, the curve point \\((x,y)\\) is
/// determined by the \\(y\\)-coordinate and the sign of \\(x\\).
///
/// The first 255 bits of a `CompressedEdwardsY` represent the
/// \\(y\\)-coordinate.  The high bit of the 32nd byte is the sign of
/// \\(x\\).
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct CompressedEdwardsY(pub [u8; 32]);

impl Debug for CompressedEdwardsY {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "CompressedEdwardsY: {:?}", self.as_bytes())
    }
}

impl Identity for CompressedEdwardsY {
    fn identity() -> CompressedEdwardsY {
        CompressedEdwardsY([
            1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
            0, 0, 0,
        ])
    }
}

impl CompressedEdwardsY {
    /// View this `CompressedEdwardsY` as an array of bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Copy this `CompressedEdwardsY` to an array of bytes.
    pub const fn to_bytes(&self) -> [u8; 32] {
        self.0
    }

    /// Construct a `CompressedEdwardsY` from a slice of bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<CompressedEdwardsY, Error> {
        if bytes.len() != 32 {
            return Err(Error::InvalidLength {
                name: "CompressedEdwardsY",
                expected: 32,
            });
        }
        let mut arr = [0u8; 32];
        arr.copy_from_slice(bytes);
        Ok(CompressedEdwardsY(arr))
    }

    /// Attempt to decompress to an `EdwardsPoint`, requiring the
    /// canonical encoding: the 255-bit \\(y\\)-coordinate must be fully
    /// reduced mod \\(p\\).
    ///
    /// Fails with [`Error::InvalidPoint`] if the input is not the
    /// \\(y\\)-coordinate of a curve point, if it is non-canonical, or
    /// if the sign bit is set on \\(x = 0\\).
    pub fn decompress(&self) -> Result<EdwardsPoint, Error> {
        let mut y_bytes = self.0;
        y_bytes[31] &= 0b0111_1111;

        let Y = FieldElement::from_bytes(&y_bytes);
        // from_bytes reduces 2^255-19..2^255-1 silently; a canonical
        // encoding must survive the re-encode round trip.
        if Y.to_bytes() != y_bytes {
            return Err(Error::InvalidPoint);
        }
        self.decompress_step(Y)
    }

    /// Attempt to decompress to an `EdwardsPoint`, accepting any
    /// 255-bit \\(y\\), including the non-canonical encodings with
    /// \\(y \geq p\\).  This is the decoding rule ZIP215 verification
    /// requires.
    pub fn decompress_unchecked(&self) -> Result<EdwardsPoint, Error> {
        let mut y_bytes = self.0;
        y_bytes[31] &= 0b0111_1111;
        self.decompress_step(FieldElement::from_bytes(&y_bytes))
    }

    fn decompress_step(&self, Y: FieldElement) -> Result<EdwardsPoint, Error> {
        let Z = FieldElement::ONE;
        let YY = Y.square();
        let u = &YY - &Z; // u =  y²-1
        let v = &(&YY * &constants::EDWARDS_D) + &Z; // v = dy²+1
        let (is_valid_x, mut X) = FieldElement::sqrt_ratio_i(&u, &v);

        if !bool::from(is_valid_x) {
            return Err(Error::InvalidPoint);
        }

        let compressed_sign_bit = Choice::from(self.as_bytes()[31] >> 7);

        // The encoding with x = 0 and the sign bit set is invalid.
        if bool::from(X.is_zero() & compressed_sign_bit) {
            return Err(Error::InvalidPoint);
        }

        // Flip the sign of X if it does not match the sign bit.
        X.conditional_negate(X.is_negative() ^ compressed_sign_bit);

        Ok(EdwardsPoint {
            X,
            Y,
            Z,
            T: &X * &Y,
        })
    }
}

// ------------------------------------------------------------------------
// Affine points
// ------------------------------------------------------------------------

/// A point \\((x, y)\\) on the curve in affine coordinates.
///
/// Affine points are the keys of the precomputation cache used by
/// constant-time scalar multiplication: two `EdwardsPoint`s that
/// normalize to the same `AffinePoint` share a table.
#[derive(Copy, Clone, Debug)]
pub struct AffinePoint {
    pub(crate) x: FieldElement,
    pub(crate) y: FieldElement,
}

impl Identity for AffinePoint {
    fn identity() -> AffinePoint {
        AffinePoint {
            x: FieldElement::ZERO,
            y: FieldElement::ONE,
        }
    }
}

impl Default for AffinePoint {
    fn default() -> AffinePoint {
        AffinePoint::identity()
    }
}

impl ConstantTimeEq for AffinePoint {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.x.ct_eq(&other.x) & self.y.ct_eq(&other.y)
    }
}

impl PartialEq for AffinePoint {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for AffinePoint {}

impl AffinePoint {
    /// Convert to extended coordinates.
    pub fn to_edwards(self) -> EdwardsPoint {
        EdwardsPoint {
            X: self.x,
            Y: self.y,
            Z: FieldElement::ONE,
            T: &self.x * &self.y,
        }
    }

    /// Compress this point into `CompressedEdwardsY` format.
    pub fn compress(&self) -> CompressedEdwardsY {
        let mut s = self.y.to_bytes();
        s[31] ^= self.x.is_negative().unwrap_u8() << 7;
        CompressedEdwardsY(s)
    }

    /// Set the precomputation window width used when this point is the
    /// base of repeated scalar multiplications.
    ///
    /// Accepted widths are 2, 4, 8, and 16; anything else fails with
    /// [`Error::InvalidWindow`].  Changing the width invalidates any
    /// table already cached for this point.
    pub fn set_window_size(&self, w: u8) -> Result<(), Error> {
        window::set_window_size(self.compress().to_bytes(), w)
    }
}

impl<'a, 'b> Mul<&'b Scalar> for &'a AffinePoint {
    type Output = EdwardsPoint;
    /// Constant-time fixed-window scalar multiplication using this
    /// point's cached precomputation table.
    fn mul(self, scalar: &'b Scalar) -> EdwardsPoint {
        window::mul_with_key(
            &self.to_edwards(),
            self.compress().to_bytes(),
            &scalar.bytes,
        )
    }
}

define_mul_variants!(LHS = AffinePoint, RHS = Scalar, Output = EdwardsPoint);

impl<'a, 'b> Mul<&'b AffinePoint> for &'a Scalar {
    type Output = EdwardsPoint;
    fn mul(self, point: &'b AffinePoint) -> EdwardsPoint {
        point * self
    }
}

define_mul_variants!(LHS = Scalar, RHS = AffinePoint, Output = EdwardsPoint);

// ------------------------------------------------------------------------
// Extended points
// ------------------------------------------------------------------------

/// An `EdwardsPoint` represents a point on the Edwards form of
/// Curve25519, in the extended twisted Edwards coordinates of Hisil,
/// Wong, Carter, and Dawson.
#[derive(Copy, Clone)]
pub struct EdwardsPoint {
    pub(crate) X: FieldElement,
    pub(crate) Y: FieldElement,
    pub(crate) Z: FieldElement,
    pub(crate) T: FieldElement,
}

impl Debug for EdwardsPoint {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "EdwardsPoint{{\n\tX: {:?},\n\tY: {:?},\n\tZ: {:?},\n\tT: {:?}\n}}",
            &self.X, &self.Y, &self.Z, &self.T
        )
    }
}

impl Identity for EdwardsPoint {
    fn identity() -> EdwardsPoint {
        EdwardsPoint {
            X: FieldElement::ZERO,
            Y: FieldElement::ONE,
            Z: FieldElement::ONE,
            T: FieldElement::ZERO,
        }
    }
}

impl Default for EdwardsPoint {
    fn default() -> EdwardsPoint {
        EdwardsPoint::identity()
    }
}

impl ConstantTimeEq for EdwardsPoint {
    /// Projective equality: \\((X_1 : Y_1 : Z_1) = (X_2 : Y_2 : Z_2)\\)
    /// iff \\(X_1 Z_2 = X_2 Z_1\\) and \\(Y_1 Z_2 = Y_2 Z_1\\).
    fn ct_eq(&self, other: &EdwardsPoint) -> Choice {
        (&self.X * &other.Z).ct_eq(&(&other.X * &self.Z))
            & (&self.Y * &other.Z).ct_eq(&(&other.Y * &self.Z))
    }
}

impl PartialEq for EdwardsPoint {
    fn eq(&self, other: &EdwardsPoint) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for EdwardsPoint {}

impl ConditionallySelectable for EdwardsPoint {
    fn conditional_select(a: &EdwardsPoint, b: &EdwardsPoint, choice: Choice) -> EdwardsPoint {
        EdwardsPoint {
            X: FieldElement::conditional_select(&a.X, &b.X, choice),
            Y: FieldElement::conditional_select(&a.Y, &b.Y, choice),
            Z: FieldElement::conditional_select(&a.Z, &b.Z, choice),
            T: FieldElement::conditional_select(&a.T, &b.T, choice),
        }
    }
}

impl ValidityCheck for EdwardsPoint {
    fn is_valid(&self) -> bool {
        let point_on_curve = self.as_projective().is_valid();
        let on_segre_image = (&self.X * &self.Y) == (&self.Z * &self.T);

        point_on_curve && on_segre_image
    }
}

// ------------------------------------------------------------------------
// Point conversions
// ------------------------------------------------------------------------

impl EdwardsPoint {
    /// Convert to a `ProjectiveNielsPoint`.
    pub(crate) fn as_projective_niels(&self) -> ProjectiveNielsPoint {
        ProjectiveNielsPoint {
            Y_plus_X: &self.Y + &self.X,
            Y_minus_X: &self.Y - &self.X,
            Z: self.Z,
            T2d: &self.T * &constants::EDWARDS_D2,
        }
    }

    /// Convert the representation of this point from extended to
    /// projective coordinates.  Free.
    pub(crate) fn as_projective(&self) -> ProjectivePoint {
        ProjectivePoint {
            X: self.X,
            Y: self.Y,
            Z: self.Z,
        }
    }

    /// Dehomogenize to affine coordinates, dividing by `Z`.
    pub fn to_affine(&self) -> AffinePoint {
        let recip = self.Z.invert();
        AffinePoint {
            x: &self.X * &recip,
            y: &self.Y * &recip,
        }
    }

    /// Convert this `EdwardsPoint` to its equivalent on the Montgomery
    /// form of the curve, \\(u = (Z+Y)/(Z-Y)\\).
    ///
    /// This is a one-way conversion: the Montgomery model does not
    /// retain sign information.  The identity maps to \\(u = 0\\)
    /// together with the 2-torsion point \\((0, -1)\\).
    pub fn to_montgomery(&self) -> MontgomeryPoint {
        let U = &self.Z + &self.Y;
        let W = &self.Z - &self.Y;
        let u = &U * &W.invert();
        MontgomeryPoint(u.to_bytes())
    }

    /// Compress this point to `CompressedEdwardsY` format.
    pub fn compress(&self) -> CompressedEdwardsY {
        self.to_affine().compress()
    }

    /// Normalize a batch of extended points so that each has
    /// \\(Z = 1\\), sharing the cost of the inversions.
    ///
    /// The Z-coordinates are batch-inverted with one field inversion
    /// and \\(O(n)\\) multiplications, each point is converted to
    /// affine, then re-lifted to extended form.
    pub fn batch_normalize(points: &mut [EdwardsPoint]) {
        let mut z_coords: Vec<FieldElement> = points.iter().map(|p| p.Z).collect();
        FieldElement::batch_invert(&mut z_coords);

        for (p, z_inv) in points.iter_mut().zip(z_coords.iter()) {
            let x = &p.X * z_inv;
            let y = &p.Y * z_inv;
            p.X = x;
            p.Y = y;
            p.Z = FieldElement::ONE;
            p.T = &x * &y;
        }
    }
}

// ------------------------------------------------------------------------
// Doubling
// ------------------------------------------------------------------------

impl EdwardsPoint {
    /// Add this point to itself.
    pub(crate) fn double(&self) -> EdwardsPoint {
        self.as_projective().double().as_extended()
    }
}

// ------------------------------------------------------------------------
// Addition and Subtraction
// ------------------------------------------------------------------------

impl<'a, 'b> Add<&'b EdwardsPoint> for &'a EdwardsPoint {
    type Output = EdwardsPoint;
    fn add(self, other: &'b EdwardsPoint) -> EdwardsPoint {
        (self + &other.as_projective_niels()).as_extended()
    }
}

define_add_variants!(LHS = EdwardsPoint, RHS = EdwardsPoint, Output = EdwardsPoint);

impl<'b> AddAssign<&'b EdwardsPoint> for EdwardsPoint {
    fn add_assign(&mut self, rhs: &'b EdwardsPoint) {
        *self = &*self + rhs;
    }
}

define_add_assign_variants!(LHS = EdwardsPoint, RHS = EdwardsPoint);

impl<'a, 'b> Sub<&'b EdwardsPoint> for &'a EdwardsPoint {
    type Output = EdwardsPoint;
    fn sub(self, other: &'b EdwardsPoint) -> EdwardsPoint {
        (self - &other.as_projective_niels()).as_extended()
    }
}

define_sub_variants!(LHS = EdwardsPoint, RHS = EdwardsPoint, Output = EdwardsPoint);

impl<'b> SubAssign<&'b EdwardsPoint> for EdwardsPoint {
    fn sub_assign(&mut self, rhs: &'b EdwardsPoint) {
        *self = &*self - rhs;
    }
}

define_sub_assign_variants!(LHS = EdwardsPoint, RHS = EdwardsPoint);

// ------------------------------------------------------------------------
// Negation
// ------------------------------------------------------------------------

impl<'a> Neg for &'a EdwardsPoint {
    type Output = EdwardsPoint;

    fn neg(self) -> EdwardsPoint {
        EdwardsPoint {
            X: -(&self.X),
            Y: self.Y,
            Z: self.Z,
            T: -(&self.T),
        }
    }
}

impl Neg for EdwardsPoint {
    type Output = EdwardsPoint;

    fn neg(self) -> EdwardsPoint {
        -&self
    }
}

// ------------------------------------------------------------------------
// Scalar multiplication
// ------------------------------------------------------------------------

impl<'a, 'b> Mul<&'b Scalar> for &'a EdwardsPoint {
    type Output = EdwardsPoint;
    /// Constant-time scalar multiplication using the fixed-window
    /// signed-digit method and this point's cached precomputation
    /// table.
    fn mul(self, scalar: &'b Scalar) -> EdwardsPoint {
        window::mul(self, &scalar.bytes)
    }
}

define_mul_variants!(LHS = EdwardsPoint, RHS = Scalar, Output = EdwardsPoint);

impl<'a, 'b> Mul<&'b EdwardsPoint> for &'a Scalar {
    type Output = EdwardsPoint;
    fn mul(self, point: &'b EdwardsPoint) -> EdwardsPoint {
        point * self
    }
}

define_mul_variants!(LHS = Scalar, RHS = EdwardsPoint, Output = EdwardsPoint);

impl<'b> MulAssign<&'b Scalar> for EdwardsPoint {
    fn mul_assign(&mut self, scalar: &'b Scalar) {
        *self = &*self * scalar;
    }
}

define_mul_assign_variants!(LHS = EdwardsPoint, RHS = Scalar);

impl EdwardsPoint {
    /// Compute \\(aB\\), where \\(B\\) is the Ed25519 basepoint.
    /// Constant-time.
    pub fn mul_base(scalar: &Scalar) -> EdwardsPoint {
        window::mul_base(&scalar.bytes)
    }

    /// Multiply the basepoint by `clamp_integer(bytes)`.
    pub fn mul_base_clamped(bytes: [u8; 32]) -> EdwardsPoint {
        window::mul_base(&clamp_integer(bytes))
    }

    /// Variable-time double-and-add scalar multiplication, for public
    /// inputs only (e.g. signature verification).
    ///
    /// Accepts any 256-bit scalar; no reduction mod \\(\ell\\) is
    /// performed.
    pub fn vartime_mul(&self, scalar: &Scalar) -> EdwardsPoint {
        // Scalar one is common in verification equations and both
        // inputs are public here, so skip the ladder outright.
        if scalar.bytes == Scalar::ONE.bytes {
            return *self;
        }

        let mut Q = EdwardsPoint::identity();
        let mut P = *self;
        for i in 0..256 {
            if scalar.bit(i) == 1 {
                Q = &Q + &P;
            }
            if i < 255 {
                P = P.double();
            }
        }
        Q
    }

    /// Set the precomputation window width used when this point is the
    /// base of repeated constant-time scalar multiplications.
    ///
    /// Accepted widths are 2, 4, 8, and 16; anything else fails with
    /// [`Error::InvalidWindow`].  Changing the width invalidates the
    /// cached table.
    pub fn set_window_size(&self, w: u8) -> Result<(), Error> {
        window::set_window_size(self.compress().to_bytes(), w)
    }
}

// ------------------------------------------------------------------------
// Cofactor tools
// ------------------------------------------------------------------------

impl EdwardsPoint {
    /// Multiply by the cofactor: return \\([8]P\\).
    pub fn mul_by_cofactor(&self) -> EdwardsPoint {
        self.mul_by_pow_2(3)
    }

    /// Compute \\([2^k]P\\) by successive doublings.  Requires \\(k > 0\\).
    pub(crate) fn mul_by_pow_2(&self, k: u32) -> EdwardsPoint {
        debug_assert!(k > 0);
        let mut r: CompletedPoint;
        let mut s = self.as_projective();
        for _ in 0..(k - 1) {
            r = s.double();
            s = r.as_projective();
        }
        // Unroll the last iteration to go directly to extended form.
        s.double().as_extended()
    }

    /// Determine if this point is of small order, i.e. in the 8-torsion
    /// subgroup \\(\mathcal E[8]\\).
    pub fn is_small_order(&self) -> bool {
        self.mul_by_cofactor().is_identity()
    }

    /// Determine if this point is "torsion-free", i.e. in the
    /// prime-order subgroup.
    pub fn is_torsion_free(&self) -> bool {
        (self.vartime_mul(&constants::BASEPOINT_ORDER)).is_identity()
    }
}

// ------------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    /// X coordinate of the basepoint.
    /// = 15112221349535400772501151409588531511454012693041857206046113283949847762202
    static BASE_X_COORD_BYTES: [u8; 32] = [
        0x1a, 0xd5, 0x25, 0x8f, 0x60, 0x2d, 0x56, 0xc9, 0xb2, 0xa7, 0x25, 0x95, 0x60, 0xc7, 0x2c,
        0x69, 0x5c, 0xdc, 0xd6, 0xfd, 0x31, 0xe2, 0xa4, 0xc0, 0xfe, 0x53, 0x6e, 0xcd, 0xd3, 0x36,
        0x69, 0x21,
    ];

    /// Compressed Edwards Y form of 2*basepoint.
    static BASE2_CMPRSSD: CompressedEdwardsY = CompressedEdwardsY([
        0xc9, 0xa3, 0xf8, 0x6a, 0xae, 0x46, 0x5f, 0x0e, 0x56, 0x51, 0x38, 0x64, 0x51, 0x0f, 0x39,
        0x97, 0x56, 0x1f, 0xa2, 0xc9, 0xe8, 0x5e, 0xa2, 0x1d, 0xc2, 0x29, 0x23, 0x09, 0xf3, 0xcd,
        0x60, 0x22,
    ]);

    /// Compressed Edwards Y form of 16*basepoint.
    static BASE16_CMPRSSD: CompressedEdwardsY = CompressedEdwardsY([
        0xeb, 0x27, 0x67, 0xc1, 0x37, 0xab, 0x7a, 0xd8, 0x27, 0x9c, 0x07, 0x8e, 0xff, 0x11, 0x6a,
        0xb0, 0x78, 0x6e, 0xad, 0x3a, 0x2e, 0x0f, 0x98, 0x9f, 0x72, 0xc3, 0x7f, 0x82, 0xf2, 0x96,
        0x96, 0x70,
    ]);

    /// 4493907448824000747700850167940867464579944529806937181821189941592931634714
    pub(crate) static A_SCALAR: Scalar = Scalar {
        bytes: [
            0x1a, 0x0e, 0x97, 0x8a, 0x90, 0xf6, 0x62, 0x2d, 0x37, 0x47, 0x02, 0x3f, 0x8a, 0xd8,
            0x26, 0x4d, 0xa7, 0x58, 0xaa, 0x1b, 0x88, 0xe0, 0x40, 0xd1, 0x58, 0x9e, 0x7b, 0x7f,
            0x23, 0x76, 0xef, 0x09,
        ],
    };

    /// A_SCALAR * basepoint, computed with ed25519.py
    pub(crate) static A_TIMES_BASEPOINT: CompressedEdwardsY = CompressedEdwardsY([
        0xea, 0x27, 0xe2, 0x60, 0x53, 0xdf, 0x1b, 0x59, 0x56, 0xf1, 0x4d, 0x5d, 0xec, 0x3c, 0x34,
        0xc3, 0x84, 0xa2, 0x69, 0xb7, 0x4c, 0xc3, 0x80, 0x3e, 0xa8, 0xe2, 0xe7, 0xc9, 0x42, 0x5e,
        0x40, 0xa5,
    ]);

    /// Test round-trip decompression for the basepoint.
    #[test]
    fn basepoint_decompression_compression() {
        let base_X = FieldElement::from_bytes(&BASE_X_COORD_BYTES);
        let bp = constants::ED25519_BASEPOINT_COMPRESSED.decompress().unwrap();
        assert!(bp.is_valid());
        // Check that decompression actually gives the correct X coordinate
        assert_eq!(base_X, bp.X);
        assert_eq!(bp.compress(), constants::ED25519_BASEPOINT_COMPRESSED);
    }

    /// Test sign handling in decompression.
    #[test]
    fn decompression_sign_handling() {
        // Manually set the high bit of the last byte to flip the sign
        let mut minus_basepoint_bytes = *constants::ED25519_BASEPOINT_COMPRESSED.as_bytes();
        minus_basepoint_bytes[31] |= 1 << 7;
        let minus_basepoint = CompressedEdwardsY(minus_basepoint_bytes)
            .decompress()
            .unwrap();
        // The projective coordinates should differ by exactly a flipped sign.
        assert_eq!(minus_basepoint.X, -(&constants::ED25519_BASEPOINT_POINT.X));
        assert_eq!(minus_basepoint.Y, constants::ED25519_BASEPOINT_POINT.Y);
        assert_eq!(minus_basepoint.Z, constants::ED25519_BASEPOINT_POINT.Z);
        assert_eq!(minus_basepoint.T, -(&constants::ED25519_BASEPOINT_POINT.T));
    }

    /// Strict decompression rejects a non-canonical y, but the ZIP215
    /// rule accepts it and yields the same point as the canonical form.
    #[test]
    fn decompression_strict_vs_unchecked() {
        // 2^255 - 18 is the non-canonical encoding of 1, so this is the
        // identity with y encoded as y + p.
        let noncanonical_identity = CompressedEdwardsY([
            0xee, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
            0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
            0xff, 0xff, 0xff, 0x7f,
        ]);
        assert_eq!(noncanonical_identity.decompress(), Err(Error::InvalidPoint));
        let P = noncanonical_identity.decompress_unchecked().unwrap();
        assert!(P.is_identity());
    }

    /// The encoding with x = 0 and the sign bit set must be rejected.
    #[test]
    fn decompression_rejects_negative_zero_x() {
        let mut identity_with_sign = CompressedEdwardsY::identity().to_bytes();
        identity_with_sign[31] |= 1 << 7;
        let bad = CompressedEdwardsY(identity_with_sign);
        assert_eq!(bad.decompress(), Err(Error::InvalidPoint));
        assert_eq!(bad.decompress_unchecked(), Err(Error::InvalidPoint));
    }

    /// Test `impl Add<EdwardsPoint> for EdwardsPoint`
    /// using basepoint + basepoint versus the 2*basepoint constant.
    #[test]
    fn basepoint_plus_basepoint_vs_basepoint2() {
        let bp = constants::ED25519_BASEPOINT_POINT;
        let bp_added = &bp + &bp;
        assert_eq!(bp_added.compress(), BASE2_CMPRSSD);
    }

    /// Test basepoint.double() versus the 2*basepoint constant.
    #[test]
    fn basepoint_double_vs_basepoint2() {
        assert_eq!(
            constants::ED25519_BASEPOINT_POINT.double().compress(),
            BASE2_CMPRSSD
        );
    }

    /// Check that equality of `EdwardsPoints` handles projective
    /// coordinates correctly.
    #[test]
    fn extended_point_equality_handles_scaling() {
        let mut two_bytes = [0u8; 32];
        two_bytes[0] = 2;
        let id1 = EdwardsPoint::identity();
        let id2 = EdwardsPoint {
            X: FieldElement::ZERO,
            Y: FieldElement::from_bytes(&two_bytes),
            Z: FieldElement::from_bytes(&two_bytes),
            T: FieldElement::ZERO,
        };
        assert!(bool::from(id1.ct_eq(&id2)));
    }

    /// Test computing 16*basepoint vs mul_by_pow_2(4).
    #[test]
    fn basepoint16_vs_mul_by_pow_2_4() {
        let bp16 = constants::ED25519_BASEPOINT_POINT.mul_by_pow_2(4);
        assert_eq!(bp16.compress(), BASE16_CMPRSSD);
    }

    /// Test constant-time scalar mult versus a known multiple from
    /// ed25519.py.
    #[test]
    fn scalar_mul_vs_ed25519py() {
        let aB = &constants::ED25519_BASEPOINT_POINT * &A_SCALAR;
        assert_eq!(aB.compress(), A_TIMES_BASEPOINT);
    }

    /// The same, through the fixed-base entry point.
    #[test]
    fn mul_base_vs_ed25519py() {
        let aB = EdwardsPoint::mul_base(&A_SCALAR);
        assert_eq!(aB.compress(), A_TIMES_BASEPOINT);
    }

    /// The same, through the variable-time entry point.
    #[test]
    fn vartime_mul_vs_ed25519py() {
        let aB = constants::ED25519_BASEPOINT_POINT.vartime_mul(&A_SCALAR);
        assert_eq!(aB.compress(), A_TIMES_BASEPOINT);
    }

    #[test]
    fn scalar_mul_works_both_ways() {
        let G = constants::ED25519_BASEPOINT_POINT;
        let s = A_SCALAR;

        let P1 = &G * &s;
        let P2 = &s * &G;

        assert_eq!(P1.compress().to_bytes(), P2.compress().to_bytes());
    }

    /// Multiplying the basepoint by the group order gives the identity.
    #[test]
    fn mul_by_basepoint_order() {
        let should_be_id = &constants::ED25519_BASEPOINT_POINT * &constants::BASEPOINT_ORDER;
        assert!(should_be_id.is_identity());
        let also_id = constants::ED25519_BASEPOINT_POINT.vartime_mul(&constants::BASEPOINT_ORDER);
        assert!(also_id.is_identity());
    }

    /// a(bP) == (ab)P and (a+b)P == aP + bP.
    #[test]
    fn scalar_mul_homomorphisms() {
        let a = A_SCALAR;
        let b = Scalar::from(12345678u64);
        let P = constants::ED25519_BASEPOINT_POINT;

        let a_bP = &a * &(&b * &P);
        let ab_P = &(&a * &b) * &P;
        assert_eq!(a_bP, ab_P);

        let a_plus_b_P = &(&a + &b) * &P;
        let aP_plus_bP = &(&a * &P) + &(&b * &P);
        assert_eq!(a_plus_b_P, aP_plus_bP);
    }

    /// P + (-P) == O, P + O == P.
    #[test]
    fn additive_identities() {
        let P = constants::ED25519_BASEPOINT_POINT;
        assert!((&P + &(-&P)).is_identity());
        assert_eq!(&P + &EdwardsPoint::identity(), P);
    }

    #[test]
    fn affine_round_trip() {
        let aB = &constants::ED25519_BASEPOINT_POINT * &A_SCALAR;
        let affine = aB.to_affine();
        assert_eq!(affine.to_edwards(), aB);
        assert_eq!(affine.compress(), aB.compress());
    }

    #[test]
    fn batch_normalize_matches_compress() {
        let B = constants::ED25519_BASEPOINT_POINT;
        let mut points = [&B * &A_SCALAR, B.double(), &B + &B.double()];
        let compressed: Vec<_> = points.iter().map(|p| p.compress()).collect();
        EdwardsPoint::batch_normalize(&mut points);
        for (p, c) in points.iter().zip(compressed.iter()) {
            assert_eq!(p.Z, FieldElement::ONE);
            assert_eq!(p.compress(), *c);
        }
    }

    #[test]
    fn is_small_order() {
        // The basepoint has large prime order
        assert!(!constants::ED25519_BASEPOINT_POINT.is_small_order());
        // constants::EIGHT_TORSION has all points of small order.
        for torsion_point in &constants::EIGHT_TORSION {
            assert!(torsion_point.is_small_order());
        }
    }

    #[test]
    fn is_torsion_free() {
        assert!(constants::ED25519_BASEPOINT_POINT.is_torsion_free());
        for torsion_point in &constants::EIGHT_TORSION[1..] {
            assert!(!torsion_point.is_torsion_free());
        }
        // B + torsion is not torsion-free
        let sum = &constants::ED25519_BASEPOINT_POINT + &constants::EIGHT_TORSION[1];
        assert!(!sum.is_torsion_free());
    }

    #[test]
    fn compressed_identity() {
        assert_eq!(
            EdwardsPoint::identity().compress(),
            CompressedEdwardsY::identity()
        );
    }

    #[test]
    fn is_identity() {
        assert!(EdwardsPoint::identity().is_identity());
        assert!(!constants::ED25519_BASEPOINT_POINT.is_identity());
    }

    #[test]
    fn from_slice_length_check() {
        assert_eq!(
            CompressedEdwardsY::from_slice(&[0u8; 31]),
            Err(Error::InvalidLength {
                name: "CompressedEdwardsY",
                expected: 32
            })
        );
    }

    #[test]
    fn window_size_validation() {
        let B = constants::ED25519_BASEPOINT_POINT;
        assert_eq!(B.set_window_size(3), Err(Error::InvalidWindow));
        assert_eq!(B.set_window_size(0), Err(Error::InvalidWindow));
        assert_eq!(B.set_window_size(32), Err(Error::InvalidWindow));
        // Width 16 is accepted (its table is ~50MB, so it is not
        // exercised here).
        assert!((&B * &A_SCALAR).set_window_size(16).is_ok());
        // The narrow widths still compute the right multiple.
        for w in [2u8, 4, 8] {
            let P = B.double();
            P.set_window_size(w).unwrap();
            let aPB = &P * &Scalar::from(99u64);
            assert_eq!(aPB, P.vartime_mul(&Scalar::from(99u64)));
        }
    }
}
