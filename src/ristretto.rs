// -*- mode: rust; -*-
//
// This file is part of curve25519-oxide.
// See LICENSE for licensing information.

//! An implementation of Ristretto255, the prime-order group built from
//! the cosets of the Edwards curve's 8-torsion subgroup.
//!
//! Ristretto's decoding and encoding are arranged so that equivalent
//! cosets decode to equal group elements, which removes the cofactor
//! pitfalls of working with the Edwards curve directly.

#![allow(non_snake_case)]

use core::borrow::Borrow;
use core::fmt::Debug;
use core::iter::Sum;
use core::ops::{Add, AddAssign};
use core::ops::{Mul, MulAssign};
use core::ops::{Neg, Sub, SubAssign};

use digest::{generic_array::typenum::U64, Digest};
use rand_core::CryptoRngCore;
use subtle::Choice;
use subtle::ConditionallyNegatable;
use subtle::ConditionallySelectable;
use subtle::ConstantTimeEq;

use crate::constants;
use crate::curve_models::CompletedPoint;
use crate::edwards::EdwardsPoint;
use crate::errors::Error;
use crate::field::FieldElement;
use crate::scalar::Scalar;
use crate::traits::Identity;

// ------------------------------------------------------------------------
// Compressed points
// ------------------------------------------------------------------------

/// A Ristretto point, in compressed wire format.
///
/// The Ristretto encoding is canonical: two `RistrettoPoint`s are
/// equal if and only if their encodings are equal, bytewise.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct CompressedRistretto(pub [u8; 32]);

impl Debug for CompressedRistretto {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "CompressedRistretto: {:?}", self.as_bytes())
    }
}

impl Identity for CompressedRistretto {
    fn identity() -> CompressedRistretto {
        CompressedRistretto([0u8; 32])
    }
}

impl CompressedRistretto {
    /// View this `CompressedRistretto` as an array of bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Copy this `CompressedRistretto` to an array of bytes.
    pub const fn to_bytes(&self) -> [u8; 32] {
        self.0
    }

    /// Construct a `CompressedRistretto` from a slice of bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<CompressedRistretto, Error> {
        if bytes.len() != 32 {
            return Err(Error::InvalidLength {
                name: "CompressedRistretto",
                expected: 32,
            });
        }
        let mut arr = [0u8; 32];
        arr.copy_from_slice(bytes);
        Ok(CompressedRistretto(arr))
    }

    /// Attempt to decompress to a `RistrettoPoint`.
    ///
    /// Fails with [`Error::InvalidEncoding`] unless the input is the
    /// canonical encoding of a point.
    pub fn decompress(&self) -> Result<RistrettoPoint, Error> {
        // Step 1: the bytes must encode a canonical, nonnegative field
        // element.  The decoding routine ignores the high bit and
        // silently reduces values in [p, 2^255), so the check is a
        // bytewise re-encode comparison, done before any curve
        // arithmetic.
        let s = FieldElement::from_bytes(&self.0);
        if s.to_bytes() != self.0 {
            return Err(Error::InvalidEncoding);
        }
        if s.is_negative().into() {
            return Err(Error::InvalidEncoding);
        }

        // Step 2: reconstruct the extended coordinates.
        let one = FieldElement::ONE;
        let ss = s.square();
        let u1 = &one - &ss; //  1 + as²   with a = -1
        let u2 = &one + &ss; //  1 - as²
        let u2_sqr = u2.square();

        // v = ad(1+as²)² - (1-as²)²   with d = -121665/121666
        let v = &(&(-&constants::EDWARDS_D) * &u1.square()) - &u2_sqr;

        // 1/sqrt(v·u2²)
        let (ok, I) = (&v * &u2_sqr).invsqrt();

        let Dx = &I * &u2; // 1/sqrt(v)
        let Dy = &I * &(&Dx * &v); // 1/u2

        // x = |2s/sqrt(v)|
        let mut x = &(&s + &s) * &Dx;
        let x_neg = x.is_negative();
        x.conditional_negate(x_neg);

        // y = (1-as²)/(1+as²)
        let y = &u1 * &Dy;

        let t = &x * &y;

        // Reject if the square root was invalid, t is negative, or y
        // is zero.
        if (!ok | t.is_negative() | y.is_zero()).into() {
            return Err(Error::InvalidEncoding);
        }

        Ok(RistrettoPoint(EdwardsPoint {
            X: x,
            Y: y,
            Z: one,
            T: t,
        }))
    }
}

// ------------------------------------------------------------------------
// The group
// ------------------------------------------------------------------------

/// A `RistrettoPoint` represents an element of the prime-order
/// Ristretto group, carried by a representative point on the Edwards
/// curve.  Equivalent cosets decode to equal `RistrettoPoint`s.
#[derive(Copy, Clone)]
pub struct RistrettoPoint(pub(crate) EdwardsPoint);

impl Debug for RistrettoPoint {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "RistrettoPoint: {:?}", self.0)
    }
}

impl Identity for RistrettoPoint {
    fn identity() -> RistrettoPoint {
        RistrettoPoint(EdwardsPoint::identity())
    }
}

impl Default for RistrettoPoint {
    fn default() -> RistrettoPoint {
        RistrettoPoint::identity()
    }
}

impl ConstantTimeEq for RistrettoPoint {
    /// Test equality between two `RistrettoPoint`s.
    ///
    /// The two-branch test accounts for the coset equivalences:
    /// \\(x_1 y_2 = y_1 x_2\\) or \\(y_1 y_2 = x_1 x_2\\).
    fn ct_eq(&self, other: &RistrettoPoint) -> Choice {
        let X1Y2 = &self.0.X * &other.0.Y;
        let Y1X2 = &self.0.Y * &other.0.X;
        let X1X2 = &self.0.X * &other.0.X;
        let Y1Y2 = &self.0.Y * &other.0.Y;

        X1Y2.ct_eq(&Y1X2) | X1X2.ct_eq(&Y1Y2)
    }
}

impl PartialEq for RistrettoPoint {
    fn eq(&self, other: &RistrettoPoint) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for RistrettoPoint {}

impl RistrettoPoint {
    /// Compress this point using the Ristretto encoding.
    ///
    /// The encoding selects the canonical coset representative: the
    /// \\(\sqrt{-1}\\) rotation is applied when needed and the sign of
    /// `s` is forced nonnegative.
    pub fn compress(&self) -> CompressedRistretto {
        let mut X = self.0.X;
        let mut Y = self.0.Y;
        let Z = &self.0.Z;
        let T = &self.0.T;

        let u1 = &(Z + &Y) * &(Z - &Y);
        let u2 = &X * &Y;
        // u1·u2² is always square for a valid representative, so the
        // validity bit can be ignored.
        let (_, invsqrt) = (&u1 * &u2.square()).invsqrt();
        let i1 = &invsqrt * &u1;
        let i2 = &invsqrt * &u2;
        let z_inv = &i1 * &(&i2 * T);
        let mut den_inv = i2;

        let iX = &X * &constants::SQRT_M1;
        let iY = &Y * &constants::SQRT_M1;
        let rotated_den = &i1 * &constants::INVSQRT_A_MINUS_D;

        let rotate = (T * &z_inv).is_negative();

        X.conditional_assign(&iY, rotate);
        Y.conditional_assign(&iX, rotate);
        den_inv.conditional_assign(&rotated_den, rotate);

        Y.conditional_negate((&X * &z_inv).is_negative());

        let mut s = &den_inv * &(Z - &Y);
        let s_is_negative = s.is_negative();
        s.conditional_negate(s_is_negative);

        CompressedRistretto(s.to_bytes())
    }

    /// Compute \\(aB\\), where \\(B\\) is the Ristretto basepoint.
    /// Constant-time.
    pub fn mul_base(scalar: &Scalar) -> RistrettoPoint {
        RistrettoPoint(EdwardsPoint::mul_base(scalar))
    }

    /// Return a `RistrettoPoint` chosen uniformly at random using a
    /// user-provided RNG.
    ///
    /// Applies the Elligator map twice and adds the results, so the
    /// output is uniform and its discrete log unknown.
    pub fn random<R: CryptoRngCore + ?Sized>(rng: &mut R) -> Self {
        let mut uniform_bytes = [0u8; 64];
        rng.fill_bytes(&mut uniform_bytes);
        RistrettoPoint::from_uniform_bytes(&uniform_bytes)
    }

    /// Hash a slice of bytes into a `RistrettoPoint`.
    ///
    /// Takes a type parameter `D`, which is any `Digest` producing 64
    /// bytes of output.
    pub fn hash_from_bytes<D>(input: &[u8]) -> RistrettoPoint
    where
        D: Digest<OutputSize = U64> + Default,
    {
        let mut hash = D::default();
        hash.update(input);
        RistrettoPoint::from_hash(hash)
    }

    /// Construct a `RistrettoPoint` from an existing `Digest`
    /// instance.
    pub fn from_hash<D>(hash: D) -> RistrettoPoint
    where
        D: Digest<OutputSize = U64>,
    {
        let mut output = [0u8; 64];
        output.copy_from_slice(hash.finalize().as_slice());

        RistrettoPoint::from_uniform_bytes(&output)
    }

    /// Construct a `RistrettoPoint` from 64 bytes of data.
    ///
    /// Splits the input into two halves, takes the low 255 bits of
    /// each half as a field element, applies the Ristretto-flavoured
    /// Elligator map to each, and adds the results.  If the input
    /// bytes are uniformly distributed, the output is uniformly
    /// distributed over the group.
    pub fn from_uniform_bytes(bytes: &[u8; 64]) -> RistrettoPoint {
        let mut r_1_bytes = [0u8; 32];
        r_1_bytes.copy_from_slice(&bytes[0..32]);
        let r_1 = FieldElement::from_bytes(&r_1_bytes);
        let R_1 = RistrettoPoint::elligator_ristretto_flavor(&r_1);

        let mut r_2_bytes = [0u8; 32];
        r_2_bytes.copy_from_slice(&bytes[32..64]);
        let r_2 = FieldElement::from_bytes(&r_2_bytes);
        let R_2 = RistrettoPoint::elligator_ristretto_flavor(&r_2);

        &R_1 + &R_2
    }

    /// Compute the Ristretto-flavoured Elligator 2 map of a field
    /// element, constant-time.
    pub(crate) fn elligator_ristretto_flavor(r_0: &FieldElement) -> RistrettoPoint {
        let i = &constants::SQRT_M1;
        let d = &constants::EDWARDS_D;
        let one_minus_d_sq = &constants::ONE_MINUS_D_SQ;
        let d_minus_one_sq = &constants::D_MINUS_ONE_SQ;
        let mut c = FieldElement::MINUS_ONE;

        let one = FieldElement::ONE;

        let r = i * &r_0.square();
        let N_s = &(&r + &one) * one_minus_d_sq;
        let D = &(&c - &(d * &r)) * &(&r + d);

        let (Ns_D_is_sq, mut s) = FieldElement::sqrt_ratio_i(&N_s, &D);
        let mut s_prime = &s * r_0;
        let s_prime_is_pos = !s_prime.is_negative();
        s_prime.conditional_negate(s_prime_is_pos);

        s.conditional_assign(&s_prime, !Ns_D_is_sq);
        c.conditional_assign(&r, !Ns_D_is_sq);

        let N_t = &(&(&c * &(&r - &one)) * d_minus_one_sq) - &D;
        let s_sq = s.square();

        let P = CompletedPoint {
            X: &(&s + &s) * &D,
            Z: &N_t * &constants::SQRT_AD_MINUS_ONE,
            Y: &one - &s_sq,
            T: &one + &s_sq,
        };

        RistrettoPoint(P.as_extended())
    }
}

// ------------------------------------------------------------------------
// Arithmetic
// ------------------------------------------------------------------------

impl<'a, 'b> Add<&'b RistrettoPoint> for &'a RistrettoPoint {
    type Output = RistrettoPoint;

    fn add(self, other: &'b RistrettoPoint) -> RistrettoPoint {
        RistrettoPoint(&self.0 + &other.0)
    }
}

define_add_variants!(LHS = RistrettoPoint, RHS = RistrettoPoint, Output = RistrettoPoint);

impl<'b> AddAssign<&'b RistrettoPoint> for RistrettoPoint {
    fn add_assign(&mut self, rhs: &'b RistrettoPoint) {
        *self = &*self + rhs;
    }
}

define_add_assign_variants!(LHS = RistrettoPoint, RHS = RistrettoPoint);

impl<'a, 'b> Sub<&'b RistrettoPoint> for &'a RistrettoPoint {
    type Output = RistrettoPoint;

    fn sub(self, other: &'b RistrettoPoint) -> RistrettoPoint {
        RistrettoPoint(&self.0 - &other.0)
    }
}

define_sub_variants!(LHS = RistrettoPoint, RHS = RistrettoPoint, Output = RistrettoPoint);

impl<'b> SubAssign<&'b RistrettoPoint> for RistrettoPoint {
    fn sub_assign(&mut self, rhs: &'b RistrettoPoint) {
        *self = &*self - rhs;
    }
}

define_sub_assign_variants!(LHS = RistrettoPoint, RHS = RistrettoPoint);

impl<T> Sum<T> for RistrettoPoint
where
    T: Borrow<RistrettoPoint>,
{
    fn sum<I>(iter: I) -> Self
    where
        I: Iterator<Item = T>,
    {
        iter.fold(RistrettoPoint::identity(), |acc, item| &acc + item.borrow())
    }
}

impl<'a> Neg for &'a RistrettoPoint {
    type Output = RistrettoPoint;

    fn neg(self) -> RistrettoPoint {
        RistrettoPoint(-&self.0)
    }
}

impl Neg for RistrettoPoint {
    type Output = RistrettoPoint;

    fn neg(self) -> RistrettoPoint {
        -&self
    }
}

impl<'a, 'b> Mul<&'b Scalar> for &'a RistrettoPoint {
    type Output = RistrettoPoint;
    /// Constant-time scalar multiplication, delegating to the
    /// underlying Edwards point.
    fn mul(self, scalar: &'b Scalar) -> RistrettoPoint {
        RistrettoPoint(&self.0 * scalar)
    }
}

define_mul_variants!(LHS = RistrettoPoint, RHS = Scalar, Output = RistrettoPoint);

impl<'a, 'b> Mul<&'b RistrettoPoint> for &'a Scalar {
    type Output = RistrettoPoint;

    fn mul(self, point: &'b RistrettoPoint) -> RistrettoPoint {
        point * self
    }
}

define_mul_variants!(LHS = Scalar, RHS = RistrettoPoint, Output = RistrettoPoint);

impl<'b> MulAssign<&'b Scalar> for RistrettoPoint {
    fn mul_assign(&mut self, scalar: &'b Scalar) {
        *self = &*self * scalar;
    }
}

define_mul_assign_variants!(LHS = RistrettoPoint, RHS = Scalar);

// ------------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------------
