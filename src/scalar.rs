// -*- mode: rust; -*-
//
// This file is part of curve25519-oxide.
// See LICENSE for licensing information.

//! Arithmetic on scalars (integers mod the group order
//! \\(\ell = 2^{252} + 27742317777372353535851937790883648493\\)).
//!
//! A [`Scalar`] holds the canonical 32-byte little-endian encoding;
//! the internal `UnpackedScalar` works in radix \\(2^{52}\\) with five
//! unsigned limbs.  51-bit limbs would cover the 253-bit range, but are
//! not large enough to reduce a 512-bit number with Montgomery
//! multiplication, so 52 bits are used instead.

use core::fmt::Debug;
use core::ops::Neg;
use core::ops::{Add, AddAssign};
use core::ops::{Mul, MulAssign};
use core::ops::{Sub, SubAssign};

use digest::{generic_array::typenum::U64, Digest};
use rand_core::CryptoRngCore;
use subtle::{Choice, ConstantTimeEq};

use crate::constants;
use crate::errors::Error;

/// The `Scalar` struct holds an integer \\(s < 2^{255}\\) which
/// represents an element of \\(\mathbb Z / \ell\\).
///
/// All scalars constructed through the public API are canonical
/// (reduced mod \\(\ell\\)); the arithmetic impls preserve this.
#[derive(Copy, Clone, Hash)]
pub struct Scalar {
    /// The little-endian byte encoding of this `Scalar`.
    pub(crate) bytes: [u8; 32],
}

impl Debug for Scalar {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Scalar{{\n\tbytes: {:?},\n}}", &self.bytes)
    }
}

impl Eq for Scalar {}

impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl ConstantTimeEq for Scalar {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.bytes.ct_eq(&other.bytes)
    }
}

impl<'a, 'b> Mul<&'b Scalar> for &'a Scalar {
    type Output = Scalar;
    fn mul(self, rhs: &'b Scalar) -> Scalar {
        UnpackedScalar::mul(&self.unpack(), &rhs.unpack()).pack()
    }
}

define_mul_variants!(LHS = Scalar, RHS = Scalar, Output = Scalar);

impl<'b> MulAssign<&'b Scalar> for Scalar {
    fn mul_assign(&mut self, rhs: &'b Scalar) {
        *self = &*self * rhs;
    }
}

define_mul_assign_variants!(LHS = Scalar, RHS = Scalar);

impl<'a, 'b> Add<&'b Scalar> for &'a Scalar {
    type Output = Scalar;
    fn add(self, rhs: &'b Scalar) -> Scalar {
        UnpackedScalar::add(&self.unpack(), &rhs.unpack()).pack()
    }
}

define_add_variants!(LHS = Scalar, RHS = Scalar, Output = Scalar);

impl<'b> AddAssign<&'b Scalar> for Scalar {
    fn add_assign(&mut self, rhs: &'b Scalar) {
        *self = &*self + rhs;
    }
}

define_add_assign_variants!(LHS = Scalar, RHS = Scalar);

impl<'a, 'b> Sub<&'b Scalar> for &'a Scalar {
    type Output = Scalar;
    fn sub(self, rhs: &'b Scalar) -> Scalar {
        UnpackedScalar::sub(&self.unpack(), &rhs.unpack()).pack()
    }
}

define_sub_variants!(LHS = Scalar, RHS = Scalar, Output = Scalar);

impl<'b> SubAssign<&'b Scalar> for Scalar {
    fn sub_assign(&mut self, rhs: &'b Scalar) {
        *self = &*self - rhs;
    }
}

define_sub_assign_variants!(LHS = Scalar, RHS = Scalar);

impl<'a> Neg for &'a Scalar {
    type Output = Scalar;
    fn neg(self) -> Scalar {
        &Scalar::ZERO - self
    }
}

impl Neg for Scalar {
    type Output = Scalar;
    fn neg(self) -> Scalar {
        -&self
    }
}

impl From<u64> for Scalar {
    fn from(x: u64) -> Scalar {
        let mut bytes = [0u8; 32];
        bytes[..8].copy_from_slice(&x.to_le_bytes());
        Scalar { bytes }
    }
}

impl Scalar {
    /// The scalar \\(0\\).
    pub const ZERO: Scalar = Scalar { bytes: [0u8; 32] };

    /// The scalar \\(1\\).
    pub const ONE: Scalar = Scalar {
        bytes: [
            1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
            0, 0, 0,
        ],
    };

    /// Construct a `Scalar` by reducing a 256-bit little-endian integer
    /// modulo the group order \\(\ell\\).
    pub fn from_bytes_mod_order(bytes: [u8; 32]) -> Scalar {
        // (x * R) / R = x (mod l)
        UnpackedScalar::montgomery_mul(&UnpackedScalar::from_bytes(&bytes), &constants::R).pack()
    }

    /// Construct a `Scalar` by reducing a 512-bit little-endian integer
    /// modulo the group order \\(\ell\\).
    pub fn from_bytes_mod_order_wide(input: &[u8; 64]) -> Scalar {
        UnpackedScalar::from_bytes_wide(input).pack()
    }

    /// Attempt to construct a `Scalar` from a canonical byte
    /// representation.
    ///
    /// # Return
    ///
    /// The scalar if `bytes` encodes an integer in \\([0, \ell)\\), and
    /// `Err(ScalarOutOfRange)` otherwise.
    pub fn from_canonical_bytes(bytes: [u8; 32]) -> Result<Scalar, Error> {
        let high_bit_unset = (bytes[31] >> 7).ct_eq(&0);
        let candidate = Scalar { bytes };
        let is_canonical = candidate.ct_eq(&Scalar::from_bytes_mod_order(bytes));
        if (high_bit_unset & is_canonical).into() {
            Ok(candidate)
        } else {
            Err(Error::ScalarOutOfRange)
        }
    }

    /// Return a `Scalar` chosen uniformly at random using a
    /// user-provided RNG.
    pub fn random<R: CryptoRngCore + ?Sized>(rng: &mut R) -> Self {
        let mut scalar_bytes = [0u8; 64];
        rng.fill_bytes(&mut scalar_bytes);
        Scalar::from_bytes_mod_order_wide(&scalar_bytes)
    }

    /// Hash a slice of bytes into a scalar.
    ///
    /// Takes a type parameter `D`, which is any `Digest` producing 64
    /// bytes of output.
    pub fn hash_from_bytes<D>(input: &[u8]) -> Scalar
    where
        D: Digest<OutputSize = U64> + Default,
    {
        let mut hash = D::default();
        hash.update(input);
        Scalar::from_hash(hash)
    }

    /// Construct a scalar from an existing `Digest` instance, by
    /// interpreting the 64-byte digest as a little-endian integer and
    /// reducing it mod \\(\ell\\).
    pub fn from_hash<D>(hash: D) -> Scalar
    where
        D: Digest<OutputSize = U64>,
    {
        let mut output = [0u8; 64];
        output.copy_from_slice(hash.finalize().as_slice());
        Scalar::from_bytes_mod_order_wide(&output)
    }

    /// View the little-endian byte encoding of this `Scalar`.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.bytes
    }

    /// Convert this `Scalar` to its little-endian byte encoding.
    pub const fn to_bytes(&self) -> [u8; 32] {
        self.bytes
    }

    /// Compute the multiplicative inverse of this scalar mod
    /// \\(\ell\\).
    ///
    /// Fails with [`Error::NonInvertible`] if the scalar is zero.
    pub fn invert(&self) -> Result<Scalar, Error> {
        if self.ct_eq(&Scalar::ZERO).into() {
            return Err(Error::NonInvertible);
        }
        let inv = self
            .unpack()
            .as_montgomery()
            .montgomery_invert()
            .from_montgomery();
        Ok(inv.pack())
    }

    /// Get the bit at little-endian position `i`.
    #[inline]
    pub(crate) fn bit(&self, i: usize) -> u8 {
        (self.bytes[i >> 3] >> (i & 7)) & 1
    }

    /// Unpack this `Scalar` to five 52-bit limbs.
    pub(crate) fn unpack(&self) -> UnpackedScalar {
        UnpackedScalar::from_bytes(&self.bytes)
    }
}

/// Clamp a 32-byte integer per RFC 7748: clear the low three bits,
/// clear the top bit, and set bit 254.
pub const fn clamp_integer(mut bytes: [u8; 32]) -> [u8; 32] {
    bytes[0] &= 0b1111_1000;
    bytes[31] &= 0b0111_1111;
    bytes[31] |= 0b0100_0000;
    bytes
}

/// Helper: load 8 little-endian bytes into a `u64`.
#[inline(always)]
fn load8(input: &[u8]) -> u64 {
    let mut buf = [0u8; 8];
    buf.copy_from_slice(&input[..8]);
    u64::from_le_bytes(buf)
}

/// u64 * u64 = u128 multiply helper
#[inline(always)]
fn m(x: u64, y: u64) -> u128 {
    (x as u128) * (y as u128)
}

/// The bits of \\(\ell - 2\\), used as the inversion exponent.
const L_MINUS_2: [u8; 32] = [
    0xeb, 0xd3, 0xf5, 0x5c, 0x1a, 0x63, 0x12, 0x58, 0xd6, 0x9c, 0xf7, 0xa2, 0xde, 0xf9, 0xde,
    0x14, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x10,
];

/// An element of \\(\mathbb Z / \ell \mathbb Z\\) as five 52-bit
/// limbs.
#[derive(Copy, Clone)]
pub(crate) struct UnpackedScalar(pub(crate) [u64; 5]);

impl Debug for UnpackedScalar {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "UnpackedScalar({:?})", &self.0[..])
    }
}

impl UnpackedScalar {
    /// Pack the limbs of this `UnpackedScalar` into a `Scalar`.
    pub(crate) fn pack(&self) -> Scalar {
        Scalar {
            bytes: self.as_bytes(),
        }
    }

    /// Unpack a 32-byte / 256-bit scalar into five 52-bit limbs.
    pub(crate) fn from_bytes(bytes: &[u8; 32]) -> UnpackedScalar {
        let mut words = [0u64; 4];
        for (i, word) in words.iter_mut().enumerate() {
            *word = load8(&bytes[i * 8..]);
        }

        let mask = (1u64 << 52) - 1;
        let top_mask = (1u64 << 48) - 1;

        UnpackedScalar([
            words[0] & mask,
            ((words[0] >> 52) | (words[1] << 12)) & mask,
            ((words[1] >> 40) | (words[2] << 24)) & mask,
            ((words[2] >> 28) | (words[3] << 36)) & mask,
            (words[3] >> 16) & top_mask,
        ])
    }

    /// Reduce a 64-byte / 512-bit scalar mod \\(\ell\\).
    pub(crate) fn from_bytes_wide(bytes: &[u8; 64]) -> UnpackedScalar {
        let mut words = [0u64; 8];
        for (i, word) in words.iter_mut().enumerate() {
            *word = load8(&bytes[i * 8..]);
        }

        let mask = (1u64 << 52) - 1;
        let lo = UnpackedScalar([
            words[0] & mask,
            ((words[0] >> 52) | (words[1] << 12)) & mask,
            ((words[1] >> 40) | (words[2] << 24)) & mask,
            ((words[2] >> 28) | (words[3] << 36)) & mask,
            ((words[3] >> 16) | (words[4] << 48)) & mask,
        ]);
        let hi = UnpackedScalar([
            (words[4] >> 4) & mask,
            ((words[4] >> 56) | (words[5] << 8)) & mask,
            ((words[5] >> 44) | (words[6] << 20)) & mask,
            ((words[6] >> 32) | (words[7] << 32)) & mask,
            words[7] >> 20,
        ]);

        // (lo * R) / R = lo, and (hi * R^2) / R = hi * R = hi * 2^260
        let lo = UnpackedScalar::montgomery_mul(&lo, &constants::R);
        let hi = UnpackedScalar::montgomery_mul(&hi, &constants::RR);

        UnpackedScalar::add(&hi, &lo)
    }

    /// Pack the limbs of this `UnpackedScalar` into 32 bytes.
    #[rustfmt::skip] // keep alignment of s[*] calculations
    #[allow(clippy::identity_op)]
    pub(crate) fn as_bytes(&self) -> [u8; 32] {
        [
             (self.0[0] >>  0)                     as u8,
             (self.0[0] >>  8)                     as u8,
             (self.0[0] >> 16)                     as u8,
             (self.0[0] >> 24)                     as u8,
             (self.0[0] >> 32)                     as u8,
             (self.0[0] >> 40)                     as u8,
            ((self.0[0] >> 48) | (self.0[1] << 4)) as u8,
             (self.0[1] >>  4)                     as u8,
             (self.0[1] >> 12)                     as u8,
             (self.0[1] >> 20)                     as u8,
             (self.0[1] >> 28)                     as u8,
             (self.0[1] >> 36)                     as u8,
             (self.0[1] >> 44)                     as u8,
             (self.0[2] >>  0)                     as u8,
             (self.0[2] >>  8)                     as u8,
             (self.0[2] >> 16)                     as u8,
             (self.0[2] >> 24)                     as u8,
             (self.0[2] >> 32)                     as u8,
             (self.0[2] >> 40)                     as u8,
            ((self.0[2] >> 48) | (self.0[3] << 4)) as u8,
             (self.0[3] >>  4)                     as u8,
             (self.0[3] >> 12)                     as u8,
             (self.0[3] >> 20)                     as u8,
             (self.0[3] >> 28)                     as u8,
             (self.0[3] >> 36)                     as u8,
             (self.0[3] >> 44)                     as u8,
             (self.0[4] >>  0)                     as u8,
             (self.0[4] >>  8)                     as u8,
             (self.0[4] >> 16)                     as u8,
             (self.0[4] >> 24)                     as u8,
             (self.0[4] >> 32)                     as u8,
             (self.0[4] >> 40)                     as u8,
        ]
    }

    /// Compute `a + b` (mod l).
    pub(crate) fn add(a: &UnpackedScalar, b: &UnpackedScalar) -> UnpackedScalar {
        let mask = (1u64 << 52) - 1;
        let mut sum = [0u64; 5];

        let mut carry: u64 = 0;
        for i in 0..5 {
            carry = a.0[i] + b.0[i] + (carry >> 52);
            sum[i] = carry & mask;
        }

        // subtract l if the sum is >= l
        UnpackedScalar::sub(&UnpackedScalar(sum), &constants::L)
    }

    /// Compute `a - b` (mod l).
    pub(crate) fn sub(a: &UnpackedScalar, b: &UnpackedScalar) -> UnpackedScalar {
        let mask = (1u64 << 52) - 1;
        let mut difference = [0u64; 5];

        let mut borrow: u64 = 0;
        for i in 0..5 {
            borrow = a.0[i].wrapping_sub(b.0[i] + (borrow >> 63));
            difference[i] = borrow & mask;
        }

        // conditionally add l if the difference is negative
        let underflow_mask = ((borrow >> 63) ^ 1).wrapping_sub(1);
        let mut carry: u64 = 0;
        for i in 0..5 {
            carry = (carry >> 52) + difference[i] + (constants::L.0[i] & underflow_mask);
            difference[i] = carry & mask;
        }

        UnpackedScalar(difference)
    }

    /// Compute `a * b` as a 9-limb 128-bit product.
    #[inline(always)]
    #[rustfmt::skip] // keep alignment of z[*] calculations
    fn mul_internal(a: &UnpackedScalar, b: &UnpackedScalar) -> [u128; 9] {
        let a = a.0;
        let b = b.0;
        let mut z = [0u128; 9];

        z[0] = m(a[0], b[0]);
        z[1] = m(a[0], b[1]) + m(a[1], b[0]);
        z[2] = m(a[0], b[2]) + m(a[1], b[1]) + m(a[2], b[0]);
        z[3] = m(a[0], b[3]) + m(a[1], b[2]) + m(a[2], b[1]) + m(a[3], b[0]);
        z[4] = m(a[0], b[4]) + m(a[1], b[3]) + m(a[2], b[2]) + m(a[3], b[1]) + m(a[4], b[0]);
        z[5] =                 m(a[1], b[4]) + m(a[2], b[3]) + m(a[3], b[2]) + m(a[4], b[1]);
        z[6] =                                 m(a[2], b[4]) + m(a[3], b[3]) + m(a[4], b[2]);
        z[7] =                                                 m(a[3], b[4]) + m(a[4], b[3]);
        z[8] =                                                                 m(a[4], b[4]);

        z
    }

    /// Compute `limbs / R` (mod l), where R is the Montgomery modulus
    /// \\(2^{260}\\).
    #[inline(always)]
    #[rustfmt::skip] // keep alignment of n* and r* calculations
    fn montgomery_reduce(limbs: &[u128; 9]) -> UnpackedScalar {
        #[inline(always)]
        fn part1(sum: u128) -> (u128, u64) {
            let p = (sum as u64).wrapping_mul(constants::LFACTOR) & ((1u64 << 52) - 1);
            ((sum + m(p, constants::L.0[0])) >> 52, p)
        }

        #[inline(always)]
        fn part2(sum: u128) -> (u128, u64) {
            let w = (sum as u64) & ((1u64 << 52) - 1);
            (sum >> 52, w)
        }

        // note: l[3] is zero, so its multiples can be skipped
        let l = &constants::L.0;

        // the first half computes the Montgomery adjustment factor n,
        // and begins adding n*l to make the limbs divisible by R
        let (carry, n0) = part1(        limbs[0]);
        let (carry, n1) = part1(carry + limbs[1] + m(n0, l[1]));
        let (carry, n2) = part1(carry + limbs[2] + m(n0, l[2]) + m(n1, l[1]));
        let (carry, n3) = part1(carry + limbs[3]               + m(n1, l[2]) + m(n2, l[1]));
        let (carry, n4) = part1(carry + limbs[4] + m(n0, l[4])               + m(n2, l[2]) + m(n3, l[1]));

        // limbs is now divisible by R; dividing by R is a shift
        let (carry, r0) = part2(carry + limbs[5]               + m(n1, l[4])               + m(n3, l[2]) + m(n4, l[1]));
        let (carry, r1) = part2(carry + limbs[6]                             + m(n2, l[4])               + m(n4, l[2]));
        let (carry, r2) = part2(carry + limbs[7]                                           + m(n3, l[4])              );
        let (carry, r3) = part2(carry + limbs[8]                                                         + m(n4, l[4]));
        let         r4 = carry as u64;

        // result may be >= l, so attempt to subtract l
        UnpackedScalar::sub(&UnpackedScalar([r0, r1, r2, r3, r4]), &constants::L)
    }

    /// Compute `a * b` (mod l).
    pub(crate) fn mul(a: &UnpackedScalar, b: &UnpackedScalar) -> UnpackedScalar {
        let ab = UnpackedScalar::montgomery_reduce(&UnpackedScalar::mul_internal(a, b));
        UnpackedScalar::montgomery_reduce(&UnpackedScalar::mul_internal(&ab, &constants::RR))
    }

    /// Compute `(a * b) / R` (mod l), where R is the Montgomery
    /// modulus \\(2^{260}\\).
    pub(crate) fn montgomery_mul(a: &UnpackedScalar, b: &UnpackedScalar) -> UnpackedScalar {
        UnpackedScalar::montgomery_reduce(&UnpackedScalar::mul_internal(a, b))
    }

    /// Compute `(self^2) / R` (mod l) in Montgomery form.
    pub(crate) fn montgomery_square(&self) -> UnpackedScalar {
        UnpackedScalar::montgomery_reduce(&UnpackedScalar::mul_internal(self, self))
    }

    /// Put this `UnpackedScalar` into Montgomery form, i.e. compute
    /// `self * R` (mod l).
    pub(crate) fn as_montgomery(&self) -> UnpackedScalar {
        UnpackedScalar::montgomery_mul(self, &constants::RR)
    }

    /// Take this `UnpackedScalar` out of Montgomery form, i.e. compute
    /// `self / R` (mod l).
    pub(crate) fn from_montgomery(&self) -> UnpackedScalar {
        let mut limbs = [0u128; 9];
        for (i, limb) in self.0.iter().enumerate() {
            limbs[i] = *limb as u128;
        }
        UnpackedScalar::montgomery_reduce(&limbs)
    }

    /// Invert this Montgomery-form scalar, staying in Montgomery form.
    ///
    /// Computes `self^(l-2)` by square-and-multiply over the fixed
    /// exponent bits.
    pub(crate) fn montgomery_invert(&self) -> UnpackedScalar {
        let mut acc = constants::R;
        for i in (0..253).rev() {
            acc = acc.montgomery_square();
            if (L_MINUS_2[i >> 3] >> (i & 7)) & 1 == 1 {
                acc = UnpackedScalar::montgomery_mul(&acc, self);
            }
        }
        acc
    }
}
