// -*- mode: rust; -*-
//
// This file is part of curve25519-oxide.
// See LICENSE for licensing information.

//! Fixed-window signed-digit scalar multiplication with per-base
//! precomputation tables.
//!
//! A [`PrecomputedTable`] for window width \\(w\\) holds
//! \\(1 + 256/w\\) groups of \\(2^{w-1}\\) points; group \\(k\\)
//! contains \\(\\{P_k, 2P_k, \ldots, 2^{w-1}P_k\\}\\) for
//! \\(P_k = 2^{kw} B\\).  Multiplication then needs one table addition
//! per window and no doublings at all.
//!
//! Tables are memoized in a process-wide cache keyed by the affine
//! (compressed) encoding of the base point, so repeated
//! multiplications against the same base pay the precomputation once.

#![allow(non_snake_case)]

use std::collections::HashMap;
use std::ops::Mul;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock};

use subtle::Choice;
use subtle::ConditionallyNegatable;
use subtle::ConditionallySelectable;
use subtle::ConstantTimeEq;

use crate::constants;
use crate::curve_models::AffineNielsPoint;
use crate::edwards::EdwardsPoint;
use crate::errors::Error;
use crate::scalar::Scalar;
use crate::traits::Identity;

/// Window width used for a base that has not been given a hint.
const DEFAULT_WINDOW: u8 = 8;

/// Check that a window width is one of the supported values.
///
/// The widths are exactly the powers of two for which the signed-digit
/// recoding tiles 256 bits evenly.
fn validate_window(w: u8) -> Result<(), Error> {
    match w {
        2 | 4 | 8 | 16 => Ok(()),
        _ => Err(Error::InvalidWindow),
    }
}

/// Decompose a 256-bit little-endian integer into base-\\(2^w\\)
/// signed digits.
///
/// Each window reads its `w` bits; a value above \\(2^{w-1}\\) is
/// replaced by `value - 2^w` with a carry of one into the next window,
/// so every digit lies in \\([-2^{w-1}+1, 2^{w-1}]\\).  The extra final
/// window absorbs the last carry.  The carry update is branchless.
fn signed_digits(bytes: &[u8; 32], w: usize) -> Vec<i64> {
    let windows = 1 + 256 / w;
    let half = 1i64 << (w - 1);
    let full = 1i64 << w;
    let mask = (full - 1) as u64;

    let mut digits = Vec::with_capacity(windows);
    let mut carry: i64 = 0;
    for k in 0..windows {
        let bitpos = k * w;
        let raw = if bitpos < 256 {
            let byte = bitpos / 8;
            let shift = bitpos % 8;
            let lo = bytes[byte] as u64;
            let hi = if byte + 1 < 32 { bytes[byte + 1] as u64 } else { 0 };
            (((lo | (hi << 8)) >> shift) & mask) as i64
        } else {
            0
        };
        let val = raw + carry;
        // borrow = 1 iff val > half
        let borrow = ((half - val) >> 63) & 1;
        digits.push(val - full * borrow);
        carry = borrow;
    }
    digits
}

/// A table of precomputed signed-digit multiples of a fixed base
/// point, for accelerating constant-time scalar multiplication.
///
/// The entries are batch-normalized before storage, so that every
/// table addition is against a \\(Z = 1\\) cached point.
#[derive(Clone)]
pub struct PrecomputedTable {
    window: u8,
    points: Vec<AffineNielsPoint>,
}

impl PrecomputedTable {
    /// Create a table of precomputed multiples of `base` for window
    /// width `w`.
    ///
    /// Fails with [`Error::InvalidWindow`] unless `w` is 2, 4, 8, or
    /// 16.
    pub fn new(base: &EdwardsPoint, w: u8) -> Result<PrecomputedTable, Error> {
        validate_window(w)?;
        Ok(PrecomputedTable::build(base, w))
    }

    /// Build the table for an already-validated window width.
    fn build(base: &EdwardsPoint, w: u8) -> PrecomputedTable {
        debug_assert!(validate_window(w).is_ok());
        let half = 1usize << (w - 1);
        let windows = 1 + 256 / (w as usize);

        let mut multiples: Vec<EdwardsPoint> = Vec::with_capacity(windows * half);
        let mut window_base = *base;
        for _ in 0..windows {
            // {P_k, 2 P_k, ..., 2^(w-1) P_k}
            let mut q = window_base;
            multiples.push(q);
            for _ in 1..half {
                q = &q + &window_base;
                multiples.push(q);
            }
            // P_{k+1} = 2^w P_k
            window_base = window_base.mul_by_pow_2(w as u32);
        }

        // One shared inversion instead of one per entry.
        EdwardsPoint::batch_normalize(&mut multiples);

        let points = multiples
            .iter()
            .map(|p| AffineNielsPoint {
                y_plus_x: &p.Y + &p.X,
                y_minus_x: &p.Y - &p.X,
                xy2d: &(&p.X * &p.Y) * &constants::EDWARDS_D2,
            })
            .collect();

        PrecomputedTable { window: w, points }
    }

    /// Given a nonzero digit, select its table entry from the group at
    /// `offset` in constant time, i.e. without branching on the digit
    /// or using it as an array index.
    fn select(&self, offset: usize, digit: i64) -> AffineNielsPoint {
        let half = 1i64 << (self.window - 1);
        debug_assert!(digit != 0 && digit.abs() <= half);

        // Compute |digit| without branching on the sign.
        let sign_mask = digit >> 63;
        let abs = ((digit + sign_mask) ^ sign_mask) as u32;

        let mut t = AffineNielsPoint::identity();
        for j in 1..=(half as u32) {
            let c = abs.ct_eq(&j);
            t.conditional_assign(&self.points[offset + (j as usize) - 1], c);
        }
        t.conditional_negate(Choice::from((sign_mask & 1) as u8));
        t
    }

    /// Multiply the table's base by a 256-bit little-endian integer.
    ///
    /// One group addition is performed per window whatever the digit
    /// pattern: a nonzero digit adds its table entry into the result
    /// accumulator `P`, while a zero digit adds a decoy entry into the
    /// parallel accumulator `F`.  Both accumulators then share one
    /// batch normalization, so neither the number of group operations
    /// nor the final inversion cost depends on the scalar.
    pub(crate) fn mul_bytes(&self, bytes: &[u8; 32]) -> EdwardsPoint {
        let half = 1usize << (self.window - 1);
        let digits = signed_digits(bytes, self.window as usize);

        let mut P = EdwardsPoint::identity();
        let mut F = EdwardsPoint::identity();
        for (k, &digit) in digits.iter().enumerate() {
            let offset = k * half;
            if digit == 0 {
                let mut decoy = self.points[offset];
                decoy.conditional_negate(Choice::from((k & 1) as u8));
                F = (&F + &decoy).as_extended();
            } else {
                let entry = self.select(offset, digit);
                P = (&P + &entry).as_extended();
            }
        }

        let mut pair = [P, F];
        EdwardsPoint::batch_normalize(&mut pair);
        pair[0]
    }
}

impl<'a, 'b> Mul<&'b Scalar> for &'a PrecomputedTable {
    type Output = EdwardsPoint;

    fn mul(self, scalar: &'b Scalar) -> EdwardsPoint {
        self.mul_bytes(&scalar.bytes)
    }
}

// ------------------------------------------------------------------------
// The process-wide table cache
// ------------------------------------------------------------------------

struct TableSlot {
    window: u8,
    table: Option<Arc<PrecomputedTable>>,
}

static TABLE_CACHE: OnceLock<Mutex<HashMap<[u8; 32], TableSlot>>> = OnceLock::new();

fn cache() -> MutexGuard<'static, HashMap<[u8; 32], TableSlot>> {
    let lock = TABLE_CACHE.get_or_init(|| Mutex::new(HashMap::new()));
    match lock.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

/// Record the window-width hint for the base with the given affine
/// encoding, invalidating any table built at another width.
pub(crate) fn set_window_size(key: [u8; 32], w: u8) -> Result<(), Error> {
    validate_window(w)?;
    let mut cache = cache();
    let slot = cache.entry(key).or_insert(TableSlot {
        window: DEFAULT_WINDOW,
        table: None,
    });
    if slot.window != w {
        slot.window = w;
        slot.table = None;
    }
    Ok(())
}

/// Constant-time scalar multiplication against `base`, using (and if
/// necessary first building) its cached table.  `key` must be the
/// affine encoding of `base`.
pub(crate) fn mul_with_key(base: &EdwardsPoint, key: [u8; 32], bytes: &[u8; 32]) -> EdwardsPoint {
    let table = {
        let mut cache = cache();
        let slot = cache.entry(key).or_insert(TableSlot {
            window: DEFAULT_WINDOW,
            table: None,
        });
        match &slot.table {
            Some(table) => Arc::clone(table),
            None => {
                // Built while the lock is held: a concurrent lookup
                // either waits or sees the finished table, never a
                // half-built one.
                let table = Arc::new(PrecomputedTable::build(base, slot.window));
                slot.table = Some(Arc::clone(&table));
                table
            }
        }
    };
    table.mul_bytes(bytes)
}

/// Constant-time scalar multiplication against an arbitrary base.
pub(crate) fn mul(base: &EdwardsPoint, bytes: &[u8; 32]) -> EdwardsPoint {
    mul_with_key(base, base.compress().to_bytes(), bytes)
}

/// Constant-time scalar multiplication against the Ed25519 basepoint.
pub(crate) fn mul_base(bytes: &[u8; 32]) -> EdwardsPoint {
    mul_with_key(
        &constants::ED25519_BASEPOINT_POINT,
        constants::ED25519_BASEPOINT_COMPRESSED.to_bytes(),
        bytes,
    )
}

// ------------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------------
