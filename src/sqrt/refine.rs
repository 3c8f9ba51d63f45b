//! Reciprocal square root refinement.
//!
//! `r` approaches `1/sqrt(m)` and `s = m*r` approaches `sqrt(m)` through a
//! fixed pipeline: a 7-bit table seed, one Goldschmidt step at 32 bits, two
//! at 64 bits, one at 128 bits. Each step roughly doubles the correct bits,
//! which is what lets the truncation error of the multiply primitives
//! (documented in [`crate::wide`]) wash out instead of accumulating. The
//! stage widths and count are load-bearing: a shorter or reordered pipeline
//! breaks the error bounds quoted below.

use super::*;
use crate::wide::*;

// 3.0 in UQ2.30 / UQ2.62 / UQ2.126
const THREE32: u32 = 0xc0000000;
const THREE64: u64 = 0xc000000000000000;
const THREE128: U128 = U128::new(0xc000000000000000, 0);

/// `r ~ 1/sqrt(m)` in UQ0.64, for `m` in `[1, 4)` given as UQ2.126.
///
/// `i` is the table index: exponent parity bit and the top six fraction
/// bits. On return, `|r*sqrt(m) - 1| < 0x1.c001p-59`.
pub(super) fn rsqrt(i: usize, ml: U128) -> u64 {
    let r = (RSQRT_TAB[i] as u32) << 16;
    // |r sqrt(m) - 1| < 0x1p-8

    // one step at 32 bits
    let s = mul32((ml.hi >> 32) as u32, r);
    let d = mul32(s, r);
    let u = THREE32.wrapping_sub(d);
    let r = mul32(r, u) << 1;
    // |r sqrt(m) - 1| < 0x1.7bp-16

    // first step at 64 bits; s is recomputed from m at the new width
    let r = (r as u64) << 32;
    let s = mul64_approx(ml.hi, r);
    let d = mul64_approx(s, r);
    let u = THREE64.wrapping_sub(d);
    let r = mul64_approx(r, u) << 1;
    // |r sqrt(m) - 1| < 0x1.a5p-31

    // second step at 64 bits: one step alone cannot push the error low
    // enough to seed the 128-bit stage
    let s = mul64_approx(s, u) << 1;
    let d = mul64_approx(s, r);
    let u = THREE64.wrapping_sub(d);
    let r = mul64_approx(r, u) << 1;
    // |r sqrt(m) - 1| < 0x1.c001p-59
    r
}

/// Final 128-bit step and candidate extraction.
///
/// Returns the truncated root `t` with `t < sqrt(m)*2^p < t + 1.5`, and the
/// two residual words that decide rounding: `d1 = t - (m*2^2p - t^2)` and
/// `d2 = d1 + t + 1`, both mod 2^128. `d2 == 0` exactly when the root is
/// `t + 1`; otherwise the signs of `d1`/`d2` place the root within the
/// window.
pub(super) fn sqrt_candidate(ml: U128, r: u64, p: u32) -> (U128, U128, U128) {
    let rl = U128::new(r, 0);
    let sl = mul128_approx(ml, rl); // UQ2.126, s ~ sqrt(m)
    let dl = mul128_approx(sl, rl);
    let ul = THREE128.sub128(dl);
    let sl = mul128_approx(sl, ul); // UQ3.125
    // -0x1p-114 < s - sqrt(m) < 0x1p-121; subtracting 16 makes the
    // approximation one-sided before the truncating shift
    let t = sl.sub64(16).shr(125 - p);
    // t < sqrt(m)*2^p < t + 1.5

    // exact residual of the candidate, mod 2^128
    let d0 = ml.shl(2 * p - 126).sub128(mul128_lo(t, t));
    let d1 = t.sub128(d0);
    let d2 = d1.add128(t).add64(1);
    (t, d1, d2)
}

/// `1/sqrt(m)` seeds in UQ0.16, indexed by the exponent parity bit and the
/// top six fraction bits. Every entry satisfies
/// `|tab*2^-16*sqrt(m) - 1| < 2^-8` over its index's whole interval, the
/// starting bound the pipeline above relies on.
#[rustfmt::skip]
static RSQRT_TAB: [u16; 128] = [
    0xb451, 0xb2f0, 0xb196, 0xb044, 0xaef9, 0xadb6, 0xac79, 0xab43,
    0xaa14, 0xa8eb, 0xa7c8, 0xa6aa, 0xa592, 0xa480, 0xa373, 0xa26b,
    0xa168, 0xa06a, 0x9f70, 0x9e7b, 0x9d8a, 0x9c9d, 0x9bb5, 0x9ad1,
    0x99f0, 0x9913, 0x983a, 0x9765, 0x9693, 0x95c4, 0x94f8, 0x9430,
    0x936b, 0x92a9, 0x91ea, 0x912e, 0x9075, 0x8fbe, 0x8f0a, 0x8e59,
    0x8daa, 0x8cfe, 0x8c54, 0x8bac, 0x8b07, 0x8a64, 0x89c4, 0x8925,
    0x8889, 0x87ee, 0x8756, 0x86c0, 0x862b, 0x8599, 0x8508, 0x8479,
    0x83ec, 0x8361, 0x82d8, 0x8250, 0x81c9, 0x8145, 0x80c2, 0x8040,
    0xff02, 0xfd0e, 0xfb25, 0xf947, 0xf773, 0xf5aa, 0xf3ea, 0xf234,
    0xf087, 0xeee3, 0xed47, 0xebb3, 0xea27, 0xe8a3, 0xe727, 0xe5b2,
    0xe443, 0xe2dc, 0xe17a, 0xe020, 0xdecb, 0xdd7d, 0xdc34, 0xdaf1,
    0xd9b3, 0xd87b, 0xd748, 0xd61a, 0xd4f1, 0xd3cd, 0xd2ad, 0xd192,
    0xd07b, 0xcf69, 0xce5b, 0xcd51, 0xcc4a, 0xcb48, 0xca4a, 0xc94f,
    0xc858, 0xc764, 0xc674, 0xc587, 0xc49d, 0xc3b7, 0xc2d4, 0xc1f4,
    0xc116, 0xc03c, 0xbf65, 0xbe90, 0xbdbe, 0xbcef, 0xbc23, 0xbb59,
    0xba91, 0xb9cc, 0xb90a, 0xb84a, 0xb78c, 0xb6d0, 0xb617, 0xb560,
];
