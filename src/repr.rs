//! Bit-pattern marshalling between the native wide-float layouts and the
//! `(top, significand)` pair the kernel works on.
//!
//! `top` is the 16-bit sign + biased exponent field. The significand is
//! left-justified in a [`U128`] so that the leading (explicit or restored
//! implicit) one of a normalized value sits at bit 127; the low bits beyond
//! the format's fraction are zero.

use super::*;

/// A wide binary floating-point layout, selected at compile time.
pub trait Format: Copy {
    type Bits: Copy + PartialEq + core::fmt::Debug;

    /// Stored fraction bits below the leading significand bit.
    const SIG_BITS: u32;
    const EXP_BIAS: i32 = 0x3fff;
    const EXP_SAT: u16 = 0x7fff;
    /// Canonical quiet NaN.
    const QNAN: Self::Bits;
    const INF: Self::Bits;

    fn decompose(x: Self::Bits) -> (u16, U128);
    fn assemble(top: u16, sig: U128) -> Self::Bits;
}

/// x87 80-bit extended: 15-bit exponent, 64-bit significand with an explicit
/// integer bit. Matches the 10-byte little-endian memory image, so raw
/// values can be cast in and out through `bytemuck`.
#[derive(Copy, Clone)]
#[repr(C, packed)]
pub struct X80Bits {
    pub m: u64,
    pub se: u16,
}

unsafe impl Zeroable for X80Bits {}
unsafe impl Pod for X80Bits {}

impl X80Bits {
    #[inline]
    pub const fn new(se: u16, m: u64) -> Self {
        Self { m, se }
    }
}

impl PartialEq for X80Bits {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        ({ self.se }, { self.m }) == ({ other.se }, { other.m })
    }
}

impl Eq for X80Bits {}

impl core::fmt::Debug for X80Bits {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "0x{:04x}_{:016x}", { self.se }, { self.m })
    }
}

#[derive(Copy, Clone, Debug)]
pub struct X80;

impl Format for X80 {
    type Bits = X80Bits;
    const SIG_BITS: u32 = 63;
    const QNAN: X80Bits = X80Bits::new(0x7fff, 0xc000000000000000);
    const INF: X80Bits = X80Bits::new(0x7fff, 0x8000000000000000);

    #[inline]
    fn decompose(x: X80Bits) -> (u16, U128) {
        // the integer bit rides along as significand bit 127; pseudo
        // denormals and unnormals are not handled
        ({ x.se }, U128::new({ x.m }, 0))
    }

    #[inline]
    fn assemble(top: u16, sig: U128) -> X80Bits {
        let mut m = sig.hi;
        // the format wants an explicit leading bit on any nonzero significand
        if m != 0 {
            m |= 1 << 63;
        }
        X80Bits::new(top, m)
    }
}

/// IEEE binary128: 15-bit exponent, 112 stored fraction bits, implicit
/// leading bit.
#[derive(Copy, Clone, Debug)]
pub struct Q128;

const Q128_FRAC_HI: u64 = 0x0000ffffffffffff;

impl Format for Q128 {
    type Bits = u128;
    const SIG_BITS: u32 = 112;
    const QNAN: u128 = 0x7fff8000000000000000000000000000;
    const INF: u128 = 0x7fff0000000000000000000000000000;

    #[inline]
    fn decompose(x: u128) -> (u16, U128) {
        let top = (x >> 112) as u16;
        let mut sig = U128::new((x >> 64) as u64 & Q128_FRAC_HI, x as u64).shl(15);
        if top & 0x7fff != 0 {
            // restore the implicit bit; subnormals have none
            sig.hi |= 1 << 63;
        }
        (top, sig)
    }

    #[inline]
    fn assemble(top: u16, sig: U128) -> u128 {
        let frac = sig.shr(15);
        (top as u128) << 112 | ((frac.hi & Q128_FRAC_HI) as u128) << 64 | frac.lo as u128
    }
}
