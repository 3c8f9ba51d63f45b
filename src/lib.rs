//! Software square root for the two binary floating-point formats wider than
//! `f64`: the x87 80-bit extended format (64-bit explicit significand) and
//! IEEE binary128 (113-bit significand). Both share one algorithm, built
//! entirely from 32/64-bit integer arithmetic: a table seed for the
//! reciprocal square root, a fixed 32/64/64/128-bit refinement pipeline, and
//! an exact integer residual that decides the final rounding.
//!
//! The floating-point environment is not ambient state: the rounding
//! direction is an argument, and sticky conditions are reported into an
//! [`Exceptions`] set owned by the caller. Callers sharing one `Exceptions`
//! across threads take on the synchronization themselves.

#[allow(unused_imports)]
use bytemuck::{Pod, Zeroable};
#[allow(unused_imports)]
use equator::assert;

pub mod wide;

mod repr;

mod sqrt;

pub use repr::{Format, Q128, X80, X80Bits};
pub use wide::U128;

pub mod math {
    /// Square root over any [`Format`](crate::Format).
    pub use crate::sqrt::sqrt;

    /// Same as [`sqrt`], also returning the committed rounding direction.
    pub use crate::sqrt::sqrt_with;

    /// Square root of an 80-bit extended value.
    pub use crate::sqrt::sqrt_x80;

    /// Square root of a binary128 bit pattern.
    pub use crate::sqrt::sqrt_q128;
}

/// IEEE rounding direction, chosen by the caller per operation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Round {
    ToNearest,
    ToZero,
    Up,
    Down,
}

impl Round {
    pub const ALL: &'static [Self] = &[Self::ToNearest, Self::ToZero, Self::Up, Self::Down];
}

/// Sign of the rounding error committed by an operation: whether the
/// returned value is below, equal to, or above the exact result.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(i8)]
pub enum Approx {
    LessThanExact = -1,
    Exact = 0,
    GreaterThanExact = 1,
}

/// IEEE sticky condition.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Exception {
    Invalid = 1 << 0,
    Inexact = 1 << 1,
}

/// Sticky condition set. Once raised, a condition stays set until
/// [`clear`](Self::clear) is called, regardless of how many operations
/// report into it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub struct Exceptions(u8);

impl Exceptions {
    #[inline]
    pub const fn none() -> Self {
        Self(0)
    }

    #[inline]
    pub fn raise(&mut self, e: Exception) {
        self.0 |= e as u8;
    }

    #[inline]
    pub const fn test(self, e: Exception) -> bool {
        self.0 & e as u8 != 0
    }

    #[inline]
    pub const fn any(self) -> bool {
        self.0 != 0
    }

    #[inline]
    pub fn clear(&mut self) {
        self.0 = 0;
    }
}
