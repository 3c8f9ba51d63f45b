use super::*;

mod refine;

/// Square root of `x`, rounded in direction `rnd`, reporting sticky
/// conditions into `exc`.
///
/// Total over every bit pattern: negative nonzero values and NaNs of either
/// kind come back as the canonical quiet NaN with [`Exception::Invalid`]
/// raised, `±0` and `+∞` come back unchanged, and every other result is the
/// correctly rounded root with [`Exception::Inexact`] raised unless the root
/// is representable.
///
/// Also returns the sign of the committed rounding error, the way
/// [`Approx`] reports it.
pub fn sqrt_with<F: Format>(x: F::Bits, rnd: Round, exc: &mut Exceptions) -> (F::Bits, Approx) {
    let (top, sig) = F::decompose(x);

    let mut itop = top as i32;
    let mut sig = sig;

    if top.wrapping_sub(1) >= F::EXP_SAT - 1 {
        // x is zero, subnormal, negative, inf or nan
        if sig.is_zero() {
            return (x, Approx::Exact); // sqrt(+-0) = +-0
        }
        if top == F::EXP_SAT && sig == U128::new(1 << 63, 0) {
            return (x, Approx::Exact); // sqrt(inf) = inf
        }
        if top >= F::EXP_SAT {
            // nan, or negative and nonzero
            exc.raise(Exception::Invalid);
            return (F::QNAN, Approx::Exact);
        }
        // positive subnormal: renormalize. The shift is an exact power of
        // two; its half folds back into the result exponent through the
        // shared `(top + bias) >> 1` below.
        let lz = sig.leading_zeros();
        sig = sig.shl(lz);
        itop = 1 - lz as i32;
    }

    // x = 4^e m with m in [1, 4): the bias is odd, so the biased exponent is
    // odd exactly when the unbiased exponent is even
    let exp_even = itop & 1 != 0;
    let ml = if exp_even { sig.shr(1) } else { sig }; // UQ2.126

    let i = (((itop & 1) as usize) << 6) | ((sig.hi >> 57) & 0x3f) as usize;
    let r = refine::rsqrt(i, ml);
    let (t, d1, d2) = refine::sqrt_candidate(ml, r, F::SIG_BITS);

    let otop = ((itop + F::EXP_BIAS) >> 1) as u16;

    let (t, approx) = if d2.is_zero() {
        // the root is exactly t+1, whatever the rounding direction
        (t.add64(1), Approx::Exact)
    } else {
        exc.raise(Exception::Inexact);
        // d2 < 0 places the root above t+1 within the window
        let above = d2.hi >> 63 != 0;
        match rnd {
            Round::ToNearest => {
                // no tie is possible: d1 = 0 would put t(t+1) on the square
                // grid, strictly below the midpoint square
                let up = d1.hi >> 63 != 0;
                let approx = if up && !above {
                    Approx::GreaterThanExact
                } else {
                    Approx::LessThanExact
                };
                (t.add64(up as u64), approx)
            }
            Round::ToZero | Round::Down => (t.add64(above as u64), Approx::LessThanExact),
            Round::Up => (t.add64(1 + above as u64), Approx::GreaterThanExact),
        }
    };

    // rounding up out of the top of the binade carries into the exponent
    let (otop, t) = if t.shr(F::SIG_BITS + 1).is_zero() {
        (otop, t)
    } else {
        (otop + 1, U128::new(0, 1).shl(F::SIG_BITS))
    };

    (F::assemble(otop, t.shl(127 - F::SIG_BITS)), approx)
}

#[inline]
pub fn sqrt<F: Format>(x: F::Bits, rnd: Round, exc: &mut Exceptions) -> F::Bits {
    sqrt_with::<F>(x, rnd, exc).0
}

#[inline]
pub fn sqrt_x80(x: X80Bits, rnd: Round, exc: &mut Exceptions) -> X80Bits {
    sqrt::<X80>(x, rnd, exc)
}

#[inline]
pub fn sqrt_q128(x: u128, rnd: Round, exc: &mut Exceptions) -> u128 {
    sqrt::<Q128>(x, rnd, exc)
}
