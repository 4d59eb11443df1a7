// Copyright © 2016–2018 University of Malta

// This program is free software: you can redistribute it and/or
// modify it under the terms of the GNU Lesser General Public License
// as published by the Free Software Foundation, either version 3 of
// the License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful, but
// WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU
// General Public License for more details.
//
// You should have received a copy of the GNU Lesser General Public
// License and a copy of the GNU General Public License along with
// this program. If not, see <http://www.gnu.org/licenses/>.

//! Context-aware arithmetic, generic over the radix.
//!
//! Every operation rounds at most once: digits discarded while aligning
//! or dividing are folded into the shift accumulator as a last digit and
//! a sticky bit, and the final rounding reads them from there.

use crate::context::{Context, Flags, Round};
use crate::error::{Error, Result};
use crate::radix::accum::ShiftAccumulator;
use crate::radix::{flags, powers, RadixHelper};
use crate::{FixedCell, Integer};
use std::cmp::Ordering;
use std::fmt::{self, Debug, Formatter};
use std::marker::PhantomData;

/// The rounding engine for the radix described by `H`.
///
/// # Examples
///
/// ```rust
/// use radixnum::decimal::DecimalHelper;
/// use radixnum::radix::RadixMath;
/// use radixnum::{Context, Decimal};
/// let math = RadixMath::<DecimalHelper>::new();
/// let mut ctx = Context::unlimited().with_precision(3);
/// let a: Decimal = "1.2345".parse().unwrap();
/// let b: Decimal = "100".parse().unwrap();
/// assert_eq!(math.add(&a, &b, &mut ctx).unwrap().to_string(), "101");
/// ```
pub struct RadixMath<H> {
    helper: PhantomData<H>,
}

impl<H> Clone for RadixMath<H> {
    #[inline]
    fn clone(&self) -> Self {
        RadixMath::new()
    }
}

impl<H> Copy for RadixMath<H> {}

impl<H> Default for RadixMath<H> {
    #[inline]
    fn default() -> Self {
        RadixMath::new()
    }
}

impl<H: RadixHelper> Debug for RadixMath<H> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("RadixMath")
            .field("radix", &H::radix())
            .finish()
    }
}

/// A finite value taken apart.
struct Parts {
    mantissa: Integer,
    exponent: Integer,
    negative: bool,
}

/// Returns `true` if a value whose discarded part is described by
/// `last` and `older` should have its magnitude incremented.
///
/// `kept` is the lowest digit that is kept.
pub(crate) fn rounds_away(
    mode: Round,
    radix: u32,
    last: u32,
    older: bool,
    negative: bool,
    kept: u32,
) -> bool {
    if last == 0 && !older {
        return false;
    }
    let half = radix / 2;
    match mode {
        Round::HalfEven => last > half || (last == half && (older || kept % 2 == 1)),
        Round::HalfUp => last >= half,
        Round::HalfDown => last > half || (last == half && older),
        Round::Up => true,
        Round::Down | Round::Unnecessary => false,
        Round::Ceiling => !negative,
        Round::Floor => negative,
        Round::ZeroFiveUp => kept == 0 || kept == 5,
        Round::Odd => kept % 2 == 0,
        Round::OddOrZeroFiveUp => {
            if radix == 2 {
                kept % 2 == 0
            } else {
                kept == 0 || kept == 5
            }
        }
    }
}

fn low_digit(m: &Integer, radix: u32) -> u32 {
    if radix == 2 {
        u32::from(!m.is_even())
    } else {
        u32::from(m.div_rem_small(radix as u16).1)
    }
}

fn shift_acc<A: ShiftAccumulator>(acc: &mut A, count: &Integer) {
    if count.cmp0() != Ordering::Greater {
        return;
    }
    let len = acc.digit_length();
    // shifting out more than every digit plus one leading zero changes
    // nothing further
    match count.to_u64() {
        Some(n) if n <= len + 1 => acc.shift_right(n),
        _ => acc.shift_right(len + 1),
    }
}

impl<H> RadixMath<H> {
    #[inline]
    pub const fn new() -> Self {
        RadixMath {
            helper: PhantomData,
        }
    }
}

impl<H: RadixHelper> RadixMath<H> {
    fn digits(m: &Integer) -> u64 {
        if H::radix() == 2 {
            m.significant_bits().max(1)
        } else {
            m.digit_count()
        }
    }

    fn parts(value: &H::Value) -> Parts {
        Parts {
            mantissa: H::mantissa(value),
            exponent: H::exponent(value),
            negative: H::flags(value) & flags::NEGATIVE != 0,
        }
    }

    #[inline]
    fn sign_flag(negative: bool) -> u8 {
        if negative {
            flags::NEGATIVE
        } else {
            0
        }
    }

    fn infinity(negative: bool) -> H::Value {
        H::create_with_flags(
            Integer::new(),
            Integer::new(),
            flags::INFINITY | Self::sign_flag(negative),
        )
    }

    /// `m * radix^power` for a nonnegative `power`.
    fn scale(m: &Integer, power: &Integer) -> Result<Integer> {
        if m.is_zero() || power.is_zero() {
            return Ok(m.clone());
        }
        if !power.can_fit_in_i32() {
            return Err(Error::Unsupported("exponent difference too large"));
        }
        Ok(H::multiply_by_radix_power(m, &FixedCell::from_integer(power.clone())))
    }

    fn scale_u64(m: &Integer, power: u64) -> Integer {
        if power == 0 {
            return m.clone();
        }
        if H::radix() == 2 {
            m.shl_bits(power)
        } else {
            m * powers::radix_pow(H::radix(), power)
        }
    }

    fn etiny(ctx: &Context) -> Option<Integer> {
        let (emin, _) = ctx.adjusted_range()?;
        if ctx.precision() > 0 {
            Some(emin - Integer::from(ctx.precision() - 1))
        } else {
            Some(emin)
        }
    }

    fn quiet_nan(value: &H::Value, ctx: &Context) -> H::Value {
        let fl = H::flags(value);
        let mut payload = H::mantissa(value);
        let p = ctx.precision();
        if p > 0 && Self::digits(&payload) > p {
            payload = payload
                .div_rem_nonzero(&powers::radix_pow(H::radix(), p))
                .1;
        }
        H::create_with_flags(payload, Integer::new(), (fl & flags::NEGATIVE) | flags::QUIET_NAN)
    }

    /// Propagates NaN operands, signaling `Invalid` for signaling NaNs.
    fn handle_nans(
        &self,
        a: &H::Value,
        b: Option<&H::Value>,
        ctx: &mut Context,
    ) -> Option<Result<H::Value>> {
        let fa = H::flags(a);
        let fb = b.map_or(0, H::flags);
        let pick = if fa & flags::SIGNALING_NAN != 0 {
            a
        } else if fb & flags::SIGNALING_NAN != 0 {
            b?
        } else if fa & flags::QUIET_NAN != 0 {
            return Some(Ok(Self::quiet_nan(a, ctx)));
        } else if fb & flags::QUIET_NAN != 0 {
            return Some(Ok(Self::quiet_nan(b?, ctx)));
        } else {
            return None;
        };
        let nan = Self::quiet_nan(pick, ctx);
        Some(ctx.signal(Flags::INVALID).map(|()| nan))
    }

    fn invalid(&self, ctx: &mut Context) -> Result<H::Value> {
        ctx.signal(Flags::INVALID)?;
        Ok(H::create_with_flags(Integer::new(), Integer::new(), flags::QUIET_NAN))
    }

    /// Rounds an operand to the precision before use in simplified
    /// arithmetic.
    fn simplify(&self, value: &H::Value, ctx: &mut Context) -> Result<H::Value> {
        let p = ctx.precision();
        if !ctx.is_simplified() || p == 0 || H::flags(value) & flags::SPECIAL != 0 {
            return Ok(value.clone());
        }
        let x = Self::parts(value);
        if Self::digits(&x.mantissa) <= p {
            return Ok(value.clone());
        }
        let mut tmp = Context::new(p, ctx.rounding()).with_blank_flags();
        let rounded = self.round_finite(x.mantissa, x.exponent, x.negative, 0, false, &mut tmp, Flags::NONE)?;
        if tmp.flags().contains(Flags::INEXACT) {
            ctx.signal(Flags::LOST_DIGITS | Flags::INEXACT | Flags::ROUNDED)?;
        }
        Ok(rounded)
    }

    fn finish_zero(
        &self,
        exponent: Integer,
        negative: bool,
        ctx: &mut Context,
        mut fl: Flags,
    ) -> Result<H::Value> {
        let mut exponent = exponent;
        if let Some((_, emax)) = ctx.adjusted_range() {
            let p = ctx.precision();
            let top = if ctx.clamp_normal_exponents() && p > 0 {
                emax - Integer::from(p - 1)
            } else {
                emax
            };
            if let Some(etiny) = Self::etiny(ctx) {
                if exponent < etiny {
                    exponent = etiny;
                    fl |= Flags::CLAMPED;
                } else if exponent > top {
                    exponent = top;
                    fl |= Flags::CLAMPED;
                }
            }
        }
        let negative = negative && !ctx.is_simplified();
        ctx.signal(fl)?;
        Ok(H::create_with_flags(Integer::new(), exponent, Self::sign_flag(negative)))
    }

    fn overflow(
        &self,
        negative: bool,
        emax: &Integer,
        ctx: &mut Context,
        fl: Flags,
    ) -> Result<H::Value> {
        let fl = fl | Flags::OVERFLOW | Flags::INEXACT | Flags::ROUNDED;
        let to_infinity = match ctx.rounding() {
            Round::Down | Round::ZeroFiveUp | Round::Odd | Round::OddOrZeroFiveUp => false,
            Round::Ceiling => !negative,
            Round::Floor => negative,
            _ => true,
        };
        let p = ctx.precision();
        ctx.signal(fl)?;
        if to_infinity || p == 0 {
            return Ok(Self::infinity(negative));
        }
        let largest = powers::radix_pow(H::radix(), p) - 1u32;
        let exponent = emax - Integer::from(p - 1);
        Ok(H::create_with_flags(largest, exponent, Self::sign_flag(negative)))
    }

    /// Rounds `(m + 0.last older) * radix^e` to the context once,
    /// applying precision, exponent range and clamping.
    #[allow(clippy::too_many_arguments)]
    fn round_finite(
        &self,
        m: Integer,
        e: Integer,
        negative: bool,
        last: u32,
        older: bool,
        ctx: &mut Context,
        mut fl: Flags,
    ) -> Result<H::Value> {
        if m.is_zero() && last == 0 && !older {
            return self.finish_zero(e, negative, ctx, fl);
        }
        let radix = H::radix();
        let p = ctx.precision();
        let range = ctx.adjusted_range();
        let mut acc = H::create_shift_accumulator_with_digits(m, last, older);
        let len = acc.digit_length();
        let mut shift = if p > 0 && len > p {
            Integer::from(len - p)
        } else {
            Integer::new()
        };
        let mut exp = &e + &shift;
        if let Some(etiny) = Self::etiny(ctx) {
            if exp < etiny {
                shift += &etiny - &exp;
                exp = etiny;
            }
        }
        shift_acc(&mut acc, &shift);
        let inexact = acc.is_inexact();
        let (dlast, dolder) = (acc.last_discarded_digit(), acc.older_discarded_digits());
        let mut mant = acc.into_shifted_int();
        if inexact {
            if ctx.rounding() == Round::Unnecessary {
                return self.invalid(ctx);
            }
            fl |= Flags::INEXACT | Flags::ROUNDED;
            let kept = low_digit(&mant, radix);
            if rounds_away(ctx.rounding(), radix, dlast, dolder, negative, kept) {
                mant += 1u32;
                if p > 0 && Self::digits(&mant) > p {
                    mant = mant.div_rem_small(radix as u16).0;
                    exp += 1u32;
                }
            }
        } else if shift.cmp0() == Ordering::Greater {
            fl |= Flags::ROUNDED;
        }
        if mant.is_zero() {
            // everything was rounded away below the smallest exponent
            fl |= Flags::SUBNORMAL | Flags::UNDERFLOW | Flags::CLAMPED;
            return self.finish_zero(exp, negative, ctx, fl);
        }
        if let Some((emin, emax)) = range {
            let adjusted = &exp + Integer::from(Self::digits(&mant) - 1);
            if adjusted > emax {
                return self.overflow(negative, &emax, ctx, fl);
            }
            if adjusted < emin {
                if ctx.is_simplified() {
                    fl |= Flags::UNDERFLOW | Flags::INEXACT | Flags::ROUNDED | Flags::SUBNORMAL;
                    return self.finish_zero(Integer::new(), false, ctx, fl);
                }
                fl |= Flags::SUBNORMAL;
                if inexact {
                    fl |= Flags::UNDERFLOW;
                }
            }
            if ctx.clamp_normal_exponents() && p > 0 {
                let top = emax - Integer::from(p - 1);
                if exp > top {
                    mant = Self::scale(&mant, &(&exp - &top))?;
                    exp = top;
                    fl |= Flags::CLAMPED;
                }
            }
        }
        ctx.signal(fl)?;
        Ok(H::create_with_flags(mant, exp, Self::sign_flag(negative)))
    }

    /// Rounds a value to the precision and exponent range of `ctx`.
    pub fn round_to_precision(&self, a: &H::Value, ctx: &mut Context) -> Result<H::Value> {
        if let Some(r) = self.handle_nans(a, None, ctx) {
            return r;
        }
        if H::flags(a) & flags::INFINITY != 0 {
            return Ok(a.clone());
        }
        let x = Self::parts(a);
        self.round_finite(x.mantissa, x.exponent, x.negative, 0, false, ctx, Flags::NONE)
    }

    /// Like `round_to_precision`, but a negative zero becomes positive
    /// unless rounding toward minus infinity.
    pub fn plus(&self, a: &H::Value, ctx: &mut Context) -> Result<H::Value> {
        if let Some(r) = self.handle_nans(a, None, ctx) {
            return r;
        }
        if H::flags(a) & flags::INFINITY != 0 {
            return Ok(a.clone());
        }
        let x = Self::parts(a);
        let negative =
            x.negative && !(x.mantissa.is_zero() && ctx.rounding() != Round::Floor);
        self.round_finite(x.mantissa, x.exponent, negative, 0, false, ctx, Flags::NONE)
    }

    pub fn add(&self, a: &H::Value, b: &H::Value, ctx: &mut Context) -> Result<H::Value> {
        if let Some(r) = self.handle_nans(a, Some(b), ctx) {
            return r;
        }
        let (fa, fb) = (H::flags(a), H::flags(b));
        let (na, nb) = (fa & flags::NEGATIVE != 0, fb & flags::NEGATIVE != 0);
        if fa & flags::INFINITY != 0 {
            if fb & flags::INFINITY != 0 && na != nb {
                return self.invalid(ctx);
            }
            return Ok(Self::infinity(na));
        }
        if fb & flags::INFINITY != 0 {
            return Ok(Self::infinity(nb));
        }
        let a = self.simplify(a, ctx)?;
        let b = self.simplify(b, ctx)?;
        self.add_finite(Self::parts(&a), Self::parts(&b), ctx)
    }

    pub fn subtract(&self, a: &H::Value, b: &H::Value, ctx: &mut Context) -> Result<H::Value> {
        let fb = H::flags(b);
        if fb & flags::NAN != 0 {
            return self.add(a, b, ctx);
        }
        let negated = H::create_with_flags(H::mantissa(b), H::exponent(b), fb ^ flags::NEGATIVE);
        self.add(a, &negated, ctx)
    }

    fn add_finite(&self, mut x: Parts, mut y: Parts, ctx: &mut Context) -> Result<H::Value> {
        let p = ctx.precision();
        let floor = ctx.rounding() == Round::Floor;
        match (x.mantissa.is_zero(), y.mantissa.is_zero()) {
            (true, true) => {
                let e = (&x.exponent).min(&y.exponent).clone();
                let negative = if x.negative == y.negative { x.negative } else { floor };
                return self.finish_zero(e, negative, ctx, Flags::NONE);
            }
            (true, false) | (false, true) => {
                let (zero, other) = if x.mantissa.is_zero() { (x, y) } else { (y, x) };
                let mut target = (&zero.exponent).min(&other.exponent).clone();
                if p > 0 {
                    // zeros appended beyond the precision would only be
                    // rounded off again
                    let d = Self::digits(&other.mantissa);
                    let limit = if d < p {
                        &other.exponent - Integer::from(p - d)
                    } else {
                        other.exponent.clone()
                    };
                    if limit > target {
                        target = limit;
                    }
                }
                let m = Self::scale(&other.mantissa, &(&other.exponent - &target))?;
                return self.round_finite(m, target, other.negative, 0, false, ctx, Flags::NONE);
            }
            (false, false) => {}
        }
        if p > 0 {
            let adj_x = &x.exponent + Integer::from(Self::digits(&x.mantissa));
            let adj_y = &y.exponent + Integer::from(Self::digits(&y.mantissa));
            let (hi, lo) = if adj_x >= adj_y {
                (&mut x, &mut y)
            } else {
                (&mut y, &mut x)
            };
            let guard = p + 3;
            let hd = Self::digits(&hi.mantissa);
            let hi_low = if hd < guard {
                &hi.exponent - Integer::from(guard - hd)
            } else {
                hi.exponent.clone()
            };
            let lo_adj = &lo.exponent + Integer::from(Self::digits(&lo.mantissa) - 1);
            if lo_adj < &hi_low - 1u32 {
                // the smaller operand lies entirely below the rounding
                // digits; a single unit there rounds the same way
                lo.mantissa = Integer::from(1u32);
                lo.exponent = hi_low - 2u32;
            }
        }
        let e = (&x.exponent).min(&y.exponent).clone();
        let mx = Self::scale(&x.mantissa, &(&x.exponent - &e))?;
        let my = Self::scale(&y.mantissa, &(&y.exponent - &e))?;
        let (m, negative) = if x.negative == y.negative {
            (mx + my, x.negative)
        } else {
            match mx.cmp(&my) {
                Ordering::Greater => (mx - my, x.negative),
                Ordering::Less => (my - mx, y.negative),
                Ordering::Equal => (Integer::new(), floor),
            }
        };
        self.round_finite(m, e, negative, 0, false, ctx, Flags::NONE)
    }

    pub fn multiply(&self, a: &H::Value, b: &H::Value, ctx: &mut Context) -> Result<H::Value> {
        if let Some(r) = self.handle_nans(a, Some(b), ctx) {
            return r;
        }
        let (fa, fb) = (H::flags(a), H::flags(b));
        let negative = (fa ^ fb) & flags::NEGATIVE != 0;
        if (fa | fb) & flags::INFINITY != 0 {
            let a_zero = fa & flags::INFINITY == 0 && H::sign(a) == 0;
            let b_zero = fb & flags::INFINITY == 0 && H::sign(b) == 0;
            if a_zero || b_zero {
                return self.invalid(ctx);
            }
            return Ok(Self::infinity(negative));
        }
        let a = self.simplify(a, ctx)?;
        let b = self.simplify(b, ctx)?;
        let (x, y) = (Self::parts(&a), Self::parts(&b));
        self.round_finite(
            x.mantissa * y.mantissa,
            x.exponent + y.exponent,
            negative,
            0,
            false,
            ctx,
            Flags::NONE,
        )
    }

    /// Strips trailing zero digits while the exponent is below `ideal`.
    fn reduce_to_ideal(m: Integer, e: Integer, ideal: &Integer) -> (Integer, Integer) {
        if m.is_zero() || e >= *ideal {
            return (m, e);
        }
        let room = (ideal - &e).to_u64().unwrap_or(u64::MAX);
        if H::radix() == 2 {
            let tz = m.lowest_set_bit().unwrap_or(0).min(room);
            return (m.shr_bits(tz), e + tz);
        }
        let (mut m, mut stripped) = (m, 0u64);
        while stripped < room {
            let (q, r) = m.div_rem_small(H::radix() as u16);
            if r != 0 {
                break;
            }
            m = q;
            stripped += 1;
        }
        (m, e + stripped)
    }

    /// Divides, giving an exact result or `Invalid` when the precision
    /// is unlimited and the quotient does not terminate.
    pub fn divide(&self, a: &H::Value, b: &H::Value, ctx: &mut Context) -> Result<H::Value> {
        if let Some(r) = self.handle_nans(a, Some(b), ctx) {
            return r;
        }
        let (fa, fb) = (H::flags(a), H::flags(b));
        let negative = (fa ^ fb) & flags::NEGATIVE != 0;
        if fa & flags::INFINITY != 0 {
            if fb & flags::INFINITY != 0 {
                return self.invalid(ctx);
            }
            return Ok(Self::infinity(negative));
        }
        if fb & flags::INFINITY != 0 {
            return match Self::etiny(ctx) {
                Some(etiny) => self.finish_zero(etiny, negative, ctx, Flags::CLAMPED),
                None => self.finish_zero(Integer::new(), negative, ctx, Flags::NONE),
            };
        }
        let a = self.simplify(a, ctx)?;
        let b = self.simplify(b, ctx)?;
        let (x, y) = (Self::parts(&a), Self::parts(&b));
        if y.mantissa.is_zero() {
            if x.mantissa.is_zero() {
                return self.invalid(ctx);
            }
            ctx.signal(Flags::DIVIDE_BY_ZERO)?;
            return Ok(Self::infinity(negative));
        }
        let ideal = &x.exponent - &y.exponent;
        if x.mantissa.is_zero() {
            return self.finish_zero(ideal, negative, ctx, Flags::NONE);
        }
        let p = ctx.precision();
        if p == 0 {
            let shift = match H::division_shift(&x.mantissa, &y.mantissa) {
                Some(s) => s.to_integer(),
                None => return self.invalid(ctx),
            };
            let num = Self::scale(&x.mantissa, &shift)?;
            let (q, _) = num.div_rem_nonzero(&y.mantissa);
            let (q, e) = Self::reduce_to_ideal(q, &ideal - &shift, &ideal);
            return self.round_finite(q, e, negative, 0, false, ctx, Flags::NONE);
        }
        // at least p + 1 quotient digits, so the remainder only ever
        // acts as a sticky digit
        let (dx, dy) = (Self::digits(&x.mantissa), Self::digits(&y.mantissa));
        let shift = (p + 2 + dy).saturating_sub(dx);
        let num = Self::scale_u64(&x.mantissa, shift);
        let (q, r) = num.div_rem_nonzero(&y.mantissa);
        let e = &ideal - Integer::from(shift);
        if r.is_zero() {
            let (q, e) = Self::reduce_to_ideal(q, e, &ideal);
            self.round_finite(q, e, negative, 0, false, ctx, Flags::NONE)
        } else {
            self.round_finite(q, e, negative, 0, true, ctx, Flags::NONE)
        }
    }

    /// Gives `a` the exponent of `b`, rounding if necessary.
    pub fn quantize(&self, a: &H::Value, b: &H::Value, ctx: &mut Context) -> Result<H::Value> {
        if let Some(r) = self.handle_nans(a, Some(b), ctx) {
            return r;
        }
        let (fa, fb) = (H::flags(a), H::flags(b));
        if (fa | fb) & flags::INFINITY != 0 {
            if fa & fb & flags::INFINITY != 0 {
                return Ok(a.clone());
            }
            return self.invalid(ctx);
        }
        self.quantize_to(a, &H::exponent(b), ctx)
    }

    fn quantize_to(&self, a: &H::Value, target: &Integer, ctx: &mut Context) -> Result<H::Value> {
        let x = Self::parts(a);
        let p = ctx.precision();
        let range = ctx.adjusted_range();
        if let (Some((_, emax)), Some(etiny)) = (&range, Self::etiny(ctx)) {
            if target > emax || *target < etiny {
                return self.invalid(ctx);
            }
        }
        let mut fl = Flags::NONE;
        let mut inexact = false;
        let mant = if x.exponent >= *target {
            let diff = &x.exponent - target;
            if p > 0 && !x.mantissa.is_zero() {
                let room = Integer::from(p) - Integer::from(Self::digits(&x.mantissa));
                if diff > room {
                    return self.invalid(ctx);
                }
            }
            Self::scale(&x.mantissa, &diff)?
        } else {
            let mut acc = H::create_shift_accumulator(x.mantissa);
            shift_acc(&mut acc, &(target - &x.exponent));
            inexact = acc.is_inexact();
            let (last, older) = (acc.last_discarded_digit(), acc.older_discarded_digits());
            let mut m = acc.into_shifted_int();
            fl |= Flags::ROUNDED;
            if inexact {
                if ctx.rounding() == Round::Unnecessary {
                    return self.invalid(ctx);
                }
                fl |= Flags::INEXACT;
                let kept = low_digit(&m, H::radix());
                if rounds_away(ctx.rounding(), H::radix(), last, older, x.negative, kept) {
                    m += 1u32;
                }
            }
            m
        };
        if p > 0 && !mant.is_zero() && Self::digits(&mant) > p {
            return self.invalid(ctx);
        }
        if let Some((emin, emax)) = range {
            if !mant.is_zero() {
                let adjusted = target + Integer::from(Self::digits(&mant) - 1);
                if adjusted > emax {
                    return self.invalid(ctx);
                }
                if adjusted < emin {
                    fl |= Flags::SUBNORMAL;
                    if inexact {
                        fl |= Flags::UNDERFLOW;
                    }
                }
            }
        }
        ctx.signal(fl)?;
        Ok(H::create_with_flags(mant, target.clone(), Self::sign_flag(x.negative)))
    }

    /// Rounds to the given exponent if the value has a smaller one;
    /// otherwise only rounds to the context.
    pub fn round_to_exponent(
        &self,
        a: &H::Value,
        target: &Integer,
        ctx: &mut Context,
    ) -> Result<H::Value> {
        if let Some(r) = self.handle_nans(a, None, ctx) {
            return r;
        }
        if H::flags(a) & flags::INFINITY != 0 {
            return Ok(a.clone());
        }
        if H::exponent(a) >= *target {
            return self.round_to_precision(a, ctx);
        }
        self.quantize_to(a, target, ctx)
    }

    /// Rounds to the context, then removes trailing zero digits.
    pub fn reduce(&self, a: &H::Value, ctx: &mut Context) -> Result<H::Value> {
        let rounded = self.round_to_precision(a, ctx)?;
        if H::flags(&rounded) & flags::SPECIAL != 0 {
            return Ok(rounded);
        }
        let x = Self::parts(&rounded);
        let sign = Self::sign_flag(x.negative);
        if x.mantissa.is_zero() {
            return Ok(H::create_with_flags(Integer::new(), Integer::new(), sign));
        }
        let limit = &x.exponent + Integer::from(u64::MAX);
        let (m, e) = Self::reduce_to_ideal(x.mantissa, x.exponent, &limit);
        Ok(H::create_with_flags(m, e, sign))
    }

    /// Truncates a finite value toward zero. With `exact`, fails if a
    /// nonzero fraction would be discarded.
    pub(crate) fn to_integer(&self, a: &H::Value, exact: bool) -> Result<Integer> {
        if H::flags(a) & flags::SPECIAL != 0 {
            return Err(Error::Overflow("Integer"));
        }
        let x = Self::parts(a);
        let mag = if x.mantissa.is_zero() {
            Integer::new()
        } else if x.exponent.cmp0() != Ordering::Less {
            let n = x
                .exponent
                .to_u64()
                .ok_or(Error::Unsupported("exponent too large for an integer"))?;
            Self::scale_u64(&x.mantissa, n)
        } else {
            let mut acc = H::create_shift_accumulator(x.mantissa);
            shift_acc(&mut acc, &(-&x.exponent));
            if exact && acc.is_inexact() {
                return Err(Error::NotAnExactInteger);
            }
            acc.into_shifted_int()
        };
        Ok(if x.negative { -mag } else { mag })
    }

    /// Like `to_integer` without `exact`, failing with `Overflow` if the
    /// magnitude needs more than `max_bits` bits.
    pub(crate) fn to_integer_checked(&self, a: &H::Value, max_bits: u64) -> Result<Integer> {
        if H::flags(a) & flags::SPECIAL == 0 {
            let m = H::mantissa(a);
            if !m.is_zero() {
                // radix^adjusted is a lower bound on the magnitude, and
                // 332/100 is below log2(10)
                let adjusted = H::exponent(a) + Integer::from(Self::digits(&m) - 1);
                let bits = if H::radix() == 2 {
                    adjusted
                } else {
                    adjusted * 332u32 / 100u32
                };
                if bits >= Integer::from(max_bits) {
                    return Err(Error::Overflow("Integer"));
                }
            }
        }
        let i = self.to_integer(a, false)?;
        if i.significant_bits() > max_bits {
            return Err(Error::Overflow("Integer"));
        }
        Ok(i)
    }

    /// Compares magnitudes of two finite values.
    pub(crate) fn compare_magnitude(
        ma: &Integer,
        ea: &Integer,
        mb: &Integer,
        eb: &Integer,
    ) -> Ordering {
        match (ma.is_zero(), mb.is_zero()) {
            (true, true) => return Ordering::Equal,
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            _ => {}
        }
        let adj_a = ea + Integer::from(Self::digits(ma));
        let adj_b = eb + Integer::from(Self::digits(mb));
        match adj_a.cmp(&adj_b) {
            Ordering::Equal => {}
            other => return other,
        }
        // equal adjusted exponents bound the difference by the digit counts
        match ea.cmp(eb) {
            Ordering::Equal => ma.cmp(mb),
            Ordering::Greater => {
                let diff = (ea - eb).to_u64().unwrap_or(0);
                Self::scale_u64(ma, diff).cmp(mb)
            }
            Ordering::Less => {
                let diff = (eb - ea).to_u64().unwrap_or(0);
                ma.cmp(&Self::scale_u64(mb, diff))
            }
        }
    }

    /// Numeric comparison; `None` if either value is NaN.
    pub fn compare_to(&self, a: &H::Value, b: &H::Value) -> Option<Ordering> {
        let (fa, fb) = (H::flags(a), H::flags(b));
        if (fa | fb) & flags::NAN != 0 {
            return None;
        }
        let (sa, sb) = (H::sign(a), H::sign(b));
        if sa != sb {
            return Some(sa.cmp(&sb));
        }
        if sa == 0 {
            return Some(Ordering::Equal);
        }
        let mag = match (fa & flags::INFINITY != 0, fb & flags::INFINITY != 0) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => Self::compare_magnitude(
                &H::mantissa(a),
                &H::exponent(a),
                &H::mantissa(b),
                &H::exponent(b),
            ),
        };
        Some(if sa < 0 { mag.reverse() } else { mag })
    }

    /// Compares, returning -1, 0 or 1 as a value, or NaN if either
    /// operand is NaN.
    pub fn compare_to_with_context(
        &self,
        a: &H::Value,
        b: &H::Value,
        ctx: &mut Context,
    ) -> Result<H::Value> {
        if let Some(r) = self.handle_nans(a, Some(b), ctx) {
            return r;
        }
        let ord = self.compare_to(a, b).unwrap_or(Ordering::Equal);
        Ok(H::value_of(ord as i32))
    }

    pub fn max(&self, a: &H::Value, b: &H::Value, ctx: &mut Context) -> Result<H::Value> {
        self.min_max(a, b, ctx, true)
    }

    pub fn min(&self, a: &H::Value, b: &H::Value, ctx: &mut Context) -> Result<H::Value> {
        self.min_max(a, b, ctx, false)
    }

    fn min_max(
        &self,
        a: &H::Value,
        b: &H::Value,
        ctx: &mut Context,
        want_max: bool,
    ) -> Result<H::Value> {
        let (fa, fb) = (H::flags(a), H::flags(b));
        let (a_nan, b_nan) = (fa & flags::QUIET_NAN != 0, fb & flags::QUIET_NAN != 0);
        if (fa | fb) & flags::SIGNALING_NAN != 0 || (a_nan && b_nan) {
            if let Some(r) = self.handle_nans(a, Some(b), ctx) {
                return r;
            }
        }
        // a quiet NaN loses to any number
        if a_nan {
            return self.round_to_precision(b, ctx);
        }
        if b_nan {
            return self.round_to_precision(a, ctx);
        }
        let pick_a = match self.compare_to(a, b).unwrap_or(Ordering::Equal) {
            Ordering::Greater => want_max,
            Ordering::Less => !want_max,
            Ordering::Equal => {
                let (na, nb) = (fa & flags::NEGATIVE != 0, fb & flags::NEGATIVE != 0);
                if na != nb {
                    if want_max {
                        !na
                    } else {
                        na
                    }
                } else {
                    let (ea, eb) = (H::exponent(a), H::exponent(b));
                    if want_max != na {
                        ea >= eb
                    } else {
                        ea <= eb
                    }
                }
            }
        };
        self.round_to_precision(if pick_a { a } else { b }, ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_debug_names_radix() {
        use crate::binary::BinaryHelper;
        use crate::decimal::DecimalHelper;
        let dec = RadixMath::<DecimalHelper>::new();
        assert_eq!(format!("{:?}", dec), "RadixMath { radix: 10 }");
        let bin = RadixMath::<BinaryHelper>::new();
        assert_eq!(format!("{:?}", bin), "RadixMath { radix: 2 }");
    }

    #[test]
    fn check_rounds_away() {
        use Round::*;
        // 2.5 and 3.5 under each mode, radix 10
        assert!(!rounds_away(HalfEven, 10, 5, false, false, 2));
        assert!(rounds_away(HalfEven, 10, 5, false, false, 3));
        assert!(rounds_away(HalfEven, 10, 5, true, false, 2));
        assert!(rounds_away(HalfUp, 10, 5, false, false, 2));
        assert!(!rounds_away(HalfDown, 10, 5, false, false, 2));
        assert!(rounds_away(Up, 10, 0, true, false, 2));
        assert!(!rounds_away(Down, 10, 9, true, false, 2));
        assert!(rounds_away(Ceiling, 10, 1, false, false, 2));
        assert!(!rounds_away(Ceiling, 10, 1, false, true, 2));
        assert!(rounds_away(Floor, 10, 1, false, true, 2));
        assert!(rounds_away(ZeroFiveUp, 10, 1, false, false, 5));
        assert!(!rounds_away(ZeroFiveUp, 10, 1, false, false, 4));
        assert!(rounds_away(Odd, 2, 0, true, false, 0));
        assert!(!rounds_away(Odd, 2, 1, false, false, 1));
        assert!(!rounds_away(HalfEven, 10, 0, false, false, 3));
        // radix 2 ties
        assert!(!rounds_away(HalfEven, 2, 1, false, false, 0));
        assert!(rounds_away(HalfEven, 2, 1, false, false, 1));
        assert!(rounds_away(OddOrZeroFiveUp, 2, 1, false, false, 0));
    }
}
