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

use crate::binary::big::MATH;
use crate::context::Context;
use crate::error::{Error, Result};
use crate::radix::{flags, powers};
use crate::{Binary, Decimal, FixedCell, Integer};

/// The layout of an IEEE 754 binary interchange format.
pub(crate) struct IeeeFormat {
    frac_bits: u32,
    exp_bits: u32,
}

pub(crate) const F64: IeeeFormat = IeeeFormat {
    frac_bits: 52,
    exp_bits: 11,
};

pub(crate) const F32: IeeeFormat = IeeeFormat {
    frac_bits: 23,
    exp_bits: 8,
};

impl IeeeFormat {
    #[inline]
    fn bias(&self) -> i32 {
        (1 << (self.exp_bits - 1)) - 1
    }

    #[inline]
    fn max_biased(&self) -> u64 {
        (1 << self.exp_bits) - 1
    }

    #[inline]
    fn quiet_bit(&self) -> u64 {
        1 << (self.frac_bits - 1)
    }

    /// Exponent of the lowest mantissa bit of a subnormal.
    #[inline]
    fn etiny(&self) -> i32 {
        1 - self.bias() - self.frac_bits as i32
    }

    fn sign_bit(&self) -> u64 {
        1 << (self.frac_bits + self.exp_bits)
    }

    /// Splits the bit pattern into an exact value.
    pub(crate) fn decompose(&self, bits: u64) -> Binary {
        let sign = if bits & self.sign_bit() != 0 {
            flags::NEGATIVE
        } else {
            0
        };
        let biased = (bits >> self.frac_bits) & self.max_biased();
        let fraction = bits & ((1 << self.frac_bits) - 1);
        if biased == self.max_biased() {
            if fraction == 0 {
                return Binary::from_raw(Integer::new(), Integer::new(), flags::INFINITY | sign);
            }
            let kind = if fraction & self.quiet_bit() != 0 {
                flags::QUIET_NAN
            } else {
                flags::SIGNALING_NAN
            };
            let payload = Integer::from(fraction & (self.quiet_bit() - 1));
            return Binary::from_raw(payload, Integer::new(), kind | sign);
        }
        let (m, e) = if biased == 0 {
            (fraction, self.etiny())
        } else {
            (
                fraction | (1 << self.frac_bits),
                biased as i32 - self.bias() - self.frac_bits as i32,
            )
        };
        if m == 0 {
            return Binary::from_raw(Integer::new(), Integer::new(), sign);
        }
        let tz = m.trailing_zeros();
        Binary::from_raw(Integer::from(m >> tz), Integer::from(e + tz as i32), sign)
    }

    /// Packs a value already rounded to this format.
    pub(crate) fn assemble(&self, value: &Binary) -> u64 {
        let sign = if value.is_negative() {
            self.sign_bit()
        } else {
            0
        };
        let top = self.max_biased() << self.frac_bits;
        if value.is_infinity() {
            return sign | top;
        }
        if value.is_nan() {
            let low = value
                .mantissa
                .low_bits(u64::from(self.frac_bits - 1))
                .to_u64()
                .unwrap_or(0);
            let payload = if value.is_quiet_nan() {
                low | self.quiet_bit()
            } else {
                // an all-zero fraction would read back as infinity
                low.max(1)
            };
            return sign | top | payload;
        }
        let m = &value.mantissa;
        let e = &value.exponent;
        let bits = m.significant_bits();
        if bits == 0 {
            return sign;
        }
        let full = u64::from(self.frac_bits) + 1;
        // position of the leading bit
        let lead = e + Integer::from(bits - 1);
        let emin = 1 - self.bias();
        if lead >= emin {
            let biased = lead + self.bias();
            match biased.to_u64() {
                Some(b) if b < self.max_biased() => {
                    let norm = m.shl_bits(full - bits).to_u64().unwrap_or(0);
                    sign | (b << self.frac_bits) | (norm & ((1 << self.frac_bits) - 1))
                }
                _ => sign | top,
            }
        } else {
            let shift = (e - self.etiny()).to_u64().unwrap_or(0);
            sign | m.shl_bits(shift).to_u64().unwrap_or(0)
        }
    }
}

impl Binary {
    /// Converts exactly from an `f64`, keeping NaN payloads and the
    /// sign of zero.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use radixnum::Binary;
    /// let b = Binary::from_f64(-0.0);
    /// assert!(b.is_zero() && b.is_negative());
    /// assert_eq!(Binary::from_f64(1e-320).to_f64(), 1e-320);
    /// ```
    #[inline]
    pub fn from_f64(value: f64) -> Binary {
        F64.decompose(value.to_bits())
    }

    #[inline]
    pub fn from_f32(value: f32) -> Binary {
        F32.decompose(u64::from(value.to_bits()))
    }

    /// Rounds to the nearest `f64`, ties to even.
    pub fn to_f64(&self) -> f64 {
        f64::from_bits(F64.assemble(&self.round_for(Context::binary64())))
    }

    /// Rounds to the nearest `f32`, ties to even.
    pub fn to_f32(&self) -> f32 {
        f32::from_bits(F32.assemble(&self.round_for(Context::binary32())) as u32)
    }

    fn round_for(&self, mut ctx: Context) -> Binary {
        if !self.is_finite() || self.mantissa.is_zero() {
            return self.clone();
        }
        MATH.round_to_precision(self, &mut ctx)
            .unwrap_or(Binary::NAN)
    }

    /// Converts to a `Decimal` exactly.
    ///
    /// Every binary fraction has a terminating decimal expansion:
    /// m × 2<sup>−n</sup> is m × 5<sup>n</sup> × 10<sup>−n</sup>.
    /// Fails with `Unsupported` if the exponent does not fit an `i32`.
    pub fn to_decimal(&self) -> Result<Decimal> {
        if !self.is_finite() {
            return Ok(Decimal::from_raw(
                FixedCell::from_integer(self.mantissa.clone()),
                FixedCell::ZERO,
                self.flags,
            ));
        }
        let e = self
            .exponent
            .to_i32()
            .ok_or(Error::Unsupported("binary exponent too large for decimal conversion"))?;
        let m = self.mantissa.clone();
        let (mantissa, exponent) = if m.is_zero() {
            (m, 0)
        } else if e >= 0 {
            (m.shl_bits(e as u64), 0)
        } else {
            let n = u64::from(e.unsigned_abs());
            (m * powers::pow5(n), e)
        };
        Ok(Decimal::from_raw(
            FixedCell::from_integer(mantissa),
            FixedCell::from_i32(exponent),
            self.flags,
        ))
    }

    /// Converts a decimal value, rounding correctly to the context.
    #[inline]
    pub fn from_decimal(value: &Decimal, ctx: &mut Context) -> Result<Binary> {
        value.to_binary(ctx)
    }

    pub fn from_integer(value: &Integer) -> Binary {
        Binary::create(value, &Integer::new())
    }

    /// Truncates toward zero. Fails with `Overflow` for infinities and
    /// NaNs.
    pub fn to_integer_truncating(&self) -> Result<Integer> {
        MATH.to_integer(self, false)
    }

    /// Converts to an integer, failing with `NotAnExactInteger` if there
    /// is a fractional part.
    pub fn to_integer_exact(&self) -> Result<Integer> {
        MATH.to_integer(self, true)
    }

    /// Truncates toward zero, failing with `Overflow` if the magnitude
    /// needs more than `max_bits` bits.
    pub fn to_integer_checked(&self, max_bits: u64) -> Result<Integer> {
        MATH.to_integer_checked(self, max_bits)
    }
}

macro_rules! from_int {
    { $($T:ty)* } => { $(
        impl From<$T> for Binary {
            #[inline]
            fn from(value: $T) -> Binary {
                Binary::from_integer(&Integer::from(value))
            }
        }
    )* };
}

from_int! { i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 }

impl From<Integer> for Binary {
    #[inline]
    fn from(value: Integer) -> Binary {
        Binary::from_integer(&value)
    }
}

impl From<&Integer> for Binary {
    #[inline]
    fn from(value: &Integer) -> Binary {
        Binary::from_integer(value)
    }
}

impl From<f64> for Binary {
    #[inline]
    fn from(value: f64) -> Binary {
        Binary::from_f64(value)
    }
}

impl From<f32> for Binary {
    #[inline]
    fn from(value: f32) -> Binary {
        Binary::from_f32(value)
    }
}

impl From<&Binary> for f64 {
    #[inline]
    fn from(value: &Binary) -> f64 {
        value.to_f64()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_decompose() {
        let b = F64.decompose(0x7ff8_0000_0000_002a);
        assert!(b.is_quiet_nan());
        assert_eq!(b.unsigned_mantissa(), 42);
        let s = F64.decompose(0xfff0_0000_0000_0001);
        assert!(s.is_signaling_nan() && s.is_negative());
        assert_eq!(F64.assemble(&s), 0xfff0_0000_0000_0001);
        assert_eq!(F64.assemble(&Binary::SIGNALING_NAN), 0x7ff0_0000_0000_0001);
        assert_eq!(F64.assemble(&b), 0x7ff8_0000_0000_002a);
        let sub = F64.decompose(1);
        assert_eq!(sub.exponent(), -1074);
        assert_eq!(F64.assemble(&sub), 1);
    }

    #[test]
    fn check_to_decimal() {
        let d = Binary::from_f64(0.375).to_decimal().unwrap();
        assert_eq!(d.to_string(), "0.375");
        let d = Binary::from_f64(-1024.0).to_decimal().unwrap();
        assert_eq!(d.to_string(), "-1024");
        assert!(Binary::NAN.to_decimal().unwrap().is_nan());
        let huge = Binary::create(&Integer::from(1), &Integer::from(1u64 << 40));
        assert!(huge.to_decimal().is_err());
    }

    #[test]
    fn check_integers() {
        let b = Binary::from_f64(-7.75);
        assert_eq!(b.to_integer_truncating().unwrap(), -7);
        assert_eq!(b.to_integer_exact(), Err(Error::NotAnExactInteger));
        assert_eq!(Binary::from(1u64 << 40).to_integer_checked(41).unwrap(), 1u64 << 40);
        assert!(Binary::from(1u64 << 40).to_integer_checked(40).is_err());
        assert!(Binary::POSITIVE_INFINITY.to_integer_truncating().is_err());
    }
}
