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

use crate::error::{Error, Result};
use crate::integer::limbs;
use crate::Integer;
use az::{Cast, WrappingCast};

macro_rules! from_signed {
    { $($T:ty)* } => { $(
        impl From<$T> for Integer {
            #[inline]
            fn from(val: $T) -> Integer {
                let mag = i128::from(val).unsigned_abs();
                Integer::from_limbs(val < 0, limbs::from_u128(mag))
            }
        }
    )* };
}

macro_rules! from_unsigned {
    { $($T:ty)* } => { $(
        impl From<$T> for Integer {
            #[inline]
            fn from(val: $T) -> Integer {
                Integer::from_limbs(false, limbs::from_u128(u128::from(val)))
            }
        }
    )* };
}

from_signed! { i8 i16 i32 i64 i128 }
from_unsigned! { u8 u16 u32 u64 u128 }

impl From<isize> for Integer {
    #[inline]
    fn from(val: isize) -> Integer {
        let wide: i64 = val.cast();
        Integer::from(wide)
    }
}

impl From<usize> for Integer {
    #[inline]
    fn from(val: usize) -> Integer {
        let wide: u64 = val.cast();
        Integer::from(wide)
    }
}

impl<'a> From<&'a Integer> for Integer {
    #[inline]
    fn from(val: &Integer) -> Integer {
        val.clone()
    }
}

macro_rules! to_prim {
    { $($T:ident $checked:ident $opt:ident $wrapping:ident;)* } => { $(
        /// Converts to the primitive type if the value fits.
        #[inline]
        pub fn $opt(&self) -> Option<$T> {
            self.$checked().ok()
        }

        /// Converts to the primitive type, or fails with
        /// `Error::Overflow` if the value does not fit.
        pub fn $checked(&self) -> Result<$T> {
            if self.significant_bits() > 128 {
                return Err(Error::Overflow(stringify!($T)));
            }
            let mag = limbs::low_u128(self.limbs());
            let wide: Option<i128> = if self.is_negative() {
                if mag <= 1u128 << 127 {
                    Some((mag as i128).wrapping_neg())
                } else {
                    None
                }
            } else if mag <= i128::MAX as u128 {
                Some(mag as i128)
            } else {
                // only u128 can hold this
                return <$T>::try_from(mag).map_err(|_| Error::Overflow(stringify!($T)));
            };
            wide.and_then(|w| <$T>::try_from(w).ok())
                .ok_or(Error::Overflow(stringify!($T)))
        }

        /// Converts to the primitive type, wrapping around on overflow
        /// as two's complement.
        #[inline]
        pub fn $wrapping(&self) -> $T {
            let mag = limbs::low_u128(self.limbs());
            let v = if self.is_negative() { mag.wrapping_neg() } else { mag };
            v.wrapping_cast()
        }
    )* };
}

impl Integer {
    to_prim! {
        i8 to_i8_checked to_i8 to_i8_wrapping;
        i16 to_i16_checked to_i16 to_i16_wrapping;
        i32 to_i32_checked to_i32 to_i32_wrapping;
        i64 to_i64_checked to_i64 to_i64_wrapping;
        i128 to_i128_checked to_i128 to_i128_wrapping;
        u8 to_u8_checked to_u8 to_u8_wrapping;
        u16 to_u16_checked to_u16 to_u16_wrapping;
        u32 to_u32_checked to_u32 to_u32_wrapping;
        u64 to_u64_checked to_u64 to_u64_wrapping;
        u128 to_u128_checked to_u128 to_u128_wrapping;
    }

    /// Returns `true` if the value fits in an `i32`.
    #[inline]
    pub fn can_fit_in_i32(&self) -> bool {
        self.significant_bits() <= 32 && self.to_i32().is_some()
    }

    /// Converts to `f64`, rounding to the nearest with ties to even.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use radixnum::Integer;
    /// assert_eq!(Integer::from(-3).to_f64(), -3.0);
    /// let big = Integer::from(1).shl_bits(1024);
    /// assert_eq!(big.to_f64(), f64::INFINITY);
    /// ```
    pub fn to_f64(&self) -> f64 {
        let bits = self.significant_bits();
        let mag = if bits <= 64 {
            limbs::low_u64(self.limbs()) as f64
        } else {
            // 64 leading bits plus a sticky bit round like the full
            // value, since 64 > 53 + 2
            let shift = bits - 64;
            let mut top = limbs::low_u64(&limbs::shr_bits(self.limbs(), shift));
            if limbs::trailing_zeros(self.limbs()).map_or(false, |tz| tz < shift) {
                top |= 1;
            }
            if shift > 1100 {
                f64::INFINITY
            } else {
                let scale = shift as i32;
                (top as f64) * 2f64.powi(scale)
            }
        };
        if self.is_negative() {
            -mag
        } else {
            mag
        }
    }

    /// Converts from `f64`, truncating any fraction.
    ///
    /// Fails with `Error::Overflow` for infinities and NaN.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use radixnum::Integer;
    /// assert_eq!(Integer::from_f64(-2.75).unwrap(), -2);
    /// assert!(Integer::from_f64(f64::NAN).is_err());
    /// ```
    pub fn from_f64(val: f64) -> Result<Integer> {
        if !val.is_finite() {
            return Err(Error::Overflow("Integer"));
        }
        let bits = val.to_bits();
        let negative = bits >> 63 != 0;
        let exp = ((bits >> 52) & 0x7ff) as i64;
        let mut mant = bits & ((1 << 52) - 1);
        if exp == 0 {
            // subnormal or zero: |val| < 1
            return Ok(Integer::new());
        }
        mant |= 1 << 52;
        let e = exp - 1075;
        let mag = if e >= 0 {
            limbs::shl_bits(&limbs::from_u64(mant), e as u64)
        } else if e > -64 {
            limbs::from_u64(mant >> (-e))
        } else {
            Vec::new()
        };
        Ok(Integer::from_limbs(negative, mag))
    }

    /// Converts from `f32`, truncating any fraction.
    #[inline]
    pub fn from_f32(val: f32) -> Result<Integer> {
        Integer::from_f64(f64::from(val))
    }
}

#[cfg(test)]
mod tests {
    use crate::{Error, Integer};

    #[test]
    fn check_checked() {
        assert_eq!(Integer::from(i32::MIN).to_i32_checked(), Ok(i32::MIN));
        assert_eq!(Integer::from(i32::MAX).to_i32(), Some(i32::MAX));
        assert_eq!(
            Integer::from(i64::from(i32::MAX) + 1).to_i32_checked(),
            Err(Error::Overflow("i32"))
        );
        assert_eq!(Integer::from(-1).to_u64(), None);
        assert_eq!(Integer::from(u128::MAX).to_u128(), Some(u128::MAX));
        assert_eq!(Integer::from(i128::MIN).to_i128(), Some(i128::MIN));
        assert_eq!(Integer::from(u128::MAX).to_i128(), None);
        assert!(Integer::from(1).shl_bits(128).to_u128().is_none());
    }

    #[test]
    fn check_wrapping() {
        assert_eq!(Integer::from(-1).to_u8_wrapping(), 0xff);
        assert_eq!(Integer::from(0x1_2345).to_u16_wrapping(), 0x2345);
        assert_eq!(Integer::from(i64::MIN).to_i32_wrapping(), 0);
        assert_eq!(Integer::from(-2).to_u64_wrapping(), u64::MAX - 1);
    }

    #[test]
    fn check_f64() {
        assert_eq!(Integer::from(u64::MAX).to_f64(), 18446744073709551616.0);
        // 2^53 + 1 rounds to even
        let i = Integer::from((1u64 << 53) + 1);
        assert_eq!(i.to_f64(), 9007199254740992.0);
        // above 64 bits, the sticky bit breaks the tie
        let i = Integer::from(1).shl_bits(100) + Integer::from(1).shl_bits(47) + 1i32;
        assert_eq!(i.to_f64(), 2f64.powi(100) + 2f64.powi(48));
        assert_eq!(Integer::from_f64(1e20).unwrap(), Integer::from(100_000_000_000_000_000_000u128));
        assert_eq!(Integer::from_f64(0.5).unwrap(), 0);
        assert_eq!(Integer::from_f64(-0.0).unwrap(), 0);
    }
}
