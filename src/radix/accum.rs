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

//! Right shifts that remember what they discarded.

use crate::radix::powers;
use crate::Integer;

/// A nonnegative integer being shifted right digit by digit, keeping
/// enough of the discarded digits to round correctly afterwards.
///
/// After any sequence of shifts, the discarded part of the original
/// value is summarized by the last discarded digit and by whether any
/// digit below it was nonzero.
pub trait ShiftAccumulator {
    /// The value that remains after shifting.
    fn shifted_int(&self) -> &Integer;

    fn into_shifted_int(self) -> Integer
    where
        Self: Sized;

    /// The most significant digit discarded so far.
    fn last_discarded_digit(&self) -> u32;

    /// Whether any discarded digit below the last one was nonzero.
    fn older_discarded_digits(&self) -> bool;

    /// The number of digits discarded so far.
    fn discarded_digit_count(&self) -> u64;

    /// The number of digits in the shifted value; zero has one digit.
    fn digit_length(&mut self) -> u64;

    /// Discards the lowest `digits` digits.
    fn shift_right(&mut self, digits: u64);

    /// Discards low digits until at most `digits` remain.
    fn shift_to_digits(&mut self, digits: u64) {
        let len = self.digit_length();
        if len > digits {
            self.shift_right(len - digits);
        }
    }

    /// Returns `true` if anything nonzero was discarded.
    #[inline]
    fn is_inexact(&self) -> bool {
        self.last_discarded_digit() != 0 || self.older_discarded_digits()
    }
}

/// Shift accumulator for radix 10.
///
/// # Examples
///
/// ```rust
/// use radixnum::radix::{DigitAccumulator, ShiftAccumulator};
/// use radixnum::Integer;
/// let mut acc = DigitAccumulator::new(Integer::from(123_456));
/// acc.shift_right(3);
/// assert_eq!(*acc.shifted_int(), 123);
/// assert_eq!(acc.last_discarded_digit(), 4);
/// assert!(acc.older_discarded_digits());
/// ```
#[derive(Clone, Debug)]
pub struct DigitAccumulator {
    value: Integer,
    last: u32,
    older: bool,
    discarded: u64,
    known_length: Option<u64>,
}

impl DigitAccumulator {
    pub fn new(value: Integer) -> DigitAccumulator {
        DigitAccumulator::with_digits(value, 0, false)
    }

    pub fn with_digits(value: Integer, last: u32, older: bool) -> DigitAccumulator {
        debug_assert!(!value.is_negative());
        DigitAccumulator {
            value,
            last,
            older,
            discarded: 0,
            known_length: None,
        }
    }
}

impl ShiftAccumulator for DigitAccumulator {
    #[inline]
    fn shifted_int(&self) -> &Integer {
        &self.value
    }

    #[inline]
    fn into_shifted_int(self) -> Integer {
        self.value
    }

    #[inline]
    fn last_discarded_digit(&self) -> u32 {
        self.last
    }

    #[inline]
    fn older_discarded_digits(&self) -> bool {
        self.older
    }

    #[inline]
    fn discarded_digit_count(&self) -> u64 {
        self.discarded
    }

    fn digit_length(&mut self) -> u64 {
        match self.known_length {
            Some(len) => len,
            None => {
                let len = self.value.digit_count();
                self.known_length = Some(len);
                len
            }
        }
    }

    fn shift_right(&mut self, digits: u64) {
        if digits == 0 {
            return;
        }
        let len = self.digit_length();
        self.older |= self.last != 0;
        self.discarded += digits;
        if digits > len {
            // everything goes, and the last discarded digit is a
            // leading zero
            self.older |= !self.value.is_zero();
            self.last = 0;
            self.value = Integer::new();
            self.known_length = Some(1);
            return;
        }
        if digits == 1 {
            let (q, r) = self.value.div_rem_small(10);
            self.last = u32::from(r);
            self.value = q;
        } else {
            // value = (q * 10 + last) * 10^(digits - 1) + rest
            let (upper, rest) = self.value.div_rem_nonzero(&powers::pow10(digits - 1));
            let (q, last) = upper.div_rem_small(10);
            self.older |= !rest.is_zero();
            self.last = u32::from(last);
            self.value = q;
        }
        self.known_length = Some(if len > digits { len - digits } else { 1 });
    }
}

/// Shift accumulator for radix 2.
#[derive(Clone, Debug)]
pub struct BitAccumulator {
    value: Integer,
    last: u32,
    older: bool,
    discarded: u64,
}

impl BitAccumulator {
    pub fn new(value: Integer) -> BitAccumulator {
        BitAccumulator::with_digits(value, 0, false)
    }

    pub fn with_digits(value: Integer, last: u32, older: bool) -> BitAccumulator {
        debug_assert!(!value.is_negative());
        BitAccumulator {
            value,
            last,
            older,
            discarded: 0,
        }
    }
}

impl ShiftAccumulator for BitAccumulator {
    #[inline]
    fn shifted_int(&self) -> &Integer {
        &self.value
    }

    #[inline]
    fn into_shifted_int(self) -> Integer {
        self.value
    }

    #[inline]
    fn last_discarded_digit(&self) -> u32 {
        self.last
    }

    #[inline]
    fn older_discarded_digits(&self) -> bool {
        self.older
    }

    #[inline]
    fn discarded_digit_count(&self) -> u64 {
        self.discarded
    }

    fn digit_length(&mut self) -> u64 {
        self.value.significant_bits().max(1)
    }

    fn shift_right(&mut self, bits: u64) {
        if bits == 0 {
            return;
        }
        self.older |= self.last != 0;
        self.discarded += bits;
        if let Some(low) = self.value.lowest_set_bit() {
            self.older |= low < bits - 1;
        }
        self.last = u32::from(self.value.get_bit(bits - 1));
        self.value = self.value.shr_bits(bits);
    }
}
