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

use proptest::prelude::*;
use radixnum::{Binary, Context, Decimal, Integer, Round};
use std::cmp::Ordering;

fn big(parts: &[i64]) -> Integer {
    parts
        .iter()
        .fold(Integer::new(), |acc, &p| (acc << 64u32) + Integer::from(p))
}

// Finite values, signed zeros at several exponents, infinities and
// NaNs of both kinds with payloads and either sign.
fn any_decimal() -> impl Strategy<Value = Decimal> {
    prop_oneof![
        (any::<i32>(), -6i32..6).prop_map(|(m, e)| Decimal::create_i64(i64::from(m), e)),
        (any::<bool>(), -6i32..6).prop_map(|(neg, e)| {
            let zero = Decimal::create_i64(0, e);
            if neg {
                zero.negate()
            } else {
                zero
            }
        }),
        any::<bool>().prop_map(|neg| if neg {
            Decimal::NEGATIVE_INFINITY
        } else {
            Decimal::POSITIVE_INFINITY
        }),
        (0u32..40, any::<bool>(), any::<bool>()).prop_map(|(payload, signaling, neg)| {
            Decimal::create_nan(&Integer::from(payload), signaling, neg).unwrap()
        }),
    ]
}

proptest! {
    #[test]
    fn integer_matches_i128(a in any::<i64>(), b in any::<i64>()) {
        let (ia, ib) = (Integer::from(a), Integer::from(b));
        let (wa, wb) = (i128::from(a), i128::from(b));
        prop_assert_eq!(&ia + &ib, wa + wb);
        prop_assert_eq!(&ia - &ib, wa - wb);
        prop_assert_eq!(&ia * &ib, wa * wb);
        if b != 0 {
            let (q, r) = ia.div_rem(&ib).unwrap();
            prop_assert_eq!(q, wa / wb);
            prop_assert_eq!(r, wa % wb);
        }
    }

    #[test]
    fn division_invariant(a in prop::collection::vec(any::<i64>(), 1..8),
                          b in prop::collection::vec(any::<i64>(), 1..5)) {
        let (a, b) = (big(&a), big(&b));
        prop_assume!(!b.is_zero());
        let (q, r) = a.div_rem(&b).unwrap();
        prop_assert_eq!(&q * &b + &r, a.clone());
        prop_assert_eq!(r.cmp_abs(&b), Ordering::Less);
        prop_assert!(r.is_zero() || r.is_negative() == a.is_negative());
    }

    #[test]
    fn long_division_invariant(a in prop::collection::vec(any::<i64>(), 20..50),
                               b in prop::collection::vec(any::<i64>(), 11..15)) {
        let (a, b) = (big(&a), big(&b));
        // at least 40 limbs of 16 bits in the divisor and 20 more in the
        // dividend, so the block-recursive path runs
        prop_assume!(b.significant_bits() > 40 * 16);
        prop_assume!(a.significant_bits() > b.significant_bits() + 20 * 16);
        let (q, r) = a.div_rem(&b).unwrap();
        prop_assert_eq!(&q * &b + &r, a.clone());
        prop_assert_eq!(r.cmp_abs(&b), Ordering::Less);
        prop_assert!(r.is_zero() || r.is_negative() == a.is_negative());
        prop_assert_eq!(a.checked_div(&b).unwrap(), q);
        let m = a.modulo(&b).unwrap();
        prop_assert!(!m.is_negative());
        prop_assert_eq!(m.cmp_abs(&b), Ordering::Less);
        prop_assert!((&a - &m).checked_rem(&b).unwrap().is_zero());
    }

    #[test]
    fn gcd_divides_both(a in prop::collection::vec(any::<i64>(), 1..4),
                        b in prop::collection::vec(any::<i64>(), 1..4)) {
        let (a, b) = (big(&a), big(&b));
        let g = a.gcd(&b);
        prop_assume!(!g.is_zero());
        prop_assert!(a.checked_rem(&g).unwrap().is_zero());
        prop_assert!(b.checked_rem(&g).unwrap().is_zero());
        let (ca, cb) = (a.checked_div(&g).unwrap(), b.checked_div(&g).unwrap());
        prop_assert_eq!(ca.gcd(&cb), 1);
    }

    #[test]
    fn integer_radix_strings(parts in prop::collection::vec(any::<i64>(), 1..6), radix in 2u32..=36) {
        let i = big(&parts);
        let s = i.to_string_radix(radix).unwrap();
        prop_assert_eq!(Integer::from_str_radix(&s, radix).unwrap(), i);
    }

    #[test]
    fn decimal_string_round_trip(m in any::<i64>(), e in -1000i32..1000) {
        let d = Decimal::create_i64(m, e);
        let sci: Decimal = d.to_sci_string().parse().unwrap();
        prop_assert_eq!(&sci, &d);
        let eng: Decimal = d.to_engineering_string().parse().unwrap();
        prop_assert_eq!(eng.compare_to(&d), Some(Ordering::Equal));
        let plain: Decimal = d.to_plain_string().parse().unwrap();
        prop_assert_eq!(plain.compare_to(&d), Some(Ordering::Equal));
    }

    #[test]
    fn f64_round_trip(bits in any::<u64>()) {
        let v = f64::from_bits(bits);
        if v.is_nan() {
            prop_assert!(Decimal::from_f64(v).to_f64().is_nan());
        } else {
            prop_assert_eq!(Decimal::from_f64(v).to_f64().to_bits(), bits);
            prop_assert_eq!(Binary::from_f64(v).to_f64().to_bits(), bits);
        }
    }

    #[test]
    fn decimal_to_f64_is_correctly_rounded(m in any::<u64>(), e in -345i32..320) {
        let s = format!("{}e{}", m, e);
        let d: Decimal = s.parse().unwrap();
        let expected: f64 = s.parse().unwrap();
        prop_assert_eq!(d.to_f64().to_bits(), expected.to_bits());
    }

    #[test]
    fn decimal_to_f32_is_correctly_rounded(m in any::<u32>(), e in -50i32..40) {
        let s = format!("{}e{}", m, e);
        let d: Decimal = s.parse().unwrap();
        let expected: f32 = s.parse().unwrap();
        prop_assert_eq!(d.to_f32().to_bits(), expected.to_bits());
    }

    #[test]
    fn directed_rounding_brackets(m in 1u64.., e in -40i32..40) {
        let d = Decimal::create_i64(m as i64 & i64::MAX, e);
        prop_assume!(!d.is_zero());
        let lo = d.to_binary(&mut Context::binary64().with_rounding(Round::Floor)).unwrap();
        let hi = d.to_binary(&mut Context::binary64().with_rounding(Round::Ceiling)).unwrap();
        let exact = d.to_binary_approx();
        prop_assert!(lo.compare_to(&hi) != Some(Ordering::Greater));
        let lo_dec = lo.to_decimal().unwrap();
        let hi_dec = hi.to_decimal().unwrap();
        prop_assert!(lo_dec.compare_to(&d) != Some(Ordering::Greater));
        prop_assert!(hi_dec.compare_to(&d) != Some(Ordering::Less));
        prop_assert!(exact.is_finite());
    }

    #[test]
    fn total_order_agrees_with_numeric(a in any::<i32>(), ea in -20i32..20,
                                       b in any::<i32>(), eb in -20i32..20) {
        let x = Decimal::create_i64(i64::from(a), ea);
        let y = Decimal::create_i64(i64::from(b), eb);
        match x.compare_to(&y) {
            Some(Ordering::Less) => prop_assert_eq!(x.cmp(&y), Ordering::Less),
            Some(Ordering::Greater) => prop_assert_eq!(x.cmp(&y), Ordering::Greater),
            _ => {}
        }
        prop_assert_eq!(x.cmp(&y), y.cmp(&x).reverse());
        prop_assert_eq!(x.cmp(&y) == Ordering::Equal, x == y);
    }

    #[test]
    fn total_order_with_specials(x in any_decimal(), y in any_decimal(), z in any_decimal()) {
        let xy = x.compare_to_total(&y);
        prop_assert_eq!(xy, y.compare_to_total(&x).reverse());
        prop_assert_eq!(xy == Ordering::Equal, x == y);
        prop_assert_eq!(x.negate().compare_to_total(&y.negate()), xy.reverse());
        if xy != Ordering::Greater && y.compare_to_total(&z) != Ordering::Greater {
            prop_assert_ne!(x.compare_to_total(&z), Ordering::Greater);
        }
        if x.is_negative() != y.is_negative() {
            let expected = if x.is_negative() { Ordering::Less } else { Ordering::Greater };
            prop_assert_eq!(xy, expected);
        }
        match x.compare_to(&y) {
            Some(Ordering::Less) => prop_assert_eq!(xy, Ordering::Less),
            Some(Ordering::Greater) => prop_assert_eq!(xy, Ordering::Greater),
            Some(Ordering::Equal) => {}
            None => prop_assert!(x.is_nan() || y.is_nan()),
        }
        let mut sorted = vec![z.clone(), y.clone(), x.clone()];
        sorted.sort();
        prop_assert!(sorted.windows(2).all(|w| w[0].compare_to_total(&w[1]) != Ordering::Greater));
    }

    #[test]
    fn exact_add_then_subtract(a in any::<i64>(), ea in -30i32..30,
                               b in any::<i64>(), eb in -30i32..30) {
        let x = Decimal::create_i64(a, ea);
        let y = Decimal::create_i64(b, eb);
        let back = &(&x + &y) - &y;
        prop_assert_eq!(back.compare_to(&x), Some(Ordering::Equal));
        let product = &x * &y;
        prop_assert_eq!(product.mantissa(), Integer::from(a) * Integer::from(b));
    }
}
