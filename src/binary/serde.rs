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

//! A `Binary` is stored as `{ radix: 16, value }` with a hexadecimal
//! mantissa and a decimal power of two, such as `-1fp-4`, so that any
//! exponent round-trips. A `radix` of 10 is also accepted on input if the
//! decimal value is exactly representable.

use crate::context::Context;
use crate::serdeize::{self, Data};
use crate::{Binary, Decimal, Integer};
use serde::de::{Deserialize, Deserializer, Error as DeError};
use serde::ser::{Serialize, Serializer};

fn to_hex(b: &Binary) -> String {
    let mut s = String::new();
    if b.is_negative() {
        s.push('-');
    }
    if b.is_infinity() {
        s.push_str("Infinity");
        return s;
    }
    if b.is_nan() {
        s.push_str(if b.is_signaling_nan() { "sNaN" } else { "NaN" });
        let payload = b.unsigned_mantissa();
        if !payload.is_zero() {
            payload.append_to_string(&mut s, 16);
        }
        return s;
    }
    b.unsigned_mantissa().append_to_string(&mut s, 16);
    s.push('p');
    b.exponent().append_to_string(&mut s, 10);
    s
}

fn from_hex(s: &str) -> Result<Binary, String> {
    let (negative, rest) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s),
    };
    let bad = || format!("invalid binary value {:?}", s);
    let nan = |payload: &str, signaling: bool| {
        let payload = if payload.is_empty() {
            Integer::new()
        } else {
            Integer::from_str_radix(payload, 16).map_err(|_| bad())?
        };
        Binary::create_nan(&payload, signaling, negative).map_err(|e| e.to_string())
    };
    if rest == "Infinity" {
        return Ok(if negative {
            Binary::NEGATIVE_INFINITY
        } else {
            Binary::POSITIVE_INFINITY
        });
    }
    if let Some(payload) = rest.strip_prefix("sNaN") {
        return nan(payload, true);
    }
    if let Some(payload) = rest.strip_prefix("NaN") {
        return nan(payload, false);
    }
    let (m, e) = rest.split_once('p').ok_or_else(bad)?;
    if m.starts_with('-') || m.starts_with('+') {
        return Err(bad());
    }
    let m = Integer::from_str_radix(m, 16).map_err(|_| bad())?;
    let e = Integer::from_str_radix(e, 10).map_err(|_| bad())?;
    let b = Binary::create(&m, &e);
    Ok(if negative { b.negate() } else { b })
}

fn from_decimal(s: &str) -> Result<Binary, String> {
    let d: Decimal = s.parse().map_err(|e: crate::Error| e.to_string())?;
    let b = d
        .to_binary(&mut Context::unlimited())
        .map_err(|e| e.to_string())?;
    if b.is_nan() && !d.is_nan() {
        return Err(format!("{} is not exactly representable in binary", s));
    }
    Ok(b)
}

impl Serialize for Binary {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let value = to_hex(self);
        serdeize::serialize("Binary", &Data { radix: 16, value }, serializer)
    }
}

impl<'de> Deserialize<'de> for Binary {
    fn deserialize<D>(deserializer: D) -> Result<Binary, D::Error>
    where
        D: Deserializer<'de>,
    {
        let Data { radix, value } = serdeize::deserialize("Binary", deserializer)?;
        match radix {
            16 => from_hex(&value),
            10 => from_decimal(&value),
            _ => Err(format!("radix {} is not 10 or 16", radix)),
        }
        .map_err(DeError::custom)
    }
}

#[cfg(test)]
mod tests {
    use crate::{Binary, Integer};
    use serde_test::{self, Token};

    fn tokens(radix: u32, value: &'static str) -> [Token; 6] {
        [
            Token::Struct {
                name: "Binary",
                len: 2,
            },
            Token::Str("radix"),
            Token::U32(radix),
            Token::Str("value"),
            Token::Str(value),
            Token::StructEnd,
        ]
    }

    #[test]
    fn check_tokens() {
        serde_test::assert_tokens(&Binary::from_f64(-1.9375), &tokens(16, "-1fp-4"));
        serde_test::assert_tokens(&Binary::from(255), &tokens(16, "ffp0"));
        serde_test::assert_tokens(&Binary::NEGATIVE_INFINITY, &tokens(16, "-Infinity"));
        let nan = Binary::create_nan(&Integer::from(42), true, false).unwrap();
        serde_test::assert_tokens(&nan, &tokens(16, "sNaN2a"));
        serde_test::assert_de_tokens(&Binary::from_f64(-1.9375), &tokens(10, "-1.9375"));
    }

    #[test]
    fn check_errors() {
        serde_test::assert_de_tokens_error::<Binary>(
            &tokens(10, "0.1"),
            "0.1 is not exactly representable in binary",
        );
        serde_test::assert_de_tokens_error::<Binary>(
            &tokens(16, "12"),
            "invalid binary value \"12\"",
        );
    }

    #[test]
    fn check_json_and_bincode() {
        let far = Binary::create(&Integer::from(3), &Integer::from(-5_000_000_000i64));
        let json = serde_json::to_string(&far).unwrap();
        assert_eq!(json, r#"{"radix":16,"value":"3p-5000000000"}"#);
        assert_eq!(serde_json::from_str::<Binary>(&json).unwrap(), far);
        let b = Binary::from_f64(6.02214076e23);
        let bin = bincode::serialize(&b).unwrap();
        assert_eq!(bincode::deserialize::<Binary>(&bin).unwrap(), b);
    }
}
