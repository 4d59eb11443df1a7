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

use crate::serdeize::{self, Data};
use crate::Decimal;
use serde::de::{Deserialize, Deserializer, Error as DeError};
use serde::ser::{Serialize, Serializer};

impl Serialize for Decimal {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let value = self.to_sci_string();
        serdeize::serialize("Decimal", &Data { radix: 10, value }, serializer)
    }
}

impl<'de> Deserialize<'de> for Decimal {
    fn deserialize<D>(deserializer: D) -> Result<Decimal, D::Error>
    where
        D: Deserializer<'de>,
    {
        let Data { radix, value } = serdeize::deserialize("Decimal", deserializer)?;
        if radix != 10 {
            return Err(DeError::custom(format!("radix {} is not 10", radix)));
        }
        value.parse().map_err(DeError::custom)
    }
}

#[cfg(test)]
mod tests {
    use crate::Decimal;
    use serde_test::{self, Token};

    fn tokens(value: &'static str) -> [Token; 6] {
        [
            Token::Struct {
                name: "Decimal",
                len: 2,
            },
            Token::Str("radix"),
            Token::U32(10),
            Token::Str("value"),
            Token::Str(value),
            Token::StructEnd,
        ]
    }

    #[test]
    fn check_tokens() {
        let d: Decimal = "-1.250".parse().unwrap();
        serde_test::assert_tokens(&d, &tokens("-1.250"));
        serde_test::assert_tokens(&Decimal::create_i64(7, 20), &tokens("7E+20"));
        serde_test::assert_tokens(&Decimal::SIGNALING_NAN, &tokens("sNaN"));
        serde_test::assert_de_tokens(&Decimal::POSITIVE_INFINITY, &tokens("Inf"));
    }

    #[test]
    fn check_bad_radix() {
        serde_test::assert_de_tokens_error::<Decimal>(
            &[
                Token::Struct {
                    name: "Decimal",
                    len: 2,
                },
                Token::Str("radix"),
                Token::U32(16),
                Token::Str("value"),
                Token::Str("1"),
                Token::StructEnd,
            ],
            "radix 16 is not 10",
        );
    }

    #[test]
    fn check_json_and_bincode() {
        let d: Decimal = "3.14159E-300".parse().unwrap();
        let json = serde_json::to_string(&d).unwrap();
        assert_eq!(json, r#"{"radix":10,"value":"3.14159E-300"}"#);
        assert_eq!(serde_json::from_str::<Decimal>(&json).unwrap(), d);
        let bin = bincode::serialize(&d).unwrap();
        assert_eq!(bincode::deserialize::<Decimal>(&bin).unwrap(), d);
    }
}
