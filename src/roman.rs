//! Roman numeral codec (subtractive notation).
//!
//! Values of 4000 and above are written with repeated `M`, which keeps
//! the encoder total over all of `u32`. The decoder is case-insensitive
//! and strict: unknown symbols and non-canonical spellings ("IIII") are
//! typed errors, never a silent zero.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RomanError {
  #[error("zero cannot be written as a roman numeral")]
  Zero,
  #[error("empty roman numeral")]
  Empty,
  #[error("unknown roman symbol '{0}'")]
  UnknownSymbol(char),
  #[error("non-canonical roman numeral '{0}'")]
  NonCanonical(String),
}

const TABLE: &[(u32, &str)] = &[
  (1000, "M"),
  (900, "CM"),
  (500, "D"),
  (400, "CD"),
  (100, "C"),
  (90, "XC"),
  (50, "L"),
  (40, "XL"),
  (10, "X"),
  (9, "IX"),
  (5, "V"),
  (4, "IV"),
  (1, "I"),
];

pub fn to_roman(n: u32) -> Result<String, RomanError> {
  if n == 0 {
    return Err(RomanError::Zero);
  }
  let mut rest = n;
  let mut out = String::new();
  for &(value, symbol) in TABLE {
    while rest >= value {
      out.push_str(symbol);
      rest -= value;
    }
  }
  Ok(out)
}

fn symbol_value(c: char) -> Result<u32, RomanError> {
  match c {
    'I' => Ok(1),
    'V' => Ok(5),
    'X' => Ok(10),
    'L' => Ok(50),
    'C' => Ok(100),
    'D' => Ok(500),
    'M' => Ok(1000),
    other => Err(RomanError::UnknownSymbol(other)),
  }
}

pub fn from_roman(s: &str) -> Result<u32, RomanError> {
  let upper = s.trim().to_uppercase();
  if upper.is_empty() {
    return Err(RomanError::Empty);
  }

  let values: Vec<u32> = upper.chars().map(symbol_value).collect::<Result<_, _>>()?;

  // Subtractive scan: a symbol smaller than its successor subtracts.
  let mut total: i64 = 0;
  for (i, &v) in values.iter().enumerate() {
    if values.get(i + 1).map_or(false, |&next| next > v) {
      total -= i64::from(v);
    } else {
      total += i64::from(v);
    }
  }
  if total <= 0 {
    return Err(RomanError::NonCanonical(upper));
  }

  // Strictness: only accept spellings the encoder itself produces.
  let total = total as u32;
  if to_roman(total).as_deref() != Ok(upper.as_str()) {
    return Err(RomanError::NonCanonical(upper));
  }
  Ok(total)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn encodes_known_values() {
    assert_eq!(to_roman(1).unwrap(), "I");
    assert_eq!(to_roman(4).unwrap(), "IV");
    assert_eq!(to_roman(9).unwrap(), "IX");
    assert_eq!(to_roman(14).unwrap(), "XIV");
    assert_eq!(to_roman(40).unwrap(), "XL");
    assert_eq!(to_roman(90).unwrap(), "XC");
    assert_eq!(to_roman(1987).unwrap(), "MCMLXXXVII");
    assert_eq!(to_roman(3999).unwrap(), "MMMCMXCIX");
    assert_eq!(to_roman(4000).unwrap(), "MMMM");
  }

  #[test]
  fn round_trips_full_classic_range() {
    for n in 1..=3999 {
      let encoded = to_roman(n).unwrap();
      assert_eq!(from_roman(&encoded), Ok(n), "failed at {n} ({encoded})");
    }
  }

  #[test]
  fn decoder_is_case_insensitive() {
    assert_eq!(from_roman("mcmlxxxvii"), Ok(1987));
    assert_eq!(from_roman(" xiv "), Ok(14));
  }

  #[test]
  fn rejects_bad_input() {
    assert_eq!(from_roman(""), Err(RomanError::Empty));
    assert_eq!(from_roman("ABC"), Err(RomanError::UnknownSymbol('A')));
    assert_eq!(
      from_roman("IIII"),
      Err(RomanError::NonCanonical("IIII".into()))
    );
    assert_eq!(from_roman("VX"), Err(RomanError::NonCanonical("VX".into())));
    assert_eq!(to_roman(0), Err(RomanError::Zero));
  }
}
