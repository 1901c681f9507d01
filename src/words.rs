//! Integer → French words, for number-dictation prompts and answers.
//!
//! Covers the school-level irregulars: teen forms, "-et-" in 21..=71,
//! "quatre-vingts" vs "quatre-vingt-un", "cent"/"cents" agreement
//! (the s drops when another numeral follows), bare "mille", and
//! million/milliard pluralization up into the billions.

const UNITS: [&str; 10] = [
  "", "un", "deux", "trois", "quatre", "cinq", "six", "sept", "huit", "neuf",
];
const TEENS: [&str; 10] = [
  "dix", "onze", "douze", "treize", "quatorze", "quinze", "seize", "dix-sept", "dix-huit",
  "dix-neuf",
];
const TENS: [&str; 10] = [
  "", "dix", "vingt", "trente", "quarante", "cinquante", "soixante", "soixante-dix",
  "quatre-vingt", "quatre-vingt-dix",
];

// 1..=99. `terminal` = nothing follows inside the numeral, which is
// when "quatre-vingts" keeps its s.
fn below_hundred(r: u64, terminal: bool) -> String {
  match r {
    0 => String::new(),
    1..=9 => UNITS[r as usize].to_string(),
    10..=19 => TEENS[(r - 10) as usize].to_string(),
    _ => {
      let t = (r / 10) as usize;
      let u = (r % 10) as usize;
      match t {
        // 70..=79 and 90..=99 compose on the previous ten + a teen.
        7 | 9 => {
          if t == 7 && u == 1 {
            format!("{}-et-{}", TENS[6], TEENS[1]) // soixante-et-onze
          } else {
            format!("{}-{}", TENS[t - 1], TEENS[u])
          }
        }
        8 => {
          if u == 0 {
            if terminal { "quatre-vingts".into() } else { "quatre-vingt".into() }
          } else {
            format!("quatre-vingt-{}", UNITS[u]) // no "-et-" at 81
          }
        }
        _ => {
          if u == 0 {
            TENS[t].to_string()
          } else if u == 1 {
            format!("{}-et-un", TENS[t])
          } else {
            format!("{}-{}", TENS[t], UNITS[u])
          }
        }
      }
    }
  }
}

// 1..=999.
fn below_thousand(n: u64, terminal: bool) -> String {
  let c = (n / 100) as usize;
  let r = n % 100;
  let mut parts: Vec<String> = Vec::new();
  if c == 1 {
    parts.push("cent".into());
  } else if c > 1 {
    let plural = r == 0 && terminal;
    parts.push(format!("{} cent{}", UNITS[c], if plural { "s" } else { "" }));
  }
  if r > 0 {
    parts.push(below_hundred(r, terminal));
  }
  parts.join(" ")
}

pub fn number_to_words(n: u64) -> String {
  if n == 0 {
    return "zéro".into();
  }

  let billions = n / 1_000_000_000;
  let rest_b = n % 1_000_000_000;
  let millions = rest_b / 1_000_000;
  let rest_m = rest_b % 1_000_000;
  let thousands = rest_m / 1_000;
  let rest = rest_m % 1_000;

  let mut parts: Vec<String> = Vec::new();
  if billions > 0 {
    let s = if billions > 1 { "s" } else { "" };
    parts.push(format!("{} milliard{s}", below_thousand(billions, true)));
  }
  if millions > 0 {
    let s = if millions > 1 { "s" } else { "" };
    parts.push(format!("{} million{s}", below_thousand(millions, true)));
  }
  if thousands > 0 {
    if thousands == 1 {
      // "mille", never "un mille".
      parts.push("mille".into());
    } else {
      parts.push(format!("{} mille", below_thousand(thousands, false)));
    }
  }
  if rest > 0 {
    parts.push(below_thousand(rest, true));
  }
  parts.join(" ")
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn boundary_tens() {
    assert_eq!(number_to_words(70), "soixante-dix");
    assert_eq!(number_to_words(71), "soixante-et-onze");
    assert_eq!(number_to_words(72), "soixante-douze");
    assert_eq!(number_to_words(80), "quatre-vingts");
    assert_eq!(number_to_words(81), "quatre-vingt-un");
    assert_eq!(number_to_words(90), "quatre-vingt-dix");
    assert_eq!(number_to_words(91), "quatre-vingt-onze");
    assert_eq!(number_to_words(21), "vingt-et-un");
    assert_eq!(number_to_words(31), "trente-et-un");
  }

  #[test]
  fn hundreds_agreement() {
    assert_eq!(number_to_words(100), "cent");
    assert_eq!(number_to_words(200), "deux cents");
    assert_eq!(number_to_words(201), "deux cent un");
    assert_eq!(number_to_words(999), "neuf cent quatre-vingt-dix-neuf");
  }

  #[test]
  fn thousands_and_up() {
    assert_eq!(number_to_words(1000), "mille");
    assert_eq!(number_to_words(1001), "mille un");
    assert_eq!(number_to_words(1234), "mille deux cent trente-quatre");
    assert_eq!(number_to_words(200_000), "deux cent mille");
    assert_eq!(number_to_words(80_000), "quatre-vingt mille");
    assert_eq!(number_to_words(1_000_000), "un million");
    assert_eq!(number_to_words(2_000_000), "deux millions");
    assert_eq!(
      number_to_words(3_000_000_000),
      "trois milliards"
    );
    assert_eq!(
      number_to_words(1_002_003),
      "un million deux mille trois"
    );
  }

  #[test]
  fn zero_and_small() {
    assert_eq!(number_to_words(0), "zéro");
    assert_eq!(number_to_words(7), "sept");
    assert_eq!(number_to_words(17), "dix-sept");
  }
}
