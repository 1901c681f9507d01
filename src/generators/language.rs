//! French-language generators: conjugation, spelling, homophones,
//! article agreement, reading. All of them need the language library
//! and degrade to an error (→ fallback instance) when it is absent or
//! a category is missing.

use crate::domain::{ExerciseParams, Gender, LanguageLibrary, Modality, ProblemData, VerbEntry};
use crate::generators::{AnswerValue, RawInstance};
use crate::util::{pick, rand_int};

const LIB_MISSING: &str = "Bibliothèque de français indisponible";

const PRONOUNS: [&str; 9] = ["je", "tu", "il", "elle", "on", "nous", "vous", "ils", "elles"];
// Nine pronouns share six paradigm slots (il/elle/on, ils/elles).
const PRONOUN_SLOTS: [usize; 9] = [0, 1, 2, 2, 2, 3, 4, 5, 5];

// "present_1" + futur → "future_1"; the être/avoir bank swaps a tense
// suffix instead.
fn resolve_category(requested: &str, tense: &str) -> String {
  if requested.starts_with("etre_avoir") {
    let suffix = match tense {
      "futur" => "_f",
      "imparfait" => "_imp",
      _ => "_p",
    };
    return format!("etre_avoir{suffix}");
  }
  let prefix = match tense {
    "futur" => "future",
    "imparfait" => "imparfait",
    "passé composé" => "pc",
    _ => "present",
  };
  match group_suffix(requested) {
    Some(group) => format!("{prefix}{group}"),
    None => requested.to_string(),
  }
}

// The trailing group marker of a category key: "_3_freq" or "_<n>".
fn group_suffix(category: &str) -> Option<&str> {
  if let Some(i) = category.find("_3_freq") {
    return Some(&category[i..i + 7]);
  }
  let bytes = category.as_bytes();
  for i in 0..bytes.len().saturating_sub(1) {
    if bytes[i] == b'_' && bytes[i + 1].is_ascii_digit() {
      return Some(&category[i..i + 2]);
    }
  }
  None
}

// Stem + ending, with the -ger/-cer spelling fixes for the nous form
// of the present tense (mangeons, lançons), applied after lookup.
fn join_stem(infinitive: &str, base: &str, ending: &str, tense: &str, slot: usize) -> String {
  let softening = matches!(ending.chars().next(), Some('o') | Some('a'));
  if tense == "présent" && slot == 3 && softening {
    if infinitive.ends_with("ger") {
      return format!("{base}e{ending}");
    }
    if infinitive.ends_with("cer") {
      if let Some(stem) = base.strip_suffix('c') {
        return format!("{stem}ç{ending}");
      }
    }
  }
  format!("{base}{ending}")
}

fn simple_form(verb: &VerbEntry, tense: &str, slot: usize) -> Result<String, String> {
  if let Some(full) = &verb.full {
    return Ok(full[slot].clone());
  }
  match (&verb.base, &verb.endings) {
    (Some(base), Some(endings)) => Ok(join_stem(&verb.infinitive, base, &endings[slot], tense, slot)),
    _ => Err(format!(
      "conjugaison : verbe '{}' sans formes ni terminaisons",
      verb.infinitive
    )),
  }
}

/// Conjugation drill: a tense, a verb of the requested category, a
/// pronoun mapped onto its paradigm slot. Compound tenses build
/// auxiliary + past participle, with être-agreement from the pronoun.
pub fn conjugation(p: &ExerciseParams, lib: Option<&LanguageLibrary>) -> Result<RawInstance, String> {
  let lib = lib.ok_or(LIB_MISSING)?;

  let default_tenses = vec!["présent".to_string()];
  let tenses = p.tenses.as_ref().filter(|t| !t.is_empty()).unwrap_or(&default_tenses);
  let tense = pick(tenses).ok_or("conjugaison : aucun temps configuré")?.to_lowercase();
  let compound = tense == "passé composé";

  let requested = p.category.clone().unwrap_or_else(|| "present_1".into());
  let mut category = resolve_category(&requested, &tense);
  if !lib.conjugation.contains_key(&category) {
    category = requested.clone();
  }
  let pool = lib
    .conjugation
    .get(&category)
    .ok_or_else(|| format!("conjugaison : catégorie '{category}' introuvable"))?;
  let verb = pick(pool).ok_or_else(|| format!("conjugaison : catégorie '{category}' vide"))?;

  let p_idx = rand_int(0, 8) as usize;
  let slot = PRONOUN_SLOTS[p_idx];

  let answer = if compound {
    let aux_name = verb.aux.as_deref().unwrap_or("avoir");
    let aux_pool = lib
      .conjugation
      .get("etre_avoir_p")
      .ok_or("conjugaison : banque des auxiliaires absente")?;
    let aux = aux_pool
      .iter()
      .find(|v| v.infinitive.eq_ignore_ascii_case(aux_name))
      .ok_or_else(|| format!("conjugaison : auxiliaire '{aux_name}' introuvable"))?;
    let aux_form = simple_form(aux, "présent", slot)?;
    let mut pp = verb
      .pp
      .clone()
      .ok_or_else(|| format!("conjugaison : participe passé manquant pour '{}'", verb.infinitive))?;
    if aux_name.eq_ignore_ascii_case("être") {
      match p_idx {
        3 => pp.push('e'),          // elle
        5 | 6 | 7 => pp.push('s'),  // nous, vous, ils
        8 => pp.push_str("es"),     // elles
        _ => {}
      }
    }
    format!("{aux_form} {pp}")
  } else {
    simple_form(verb, &tense, slot)?
  };

  Ok(RawInstance {
    question: Some(format!("Conjugue le verbe {}", verb.infinitive)),
    answer: AnswerValue::Text(answer),
    modality: Modality::Alpha,
    data: Some(ProblemData::Conjugation {
      pronoun: PRONOUNS[p_idx].to_uppercase(),
      infinitive: verb.infinitive.clone(),
      tense: tense.to_uppercase(),
      compound,
      icon: verb.icon.clone(),
    }),
    ..Default::default()
  })
}

/// Dictation of a word from a category pool; the payload carries the
/// image reference and a fallback icon.
pub fn spelling(p: &ExerciseParams, lib: Option<&LanguageLibrary>) -> Result<RawInstance, String> {
  let lib = lib.ok_or(LIB_MISSING)?;
  let category = p.category.as_deref().unwrap_or("animals");
  let pool = lib
    .spelling
    .get(category)
    .or_else(|| lib.spelling.get("animals"))
    .ok_or_else(|| format!("orthographe : catégorie '{category}' introuvable"))?;
  let picked = pick(pool).ok_or_else(|| format!("orthographe : catégorie '{category}' vide"))?;

  Ok(RawInstance {
    question: Some("Écris le mot que tu vois".into()),
    answer: AnswerValue::Text(picked.word.to_lowercase()),
    modality: Modality::Alpha,
    data: Some(ProblemData::Spelling {
      word: picked.word.clone(),
      image_url: picked.image_url.clone(),
      icon: picked.icon.clone(),
    }),
    ..Default::default()
  })
}

/// Homophone duel. "mix_all"/"mix_auto" draws a valid category first,
/// then a sentence inside it. Button resolution order: per-item
/// choices, the category's explicit choices, the category key split on
/// '_' (legacy banks), then the exercise params.
pub fn homophones(p: &ExerciseParams, lib: Option<&LanguageLibrary>) -> Result<RawInstance, String> {
  let lib = lib.ok_or(LIB_MISSING)?;
  if lib.homophones.is_empty() {
    return Err("homophones : banque vide".into());
  }

  let requested = p.category.as_deref().unwrap_or("mix_all");
  let category_key = if requested == "mix_all" || requested == "mix_auto" {
    let mut keys: Vec<&String> = lib
      .homophones
      .iter()
      .filter(|(k, v)| k.contains('_') && !k.starts_with("__") && !v.items.is_empty())
      .map(|(k, _)| k)
      .collect();
    keys.sort();
    pick(&keys)
      .map(|k| (*k).clone())
      .ok_or("homophones : aucune catégorie valide pour le mix")?
  } else {
    requested.to_string()
  };

  let category = lib
    .homophones
    .get(&category_key)
    .ok_or_else(|| format!("homophones : catégorie '{category_key}' introuvable"))?;
  let item = pick(&category.items)
    .ok_or_else(|| format!("homophones : catégorie '{category_key}' vide"))?;

  let choices: Vec<String> = if let Some(c) = item.choices.as_ref().filter(|c| !c.is_empty()) {
    c.clone()
  } else if let Some(c) = category.choices.as_ref().filter(|c| !c.is_empty()) {
    c.clone()
  } else if category_key.contains('_') {
    category_key.split('_').map(str::to_string).collect()
  } else if let Some(c) = p.choices.as_ref().filter(|c| !c.is_empty()) {
    c.clone()
  } else {
    return Err(format!("homophones : aucun choix défini pour '{category_key}'"));
  };

  let question = if item.sentence.contains("...") {
    item.sentence.replace("...", "_____")
  } else {
    item.sentence.replace("___", "_____")
  };

  Ok(RawInstance {
    question: Some(question),
    answer: AnswerValue::Text(item.answer.clone()),
    modality: Modality::Choice,
    choices: Some(choices),
    ..Default::default()
  })
}

fn starts_with_vowel(word: &str) -> bool {
  word
    .chars()
    .next()
    .map(|c| "aeiouyàâäéèêëîïôöùûü".contains(c.to_lowercase().next().unwrap_or(c)))
    .unwrap_or(false)
}

/// Article agreement. The indefinite variant offers un/une; the
/// definite variant offers le/la and switches to the elided "l'" when
/// the noun starts with a vowel or mute h. The elided article then
/// joins the offered buttons, otherwise the right answer would be
/// untappable.
pub fn gender_article(p: &ExerciseParams, lib: Option<&LanguageLibrary>) -> Result<RawInstance, String> {
  let lib = lib.ok_or(LIB_MISSING)?;
  let category = p.category.as_deref().unwrap_or("base");
  let pool = lib
    .genders
    .get(category)
    .ok_or_else(|| format!("genre : catégorie '{category}' introuvable"))?;
  let entry = pick(pool).ok_or_else(|| format!("genre : catégorie '{category}' vide"))?;

  let definite = p.sub_type.as_deref() == Some("genre-article");
  let (mut choices, expected) = if definite {
    let choices = vec!["le".to_string(), "la".to_string()];
    let elides = entry.h_mute || starts_with_vowel(&entry.word);
    let expected = if elides {
      "l'".to_string()
    } else if entry.gender == Gender::Masculine {
      "le".to_string()
    } else {
      "la".to_string()
    };
    (choices, expected)
  } else {
    let expected = match entry.gender {
      Gender::Masculine => "un".to_string(),
      Gender::Feminine => "une".to_string(),
    };
    (vec!["un".to_string(), "une".to_string()], expected)
  };
  if !choices.contains(&expected) {
    choices.push(expected.clone());
  }

  Ok(RawInstance {
    question: Some(format!("_____ {}", entry.word)),
    answer: AnswerValue::Text(expected),
    modality: Modality::Choice,
    choices: Some(choices),
    data: Some(ProblemData::Spelling {
      word: entry.word.clone(),
      image_url: String::new(),
      icon: entry.icon.clone(),
    }),
    ..Default::default()
  })
}

/// Reading confirmation: the item is displayed with its syllable
/// coloring and silent letters; the player confirms having read it.
pub fn reading(p: &ExerciseParams, lib: Option<&LanguageLibrary>) -> Result<RawInstance, String> {
  let lib = lib.ok_or(LIB_MISSING)?;
  let category = p.category.as_deref().unwrap_or("taoki_p1");
  let pool = lib
    .reading
    .get(category)
    .or_else(|| lib.reading.get("taoki_p1"))
    .ok_or_else(|| format!("lecture : catégorie '{category}' introuvable"))?;
  let item = pick(pool).ok_or_else(|| format!("lecture : catégorie '{category}' vide"))?;

  Ok(RawInstance {
    question: Some("Lis la phrase à voix haute".into()),
    answer: AnswerValue::Text("vrai".into()),
    modality: Modality::Boolean,
    choices: Some(vec!["VRAI".into(), "FAUX".into()]),
    data: Some(ProblemData::Reading {
      text: item.text.clone(),
      syllables: item.syllables.clone(),
      silent: item.silent.clone(),
    }),
    ..Default::default()
  })
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::ExerciseParams;
  use crate::seeds::seed_library;

  fn params() -> ExerciseParams {
    ExerciseParams::default()
  }

  fn answer_text(raw: &RawInstance) -> String {
    match &raw.answer {
      AnswerValue::Text(t) => t.clone(),
      AnswerValue::Int(n) => panic!("expected text answer, got {n}"),
    }
  }

  #[test]
  fn all_language_generators_need_the_library() {
    assert!(conjugation(&params(), None).is_err());
    assert!(spelling(&params(), None).is_err());
    assert!(homophones(&params(), None).is_err());
    assert!(gender_article(&params(), None).is_err());
    assert!(reading(&params(), None).is_err());
  }

  #[test]
  fn category_resolution_rewrites_tense_prefix() {
    assert_eq!(resolve_category("present_1", "futur"), "future_1");
    assert_eq!(resolve_category("present_1", "passé composé"), "pc_1");
    assert_eq!(resolve_category("present_3_freq", "imparfait"), "imparfait_3_freq");
    assert_eq!(resolve_category("etre_avoir", "futur"), "etre_avoir_f");
    assert_eq!(resolve_category("etre_avoir", "présent"), "etre_avoir_p");
    assert_eq!(resolve_category("custom", "présent"), "custom");
  }

  #[test]
  fn passe_compose_with_etre_agrees_with_the_pronoun() {
    let lib = seed_library();
    let p = ExerciseParams {
      category: Some("present_1".into()),
      tenses: Some(vec!["passé composé".into()]),
      ..params()
    };
    let mut checked = 0;
    for _ in 0..600 {
      let raw = conjugation(&p, Some(&lib)).unwrap();
      let Some(ProblemData::Conjugation { pronoun, infinitive, compound, .. }) = &raw.data else {
        panic!("expected conjugation data");
      };
      assert!(*compound);
      if infinitive.as_str() != "tomber" {
        continue; // être-verb cases only
      }
      let pronoun = pronoun.clone();
      let answer = answer_text(&raw);
      match pronoun.as_str() {
        "ELLE" => { assert_eq!(answer, "est tombée"); checked += 1; }
        "ELLES" => { assert_eq!(answer, "sont tombées"); checked += 1; }
        "ILS" => { assert_eq!(answer, "sont tombés"); checked += 1; }
        "JE" => { assert_eq!(answer, "suis tombé"); checked += 1; }
        _ => {}
      }
    }
    assert!(checked > 0, "no être-auxiliary case drawn in 600 tries");
  }

  #[test]
  fn nous_form_applies_ger_and_cer_spelling() {
    let lib = seed_library();
    let p = ExerciseParams { category: Some("present_1".into()), ..params() };
    let mut seen_ger = false;
    let mut seen_cer = false;
    for _ in 0..800 {
      let raw = conjugation(&p, Some(&lib)).unwrap();
      let Some(ProblemData::Conjugation { pronoun, infinitive, .. }) = &raw.data else {
        panic!("expected conjugation data");
      };
      if pronoun.as_str() != "NOUS" {
        continue;
      }
      let infinitive = infinitive.clone();
      let answer = answer_text(&raw);
      if infinitive == "manger" {
        assert_eq!(answer, "mangeons");
        seen_ger = true;
      }
      if infinitive == "lancer" {
        assert_eq!(answer, "lançons");
        seen_cer = true;
      }
    }
    assert!(seen_ger && seen_cer, "nous-form of -ger/-cer never drawn");
  }

  #[test]
  fn homophone_mix_picks_a_valid_category_with_matching_buttons() {
    let lib = seed_library();
    let p = ExerciseParams { category: Some("mix_all".into()), ..params() };
    for _ in 0..200 {
      let raw = homophones(&p, Some(&lib)).unwrap();
      let answer = answer_text(&raw);
      let choices = raw.choices.unwrap();
      assert!(
        choices.iter().any(|c| c == &answer),
        "answer '{answer}' missing from {choices:?}"
      );
      assert!(raw.question.unwrap().contains("_____"));
    }
  }

  #[test]
  fn elision_injects_the_elided_article() {
    let lib = seed_library();
    let p = ExerciseParams {
      sub_type: Some("genre-article".into()),
      ..params()
    };
    let mut saw_elision = false;
    for _ in 0..300 {
      let raw = gender_article(&p, Some(&lib)).unwrap();
      let answer = answer_text(&raw);
      let choices = raw.choices.unwrap();
      assert!(choices.iter().any(|c| c == &answer));
      if answer == "l'" {
        saw_elision = true;
      }
    }
    assert!(saw_elision, "no vowel/mute-h noun drawn in 300 tries");
  }

  #[test]
  fn aspirated_h_does_not_elide() {
    let lib = seed_library();
    let p = ExerciseParams { sub_type: Some("genre-article".into()), ..params() };
    for _ in 0..300 {
      let raw = gender_article(&p, Some(&lib)).unwrap();
      let Some(ProblemData::Spelling { word, .. }) = &raw.data else { continue };
      if word.as_str() == "hibou" {
        assert_eq!(answer_text(&raw), "le");
        return;
      }
    }
    panic!("'hibou' never drawn in 300 tries");
  }

  #[test]
  fn reading_answer_matches_its_buttons() {
    let lib = seed_library();
    let raw = reading(&params(), Some(&lib)).unwrap();
    assert_eq!(answer_text(&raw), "vrai");
    assert_eq!(raw.modality, Modality::Boolean);
    assert_eq!(raw.choices.unwrap(), vec!["VRAI".to_string(), "FAUX".to_string()]);
  }

  #[test]
  fn spelling_answer_is_lowercased_word() {
    let lib = seed_library();
    let raw = spelling(&params(), Some(&lib)).unwrap();
    let answer = answer_text(&raw);
    assert_eq!(answer, answer.to_lowercase());
    assert!(!answer.is_empty());
  }
}
