//! Built-in language library and the last-resort fallback instance.
//!
//! The seed library guarantees every language generator works with no
//! external configuration; a TOML config can overlay or extend these
//! pools per category.

use std::collections::HashMap;

use uuid::Uuid;

use crate::domain::{
  Gender, GenderEntry, HomophoneCategory, HomophoneItem, LanguageLibrary, Modality,
  ProblemData, ProblemInstance, ReadingItem, SpellingEntry, VerbEntry,
};

/// Fallback served when a generator fails: the diagnostic becomes the
/// question, the rest of the shape stays fixed so downstream consumers
/// never special-case a missing instance.
pub fn fallback_instance(diagnostic: &str) -> ProblemInstance {
  ProblemInstance {
    id: Uuid::new_v4().to_string(),
    question: diagnostic.to_string(),
    answer: "0".into(),
    modality: Modality::Numeric,
    is_visual: false,
    data: ProblemData::None,
    choices: Vec::new(),
    duration_seconds: None,
    fold_hyphens: false,
  }
}

fn verb_regular(infinitive: &str, icon: &str, base: &str, endings: [&str; 6]) -> VerbEntry {
  VerbEntry {
    infinitive: infinitive.into(),
    icon: icon.into(),
    base: Some(base.into()),
    endings: Some(endings.map(String::from)),
    ..Default::default()
  }
}

fn verb_full(infinitive: &str, icon: &str, full: [&str; 6]) -> VerbEntry {
  VerbEntry {
    infinitive: infinitive.into(),
    icon: icon.into(),
    full: Some(full.map(String::from)),
    ..Default::default()
  }
}

fn verb_compound(infinitive: &str, icon: &str, aux: &str, pp: &str) -> VerbEntry {
  VerbEntry {
    infinitive: infinitive.into(),
    icon: icon.into(),
    aux: Some(aux.into()),
    pp: Some(pp.into()),
    ..Default::default()
  }
}

fn spelling_word(word: &str, icon: &str) -> SpellingEntry {
  SpellingEntry {
    word: word.into(),
    image_url: format!("img/{}.png", word.replace(['é', 'è'], "e")),
    icon: icon.into(),
  }
}

fn homophone_bank(choices: [&str; 2], items: &[(&str, &str)]) -> HomophoneCategory {
  HomophoneCategory {
    choices: Some(choices.map(String::from).to_vec()),
    items: items
      .iter()
      .map(|(sentence, answer)| HomophoneItem {
        sentence: (*sentence).into(),
        answer: (*answer).into(),
        choices: None,
      })
      .collect(),
  }
}

fn noun(word: &str, gender: Gender, h_mute: bool, icon: &str) -> GenderEntry {
  GenderEntry { word: word.into(), gender, h_mute, icon: icon.into() }
}

const ER_PRESENT: [&str; 6] = ["e", "es", "e", "ons", "ez", "ent"];
const IR_PRESENT: [&str; 6] = ["is", "is", "it", "issons", "issez", "issent"];
const ER_FUTURE: [&str; 6] = ["ai", "as", "a", "ons", "ez", "ont"];
const ER_IMPARFAIT: [&str; 6] = ["ais", "ais", "ait", "ions", "iez", "aient"];

/// Built-in French pools. Enough coverage for every category the
/// default exercises reference, including the -ger/-cer verbs that
/// exercise the nous-form spelling fixes.
pub fn seed_library() -> LanguageLibrary {
  let mut conjugation: HashMap<String, Vec<VerbEntry>> = HashMap::new();
  conjugation.insert(
    "etre_avoir_p".into(),
    vec![
      verb_full("être", "✨", ["suis", "es", "est", "sommes", "êtes", "sont"]),
      verb_full("avoir", "🎒", ["ai", "as", "a", "avons", "avez", "ont"]),
    ],
  );
  conjugation.insert(
    "etre_avoir_f".into(),
    vec![
      verb_full("être", "✨", ["serai", "seras", "sera", "serons", "serez", "seront"]),
      verb_full("avoir", "🎒", ["aurai", "auras", "aura", "aurons", "aurez", "auront"]),
    ],
  );
  conjugation.insert(
    "etre_avoir_imp".into(),
    vec![
      verb_full("être", "✨", ["étais", "étais", "était", "étions", "étiez", "étaient"]),
      verb_full("avoir", "🎒", ["avais", "avais", "avait", "avions", "aviez", "avaient"]),
    ],
  );
  conjugation.insert(
    "present_1".into(),
    vec![
      verb_regular("chanter", "🎤", "chant", ER_PRESENT),
      verb_regular("jouer", "🎲", "jou", ER_PRESENT),
      verb_regular("manger", "🍽️", "mang", ER_PRESENT),
      verb_regular("lancer", "🏐", "lanc", ER_PRESENT),
      verb_regular("danser", "💃", "dans", ER_PRESENT),
    ],
  );
  conjugation.insert(
    "present_2".into(),
    vec![
      verb_regular("finir", "🏁", "fin", IR_PRESENT),
      verb_regular("choisir", "🤔", "chois", IR_PRESENT),
      verb_regular("grandir", "🌱", "grand", IR_PRESENT),
    ],
  );
  conjugation.insert(
    "present_3_freq".into(),
    vec![
      verb_full("aller", "🚶", ["vais", "vas", "va", "allons", "allez", "vont"]),
      verb_full("faire", "🛠️", ["fais", "fais", "fait", "faisons", "faites", "font"]),
      verb_full("dire", "💬", ["dis", "dis", "dit", "disons", "dites", "disent"]),
    ],
  );
  conjugation.insert(
    "future_1".into(),
    vec![
      verb_regular("chanter", "🎤", "chanter", ER_FUTURE),
      verb_regular("jouer", "🎲", "jouer", ER_FUTURE),
      verb_regular("danser", "💃", "danser", ER_FUTURE),
    ],
  );
  conjugation.insert(
    "imparfait_1".into(),
    vec![
      verb_regular("chanter", "🎤", "chant", ER_IMPARFAIT),
      verb_regular("jouer", "🎲", "jou", ER_IMPARFAIT),
      verb_regular("danser", "💃", "dans", ER_IMPARFAIT),
    ],
  );
  conjugation.insert(
    "pc_1".into(),
    vec![
      verb_compound("chanter", "🎤", "avoir", "chanté"),
      verb_compound("manger", "🍽️", "avoir", "mangé"),
      verb_compound("tomber", "🍂", "être", "tombé"),
      verb_compound("arriver", "🚌", "être", "arrivé"),
    ],
  );

  let mut spelling: HashMap<String, Vec<SpellingEntry>> = HashMap::new();
  spelling.insert(
    "animals".into(),
    vec![
      spelling_word("chat", "🐱"),
      spelling_word("chien", "🐶"),
      spelling_word("lapin", "🐰"),
      spelling_word("éléphant", "🐘"),
      spelling_word("souris", "🐭"),
    ],
  );
  spelling.insert(
    "school".into(),
    vec![
      spelling_word("cartable", "🎒"),
      spelling_word("crayon", "✏️"),
      spelling_word("école", "🏫"),
      spelling_word("cahier", "📓"),
    ],
  );

  let mut homophones: HashMap<String, HomophoneCategory> = HashMap::new();
  homophones.insert(
    "a_à".into(),
    homophone_bank(
      ["a", "à"],
      &[
        ("Il ... un chien très gentil.", "a"),
        ("Nous allons ... la plage.", "à"),
        ("Elle ... beaucoup de chance.", "a"),
        ("Le train part ... huit heures.", "à"),
      ],
    ),
  );
  homophones.insert(
    "et_est".into(),
    homophone_bank(
      ["et", "est"],
      &[
        ("Mon frère ... parti ce matin.", "est"),
        ("J'ai un chat ... un chien.", "et"),
        ("La mer ... calme aujourd'hui.", "est"),
      ],
    ),
  );
  homophones.insert(
    "son_sont".into(),
    homophone_bank(
      ["son", "sont"],
      &[
        ("Ils ... très contents.", "sont"),
        ("Il a perdu ... stylo.", "son"),
        ("Les oiseaux ... dans le nid.", "sont"),
      ],
    ),
  );
  homophones.insert(
    "on_ont".into(),
    homophone_bank(
      ["on", "ont"],
      &[
        ("Ils ... fini leurs devoirs.", "ont"),
        ("... va au parc cet après-midi.", "on"),
        ("Elles ... un nouveau ballon.", "ont"),
      ],
    ),
  );

  let mut genders: HashMap<String, Vec<GenderEntry>> = HashMap::new();
  genders.insert(
    "base".into(),
    vec![
      noun("chat", Gender::Masculine, false, "🐱"),
      noun("maison", Gender::Feminine, false, "🏠"),
      noun("arbre", Gender::Masculine, false, "🌳"),
      noun("école", Gender::Feminine, false, "🏫"),
      noun("orange", Gender::Feminine, false, "🍊"),
      noun("homme", Gender::Masculine, true, "👨"),
      noun("hibou", Gender::Masculine, false, "🦉"),
    ],
  );

  let mut reading: HashMap<String, Vec<ReadingItem>> = HashMap::new();
  reading.insert(
    "taoki_p1".into(),
    vec![
      ReadingItem {
        text: "le lit".into(),
        syllables: vec!["le".into(), "lit".into()],
        silent: vec![5],
      },
      ReadingItem {
        text: "la moto".into(),
        syllables: vec!["la".into(), "mo".into(), "to".into()],
        silent: vec![],
      },
      ReadingItem {
        text: "le chat".into(),
        syllables: vec!["le".into(), "chat".into()],
        silent: vec![6],
      },
    ],
  );

  LanguageLibrary { conjugation, spelling, homophones, genders, reading }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn fallback_has_the_fixed_shape() {
    let inst = fallback_instance("Moteur inconnu : x");
    assert_eq!(inst.answer, "0");
    assert_eq!(inst.modality, Modality::Numeric);
    assert!(!inst.is_visual);
    assert!(inst.question.contains("Moteur inconnu"));
  }

  #[test]
  fn seed_library_covers_every_referenced_category() {
    let lib = seed_library();
    for key in [
      "etre_avoir_p",
      "etre_avoir_f",
      "etre_avoir_imp",
      "present_1",
      "present_2",
      "present_3_freq",
      "future_1",
      "imparfait_1",
      "pc_1",
    ] {
      assert!(lib.conjugation.get(key).is_some_and(|p| !p.is_empty()), "missing {key}");
    }
    assert!(!lib.spelling["animals"].is_empty());
    assert!(!lib.homophones["a_à"].items.is_empty());
    assert!(!lib.genders["base"].is_empty());
    assert!(!lib.reading["taoki_p1"].is_empty());
  }

  #[test]
  fn homophone_banks_offer_their_answers() {
    let lib = seed_library();
    for (key, bank) in &lib.homophones {
      let choices = bank.choices.as_ref().expect("seed banks carry choices");
      for item in &bank.items {
        assert!(
          choices.contains(&item.answer),
          "answer '{}' of '{key}' not among {choices:?}",
          item.answer
        );
      }
    }
  }
}
