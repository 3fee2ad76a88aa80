//! Suffix slot tables.
//!
//! Each chain is an ordered list of optional slots; a slot is a set of
//! surface allomorphs. Vowel harmony is not enforced, every harmonic
//! variant is simply listed.

pub(crate) type Slot = &'static [&'static str];

const PLURAL: Slot = &["ler", "lar"];

const POSSESSIVE: Slot = &[
    "imiz", "ımız", "umuz", "ümüz", "miz", "mız", "muz", "müz", "iniz", "ınız", "unuz", "ünüz",
    "niz", "nız", "nuz", "nüz", "leri", "ları", "si", "sı", "su", "sü", "im", "ım", "um", "üm",
    "in", "ın", "un", "ün", "m", "n", "i", "ı", "u", "ü",
];

const CASE: Slot = &[
    "nden", "ndan", "nde", "nda", "nin", "nın", "nun", "nün", "den", "dan", "ten", "tan", "yle",
    "yla", "de", "da", "te", "ta", "le", "la", "ye", "ya", "yi", "yı", "yu", "yü", "ne", "na",
    "ni", "nı", "nu", "nü", "in", "ın", "un", "ün", "e", "a", "i", "ı", "u", "ü",
];

const COPULA: Slot = &[
    "dir", "dır", "dur", "dür", "tir", "tır", "tur", "tür", "ki",
];

const NEGATION: Slot = &["me", "ma"];

const TENSE: Slot = &[
    "yecek", "yacak", "ecek", "acak", "iyor", "ıyor", "uyor", "üyor", "yor", "meli", "malı",
    "mek", "mak", "miş", "mış", "muş", "müş", "di", "dı", "du", "dü", "ti", "tı", "tu", "tü", "se",
    "sa", "er", "ar", "ir", "ır", "ur", "ür", "r",
];

const PERSON: Slot = &[
    "siniz", "sınız", "sunuz", "sünüz", "sin", "sın", "sun", "sün", "niz", "nız", "nuz", "nüz",
    "iz", "ız", "uz", "üz", "im", "ım", "um", "üm", "ler", "lar", "m", "n", "k",
];

pub(crate) const NOUN_CHAIN: &[Slot] = &[PLURAL, POSSESSIVE, CASE, COPULA];

pub(crate) const VERB_CHAIN: &[Slot] = &[NEGATION, TENSE, PERSON];

/// Shortest segmentation of `rest` into at most one allomorph per slot, in
/// slot order. `None` when `rest` cannot be consumed completely.
pub(crate) fn segment(rest: &str, chain: &[Slot]) -> Option<Vec<&'static str>> {
    if rest.is_empty() {
        return Some(Vec::new());
    }
    let (slot, remaining_slots) = chain.split_first()?;

    let mut best: Option<Vec<&'static str>> = None;
    for &allomorph in slot.iter() {
        if let Some(tail) = rest.strip_prefix(allomorph) {
            if let Some(mut parsed) = segment(tail, remaining_slots) {
                parsed.insert(0, allomorph);
                if best.as_ref().map_or(true, |b| parsed.len() < b.len()) {
                    best = Some(parsed);
                }
            }
        }
    }
    // Skipping the slot entirely.
    if let Some(parsed) = segment(rest, remaining_slots) {
        if best.as_ref().map_or(true, |b| parsed.len() < b.len()) {
            best = Some(parsed);
        }
    }
    best
}
