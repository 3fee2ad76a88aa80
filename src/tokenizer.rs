//! Whitespace tokenizer.
//!
//! Splits free text into the tokens handed to the analyzer. Classification
//! uses Unicode whitespace, so Turkish letters (ç, ğ, ı, İ, ö, ş, ü) always
//! stay inside their token while tabs, newlines and no-break spaces separate.

/// Split `text` on maximal whitespace runs, dropping empty fragments.
///
/// Total over all inputs: empty or all-whitespace text yields no tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_string).collect()
}
