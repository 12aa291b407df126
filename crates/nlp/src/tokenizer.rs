//! Morphological evidence is optional input to the matcher: a tokenizer
//! that never runs still yields a correct, merely less confident, parse
//! (spec §4.2).

use dronecmd_domain::Token;

/// Splits text into `{surface, basic}` tokens. Implementers may plug in
/// a real morphological analyzer; absence of one must never fail parsing.
pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Vec<Token>;
}

/// Always returns no tokens. The default when no morphological evidence
/// is configured — this only costs the matcher its 1.15× boost, it never
/// causes a parse failure.
pub struct NullTokenizer;

impl Tokenizer for NullTokenizer {
    fn tokenize(&self, _text: &str) -> Vec<Token> {
        Vec::new()
    }
}

/// Splits on Unicode word boundaries and lowercases. No stemming, no
/// inflection table — sufficient to drive the keyword-table lookup for
/// English and romaji input without a full morphological analyzer.
pub struct KeywordTokenizer;

impl Tokenizer for KeywordTokenizer {
    fn tokenize(&self, text: &str) -> Vec<Token> {
        text.split(|c: char| !c.is_alphanumeric())
            .filter(|s| !s.is_empty())
            .map(|surface| Token {
                surface: surface.to_string(),
                basic: surface.to_lowercase(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_tokenizer_never_produces_tokens() {
        assert!(NullTokenizer.tokenize("takeoff now").is_empty());
    }

    #[test]
    fn keyword_tokenizer_splits_and_lowercases() {
        let tokens = KeywordTokenizer.tokenize("Move Forward 2m");
        let basics: Vec<_> = tokens.iter().map(|t| t.basic.as_str()).collect();
        assert_eq!(basics, vec!["move", "forward", "2m"]);
    }
}
