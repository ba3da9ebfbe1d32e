//! Free-text measurement: tokenization and the coherence heuristic.
//!
//! The coherence score is a crude lexical proxy, not language understanding.
//! It sits behind a trait so a richer model can replace it without touching
//! the rubric decision tables in the language and generative scorers.

/// Lowercased words stripped to `[a-z0-9']`, empties dropped.
pub fn normalize_words(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|word| {
            word.to_lowercase()
                .chars()
                .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '\'')
                .collect::<String>()
        })
        .filter(|w| !w.is_empty())
        .collect()
}

/// Sentence segments split on `.`, `!`, `?`, trimmed, empties dropped.
pub fn split_sentences(text: &str) -> Vec<&str> {
    text.split(['.', '!', '?'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Heuristic [0, 1] estimate of textual quality.
pub trait CoherenceModel {
    fn coherence(&self, words: &[String], sentence_count: usize) -> f64;
}

/// Default model: `0.6 × lexicalVariety + 0.4 × min(1, avgSentenceLen / 18)`,
/// capped at 1. Lexical variety is the unique-to-total word ratio.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexicalCoherence;

impl LexicalCoherence {
    const TARGET_SENTENCE_LENGTH: f64 = 18.0;
}

impl CoherenceModel for LexicalCoherence {
    fn coherence(&self, words: &[String], sentence_count: usize) -> f64 {
        if words.is_empty() {
            return 0.0;
        }
        let unique = {
            let mut seen = std::collections::HashSet::new();
            words.iter().filter(|w| seen.insert(*w)).count()
        };
        let variety = unique as f64 / words.len() as f64;
        let avg_len = words.len() as f64 / sentence_count.max(1) as f64;
        let length_factor = (avg_len / Self::TARGET_SENTENCE_LENGTH).min(1.0);
        (variety * 0.6 + length_factor * 0.4).min(1.0)
    }
}
