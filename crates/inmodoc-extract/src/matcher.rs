//! Fuzzy label matching against the alias dictionary.

use inmodoc_core::ContainmentRule;

use crate::dictionary::{FieldDictionary, FieldMapping};
use crate::normalize::{contains_phrase, normalize_label};

/// Similarity assigned when one normalized string contains the other.
pub const CONTAINMENT_SIMILARITY: f64 = 0.8;

/// Best dictionary hit for a label.
#[derive(Debug, Clone, Copy)]
pub struct FieldMatch<'a> {
    pub mapping: &'a FieldMapping,
    /// The alias as written in the dictionary.
    pub alias: &'a str,
    /// In `[0, 1]`.
    pub similarity: f64,
}

/// Finds the mapping whose alias is most similar to `label`, scoring plain
/// substring containment.
///
/// Returns `None` when the label normalizes to nothing or when no alias
/// reaches `threshold`. Ties go to the first mapping and alias in dictionary
/// order.
#[must_use]
pub fn find_best_match<'a>(
    label: &str,
    dictionary: &'a FieldDictionary,
    threshold: f64,
) -> Option<FieldMatch<'a>> {
    find_best_match_with(label, dictionary, threshold, ContainmentRule::Substring)
}

/// [`find_best_match`] with an explicit containment rule.
#[must_use]
pub fn find_best_match_with<'a>(
    label: &str,
    dictionary: &'a FieldDictionary,
    threshold: f64,
    containment: ContainmentRule,
) -> Option<FieldMatch<'a>> {
    let normalized = normalize_label(label);
    if normalized.is_empty() {
        return None;
    }

    let mut best: Option<FieldMatch<'a>> = None;
    for mapping in dictionary.mappings() {
        for (alias, alias_norm) in mapping.aliases.iter().zip(mapping.normalized_aliases()) {
            let score = normalized_similarity(&normalized, alias_norm, containment);
            if best.map_or(true, |b| score > b.similarity) {
                best = Some(FieldMatch {
                    mapping,
                    alias,
                    similarity: score,
                });
            }
            if score >= 1.0 {
                return best;
            }
        }
    }

    best.filter(|m| m.similarity >= threshold)
}

/// Similarity of two raw strings after normalization: 1.0 when equal, 0.8
/// when either contains the other, else normalized Levenshtein.
#[must_use]
pub fn similarity(a: &str, b: &str) -> f64 {
    similarity_with(a, b, ContainmentRule::Substring)
}

/// [`similarity`] with an explicit containment rule.
#[must_use]
pub fn similarity_with(a: &str, b: &str, containment: ContainmentRule) -> f64 {
    normalized_similarity(&normalize_label(a), &normalize_label(b), containment)
}

fn normalized_similarity(a: &str, b: &str, containment: ContainmentRule) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    if a == b {
        return 1.0;
    }
    let contains = match containment {
        ContainmentRule::Substring => a.contains(b) || b.contains(a),
        ContainmentRule::WholeWord => contains_phrase(a, b) || contains_phrase(b, a),
    };
    if contains {
        return CONTAINMENT_SIMILARITY;
    }

    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    #[allow(clippy::cast_precision_loss)]
    let (max_len, distance) = (a.len().max(b.len()) as f64, levenshtein(&a, &b) as f64);
    (max_len - distance) / max_len
}

/// Classic two-row edit distance over characters.
#[must_use]
pub fn levenshtein(a: &[char], b: &[char]) -> usize {
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];
    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j] + cost).min(prev[j + 1] + 1).min(curr[j] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}
