use sha2::{Digest, Sha256};
use std::collections::HashSet;

fn tokens(text: &str) -> HashSet<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_lowercase())
        .collect()
}

/// Jaccard similarity between the case-folded word sets of two texts,
/// in `[0, 1]`. Empty content never matches anything.
pub fn similarity(a: &str, b: &str) -> f64 {
    let tokens_a = tokens(a);
    let tokens_b = tokens(b);

    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0.0;
    }

    let intersection = tokens_a.intersection(&tokens_b).count();
    let union = tokens_a.union(&tokens_b).count();

    intersection as f64 / union as f64
}

/// Cheap pre-filter for exact duplicates: hash of the whitespace-collapsed,
/// lowercased text. Hash equality is enough for a duplicate verdict; the
/// similarity score remains the authoritative test for everything else.
pub fn content_hash(text: &str) -> String {
    let normalized = text.to_lowercase().split_whitespace().collect::<Vec<_>>().join(" ");
    let digest = Sha256::digest(normalized.as_bytes());
    digest.iter().map(|b| format!("{:02x}", b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_text_scores_one() {
        assert_eq!(similarity("Housing prices rise", "Housing prices rise"), 1.0);
    }

    #[test]
    fn test_empty_text_scores_zero() {
        assert_eq!(similarity("", "anything"), 0.0);
        assert_eq!(similarity("anything", ""), 0.0);
        assert_eq!(similarity("", ""), 0.0);
        assert_eq!(similarity("!!! ???", "anything"), 0.0);
    }

    #[test]
    fn test_symmetric() {
        let a = "Rents climb across the North West";
        let b = "Rents climb across London";
        assert_eq!(similarity(a, b), similarity(b, a));
    }

    #[test]
    fn test_punctuation_and_case_do_not_matter() {
        let score = similarity(
            "Housing prices rise in London this quarter",
            "housing PRICES rise, in London -- this quarter!!",
        );
        assert_eq!(score, 1.0);
    }

    #[test]
    fn test_disjoint_texts_score_zero() {
        assert_eq!(similarity("alpha beta", "gamma delta"), 0.0);
    }

    #[test]
    fn test_partial_overlap() {
        // {a, b, c} vs {b, c, d}: 2 shared of 4 total
        assert_eq!(similarity("a b c", "b c d"), 0.5);
    }

    #[test]
    fn test_content_hash_ignores_whitespace_and_case() {
        assert_eq!(
            content_hash("Housing  prices\nrise"),
            content_hash("housing prices rise")
        );
        assert_ne!(content_hash("housing prices rise"), content_hash("housing prices fall"));
    }
}
