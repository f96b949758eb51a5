//! Answer matching with typo tolerance.

use serde::{Deserialize, Serialize};

/// Characters removed before comparing answers.
const IGNORED_PUNCTUATION: &[char] = &['.', ',', '!', '?', ';', ':', '"', '\''];

/// Answers up to this many characters tolerate a single typo.
const SHORT_ANSWER_LEN: usize = 5;

/// Result of comparing a typed answer to the correct answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Whether the answer is accepted.
    pub is_correct: bool,
    /// Accepted, but only thanks to typo tolerance.
    pub is_close_call: bool,
    /// Edit distance between the normalized strings.
    pub distance: usize,
    pub user_normalized: String,
    pub correct_normalized: String,
}

/// Grade a typed answer against the canonical answer.
pub fn evaluate(user_answer: &str, correct_answer: &str) -> MatchResult {
    let user_normalized = normalize(user_answer);
    let correct_normalized = normalize(correct_answer);

    if user_normalized == correct_normalized {
        return MatchResult {
            is_correct: true,
            is_close_call: false,
            distance: 0,
            user_normalized,
            correct_normalized,
        };
    }

    let distance = levenshtein_distance(&user_normalized, &correct_normalized);
    let within = distance <= tolerance_for(&correct_normalized);

    MatchResult {
        is_correct: within,
        is_close_call: within,
        distance,
        user_normalized,
        correct_normalized,
    }
}

/// Lowercase, drop punctuation, collapse whitespace and trim.
pub fn normalize(s: &str) -> String {
    let stripped: String = s
        .to_lowercase()
        .chars()
        .filter(|c| !IGNORED_PUNCTUATION.contains(c))
        .collect();
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Number of edits accepted for a normalized correct answer.
pub fn tolerance_for(correct_normalized: &str) -> usize {
    if correct_normalized.chars().count() <= SHORT_ANSWER_LEN {
        1
    } else {
        2
    }
}

/// Calculate Levenshtein distance between two strings.
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    let m = a_chars.len();
    let n = b_chars.len();

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    // Two rows are enough
    let mut prev = (0..=n).collect::<Vec<_>>();
    let mut curr = vec![0; n + 1];

    for i in 1..=m {
        curr[0] = i;

        for j in 1..=n {
            let cost = usize::from(a_chars[i - 1] != b_chars[j - 1]);

            curr[j] = (prev[j] + 1) // deletion
                .min(curr[j - 1] + 1) // insertion
                .min(prev[j - 1] + cost); // substitution
        }

        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levenshtein_distance() {
        assert_eq!(levenshtein_distance("", ""), 0);
        assert_eq!(levenshtein_distance("abc", "abc"), 0);
        assert_eq!(levenshtein_distance("abc", ""), 3);
        assert_eq!(levenshtein_distance("", "abc"), 3);
        assert_eq!(levenshtein_distance("kitten", "sitting"), 3);
        assert_eq!(levenshtein_distance("āboli", "aboli"), 1);
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  Goede   Morgen!  "), "goede morgen");
        assert_eq!(normalize("\"Wat?\" zei hij; ja."), "wat zei hij ja");
        assert_eq!(normalize("L'eau"), "leau");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn identical_answers_are_exact() {
        for s in ["", "hond", "Labdien, kā iet?", "  x  "] {
            let result = evaluate(s, s);
            assert!(result.is_correct);
            assert!(!result.is_close_call);
        }
    }

    #[test]
    fn case_and_punctuation_are_ignored() {
        let result = evaluate("HOND!", "hond");
        assert!(result.is_correct);
        assert!(!result.is_close_call);
    }

    #[test]
    fn accent_counts_as_one_typo() {
        let result = evaluate("Café!", "cafe");
        assert!(result.is_correct);
        assert!(result.is_close_call);
        assert_eq!(result.distance, 1);
    }

    #[test]
    fn short_answers_tolerate_one_typo() {
        let result = evaluate("hand", "hond");
        assert!(result.is_correct && result.is_close_call);

        let result = evaluate("hant", "hond");
        assert!(!result.is_correct);
        assert!(!result.is_close_call);
    }

    #[test]
    fn long_answers_tolerate_two_typos() {
        let result = evaluate("goedemirgan", "goedemorgen");
        assert!(result.is_correct && result.is_close_call);

        let result = evaluate("gaedemirgan", "goedemorgen");
        assert!(!result.is_correct);
    }

    #[test]
    fn tolerance_boundary_is_five_characters() {
        assert_eq!(tolerance_for("appel"), 1);
        assert_eq!(tolerance_for("appels"), 2);
        assert_eq!(tolerance_for("māja"), 1);
    }

    #[test]
    fn empty_input_against_answer() {
        let result = evaluate("", "ja");
        assert_eq!(result.distance, 2);
        assert!(!result.is_correct);

        let result = evaluate("", "j");
        assert!(result.is_correct && result.is_close_call);
    }
}
