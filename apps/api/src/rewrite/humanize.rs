//! Humanization pipeline: randomized post-processing of completion text.
//!
//! Stages run in a fixed order:
//!   1. `add_imperfections`    patchy whole-word typos
//!   2. `add_human_texture`    phrase variation, then contractions and fillers
//!   3. `split_long_sentences` cap run-on sentences
//!
//! Every stage is total: any input, including `""`, yields a string.
//! Randomness comes only from the `Rng` passed in, so a seeded or mocked
//! generator makes the whole pipeline reproducible.

use once_cell::sync::Lazy;
use rand::Rng;
use regex::{Captures, NoExpand, Regex};

/// Chance that the typo stage does anything at all.
pub const IMPERFECTION_RATE: f64 = 0.4;
/// Chance that an individual typo rule fires once the stage is active.
pub const TYPO_RATE: f64 = 0.3;
/// Chance that filler insertion runs for a given text.
pub const FILLER_PASS_RATE: f64 = 0.4;
/// Chance that a fragment gets a filler once insertion runs.
pub const FILLER_RATE: f64 = 0.2;

/// Segments longer than this (in chars) are split or truncated.
pub const MAX_SENTENCE_CHARS: usize = 120;
/// Highest char index at which a splitting comma is looked for.
pub const COMMA_SEARCH_LIMIT: usize = 80;
/// A splitting comma must sit strictly after this index.
pub const MIN_CLAUSE_CHARS: usize = 20;
/// Chars kept when a segment has no usable comma.
pub const TRUNCATED_CHARS: usize = 90;
pub const ELLIPSIS: &str = "...";

/// Whole-word spelling slips. Case-sensitive.
const TYPO_TABLE: &[(&str, &str)] = &[
    ("the", "teh"),
    ("and", "adn"),
    ("to", "too"),
    ("it's", "its"),
];

/// Stilted phrase → candidate replacements. Each match picks independently.
const VARIATION_TABLE: &[(&str, &[&str])] = &[
    ("However", &["That said", "But", "On the flip side", "Though"]),
    ("Moreover", &["Also", "Plus", "And yeah", "What's more"]),
    ("in order to", &["to", "so I can", "just to"]),
    (
        "It is important to",
        &["You should", "It's key to", "I'd say it's worth"],
    ),
    ("utilize", &["use", "tap into", "go with", "make use of"]),
    ("the", &["that", "the", "a"]),
];

const CONTRACTION_TABLE: &[(&str, &str)] = &[
    ("do not", "don't"),
    ("is not", "isn't"),
    ("I am", "I'm"),
];

const FILLERS: &[&str] = &["you know,", "like,", "honestly,", "by the way,"];

/// Literal separator used by filler insertion. Not the same boundary rule as
/// `SENTENCE_BREAK`; both are kept as-is.
const FILLER_SPLIT: &str = ". ";

struct Substitution {
    pattern: Regex,
    replacement: &'static str,
}

struct Variation {
    pattern: Regex,
    replacements: &'static [&'static str],
}

fn whole_word(phrase: &str) -> Regex {
    Regex::new(&format!(r"\b{}\b", regex::escape(phrase))).unwrap()
}

static TYPOS: Lazy<Vec<Substitution>> = Lazy::new(|| {
    TYPO_TABLE
        .iter()
        .map(|&(from, to)| Substitution {
            pattern: whole_word(from),
            replacement: to,
        })
        .collect()
});

static VARIATIONS: Lazy<Vec<Variation>> = Lazy::new(|| {
    VARIATION_TABLE
        .iter()
        .map(|&(phrase, replacements)| Variation {
            pattern: whole_word(phrase),
            replacements,
        })
        .collect()
});

static CONTRACTIONS: Lazy<Vec<Substitution>> = Lazy::new(|| {
    CONTRACTION_TABLE
        .iter()
        .map(|&(from, to)| Substitution {
            pattern: whole_word(from),
            replacement: to,
        })
        .collect()
});

/// Whitespace run following a period; the period stays with its sentence.
static SENTENCE_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.\s+").unwrap());

/// Runs all three stages in order.
pub fn humanize<R: Rng + ?Sized>(text: &str, rng: &mut R) -> String {
    let text = add_imperfections(text, rng);
    let text = add_human_texture(&text, rng);
    split_long_sentences(&text)
}

/// Stage 1: most texts pass through untouched; otherwise each typo rule
/// flips its own coin and, on success, rewrites every occurrence.
pub fn add_imperfections<R: Rng + ?Sized>(text: &str, rng: &mut R) -> String {
    if !rng.gen_bool(IMPERFECTION_RATE) {
        return text.to_string();
    }

    TYPOS.iter().fold(text.to_string(), |acc, typo| {
        if rng.gen_bool(TYPO_RATE) {
            typo.pattern
                .replace_all(&acc, NoExpand(typo.replacement))
                .into_owned()
        } else {
            acc
        }
    })
}

/// Stage 2: phrase variation, then contractions, then optional fillers.
pub fn add_human_texture<R: Rng + ?Sized>(text: &str, rng: &mut R) -> String {
    let mut result = text.to_string();

    for variation in VARIATIONS.iter() {
        let choices = variation.replacements;
        result = variation
            .pattern
            .replace_all(&result, |_: &Captures<'_>| {
                choices[rng.gen_range(0..choices.len())]
            })
            .into_owned();
    }

    for contraction in CONTRACTIONS.iter() {
        result = contraction
            .pattern
            .replace_all(&result, NoExpand(contraction.replacement))
            .into_owned();
    }

    if rng.gen_bool(FILLER_PASS_RATE) {
        result = insert_fillers(&result, rng);
    }

    result
}

fn insert_fillers<R: Rng + ?Sized>(text: &str, rng: &mut R) -> String {
    text.split(FILLER_SPLIT)
        .map(|fragment| {
            if rng.gen_bool(FILLER_RATE) {
                let filler = FILLERS[rng.gen_range(0..FILLERS.len())];
                format!("{filler} {fragment}")
            } else {
                fragment.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(FILLER_SPLIT)
}

/// Stage 3: deterministic. Long segments are split at an early comma or
/// truncated; everything is rejoined with single spaces.
pub fn split_long_sentences(text: &str) -> String {
    sentence_segments(text)
        .into_iter()
        .map(normalize_segment)
        .collect::<Vec<_>>()
        .join(" ")
}

fn sentence_segments(text: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut start = 0;
    for m in SENTENCE_BREAK.find_iter(text) {
        // '.' is one byte, so m.start() + 1 is a char boundary.
        segments.push(&text[start..m.start() + 1]);
        start = m.end();
    }
    segments.push(&text[start..]);
    segments
}

fn normalize_segment(segment: &str) -> String {
    let chars: Vec<char> = segment.chars().collect();
    if chars.len() <= MAX_SENTENCE_CHARS {
        return segment.to_string();
    }

    let window = &chars[..=COMMA_SEARCH_LIMIT];
    match window.iter().rposition(|&c| c == ',') {
        Some(comma) if comma > MIN_CLAUSE_CHARS => {
            let head: String = chars[..comma].iter().collect();
            let tail: String = chars[comma + 1..].iter().collect();
            format!("{head}. {}", tail.trim())
        }
        _ => {
            let head: String = chars[..TRUNCATED_CHARS].iter().collect();
            format!("{head}{ELLIPSIS}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use rand::rngs::StdRng;
    use rand::{RngCore, SeedableRng};

    /// Every probabilistic branch fires; every choice picks index 0.
    fn always() -> StepRng {
        StepRng::new(0, 0)
    }

    /// Every probabilistic branch is skipped; uniform choices pick the last
    /// candidate. Three quarters of the range sits above every rate used here
    /// and is still accepted by `gen_range` for 3 or 4 candidates.
    struct Never;

    impl RngCore for Never {
        fn next_u32(&mut self) -> u32 {
            0xC000_0000
        }
        fn next_u64(&mut self) -> u64 {
            0xC000_0000_0000_0000
        }
        fn fill_bytes(&mut self, dest: &mut [u8]) {
            for chunk in dest.chunks_mut(8) {
                let bytes = self.next_u64().to_le_bytes();
                chunk.copy_from_slice(&bytes[..chunk.len()]);
            }
        }
        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
            self.fill_bytes(dest);
            Ok(())
        }
    }

    // ── Stage 1 ──────────────────────────────────────────────────────────

    #[test]
    fn test_imperfections_forced_replace_whole_words_only() {
        let out = add_imperfections("the bathe and the other to it's", &mut always());
        assert_eq!(out, "teh bathe adn teh other too its");
    }

    #[test]
    fn test_imperfections_are_case_sensitive() {
        let out = add_imperfections("The cat and THE dog", &mut always());
        assert_eq!(out, "The cat adn THE dog");
    }

    #[test]
    fn test_imperfections_skipped_leaves_text_unchanged() {
        let text = "the and to it's";
        assert_eq!(add_imperfections(text, &mut Never), text);
    }

    // ── Stage 2 ──────────────────────────────────────────────────────────

    #[test]
    fn test_texture_forced_branches() {
        let text = "However, the plan works. It is important to utilize tools in order to win. I am sure we do not quit";
        let out = add_human_texture(text, &mut always());
        assert_eq!(
            out,
            "you know, That said, that plan works. \
             you know, You should use tools to win. \
             you know, I'm sure we don't quit"
        );
    }

    #[test]
    fn test_contractions_apply_without_fillers() {
        let out = add_human_texture("I am here. We do not stop. It is not over", &mut Never);
        assert_eq!(out, "I'm here. We don't stop. It isn't over");
    }

    #[test]
    fn test_contractions_are_global() {
        let out = add_human_texture("do not run, do not walk", &mut Never);
        assert_eq!(out, "don't run, don't walk");
    }

    #[test]
    fn test_variation_without_fillers_picks_last_candidate() {
        let out = add_human_texture("However, the plan", &mut Never);
        assert_eq!(out, "Though, a plan");
    }

    #[test]
    fn test_each_match_picks_independently() {
        let text = vec!["the"; 40].join(" ");
        let mut rng = StdRng::seed_from_u64(11);
        let out = add_human_texture(&text, &mut rng);

        let words: std::collections::HashSet<&str> = out
            .split_whitespace()
            .filter(|w| matches!(*w, "that" | "the" | "a"))
            .collect();
        assert!(
            words.len() > 1,
            "40 matches should not all receive the same replacement: {out}"
        );
    }

    // ── Stage 3 ──────────────────────────────────────────────────────────

    #[test]
    fn test_long_sentence_without_early_comma_is_truncated() {
        let sentence = "a".repeat(200);
        let out = split_long_sentences(&sentence);
        assert_eq!(out, format!("{}{ELLIPSIS}", "a".repeat(90)));
    }

    #[test]
    fn test_long_sentence_splits_at_comma() {
        let head = "b".repeat(50);
        let tail = "c".repeat(149);
        let sentence = format!("{head},{tail}");
        assert_eq!(sentence.chars().count(), 200);

        let out = split_long_sentences(&sentence);
        assert_eq!(out, format!("{head}. {tail}"));
    }

    #[test]
    fn test_comma_too_early_falls_back_to_truncation() {
        let sentence = format!("{},{}", "d".repeat(20), "e".repeat(179));
        let out = split_long_sentences(&sentence);
        assert_eq!(out.chars().count(), TRUNCATED_CHARS + ELLIPSIS.len());
        assert!(out.ends_with(ELLIPSIS));
    }

    #[test]
    fn test_comma_after_search_limit_is_ignored() {
        let sentence = format!("{},{}", "f".repeat(81), "g".repeat(100));
        let out = split_long_sentences(&sentence);
        let kept: String = sentence.chars().take(TRUNCATED_CHARS).collect();
        assert_eq!(out, format!("{kept}{ELLIPSIS}"));
    }

    #[test]
    fn test_exactly_max_length_passes_through() {
        let sentence = "h".repeat(MAX_SENTENCE_CHARS);
        assert_eq!(split_long_sentences(&sentence), sentence);
    }

    #[test]
    fn test_segments_rejoin_with_single_space() {
        let out = split_long_sentences("One.   Two.\n\nThree");
        assert_eq!(out, "One. Two. Three");
    }

    #[test]
    fn test_only_long_segments_are_touched() {
        let long = "i".repeat(130);
        let text = format!("Short one. {long}. Short two.");
        let out = split_long_sentences(&text);
        assert_eq!(
            out,
            format!("Short one. {}{ELLIPSIS} Short two.", "i".repeat(90))
        );
    }

    // ── Whole pipeline ───────────────────────────────────────────────────

    #[test]
    fn test_pipeline_runs_typos_before_variation() {
        // Stage 1 turns "the" into "teh", so stage 2 has nothing to vary.
        let out = humanize("However the plan", &mut always());
        assert_eq!(out, "you know, That said teh plan");
    }

    #[test]
    fn test_pipeline_is_reproducible_with_fixed_seed() {
        let text = "However, the committee met. Moreover, it is clear that the budget \
                    is not final. It is important to utilize the reserve in order to \
                    cover the gap, and to keep the staff informed.";
        let a = humanize(text, &mut StdRng::seed_from_u64(42));
        let b = humanize(text, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_pipeline_varies_across_seeds() {
        let text = "the cat and the dog went to the park. the sun was out.";
        let outputs: std::collections::HashSet<String> = (0..50)
            .map(|seed| humanize(text, &mut StdRng::seed_from_u64(seed)))
            .collect();
        assert!(outputs.len() > 1);
    }

    #[test]
    fn test_stages_are_total() {
        let long_run_on = "word ".repeat(80);
        let inputs = [
            "",
            " ",
            ".",
            "....",
            ",,,,",
            "no punctuation at all",
            long_run_on.as_str(),
            "émoji 🎉 text. with, unicode…",
        ];
        let mut rng = StdRng::seed_from_u64(3);
        for input in inputs {
            let _ = add_imperfections(input, &mut rng);
            let _ = add_human_texture(input, &mut rng);
            let _ = split_long_sentences(input);
            let _ = humanize(input, &mut rng);
            let _ = humanize(input, &mut always());
        }
    }

    #[test]
    fn test_empty_input_has_defined_output() {
        assert_eq!(humanize("", &mut always()), "you know, ");
        assert_eq!(split_long_sentences(""), "");
    }
}
