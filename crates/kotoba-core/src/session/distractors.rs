//! Distractor drawing for multiple-choice questions.
//!
//! Each question shows [`CHOICE_COUNT`] choices: the correct answer plus
//! distinct wrong answers sampled uniformly from the corpus. Sampling
//! rejects duplicates and the correct answer itself, so a corpus with
//! fewer than `CHOICE_COUNT` distinct answer texts cannot build a
//! choice set.

use rand::Rng;

use crate::quiz::QuizType;
use crate::vocab::VocabItem;

use super::SessionError;

/// Choices per question: one correct answer plus three distractors.
pub const CHOICE_COUNT: usize = 4;

/// The answer text an item contributes for a given presentation format.
/// Recognition formats answer in Japanese, production formats in
/// English.
pub fn answer_text(item: &VocabItem, quiz_type: QuizType) -> &str {
    match quiz_type {
        QuizType::Standard | QuizType::Masked => &item.ja,
        QuizType::Reverse | QuizType::FillIn => &item.en,
    }
}

/// Draw `CHOICE_COUNT - 1` distinct wrong answers from `corpus`.
///
/// The pool is checked up front: with fewer than `CHOICE_COUNT - 1`
/// distinct non-correct answer texts the draw fails with
/// [`SessionError::CorpusTooSmall`] instead of looping forever.
pub fn draw_distractors(
    corpus: &[VocabItem],
    quiz_type: QuizType,
    correct: &str,
    rng: &mut impl Rng,
) -> Result<Vec<String>, SessionError> {
    let needed = CHOICE_COUNT - 1;

    let mut pool: Vec<&str> = corpus
        .iter()
        .map(|w| answer_text(w, quiz_type))
        .filter(|text| !text.is_empty() && *text != correct)
        .collect();
    pool.sort_unstable();
    pool.dedup();

    if pool.len() < needed {
        return Err(SessionError::CorpusTooSmall);
    }

    let mut picked: Vec<String> = Vec::with_capacity(needed);
    while picked.len() < needed {
        let candidate = pool[rng.gen_range(0..pool.len())];
        if picked.iter().any(|p| p == candidate) {
            continue;
        }
        picked.push(candidate.to_string());
    }
    Ok(picked)
}

// ============================================================================
// TESTS
// ============================================================================
