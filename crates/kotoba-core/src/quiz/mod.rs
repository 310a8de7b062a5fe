//! Quiz module - Presentation-format selection
//!
//! Derives one of four presentation formats from the effective mastery
//! level, or honors an explicit per-session override. Pure and
//! deterministic: identical inputs always select the same format.
//!
//! Fill-in (cloze) questions additionally require an example sentence
//! containing the target term as a case-insensitive whole word; when
//! that is missing the selection degrades to standard content and the
//! fallback is reported to the caller.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::vocab::VocabItem;

/// Placeholder inserted for the target word in cloze questions.
pub const CLOZE_BLANK: &str = "_______";

// ============================================================================
// QUIZ TYPE
// ============================================================================

/// Presentation format for a quiz question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum QuizType {
    /// Recognition: English prompt, Japanese choices
    #[default]
    Standard,
    /// Audio-only recall: the English prompt is masked, with an optional
    /// reveal hint
    Masked,
    /// Production: Japanese prompt, English choices
    Reverse,
    /// Cloze: example sentence with the term blanked, English choices
    FillIn,
}

impl QuizType {
    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            QuizType::Standard => "standard",
            QuizType::Masked => "masked",
            QuizType::Reverse => "reverse",
            QuizType::FillIn => "fill-in",
        }
    }
}

impl std::fmt::Display for QuizType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for QuizType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "standard" => Ok(QuizType::Standard),
            "masked" => Ok(QuizType::Masked),
            "reverse" => Ok(QuizType::Reverse),
            "fill-in" | "fillin" => Ok(QuizType::FillIn),
            _ => Err(format!("Unknown quiz type: {}", s)),
        }
    }
}

// ============================================================================
// METHOD OVERRIDE
// ============================================================================

/// Session-level presentation-format setting. `Automatic` derives the
/// format from the effective level; anything else wins unconditionally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum QuizMethod {
    /// Derive the format from the effective mastery level
    #[default]
    Automatic,
    /// Force standard recognition questions
    Standard,
    /// Force masked recall questions
    Masked,
    /// Force reverse (production) questions
    Reverse,
    /// Force fill-in (cloze) questions
    FillIn,
}

impl QuizMethod {
    /// The forced format, if this method is not automatic.
    pub fn forced(self) -> Option<QuizType> {
        match self {
            QuizMethod::Automatic => None,
            QuizMethod::Standard => Some(QuizType::Standard),
            QuizMethod::Masked => Some(QuizType::Masked),
            QuizMethod::Reverse => Some(QuizType::Reverse),
            QuizMethod::FillIn => Some(QuizType::FillIn),
        }
    }
}

// ============================================================================
// SELECTION
// ============================================================================

/// Outcome of quiz-type selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeSelection {
    /// The format to present
    pub quiz_type: QuizType,
    /// True when fill-in was selected but the item lacks a usable
    /// example, so the content degraded to standard
    pub fell_back: bool,
}

/// Select the presentation format for one question.
///
/// `effective_level` is either the session's forced target level or the
/// item's level as captured in the session queue.
pub fn select_type(method: QuizMethod, effective_level: u8, item: &VocabItem) -> TypeSelection {
    let wanted = method.forced().unwrap_or(match effective_level {
        lv if lv >= 4 => QuizType::FillIn,
        3 => QuizType::Reverse,
        2 => QuizType::Masked,
        _ => QuizType::Standard,
    });

    if wanted == QuizType::FillIn && !supports_fill_in(item) {
        TypeSelection {
            quiz_type: QuizType::Standard,
            fell_back: true,
        }
    } else {
        TypeSelection {
            quiz_type: wanted,
            fell_back: false,
        }
    }
}

/// Whether the item's example sentence contains the English term as a
/// case-insensitive whole word, making it usable as a cloze prompt.
pub fn supports_fill_in(item: &VocabItem) -> bool {
    if item.ex.is_empty() || item.en.is_empty() {
        return false;
    }
    match whole_word_regex(&item.en) {
        Some(re) => re.is_match(&item.ex),
        None => false,
    }
}

/// The example sentence with every whole-word occurrence of the term
/// replaced by [`CLOZE_BLANK`], or `None` when fill-in is unsupported.
pub fn blank_example(item: &VocabItem) -> Option<String> {
    if item.ex.is_empty() || item.en.is_empty() {
        return None;
    }
    let re = whole_word_regex(&item.en)?;
    if !re.is_match(&item.ex) {
        return None;
    }
    Some(re.replace_all(&item.ex, CLOZE_BLANK).into_owned())
}

fn whole_word_regex(term: &str) -> Option<Regex> {
    Regex::new(&format!(r"(?i)\b{}\b", regex::escape(term))).ok()
}

// ============================================================================
// TESTS
// ============================================================================
