//! Session runner - phase state machine over a [`Session`].

use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::quiz::{self, QuizType};
use crate::queue::LevelTarget;
use crate::scheduler::{AnswerEvent, LevelTransition};
use crate::vocab::VocabItem;

use super::distractors::{answer_text, draw_distractors};
use super::{ResultRecord, Session, SessionError};

/// Runner phase. Transitions are strictly
/// `Priming -> Advancing -> Presenting -> Feedback -> Advancing | Complete`;
/// every operation checks the phase it is valid in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Pre-session preview of the queue
    Priming,
    /// A question is on screen, the clock is running
    Presenting,
    /// The answer was judged, feedback is on screen
    Feedback,
    /// Between questions, ready to present the next one
    Advancing,
    /// The queue is exhausted
    Complete,
}

/// One rendered question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    /// Item under quiz
    pub item_id: i64,
    /// Presentation format
    pub quiz_type: QuizType,
    /// True when fill-in degraded to standard content
    pub fell_back: bool,
    /// Prompt text (the term, the meaning, or a blanked example)
    pub prompt: String,
    /// Shuffled answer choices
    pub choices: Vec<String>,
    /// Index of the correct choice
    pub answer_index: usize,
}

/// Drives one [`Session`] through the present/answer/advance protocol.
///
/// The runner never reads a clock; the host passes `now` into
/// [`SessionRunner::present`] and [`SessionRunner::submit`] and owns the
/// question timeout (a timeout is just `submit(None)`).
pub struct SessionRunner {
    session: Session,
    phase: Phase,
    current: Option<Question>,
    presented_at: Option<DateTime<Utc>>,
    hint_used: bool,
    in_flight: bool,
}

impl SessionRunner {
    /// Wrap a session, fresh or resumed mid-run.
    pub fn new(session: Session) -> Self {
        let phase = if session.index >= session.queue.len() {
            Phase::Complete
        } else if session.config.priming && session.index == 0 && session.results.is_empty() {
            Phase::Priming
        } else {
            Phase::Advancing
        };
        Self {
            session,
            phase,
            current: None,
            presented_at: None,
            hint_used: false,
            in_flight: false,
        }
    }

    /// Leave the priming preview and start quizzing.
    pub fn finish_priming(&mut self) -> Result<(), SessionError> {
        if self.phase != Phase::Priming {
            return Err(SessionError::Phase(self.phase));
        }
        self.phase = Phase::Advancing;
        Ok(())
    }

    /// Render the question at the cursor and start its clock.
    ///
    /// `corpus` supplies the distractor pool, normally the full live item
    /// collection.
    pub fn present(
        &mut self,
        corpus: &[VocabItem],
        rng: &mut impl Rng,
        now: DateTime<Utc>,
    ) -> Result<&Question, SessionError> {
        if self.phase != Phase::Advancing {
            return Err(SessionError::Phase(self.phase));
        }

        // The cursor is in range whenever the phase is Advancing.
        let item = &self.session.queue[self.session.index];

        let effective_level = match self.session.config.target_level {
            LevelTarget::Level(lv) => lv,
            LevelTarget::Automatic => item.stats.level,
        };
        let selection = quiz::select_type(self.session.config.method, effective_level, item);

        let prompt = match selection.quiz_type {
            QuizType::Standard | QuizType::Masked => item.en.clone(),
            QuizType::Reverse => item.ja.clone(),
            QuizType::FillIn => quiz::blank_example(item).unwrap_or_else(|| item.en.clone()),
        };

        let correct = answer_text(item, selection.quiz_type).to_string();
        let mut choices = draw_distractors(corpus, selection.quiz_type, &correct, rng)?;
        choices.push(correct.clone());
        choices.shuffle(rng);
        // The correct text is unique within the choice set.
        let answer_index = choices.iter().position(|c| *c == correct).unwrap_or(0);

        let question = Question {
            item_id: item.id,
            quiz_type: selection.quiz_type,
            fell_back: selection.fell_back,
            prompt,
            choices,
            answer_index,
        };

        self.presented_at = Some(now);
        self.hint_used = false;
        self.in_flight = false;
        self.phase = Phase::Presenting;
        Ok(self.current.insert(question))
    }

    /// Reveal the masked term as a hint. Only meaningful while a masked
    /// question is on screen; returns the term, or `None` elsewhere.
    pub fn reveal_hint(&mut self) -> Option<&str> {
        if self.phase != Phase::Presenting {
            return None;
        }
        let question = self.current.as_ref()?;
        if question.quiz_type != QuizType::Masked {
            return None;
        }
        self.hint_used = true;
        Some(&question.prompt)
    }

    /// Submit an answer (`None` means the question timed out).
    ///
    /// Returns the event to feed the scheduler, or `None` when no
    /// question is accepting answers. The in-flight guard makes a second
    /// submission for the same question a no-op.
    pub fn submit(&mut self, choice: Option<usize>, now: DateTime<Utc>) -> Option<AnswerEvent> {
        if self.phase != Phase::Presenting || self.in_flight {
            return None;
        }
        let question = self.current.as_ref()?;
        let presented_at = self.presented_at?;

        self.in_flight = true;
        self.phase = Phase::Feedback;

        let correct = choice == Some(question.answer_index);
        let elapsed_ms = (now - presented_at).num_milliseconds().max(0) as u64;

        Some(AnswerEvent {
            item_id: question.item_id,
            correct,
            elapsed_ms,
            hint_used: self.hint_used,
        })
    }

    /// Record the scheduler's verdict for the answered question.
    pub fn record(&mut self, transition: LevelTransition, correct: bool, points: f64) {
        self.session.results.push(ResultRecord {
            transition,
            correct,
            hint_used: self.hint_used,
        });
        self.session.points_gained += points;
    }

    /// Move past the feedback screen to the next question, or complete.
    pub fn advance(&mut self) -> Result<Phase, SessionError> {
        if self.phase != Phase::Feedback {
            return Err(SessionError::Phase(self.phase));
        }
        self.session.index += 1;
        self.current = None;
        self.presented_at = None;
        self.hint_used = false;
        self.in_flight = false;
        self.phase = if self.session.index >= self.session.queue.len() {
            Phase::Complete
        } else {
            Phase::Advancing
        };
        Ok(self.phase)
    }

    /// Mark the session as written to history.
    pub fn mark_saved(&mut self) {
        self.session.saved = true;
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The question on screen, if any.
    pub fn current_question(&self) -> Option<&Question> {
        self.current.as_ref()
    }

    /// The underlying session state.
    pub fn session(&self) -> &Session {
        &self.session
    }
}

// ============================================================================
// TESTS
// ============================================================================
