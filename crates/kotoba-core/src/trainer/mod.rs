//! Trainer module - Application facade
//!
//! A [`Trainer`] owns the full application state for one dataset: the
//! live item collection, engagement and history state, preferences, and
//! the in-progress session. Every answer persists synchronously before
//! control returns, so killing the process never loses a recorded
//! answer.
//!
//! Durable state goes to the persistent [`KvStore`]; the in-progress
//! session snapshot and last-used config go to a separate ephemeral
//! store whose lifetime the host chooses.

use chrono::{DateTime, Utc};
use rand::Rng;

use crate::affinity::AffinityState;
use crate::corpus::{self, CorpusError};
use crate::history::{DailyCounter, HistoryEntry, HistoryLog};
use crate::queue::{self, QueueError, SessionConfig};
use crate::scheduler::{self, LevelTransition};
use crate::session::{Phase, Question, Session, SessionError, SessionRunner};
use crate::store::{self, ItemStore, KvStore, StoreError};
use crate::vocab::LEVEL_BUCKETS;

/// Trainer error
#[derive(Debug, thiserror::Error)]
pub enum TrainerError {
    /// Persistence failure
    #[error(transparent)]
    Store(#[from] StoreError),
    /// Queue building failure
    #[error(transparent)]
    Queue(#[from] QueueError),
    /// Session protocol violation
    #[error(transparent)]
    Session(#[from] SessionError),
    /// Corpus ingestion failure
    #[error(transparent)]
    Corpus(#[from] CorpusError),
    /// No session is active (or none can be resumed)
    #[error("no active session")]
    NoSession,
    /// The dataset has neither persisted items nor a seed corpus
    #[error("no corpus available for dataset namespace '{0}'")]
    NoCorpus(String),
}

/// Trainer result type
pub type Result<T> = std::result::Result<T, TrainerError>;

/// Application facade over one dataset.
pub struct Trainer {
    persistent: Box<dyn KvStore>,
    ephemeral: Box<dyn KvStore>,
    items: ItemStore,
    affinity: AffinityState,
    history: HistoryLog,
    counter: DailyCounter,
    prefs: SessionConfig,
    runner: Option<SessionRunner>,
}

impl Trainer {
    /// Open a trainer for the dataset persisted under `namespace`.
    ///
    /// When nothing is persisted there yet, `seed_csv` is ingested and
    /// saved as the initial collection. Affinity decay for elapsed
    /// inactive days is applied once, here.
    pub fn open(
        mut persistent: Box<dyn KvStore>,
        ephemeral: Box<dyn KvStore>,
        namespace: &str,
        seed_csv: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<Self> {
        let today = now.date_naive();

        let items = match ItemStore::load(&*persistent, namespace)? {
            Some(items) => items,
            None => {
                let Some(csv) = seed_csv else {
                    return Err(TrainerError::NoCorpus(namespace.to_string()));
                };
                let parsed = corpus::parse_corpus(csv)?;
                if parsed.is_empty() {
                    return Err(TrainerError::NoCorpus(namespace.to_string()));
                }
                let store = ItemStore::seed(namespace, parsed);
                store.save(&mut *persistent)?;
                store
            }
        };

        let mut affinity =
            store::load_affinity(&*persistent)?.unwrap_or_else(|| AffinityState::new(today));
        if affinity.apply_decay(today) > 0.0 {
            store::save_affinity(&mut *persistent, &affinity)?;
        }

        let history = store::load_history(&*persistent)?;
        let counter = store::load_counter(&*persistent)?;
        let prefs = store::load_prefs(&*persistent)?;

        tracing::info!(
            namespace,
            items = items.len(),
            points = affinity.points,
            "trainer opened"
        );

        Ok(Self {
            persistent,
            ephemeral,
            items,
            affinity,
            history,
            counter,
            prefs,
            runner: None,
        })
    }

    // ========================================================================
    // SESSION LIFECYCLE
    // ========================================================================

    /// Start a new session, replacing any in-progress one.
    pub fn start_session(
        &mut self,
        config: SessionConfig,
        now: DateTime<Utc>,
        rng: &mut impl Rng,
    ) -> Result<()> {
        let queue = queue::build_queue(self.items.items(), &config, now, rng)?;
        store::save_last_config(&mut *self.ephemeral, &config)?;

        let session = Session::new(queue, config);
        store::save_session(&mut *self.ephemeral, &session)?;
        tracing::info!(session = %session.id, questions = session.queue.len(), "session started");

        self.runner = Some(SessionRunner::new(session));
        Ok(())
    }

    /// Resume the session persisted in the ephemeral store, typically
    /// after a process restart mid-session.
    pub fn resume_session(&mut self) -> Result<()> {
        let session = store::load_session(&*self.ephemeral)?;
        tracing::info!(session = %session.id, index = session.index, "session resumed");
        self.runner = Some(SessionRunner::new(session));
        Ok(())
    }

    /// Start a fresh session with the most recently used config.
    pub fn repeat_session(&mut self, now: DateTime<Utc>, rng: &mut impl Rng) -> Result<()> {
        let config = store::load_last_config(&*self.ephemeral)?.ok_or(TrainerError::NoSession)?;
        self.start_session(config, now, rng)
    }

    /// Drop the in-progress session, live and persisted.
    pub fn clear_session(&mut self) -> Result<()> {
        self.runner = None;
        store::clear_session(&mut *self.ephemeral)?;
        Ok(())
    }

    /// Leave the priming preview and start quizzing.
    pub fn finish_priming(&mut self) -> Result<()> {
        let runner = self.runner.as_mut().ok_or(TrainerError::NoSession)?;
        runner.finish_priming()?;
        Ok(())
    }

    // ========================================================================
    // QUESTION FLOW
    // ========================================================================

    /// Present the next question, starting its clock at `now`.
    pub fn present_next(&mut self, rng: &mut impl Rng, now: DateTime<Utc>) -> Result<Question> {
        let runner = self.runner.as_mut().ok_or(TrainerError::NoSession)?;
        let question = runner.present(self.items.items(), rng, now)?;
        Ok(question.clone())
    }

    /// Reveal the masked term as a hint, when applicable.
    pub fn reveal_hint(&mut self) -> Option<String> {
        let runner = self.runner.as_mut()?;
        runner.reveal_hint().map(str::to_string)
    }

    /// Answer the question on screen (`None` means it timed out).
    ///
    /// Schedules the live item, awards engagement points, and persists
    /// every touched state blob before returning. `Ok(None)` means no
    /// question was accepting answers (wrong phase, or a duplicate
    /// submission).
    pub fn answer(
        &mut self,
        choice: Option<usize>,
        now: DateTime<Utc>,
    ) -> Result<Option<LevelTransition>> {
        let runner = self.runner.as_mut().ok_or(TrainerError::NoSession)?;
        let timeout_ms = runner.session().config.timeout_ms;

        let Some(event) = runner.submit(choice, now) else {
            return Ok(None);
        };

        let item = self.items.get_mut(event.item_id).ok_or_else(|| {
            StoreError::Corrupt(format!("answered item {} not in collection", event.item_id))
        })?;
        let transition = scheduler::schedule(item, &event, timeout_ms, now);

        let today = now.date_naive();
        let points = if event.correct {
            if transition.quality.is_fast() {
                1.5
            } else {
                1.0
            }
        } else {
            0.0
        };
        if points > 0.0 {
            self.affinity.add_points(points, today);
        }
        self.counter.increment(today);
        runner.record(transition, event.correct, points);

        self.items.save(&mut *self.persistent)?;
        store::save_affinity(&mut *self.persistent, &self.affinity)?;
        store::save_counter(&mut *self.persistent, &self.counter)?;
        store::save_session(&mut *self.ephemeral, runner.session())?;

        tracing::debug!(
            item = event.item_id,
            correct = event.correct,
            quality = %transition.quality,
            level = transition.new_level,
            "answer recorded"
        );
        Ok(Some(transition))
    }

    /// Move past the feedback screen. Returns the new phase.
    pub fn advance(&mut self) -> Result<Phase> {
        let runner = self.runner.as_mut().ok_or(TrainerError::NoSession)?;
        let phase = runner.advance()?;
        store::save_session(&mut *self.ephemeral, runner.session())?;
        Ok(phase)
    }

    /// Write the completed session to history, once.
    ///
    /// Valid only in the `Complete` phase. `Ok(None)` means this session
    /// was already saved.
    pub fn finish_session(&mut self, now: DateTime<Utc>) -> Result<Option<HistoryEntry>> {
        let runner = self.runner.as_mut().ok_or(TrainerError::NoSession)?;
        if runner.phase() != Phase::Complete {
            return Err(SessionError::Phase(runner.phase()).into());
        }
        if runner.session().saved {
            return Ok(None);
        }
        runner.mark_saved();

        let session = runner.session();
        let entry = HistoryEntry {
            date: now.date_naive(),
            items: session.results.len() as u32,
            correct: session.correct_count(),
            points_gained: session.points_gained,
            level_distribution: self.items.level_distribution(),
            total_points: self.affinity.points,
        };
        self.history.record(entry.clone());

        store::save_history(&mut *self.persistent, &self.history)?;
        store::clear_session(&mut *self.ephemeral)?;

        tracing::info!(
            session = %session.id,
            items = entry.items,
            correct = entry.correct,
            "session finished"
        );
        Ok(Some(entry))
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    /// The live item collection.
    pub fn items(&self) -> &ItemStore {
        &self.items
    }

    /// Engagement state.
    pub fn affinity(&self) -> &AffinityState {
        &self.affinity
    }

    /// Daily history log.
    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    /// Answers recorded today.
    pub fn answers_today(&self, now: DateTime<Utc>) -> u32 {
        self.counter.today_count(now.date_naive())
    }

    /// Stored preferences.
    pub fn preferences(&self) -> &SessionConfig {
        &self.prefs
    }

    /// Replace and persist preferences.
    pub fn set_preferences(&mut self, prefs: SessionConfig) -> Result<()> {
        self.prefs = prefs;
        store::save_prefs(&mut *self.persistent, &self.prefs)?;
        Ok(())
    }

    /// Phase of the in-progress session, if any.
    pub fn phase(&self) -> Option<Phase> {
        self.runner.as_ref().map(|r| r.phase())
    }

    /// The question currently on screen, if any.
    pub fn current_question(&self) -> Option<&Question> {
        self.runner.as_ref()?.current_question()
    }

    /// Count of items per mastery level.
    pub fn level_distribution(&self) -> [u32; LEVEL_BUCKETS] {
        self.items.level_distribution()
    }
}

// ============================================================================
// TESTS
// ============================================================================
