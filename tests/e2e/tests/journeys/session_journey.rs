//! Complete session journeys: start, quiz, finish, and the history
//! bookkeeping around them.

use chrono::{Duration, Utc};
use kotoba_core::{Phase, QuizMethod, SessionConfig};
use kotoba_e2e_tests::harness::TrainerHarness;

#[test]
fn full_session_writes_one_history_entry() {
    let mut h = TrainerHarness::new();
    let mut rng = rand::thread_rng();
    let now = Utc::now();

    let config = SessionConfig { limit: 5, ..Default::default() };
    h.trainer.start_session(config, now, &mut rng).unwrap();

    let mut answered = 0;
    loop {
        let question = h.trainer.present_next(&mut rng, now).unwrap();
        // Instant correct answers grade as excellent and earn the fast bonus.
        let transition = h
            .trainer
            .answer(Some(question.answer_index), now)
            .unwrap()
            .unwrap();
        assert!(transition.new_level > transition.old_level);
        answered += 1;
        if h.trainer.advance().unwrap() == Phase::Complete {
            break;
        }
    }
    assert_eq!(answered, 5);

    let entry = h.trainer.finish_session(now).unwrap().unwrap();
    assert_eq!(entry.items, 5);
    assert_eq!(entry.correct, 5);
    assert_eq!(entry.points_gained, 7.5);
    assert_eq!(h.trainer.affinity().points, 7.5);
    assert_eq!(h.trainer.history().len(), 1);

    // Finishing twice never double-counts.
    assert!(h.trainer.finish_session(now).unwrap().is_none());
    assert_eq!(h.trainer.history().len(), 1);
}

#[test]
fn same_day_sessions_merge_in_history() {
    let mut h = TrainerHarness::new();
    let mut rng = rand::thread_rng();
    let now = Utc::now();
    let config = SessionConfig { limit: 2, ..Default::default() };

    for _ in 0..2 {
        h.trainer.start_session(config, now, &mut rng).unwrap();
        loop {
            let question = h.trainer.present_next(&mut rng, now).unwrap();
            h.trainer.answer(Some(question.answer_index), now).unwrap();
            if h.trainer.advance().unwrap() == Phase::Complete {
                break;
            }
        }
        h.trainer.finish_session(now).unwrap().unwrap();
    }

    assert_eq!(h.trainer.history().len(), 1);
    let merged = &h.trainer.history().entries()[0];
    assert_eq!(merged.items, 4);
    assert_eq!(merged.correct, 4);
}

#[test]
fn wrong_answers_and_timeouts_demote() {
    let mut h = TrainerHarness::new();
    let mut rng = rand::thread_rng();
    let now = Utc::now();

    let config = SessionConfig { limit: 2, ..Default::default() };
    h.trainer.start_session(config, now, &mut rng).unwrap();

    // Wrong choice.
    let question = h.trainer.present_next(&mut rng, now).unwrap();
    let wrong = (question.answer_index + 1) % question.choices.len();
    let transition = h.trainer.answer(Some(wrong), now).unwrap().unwrap();
    assert_eq!(transition.new_level, 0);
    assert_eq!(h.trainer.advance().unwrap(), Phase::Advancing);

    // Timeout: no choice at all.
    h.trainer.present_next(&mut rng, now).unwrap();
    let timeout_at = now + Duration::milliseconds(10_000);
    let transition = h.trainer.answer(None, timeout_at).unwrap().unwrap();
    assert_eq!(transition.new_level, 0);
    assert_eq!(h.trainer.advance().unwrap(), Phase::Complete);

    let entry = h.trainer.finish_session(now).unwrap().unwrap();
    assert_eq!(entry.correct, 0);
    assert_eq!(entry.points_gained, 0.0);
    assert_eq!(h.trainer.affinity().points, 0.0);
}

#[test]
fn slow_correct_answers_skip_the_fast_bonus() {
    let mut h = TrainerHarness::new();
    let mut rng = rand::thread_rng();
    let now = Utc::now();

    let config = SessionConfig { limit: 1, ..Default::default() };
    h.trainer.start_session(config, now, &mut rng).unwrap();

    let question = h.trainer.present_next(&mut rng, now).unwrap();
    // 8s of a 10s timeout: correct but slow.
    let answered_at = now + Duration::milliseconds(8_000);
    let transition = h
        .trainer
        .answer(Some(question.answer_index), answered_at)
        .unwrap()
        .unwrap();
    assert_eq!(transition.new_level, 1);
    assert_eq!(h.trainer.affinity().points, 1.0);
}

#[test]
fn priming_preview_gates_the_first_question() {
    let mut h = TrainerHarness::new();
    let mut rng = rand::thread_rng();
    let now = Utc::now();

    let config = SessionConfig { priming: true, limit: 2, ..Default::default() };
    h.trainer.start_session(config, now, &mut rng).unwrap();
    assert_eq!(h.trainer.phase(), Some(Phase::Priming));

    assert!(h.trainer.present_next(&mut rng, now).is_err());
    h.trainer.finish_priming().unwrap();
    assert!(h.trainer.present_next(&mut rng, now).is_ok());
}

#[test]
fn masked_sessions_record_hint_usage() {
    let mut h = TrainerHarness::new();
    let mut rng = rand::thread_rng();
    let now = Utc::now();

    let config = SessionConfig { method: QuizMethod::Masked, limit: 1, ..Default::default() };
    h.trainer.start_session(config, now, &mut rng).unwrap();

    let question = h.trainer.present_next(&mut rng, now).unwrap();
    let revealed = h.trainer.reveal_hint().unwrap();
    assert_eq!(revealed, question.prompt);

    // The hint never changes the scheduling outcome.
    let transition = h
        .trainer
        .answer(Some(question.answer_index), now)
        .unwrap()
        .unwrap();
    assert!(transition.new_level > 0);
}

#[test]
fn repeat_session_reuses_the_last_config() {
    let mut h = TrainerHarness::new();
    let mut rng = rand::thread_rng();
    let now = Utc::now();

    let config = SessionConfig { limit: 3, ..Default::default() };
    h.trainer.start_session(config, now, &mut rng).unwrap();
    h.trainer.clear_session().unwrap();

    h.trainer.repeat_session(now, &mut rng).unwrap();
    assert_eq!(h.trainer.phase(), Some(Phase::Advancing));
}
