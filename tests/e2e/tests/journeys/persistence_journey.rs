//! Durability journeys: restarts mid-session, reopened state, and
//! legacy data upgrades.

use chrono::Utc;
use kotoba_core::{KvStore, Phase, SessionConfig, SqliteKv, Trainer};
use kotoba_e2e_tests::fixtures;
use kotoba_e2e_tests::harness::{TrainerHarness, NAMESPACE};

#[test]
fn answered_state_survives_a_restart() {
    let mut h = TrainerHarness::new();
    let mut rng = rand::thread_rng();
    let now = Utc::now();

    let config = SessionConfig { limit: 1, ..Default::default() };
    h.trainer.start_session(config, now, &mut rng).unwrap();
    let question = h.trainer.present_next(&mut rng, now).unwrap();
    let transition = h
        .trainer
        .answer(Some(question.answer_index), now)
        .unwrap()
        .unwrap();
    h.trainer.advance().unwrap();
    h.trainer.finish_session(now).unwrap().unwrap();

    h.reopen();

    // Item levels, affinity, and history all came back from disk; the
    // seed corpus was not re-applied over them.
    let live = h
        .trainer
        .items()
        .items()
        .iter()
        .find(|w| w.id == question.item_id)
        .unwrap();
    assert_eq!(live.stats.level, transition.new_level);
    assert_eq!(h.trainer.affinity().points, 1.5);
    assert_eq!(h.trainer.history().len(), 1);
    assert_eq!(h.trainer.answers_today(now), 1);
}

#[test]
fn interrupted_session_resumes_after_restart() {
    let mut h = TrainerHarness::new();
    let mut rng = rand::thread_rng();
    let now = Utc::now();

    let config = SessionConfig { limit: 3, ..Default::default() };
    h.trainer.start_session(config, now, &mut rng).unwrap();

    // Answer one question, then "crash".
    let question = h.trainer.present_next(&mut rng, now).unwrap();
    h.trainer.answer(Some(question.answer_index), now).unwrap();
    h.trainer.advance().unwrap();

    h.reopen();
    assert_eq!(h.trainer.phase(), None);

    h.trainer.resume_session().unwrap();
    assert_eq!(h.trainer.phase(), Some(Phase::Advancing));

    // The remaining two questions complete the session.
    let mut remaining = 0;
    loop {
        let question = h.trainer.present_next(&mut rng, now).unwrap();
        h.trainer.answer(Some(question.answer_index), now).unwrap();
        remaining += 1;
        if h.trainer.advance().unwrap() == Phase::Complete {
            break;
        }
    }
    assert_eq!(remaining, 2);

    let entry = h.trainer.finish_session(now).unwrap().unwrap();
    assert_eq!(entry.items, 3);

    // The snapshot is gone once the session is written to history.
    h.reopen();
    assert!(h.trainer.resume_session().is_err());
}

#[test]
fn preferences_survive_a_restart() {
    let mut h = TrainerHarness::new();
    let prefs = SessionConfig { limit: 25, timeout_ms: 15_000, ..Default::default() };
    h.trainer.set_preferences(prefs).unwrap();

    h.reopen();
    assert_eq!(h.trainer.preferences().limit, 25);
    assert_eq!(h.trainer.preferences().timeout_ms, 15_000);
}

#[test]
fn legacy_v1_collection_upgrades_on_open() {
    let dir = tempfile::tempdir().unwrap();
    let state_path = dir.path().join("kotoba.db");

    {
        let mut kv = SqliteKv::open(&state_path).unwrap();
        kv.set(NAMESPACE, fixtures::LEGACY_V1_ITEMS).unwrap();
    }

    // No seed corpus: the persisted legacy data must carry the open.
    let trainer = Trainer::open(
        Box::new(SqliteKv::open(&state_path).unwrap()),
        Box::new(SqliteKv::open(dir.path().join("session.db")).unwrap()),
        NAMESPACE,
        None,
        Utc::now(),
    )
    .unwrap();

    assert_eq!(trainer.items().len(), 5);
    let run = trainer.items().items().iter().find(|w| w.id == 1).unwrap();
    // Level 7 from the old multiplicative scheme clamps to the ceiling.
    assert_eq!(run.stats.level, 4);
    assert_eq!(run.stats.next_review, 1_700_000_000_000);
    let walk = trainer.items().items().iter().find(|w| w.id == 2).unwrap();
    assert_eq!(walk.stats.level, 2);
}

#[test]
fn upgraded_collection_is_rewritten_in_the_current_envelope() {
    let dir = tempfile::tempdir().unwrap();
    let state_path = dir.path().join("kotoba.db");

    {
        let mut kv = SqliteKv::open(&state_path).unwrap();
        kv.set(NAMESPACE, fixtures::LEGACY_V1_ITEMS).unwrap();
    }

    // Answering once forces a save, which writes the v2 envelope.
    let mut trainer = Trainer::open(
        Box::new(SqliteKv::open(&state_path).unwrap()),
        Box::new(SqliteKv::open(dir.path().join("session.db")).unwrap()),
        NAMESPACE,
        None,
        Utc::now(),
    )
    .unwrap();

    let mut rng = rand::thread_rng();
    let now = Utc::now();
    trainer.start_session(SessionConfig { limit: 1, ..Default::default() }, now, &mut rng).unwrap();
    let question = trainer.present_next(&mut rng, now).unwrap();
    trainer.answer(Some(question.answer_index), now).unwrap();
    drop(trainer);

    let kv = SqliteKv::open(&state_path).unwrap();
    let raw = kv.get(NAMESPACE).unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value["version"], 2);
    assert!(value["items"].is_array());
}
