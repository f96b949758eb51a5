use chrono::{Duration, TimeZone, Utc};
use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use vocab_core::{
    Catalog, Clock, Direction, EngineSettings, FixedClock, KeyValueStore, MemoryStore, Phase, RoundOutcome,
    Session, VocabularyCatalog, VocabularyItem,
};

fn catalog() -> Catalog {
    Catalog::new(vec![
        VocabularyItem::new("1", "suns", "hond").with_category("Animals"),
        VocabularyItem::new("2", "maize", "brood").with_category("Food"),
        VocabularyItem::new("3", "ūdens", "water").with_category("Food"),
    ])
}

#[test]
fn three_new_items_full_round() {
    let store = MemoryStore::new();
    let clock = Arc::new(FixedClock::new(Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap()));
    let mut session = Session::new(catalog(), &store, EngineSettings::default())
        .with_clock(Arc::clone(&clock))
        .with_rng(StdRng::seed_from_u64(17));

    assert_eq!(session.start(Direction::LatvianToDutch, 3, vec![]).unwrap(), Phase::InRound);

    let mut ids: Vec<String> = session.round_items().iter().map(|i| i.id.clone()).collect();
    ids.sort();
    assert_eq!(ids, vec!["1", "2", "3"]);

    // First item: right on the first try.
    let first = session.current_item().unwrap().clone();
    assert!(session.submit_answer(&first.dutch).unwrap().is_correct);
    assert_eq!(session.score(), 1);
    assert_eq!(session.history().len(), 1);
    assert!(session.history()[0].is_correct_on_first_try);
    assert_eq!(session.progress().item_progress(&first.id).unwrap().mastery_level, 1);
    session.advance().unwrap();

    // Second item: wrong twice.
    let second = session.current_item().unwrap().clone();
    assert!(!session.submit_answer("xxxxxxxxxx").unwrap().is_correct);
    assert!(!session.submit_answer("yyyyyyyyyy").unwrap().is_correct);
    let entry = &session.history()[1];
    assert_eq!(entry.user_attempts.len(), 2);
    assert!(!entry.is_correct_on_second_try);
    assert_eq!(entry.outcome(), RoundOutcome::Missed);
    assert_eq!(session.progress().item_progress(&second.id).unwrap().mastery_level, 0);
    session.advance().unwrap();

    // Third item: wrong, then right.
    let third = session.current_item().unwrap().clone();
    session.submit_answer("zzzzzzzzzz").unwrap();
    assert!(session.submit_answer(&third.dutch).unwrap().is_correct);
    assert_eq!(session.advance().unwrap(), Phase::RoundOverview);

    let summary = session.summary().unwrap();
    assert_eq!(summary.score, 1);
    assert_eq!(summary.total, 3);
    assert_eq!(summary.accuracy_percent, 33);
    assert_eq!(summary.perfect, 1);
    assert_eq!(summary.second_try, 1);
    assert_eq!(summary.missed, 1);

    // Only the first item rests; the other two come back in the next round.
    clock.advance(Duration::minutes(5));
    let due = session.progress().get_due_items(
        catalog().base_vocabulary(),
        10,
        &mut StdRng::seed_from_u64(1),
        clock.now(),
    );
    let mut due_ids: Vec<String> = due.iter().map(|i| i.id.clone()).collect();
    due_ids.sort();
    let mut expected = vec![second.id, third.id];
    expected.sort();
    assert_eq!(due_ids, expected);
}

#[test]
fn streak_follows_study_days() {
    let store = MemoryStore::new();
    let clock = Arc::new(FixedClock::new(Utc.with_ymd_and_hms(2024, 6, 1, 22, 0, 0).unwrap()));
    let settings = EngineSettings::default();

    let mut session = Session::new(catalog(), &store, settings.clone()).with_clock(Arc::clone(&clock));
    session.start(Direction::LatvianToDutch, 3, vec![]).unwrap();
    assert_eq!(session.streak(), 1);
    session.exit();

    clock.advance(Duration::hours(4));
    session.start(Direction::LatvianToDutch, 3, vec![]).unwrap();
    assert_eq!(session.streak(), 2);
    session.exit();

    clock.advance(Duration::days(2));
    session.start(Direction::LatvianToDutch, 3, vec![]).unwrap();
    assert_eq!(session.streak(), 1);

    let reloaded = Session::new(catalog(), &store, settings);
    assert_eq!(reloaded.streak(), 1);
    assert!(store.get(vocab_core::keys::USER_PROGRESS).unwrap().is_some());
}
