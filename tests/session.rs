// Native tests for the game-engine invariants: reset, countdown floor, score
// monotonicity, collection idempotence, spawn bounds and id uniqueness.

use std::collections::HashSet;

use for_you::{
    HEART_FALL_MAX_SECS, HEART_FALL_MIN_SECS, HEART_LEFT_MAX_PCT, HEART_LEFT_MIN_PCT,
    SESSION_SECONDS, Session,
};

#[test]
fn fresh_session_is_reset() {
    // Any number of restarts lands on the same initial state.
    for seed in 0..10 {
        let session = Session::new(seed);
        assert_eq!(session.score(), 0);
        assert_eq!(session.time_left(), SESSION_SECONDS);
        assert!(session.hearts().is_empty());
    }
}

#[test]
fn spawned_hearts_are_in_bounds_with_unique_ids() {
    let mut session = Session::new(42);
    let mut seen = HashSet::new();
    for _ in 0..200 {
        let heart = session.spawn_heart();
        assert!(
            seen.insert(heart.id),
            "duplicate heart id {} in one session",
            heart.id
        );
        assert!(
            (HEART_LEFT_MIN_PCT..=HEART_LEFT_MAX_PCT).contains(&heart.left_pct),
            "left {} out of band",
            heart.left_pct
        );
        assert!(
            (HEART_FALL_MIN_SECS..=HEART_FALL_MAX_SECS).contains(&heart.fall_secs),
            "fall duration {} out of band",
            heart.fall_secs
        );
    }
    assert_eq!(session.hearts().len(), 200);
}

#[test]
fn countdown_reaches_zero_once_and_never_goes_negative() {
    let mut session = Session::new(7);
    let mut expiries = 0;
    for tick in 1..=25 {
        if session.tick_second() {
            expiries += 1;
            assert_eq!(tick, SESSION_SECONDS, "expired on the wrong tick");
        }
        assert!(session.time_left() >= 0, "clock went negative");
    }
    assert_eq!(expiries, 1, "game-over edge must fire exactly once");
    assert_eq!(session.time_left(), 0);
}

#[test]
fn score_increments_once_per_distinct_catch() {
    let mut session = Session::new(3);
    let ids: Vec<u64> = (0..5).map(|_| session.spawn_heart().id).collect();
    let mut expected = 0;
    for id in ids {
        assert!(session.catch_heart(id));
        expected += 1;
        assert_eq!(session.score(), expected);
    }
    assert!(session.hearts().is_empty());
}

#[test]
fn catching_the_same_heart_twice_scores_once() {
    let mut session = Session::new(9);
    let id = session.spawn_heart().id;
    assert!(session.catch_heart(id));
    assert!(!session.catch_heart(id));
    assert_eq!(session.score(), 1);
}

#[test]
fn catching_an_unknown_id_is_a_noop() {
    let mut session = Session::new(11);
    session.spawn_heart();
    assert!(!session.catch_heart(999));
    assert_eq!(session.score(), 0);
    assert_eq!(session.hearts().len(), 1);
}

#[test]
fn uncaught_hearts_persist_until_teardown() {
    // Hearts have no expiry: the countdown running out must not remove them.
    let mut session = Session::new(5);
    for _ in 0..8 {
        session.spawn_heart();
    }
    for _ in 0..SESSION_SECONDS {
        session.tick_second();
    }
    assert_eq!(session.time_left(), 0);
    assert_eq!(session.hearts().len(), 8);
}

#[test]
fn same_seed_reproduces_the_spawn_sequence() {
    let mut a = Session::new(1234);
    let mut b = Session::new(1234);
    for _ in 0..50 {
        let ha = a.spawn_heart();
        let hb = b.spawn_heart();
        assert_eq!(ha, hb);
    }
}

#[test]
fn full_session_scenario() {
    // 10 seconds of play: spawns every 500 ms interleaved with 1 s ticks,
    // one catch along the way.
    let mut session = Session::new(77);
    let mut expired = false;
    for half_second in 1..=20 {
        session.spawn_heart();
        if half_second % 2 == 0 && session.tick_second() {
            assert!(!expired, "expired twice");
            expired = true;
        }
    }
    assert!(expired);
    assert_eq!(session.time_left(), 0);
    assert_eq!(session.hearts().len(), 20);

    let id = session.hearts()[0].id;
    assert!(session.catch_heart(id));
    assert_eq!(session.score(), 1);
    assert!(session.hearts().iter().all(|h| h.id != id));
    assert_eq!(session.hearts().len(), 19);
}
