// Integration tests (native) for the `for-you` crate.
// These tests avoid wasm-specific functionality and exercise pure Rust logic so
// they can run under `cargo test` on the host.

use std::collections::HashSet;

use for_you::{
    COUNTDOWN_PERIOD_MS, GRADIENT_THEMES, LINGER_MS, SESSION_SECONDS, SPAWN_DEADLINE_MS,
    SPAWN_PERIOD_MS, THEME_PERIOD_MS, ThemeCycle, game_over_line, greeting_line,
    start_button_label,
};

#[test]
fn greeting_copy_reflects_last_score() {
    assert_eq!(greeting_line(0), "Click the button for a surprise!");
    assert_eq!(greeting_line(7), "You caught 7 hearts! You're amazing!");
    assert_eq!(start_button_label(0), "Click for a Game!");
    assert_eq!(start_button_label(1), "Play Again!");
    assert_eq!(game_over_line(0), "You caught 0 hearts!");
    assert_eq!(game_over_line(12), "You caught 12 hearts!");
}

#[test]
fn gradient_palette_is_wellformed() {
    assert_eq!(GRADIENT_THEMES.len(), 3);
    let mut classes = HashSet::new();
    for theme in GRADIENT_THEMES {
        assert!(
            classes.insert(theme.class),
            "duplicate theme class '{}'",
            theme.class
        );
        assert!(
            theme.background.starts_with("linear-gradient("),
            "theme '{}' background is not a gradient: {}",
            theme.class,
            theme.background
        );
    }
}

#[test]
fn theme_cycle_wraps_and_stays_in_range() {
    let mut cycle = ThemeCycle::new();
    assert_eq!(cycle.index(), 0);
    for _ in 0..GRADIENT_THEMES.len() {
        cycle.advance();
        assert!(cycle.index() < GRADIENT_THEMES.len());
    }
    // One full lap lands back on the initial theme.
    assert_eq!(cycle.index(), 0);
    for step in 1..=100 {
        cycle.advance();
        assert_eq!(cycle.index(), step % GRADIENT_THEMES.len());
    }
}

#[test]
fn timing_constants_are_consistent() {
    // The spawn window covers the whole countdown: the clock runs out exactly
    // when spawning stops.
    assert_eq!(SESSION_SECONDS as u32 * COUNTDOWN_PERIOD_MS, SPAWN_DEADLINE_MS);
    assert!(SPAWN_PERIOD_MS < SPAWN_DEADLINE_MS);
    assert!(LINGER_MS > 0);
    assert!(THEME_PERIOD_MS > 0);
}
