//! DOM view layer: mounting, imperative render updates, input wiring, and the
//! owned timers that drive the background animator and the game engine.
//!
//! All mutable state lives in a thread-local cell; every timer and listener
//! callback re-enters through it and runs to completion before the next one
//! is dispatched (single-threaded browser event loop). Each scheduled task is
//! an owned `Interval`/`Timeout` handle whose `Drop` cancels the underlying
//! browser timer, so tearing a view or session down is just dropping its
//! handles — no orphaned callback can fire against stale state afterwards.

pub mod session;
pub mod theme;

use std::cell::RefCell;

use gloo_timers::callback::{Interval, Timeout};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, MouseEvent, window};

use crate::{game_over_line, greeting_line, start_button_label};
use session::{
    COUNTDOWN_PERIOD_MS, LINGER_MS, Phase, SPAWN_DEADLINE_MS, SPAWN_PERIOD_MS, Session,
};
use theme::{GRADIENT_THEMES, GradientTheme, THEME_PERIOD_MS, ThemeCycle};

// --- Element ids -------------------------------------------------------------

const ROOT_ID: &str = "fy-root";
const STYLE_ID: &str = "fy-style";
const FLOAT_LAYER_ID: &str = "fy-float-layer";
const HEART_LAYER_ID: &str = "fy-heart-layer";
const TIMER_ID: &str = "fy-timer";
const SCORE_ID: &str = "fy-score";
const GREETING_ID: &str = "fy-greeting";
const GREETING_LINE_ID: &str = "fy-greeting-line";
const START_BTN_ID: &str = "fy-start";
const OVERLAY_ID: &str = "fy-overlay";
const OVERLAY_LINE_ID: &str = "fy-overlay-line";
const CLOSE_BTN_ID: &str = "fy-close";

const HEART_ID_ATTR: &str = "data-heart-id";

/// Decorative hearts drifting behind the greeting.
const FLOAT_HEART_COUNT: usize = 20;

// Per-heart sampled values (left %, fall duration, float placement) go on the
// elements as inline style; everything shared lives here.
const BASE_CSS: &str = "\
.fy-hidden { display: none !important; }\n\
.fy-root { position: fixed; inset: 0; overflow: hidden; color: #fff; display: flex; flex-direction: column; align-items: center; justify-content: center; font-family: 'Segoe UI', sans-serif; transition: background 1s ease; }\n\
.fy-float-layer { position: fixed; inset: 0; pointer-events: none; }\n\
.fy-float { position: absolute; color: #fff; opacity: 0.2; animation-name: fy-float; animation-timing-function: linear; animation-iteration-count: infinite; }\n\
.fy-heart-layer { position: fixed; inset: 0; }\n\
.fy-heart { position: fixed; top: -100px; font-size: 3rem; background: none; border: none; cursor: pointer; animation-name: fy-fall; animation-timing-function: linear; animation-fill-mode: forwards; }\n\
.fy-hud { position: fixed; top: 16px; font-size: 1.5rem; font-weight: bold; z-index: 50; }\n\
.fy-hud-left { left: 16px; }\n\
.fy-hud-right { right: 16px; }\n\
.fy-greeting { position: relative; z-index: 10; text-align: center; max-width: 28rem; margin: 0 1rem; }\n\
.fy-title { font-size: 3.5rem; font-weight: bold; margin-bottom: 1.5rem; }\n\
.fy-pulse { display: inline-block; animation: fy-pulse 2s ease-in-out infinite; }\n\
.fy-greeting-line { font-size: 1.5rem; margin-bottom: 2rem; }\n\
.fy-start { padding: 1rem 2rem; font-size: 1.4rem; font-weight: bold; border: none; border-radius: 9999px; background: rgba(255,255,255,0.9); color: #db2777; cursor: pointer; box-shadow: 0 10px 24px rgba(0,0,0,0.2); transition: transform 0.3s ease; animation: fy-pulse 2s ease-in-out infinite; }\n\
.fy-start:hover { transform: scale(1.1); }\n\
.fy-overlay { position: fixed; inset: 0; display: flex; align-items: center; justify-content: center; background: rgba(0,0,0,0.5); z-index: 40; }\n\
.fy-card { background: #fff; color: #db2777; padding: 2rem; border-radius: 0.75rem; text-align: center; max-width: 20rem; margin: 0 1rem; }\n\
.fy-card h2 { font-size: 1.9rem; margin: 0 0 1rem; }\n\
.fy-card p { font-size: 1.25rem; margin: 0 0 1.5rem; }\n\
.fy-close { width: 100%; padding: 0.75rem 1.5rem; font-size: 1.1rem; border: none; border-radius: 9999px; background: #ec4899; color: #fff; cursor: pointer; }\n\
@keyframes fy-float { 0% { transform: translateY(100vh) rotate(0deg); } 100% { transform: translateY(-100px) rotate(360deg); } }\n\
@keyframes fy-fall { 0% { transform: translateY(-100px); } 100% { transform: translateY(100vh); } }\n\
@keyframes fy-pulse { 0%, 100% { opacity: 1; } 50% { opacity: 0.6; } }\n";

// --- State -------------------------------------------------------------------

/// Timers owned by one live game session. Dropping a handle cancels the
/// underlying browser timer, so teardown is "drop this struct".
#[allow(dead_code)]
struct SessionTimers {
    /// 500 ms heart spawner; dropped by the spawn deadline.
    spawn: Option<Interval>,
    /// 1 s countdown tick; guarded off at zero, cancelled at teardown.
    countdown: Interval,
    /// One-shot at 10 s: stops spawning and arms `finish`.
    spawn_deadline: Timeout,
    /// One-shot 2 s later: tears the playing view down.
    finish: Option<Timeout>,
}

impl SessionTimers {
    /// Arm the spawn and countdown intervals plus the one-shot spawn
    /// deadline. The linger deadline is armed later, when spawning stops.
    fn arm() -> Self {
        let spawn = Interval::new(SPAWN_PERIOD_MS, || {
            APP.with(|cell| {
                if let Some(app) = cell.borrow_mut().as_mut() {
                    spawn_tick(app);
                }
            });
        });
        let countdown = Interval::new(COUNTDOWN_PERIOD_MS, || {
            APP.with(|cell| {
                if let Some(app) = cell.borrow_mut().as_mut() {
                    countdown_tick(app);
                }
            });
        });
        let spawn_deadline = Timeout::new(SPAWN_DEADLINE_MS, || {
            APP.with(|cell| {
                if let Some(app) = cell.borrow_mut().as_mut() {
                    halt_spawning(app);
                }
            });
        });
        Self {
            spawn: Some(spawn),
            countdown,
            spawn_deadline,
            finish: None,
        }
    }
}

/// Whole-view state: one instance per mount, owned by the thread-local cell.
struct AppState {
    theme: ThemeCycle,
    /// 5 s background cycler; runs for the life of the mount, cancelled when
    /// the state drops at unmount.
    _theme_task: Interval,
    phase: Phase,
    /// Score of the most recently finished game, reflected in the greeting.
    last_score: u32,
    session: Option<Session>,
    timers: Option<SessionTimers>,
    rng: Pcg32,
}

thread_local! {
    static APP: RefCell<Option<AppState>> = RefCell::new(None);
}

// --- Mount / unmount ---------------------------------------------------------

pub fn mount() -> Result<(), JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    if doc.get_element_by_id(ROOT_ID).is_some() {
        return Ok(()); // already mounted
    }

    let now = win.performance().map(|p| p.now()).unwrap_or(0.0);
    let mut rng = Pcg32::seed_from_u64(now.to_bits());

    ensure_stylesheet(&doc)?;
    build_view(&doc, &mut rng)?;
    wire_input(&doc)?;

    let theme_task = Interval::new(THEME_PERIOD_MS, || {
        APP.with(|cell| {
            if let Some(app) = cell.borrow_mut().as_mut() {
                apply_theme(app.theme.advance());
            }
        });
    });

    APP.with(|cell| {
        cell.replace(Some(AppState {
            theme: ThemeCycle::new(),
            _theme_task: theme_task,
            phase: Phase::Idle,
            last_score: 0,
            session: None,
            timers: None,
            rng,
        }))
    });
    log::info!("view mounted");
    Ok(())
}

/// Tear the whole view down. Dropping the state drops every owned timer,
/// which cancels the underlying browser callbacks before the DOM goes away.
pub fn unmount() {
    let state = APP.with(|cell| cell.borrow_mut().take());
    if state.is_none() {
        return;
    }
    drop(state);
    if let Some(doc) = document() {
        if let Some(root) = doc.get_element_by_id(ROOT_ID) {
            root.remove();
        }
        if let Some(style) = doc.get_element_by_id(STYLE_ID) {
            style.remove();
        }
    }
    log::info!("view unmounted");
}

// --- DOM construction --------------------------------------------------------

fn ensure_stylesheet(doc: &Document) -> Result<(), JsValue> {
    if doc.get_element_by_id(STYLE_ID).is_some() {
        return Ok(());
    }
    let style = doc.create_element("style")?;
    style.set_id(STYLE_ID);
    let mut css = String::from(BASE_CSS);
    for t in GRADIENT_THEMES {
        css.push_str(&format!(".{} {{ background: {}; }}\n", t.class, t.background));
    }
    style.set_text_content(Some(&css));
    doc.body()
        .ok_or_else(|| JsValue::from_str("no body"))?
        .append_child(&style)?;
    Ok(())
}

fn build_view(doc: &Document, rng: &mut Pcg32) -> Result<(), JsValue> {
    let body = doc.body().ok_or_else(|| JsValue::from_str("no body"))?;

    let root = doc.create_element("div")?;
    root.set_id(ROOT_ID);
    root.set_class_name(&format!("fy-root {}", GRADIENT_THEMES[0].class));

    root.append_child(&build_float_layer(doc, rng)?.into())?;

    let heart_layer = doc.create_element("div")?;
    heart_layer.set_id(HEART_LAYER_ID);
    heart_layer.set_class_name("fy-heart-layer fy-hidden");
    root.append_child(&heart_layer)?;

    let timer = doc.create_element("div")?;
    timer.set_id(TIMER_ID);
    timer.set_class_name("fy-hud fy-hud-left fy-hidden");
    timer.set_text_content(Some("Time: 10s"));
    root.append_child(&timer)?;

    let score = doc.create_element("div")?;
    score.set_id(SCORE_ID);
    score.set_class_name("fy-hud fy-hud-right fy-hidden");
    score.set_text_content(Some("Score: 0"));
    root.append_child(&score)?;

    let greeting = doc.create_element("div")?;
    greeting.set_id(GREETING_ID);
    greeting.set_class_name("fy-greeting");
    let title = doc.create_element("h1")?;
    title.set_class_name("fy-title");
    title.set_inner_html("For You <span class=\"fy-pulse\">💖</span>");
    greeting.append_child(&title)?;
    let line = doc.create_element("p")?;
    line.set_id(GREETING_LINE_ID);
    line.set_class_name("fy-greeting-line");
    line.set_text_content(Some(&greeting_line(0)));
    greeting.append_child(&line)?;
    let start = doc.create_element("button")?;
    start.set_id(START_BTN_ID);
    start.set_class_name("fy-start");
    start.set_text_content(Some(start_button_label(0)));
    greeting.append_child(&start)?;
    root.append_child(&greeting)?;

    let overlay = doc.create_element("div")?;
    overlay.set_id(OVERLAY_ID);
    overlay.set_class_name("fy-overlay fy-hidden");
    let card = doc.create_element("div")?;
    card.set_class_name("fy-card");
    let heading = doc.create_element("h2")?;
    heading.set_text_content(Some("Game Over!"));
    card.append_child(&heading)?;
    let overlay_line = doc.create_element("p")?;
    overlay_line.set_id(OVERLAY_LINE_ID);
    overlay_line.set_text_content(Some(&game_over_line(0)));
    card.append_child(&overlay_line)?;
    let close = doc.create_element("button")?;
    close.set_id(CLOSE_BTN_ID);
    close.set_class_name("fy-close");
    close.set_text_content(Some("Close"));
    card.append_child(&close)?;
    overlay.append_child(&card)?;
    root.append_child(&overlay)?;

    body.append_child(&root)?;
    Ok(())
}

/// Decorative layer: heart emoji drifting bottom-to-top behind the greeting.
/// Placement, size and animation phase are sampled once per mount.
fn build_float_layer(doc: &Document, rng: &mut Pcg32) -> Result<Element, JsValue> {
    let layer = doc.create_element("div")?;
    layer.set_id(FLOAT_LAYER_ID);
    layer.set_class_name("fy-float-layer");
    for _ in 0..FLOAT_HEART_COUNT {
        let span = doc.create_element("span")?;
        span.set_class_name("fy-float");
        let left = rng.random_range(0.0..100.0);
        let top = rng.random_range(0.0..120.0);
        let size = rng.random_range(2.0..5.0);
        let delay = rng.random_range(0.0..5.0);
        let duration = rng.random_range(10.0..30.0);
        span.set_attribute(
            "style",
            &format!(
                "left:{left:.1}%; top:{top:.1}%; font-size:{size:.2}rem; animation-delay:{delay:.2}s; animation-duration:{duration:.2}s;"
            ),
        )?;
        span.set_text_content(Some("❤️"));
        layer.append_child(&span)?;
    }
    Ok(layer)
}

// --- Input wiring ------------------------------------------------------------

fn wire_input(doc: &Document) -> Result<(), JsValue> {
    // Start button
    {
        let el = doc
            .get_element_by_id(START_BTN_ID)
            .ok_or_else(|| JsValue::from_str("no start button"))?;
        let closure = Closure::wrap(Box::new(move |_evt: MouseEvent| {
            APP.with(|cell| {
                if let Some(app) = cell.borrow_mut().as_mut() {
                    start_session(app);
                }
            });
        }) as Box<dyn FnMut(_)>);
        el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Close button on the game-over card
    {
        let el = doc
            .get_element_by_id(CLOSE_BTN_ID)
            .ok_or_else(|| JsValue::from_str("no close button"))?;
        let closure = Closure::wrap(Box::new(move |_evt: MouseEvent| {
            APP.with(|cell| {
                if let Some(app) = cell.borrow_mut().as_mut() {
                    go_idle(app);
                }
            });
        }) as Box<dyn FnMut(_)>);
        el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Heart layer: one delegated listener — hearts come and go, this does not.
    {
        let el = doc
            .get_element_by_id(HEART_LAYER_ID)
            .ok_or_else(|| JsValue::from_str("no heart layer"))?;
        let closure = Closure::wrap(Box::new(move |evt: MouseEvent| {
            if let Some(target) = evt.target() {
                if let Some(target_el) = target.dyn_ref::<Element>() {
                    if let Some(attr) = target_el.get_attribute(HEART_ID_ATTR) {
                        if let Ok(id) = attr.parse::<u64>() {
                            APP.with(|cell| {
                                if let Some(app) = cell.borrow_mut().as_mut() {
                                    catch_heart(app, id);
                                }
                            });
                        }
                    }
                }
            }
        }) as Box<dyn FnMut(_)>);
        el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    Ok(())
}

// --- State transitions -------------------------------------------------------

fn start_session(app: &mut AppState) {
    if app.phase == Phase::Playing {
        return;
    }
    let session = Session::new(app.rng.random());
    if let Some(doc) = document() {
        clear_layer(&doc, HEART_LAYER_ID);
        set_text(&doc, TIMER_ID, &format!("Time: {}s", session.time_left()));
        set_text(&doc, SCORE_ID, &format!("Score: {}", session.score()));
        hide(&doc, GREETING_ID);
        hide(&doc, FLOAT_LAYER_ID);
        hide(&doc, OVERLAY_ID);
        show(&doc, HEART_LAYER_ID);
        show(&doc, TIMER_ID);
        show(&doc, SCORE_ID);
    }
    app.phase = Phase::Playing;
    app.session = Some(session);
    app.timers = Some(SessionTimers::arm());
    log::info!("game started");
}

/// Dismiss whatever is up and return to the greeting, reporting the last
/// finished score in the copy. Cancels any session timers still pending.
fn go_idle(app: &mut AppState) {
    if let Some(session) = app.session.as_ref() {
        app.last_score = session.score();
    }
    app.phase = Phase::Idle;
    app.timers = None;
    app.session = None;
    if let Some(doc) = document() {
        clear_layer(&doc, HEART_LAYER_ID);
        hide(&doc, HEART_LAYER_ID);
        hide(&doc, TIMER_ID);
        hide(&doc, SCORE_ID);
        hide(&doc, OVERLAY_ID);
        set_text(&doc, GREETING_LINE_ID, &greeting_line(app.last_score));
        set_text(&doc, START_BTN_ID, start_button_label(app.last_score));
        show(&doc, GREETING_ID);
        show(&doc, FLOAT_LAYER_ID);
    }
}

// --- Timer callbacks ---------------------------------------------------------

fn spawn_tick(app: &mut AppState) {
    let heart = match app.session.as_mut() {
        Some(session) => session.spawn_heart(),
        None => return,
    };
    if let Some(doc) = document() {
        if let Some(layer) = doc.get_element_by_id(HEART_LAYER_ID) {
            if let Ok(btn) = doc.create_element("button") {
                btn.set_id(&format!("fy-heart-{}", heart.id));
                btn.set_class_name("fy-heart");
                btn.set_attribute(HEART_ID_ATTR, &heart.id.to_string()).ok();
                btn.set_attribute(
                    "style",
                    &format!(
                        "left:{:.2}%; animation-duration:{:.2}s;",
                        heart.left_pct, heart.fall_secs
                    ),
                )
                .ok();
                btn.set_text_content(Some("❤️"));
                layer.append_child(&btn).ok();
            }
        }
    }
}

fn countdown_tick(app: &mut AppState) {
    let (expired, time_left, score) = match app.session.as_mut() {
        Some(session) => {
            let expired = session.tick_second();
            (expired, session.time_left(), session.score())
        }
        None => return,
    };
    // Render the clock first so the zero value is visible before the overlay.
    if let Some(doc) = document() {
        set_text(&doc, TIMER_ID, &format!("Time: {time_left}s"));
    }
    if expired {
        app.phase = Phase::GameOver;
        app.last_score = score;
        if let Some(doc) = document() {
            set_text(&doc, OVERLAY_LINE_ID, &game_over_line(score));
            show(&doc, OVERLAY_ID);
        }
        log::info!("game over: caught {score} hearts");
    }
}

/// 10 s deadline: no hearts spawn past this point. The playing view lingers
/// another `LINGER_MS` so late hearts finish falling, then tears down.
fn halt_spawning(app: &mut AppState) {
    if let Some(timers) = app.timers.as_mut() {
        timers.spawn = None;
        timers.finish = Some(Timeout::new(LINGER_MS, || {
            APP.with(|cell| {
                if let Some(app) = cell.borrow_mut().as_mut() {
                    end_playing_view(app);
                }
            });
        }));
    }
}

/// Linger deadline: cancel the remaining session timers and clear the heart
/// layer. The game-over overlay, already driven by the clock hitting zero,
/// stays up until dismissed.
fn end_playing_view(app: &mut AppState) {
    app.timers = None;
    if app.phase == Phase::Playing {
        // The clock never reached zero before the deadline; skip the overlay
        // and return straight to the greeting.
        go_idle(app);
        return;
    }
    app.session = None;
    if let Some(doc) = document() {
        clear_layer(&doc, HEART_LAYER_ID);
        hide(&doc, HEART_LAYER_ID);
        hide(&doc, TIMER_ID);
        hide(&doc, SCORE_ID);
    }
}

// --- Collection --------------------------------------------------------------

fn catch_heart(app: &mut AppState, id: u64) {
    let (caught, score) = match app.session.as_mut() {
        Some(session) => {
            let caught = session.catch_heart(id);
            (caught, session.score())
        }
        None => return,
    };
    if !caught {
        return;
    }
    if let Some(doc) = document() {
        set_text(&doc, SCORE_ID, &format!("Score: {score}"));
        if let Some(el) = doc.get_element_by_id(&format!("fy-heart-{id}")) {
            el.remove();
        }
    }
}

// --- DOM helpers -------------------------------------------------------------

fn document() -> Option<Document> {
    window().and_then(|w| w.document())
}

fn set_text(doc: &Document, id: &str, text: &str) {
    if let Some(el) = doc.get_element_by_id(id) {
        el.set_text_content(Some(text));
    }
}

fn show(doc: &Document, id: &str) {
    if let Some(el) = doc.get_element_by_id(id) {
        el.class_list().remove_1("fy-hidden").ok();
    }
}

fn hide(doc: &Document, id: &str) {
    if let Some(el) = doc.get_element_by_id(id) {
        el.class_list().add_1("fy-hidden").ok();
    }
}

fn clear_layer(doc: &Document, id: &str) {
    if let Some(el) = doc.get_element_by_id(id) {
        el.set_inner_html("");
    }
}

fn apply_theme(theme: &'static GradientTheme) {
    if let Some(doc) = document() {
        if let Some(root) = doc.get_element_by_id(ROOT_ID) {
            root.set_class_name(&format!("fy-root {}", theme.class));
        }
    }
}
