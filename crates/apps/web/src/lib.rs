//! Browser application: wires the pre-existing page to the view-state
//! machine, the KML loader, and the card renderer.
//!
//! All state lives in thread-local storage; the wasm event loop is
//! single-threaded and every entry point runs to completion or suspends only
//! at fetch boundaries.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};

use foundation::{LatLng, PrefCode, RegionKey};
use streaming::{KmlCache, LoadError, SourceKey};
use view::state::MapMode;
use view::{HistoryPayload, LoadingLatch, ViewState, embed, render_plan};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Event, HtmlSelectElement, PopStateEvent};

mod dom;
mod loader;

use loader::SharedLoad;

// Guard to prevent double-initialization of global state (relevant during hot reload).
static INITIALIZED: AtomicBool = AtomicBool::new(false);
static PANIC_HOOK_SET: OnceLock<()> = OnceLock::new();

pub(crate) struct AppState {
    pub cache: KmlCache,
    pub pending: BTreeMap<SourceKey, SharedLoad>,
    pub view: ViewState,
    /// Bumped on every transition; async continuations capture their value
    /// and discard results once it no longer matches.
    pub nav_generation: u64,
    pub loading: LoadingLatch,
    pub classic_zoom_closures: Vec<Closure<dyn FnMut(Event)>>,
    pub region_zoom_closures: Vec<Closure<dyn FnMut(Event)>>,
}

impl AppState {
    fn new() -> Self {
        Self {
            cache: KmlCache::new(),
            pending: BTreeMap::new(),
            view: ViewState::default(),
            nav_generation: 0,
            loading: LoadingLatch::new(),
            classic_zoom_closures: Vec::new(),
            region_zoom_closures: Vec::new(),
        }
    }
}

thread_local! {
    static STATE: RefCell<AppState> = RefCell::new(AppState::new());
}

/// Safe TLS access helper that returns a default on teardown instead of
/// panicking.
pub(crate) fn with_state<F, R>(f: F) -> R
where
    F: FnOnce(&RefCell<AppState>) -> R,
    R: Default,
{
    STATE.try_with(f).unwrap_or_default()
}

fn init_panic_hook() {
    PANIC_HOOK_SET.get_or_init(|| {
        console_error_panic_hook::set_once();
    });
}

fn log_load_error(context: &str, err: &LoadError) {
    web_sys::console::error_1(&JsValue::from_str(&format!("load failed ({context}): {err}")));
}

fn log_stale(context: &str) {
    web_sys::console::log_1(&JsValue::from_str(&format!(
        "stale result discarded ({context})"
    )));
}

/// RAII over the loading indicator: shown on begin, guaranteed hidden again
/// once every outstanding guard has dropped, on success and failure alike.
struct LoadingGuard;

impl LoadingGuard {
    fn begin() -> Self {
        with_state(|s| s.borrow_mut().loading.begin());
        dom::update_loading(true);
        LoadingGuard
    }
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        with_state(|s| s.borrow_mut().loading.settle());
        let visible = with_state(|s| s.borrow().loading.is_visible());
        dom::update_loading(visible);
    }
}

#[wasm_bindgen(start)]
pub fn start() {
    if INITIALIZED.swap(true, Ordering::SeqCst) {
        return;
    }
    init_panic_hook();
    wire_static_handlers();

    // A reloaded deep link restores its view; nothing is pushed for it.
    let initial = web_sys::window()
        .and_then(|w| w.location().search().ok())
        .map(|q| HistoryPayload::from_query(&q).to_state())
        .unwrap_or_default();
    apply_view(initial, false);
}

/// Entry point for the external national-map widget: render one prefecture's
/// placemarks into the classic list.
#[wasm_bindgen]
pub fn show_prefecture(code: &str) {
    match PrefCode::new(code) {
        Some(code) => apply_view(ViewState::Japan { pref: Some(code) }, true),
        None => web_sys::console::error_1(&JsValue::from_str(&format!(
            "ignoring invalid prefecture code: {code:?}"
        ))),
    }
}

/// Entry point for page scripting: switch mode by wire name.
#[wasm_bindgen]
pub fn show_view(view: &str) {
    let state = HistoryPayload {
        view: Some(view.to_string()),
        ..HistoryPayload::default()
    }
    .to_state();
    apply_view(state, true);
}

/// Run one transition: derive and apply the render plan, optionally push a
/// history entry, then kick off the state's load/render program.
fn apply_view(state: ViewState, push: bool) {
    let generation = with_state(|s| {
        let mut s = s.borrow_mut();
        s.nav_generation += 1;
        s.view = state.clone();
        s.nav_generation
    });

    dom::apply_plan(&render_plan(&state));
    if push {
        push_history(&state);
    }

    match state {
        ViewState::Campus => spawn_local(enter_campus(generation)),
        ViewState::Japan { pref: None } => enter_japan(),
        ViewState::Japan { pref: Some(code) } => spawn_local(enter_prefecture(code, generation)),
        ViewState::WorldAll => spawn_local(enter_world_all(generation)),
        ViewState::WorldRegion(key) => spawn_local(enter_world_region(key, generation)),
    }
}

fn is_current(generation: u64) -> bool {
    with_state(|s| s.borrow().nav_generation == generation)
}

fn placemarks_for(key: &SourceKey) -> Vec<formats::Placemark> {
    with_state(|s| {
        s.borrow()
            .cache
            .get(key)
            .map(|doc| doc.placemarks())
            .unwrap_or_default()
    })
}

async fn enter_campus(generation: u64) {
    dom::set_frame_html(MapMode::Campus, embed::CAMPUS_EMBED_URL, "Campus map");
    let _guard = LoadingGuard::begin();
    let result = loader::ensure_loaded(SourceKey::Campus).await;
    if !is_current(generation) {
        log_stale("campus");
        return;
    }
    match result {
        Ok(()) => dom::show_classic_list(&placemarks_for(&SourceKey::Campus)),
        Err(e) => log_load_error("campus", &e),
    }
}

fn enter_japan() {
    // Prefecture content loads reactively on a later click, never eagerly.
    dom::clear_classic_list();
}

async fn enter_prefecture(code: PrefCode, generation: u64) {
    let key = SourceKey::Prefecture(code);
    let _guard = LoadingGuard::begin();
    let result = loader::ensure_loaded(key.clone()).await;
    if !is_current(generation) {
        log_stale(&key.context_label());
        return;
    }
    match result {
        Ok(()) => dom::show_classic_list(&placemarks_for(&key)),
        Err(e) => log_load_error(&key.context_label(), &e),
    }
}

async fn enter_world_all(generation: u64) {
    dom::clear_classic_list();
    dom::hide_all_region_blocks();
    let _guard = LoadingGuard::begin();

    // One load per region, joined positionally: a failed region leaves its
    // section unpopulated without disturbing the other four, and sections
    // always fill in the fixed region order regardless of arrival order.
    let loads = RegionKey::ALL.map(|key| loader::ensure_loaded(SourceKey::Region(key)));
    let results = futures::future::join_all(loads).await;

    if !is_current(generation) {
        log_stale("world (all regions)");
        return;
    }
    let outcomes: Vec<Result<Vec<formats::Placemark>, LoadError>> = RegionKey::ALL
        .iter()
        .zip(results)
        .map(|(key, result)| result.map(|_| placemarks_for(&SourceKey::Region(*key))))
        .collect();
    for (key, outcome) in RegionKey::ALL.iter().zip(&outcomes) {
        if let Err(e) = outcome {
            log_load_error(&format!("region {key}"), e);
        }
    }
    for (key, pms) in view::plan::settled_region_blocks(outcomes) {
        dom::show_region_block(key, &pms);
    }
    dom::set_frame_html(MapMode::World, embed::WORLD_EMBED_URL, "World map");
}

async fn enter_world_region(key: RegionKey, generation: u64) {
    dom::clear_classic_list();
    dom::hide_all_region_blocks();
    let _guard = LoadingGuard::begin();

    let source = SourceKey::Region(key);
    let result = loader::ensure_loaded(source.clone()).await;
    if !is_current(generation) {
        log_stale(&source.context_label());
        return;
    }
    match result {
        Ok(()) => {
            let pms = placemarks_for(&source);
            dom::show_region_block(key, &pms);
            let first = pms.iter().find_map(|p| p.coordinates);
            dom::set_frame_html(
                MapMode::World,
                &embed::world_region_url(first),
                "World map (region)",
            );
        }
        Err(e) => log_load_error(&source.context_label(), &e),
    }
}

/// Re-center the active frame on a placemark. No-op when coordinates are not
/// finite or the active mode has no embed surface of its own.
pub(crate) fn zoom_to(lat: f64, lng: f64, name: &str) {
    let Some(point) = LatLng::new(lat, lng) else {
        return;
    };
    let Some(mode) = with_state(|s| Some(s.borrow().view.mode())) else {
        return;
    };
    let Some(base) = embed::zoom_base(mode) else {
        return;
    };
    let url = embed::centered(base, point, embed::PLACEMARK_ZOOM);
    dom::set_frame_html(mode, &url, &format!("{name} - detail map"));
}

fn push_history(state: &ViewState) {
    let payload = HistoryPayload::from_state(state);
    let Some(window) = web_sys::window() else {
        return;
    };
    let Ok(history) = window.history() else {
        return;
    };
    let data = serde_json::to_string(&payload).unwrap_or_default();
    let url = format!("?{}", payload.to_query());
    let _ = history.push_state_with_url(&JsValue::from_str(&data), "", Some(&url));
}

fn on_popstate(event: PopStateEvent) {
    // Prefer the typed payload stored with the entry; fall back to the query
    // string for entries pushed by older page versions.
    let payload = event
        .state()
        .as_string()
        .and_then(|s| serde_json::from_str::<HistoryPayload>(&s).ok())
        .unwrap_or_else(|| {
            web_sys::window()
                .and_then(|w| w.location().search().ok())
                .map(|q| HistoryPayload::from_query(&q))
                .unwrap_or_default()
        });
    apply_view(payload.to_state(), false);
}

fn wire_static_handlers() {
    for (mode, state) in [
        (MapMode::Campus, ViewState::Campus),
        (MapMode::Japan, ViewState::Japan { pref: None }),
        (MapMode::World, ViewState::WorldAll),
    ] {
        if let Some(button) = dom::by_id(dom::button_id(mode)) {
            let closure = Closure::<dyn FnMut(Event)>::new(move |_: Event| {
                apply_view(state.clone(), true);
            });
            let _ = button
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    if let Some(select) = dom::by_id(dom::REGION_SELECT_ID) {
        let closure = Closure::<dyn FnMut(Event)>::new(|event: Event| {
            let value = event
                .target()
                .and_then(|t| t.dyn_into::<HtmlSelectElement>().ok())
                .map(|s| s.value())
                .unwrap_or_default();
            let state = match RegionKey::parse(&value) {
                Some(key) => ViewState::WorldRegion(key),
                None => ViewState::WorldAll,
            };
            apply_view(state, true);
        });
        let _ = select.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    if let Some(reset) = dom::by_id(dom::RESET_REGION_ID) {
        let closure = Closure::<dyn FnMut(Event)>::new(|_: Event| {
            apply_view(ViewState::WorldAll, true);
        });
        let _ = reset.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    if let Some(window) = web_sys::window() {
        let closure = Closure::<dyn FnMut(PopStateEvent)>::new(on_popstate);
        let _ = window
            .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
