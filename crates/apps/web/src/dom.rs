//! DOM plumbing: element lookups, class toggling, container population.
//!
//! The page provides every container this module touches; nothing here
//! creates structure, it only populates and toggles what already exists.
//! Lookups that miss are silent no-ops so a partially built page degrades
//! instead of panicking.

use formats::Placemark;
use foundation::RegionKey;
use view::card;
use view::plan::{RegionPicker, RenderPlan};
use view::state::MapMode;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Document, Element, Event, HtmlElement, HtmlSelectElement};

pub const REGION_SELECTOR_ID: &str = "region-selector";
pub const REGION_SELECT_ID: &str = "region-select";
pub const SELECTED_REGION_SELECTOR: &str = ".selected-region";
pub const REGION_NAME_ID: &str = "region-name";
pub const RESET_REGION_ID: &str = "reset-region";
pub const CLASSIC_LIST_ID: &str = "placemarks-list";
pub const LOADING_ID: &str = "loading";

pub fn frame_id(mode: MapMode) -> &'static str {
    match mode {
        MapMode::Campus => "campus-map",
        MapMode::Japan => "japan-map",
        MapMode::World => "world-map",
    }
}

pub fn button_id(mode: MapMode) -> &'static str {
    match mode {
        MapMode::Campus => "campus-button",
        MapMode::Japan => "japan-button",
        MapMode::World => "world-button",
    }
}

fn region_section_id(key: RegionKey) -> String {
    format!("region-{key}")
}

pub fn document() -> Option<Document> {
    web_sys::window().and_then(|w| w.document())
}

pub fn by_id(id: &str) -> Option<Element> {
    document().and_then(|d| d.get_element_by_id(id))
}

pub fn set_class(el: &Element, class: &str, on: bool) {
    let list = el.class_list();
    let _ = if on { list.add_1(class) } else { list.remove_1(class) };
}

/// Mirror one `RenderPlan` into the page: frame and button active states,
/// region-picker visibility, dropdown value, selected-region badge.
pub fn apply_plan(plan: &RenderPlan) {
    for mode in MapMode::ALL {
        let active = mode == plan.active;
        if let Some(el) = by_id(frame_id(mode)) {
            set_class(&el, "active", active);
        }
        if let Some(el) = by_id(button_id(mode)) {
            set_class(&el, "active", active);
        }
    }

    let picker_shown = !matches!(plan.region_picker, RegionPicker::Hidden);
    let badge_shown = matches!(plan.region_picker, RegionPicker::Selected(_));

    if let Some(el) = by_id(REGION_SELECTOR_ID) {
        set_class(&el, "show", picker_shown);
    }
    if let Some(select) = by_id(REGION_SELECT_ID)
        .and_then(|el| el.dyn_into::<HtmlSelectElement>().ok())
    {
        select.set_value(plan.dropdown_value());
        let display = if badge_shown { "none" } else { "block" };
        let _ = select.style().set_property("display", display);
    }
    if let Some(el) =
        document().and_then(|d| d.query_selector(SELECTED_REGION_SELECTOR).ok().flatten())
    {
        set_class(&el, "show", badge_shown);
    }
    if let Some(el) = by_id(REGION_NAME_ID) {
        el.set_text_content(Some(plan.badge_text()));
    }
}

/// Replace a frame slot's contents with a fresh embed iframe.
pub fn set_frame_html(mode: MapMode, url: &str, title: &str) {
    if let Some(el) = by_id(frame_id(mode)) {
        el.set_inner_html(&view::embed::iframe_html(url, title));
    }
}

pub fn show_classic_list(pms: &[Placemark]) {
    let Some(el) = by_id(CLASSIC_LIST_ID) else {
        return;
    };
    el.set_inner_html(&card::classic_list_html(pms));
    set_class(&el, "show", true);
    let closures = wire_zoom_buttons(&el);
    crate::with_state(|s| s.borrow_mut().classic_zoom_closures = closures);
}

pub fn clear_classic_list() {
    crate::with_state(|s| s.borrow_mut().classic_zoom_closures.clear());
    if let Some(el) = by_id(CLASSIC_LIST_ID) {
        set_class(&el, "show", false);
        el.set_inner_html("");
    }
}

/// Hide and empty every region section. Idempotent; safe with zero
/// populated sections.
pub fn hide_all_region_blocks() {
    crate::with_state(|s| s.borrow_mut().region_zoom_closures.clear());
    for key in RegionKey::ALL {
        let Some(section) = by_id(&region_section_id(key)) else {
            continue;
        };
        set_class(&section, "show", false);
        if let Some(grid) = section.query_selector(".placemarks-grid").ok().flatten() {
            grid.set_inner_html("");
        }
    }
}

/// Populate and reveal one region section, leaving the other four as the
/// preceding `hide_all_region_blocks` left them.
pub fn show_region_block(key: RegionKey, pms: &[Placemark]) {
    let Some(section) = by_id(&region_section_id(key)) else {
        return;
    };
    let Some(grid) = section.query_selector(".placemarks-grid").ok().flatten() else {
        return;
    };
    grid.set_inner_html(&card::cards_html(pms));
    set_class(&section, "show", true);
    let mut closures = wire_zoom_buttons(&section);
    crate::with_state(|s| s.borrow_mut().region_zoom_closures.append(&mut closures));
}

pub fn update_loading(visible: bool) {
    if let Some(el) = by_id(LOADING_ID) {
        set_class(&el, "show", visible);
        let _ = el.set_attribute("aria-hidden", if visible { "false" } else { "true" });
    }
}

/// Attach click handlers to every zoom button under `scope`.
///
/// Handlers only live as long as the returned closures, which the caller
/// stores in state; they are dropped together with the elements on the next
/// content replacement, so re-renders never leak or double-fire.
fn wire_zoom_buttons(scope: &Element) -> Vec<Closure<dyn FnMut(Event)>> {
    let mut closures = Vec::new();
    let Ok(buttons) = scope.query_selector_all(".zoom-btn") else {
        return closures;
    };
    for i in 0..buttons.length() {
        let Some(button) = buttons
            .item(i)
            .and_then(|n| n.dyn_into::<HtmlElement>().ok())
        else {
            continue;
        };
        let closure = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            let Some(el) = event
                .current_target()
                .and_then(|t| t.dyn_into::<Element>().ok())
            else {
                return;
            };
            let lat = attr_f64(&el, "data-lat");
            let lng = attr_f64(&el, "data-lng");
            let name = el
                .get_attribute("data-name")
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| "point".to_string());
            if let (Some(lat), Some(lng)) = (lat, lng) {
                crate::zoom_to(lat, lng, &name);
            }
        });
        let _ = button
            .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closures.push(closure);
    }
    closures
}

fn attr_f64(el: &Element, name: &str) -> Option<f64> {
    el.get_attribute(name)?.parse().ok()
}
