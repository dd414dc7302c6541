//! Page-wide event wiring.
//!
//! Each listener forwards a browser event to the matching controller on the
//! running [`AdminApp`] or to one of the per-field form helpers. Closures are
//! leaked with `forget()`: the page owns them until it unloads.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event, EventTarget, HtmlElement, KeyboardEvent, Window};

use super::dom::{DomSurfaces, query_all};
use crate::app::{AdminApp, page_load_ms};
use crate::util::forms::{CHOOSE_FILE_LABEL, SubmitBusy, SubmitControl, file_label, textarea_height};
use crate::util::keyboard::Modifiers;
use crate::util::tooltip::{Rect, place_tooltip};

pub(super) fn listen(target: &EventTarget, event: &str, handler: impl FnMut(Event) + 'static) {
    let cb = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    if target.add_event_listener_with_callback(event, cb.as_ref().unchecked_ref()).is_ok() {
        cb.forget();
    } else {
        log::warn!("failed to attach {event} listener");
    }
}

pub(super) fn install(window: &Window, dom: &Rc<DomSurfaces>, app: &Rc<AdminApp>) {
    install_panel(window, dom, app);
    install_keyboard(dom.document(), app);
    install_forms(dom.document(), app);
    install_textareas(dom.document(), app.config.textarea_min_height_px);
    install_file_inputs(dom.document());
    install_tooltips(window, dom.document());
}

fn install_panel(window: &Window, dom: &Rc<DomSurfaces>, app: &Rc<AdminApp>) {
    let click_dom = Rc::clone(dom);
    let click_app = Rc::clone(app);
    listen(dom.document(), "click", move |event| {
        click_app.panel.handle_outside_click(click_dom.pointer_target(event.target()));
    });

    let resize_app = Rc::clone(app);
    listen(window, "resize", move |_| resize_app.panel.handle_resize());
}

fn install_keyboard(document: &Document, app: &Rc<AdminApp>) {
    let app = Rc::clone(app);
    listen(document, "keydown", move |event| {
        let Some(key_event) = event.dyn_ref::<KeyboardEvent>() else {
            return;
        };
        let mods = Modifiers {
            ctrl: key_event.ctrl_key(),
            shift: key_event.shift_key(),
            alt: key_event.alt_key(),
            meta: key_event.meta_key(),
        };
        if app.handle_key(&key_event.key(), mods) {
            event.prevent_default();
        }
    });
}

// =============================================================
// Page load timing
// =============================================================

/// Report the load time once the `load` event has finished. The reading
/// waits one tick because `loadEventEnd` is still zero inside `load`
/// handlers. Installed before the DOM is ready so the event is not missed.
pub(super) fn track_page_load(window: &Window) {
    let timing_window = window.clone();
    listen(window, "load", move |_| {
        let window = timing_window.clone();
        Timeout::new(0, move || {
            let Some(performance) = window.performance() else {
                return;
            };
            let load_ms = page_load_ms(navigation_load_event_end(&performance), performance.now());
            super::with_app(|app| {
                app.report_page_load(load_ms);
            });
        })
        .forget();
    });
}

fn navigation_load_event_end(performance: &web_sys::Performance) -> Option<f64> {
    performance
        .get_entries_by_type("navigation")
        .get(0)
        .dyn_into::<web_sys::PerformanceNavigationTiming>()
        .ok()
        .map(|entry| entry.load_event_end())
}

// =============================================================
// Forms
// =============================================================

struct DomSubmitControl {
    element: Element,
}

impl SubmitControl for DomSubmitControl {
    fn label_html(&self) -> String {
        self.element.inner_html()
    }

    fn set_label_html(&self, html: &str) {
        self.element.set_inner_html(html);
    }

    fn set_disabled(&self, disabled: bool) {
        let _ = if disabled {
            self.element.set_attribute("disabled", "")
        } else {
            self.element.remove_attribute("disabled")
        };
    }
}

fn install_forms(document: &Document, app: &Rc<AdminApp>) {
    for form in query_all(document, "form") {
        let Ok(Some(button)) = form.query_selector(r#"button[type="submit"], input[type="submit"]"#) else {
            continue;
        };
        let busy = SubmitBusy::new(
            Rc::new(DomSubmitControl { element: button }),
            Rc::clone(&app.scheduler),
            app.config.submit_loading_fallback_ms,
        );
        listen(&form, "submit", move |_| {
            busy.begin();
        });
    }
}

fn resize_textarea(element: &HtmlElement, min_height: f64) {
    let style = element.style();
    let _ = style.set_property("height", "auto");
    let height = textarea_height(f64::from(element.scroll_height()), min_height);
    let _ = style.set_property("height", &format!("{height}px"));
}

fn install_textareas(document: &Document, min_height: f64) {
    for element in query_all(document, "textarea") {
        let Ok(textarea) = element.dyn_into::<HtmlElement>() else {
            continue;
        };
        resize_textarea(&textarea, min_height);
        let target = textarea.clone();
        listen(&textarea, "input", move |_| resize_textarea(&target, min_height));
    }
}

fn install_file_inputs(document: &Document) {
    for element in query_all(document, r#"input[type="file"]"#) {
        let Ok(input) = element.dyn_into::<web_sys::HtmlInputElement>() else {
            continue;
        };
        if wrap_file_input(document, &input).is_none() {
            log::debug!("file input left unwrapped");
        }
    }
}

fn wrap_file_input(document: &Document, input: &web_sys::HtmlInputElement) -> Option<()> {
    let parent = input.parent_node()?;
    let wrapper = document.create_element("div").ok()?;
    wrapper.set_class_name("file-input-wrapper");
    let input_node: &web_sys::Node = input;
    parent.insert_before(&wrapper, Some(input_node)).ok()?;
    wrapper.append_child(input).ok()?;

    let label = document.create_element("label").ok()?;
    label.set_class_name("file-input-label");
    if !input.id().is_empty() {
        label.set_attribute("for", &input.id()).ok()?;
    }
    let icon = document.create_element("i").ok()?;
    icon.set_class_name("fas fa-upload");
    let text = document.create_element("span").ok()?;
    text.set_text_content(Some(CHOOSE_FILE_LABEL));
    label.append_child(&icon).ok()?;
    label.append_child(&text).ok()?;
    wrapper.append_child(&label).ok()?;

    let source = input.clone();
    listen(input, "change", move |_| {
        let name = source.files().and_then(|files| files.get(0)).map(|file| file.name());
        text.set_text_content(Some(file_label(name.as_deref())));
    });
    Some(())
}

// =============================================================
// Tooltips
// =============================================================

fn install_tooltips(window: &Window, document: &Document) {
    for element in query_all(document, "[title]") {
        let active: Rc<RefCell<Option<Element>>> = Rc::new(RefCell::new(None));

        let show_window = window.clone();
        let show_document = document.clone();
        let show_anchor = element.clone();
        let show_active = Rc::clone(&active);
        listen(&element, "mouseenter", move |_| {
            // Park the title so the native tooltip stays hidden.
            let Some(title) = show_anchor.get_attribute("title").filter(|t| !t.is_empty()) else {
                return;
            };
            let _ = show_anchor.set_attribute("data-tooltip", &title);
            let _ = show_anchor.remove_attribute("title");
            if let Some(tip) = show_tooltip(&show_window, &show_document, &show_anchor, &title)
                && let Some(stale) = show_active.borrow_mut().replace(tip)
            {
                stale.remove();
            }
        });

        let hide_anchor = element.clone();
        listen(&element, "mouseleave", move |_| {
            if let Some(tip) = active.borrow_mut().take() {
                tip.remove();
            }
            if let Some(title) = hide_anchor.get_attribute("data-tooltip") {
                let _ = hide_anchor.set_attribute("title", &title);
                let _ = hide_anchor.remove_attribute("data-tooltip");
            }
        });
    }
}

fn dom_rect(element: &Element) -> Rect {
    let r = element.get_bounding_client_rect();
    Rect { left: r.left(), top: r.top(), width: r.width(), height: r.height() }
}

fn show_tooltip(window: &Window, document: &Document, anchor: &Element, text: &str) -> Option<Element> {
    let body = document.body()?;
    let tip = document.create_element("div").ok()?;
    tip.set_class_name("tooltip");
    tip.set_text_content(Some(text));
    body.append_child(&tip).ok()?;

    let size = dom_rect(&tip);
    let viewport_width = window.inner_width().ok().and_then(|w| w.as_f64()).unwrap_or_default();
    let scroll_y = window.scroll_y().unwrap_or_default();
    let placement = place_tooltip(dom_rect(anchor), size.width, size.height, viewport_width, scroll_y);

    let style = tip.dyn_ref::<HtmlElement>()?.style();
    let _ = style.set_property("top", &format!("{}px", placement.top));
    let _ = style.set_property("left", &format!("{}px", placement.left));
    if placement.below {
        let _ = tip.class_list().add_1("tooltip-bottom");
    }
    Some(tip)
}
