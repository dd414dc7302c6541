//! Browser entry point.
//!
//! DESIGN
//! ======
//! `start` runs when the wasm module is instantiated. It installs logging
//! and the panic hook, then boots the [`AdminApp`] once the DOM is ready.
//! The app lives in a thread-local so event closures created later (close
//! buttons, the `window.PontiAdmin` namespace) can reach it without holding
//! strong cycles through the DOM.

mod dom;
mod exports;
mod listeners;
mod scheduler;
mod storage;

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;

use crate::app::{AdminApp, Environment, Surfaces};
use crate::config::{AdminConfig, CONFIG_ELEMENT_ID};

thread_local! {
    static APP: RefCell<Option<Rc<AdminApp>>> = const { RefCell::new(None) };
}

/// The booted app, or `None` before boot.
pub(crate) fn app() -> Option<Rc<AdminApp>> {
    APP.with(|slot| slot.borrow().clone())
}

/// Run `f` against the booted app. No-op before boot.
pub(crate) fn with_app(f: impl FnOnce(&AdminApp)) {
    if let Some(app) = app() {
        f(&app);
    }
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);

    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };
    listeners::track_page_load(&window);

    if document.ready_state() == "loading" {
        listeners::listen(&document, "DOMContentLoaded", move |_| boot());
    } else {
        boot();
    }
}

fn read_config(document: &web_sys::Document) -> AdminConfig {
    let raw = document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|el| el.text_content())
        .unwrap_or_default();
    AdminConfig::from_json(&raw).unwrap_or_else(|err| {
        log::warn!("ignoring admin config: {err}");
        AdminConfig::default()
    })
}

fn boot() {
    if APP.with(|slot| slot.borrow().is_some()) {
        return;
    }
    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };

    let dom = Rc::new(dom::DomSurfaces::new(document.clone()));
    let env = Environment {
        storage: Rc::new(storage::LocalStorage::new(&window)),
        viewport: Rc::new(dom::WindowViewport::new(window.clone())),
        scheduler: Rc::new(scheduler::GlooScheduler),
    };
    let surfaces = Surfaces {
        panel: dom.clone(),
        accordion: dom.clone(),
        theme: dom.clone(),
        notifications: dom.clone(),
    };
    let app = Rc::new(AdminApp::new(read_config(&document), env, surfaces));

    APP.with(|slot| *slot.borrow_mut() = Some(Rc::clone(&app)));
    app.start();
    let adopted = dom.adopt_messages(&app.notifications);
    if adopted > 0 {
        log::debug!("adopted {adopted} server-rendered messages");
    }

    listeners::install(&window, &dom, &app);
    exports::install(&window, &dom);
}
