//! The `window.PontiAdmin` namespace.
//!
//! Page templates call these from inline handlers and page scripts. Every
//! entry tolerates wrong argument types by doing nothing, matching how the
//! listeners treat missing elements.

use std::rc::Rc;

use js_sys::{JSON, Object, Promise, Reflect};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{JsFuture, future_to_promise, spawn_local};
use web_sys::{Element, Window};

use super::dom::DomSurfaces;
use super::scheduler::GlooScheduler;
use crate::chart::{ChartData, ChartStyle};
use crate::net::request::{RequestOptions, report_failure, request};
use crate::state::notification::NotificationKind;
use crate::util::actions::confirm_and_run;
use crate::util::debounce::{Debouncer, wait_ms_from};
use crate::util::format::{byte_count, format_file_size};

const NAMESPACE: &str = "PontiAdmin";

fn set_entry(ns: &Object, name: &str, entry: JsValue) {
    if Reflect::set(ns, &JsValue::from_str(name), &entry).is_err() {
        log::warn!("failed to export {NAMESPACE}.{name}");
    }
}

/// JSON text for a page-supplied object. `undefined` and `null` give an
/// empty string, which every decoder here reads as "use defaults".
fn json_text(value: &JsValue) -> String {
    if value.is_undefined() || value.is_null() {
        return String::new();
    }
    match JSON::stringify(value) {
        Ok(text) => text.as_string().unwrap_or_default(),
        Err(err) => {
            log::warn!("unserializable argument: {err:?}");
            String::new()
        }
    }
}

pub(super) fn install(window: &Window, dom: &Rc<DomSurfaces>) {
    let ns = Object::new();

    let toggle_sidebar = Closure::wrap(Box::new(|| {
        super::with_app(|app| {
            app.panel.toggle();
        });
    }) as Box<dyn FnMut()>);
    set_entry(&ns, "toggleSidebar", toggle_sidebar.into_js_value());

    let accordion_dom = Rc::clone(dom);
    let toggle_accordion = Closure::wrap(Box::new(move |header: JsValue| {
        let Some(slot) = header
            .dyn_into::<Element>()
            .ok()
            .and_then(|el| accordion_dom.section_slot(&el))
        else {
            return;
        };
        super::with_app(|app| {
            app.accordion.toggle_section(slot);
        });
    }) as Box<dyn FnMut(JsValue)>);
    set_entry(&ns, "toggleAccordion", toggle_accordion.into_js_value());

    let toggle_theme = Closure::wrap(Box::new(|| {
        super::with_app(|app| {
            app.theme.toggle();
        });
    }) as Box<dyn FnMut()>);
    set_entry(&ns, "toggleTheme", toggle_theme.into_js_value());

    let show_message = Closure::wrap(Box::new(|kind: JsValue, text: JsValue| {
        let kind = NotificationKind::parse(&kind.as_string().unwrap_or_default());
        let text = text.as_string().unwrap_or_default();
        super::with_app(|app| {
            app.notifications.show(kind, &text);
        });
    }) as Box<dyn FnMut(JsValue, JsValue)>);
    set_entry(&ns, "showMessage", show_message.into_js_value());

    let dismiss_dom = Rc::clone(dom);
    let dismiss_message = Closure::wrap(Box::new(move |element: JsValue| {
        let Some(id) = element
            .dyn_into::<Element>()
            .ok()
            .and_then(|el| dismiss_dom.notification_for(&el))
        else {
            return;
        };
        super::with_app(|app| {
            app.notifications.dismiss(id);
        });
    }) as Box<dyn FnMut(JsValue)>);
    set_entry(&ns, "dismissMessage", dismiss_message.into_js_value());

    let confirm_window = window.clone();
    let confirm_action = Closure::wrap(Box::new(move |message: JsValue, callback: JsValue| -> bool {
        let message = message.as_string().unwrap_or_default();
        confirm_and_run(
            |text| confirm_window.confirm_with_message(text).unwrap_or(false),
            &message,
            || {
                if let Some(callback) = callback.dyn_ref::<js_sys::Function>()
                    && let Err(err) = callback.call0(&JsValue::NULL)
                {
                    log::error!("confirmAction callback threw: {err:?}");
                }
            },
        )
    }) as Box<dyn FnMut(JsValue, JsValue) -> bool>);
    set_entry(&ns, "confirmAction", confirm_action.into_js_value());

    let clipboard_window = window.clone();
    let copy_to_clipboard = Closure::wrap(Box::new(move |text: JsValue| {
        let text = text.as_string().unwrap_or_default();
        let clipboard = clipboard_window.navigator().clipboard();
        spawn_local(async move {
            let copied = match clipboard {
                Some(clipboard) => JsFuture::from(clipboard.write_text(&text)).await.is_ok(),
                None => false,
            };
            super::with_app(|app| app.report_clipboard(copied));
        });
    }) as Box<dyn FnMut(JsValue)>);
    set_entry(&ns, "copyToClipboard", copy_to_clipboard.into_js_value());

    let ajax_dom = Rc::clone(dom);
    let make_ajax_request = Closure::wrap(Box::new(move |url: JsValue, options: JsValue| -> Promise {
        let url = url.as_string().unwrap_or_default();
        let options = json_text(&options);
        let csrf_token = ajax_dom.csrf_token();
        future_to_promise(async move {
            let Some(app) = super::app() else {
                return Err(js_sys::Error::new("admin ui not ready").into());
            };
            let result = match RequestOptions::from_json(&options) {
                Ok(options) => request(&app.notifications, &url, &options, &csrf_token).await,
                Err(err) => {
                    report_failure(&app.notifications, &err);
                    Err(err)
                }
            };
            let value = result.map_err(|err| JsValue::from(js_sys::Error::new(&err.to_string())))?;
            JSON::parse(&value.to_string())
        })
    }) as Box<dyn FnMut(JsValue, JsValue) -> Promise>);
    set_entry(&ns, "makeAjaxRequest", make_ajax_request.into_js_value());

    let chart_dom = Rc::clone(dom);
    let create_simple_chart = Closure::wrap(Box::new(move |canvas_id: JsValue, data: JsValue, options: JsValue| {
        let canvas_id = canvas_id.as_string().unwrap_or_default();
        if let Err(err) = create_simple_chart(&chart_dom, &canvas_id, &data, &options) {
            log::warn!("chart {canvas_id} not drawn: {err:?}");
        }
    }) as Box<dyn FnMut(JsValue, JsValue, JsValue)>);
    set_entry(&ns, "createSimpleChart", create_simple_chart.into_js_value());

    let format_size = Closure::wrap(Box::new(|bytes: JsValue| -> String {
        format_file_size(byte_count(bytes.as_f64()))
    }) as Box<dyn FnMut(JsValue) -> String>);
    set_entry(&ns, "formatFileSize", format_size.into_js_value());

    let debounce = Closure::wrap(Box::new(|func: JsValue, wait: JsValue| -> JsValue {
        match func.dyn_into::<js_sys::Function>() {
            Ok(func) => debounced(func, wait_ms_from(wait.as_f64())),
            Err(_) => JsValue::UNDEFINED,
        }
    }) as Box<dyn FnMut(JsValue, JsValue) -> JsValue>);
    set_entry(&ns, "debounce", debounce.into_js_value());

    set_entry(window, NAMESPACE, ns.into());
}

/// Draw into `#canvas_id`. A missing canvas is not an error.
fn create_simple_chart(dom: &DomSurfaces, canvas_id: &str, data: &JsValue, options: &JsValue) -> Result<(), JsValue> {
    let Some(canvas) = dom
        .document()
        .get_element_by_id(canvas_id)
        .and_then(|el| el.dyn_into::<web_sys::HtmlCanvasElement>().ok())
    else {
        return Ok(());
    };
    let Some(ctx) = canvas
        .get_context("2d")?
        .and_then(|ctx| ctx.dyn_into::<web_sys::CanvasRenderingContext2d>().ok())
    else {
        return Ok(());
    };

    let data: ChartData =
        serde_json::from_str(&json_text(data)).map_err(|err| JsValue::from_str(&err.to_string()))?;
    let options = json_text(options);
    let style: ChartStyle = if options.is_empty() {
        ChartStyle::default()
    } else {
        serde_json::from_str(&options).map_err(|err| JsValue::from_str(&err.to_string()))?
    };
    crate::chart::draw(&ctx, &data, &style, f64::from(canvas.width()), f64::from(canvas.height()))
}

/// Wrap `func` so bursts of calls collapse into one trailing call with the
/// latest arguments (up to three).
fn debounced(func: js_sys::Function, wait_ms: u32) -> JsValue {
    let debouncer = Debouncer::new(Rc::new(GlooScheduler), wait_ms);
    let wrapper = Closure::wrap(Box::new(move |a: JsValue, b: JsValue, c: JsValue| {
        let args = js_sys::Array::of3(&a, &b, &c);
        while args.length() > 0 && args.at(-1).is_undefined() {
            args.pop();
        }
        let func = func.clone();
        debouncer.call(move || {
            if let Err(err) = func.apply(&JsValue::NULL, &args) {
                log::error!("debounced callback threw: {err:?}");
            }
        });
    }) as Box<dyn FnMut(JsValue, JsValue, JsValue)>);
    wrapper.into_js_value()
}
