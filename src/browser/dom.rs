//! DOM-backed surfaces for every controller.
//!
//! SYSTEM CONTEXT
//! ==============
//! The server renders the admin chrome; this module only looks elements up
//! by their well-known ids and classes and mutates classes, styles, and
//! attributes on them. A missing element turns the corresponding write into
//! a no-op so pages that omit parts of the chrome still work.

use std::cell::RefCell;
use std::collections::BTreeMap;

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

use crate::state::accordion::{AccordionState, AccordionSurface, Reveal, SectionId, SectionSlot};
use crate::state::notification::{NotificationCoordinator, NotificationId, NotificationKind, NotificationSurface};
use crate::state::panel::{PanelSurface, PointerTarget};
use crate::state::theme::{Theme, ThemeSurface};
use crate::util::viewport::Viewport;

const SIDEBAR_ID: &str = "adminSidebar";
const OVERLAY_ID: &str = "sidebarOverlay";
const TRIGGER_SELECTOR: &str = ".sidebar-toggle";
const ACCORDION_HEADER_SELECTOR: &str = ".nav-accordion-header";
const THEME_ICON_SELECTOR: &str = ".header-btn i.fa-moon, .header-btn i.fa-sun";
const MESSAGES_CONTAINER_CLASS: &str = "messages-container";
const MESSAGE_SELECTOR: &str = ".message";

pub(super) struct DomSurfaces {
    document: Document,
    messages: RefCell<BTreeMap<NotificationId, Element>>,
}

impl DomSurfaces {
    pub(super) fn new(document: Document) -> Self {
        Self { document, messages: RefCell::new(BTreeMap::new()) }
    }

    pub(super) fn document(&self) -> &Document {
        &self.document
    }

    pub(super) fn query_all(&self, selector: &str) -> Vec<Element> {
        query_all(&self.document, selector)
    }

    /// Classify a click target relative to the sidebar and its trigger.
    pub(super) fn pointer_target(&self, target: Option<web_sys::EventTarget>) -> PointerTarget {
        let Some(node) = target.and_then(|t| t.dyn_into::<web_sys::Node>().ok()) else {
            return PointerTarget::Outside;
        };
        if let Some(sidebar) = self.document.get_element_by_id(SIDEBAR_ID)
            && sidebar.contains(Some(&node))
        {
            return PointerTarget::Panel;
        }
        if let Ok(Some(trigger)) = self.document.query_selector(TRIGGER_SELECTOR)
            && trigger.contains(Some(&node))
        {
            return PointerTarget::Trigger;
        }
        PointerTarget::Outside
    }

    fn headers(&self) -> Vec<Element> {
        self.query_all(ACCORDION_HEADER_SELECTOR)
    }

    fn header(&self, slot: SectionSlot) -> Option<Element> {
        self.headers().into_iter().nth(slot.0)
    }

    /// Slot of the accordion header that is, or contains, `element`.
    pub(super) fn section_slot(&self, element: &Element) -> Option<SectionSlot> {
        let header = element.closest(ACCORDION_HEADER_SELECTOR).ok().flatten()?;
        self.headers()
            .iter()
            .position(|candidate| candidate.is_same_node(Some(&header)))
            .map(SectionSlot)
    }

    /// Token from the page's CSRF form field, or empty when the page has none.
    pub(super) fn csrf_token(&self) -> String {
        let selector = format!("[name={}]", crate::net::request::CSRF_FIELD_NAME);
        self.document
            .query_selector(&selector)
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<web_sys::HtmlInputElement>().ok())
            .map(|input| input.value())
            .unwrap_or_default()
    }

    /// Register server-rendered `.message` elements with the coordinator so
    /// they get the same auto-dismiss and close behavior as new ones.
    pub(super) fn adopt_messages(&self, notifications: &NotificationCoordinator) -> usize {
        let existing = self.query_all(MESSAGE_SELECTOR);
        for element in &existing {
            let kind = message_kind(element);
            let id = notifications.adopt(kind);
            if let Ok(Some(close)) = element.query_selector(".message-close") {
                on_close_click(&close, id);
            }
            self.messages.borrow_mut().insert(id, element.clone());
        }
        existing.len()
    }

    /// Notification id of the message containing `element`, if tracked.
    pub(super) fn notification_for(&self, element: &Element) -> Option<NotificationId> {
        let message = element.closest(MESSAGE_SELECTOR).ok().flatten()?;
        self.messages
            .borrow()
            .iter()
            .find(|(_, el)| el.is_same_node(Some(&message)))
            .map(|(id, _)| *id)
    }

    fn message_element(&self, id: NotificationId) -> Option<Element> {
        self.messages.borrow().get(&id).cloned()
    }

    fn create(&self, tag: &str, class: &str) -> Option<Element> {
        let el = self.document.create_element(tag).ok()?;
        el.set_class_name(class);
        Some(el)
    }

    fn build_message(&self, id: NotificationId, kind: NotificationKind, text: &str) -> Option<Element> {
        let message = self.create("div", &format!("message message-{}", kind.as_str()))?;
        let content = self.create("div", "message-content")?;
        let icon = self.create("i", &format!("fas fa-{}", kind.icon()))?;
        let label = self.create("span", "")?;
        label.set_text_content(Some(text));
        let close = self.create("button", "message-close")?;
        close.set_attribute("type", "button").ok()?;
        let close_icon = self.create("i", "fas fa-times")?;
        close.append_child(&close_icon).ok()?;
        on_close_click(&close, id);

        content.append_child(&icon).ok()?;
        content.append_child(&label).ok()?;
        content.append_child(&close).ok()?;
        message.append_child(&content).ok()?;
        Some(message)
    }
}

pub(super) fn query_all(document: &Document, selector: &str) -> Vec<Element> {
    let Ok(list) = document.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

fn message_kind(element: &Element) -> NotificationKind {
    let classes = element.class_list();
    ["success", "warning", "error", "info"]
        .into_iter()
        .find(|kind| classes.contains(&format!("message-{kind}")))
        .map_or(NotificationKind::Info, NotificationKind::parse)
}

fn on_close_click(button: &Element, id: NotificationId) {
    super::listeners::listen(button, "click", move |_| {
        super::with_app(|app| {
            app.notifications.dismiss(id);
        });
    });
}

fn set_style(element: &Element, property: &str, value: Option<&str>) {
    let Some(el) = element.dyn_ref::<HtmlElement>() else {
        return;
    };
    let style = el.style();
    let _ = match value {
        Some(value) => style.set_property(property, value),
        None => style.remove_property(property).map(|_| ()),
    };
}

fn toggle_class(element: &Element, class: &str, on: bool) {
    let _ = element.class_list().toggle_with_force(class, on);
}

// =============================================================
// Panel
// =============================================================

impl PanelSurface for DomSurfaces {
    fn set_open(&self, open: bool) {
        if let Some(sidebar) = self.document.get_element_by_id(SIDEBAR_ID) {
            toggle_class(&sidebar, "open", open);
        }
        if let Some(overlay) = self.document.get_element_by_id(OVERLAY_ID) {
            toggle_class(&overlay, "active", open);
        }
    }

    fn set_scroll_locked(&self, locked: bool) {
        if let Some(body) = self.document.body() {
            set_style(&body, "overflow", locked.then_some("hidden"));
        }
    }
}

// =============================================================
// Accordion
// =============================================================

impl AccordionSurface for DomSurfaces {
    fn section_count(&self) -> usize {
        self.headers().len()
    }

    fn section_id(&self, slot: SectionSlot) -> Option<SectionId> {
        let header = self.header(slot)?;
        let explicit = header.get_attribute("data-accordion-id");
        Some(SectionId::resolve(explicit.as_deref(), &header.text_content().unwrap_or_default()))
    }

    fn is_expanded(&self, slot: SectionSlot) -> bool {
        self.header(slot).is_some_and(|header| header.class_list().contains("active"))
    }

    fn natural_height(&self, slot: SectionSlot) -> f64 {
        self.header(slot)
            .and_then(|header| header.next_element_sibling())
            .map_or(0.0, |content| f64::from(content.scroll_height()))
    }

    fn render(&self, slot: SectionSlot, state: AccordionState, reveal: Reveal) {
        let Some(header) = self.header(slot) else {
            return;
        };
        toggle_class(&header, "active", state.expanded);
        let Some(content) = header.next_element_sibling() else {
            return;
        };
        toggle_class(&content, "active", state.expanded);
        match reveal {
            Reveal::Immediate => set_style(&content, "transition", Some("none")),
            Reveal::Animated => set_style(&content, "transition", None),
        }
        set_style(&content, "max-height", Some(&format!("{}px", state.content_height)));
    }
}

// =============================================================
// Theme
// =============================================================

impl ThemeSurface for DomSurfaces {
    fn set_root_theme(&self, theme: Theme) {
        if let Some(root) = self.document.document_element() {
            let _ = root.set_attribute("data-theme", theme.as_str());
        }
    }

    fn set_indicator(&self, icon_class: &str) {
        if let Ok(Some(icon)) = self.document.query_selector(THEME_ICON_SELECTOR) {
            icon.set_class_name(icon_class);
        }
    }
}

// =============================================================
// Notifications
// =============================================================

impl NotificationSurface for DomSurfaces {
    fn ensure_container(&self) {
        if let Ok(Some(_)) = self.document.query_selector(&format!(".{MESSAGES_CONTAINER_CLASS}")) {
            return;
        }
        let Some(container) = self.create("div", MESSAGES_CONTAINER_CLASS) else {
            return;
        };
        if let Ok(Some(content)) = self.document.query_selector(".admin-content") {
            let _ = content.insert_before(&container, content.first_child().as_ref());
        } else if let Some(body) = self.document.body() {
            let _ = body.append_child(&container);
        }
    }

    fn mount(&self, id: NotificationId, kind: NotificationKind, text: &str) {
        let Ok(Some(container)) = self.document.query_selector(&format!(".{MESSAGES_CONTAINER_CLASS}")) else {
            log::warn!("notification {} dropped: no messages container", id.0);
            return;
        };
        let Some(message) = self.build_message(id, kind, text) else {
            return;
        };
        if container.append_child(&message).is_ok() {
            self.messages.borrow_mut().insert(id, message);
        }
    }

    fn begin_exit(&self, id: NotificationId) {
        if let Some(message) = self.message_element(id) {
            set_style(&message, "opacity", Some("0"));
            set_style(&message, "transform", Some("translateY(-20px)"));
        }
    }

    fn detach(&self, id: NotificationId) {
        let removed = self.messages.borrow_mut().remove(&id);
        if let Some(message) = removed {
            message.remove();
        }
    }
}

// =============================================================
// Viewport
// =============================================================

pub(super) struct WindowViewport {
    window: web_sys::Window,
}

impl WindowViewport {
    pub(super) fn new(window: web_sys::Window) -> Self {
        Self { window }
    }
}

impl Viewport for WindowViewport {
    fn width(&self) -> f64 {
        self.window
            .inner_width()
            .ok()
            .and_then(|w| w.as_f64())
            .unwrap_or_default()
    }
}
