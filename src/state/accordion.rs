//! Collapsible navigation sections with persisted expansion state.
//!
//! Each section is identified by a [`SectionId`] assigned in markup
//! (`data-accordion-id`). Sections without one fall back to their trimmed
//! header label, which keeps preferences written by older pages readable.
//!
//! The controller addresses headers by [`SectionSlot`], so a click always
//! acts on the header that was clicked even when labels repeat. Headers that
//! share an id share one persisted flag.

#[cfg(test)]
#[path = "accordion_test.rs"]
mod accordion_test;

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::util::store::PreferenceStore;

/// Stable identity of an accordion section.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SectionId(String);

impl SectionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Prefer the explicit id; otherwise derive one from the header label.
    pub fn resolve(explicit: Option<&str>, header_label: &str) -> Self {
        match explicit.map(str::trim).filter(|id| !id.is_empty()) {
            Some(id) => Self::new(id),
            None => Self::new(header_label.trim()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How a height change should be rendered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reveal {
    /// Let the CSS height transition run.
    Animated,
    /// Jump straight to the final height (startup restore).
    Immediate,
}

/// Per-section visual state.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AccordionState {
    pub expanded: bool,
    /// Rendered content height in px; zero when collapsed.
    pub content_height: f64,
}

/// Position of a section header in document order. Two headers with the
/// same label are still two slots.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SectionSlot(pub usize);

/// Rendering side of the accordion: header/content `active` classes and the
/// content's `max-height`.
pub trait AccordionSurface {
    /// Number of section headers currently in the document.
    fn section_count(&self) -> usize;
    /// Persistence identity of the section in `slot`.
    fn section_id(&self, slot: SectionSlot) -> Option<SectionId>;
    /// Whether the markup currently shows the section expanded. Pages may
    /// render a section open before any script runs.
    fn is_expanded(&self, slot: SectionSlot) -> bool;
    /// Full height of the section's content, as if expanded.
    fn natural_height(&self, slot: SectionSlot) -> f64;
    fn render(&self, slot: SectionSlot, state: AccordionState, reveal: Reveal);
}

pub struct AccordionController {
    surface: Rc<dyn AccordionSurface>,
    store: PreferenceStore,
    key_prefix: String,
    sections: RefCell<HashMap<SectionSlot, AccordionState>>,
}

impl AccordionController {
    pub fn new(surface: Rc<dyn AccordionSurface>, store: PreferenceStore, key_prefix: impl Into<String>) -> Self {
        Self { surface, store, key_prefix: key_prefix.into(), sections: RefCell::new(HashMap::new()) }
    }

    pub fn storage_key(&self, id: &SectionId) -> String {
        format!("{}{id}", self.key_prefix)
    }

    /// Current state of `slot`. A section the controller has not touched
    /// yet reports what the markup shows.
    pub fn state(&self, slot: SectionSlot) -> AccordionState {
        if let Some(state) = self.sections.borrow().get(&slot) {
            return *state;
        }
        if self.surface.is_expanded(slot) {
            AccordionState { expanded: true, content_height: self.surface.natural_height(slot) }
        } else {
            AccordionState::default()
        }
    }

    /// Flip one section and persist its new expansion. Returns the new
    /// `expanded` value, or `None` when `slot` is not in the document.
    pub fn toggle_section(&self, slot: SectionSlot) -> Option<bool> {
        let id = self.surface.section_id(slot)?;
        let expanded = !self.state(slot).expanded;
        let content_height = if expanded { self.surface.natural_height(slot) } else { 0.0 };
        let state = AccordionState { expanded, content_height };

        self.sections.borrow_mut().insert(slot, state);
        self.surface.render(slot, state, Reveal::Animated);
        self.store.set_flag(&self.storage_key(&id), expanded);
        Some(expanded)
    }

    /// Expand every section whose persisted flag is `true`, without
    /// animating. Returns the number of sections expanded.
    pub fn restore_sections(&self) -> usize {
        let mut restored = 0;
        for slot in (0..self.surface.section_count()).map(SectionSlot) {
            let Some(id) = self.surface.section_id(slot) else {
                continue;
            };
            if self.store.get_flag(&self.storage_key(&id)) != Some(true) {
                continue;
            }
            let state = AccordionState { expanded: true, content_height: self.surface.natural_height(slot) };
            self.sections.borrow_mut().insert(slot, state);
            self.surface.render(slot, state, Reveal::Immediate);
            restored += 1;
        }
        if restored > 0 {
            log::debug!("restored {restored} expanded accordion sections");
        }
        restored
    }
}
