//! DOM display surface
//!
//! Orbs are absolutely positioned `<button>`s inside the arena element so
//! they can take keyboard focus. Each carries its id in `data-orb`; the host
//! uses a single delegated click listener on the arena.

use std::collections::HashMap;

use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement};

use super::{DisplaySurface, SurfaceEvent};
use crate::platform::input::ORB_ATTR;
use crate::sim::{CalloutId, OrbId};

/// Element ids the surface writes to
pub mod ids {
    pub const ARENA: &str = "arena";
    pub const SCORE: &str = "hud-score";
    pub const TIME: &str = "hud-time";
    pub const BEST: &str = "hud-best";
    pub const COMBO: &str = "hud-combo";
    pub const START: &str = "start-btn";
    pub const ROUND_OVER: &str = "round-over";
    pub const FINAL_SCORE: &str = "final-score";
    pub const NEW_BEST: &str = "new-best";
}

/// [`DisplaySurface`] backed by page elements
pub struct DomSurface {
    document: Document,
    arena: HtmlElement,
    orbs: HashMap<OrbId, HtmlElement>,
    callouts: HashMap<CalloutId, HtmlElement>,
    orb_radius: f32,
}

impl DomSurface {
    /// Bind to the arena element; `None` if the page lacks it
    pub fn new(document: Document, orb_radius: f32) -> Option<Self> {
        let arena = document
            .get_element_by_id(ids::ARENA)?
            .dyn_into::<HtmlElement>()
            .ok()?;
        Some(Self {
            document,
            arena,
            orbs: HashMap::new(),
            callouts: HashMap::new(),
            orb_radius,
        })
    }

    /// Arena element (for attaching listeners)
    pub fn arena(&self) -> &HtmlElement {
        &self.arena
    }

    /// Current arena size in CSS pixels
    pub fn size(&self) -> (f32, f32) {
        (
            self.arena.client_width() as f32,
            self.arena.client_height() as f32,
        )
    }

    fn make(&self, tag: &str, class: &str) -> Option<HtmlElement> {
        let el = self
            .document
            .create_element(tag)
            .ok()?
            .dyn_into::<HtmlElement>()
            .ok()?;
        el.set_class_name(class);
        Some(el)
    }

    fn set_text(&self, id: &str, text: &str) {
        if let Some(el) = self.document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_hidden(&self, id: &str, hidden: bool) {
        if let Some(el) = self.document.get_element_by_id(id) {
            let _ = el.class_list().toggle_with_force("hidden", hidden);
        }
    }

    fn place_orb(&self, el: &HtmlElement, pos: Vec2) {
        let r = self.orb_radius;
        let _ = el.style().set_property(
            "transform",
            &format!("translate({:.1}px, {:.1}px)", pos.x - r, pos.y - r),
        );
    }

    fn spawn_orb(&mut self, id: OrbId, pos: Vec2) {
        let Some(el) = self.make("button", "orb") else {
            return;
        };
        let _ = el.set_attribute(ORB_ATTR, &id.to_string());
        let _ = el.set_attribute("aria-label", "Orb");
        let size = format!("{}px", self.orb_radius * 2.0);
        let _ = el.style().set_property("width", &size);
        let _ = el.style().set_property("height", &size);
        self.place_orb(&el, pos);
        let _ = self.arena.append_child(&el);
        self.orbs.insert(id, el);
    }

    fn show_callout(&mut self, id: CalloutId, pos: Vec2, text: &str) {
        let Some(el) = self.make("div", "callout") else {
            return;
        };
        el.set_text_content(Some(text));
        let _ = el.style().set_property("left", &format!("{:.1}px", pos.x));
        let _ = el.style().set_property("top", &format!("{:.1}px", pos.y));
        let _ = self.arena.append_child(&el);
        self.callouts.insert(id, el);
    }
}

impl DisplaySurface for DomSurface {
    fn apply(&mut self, event: &SurfaceEvent) {
        match event {
            SurfaceEvent::OrbSpawned { id, pos } => self.spawn_orb(*id, *pos),
            SurfaceEvent::OrbMoved { id, pos } => {
                if let Some(el) = self.orbs.get(id) {
                    self.place_orb(el, *pos);
                }
            }
            SurfaceEvent::OrbPopped { id } => {
                if let Some(el) = self.orbs.get(id) {
                    let _ = el.class_list().add_1("hit");
                    let _ = el.set_attribute("aria-disabled", "true");
                }
            }
            SurfaceEvent::OrbRemoved { id } => {
                if let Some(el) = self.orbs.remove(id) {
                    el.remove();
                }
            }
            SurfaceEvent::CalloutShown { id, pos, text } => self.show_callout(*id, *pos, text),
            SurfaceEvent::CalloutRemoved { id } => {
                if let Some(el) = self.callouts.remove(id) {
                    el.remove();
                }
            }
            SurfaceEvent::Score(score) => self.set_text(ids::SCORE, &score.to_string()),
            SurfaceEvent::Combo(combo) => {
                self.set_text(ids::COMBO, &format!("{} combo", combo));
                self.set_hidden(ids::COMBO, *combo == 0);
            }
            SurfaceEvent::TimeLeft(secs) => self.set_text(ids::TIME, &secs.to_string()),
            SurfaceEvent::Best(best) => self.set_text(ids::BEST, &best.to_string()),
            SurfaceEvent::StartEnabled(enabled) => {
                if let Some(btn) = self.document.get_element_by_id(ids::START) {
                    if *enabled {
                        let _ = btn.remove_attribute("disabled");
                    } else {
                        let _ = btn.set_attribute("disabled", "");
                    }
                }
                if !*enabled {
                    self.set_hidden(ids::ROUND_OVER, true);
                }
            }
            SurfaceEvent::RoundOver {
                score, new_best, ..
            } => {
                self.set_text(ids::FINAL_SCORE, &score.to_string());
                self.set_hidden(ids::NEW_BEST, !*new_best);
                self.set_hidden(ids::ROUND_OVER, false);
            }
        }
    }
}
