use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Array;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::config::LandingConfig;
use crate::dom;
use crate::error::PageError;
use crate::markup;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealId(usize);

/// Tracks which observed elements have entered the viewport. Revealing is
/// one-way: nothing here ever clears a revealed flag.
#[derive(Debug, Default)]
pub struct RevealOnScroll {
    revealed: Vec<bool>,
}

impl RevealOnScroll {
    pub fn track(&mut self) -> RevealId {
        self.revealed.push(false);
        RevealId(self.revealed.len() - 1)
    }

    pub fn is_revealed(&self, id: RevealId) -> bool {
        self.revealed.get(id.0).copied().unwrap_or(false)
    }

    /// `Some` only the first time `id` is seen intersecting.
    pub fn on_intersection(&mut self, id: RevealId, intersecting: bool) -> Option<RevealId> {
        let slot = self.revealed.get_mut(id.0)?;
        if !intersecting || *slot {
            return None;
        }
        *slot = true;
        Some(id)
    }
}

pub struct RevealBinding {
    pub state: Rc<RefCell<RevealOnScroll>>,
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

impl Drop for RevealBinding {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

pub fn bind(document: &Document, config: &LandingConfig) -> Result<Option<RevealBinding>, PageError> {
    let targets = dom::query_all(document, markup::REVEAL_TARGETS)?;
    if targets.is_empty() {
        log::debug!("Nothing to reveal on scroll");
        return Ok(None);
    }

    let state = Rc::new(RefCell::new(RevealOnScroll::default()));
    let tracked: Rc<Vec<(Element, RevealId)>> = Rc::new({
        let mut reveal = state.borrow_mut();
        targets
            .into_iter()
            .map(|element| (element, reveal.track()))
            .collect()
    });

    let callback = {
        let state = state.clone();
        let tracked = tracked.clone();
        Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
            move |entries: Array, _observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                        continue;
                    };
                    let target = entry.target();
                    let Some((element, id)) = tracked.iter().find(|(element, _)| *element == target)
                    else {
                        continue;
                    };
                    let revealed = state.borrow_mut().on_intersection(*id, entry.is_intersecting());
                    if revealed.is_some() {
                        if let Err(e) = element.class_list().add_1(markup::class::REVEALED) {
                            log::warn!("Failed to reveal element: {:?}", e);
                        }
                    }
                }
            },
        )
    };

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(config.reveal_threshold));
    options.set_root_margin(&config.reveal_root_margin);
    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
    for (element, _) in tracked.iter() {
        observer.observe(element);
    }
    log::debug!("Observing {} elements for reveal", tracked.len());

    Ok(Some(RevealBinding {
        state,
        observer,
        _callback: callback,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_intersection_reveals() {
        let mut reveal = RevealOnScroll::default();
        let id = reveal.track();
        assert!(!reveal.is_revealed(id));
        assert_eq!(reveal.on_intersection(id, true), Some(id));
        assert!(reveal.is_revealed(id));
    }

    #[test]
    fn non_intersecting_entries_do_nothing() {
        let mut reveal = RevealOnScroll::default();
        let id = reveal.track();
        assert_eq!(reveal.on_intersection(id, false), None);
        assert!(!reveal.is_revealed(id));
    }

    #[test]
    fn revealed_state_survives_exit_and_reentry() {
        let mut reveal = RevealOnScroll::default();
        let id = reveal.track();
        reveal.on_intersection(id, true);
        for intersecting in [false, true, false, false, true] {
            assert_eq!(reveal.on_intersection(id, intersecting), None);
            assert!(reveal.is_revealed(id));
        }
    }

    #[test]
    fn elements_reveal_independently() {
        let mut reveal = RevealOnScroll::default();
        let feature = reveal.track();
        let testimonial = reveal.track();
        reveal.on_intersection(testimonial, true);
        assert!(!reveal.is_revealed(feature));
        assert!(reveal.is_revealed(testimonial));
    }

    #[test]
    fn unknown_id_is_ignored() {
        let mut reveal = RevealOnScroll::default();
        assert_eq!(reveal.on_intersection(RevealId(3), true), None);
    }
}
