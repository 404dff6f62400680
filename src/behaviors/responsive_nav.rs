use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Node, Window};

use crate::dom::{self, Listener};
use crate::error::PageError;
use crate::markup;
use crate::styles;

const TOGGLE_GLYPH: &str = "☰";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavEffect {
    InsertToggle,
    RemoveToggle,
    SetMenuOpen(bool),
}

/// Mobile menu toggle lifecycle keyed off the viewport width.
#[derive(Debug, Clone)]
pub struct ResponsiveNav {
    breakpoint: f64,
    width: f64,
    toggle_present: bool,
    menu_open: bool,
}

impl ResponsiveNav {
    pub fn new(breakpoint_px: u32) -> Self {
        Self {
            breakpoint: f64::from(breakpoint_px),
            width: 0.0,
            toggle_present: false,
            menu_open: false,
        }
    }

    pub fn is_mobile(&self) -> bool {
        self.width <= self.breakpoint
    }

    pub fn toggle_present(&self) -> bool {
        self.toggle_present
    }

    pub fn menu_open(&self) -> bool {
        self.menu_open
    }

    pub fn init(&mut self, width: f64) -> Vec<NavEffect> {
        self.width = width;
        let mut effects = Vec::new();
        if self.is_mobile() {
            self.toggle_present = true;
            effects.push(NavEffect::InsertToggle);
        }
        effects
    }

    /// Tears the toggle down and rebuilds it for the new width; the menu always ends up closed.
    pub fn on_resize(&mut self, width: f64) -> Vec<NavEffect> {
        let mut effects = Vec::new();
        if self.toggle_present {
            self.toggle_present = false;
            effects.push(NavEffect::RemoveToggle);
        }
        self.menu_open = false;
        effects.push(NavEffect::SetMenuOpen(false));
        effects.extend(self.init(width));
        effects
    }

    pub fn on_toggle_click(&mut self) -> Option<NavEffect> {
        if !self.toggle_present {
            return None;
        }
        self.menu_open = !self.menu_open;
        Some(NavEffect::SetMenuOpen(self.menu_open))
    }

    pub fn on_document_click(&mut self, inside_nav: bool) -> Option<NavEffect> {
        if inside_nav || !self.menu_open {
            return None;
        }
        self.menu_open = false;
        Some(NavEffect::SetMenuOpen(false))
    }
}

struct NavElements {
    document: Document,
    container: Element,
    menu: Element,
    toggle: RefCell<Option<(Element, Listener)>>,
}

pub struct ResponsiveNavBinding {
    pub state: Rc<RefCell<ResponsiveNav>>,
    elements: Rc<NavElements>,
    _resize: Listener,
    _outside_click: Listener,
}

impl Drop for ResponsiveNavBinding {
    fn drop(&mut self) {
        if let Some((toggle, _listener)) = self.elements.toggle.borrow_mut().take() {
            toggle.remove();
        }
    }
}

pub fn bind(window: &Window, breakpoint_px: u32) -> Result<Option<ResponsiveNavBinding>, PageError> {
    let document = window.document().ok_or(PageError::NoDocument)?;
    let (Some(container), Some(menu)) = (
        dom::query(&document, markup::NAV_CONTAINER)?,
        dom::query(&document, markup::NAV_MENU)?,
    ) else {
        log::debug!("No nav container or menu, mobile toggle disabled");
        return Ok(None);
    };

    let state = Rc::new(RefCell::new(ResponsiveNav::new(breakpoint_px)));
    let elements = Rc::new(NavElements {
        document: document.clone(),
        container,
        menu,
        toggle: RefCell::new(None),
    });

    let initial = state.borrow_mut().init(dom::viewport_width(window));
    apply_all(&state, &elements, &initial);

    let resize = {
        let state = state.clone();
        let elements = elements.clone();
        let win = window.clone();
        Listener::new(window, "resize", move |_| {
            let effects = state.borrow_mut().on_resize(dom::viewport_width(&win));
            apply_all(&state, &elements, &effects);
        })?
    };

    let outside_click = {
        let state = state.clone();
        let elements = elements.clone();
        Listener::new(&document, "click", move |event| {
            let target = event.target().and_then(|t| t.dyn_into::<Node>().ok());
            let inside = elements.container.contains(target.as_ref());
            let effect = state.borrow_mut().on_document_click(inside);
            if let Some(effect) = effect {
                apply_all(&state, &elements, &[effect]);
            }
        })?
    };

    Ok(Some(ResponsiveNavBinding {
        state,
        elements,
        _resize: resize,
        _outside_click: outside_click,
    }))
}

fn apply_all(state: &Rc<RefCell<ResponsiveNav>>, elements: &Rc<NavElements>, effects: &[NavEffect]) {
    for effect in effects {
        if let Err(e) = apply(state, elements, *effect) {
            log::warn!("Failed to update mobile nav ({:?}): {}", effect, e);
        }
    }
}

fn apply(
    state: &Rc<RefCell<ResponsiveNav>>,
    elements: &Rc<NavElements>,
    effect: NavEffect,
) -> Result<(), PageError> {
    match effect {
        NavEffect::InsertToggle => {
            let button = dom::styled_element(
                &elements.document,
                "button",
                markup::class::MENU_TOGGLE,
                styles::MENU_TOGGLE_STYLE,
                TOGGLE_GLYPH,
            )?;
            button.set_attribute("type", "button")?;
            button.set_attribute("aria-label", "Toggle navigation")?;
            let listener = {
                let state = state.clone();
                let elements = elements.clone();
                Listener::new(&button, "click", move |_| {
                    let effect = state.borrow_mut().on_toggle_click();
                    if let Some(effect) = effect {
                        apply_all(&state, &elements, &[effect]);
                    }
                })?
            };
            elements.menu.before_with_node_1(&button)?;
            *elements.toggle.borrow_mut() = Some((button, listener));
        }
        NavEffect::RemoveToggle => {
            if let Some((button, _listener)) = elements.toggle.borrow_mut().take() {
                button.remove();
            }
        }
        NavEffect::SetMenuOpen(open) => {
            elements
                .menu
                .class_list()
                .toggle_with_force(markup::class::MENU_OPEN, open)?;
            if let Some((button, _)) = elements.toggle.borrow().as_ref() {
                button.set_attribute("aria-expanded", if open { "true" } else { "false" })?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mobile_width_creates_toggle() {
        let mut nav = ResponsiveNav::new(768);
        assert_eq!(nav.init(768.0), vec![NavEffect::InsertToggle]);
        assert!(nav.toggle_present());
    }

    #[test]
    fn desktop_width_has_no_toggle() {
        let mut nav = ResponsiveNav::new(768);
        assert!(nav.init(769.0).is_empty());
        assert!(!nav.toggle_present());
        assert_eq!(nav.on_toggle_click(), None);
    }

    #[test]
    fn toggle_click_flips_menu() {
        let mut nav = ResponsiveNav::new(768);
        nav.init(375.0);
        assert_eq!(nav.on_toggle_click(), Some(NavEffect::SetMenuOpen(true)));
        assert!(nav.menu_open());
        assert_eq!(nav.on_toggle_click(), Some(NavEffect::SetMenuOpen(false)));
        assert!(!nav.menu_open());
    }

    #[test]
    fn outside_click_closes_open_menu() {
        let mut nav = ResponsiveNav::new(768);
        nav.init(375.0);
        nav.on_toggle_click();
        assert_eq!(nav.on_document_click(true), None);
        assert!(nav.menu_open());
        assert_eq!(nav.on_document_click(false), Some(NavEffect::SetMenuOpen(false)));
        assert!(!nav.menu_open());
        assert_eq!(nav.on_document_click(false), None);
    }

    #[test]
    fn resizing_to_desktop_removes_toggle_and_closes_menu() {
        let mut nav = ResponsiveNav::new(768);
        nav.init(375.0);
        nav.on_toggle_click();
        assert_eq!(
            nav.on_resize(1_280.0),
            vec![NavEffect::RemoveToggle, NavEffect::SetMenuOpen(false)]
        );
        assert!(!nav.toggle_present());
        assert!(!nav.menu_open());
    }

    #[test]
    fn resizing_to_mobile_adds_toggle() {
        let mut nav = ResponsiveNav::new(768);
        nav.init(1_280.0);
        assert_eq!(
            nav.on_resize(600.0),
            vec![NavEffect::SetMenuOpen(false), NavEffect::InsertToggle]
        );
        assert!(nav.toggle_present());
    }

    #[test]
    fn resizing_within_mobile_rebuilds_single_toggle() {
        let mut nav = ResponsiveNav::new(768);
        nav.init(375.0);
        nav.on_toggle_click();
        assert_eq!(
            nav.on_resize(414.0),
            vec![
                NavEffect::RemoveToggle,
                NavEffect::SetMenuOpen(false),
                NavEffect::InsertToggle
            ]
        );
        assert!(!nav.menu_open());
    }
}
