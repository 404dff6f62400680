use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, EventTarget, HtmlElement, Window};

use crate::error::PageError;

/// An event listener that detaches itself when dropped.
pub struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    pub fn new<F>(target: &EventTarget, event: &'static str, handler: F) -> Result<Self, PageError>
    where
        F: FnMut(Event) + 'static,
    {
        let callback = Closure::<dyn FnMut(Event)>::new(handler);
        target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            event,
            callback,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
    }
}

pub fn query(document: &Document, selector: &str) -> Result<Option<Element>, PageError> {
    Ok(document.query_selector(selector)?)
}

pub fn query_all(document: &Document, selector: &str) -> Result<Vec<Element>, PageError> {
    let nodes = document.query_selector_all(selector)?;
    let mut elements = Vec::with_capacity(nodes.length() as usize);
    for index in 0..nodes.length() {
        if let Some(element) = nodes.item(index).and_then(|node| node.dyn_into::<Element>().ok()) {
            elements.push(element);
        }
    }
    Ok(elements)
}

pub fn set_style(
    element: &Element,
    selector: &'static str,
    property: &str,
    value: &str,
) -> Result<(), PageError> {
    let element = element
        .dyn_ref::<HtmlElement>()
        .ok_or(PageError::NotHtml(selector))?;
    element.style().set_property(property, value)?;
    Ok(())
}

/// Creates a `<tag class=... style=...>` element holding `text`.
pub fn styled_element(
    document: &Document,
    tag: &str,
    class: &str,
    style: &str,
    text: &str,
) -> Result<Element, PageError> {
    let element = document.create_element(tag)?;
    element.set_class_name(class);
    element.set_attribute("style", style)?;
    element.set_text_content(Some(text));
    Ok(element)
}

/// Vertical scroll offset, never negative.
pub fn scroll_offset(window: &Window) -> f64 {
    let offset = window.scroll_y().ok().filter(|y| *y > 0.0).or_else(|| {
        window
            .document()
            .and_then(|document| document.document_element())
            .map(|root| f64::from(root.scroll_top()))
    });
    offset.unwrap_or(0.0).max(0.0)
}

pub fn viewport_width(window: &Window) -> f64 {
    window
        .inner_width()
        .ok()
        .and_then(|width| width.as_f64())
        .unwrap_or(0.0)
}
