use web_sys::{Document, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition};

use crate::dom::{self, Listener};
use crate::error::PageError;
use crate::markup;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavAction {
    Scroll { target_id: String },
    Ignore,
}

/// Id named by an in-page href, if it names one at all.
pub fn fragment_target(href: &str) -> Option<&str> {
    let id = href.strip_prefix('#')?;
    (!id.is_empty()).then_some(id)
}

pub struct Navigator;

impl Navigator {
    pub fn on_click(href: &str, exists: impl Fn(&str) -> bool) -> NavAction {
        match fragment_target(href) {
            Some(id) if exists(id) => NavAction::Scroll {
                target_id: id.to_string(),
            },
            _ => NavAction::Ignore,
        }
    }
}

pub fn bind(document: &Document) -> Result<Vec<Listener>, PageError> {
    let links = dom::query_all(document, markup::NAV_LINKS)?;
    let mut listeners = Vec::with_capacity(links.len());
    for link in links {
        let document = document.clone();
        let anchor = link.clone();
        listeners.push(Listener::new(&link, "click", move |event| {
            event.prevent_default();
            let href = anchor.get_attribute("href").unwrap_or_default();
            let action = Navigator::on_click(&href, |id| document.get_element_by_id(id).is_some());
            if let NavAction::Scroll { target_id } = action {
                if let Some(target) = document.get_element_by_id(&target_id) {
                    let options = ScrollIntoViewOptions::new();
                    options.set_behavior(ScrollBehavior::Smooth);
                    options.set_block(ScrollLogicalPosition::Start);
                    target.scroll_into_view_with_scroll_into_view_options(&options);
                }
            } else {
                log::debug!("No section for nav link {:?}", href);
            }
        })?);
    }
    log::debug!("Bound {} nav links", listeners.len());
    Ok(listeners)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fragment_target_strips_hash() {
        assert_eq!(fragment_target("#features"), Some("features"));
        assert_eq!(fragment_target("#"), None);
        assert_eq!(fragment_target(""), None);
        assert_eq!(fragment_target("/pricing#faq"), None);
        assert_eq!(fragment_target("https://example.com"), None);
    }

    #[test]
    fn existing_target_scrolls_once() {
        let action = Navigator::on_click("#pricing", |id| id == "pricing");
        assert_eq!(
            action,
            NavAction::Scroll {
                target_id: "pricing".to_string()
            }
        );
    }

    #[test]
    fn missing_target_is_ignored() {
        assert_eq!(Navigator::on_click("#nowhere", |_| false), NavAction::Ignore);
        assert_eq!(Navigator::on_click("#", |_| true), NavAction::Ignore);
    }

    #[test]
    fn lookup_uses_id_without_hash() {
        let seen = std::cell::RefCell::new(Vec::new());
        let _ = Navigator::on_click("#about", |id| {
            seen.borrow_mut().push(id.to_string());
            true
        });
        assert_eq!(seen.into_inner(), vec!["about".to_string()]);
    }
}
