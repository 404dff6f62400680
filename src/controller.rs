use web_sys::Window;

use crate::behaviors::form_guard::{self, FormBinding};
use crate::behaviors::header::{self, HeaderBinding};
use crate::behaviors::image_loader::{self, ImageBinding};
use crate::behaviors::navigator;
use crate::behaviors::responsive_nav::{self, ResponsiveNavBinding};
use crate::behaviors::reveal::{self, RevealBinding};
use crate::config::LandingConfig;
use crate::dom::Listener;
use crate::error::PageError;
use crate::styles;

/// Owns every behavior bound to the landing page. Dropping it detaches all
/// listeners and the reveal observer.
pub struct PageController {
    pub config: LandingConfig,
    pub form: Option<FormBinding>,
    pub header: Option<HeaderBinding>,
    pub reveal: Option<RevealBinding>,
    pub nav: Option<ResponsiveNavBinding>,
    pub images: Option<ImageBinding>,
    nav_links: Vec<Listener>,
}

impl PageController {
    /// Binds each behavior on its own. A behavior that fails to bind is
    /// logged and left out; the rest of the page keeps working.
    pub fn install(window: &Window, config: LandingConfig) -> Result<Self, PageError> {
        let document = window.document().ok_or(PageError::NoDocument)?;

        settle("stylesheets", styles::inject(&document, config.nav_breakpoint_px).map(Some));

        let nav_links = settle("smooth scrolling", navigator::bind(&document).map(Some))
            .unwrap_or_default();
        let form = settle("email form", form_guard::bind(&document, &config));
        let header = settle("header", header::bind(window, config.header_hide_threshold_px));
        let reveal = settle("reveal on scroll", reveal::bind(&document, &config));
        let nav = settle("mobile navigation", responsive_nav::bind(window, config.nav_breakpoint_px));
        let images = settle(
            "image loading",
            image_loader::bind(&document, &config.fallback_glyph).map(Some),
        );

        Ok(Self {
            config,
            form,
            header,
            reveal,
            nav,
            images,
            nav_links,
        })
    }

    /// Number of in-page links that got a smooth-scroll listener.
    pub fn nav_link_count(&self) -> usize {
        self.nav_links.len()
    }
}

fn settle<T>(behavior: &str, bound: Result<Option<T>, PageError>) -> Option<T> {
    match bound {
        Ok(binding) => binding,
        Err(e) => {
            log::warn!("Skipping {}: {}", behavior, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_binding_is_dropped_not_propagated() {
        let failed: Result<Option<u8>, PageError> =
            Err(PageError::JavaScript("SyntaxError".to_string()));
        assert_eq!(settle("reveal on scroll", failed), None);
    }

    #[test]
    fn successful_and_absent_bindings_pass_through() {
        assert_eq!(settle::<u8>("header", Ok(Some(3))), Some(3));
        assert_eq!(settle::<u8>("header", Ok(None)), None);
    }
}
