use std::cell::RefCell;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

pub mod behaviors {
    pub mod form_guard;
    pub mod header;
    pub mod image_loader;
    pub mod navigator;
    pub mod reveal;
    pub mod responsive_nav;
    pub mod submission;
}
pub mod config;
pub mod controller;
pub mod dom;
pub mod error;
pub mod logging;
pub mod markup;
pub mod styles;

use config::LandingConfig;
use controller::PageController;
use error::PageError;

thread_local! {
    // Listeners and behavior state live as long as the page does.
    static PAGE: RefCell<Option<PageController>> = RefCell::new(None);
}

#[wasm_bindgen(start)]
pub fn start() {
    logging::init();
    if let Err(e) = boot() {
        log::error!("Landing page failed to start: {}", e);
    }
}

fn boot() -> Result<(), PageError> {
    let window = web_sys::window().ok_or(PageError::NoWindow)?;
    let document = window.document().ok_or(PageError::NoDocument)?;

    if still_loading(&document.ready_state()) {
        let on_ready = Closure::once(move || {
            if let Err(e) = mount() {
                log::error!("Landing page failed to mount: {}", e);
            }
        });
        document.add_event_listener_with_callback(
            "DOMContentLoaded",
            on_ready.as_ref().unchecked_ref(),
        )?;
        on_ready.forget();
        Ok(())
    } else {
        mount()
    }
}

/// `document.readyState` is a plain string; only `"loading"` means the body
/// hasn't been parsed yet.
fn still_loading(ready_state: &str) -> bool {
    ready_state == "loading"
}

fn mount() -> Result<(), PageError> {
    let window = web_sys::window().ok_or(PageError::NoWindow)?;
    let document = window.document().ok_or(PageError::NoDocument)?;

    let config = match LandingConfig::from_document(&document) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("Ignoring landing page config: {}", e);
            LandingConfig::default()
        }
    };
    logging::apply_level(&config.log_level);

    let controller = PageController::install(&window, config)?;
    PAGE.with(|page| *page.borrow_mut() = Some(controller));

    // Printed regardless of the configured log level.
    gloo_console::log!("Fylo landing page loaded successfully! 🚀");
    Ok(())
}
