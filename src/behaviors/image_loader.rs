use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlImageElement};

use crate::dom::{self, Listener};
use crate::error::PageError;
use crate::markup;
use crate::styles;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageStatus {
    Pending,
    Loaded,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageEffect {
    FadeIn,
    HideAndInsertFallback,
}

#[derive(Debug, Clone)]
struct ImageRecord {
    feature_icon: bool,
    status: ImageStatus,
    fallback_inserted: bool,
}

#[derive(Debug, Default)]
pub struct ImageLoader {
    images: Vec<ImageRecord>,
}

impl ImageLoader {
    pub fn register(&mut self, feature_icon: bool) -> ImageId {
        self.images.push(ImageRecord {
            feature_icon,
            status: ImageStatus::Pending,
            fallback_inserted: false,
        });
        ImageId(self.images.len() - 1)
    }

    pub fn status(&self, id: ImageId) -> Option<ImageStatus> {
        self.images.get(id.0).map(|record| record.status)
    }

    pub fn on_load(&mut self, id: ImageId) -> Vec<ImageEffect> {
        let Some(record) = self.images.get_mut(id.0) else {
            return Vec::new();
        };
        record.status = ImageStatus::Loaded;
        vec![ImageEffect::FadeIn]
    }

    /// Feature icons get a single fallback glyph; other images are only logged.
    pub fn on_error(&mut self, id: ImageId) -> Vec<ImageEffect> {
        let Some(record) = self.images.get_mut(id.0) else {
            return Vec::new();
        };
        record.status = ImageStatus::Failed;
        if !record.feature_icon || record.fallback_inserted {
            return Vec::new();
        }
        record.fallback_inserted = true;
        vec![ImageEffect::HideAndInsertFallback]
    }
}

pub struct ImageBinding {
    pub state: Rc<RefCell<ImageLoader>>,
    _listeners: Vec<Listener>,
}

pub fn bind(document: &Document, fallback_glyph: &str) -> Result<ImageBinding, PageError> {
    let state = Rc::new(RefCell::new(ImageLoader::default()));
    let mut listeners = Vec::new();

    for element in dom::query_all(document, markup::IMAGES)? {
        let Ok(image) = element.dyn_into::<HtmlImageElement>() else {
            continue;
        };
        let id = state
            .borrow_mut()
            .register(image.class_list().contains(markup::class::FEATURE_ICON));

        dom::set_style(&image, markup::IMAGES, "opacity", "0")?;
        dom::set_style(&image, markup::IMAGES, "transition", styles::IMAGE_TRANSITION)?;

        let on_load = {
            let state = state.clone();
            let document = document.clone();
            let image = image.clone();
            let glyph = fallback_glyph.to_string();
            move || {
                gloo_console::log!("Image loaded:", image.src());
                let effects = state.borrow_mut().on_load(id);
                apply_all(&document, &image, &glyph, &effects);
            }
        };
        let on_error = {
            let state = state.clone();
            let document = document.clone();
            let image = image.clone();
            let glyph = fallback_glyph.to_string();
            move || {
                gloo_console::error!("Image failed to load:", image.src());
                let effects = state.borrow_mut().on_error(id);
                apply_all(&document, &image, &glyph, &effects);
            }
        };

        // Cached images finished before we got here and won't fire `load` again.
        if image.complete() {
            on_load();
        }
        listeners.push(Listener::new(&image, "load", move |_| on_load())?);
        listeners.push(Listener::new(&image, "error", move |_| on_error())?);
    }

    log::debug!("Tracking {} images", listeners.len() / 2);
    Ok(ImageBinding {
        state,
        _listeners: listeners,
    })
}

fn apply_all(document: &Document, image: &HtmlImageElement, glyph: &str, effects: &[ImageEffect]) {
    for effect in effects {
        if let Err(e) = apply(document, image, glyph, *effect) {
            log::warn!("Failed to update image ({:?}): {}", effect, e);
        }
    }
}

fn apply(
    document: &Document,
    image: &HtmlImageElement,
    glyph: &str,
    effect: ImageEffect,
) -> Result<(), PageError> {
    match effect {
        ImageEffect::FadeIn => dom::set_style(image, markup::IMAGES, "opacity", "1"),
        ImageEffect::HideAndInsertFallback => {
            dom::set_style(image, markup::IMAGES, "display", "none")?;
            let fallback: Element = dom::styled_element(
                document,
                "div",
                markup::class::ICON_FALLBACK,
                styles::ICON_FALLBACK_STYLE,
                glyph,
            )?;
            image.before_with_node_1(&fallback)?;
            Ok(())
        }
    }
}
