use std::cell::RefCell;
use std::rc::Rc;

use web_sys::{Element, Window};

use crate::dom::{self, Listener};
use crate::error::PageError;
use crate::markup;
use crate::styles;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderPosition {
    Shown,
    Hidden,
}

impl HeaderPosition {
    pub fn transform(self) -> &'static str {
        match self {
            HeaderPosition::Shown => "translateY(0)",
            HeaderPosition::Hidden => "translateY(-100%)",
        }
    }
}

/// Hides the header while the reader scrolls down past the threshold.
#[derive(Debug, Clone)]
pub struct HeaderAutoHide {
    threshold: f64,
    last_offset: f64,
    position: HeaderPosition,
}

impl HeaderAutoHide {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            last_offset: 0.0,
            position: HeaderPosition::Shown,
        }
    }

    pub fn position(&self) -> HeaderPosition {
        self.position
    }

    /// Returns the new position when this reading changes it.
    pub fn on_scroll(&mut self, offset: f64) -> Option<HeaderPosition> {
        let offset = offset.max(0.0);
        let next = if offset > self.last_offset && offset > self.threshold {
            HeaderPosition::Hidden
        } else {
            HeaderPosition::Shown
        };
        self.last_offset = offset;

        if next == self.position {
            return None;
        }
        self.position = next;
        Some(next)
    }
}

pub struct HeaderBinding {
    pub state: Rc<RefCell<HeaderAutoHide>>,
    _scroll: Listener,
}

pub fn bind(window: &Window, threshold: f64) -> Result<Option<HeaderBinding>, PageError> {
    let document = window.document().ok_or(PageError::NoDocument)?;
    let Some(header) = dom::query(&document, markup::HEADER)? else {
        log::debug!("No header, auto-hide disabled");
        return Ok(None);
    };
    dom::set_style(&header, markup::HEADER, "transition", styles::HEADER_TRANSITION)?;

    let state = Rc::new(RefCell::new(HeaderAutoHide::new(threshold)));
    let scroll = {
        let state = state.clone();
        let win = window.clone();
        Listener::new(window, "scroll", move |_| {
            let offset = dom::scroll_offset(&win);
            let moved = state.borrow_mut().on_scroll(offset);
            if let Some(position) = moved {
                place(&header, position);
            }
        })?
    };

    Ok(Some(HeaderBinding {
        state,
        _scroll: scroll,
    }))
}

fn place(header: &Element, position: HeaderPosition) {
    if let Err(e) = dom::set_style(header, markup::HEADER, "transform", position.transform()) {
        log::warn!("Failed to move header: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(header: &mut HeaderAutoHide, offsets: &[f64]) -> HeaderPosition {
        for offset in offsets {
            header.on_scroll(*offset);
        }
        header.position()
    }

    #[test]
    fn scrolling_down_past_threshold_hides() {
        let mut header = HeaderAutoHide::new(100.0);
        assert_eq!(run(&mut header, &[20.0, 60.0, 99.0]), HeaderPosition::Shown);
        assert_eq!(header.on_scroll(150.0), Some(HeaderPosition::Hidden));
    }

    #[test]
    fn threshold_is_strict() {
        let mut header = HeaderAutoHide::new(100.0);
        assert_eq!(header.on_scroll(100.0), None);
        assert_eq!(header.position(), HeaderPosition::Shown);
        assert_eq!(header.on_scroll(100.5), Some(HeaderPosition::Hidden));
    }

    #[test]
    fn any_decrease_shows_again() {
        let mut header = HeaderAutoHide::new(100.0);
        run(&mut header, &[200.0, 800.0, 1_600.0]);
        assert_eq!(header.position(), HeaderPosition::Hidden);
        assert_eq!(header.on_scroll(1_590.0), Some(HeaderPosition::Shown));
    }

    #[test]
    fn equal_reading_counts_as_not_scrolling_down() {
        let mut header = HeaderAutoHide::new(100.0);
        run(&mut header, &[300.0, 400.0]);
        assert_eq!(header.on_scroll(400.0), Some(HeaderPosition::Shown));
    }

    #[test]
    fn redundant_readings_produce_no_change() {
        let mut header = HeaderAutoHide::new(100.0);
        assert_eq!(header.on_scroll(300.0), Some(HeaderPosition::Hidden));
        assert_eq!(header.on_scroll(500.0), None);
        assert_eq!(header.on_scroll(50.0), Some(HeaderPosition::Shown));
        assert_eq!(header.on_scroll(40.0), None);
    }

    #[test]
    fn overscroll_clamps_to_zero() {
        let mut header = HeaderAutoHide::new(0.0);
        header.on_scroll(-40.0);
        assert_eq!(header.on_scroll(1.0), Some(HeaderPosition::Hidden));
    }
}
