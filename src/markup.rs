//! Selectors and class names the page markup exposes to the behaviors.

pub const NAV_LINKS: &str = ".nav__link[href^=\"#\"]";

pub const FORM: &str = ".early-access__form";
pub const EMAIL_INPUT: &str = ".form-input";
pub const SUBMIT_BUTTON: &str = ".early-access__form .btn";
pub const FORM_GROUP: &str = ".form-group";

pub const HEADER: &str = ".header";

pub const REVEAL_TARGETS: &str = ".feature, .testimonial, .productive__content";

pub const NAV_CONTAINER: &str = ".nav__container";
pub const NAV_MENU: &str = ".nav__menu";

pub const IMAGES: &str = "img";

pub mod class {
    pub const INPUT_ERROR: &str = "error";
    pub const ERROR_MESSAGE: &str = "error-message";
    pub const SUCCESS_MESSAGE: &str = "success-message";
    pub const REVEALED: &str = "animate-in";
    pub const MENU_TOGGLE: &str = "mobile-menu-toggle";
    pub const MENU_OPEN: &str = "mobile-open";
    pub const FEATURE_ICON: &str = "feature__icon";
    pub const ICON_FALLBACK: &str = "feature__icon-fallback";
}
