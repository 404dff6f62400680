use web_sys::Document;

use crate::error::PageError;

pub const ANIMATION_CSS: &str = r#"
    .feature, .testimonial, .productive__content {
        opacity: 0;
        transform: translateY(30px);
        transition: opacity 0.6s ease-out, transform 0.6s ease-out;
    }

    .animate-in {
        opacity: 1 !important;
        transform: translateY(0) !important;
    }

    .form-input.error {
        border: 2px solid var(--red-500);
    }

    .error-message {
        animation: slideIn 0.3s ease-out;
    }

    @keyframes slideIn {
        from {
            opacity: 0;
            transform: translateY(-10px);
        }
        to {
            opacity: 1;
            transform: translateY(0);
        }
    }
"#;

/// Mobile menu rules; the media queries follow the configured breakpoint.
pub fn mobile_nav_css(breakpoint_px: u32) -> String {
    format!(
        r#"
    @media (max-width: {max}px) {{
        .nav__menu {{
            position: absolute;
            top: 100%;
            left: 50%;
            transform: translateX(-50%) translateY(-100%);
            background-color: var(--navy-850);
            flex-direction: column;
            padding: 1rem 2rem;
            border-radius: 8px;
            opacity: 0;
            visibility: hidden;
            transition: all 0.3s ease;
            box-shadow: 0 5px 15px rgba(0, 0, 0, 0.2);
            min-width: 200px;
            text-align: center;
        }}

        .nav__menu.mobile-open {{
            transform: translateX(-50%) translateY(0);
            opacity: 1;
            visibility: visible;
        }}

        .nav__container {{
            position: relative;
        }}

        .mobile-menu-toggle {{
            display: block !important;
        }}
    }}

    @media (min-width: {min}px) {{
        .mobile-menu-toggle {{
            display: none !important;
        }}
    }}
"#,
        max = breakpoint_px,
        min = breakpoint_px.saturating_add(1),
    )
}

pub const HEADER_TRANSITION: &str = "transform 0.3s ease-in-out";
pub const IMAGE_TRANSITION: &str = "opacity 0.3s ease";

pub const ERROR_MESSAGE_STYLE: &str =
    "color: var(--red-500); font-size: 0.9rem; margin-top: 0.5rem; text-align: left;";

pub const SUCCESS_MESSAGE_STYLE: &str = "color: var(--teal-200); font-size: 1rem; \
     margin-top: 1rem; text-align: center; font-weight: 700;";

pub const MENU_TOGGLE_STYLE: &str = "display: block; background: none; border: none; \
     color: white; font-size: 1.5rem; cursor: pointer; padding: 0.5rem;";

pub const ICON_FALLBACK_STYLE: &str = "width: 80px; height: 80px; \
     background-color: var(--teal-200); border-radius: 50%; margin: 0 auto 1.5rem; \
     display: flex; align-items: center; justify-content: center; font-size: 2rem; \
     color: var(--navy-900);";

/// Appends the animation and mobile navigation stylesheets to `<head>`.
pub fn inject(document: &Document, breakpoint_px: u32) -> Result<(), PageError> {
    let Some(head) = document.head() else {
        log::debug!("No <head>, skipping stylesheet injection");
        return Ok(());
    };
    for css in [ANIMATION_CSS.to_string(), mobile_nav_css(breakpoint_px)] {
        let style = document.create_element("style")?;
        style.set_text_content(Some(&css));
        head.append_child(&style)?;
    }
    Ok(())
}
