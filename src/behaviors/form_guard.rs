use std::cell::RefCell;
use std::rc::Rc;

use futures::future::{FutureExt, LocalBoxFuture};
use once_cell::sync::Lazy;
use regex::Regex;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlInputElement};

use crate::behaviors::submission::{Delay, SimulatedSubmitter, Submitter, TimerDelay};
use crate::config::LandingConfig;
use crate::dom::{self, Listener};
use crate::error::{PageError, SubmitError, ValidationError};
use crate::markup;
use crate::styles;

pub const SUBMIT_LABEL: &str = "Get Started For Free";
pub const SUBMITTING_LABEL: &str = "Submitting...";
pub const SUCCESS_TEXT: &str = "Thank you! We'll be in touch soon.";
pub const FAILURE_TEXT: &str = "Something went wrong. Please try again.";

// U+FEFF counts as whitespace in browsers but not in `\s` or `char::is_whitespace`.
static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s\x{FEFF}@]+@[^\s\x{FEFF}@]+\.[^\s\x{FEFF}@]+$")
        .expect("email pattern compiles")
});

fn is_blank(c: char) -> bool {
    c.is_whitespace() || c == '\u{FEFF}'
}

/// Trims `raw` and checks it looks like `local@domain.tld`.
pub fn validate_email(raw: &str) -> Result<&str, ValidationError> {
    let email = raw.trim_matches(is_blank);
    if email.is_empty() {
        return Err(ValidationError::Empty);
    }
    if !EMAIL_PATTERN.is_match(email) {
        return Err(ValidationError::Malformed);
    }
    Ok(email)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageId(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEffect {
    /// Drop whichever message is showing and the input's error styling.
    ClearMessage,
    ShowError { text: String, flag_input: bool },
    ShowSuccess { text: &'static str },
    Lock { label: &'static str },
    Unlock { label: &'static str },
    ClearInput,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Busy,
    Invalid(ValidationError),
    Dispatch(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shown {
    Nothing,
    Error,
    Success(MessageId),
}

/// Validation and single-flight bookkeeping for the early access form.
#[derive(Debug)]
pub struct FormGuard {
    busy: bool,
    shown: Shown,
    next_id: u64,
}

impl Default for FormGuard {
    fn default() -> Self {
        Self {
            busy: false,
            shown: Shown::Nothing,
            next_id: 0,
        }
    }
}

impl FormGuard {
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn submit(&mut self, raw: &str) -> (SubmitOutcome, Vec<FormEffect>) {
        if self.busy {
            return (SubmitOutcome::Busy, Vec::new());
        }

        let mut effects = vec![FormEffect::ClearMessage];
        self.shown = Shown::Nothing;

        match validate_email(raw) {
            Err(reason) => {
                self.shown = Shown::Error;
                effects.push(FormEffect::ShowError {
                    text: reason.to_string(),
                    flag_input: true,
                });
                (SubmitOutcome::Invalid(reason), effects)
            }
            Ok(email) => {
                self.busy = true;
                effects.push(FormEffect::Lock {
                    label: SUBMITTING_LABEL,
                });
                (SubmitOutcome::Dispatch(email.to_string()), effects)
            }
        }
    }

    /// Settles the in-flight submission. A success hands back the id of the
    /// message so its expiry can be matched later.
    pub fn finish(&mut self, result: Result<(), SubmitError>) -> (Option<MessageId>, Vec<FormEffect>) {
        if !self.busy {
            return (None, Vec::new());
        }
        self.busy = false;

        match result {
            Ok(()) => {
                let id = MessageId(self.next_id);
                self.next_id += 1;
                self.shown = Shown::Success(id);
                let effects = vec![
                    FormEffect::ShowSuccess { text: SUCCESS_TEXT },
                    FormEffect::ClearInput,
                    FormEffect::Unlock {
                        label: SUBMIT_LABEL,
                    },
                ];
                (Some(id), effects)
            }
            Err(e) => {
                log::warn!("Signup submission failed: {}", e);
                self.shown = Shown::Error;
                let effects = vec![
                    FormEffect::ShowError {
                        text: FAILURE_TEXT.to_string(),
                        flag_input: false,
                    },
                    FormEffect::Unlock {
                        label: SUBMIT_LABEL,
                    },
                ];
                (None, effects)
            }
        }
    }

    pub fn expire(&mut self, id: MessageId) -> Vec<FormEffect> {
        if self.shown != Shown::Success(id) {
            return Vec::new();
        }
        self.shown = Shown::Nothing;
        vec![FormEffect::ClearMessage]
    }
}

pub trait FormView {
    fn apply(&self, effect: &FormEffect) -> Result<(), PageError>;
}

/// Runs submissions through a [`FormGuard`] and renders the results.
pub struct FormSession {
    guard: RefCell<FormGuard>,
    view: Rc<dyn FormView>,
    submitter: Rc<dyn Submitter>,
    delay: Rc<dyn Delay>,
    success_linger_ms: u32,
}

impl FormSession {
    pub fn new(
        view: Rc<dyn FormView>,
        submitter: Rc<dyn Submitter>,
        delay: Rc<dyn Delay>,
        success_linger_ms: u32,
    ) -> Rc<Self> {
        Rc::new(Self {
            guard: RefCell::new(FormGuard::default()),
            view,
            submitter,
            delay,
            success_linger_ms,
        })
    }

    pub fn is_busy(&self) -> bool {
        self.guard.borrow().is_busy()
    }

    /// Validates `raw` and, when it is accepted, returns the delivery to spawn.
    pub fn on_submit(self: &Rc<Self>, raw: &str) -> Option<LocalBoxFuture<'static, ()>> {
        let (outcome, effects) = self.guard.borrow_mut().submit(raw);
        self.apply_all(&effects);
        match outcome {
            SubmitOutcome::Dispatch(email) => Some(self.clone().deliver(email).boxed_local()),
            SubmitOutcome::Invalid(reason) => {
                log::debug!("Email rejected: {}", reason);
                None
            }
            SubmitOutcome::Busy => {
                log::debug!("Submission already in flight");
                None
            }
        }
    }

    async fn deliver(self: Rc<Self>, email: String) {
        let result = self.submitter.submit(email).await;
        let (success, effects) = self.guard.borrow_mut().finish(result);
        self.apply_all(&effects);

        if let Some(id) = success {
            self.delay.sleep(self.success_linger_ms).await;
            let effects = self.guard.borrow_mut().expire(id);
            self.apply_all(&effects);
        }
    }

    fn apply_all(&self, effects: &[FormEffect]) {
        for effect in effects {
            if let Err(e) = self.view.apply(effect) {
                log::warn!("Failed to update signup form ({:?}): {}", effect, e);
            }
        }
    }
}

struct DomFormView {
    document: Document,
    form: Element,
    input: HtmlInputElement,
    button: Option<Element>,
    group: Option<Element>,
    message: RefCell<Option<Element>>,
}

impl DomFormView {
    fn show(&self, block: Element) {
        if let Some(previous) = self.message.replace(Some(block)) {
            previous.remove();
        }
    }

    fn set_button(&self, label: &str, disabled: bool) -> Result<(), PageError> {
        if let Some(button) = &self.button {
            button.set_text_content(Some(label));
            button.toggle_attribute_with_force("disabled", disabled)?;
        }
        Ok(())
    }
}

impl FormView for DomFormView {
    fn apply(&self, effect: &FormEffect) -> Result<(), PageError> {
        match effect {
            FormEffect::ClearMessage => {
                if let Some(message) = self.message.borrow_mut().take() {
                    message.remove();
                }
                self.input.class_list().remove_1(markup::class::INPUT_ERROR)?;
            }
            FormEffect::ShowError { text, flag_input } => {
                if *flag_input {
                    self.input.class_list().add_1(markup::class::INPUT_ERROR)?;
                }
                let block = dom::styled_element(
                    &self.document,
                    "div",
                    markup::class::ERROR_MESSAGE,
                    styles::ERROR_MESSAGE_STYLE,
                    text,
                )?;
                match &self.group {
                    Some(group) => {
                        group.append_child(&block)?;
                    }
                    None => self.input.after_with_node_1(&block)?,
                }
                self.show(block);
            }
            FormEffect::ShowSuccess { text } => {
                let block = dom::styled_element(
                    &self.document,
                    "div",
                    markup::class::SUCCESS_MESSAGE,
                    styles::SUCCESS_MESSAGE_STYLE,
                    text,
                )?;
                self.form.append_child(&block)?;
                self.show(block);
            }
            FormEffect::Lock { label } => self.set_button(label, true)?,
            FormEffect::Unlock { label } => self.set_button(label, false)?,
            FormEffect::ClearInput => self.input.set_value(""),
        }
        Ok(())
    }
}

pub struct FormBinding {
    pub session: Rc<FormSession>,
    _submit: Listener,
}

pub fn bind(document: &Document, config: &LandingConfig) -> Result<Option<FormBinding>, PageError> {
    bind_with(
        document,
        Rc::new(SimulatedSubmitter {
            latency_ms: config.submit_latency_ms,
        }),
        Rc::new(TimerDelay),
        config.success_linger_ms,
    )
}

pub fn bind_with(
    document: &Document,
    submitter: Rc<dyn Submitter>,
    delay: Rc<dyn Delay>,
    success_linger_ms: u32,
) -> Result<Option<FormBinding>, PageError> {
    let Some(form) = dom::query(document, markup::FORM)? else {
        log::debug!("No early access form on this page");
        return Ok(None);
    };
    let Some(input) = dom::query(document, markup::EMAIL_INPUT)?
        .and_then(|element| element.dyn_into::<HtmlInputElement>().ok())
    else {
        log::warn!("Early access form has no email input, validation disabled");
        return Ok(None);
    };

    let view = Rc::new(DomFormView {
        document: document.clone(),
        form: form.clone(),
        input: input.clone(),
        button: dom::query(document, markup::SUBMIT_BUTTON)?,
        group: dom::query(document, markup::FORM_GROUP)?,
        message: RefCell::new(None),
    });
    let session = FormSession::new(view, submitter, delay, success_linger_ms);

    let submit = {
        let session = session.clone();
        Listener::new(&form, "submit", move |event| {
            event.prevent_default();
            if let Some(delivery) = session.on_submit(&input.value()) {
                wasm_bindgen_futures::spawn_local(delivery);
            }
        })?
    };

    Ok(Some(FormBinding {
        session,
        _submit: submit,
    }))
}
