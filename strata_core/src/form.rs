// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Contact-form validation and status feedback.
//!
//! Submitting never leaves the page. [`FormController::submit`] asks the
//! [`FormSurface`] whether its constraints hold, shows a success or failure
//! [`StatusMessage`], resets the fields only on success, and arms a hide
//! deadline. The banner hides exactly [`FormConfig::hide_after`] after it was
//! shown; a newer submit replaces the older deadline.
//!
//! The web backend's surface defers to the browser's built-in validation.
//! [`ConstraintForm`] is an in-memory surface implementing the same checks
//! for the constraint kinds the page uses.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::event::PageEvent;
use crate::time::{Duration, HostTime};
use crate::trace::{FormEvent, StatusClearedEvent, TraceSink, tracer_for};

/// Messages, colours and timing for form feedback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FormConfig {
    /// Shown when every constraint holds.
    pub success: StatusMessage,
    /// Shown when a constraint fails.
    pub failure: StatusMessage,
    /// How long a status stays visible.
    pub hide_after: Duration,
}

impl FormConfig {
    /// Feedback for the portfolio contact form.
    #[must_use]
    pub const fn contact() -> Self {
        Self {
            success: StatusMessage {
                text: "Message sent!",
                color: "#7CFC00",
            },
            failure: StatusMessage {
                text: "Please fill out all fields.",
                color: "#FF6347",
            },
            hide_after: Duration::from_millis(2000),
        }
    }
}

impl Default for FormConfig {
    fn default() -> Self {
        Self::contact()
    }
}

/// Text and colour of a status banner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatusMessage {
    /// Text content.
    pub text: &'static str,
    /// CSS colour.
    pub color: &'static str,
}

/// Result of checking a form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormOutcome {
    /// Every constraint holds.
    Valid,
    /// At least one constraint fails.
    Invalid {
        /// Name of the first failing field, when the surface can tell.
        field: Option<String>,
    },
}

impl FormOutcome {
    /// Returns `true` for [`FormOutcome::Valid`].
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

/// Kind of value a field accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Free text.
    Text,
    /// An e-mail address.
    Email,
}

/// Constraints on one field, mirroring the HTML attributes the page uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldConstraint {
    /// Field name.
    pub name: &'static str,
    /// `required` attribute.
    pub required: bool,
    /// `type` attribute.
    pub kind: FieldKind,
    /// `minlength` attribute, in characters; zero means none.
    pub min_len: usize,
}

impl FieldConstraint {
    /// A required text field.
    #[must_use]
    pub const fn required_text(name: &'static str) -> Self {
        Self {
            name,
            required: true,
            kind: FieldKind::Text,
            min_len: 0,
        }
    }

    /// A required e-mail field.
    #[must_use]
    pub const fn required_email(name: &'static str) -> Self {
        Self {
            name,
            required: true,
            kind: FieldKind::Email,
            min_len: 0,
        }
    }

    /// Sets the minimum length.
    #[must_use]
    pub const fn with_min_len(self, min_len: usize) -> Self {
        Self { min_len, ..self }
    }

    /// Checks `value` against this constraint.
    ///
    /// An empty optional field is always valid, as in HTML.
    #[must_use]
    pub fn accepts(&self, value: &str) -> bool {
        let value = value.trim();
        if value.is_empty() {
            return !self.required;
        }
        if value.chars().count() < self.min_len {
            return false;
        }
        match self.kind {
            FieldKind::Text => true,
            FieldKind::Email => is_email(value),
        }
    }
}

/// Minimal `local@domain.tld` check.
fn is_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

/// The form as seen by the controller.
pub trait FormSurface {
    /// Checks the form's constraints.
    fn check_validity(&self) -> FormOutcome;

    /// Clears every field.
    fn reset(&mut self);

    /// Shows a status banner.
    fn show_status(&mut self, message: &StatusMessage);

    /// Hides the status banner.
    fn hide_status(&mut self);
}

/// Ticket identifying one shown status, used to match a hide timer to the
/// status it was armed for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct StatusTicket(u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Shown {
    ticket: StatusTicket,
    hide_at: HostTime,
}

/// Submit handling and the timed status banner.
pub struct FormController {
    config: FormConfig,
    shown: Option<Shown>,
    next_ticket: u64,
    sink: Option<Box<dyn TraceSink>>,
}

impl fmt::Debug for FormController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormController")
            .field("config", &self.config)
            .field("shown", &self.shown)
            .finish_non_exhaustive()
    }
}

impl FormController {
    /// Creates a controller with no status shown.
    #[must_use]
    pub fn new(config: FormConfig) -> Self {
        Self {
            config,
            shown: None,
            next_ticket: 0,
            sink: None,
        }
    }

    /// Routes trace events to `sink`.
    pub fn set_trace_sink(&mut self, sink: Box<dyn TraceSink>) {
        self.sink = Some(sink);
    }

    /// Configuration in use.
    #[must_use]
    pub const fn config(&self) -> &FormConfig {
        &self.config
    }

    /// Returns `true` while a status is shown.
    #[must_use]
    pub const fn is_status_shown(&self) -> bool {
        self.shown.is_some()
    }

    /// Time at which the current status hides.
    #[must_use]
    pub fn hide_deadline(&self) -> Option<HostTime> {
        self.shown.map(|s| s.hide_at)
    }

    /// Handles a submit at `now`.
    ///
    /// Returns the outcome and the ticket of the status now shown; pass the
    /// ticket to [`expire`](Self::expire) when a timer armed for
    /// [`FormConfig::hide_after`] fires.
    pub fn submit(
        &mut self,
        surface: &mut dyn FormSurface,
        now: HostTime,
    ) -> (FormOutcome, StatusTicket) {
        let outcome = surface.check_validity();
        let message = if outcome.is_valid() {
            surface.reset();
            self.config.success
        } else {
            self.config.failure
        };
        surface.show_status(&message);

        let ticket = StatusTicket(self.next_ticket);
        self.next_ticket += 1;
        self.shown = Some(Shown {
            ticket,
            hide_at: now + self.config.hide_after,
        });

        tracer_for(&mut self.sink).form(&FormEvent {
            at: now,
            valid: outcome.is_valid(),
        });
        (outcome, ticket)
    }

    /// Handles [`PageEvent::Submit`]; every other event is ignored.
    ///
    /// Returns what [`submit`](Self::submit) returns, or `None` when the
    /// event was not a submit.
    pub fn handle(
        &mut self,
        event: &PageEvent<'_>,
        surface: &mut dyn FormSurface,
    ) -> Option<(FormOutcome, StatusTicket)> {
        match *event {
            PageEvent::Submit { now } => Some(self.submit(surface, now)),
            _ => None,
        }
    }

    /// Hides the status if its deadline has passed. Returns `true` if it was
    /// hidden by this call.
    pub fn tick(&mut self, surface: &mut dyn FormSurface, now: HostTime) -> bool {
        match self.shown {
            Some(shown) if now >= shown.hide_at => {
                self.hide(surface, now);
                true
            }
            _ => false,
        }
    }

    /// Hides the status if `ticket` still names the one shown. Stale tickets
    /// from superseded submits are ignored.
    pub fn expire(
        &mut self,
        surface: &mut dyn FormSurface,
        ticket: StatusTicket,
        now: HostTime,
    ) -> bool {
        match self.shown {
            Some(shown) if shown.ticket == ticket => {
                self.hide(surface, now);
                true
            }
            _ => false,
        }
    }

    fn hide(&mut self, surface: &mut dyn FormSurface, now: HostTime) {
        surface.hide_status();
        self.shown = None;
        tracer_for(&mut self.sink).status_cleared(&StatusClearedEvent { at: now });
    }
}

/// In-memory form checked against [`FieldConstraint`]s.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConstraintForm {
    fields: Vec<(FieldConstraint, String)>,
    status: Option<StatusMessage>,
}

impl ConstraintForm {
    /// Creates a form with empty fields.
    #[must_use]
    pub fn new(constraints: &[FieldConstraint]) -> Self {
        Self {
            fields: constraints.iter().map(|&c| (c, String::new())).collect(),
            status: None,
        }
    }

    /// The name, e-mail and message fields of the contact form.
    #[must_use]
    pub fn contact() -> Self {
        Self::new(&[
            FieldConstraint::required_text("name"),
            FieldConstraint::required_email("email"),
            FieldConstraint::required_text("message"),
        ])
    }

    /// Sets a field value. Returns `false` if no field has that name.
    pub fn set(&mut self, name: &str, value: &str) -> bool {
        match self.fields.iter_mut().find(|(c, _)| c.name == name) {
            Some((_, v)) => {
                v.clear();
                v.push_str(value);
                true
            }
            None => false,
        }
    }

    /// Current value of a field.
    #[must_use]
    pub fn value(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(c, _)| c.name == name)
            .map(|(_, v)| v.as_str())
    }

    /// Status currently shown.
    #[must_use]
    pub const fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }
}

impl FormSurface for ConstraintForm {
    fn check_validity(&self) -> FormOutcome {
        match self.fields.iter().find(|(c, v)| !c.accepts(v)) {
            None => FormOutcome::Valid,
            Some((c, _)) => FormOutcome::Invalid {
                field: Some(String::from(c.name)),
            },
        }
    }

    fn reset(&mut self) {
        for (_, v) in &mut self.fields {
            v.clear();
        }
    }

    fn show_status(&mut self, message: &StatusMessage) {
        self.status = Some(*message);
    }

    fn hide_status(&mut self) {
        self.status = None;
    }
}
