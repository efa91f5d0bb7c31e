// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Contact form over a live `<form>` element.

use web_sys::{HtmlElement, HtmlFormElement};

use strata_core::form::{FormOutcome, FormSurface, StatusMessage};

/// A [`FormSurface`] backed by native constraint validation.
///
/// Validity comes from `form.checkValidity()`; the first `:invalid` control
/// names the failing field. The status banner gets its text and colour set
/// and the shown class toggled.
pub struct DomForm {
    form: HtmlFormElement,
    status: Option<HtmlElement>,
    shown_class: &'static str,
}

impl core::fmt::Debug for DomForm {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DomForm")
            .field("has_status", &self.status.is_some())
            .field("shown_class", &self.shown_class)
            .finish_non_exhaustive()
    }
}

impl DomForm {
    /// Wraps `form` and its optional status element.
    #[must_use]
    pub fn new(form: HtmlFormElement, status: Option<HtmlElement>, shown_class: &'static str) -> Self {
        Self {
            form,
            status,
            shown_class,
        }
    }
}

impl FormSurface for DomForm {
    fn check_validity(&self) -> FormOutcome {
        if self.form.check_validity() {
            return FormOutcome::Valid;
        }
        let field = self
            .form
            .query_selector(":invalid")
            .ok()
            .flatten()
            .and_then(|el| el.get_attribute("name"));
        FormOutcome::Invalid { field }
    }

    fn reset(&mut self) {
        self.form.reset();
    }

    fn show_status(&mut self, message: &StatusMessage) {
        let Some(status) = &self.status else {
            return;
        };
        status.set_text_content(Some(message.text));
        let _ = status.style().set_property("color", message.color);
        let _ = status.class_list().add_1(self.shown_class);
    }

    fn hide_status(&mut self) {
        if let Some(status) = &self.status {
            let _ = status.class_list().remove_1(self.shown_class);
        }
    }
}
