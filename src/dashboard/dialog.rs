use serde::Serialize;

use crate::validation::{FieldErrors, Validate};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", content = "id", rename_all = "snake_case")]
pub enum FormMode {
    Create,
    Edit(String),
}

#[derive(Debug, Clone, Serialize)]
pub struct OpenForm<F> {
    pub mode: FormMode,
    pub values: F,
    pub errors: FieldErrors,
}

/// Modal create/edit form. Values survive a failed submit.
#[derive(Debug, Clone, Serialize)]
pub enum FormDialog<F> {
    Closed,
    Open(OpenForm<F>),
}

impl<F> Default for FormDialog<F> {
    fn default() -> Self {
        FormDialog::Closed
    }
}

impl<F: Validate> FormDialog<F> {
    pub fn open(&mut self, mode: FormMode, values: F) {
        *self = FormDialog::Open(OpenForm {
            mode,
            values,
            errors: FieldErrors::new(),
        });
    }

    pub fn close(&mut self) {
        *self = FormDialog::Closed;
    }

    pub fn is_open(&self) -> bool {
        matches!(self, FormDialog::Open(_))
    }

    pub fn form(&self) -> Option<&OpenForm<F>> {
        match self {
            FormDialog::Open(form) => Some(form),
            FormDialog::Closed => None,
        }
    }

    pub fn values_mut(&mut self) -> Option<&mut F> {
        match self {
            FormDialog::Open(form) => Some(&mut form.values),
            FormDialog::Closed => None,
        }
    }

    pub fn errors(&self) -> Option<&FieldErrors> {
        self.form().map(|f| &f.errors)
    }

    /// Re-checks one field when it loses focus.
    pub fn blur(&mut self, field: &str) {
        if let FormDialog::Open(form) = self {
            form.errors.remove(field);
            if let Some(message) = form.values.validate_field(field) {
                form.errors.add(field, message);
            }
        }
    }

    /// Full validation on submit. Errors are kept inline and the values
    /// returned only when the form is clean.
    pub fn validate(&mut self) -> Option<(&FormMode, &F)> {
        match self {
            FormDialog::Open(form) => match form.values.validate() {
                Ok(()) => {
                    form.errors = FieldErrors::new();
                    Some((&form.mode, &form.values))
                }
                Err(errors) => {
                    form.errors = errors;
                    None
                }
            },
            FormDialog::Closed => None,
        }
    }
}

/// "Are you sure?" gate in front of a destructive action.
#[derive(Debug, Clone, Serialize)]
pub struct ConfirmDialog<A> {
    pending: Option<A>,
    prompt: Option<String>,
}

impl<A> Default for ConfirmDialog<A> {
    fn default() -> Self {
        Self {
            pending: None,
            prompt: None,
        }
    }
}

impl<A> ConfirmDialog<A> {
    pub fn request(&mut self, action: A, prompt: impl Into<String>) {
        self.pending = Some(action);
        self.prompt = Some(prompt.into());
    }

    pub fn is_open(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending(&self) -> Option<&A> {
        self.pending.as_ref()
    }

    pub fn prompt(&self) -> Option<&str> {
        self.prompt.as_deref()
    }

    pub fn cancel(&mut self) {
        self.pending = None;
        self.prompt = None;
    }

    /// Hands out the pending action exactly once.
    pub fn confirm(&mut self) -> Option<A> {
        self.prompt = None;
        self.pending.take()
    }
}
