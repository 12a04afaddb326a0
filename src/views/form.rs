//! Entity form modality
//!
//! ```text
//! Closed ──open_create──▶ CreatingNew ──begin_submit──▶ Submitting ──ok──▶ Closed
//! Closed ──open_edit────▶ Editing     ──begin_submit──▶ Submitting ──err─▶ (previous open state)
//! CreatingNew | Editing ──cancel──▶ Closed
//! ```
//!
//! Create vs update is decided only by whether the form was opened with an
//! existing entity.

use std::fmt::Debug;
use thiserror::Error;

use crate::models::{Course, Entity};

/// Editable, string-backed field values for one entity type
pub trait FormDraft: Clone + Debug + Send {
    type Entity: Entity;
    type Input;

    /// Values for a fresh create form
    fn blank(courses: &[Course]) -> Self;

    /// Values pre-filled from an existing entity
    fn from_entity(entity: &Self::Entity) -> Self;

    /// Check required fields and build the payload
    fn validate(&self) -> Result<Self::Input, FormError>;

    /// Non-blocking remarks about otherwise valid values
    fn warnings(&self) -> Vec<String> {
        Vec::new()
    }
}

/// Client-side form errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Form is not open")]
    NotOpen,

    #[error("A submission is already in progress")]
    Busy,

    #[error("{0} is required")]
    Required(&'static str),

    #[error("Invalid {field}: {value}")]
    Invalid { field: &'static str, value: String },
}

/// Where the form currently is
#[derive(Debug, Clone)]
pub enum FormState<E, D> {
    Closed,
    CreatingNew(D),
    Editing(E, D),
    Submitting { editing: Option<E>, draft: D },
}

/// What a validated form asks the backend to do
#[derive(Debug, Clone, PartialEq)]
pub enum Submission<I> {
    Create(I),
    Update { id: String, input: I },
}

/// Modal create/edit form for one entity type
#[derive(Debug)]
pub struct EntityForm<D: FormDraft> {
    state: FormState<D::Entity, D>,
}

impl<D: FormDraft> Default for EntityForm<D> {
    fn default() -> Self {
        Self {
            state: FormState::Closed,
        }
    }
}

impl<D: FormDraft> EntityForm<D> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &FormState<D::Entity, D> {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        !matches!(self.state, FormState::Closed)
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.state, FormState::Submitting { .. })
    }

    /// The entity being edited, if the form was opened for editing
    pub fn editing(&self) -> Option<&D::Entity> {
        match &self.state {
            FormState::Editing(entity, _) => Some(entity),
            FormState::Submitting { editing, .. } => editing.as_ref(),
            _ => None,
        }
    }

    pub fn draft(&self) -> Option<&D> {
        match &self.state {
            FormState::Closed => None,
            FormState::CreatingNew(draft)
            | FormState::Editing(_, draft)
            | FormState::Submitting { draft, .. } => Some(draft),
        }
    }

    /// Field access for binding input; unavailable while submitting
    pub fn draft_mut(&mut self) -> Option<&mut D> {
        match &mut self.state {
            FormState::CreatingNew(draft) | FormState::Editing(_, draft) => Some(draft),
            _ => None,
        }
    }

    pub fn open_create(&mut self, courses: &[Course]) {
        self.state = FormState::CreatingNew(D::blank(courses));
    }

    pub fn open_edit(&mut self, entity: D::Entity) {
        let draft = D::from_entity(&entity);
        self.state = FormState::Editing(entity, draft);
    }

    /// Close without side effects. In-flight submissions cannot be cancelled.
    pub fn cancel(&mut self) -> bool {
        match self.state {
            FormState::CreatingNew(_) | FormState::Editing(..) => {
                self.state = FormState::Closed;
                true
            }
            _ => false,
        }
    }

    /// Validate the draft and move to `Submitting`.
    ///
    /// On a validation error the form stays open and unchanged.
    pub fn begin_submit(&mut self) -> Result<Submission<D::Input>, FormError> {
        let input = match &self.state {
            FormState::Closed => return Err(FormError::NotOpen),
            FormState::Submitting { .. } => return Err(FormError::Busy),
            FormState::CreatingNew(draft) | FormState::Editing(_, draft) => draft.validate()?,
        };

        let state = std::mem::replace(&mut self.state, FormState::Closed);
        let (submission, editing, draft) = match state {
            FormState::CreatingNew(draft) => (Submission::Create(input), None, draft),
            FormState::Editing(entity, draft) => (
                Submission::Update {
                    id: entity.id().to_string(),
                    input,
                },
                Some(entity),
                draft,
            ),
            // Closed and Submitting returned above
            other => {
                self.state = other;
                return Err(FormError::NotOpen);
            }
        };

        self.state = FormState::Submitting { editing, draft };
        Ok(submission)
    }

    /// Resolve a submission: close on success, reopen with the same draft on failure
    pub fn finish_submit(&mut self, succeeded: bool) {
        let state = std::mem::replace(&mut self.state, FormState::Closed);

        self.state = match state {
            FormState::Submitting { .. } if succeeded => FormState::Closed,
            FormState::Submitting {
                editing: Some(entity),
                draft,
            } => FormState::Editing(entity, draft),
            FormState::Submitting {
                editing: None,
                draft,
            } => FormState::CreatingNew(draft),
            other => other,
        };
    }
}

/// Trimmed value, `None` when blank
pub(crate) fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Trimmed value, or `FormError::Required`
pub(crate) fn required(value: &str, field: &'static str) -> Result<String, FormError> {
    optional(value).ok_or(FormError::Required(field))
}
