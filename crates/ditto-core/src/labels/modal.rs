//! The three-step Beatport label modal.
//!
//! ```text
//! select  -> add       (create new)
//! select  -> upgrade   (pick a label not yet on Beatport)
//! select  -> closed    (pick a Beatport label)
//! add     -> select    (back)
//! upgrade -> select    (back)
//! add     -> closed    (submit: add + select)
//! upgrade -> closed    (submit: upgrade + select)
//! any     -> closed    (close)
//! ```

use std::fmt;

use serde::Serialize;

use super::{LabelError, LabelRegistry};

/// Which page of the modal is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ModalStep {
    Select,
    Add,
    Upgrade,
}

impl fmt::Display for ModalStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Select => "select",
            Self::Add => "add",
            Self::Upgrade => "upgrade",
        };
        f.write_str(s)
    }
}

/// User actions inside the modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalAction {
    /// "Create a Beatport Label" on the select page.
    CreateNew,
    /// Pick an existing label on the select page.
    PickLabel(String),
    Back,
    SubmitAdd(String),
    SubmitUpgrade,
    Close,
}

impl ModalAction {
    fn name(&self) -> &'static str {
        match self {
            Self::CreateNew => "create_new",
            Self::PickLabel(_) => "pick_label",
            Self::Back => "back",
            Self::SubmitAdd(_) => "submit_add",
            Self::SubmitUpgrade => "submit_upgrade",
            Self::Close => "close",
        }
    }
}

/// Errors from driving the modal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModalError {
    #[error("label modal is not open")]
    NotOpen,

    #[error("invalid label modal transition: {action} from {step}")]
    InvalidTransition { step: ModalStep, action: &'static str },

    #[error(transparent)]
    Label(#[from] LabelError),
}

/// What the modal looks like after an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalOutcome {
    Open(LabelModal),
    Closed,
}

/// Open modal state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelModal {
    step: ModalStep,
    label_to_upgrade: Option<String>,
}

impl LabelModal {
    /// Open on the select page.
    pub fn select() -> Self {
        Self {
            step: ModalStep::Select,
            label_to_upgrade: None,
        }
    }

    /// Open directly on the upgrade page for `name`.
    pub fn upgrade(name: impl Into<String>) -> Self {
        Self {
            step: ModalStep::Upgrade,
            label_to_upgrade: Some(name.into()),
        }
    }

    pub fn step(&self) -> ModalStep {
        self.step
    }

    pub fn label_to_upgrade(&self) -> Option<&str> {
        self.label_to_upgrade.as_deref()
    }

    /// Apply `action`, mutating `registry` only on a successful submit or
    /// pick. On error neither the modal nor the registry changes.
    pub fn transition(
        &self,
        action: ModalAction,
        registry: &mut LabelRegistry,
    ) -> Result<ModalOutcome, ModalError> {
        let invalid = ModalError::InvalidTransition {
            step: self.step,
            action: action.name(),
        };

        let outcome = match (self.step, action) {
            (_, ModalAction::Close) => ModalOutcome::Closed,
            (ModalStep::Select, ModalAction::CreateNew) => ModalOutcome::Open(Self {
                step: ModalStep::Add,
                label_to_upgrade: None,
            }),
            (ModalStep::Select, ModalAction::PickLabel(name)) => {
                let is_beatport = registry
                    .get(&name)
                    .ok_or_else(|| LabelError::NotFound(name.clone()))?
                    .is_beatport_label;
                if is_beatport {
                    registry.select(&name)?;
                    ModalOutcome::Closed
                } else {
                    ModalOutcome::Open(Self::upgrade(name))
                }
            }
            (ModalStep::Add | ModalStep::Upgrade, ModalAction::Back) => {
                ModalOutcome::Open(Self::select())
            }
            (ModalStep::Add, ModalAction::SubmitAdd(name)) => {
                registry.add(&name)?;
                registry.select(&name)?;
                ModalOutcome::Closed
            }
            (ModalStep::Upgrade, ModalAction::SubmitUpgrade) => {
                let name = self.label_to_upgrade.as_deref().ok_or(invalid)?;
                registry.upgrade(name)?;
                registry.select(name)?;
                ModalOutcome::Closed
            }
            _ => {
                tracing::warn!(%invalid, "rejected label modal action");
                return Err(invalid);
            }
        };
        Ok(outcome)
    }
}
