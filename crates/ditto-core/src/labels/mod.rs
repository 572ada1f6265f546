//! Beatport label registry.
//!
//! An ordered list of the user's labels plus the label currently chosen
//! for the release. Names are unique; lookups are exact matches.

pub mod modal;

use serde::{Deserialize, Serialize};

pub use modal::{LabelModal, ModalAction, ModalError, ModalOutcome, ModalStep};

/// A label the user owns, and whether it is set up on Beatport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelOption {
    pub name: String,
    #[serde(rename = "beatport", alias = "is_beatport_label")]
    pub is_beatport_label: bool,
}

impl LabelOption {
    pub fn new(name: impl Into<String>, is_beatport_label: bool) -> Self {
        Self {
            name: name.into(),
            is_beatport_label,
        }
    }
}

/// Errors from registry mutations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LabelError {
    #[error("label name must not be empty")]
    EmptyName,

    #[error("label {0:?} already exists")]
    DuplicateName(String),

    #[error("label {0:?} not found")]
    NotFound(String),
}

/// The label chosen for the release when the screen first opens.
pub const DEFAULT_ACTIVE_LABEL: &str = "The Esoteric Order of Dagon Records";

/// Labels every account starts with.
pub fn default_labels() -> Vec<LabelOption> {
    vec![
        LabelOption::new(DEFAULT_ACTIVE_LABEL, true),
        LabelOption::new("Anjunabeats", true),
        LabelOption::new("Drumcode", false),
        LabelOption::new("Defected Records", false),
        LabelOption::new("Spinnin' Records", true),
        LabelOption::new("Armada Music", false),
    ]
}

/// Ordered label list with an active-label pointer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelRegistry {
    labels: Vec<LabelOption>,
    active: Option<String>,
}

impl Default for LabelRegistry {
    fn default() -> Self {
        Self {
            labels: default_labels(),
            active: Some(DEFAULT_ACTIVE_LABEL.to_string()),
        }
    }
}

impl LabelRegistry {
    /// Build a registry from `labels`. The first Beatport-enabled label
    /// becomes active.
    ///
    /// Later duplicates of an earlier name are dropped.
    pub fn new(labels: Vec<LabelOption>) -> Self {
        let mut deduped: Vec<LabelOption> = Vec::with_capacity(labels.len());
        for label in labels {
            if deduped.iter().any(|l| l.name == label.name) {
                tracing::warn!(label = %label.name, "dropping duplicate label");
                continue;
            }
            deduped.push(label);
        }
        let active = deduped
            .iter()
            .find(|l| l.is_beatport_label)
            .map(|l| l.name.clone());
        Self {
            labels: deduped,
            active,
        }
    }

    pub fn labels(&self) -> &[LabelOption] {
        &self.labels
    }

    pub fn get(&self, name: &str) -> Option<&LabelOption> {
        self.labels.iter().find(|l| l.name == name)
    }

    /// The active label, if one has been chosen.
    pub fn active(&self) -> Option<&LabelOption> {
        self.active.as_deref().and_then(|name| self.get(name))
    }

    /// Append a new Beatport-enabled label.
    pub fn add(&mut self, name: &str) -> Result<&LabelOption, LabelError> {
        if name.trim().is_empty() {
            return Err(LabelError::EmptyName);
        }
        if self.get(name).is_some() {
            return Err(LabelError::DuplicateName(name.to_string()));
        }
        self.labels.push(LabelOption::new(name, true));
        tracing::info!(label = %name, "added beatport label");
        Ok(&self.labels[self.labels.len() - 1])
    }

    /// Mark an existing label as Beatport-enabled.
    pub fn upgrade(&mut self, name: &str) -> Result<&LabelOption, LabelError> {
        let label = self
            .labels
            .iter_mut()
            .find(|l| l.name == name)
            .ok_or_else(|| LabelError::NotFound(name.to_string()))?;
        label.is_beatport_label = true;
        tracing::info!(label = %name, "upgraded label to beatport");
        Ok(&*label)
    }

    /// Point the active label at an existing entry.
    pub fn select(&mut self, name: &str) -> Result<&LabelOption, LabelError> {
        let index = self
            .labels
            .iter()
            .position(|l| l.name == name)
            .ok_or_else(|| LabelError::NotFound(name.to_string()))?;
        self.active = Some(name.to_string());
        Ok(&self.labels[index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_registry_has_seed_labels() {
        let reg = LabelRegistry::default();
        assert_eq!(reg.labels().len(), 6);
        assert_eq!(reg.active().unwrap().name, DEFAULT_ACTIVE_LABEL);
        assert!(!reg.get("Drumcode").unwrap().is_beatport_label);
    }

    #[test]
    fn add_appends_beatport_label() {
        let mut reg = LabelRegistry::default();
        let added = reg.add("New Label").unwrap().clone();
        assert_eq!(added, LabelOption::new("New Label", true));
        assert_eq!(reg.labels().last(), Some(&added));
    }

    #[test]
    fn add_rejects_duplicates_and_blank_names() {
        let mut reg = LabelRegistry::default();
        assert_eq!(
            reg.add("Anjunabeats").unwrap_err(),
            LabelError::DuplicateName("Anjunabeats".into())
        );
        assert_eq!(reg.add("   ").unwrap_err(), LabelError::EmptyName);
        assert_eq!(reg.labels().len(), 6);
    }

    #[test]
    fn upgrade_flips_flag_in_place() {
        let mut reg = LabelRegistry::default();
        reg.upgrade("Drumcode").unwrap();
        assert!(reg.get("Drumcode").unwrap().is_beatport_label);
        assert_eq!(reg.labels()[2].name, "Drumcode");
    }

    #[test]
    fn upgrade_and_select_missing_label_fail() {
        let mut reg = LabelRegistry::default();
        assert_eq!(
            reg.upgrade("Nope").unwrap_err(),
            LabelError::NotFound("Nope".into())
        );
        assert_eq!(
            reg.select("Nope").unwrap_err(),
            LabelError::NotFound("Nope".into())
        );
        assert_eq!(reg.active().unwrap().name, DEFAULT_ACTIVE_LABEL);
    }

    #[test]
    fn new_picks_first_beatport_label_and_dedupes() {
        let reg = LabelRegistry::new(vec![
            LabelOption::new("Plain", false),
            LabelOption::new("Ready", true),
            LabelOption::new("Plain", true),
        ]);
        assert_eq!(reg.labels().len(), 2);
        assert_eq!(reg.active().unwrap().name, "Ready");
    }

    #[test]
    fn new_without_beatport_labels_has_no_active() {
        let reg = LabelRegistry::new(vec![LabelOption::new("Plain", false)]);
        assert!(reg.active().is_none());
    }
}
