//! Plan feature resolver for the "Distribution options" card.
//!
//! The policy is a literal table keyed by `(Plan, FeatureId)`; [`resolve`]
//! is a lookup into it. Combinations missing from the table resolve to
//! [`RowState::HIDDEN`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::plan::Plan;

/// A feature row on the store status screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FeatureId {
    AutoRelease,
    YtContentId,
    Beatport,
    AudioFingerprint,
}

impl FeatureId {
    /// Display order of the rows.
    pub const ALL: [FeatureId; 4] = [
        FeatureId::AutoRelease,
        FeatureId::YtContentId,
        FeatureId::Beatport,
        FeatureId::AudioFingerprint,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Self::AutoRelease => "Auto-release to new platforms",
            Self::YtContentId => "YouTube Content ID & Shorts",
            Self::Beatport => "Beatport distribution & label setup",
            Self::AudioFingerprint => "Audio fingerprint",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::AutoRelease => "Automatically send this release to any new platforms we add.",
            Self::YtContentId => "Protect and monetize your music on YouTube and Shorts.",
            Self::Beatport => "Distribute to Beatport and set up your label profile.",
            Self::AudioFingerprint => {
                "Detect and match uses of your audio across supported platforms."
            }
        }
    }
}

impl fmt::Display for FeatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::AutoRelease => "autoRelease",
            Self::YtContentId => "ytContentId",
            Self::Beatport => "beatport",
            Self::AudioFingerprint => "audioFingerprint",
        };
        f.write_str(s)
    }
}

impl FromStr for FeatureId {
    type Err = FeatureIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "autoRelease" => Ok(Self::AutoRelease),
            "ytContentId" => Ok(Self::YtContentId),
            "beatport" => Ok(Self::Beatport),
            "audioFingerprint" => Ok(Self::AudioFingerprint),
            other => Err(FeatureIdParseError(other.to_owned())),
        }
    }
}

/// Error returned when parsing an invalid [`FeatureId`] string.
#[derive(Debug, Clone)]
pub struct FeatureIdParseError(pub String);

impl fmt::Display for FeatureIdParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid feature id: {:?}", self.0)
    }
}

impl std::error::Error for FeatureIdParseError {}

/// Resolved display and interaction state for one `(plan, feature)` pair.
///
/// `disabled` means locked by the plan; `enabled` is the toggle position.
/// When `visible` is false the other fields carry no meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RowState {
    pub visible: bool,
    pub enabled: bool,
    pub disabled: bool,
    pub badge: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub helper: Option<&'static str>,
}

impl RowState {
    /// Fallback for combinations absent from the policy table.
    pub const HIDDEN: RowState = RowState {
        visible: false,
        enabled: false,
        disabled: true,
        badge: "",
        helper: None,
    };

    const fn included(badge: &'static str) -> Self {
        Self {
            visible: true,
            enabled: true,
            disabled: false,
            badge,
            helper: None,
        }
    }

    const fn locked(badge: &'static str, helper: Option<&'static str>) -> Self {
        Self {
            visible: true,
            enabled: false,
            disabled: true,
            badge,
            helper,
        }
    }
}

/// One entry of the policy table.
pub type PolicyEntry = ((Plan, FeatureId), RowState);

const AUTO_RELEASE_HELPER: &str = "Upgrade to Pro to enable auto-release to new platforms.";
const YT_HELPER: &str = "Upgrade to Pro to access YouTube Content ID & Shorts.";
const FINGERPRINT_HELPER: &str = "Not a paid add-on. Available on Pro, Label and Ditto+ RLS.";

/// The plan-to-feature policy.
#[rustfmt::skip]
pub static ROW_POLICY: [PolicyEntry; 16] = [
    ((Plan::Starter, FeatureId::AutoRelease), RowState::locked("Included with Pro", Some(AUTO_RELEASE_HELPER))),
    ((Plan::Pro, FeatureId::AutoRelease), RowState::included("Included with Pro")),
    ((Plan::Label, FeatureId::AutoRelease), RowState::included("Included with Label")),
    ((Plan::DittoPlusRls, FeatureId::AutoRelease), RowState::HIDDEN),

    ((Plan::Starter, FeatureId::YtContentId), RowState::locked("Included with Pro", Some(YT_HELPER))),
    ((Plan::Pro, FeatureId::YtContentId), RowState::included("Included with Pro")),
    ((Plan::Label, FeatureId::YtContentId), RowState::included("Included with Label")),
    ((Plan::DittoPlusRls, FeatureId::YtContentId), RowState::included("Included with Ditto+ RLS")),

    ((Plan::Starter, FeatureId::Beatport), RowState::locked("Available with Ditto+ RLS", None)),
    ((Plan::Pro, FeatureId::Beatport), RowState::locked("Available with Ditto+ RLS", None)),
    ((Plan::Label, FeatureId::Beatport), RowState::locked("Available with Ditto+ RLS", None)),
    ((Plan::DittoPlusRls, FeatureId::Beatport), RowState::included("Included with Ditto+ RLS")),

    ((Plan::Starter, FeatureId::AudioFingerprint), RowState::locked("Included with Pro", Some(FINGERPRINT_HELPER))),
    ((Plan::Pro, FeatureId::AudioFingerprint), RowState::included("Included with Pro (no extra cost)")),
    ((Plan::Label, FeatureId::AudioFingerprint), RowState::included("Included with Label (no extra cost)")),
    ((Plan::DittoPlusRls, FeatureId::AudioFingerprint), RowState::included("Included with Ditto+ RLS (no extra cost)")),
];

/// Resolve the row state for `feature` under `plan`.
pub fn resolve(plan: Plan, feature: FeatureId) -> RowState {
    lookup(&ROW_POLICY, plan, feature)
}

/// Look `(plan, feature)` up in an arbitrary policy table.
pub fn lookup(table: &[PolicyEntry], plan: Plan, feature: FeatureId) -> RowState {
    table
        .iter()
        .find(|(key, _)| *key == (plan, feature))
        .map(|(_, state)| *state)
        .unwrap_or(RowState::HIDDEN)
}

/// Visible rows for `plan`, in display order.
pub fn visible_rows(plan: Plan) -> Vec<(FeatureId, RowState)> {
    FeatureId::ALL
        .into_iter()
        .map(|feature| (feature, resolve(plan, feature)))
        .filter(|(_, state)| state.visible)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policy_table_covers_every_pair_once() {
        for plan in Plan::ALL {
            for feature in FeatureId::ALL {
                let hits = ROW_POLICY
                    .iter()
                    .filter(|(key, _)| *key == (plan, feature))
                    .count();
                assert_eq!(hits, 1, "({plan}, {feature}) should appear exactly once");
            }
        }
    }

    #[test]
    fn missing_pair_falls_back_to_hidden() {
        let state = lookup(&[], Plan::Pro, FeatureId::Beatport);
        assert_eq!(state, RowState::HIDDEN);
        assert!(!state.visible);
        assert!(state.disabled);
        assert!(!state.enabled);
    }

    #[test]
    fn rls_hides_auto_release_row() {
        let rows = visible_rows(Plan::DittoPlusRls);
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|(f, _)| *f != FeatureId::AutoRelease));
    }

    #[test]
    fn feature_id_parse_uses_camel_case() {
        for feature in FeatureId::ALL {
            assert_eq!(feature.to_string().parse::<FeatureId>().unwrap(), feature);
        }
        assert!("auto-release".parse::<FeatureId>().is_err());
    }
}
