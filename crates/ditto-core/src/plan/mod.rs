//! Subscription plans, screen variants, and which services a plan includes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Plan
// ---------------------------------------------------------------------------

/// Subscription tier gating which services are included vs. purchasable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Plan {
    Starter,
    Pro,
    Label,
    DittoPlusRls,
}

impl Plan {
    /// Every plan, in tier order.
    pub const ALL: [Plan; 4] = [Plan::Starter, Plan::Pro, Plan::Label, Plan::DittoPlusRls];

    /// Human-facing name, as shown in badges and headers.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Starter => "Starter",
            Self::Pro => "Pro",
            Self::Label => "Label",
            Self::DittoPlusRls => "Ditto+ RLS",
        }
    }

    /// Services bundled into this plan at no extra cost.
    pub fn includes(self) -> PlanIncludes {
        let pro_or_label = matches!(self, Self::Pro | Self::Label);
        PlanIncludes {
            auto_release: pro_or_label,
            release_protection: pro_or_label,
            you_tube: pro_or_label || self == Self::DittoPlusRls,
            fingerprint: pro_or_label || self == Self::DittoPlusRls,
            beatport: self == Self::DittoPlusRls,
        }
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Starter => "starter",
            Self::Pro => "pro",
            Self::Label => "label",
            Self::DittoPlusRls => "ditto-plus-rls",
        };
        f.write_str(s)
    }
}

impl FromStr for Plan {
    type Err = PlanParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "starter" => Ok(Self::Starter),
            "pro" => Ok(Self::Pro),
            "label" => Ok(Self::Label),
            "ditto-plus-rls" | "dittoplusrls" | "rls" => Ok(Self::DittoPlusRls),
            _ => Err(PlanParseError(s.to_owned())),
        }
    }
}

/// Error returned when parsing an invalid [`Plan`] string.
#[derive(Debug, Clone)]
pub struct PlanParseError(pub String);

impl fmt::Display for PlanParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid plan: {:?} (expected starter, pro, label or ditto-plus-rls)",
            self.0
        )
    }
}

impl std::error::Error for PlanParseError {}

// ---------------------------------------------------------------------------
// ScreenVariant
// ---------------------------------------------------------------------------

/// The services screen variant addressed by a route.
///
/// `Purchased` is the read-only post-purchase view; it is not a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScreenVariant {
    Starter,
    Pro,
    Label,
    DittoPlusRls,
    Purchased,
}

impl ScreenVariant {
    pub const ALL: [ScreenVariant; 5] = [
        ScreenVariant::Starter,
        ScreenVariant::Pro,
        ScreenVariant::Label,
        ScreenVariant::DittoPlusRls,
        ScreenVariant::Purchased,
    ];

    /// The plan this variant renders, or `None` for the purchased view.
    pub fn plan(self) -> Option<Plan> {
        match self {
            Self::Starter => Some(Plan::Starter),
            Self::Pro => Some(Plan::Pro),
            Self::Label => Some(Plan::Label),
            Self::DittoPlusRls => Some(Plan::DittoPlusRls),
            Self::Purchased => None,
        }
    }
}

impl From<Plan> for ScreenVariant {
    fn from(plan: Plan) -> Self {
        match plan {
            Plan::Starter => Self::Starter,
            Plan::Pro => Self::Pro,
            Plan::Label => Self::Label,
            Plan::DittoPlusRls => Self::DittoPlusRls,
        }
    }
}

impl fmt::Display for ScreenVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.plan() {
            Some(plan) => plan.fmt(f),
            None => f.write_str("purchased"),
        }
    }
}

impl FromStr for ScreenVariant {
    type Err = ScreenVariantParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("purchased") {
            return Ok(Self::Purchased);
        }
        s.parse::<Plan>()
            .map(Self::from)
            .map_err(|_| ScreenVariantParseError(s.to_owned()))
    }
}

/// Error returned when parsing an invalid [`ScreenVariant`] string.
#[derive(Debug, Clone)]
pub struct ScreenVariantParseError(pub String);

impl fmt::Display for ScreenVariantParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid screen variant: {:?}", self.0)
    }
}

impl std::error::Error for ScreenVariantParseError {}

// ---------------------------------------------------------------------------
// ServiceFeature
// ---------------------------------------------------------------------------

/// A distribution service shown as a card on the services screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ServiceFeature {
    AutoRelease,
    ReleaseProtection,
    #[serde(rename = "youtube")]
    YouTube,
    Fingerprint,
    Beatport,
}

impl ServiceFeature {
    /// Display order of the cards.
    pub const ALL: [ServiceFeature; 5] = [
        ServiceFeature::AutoRelease,
        ServiceFeature::ReleaseProtection,
        ServiceFeature::YouTube,
        ServiceFeature::Fingerprint,
        ServiceFeature::Beatport,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Self::AutoRelease => "Auto-release to new platforms",
            Self::ReleaseProtection => "Release Protection",
            Self::YouTube => "YouTube Content ID & Shorts",
            Self::Fingerprint => "Audio Fingerprint Services",
            Self::Beatport => "Beatport Distribution",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::AutoRelease => {
                "Automatically send this release to any new platforms we add in the future."
            }
            Self::ReleaseProtection => {
                "Protect your release from unauthorized distribution across all platforms."
            }
            Self::YouTube => {
                "Get notified & paid if your music is used in YouTube videos. Ad revenue goes to you."
            }
            Self::Fingerprint => {
                "Register your music with audio fingerprinting services for identification and royalty collection."
            }
            Self::Beatport => {
                "You need a label set up with Beatport to release your music on this store."
            }
        }
    }
}

impl fmt::Display for ServiceFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::AutoRelease => "auto-release",
            Self::ReleaseProtection => "release-protection",
            Self::YouTube => "youtube",
            Self::Fingerprint => "fingerprint",
            Self::Beatport => "beatport",
        };
        f.write_str(s)
    }
}

impl FromStr for ServiceFeature {
    type Err = ServiceFeatureParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto-release" => Ok(Self::AutoRelease),
            "release-protection" => Ok(Self::ReleaseProtection),
            "youtube" => Ok(Self::YouTube),
            "fingerprint" => Ok(Self::Fingerprint),
            "beatport" => Ok(Self::Beatport),
            other => Err(ServiceFeatureParseError(other.to_owned())),
        }
    }
}

/// Error returned when parsing an invalid [`ServiceFeature`] string.
#[derive(Debug, Clone)]
pub struct ServiceFeatureParseError(pub String);

impl fmt::Display for ServiceFeatureParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid service: {:?}", self.0)
    }
}

impl std::error::Error for ServiceFeatureParseError {}

// ---------------------------------------------------------------------------
// PlanIncludes
// ---------------------------------------------------------------------------

/// Which services a plan bundles. Included services are free and never
/// reach the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlanIncludes {
    pub auto_release: bool,
    pub release_protection: bool,
    pub you_tube: bool,
    pub fingerprint: bool,
    pub beatport: bool,
}

impl PlanIncludes {
    pub fn includes(&self, feature: ServiceFeature) -> bool {
        match feature {
            ServiceFeature::AutoRelease => self.auto_release,
            ServiceFeature::ReleaseProtection => self.release_protection,
            ServiceFeature::YouTube => self.you_tube,
            ServiceFeature::Fingerprint => self.fingerprint,
            ServiceFeature::Beatport => self.beatport,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_display_roundtrips_through_from_str() {
        for plan in Plan::ALL {
            assert_eq!(plan.to_string().parse::<Plan>().unwrap(), plan);
        }
    }

    #[test]
    fn plan_parse_accepts_aliases_and_case() {
        assert_eq!("RLS".parse::<Plan>().unwrap(), Plan::DittoPlusRls);
        assert_eq!("DittoPlusRLS".parse::<Plan>().unwrap(), Plan::DittoPlusRls);
        assert_eq!("Pro".parse::<Plan>().unwrap(), Plan::Pro);
    }

    #[test]
    fn plan_parse_rejects_unknown() {
        let err = "enterprise".parse::<Plan>().unwrap_err();
        assert!(err.to_string().contains("enterprise"));
    }

    #[test]
    fn display_name_uses_brand_spelling() {
        assert_eq!(Plan::DittoPlusRls.display_name(), "Ditto+ RLS");
        assert_eq!(Plan::Label.display_name(), "Label");
    }

    #[test]
    fn starter_includes_nothing() {
        assert_eq!(Plan::Starter.includes(), PlanIncludes::default());
    }

    #[test]
    fn pro_and_label_include_everything_but_beatport() {
        for plan in [Plan::Pro, Plan::Label] {
            let inc = plan.includes();
            assert!(inc.auto_release);
            assert!(inc.release_protection);
            assert!(inc.you_tube);
            assert!(inc.fingerprint);
            assert!(!inc.beatport);
        }
    }

    #[test]
    fn rls_includes_youtube_fingerprint_and_beatport() {
        let inc = Plan::DittoPlusRls.includes();
        assert!(!inc.auto_release);
        assert!(!inc.release_protection);
        assert!(inc.includes(ServiceFeature::YouTube));
        assert!(inc.includes(ServiceFeature::Fingerprint));
        assert!(inc.includes(ServiceFeature::Beatport));
    }

    #[test]
    fn purchased_variant_has_no_plan() {
        let v: ScreenVariant = "purchased".parse().unwrap();
        assert_eq!(v, ScreenVariant::Purchased);
        assert!(v.plan().is_none());
        assert_eq!(
            "label".parse::<ScreenVariant>().unwrap().plan(),
            Some(Plan::Label)
        );
    }

    #[test]
    fn service_feature_parse() {
        for feature in ServiceFeature::ALL {
            assert_eq!(
                feature.to_string().parse::<ServiceFeature>().unwrap(),
                feature
            );
        }
        assert!("charts".parse::<ServiceFeature>().is_err());
    }
}
