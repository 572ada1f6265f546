//! The fixed catalog of purchasable add-ons, in display and billing order.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::plan::ServiceFeature;

/// A purchasable add-on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AddOn {
    ChartsUk,
    ChartsUs,
    ChartsAu,
    ChartsWorldwide,
    PreRelease,
    AutoRelease,
    ReleaseProtection,
    #[serde(rename = "youtube")]
    YouTube,
    Beatport,
}

impl AddOn {
    /// Billing order. Line items are always emitted in this order.
    pub const ALL: [AddOn; 9] = [
        AddOn::ChartsUk,
        AddOn::ChartsUs,
        AddOn::ChartsAu,
        AddOn::ChartsWorldwide,
        AddOn::PreRelease,
        AddOn::AutoRelease,
        AddOn::ReleaseProtection,
        AddOn::YouTube,
        AddOn::Beatport,
    ];

    /// The per-region charts registrations.
    pub const CHART_REGIONS: [AddOn; 3] = [AddOn::ChartsUk, AddOn::ChartsUs, AddOn::ChartsAu];

    /// Price in whole pounds.
    pub fn price(self) -> u32 {
        match self {
            Self::ChartsUk | Self::ChartsUs | Self::ChartsAu => 15,
            Self::ChartsWorldwide => 35,
            Self::PreRelease => 29,
            Self::AutoRelease | Self::ReleaseProtection | Self::YouTube => 10,
            Self::Beatport => 65,
        }
    }

    /// Name used on the cart line item.
    pub fn line_item_name(self) -> &'static str {
        match self {
            Self::ChartsUk => "Charts UK/Ireland",
            Self::ChartsUs => "Charts US/Canada",
            Self::ChartsAu => "Charts Australia",
            Self::ChartsWorldwide => "Charts Worldwide",
            Self::PreRelease => "Pre-release Downloads",
            Self::AutoRelease => "Auto-release",
            Self::ReleaseProtection => "Release Protection",
            Self::YouTube => "YouTube Content ID",
            Self::Beatport => "Beatport",
        }
    }

    /// Title of the row on the services screen.
    pub fn row_title(self) -> &'static str {
        match self {
            Self::ChartsUk => "Charts Registration UK / Ireland",
            Self::ChartsUs => "Charts Registration US / Canada",
            Self::ChartsAu => "Charts Registration Australia",
            Self::ChartsWorldwide => "Charts Registration Worldwide",
            Self::PreRelease => "Pre-release Downloads",
            other => other
                .service()
                .map(ServiceFeature::title)
                .unwrap_or_else(|| other.line_item_name()),
        }
    }

    /// ISO country code of the flag shown next to a regional chart.
    pub fn flag_code(self) -> Option<&'static str> {
        match self {
            Self::ChartsUk => Some("gb"),
            Self::ChartsUs => Some("us"),
            Self::ChartsAu => Some("au"),
            _ => None,
        }
    }

    /// The service this add-on buys, when a plan can include it.
    ///
    /// Add-ons with no service are never plan-included.
    pub fn service(self) -> Option<ServiceFeature> {
        match self {
            Self::AutoRelease => Some(ServiceFeature::AutoRelease),
            Self::ReleaseProtection => Some(ServiceFeature::ReleaseProtection),
            Self::YouTube => Some(ServiceFeature::YouTube),
            Self::Beatport => Some(ServiceFeature::Beatport),
            _ => None,
        }
    }

    /// The add-on that buys `feature`, if it is purchasable at all.
    pub fn for_service(feature: ServiceFeature) -> Option<AddOn> {
        Self::ALL.into_iter().find(|a| a.service() == Some(feature))
    }

    pub fn is_chart_region(self) -> bool {
        Self::CHART_REGIONS.contains(&self)
    }
}

impl fmt::Display for AddOn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::ChartsUk => "charts-uk",
            Self::ChartsUs => "charts-us",
            Self::ChartsAu => "charts-au",
            Self::ChartsWorldwide => "charts-worldwide",
            Self::PreRelease => "pre-release",
            Self::AutoRelease => "auto-release",
            Self::ReleaseProtection => "release-protection",
            Self::YouTube => "youtube",
            Self::Beatport => "beatport",
        };
        f.write_str(s)
    }
}

impl FromStr for AddOn {
    type Err = AddOnParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|a| a.to_string() == s)
            .ok_or_else(|| AddOnParseError(s.to_owned()))
    }
}

/// Error returned when parsing an invalid [`AddOn`] string.
#[derive(Debug, Clone)]
pub struct AddOnParseError(pub String);

impl fmt::Display for AddOnParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid add-on: {:?}", self.0)
    }
}

impl std::error::Error for AddOnParseError {}
