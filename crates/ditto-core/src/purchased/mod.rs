//! Read-only services view shown after purchase.
//!
//! This is a fixed snapshot, kept separate from the plan-driven screen:
//! statuses and prices here are not derived from the resolver or the cart.

use std::fmt;

use serde::Serialize;

use crate::catalog::AddOn;
use crate::plan::ServiceFeature;

/// Delivery state of a purchased row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceStatus {
    Available,
    Active,
    Unavailable,
}

impl ServiceStatus {
    /// Only rows still available can be picked.
    pub fn is_clickable(self) -> bool {
        self == Self::Available
    }
}

impl fmt::Display for ServiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Available => "available",
            Self::Active => "active",
            Self::Unavailable => "unavailable",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PurchasedRow {
    pub add_on: AddOn,
    pub title: &'static str,
    pub price: u32,
    pub status: ServiceStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PurchasedCard {
    pub feature: ServiceFeature,
    pub title: &'static str,
    pub description: &'static str,
    pub badge: Option<&'static str>,
    pub checked: bool,
    pub disabled: bool,
    pub price: Option<u32>,
}

pub static PURCHASED_ROWS: [PurchasedRow; 5] = [
    PurchasedRow {
        add_on: AddOn::ChartsUk,
        title: "Charts Registration UK / Ireland",
        price: 15,
        status: ServiceStatus::Unavailable,
    },
    PurchasedRow {
        add_on: AddOn::ChartsUs,
        title: "Charts Registration US / Canada",
        price: 15,
        status: ServiceStatus::Unavailable,
    },
    PurchasedRow {
        add_on: AddOn::ChartsAu,
        title: "Charts Registration Australia",
        price: 15,
        status: ServiceStatus::Unavailable,
    },
    PurchasedRow {
        add_on: AddOn::ChartsWorldwide,
        title: "Charts Registration Worldwide",
        price: 35,
        status: ServiceStatus::Active,
    },
    PurchasedRow {
        add_on: AddOn::PreRelease,
        title: "Pre-release Downloads",
        price: 29,
        status: ServiceStatus::Unavailable,
    },
];

pub static PURCHASED_CARDS: [PurchasedCard; 5] = [
    PurchasedCard {
        feature: ServiceFeature::AutoRelease,
        title: "Auto-release to new platforms",
        description: "Automatically send this release to any new platforms we add in the future.",
        badge: Some("Active"),
        checked: true,
        disabled: true,
        price: None,
    },
    PurchasedCard {
        feature: ServiceFeature::ReleaseProtection,
        title: "Release Protection",
        description: "Protect your release from unauthorized distribution across all platforms.",
        badge: None,
        checked: false,
        disabled: false,
        price: Some(10),
    },
    PurchasedCard {
        feature: ServiceFeature::YouTube,
        title: "YouTube Content ID & Shorts",
        description: "Get notified & paid if your music is used in YouTube videos. Ad revenue goes to you.",
        badge: None,
        checked: false,
        disabled: false,
        price: Some(10),
    },
    PurchasedCard {
        feature: ServiceFeature::Fingerprint,
        title: "Audio Fingerprint Services",
        description: "Register your music with audio fingerprinting services for content identification.",
        badge: None,
        checked: false,
        disabled: false,
        price: Some(15),
    },
    PurchasedCard {
        feature: ServiceFeature::Beatport,
        title: "Beatport Distribution",
        description: "You need a label set up with Beatport to release your music on this store.",
        badge: None,
        checked: false,
        disabled: false,
        price: Some(65),
    },
];

/// Both sections of the purchased view.
#[derive(Debug, Clone, Serialize)]
pub struct PurchasedView {
    pub rows: &'static [PurchasedRow],
    pub cards: &'static [PurchasedCard],
}

pub fn purchased_view() -> PurchasedView {
    PurchasedView {
        rows: &PURCHASED_ROWS,
        cards: &PURCHASED_CARDS,
    }
}
