//! Store catalog for the store status screen.
//!
//! The catalog is defined in `stores.toml` and embedded in the binary at
//! compile time.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Outcome of delivering a release to a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryStatus {
    Sent,
    Rejected,
}

impl fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Sent => "sent",
            Self::Rejected => "rejected",
        };
        f.write_str(s)
    }
}

impl FromStr for DeliveryStatus {
    type Err = DeliveryStatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sent" => Ok(Self::Sent),
            "rejected" => Ok(Self::Rejected),
            other => Err(DeliveryStatusParseError(other.to_owned())),
        }
    }
}

/// Error returned when parsing an invalid [`DeliveryStatus`] string.
#[derive(Debug, Clone)]
pub struct DeliveryStatusParseError(pub String);

impl fmt::Display for DeliveryStatusParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid delivery status: {:?}", self.0)
    }
}

impl std::error::Error for DeliveryStatusParseError {}

/// A store the release was delivered to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Store {
    /// Unique store id (e.g. `apple-music`).
    pub id: String,
    /// Display name. Not unique: some stores have several regional entries.
    pub name: String,
    /// Opaque asset path of the store logo.
    pub icon: String,
    pub status: DeliveryStatus,
}

/// A store the release has not been sent to yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailableStore {
    pub id: String,
    pub name: String,
    pub icon: String,
}

/// The full catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreCatalog {
    delivered: Vec<Store>,
    #[serde(default)]
    available: Vec<AvailableStore>,
}

/// Counts shown in the screen header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StoreSummary {
    pub sent: usize,
    pub rejected: usize,
    pub available: usize,
}

/// The embedded store catalog TOML.
static STORES_TOML: &str = include_str!("stores.toml");

/// Load the embedded store catalog.
///
/// # Panics
///
/// Panics if the embedded TOML is malformed. The file is part of the
/// binary, so a successful build with passing tests means it parses.
pub fn load_catalog() -> StoreCatalog {
    toml::from_str(STORES_TOML).expect("embedded stores.toml is invalid")
}

impl StoreCatalog {
    /// Stores the release was sent to, in display order.
    pub fn delivered(&self) -> &[Store] {
        &self.delivered
    }

    pub fn available(&self) -> &[AvailableStore] {
        &self.available
    }

    /// Delivered stores with the given status, in catalog order.
    pub fn by_status(&self, status: DeliveryStatus) -> Vec<&Store> {
        self.delivered
            .iter()
            .filter(|s| s.status == status)
            .collect()
    }

    pub fn summary(&self) -> StoreSummary {
        StoreSummary {
            sent: self.by_status(DeliveryStatus::Sent).len(),
            rejected: self.by_status(DeliveryStatus::Rejected).len(),
            available: self.available.len(),
        }
    }

    pub fn get(&self, id: &str) -> Option<&Store> {
        self.delivered.iter().find(|s| s.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_parses_and_is_nonempty() {
        let catalog = load_catalog();
        assert_eq!(catalog.delivered().len(), 29);
        assert_eq!(catalog.available().len(), 7);
    }

    #[test]
    fn spotify_is_first_and_sent() {
        let catalog = load_catalog();
        assert_eq!(catalog.delivered()[0].id, "spotify");
        assert_eq!(catalog.delivered()[0].status, DeliveryStatus::Sent);
    }

    #[test]
    fn three_stores_were_rejected() {
        let catalog = load_catalog();
        let rejected: Vec<&str> = catalog
            .by_status(DeliveryStatus::Rejected)
            .iter()
            .map(|s| s.id.as_str())
            .collect();
        assert_eq!(rejected, vec!["apple-music", "shazam", "itunes"]);
        assert_eq!(
            catalog.summary(),
            StoreSummary {
                sent: 26,
                rejected: 3,
                available: 7
            }
        );
    }

    #[test]
    fn store_ids_are_unique() {
        let catalog = load_catalog();
        let mut ids: Vec<&str> = catalog.delivered().iter().map(|s| s.id.as_str()).collect();
        ids.extend(catalog.available().iter().map(|s| s.id.as_str()));
        let total = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), total, "store ids must be unique");
    }

    #[test]
    fn delivery_status_parse() {
        assert_eq!("sent".parse::<DeliveryStatus>().unwrap(), DeliveryStatus::Sent);
        assert!("pending".parse::<DeliveryStatus>().is_err());
    }
}
