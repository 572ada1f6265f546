//! `ditto stores` and `ditto features`: the store status screen and its
//! "Distribution options" card.

use std::fmt::Write as _;

use anyhow::{Context, Result};
use serde::Serialize;

use ditto_core::feature::visible_rows;
use ditto_core::stores::{DeliveryStatus, StoreCatalog, StoreSummary};
use ditto_core::{FeatureId, Plan, RowState};

/// Shown under every row the plan locks.
pub const UPGRADE_HINT: &str = "Upgrade to change this setting";

#[derive(Debug, Serialize)]
struct FeatureRowJson {
    feature: FeatureId,
    title: &'static str,
    description: &'static str,
    #[serde(flatten)]
    state: RowState,
}

#[derive(Debug, Serialize)]
struct StoresJson<'a> {
    plan: Plan,
    summary: StoreSummary,
    delivered: Vec<&'a ditto_core::stores::Store>,
    available: &'a [ditto_core::stores::AvailableStore],
    features: Vec<FeatureRowJson>,
}

fn feature_rows(plan: Plan) -> Vec<FeatureRowJson> {
    visible_rows(plan)
        .into_iter()
        .map(|(feature, state)| FeatureRowJson {
            feature,
            title: feature.title(),
            description: feature.description(),
            state,
        })
        .collect()
}

/// Run the features command.
pub fn run_features(plan: Plan, json: bool) -> Result<()> {
    if json {
        let out = serde_json::to_string_pretty(&feature_rows(plan))
            .context("failed to serialize feature rows")?;
        println!("{out}");
    } else {
        print!("{}", render_features(plan));
    }
    Ok(())
}

/// Run the stores command.
pub fn run_stores(
    catalog: &StoreCatalog,
    plan: Plan,
    status: Option<DeliveryStatus>,
    json: bool,
) -> Result<()> {
    if json {
        let delivered = match status {
            Some(s) => catalog.by_status(s),
            None => catalog.delivered().iter().collect(),
        };
        let doc = StoresJson {
            plan,
            summary: catalog.summary(),
            delivered,
            available: catalog.available(),
            features: feature_rows(plan),
        };
        let out = serde_json::to_string_pretty(&doc).context("failed to serialize stores")?;
        println!("{out}");
    } else {
        print!("{}", render_stores(catalog, plan, status));
    }
    Ok(())
}

pub fn render_features(plan: Plan) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Distribution options ({} plan)", plan.display_name());
    for (feature, state) in visible_rows(plan) {
        let toggle = match (state.disabled, state.enabled) {
            (true, _) => "locked",
            (false, true) => "on",
            (false, false) => "off",
        };
        let _ = writeln!(out, "  {:<38} [{toggle}]", feature.title());
        let _ = writeln!(out, "      {}", feature.description());
        if !state.badge.is_empty() {
            let _ = writeln!(out, "      {}", state.badge);
        }
        if let Some(helper) = state.helper {
            let _ = writeln!(out, "      {helper}");
        }
        if state.disabled {
            let _ = writeln!(out, "      {UPGRADE_HINT}");
        }
    }
    out
}

pub fn render_stores(catalog: &StoreCatalog, plan: Plan, status: Option<DeliveryStatus>) -> String {
    let mut out = String::new();
    let summary = catalog.summary();
    let _ = writeln!(
        out,
        "Store status: {} sent, {} rejected, {} available",
        summary.sent, summary.rejected, summary.available
    );
    let _ = writeln!(out);

    let _ = writeln!(out, "{:<28} {:<24} {:<10}", "ID", "STORE", "STATUS");
    let _ = writeln!(out, "{}", "-".repeat(62));
    let delivered = match status {
        Some(s) => catalog.by_status(s),
        None => catalog.delivered().iter().collect(),
    };
    for store in delivered {
        let _ = writeln!(
            out,
            "{:<28} {:<24} {:<10}",
            store.id, store.name, store.status
        );
    }

    if status.is_none() && !catalog.available().is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Available stores:");
        for store in catalog.available() {
            let _ = writeln!(out, "  {}", store.name);
        }
    }

    let _ = writeln!(out);
    out.push_str(&render_features(plan));
    out
}
