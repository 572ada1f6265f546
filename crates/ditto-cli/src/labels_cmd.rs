//! `ditto labels`: apply label operations to the session registry and print it.
//!
//! Nothing is persisted; the registry starts from the config file (or the
//! built-in list) on every run.

use std::fmt::Write as _;

use anyhow::{Context, Result};

use ditto_core::labels::LabelRegistry;

/// Label operations requested on the command line.
#[derive(Debug, Default)]
pub struct LabelOps {
    pub add: Vec<String>,
    pub upgrade: Vec<String>,
    pub select: Option<String>,
}

/// Apply adds, then upgrades, then the selection.
pub fn apply_ops(registry: &mut LabelRegistry, ops: &LabelOps) -> Result<()> {
    for name in &ops.add {
        registry
            .add(name)
            .with_context(|| format!("failed to add label {name:?}"))?;
    }
    for name in &ops.upgrade {
        registry
            .upgrade(name)
            .with_context(|| format!("failed to upgrade label {name:?}"))?;
    }
    if let Some(name) = &ops.select {
        registry
            .select(name)
            .with_context(|| format!("failed to select label {name:?}"))?;
    }
    Ok(())
}

pub fn run_labels(mut registry: LabelRegistry, ops: &LabelOps, json: bool) -> Result<()> {
    apply_ops(&mut registry, ops)?;
    if json {
        let out =
            serde_json::to_string_pretty(&registry).context("failed to serialize labels")?;
        println!("{out}");
    } else {
        print!("{}", render_labels(&registry));
    }
    Ok(())
}

pub fn render_labels(registry: &LabelRegistry) -> String {
    let active = registry.active().map(|l| l.name.as_str());
    let mut out = String::new();
    let _ = writeln!(out, "Labels:");
    for label in registry.labels() {
        let marker = if Some(label.name.as_str()) == active {
            "*"
        } else {
            " "
        };
        let beatport = if label.is_beatport_label {
            "beatport"
        } else {
            "-"
        };
        let _ = writeln!(out, "  {marker} {:<40} {beatport}", label.name);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_then_select_new_label() {
        let mut reg = LabelRegistry::default();
        let ops = LabelOps {
            add: vec!["New Label".into()],
            select: Some("New Label".into()),
            ..Default::default()
        };
        apply_ops(&mut reg, &ops).unwrap();
        let out = render_labels(&reg);
        assert!(out.contains("* New Label"), "{out}");
        assert_eq!(reg.labels().len(), 7);
    }

    #[test]
    fn upgrade_unknown_label_fails() {
        let mut reg = LabelRegistry::default();
        let ops = LabelOps {
            upgrade: vec!["Ghost".into()],
            ..Default::default()
        };
        let err = apply_ops(&mut reg, &ops).unwrap_err();
        assert!(format!("{err:#}").contains("not found"), "{err:#}");
    }

    #[test]
    fn duplicate_add_fails() {
        let mut reg = LabelRegistry::default();
        let ops = LabelOps {
            add: vec!["Drumcode".into()],
            ..Default::default()
        };
        assert!(apply_ops(&mut reg, &ops).is_err());
    }
}
