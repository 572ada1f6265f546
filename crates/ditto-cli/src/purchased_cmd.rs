//! `ditto purchased`: print the read-only post-purchase services view.

use std::fmt::Write as _;

use anyhow::{Context, Result};

use ditto_core::cart::format_price;
use ditto_core::purchased::{PurchasedView, purchased_view};

pub fn run_purchased(json: bool) -> Result<()> {
    let view = purchased_view();
    if json {
        let out =
            serde_json::to_string_pretty(&view).context("failed to serialize purchased view")?;
        println!("{out}");
    } else {
        print!("{}", render_purchased(&view));
    }
    Ok(())
}

pub fn render_purchased(view: &PurchasedView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Purchased services");
    let _ = writeln!(out);
    let _ = writeln!(out, "{:<36} {:>6} {:<12}", "ADD-ON", "PRICE", "STATUS");
    let _ = writeln!(out, "{}", "-".repeat(56));
    for row in view.rows {
        let _ = writeln!(
            out,
            "{:<36} {:>6} {:<12}",
            row.title,
            format_price(row.price),
            row.status.to_string()
        );
    }
    let _ = writeln!(out);
    for card in view.cards {
        let marker = match (card.checked, card.disabled) {
            (true, true) => "[=]",
            (true, false) => "[x]",
            (false, _) => "[ ]",
        };
        let price = card.price.map(format_price).unwrap_or_default();
        let _ = writeln!(out, "  {marker} {:<36} {price:>5}", card.title);
        if let Some(badge) = card.badge {
            let _ = writeln!(out, "      {badge}");
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn worldwide_is_the_only_active_row() {
        let out = render_purchased(&purchased_view());
        let active: Vec<&str> = out.lines().filter(|l| l.contains("active")).collect();
        assert_eq!(active.len(), 1, "{out}");
        assert!(active[0].starts_with("Charts Registration Worldwide"));
    }

    #[test]
    fn auto_release_is_locked_on() {
        let out = render_purchased(&purchased_view());
        assert!(out.contains("[=] Auto-release to new platforms"), "{out}");
        assert!(out.contains("Beatport Distribution"), "{out}");
        assert!(out.contains("£65"), "{out}");
    }
}
