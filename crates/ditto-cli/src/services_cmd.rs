//! `ditto services` and `ditto cart`: print the services screen and cart.

use std::fmt::Write as _;

use anyhow::{Context, Result};

use ditto_core::cart::{Cart, format_price};
use ditto_core::labels::LabelRegistry;
use ditto_core::services::{BadgeVariant, CardPrice, ServiceCard};
use ditto_core::{AddOn, Plan, ServicesEvent, ServicesState};

/// Build a services screen for `plan` with every add-on in `select` on.
///
/// Add-ons are switched on in the given order, so a later chart region
/// replaces an earlier Worldwide and the reverse. Selecting a service the
/// plan includes or hides is an error.
pub fn build_state(plan: Plan, labels: LabelRegistry, select: &[AddOn]) -> Result<ServicesState> {
    let mut state = ServicesState::with_labels(plan, labels);
    for &add_on in select {
        if state.selection().is_selected(add_on) {
            continue;
        }
        state
            .apply(ServicesEvent::ToggleAddOn(add_on))
            .with_context(|| format!("failed to select {add_on}"))?;
    }
    Ok(state)
}

/// Run the services command.
pub fn run_services(state: &ServicesState, json: bool) -> Result<()> {
    if json {
        let out = serde_json::to_string_pretty(&state.view())
            .context("failed to serialize services view")?;
        println!("{out}");
    } else {
        print!("{}", render_services(state));
    }
    Ok(())
}

/// Run the cart command.
pub fn run_cart(state: &ServicesState, json: bool) -> Result<()> {
    let cart = state.cart();
    if json {
        let out = serde_json::to_string_pretty(&cart).context("failed to serialize cart")?;
        println!("{out}");
    } else {
        print!("{}", render_cart(&cart));
    }
    Ok(())
}

pub fn render_services(state: &ServicesState) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Services ({} plan)", state.plan().display_name());
    let _ = writeln!(out);

    let _ = writeln!(out, "Add-ons:");
    for row in state.add_on_rows() {
        let _ = writeln!(
            out,
            "  {} {:<36} {:>5}",
            checkbox(row.selected),
            row.title,
            format_price(row.price)
        );
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "Services:");
    for card in state.cards() {
        render_card(&mut out, &card);
    }

    let view = state.view();
    if let Some(providers) = &view.providers {
        let _ = writeln!(out);
        let _ = writeln!(out, "Fingerprint providers:");
        for p in providers {
            let _ = writeln!(out, "  {} {}", checkbox(p.enabled), p.name);
        }
    }
    if let Some(form) = &view.beatport {
        let _ = writeln!(out);
        let _ = writeln!(out, "Beatport:");
        let label = form
            .label
            .as_ref()
            .map(|l| l.name.as_str())
            .unwrap_or("(none)");
        let _ = writeln!(out, "  Label:           {label}");
        let _ = writeln!(out, "  Primary genre:   {}", form.primary_genre);
        let _ = writeln!(out, "  Secondary genre: {}", form.secondary_genre);
    }

    let _ = writeln!(out);
    out.push_str(&render_cart(&view.cart));
    out
}

fn render_card(out: &mut String, card: &ServiceCard) {
    let price = match card.price {
        CardPrice::Free => "Free".to_string(),
        CardPrice::Price(amount) => format_price(amount),
        CardPrice::None => String::new(),
    };
    let marker = if card.disabled {
        "[-]"
    } else {
        checkbox(card.checked)
    };
    let _ = writeln!(out, "  {marker} {:<36} {price:>5}", card.title);
    if let Some(badge) = card.badge {
        let tag = match badge.variant {
            BadgeVariant::Green => "+",
            BadgeVariant::Grey => "~",
        };
        let _ = writeln!(out, "      {tag} {}", badge.text);
    }
    if let Some(message) = card.disabled_message {
        let _ = writeln!(out, "      {message}");
    }
}

pub fn render_cart(cart: &Cart) -> String {
    let mut out = String::new();
    let noun = if cart.item_count() == 1 { "item" } else { "items" };
    let _ = writeln!(out, "Cart ({} {noun}):", cart.item_count());
    if cart.is_empty() {
        let _ = writeln!(out, "  No services selected");
    }
    for item in &cart.items {
        let _ = writeln!(out, "  {:<36} {:>5}", item.name, format_price(item.price));
    }
    let _ = writeln!(out, "  {}", "-".repeat(42));
    let _ = writeln!(out, "  {:<36} {:>5}", "Total", cart.formatted_total());
    let checkout = if cart.checkout_enabled() {
        "Checkout available"
    } else {
        "Checkout disabled"
    };
    let _ = writeln!(out, "  {checkout}");
    out
}

fn checkbox(on: bool) -> &'static str {
    if on { "[x]" } else { "[ ]" }
}
