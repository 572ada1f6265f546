//! Cart aggregation over a selection snapshot.

use serde::Serialize;

use crate::catalog::AddOn;
use crate::plan::PlanIncludes;
use crate::selection::Selection;

/// Currency symbol for every price on the screen.
pub const CURRENCY_SYMBOL: &str = "£";

/// A billable cart entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LineItem {
    pub name: &'static str,
    pub price: u32,
}

/// The billable items for a selection and their total.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Cart {
    pub items: Vec<LineItem>,
    pub total: u32,
}

impl Cart {
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Checkout is offered only when something is billable.
    pub fn checkout_enabled(&self) -> bool {
        !self.is_empty()
    }

    /// Total formatted for display, e.g. `£44`.
    pub fn formatted_total(&self) -> String {
        format_price(self.total)
    }
}

/// Format whole pounds for display.
pub fn format_price(amount: u32) -> String {
    format!("{CURRENCY_SYMBOL}{amount}")
}

/// Compute the billable items for `selection`.
///
/// Walks the catalog in order and emits a line item for every selected
/// add-on the plan does not already include.
pub fn compute_cart(selection: &Selection, includes: &PlanIncludes) -> Cart {
    let items: Vec<LineItem> = AddOn::ALL
        .into_iter()
        .filter(|add_on| selection.is_selected(*add_on))
        .filter(|add_on| {
            add_on
                .service()
                .is_none_or(|feature| !includes.includes(feature))
        })
        .map(|add_on| LineItem {
            name: add_on.line_item_name(),
            price: add_on.price(),
        })
        .collect();
    let total = items.iter().map(|item| item.price).sum();
    Cart { items, total }
}
