//! Plan-aware decision logic for the release services and store status
//! screens.
//!
//! Everything here is synchronous and side-effect free apart from the
//! explicit mutations on [`services::ServicesState`] and
//! [`labels::LabelRegistry`].

pub mod cart;
pub mod catalog;
pub mod feature;
pub mod labels;
pub mod plan;
pub mod purchased;
pub mod selection;
pub mod services;
pub mod stores;

pub use cart::{Cart, LineItem, compute_cart};
pub use catalog::AddOn;
pub use feature::{FeatureId, RowState, resolve};
pub use plan::{Plan, PlanIncludes, ScreenVariant, ServiceFeature};
pub use selection::Selection;
pub use services::{ServicesEvent, ServicesState};
