//! User intent to buy add-ons in the current session.

use serde::Serialize;

use crate::catalog::AddOn;

/// One boolean per purchasable add-on.
///
/// Only [`Selection::toggle`] and [`Selection::set`] mutate it, and both keep
/// the charts exclusivity: Worldwide is never selected together with a
/// region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Selection {
    charts_uk: bool,
    charts_us: bool,
    charts_au: bool,
    charts_worldwide: bool,
    pre_release: bool,
    auto_release: bool,
    release_protection: bool,
    you_tube: bool,
    beatport: bool,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a selection by turning each add-on on in order.
    pub fn from_add_ons(add_ons: impl IntoIterator<Item = AddOn>) -> Self {
        let mut selection = Self::new();
        for add_on in add_ons {
            selection.set(add_on, true);
        }
        selection
    }

    pub fn is_selected(&self, add_on: AddOn) -> bool {
        *self.slot(add_on)
    }

    /// Flip `add_on` and return its new value.
    pub fn toggle(&mut self, add_on: AddOn) -> bool {
        let value = !self.is_selected(add_on);
        self.set(add_on, value);
        value
    }

    /// Set `add_on` to `value`, clearing the other side of the charts
    /// exclusivity when turning a chart on.
    pub fn set(&mut self, add_on: AddOn, value: bool) {
        *self.slot_mut(add_on) = value;
        if value {
            if add_on == AddOn::ChartsWorldwide {
                for region in AddOn::CHART_REGIONS {
                    *self.slot_mut(region) = false;
                }
            } else if add_on.is_chart_region() {
                self.charts_worldwide = false;
            }
        }
        tracing::debug!(add_on = %add_on, value, "selection updated");
    }

    /// Selected add-ons, in catalog order.
    pub fn selected(&self) -> impl Iterator<Item = AddOn> + '_ {
        AddOn::ALL.into_iter().filter(|a| self.is_selected(*a))
    }

    fn slot(&self, add_on: AddOn) -> &bool {
        match add_on {
            AddOn::ChartsUk => &self.charts_uk,
            AddOn::ChartsUs => &self.charts_us,
            AddOn::ChartsAu => &self.charts_au,
            AddOn::ChartsWorldwide => &self.charts_worldwide,
            AddOn::PreRelease => &self.pre_release,
            AddOn::AutoRelease => &self.auto_release,
            AddOn::ReleaseProtection => &self.release_protection,
            AddOn::YouTube => &self.you_tube,
            AddOn::Beatport => &self.beatport,
        }
    }

    fn slot_mut(&mut self, add_on: AddOn) -> &mut bool {
        match add_on {
            AddOn::ChartsUk => &mut self.charts_uk,
            AddOn::ChartsUs => &mut self.charts_us,
            AddOn::ChartsAu => &mut self.charts_au,
            AddOn::ChartsWorldwide => &mut self.charts_worldwide,
            AddOn::PreRelease => &mut self.pre_release,
            AddOn::AutoRelease => &mut self.auto_release,
            AddOn::ReleaseProtection => &mut self.release_protection,
            AddOn::YouTube => &mut self.you_tube,
            AddOn::Beatport => &mut self.beatport,
        }
    }
}
