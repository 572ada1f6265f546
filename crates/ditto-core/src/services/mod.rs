//! Services screen state and its reducer.
//!
//! [`ServicesState`] owns everything the screen can change: add-on
//! selections, on/off toggles for plan-included services, fingerprint
//! providers, the Beatport form and the label modal. Events go through
//! [`ServicesState::apply`]; every other method is a pure query.

mod genres;

use std::fmt;

use serde::Serialize;

use crate::cart::{Cart, compute_cart};
use crate::catalog::AddOn;
use crate::labels::{
    LabelError, LabelModal, LabelOption, LabelRegistry, ModalAction, ModalError, ModalOutcome,
};
use crate::plan::{Plan, PlanIncludes, ServiceFeature};
use crate::selection::Selection;

pub use genres::{BEATPORT_GENRES, DEFAULT_PRIMARY_GENRE, DEFAULT_SECONDARY_GENRE, is_genre};

/// Add-ons shown as plain rows above the service cards.
pub const ROW_ADD_ONS: [AddOn; 5] = [
    AddOn::ChartsUk,
    AddOn::ChartsUs,
    AddOn::ChartsAu,
    AddOn::ChartsWorldwide,
    AddOn::PreRelease,
];

// ---------------------------------------------------------------------------
// Fingerprint providers
// ---------------------------------------------------------------------------

/// Audio fingerprinting services a release can be registered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FingerprintProvider {
    Jaxsta,
    AcrCloud,
    SoundCloud,
    Gracenote,
    SoundMouse,
}

impl FingerprintProvider {
    pub const ALL: [FingerprintProvider; 5] = [
        FingerprintProvider::Jaxsta,
        FingerprintProvider::AcrCloud,
        FingerprintProvider::SoundCloud,
        FingerprintProvider::Gracenote,
        FingerprintProvider::SoundMouse,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Jaxsta => "Jaxsta",
            Self::AcrCloud => "ACRCloud",
            Self::SoundCloud => "SoundCloud",
            Self::Gracenote => "Gracenote",
            Self::SoundMouse => "SoundMouse",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for FingerprintProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Cards
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeVariant {
    Green,
    Grey,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Badge {
    pub text: &'static str,
    pub variant: BadgeVariant,
}

impl Badge {
    fn green(text: &'static str) -> Self {
        Self {
            text,
            variant: BadgeVariant::Green,
        }
    }

    fn grey(text: &'static str) -> Self {
        Self {
            text,
            variant: BadgeVariant::Grey,
        }
    }
}

/// What a card shows on its price slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "amount")]
pub enum CardPrice {
    Free,
    Price(u32),
    None,
}

/// Message shown on the fingerprint card when the plan lacks it.
pub const FINGERPRINT_UPGRADE_MESSAGE: &str = "Upgrade to Pro to access Audio Fingerprint Services";

/// One resolved service card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceCard {
    pub feature: ServiceFeature,
    pub title: &'static str,
    pub description: &'static str,
    pub badge: Option<Badge>,
    pub checked: bool,
    pub disabled: bool,
    pub disabled_message: Option<&'static str>,
    pub price: CardPrice,
}

/// A charts or pre-release row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddOnRow {
    pub add_on: AddOn,
    pub title: &'static str,
    pub price: u32,
    pub selected: bool,
    pub flag_code: Option<&'static str>,
}

// ---------------------------------------------------------------------------
// Events and errors
// ---------------------------------------------------------------------------

/// Everything the user can do on the services screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServicesEvent {
    /// Flip a purchasable selection directly. Add-ons that buy a service
    /// follow that service's card: hidden or locked cards are rejected and
    /// so are services the plan already includes.
    ToggleAddOn(AddOn),
    /// Click a service card: flips the plan toggle when included, the
    /// purchase selection otherwise.
    ToggleService(ServiceFeature),
    ToggleProvider(FingerprintProvider),
    /// Pick a label from the Beatport dropdown.
    ChooseLabel(String),
    /// "+ Add New Beatport Label" in the dropdown.
    OpenLabelModal,
    Modal(ModalAction),
    SetPrimaryGenre(String),
    SetSecondaryGenre(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServicesError {
    #[error("{0} is not available on this plan")]
    Unavailable(ServiceFeature),

    #[error("{0} is already included with this plan")]
    Included(ServiceFeature),

    #[error("fingerprint providers can only be changed while fingerprinting is on")]
    ProvidersLocked,

    #[error("unknown Beatport genre: {0:?}")]
    UnknownGenre(String),

    #[error(transparent)]
    Label(#[from] LabelError),

    #[error(transparent)]
    Modal(#[from] ModalError),
}

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// All mutable state of one services screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServicesState {
    plan: Plan,
    selection: Selection,
    /// On/off position of each plan-included service, indexed by card order.
    included_on: [bool; 5],
    providers_on: [bool; 5],
    labels: LabelRegistry,
    modal: Option<LabelModal>,
    primary_genre: String,
    secondary_genre: String,
}

impl ServicesState {
    /// Fresh screen for `plan` with the default label list.
    pub fn new(plan: Plan) -> Self {
        Self::with_labels(plan, LabelRegistry::default())
    }

    pub fn with_labels(plan: Plan, labels: LabelRegistry) -> Self {
        Self {
            plan,
            selection: Selection::new(),
            included_on: [true; 5],
            providers_on: [true; 5],
            labels,
            modal: None,
            primary_genre: DEFAULT_PRIMARY_GENRE.to_string(),
            secondary_genre: DEFAULT_SECONDARY_GENRE.to_string(),
        }
    }

    // -- Reducer --

    /// Apply one event. On error the state is unchanged.
    pub fn apply(&mut self, event: ServicesEvent) -> Result<(), ServicesError> {
        tracing::debug!(plan = %self.plan, ?event, "services event");
        match event {
            ServicesEvent::ToggleAddOn(add_on) => {
                if let Some(feature) = add_on.service() {
                    self.available_card(feature)?;
                    if self.includes().includes(feature) {
                        return Err(ServicesError::Included(feature));
                    }
                }
                self.selection.toggle(add_on);
            }
            ServicesEvent::ToggleService(feature) => self.toggle_service(feature)?,
            ServicesEvent::ToggleProvider(provider) => {
                if !self.providers_visible() {
                    return Err(ServicesError::ProvidersLocked);
                }
                let slot = &mut self.providers_on[provider.index()];
                *slot = !*slot;
            }
            ServicesEvent::ChooseLabel(name) => {
                let is_beatport = self
                    .labels
                    .get(&name)
                    .ok_or_else(|| LabelError::NotFound(name.clone()))?
                    .is_beatport_label;
                if is_beatport {
                    self.labels.select(&name)?;
                } else {
                    self.modal = Some(LabelModal::upgrade(name));
                }
            }
            ServicesEvent::OpenLabelModal => {
                self.modal = Some(LabelModal::select());
            }
            ServicesEvent::Modal(action) => {
                let modal = self.modal.as_ref().ok_or(ModalError::NotOpen)?;
                self.modal = match modal.transition(action, &mut self.labels)? {
                    ModalOutcome::Open(next) => Some(next),
                    ModalOutcome::Closed => None,
                };
            }
            ServicesEvent::SetPrimaryGenre(genre) => {
                self.primary_genre = checked_genre(genre)?;
            }
            ServicesEvent::SetSecondaryGenre(genre) => {
                self.secondary_genre = checked_genre(genre)?;
            }
        }
        Ok(())
    }

    fn available_card(&self, feature: ServiceFeature) -> Result<ServiceCard, ServicesError> {
        self.card(feature)
            .filter(|card| !card.disabled)
            .ok_or(ServicesError::Unavailable(feature))
    }

    fn toggle_service(&mut self, feature: ServiceFeature) -> Result<(), ServicesError> {
        let card = self.available_card(feature)?;
        if self.includes().includes(feature) {
            let slot = &mut self.included_on[service_index(feature)];
            *slot = !*slot;
        } else if let Some(add_on) = AddOn::for_service(feature) {
            self.selection.toggle(add_on);
        } else {
            return Err(ServicesError::Unavailable(card.feature));
        }
        Ok(())
    }

    // -- Queries --

    pub fn plan(&self) -> Plan {
        self.plan
    }

    pub fn includes(&self) -> PlanIncludes {
        self.plan.includes()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn labels(&self) -> &LabelRegistry {
        &self.labels
    }

    pub fn modal(&self) -> Option<&LabelModal> {
        self.modal.as_ref()
    }

    pub fn primary_genre(&self) -> &str {
        &self.primary_genre
    }

    pub fn secondary_genre(&self) -> &str {
        &self.secondary_genre
    }

    pub fn cart(&self) -> Cart {
        compute_cart(&self.selection, &self.includes())
    }

    pub fn add_on_rows(&self) -> Vec<AddOnRow> {
        ROW_ADD_ONS
            .into_iter()
            .map(|add_on| AddOnRow {
                add_on,
                title: add_on.row_title(),
                price: add_on.price(),
                selected: self.selection.is_selected(add_on),
                flag_code: add_on.flag_code(),
            })
            .collect()
    }

    /// Whether the card for `feature` shows as ticked.
    pub fn is_checked(&self, feature: ServiceFeature) -> bool {
        if self.includes().includes(feature) {
            self.included_on[service_index(feature)]
        } else {
            AddOn::for_service(feature).is_some_and(|a| self.selection.is_selected(a))
        }
    }

    /// Resolve the card for `feature`, or `None` when the plan hides it.
    pub fn card(&self, feature: ServiceFeature) -> Option<ServiceCard> {
        let hidden = self.plan == Plan::DittoPlusRls
            && matches!(
                feature,
                ServiceFeature::AutoRelease | ServiceFeature::ReleaseProtection
            );
        if hidden {
            return None;
        }

        let included = self.includes().includes(feature);
        let purchasable = AddOn::for_service(feature);
        let disabled = !included && purchasable.is_none();
        let price = match (included, purchasable) {
            (true, _) => CardPrice::Free,
            (false, Some(add_on)) => CardPrice::Price(add_on.price()),
            (false, None) => CardPrice::None,
        };

        Some(ServiceCard {
            feature,
            title: feature.title(),
            description: feature.description(),
            badge: self.badge(feature, included),
            checked: self.is_checked(feature),
            disabled,
            disabled_message: disabled.then_some(FINGERPRINT_UPGRADE_MESSAGE),
            price,
        })
    }

    /// Visible cards, in display order.
    pub fn cards(&self) -> Vec<ServiceCard> {
        ServiceFeature::ALL
            .into_iter()
            .filter_map(|feature| self.card(feature))
            .collect()
    }

    fn badge(&self, feature: ServiceFeature, included: bool) -> Option<Badge> {
        if included {
            let text = match (feature, self.plan) {
                (ServiceFeature::YouTube, Plan::DittoPlusRls) => return None,
                (_, Plan::Pro) => "Included with Pro",
                (_, Plan::Label) => "Included with Label",
                (_, Plan::DittoPlusRls) => "Included with Ditto+ RLS",
                (_, Plan::Starter) => return None,
            };
            return Some(Badge::green(text));
        }
        if self.plan != Plan::Starter {
            return None;
        }
        match feature {
            ServiceFeature::Fingerprint => Some(Badge::grey("Available in Pro")),
            ServiceFeature::Beatport => None,
            _ => Some(Badge::grey("Included in Pro")),
        }
    }

    /// Providers are listed while fingerprinting is included and on.
    pub fn providers_visible(&self) -> bool {
        self.includes().fingerprint && self.included_on[service_index(ServiceFeature::Fingerprint)]
    }

    pub fn provider_enabled(&self, provider: FingerprintProvider) -> bool {
        self.providers_on[provider.index()]
    }

    /// The Beatport label and genre form shows while the Beatport card is
    /// ticked.
    pub fn beatport_form_visible(&self) -> bool {
        self.is_checked(ServiceFeature::Beatport)
    }

    /// Serializable snapshot of everything the screen renders.
    pub fn view(&self) -> ServicesView {
        ServicesView {
            plan: self.plan,
            add_ons: self.add_on_rows(),
            cards: self.cards(),
            providers: self.providers_visible().then(|| {
                FingerprintProvider::ALL
                    .into_iter()
                    .map(|p| ProviderView {
                        provider: p,
                        name: p.name(),
                        enabled: self.provider_enabled(p),
                    })
                    .collect()
            }),
            beatport: self.beatport_form_visible().then(|| BeatportFormView {
                label: self.labels.active().cloned(),
                primary_genre: self.primary_genre.clone(),
                secondary_genre: self.secondary_genre.clone(),
            }),
            cart: self.cart(),
        }
    }
}

/// Reducer form of [`ServicesState::apply`].
pub fn reduce(
    mut state: ServicesState,
    event: ServicesEvent,
) -> Result<ServicesState, ServicesError> {
    state.apply(event)?;
    Ok(state)
}

fn service_index(feature: ServiceFeature) -> usize {
    feature as usize
}

fn checked_genre(genre: String) -> Result<String, ServicesError> {
    if is_genre(&genre) {
        Ok(genre)
    } else {
        Err(ServicesError::UnknownGenre(genre))
    }
}

// ---------------------------------------------------------------------------
// Snapshot types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderView {
    pub provider: FingerprintProvider,
    pub name: &'static str,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BeatportFormView {
    pub label: Option<LabelOption>,
    pub primary_genre: String,
    pub secondary_genre: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServicesView {
    pub plan: Plan,
    pub add_ons: Vec<AddOnRow>,
    pub cards: Vec<ServiceCard>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub providers: Option<Vec<ProviderView>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub beatport: Option<BeatportFormView>,
    pub cart: Cart,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn card(state: &ServicesState, feature: ServiceFeature) -> ServiceCard {
        state.card(feature).expect("card should be visible")
    }

    #[test]
    fn starter_cards_are_purchasable_except_fingerprint() {
        let state = ServicesState::new(Plan::Starter);
        let yt = card(&state, ServiceFeature::YouTube);
        assert_eq!(yt.price, CardPrice::Price(10));
        assert_eq!(yt.badge, Some(Badge::grey("Included in Pro")));
        assert!(!yt.checked);
        assert!(!yt.disabled);

        let fp = card(&state, ServiceFeature::Fingerprint);
        assert!(fp.disabled);
        assert_eq!(fp.price, CardPrice::None);
        assert_eq!(fp.badge, Some(Badge::grey("Available in Pro")));
        assert_eq!(fp.disabled_message, Some(FINGERPRINT_UPGRADE_MESSAGE));

        let bp = card(&state, ServiceFeature::Beatport);
        assert_eq!(bp.badge, None);
        assert_eq!(bp.price, CardPrice::Price(65));
    }

    #[test]
    fn pro_cards_are_free_and_on() {
        let state = ServicesState::new(Plan::Pro);
        for feature in [
            ServiceFeature::AutoRelease,
            ServiceFeature::ReleaseProtection,
            ServiceFeature::YouTube,
            ServiceFeature::Fingerprint,
        ] {
            let c = card(&state, feature);
            assert_eq!(c.price, CardPrice::Free);
            assert!(c.checked);
            assert_eq!(c.badge, Some(Badge::green("Included with Pro")));
        }
        assert_eq!(
            card(&state, ServiceFeature::Beatport).price,
            CardPrice::Price(65)
        );
    }

    #[test]
    fn rls_hides_auto_release_and_protection() {
        let state = ServicesState::new(Plan::DittoPlusRls);
        let features: Vec<ServiceFeature> = state.cards().iter().map(|c| c.feature).collect();
        assert_eq!(
            features,
            vec![
                ServiceFeature::YouTube,
                ServiceFeature::Fingerprint,
                ServiceFeature::Beatport
            ]
        );
        assert_eq!(card(&state, ServiceFeature::YouTube).badge, None);
        assert_eq!(
            card(&state, ServiceFeature::Beatport).badge,
            Some(Badge::green("Included with Ditto+ RLS"))
        );
    }

    #[test]
    fn hidden_or_locked_cards_reject_toggle() {
        let mut rls = ServicesState::new(Plan::DittoPlusRls);
        assert_eq!(
            rls.apply(ServicesEvent::ToggleService(ServiceFeature::AutoRelease)),
            Err(ServicesError::Unavailable(ServiceFeature::AutoRelease))
        );
        let mut starter = ServicesState::new(Plan::Starter);
        let before = starter.clone();
        assert_eq!(
            starter.apply(ServicesEvent::ToggleService(ServiceFeature::Fingerprint)),
            Err(ServicesError::Unavailable(ServiceFeature::Fingerprint))
        );
        assert_eq!(starter, before);
    }

    #[test]
    fn add_on_toggle_follows_service_card() {
        let mut rls = ServicesState::new(Plan::DittoPlusRls);
        let before = rls.clone();
        for add_on in [AddOn::AutoRelease, AddOn::ReleaseProtection] {
            assert_eq!(
                rls.apply(ServicesEvent::ToggleAddOn(add_on)),
                Err(ServicesError::Unavailable(add_on.service().unwrap()))
            );
        }
        assert_eq!(
            rls.apply(ServicesEvent::ToggleAddOn(AddOn::Beatport)),
            Err(ServicesError::Included(ServiceFeature::Beatport))
        );
        assert_eq!(rls, before);

        let mut pro = ServicesState::new(Plan::Pro);
        assert_eq!(
            pro.apply(ServicesEvent::ToggleAddOn(AddOn::YouTube)),
            Err(ServicesError::Included(ServiceFeature::YouTube))
        );
        pro.apply(ServicesEvent::ToggleAddOn(AddOn::Beatport)).unwrap();
        assert_eq!(pro.cart().total, 65);
    }

    #[test]
    fn providers_follow_fingerprint_toggle() {
        let mut state = ServicesState::new(Plan::Label);
        assert!(state.providers_visible());
        state
            .apply(ServicesEvent::ToggleProvider(FingerprintProvider::Gracenote))
            .unwrap();
        assert!(!state.provider_enabled(FingerprintProvider::Gracenote));

        state
            .apply(ServicesEvent::ToggleService(ServiceFeature::Fingerprint))
            .unwrap();
        assert!(!state.providers_visible());
        assert_eq!(
            state.apply(ServicesEvent::ToggleProvider(FingerprintProvider::Jaxsta)),
            Err(ServicesError::ProvidersLocked)
        );
    }

    #[test]
    fn beatport_form_shows_when_selected_or_included() {
        let mut starter = ServicesState::new(Plan::Starter);
        assert!(!starter.beatport_form_visible());
        starter
            .apply(ServicesEvent::ToggleService(ServiceFeature::Beatport))
            .unwrap();
        assert!(starter.beatport_form_visible());
        assert_eq!(starter.cart().total, 65);

        let mut rls = ServicesState::new(Plan::DittoPlusRls);
        assert!(rls.beatport_form_visible());
        rls.apply(ServicesEvent::ToggleService(ServiceFeature::Beatport))
            .unwrap();
        assert!(!rls.beatport_form_visible());
        assert_eq!(rls.cart().total, 0);
    }

    #[test]
    fn genres_must_come_from_the_list() {
        let mut state = ServicesState::new(Plan::Starter);
        state
            .apply(ServicesEvent::SetPrimaryGenre("House".into()))
            .unwrap();
        assert_eq!(state.primary_genre(), "House");
        assert_eq!(
            state.apply(ServicesEvent::SetSecondaryGenre("Polka".into())),
            Err(ServicesError::UnknownGenre("Polka".into()))
        );
        assert_eq!(state.secondary_genre(), DEFAULT_SECONDARY_GENRE);
    }

    #[test]
    fn choosing_plain_label_opens_upgrade_modal() {
        let mut state = ServicesState::new(Plan::DittoPlusRls);
        state
            .apply(ServicesEvent::ChooseLabel("Defected Records".into()))
            .unwrap();
        let modal = state.modal().unwrap();
        assert_eq!(modal.label_to_upgrade(), Some("Defected Records"));
        state
            .apply(ServicesEvent::Modal(ModalAction::SubmitUpgrade))
            .unwrap();
        assert!(state.modal().is_none());
        assert_eq!(state.labels().active().unwrap().name, "Defected Records");
    }

    #[test]
    fn modal_action_without_open_modal_fails() {
        let mut state = ServicesState::new(Plan::Pro);
        assert_eq!(
            state.apply(ServicesEvent::Modal(ModalAction::Back)),
            Err(ServicesError::Modal(ModalError::NotOpen))
        );
    }

    #[test]
    fn view_includes_optional_sections() {
        let state = ServicesState::new(Plan::DittoPlusRls);
        let view = state.view();
        assert_eq!(view.providers.as_ref().map(Vec::len), Some(5));
        let form = view.beatport.expect("beatport form visible on rls");
        assert_eq!(form.primary_genre, DEFAULT_PRIMARY_GENRE);
        assert_eq!(view.add_ons.len(), 5);

        let starter = ServicesState::new(Plan::Starter).view();
        assert!(starter.providers.is_none());
        assert!(starter.beatport.is_none());
    }

    #[test]
    fn view_serializes_with_stable_names() {
        let view = ServicesState::new(Plan::Starter).view();
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["plan"], "starter");
        assert_eq!(json["cards"][2]["feature"], "youtube");
        assert_eq!(
            json["cards"][2]["price"],
            serde_json::json!({"kind": "price", "amount": 10})
        );
        assert_eq!(json["cards"][0]["badge"]["variant"], "grey");
        assert!(json.get("providers").is_none());
    }
}
