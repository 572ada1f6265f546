//! TUI application state and data model.

use std::time::Duration;

use ditto_core::labels::{LabelRegistry, ModalAction, ModalStep};
use ditto_core::services::{
    BEATPORT_GENRES, FingerprintProvider, ROW_ADD_ONS, ServicesError,
};
use ditto_core::stores::{StoreCatalog, load_catalog};
use ditto_core::{AddOn, Plan, ServiceFeature, ServicesEvent, ServicesState};

/// Which view the TUI is currently showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Services,
    Stores,
    Help,
}

/// One selectable line of the services view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Item {
    AddOn(AddOn),
    Service(ServiceFeature),
    Provider(FingerprintProvider),
    Label,
    PrimaryGenre,
    SecondaryGenre,
}

/// Application state for the TUI.
pub struct App {
    pub state: ServicesState,
    pub catalog: StoreCatalog,
    pub current_view: View,
    pub selected: usize,
    pub selected_store: usize,
    /// Cursor on the label modal's select page. One past the last label is
    /// the "create" entry.
    pub modal_cursor: usize,
    /// Label the dropdown last stepped onto. It can differ from the active
    /// label when that step opened the upgrade page instead.
    pub label_cursor: Option<String>,
    /// Text typed on the label modal's add page.
    pub input: String,
    pub tick_rate: Duration,
    pub should_quit: bool,
    pub status_message: Option<String>,
}

impl App {
    pub fn new(plan: Plan, labels: LabelRegistry) -> Self {
        Self {
            state: ServicesState::with_labels(plan, labels),
            catalog: load_catalog(),
            current_view: View::Services,
            selected: 0,
            selected_store: 0,
            modal_cursor: 0,
            label_cursor: None,
            input: String::new(),
            tick_rate: Duration::from_millis(250),
            should_quit: false,
            status_message: None,
        }
    }

    /// Selectable lines of the services view, top to bottom.
    pub fn items(&self) -> Vec<Item> {
        let mut items: Vec<Item> = ROW_ADD_ONS.into_iter().map(Item::AddOn).collect();
        items.extend(self.state.cards().iter().map(|c| Item::Service(c.feature)));
        if self.state.providers_visible() {
            items.extend(FingerprintProvider::ALL.into_iter().map(Item::Provider));
        }
        if self.state.beatport_form_visible() {
            items.extend([Item::Label, Item::PrimaryGenre, Item::SecondaryGenre]);
        }
        items
    }

    pub fn selected_item(&self) -> Option<Item> {
        self.items().get(self.selected).copied()
    }

    pub fn modal_open(&self) -> bool {
        self.state.modal().is_some()
    }

    /// Apply a services event and keep the cursors in range.
    pub fn apply(&mut self, event: ServicesEvent) -> Result<(), ServicesError> {
        self.state.apply(event)?;
        self.clamp_selection();
        Ok(())
    }

    fn clamp_selection(&mut self) {
        let len = self.items().len();
        if self.selected >= len && len > 0 {
            self.selected = len - 1;
        }
    }

    // -- Navigation --

    pub fn navigate_back(&mut self) {
        match self.current_view {
            View::Services => self.should_quit = true,
            View::Stores | View::Help => self.current_view = View::Services,
        }
    }

    pub fn move_up(&mut self) {
        match self.current_view {
            View::Services => self.selected = self.selected.saturating_sub(1),
            View::Stores => self.selected_store = self.selected_store.saturating_sub(1),
            View::Help => {}
        }
    }

    pub fn move_down(&mut self) {
        match self.current_view {
            View::Services => {
                let len = self.items().len();
                if len > 0 && self.selected < len - 1 {
                    self.selected += 1;
                }
            }
            View::Stores => {
                let len = self.catalog.delivered().len();
                if len > 0 && self.selected_store < len - 1 {
                    self.selected_store += 1;
                }
            }
            View::Help => {}
        }
    }

    pub fn cycle_view(&mut self) {
        self.current_view = match self.current_view {
            View::Services => View::Stores,
            View::Stores => View::Services,
            View::Help => View::Help,
        };
    }

    pub fn show_help(&mut self) {
        self.current_view = View::Help;
    }

    // -- Actions --

    /// Toggle or open whatever is under the cursor.
    pub fn activate_selected(&mut self) -> Result<(), ServicesError> {
        let Some(item) = self.selected_item() else {
            return Ok(());
        };
        match item {
            Item::AddOn(add_on) => self.apply(ServicesEvent::ToggleAddOn(add_on)),
            Item::Service(feature) => self.apply(ServicesEvent::ToggleService(feature)),
            Item::Provider(provider) => self.apply(ServicesEvent::ToggleProvider(provider)),
            Item::Label => {
                self.modal_cursor = 0;
                self.apply(ServicesEvent::OpenLabelModal)
            }
            Item::PrimaryGenre | Item::SecondaryGenre => self.cycle_selected(1),
        }
    }

    /// Step a dropdown row (label or genre) forward or back.
    pub fn cycle_selected(&mut self, step: isize) -> Result<(), ServicesError> {
        match self.selected_item() {
            Some(Item::Label) => {
                let names: Vec<&str> = self
                    .state
                    .labels()
                    .labels()
                    .iter()
                    .map(|l| l.name.as_str())
                    .collect();
                let current = self
                    .label_cursor
                    .as_deref()
                    .or_else(|| self.state.labels().active().map(|l| l.name.as_str()));
                let next = step_through(&names, current, step).to_string();
                self.apply(ServicesEvent::ChooseLabel(next.clone()))?;
                self.label_cursor = Some(next);
                Ok(())
            }
            Some(Item::PrimaryGenre) => {
                let next = step_through(&BEATPORT_GENRES, Some(self.state.primary_genre()), step);
                self.apply(ServicesEvent::SetPrimaryGenre(next.to_string()))
            }
            Some(Item::SecondaryGenre) => {
                let next =
                    step_through(&BEATPORT_GENRES, Some(self.state.secondary_genre()), step);
                self.apply(ServicesEvent::SetSecondaryGenre(next.to_string()))
            }
            _ => Ok(()),
        }
    }

    // -- Label modal --

    pub fn modal_step(&self) -> Option<ModalStep> {
        self.state.modal().map(|m| m.step())
    }

    pub fn modal_move(&mut self, down: bool) {
        let entries = self.state.labels().labels().len() + 1;
        if down {
            if self.modal_cursor + 1 < entries {
                self.modal_cursor += 1;
            }
        } else {
            self.modal_cursor = self.modal_cursor.saturating_sub(1);
        }
    }

    /// Confirm the current modal page.
    pub fn modal_confirm(&mut self) -> Result<(), ServicesError> {
        let action = match self.modal_step() {
            Some(ModalStep::Select) => {
                match self.state.labels().labels().get(self.modal_cursor) {
                    Some(label) => ModalAction::PickLabel(label.name.clone()),
                    None => ModalAction::CreateNew,
                }
            }
            Some(ModalStep::Add) => ModalAction::SubmitAdd(self.input.trim().to_string()),
            Some(ModalStep::Upgrade) => ModalAction::SubmitUpgrade,
            None => return Ok(()),
        };
        self.modal_action(action)
    }

    pub fn modal_action(&mut self, action: ModalAction) -> Result<(), ServicesError> {
        let submitted = matches!(
            action,
            ModalAction::SubmitAdd(_) | ModalAction::SubmitUpgrade
        );
        let dismissed = action == ModalAction::Close;
        self.apply(ServicesEvent::Modal(action))?;
        if !self.modal_open() {
            self.input.clear();
            self.modal_cursor = 0;
            // Any close other than a plain dismiss has moved the active label.
            if !dismissed {
                self.label_cursor = None;
            }
            if submitted {
                if let Some(label) = self.state.labels().active() {
                    self.status_message = Some(format!("Selected label {}", label.name));
                }
            }
        }
        Ok(())
    }
}

/// The entry `step` places after `current`, wrapping at both ends.
fn step_through<'a>(entries: &[&'a str], current: Option<&str>, step: isize) -> &'a str {
    let len = entries.len() as isize;
    let index = current
        .and_then(|c| entries.iter().position(|e| *e == c))
        .map_or(0, |i| i as isize);
    entries[(index + step).rem_euclid(len) as usize]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
