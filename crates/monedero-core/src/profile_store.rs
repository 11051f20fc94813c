//! The owned profile set, the active selection, and the single
//! mutation entry point every engine operation goes through.

use tracing::{debug, warn};
use uuid::Uuid;

use monedero_domain::{BankAccount, Category, PersistedState, Profile, ProfileData, Theme};

use crate::{
    error::{CoreError, CoreResult},
    storage::{state_warnings, StateStorage},
};

/// Holds every profile plus the active pointer and persists the whole
/// document after each committed change. All ledger mutations funnel
/// through [`ProfileStore::update_active_data`].
pub struct ProfileStore {
    state: PersistedState,
    storage: Box<dyn StateStorage>,
}

impl ProfileStore {
    /// Loads the persisted document (or starts empty on first run) and
    /// applies schema backfills.
    pub fn load(storage: Box<dyn StateStorage>) -> CoreResult<Self> {
        let mut state = storage.load_state()?.unwrap_or_default();
        let fixes = state.normalize();
        if fixes > 0 {
            warn!(fixes, "persisted state required schema backfill");
        }
        for warning in state_warnings(&state) {
            warn!("{warning}");
        }
        Ok(Self { state, storage })
    }

    pub fn state(&self) -> &PersistedState {
        &self.state
    }

    pub fn profiles(&self) -> &[Profile] {
        &self.state.profiles
    }

    pub fn theme(&self) -> Theme {
        self.state.theme
    }

    pub fn active_profile(&self) -> Option<&Profile> {
        self.state.active_profile()
    }

    /// Creates a profile seeded with the default category and account
    /// set, makes it active, and persists.
    pub fn create_profile(
        &mut self,
        name: impl Into<String>,
        country_code: impl Into<String>,
        currency: impl Into<String>,
    ) -> CoreResult<Uuid> {
        let profile = Profile::new(name, country_code, currency, default_profile_data());
        let id = profile.id;
        self.state.profiles.push(profile);
        self.state.active_profile_id = Some(id);
        self.persist()?;
        debug!(profile = %id, "profile created");
        Ok(id)
    }

    /// Deletes a profile and all its nested data. Clears the active
    /// selection when it pointed at the removed profile.
    pub fn delete_profile(&mut self, id: Uuid) -> CoreResult<()> {
        let before = self.state.profiles.len();
        self.state.profiles.retain(|p| p.id != id);
        if self.state.profiles.len() == before {
            return Err(CoreError::ProfileNotFound(id));
        }
        if self.state.active_profile_id == Some(id) {
            self.state.active_profile_id = None;
        }
        self.persist()?;
        debug!(profile = %id, "profile deleted");
        Ok(())
    }

    pub fn select_profile(&mut self, id: Uuid) -> CoreResult<()> {
        if self.state.profile(id).is_none() {
            return Err(CoreError::ProfileNotFound(id));
        }
        self.state.active_profile_id = Some(id);
        self.persist()
    }

    pub fn clear_active(&mut self) -> CoreResult<()> {
        self.state.active_profile_id = None;
        self.persist()
    }

    pub fn set_theme(&mut self, theme: Theme) -> CoreResult<()> {
        self.state.theme = theme;
        self.persist()
    }

    /// Applies `f` to the active profile's data and persists on
    /// success. On failure the state is left untouched and nothing is
    /// written: the engine services only mutate their argument after
    /// validation has passed.
    pub fn update_active_data<T>(
        &mut self,
        f: impl FnOnce(&mut ProfileData) -> CoreResult<T>,
    ) -> CoreResult<T> {
        let id = self
            .state
            .active_profile_id
            .ok_or(CoreError::NoActiveProfile)?;
        let profile = self
            .state
            .profile_mut(id)
            .ok_or(CoreError::ProfileNotFound(id))?;
        let value = f(&mut profile.data)?;
        self.persist()?;
        Ok(value)
    }

    /// Replaces the whole document from an external JSON backup. The
    /// payload is parsed and shape-checked in full before any of it is
    /// applied; a malformed document changes nothing.
    pub fn import_state(&mut self, json: &str) -> CoreResult<()> {
        let mut imported: PersistedState = serde_json::from_str(json)
            .map_err(|err| CoreError::Serde(format!("backup document is not valid: {err}")))?;
        let fixes = imported.normalize();
        if fixes > 0 {
            warn!(fixes, "imported document required schema backfill");
        }
        self.state = imported;
        self.persist()
    }

    fn persist(&self) -> CoreResult<()> {
        self.storage.save_state(&self.state)
    }
}

/// Seed data every new profile starts from: the default category set
/// (with the reserved general/savings roles tagged) and one default
/// bank account.
pub fn default_profile_data() -> ProfileData {
    ProfileData {
        transactions: Vec::new(),
        bank_accounts: vec![BankAccount::new("BBVA", "#3b82f6")],
        categories: vec![
            Category::new("Comida", "Food", "#008f39"),
            Category::new("Transporte", "Transport", "#3b82f6"),
            Category::new("Ropa", "Clothing", "#ec4899"),
            Category::new("Hogar", "House", "#f97316"),
            Category::new("Entretenimiento", "Entertainment", "#8b5cf6"),
            Category::new("Salud", "Health", "#ef4444"),
            Category::new("Ahorro", "Tag", "#14b8a6"),
            Category::new("General", "ArrowDown", "#ef4444"),
        ],
        fixed_expenses: Vec::new(),
        assets: Vec::new(),
        liabilities: Vec::new(),
        loans: Vec::new(),
    }
}
