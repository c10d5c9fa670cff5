//! Persisted audit state.
//!
//! State is kept as one JSON document per key in a [`StateStore`]. The
//! calculation engine never touches a store; [`crate::session::AuditSession`]
//! writes after each mutation.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter};
use tracing::{debug, warn};

use crate::domain::{EquipmentRecord, Facility, Room, TariffConfig, UserSession};
use crate::error::AuditResult;
use crate::training::{ModuleId, TrainingProgress};

/// Key-value storage for serialized state.
pub trait StateStore: Send {
    fn get(&self, key: &str) -> AuditResult<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> AuditResult<()>;
    fn remove(&mut self, key: &str) -> AuditResult<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumIter)]
#[strum(serialize_all = "camelCase")]
pub enum StateKey {
    Facility,
    Rooms,
    Equipment,
    TariffSettings,
    User,
    TrainingProgress,
    PerfectScore,
}

impl StateKey {
    pub fn storage_key(self, prefix: &str) -> String {
        format!("{prefix}{}", self.as_ref())
    }
}

/// Everything the application persists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuditState {
    pub facility: Facility,
    pub rooms: Vec<Room>,
    pub equipment: Vec<EquipmentRecord>,
    pub tariff: TariffConfig,
    pub user: Option<UserSession>,
    pub training: TrainingProgress,
}

impl AuditState {
    /// Read every key independently. Missing keys keep the value from
    /// `fallback`; unreadable or corrupt ones do too, with a warning.
    /// Rooms and equipment are read record by record, so one bad entry only
    /// drops that entry.
    pub fn load(store: &dyn StateStore, prefix: &str, fallback: AuditState) -> Self {
        let AuditState { facility, rooms, equipment, tariff, user, training } = fallback;
        let state = Self {
            facility: read_or(store, prefix, StateKey::Facility, facility),
            rooms: read_records_or(store, prefix, StateKey::Rooms, rooms),
            equipment: read_records_or(store, prefix, StateKey::Equipment, equipment),
            tariff: read_or(store, prefix, StateKey::TariffSettings, tariff),
            user: read_or(store, prefix, StateKey::User, user),
            training: TrainingProgress {
                completed: read_or::<Vec<ModuleId>>(
                    store,
                    prefix,
                    StateKey::TrainingProgress,
                    training.completed,
                ),
                perfect_score: read_or(store, prefix, StateKey::PerfectScore, training.perfect_score),
            },
        };
        debug!(
            equipment = state.equipment.len(),
            rooms = state.rooms.len(),
            "loaded audit state"
        );
        state
    }

    pub fn save(&self, store: &mut dyn StateStore, prefix: &str, key: StateKey) -> AuditResult<()> {
        let full_key = key.storage_key(prefix);
        match key {
            StateKey::User => match &self.user {
                Some(user) => store.set(&full_key, &serde_json::to_string(user)?),
                None => store.remove(&full_key),
            },
            _ => store.set(&full_key, &self.serialize_key(key)?),
        }
    }

    pub fn save_all(&self, store: &mut dyn StateStore, prefix: &str) -> AuditResult<()> {
        use strum::IntoEnumIterator;
        StateKey::iter().try_for_each(|key| self.save(&mut *store, prefix, key))
    }

    fn serialize_key(&self, key: StateKey) -> AuditResult<String> {
        let json = match key {
            StateKey::Facility => serde_json::to_string(&self.facility)?,
            StateKey::Rooms => serde_json::to_string(&self.rooms)?,
            StateKey::Equipment => serde_json::to_string(&self.equipment)?,
            StateKey::TariffSettings => serde_json::to_string(&self.tariff)?,
            StateKey::User => serde_json::to_string(&self.user)?,
            StateKey::TrainingProgress => serde_json::to_string(&self.training.completed)?,
            StateKey::PerfectScore => serde_json::to_string(&self.training.perfect_score)?,
        };
        Ok(json)
    }
}

fn read_or<T: DeserializeOwned>(store: &dyn StateStore, prefix: &str, key: StateKey, fallback: T) -> T {
    let full_key = key.storage_key(prefix);
    match store.get(&full_key) {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                warn!(key = %full_key, error = %e, "corrupt persisted value, using default");
                fallback
            }
        },
        Ok(None) => fallback,
        Err(e) => {
            warn!(key = %full_key, error = %e, "failed to read persisted value, using default");
            fallback
        }
    }
}

/// Like [`read_or`] for arrays, but skips the elements that fail to parse.
fn read_records_or<T: DeserializeOwned>(
    store: &dyn StateStore,
    prefix: &str,
    key: StateKey,
    fallback: Vec<T>,
) -> Vec<T> {
    let Some(raw) = read_or::<Option<Vec<serde_json::Value>>>(store, prefix, key, None) else {
        return fallback;
    };
    raw.into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value(value) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(key = %key, index, error = %e, "skipping unreadable record");
                None
            }
        })
        .collect()
}
