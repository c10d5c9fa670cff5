use chrono::Utc;
use tracing::{info, warn};
use validator::Validate;

use crate::calc::{
    AuditSummary, CalcPolicy, EnergyCalculator, EnergyMetrics, EnvironmentalImpact,
    EquipmentForm, RecommendationEngine, SavingsOpportunity,
};
use crate::config::Config;
use crate::domain::{EquipmentRecord, Facility, RecordId, Room, TariffConfig, UserSession};
use crate::error::{AuditError, AuditResult};
use crate::report::AuditReport;
use crate::store::{AuditState, FileStore, StateKey, StateStore};
use crate::training::{score_quiz, Achievement, ModuleId, ModuleLevel, QuizOutcome};

/// Owns the audit state and writes it back after every change.
///
/// Mutations apply in memory first. Persisting is best effort: a failed
/// write is logged and the in-memory change stands.
pub struct AuditSession {
    state: AuditState,
    store: Box<dyn StateStore>,
    key_prefix: String,
    policy: CalcPolicy,
    calculator: EnergyCalculator,
    recommender: RecommendationEngine,
    pass_mark: u8,
}

impl AuditSession {
    /// Load whatever `store` holds, falling back to configured defaults.
    pub fn open(cfg: &Config, store: Box<dyn StateStore>) -> Self {
        let fallback = AuditState {
            tariff: cfg.tariff,
            ..AuditState::default()
        };
        let state = AuditState::load(store.as_ref(), &cfg.storage.key_prefix, fallback);
        Self::with_state(cfg, store, state)
    }

    /// [`AuditSession::open`] over the configured storage directory.
    pub fn open_file(cfg: &Config) -> Self {
        Self::open(cfg, Box::new(FileStore::new(&cfg.storage.directory)))
    }

    pub fn with_state(cfg: &Config, store: Box<dyn StateStore>, state: AuditState) -> Self {
        let policy = cfg.policy;
        Self {
            state,
            store,
            key_prefix: cfg.storage.key_prefix.clone(),
            policy,
            calculator: EnergyCalculator::new(&policy),
            recommender: RecommendationEngine::new(policy),
            pass_mark: cfg.training.pass_mark,
        }
    }

    pub fn state(&self) -> &AuditState {
        &self.state
    }

    pub fn equipment(&self) -> &[EquipmentRecord] {
        &self.state.equipment
    }

    pub fn rooms(&self) -> &[Room] {
        &self.state.rooms
    }

    pub fn facility(&self) -> &Facility {
        &self.state.facility
    }

    pub fn tariff(&self) -> &TariffConfig {
        &self.state.tariff
    }

    pub fn user(&self) -> Option<&UserSession> {
        self.state.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.user.is_some()
    }

    // ---- equipment ----

    /// Store `record` with its numbers sanitized. Ids must be unique; use
    /// [`AuditSession::replace_equipment`] to edit an existing record.
    pub fn add_equipment(&mut self, record: EquipmentRecord) -> AuditResult<RecordId> {
        if self.state.equipment.iter().any(|e| e.id == record.id) {
            return Err(AuditError::Validation(format!("duplicate equipment id {}", record.id)));
        }
        let record = record.sanitized();
        let id = record.id.clone();
        info!(id = %id, name = %record.name, category = %record.category(), "equipment added");
        self.state.equipment.push(record);
        self.persist(StateKey::Equipment);
        Ok(id)
    }

    pub fn add_from_form(&mut self, form: &impl EquipmentForm, room: &str) -> AuditResult<RecordId> {
        let record = form.build(room)?;
        self.add_equipment(record)
    }

    /// Swap the record with the same id for `record`.
    pub fn replace_equipment(&mut self, record: EquipmentRecord) -> AuditResult<()> {
        let record = record.sanitized();
        let slot = self
            .state
            .equipment
            .iter_mut()
            .find(|e| e.id == record.id)
            .ok_or_else(|| AuditError::NotFound(format!("equipment {}", record.id)))?;
        *slot = record;
        info!(id = %slot.id, "equipment replaced");
        self.persist(StateKey::Equipment);
        Ok(())
    }

    pub fn remove_equipment(&mut self, id: &RecordId) -> Option<EquipmentRecord> {
        let pos = self.state.equipment.iter().position(|e| &e.id == id)?;
        let removed = self.state.equipment.remove(pos);
        info!(id = %id, "equipment removed");
        self.persist(StateKey::Equipment);
        Some(removed)
    }

    // ---- rooms, facility, tariff ----

    pub fn add_room(&mut self, name: &str, function: &str) -> AuditResult<RecordId> {
        let room = Room::new(name.trim(), function.trim());
        room.validate()?;
        let id = room.id.clone();
        info!(id = %id, name = %room.name, "room added");
        self.state.rooms.push(room);
        self.persist(StateKey::Rooms);
        Ok(id)
    }

    /// Equipment keeps its free-text room label after the room is removed.
    pub fn remove_room(&mut self, id: &RecordId) -> Option<Room> {
        let pos = self.state.rooms.iter().position(|r| &r.id == id)?;
        let removed = self.state.rooms.remove(pos);
        info!(id = %id, name = %removed.name, "room removed");
        self.persist(StateKey::Rooms);
        Some(removed)
    }

    pub fn set_facility(&mut self, facility: Facility) -> AuditResult<()> {
        facility.validate()?;
        info!(name = %facility.name, area = facility.area, "facility updated");
        self.state.facility = facility;
        self.persist(StateKey::Facility);
        Ok(())
    }

    pub fn set_tariff(&mut self, tariff: TariffConfig) -> AuditResult<()> {
        tariff.validate()?;
        info!(
            rate_per_kwh = tariff.rate_per_kwh,
            vat_enabled = tariff.vat_enabled,
            vat_percent = tariff.vat_percent,
            "tariff updated"
        );
        self.state.tariff = tariff;
        self.persist(StateKey::TariffSettings);
        Ok(())
    }

    // ---- session ----

    /// Demo login: no credentials are checked.
    pub fn login(&mut self, user: Option<UserSession>) -> &UserSession {
        let mut user = user.unwrap_or_default();
        user.logged_in_at = Some(Utc::now());
        info!(user = %user.name, role = %user.role, "logged in");
        self.state.user = Some(user);
        self.persist(StateKey::User);
        self.state.user.get_or_insert_with(UserSession::default)
    }

    pub fn logout(&mut self) {
        if let Some(user) = self.state.user.take() {
            info!(user = %user.name, "logged out");
        }
        self.persist(StateKey::User);
    }

    // ---- training ----

    pub fn record_quiz(
        &mut self,
        module: ModuleId,
        answers: &[Option<usize>],
        answer_key: &[usize],
    ) -> QuizOutcome {
        let score = score_quiz(answers, answer_key);
        let outcome = self.state.training.record_attempt(module, score, self.pass_mark);
        info!(module, score, passed = outcome.passed, "quiz submitted");
        if outcome.newly_completed {
            self.persist(StateKey::TrainingProgress);
        }
        if outcome.perfect {
            self.persist(StateKey::PerfectScore);
        }
        outcome
    }

    pub fn training_progress(&self, total_modules: usize) -> u8 {
        self.state.training.progress_percent(total_modules)
    }

    pub fn achievements(&self, modules: &[(ModuleId, ModuleLevel)]) -> Vec<Achievement> {
        self.state.training.achievements(modules)
    }

    // ---- derived figures ----

    pub fn metrics_for(&self, id: &RecordId) -> Option<EnergyMetrics> {
        self.state
            .equipment
            .iter()
            .find(|e| &e.id == id)
            .map(|e| self.calculator.compute(e, &self.state.tariff))
    }

    pub fn summary(&self) -> AuditSummary {
        AuditSummary::from_items(&self.state.equipment, &self.state.tariff, &self.calculator)
    }

    pub fn recommendations(&self) -> Vec<SavingsOpportunity> {
        self.recommender.opportunities_for(&self.summary(), &self.state.tariff)
    }

    pub fn environmental_impact(&self) -> EnvironmentalImpact {
        self.recommender.environmental_impact(self.summary().total_monthly_kwh)
    }

    pub fn report(&self) -> AuditReport {
        AuditReport::build(
            &self.state.facility,
            &self.state.equipment,
            &self.state.tariff,
            &self.policy,
        )
    }

    fn persist(&mut self, key: StateKey) {
        if let Err(e) = self.state.save(self.store.as_mut(), &self.key_prefix, key) {
            warn!(key = %key, error = %e, "failed to persist audit state");
        }
    }
}
