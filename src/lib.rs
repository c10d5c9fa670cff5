//! Energy audit engine.
//!
//! Turns a logged equipment inventory and a tariff into monthly consumption,
//! cost, grouped totals and savings estimates. Calculation lives in [`calc`]
//! and is pure; [`session`] and [`store`] carry the persisted audit state.

pub mod calc;
pub mod compliance;
pub mod config;
pub mod domain;
pub mod error;
pub mod report;
pub mod session;
pub mod store;
pub mod telemetry;
pub mod training;

pub use calc::{AuditSummary, CalcPolicy, EnergyCalculator, EnergyMetrics};
pub use domain::{Category, EquipmentRecord, Facility, RecordId, Room, TariffConfig};
pub use error::{AuditError, AuditResult};
pub use report::AuditReport;
pub use session::AuditSession;
