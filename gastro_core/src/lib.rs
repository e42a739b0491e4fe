#![forbid(unsafe_code)]

//! Core domain model and business logic for the GastroGuard system.
//!
//! This crate provides:
//! - Domain types (log entries, profile, risk and simulation results)
//! - Label catalog (symptoms, triggers, remedies, conditions)
//! - Historical food-risk scoring
//! - Symptom severity projection
//! - Persistence (entry journal, CSV archive, profile)
//! - Personalized recommendations

pub mod types;
pub mod error;
pub mod catalog;
pub mod config;
pub mod logging;
pub mod journal;
pub mod csv_rollup;
pub mod profile;
pub mod history;
pub mod risk;
pub mod projection;
pub mod recommend;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use catalog::{build_default_catalog, catalog_with_custom_triggers, LabelCatalog, LabelKind};
pub use config::Config;
pub use journal::{EntrySink, JsonlSink};
pub use history::load_recent_entries;
pub use risk::assess_food;
pub use projection::{project, project_with_step};
pub use recommend::{current_recommendations, pain_description};
