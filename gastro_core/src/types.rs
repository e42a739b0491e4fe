//! Core domain types for the GastroGuard system.
//!
//! This module defines the fundamental types used throughout the system:
//! - Log entries (pain, stress, symptoms, triggers, remedies)
//! - The user health profile
//! - Risk assessment inputs and results
//! - Severity simulation parameters and results

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Log Entry Types
// ============================================================================

/// Rough size of the meal associated with an entry or assessment
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MealSize {
    Small,
    Medium,
    Large,
}

impl std::fmt::Display for MealSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MealSize::Small => write!(f, "small"),
            MealSize::Medium => write!(f, "medium"),
            MealSize::Large => write!(f, "large"),
        }
    }
}

/// Time-of-day bucket for a meal
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TimeOfDay {
    Breakfast,
    Lunch,
    Dinner,
    LateNight,
}

/// A single logged symptom/meal observation
///
/// Pain and stress levels are 0-10 as recorded by the UI sliders, but
/// consumers must not rely on that and clamp defensively when aggregating.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: Uuid,
    pub recorded_at: DateTime<Utc>,
    #[serde(default)]
    pub pain_level: u8,
    #[serde(default)]
    pub stress_level: u8,
    #[serde(default)]
    pub symptoms: Vec<String>,
    #[serde(default)]
    pub triggers: Vec<String>,
    #[serde(default)]
    pub remedies: Vec<String>,
    /// Free-text description of what was eaten and any context
    #[serde(default)]
    pub notes: String,
    pub meal_size: Option<MealSize>,
    /// Hours between ingestion and this entry, when known
    pub time_since_eating: Option<f64>,
    pub sleep_quality: Option<u8>,
}

// ============================================================================
// User Profile
// ============================================================================

/// The user's persistent health profile
///
/// Read-only to the scoring and projection components; the CLI owns
/// loading and saving it.
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct UserProfile {
    #[serde(default)]
    pub name: String,
    /// Diagnosed condition tags (e.g. "GERD", "IBS")
    #[serde(default)]
    pub conditions: Vec<String>,
    /// Foods and situations the user knows set off symptoms
    #[serde(default)]
    pub triggers: Vec<String>,
    #[serde(default)]
    pub medications: Vec<String>,
    #[serde(default)]
    pub allergies: Vec<String>,
    #[serde(default)]
    pub effective_remedies: Vec<String>,
}

// ============================================================================
// Risk Assessment Types
// ============================================================================

/// Qualitative risk tier derived from the numeric score
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "Low Risk"),
            RiskLevel::Moderate => write!(f, "Moderate Risk"),
            RiskLevel::High => write!(f, "High Risk"),
        }
    }
}

/// Result of scoring a hypothetical food choice against history
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Heuristic 0-10 score, clamped
    pub risk_score: u8,
    pub risk_level: RiskLevel,
    /// Human-readable statements about what the history predicts
    pub predictions: Vec<String>,
    /// Human-readable suggested actions, ordered by tier
    pub recommendations: Vec<String>,
}

// ============================================================================
// Severity Simulation Types
// ============================================================================

/// Inputs to a severity projection, created per invocation
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct SimulationParameters {
    /// Starting severity, 0-10
    pub initial_severity: f64,
    /// Current stress level, 0-10
    pub stress_level: f64,
    /// Irritation level of recently eaten food, 0-10
    pub food_irritation: f64,
    /// Projection length in hours, must be positive
    pub horizon_hours: f64,
}

/// One retained sample of the projected severity curve
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct SeveritySample {
    pub time_hours: f64,
    pub severity: f64,
}

/// Result of integrating the severity model over the horizon
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Roughly hourly samples, starting at t = 0
    pub samples: Vec<SeveritySample>,
    /// Severity at the last retained sample
    pub final_severity: f64,
    /// Qualitative outcome summary
    pub message: String,
}

// ============================================================================
// Parse helpers
// ============================================================================

/// Parse a meal size string into the enum
pub fn parse_meal_size(s: &str) -> Option<MealSize> {
    match s.to_lowercase().as_str() {
        "small" => Some(MealSize::Small),
        "medium" => Some(MealSize::Medium),
        "large" => Some(MealSize::Large),
        _ => None,
    }
}

/// Parse a time-of-day string into the enum
pub fn parse_time_of_day(s: &str) -> Option<TimeOfDay> {
    match s.to_lowercase().as_str() {
        "breakfast" => Some(TimeOfDay::Breakfast),
        "lunch" => Some(TimeOfDay::Lunch),
        "dinner" => Some(TimeOfDay::Dinner),
        "late-night" | "late_night" | "latenight" => Some(TimeOfDay::LateNight),
        _ => None,
    }
}
