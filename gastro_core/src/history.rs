//! Entry history loading and dashboard aggregates.
//!
//! This module loads recent entry history from both the journal and the
//! CSV archive to provide context for assessment and summary flows.

use crate::{LogEntry, Result};
use chrono::{DateTime, Datelike, Duration, Utc};
use csv::ReaderBuilder;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use uuid::Uuid;

/// CSV row format for reading archived entries
#[derive(Debug, Deserialize)]
struct CsvRow {
    id: String,
    recorded_at: String,
    #[serde(default)]
    pain_level: u8,
    #[serde(default)]
    stress_level: u8,
    #[serde(default)]
    symptoms: String,
    #[serde(default)]
    triggers: String,
    #[serde(default)]
    remedies: String,
    #[serde(default)]
    notes: String,
    meal_size: Option<String>,
    time_since_eating: Option<f64>,
    sleep_quality: Option<u8>,
}

impl TryFrom<CsvRow> for LogEntry {
    type Error = crate::Error;

    fn try_from(row: CsvRow) -> Result<Self> {
        let id = Uuid::parse_str(&row.id)
            .map_err(|e| crate::Error::Other(format!("Invalid UUID: {}", e)))?;

        let recorded_at = DateTime::parse_from_rfc3339(&row.recorded_at)
            .map_err(|e| crate::Error::Other(format!("Invalid date: {}", e)))?
            .with_timezone(&Utc);

        let meal_size = row.meal_size.as_deref().and_then(crate::parse_meal_size);

        Ok(LogEntry {
            id,
            recorded_at,
            pain_level: row.pain_level,
            stress_level: row.stress_level,
            symptoms: split_labels(&row.symptoms),
            triggers: split_labels(&row.triggers),
            remedies: split_labels(&row.remedies),
            notes: row.notes,
            meal_size,
            time_since_eating: row.time_since_eating,
            sleep_quality: row.sleep_quality,
        })
    }
}

/// Split a "; "-joined label column back into a list
fn split_labels(joined: &str) -> Vec<String> {
    joined
        .split(';')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

/// Load entries from the last N days from both the journal and the CSV
///
/// Returns entries sorted by recorded_at (newest first).
/// Automatically deduplicates entries that appear in both journal and CSV.
pub fn load_recent_entries(
    journal_path: &Path,
    csv_path: &Path,
    days: i64,
) -> Result<Vec<LogEntry>> {
    let cutoff = Utc::now() - Duration::days(days);
    let mut entries = Vec::new();
    let mut seen_ids = HashSet::new();

    // Load from the journal first (most recent)
    if journal_path.exists() {
        let journal_entries = crate::journal::read_entries(journal_path)?;
        for entry in journal_entries {
            if entry.recorded_at >= cutoff {
                seen_ids.insert(entry.id);
                entries.push(entry);
            }
        }
        tracing::debug!("Loaded {} entries from journal", entries.len());
    }

    // Load from the CSV archive
    if csv_path.exists() {
        let csv_entries = load_entries_from_csv(csv_path)?;
        let mut csv_count = 0;
        for entry in csv_entries {
            if entry.recorded_at >= cutoff && !seen_ids.contains(&entry.id) {
                seen_ids.insert(entry.id);
                entries.push(entry);
                csv_count += 1;
            }
        }
        tracing::debug!("Loaded {} entries from CSV", csv_count);
    }

    // Sort by recorded_at, newest first
    entries.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));

    tracing::info!(
        "Loaded {} total entries from last {} days",
        entries.len(),
        days
    );

    Ok(entries)
}

/// Load all entries from a CSV file
fn load_entries_from_csv(path: &Path) -> Result<Vec<LogEntry>> {
    let mut reader = ReaderBuilder::new().has_headers(true).from_path(path)?;

    let mut entries = Vec::new();
    for result in reader.deserialize::<CsvRow>() {
        match result {
            Ok(row) => match LogEntry::try_from(row) {
                Ok(entry) => entries.push(entry),
                Err(e) => {
                    tracing::warn!("Failed to parse CSV row: {}", e);
                    // Continue processing other rows
                }
            },
            Err(e) => {
                tracing::warn!("Failed to deserialize CSV row: {}", e);
            }
        }
    }

    Ok(entries)
}

/// Aggregates for the "today" dashboard card
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DailySummary {
    pub entry_count: usize,
    /// Rounded average pain over today's entries, 0 when there are none
    pub avg_pain: u8,
    /// Rounded average stress over today's entries, 0 when there are none
    pub avg_stress: u8,
    pub remedies_used: usize,
}

/// Summarize the entries recorded on the same calendar day as `now`
///
/// Pain/stress levels are clamped into [0, 10] before averaging so a
/// corrupted entry cannot distort the aggregates.
pub fn summarize_day(entries: &[LogEntry], now: DateTime<Utc>) -> DailySummary {
    let today: Vec<&LogEntry> = entries
        .iter()
        .filter(|e| {
            e.recorded_at.year() == now.year() && e.recorded_at.ordinal() == now.ordinal()
        })
        .collect();

    if today.is_empty() {
        return DailySummary::default();
    }

    let count = today.len();
    let pain_sum: u32 = today.iter().map(|e| u32::from(e.pain_level.min(10))).sum();
    let stress_sum: u32 = today
        .iter()
        .map(|e| u32::from(e.stress_level.min(10)))
        .sum();

    DailySummary {
        entry_count: count,
        avg_pain: (pain_sum as f64 / count as f64).round() as u8,
        avg_stress: (stress_sum as f64 / count as f64).round() as u8,
        remedies_used: today.iter().map(|e| e.remedies.len()).sum(),
    }
}
