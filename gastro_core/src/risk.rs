//! Historical food-risk scoring.
//!
//! This module implements the "what if I eat X" assessment:
//! - Match the food query against past entry notes and triggers
//! - Score from historical pain/stress averages (or a neutral baseline)
//! - Adjust for meal size and time of day
//! - Produce tiered recommendations plus condition-specific lines

use crate::{LogEntry, MealSize, RiskAssessment, RiskLevel, TimeOfDay, UserProfile};

/// Neutral baseline used when no historical entries match the query
const BASELINE_SCORE: i32 = 5;

/// Assess the risk of a hypothetical food choice against history
///
/// ## Scoring rules
///
/// 1. **Historical branch**: entries whose notes mention the query, or
///    whose trigger list is named by the query, drive the baseline
///    (`round((avg_pain + avg_stress) / 2)`).
/// 2. **No-data branch**: baseline 5, plus 3 if the query names any of
///    the profile's known triggers.
/// 3. **Adjustments**: large meal +1, small meal -1; late-night +2,
///    breakfast -1.
/// 4. Final score is clamped to [0, 10]; the tier is >=7 High,
///    >=4 Moderate, else Low.
///
/// The query must be a non-empty trimmed string; callers validate
/// before invoking. History and profile are read-only snapshots.
pub fn assess_food(
    food_query: &str,
    meal_size: MealSize,
    time_of_day: TimeOfDay,
    history: &[LogEntry],
    profile: &UserProfile,
) -> RiskAssessment {
    let query_lower = food_query.to_lowercase();

    let relevant: Vec<&LogEntry> = history
        .iter()
        .filter(|entry| entry_matches_query(entry, &query_lower))
        .collect();

    let mut predictions = Vec::new();
    let mut score: i32;

    if !relevant.is_empty() {
        let avg_pain = average(relevant.iter().map(|e| clamped_level(e.pain_level)));
        let avg_stress = average(relevant.iter().map(|e| clamped_level(e.stress_level)));
        score = ((avg_pain + avg_stress) / 2.0).round() as i32;

        tracing::debug!(
            "Query '{}' matched {} entries (avg pain {:.1}, avg stress {:.1})",
            food_query,
            relevant.len(),
            avg_pain,
            avg_stress
        );

        predictions.push(format!("Based on {} similar past entries", relevant.len()));
        predictions.push(format!("Average pain level: {:.1}/10", avg_pain));
        predictions.push(format!("Average stress level: {:.1}/10", avg_stress));

        let likely = top_symptoms(&relevant, 3);
        if !likely.is_empty() {
            predictions.push(format!("Likely symptoms: {}", likely.join(", ")));
        }
    } else {
        score = BASELINE_SCORE;
        predictions.push("No historical data for this food".to_string());
        predictions.push("Prediction based on general heuristics only".to_string());

        let matched: Vec<&str> = profile
            .triggers
            .iter()
            .filter(|t| query_names_trigger(&query_lower, t))
            .map(|t| t.as_str())
            .collect();

        if !matched.is_empty() {
            tracing::debug!("Query '{}' names known triggers: {:?}", food_query, matched);
            score += 3;
            predictions.push(format!("Contains known triggers: {}", matched.join(", ")));
        }
    }

    match meal_size {
        MealSize::Large => {
            score += 1;
            predictions.push("Large meal size increases risk".to_string());
        }
        MealSize::Small => {
            score -= 1;
            predictions.push("Small meal size reduces risk".to_string());
        }
        MealSize::Medium => {}
    }

    match time_of_day {
        TimeOfDay::LateNight => {
            score += 2;
            predictions.push("Late-night eating significantly increases risk".to_string());
        }
        TimeOfDay::Breakfast => {
            score -= 1;
            predictions.push("Breakfast timing slightly reduces risk".to_string());
        }
        TimeOfDay::Lunch | TimeOfDay::Dinner => {}
    }

    let score = score.clamp(0, 10) as u8;
    let risk_level = risk_level_for(score);
    let recommendations = build_recommendations(score, profile);

    tracing::info!(
        "Assessed '{}': score {}/10 ({})",
        food_query,
        score,
        risk_level
    );

    RiskAssessment {
        risk_score: score,
        risk_level,
        predictions,
        recommendations,
    }
}

/// True when the entry's free-text notes mention the query, or the
/// query names one of the entry's recorded triggers
fn entry_matches_query(entry: &LogEntry, query_lower: &str) -> bool {
    notes_mention_query(&entry.notes, query_lower)
        || entry
            .triggers
            .iter()
            .any(|t| query_names_trigger(query_lower, t))
}

/// Case-insensitive substring match of the query inside the notes
fn notes_mention_query(notes: &str, query_lower: &str) -> bool {
    notes.to_lowercase().contains(query_lower)
}

/// Case-insensitive containment of a trigger label inside the query.
/// Direction matters: "dairy ice cream" names the trigger "Dairy",
/// but "ice cream" does not.
fn query_names_trigger(query_lower: &str, trigger: &str) -> bool {
    let trigger = trigger.trim().to_lowercase();
    !trigger.is_empty() && query_lower.contains(&trigger)
}

/// Clamp a recorded level into [0, 10] before aggregating; one out-of-range
/// entry must not distort the whole average
fn clamped_level(level: u8) -> f64 {
    f64::from(level.min(10))
}

fn average(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

/// Most frequent symptom labels across the relevant entries.
///
/// Stable descending sort by count; ties keep first-encountered order.
fn top_symptoms(entries: &[&LogEntry], limit: usize) -> Vec<String> {
    let mut counts: Vec<(String, usize)> = Vec::new();

    for entry in entries {
        for symptom in &entry.symptoms {
            match counts.iter_mut().find(|(s, _)| s == symptom) {
                Some((_, count)) => *count += 1,
                None => counts.push((symptom.clone(), 1)),
            }
        }
    }

    counts.sort_by_key(|(_, count)| std::cmp::Reverse(*count));
    counts
        .into_iter()
        .take(limit)
        .map(|(symptom, _)| symptom)
        .collect()
}

/// Tier thresholds shared by recommendations and the reported level
fn risk_level_for(score: u8) -> RiskLevel {
    if score >= 7 {
        RiskLevel::High
    } else if score >= 4 {
        RiskLevel::Moderate
    } else {
        RiskLevel::Low
    }
}

fn build_recommendations(score: u8, profile: &UserProfile) -> Vec<String> {
    let mut recommendations: Vec<String> = match risk_level_for(score) {
        RiskLevel::High => vec![
            "Avoid this food if possible".into(),
            "Have antacids or your prescribed medication ready".into(),
            "Reduce the portion size significantly".into(),
            "Avoid lying down for 3 hours after eating".into(),
        ],
        RiskLevel::Moderate => vec![
            "Eat slowly and chew thoroughly".into(),
            "Keep the portion moderate".into(),
            "Stay upright after eating".into(),
            "Have a remedy available just in case".into(),
        ],
        RiskLevel::Low => vec![
            "This food appears relatively safe for you".into(),
            "A normal portion should be fine".into(),
            "Log how you feel afterwards to refine future predictions".into(),
        ],
    };

    for condition in &profile.conditions {
        if condition.eq_ignore_ascii_case("gerd") {
            recommendations.push("GERD: avoid lying down for 2-3 hours after eating".into());
        } else if condition.eq_ignore_ascii_case("ibs") {
            recommendations.push("IBS: consider how this fits a low-FODMAP diet".into());
        }
    }

    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn entry(notes: &str, pain: u8, stress: u8) -> LogEntry {
        LogEntry {
            id: Uuid::new_v4(),
            recorded_at: Utc::now(),
            pain_level: pain,
            stress_level: stress,
            symptoms: vec![],
            triggers: vec![],
            remedies: vec![],
            notes: notes.into(),
            meal_size: None,
            time_since_eating: None,
            sleep_quality: None,
        }
    }

    fn assess(
        query: &str,
        meal_size: MealSize,
        time_of_day: TimeOfDay,
        history: &[LogEntry],
        profile: &UserProfile,
    ) -> RiskAssessment {
        assess_food(query, meal_size, time_of_day, history, profile)
    }

    #[test]
    fn test_empty_history_baseline() {
        let result = assess(
            "anything new",
            MealSize::Medium,
            TimeOfDay::Lunch,
            &[],
            &UserProfile::default(),
        );

        assert_eq!(result.risk_score, 5);
        assert_eq!(result.risk_level, RiskLevel::Moderate);
        assert!(result
            .predictions
            .iter()
            .any(|p| p == "No historical data for this food"));
        assert!(result
            .predictions
            .iter()
            .any(|p| p == "Prediction based on general heuristics only"));
        assert!(!result
            .predictions
            .iter()
            .any(|p| p.starts_with("Contains known triggers")));
    }

    #[test]
    fn test_trigger_match_raises_risk() {
        let profile = UserProfile {
            triggers: vec!["spicy".into()],
            ..Default::default()
        };

        let with_trigger = assess(
            "spicy curry",
            MealSize::Medium,
            TimeOfDay::Lunch,
            &[],
            &profile,
        );
        let without = assess(
            "spicy curry",
            MealSize::Medium,
            TimeOfDay::Lunch,
            &[],
            &UserProfile::default(),
        );

        assert!(with_trigger.risk_score > without.risk_score);
        assert_eq!(with_trigger.risk_score, 8);
        assert!(with_trigger
            .predictions
            .iter()
            .any(|p| p.contains("spicy")));
    }

    #[test]
    fn test_historical_averaging() {
        // Pain {4, 8} and stress {2, 6} average to 6.0 and 4.0,
        // so the pre-adjustment score is round(5.0) = 5.
        let history = vec![entry("pizza night", 4, 2), entry("more pizza", 8, 6)];

        let result = assess(
            "pizza",
            MealSize::Medium,
            TimeOfDay::Lunch,
            &history,
            &UserProfile::default(),
        );

        assert_eq!(result.risk_score, 5);
        assert!(result
            .predictions
            .iter()
            .any(|p| p == "Based on 2 similar past entries"));
        assert!(result
            .predictions
            .iter()
            .any(|p| p == "Average pain level: 6.0/10"));
        assert!(result
            .predictions
            .iter()
            .any(|p| p == "Average stress level: 4.0/10"));
    }

    #[test]
    fn test_meal_size_monotonicity() {
        let history = vec![entry("coffee and toast", 5, 5)];
        let profile = UserProfile::default();

        let small = assess("coffee", MealSize::Small, TimeOfDay::Lunch, &history, &profile);
        let medium = assess("coffee", MealSize::Medium, TimeOfDay::Lunch, &history, &profile);
        let large = assess("coffee", MealSize::Large, TimeOfDay::Lunch, &history, &profile);

        assert!(large.risk_score >= medium.risk_score);
        assert!(small.risk_score <= medium.risk_score);
        assert_eq!(medium.risk_score, 5);
        assert_eq!(large.risk_score, 6);
        assert_eq!(small.risk_score, 4);
    }

    #[test]
    fn test_time_of_day_adjustments() {
        let history = vec![entry("ramen", 5, 5)];
        let profile = UserProfile::default();

        let late = assess("ramen", MealSize::Medium, TimeOfDay::LateNight, &history, &profile);
        let breakfast =
            assess("ramen", MealSize::Medium, TimeOfDay::Breakfast, &history, &profile);
        let dinner = assess("ramen", MealSize::Medium, TimeOfDay::Dinner, &history, &profile);

        assert_eq!(late.risk_score, 7);
        assert_eq!(breakfast.risk_score, 4);
        assert_eq!(dinner.risk_score, 5);
        assert!(late
            .predictions
            .iter()
            .any(|p| p.contains("Late-night")));
    }

    #[test]
    fn test_score_clamped_to_bounds() {
        let severe = vec![entry("ghost pepper wings", 10, 10)];
        let high = assess(
            "ghost pepper wings",
            MealSize::Large,
            TimeOfDay::LateNight,
            &severe,
            &UserProfile::default(),
        );
        assert_eq!(high.risk_score, 10);
        assert_eq!(high.risk_level, RiskLevel::High);

        let calm = vec![entry("plain rice", 0, 0)];
        let low = assess(
            "plain rice",
            MealSize::Small,
            TimeOfDay::Breakfast,
            &calm,
            &UserProfile::default(),
        );
        assert_eq!(low.risk_score, 0);
        assert_eq!(low.risk_level, RiskLevel::Low);
    }

    #[test]
    fn test_level_consistent_with_score() {
        for score in 0u8..=10 {
            let level = risk_level_for(score);
            match score {
                0..=3 => assert_eq!(level, RiskLevel::Low),
                4..=6 => assert_eq!(level, RiskLevel::Moderate),
                _ => assert_eq!(level, RiskLevel::High),
            }
        }
    }

    #[test]
    fn test_notes_match_is_case_insensitive_substring() {
        let history = vec![entry("Had a SPICY curry last night", 6, 4)];

        let result = assess(
            "curry",
            MealSize::Medium,
            TimeOfDay::Lunch,
            &history,
            &UserProfile::default(),
        );

        assert!(result
            .predictions
            .iter()
            .any(|p| p == "Based on 1 similar past entries"));
    }

    #[test]
    fn test_trigger_match_direction() {
        // The query must contain the entry's trigger, not the reverse.
        let mut dairy_entry = entry("felt rough afterwards", 7, 3);
        dairy_entry.triggers = vec!["Dairy".into()];
        let history = vec![dairy_entry];
        let profile = UserProfile::default();

        let named = assess(
            "dairy ice cream",
            MealSize::Medium,
            TimeOfDay::Lunch,
            &history,
            &profile,
        );
        assert!(named
            .predictions
            .iter()
            .any(|p| p.starts_with("Based on 1")));

        let unnamed = assess(
            "ice cream",
            MealSize::Medium,
            TimeOfDay::Lunch,
            &history,
            &profile,
        );
        assert!(unnamed
            .predictions
            .iter()
            .any(|p| p == "No historical data for this food"));
    }

    #[test]
    fn test_likely_symptoms_top_three_stable() {
        let mut a = entry("curry", 5, 5);
        a.symptoms = vec!["Heartburn".into(), "Nausea".into(), "Bloating".into()];
        let mut b = entry("curry again", 5, 5);
        b.symptoms = vec!["Heartburn".into(), "Gas".into()];
        let history = vec![a, b];

        let result = assess(
            "curry",
            MealSize::Medium,
            TimeOfDay::Lunch,
            &history,
            &UserProfile::default(),
        );

        // Heartburn counts 2; Nausea/Bloating/Gas all count 1 and tie-break
        // by first occurrence, so Gas falls off the top three.
        let likely = result
            .predictions
            .iter()
            .find(|p| p.starts_with("Likely symptoms"))
            .expect("expected a likely-symptoms prediction");
        assert_eq!(likely, "Likely symptoms: Heartburn, Nausea, Bloating");
    }

    #[test]
    fn test_out_of_range_levels_clamped_in_average() {
        let hot = entry("volcano wings", 250, 250); // corrupted entry
        let result = assess(
            "volcano wings",
            MealSize::Medium,
            TimeOfDay::Lunch,
            &[hot],
            &UserProfile::default(),
        );

        assert_eq!(result.risk_score, 10);
        assert!(result
            .predictions
            .iter()
            .any(|p| p == "Average pain level: 10.0/10"));
    }

    #[test]
    fn test_condition_specific_recommendations() {
        let profile = UserProfile {
            conditions: vec!["GERD".into(), "IBS".into(), "Gastritis".into()],
            ..Default::default()
        };

        let result = assess(
            "anything",
            MealSize::Medium,
            TimeOfDay::Lunch,
            &[],
            &profile,
        );

        assert!(result
            .recommendations
            .iter()
            .any(|r| r.starts_with("GERD:")));
        assert!(result
            .recommendations
            .iter()
            .any(|r| r.starts_with("IBS:")));
    }

    #[test]
    fn test_recommendation_set_sizes_by_tier() {
        let profile = UserProfile::default();

        let low = assess(
            "plain rice",
            MealSize::Small,
            TimeOfDay::Breakfast,
            &[entry("plain rice", 0, 0)],
            &profile,
        );
        assert_eq!(low.recommendations.len(), 3);

        let moderate = assess("mystery", MealSize::Medium, TimeOfDay::Lunch, &[], &profile);
        assert_eq!(moderate.recommendations.len(), 4);

        let high = assess(
            "ghost pepper",
            MealSize::Large,
            TimeOfDay::LateNight,
            &[entry("ghost pepper", 9, 9)],
            &profile,
        );
        assert_eq!(high.recommendations.len(), 4);
        assert!(high.recommendations[0].contains("Avoid this food"));
    }
}
