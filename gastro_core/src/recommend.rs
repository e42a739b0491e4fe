//! Personalized recommendations from current symptom levels.
//!
//! Unlike the food assessment in [`crate::risk`], which scores a
//! hypothetical meal against history, this module reacts to how the
//! user feels right now plus their profile.

use crate::UserProfile;

/// Recommendations for the user's current pain/stress levels
///
/// Thresholds:
/// - pain >= 7: acute relief suggestions
/// - pain >= 4: gentle food and tea suggestions
/// - stress >= 6: stress reduction suggestions
///
/// Condition-specific lines are added for GERD and IBS, and a reminder
/// when allergies are on file. An incomplete profile produces a single
/// prompt to fill it in; an unremarkable state falls back to general
/// upkeep advice.
pub fn current_recommendations(
    pain_level: u8,
    stress_level: u8,
    profile: &UserProfile,
) -> Vec<String> {
    if profile.name.trim().is_empty() {
        return vec![
            "Please complete your profile first to get personalized recommendations".to_string(),
        ];
    }

    let mut recommendations = Vec::new();

    if pain_level >= 7 {
        recommendations.push("Consider taking your prescribed PPI or antacid".to_string());
        recommendations.push("Try gentle breathing exercises to manage severe pain".to_string());
        recommendations.push("Avoid solid foods until the pain subsides".to_string());
    } else if pain_level >= 4 {
        recommendations.push("Consider a light, bland meal if you haven't eaten".to_string());
        recommendations.push("Try chamomile or ginger tea for relief".to_string());
    }

    if stress_level >= 6 {
        recommendations.push("Practice stress reduction techniques like meditation".to_string());
        recommendations.push("Consider a short walk or gentle exercise".to_string());
    }

    for condition in &profile.conditions {
        if condition.eq_ignore_ascii_case("gerd") {
            recommendations.push("Avoid lying down for 2-3 hours after eating".to_string());
            recommendations.push("Keep your head elevated while sleeping".to_string());
        } else if condition.eq_ignore_ascii_case("ibs") {
            recommendations.push("Consider following a low-FODMAP diet".to_string());
            recommendations.push("Track fiber intake and adjust accordingly".to_string());
        }
    }

    if !profile.allergies.is_empty() {
        recommendations.push(format!(
            "Remember your allergies: {}",
            profile.allergies.join(", ")
        ));
    }

    if recommendations.is_empty() {
        recommendations = vec![
            "Stay hydrated throughout the day".to_string(),
            "Eat smaller, more frequent meals".to_string(),
            "Keep a consistent sleep schedule".to_string(),
        ];
    }

    recommendations
}

/// Short description of a 0-10 pain level, as shown next to the slider
pub fn pain_description(level: u8) -> &'static str {
    match level {
        0 => "No pain",
        1 => "Very mild discomfort",
        2 => "Mild pain, barely noticeable",
        3 => "Moderate pain, noticeable but manageable",
        4 => "Moderate pain, interferes with some activities",
        5 => "Moderately severe pain, interferes with most activities",
        6 => "Severe pain, difficult to ignore",
        7 => "Very severe pain, dominates your senses",
        8 => "Intense pain, unable to do most activities",
        9 => "Excruciating pain, unable to function",
        10 => "Unbearable pain, seek immediate medical attention",
        _ => "Unknown",
    }
}
