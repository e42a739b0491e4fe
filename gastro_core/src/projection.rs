//! Symptom severity projection.
//!
//! This module integrates a first-order decay/forcing model of symptom
//! severity with a fixed-step forward Euler scheme:
//!
//! ```text
//! dS/dt = -healing_rate * S + stress_term + food_term + circadian_term(t)
//! ```
//!
//! The model is illustrative, not clinically validated.

use crate::{Error, Result, SeveritySample, SimulationParameters, SimulationResult};
use std::f64::consts::PI;

/// Integration step in hours
pub const STEP_HOURS: f64 = 0.1;

/// Longest accepted horizon (one year); the model carries no meaning
/// beyond that and unbounded horizons would integrate for minutes
pub const MAX_HORIZON_HOURS: f64 = 8760.0;

/// Baseline severity decay per hour
const HEALING_RATE: f64 = 0.05;

/// Forcing contributed by a maxed-out stress level
const STRESS_WEIGHT: f64 = 0.03;

/// Forcing contributed by maximally irritating food
const FOOD_WEIGHT: f64 = 0.02;

/// Amplitude of the daily severity rhythm
const CIRCADIAN_AMPLITUDE: f64 = 0.01;

/// Project symptom severity over the requested horizon
///
/// Integrates from `S(0) = initial_severity` with step [`STEP_HOURS`],
/// clamping each step to [0, 10]. One sample per hour is retained
/// (the sampling stride is derived from the step, so the two stay
/// coupled), starting with t = 0; `final_severity` is the last
/// retained sample.
///
/// Severity, stress and irritation inputs are clamped to [0, 10].
/// A non-positive, non-finite, or longer-than-[`MAX_HORIZON_HOURS`]
/// horizon is rejected.
pub fn project(params: &SimulationParameters) -> Result<SimulationResult> {
    project_with_step(params, STEP_HOURS)
}

/// Project with an explicit integration step
///
/// The sampling stride is derived from the step so output stays roughly
/// hourly for any step; [`project`] uses [`STEP_HOURS`].
pub fn project_with_step(params: &SimulationParameters, dt: f64) -> Result<SimulationResult> {
    if !params.horizon_hours.is_finite() || params.horizon_hours <= 0.0 {
        return Err(Error::Simulation(format!(
            "horizon_hours must be positive, got {}",
            params.horizon_hours
        )));
    }
    if params.horizon_hours > MAX_HORIZON_HOURS {
        return Err(Error::Simulation(format!(
            "horizon_hours must be at most {}, got {}",
            MAX_HORIZON_HOURS, params.horizon_hours
        )));
    }
    if !dt.is_finite() || dt <= 0.0 {
        return Err(Error::Simulation(format!(
            "integration step must be positive, got {}",
            dt
        )));
    }

    // Keep output roughly hourly regardless of the step size
    let stride = (1.0 / dt).round().max(1.0) as usize;
    let steps = (params.horizon_hours / dt).floor() as usize;

    let stress = params.stress_level.clamp(0.0, 10.0);
    let irritation = params.food_irritation.clamp(0.0, 10.0);
    let stress_term = (stress / 10.0) * STRESS_WEIGHT;
    let food_term = (irritation / 10.0) * FOOD_WEIGHT;

    let mut severity = params.initial_severity.clamp(0.0, 10.0);
    let mut samples = vec![SeveritySample {
        time_hours: 0.0,
        severity,
    }];

    for step in 0..steps {
        let t = step as f64 * dt;
        let circadian = CIRCADIAN_AMPLITUDE * (2.0 * PI * t / 24.0).sin();
        let rate = -HEALING_RATE * severity + stress_term + food_term + circadian;

        severity = (severity + rate * dt).clamp(0.0, 10.0);

        if (step + 1) % stride == 0 {
            samples.push(SeveritySample {
                time_hours: (step + 1) as f64 * dt,
                severity,
            });
        }
    }

    let final_severity = samples
        .last()
        .map(|s| s.severity)
        .unwrap_or(severity);

    tracing::debug!(
        "Projected {:.1}h: severity {:.2} -> {:.2} over {} samples",
        params.horizon_hours,
        params.initial_severity,
        final_severity,
        samples.len()
    );

    Ok(SimulationResult {
        samples,
        final_severity,
        message: outcome_message(final_severity).to_string(),
    })
}

/// Qualitative outcome band for a final severity.
///
/// Boundaries belong to the band above: exactly 2.0 reads as the
/// good-trajectory message, exactly 6.0 as the consult message.
fn outcome_message(final_severity: f64) -> &'static str {
    if final_severity < 2.0 {
        "Your symptoms are projected to subside almost completely. Keep up your current routine."
    } else if final_severity < 4.0 {
        "Your symptoms are on a good trajectory and should ease noticeably."
    } else if final_severity < 6.0 {
        "Moderate improvement projected. Reducing stress and irritating foods would help."
    } else {
        "Symptoms are projected to remain elevated. Consider consulting a healthcare provider."
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(
        initial_severity: f64,
        stress_level: f64,
        food_irritation: f64,
        horizon_hours: f64,
    ) -> SimulationParameters {
        SimulationParameters {
            initial_severity,
            stress_level,
            food_irritation,
            horizon_hours,
        }
    }

    #[test]
    fn test_sample_count_for_24h_horizon() {
        // floor(24 / 0.1 / 10) + 1 = 25: one sample per hour plus t = 0.
        let result = project(&params(5.0, 5.0, 5.0, 24.0)).unwrap();
        assert_eq!(result.samples.len(), 25);
        assert_eq!(result.samples[0].time_hours, 0.0);
        assert!((result.samples[24].time_hours - 24.0).abs() < 1e-9);
    }

    #[test]
    fn test_final_severity_is_last_sample() {
        let result = project(&params(5.0, 5.0, 5.0, 24.0)).unwrap();
        let last = result.samples.last().unwrap();
        assert_eq!(result.final_severity, last.severity);
    }

    #[test]
    fn test_monotone_decay_with_zero_forcing() {
        // With no stress/food forcing only the small circadian term
        // remains, so a long horizon decays close to (but not exactly)
        // zero and well below the starting severity.
        let result = project(&params(5.0, 0.0, 0.0, 100.0)).unwrap();

        assert!(result.final_severity < 5.0);
        assert!(result.final_severity < 2.0);
        assert!(result.final_severity >= 0.0);
        assert!(result.message.contains("subside almost completely"));
    }

    #[test]
    fn test_severity_stays_in_bounds() {
        let high = project(&params(10.0, 10.0, 10.0, 48.0)).unwrap();
        for sample in &high.samples {
            assert!(sample.severity >= 0.0 && sample.severity <= 10.0);
        }

        let low = project(&params(0.0, 0.0, 0.0, 48.0)).unwrap();
        for sample in &low.samples {
            assert!(sample.severity >= 0.0 && sample.severity <= 10.0);
        }
    }

    #[test]
    fn test_out_of_range_inputs_clamped() {
        let result = project(&params(42.0, -3.0, 99.0, 1.0)).unwrap();
        assert_eq!(result.samples[0].severity, 10.0);
    }

    #[test]
    fn test_rejects_non_positive_horizon() {
        assert!(matches!(
            project(&params(5.0, 5.0, 5.0, 0.0)),
            Err(Error::Simulation(_))
        ));
        assert!(matches!(
            project(&params(5.0, 5.0, 5.0, -4.0)),
            Err(Error::Simulation(_))
        ));
        assert!(matches!(
            project(&params(5.0, 5.0, 5.0, f64::NAN)),
            Err(Error::Simulation(_))
        ));
    }

    #[test]
    fn test_rejects_absurd_horizon() {
        assert!(matches!(
            project(&params(5.0, 5.0, 5.0, 1e12)),
            Err(Error::Simulation(_))
        ));
        // the cap itself is still accepted
        assert!(project(&params(5.0, 5.0, 5.0, MAX_HORIZON_HOURS)).is_ok());
    }

    #[test]
    fn test_outcome_message_banding() {
        // Boundary values sit in the band above their threshold.
        assert!(outcome_message(1.999).contains("subside almost completely"));
        assert!(outcome_message(2.0).contains("good trajectory"));
        assert!(outcome_message(3.999).contains("good trajectory"));
        assert!(outcome_message(4.0).contains("Moderate improvement"));
        assert!(outcome_message(5.999).contains("Moderate improvement"));
        assert!(outcome_message(6.0).contains("consulting a healthcare provider"));
    }

    #[test]
    fn test_stride_follows_step_size() {
        // Halving the step doubles the stride; output stays hourly.
        let result = project_with_step(&params(5.0, 5.0, 5.0, 10.0), 0.05).unwrap();
        assert_eq!(result.samples.len(), 11);
        assert!((result.samples[1].time_hours - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_forcing_raises_equilibrium() {
        let calm = project(&params(5.0, 0.0, 0.0, 72.0)).unwrap();
        let stressed = project(&params(5.0, 10.0, 10.0, 72.0)).unwrap();
        assert!(stressed.final_severity > calm.final_severity);
    }
}
