//! The blended risk model.
//!
//! Four sub-scores are combined through fixed weights (satellite 0.25,
//! weather 0.35, terrain 0.25, historical 0.15), scaled by the
//! sensitivity preference, and clamped to [0, 100]. Missing factors
//! contribute zero; the weights are not renormalized.

use chrono::{Duration, Utc};

use floodwatch_core::Sensitivity;
use floodwatch_weather::Forecast;

use crate::advice;
use crate::types::{FactorScore, RiskAssessment, RiskLevel, TimelinePoint};

/// Model confidence reported with every assessment.
const CONFIDENCE: f64 = 0.85;

/// Days of flat timeline when no forecast is available.
const FALLBACK_TIMELINE_DAYS: i64 = 3;

/// Blend factor scores into a single [0, 100] risk score.
pub fn blend(factors: &[FactorScore], sensitivity: Sensitivity) -> f64 {
    let weighted: f64 = factors.iter().map(|f| f.score * f.kind.weight()).sum();
    (weighted * sensitivity.multiplier()).clamp(0.0, 100.0)
}

/// Daily risk forecast: the base score pushed up on rainy days.
pub fn risk_timeline(forecast: Option<&Forecast>, base_score: f64) -> Vec<TimelinePoint> {
    match forecast {
        Some(forecast) if !forecast.days.is_empty() => forecast
            .days
            .iter()
            .map(|day| {
                let mut daily = base_score;
                if day.rainfall_mm > 30.0 {
                    daily += 15.0;
                } else if day.rainfall_mm > 15.0 {
                    daily += 8.0;
                }
                TimelinePoint {
                    date: day.date,
                    risk_score: daily.min(100.0),
                }
            })
            .collect(),
        _ => {
            let today = Utc::now().date_naive();
            (0..FALLBACK_TIMELINE_DAYS)
                .map(|i| TimelinePoint {
                    date: today + Duration::days(i),
                    risk_score: base_score,
                })
                .collect()
        }
    }
}

/// Build the full assessment: blended score, level, timeline, and
/// recommendations.
pub fn build_assessment(
    factors: Vec<FactorScore>,
    sensitivity: Sensitivity,
    forecast: Option<&Forecast>,
) -> RiskAssessment {
    let score = blend(&factors, sensitivity);
    let level = RiskLevel::from_score(score);
    let timeline = risk_timeline(forecast, score);
    let recommendations = advice::recommendations(level, &factors);

    tracing::info!(
        "Risk assessment: {:.1} ({}) from {} factors",
        score,
        level.label(),
        factors.len()
    );

    RiskAssessment {
        score: (score * 10.0).round() / 10.0,
        level,
        factors,
        timeline,
        recommendations,
        confidence: CONFIDENCE,
        generated_at: Utc::now(),
    }
}
