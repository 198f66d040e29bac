use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use floodwatch_elevation::{ElevationProfile, TerrainRisk};
use floodwatch_location::Location;
use floodwatch_satellite::WaterAnalysis;
use floodwatch_weather::{Forecast, RainfallHistory, StormAlert};

/// Three-level risk classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    High,
    Medium,
    Low,
}

impl RiskLevel {
    /// Classify a blended score. HIGH at 70 and above, MEDIUM at 40 and
    /// above, LOW otherwise.
    pub fn from_score(score: f64) -> Self {
        if score >= 70.0 {
            RiskLevel::High
        } else if score >= 40.0 {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::High => "HIGH",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::Low => "LOW",
        }
    }
}

/// The four blended risk factors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactorKind {
    Satellite,
    Weather,
    Terrain,
    Historical,
}

impl FactorKind {
    /// Fixed blend weight. The four weights sum to 1.0.
    pub fn weight(&self) -> f64 {
        match self {
            FactorKind::Satellite => 0.25,
            FactorKind::Weather => 0.35,
            FactorKind::Terrain => 0.25,
            FactorKind::Historical => 0.15,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FactorKind::Satellite => "Satellite Analysis",
            FactorKind::Weather => "Weather Forecast",
            FactorKind::Terrain => "Terrain Analysis",
            FactorKind::Historical => "Historical Data",
        }
    }
}

/// A scored risk factor.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FactorScore {
    pub kind: FactorKind,
    /// Sub-score in [0, 100]
    pub score: f64,
}

/// One day of the risk forecast timeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelinePoint {
    pub date: NaiveDate,
    pub risk_score: f64,
}

/// The blended risk result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Blended score in [0, 100], rounded to one decimal
    pub score: f64,
    pub level: RiskLevel,
    pub factors: Vec<FactorScore>,
    pub timeline: Vec<TimelinePoint>,
    pub recommendations: Vec<String>,
    /// Model confidence (0-1)
    pub confidence: f64,
    pub generated_at: DateTime<Utc>,
}

/// Where a source's data came from for one assessment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Provenance {
    /// Fetched from the live API
    Live,
    /// Synthesized locally; `reason` says why
    Mock { reason: String },
    /// Source switched off for this assessment
    Disabled,
}

impl Provenance {
    pub fn is_mock(&self) -> bool {
        matches!(self, Provenance::Mock { .. })
    }

    pub fn describe(&self) -> String {
        match self {
            Provenance::Live => "live".to_string(),
            Provenance::Mock { reason } => format!("mock ({reason})"),
            Provenance::Disabled => "disabled".to_string(),
        }
    }
}

/// Per-source provenance for one assessment. Fallbacks are recorded
/// here rather than hidden.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceStatus {
    pub satellite: Provenance,
    pub weather: Provenance,
    pub elevation: Provenance,
    pub historical: Provenance,
}

/// Everything one assessment produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentReport {
    pub location: Location,
    pub assessment: RiskAssessment,
    pub water: Option<WaterAnalysis>,
    pub forecast: Option<Forecast>,
    pub rainfall_history: Option<RainfallHistory>,
    pub elevation: Option<ElevationProfile>,
    pub terrain: Option<TerrainRisk>,
    pub storm_alert: Option<StormAlert>,
    pub sources: SourceStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_thresholds() {
        assert_eq!(RiskLevel::from_score(100.0), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(70.0), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(69.9), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(40.0), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(39.9), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(0.0), RiskLevel::Low);
    }

    #[test]
    fn test_weights_sum_to_one() {
        let total: f64 = [
            FactorKind::Satellite,
            FactorKind::Weather,
            FactorKind::Terrain,
            FactorKind::Historical,
        ]
        .iter()
        .map(|k| k.weight())
        .sum();
        assert!((total - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_provenance_describe() {
        assert_eq!(Provenance::Live.describe(), "live");
        assert!(Provenance::Mock {
            reason: "timeout".into()
        }
        .describe()
        .contains("timeout"));
        assert!(Provenance::Mock {
            reason: "x".into()
        }
        .is_mock());
        assert!(!Provenance::Disabled.is_mock());
    }
}
