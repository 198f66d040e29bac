//! Actionable recommendations keyed off the risk level and the factor
//! breakdown.

use crate::types::{FactorKind, FactorScore, RiskLevel};

/// Sub-score above which a factor earns its own recommendation.
const FACTOR_CALLOUT_THRESHOLD: f64 = 50.0;

/// Build the recommendation list for an assessment.
pub fn recommendations(level: RiskLevel, factors: &[FactorScore]) -> Vec<String> {
    let mut recommendations: Vec<String> = match level {
        RiskLevel::High => vec![
            "IMMEDIATE ACTION REQUIRED: Implement flood preparedness plan".to_string(),
            "Monitor local authorities for evacuation orders".to_string(),
            "Secure important documents and valuables on upper floors".to_string(),
            "Prepare emergency supplies (water, food, first aid)".to_string(),
            "Avoid unnecessary travel to affected areas".to_string(),
        ],
        RiskLevel::Medium => vec![
            "Stay informed about weather updates".to_string(),
            "Review your emergency evacuation plan".to_string(),
            "Clear drainage systems around property".to_string(),
            "Move vehicles to higher ground if possible".to_string(),
            "Prepare sandbags if available".to_string(),
        ],
        RiskLevel::Low => vec![
            "Continue normal activities with weather awareness".to_string(),
            "Maintain clear drainage systems".to_string(),
            "Keep emergency contact numbers updated".to_string(),
        ],
    };

    // Factor-specific callouts
    for factor in factors {
        if factor.score <= FACTOR_CALLOUT_THRESHOLD {
            continue;
        }
        match factor.kind {
            FactorKind::Weather => {
                recommendations.push("Heavy rainfall expected - monitor river levels".to_string());
            }
            FactorKind::Terrain => {
                recommendations
                    .push("Low-lying area - consider temporary relocation".to_string());
            }
            FactorKind::Satellite => {
                recommendations
                    .push("Increased water coverage detected - elevated risk".to_string());
            }
            FactorKind::Historical => {}
        }
    }

    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;

    fn factor(kind: FactorKind, score: f64) -> FactorScore {
        FactorScore { kind, score }
    }

    #[test]
    fn test_high_risk_leads_with_action() {
        let recs = recommendations(RiskLevel::High, &[]);
        assert_eq!(recs.len(), 5);
        assert!(recs[0].contains("IMMEDIATE ACTION REQUIRED"));
    }

    #[test]
    fn test_low_risk_is_calm() {
        let recs = recommendations(RiskLevel::Low, &[]);
        assert_eq!(recs.len(), 3);
        assert!(recs[0].contains("normal activities"));
    }

    #[test]
    fn test_factor_callouts_above_threshold() {
        let recs = recommendations(
            RiskLevel::Medium,
            &[
                factor(FactorKind::Weather, 60.0),
                factor(FactorKind::Terrain, 55.0),
                factor(FactorKind::Satellite, 10.0),
            ],
        );

        assert!(recs.iter().any(|r| r.contains("river levels")));
        assert!(recs.iter().any(|r| r.contains("Low-lying area")));
        assert!(!recs.iter().any(|r| r.contains("water coverage")));
    }

    #[test]
    fn test_historical_factor_has_no_callout() {
        let base = recommendations(RiskLevel::Low, &[]);
        let with_history = recommendations(RiskLevel::Low, &[factor(FactorKind::Historical, 90.0)]);
        assert_eq!(base.len(), with_history.len());
    }
}
