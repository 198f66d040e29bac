//! Flood risk scoring for FloodWatch
//!
//! Blends four sub-scores (satellite, weather, terrain, historical) into
//! a single 0-100 risk score with a three-level classification, builds a
//! daily risk timeline, generates recommendations, and orchestrates the
//! data-source crates with mock fallback.

pub mod advice;
pub mod assess;
pub mod factors;
pub mod model;
pub mod types;

pub use assess::{AssessOptions, Assessor};
pub use model::{blend, build_assessment, risk_timeline};
pub use types::{
    AssessmentReport, FactorKind, FactorScore, Provenance, RiskAssessment, RiskLevel,
    SourceStatus, TimelinePoint,
};
