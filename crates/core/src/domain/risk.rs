use serde::{Deserialize, Serialize};

// Tier boundaries on the rounded congestion percentage. Each boundary is
// closed on the higher tier: 35 is Moderate, 65 is High.
pub const MODERATE_THRESHOLD_PCT: u8 = 35;
pub const HIGH_THRESHOLD_PCT: u8 = 65;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskTier {
    Low,
    Moderate,
    High,
}

impl RiskTier {
    pub fn from_percentage(pct: u8) -> Self {
        if pct >= HIGH_THRESHOLD_PCT {
            RiskTier::High
        } else if pct >= MODERATE_THRESHOLD_PCT {
            RiskTier::Moderate
        } else {
            RiskTier::Low
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskTier::Low => "Low",
            RiskTier::Moderate => "Moderate",
            RiskTier::High => "High",
        }
    }

    pub fn recommended_actions(&self) -> &'static [&'static str] {
        match self {
            RiskTier::Low => &["Maintain normal operations"],
            RiskTier::Moderate => &["Adjust signal timings", "Warn commuters"],
            RiskTier::High => &[
                "Trigger emergency traffic diversion",
                "Issue public alerts",
                "Increase enforcement",
            ],
        }
    }
}

/// Result of one evaluation. Sub-risks are kept as raw scores; rendering
/// surfaces truncate them to whole numbers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskBreakdown {
    pub traffic_risk: f64,
    pub weather_risk: f64,
    pub safety_risk: f64,
    pub total_risk: f64,
    pub congestion_pct: u8,
    pub tier: RiskTier,
    pub actions: Vec<&'static str>,
}
