use crate::domain::inputs::{SafetyInputs, TrafficInputs};
use crate::domain::risk::{RiskBreakdown, RiskTier};
use crate::weather::types::WeatherSnapshot;

// Traffic sub-score.
const DENSITY_WEIGHT: f64 = 0.4;
const SPEED_DEFICIT_WEIGHT: f64 = 0.35;
// Speeds below this (km/h) contribute to the speed-deficit term.
const FREE_FLOW_SPEED_KMH: f64 = 60.0;
const PEAK_HOUR_PENALTY: f64 = 10.0;
const RECENT_ACCIDENT_PENALTY: f64 = 20.0;
const ROAD_CONSTRUCTION_PENALTY: f64 = 15.0;

/// Base penalty per reported condition label. Labels not in the table fall
/// back to [`UNKNOWN_CONDITION_PENALTY`]: an unrecognized condition counts
/// as moderately risky, never as clear.
const CONDITION_PENALTIES: &[(&str, f64)] = &[
    ("Clear", 0.0),
    ("Rain", 15.0),
    ("Drizzle", 10.0),
    ("Thunderstorm", 25.0),
    ("Fog", 20.0),
    ("Mist", 12.0),
];
const UNKNOWN_CONDITION_PENALTY: f64 = 8.0;

// Independently triggered weather additions.
const LOW_VISIBILITY_CUTOFF_M: u32 = 300;
const LOW_VISIBILITY_PENALTY: f64 = 15.0;
const EXTREME_HEAT_CUTOFF_C: f64 = 40.0;
const EXTREME_HEAT_PENALTY: f64 = 10.0;
const HIGH_HUMIDITY_CUTOFF_PCT: f64 = 85.0;
const HIGH_HUMIDITY_PENALTY: f64 = 8.0;
const STRONG_WIND_CUTOFF_MPS: f64 = 10.0;
const STRONG_WIND_PENALTY: f64 = 10.0;

// Safety sub-score.
const HELMET_GAP_WEIGHT: f64 = 0.25;
const SEATBELT_GAP_WEIGHT: f64 = 0.2;
const SPEEDING_PENALTY: f64 = 15.0;

/// Empirical ceiling for the combined score, used to normalize the total
/// into a percentage. A hand-tuned constant with no derivation; changing it
/// changes every reported percentage.
pub const MAX_PLAUSIBLE_RISK: f64 = 170.0;

/// Score one observation bundle. Pure: identical inputs always produce an
/// identical breakdown. Callers are responsible for range-validating the
/// inputs first ([`TrafficInputs::validate`], [`SafetyInputs::validate`]).
pub fn evaluate(
    weather: &WeatherSnapshot,
    traffic: &TrafficInputs,
    safety: &SafetyInputs,
) -> RiskBreakdown {
    let traffic_risk = traffic_risk(traffic);
    let weather_risk = weather_risk(weather);
    let safety_risk = safety_risk(safety);

    let total_risk = traffic_risk + weather_risk + safety_risk;
    let congestion_pct = (total_risk / MAX_PLAUSIBLE_RISK * 100.0)
        .floor()
        .min(100.0) as u8;

    let tier = RiskTier::from_percentage(congestion_pct);

    RiskBreakdown {
        traffic_risk,
        weather_risk,
        safety_risk,
        total_risk,
        congestion_pct,
        tier,
        actions: tier.recommended_actions().to_vec(),
    }
}

fn traffic_risk(traffic: &TrafficInputs) -> f64 {
    let mut risk = f64::from(traffic.density) * DENSITY_WEIGHT;
    risk += (FREE_FLOW_SPEED_KMH - f64::from(traffic.avg_speed_kmh)).max(0.0)
        * SPEED_DEFICIT_WEIGHT;
    if traffic.peak_hour {
        risk += PEAK_HOUR_PENALTY;
    }
    if traffic.recent_accident {
        risk += RECENT_ACCIDENT_PENALTY;
    }
    if traffic.road_construction {
        risk += ROAD_CONSTRUCTION_PENALTY;
    }
    risk
}

fn weather_risk(weather: &WeatherSnapshot) -> f64 {
    let mut risk = condition_penalty(&weather.condition);
    if weather.visibility_m < LOW_VISIBILITY_CUTOFF_M {
        risk += LOW_VISIBILITY_PENALTY;
    }
    if weather.temperature_c > EXTREME_HEAT_CUTOFF_C {
        risk += EXTREME_HEAT_PENALTY;
    }
    if weather.humidity_pct > HIGH_HUMIDITY_CUTOFF_PCT {
        risk += HIGH_HUMIDITY_PENALTY;
    }
    if weather.wind_speed_mps > STRONG_WIND_CUTOFF_MPS {
        risk += STRONG_WIND_PENALTY;
    }
    risk
}

fn condition_penalty(label: &str) -> f64 {
    CONDITION_PENALTIES
        .iter()
        .find(|(name, _)| *name == label)
        .map(|(_, penalty)| *penalty)
        .unwrap_or(UNKNOWN_CONDITION_PENALTY)
}

fn safety_risk(safety: &SafetyInputs) -> f64 {
    let mut risk = (100.0 - f64::from(safety.helmet_usage)) * HELMET_GAP_WEIGHT;
    risk += (100.0 - f64::from(safety.seatbelt_usage)) * SEATBELT_GAP_WEIGHT;
    if safety.speeding {
        risk += SPEEDING_PENALTY;
    }
    risk
}
