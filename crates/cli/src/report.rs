use congestiq_core::domain::risk::{RiskBreakdown, RiskTier};
use congestiq_core::weather::types::WeatherSnapshot;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct Assessment<'a> {
    city: &'a str,
    weather: &'a WeatherSnapshot,
    traffic_risk: i64,
    weather_risk: i64,
    safety_risk: i64,
    congestion_pct: u8,
    tier: RiskTier,
    actions: &'a [&'static str],
}

impl<'a> Assessment<'a> {
    fn new(city: &'a str, weather: &'a WeatherSnapshot, breakdown: &'a RiskBreakdown) -> Self {
        Self {
            city,
            weather,
            traffic_risk: breakdown.traffic_risk as i64,
            weather_risk: breakdown.weather_risk as i64,
            safety_risk: breakdown.safety_risk as i64,
            congestion_pct: breakdown.congestion_pct,
            tier: breakdown.tier,
            actions: &breakdown.actions,
        }
    }
}

pub fn print_json(
    city: &str,
    weather: &WeatherSnapshot,
    breakdown: &RiskBreakdown,
) -> anyhow::Result<()> {
    let assessment = Assessment::new(city, weather, breakdown);
    println!("{}", serde_json::to_string_pretty(&assessment)?);
    Ok(())
}

pub fn print_text(city: &str, weather: &WeatherSnapshot, breakdown: &RiskBreakdown) {
    println!("Congestion assessment for {city}");
    println!();
    println!("Weather");
    println!("  Temperature:  {} C", weather.temperature_c);
    println!("  Humidity:     {}%", weather.humidity_pct);
    println!("  Wind speed:   {} m/s", weather.wind_speed_mps);
    println!("  Visibility:   {} m", weather.visibility_m);
    println!("  Condition:    {}", weather.condition);
    println!();
    println!("Risk contribution");
    println!("  Traffic risk: {}", breakdown.traffic_risk as i64);
    println!("  Weather risk: {}", breakdown.weather_risk as i64);
    println!("  Safety risk:  {}", breakdown.safety_risk as i64);
    println!();
    println!(
        "Congestion level: {}% ({})",
        breakdown.congestion_pct,
        breakdown.tier.label()
    );
    println!();
    println!("Recommended actions");
    for action in &breakdown.actions {
        println!("  - {action}");
    }
}
