use anyhow::ensure;
use serde::{Deserialize, Serialize};

pub const MAX_DENSITY_PCT: u8 = 100;
pub const MAX_AVG_SPEED_KMH: u16 = 120;
pub const MAX_COMPLIANCE_PCT: u8 = 100;

/// Operator-observed traffic conditions for the corridor under evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrafficInputs {
    /// Density as percent of corridor capacity.
    pub density: u8,
    pub avg_speed_kmh: u16,
    pub peak_hour: bool,
    pub recent_accident: bool,
    pub road_construction: bool,
}

/// Operator-observed safety compliance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SafetyInputs {
    pub helmet_usage: u8,
    pub seatbelt_usage: u8,
    pub speeding: bool,
}

impl TrafficInputs {
    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            self.density <= MAX_DENSITY_PCT,
            "traffic density must be 0..=100 percent (got {})",
            self.density
        );
        ensure!(
            self.avg_speed_kmh <= MAX_AVG_SPEED_KMH,
            "average speed must be 0..=120 km/h (got {})",
            self.avg_speed_kmh
        );
        Ok(())
    }
}

impl SafetyInputs {
    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            self.helmet_usage <= MAX_COMPLIANCE_PCT,
            "helmet usage must be 0..=100 percent (got {})",
            self.helmet_usage
        );
        ensure!(
            self.seatbelt_usage <= MAX_COMPLIANCE_PCT,
            "seatbelt usage must be 0..=100 percent (got {})",
            self.seatbelt_usage
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_boundary_values() {
        let traffic = TrafficInputs {
            density: 100,
            avg_speed_kmh: 120,
            peak_hour: true,
            recent_accident: true,
            road_construction: true,
        };
        assert!(traffic.validate().is_ok());

        let safety = SafetyInputs {
            helmet_usage: 100,
            seatbelt_usage: 0,
            speeding: false,
        };
        assert!(safety.validate().is_ok());
    }

    #[test]
    fn rejects_out_of_range_traffic() {
        let traffic = TrafficInputs {
            density: 101,
            avg_speed_kmh: 40,
            peak_hour: false,
            recent_accident: false,
            road_construction: false,
        };
        assert!(traffic.validate().is_err());

        let traffic = TrafficInputs {
            density: 50,
            avg_speed_kmh: 121,
            peak_hour: false,
            recent_accident: false,
            road_construction: false,
        };
        assert!(traffic.validate().is_err());
    }

    #[test]
    fn rejects_out_of_range_safety() {
        let safety = SafetyInputs {
            helmet_usage: 130,
            seatbelt_usage: 80,
            speeding: false,
        };
        assert!(safety.validate().is_err());
    }
}
