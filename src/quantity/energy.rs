use std::{
    fmt::{Debug, Display, Formatter},
    ops::Mul,
};

use crate::quantity::{Quantity, cost::Cost, rate::KilowattHourRate};

pub type KilowattHours = Quantity<f64, 1, 1, 0>;

impl KilowattHours {
    pub fn from_watt_hours(watt_hours: f64) -> Self {
        Self(watt_hours * 0.001)
    }

    #[must_use]
    pub fn watt_hours(self) -> f64 {
        self.0 * 1000.0
    }
}

/// Formats as watt-hours since that is how the meter reports the readings.
impl Display for KilowattHours {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1}Wh", self.watt_hours())
    }
}

impl Debug for KilowattHours {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.3}kWh", self.0)
    }
}

impl Mul<KilowattHourRate> for KilowattHours {
    type Output = Cost;

    fn mul(self, rhs: KilowattHourRate) -> Self::Output {
        Cost::from(self.0 * rhs.0)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_cost_ok() {
        // 500 Wh × 25p/kWh = 500 × 25 / 100000 = £0.125
        let cost = KilowattHours::from_watt_hours(500.0) * KilowattHourRate::from_pence(25.0);
        assert_abs_diff_eq!(cost.0, 0.125, epsilon = 1e-12);
    }

    #[test]
    fn test_display_ok() {
        assert_eq!(KilowattHours::from_watt_hours(1234.56).to_string(), "1234.6Wh");
    }
}
