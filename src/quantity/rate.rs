use std::fmt::{Debug, Display, Formatter};

use serde::{Deserialize, Deserializer};

use crate::quantity::Quantity;

/// Pounds per kilowatt-hour.
///
/// Octopus quotes the prices in pence, hence the pence accessors.
pub type KilowattHourRate = Quantity<f64, -1, -1, 1>;

impl KilowattHourRate {
    pub fn from_pence(pence: f64) -> Self {
        Self(pence / 100.0)
    }

    #[must_use]
    pub fn pence(self) -> f64 {
        self.0 * 100.0
    }

    pub fn deserialize_pence<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        f64::deserialize(deserializer).map(Self::from_pence)
    }
}

impl Display for KilowattHourRate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}p", self.pence())
    }
}

impl Debug for KilowattHourRate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}p/kWh", self.pence())
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_pence_ok() {
        let rate = KilowattHourRate::from_pence(25.0);
        assert_abs_diff_eq!(rate.0, 0.25);
        assert_abs_diff_eq!(rate.pence(), 25.0);
        assert_eq!(rate.to_string(), "25.00p");
    }
}
