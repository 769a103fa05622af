use std::{
    cmp::Ordering,
    fmt::{Display, Formatter},
};

use chrono::{DateTime, Utc};

use crate::{
    core::{consumption::ConsumptionRow, timeline::Timeline},
    prelude::*,
    quantity::{cost::Cost, energy::KilowattHours, rate::KilowattHourRate},
};

#[derive(Copy, Clone, PartialEq, Debug)]
pub struct CostLine {
    pub timestamp: DateTime<Utc>,
    pub energy: KilowattHours,

    /// `None` when the timeline has no rate for the timestamp.
    pub priced: Option<Priced>,
}

#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Priced {
    pub rate: KilowattHourRate,
    pub cost: Cost,
}

#[derive(Clone, PartialEq, Debug, Default)]
pub struct CostReport {
    pub lines: Vec<CostLine>,
    pub total_cost: Cost,

    /// All the consumed energy, including the unpriced lines.
    pub total_energy: KilowattHours,

    pub n_unpriced: usize,
}

impl CostReport {
    /// Price each reading against the timeline.
    ///
    /// Missing rates do not fail the report: such lines are kept without a cost.
    #[instrument(skip_all, fields(n_hours = timeline.len()))]
    pub fn aggregate(rows: impl IntoIterator<Item = ConsumptionRow>, timeline: &Timeline) -> Self {
        let mut report = Self::default();
        for row in rows {
            // Also rejects `NaN`, which is not positive either.
            if row.energy.partial_cmp(&KilowattHours::ZERO) != Some(Ordering::Greater) {
                continue;
            }
            let priced = timeline.resolve(row.timestamp).map(|rate| Priced {
                rate,
                cost: row.energy * rate,
            });
            match priced {
                Some(priced) => report.total_cost += priced.cost,
                None => report.n_unpriced += 1,
            }
            report.total_energy += row.energy;
            report.lines.push(CostLine { timestamp: row.timestamp, energy: row.energy, priced });
        }
        info!(
            n_lines = report.lines.len(),
            n_unpriced = report.n_unpriced,
            total_cost = ?report.total_cost,
            total_energy = ?report.total_energy,
            "aggregated"
        );
        report
    }
}

impl Display for CostLine {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let timestamp = self.timestamp.format("%Y-%m-%d %H:%M:%S");
        match self.priced {
            Some(Priced { rate, cost }) => {
                write!(f, "{timestamp} {} * {rate} = {cost}", self.energy)
            }
            None => write!(f, "{timestamp} {:.1}", self.energy.watt_hours()),
        }
    }
}

impl Display for CostReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for line in &self.lines {
            writeln!(f, "{line}")?;
        }
        writeln!(f, "Total {}", self.total_cost)?;
        write!(f, "Power {:.3} kWh", self.total_energy.0)?;
        if self.n_unpriced != 0 {
            write!(f, "\nUnpriced {} of {} readings", self.n_unpriced, self.lines.len())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use chrono::TimeZone;

    use super::*;
    use crate::{
        api::octopus::PriceRecord,
        core::timeline::RateInterval,
        quantity::interval::Interval,
    };

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2023, 1, 1, hour, minute, 0).unwrap()
    }

    fn row(hour: u32, minute: u32, watt_hours: f64) -> ConsumptionRow {
        ConsumptionRow {
            timestamp: at(hour, minute),
            energy: KilowattHours::from_watt_hours(watt_hours),
        }
    }

    fn timeline() -> Timeline {
        [(10, 25.0), (11, 30.0), (12, 40.0)]
            .into_iter()
            .map(|(start, pence)| RateInterval {
                interval: Interval::new(at(start, 0), at(start + 1, 0)),
                rate: KilowattHourRate::from_pence(pence),
            })
            .collect()
    }

    #[test]
    fn test_aggregate_ok() {
        let report = CostReport::aggregate([row(10, 45, 500.0)], &timeline());
        assert_eq!(report.lines.len(), 1);
        assert_eq!(report.n_unpriced, 0);
        assert_abs_diff_eq!(report.lines[0].priced.unwrap().cost.0, 0.125, epsilon = 1e-12);
        assert_abs_diff_eq!(report.total_cost.0, 0.125, epsilon = 1e-12);
        assert_abs_diff_eq!(report.total_energy.0, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_aggregate_partially_priced() {
        let rows = [
            row(9, 30, 100.0),   // before the timeline
            row(10, 0, 1000.0),  // 25p
            row(11, 15, 0.0),    // skipped
            row(11, 30, 2000.0), // 30p
            row(13, 30, 300.0),  // after the timeline
        ];
        let report = CostReport::aggregate(rows, &timeline());
        assert_eq!(report.lines.len(), 4);
        assert_eq!(report.n_unpriced, 2);
        assert!(report.lines[0].priced.is_none());
        assert!(report.lines[3].priced.is_none());
        assert_abs_diff_eq!(report.total_cost.0, 0.25 + 0.6, epsilon = 1e-12);
        assert_abs_diff_eq!(report.total_energy.0, 3.4, epsilon = 1e-12);
    }

    #[test]
    fn test_aggregate_idempotent() {
        let rows = [row(10, 15, 123.0), row(11, 45, 456.0), row(13, 0, 789.0)];
        let timeline = timeline();
        let first = CostReport::aggregate(rows, &timeline);
        let second = CostReport::aggregate(rows, &timeline);
        assert_eq!(first, second);
        assert_eq!(first.to_string(), second.to_string());
    }

    #[test]
    fn test_aggregate_skips_nan() {
        let report = CostReport::aggregate(
            [row(10, 0, f64::NAN), row(10, 30, 1000.0)],
            &timeline(),
        );
        assert_eq!(report.lines.len(), 1);
        assert_eq!(report.n_unpriced, 0);
        assert_abs_diff_eq!(report.total_cost.0, 0.25, epsilon = 1e-12);
        assert_abs_diff_eq!(report.total_energy.0, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_display_all_priced() {
        let report = CostReport::aggregate([row(10, 45, 1000.0)], &timeline());
        assert_eq!(
            report.to_string(),
            "2023-01-01 10:45:00 1000.0Wh * 25.00p = £0.25\n\
             Total £0.25\n\
             Power 1.000 kWh",
        );
    }

    #[test]
    fn test_end_to_end() {
        let timeline = Timeline::build(vec![
            PriceRecord {
                value_inc_vat: KilowattHourRate::from_pence(20.0),
                valid_from: "2023-01-01T10:00:00Z".to_string(),
                valid_to: "2023-01-01T10:30:00Z".to_string(),
            },
            PriceRecord {
                value_inc_vat: KilowattHourRate::from_pence(30.0),
                valid_from: "2023-01-01T10:30:00Z".to_string(),
                valid_to: "2023-01-01T11:00:00Z".to_string(),
            },
        ]);
        let report = CostReport::aggregate([row(10, 45, 500.0)], &timeline);
        let priced = report.lines[0].priced.unwrap();
        assert_abs_diff_eq!(priced.rate.pence(), 25.0, epsilon = 1e-9);
        assert_abs_diff_eq!(priced.cost.0, 0.125, epsilon = 1e-12);
    }

    #[test]
    fn test_display_ok() {
        let report = CostReport::aggregate([row(10, 45, 1000.0), row(8, 0, 250.0)], &timeline());
        assert_eq!(
            report.to_string(),
            "2023-01-01 10:45:00 1000.0Wh * 25.00p = £0.25\n\
             2023-01-01 08:00:00 250.0\n\
             Total £0.25\n\
             Power 1.250 kWh\n\
             Unpriced 1 of 2 readings",
        );
    }
}
