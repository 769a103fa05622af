use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};

use crate::{core::timeline::Timeline, quantity::rate::KilowattHourRate};

#[must_use]
pub fn build_timeline_table(timeline: &Timeline) -> Table {
    #[allow(clippy::cast_precision_loss)]
    let mean_rate = if timeline.is_empty() {
        KilowattHourRate::ZERO
    } else {
        timeline.iter().map(|hour| hour.rate).sum::<KilowattHourRate>() / timeline.len() as f64
    };

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED).apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.enforce_styling();
    table.set_header(vec!["Date", "Start", "End", "Rate"]);
    for hour in timeline.iter() {
        table.add_row(vec![
            Cell::new(hour.interval.start.format("%b %d")).add_attribute(Attribute::Dim),
            Cell::new(hour.interval.start.format("%H:%M")),
            Cell::new(hour.interval.end.format("%H:%M")).add_attribute(Attribute::Dim),
            Cell::new(hour.rate).set_alignment(CellAlignment::Right).fg(
                if hour.rate >= mean_rate { Color::Red } else { Color::Green },
            ),
        ]);
    }
    table
}
