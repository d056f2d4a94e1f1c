//! Text bar charts for the weekly and category overviews.

use crate::format::CurrencyFormatter;

pub const DEFAULT_BAR_WIDTH: usize = 30;
const BAR_CHAR: char = '█';

/// Renders one horizontal bar per row, scaled against the largest amount.
pub fn render_bars(
    rows: &[(String, f64)],
    formatter: &dyn CurrencyFormatter,
    width: usize,
) -> String {
    let label_width = rows
        .iter()
        .map(|(label, _)| label.chars().count())
        .max()
        .unwrap_or(0);
    let max = rows
        .iter()
        .map(|(_, amount)| *amount)
        .fold(0.0_f64, f64::max);

    rows.iter()
        .map(|(label, amount)| {
            let bar = BAR_CHAR.to_string().repeat(bar_length(*amount, max, width));
            format!(
                "{label:<label_width$} | {bar:<width$} {}",
                formatter.format_amount(*amount),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn bar_length(amount: f64, max: f64, width: usize) -> usize {
    if amount <= 0.0 || max <= 0.0 {
        return 0;
    }
    let scaled = (amount / max * width as f64).round() as usize;
    scaled.clamp(1, width)
}
