use chrono::{NaiveDate, NaiveDateTime};
use spendlog_config::Config;

/// Formats currency amounts for presentation.
pub trait CurrencyFormatter {
    fn format_amount(&self, amount: f64) -> String;
}

/// Formats dates for presentation.
pub trait DateFormatter {
    /// Long form used in listings, e.g. `Oct 16, 2026`.
    fn format_date(&self, date: NaiveDate) -> String;

    /// Compact form used under chart bars, e.g. `Oct 16`.
    fn format_short(&self, date: NaiveDate) -> String {
        date.format("%b %-d").to_string()
    }

    fn format_timestamp(&self, timestamp: NaiveDateTime) -> String {
        self.format_date(timestamp.date())
    }
}

/// Formatter implementations backed by the active configuration.
#[derive(Debug, Clone)]
pub struct ConfigFormatters {
    currency_symbol: String,
}

impl ConfigFormatters {
    pub fn new(config: &Config) -> Self {
        Self {
            currency_symbol: config.currency_symbol.clone(),
        }
    }
}

impl CurrencyFormatter for ConfigFormatters {
    fn format_amount(&self, amount: f64) -> String {
        if amount < 0.0 {
            format!("-{}{:.2}", self.currency_symbol, amount.abs())
        } else {
            format!("{}{:.2}", self.currency_symbol, amount)
        }
    }
}

impl DateFormatter for ConfigFormatters {
    fn format_date(&self, date: NaiveDate) -> String {
        date.format("%b %-d, %Y").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amounts_use_configured_symbol_and_two_decimals() {
        let mut config = Config::default();
        let formatters = ConfigFormatters::new(&config);
        assert_eq!(formatters.format_amount(12.5), "$12.50");
        assert_eq!(formatters.format_amount(0.0), "$0.00");

        config.currency_symbol = "₹".into();
        assert_eq!(ConfigFormatters::new(&config).format_amount(1234.567), "₹1234.57");
        assert_eq!(ConfigFormatters::new(&config).format_amount(-3.0), "-₹3.00");
    }

    #[test]
    fn dates_render_month_day_year() {
        let formatters = ConfigFormatters::new(&Config::default());
        let date = NaiveDate::from_ymd_opt(2026, 10, 6).unwrap();
        assert_eq!(formatters.format_date(date), "Oct 6, 2026");
        assert_eq!(formatters.format_short(date), "Oct 6");
    }
}
