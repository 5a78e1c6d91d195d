//! KPI tiles shown above the charts

use super::customer::CustomerRow;
use super::loan_data::LoanData;

/// Which drill-down a tile leads to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrillTarget {
    LoanAmount,
    Status,
    States,
}

impl DrillTarget {
    pub fn message(&self) -> &'static str {
        match self {
            DrillTarget::LoanAmount => "Drilling down into loan details…",
            DrillTarget::Status => "Analyzing status breakdown…",
            DrillTarget::States => "Exploring geographic data…",
        }
    }
}

/// One KPI tile
#[derive(Debug, Clone, PartialEq)]
pub struct KpiTile {
    pub label: String,
    pub value: String,
    pub drill: Option<DrillTarget>,
}

/// The KPI row. The funded amount is the only live-updated value.
#[derive(Debug, Clone, PartialEq)]
pub struct KpiBoard {
    pub tiles: Vec<KpiTile>,
}

/// Index of the funded-amount tile
pub const LOAN_AMOUNT_TILE: usize = 0;

impl KpiBoard {
    pub fn from_data(data: &LoanData, rows: &[CustomerRow]) -> Self {
        let avg_rate = if rows.is_empty() {
            "n/a".to_string()
        } else {
            let mean = rows.iter().map(|r| r.rate).sum::<f64>() / rows.len() as f64;
            format!("{:.2}%", mean)
        };
        let charged_off = data
            .status_share("Charged Off")
            .map(|v| format!("{:.2}%", v))
            .unwrap_or_else(|| "n/a".to_string());

        Self {
            tiles: vec![
                KpiTile {
                    label: "Total Funded".to_string(),
                    value: "$1.73B".to_string(),
                    drill: Some(DrillTarget::LoanAmount),
                },
                KpiTile {
                    label: "Total Loans".to_string(),
                    value: format_thousands(data.total_loans()),
                    drill: Some(DrillTarget::States),
                },
                KpiTile {
                    label: "Charged Off".to_string(),
                    value: charged_off,
                    drill: Some(DrillTarget::Status),
                },
                KpiTile {
                    label: "Avg Rate (Top 5)".to_string(),
                    value: avg_rate,
                    drill: None,
                },
            ],
        }
    }

    pub fn value(&self, index: usize) -> Option<&str> {
        self.tiles.get(index).map(|t| t.value.as_str())
    }

    /// Replace a tile's text; missing tiles are ignored
    pub fn set_value(&mut self, index: usize, value: String) {
        if let Some(tile) = self.tiles.get_mut(index) {
            tile.value = value;
        }
    }
}

/// Format an integer with comma thousands separators
pub fn format_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Scale a monetary display string such as `$1.73B` by `factor`.
///
/// Any non-numeric prefix (currency sign) and suffix (unit) are kept; the
/// number is rewritten with two decimals. Returns `None` when the text has
/// no parseable number.
pub fn nudge_amount(text: &str, factor: f64) -> Option<String> {
    let trimmed = text.trim();
    let start = trimmed.find(|c: char| c.is_ascii_digit() || c == '-' || c == '.')?;
    let end = trimmed
        .rfind(|c: char| c.is_ascii_digit() || c == '.')
        .map(|i| i + 1)?;
    if end <= start {
        return None;
    }

    let (prefix, rest) = trimmed.split_at(start);
    let (number, suffix) = rest.split_at(end - start);
    let value: f64 = number.replace(',', "").parse().ok()?;
    if !value.is_finite() {
        return None;
    }

    Some(format!("{}{:.2}{}", prefix, value * factor, suffix))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::loan_data::seed_customers;

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1000), "1,000");
        assert_eq!(format_thousands(250000), "250,000");
        assert_eq!(format_thousands(1234567), "1,234,567");
    }

    #[test]
    fn test_nudge_preserves_prefix_and_suffix() {
        assert_eq!(nudge_amount("$1.73B", 1.0), Some("$1.73B".to_string()));
        assert_eq!(nudge_amount("$2.00B", 1.01), Some("$2.02B".to_string()));
        assert_eq!(nudge_amount("4.50M", 2.0), Some("9.00M".to_string()));
    }

    #[test]
    fn test_nudge_rejects_non_numeric() {
        assert_eq!(nudge_amount("n/a", 1.01), None);
        assert_eq!(nudge_amount("", 1.01), None);
    }

    #[test]
    fn test_board_from_seed() {
        let board = KpiBoard::from_data(&LoanData::seed(), &seed_customers());
        assert_eq!(board.value(LOAN_AMOUNT_TILE), Some("$1.73B"));
        assert_eq!(board.value(1), Some("114,014"));
        assert_eq!(board.value(2), Some("9.07%"));
        assert_eq!(board.value(3), Some("6.78%"));
    }

    #[test]
    fn test_set_value_ignores_missing_tile() {
        let mut board = KpiBoard::from_data(&LoanData::seed(), &[]);
        board.set_value(42, "x".to_string());
        assert_eq!(board.value(3), Some("n/a"));
    }
}
