//! Aggregate loan dataset and the hardcoded session data

use super::customer::CustomerRow;

/// Precomputed aggregates used only by the charts and KPI tiles
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LoanData {
    /// Loan counts per state, in display order
    pub state_counts: Vec<(String, f64)>,
    /// Percentage of loans per status, in display order
    pub status_distribution: Vec<(String, f64)>,
}

impl LoanData {
    /// Aggregates shipped with the dashboard
    pub fn seed() -> Self {
        let state_counts = [
            ("CA", 25234.0),
            ("TX", 16750.0),
            ("NY", 15892.0),
            ("FL", 14123.0),
            ("IL", 8756.0),
            ("NJ", 7823.0),
            ("OH", 7234.0),
            ("PA", 6845.0),
            ("GA", 6234.0),
            ("NC", 5123.0),
        ];
        let status_distribution = [
            ("Current", 87.89),
            ("Charged Off", 9.07),
            ("Late (31-120)", 1.72),
            ("Grace Period", 0.90),
            ("Late (16-30)", 0.42),
        ];

        Self {
            state_counts: state_counts
                .iter()
                .map(|(k, v)| (k.to_string(), *v))
                .collect(),
            status_distribution: status_distribution
                .iter()
                .map(|(k, v)| (k.to_string(), *v))
                .collect(),
        }
    }

    pub fn total_loans(&self) -> u64 {
        self.state_counts.iter().map(|(_, v)| *v).sum::<f64>().round() as u64
    }

    /// Share of a status in percent, if the status is known
    pub fn status_share(&self, status: &str) -> Option<f64> {
        self.status_distribution
            .iter()
            .find(|(label, _)| label == status)
            .map(|(_, v)| *v)
    }

    pub fn states(&self) -> Vec<String> {
        self.state_counts.iter().map(|(k, _)| k.clone()).collect()
    }

    pub fn statuses(&self) -> Vec<String> {
        self.status_distribution
            .iter()
            .map(|(k, _)| k.clone())
            .collect()
    }
}

/// Origination years offered by the year filter
pub fn filter_years() -> Vec<String> {
    (2015..=2018).rev().map(|y| y.to_string()).collect()
}

/// High-value customers shown in the table
pub fn seed_customers() -> Vec<CustomerRow> {
    vec![
        CustomerRow::new("GAtPem...cmdgrz", 250000, "CA", 6.17),
        CustomerRow::new("IqOBd5...9452/cb", 241120, "TX", 5.99),
        CustomerRow::new("3ZrUn/...so3jcKuf", 237892, "NY", 7.75),
        CustomerRow::new("vkhNp2...KDaQp8N", 235650, "FL", 6.82),
        CustomerRow::new("J3xFJM...991BnP", 228900, "IL", 7.15),
    ]
}
