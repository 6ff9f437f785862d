//! Per-faculty statistics derived from the server's aggregate.
//!
//! The counts themselves come from the server; this module only maps them to
//! chart entries and computes each entry's share of the total.

use crate::api::FacultyCount;

/// Name shown for an aggregate the server returned without a faculty.
pub const UNKNOWN_FACULTY: &str = "Unknown";

/// One slice of the distribution: a faculty and its submission count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacultyShare {
    pub name: String,
    pub value: u64,
}

/// The faculty distribution, in server order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatsSummary {
    shares: Vec<FacultyShare>,
    total: u64,
}

impl StatsSummary {
    /// Build the summary from the raw aggregate.
    pub fn from_counts(counts: Vec<FacultyCount>) -> Self {
        let shares: Vec<FacultyShare> = counts
            .into_iter()
            .map(|c| FacultyShare {
                name: c.faculty.unwrap_or_else(|| UNKNOWN_FACULTY.to_string()),
                value: c.count,
            })
            .collect();
        let total = shares.iter().map(|s| s.value).sum();

        Self { shares, total }
    }

    pub fn shares(&self) -> &[FacultyShare] {
        &self.shares
    }

    /// Sum of every share's value.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// True when there is nothing to chart.
    pub fn is_empty(&self) -> bool {
        self.shares.is_empty() || self.total == 0
    }

    /// Percentage of the total that `value` represents; 0 when the total is 0.
    pub fn percentage(&self, value: u64) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            value as f64 / self.total as f64 * 100.0
        }
    }

    /// `name: N submissions (P%)` for every share, with P to one decimal.
    pub fn summary_lines(&self) -> Vec<String> {
        self.shares
            .iter()
            .map(|s| {
                format!(
                    "{}: {} submissions ({}%)",
                    s.name,
                    s.value,
                    format_percentage(self.percentage(s.value), 1)
                )
            })
            .collect()
    }
}

/// Format a percentage with a fixed number of decimals.
pub fn format_percentage(percentage: f64, decimals: usize) -> String {
    if percentage.is_finite() {
        format!("{:.*}", decimals, percentage)
    } else {
        format!("{:.*}", decimals, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(name: &str, count: u64) -> FacultyCount {
        FacultyCount {
            faculty: Some(name.to_string()),
            count,
        }
    }

    #[test]
    fn test_totals_and_percentages() {
        let summary = StatsSummary::from_counts(vec![count("Karuna", 3), count("Ashwini", 1)]);

        assert_eq!(summary.total(), 4);
        assert!(!summary.is_empty());
        assert_eq!(format_percentage(summary.percentage(3), 1), "75.0");
        assert_eq!(format_percentage(summary.percentage(1), 1), "25.0");
        assert_eq!(
            summary.summary_lines(),
            vec![
                "Karuna: 3 submissions (75.0%)".to_string(),
                "Ashwini: 1 submissions (25.0%)".to_string(),
            ]
        );
    }

    #[test]
    fn test_server_order_preserved() {
        let summary = StatsSummary::from_counts(vec![
            count("Pratieksha", 1),
            count("Meenakshi", 9),
            count("Karuna", 5),
        ]);
        let names: Vec<&str> = summary.shares().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Pratieksha", "Meenakshi", "Karuna"]);
    }

    #[test]
    fn test_zero_total_is_empty_and_safe() {
        let summary = StatsSummary::from_counts(vec![count("Karuna", 0), count("Ashwini", 0)]);

        assert_eq!(summary.total(), 0);
        assert!(summary.is_empty());
        assert_eq!(summary.percentage(0), 0.0);
        for line in summary.summary_lines() {
            assert!(line.ends_with("(0.0%)"), "unexpected line: {}", line);
        }
    }

    #[test]
    fn test_no_entries_is_empty() {
        let summary = StatsSummary::from_counts(Vec::new());
        assert!(summary.is_empty());
        assert_eq!(summary.total(), 0);
    }

    #[test]
    fn test_missing_faculty_name() {
        let summary = StatsSummary::from_counts(vec![FacultyCount {
            faculty: None,
            count: 2,
        }]);
        assert_eq!(summary.shares()[0].name, UNKNOWN_FACULTY);
    }

    #[test]
    fn test_format_percentage_rounding() {
        assert_eq!(format_percentage(100.0 / 3.0, 1), "33.3");
        assert_eq!(format_percentage(200.0 / 3.0, 0), "67");
        assert_eq!(format_percentage(f64::NAN, 1), "0.0");
    }
}
