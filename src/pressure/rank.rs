use std::cmp::Ordering;

use super::metric::ProcessReport;

/// Orders reports by binding pressure, worst first. The sort is stable and
/// no secondary key exists, so reports with equal pressure keep their scan
/// order.
pub fn rank(mut reports: Vec<ProcessReport>) -> Vec<ProcessReport> {
    reports.sort_by(|a, b| {
        b.binding
            .percent
            .partial_cmp(&a.binding.percent)
            .unwrap_or(Ordering::Equal)
    });
    reports
}
