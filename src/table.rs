//! Renders the ranked reports as a right-aligned table on one writer.
//! Presentation-only concerns live here: unlimited ceilings print as `-1`
//! and percentages are clamped to 100 for display, never for ranking.

use std::io::{self, Write};

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::pressure::{Ceiling, METRIC_FDS, METRIC_NPROC, NamedMetric, ProcessReport};
use crate::system::snapshot::SystemCeilings;

const HEADERS: [&str; 10] = [
    "PID", "FD", "FD-RL", "TSK", "TSK-RL", "BOUND", "VAL", "MAX", "%USE", "CMD",
];
const CMD_MAX_WIDTH: usize = 32;

/// Writes the summary lines and the top `rows` report rows. `None` means
/// every row.
pub fn render<W: Write>(
    w: &mut W,
    system: &SystemCeilings,
    reports: &[ProcessReport],
    rows: Option<usize>,
) -> io::Result<()> {
    writeln!(
        w,
        "Tasks {}, system max is {}",
        system.threads_total,
        fmt_ceiling(system.threads_max)
    )?;
    writeln!(
        w,
        "File descriptors open {}, system max total is {}, system max per process is {}",
        system.files_total,
        fmt_ceiling(system.file_max),
        fmt_ceiling(system.file_per_proc_max)
    )?;

    let shown = rows.unwrap_or(reports.len()).min(reports.len());
    let mut table: Vec<[String; 10]> = Vec::with_capacity(shown + 1);
    table.push(HEADERS.map(str::to_string));
    for report in &reports[..shown] {
        table.push(row(report));
    }

    let mut widths = [0usize; 10];
    for row in &table {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.width());
        }
    }

    for row in &table {
        for (i, (cell, width)) in row.iter().zip(widths).enumerate() {
            if i + 1 == row.len() {
                // CMD is left-aligned and ends the line.
                writeln!(w, "{cell}")?;
            } else {
                write!(w, "{cell:>width$} ")?;
            }
        }
    }
    Ok(())
}

fn row(report: &ProcessReport) -> [String; 10] {
    let fds = metric(report, METRIC_FDS);
    let nproc = metric(report, METRIC_NPROC);
    [
        report.pid.to_string(),
        fmt_value(fds),
        fmt_max(fds),
        fmt_value(nproc),
        fmt_max(nproc),
        report.binding.name.to_string(),
        report.binding.value.to_string(),
        fmt_ceiling(report.binding.ceiling),
        format!("{:.1}", report.binding.percent.min(100.0)),
        truncate_command(&report.name, CMD_MAX_WIDTH),
    ]
}

fn metric<'a>(report: &'a ProcessReport, name: &str) -> Option<&'a NamedMetric> {
    report.metrics.iter().find(|m| m.name == name)
}

fn fmt_value(metric: Option<&NamedMetric>) -> String {
    match metric {
        Some(m) => m.sample.value.to_string(),
        None => "-".to_string(),
    }
}

fn fmt_max(metric: Option<&NamedMetric>) -> String {
    match metric {
        Some(m) => fmt_ceiling(m.sample.ceiling),
        None => "-".to_string(),
    }
}

fn fmt_ceiling(ceiling: Ceiling) -> String {
    match ceiling {
        Ceiling::Limited(max) => max.to_string(),
        Ceiling::Unlimited => "-1".to_string(),
    }
}

fn truncate_command(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut result = String::new();
    let mut width = 0;
    for ch in s.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width > max_width.saturating_sub(1) {
            result.push('\u{2026}');
            break;
        }
        result.push(ch);
        width += ch_width;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pressure::{NamedMetric, evaluate_process};

    fn sample_system() -> SystemCeilings {
        SystemCeilings {
            threads_total: 1543,
            threads_max: Ceiling::Limited(127_345),
            pid_max: Ceiling::Limited(4_194_304),
            files_total: 10_432,
            file_max: Ceiling::Limited(9_223_372),
            file_per_proc_max: Ceiling::Limited(1_048_576),
        }
    }

    fn sample_report(pid: u32, fds: u64) -> ProcessReport {
        evaluate_process(
            pid,
            format!("daemon-{pid}"),
            vec![
                NamedMetric::new(METRIC_FDS, fds, Ceiling::Limited(1024)),
                NamedMetric::new(METRIC_NPROC, 126, Ceiling::Unlimited),
            ],
        )
        .unwrap()
    }

    fn rendered(reports: &[ProcessReport], rows: Option<usize>) -> String {
        let mut out = Vec::new();
        render(&mut out, &sample_system(), reports, rows).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn unlimited_ceilings_print_as_minus_one() {
        let out = rendered(&[sample_report(1, 4)], None);
        let row = out.lines().nth(3).unwrap();
        assert!(row.contains("-1"), "row was: {row}");
    }

    #[test]
    fn row_count_is_bounded() {
        let reports: Vec<_> = (1..=5).map(|pid| sample_report(pid, 4)).collect();
        let out = rendered(&reports, Some(2));
        // 2 summary lines + header + 2 rows
        assert_eq!(out.lines().count(), 5);
        let out_all = rendered(&reports, None);
        assert_eq!(out_all.lines().count(), 8);
    }

    #[test]
    fn displayed_percent_is_clamped() {
        let report = evaluate_process(
            9,
            "greedy".to_string(),
            vec![NamedMetric::new(METRIC_FDS, 2048, Ceiling::Limited(1024))],
        )
        .unwrap();
        assert!(report.binding.percent > 100.0);
        let out = rendered(&[report], None);
        assert!(out.contains("100.0"));
        assert!(!out.contains("200.0"));
    }

    #[test]
    fn long_commands_are_truncated() {
        let mut report = sample_report(1, 4);
        report.name = "a".repeat(CMD_MAX_WIDTH * 2);
        let out = rendered(&[report], None);
        let row = out.lines().nth(3).unwrap();
        assert!(row.ends_with('\u{2026}'));
    }
}
