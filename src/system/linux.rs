//! Raw `/proc` reads. Per-process helpers return `Option` because a pid can
//! vanish between enumeration and the read; system-wide helpers return
//! `Result` because the run cannot continue without them.

use std::fs;

use crate::pressure::Ceiling;

use super::SnapshotError;

pub const THREADS_MAX: &str = "/proc/sys/kernel/threads-max";
pub const PID_MAX: &str = "/proc/sys/kernel/pid_max";
pub const NR_OPEN: &str = "/proc/sys/fs/nr_open";
pub const FILE_NR: &str = "/proc/sys/fs/file-nr";

/// Soft per-process rlimits, from `/proc/<pid>/limits`.
#[derive(Clone, Copy, Debug)]
pub struct ProcLimits {
    pub open_files: Ceiling,
    pub processes: Ceiling,
}

/// The `/proc/<pid>/status` fields the scan needs.
#[derive(Clone, Copy, Debug)]
pub struct ProcStatus {
    pub threads: u64,
    pub uid: u32,
}

/// Number of open descriptors, counted as entries of `/proc/<pid>/fd`.
pub fn open_fd_count(pid: u32) -> Option<u64> {
    let entries = fs::read_dir(format!("/proc/{pid}/fd")).ok()?;
    Some(entries.count() as u64)
}

/// Parses the soft columns of `Max open files` and `Max processes`.
///
/// Limit names contain spaces, so each line is matched by prefix and the
/// soft value is the first whitespace-separated token after it. The
/// literal `unlimited` maps to [`Ceiling::Unlimited`].
pub fn process_limits(pid: u32) -> Option<ProcLimits> {
    let contents = fs::read_to_string(format!("/proc/{pid}/limits")).ok()?;
    let mut open_files = None;
    let mut processes = None;
    for line in contents.lines() {
        if let Some(rest) = line.strip_prefix("Max open files") {
            open_files = parse_soft_limit(rest);
        } else if let Some(rest) = line.strip_prefix("Max processes") {
            processes = parse_soft_limit(rest);
        }
    }
    Some(ProcLimits {
        open_files: open_files?,
        processes: processes?,
    })
}

fn parse_soft_limit(rest: &str) -> Option<Ceiling> {
    let soft = rest.split_whitespace().next()?;
    if soft == "unlimited" {
        Some(Ceiling::Unlimited)
    } else {
        soft.parse().ok().map(Ceiling::Limited)
    }
}

/// Thread count and real uid from `/proc/<pid>/status`.
pub fn process_status(pid: u32) -> Option<ProcStatus> {
    let contents = fs::read_to_string(format!("/proc/{pid}/status")).ok()?;
    let mut threads = None;
    let mut uid = None;
    for line in contents.lines() {
        if let Some(rest) = line.strip_prefix("Threads:") {
            threads = rest.split_whitespace().next()?.parse().ok();
        } else if let Some(rest) = line.strip_prefix("Uid:") {
            // Real uid is the first of the four uid columns.
            uid = rest.split_whitespace().next()?.parse().ok();
        }
    }
    Some(ProcStatus {
        threads: threads?,
        uid: uid?,
    })
}

/// Reads a single-value `/proc/sys` ceiling file.
pub fn read_sys_ceiling(path: &'static str) -> Result<u64, SnapshotError> {
    let contents =
        fs::read_to_string(path).map_err(|source| SnapshotError::SystemCeiling { path, source })?;
    contents
        .trim()
        .parse()
        .map_err(|_| SnapshotError::SystemCeilingParse {
            path,
            contents: contents.trim().to_string(),
        })
}

/// Reads `/proc/sys/fs/file-nr`: `(allocated handles, system maximum)`.
/// The file holds three fields; the second (allocated-but-unused) is not
/// needed here.
pub fn read_file_nr() -> Result<(u64, u64), SnapshotError> {
    let path = FILE_NR;
    let contents =
        fs::read_to_string(path).map_err(|source| SnapshotError::SystemCeiling { path, source })?;
    let mut fields = contents.split_whitespace();
    let allocated = fields.next().and_then(|f| f.parse().ok());
    let max = fields.nth(1).and_then(|f| f.parse().ok());
    match (allocated, max) {
        (Some(allocated), Some(max)) => Ok((allocated, max)),
        _ => Err(SnapshotError::SystemCeilingParse {
            path,
            contents: contents.trim().to_string(),
        }),
    }
}
