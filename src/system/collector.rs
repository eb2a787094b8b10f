use std::collections::HashMap;

use sysinfo::{ProcessRefreshKind, ProcessesToUpdate, System};
use tracing::debug;

use crate::pressure::Ceiling;

use super::SnapshotError;
use super::linux;
use super::snapshot::{ProcessSample, Snapshot, SystemCeilings};

/// Builds one [`Snapshot`] per call: enumerates processes through sysinfo,
/// reads usage and limits from `/proc`, then freezes the per-uid thread
/// aggregate before anything is evaluated.
pub struct Collector {
    sys: System,
}

impl Default for Collector {
    fn default() -> Self {
        Self::new()
    }
}

impl Collector {
    pub fn new() -> Self {
        let mut sys = System::new();
        sys.refresh_processes_specifics(
            ProcessesToUpdate::All,
            true,
            ProcessRefreshKind::nothing(),
        );
        Collector { sys }
    }

    pub fn collect(&mut self) -> Result<Snapshot, SnapshotError> {
        self.sys.refresh_processes_specifics(
            ProcessesToUpdate::All,
            true,
            ProcessRefreshKind::nothing(),
        );

        // System ceilings first: if these fail nothing else is worth reading.
        let threads_max = Ceiling::from_raw(linux::read_sys_ceiling(linux::THREADS_MAX)?);
        let pid_max = Ceiling::from_raw(linux::read_sys_ceiling(linux::PID_MAX)?);
        let file_per_proc_max = Ceiling::from_raw(linux::read_sys_ceiling(linux::NR_OPEN)?);
        let (files_total, file_max_raw) = linux::read_file_nr()?;
        let file_max = Ceiling::from_raw(file_max_raw);

        let mut processes = Vec::with_capacity(self.sys.processes().len());
        for (pid, process) in self.sys.processes() {
            let pid = pid.as_u32();
            // A process can exit between enumeration and these reads; that
            // is expected, and the whole process is skipped rather than
            // half-reported.
            let (Some(open_fds), Some(limits), Some(status)) = (
                linux::open_fd_count(pid),
                linux::process_limits(pid),
                linux::process_status(pid),
            ) else {
                debug!(pid, "process vanished or is unreadable, skipping");
                continue;
            };

            processes.push(ProcessSample {
                pid,
                name: process.name().to_string_lossy().to_string(),
                uid: status.uid,
                open_fds,
                fd_soft_limit: limits.open_files,
                nproc_soft_limit: limits.processes,
                threads: status.threads,
                user_threads: 0,
            });
        }

        // Pre-pass over the finished sample list: per-uid thread totals are
        // complete before any sample carries them.
        let mut threads_by_uid: HashMap<u32, u64> = HashMap::new();
        let mut threads_total = 0u64;
        for proc in &processes {
            *threads_by_uid.entry(proc.uid).or_default() += proc.threads;
            threads_total += proc.threads;
        }
        for proc in &mut processes {
            proc.user_threads = threads_by_uid[&proc.uid];
        }

        debug!(
            sampled = processes.len(),
            threads_total, files_total, "snapshot complete"
        );

        Ok(Snapshot {
            system: SystemCeilings {
                threads_total,
                threads_max,
                pid_max,
                files_total,
                file_max,
                file_per_proc_max,
            },
            processes,
        })
    }
}
