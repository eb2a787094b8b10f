use crate::pressure::Ceiling;

/// System-wide totals and ceilings, read once per scan.
#[derive(Clone, Copy, Debug)]
pub struct SystemCeilings {
    /// Sum of thread counts over every sampled process.
    pub threads_total: u64,
    /// `/proc/sys/kernel/threads-max`
    pub threads_max: Ceiling,
    /// `/proc/sys/kernel/pid_max` — thread ids come from the same space.
    pub pid_max: Ceiling,
    /// Allocated file handles, first field of `/proc/sys/fs/file-nr`.
    pub files_total: u64,
    /// Third field of `/proc/sys/fs/file-nr`.
    pub file_max: Ceiling,
    /// `/proc/sys/fs/nr_open` — per-process descriptor maximum.
    pub file_per_proc_max: Ceiling,
}

/// One process's readings, taken in a single pass over `/proc/<pid>/`.
/// `user_threads` comes from the per-uid aggregate built after the pass
/// completes, so it never reflects a partially scanned user.
#[derive(Clone, Debug)]
pub struct ProcessSample {
    pub pid: u32,
    pub name: String,
    pub uid: u32,
    pub open_fds: u64,
    pub fd_soft_limit: Ceiling,
    pub nproc_soft_limit: Ceiling,
    pub threads: u64,
    pub user_threads: u64,
}

/// Everything the evaluator needs, frozen at one point in time.
#[derive(Clone, Debug)]
pub struct Snapshot {
    pub system: SystemCeilings,
    pub processes: Vec<ProcessSample>,
}
