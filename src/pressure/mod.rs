mod metric;
mod rank;

pub use metric::{
    BindingConstraint, Ceiling, EvalError, NamedMetric, ProcessReport, ResourceSample,
    compute_percentage, evaluate_process, resolve_effective_ceiling, select_binding,
};
pub use rank::rank;

use crate::system::snapshot::Snapshot;

/// Metric labels, in the order they are considered. The order matters: it
/// is the tie-break for [`select_binding`].
pub const METRIC_FDS: &str = "fds-rlim";
pub const METRIC_NPROC: &str = "nproc-rlim";
pub const METRIC_THREADS_SYS: &str = "threads-max";
pub const METRIC_FILES_SYS: &str = "file-max";

/// Evaluates every sampled process against the four candidate constraints:
/// own open files vs the tighter of its soft rlimit and the kernel
/// per-process maximum, the owning user's thread total vs the nproc
/// rlimit, and the two system-wide totals vs their ceilings.
pub fn evaluate_snapshot(snapshot: &Snapshot) -> Result<Vec<ProcessReport>, EvalError> {
    let sys = &snapshot.system;
    let threads_ceiling = resolve_effective_ceiling([sys.threads_max, sys.pid_max]);

    let mut reports = Vec::with_capacity(snapshot.processes.len());
    for proc in &snapshot.processes {
        let fd_ceiling =
            resolve_effective_ceiling([proc.fd_soft_limit, sys.file_per_proc_max]);
        let metrics = vec![
            NamedMetric::new(METRIC_FDS, proc.open_fds, fd_ceiling),
            NamedMetric::new(METRIC_NPROC, proc.user_threads, proc.nproc_soft_limit),
            NamedMetric::new(METRIC_THREADS_SYS, sys.threads_total, threads_ceiling),
            NamedMetric::new(METRIC_FILES_SYS, sys.files_total, sys.file_max),
        ];
        reports.push(evaluate_process(proc.pid, proc.name.clone(), metrics)?);
    }
    Ok(reports)
}
