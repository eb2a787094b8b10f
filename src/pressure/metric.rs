use thiserror::Error;

/// A kernel-enforced ceiling on a countable resource.
///
/// Raw readings are converted at the collector boundary: `u64::MAX` from an
/// rlimit syscall or the literal `unlimited` in `/proc/<pid>/limits` both
/// become [`Ceiling::Unlimited`]. A failed read is never represented here;
/// the collector skips the process or aborts instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ceiling {
    Limited(u64),
    Unlimited,
}

impl Ceiling {
    pub fn from_raw(raw: u64) -> Self {
        if raw == u64::MAX {
            Ceiling::Unlimited
        } else {
            Ceiling::Limited(raw)
        }
    }

    pub fn is_unlimited(self) -> bool {
        matches!(self, Ceiling::Unlimited)
    }

    /// Minimum of two ceilings, where `Unlimited` never wins against a
    /// concrete bound.
    pub fn tighter(self, other: Ceiling) -> Ceiling {
        match (self, other) {
            (Ceiling::Unlimited, c) | (c, Ceiling::Unlimited) => c,
            (Ceiling::Limited(a), Ceiling::Limited(b)) => Ceiling::Limited(a.min(b)),
        }
    }
}

/// One usage/ceiling observation, both sides in the same unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResourceSample {
    pub value: u64,
    pub ceiling: Ceiling,
}

impl ResourceSample {
    pub fn new(value: u64, ceiling: Ceiling) -> Self {
        ResourceSample { value, ceiling }
    }
}

/// A sample tagged with the constraint it represents. Insertion order of a
/// process's metric list decides ties in [`select_binding`], nothing else.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NamedMetric {
    pub name: &'static str,
    pub sample: ResourceSample,
}

impl NamedMetric {
    pub fn new(name: &'static str, value: u64, ceiling: Ceiling) -> Self {
        NamedMetric {
            name,
            sample: ResourceSample::new(value, ceiling),
        }
    }
}

/// The single most-pressing constraint for one process.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BindingConstraint {
    pub name: &'static str,
    pub value: u64,
    pub ceiling: Ceiling,
    pub percent: f64,
}

/// One process's full evaluation result. Immutable once built.
#[derive(Clone, Debug)]
pub struct ProcessReport {
    pub pid: u32,
    pub name: String,
    pub metrics: Vec<NamedMetric>,
    pub binding: BindingConstraint,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EvalError {
    #[error("cannot select a binding constraint from an empty metric list")]
    NoMetrics,
}

/// Usage as a fraction of its ceiling, scaled to 100.
///
/// An unlimited ceiling exerts no pressure. A zero ceiling with zero usage
/// is also zero pressure; a zero ceiling with any usage is already
/// exhausted and reports 100. No upper clamp: stale reads can push a value
/// past its ceiling and the ranking must still see that.
pub fn compute_percentage(sample: &ResourceSample) -> f64 {
    match sample.ceiling {
        Ceiling::Unlimited => 0.0,
        Ceiling::Limited(0) => {
            if sample.value == 0 {
                0.0
            } else {
                100.0
            }
        }
        Ceiling::Limited(max) => 100.0 * sample.value as f64 / max as f64,
    }
}

/// Collapses every ceiling that bounds the same counter into the one that
/// is reached first. `Unlimited` only survives when every input is
/// `Unlimited`; callers must pass all ceilings covering the resource.
pub fn resolve_effective_ceiling<I>(ceilings: I) -> Ceiling
where
    I: IntoIterator<Item = Ceiling>,
{
    ceilings
        .into_iter()
        .fold(Ceiling::Unlimited, Ceiling::tighter)
}

/// Picks the metric with the highest pressure. Strict `>` comparison: on
/// equal percentages the first metric in input order wins, which keeps the
/// result deterministic for a fixed metric list.
pub fn select_binding(metrics: &[NamedMetric]) -> Result<BindingConstraint, EvalError> {
    let (first, rest) = metrics.split_first().ok_or(EvalError::NoMetrics)?;

    let mut binding = BindingConstraint {
        name: first.name,
        value: first.sample.value,
        ceiling: first.sample.ceiling,
        percent: compute_percentage(&first.sample),
    };
    for metric in rest {
        let percent = compute_percentage(&metric.sample);
        if percent > binding.percent {
            binding = BindingConstraint {
                name: metric.name,
                value: metric.sample.value,
                ceiling: metric.sample.ceiling,
                percent,
            };
        }
    }
    Ok(binding)
}

/// Pure composition: percentage every metric, select the binding one, wrap
/// the lot into a report.
pub fn evaluate_process(
    pid: u32,
    name: String,
    metrics: Vec<NamedMetric>,
) -> Result<ProcessReport, EvalError> {
    let binding = select_binding(&metrics)?;
    Ok(ProcessReport {
        pid,
        name,
        metrics,
        binding,
    })
}
