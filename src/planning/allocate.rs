use crate::foundation::error::{MontageError, MontageResult};

/// Distribute `available_sec` across clips in proportion to their source
/// durations, with no clip shorter than `min_clip_sec`.
///
/// 1. `raw[i] = max(source[i] / total * available, min)`.
/// 2. If `Σraw` misses the budget, rescale everything by `available / Σraw`
///    and re-apply the floor.
/// 3. Any residual left after the rescale goes to the first entry only.
///
/// Step 3 is an approximation: it can leave the first entry below the floor.
/// It is skipped when it would leave the first entry shorter than
/// `min_first_sec` (the planner passes one output frame). That only happens
/// when the floor alone overshoots the budget (many clips, short narration);
/// the first entry then keeps its floored value and the total exceeds the
/// budget.
///
/// `epsilon_sec` is the tolerance for "sum equals budget".
pub fn allocate_durations(
    source_durations: &[f64],
    available_sec: f64,
    min_clip_sec: f64,
    min_first_sec: f64,
    epsilon_sec: f64,
) -> MontageResult<Vec<f64>> {
    if !available_sec.is_finite() || available_sec <= 0.0 {
        return Err(MontageError::validation(format!(
            "available time must be finite and > 0 (got {available_sec})"
        )));
    }
    if !min_clip_sec.is_finite() || min_clip_sec <= 0.0 {
        return Err(MontageError::validation(format!(
            "minimum clip duration must be finite and > 0 (got {min_clip_sec})"
        )));
    }
    if let Some((i, d)) = source_durations
        .iter()
        .enumerate()
        .find(|(_, d)| !d.is_finite() || **d <= 0.0)
    {
        return Err(MontageError::validation(format!(
            "source duration #{i} must be finite and > 0 (got {d})"
        )));
    }
    if source_durations.is_empty() {
        return Ok(Vec::new());
    }

    let total_source: f64 = source_durations.iter().sum();
    let mut out: Vec<f64> = source_durations
        .iter()
        .map(|d| (d / total_source * available_sec).max(min_clip_sec))
        .collect();

    let raw_sum: f64 = out.iter().sum();
    if (raw_sum - available_sec).abs() <= epsilon_sec {
        return Ok(out);
    }

    let scale = available_sec / raw_sum;
    for d in &mut out {
        *d = (*d * scale).max(min_clip_sec);
    }

    let residual = available_sec - out.iter().sum::<f64>();
    if residual.abs() > epsilon_sec {
        let first = out[0] + residual;
        if first >= min_first_sec && first > 0.0 {
            out[0] = first;
        } else {
            tracing::warn!(
                clips = out.len(),
                available_sec,
                min_clip_sec,
                overshoot_sec = -residual,
                "minimum clip floor exceeds the time budget; total runs long"
            );
        }
    }

    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/planning/allocate.rs"]
mod tests;
