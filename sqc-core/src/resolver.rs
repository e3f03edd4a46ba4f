//! Overlap resolver — merges per-rule signal lists into a single flat label
//! sequence under the priority-plus-overlap resolution policy.
//!
//! Lower `rule_id` dominates higher. Where a higher-priority signal
//! intersects a lower-priority one, the lower-priority signal is trimmed,
//! split, or dropped depending on how much of it survives the overlap.

use crate::error::CoreError;
use crate::rule::Rule;
use crate::signal::Signal;

fn window_for(catalog: &[Rule], rule_id: i32) -> Result<usize, CoreError> {
    catalog
        .iter()
        .find(|r| r.id == rule_id)
        .map(|r| r.window)
        .ok_or_else(|| {
            CoreError::InvariantViolation(format!(
                "signal references rule id {rule_id} not present in catalog"
            ))
        })
}

/// Merge the concatenation of per-rule signal lists (submission order must
/// match catalog priority order, i.e. ascending `rule_id`) into a label
/// vector of length `n`.
pub fn resolve(signals: Vec<Signal>, catalog: &[Rule], n: usize) -> Result<Vec<i32>, CoreError> {
    for s in &signals {
        if s.start >= s.end || s.end > n {
            return Err(CoreError::InvariantViolation(format!(
                "signal {{rule_id: {}, start: {}, end: {}}} violates start < end <= {n}",
                s.rule_id, s.start, s.end
            )));
        }
    }

    let mut signals = signals;
    let mut dropped = vec![false; signals.len()];

    let mut hi_idx = 0;
    while hi_idx < signals.len() {
        if dropped[hi_idx] {
            hi_idx += 1;
            continue;
        }

        let mut lo_idx = 0;
        while lo_idx < signals.len() {
            if lo_idx == hi_idx || dropped[lo_idx] {
                lo_idx += 1;
                continue;
            }

            let s_hi = signals[hi_idx];
            let s_lo = signals[lo_idx];
            if s_hi.rule_id >= s_lo.rule_id {
                lo_idx += 1;
                continue;
            }

            let overlap_start = s_hi.start.max(s_lo.start);
            let overlap_end = s_hi.end.min(s_lo.end);
            if overlap_start >= overlap_end {
                lo_idx += 1;
                continue;
            }

            let min_len = window_for(catalog, s_lo.rule_id)?;
            let overlaps_start = s_lo.contains(s_hi.end - 1);
            let overlaps_end = s_lo.contains(s_hi.start);
            let shortenable_front =
                overlaps_start && s_lo.end.saturating_sub(s_hi.end) >= min_len;
            let shortenable_back =
                overlaps_end && s_hi.start.saturating_sub(s_lo.start) >= min_len;

            let mut handled = false;
            if shortenable_front && shortenable_back {
                let front_len = s_hi.start - s_lo.start;
                let back_len = s_lo.end - s_hi.end;
                if front_len >= min_len && back_len >= min_len {
                    dropped[lo_idx] = true;
                    let front = Signal::new(s_lo.rule_id, s_lo.start, s_hi.start, s_lo.positive);
                    let back = Signal::new(s_lo.rule_id, s_hi.end, s_lo.end, s_lo.positive);
                    signals.push(front);
                    dropped.push(false);
                    signals.push(back);
                    dropped.push(false);
                    handled = true;
                }
            }

            if !handled {
                if shortenable_back {
                    signals[lo_idx].end = s_hi.start;
                } else if shortenable_front {
                    signals[lo_idx].start = s_hi.end;
                } else {
                    dropped[lo_idx] = true;
                }
            }

            lo_idx += 1;
        }

        hi_idx += 1;
    }

    let mut labels = vec![0; n];
    for (idx, s) in signals.iter().enumerate() {
        if dropped[idx] {
            continue;
        }
        for label in &mut labels[s.start..s.end] {
            *label = s.rule_id;
        }
    }
    Ok(labels)
}
