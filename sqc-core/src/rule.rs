//! Rule specification — the closed set of run-rule behaviors.
//!
//! A `Rule` is a plain record of window sizes plus three function pointers,
//! not a trait object. The rule set is fixed (four built-ins); a caller who
//! needs a fifth can build one by hand with the same shape and append it to
//! the catalog slice. This avoids vtable dispatch for a closed polymorphism
//! problem — see DESIGN.md for why a trait hierarchy was rejected.

/// `detect(window, mean, stdev)` — true iff `window` (length `Rule::window`)
/// constitutes a first detection.
pub type DetectFn = fn(window: &[f64], mean: f64, stdev: f64) -> bool;

/// `is_continued(trailing, positive, signal_len, mean, stdev)` — true iff the
/// next sample extends an active signal. `trailing` has length
/// `Rule::continuation_window + 1`: the `continuation_window` samples
/// preceding the candidate, followed by the candidate itself. `signal_len`
/// is the active signal's length *before* this extension is applied.
pub type ContinueFn =
    fn(trailing: &[f64], positive: bool, signal_len: usize, mean: f64, stdev: f64) -> bool;

/// `orientation(window, mean, stdev)` — assigns the positive/negative tag
/// when a signal is first opened. `window` has length `Rule::orientation_window`
/// and is drawn from the start of the just-detected window.
pub type OrientationFn = fn(window: &[f64], mean: f64, stdev: f64) -> bool;

/// A single run-rule: window sizes plus the three predicates that define it.
#[derive(Clone, Copy)]
pub struct Rule {
    /// Unique within a catalog. Lower id is higher priority.
    pub id: i32,
    pub name: &'static str,
    /// Minimum number of consecutive samples required to assert a first detection.
    pub window: usize,
    /// Trailing samples (excluding the candidate) fed to `is_continued`.
    pub continuation_window: usize,
    /// Samples fed to `orientation` when a signal is first opened.
    pub orientation_window: usize,
    pub detect: DetectFn,
    pub is_continued: ContinueFn,
    pub orientation: OrientationFn,
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("window", &self.window)
            .field("continuation_window", &self.continuation_window)
            .field("orientation_window", &self.orientation_window)
            .finish_non_exhaustive()
    }
}

// ── Rule 1: point beyond action limit ───────────────────────────────

fn rule1_detect(w: &[f64], mean: f64, stdev: f64) -> bool {
    let x = w[0];
    x <= mean - 3.0 * stdev || x >= mean + 3.0 * stdev
}

fn rule1_continue(_trailing: &[f64], _positive: bool, _signal_len: usize, _mean: f64, _stdev: f64) -> bool {
    false
}

fn rule1_orientation(w: &[f64], mean: f64, _stdev: f64) -> bool {
    w[0] > mean
}

/// Rule 1 — a single sample at or beyond the three-sigma action limit.
pub const RULE_1_POINT_BEYOND_LIMIT: Rule = Rule {
    id: 1,
    name: "point beyond action limit",
    window: 1,
    continuation_window: 0,
    orientation_window: 1,
    detect: rule1_detect,
    is_continued: rule1_continue,
    orientation: rule1_orientation,
};

// ── Rule 2: run on one side of the mean ─────────────────────────────

fn rule2_detect(w: &[f64], mean: f64, _stdev: f64) -> bool {
    w.iter().all(|&x| x > mean) || w.iter().all(|&x| x < mean)
}

fn rule2_continue(trailing: &[f64], positive: bool, _signal_len: usize, mean: f64, _stdev: f64) -> bool {
    let x = trailing[trailing.len() - 1];
    (positive && x > mean) || (!positive && x < mean)
}

fn rule2_orientation(w: &[f64], mean: f64, _stdev: f64) -> bool {
    w[0] > mean
}

/// Rule 2 — eight or more consecutive samples strictly on one side of the mean.
pub const RULE_2_RUN_ONE_SIDE: Rule = Rule {
    id: 2,
    name: "run on one side of the mean",
    window: 8,
    continuation_window: 1,
    orientation_window: 1,
    detect: rule2_detect,
    is_continued: rule2_continue,
    orientation: rule2_orientation,
};

// ── Rule 3: monotonic run ───────────────────────────────────────────

fn rule3_detect(w: &[f64], _mean: f64, _stdev: f64) -> bool {
    let increasing = w.windows(2).all(|p| p[0] < p[1]);
    let decreasing = w.windows(2).all(|p| p[0] > p[1]);
    increasing || decreasing
}

fn rule3_continue(trailing: &[f64], positive: bool, _signal_len: usize, _mean: f64, _stdev: f64) -> bool {
    let prev = trailing[0];
    let x = trailing[1];
    (positive && x > prev) || (!positive && x < prev)
}

fn rule3_orientation(w: &[f64], _mean: f64, _stdev: f64) -> bool {
    w[0] < w[w.len() - 1]
}

/// Rule 3 — six or more consecutive samples strictly increasing or decreasing.
pub const RULE_3_MONOTONIC_RUN: Rule = Rule {
    id: 3,
    name: "monotonic run",
    window: 6,
    continuation_window: 1,
    orientation_window: 2,
    detect: rule3_detect,
    is_continued: rule3_continue,
    orientation: rule3_orientation,
};

// ── Rule 4: alternating oscillation ─────────────────────────────────

fn rule4_detect(w: &[f64], _mean: f64, _stdev: f64) -> bool {
    w.windows(3).all(|t| {
        let (a, b, c) = (t[0], t[1], t[2]);
        (a - b).signum() * (b - c).signum() == -1.0
    })
}

fn rule4_continue(trailing: &[f64], positive: bool, signal_len: usize, _mean: f64, _stdev: f64) -> bool {
    let prev = trailing[0];
    let x = trailing[1];
    let rising = prev < x;
    let falling = prev > x;
    if signal_len % 2 == 0 {
        (positive && rising) || (!positive && falling)
    } else {
        (positive && falling) || (!positive && rising)
    }
}

fn rule4_orientation(w: &[f64], _mean: f64, _stdev: f64) -> bool {
    w[0] < w[1]
}

/// Rule 4 — fourteen or more consecutive samples strictly alternating direction.
pub const RULE_4_ALTERNATING: Rule = Rule {
    id: 4,
    name: "alternating oscillation",
    window: 14,
    continuation_window: 1,
    orientation_window: 2,
    detect: rule4_detect,
    is_continued: rule4_continue,
    orientation: rule4_orientation,
};

/// The four built-in rules in ascending-id (= priority) order.
///
/// Callers needing a fifth rule can build one by hand with the same shape
/// and append it to a catalog slice of their own; the catalog is just
/// `&[Rule]`, not a closed registry.
pub fn default_catalog() -> Vec<Rule> {
    vec![
        RULE_1_POINT_BEYOND_LIMIT,
        RULE_2_RUN_ONE_SIDE,
        RULE_3_MONOTONIC_RUN,
        RULE_4_ALTERNATING,
    ]
}
