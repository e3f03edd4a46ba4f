//! Per-rule scanner — walks a series under one rule, emitting a list of
//! non-overlapping [`Signal`]s in increasing `start` order.
//!
//! This is a plain `Idle`/`Active` state machine, not an iterator adapter:
//! the continuation check needs a variable-length trailing slice that
//! depends on the rule, which does not map cleanly onto `windows()`.

use crate::rule::Rule;
use crate::signal::Signal;

enum State {
    Idle,
    Active { start: usize, end: usize, positive: bool },
}

/// Scan `series` under a single `rule`, returning its signals in increasing
/// `start` order. Does not validate `mean`/`stdev`; callers (`analyze`)
/// are expected to have already rejected non-finite or non-positive stats.
pub fn scan_one(series: &[f64], rule: &Rule, mean: f64, stdev: f64) -> Vec<Signal> {
    let n = series.len();
    let mut signals = Vec::new();
    let mut state = State::Idle;
    let mut i = 0;

    while i < n {
        match state {
            State::Idle => {
                if i + rule.window > n {
                    break;
                }
                if (rule.detect)(&series[i..i + rule.window], mean, stdev) {
                    let positive =
                        (rule.orientation)(&series[i..i + rule.orientation_window], mean, stdev);
                    state = State::Active {
                        start: i,
                        end: i + rule.window,
                        positive,
                    };
                    i += rule.window;
                } else {
                    i += 1;
                }
            }
            State::Active { start, end, positive } => {
                debug_assert_eq!(i, end);
                let continues = if rule.continuation_window == 0 {
                    false
                } else {
                    let lo = i - rule.continuation_window;
                    let trailing = &series[lo..=i];
                    let signal_len = end - start;
                    (rule.is_continued)(trailing, positive, signal_len, mean, stdev)
                };

                if continues {
                    state = State::Active {
                        start,
                        end: end + 1,
                        positive,
                    };
                    i += 1;
                } else {
                    signals.push(Signal::new(rule.id, start, end, positive));
                    state = State::Idle;
                    // re-examine index i from Idle; do not advance here
                }
            }
        }
    }

    if let State::Active { start, end, positive } = state {
        signals.push(Signal::new(rule.id, start, end, positive));
    }

    signals
}
