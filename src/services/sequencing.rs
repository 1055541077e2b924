//! Route sequencing engine
//!
//! Exhaustive search over stop orderings. For every candidate order the
//! engine derives the latest base departure that still honors each fixed
//! start time, re-simulates the run from that departure, and keeps the
//! feasible order with the least total driving time.
//!
//! Complexity is O(n!·n); callers bound n before searching (see
//! `Config::max_sequenced_stops`). Permutations are generated lazily, one
//! at a time, so memory stays O(n) regardless of the stop count.

use tracing::debug;

use crate::services::matrix::TravelTimeMatrix;
use crate::types::Stop;

/// Tolerance when comparing simulated arrival against a fixed start time.
const FEASIBILITY_EPSILON_MINUTES: f64 = 1e-6;

/// Winning order of one search
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceSolution {
    /// Indices into the original stops slice, in visiting order
    pub order: Vec<usize>,
    /// Base departure, minutes since midnight
    pub base_offset_minutes: f64,
    /// Total driving minutes for the full cycle. This is the cost: service
    /// time and idle time at the base are excluded.
    pub driving_minutes: f64,
}

/// Search every permutation of `stops` for the cheapest feasible order.
///
/// Matrix node k+1 corresponds to stop k; node 0 is the base. Returns
/// `None` when no order admits a departure satisfying every fixed start
/// time, or when every order crosses an unreachable leg. Equal-cost orders
/// keep whichever was enumerated first; the enumeration follows the
/// caller's stop order, so callers must not rely on which tied order wins.
pub fn find_best_order(stops: &[Stop], matrix: &TravelTimeMatrix) -> Option<SequenceSolution> {
    debug_assert_eq!(matrix.size(), stops.len() + 1);

    let mut best: Option<SequenceSolution> = None;
    let mut evaluated = 0usize;

    for order in Permutations::new(stops.len()) {
        evaluated += 1;
        let Some(candidate) = evaluate_order(stops, matrix, &order) else {
            continue;
        };
        let improves = match &best {
            Some(current) => candidate.driving_minutes < current.driving_minutes,
            None => true,
        };
        if improves {
            best = Some(candidate);
        }
    }

    debug!(
        permutations = evaluated,
        feasible = best.is_some(),
        "sequencing search finished"
    );
    best
}

/// Evaluate one candidate order: derive its base departure, re-simulate,
/// and cost it. `None` means the order is infeasible.
fn evaluate_order(
    stops: &[Stop],
    matrix: &TravelTimeMatrix,
    order: &[usize],
) -> Option<SequenceSolution> {
    // First pass: walk the order from a hypothetical midnight departure with
    // no waiting. Each fixed-time stop caps how late the base departure can
    // be; the tightest cap wins. Departing earlier than the cap only adds
    // idle time at the base, never a violation.
    let mut base_offset: Option<f64> = None;
    let mut elapsed = 0.0;
    let mut prev_node = 0usize;

    for &stop_idx in order {
        let node = stop_idx + 1;
        let leg = matrix.duration(prev_node, node);
        if !leg.is_finite() {
            return None;
        }
        elapsed += leg;
        if let Some(fixed) = stops[stop_idx].fixed_start_minutes() {
            let cap = fixed as f64 - elapsed;
            base_offset = Some(match base_offset {
                Some(current) => current.min(cap),
                None => cap,
            });
        }
        elapsed += stops[stop_idx].service_minutes as f64;
        prev_node = node;
    }

    let closing_leg = matrix.duration(prev_node, 0);
    if !closing_leg.is_finite() {
        return None;
    }

    let base_offset = base_offset.unwrap_or(0.0);

    // Second pass: re-simulate from the chosen departure. A fixed-time stop
    // begins at its fixed start, so arriving early means waiting there;
    // arriving late invalidates the whole order. The caps above ignore
    // waiting, which makes this the authoritative feasibility check: a
    // wait pinned at one fixed stop can push a later fixed stop past its
    // start no matter how early the traveler leaves the base.
    let mut clock = base_offset;
    let mut driving = 0.0;
    prev_node = 0;

    for &stop_idx in order {
        let node = stop_idx + 1;
        let leg = matrix.duration(prev_node, node);
        clock += leg;
        driving += leg;
        if let Some(fixed) = stops[stop_idx].fixed_start_minutes() {
            if clock > fixed as f64 + FEASIBILITY_EPSILON_MINUTES {
                return None;
            }
            // Wait time never enters the cost, only the clock.
            clock = clock.max(fixed as f64);
        }
        clock += stops[stop_idx].service_minutes as f64;
        prev_node = node;
    }

    driving += closing_leg;

    Some(SequenceSolution {
        order: order.to_vec(),
        base_offset_minutes: base_offset,
        driving_minutes: driving,
    })
}

/// Lazy permutation generator over 0..n (iterative Heap's algorithm).
/// Yields each ordering exactly once without materializing all n! of them.
struct Permutations {
    items: Vec<usize>,
    counters: Vec<usize>,
    depth: usize,
    started: bool,
}

impl Permutations {
    fn new(n: usize) -> Self {
        Self {
            items: (0..n).collect(),
            counters: vec![0; n],
            depth: 0,
            started: false,
        }
    }
}

impl Iterator for Permutations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        if !self.started {
            self.started = true;
            return Some(self.items.clone());
        }

        while self.depth < self.items.len() {
            if self.counters[self.depth] < self.depth {
                if self.depth % 2 == 0 {
                    self.items.swap(0, self.depth);
                } else {
                    self.items.swap(self.counters[self.depth], self.depth);
                }
                self.counters[self.depth] += 1;
                self.depth = 0;
                return Some(self.items.clone());
            }
            self.counters[self.depth] = 0;
            self.depth += 1;
        }

        None
    }
}
