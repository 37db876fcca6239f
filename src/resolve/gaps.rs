use crate::resolve::record::{Gap, TrimRecord};

/// Sorts every gap list of every record by distance from the owning edge
/// line's start point, so a renderer can walk start → end alternating
/// draw / skip deterministically.
pub fn sort_all(trims: &mut [TrimRecord]) {
    for trim in trims {
        sort_gaps(&mut trim.left_edge_gaps);
        sort_gaps(&mut trim.right_edge_gaps);
        sort_gaps(&mut trim.left_finish_gaps);
        sort_gaps(&mut trim.right_finish_gaps);
    }
}

fn sort_gaps(gaps: &mut [Gap]) {
    gaps.sort_by(|a, b| a.t0.partial_cmp(&b.t0).unwrap_or(std::cmp::Ordering::Equal));
}
