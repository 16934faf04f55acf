use gridstar_core::Point;

/// Sentinel G for a cell not reached by the current search.
pub const UNREACHED: f64 = f64::INFINITY;

/// Sentinel parent index meaning "no predecessor".
pub(crate) const NO_PARENT: usize = usize::MAX;

/// Internal per-cell search record, indexed like the grid.
///
/// A record whose `generation` differs from the engine's current one belongs
/// to an earlier search and reads as fresh.
#[derive(Clone, Debug)]
pub(crate) struct Node {
    pub(crate) g: f64,
    pub(crate) h: f64,
    pub(crate) f: f64,
    pub(crate) parent: usize,
    pub(crate) generation: u32,
    pub(crate) visited: bool,
    pub(crate) in_frontier: bool,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            g: UNREACHED,
            h: 0.0,
            f: UNREACHED,
            parent: NO_PARENT,
            generation: 0,
            visited: false,
            in_frontier: false,
        }
    }
}

impl Node {
    /// Reset the record for `generation` if it belongs to an older search.
    #[inline]
    pub(crate) fn touch(&mut self, generation: u32) {
        if self.generation != generation {
            *self = Node {
                generation,
                ..Node::default()
            };
        }
    }
}

/// Read-only snapshot of one cell's search bookkeeping.
///
/// This is what a renderer needs to draw frontier, settled and unreached
/// cells without reaching into engine internals.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CellState {
    /// Cheapest known cost from the start; [`UNREACHED`] if never reached.
    pub g: f64,
    /// Heuristic estimate to the target, as last computed.
    pub h: f64,
    /// Priority score `h * weight + g`.
    pub f: f64,
    pub predecessor: Option<Point>,
    /// Settled: removed from the frontier, never expanded again.
    pub visited: bool,
    pub in_frontier: bool,
}

impl CellState {
    /// State of a cell the current search has not touched.
    pub const FRESH: Self = Self {
        g: UNREACHED,
        h: 0.0,
        f: UNREACHED,
        predecessor: None,
        visited: false,
        in_frontier: false,
    };

    #[inline]
    pub fn is_reached(&self) -> bool {
        self.g < UNREACHED
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_unreached() {
        let n = Node::default();
        assert_eq!(n.g, UNREACHED);
        assert_eq!(n.parent, NO_PARENT);
        assert!(!CellState::FRESH.is_reached());
    }

    #[test]
    fn touch_resets_stale_records_only() {
        let mut n = Node {
            g: 3.0,
            visited: true,
            generation: 1,
            ..Node::default()
        };
        n.touch(1);
        assert_eq!(n.g, 3.0);
        assert!(n.visited);

        n.touch(2);
        assert_eq!(n.g, UNREACHED);
        assert!(!n.visited);
        assert_eq!(n.generation, 2);
    }
}
