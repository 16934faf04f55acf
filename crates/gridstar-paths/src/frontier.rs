//! The open set.
//!
//! An ordered list of node indices. Each pop stable-sorts the list by F and
//! takes the head, so among equal F the cell that sat earlier in the list
//! after the previous pop wins; cells discovered since then follow in
//! discovery order. An improved member keeps its place in the list.

use crate::node::Node;

#[derive(Debug, Default)]
pub(crate) struct Frontier {
    open: Vec<usize>,
}

impl Frontier {
    pub(crate) fn clear(&mut self) {
        self.open.clear();
    }

    /// Number of cells currently in the frontier.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.open.len()
    }

    /// Append a cell that is not yet a member.
    pub(crate) fn insert(&mut self, idx: usize, node: &mut Node) {
        debug_assert!(!node.in_frontier);
        node.in_frontier = true;
        self.open.push(idx);
    }

    /// Remove and return the first member with the lowest F.
    pub(crate) fn pop(&mut self, nodes: &mut [Node]) -> Option<usize> {
        if self.open.is_empty() {
            return None;
        }
        // The list is nearly sorted from the previous pop, which the stable
        // sort handles in close to linear time.
        self.open.sort_by(|&a, &b| nodes[a].f.total_cmp(&nodes[b].f));
        let idx = self.open.remove(0);
        nodes[idx].in_frontier = false;
        Some(idx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nodes_with_f(fs: &[f64]) -> Vec<Node> {
        fs.iter()
            .map(|&f| Node {
                f,
                ..Node::default()
            })
            .collect()
    }

    #[test]
    fn pops_lowest_f() {
        let mut nodes = nodes_with_f(&[5.0, 1.0, 3.0]);
        let mut fr = Frontier::default();
        for i in 0..3 {
            fr.insert(i, &mut nodes[i]);
        }
        assert_eq!(fr.len(), 3);
        assert_eq!(fr.pop(&mut nodes), Some(1));
        assert!(!nodes[1].in_frontier);
        assert_eq!(fr.pop(&mut nodes), Some(2));
        assert_eq!(fr.pop(&mut nodes), Some(0));
        assert_eq!(fr.pop(&mut nodes), None);
        assert_eq!(fr.len(), 0);
    }

    #[test]
    fn ties_go_to_first_inserted() {
        let mut nodes = nodes_with_f(&[2.0, 2.0, 2.0]);
        let mut fr = Frontier::default();
        for i in [2, 0, 1] {
            fr.insert(i, &mut nodes[i]);
        }
        assert_eq!(fr.pop(&mut nodes), Some(2));
        assert_eq!(fr.pop(&mut nodes), Some(0));
        assert_eq!(fr.pop(&mut nodes), Some(1));
    }

    #[test]
    fn improved_member_is_picked_up() {
        let mut nodes = nodes_with_f(&[4.0, 3.0]);
        let mut fr = Frontier::default();
        fr.insert(0, &mut nodes[0]);
        fr.insert(1, &mut nodes[1]);

        nodes[0].f = 1.0;
        assert_eq!(fr.len(), 2);
        assert_eq!(fr.pop(&mut nodes), Some(0));
        assert_eq!(fr.pop(&mut nodes), Some(1));
        assert_eq!(fr.pop(&mut nodes), None);
    }

    #[test]
    fn ties_follow_previous_sorted_order() {
        // After the first pop the list reads [1, 0] (F 4, 5). Node 0 then
        // drops to F 4: the stable sort keeps it behind node 1 even though
        // node 0 was inserted first.
        let mut nodes = nodes_with_f(&[5.0, 4.0, 1.0]);
        let mut fr = Frontier::default();
        for i in 0..3 {
            fr.insert(i, &mut nodes[i]);
        }
        assert_eq!(fr.pop(&mut nodes), Some(2));

        nodes[0].f = 4.0;
        assert_eq!(fr.pop(&mut nodes), Some(1));
        assert_eq!(fr.pop(&mut nodes), Some(0));
    }

    #[test]
    fn clear_resets() {
        let mut nodes = nodes_with_f(&[1.0]);
        let mut fr = Frontier::default();
        fr.insert(0, &mut nodes[0]);
        fr.clear();
        assert_eq!(fr.len(), 0);
        assert_eq!(fr.pop(&mut nodes), None);
    }
}
