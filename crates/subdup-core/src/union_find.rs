//! Union-Find (disjoint set) structure backing connected-component discovery.
//!
//! Elements are `usize` ordinals in `[0, n)`. Path compression uses iterative
//! path-halving; union-by-rank keeps trees shallow, and equal-rank ties root
//! at the lower ordinal so the representative of a set never depends on the
//! order edges were processed.

/// Disjoint sets over `n` ordinals with path-halving and union-by-rank.
#[derive(Debug, Clone)]
pub struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl UnionFind {
    /// Creates `n` singleton sets.
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0u8; n],
        }
    }

    /// Returns the representative ordinal of the set containing `x`.
    pub fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            let grandparent = self.parent[self.parent[x]];
            self.parent[x] = grandparent;
            x = grandparent;
        }
        x
    }

    /// Merges the sets containing `a` and `b`.
    ///
    /// Returns `false` when the two were already in the same set. Equal-rank
    /// merges root at the lower ordinal.
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra == rb {
            return false;
        }

        match self.rank[ra].cmp(&self.rank[rb]) {
            std::cmp::Ordering::Less => self.parent[ra] = rb,
            std::cmp::Ordering::Greater => self.parent[rb] = ra,
            std::cmp::Ordering::Equal => {
                let (root, child) = if ra < rb { (ra, rb) } else { (rb, ra) };
                self.parent[child] = root;
                self.rank[root] += 1;
            }
        }
        true
    }

    /// Groups all ordinals into their sets.
    ///
    /// Sets are ordered by their lowest member ordinal, and members within a
    /// set ascend, so the grouping is fully deterministic.
    pub fn into_groups(mut self) -> Vec<Vec<usize>> {
        let n = self.parent.len();
        let mut slot_of_root: Vec<Option<usize>> = vec![None; n];
        let mut groups: Vec<Vec<usize>> = Vec::new();

        for x in 0..n {
            let root = self.find(x);
            let slot = match slot_of_root[root] {
                Some(slot) => slot,
                None => {
                    groups.push(Vec::new());
                    slot_of_root[root] = Some(groups.len() - 1);
                    groups.len() - 1
                }
            };
            groups[slot].push(x);
        }
        groups
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    /// Returns `true` when there are no elements.
    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn singletons_are_their_own_representatives() {
        let mut uf = UnionFind::new(4);
        for x in 0..4 {
            assert_eq!(uf.find(x), x);
        }
    }

    #[test]
    fn union_merges_and_reports_novelty() {
        let mut uf = UnionFind::new(4);
        assert!(uf.union(0, 1));
        assert!(uf.union(1, 2));
        assert!(!uf.union(0, 2));
        assert_eq!(uf.find(0), uf.find(2));
        assert_ne!(uf.find(0), uf.find(3));
    }

    #[test]
    fn representative_is_order_independent() {
        let mut a = UnionFind::new(3);
        a.union(0, 1);
        a.union(1, 2);

        let mut b = UnionFind::new(3);
        b.union(2, 1);
        b.union(1, 0);

        assert_eq!(a.find(2), b.find(2));
    }

    #[test]
    fn groups_are_ordered_by_lowest_member() {
        let mut uf = UnionFind::new(6);
        uf.union(4, 5);
        uf.union(1, 3);
        let groups = uf.into_groups();
        assert_eq!(groups, vec![vec![0], vec![1, 3], vec![2], vec![4, 5]]);
    }

    #[test]
    fn empty_structure_has_no_groups() {
        let uf = UnionFind::new(0);
        assert!(uf.is_empty());
        assert_eq!(uf.len(), 0);
        assert!(uf.into_groups().is_empty());
    }
}
