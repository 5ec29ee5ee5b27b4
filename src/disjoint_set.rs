//! Union-find over cell indices, with union by size and path halving.

/// Disjoint set forest stored as flat parent and size arrays indexed by element.
///
/// An element is a root when it is its own parent, `sizes` is only meaningful at roots.
#[derive(Clone, Debug)]
pub struct DisjointSet {
    parents: Vec<u32>,
    sizes: Vec<u32>,
    sets_count: usize,
}

impl DisjointSet {
    /// `count` singleton sets, `0..count`.
    ///
    /// Panics if the elements cannot be addressed by a `u32`.
    pub fn new(count: usize) -> DisjointSet {
        assert!(count <= u32::MAX as usize + 1, "too many elements for a disjoint set");
        DisjointSet {
            parents: (0..count).map(|i| i as u32).collect(),
            sizes: vec![1; count],
            sets_count: count,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.parents.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }

    /// Number of distinct sets remaining.
    #[inline]
    pub fn sets_count(&self) -> usize {
        self.sets_count
    }

    /// Root of the set holding `i`, pointing each visited element at its grandparent on the way.
    pub fn find(&mut self, i: usize) -> usize {
        let mut current = i;
        loop {
            let parent = self.parents[current] as usize;
            if parent == current {
                return current;
            }
            let grandparent = self.parents[parent];
            self.parents[current] = grandparent;
            current = grandparent as usize;
        }
    }

    /// Root of the set holding `i` without restructuring anything.
    pub fn root(&self, i: usize) -> usize {
        let mut current = i;
        loop {
            let parent = self.parents[current] as usize;
            if parent == current {
                return current;
            }
            current = parent;
        }
    }

    pub fn same_set(&mut self, a: usize, b: usize) -> bool {
        self.find(a) == self.find(b)
    }

    /// Number of elements sharing a set with `i`.
    pub fn set_size(&mut self, i: usize) -> usize {
        let root = self.find(i);
        self.sizes[root] as usize
    }

    /// Merge the sets holding `a` and `b`, hanging the smaller tree under the larger root.
    /// Returns false if they were already one set.
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let (mut root_a, mut root_b) = (self.find(a), self.find(b));
        if root_a == root_b {
            return false;
        }
        if self.sizes[root_a] < self.sizes[root_b] {
            std::mem::swap(&mut root_a, &mut root_b);
        }
        self.parents[root_b] = root_a as u32;
        self.sizes[root_a] += self.sizes[root_b];
        self.sets_count -= 1;
        true
    }
}
