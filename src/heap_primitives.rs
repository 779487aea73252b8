// Heap intrinsic operations implemented externally.
//
// A heap is a tree-like structure where every subtree's root has a better score
// than all the other nodes in the subtree.
//
// This is often implemented with an array that's traversed in a non-linear way.
// These are the indices we assign to each node.
//
// ```text
//              0
//       1             2
//   3      4      5       6
//  7 8    9 10  11 12   13
// ```
//
// The last level will often be incomplete
//
// You can easily go up, down-left, and down-right from any index with,
//   - Up:         `(i-1)//2`
//   - Down-left:  `(2*i) + 1`
//   - Down-right: `2(i+1)`

/// The parent node
///
/// ```
/// use road_search::heap_primitives::index_parent;
/// assert_eq!(index_parent(1), 0);
/// assert_eq!(index_parent(2), 0);
/// assert_eq!(index_parent(3), 1);
/// assert_eq!(index_parent(4), 1);
/// assert_eq!(index_parent(5), 2);
/// assert_eq!(index_parent(6), 2);
/// assert_eq!(index_parent(13), 6);
/// ```
#[inline(always)]
#[must_use]
pub fn index_parent(i: usize) -> usize {
    (i - 1) / 2
}

/// The left children
///
/// ```
/// use road_search::heap_primitives::index_first_child;
/// assert_eq!(index_first_child(0), 1);
/// assert_eq!(index_first_child(1), 3);
/// assert_eq!(index_first_child(3), 7);
/// assert_eq!(index_first_child(6), 13);
/// ```
#[inline(always)]
#[must_use]
pub fn index_first_child(i: usize) -> usize {
    (2 * i) + 1
}

/// The right children
///
/// ```
/// use road_search::heap_primitives::index_last_child;
/// assert_eq!(index_last_child(0), 2);
/// assert_eq!(index_last_child(1), 4);
/// assert_eq!(index_last_child(2), 6);
/// assert_eq!(index_last_child(6), 14);
/// ```
#[inline(always)]
#[must_use]
pub fn index_last_child(i: usize) -> usize {
    2 * (i + 1)
}
