use rand::Rng;

use crate::error::Result;
use crate::iterator::StorageIterator;

/// Maximum height of the skip list. LevelDB uses 12.
pub const MAX_HEIGHT: usize = 12;

/// One in `BRANCHING` nodes is promoted to the next level.
const BRANCHING: u32 = 4;

/// Arena index of the head sentinel.
const HEAD: usize = 0;

/// A single node in the skip list.
///
/// Each node has `height` forward pointers. Level 0 contains all nodes
/// (a regular linked list). Higher levels skip over nodes, enabling
/// O(log n) average-case search.
///
/// ```text
/// Level 2:  HEAD ──────────► 20 ────────────────► 50 ──────────► NIL
/// Level 1:  HEAD ──► 10 ──► 20 ────► 35 ────────► 50 ──► 60 ──► NIL
/// Level 0:  HEAD ──► 10 ──► 20 ──► 25 ──► 35 ──► 50 ──► 60 ──► 70 ► NIL
/// ```
struct SkipNode {
    key: Vec<u8>,
    value: Vec<u8>,
    forward: Vec<Option<usize>>, // indices into SkipList.nodes
}

/// A probabilistic sorted map over byte keys.
///
/// Nodes live in an arena and link to each other by index, so there is no
/// unsafe pointer juggling. Entries are never unlinked; deletes are
/// tombstones written by [`MemTable`](super::MemTable).
pub struct SkipList {
    nodes: Vec<SkipNode>,
    height: usize,
    len: usize,
    size_bytes: usize,
}

impl SkipList {
    /// Create a new empty skip list.
    pub fn new() -> Self {
        let head = SkipNode {
            key: Vec::new(),
            value: Vec::new(),
            forward: vec![None; MAX_HEIGHT],
        };
        SkipList {
            nodes: vec![head],
            height: 1,
            len: 0,
            size_bytes: 0,
        }
    }

    /// Insert a key-value pair. Overwrites if key already exists.
    pub fn insert(&mut self, key: Vec<u8>, value: Vec<u8>) {
        let preds = self.predecessors(&key);

        if let Some(next) = self.nodes[preds[0]].forward[0] {
            if self.nodes[next].key == key {
                let node = &mut self.nodes[next];
                self.size_bytes = self.size_bytes + value.len() - node.value.len();
                node.value = value;
                return;
            }
        }

        // Levels above the old height already point at HEAD in `preds`.
        let height = self.random_height();
        self.height = self.height.max(height);

        let idx = self.nodes.len();
        let forward = (0..height)
            .map(|level| self.nodes[preds[level]].forward[level])
            .collect();
        self.size_bytes += key.len() + value.len();
        self.nodes.push(SkipNode { key, value, forward });
        for (level, &pred) in preds.iter().enumerate().take(height) {
            self.nodes[pred].forward[level] = Some(idx);
        }
        self.len += 1;
    }

    /// Look up a key. Returns the value if found.
    pub fn get(&self, key: &[u8]) -> Option<&[u8]> {
        self.seek_index(key)
            .filter(|&idx| self.nodes[idx].key == key)
            .map(|idx| self.nodes[idx].value.as_slice())
    }

    /// Number of entries in the skip list.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the skip list is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Approximate memory usage in bytes (keys plus values).
    pub fn size_bytes(&self) -> usize {
        self.size_bytes
    }

    /// Create an iterator over all entries in sorted order, positioned at
    /// the first entry.
    pub fn iter(&self) -> SkipListIterator<'_> {
        SkipListIterator {
            list: self,
            current: self.nodes[HEAD].forward[0],
        }
    }

    /// For each level, the last node whose key is < `key`.
    fn predecessors(&self, key: &[u8]) -> [usize; MAX_HEIGHT] {
        let mut preds = [HEAD; MAX_HEIGHT];
        let mut x = HEAD;
        for level in (0..self.height).rev() {
            while let Some(next) = self.nodes[x].forward[level] {
                if self.nodes[next].key.as_slice() < key {
                    x = next;
                } else {
                    break;
                }
            }
            preds[level] = x;
        }
        preds
    }

    /// Index of the first node with key >= `key`.
    fn seek_index(&self, key: &[u8]) -> Option<usize> {
        self.nodes[self.predecessors(key)[0]].forward[0]
    }

    /// Each level has a 1/4 probability (LevelDB uses 1/4, not 1/2).
    fn random_height(&self) -> usize {
        let mut rng = rand::thread_rng();
        let mut height = 1;
        while height < MAX_HEIGHT && rng.gen_range(0..BRANCHING) == 0 {
            height += 1;
        }
        height
    }
}

impl Default for SkipList {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over skip list entries in sorted order.
///
/// Follows level 0 forward pointers; `seek` uses the upper levels.
pub struct SkipListIterator<'a> {
    list: &'a SkipList,
    current: Option<usize>,
}

impl StorageIterator for SkipListIterator<'_> {
    fn key(&self) -> &[u8] {
        match self.current {
            Some(idx) => &self.list.nodes[idx].key,
            None => &[],
        }
    }

    fn value(&self) -> &[u8] {
        match self.current {
            Some(idx) => &self.list.nodes[idx].value,
            None => &[],
        }
    }

    fn is_valid(&self) -> bool {
        self.current.is_some()
    }

    fn next(&mut self) -> Result<()> {
        if let Some(idx) = self.current {
            self.current = self.list.nodes[idx].forward[0];
        }
        Ok(())
    }

    fn seek(&mut self, key: &[u8]) -> Result<()> {
        self.current = self.list.seek_index(key);
        Ok(())
    }
}
