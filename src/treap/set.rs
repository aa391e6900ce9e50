use crate::entry::{Entry, EntryRef};
use crate::error::{Error, Result};
use crate::treap::node::Node;
use crate::treap::tree;
use rand::{self, Rng, SeedableRng, XorShiftRng};
use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};
use std::borrow::Borrow;
use std::fmt;
use std::result;

// Mixed into the derived xorshift state so that no seed produces the all-zero state.
const SEED_MIX: [u32; 2] = [0x9E37_79B9, 0x7F4A_7C15];

fn seeded_rng(seed: u64) -> XorShiftRng {
    let low = seed as u32;
    let high = (seed >> 32) as u32;
    XorShiftRng::from_seed([low, high, low ^ SEED_MIX[0], high ^ SEED_MIX[1]])
}

/// An ordered set implemented by a treap.
///
/// A treap is a tree that satisfies both the binary search tree property and a heap property. Each
/// node has a key and a priority. The key of any node is greater than all keys in its left subtree
/// and less than all keys occuring in its right subtree. The priority of a node is greater than or
/// equal to the priority of all nodes in its subtrees. By randomly generating priorities, the
/// expected height of the tree is proportional to the logarithm of the number of keys.
///
/// Insertion attaches the new key as a leaf and rotates it upward along the path of ancestors it
/// recorded on the way down. Removal rotates the key downward, always lifting its higher-priority
/// child, until it is a leaf that can be detached. Neither operation recurses.
///
/// Distinct keys that happen to share a priority are not ordered any further; their relative
/// position is whatever the rotations produce. When a removed node has two children of equal
/// priority, the right child is lifted.
///
/// # Examples
///
/// ```
/// use treap_rotations::TreapSet;
///
/// let mut t = TreapSet::with_seed(7);
/// assert!(t.insert(0));
/// assert!(t.insert(3));
/// assert!(!t.insert(3));
///
/// assert_eq!(t.len(), 2);
/// assert!(t.contains(&3));
///
/// assert!(t.remove(&0));
/// assert!(!t.remove(&1));
/// assert!(t.check_invariants().is_ok());
/// ```
pub struct TreapSet<T> {
    tree: tree::Tree<T>,
    len: usize,
    rng: XorShiftRng,
}

impl<T> TreapSet<T>
where
    T: Ord,
{
    /// Constructs a new, empty `TreapSet<T>` whose priorities are drawn from a generator seeded by
    /// the operating system.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_rotations::TreapSet;
    ///
    /// let t: TreapSet<u32> = TreapSet::new();
    /// assert!(t.is_empty());
    /// ```
    pub fn new() -> Self {
        debug!("constructing treap with an entropy-seeded priority generator");
        TreapSet {
            tree: None,
            len: 0,
            rng: rand::weak_rng(),
        }
    }

    /// Constructs a new, empty `TreapSet<T>` whose priorities are drawn from a generator seeded by
    /// `seed`. Two treaps built with the same seed and the same sequence of operations have the
    /// same shape.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_rotations::TreapSet;
    ///
    /// let mut t1 = TreapSet::with_seed(1);
    /// let mut t2 = TreapSet::with_seed(1);
    /// for key in 0..10 {
    ///     t1.insert(key);
    ///     t2.insert(key);
    /// }
    /// assert_eq!(t1, t2);
    /// ```
    pub fn with_seed(seed: u64) -> Self {
        debug!("constructing treap with priority generator seed {}", seed);
        TreapSet {
            tree: None,
            len: 0,
            rng: seeded_rng(seed),
        }
    }

    /// Inserts a key into the treap with a freshly drawn priority. Returns `false` and leaves the
    /// treap unchanged if the key already exists.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_rotations::TreapSet;
    ///
    /// let mut t = TreapSet::new();
    /// assert!(t.insert(1));
    /// assert!(t.contains(&1));
    /// assert!(!t.insert(1));
    /// assert_eq!(t.len(), 1);
    /// ```
    pub fn insert(&mut self, key: T) -> bool {
        let priority = self.rng.next_u32();
        self.insert_with_priority(key, priority)
    }

    /// Inserts a key into the treap with an explicit priority. Returns `false` and leaves the
    /// treap unchanged if the key already exists.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_rotations::TreapSet;
    ///
    /// let mut t = TreapSet::new();
    /// assert!(t.insert_with_priority(4, 14));
    /// assert!(t.insert_with_priority(1, 84));
    /// assert_eq!(t.root(), Some((&1, 84)));
    /// ```
    pub fn insert_with_priority(&mut self, key: T, priority: u32) -> bool {
        let inserted = tree::insert(&mut self.tree, Node::new(key, priority));
        if inserted {
            self.len += 1;
        }
        inserted
    }

    /// Inserts a key that may be absent. Returns `Error::InvalidArgument` without touching the
    /// treap if `key` is `None`, otherwise behaves like `insert`.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_rotations::{Error, TreapSet};
    ///
    /// let mut t = TreapSet::new();
    /// assert_eq!(t.try_insert(Some(1)), Ok(true));
    /// assert_eq!(t.try_insert(Some(1)), Ok(false));
    /// assert!(matches!(t.try_insert(None), Err(Error::InvalidArgument(_))));
    /// assert_eq!(t.len(), 1);
    /// ```
    pub fn try_insert(&mut self, key: Option<T>) -> Result<bool> {
        match key {
            Some(key) => Ok(self.insert(key)),
            None => Err(Error::InvalidArgument("key must be present")),
        }
    }

    /// Inserts a key that may be absent with an explicit priority. Returns
    /// `Error::InvalidArgument` without touching the treap if `key` is `None`.
    pub fn try_insert_with_priority(&mut self, key: Option<T>, priority: u32) -> Result<bool> {
        match key {
            Some(key) => Ok(self.insert_with_priority(key, priority)),
            None => Err(Error::InvalidArgument("key must be present")),
        }
    }

    /// Removes a key from the treap. Returns `false` if the key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_rotations::TreapSet;
    ///
    /// let mut t = TreapSet::new();
    /// t.insert(1);
    /// assert!(t.remove(&1));
    /// assert!(!t.remove(&1));
    /// ```
    pub fn remove<V>(&mut self, key: &V) -> bool
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.take(key).is_some()
    }

    /// Removes a key from the treap and returns it. Returns `None` if the key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_rotations::TreapSet;
    ///
    /// let mut t = TreapSet::new();
    /// t.insert(String::from("a"));
    /// assert_eq!(t.take("a"), Some(String::from("a")));
    /// assert_eq!(t.take("a"), None);
    /// ```
    pub fn take<V>(&mut self, key: &V) -> Option<T>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        let ret = tree::remove(&mut self.tree, key);
        if ret.is_some() {
            self.len -= 1;
        }
        ret
    }

    /// Checks if a key exists in the treap.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_rotations::TreapSet;
    ///
    /// let mut t = TreapSet::new();
    /// t.insert(1);
    /// assert!(!t.contains(&0));
    /// assert!(t.contains(&1));
    /// ```
    pub fn contains<V>(&self, key: &V) -> bool
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        tree::contains(&self.tree, key)
    }

    /// Returns the priority of a key, or `None` if the key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_rotations::TreapSet;
    ///
    /// let mut t = TreapSet::new();
    /// t.insert_with_priority(1, 42);
    /// assert_eq!(t.priority_of(&1), Some(42));
    /// assert_eq!(t.priority_of(&2), None);
    /// ```
    pub fn priority_of<V>(&self, key: &V) -> Option<u32>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        tree::get(&self.tree, key).map(|node| node.priority)
    }

    /// Verifies that every key lies strictly between the keys bounding its position, that no node
    /// has a child of higher priority, and that the number of reachable nodes equals `len`.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_rotations::TreapSet;
    ///
    /// let mut t = TreapSet::with_seed(3);
    /// for key in 0..100 {
    ///     t.insert(key);
    /// }
    /// assert_eq!(t.check_invariants(), Ok(()));
    /// ```
    pub fn check_invariants(&self) -> Result<()> {
        let actual = tree::check(&self.tree)?;
        if actual != self.len {
            return Err(Error::LengthMismatch {
                expected: self.len,
                actual,
            });
        }
        Ok(())
    }
}

impl<T> TreapSet<T> {
    /// Returns the number of keys in the treap.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the treap has no keys.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Removes every key from the treap.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_rotations::TreapSet;
    ///
    /// let mut t = TreapSet::new();
    /// t.insert(1);
    /// t.clear();
    /// assert!(t.is_empty());
    /// assert_eq!(t.root(), None);
    /// ```
    pub fn clear(&mut self) {
        tree::clear(&mut self.tree);
        self.len = 0;
    }

    /// Returns the number of nodes on the longest path from the root to a leaf. An empty treap has
    /// a height of zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_rotations::TreapSet;
    ///
    /// let mut t = TreapSet::new();
    /// assert_eq!(t.height(), 0);
    /// t.insert_with_priority(2, 10);
    /// t.insert_with_priority(1, 5);
    /// assert_eq!(t.height(), 2);
    /// ```
    pub fn height(&self) -> usize {
        tree::height(&self.tree)
    }

    /// Returns the key and priority at the root of the treap, which holds the highest priority.
    pub fn root(&self) -> Option<(&T, u32)> {
        self.tree.as_ref().map(|node| (&node.key, node.priority))
    }

    /// Returns every key and its priority in pre-order: each node precedes its left subtree,
    /// which precedes its right subtree.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_rotations::TreapSet;
    ///
    /// let mut t = TreapSet::new();
    /// t.insert_with_priority(2, 10);
    /// t.insert_with_priority(3, 5);
    /// t.insert_with_priority(1, 7);
    /// assert_eq!(t.preorder(), vec![(&2, 10), (&1, 7), (&3, 5)]);
    /// ```
    pub fn preorder(&self) -> Vec<(&T, u32)> {
        tree::preorder(&self.tree)
    }

    /// Returns a pre-order dump of the treap with one line per child slot, indented by depth.
    /// Absent children are shown as `null`.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_rotations::TreapSet;
    ///
    /// let mut t = TreapSet::new();
    /// t.insert_with_priority(5, 83);
    /// assert_eq!(t.render(), "(key=5, priority=83)\n  null\n  null\n");
    /// ```
    pub fn render(&self) -> String
    where
        T: fmt::Display,
    {
        self.to_string()
    }
}

impl<T> Default for TreapSet<T>
where
    T: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for TreapSet<T> {
    fn drop(&mut self) {
        tree::clear(&mut self.tree);
    }
}

impl<T> fmt::Display for TreapSet<T>
where
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        tree::render(&self.tree, f)
    }
}

impl<T> fmt::Debug for TreapSet<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(self.preorder()).finish()
    }
}

/// Two treaps are equal if they have the same shape, keys, and priorities.
impl<T> PartialEq for TreapSet<T>
where
    T: PartialEq,
{
    fn eq(&self, other: &TreapSet<T>) -> bool {
        self.len == other.len && self.preorder() == other.preorder()
    }
}

impl<T> Eq for TreapSet<T> where T: Eq {}

impl<T> Serialize for TreapSet<T>
where
    T: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(
            self.preorder()
                .into_iter()
                .map(|(key, priority)| EntryRef { key, priority }),
        )
    }
}

/// Rebuilds a treap by inserting each serialized entry in order with its recorded priority.
///
/// Each entry costs one descent, so restoring a treap takes time proportional to the sum of node
/// depths: `O(n log n)` expected for randomly drawn priorities, but `O(n^2)` for a deliberately
/// skewed treap whose explicit priorities formed a spine.
impl<'de, T> Deserialize<'de> for TreapSet<T>
where
    T: Ord + Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let entries: Vec<Entry<T>> = Vec::deserialize(deserializer)?;
        let mut set = TreapSet::new();
        for Entry { key, priority } in entries {
            if !set.insert_with_priority(key, priority) {
                return Err(de::Error::custom("duplicate key in treap"));
            }
        }
        Ok(set)
    }
}
