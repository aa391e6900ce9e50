use crate::error::{Error, Result};
use crate::treap::node::{rotate_left, rotate_right, rotate_up, Dir, Node};
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt::{self, Display, Write};

pub type Tree<T> = Option<Box<Node<T>>>;

const INDENT: &str = "  ";

enum RemovalCase {
    Detach,
    RotateLeft,
    RotateRight,
}

// precondition: `tree` is not empty
fn child_slot<T>(tree: &mut Tree<T>, dir: Dir) -> &mut Tree<T> {
    match tree {
        Some(node) => node.child_mut(dir),
        None => unreachable!(),
    }
}

fn get_removal_case<T>(node: &Node<T>) -> RemovalCase {
    match (&node.left, &node.right) {
        (Some(left_node), Some(right_node)) => {
            // Ties push the node to the left, letting the right child rise.
            if left_node.priority > right_node.priority {
                RemovalCase::RotateRight
            } else {
                RemovalCase::RotateLeft
            }
        },
        (Some(_), None) => RemovalCase::RotateRight,
        (None, Some(_)) => RemovalCase::RotateLeft,
        (None, None) => RemovalCase::Detach,
    }
}

/// Returns the directions leading from the root to the empty slot where `key` belongs, or `None`
/// if `key` is already present.
fn vacant_path<T>(tree: &Tree<T>, key: &T) -> Option<Vec<Dir>>
where
    T: Ord,
{
    let mut path = Vec::new();
    let mut curr = tree;
    while let Some(ref node) = curr {
        let dir = match key.cmp(&node.key) {
            Ordering::Less => Dir::Left,
            Ordering::Greater => Dir::Right,
            Ordering::Equal => return None,
        };
        path.push(dir);
        curr = node.child(dir);
    }
    Some(path)
}

/// Inserts `new_node` as a leaf and rotates it upward until its parent has a priority at least as
/// large as its own. Returns `false` and leaves the tree untouched if the key is already present.
///
/// All key comparisons happen before the tree is modified. The ancestors are then detached one by
/// one onto an explicit stack, so each rotation only ever touches boxes that are owned locally.
pub fn insert<T>(tree: &mut Tree<T>, new_node: Node<T>) -> bool
where
    T: Ord,
{
    let path = match vacant_path(tree, &new_node.key) {
        Some(path) => path,
        None => return false,
    };

    let mut ancestors = Vec::with_capacity(path.len());
    let mut curr = tree.take();
    for dir in path {
        let mut node = match curr {
            Some(node) => node,
            None => unreachable!(),
        };
        curr = node.child_mut(dir).take();
        ancestors.push((node, dir));
    }
    debug_assert!(curr.is_none());

    let depth = ancestors.len();
    let mut rotations = 0;
    let mut node = Box::new(new_node);
    while let Some((mut parent, dir)) = ancestors.pop() {
        let is_violated = parent.priority < node.priority;
        *parent.child_mut(dir) = Some(node);
        if !is_violated {
            node = parent;
            break;
        }
        node = rotate_up(parent, dir);
        rotations += 1;
    }

    while let Some((mut parent, dir)) = ancestors.pop() {
        *parent.child_mut(dir) = Some(node);
        node = parent;
    }
    *tree = Some(node);

    trace!("inserted leaf at depth {} with {} rotations", depth, rotations);
    true
}

/// Removes the node with a particular key by rotating it down toward its higher-priority child
/// until it is a leaf, then detaching it. Returns the removed key.
pub fn remove<T, V>(tree: &mut Tree<T>, key: &V) -> Option<T>
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    let mut tree = tree;
    let mut depth = 0;
    loop {
        let dir = match *tree {
            Some(ref node) => match key.cmp(node.key.borrow()) {
                Ordering::Less => Dir::Left,
                Ordering::Greater => Dir::Right,
                Ordering::Equal => break,
            },
            None => return None,
        };
        tree = child_slot(tree, dir);
        depth += 1;
    }

    // `tree` is the link the target hangs from; it follows the target down as it is rotated.
    let mut rotations = 0;
    loop {
        let node = match tree.take() {
            Some(node) => node,
            None => unreachable!(),
        };
        tree = match get_removal_case(&node) {
            RemovalCase::RotateRight => &mut tree.insert(rotate_right(node)).right,
            RemovalCase::RotateLeft => &mut tree.insert(rotate_left(node)).left,
            RemovalCase::Detach => {
                trace!("removed node found at depth {} after {} rotations", depth, rotations);
                let Node { key, .. } = *node;
                return Some(key);
            },
        };
        rotations += 1;
    }
}

pub fn get<'a, T, V>(tree: &'a Tree<T>, key: &V) -> Option<&'a Node<T>>
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    let mut curr = tree;
    while let Some(ref node) = curr {
        curr = match key.cmp(node.key.borrow()) {
            Ordering::Less => &node.left,
            Ordering::Greater => &node.right,
            Ordering::Equal => return Some(&**node),
        };
    }
    None
}

pub fn contains<T, V>(tree: &Tree<T>, key: &V) -> bool
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    get(tree, key).is_some()
}

pub fn height<T>(tree: &Tree<T>) -> usize {
    let mut max_depth = 0;
    let mut stack = Vec::new();
    if let Some(ref node) = tree {
        stack.push((node, 1));
    }
    while let Some((node, depth)) = stack.pop() {
        if depth > max_depth {
            max_depth = depth;
        }
        if let Some(ref left_node) = node.left {
            stack.push((left_node, depth + 1));
        }
        if let Some(ref right_node) = node.right {
            stack.push((right_node, depth + 1));
        }
    }
    max_depth
}

pub fn preorder<T>(tree: &Tree<T>) -> Vec<(&T, u32)> {
    let mut ret = Vec::new();
    let mut stack = Vec::new();
    if let Some(ref node) = tree {
        stack.push(node);
    }
    while let Some(node) = stack.pop() {
        ret.push((&node.key, node.priority));
        if let Some(ref right_node) = node.right {
            stack.push(right_node);
        }
        if let Some(ref left_node) = node.left {
            stack.push(left_node);
        }
    }
    ret
}

/// Writes a pre-order dump of the tree, one slot per line and indented by depth. Empty slots are
/// written as `null`.
pub fn render<T, W>(tree: &Tree<T>, out: &mut W) -> fmt::Result
where
    T: Display,
    W: Write,
{
    let mut stack = vec![(tree, 0)];
    while let Some((curr, depth)) = stack.pop() {
        for _ in 0..depth {
            out.write_str(INDENT)?;
        }
        match curr {
            Some(ref node) => {
                writeln!(out, "(key={}, priority={})", node.key, node.priority)?;
                stack.push((&node.right, depth + 1));
                stack.push((&node.left, depth + 1));
            },
            None => writeln!(out, "null")?,
        }
    }
    Ok(())
}

/// Verifies binary search tree order and heap order over the whole tree and returns the number of
/// nodes visited. Strict key bounds also rule out duplicate keys.
pub fn check<T>(tree: &Tree<T>) -> Result<usize>
where
    T: Ord,
{
    let mut count = 0;
    let mut stack: Vec<(&Node<T>, Option<&T>, Option<&T>)> = Vec::new();
    if let Some(ref node) = tree {
        stack.push((&**node, None, None));
    }
    while let Some((node, lower, upper)) = stack.pop() {
        count += 1;
        let above_lower = lower.map_or(true, |lower| node.key > *lower);
        let below_upper = upper.map_or(true, |upper| node.key < *upper);
        if !above_lower || !below_upper {
            return Err(Error::OrderViolation);
        }
        if let Some(ref left_node) = node.left {
            if left_node.priority > node.priority {
                return Err(Error::HeapViolation);
            }
            stack.push((&**left_node, lower, Some(&node.key)));
        }
        if let Some(ref right_node) = node.right {
            if right_node.priority > node.priority {
                return Err(Error::HeapViolation);
            }
            stack.push((&**right_node, Some(&node.key), upper));
        }
    }
    Ok(count)
}

/// Drops every node without recursing, so arbitrarily deep trees can be released.
pub fn clear<T>(tree: &mut Tree<T>) {
    let mut stack: Vec<Box<Node<T>>> = tree.take().into_iter().collect();
    while let Some(mut node) = stack.pop() {
        stack.extend(node.left.take());
        stack.extend(node.right.take());
    }
}
