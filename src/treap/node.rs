use crate::treap::tree::Tree;

/// One of the two child slots of a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dir {
    Left,
    Right,
}

/// A struct representing an internal node of a treap.
pub struct Node<T> {
    pub key: T,
    pub priority: u32,
    pub left: Tree<T>,
    pub right: Tree<T>,
}

impl<T> Node<T> {
    pub fn new(key: T, priority: u32) -> Self {
        Node {
            key,
            priority,
            left: None,
            right: None,
        }
    }

    pub fn child(&self, dir: Dir) -> &Tree<T> {
        match dir {
            Dir::Left => &self.left,
            Dir::Right => &self.right,
        }
    }

    pub fn child_mut(&mut self, dir: Dir) -> &mut Tree<T> {
        match dir {
            Dir::Left => &mut self.left,
            Dir::Right => &mut self.right,
        }
    }
}

//     node              child
//     /  \              /  \
//    A  child  --->   node  C
//       /  \          /  \
//      B    C        A    B
pub fn rotate_left<T>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    let mut child = match node.right.take() {
        Some(child) => child,
        None => unreachable!(),
    };
    node.right = child.left.take();
    child.left = Some(node);
    child
}

//       node          child
//       /  \          /  \
//    child  C  --->  A   node
//     /  \               /  \
//    A    B             B    C
pub fn rotate_right<T>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    let mut child = match node.left.take() {
        Some(child) => child,
        None => unreachable!(),
    };
    node.left = child.right.take();
    child.right = Some(node);
    child
}

/// Rotates `node` so that its child in direction `dir` takes its place.
pub fn rotate_up<T>(node: Box<Node<T>>, dir: Dir) -> Box<Node<T>> {
    match dir {
        Dir::Left => rotate_right(node),
        Dir::Right => rotate_left(node),
    }
}
