use std::fmt::{Debug, Formatter};
use std::ops::Range;

use crate::error::{GeometryError, Result};
use crate::position::Position;
use crate::sequence::{PackedPositionSequence, PositionSequence};

/// Sequence made of the concatenation of other sequences.
///
/// All packed leaves of the composite are kept in one arena in depth-first order, together with the index of the
/// first position of every leaf. The structure of the children is kept as an index tree over the arena, so
/// accessing a child does not require walking pointers to nested objects.
pub struct NestedPositionSequence<P> {
    leaves: Vec<PackedPositionSequence<P>>,
    offsets: Vec<usize>,
    children: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq)]
enum Node {
    Leaf(usize),
    Branch {
        leaves: Range<usize>,
        children: Vec<Node>,
    },
}

impl Node {
    fn translate(&self, from: usize, to: usize) -> Node {
        match self {
            Node::Leaf(index) => Node::Leaf(index - from + to),
            Node::Branch { leaves, children } => Node::Branch {
                leaves: (leaves.start - from + to)..(leaves.end - from + to),
                children: children.iter().map(|c| c.translate(from, to)).collect(),
            },
        }
    }

    fn mirror(&self, leaf_count: usize) -> Node {
        match self {
            Node::Leaf(index) => Node::Leaf(leaf_count - 1 - index),
            Node::Branch { leaves, children } => Node::Branch {
                leaves: (leaf_count - leaves.end)..(leaf_count - leaves.start),
                children: children.iter().rev().map(|c| c.mirror(leaf_count)).collect(),
            },
        }
    }
}

fn cumulative_offsets<P: Position>(leaves: &[PackedPositionSequence<P>]) -> Vec<usize> {
    let mut offsets = Vec::with_capacity(leaves.len() + 1);
    let mut total = 0;
    offsets.push(total);
    for leaf in leaves {
        total += leaf.size();
        offsets.push(total);
    }

    offsets
}

impl<P: Position> NestedPositionSequence<P> {
    /// Creates a new sequence out of the given children.
    ///
    /// The children are not copied: packed children share their coordinate arrays with the composite, nested
    /// children contribute their leaves.
    pub fn new(children: Vec<PositionSequence<P>>) -> Self {
        let mut leaves = Vec::with_capacity(children.len());
        let mut nodes = Vec::with_capacity(children.len());
        for child in children {
            let start = leaves.len();
            match child {
                PositionSequence::Packed(packed) => {
                    leaves.push(packed);
                    nodes.push(Node::Leaf(start));
                }
                PositionSequence::Nested(nested) => {
                    let count = nested.leaves.len();
                    let children = nested
                        .children
                        .iter()
                        .map(|c| c.translate(0, start))
                        .collect();
                    leaves.extend(nested.leaves);
                    nodes.push(Node::Branch {
                        leaves: start..start + count,
                        children,
                    });
                }
            }
        }

        let offsets = cumulative_offsets(&leaves);
        Self {
            leaves,
            offsets,
            children: nodes,
        }
    }

    /// Number of positions in all children together.
    pub fn size(&self) -> usize {
        self.offsets[self.leaves.len()]
    }

    /// Returns true if no child contains any positions.
    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Number of direct children.
    pub fn num_children(&self) -> usize {
        self.children.len()
    }

    /// Returns the direct child with the given index.
    pub fn child(&self, index: usize) -> Option<PositionSequence<P>> {
        let node = self.children.get(index)?;
        Some(match node {
            Node::Leaf(leaf) => PositionSequence::Packed(self.leaves[*leaf].clone()),
            Node::Branch { leaves, children } => {
                let arena = self.leaves[leaves.clone()].to_vec();
                let offsets = cumulative_offsets(&arena);
                PositionSequence::Nested(Self {
                    leaves: arena,
                    offsets,
                    children: children
                        .iter()
                        .map(|c| c.translate(leaves.start, 0))
                        .collect(),
                })
            }
        })
    }

    /// Iterates over the direct children.
    pub fn children(&self) -> impl Iterator<Item = PositionSequence<P>> + '_ {
        (0..self.num_children()).filter_map(|i| self.child(i))
    }

    /// Packed leaves of the sequence in depth-first order.
    pub fn leaves(&self) -> &[PackedPositionSequence<P>] {
        &self.leaves
    }

    fn locate(&self, index: usize) -> Result<(usize, usize)> {
        let size = self.size();
        if index >= size {
            return Err(GeometryError::IndexOutOfRange { index, size });
        }

        let leaf = self.offsets.partition_point(|&offset| offset <= index) - 1;
        Ok((leaf, index - self.offsets[leaf]))
    }

    /// Returns the position with the given index.
    pub fn get(&self, index: usize) -> Result<P> {
        let (leaf, local) = self.locate(index)?;
        self.leaves[leaf].get(local)
    }

    /// Copies coordinates of the position with the given index into `buffer`.
    pub fn get_coordinates(&self, index: usize, buffer: &mut [f64]) -> Result<()> {
        let (leaf, local) = self.locate(index)?;
        self.leaves[leaf].get_coordinates(local, buffer)
    }

    /// Returns a single ordinate of the position with the given index.
    pub fn get_ordinate(&self, index: usize, ordinate: usize) -> Result<f64> {
        let (leaf, local) = self.locate(index)?;
        self.leaves[leaf].get_ordinate(local, ordinate)
    }

    /// Returns a copy of the sequence with one ordinate replaced. Only the affected leaf is copied.
    pub fn with_ordinate(&self, index: usize, ordinate: usize, value: f64) -> Result<Self> {
        let (leaf, local) = self.locate(index)?;
        let mut leaves = self.leaves.clone();
        leaves[leaf] = self.leaves[leaf].with_ordinate(local, ordinate, value)?;
        Ok(Self {
            leaves,
            offsets: self.offsets.clone(),
            children: self.children.clone(),
        })
    }

    /// Returns a new sequence with the order of the children reversed and every child reversed internally.
    pub fn reverse(&self) -> Self {
        let count = self.leaves.len();
        let leaves: Vec<_> = self.leaves.iter().rev().map(|l| l.reverse()).collect();
        let offsets = cumulative_offsets(&leaves);
        Self {
            leaves,
            offsets,
            children: self.children.iter().rev().map(|c| c.mirror(count)).collect(),
        }
    }

    /// Iterates over the positions of all children, depth-first.
    pub fn iter(&self) -> impl Iterator<Item = P> + '_ {
        self.leaves.iter().flat_map(|leaf| leaf.iter())
    }
}

impl<P> Clone for NestedPositionSequence<P> {
    fn clone(&self) -> Self {
        Self {
            leaves: self.leaves.clone(),
            offsets: self.offsets.clone(),
            children: self.children.clone(),
        }
    }
}

impl<P: Position> Debug for NestedPositionSequence<P> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NestedPositionSequence")
            .field("kind", &P::KIND)
            .field("size", &self.size())
            .field("leaves", &self.leaves)
            .finish()
    }
}
