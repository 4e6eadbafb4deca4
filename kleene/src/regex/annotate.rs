use crate::regex::RegexTree;
use std::collections::{BTreeMap, BTreeSet};

/// A 1-based position, assigned to every non-ε leaf in left-to-right source order.
pub(crate) type Position = u32;

/// The annotations of one tree node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Attributes {
    pub nullable: bool,
    pub firstpos: BTreeSet<Position>,
    pub lastpos: BTreeSet<Position>,
}

/// The result of annotating a whole tree: the root attributes, the followpos table and the
/// symbol carried by each position.
#[derive(Debug)]
pub(crate) struct Annotation {
    pub root: Attributes,
    pub followpos: BTreeMap<Position, BTreeSet<Position>>,
    pub symbols: BTreeMap<Position, char>,
}

/// Annotates a tree in a single post-order traversal, assigning positions and computing
/// nullable, firstpos and lastpos for every node while accumulating followpos:
///
/// * ε leaf: nullable, empty firstpos/lastpos.
/// * symbol leaf: a fresh position; firstpos = lastpos = that position.
/// * `Star(a)`: nullable; firstpos/lastpos of `a`; firstpos flows back into the followpos of
///   every position in lastpos.
/// * `Or(a, b)`: nullable if either side is; unions of the sides.
/// * `Cat(a, b)`: nullable if both sides are; firstpos of `b` joins when `a` is nullable,
///   lastpos of `a` joins when `b` is nullable; firstpos of `b` follows every position in the
///   lastpos of `a`.
pub(crate) fn annotate(tree: &RegexTree) -> Annotation {
    let mut annotator = Annotator::default();
    let root = annotator.visit(tree);
    Annotation {
        root,
        followpos: annotator.followpos,
        symbols: annotator.symbols,
    }
}

#[derive(Debug, Default)]
struct Annotator {
    next_position: Position,
    followpos: BTreeMap<Position, BTreeSet<Position>>,
    symbols: BTreeMap<Position, char>,
}

impl Annotator {
    fn visit(&mut self, tree: &RegexTree) -> Attributes {
        match tree {
            RegexTree::Leaf(None) => Attributes {
                nullable: true,
                firstpos: BTreeSet::new(),
                lastpos: BTreeSet::new(),
            },
            RegexTree::Leaf(Some(symbol)) => {
                self.next_position += 1;
                let position = self.next_position;
                self.symbols.insert(position, *symbol);
                let singleton = BTreeSet::from([position]);
                Attributes {
                    nullable: false,
                    firstpos: singleton.clone(),
                    lastpos: singleton,
                }
            }
            RegexTree::Star(child) => {
                let child = self.visit(child);
                for &position in &child.lastpos {
                    self.followpos
                        .entry(position)
                        .or_default()
                        .extend(child.firstpos.iter().copied());
                }
                Attributes {
                    nullable: true,
                    firstpos: child.firstpos,
                    lastpos: child.lastpos,
                }
            }
            RegexTree::Or(left, right) => {
                let left = self.visit(left);
                let right = self.visit(right);
                Attributes {
                    nullable: left.nullable || right.nullable,
                    firstpos: left.firstpos.union(&right.firstpos).copied().collect(),
                    lastpos: left.lastpos.union(&right.lastpos).copied().collect(),
                }
            }
            RegexTree::Cat(left, right) => {
                let left = self.visit(left);
                let right = self.visit(right);
                for &position in &left.lastpos {
                    self.followpos
                        .entry(position)
                        .or_default()
                        .extend(right.firstpos.iter().copied());
                }
                let firstpos = if left.nullable {
                    left.firstpos.union(&right.firstpos).copied().collect()
                } else {
                    left.firstpos
                };
                let lastpos = if right.nullable {
                    left.lastpos.union(&right.lastpos).copied().collect()
                } else {
                    right.lastpos
                };
                Attributes {
                    nullable: left.nullable && right.nullable,
                    firstpos,
                    lastpos,
                }
            }
        }
    }
}
