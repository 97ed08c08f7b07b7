//! The condition tree.

use core::fmt;

use super::simple::SimpleCondition;

/// A binary logical connective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Connective {
    /// `AND`
    And,
    /// `&&`
    AmpAmp,
    /// `OR`
    Or,
    /// `||`
    PipePipe,
    /// `XOR`
    Xor,
}

impl Connective {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::AmpAmp => "&&",
            Self::Or => "OR",
            Self::PipePipe => "||",
            Self::Xor => "XOR",
        }
    }

    /// Binding strength; higher binds tighter.
    #[must_use]
    pub const fn precedence(&self) -> u8 {
        match self {
            Self::And | Self::AmpAmp => 2,
            Self::Or | Self::PipePipe | Self::Xor => 1,
        }
    }
}

impl fmt::Display for Connective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A node of the condition tree.
///
/// Internal nodes are connectives: `Not` has exactly one child and `Binary`
/// exactly two. Leaves wrap a classified [`SimpleCondition`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ConditionNode {
    /// `NOT child`
    Not(Box<ConditionNode>),
    /// `left op right`
    Binary {
        /// The connective.
        op: Connective,
        /// Left operand.
        left: Box<ConditionNode>,
        /// Right operand.
        right: Box<ConditionNode>,
    },
    /// A simple condition.
    Leaf(SimpleCondition),
}

impl ConditionNode {
    /// Creates a `NOT` node.
    #[must_use]
    pub fn not(child: Self) -> Self {
        Self::Not(Box::new(child))
    }

    /// Creates a binary node.
    #[must_use]
    pub fn binary(op: Connective, left: Self, right: Self) -> Self {
        Self::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// The node tag: the connective spelling for internal nodes, `LEAF` otherwise.
    #[must_use]
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::Not(_) => "NOT",
            Self::Binary { op, .. } => op.as_str(),
            Self::Leaf(_) => "LEAF",
        }
    }

    /// Returns true for leaves.
    #[must_use]
    pub const fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf(_))
    }

    /// The only child of `NOT`, or the left child of a binary node.
    #[must_use]
    pub fn left(&self) -> Option<&Self> {
        match self {
            Self::Not(child) | Self::Binary { left: child, .. } => Some(child),
            Self::Leaf(_) => None,
        }
    }

    /// The right child of a binary node.
    #[must_use]
    pub fn right(&self) -> Option<&Self> {
        match self {
            Self::Binary { right, .. } => Some(right),
            Self::Not(_) | Self::Leaf(_) => None,
        }
    }

    /// The simple condition of a leaf.
    #[must_use]
    pub const fn leaf(&self) -> Option<&SimpleCondition> {
        match self {
            Self::Leaf(condition) => Some(condition),
            Self::Not(_) | Self::Binary { .. } => None,
        }
    }

    /// Number of leaves.
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        match self {
            Self::Leaf(_) => 1,
            Self::Not(child) => child.leaf_count(),
            Self::Binary { left, right, .. } => left.leaf_count() + right.leaf_count(),
        }
    }

    /// Number of internal (connective) nodes.
    #[must_use]
    pub fn operator_count(&self) -> usize {
        match self {
            Self::Leaf(_) => 0,
            Self::Not(child) => 1 + child.operator_count(),
            Self::Binary { left, right, .. } => 1 + left.operator_count() + right.operator_count(),
        }
    }

    /// Height of the tree; a single leaf has depth 1.
    #[must_use]
    pub fn depth(&self) -> usize {
        match self {
            Self::Leaf(_) => 1,
            Self::Not(child) => 1 + child.depth(),
            Self::Binary { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }

    /// All leaves, left to right.
    #[must_use]
    pub fn leaves(&self) -> Vec<&SimpleCondition> {
        let mut leaves = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            match node {
                Self::Leaf(condition) => leaves.push(condition),
                Self::Not(child) => stack.push(child),
                Self::Binary { left, right, .. } => {
                    stack.push(right);
                    stack.push(left);
                }
            }
        }
        leaves
    }

    fn fmt_operand(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Binary { .. } => write!(f, "({self})"),
            Self::Not(_) | Self::Leaf(_) => write!(f, "{self}"),
        }
    }
}

impl From<SimpleCondition> for ConditionNode {
    fn from(condition: SimpleCondition) -> Self {
        Self::Leaf(condition)
    }
}

impl fmt::Display for ConditionNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Leaf(condition) => write!(f, "{condition}"),
            Self::Not(child) => {
                f.write_str("NOT ")?;
                child.fmt_operand(f)
            }
            Self::Binary { op, left, right } => {
                left.fmt_operand(f)?;
                write!(f, " {op} ")?;
                right.fmt_operand(f)
            }
        }
    }
}
