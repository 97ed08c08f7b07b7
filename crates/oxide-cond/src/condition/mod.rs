//! Condition clauses (`WHERE`, `HAVING`, `ON`)
//!
//! [`Condition::parse`] turns a clause into a [`ConditionNode`] tree whose
//! leaves are [`SimpleCondition`]s picked by [`SimpleCondition::identify`].

mod between;
mod builder;
mod comparison;
mod in_condition;
mod like;
mod node;
mod null;
mod precedence;
mod simple;
mod unknown;

pub use between::BetweenCondition;
pub use builder::Condition;
pub use comparison::{ComparisonCondition, ComparisonOp, ComparisonRhs};
pub use in_condition::{InCondition, InValues};
pub use like::LikeCondition;
pub use node::{ConditionNode, Connective};
pub use null::NullCondition;
pub use precedence::ALLOWED_KEYWORDS;
pub use simple::SimpleCondition;
pub use unknown::NotYetImplementedCondition;

pub(crate) use simple::{render, take_unit};
