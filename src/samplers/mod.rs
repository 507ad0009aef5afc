//! Hypothesis choosers.
//!
//! A chooser is any iterator of [`Hypothesis`](crate::types::Hypothesis)
//! values: ascending, distinct indices into the data set, one per candidate
//! model. Two strategies ship with the crate:
//! - [`RandomChooser`]: uniform draws with repetition, never ends on its own.
//! - [`ExhaustiveChooser`]: every combination once, in lexicographic order.

pub mod exhaustive;
pub mod uniform;

pub use exhaustive::{combinations, ExhaustiveChooser};
pub use uniform::RandomChooser;
