//! Small shared types.
//!
//! Interfaces in FR are two-sided: every interior face has a LEFT and a
//! RIGHT neighbour and most face-local buffers come in pairs. [`SidePair`]
//! stores such pairs with named fields while still allowing indexing by
//! [`Side`].

mod sides;

pub use sides::{Side, SidePair};
