//! Track records: what one observed play looks like.
//!
//! A `TrackRecord` is the unit stored in the play history. Equality over
//! all six fields is the only dedup key; there is no separate track id.

mod model;

pub use model::*;
