pub use crate::ds::{FreqChain, SlotArena, SlotId};
pub use crate::error::{CursorError, EmptyCollectionError, InvariantError};
pub use crate::set::{Cursor, FrequencySet, Iter, WeightedCursor, WeightedIter};
