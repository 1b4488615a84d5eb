pub mod freq_chain;
pub mod slot_arena;

pub use freq_chain::FreqChain;
pub use slot_arena::{SlotArena, SlotId};
