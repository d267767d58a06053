#![no_std]

extern crate alloc;

pub use board::*;
pub use dice::*;
pub use error::*;
pub use persist::*;
pub use row::*;
pub use types::*;

mod board;
mod dice;
mod error;
mod persist;
mod row;
mod types;

/// What a successful mark or lock toggle did to a row.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    Marked,
    Unmarked,
    Locked,
    Unlocked,
}

impl MarkOutcome {
    /// Whether the row's lock state changed as a side effect.
    pub const fn changes_lock(self) -> bool {
        matches!(self, Self::Locked | Self::Unlocked)
    }
}
