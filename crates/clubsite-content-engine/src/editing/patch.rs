use crate::editing::BlockSequence;
use crate::models::BlockId;

/// Result of applying a command: the new sequence plus what happened
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Patch {
    pub blocks: BlockSequence,
    pub outcome: Outcome,
}

/// What a command did to the sequence
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Appended(BlockId),
    Removed(BlockId),
    Moved { id: BlockId, from: usize, to: usize },
    Updated(BlockId),
    Unchanged(Unchanged),
}

/// Why a command left the sequence as it was
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Unchanged {
    /// No block has that id
    UnknownId,
    /// First block moved up, or last block moved down
    AtBoundary,
    /// Removal refused by [`crate::editing::RemovalPolicy::KeepAtLeastOne`]
    LastBlockKept,
    /// New value equals the current one
    SameValue,
    /// Custom articles have no block sequence
    NoBlocks,
}

impl Outcome {
    pub fn is_change(&self) -> bool {
        !matches!(self, Outcome::Unchanged(_))
    }
}

impl Unchanged {
    /// Short explanation shown by the authoring surface
    pub fn describe(self) -> &'static str {
        match self {
            Unchanged::UnknownId => "That block no longer exists",
            Unchanged::AtBoundary => "Block is already at the edge",
            Unchanged::LastBlockKept => "At least one section is required",
            Unchanged::SameValue => "Nothing changed",
            Unchanged::NoBlocks => "This layout has no editable blocks",
        }
    }
}
