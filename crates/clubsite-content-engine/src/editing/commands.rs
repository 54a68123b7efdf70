use crate::models::{BlockId, BlockKind, TemplateKind};

/// Direction for [`BlockCmd::Move`]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
}

/// Edits the authoring surface can make to a block sequence.
///
/// Blocks are always addressed by id, never by position, so a command built
/// from a stale view cannot hit the wrong block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BlockCmd {
    /// Add an empty block of `kind` at the end
    Append { kind: BlockKind },
    /// Delete the block, subject to the [`RemovalPolicy`]
    Remove { id: BlockId },
    /// Swap the block with its neighbour in `direction`
    Move { id: BlockId, direction: Direction },
    /// Replace the block's value
    SetValue { id: BlockId, value: String },
}

/// Minimum-count rule applied to [`BlockCmd::Remove`].
///
/// The generic block editor lets authors remove every block; the sections
/// editor always keeps one entry to type into.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum RemovalPolicy {
    #[default]
    AllowEmpty,
    KeepAtLeastOne,
}

impl RemovalPolicy {
    /// Report articles are authored as sections; everything else uses the
    /// generic block editor.
    pub fn for_template(kind: TemplateKind) -> Self {
        match kind {
            TemplateKind::Report => RemovalPolicy::KeepAtLeastOne,
            TemplateKind::News | TemplateKind::Event | TemplateKind::Custom => {
                RemovalPolicy::AllowEmpty
            }
        }
    }

    pub fn min_blocks(self) -> usize {
        match self {
            RemovalPolicy::AllowEmpty => 0,
            RemovalPolicy::KeepAtLeastOne => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(TemplateKind::News, 0)]
    #[case(TemplateKind::Event, 0)]
    #[case(TemplateKind::Custom, 0)]
    #[case(TemplateKind::Report, 1)]
    fn test_policy_for_template(#[case] kind: TemplateKind, #[case] min: usize) {
        assert_eq!(RemovalPolicy::for_template(kind).min_blocks(), min);
    }
}
