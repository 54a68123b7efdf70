use std::collections::HashSet;

use crate::editing::{BlockCmd, Direction, Outcome, Patch, RemovalPolicy, Unchanged};
use crate::models::{BlockId, BlockKind, ContentBlock};

/// Two blocks in the input shared an id
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Duplicate block id: {0}")]
pub struct DuplicateBlockId(pub BlockId);

/// Ordered blocks of an article. Order is render order.
///
/// Every id in the sequence is unique. The value is immutable from the
/// outside: each operation returns a new sequence and leaves `self` as it was,
/// so the authoring surface can hold on to the previous state freely.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BlockSequence {
    blocks: Vec<ContentBlock>,
}

impl BlockSequence {
    pub fn empty() -> Self {
        Self::default()
    }

    /// A single empty text block, the shape of every new article
    pub fn starter() -> Self {
        Self {
            blocks: vec![ContentBlock::empty(BlockKind::Text)],
        }
    }

    pub fn from_blocks(blocks: Vec<ContentBlock>) -> Result<Self, DuplicateBlockId> {
        let mut seen = HashSet::with_capacity(blocks.len());
        for block in &blocks {
            if !seen.insert(&block.id) {
                return Err(DuplicateBlockId(block.id.clone()));
            }
        }
        Ok(Self { blocks })
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ContentBlock> {
        self.blocks.iter()
    }

    pub fn as_slice(&self) -> &[ContentBlock] {
        &self.blocks
    }

    pub fn get(&self, id: &BlockId) -> Option<&ContentBlock> {
        self.blocks.iter().find(|b| &b.id == id)
    }

    pub fn position(&self, id: &BlockId) -> Option<usize> {
        self.blocks.iter().position(|b| &b.id == id)
    }

    pub fn contains(&self, id: &BlockId) -> bool {
        self.position(id).is_some()
    }

    pub fn ids(&self) -> impl Iterator<Item = &BlockId> {
        self.blocks.iter().map(|b| &b.id)
    }

    /// Apply a command. Never fails; refused commands report why in the outcome.
    pub fn apply(&self, cmd: &BlockCmd, policy: RemovalPolicy) -> Patch {
        match cmd {
            BlockCmd::Append { kind } => self.append(*kind),
            BlockCmd::Remove { id } => self.remove(id, policy),
            BlockCmd::Move { id, direction } => self.move_block(id, *direction),
            BlockCmd::SetValue { id, value } => self.set_value(id, value),
        }
    }

    /// Add an empty block of `kind` with a fresh id at the end
    pub fn append(&self, kind: BlockKind) -> Patch {
        let mut id = BlockId::fresh();
        while self.contains(&id) {
            id = BlockId::fresh();
        }

        let mut blocks = self.blocks.clone();
        blocks.push(ContentBlock {
            id: id.clone(),
            kind,
            value: String::new(),
        });
        Patch {
            blocks: Self { blocks },
            outcome: Outcome::Appended(id),
        }
    }

    /// Delete the block with `id`. Unknown ids are a no-op.
    pub fn remove(&self, id: &BlockId, policy: RemovalPolicy) -> Patch {
        let Some(index) = self.position(id) else {
            return self.unchanged(Unchanged::UnknownId);
        };
        if self.blocks.len() <= policy.min_blocks() {
            return self.unchanged(Unchanged::LastBlockKept);
        }

        let mut blocks = self.blocks.clone();
        blocks.remove(index);
        Patch {
            blocks: Self { blocks },
            outcome: Outcome::Removed(id.clone()),
        }
    }

    /// Swap the block with its immediate neighbour. No-op at either end.
    pub fn move_block(&self, id: &BlockId, direction: Direction) -> Patch {
        let Some(from) = self.position(id) else {
            return self.unchanged(Unchanged::UnknownId);
        };
        let to = match direction {
            Direction::Up if from > 0 => from - 1,
            Direction::Down if from + 1 < self.blocks.len() => from + 1,
            _ => return self.unchanged(Unchanged::AtBoundary),
        };

        let mut blocks = self.blocks.clone();
        blocks.swap(from, to);
        Patch {
            blocks: Self { blocks },
            outcome: Outcome::Moved {
                id: id.clone(),
                from,
                to,
            },
        }
    }

    /// Replace the value of the block with `id`; its kind and id stay fixed.
    /// The value is not validated.
    pub fn set_value(&self, id: &BlockId, value: &str) -> Patch {
        let Some(index) = self.position(id) else {
            return self.unchanged(Unchanged::UnknownId);
        };
        if self.blocks[index].value == value {
            return self.unchanged(Unchanged::SameValue);
        }

        let mut blocks = self.blocks.clone();
        blocks[index].value = value.to_string();
        Patch {
            blocks: Self { blocks },
            outcome: Outcome::Updated(id.clone()),
        }
    }

    fn unchanged(&self, reason: Unchanged) -> Patch {
        Patch {
            blocks: self.clone(),
            outcome: Outcome::Unchanged(reason),
        }
    }
}

impl<'a> IntoIterator for &'a BlockSequence {
    type Item = &'a ContentBlock;
    type IntoIter = std::slice::Iter<'a, ContentBlock>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.iter()
    }
}


#[cfg(test)]
mod properties {
    use super::*;
    use crate::tests::{arb_block_kind, arb_block_sequence};
    use proptest::prelude::*;

    /// A command whose target is picked among the blocks present when it runs
    #[derive(Clone, Debug)]
    enum Step {
        Append(BlockKind),
        Remove(usize),
        Move(usize, Direction),
        SetValue(usize, String),
        RemoveUnknown,
    }

    fn arb_direction() -> impl Strategy<Value = Direction> {
        prop_oneof![Just(Direction::Up), Just(Direction::Down)]
    }

    fn arb_policy() -> impl Strategy<Value = RemovalPolicy> {
        prop_oneof![
            Just(RemovalPolicy::AllowEmpty),
            Just(RemovalPolicy::KeepAtLeastOne),
        ]
    }

    fn arb_step() -> impl Strategy<Value = Step> {
        prop_oneof![
            arb_block_kind().prop_map(Step::Append),
            any::<usize>().prop_map(Step::Remove),
            (any::<usize>(), arb_direction()).prop_map(|(i, d)| Step::Move(i, d)),
            (any::<usize>(), "[a-z ]{0,8}").prop_map(|(i, v)| Step::SetValue(i, v)),
            Just(Step::RemoveUnknown),
        ]
    }

    fn resolve(step: &Step, blocks: &BlockSequence) -> BlockCmd {
        let pick = |i: usize| {
            blocks
                .as_slice()
                .get(i % blocks.len().max(1))
                .map(|b| b.id.clone())
                .unwrap_or_else(|| BlockId::from("not-in-article"))
        };
        match step {
            Step::Append(kind) => BlockCmd::Append { kind: *kind },
            Step::Remove(i) => BlockCmd::Remove { id: pick(*i) },
            Step::Move(i, direction) => BlockCmd::Move {
                id: pick(*i),
                direction: *direction,
            },
            Step::SetValue(i, value) => BlockCmd::SetValue {
                id: pick(*i),
                value: value.clone(),
            },
            Step::RemoveUnknown => BlockCmd::Remove {
                id: BlockId::from("not-in-article"),
            },
        }
    }

    proptest! {
        #[test]
        fn test_ids_stay_unique_under_any_command_stream(
            start in arb_block_sequence(),
            steps in prop::collection::vec(arb_step(), 0..40),
            policy in arb_policy(),
        ) {
            let mut blocks = start;
            for step in &steps {
                let cmd = resolve(step, &blocks);
                blocks = blocks.apply(&cmd, policy).blocks;

                let unique: HashSet<_> = blocks.ids().collect();
                prop_assert_eq!(unique.len(), blocks.len());
                prop_assert!(blocks.len() >= policy.min_blocks());
            }
        }

        #[test]
        fn test_remove_unknown_never_changes_sequence(
            blocks in arb_block_sequence(),
            policy in arb_policy(),
        ) {
            let patch = blocks.remove(&BlockId::from("not-in-article"), policy);
            prop_assert_eq!(patch.blocks, blocks);
            prop_assert_eq!(patch.outcome, Outcome::Unchanged(Unchanged::UnknownId));
        }

        #[test]
        fn test_append_then_remove_is_identity(
            blocks in arb_block_sequence(),
            kind in arb_block_kind(),
            policy in arb_policy(),
        ) {
            let appended = blocks.append(kind);
            let Outcome::Appended(id) = appended.outcome else {
                panic!("append always succeeds");
            };
            prop_assert_eq!(appended.blocks.remove(&id, policy).blocks, blocks);
        }

        #[test]
        fn test_move_up_then_down_is_identity(blocks in arb_block_sequence(), i in any::<usize>()) {
            let id = blocks.as_slice()[i % blocks.len()].id.clone();
            let up = blocks.move_block(&id, Direction::Up);
            prop_assume!(up.outcome.is_change());

            let back = up.blocks.move_block(&id, Direction::Down);
            prop_assert_eq!(back.blocks, blocks);
        }
    }
}
