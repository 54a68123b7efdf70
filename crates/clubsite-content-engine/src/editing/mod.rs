/*!
 * # Block Editing
 *
 * The authoring surface edits an article's body through a small command set
 * applied to an explicit, immutable [`BlockSequence`]. There is no editor
 * singleton: the caller holds the current sequence and every command yields
 * a new one.
 *
 * ## Commands
 *
 * - **`Append`**: new empty block with a fresh id at the end
 * - **`Remove`**: delete by id, subject to a [`RemovalPolicy`]
 * - **`Move`**: swap with the adjacent block; the only way to reorder
 * - **`SetValue`**: replace a block's value; kind and id never change
 *
 * Commands name blocks by id, so an id captured before earlier edits still
 * points at the same block afterwards. Unknown ids and boundary moves are
 * no-ops reported through [`Outcome::Unchanged`], never errors.
 *
 * ## Usage Pattern
 *
 * ```rust
 * use clubsite_content_engine::editing::*;
 * use clubsite_content_engine::models::BlockKind;
 *
 * let blocks = BlockSequence::starter();
 * let append = BlockCmd::Append { kind: BlockKind::Image };
 * let patch = blocks.apply(&append, RemovalPolicy::AllowEmpty);
 * let Outcome::Appended(image) = patch.outcome else { unreachable!() };
 *
 * let move_up = BlockCmd::Move { id: image, direction: Direction::Up };
 * let patch = patch.blocks.apply(&move_up, RemovalPolicy::AllowEmpty);
 * assert_eq!(patch.blocks.as_slice()[0].kind, BlockKind::Image);
 * ```
 *
 * [`AuthoringSession`] wraps this for one article: it tracks unsaved edits,
 * event field changes, image uploads and saving.
 */

pub mod blocks;
pub mod commands;
pub mod patch;
pub mod session;

pub use blocks::{BlockSequence, DuplicateBlockId};
pub use commands::{BlockCmd, Direction, RemovalPolicy};
pub use patch::{Outcome, Patch, Unchanged};
pub use session::{AuthoringSession, SessionError};
