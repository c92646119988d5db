//! Merging an existing document with a freshly generated one.
//!
//! Sections the user already has stay where they are (taking the regenerated
//! text), sections the program no longer declares are left untouched, and
//! sections new to this program version are added after them. The result is
//! pure text; persisting it is up to the caller.

use crate::parser::{Block, extract_blocks};
use similar::TextDiff;

/// Newly introduced blocks carrying this text are moved near the top.
pub const PRIORITY_MARKER: &str = "DB Config";

/// Position a prioritized block is inserted at.
pub const PRIORITY_INDEX: usize = 1;

/// Identity key of the section every generated document starts with.
pub const BASE_KEY: &str = "Base";

/// What happened to a block of the reconciled document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockAction {
    /// Old block kept verbatim; the new generation no longer declares it.
    Kept,
    /// Old block replaced by the regenerated block with the same key.
    Replaced,
    /// New block added at the end.
    Appended,
    /// New block inserted near the top.
    Prioritized,
}

/// Outcome of [`reconcile`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    /// Blocks of the reconciled document, in order.
    pub blocks: Vec<Block>,
    /// `actions[i]` describes `blocks[i]`.
    pub actions: Vec<BlockAction>,
    /// Reconciled document text.
    pub text: String,
    /// Whether `text` differs from the old document.
    pub changed: bool,
}

impl Reconciliation {
    /// Identity keys in reconciled order.
    pub fn keys(&self) -> Vec<String> {
        self.blocks.iter().map(Block::key).collect()
    }

    /// Number of blocks that ended up with the given action.
    pub fn count(&self, action: BlockAction) -> usize {
        self.actions.iter().filter(|a| **a == action).count()
    }

    /// Unified diff from `old` to the reconciled text.
    pub fn diff(&self, old: &str) -> String {
        TextDiff::from_lines(old, self.text.as_str())
            .unified_diff()
            .context_radius(3)
            .header("current", "reconciled")
            .to_string()
    }
}

/// Whether a newly introduced block belongs near the top of the document.
pub fn is_priority_block(block: &Block) -> bool {
    block.body.starts_with('#') && block.body.contains(PRIORITY_MARKER)
}

/// Joins block bodies with one blank line between blocks.
pub fn render_blocks(blocks: &[Block]) -> String {
    blocks
        .iter()
        .map(|block| block.body.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Reconciles `old` against the regenerated `new` document.
///
/// # Example
/// ```
/// use confsync_blocks::banner::format_banner;
/// use confsync_blocks::reconcile::reconcile;
///
/// let old = format!("{}\nLog: \n  Level: \"debug\"\n", format_banner("Log"));
/// let new = format!("{}\nBase: \n  Name: \"svc\"\n", format_banner("Base"));
///
/// let merged = reconcile(&old, &new);
/// assert_eq!(merged.keys(), vec!["Log", "Base"]);
/// assert!(merged.changed);
/// ```
pub fn reconcile(old: &str, new: &str) -> Reconciliation {
    let old_blocks = extract_blocks(old);
    let new_blocks = extract_blocks(new);
    let new_keys: Vec<String> = new_blocks.iter().map(Block::key).collect();
    let mut consumed = vec![false; new_blocks.len()];

    let mut blocks = Vec::with_capacity(old_blocks.len() + new_blocks.len());
    let mut actions = Vec::with_capacity(blocks.capacity());

    for old_block in old_blocks {
        let key = old_block.key();
        let matched = new_keys
            .iter()
            .enumerate()
            .position(|(i, new_key)| !consumed[i] && *new_key == key);
        match matched {
            Some(i) => {
                consumed[i] = true;
                blocks.push(new_blocks[i].clone());
                actions.push(BlockAction::Replaced);
            }
            None => {
                blocks.push(old_block);
                actions.push(BlockAction::Kept);
            }
        }
    }

    for (block, _) in new_blocks
        .into_iter()
        .zip(consumed)
        .filter(|(_, consumed)| !consumed)
    {
        if is_priority_block(&block) {
            let index = priority_index(&blocks);
            tracing::debug!(key = %block.key(), index, "Inserting prioritized block");
            blocks.insert(index, block);
            actions.insert(index, BlockAction::Prioritized);
        } else {
            blocks.push(block);
            actions.push(BlockAction::Appended);
        }
    }

    let text = render_blocks(&blocks);
    let changed = text != old;

    Reconciliation {
        blocks,
        actions,
        text,
        changed,
    }
}

// Directly after the leading block once there is more than one; a lone
// block only stays ahead when it is the Base section.
fn priority_index(blocks: &[Block]) -> usize {
    match blocks {
        [] => 0,
        [only] if only.key() != BASE_KEY => 0,
        _ => PRIORITY_INDEX,
    }
}
