//! Structural edits on a block list.
//!
//! Each edit takes the current list, returns a new one and never mutates its
//! input, so a rejected edit leaves the caller's state untouched. Every edit
//! ends with [`normalize_positions`]; no other code renumbers blocks.

use super::rules::BlockViolation;
use super::{BlockDraft, BlockType};
use crate::error::CoreError;

/// Sort by current position (stable for ties) and renumber to `0..N`.
pub fn normalize_positions(mut blocks: Vec<BlockDraft>) -> Vec<BlockDraft> {
    blocks.sort_by_key(|b| b.position);
    for (index, block) in blocks.iter_mut().enumerate() {
        block.position = index as i32;
    }
    blocks
}

/// Add an empty block of `block_type` after the last one.
pub fn append_block(blocks: &[BlockDraft], block_type: BlockType) -> Vec<BlockDraft> {
    let mut next = normalize_positions(blocks.to_vec());
    let position = next.len() as i32;
    next.push(BlockDraft::new(block_type, String::new(), position));
    next
}

/// Remove the block at `position` and close the gap.
///
/// Rejected when the result would have no header or no body block.
pub fn remove_block(blocks: &[BlockDraft], position: i32) -> Result<Vec<BlockDraft>, CoreError> {
    let mut next = normalize_positions(blocks.to_vec());
    let index = index_of(&next, position)?;
    next.remove(index);
    ensure_composition(&next)?;
    Ok(normalize_positions(next))
}

/// Swap the block at `position` with the one before it. No-op for the first block.
pub fn move_up(blocks: &[BlockDraft], position: i32) -> Result<Vec<BlockDraft>, CoreError> {
    let mut next = normalize_positions(blocks.to_vec());
    let index = index_of(&next, position)?;
    if index > 0 {
        swap_positions(&mut next, index, index - 1);
    }
    Ok(normalize_positions(next))
}

/// Swap the block at `position` with the one after it. No-op for the last block.
pub fn move_down(blocks: &[BlockDraft], position: i32) -> Result<Vec<BlockDraft>, CoreError> {
    let mut next = normalize_positions(blocks.to_vec());
    let index = index_of(&next, position)?;
    if index + 1 < next.len() {
        swap_positions(&mut next, index, index + 1);
    }
    Ok(normalize_positions(next))
}

/// Change the type of the block at `position`.
///
/// Rejected when this would turn the last header into body or the last body
/// block into a header.
pub fn change_type(
    blocks: &[BlockDraft],
    position: i32,
    block_type: BlockType,
) -> Result<Vec<BlockDraft>, CoreError> {
    let mut next = normalize_positions(blocks.to_vec());
    let index = index_of(&next, position)?;
    next[index].block_type = block_type;
    ensure_composition(&next)?;
    Ok(next)
}

/// Replace the content of the block at `position`.
pub fn set_content(
    blocks: &[BlockDraft],
    position: i32,
    content: impl Into<String>,
) -> Result<Vec<BlockDraft>, CoreError> {
    let mut next = normalize_positions(blocks.to_vec());
    let index = index_of(&next, position)?;
    next[index].content = content.into();
    Ok(next)
}

fn index_of(blocks: &[BlockDraft], position: i32) -> Result<usize, CoreError> {
    blocks
        .iter()
        .position(|b| b.position == position)
        .ok_or_else(|| CoreError::InvalidContent(vec![BlockViolation::InvalidPosition]))
}

fn swap_positions(blocks: &mut [BlockDraft], a: usize, b: usize) {
    let pos_a = blocks[a].position;
    blocks[a].position = blocks[b].position;
    blocks[b].position = pos_a;
}

fn ensure_composition(blocks: &[BlockDraft]) -> Result<(), CoreError> {
    let mut violations = Vec::new();
    if !blocks.iter().any(|b| b.block_type == BlockType::Header) {
        violations.push(BlockViolation::MissingHeader);
    }
    if !blocks.iter().any(|b| b.block_type.is_body()) {
        violations.push(BlockViolation::MissingBody);
    }
    if violations.is_empty() {
        Ok(())
    } else {
        Err(CoreError::InvalidContent(violations))
    }
}
