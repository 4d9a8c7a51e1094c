//! Structural rules for a page's block list.
//!
//! All checks run on every call and every violation is returned, so a client
//! can show the whole list of problems at once.

use std::collections::HashSet;

use serde::Serialize;

use super::{BlockDraft, BlockType};
use crate::error::CoreError;

/// A single rule a block list breaks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BlockViolation {
    #[error("A page needs at least one header block")]
    MissingHeader,

    #[error("A page needs at least one block that is not a header")]
    MissingBody,

    #[error("Block positions must be unique and contiguous starting from 0")]
    InvalidPosition,

    #[error("Block at position {position} has empty content")]
    EmptyContent { position: i32 },

    #[error("Block at position {position} references unknown image '{path}'")]
    UnknownImage { position: i32, path: String },
}

/// Check a candidate block list against the page content rules.
///
/// Returns every violation found. The list is accepted when it holds at
/// least one header, at least one non-header, positions that are exactly
/// `{0, .., N-1}` and no block whose trimmed content is empty.
pub fn validate_blocks(blocks: &[BlockDraft]) -> Result<(), Vec<BlockViolation>> {
    let mut violations = Vec::new();

    if !blocks.iter().any(|b| b.block_type == BlockType::Header) {
        violations.push(BlockViolation::MissingHeader);
    }
    if !blocks.iter().any(|b| b.block_type.is_body()) {
        violations.push(BlockViolation::MissingBody);
    }
    if !positions_are_contiguous(blocks) {
        violations.push(BlockViolation::InvalidPosition);
    }
    violations.extend(
        blocks
            .iter()
            .filter(|b| b.content.trim().is_empty())
            .map(|b| BlockViolation::EmptyContent {
                position: b.position,
            }),
    );

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

/// [`validate_blocks`] lifted into the domain error type.
pub fn check_blocks(blocks: &[BlockDraft]) -> Result<(), CoreError> {
    validate_blocks(blocks).map_err(CoreError::InvalidContent)
}

/// Report image blocks whose content is not exactly a path in `known_paths`.
///
/// Empty image content is left to [`validate_blocks`]. Run
/// [`trim_image_paths`] first to accept paths with stray whitespace.
pub fn find_unknown_images(blocks: &[BlockDraft], known_paths: &[String]) -> Vec<BlockViolation> {
    let known: HashSet<&str> = known_paths.iter().map(String::as_str).collect();
    blocks
        .iter()
        .filter(|b| b.block_type == BlockType::Image)
        .filter(|b| !b.content.trim().is_empty() && !known.contains(b.content.as_str()))
        .map(|b| BlockViolation::UnknownImage {
            position: b.position,
            path: b.content.clone(),
        })
        .collect()
}

/// Strip surrounding whitespace from image block contents, leaving the
/// stored reference exactly a catalogue path. Other blocks are untouched.
pub fn trim_image_paths(mut blocks: Vec<BlockDraft>) -> Vec<BlockDraft> {
    for block in blocks.iter_mut().filter(|b| b.block_type == BlockType::Image) {
        let trimmed = block.content.trim();
        if trimmed.len() != block.content.len() {
            block.content = trimmed.to_string();
        }
    }
    blocks
}

/// True when the N positions are pairwise distinct and all in `0..N`, which
/// makes them exactly `{0, .., N-1}`.
fn positions_are_contiguous(blocks: &[BlockDraft]) -> bool {
    let mut seen = vec![false; blocks.len()];
    for block in blocks {
        let Ok(pos) = usize::try_from(block.position) else {
            return false;
        };
        match seen.get_mut(pos) {
            Some(slot) if !*slot => *slot = true,
            _ => return false,
        }
    }
    true
}
