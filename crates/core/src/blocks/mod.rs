//! Page content blocks: types, structural rules and editing helpers.
//!
//! A page body is an ordered list of blocks. Order is carried by an explicit
//! `position` field which must always form the contiguous range `0..N`.
//! [`rules`] checks a candidate list, [`editing`] applies the structural
//! edits a client performs and renumbers afterwards.

pub mod editing;
pub mod rules;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub use editing::normalize_positions;
pub use rules::{
    check_blocks, find_unknown_images, trim_image_paths, validate_blocks, BlockViolation,
};

// ---------------------------------------------------------------------------
// Block type constants
// ---------------------------------------------------------------------------

pub const BLOCK_TYPE_HEADER: &str = "header";
pub const BLOCK_TYPE_PARAGRAPH: &str = "paragraph";
pub const BLOCK_TYPE_IMAGE: &str = "image";

/// All valid block type names, as stored in `blocks.block_type`.
pub const VALID_BLOCK_TYPES: &[&str] = &[BLOCK_TYPE_HEADER, BLOCK_TYPE_PARAGRAPH, BLOCK_TYPE_IMAGE];

/// Kind of content a block holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockType {
    Header,
    Paragraph,
    /// Content is the path of an entry in the image catalogue.
    Image,
}

impl BlockType {
    pub fn as_str(self) -> &'static str {
        match self {
            BlockType::Header => BLOCK_TYPE_HEADER,
            BlockType::Paragraph => BLOCK_TYPE_PARAGRAPH,
            BlockType::Image => BLOCK_TYPE_IMAGE,
        }
    }

    /// Everything that is not a header counts as page body.
    pub fn is_body(self) -> bool {
        self != BlockType::Header
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BlockType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            BLOCK_TYPE_HEADER => Ok(BlockType::Header),
            BLOCK_TYPE_PARAGRAPH => Ok(BlockType::Paragraph),
            BLOCK_TYPE_IMAGE => Ok(BlockType::Image),
            other => Err(CoreError::Validation(format!(
                "Invalid block type '{other}'. Must be one of: {}",
                VALID_BLOCK_TYPES.join(", ")
            ))),
        }
    }
}

/// A block as submitted by a client or held by an editor, before it has a
/// database id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockDraft {
    pub block_type: BlockType,
    pub content: String,
    pub position: i32,
}

impl BlockDraft {
    pub fn new(block_type: BlockType, content: impl Into<String>, position: i32) -> Self {
        Self {
            block_type,
            content: content.into(),
            position,
        }
    }
}
