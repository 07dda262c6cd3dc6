//! Document-analysis response types.
//!
//! These mirror the block-based shape returned by the analysis service
//! (`{"Blocks": [...]}` with PascalCase keys), so a saved response can be
//! read back with `serde_json` unchanged.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// The analysis result for one page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AnalysisResponse {
    /// Every detected block, in service order
    #[serde(default)]
    pub blocks: Vec<Block>,
}

impl AnalysisResponse {
    /// Create a response from a list of blocks.
    pub fn new(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    /// Decode a response from its JSON representation.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::ResponseFormat(e.to_string()))
    }

    /// Encode the response as JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| Error::Render(e.to_string()))
    }

    /// Text of all LINE blocks joined with newlines, in block order.
    pub fn line_text(&self) -> String {
        self.blocks
            .iter()
            .filter(|b| b.block_type == BlockType::Line)
            .map(|b| b.text.as_deref().unwrap_or_default())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Index blocks by identifier. Duplicate ids keep the last block.
    pub fn block_map(&self) -> HashMap<&str, &Block> {
        self.blocks.iter().map(|b| (b.id.as_str(), b)).collect()
    }

    /// Iterate over blocks of one type.
    pub fn blocks_of(&self, block_type: BlockType) -> impl Iterator<Item = &Block> {
        self.blocks
            .iter()
            .filter(move |b| b.block_type == block_type)
    }
}

/// Kind of a detected block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BlockType {
    Page,
    Line,
    Word,
    Table,
    Cell,
    KeyValueSet,
    SelectionElement,
    /// Any block type this crate does not interpret
    #[serde(other)]
    Other,
}

impl BlockType {
    /// Map the service's wire name to a block type.
    pub fn from_wire(name: &str) -> Self {
        match name {
            "PAGE" => BlockType::Page,
            "LINE" => BlockType::Line,
            "WORD" => BlockType::Word,
            "TABLE" => BlockType::Table,
            "CELL" => BlockType::Cell,
            "KEY_VALUE_SET" => BlockType::KeyValueSet,
            "SELECTION_ELEMENT" => BlockType::SelectionElement,
            _ => BlockType::Other,
        }
    }
}

/// Kind of an edge between blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelationshipType {
    Child,
    Value,
    #[serde(other)]
    Other,
}

impl RelationshipType {
    /// Map the service's wire name to a relationship type.
    pub fn from_wire(name: &str) -> Self {
        match name {
            "CHILD" => RelationshipType::Child,
            "VALUE" => RelationshipType::Value,
            _ => RelationshipType::Other,
        }
    }
}

/// An edge from a block to a list of other blocks, by identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Relationship {
    #[serde(rename = "Type")]
    pub kind: RelationshipType,

    #[serde(default)]
    pub ids: Vec<String>,
}

impl Relationship {
    /// Create a CHILD relationship.
    pub fn children<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            kind: RelationshipType::Child,
            ids: ids.into_iter().map(Into::into).collect(),
        }
    }
}

/// An atomic unit of the analysis response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Block {
    pub block_type: BlockType,

    /// Opaque identifier, unique within a response
    pub id: String,

    /// Detected text (LINE and WORD blocks)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub relationships: Vec<Relationship>,

    /// 1-based row of a CELL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_index: Option<u32>,

    /// 1-based column of a CELL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_index: Option<u32>,
}

impl Block {
    /// Create a bare block with no text or relationships.
    pub fn new(block_type: BlockType, id: impl Into<String>) -> Self {
        Self {
            block_type,
            id: id.into(),
            text: None,
            relationships: Vec::new(),
            row_index: None,
            column_index: None,
        }
    }

    /// Create a LINE block.
    pub fn line(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(BlockType::Line, id).with_text(text)
    }

    /// Create a WORD block.
    pub fn word(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(BlockType::Word, id).with_text(text)
    }

    /// Create a TABLE block owning the given cells.
    pub fn table<I, S>(id: impl Into<String>, cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(BlockType::Table, id).with_children(cells)
    }

    /// Create a CELL block at a 1-based (row, column) owning the given words.
    pub fn cell<I, S>(id: impl Into<String>, row: u32, column: u32, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut block = Self::new(BlockType::Cell, id).with_children(words);
        block.row_index = Some(row);
        block.column_index = Some(column);
        block
    }

    /// Set the text.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Append a CHILD relationship.
    pub fn with_children<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.relationships.push(Relationship::children(ids));
        self
    }

    /// Identifiers of all CHILD relationships, in order.
    pub fn child_ids(&self) -> impl Iterator<Item = &str> {
        self.relationships
            .iter()
            .filter(|r| r.kind == RelationshipType::Child)
            .flat_map(|r| r.ids.iter().map(String::as_str))
    }
}
