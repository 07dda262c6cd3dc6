//! Fixed-coordinate table lookups.

use std::collections::HashMap;

use crate::model::{AnalysisResponse, Block, BlockType, Field, Record};

/// Maps a 0-based table cell coordinate to a record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableRule {
    pub row: u32,
    pub column: u32,
    pub field: Field,
}

impl TableRule {
    pub const fn new(row: u32, column: u32, field: Field) -> Self {
        Self { row, column, field }
    }
}

/// The totals row of the EOB claim table.
pub const TABLE_RULES: &[TableRule] = &[
    TableRule::new(4, 0, Field::TotalAmountCharged),
    TableRule::new(4, 1, Field::TotalContractedAmount),
    TableRule::new(4, 2, Field::AmountEligibleForCoverage),
];

/// A resolved table cell with 0-based coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellText {
    pub row: u32,
    pub column: u32,
    pub text: String,
}

/// Resolve every CELL of every TABLE, in table then relationship order.
///
/// Missing row or column indices count as 1. Identifiers with no matching
/// block are skipped.
pub fn table_cells(response: &AnalysisResponse) -> Vec<CellText> {
    let blocks = response.block_map();
    let mut cells = Vec::new();

    for table in response.blocks_of(BlockType::Table) {
        for cell in resolve(&blocks, table.child_ids()) {
            if cell.block_type != BlockType::Cell {
                continue;
            }
            cells.push(CellText {
                row: cell.row_index.unwrap_or(1).saturating_sub(1),
                column: cell.column_index.unwrap_or(1).saturating_sub(1),
                text: cell_text(&blocks, cell),
            });
        }
    }

    cells
}

/// Concatenated text of a cell's WORD children, trimmed.
fn cell_text(blocks: &HashMap<&str, &Block>, cell: &Block) -> String {
    resolve(blocks, cell.child_ids())
        .filter(|b| b.block_type == BlockType::Word)
        .filter_map(|b| b.text.as_deref())
        .collect::<String>()
        .trim()
        .to_string()
}

fn resolve<'a>(
    blocks: &'a HashMap<&'a str, &'a Block>,
    ids: impl Iterator<Item = &'a str> + 'a,
) -> impl Iterator<Item = &'a Block> + 'a {
    ids.filter_map(move |id| {
        let block = blocks.get(id).copied();
        if block.is_none() {
            log::debug!("Skipping dangling block id {}", id);
        }
        block
    })
}

/// Assign cell text to the fields whose rule matches the cell coordinate.
pub fn apply_rules(rules: &[TableRule], cells: &[CellText], record: &mut Record) {
    for cell in cells {
        for rule in rules
            .iter()
            .filter(|r| r.row == cell.row && r.column == cell.column)
        {
            log::debug!(
                "{} from cell ({}, {}): {:?}",
                rule.field,
                cell.row,
                cell.column,
                cell.text
            );
            record.set(rule.field, cell.text.as_str());
        }
    }
}
