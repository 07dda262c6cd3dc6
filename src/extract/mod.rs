//! Field extraction: turn one page's analysis response into a [`Record`].
//!
//! Two rule sets are applied:
//!
//! - [`FIELD_PATTERNS`]: case-insensitive regexes over the newline-joined
//!   text of the page's LINE blocks.
//! - [`TABLE_RULES`]: fixed (row, column) coordinates in the page's tables.
//!
//! Nothing here fails on a missing field; it just stays `None`.
//!
//! # Example
//!
//! ```
//! use eobscan::extract::FieldExtractor;
//! use eobscan::model::{AnalysisResponse, Block, Field};
//!
//! let extractor = FieldExtractor::new().unwrap();
//! let response = AnalysisResponse::new(vec![Block::line("1", "Payment number: 1001")]);
//! let record = extractor.extract(&response);
//! assert_eq!(record.get(Field::PaymentNumber), Some("1001"));
//! ```

mod patterns;
mod table;

pub use patterns::{compile_patterns, FieldPattern, FIELD_PATTERNS};
pub use table::{apply_rules, table_cells, CellText, TableRule, TABLE_RULES};

use crate::error::Result;
use crate::model::{AnalysisResponse, Field, Record};

/// Extracts EOB fields from analysis responses.
///
/// Patterns are compiled once at construction; reuse the extractor across
/// pages.
#[derive(Debug, Clone)]
pub struct FieldExtractor {
    patterns: Vec<FieldPattern>,
    table_rules: Vec<TableRule>,
}

impl FieldExtractor {
    /// Create an extractor with the standard EOB rules.
    pub fn new() -> Result<Self> {
        Self::with_rules(FIELD_PATTERNS, TABLE_RULES)
    }

    /// Create an extractor with custom rules.
    pub fn with_rules(patterns: &[(Field, &str)], table_rules: &[TableRule]) -> Result<Self> {
        Ok(Self {
            patterns: compile_patterns(patterns)?,
            table_rules: table_rules.to_vec(),
        })
    }

    /// Extract a record from one page's response.
    pub fn extract(&self, response: &AnalysisResponse) -> Record {
        let mut record = Record::new();

        let text = response.line_text();
        for pattern in &self.patterns {
            pattern.apply(&text, &mut record);
        }

        if !self.table_rules.is_empty() {
            let cells = table_cells(response);
            apply_rules(&self.table_rules, &cells, &mut record);
        }

        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Block;

    fn eob_page() -> AnalysisResponse {
        AnalysisResponse::new(vec![
            Block::line("l1", "Payment to: Springfield Clinic"),
            Block::line("l2", "Payment date: Jan 05, 2024"),
            Block::line("l3", "Payment number: 88123"),
            Block::line("l4", "PATIENT NAME: JOHN Q DOE"),
            Block::line("l5", "Member ID: 4455"),
            Block::line("l6", "HEALTH CARE PROFESSIONAL"),
            Block::line("l7", "Provider ID: 9001"),
            Block::table("t1", ["c1", "c2", "c3"]),
            Block::cell("c1", 5, 1, ["w1"]),
            Block::cell("c2", 5, 2, ["w2"]),
            Block::cell("c3", 5, 3, ["w3"]),
            Block::word("w1", "$300.00"),
            Block::word("w2", "$210.00"),
            Block::word("w3", "$180.00"),
        ])
    }

    #[test]
    fn test_extracts_every_rule() {
        let record = FieldExtractor::new().unwrap().extract(&eob_page());
        assert_eq!(record.get(Field::PaymentTo), Some("Springfield Clinic"));
        assert_eq!(record.get(Field::PaymentDate), Some("Jan 05, 2024"));
        assert_eq!(record.get(Field::PaymentNumber), Some("88123"));
        assert_eq!(record.get(Field::PatientName), Some("JOHN Q DOE"));
        assert_eq!(record.get(Field::PatientId), Some("4455"));
        assert_eq!(record.get(Field::ServiceProviderId), Some("9001"));
        assert_eq!(record.get(Field::TotalAmountCharged), Some("$300.00"));
        assert_eq!(record.get(Field::TotalContractedAmount), Some("$210.00"));
        assert_eq!(record.get(Field::AmountEligibleForCoverage), Some("$180.00"));
    }

    #[test]
    fn test_service_on_is_never_filled() {
        let record = FieldExtractor::new().unwrap().extract(&eob_page());
        assert_eq!(record.get(Field::ServiceOn), None);
        assert_eq!(record.filled_count(), Field::COUNT - 1);
    }

    #[test]
    fn test_empty_response() {
        let record = FieldExtractor::new()
            .unwrap()
            .extract(&AnalysisResponse::default());
        assert!(record.is_empty());
    }

    #[test]
    fn test_later_pattern_for_same_field_wins_on_match() {
        let extractor = FieldExtractor::with_rules(
            &[
                (Field::PaymentNumber, r"Payment number:\s*(\d+)"),
                (Field::PaymentNumber, r"Check #\s*(\d+)"),
            ],
            &[],
        )
        .unwrap();

        let both = AnalysisResponse::new(vec![
            Block::line("1", "Payment number: 1"),
            Block::line("2", "Check # 2"),
        ]);
        assert_eq!(extractor.extract(&both).get(Field::PaymentNumber), Some("2"));

        let first_only = AnalysisResponse::new(vec![Block::line("1", "Payment number: 1")]);
        assert_eq!(
            extractor.extract(&first_only).get(Field::PaymentNumber),
            Some("1")
        );
    }

    #[test]
    fn test_invalid_custom_pattern() {
        let result = FieldExtractor::with_rules(&[(Field::PatientName, "(")], &[]);
        assert!(matches!(result, Err(crate::Error::Pattern(_))));
    }
}
