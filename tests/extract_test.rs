//! Integration tests for field extraction from saved analysis responses.

use eobscan::extract::{FieldExtractor, TableRule};
use eobscan::model::{AnalysisResponse, Block, Field};

fn lines(text: &[&str]) -> AnalysisResponse {
    AnalysisResponse::new(
        text.iter()
            .enumerate()
            .map(|(i, t)| Block::line(format!("line-{}", i), *t))
            .collect(),
    )
}

/// A page as the service returns it: PAGE, LINEs, WORDs, a claim table.
const EOB_PAGE_JSON: &str = r#"{
    "DocumentMetadata": {"Pages": 1},
    "Blocks": [
        {"BlockType": "PAGE", "Id": "page", "Relationships": [{"Type": "CHILD", "Ids": ["l1", "l2", "l3", "l4", "l5", "l6", "l7", "l8", "t1"]}]},
        {"BlockType": "LINE", "Id": "l1", "Text": "PAYMENT TO: RIVERSIDE FAMILY MEDICINE"},
        {"BlockType": "LINE", "Id": "l2", "Text": "Payment Date: Feb 14, 2024"},
        {"BlockType": "LINE", "Id": "l3", "Text": "Payment Number: 5500123"},
        {"BlockType": "LINE", "Id": "l4", "Text": "PATIENT NAME: MARIA LOPEZ"},
        {"BlockType": "LINE", "Id": "l5", "Text": "Certificate"},
        {"BlockType": "LINE", "Id": "l6", "Text": "ID: 70011"},
        {"BlockType": "LINE", "Id": "l7", "Text": "HEALTH CARE PROFESSIONAL: DR. A. SMITH"},
        {"BlockType": "LINE", "Id": "l8", "Text": "Provider ID: 4242"},
        {"BlockType": "TABLE", "Id": "t1", "Relationships": [{"Type": "CHILD", "Ids": ["c11", "c51", "c52", "c53", "c31"]}]},
        {"BlockType": "CELL", "Id": "c11", "RowIndex": 1, "ColumnIndex": 1, "Relationships": [{"Type": "CHILD", "Ids": ["w11"]}]},
        {"BlockType": "CELL", "Id": "c31", "RowIndex": 3, "ColumnIndex": 1, "Relationships": [{"Type": "CHILD", "Ids": ["w31"]}]},
        {"BlockType": "CELL", "Id": "c51", "RowIndex": 5, "ColumnIndex": 1, "Relationships": [{"Type": "CHILD", "Ids": ["w51a", "w51b"]}]},
        {"BlockType": "CELL", "Id": "c52", "RowIndex": 5, "ColumnIndex": 2, "Relationships": [{"Type": "CHILD", "Ids": ["w52"]}]},
        {"BlockType": "CELL", "Id": "c53", "RowIndex": 5, "ColumnIndex": 3},
        {"BlockType": "WORD", "Id": "w11", "Text": "Charged"},
        {"BlockType": "WORD", "Id": "w31", "Text": "$99.00"},
        {"BlockType": "WORD", "Id": "w51a", "Text": "$1,"},
        {"BlockType": "WORD", "Id": "w51b", "Text": "450.00"},
        {"BlockType": "WORD", "Id": "w52", "Text": "$1,100.00"}
    ]
}"#;

#[test]
fn test_full_page_from_service_json() {
    let response = AnalysisResponse::from_json(EOB_PAGE_JSON).unwrap();
    let record = FieldExtractor::new().unwrap().extract(&response);

    assert_eq!(record.get(Field::PaymentTo), Some("RIVERSIDE FAMILY MEDICINE"));
    assert_eq!(record.get(Field::PaymentDate), Some("Feb 14, 2024"));
    assert_eq!(record.get(Field::PaymentNumber), Some("5500123"));
    assert_eq!(record.get(Field::PatientName), Some("MARIA LOPEZ"));
    assert_eq!(record.get(Field::PatientId), Some("70011"));
    assert_eq!(record.get(Field::ServiceProviderId), Some("4242"));
    assert_eq!(record.get(Field::TotalAmountCharged), Some("$1,450.00"));
    assert_eq!(record.get(Field::TotalContractedAmount), Some("$1,100.00"));
    // The cell exists but holds no words
    assert_eq!(record.get(Field::AmountEligibleForCoverage), Some(""));
    assert_eq!(record.get(Field::ServiceOn), None);
}

#[test]
fn test_case_insensitive_label() {
    let record = FieldExtractor::new()
        .unwrap()
        .extract(&lines(&["payment to: Acme Corp"]));
    assert_eq!(record.get(Field::PaymentTo), Some("Acme Corp"));
}

#[test]
fn test_patient_id_across_lines() {
    let record = FieldExtractor::new()
        .unwrap()
        .extract(&lines(&["PATIENT", "some other text", "ID: 12345"]));
    assert_eq!(record.get(Field::PatientId), Some("12345"));
}

#[test]
fn test_words_outside_lines_are_ignored_by_patterns() {
    let response = AnalysisResponse::new(vec![Block::word("w", "Payment number: 77")]);
    let record = FieldExtractor::new().unwrap().extract(&response);
    assert_eq!(record.get(Field::PaymentNumber), None);
}

#[test]
fn test_currency_outside_totals_row_is_ignored() {
    let response = AnalysisResponse::new(vec![
        Block::table("t", ["c"]),
        Block::cell("c", 3, 1, ["w"]),
        Block::word("w", "$500.00"),
    ]);
    let record = FieldExtractor::new().unwrap().extract(&response);
    assert_eq!(record.get(Field::TotalAmountCharged), None);
    assert!(record.is_empty());
}

#[test]
fn test_cells_outside_tables_are_ignored() {
    let response = AnalysisResponse::new(vec![
        Block::cell("c", 5, 1, ["w"]),
        Block::word("w", "$500.00"),
    ]);
    let record = FieldExtractor::new().unwrap().extract(&response);
    assert_eq!(record.get(Field::TotalAmountCharged), None);
}

#[test]
fn test_later_table_overrides_earlier() {
    let response = AnalysisResponse::new(vec![
        Block::table("t1", ["a"]),
        Block::table("t2", ["b"]),
        Block::cell("a", 5, 1, ["wa"]),
        Block::cell("b", 5, 1, ["wb"]),
        Block::word("wa", "$1.00"),
        Block::word("wb", "$2.00"),
    ]);
    let record = FieldExtractor::new().unwrap().extract(&response);
    assert_eq!(record.get(Field::TotalAmountCharged), Some("$2.00"));
}

#[test]
fn test_custom_layout_without_code_changes() {
    let rules = [
        TableRule::new(2, 0, Field::TotalAmountCharged),
        TableRule::new(2, 1, Field::TotalContractedAmount),
    ];
    let extractor = FieldExtractor::with_rules(&[], &rules).unwrap();
    let response = AnalysisResponse::new(vec![
        Block::table("t", ["a", "b"]),
        Block::cell("a", 3, 1, ["wa"]),
        Block::cell("b", 3, 2, ["wb"]),
        Block::word("wa", "$8.00"),
        Block::word("wb", "$6.00"),
    ]);
    let record = extractor.extract(&response);
    assert_eq!(record.get(Field::TotalAmountCharged), Some("$8.00"));
    assert_eq!(record.get(Field::TotalContractedAmount), Some("$6.00"));
}
