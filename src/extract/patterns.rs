//! Regex rules applied to a page's line text.

use regex::{Regex, RegexBuilder};

use crate::error::Result;
use crate::model::{Field, Record};

/// Field patterns, applied in order. Each captures the value in group 1.
///
/// The last two tolerate any text (including line breaks) between the
/// section heading and its `ID:` label. `Service on` has no pattern and
/// stays absent.
pub const FIELD_PATTERNS: &[(Field, &str)] = &[
    (Field::PaymentTo, r"Payment to:\s*(.+)"),
    (Field::PaymentDate, r"Payment date:\s*(\w{3} \d{2}, \d{4})"),
    (Field::PaymentNumber, r"Payment number:\s*(\d+)"),
    (Field::PatientName, r"PATIENT NAME:\s*(.+)"),
    (Field::PatientId, r"PATIENT[\s\S]*?ID:\s*(\d+)"),
    (
        Field::ServiceProviderId,
        r"HEALTH CARE PROFESSIONAL[\s\S]*?ID:\s*(\d+)",
    ),
];

/// A compiled, case-insensitive field pattern.
#[derive(Debug, Clone)]
pub struct FieldPattern {
    pub field: Field,
    regex: Regex,
}

impl FieldPattern {
    /// Compile a pattern for `field`.
    pub fn new(field: Field, pattern: &str) -> Result<Self> {
        let regex = RegexBuilder::new(pattern).case_insensitive(true).build()?;
        Ok(Self { field, regex })
    }

    /// Trimmed text of group 1 of the first match, if any.
    pub fn find<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.regex
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim())
    }

    /// Store the captured value in `record`; leave it untouched on no match.
    pub fn apply(&self, text: &str, record: &mut Record) {
        match self.find(text) {
            Some(value) => {
                log::debug!("{} matched: {:?}", self.field, value);
                record.set(self.field, value);
            }
            None => log::debug!("{} not found", self.field),
        }
    }
}

/// Compile a list of `(field, pattern)` pairs, keeping their order.
pub fn compile_patterns(patterns: &[(Field, &str)]) -> Result<Vec<FieldPattern>> {
    patterns
        .iter()
        .map(|(field, pattern)| FieldPattern::new(*field, pattern))
        .collect()
}
