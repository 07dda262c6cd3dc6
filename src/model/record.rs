//! The fixed-shape EOB record.

use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};

/// A named field of an EOB record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    PaymentTo,
    PaymentDate,
    PaymentNumber,
    TotalAmountCharged,
    TotalContractedAmount,
    AmountEligibleForCoverage,
    PatientName,
    PatientId,
    ServiceProviderId,
    /// Declared in the output but never populated: neither
    /// [`FIELD_PATTERNS`](crate::extract::FIELD_PATTERNS) nor
    /// [`TABLE_RULES`](crate::extract::TABLE_RULES) has an entry for it.
    ServiceOn,
}

impl Field {
    /// Number of fields in a record.
    pub const COUNT: usize = 10;

    /// All fields, in output order.
    pub const ALL: [Field; Field::COUNT] = [
        Field::PaymentTo,
        Field::PaymentDate,
        Field::PaymentNumber,
        Field::TotalAmountCharged,
        Field::TotalContractedAmount,
        Field::AmountEligibleForCoverage,
        Field::PatientName,
        Field::PatientId,
        Field::ServiceProviderId,
        Field::ServiceOn,
    ];

    /// Display name, used as the output key.
    pub fn name(self) -> &'static str {
        match self {
            Field::PaymentTo => "Payment to",
            Field::PaymentDate => "Payment Date",
            Field::PaymentNumber => "Payment Number",
            Field::TotalAmountCharged => "Total Amount Charged",
            Field::TotalContractedAmount => "Total Contracted Amount",
            Field::AmountEligibleForCoverage => "Amount Eligible for Coverage",
            Field::PatientName => "Patient Name",
            Field::PatientId => "Patient ID",
            Field::ServiceProviderId => "Service Provider ID",
            Field::ServiceOn => "Service on",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One value slot per [`Field`], all absent initially.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    values: [Option<String>; Field::COUNT],
}

impl Record {
    /// Create a record with every field absent.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a field's value.
    pub fn get(&self, field: Field) -> Option<&str> {
        self.values[field.index()].as_deref()
    }

    /// Set a field's value.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        self.values[field.index()] = Some(value.into());
    }

    /// Builder-style setter.
    pub fn with(mut self, field: Field, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    /// Iterate over every field and its value, in output order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, Option<&str>)> {
        Field::ALL.into_iter().map(move |f| (f, self.get(f)))
    }

    /// Number of fields holding a value.
    pub fn filled_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }

    /// Check if no field holds a value.
    pub fn is_empty(&self) -> bool {
        self.filled_count() == 0
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Field::COUNT))?;
        for (field, value) in self.iter() {
            map.serialize_entry(field.name(), &value)?;
        }
        map.end()
    }
}
