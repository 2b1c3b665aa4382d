use std::fmt;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::{RecordInput, parse_start_time};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Lot,
    Supplier,
    Machine,
    Counter,
    StartTime,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Lot => "lot",
            Field::Supplier => "supplier",
            Field::Machine => "machine",
            Field::Counter => "counter",
            Field::StartTime => "start_time",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: Field,
    pub message: String,
}

/// Every failing field of a rejected form, in form order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    fn push(&mut self, field: Field, message: &str) {
        self.errors.push(FieldError {
            field,
            message: message.to_string(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn get(&self, field: Field) -> Option<&FieldError> {
        self.errors.iter().find(|error| error.field == field)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, error) in self.errors.iter().enumerate() {
            if index > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", error.field, error.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// A form payload that passed validation; text fields are trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidRecord {
    pub lot: String,
    pub supplier: String,
    pub machine: String,
    pub counter: u64,
    pub start_time: NaiveDateTime,
}

pub fn validate_input(input: &RecordInput) -> Result<ValidRecord, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let lot = input.lot.trim();
    if lot.is_empty() {
        errors.push(Field::Lot, "Lot number is required");
    }
    let supplier = input.supplier.trim();
    if supplier.is_empty() {
        errors.push(Field::Supplier, "Supplier is required");
    }
    let machine = input.machine.trim();
    if machine.is_empty() {
        errors.push(Field::Machine, "Machine is required");
    }
    let counter = u64::try_from(input.counter).ok();
    if counter.is_none() {
        errors.push(Field::Counter, "Counter must be a positive number");
    }
    let start_time = if input.start_time.trim().is_empty() {
        errors.push(Field::StartTime, "Start time is required");
        None
    } else {
        let parsed = parse_start_time(&input.start_time);
        if parsed.is_none() {
            errors.push(Field::StartTime, "Start time is invalid");
        }
        parsed
    };

    match (counter, start_time) {
        (Some(counter), Some(start_time)) if errors.is_empty() => Ok(ValidRecord {
            lot: lot.to_string(),
            supplier: supplier.to_string(),
            machine: machine.to_string(),
            counter,
            start_time,
        }),
        _ => Err(errors),
    }
}
