//! Filter expression evaluation against in-memory BSON records.
//!
//! Interprets the core filter AST directly over BSON documents, providing
//! the comparison semantics the in-memory source uses for both filtering
//! and sorting.

use std::{cmp::Ordering, collections::HashMap};

use bson::{Bson, datetime::DateTime, oid::ObjectId};

use pagelayer_core::{
    error::SourceError,
    query::{Expr, FieldOp, QueryVisitor},
};

/// Type-erased, comparable representation of BSON values.
///
/// Normalizes all numeric types to f64 so mixed integer/double fields
/// compare sensibly, and orders ObjectIds by their raw bytes (which sorts
/// them by embedded timestamp).
#[derive(Debug)]
pub(crate) enum Comparable<'a> {
    /// Null value
    Null,
    /// Boolean value
    Bool(bool),
    /// Numeric value (all integers and floats normalized to f64)
    Number(f64),
    /// DateTime value
    DateTime(DateTime),
    /// ObjectId value, ordered by raw bytes
    ObjectId(ObjectId),
    /// String value
    String(&'a str),
    /// Array of comparable values
    Array(Vec<Comparable<'a>>),
    /// Map/Object of comparable values
    Map(HashMap<&'a str, Comparable<'a>>),
}

impl<'a> From<&'a Bson> for Comparable<'a> {
    fn from(bson: &'a Bson) -> Self {
        match bson {
            Bson::Null => Comparable::Null,
            Bson::Boolean(value) => Comparable::Bool(*value),
            Bson::Int32(value) => Comparable::Number(*value as f64),
            Bson::Int64(value) => Comparable::Number(*value as f64),
            Bson::Double(value) => Comparable::Number(*value),
            Bson::DateTime(value) => Comparable::DateTime(*value),
            Bson::ObjectId(value) => Comparable::ObjectId(*value),
            Bson::String(value) => Comparable::String(value),
            Bson::Array(arr) => Comparable::Array(
                arr
                    .iter()
                    .map(Comparable::from)
                    .collect::<Vec<_>>()
            ),
            Bson::Document(doc) => Comparable::Map(
                doc
                    .iter()
                    .map(|(k, v)| (k.as_str(), Comparable::from(v)))
                    .collect::<HashMap<_, _>>()
            ),
            _ => Comparable::Null, // Other types are not comparable
        }
    }
}

impl<'a> PartialEq for Comparable<'a> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Comparable::Null, Comparable::Null) => true,
            (Comparable::Bool(a), Comparable::Bool(b)) => a == b,
            (Comparable::Number(a), Comparable::Number(b)) => a == b,
            (Comparable::DateTime(a), Comparable::DateTime(b)) => a == b,
            (Comparable::ObjectId(a), Comparable::ObjectId(b)) => a == b,
            (Comparable::String(a), Comparable::String(b)) => a == b,
            (Comparable::Array(a), Comparable::Array(b)) => a == b,
            (Comparable::Map(a), Comparable::Map(b)) => a == b,
            _ => false,
        }
    }
}

impl<'a> PartialOrd for Comparable<'a> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Comparable::Bool(a), Comparable::Bool(b)) => a.partial_cmp(b),
            (Comparable::Number(a), Comparable::Number(b)) => a.partial_cmp(b),
            (Comparable::DateTime(a), Comparable::DateTime(b)) => a.partial_cmp(b),
            (Comparable::ObjectId(a), Comparable::ObjectId(b)) => {
                a.bytes().partial_cmp(&b.bytes())
            }
            (Comparable::String(a), Comparable::String(b)) => a.partial_cmp(b),
            _ => None,
        }
    }
}

/// Evaluates a filter expression against a single record.
pub(crate) struct RecordEvaluator<'a> {
    record: &'a Bson,
}

impl<'a> RecordEvaluator<'a> {
    pub fn new(record: &'a Bson) -> Self {
        Self { record }
    }

    pub fn evaluate(&mut self, expr: &Expr) -> Result<bool, SourceError> {
        self.visit_expr(expr)
    }

    /// Filters an iterator of records down to those matching `expr`.
    pub fn filter_records(
        records: impl IntoIterator<Item = &'a Bson>,
        expr: &Expr,
    ) -> Result<Vec<Bson>, SourceError> {
        let mut matched = Vec::new();

        for record in records {
            if RecordEvaluator::new(record).evaluate(expr)? {
                matched.push(record.clone());
            }
        }

        Ok(matched)
    }

    fn fields(&self) -> Result<&'a bson::Document, SourceError> {
        self.record
            .as_document()
            .ok_or_else(|| SourceError::new("record is not a document"))
    }
}

impl<'a> QueryVisitor for RecordEvaluator<'a> {
    type Output = bool;
    type Error = SourceError;

    fn visit_and(&mut self, exprs: &[Expr]) -> Result<Self::Output, Self::Error> {
        for expr in exprs {
            if !self.visit_expr(expr)? {
                return Ok(false);
            }
        }

        Ok(true)
    }

    fn visit_or(&mut self, exprs: &[Expr]) -> Result<Self::Output, Self::Error> {
        for expr in exprs {
            if self.visit_expr(expr)? {
                return Ok(true);
            }
        }

        Ok(false)
    }

    fn visit_not(&mut self, expr: &Expr) -> Result<Self::Output, Self::Error> {
        Ok(!self.visit_expr(expr)?)
    }

    fn visit_exists(&mut self, field: &str, should_exist: bool) -> Result<Self::Output, Self::Error> {
        Ok(self.fields()?.get(field).is_some() == should_exist)
    }

    fn visit_field(&mut self, field: &str, op: &FieldOp, value: &Bson) -> Result<Self::Output, Self::Error> {
        match self.fields()?.get(field) {
            Some(field_value) => match op {
                FieldOp::Eq => Ok(Comparable::from(field_value) == Comparable::from(value)),
                FieldOp::Ne => Ok(Comparable::from(field_value) != Comparable::from(value)),
                FieldOp::Gt | FieldOp::Gte | FieldOp::Lt | FieldOp::Lte => {
                    match Comparable::from(field_value).partial_cmp(&Comparable::from(value)) {
                        Some(ordering) => Ok(match op {
                            FieldOp::Gt => ordering == Ordering::Greater,
                            FieldOp::Gte => ordering == Ordering::Greater || ordering == Ordering::Equal,
                            FieldOp::Lt => ordering == Ordering::Less,
                            FieldOp::Lte => ordering == Ordering::Less || ordering == Ordering::Equal,
                            _ => unreachable!(),
                        }),
                        None => Ok(false),
                    }
                },
                FieldOp::Contains => match Comparable::from(field_value) {
                    Comparable::Array(array) => Ok(
                        array
                            .iter()
                            .any(|item| item == &Comparable::from(value))
                    ),
                    Comparable::String(left) => match Comparable::from(value) {
                        Comparable::String(right) => Ok(left.contains(right)),
                        _ => Ok(false),
                    },
                    _ => Ok(false),
                },
                FieldOp::NotContains => match Comparable::from(field_value) {
                    Comparable::Array(array) => Ok(
                        !array
                            .iter()
                            .any(|item| item == &Comparable::from(value))
                    ),
                    Comparable::String(left) => match Comparable::from(value) {
                        Comparable::String(right) => Ok(!left.contains(right)),
                        _ => Ok(true),
                    },
                    _ => Ok(true),
                },
                FieldOp::StartsWith => match (Comparable::from(field_value), Comparable::from(value)) {
                    (Comparable::String(left), Comparable::String(right)) => Ok(left.starts_with(right)),
                    _ => Ok(false),
                },
                FieldOp::EndsWith => match (Comparable::from(field_value), Comparable::from(value)) {
                    (Comparable::String(left), Comparable::String(right)) => Ok(left.ends_with(right)),
                    _ => Ok(false),
                },
                FieldOp::AnyOf => match (Comparable::from(field_value), Comparable::from(value)) {
                    (Comparable::Array(array), Comparable::Array(values)) => {
                        for val in values {
                            if array.iter().any(|item| item == &val) {
                                return Ok(true);
                            }
                        }
                        Ok(false)
                    },
                    (Comparable::Array(array), single_value) => {
                        for item in array {
                            if item == single_value {
                                return Ok(true);
                            }
                        }
                        Ok(false)
                    },
                    (single_value, Comparable::Array(values)) => {
                        for val in values {
                            if val == single_value {
                                return Ok(true);
                            }
                        }
                        Ok(false)
                    },
                    _ => Ok(false),
                },
                FieldOp::NoneOf => match (Comparable::from(field_value), Comparable::from(value)) {
                    (Comparable::Array(array), Comparable::Array(values)) => {
                        for val in values {
                            if array.iter().any(|item| item == &val) {
                                return Ok(false);
                            }
                        }
                        Ok(true)
                    },
                    (Comparable::Array(array), single_value) => {
                        for item in array {
                            if item == single_value {
                                return Ok(false);
                            }
                        }
                        Ok(true)
                    },
                    (single_value, Comparable::Array(values)) => {
                        for val in values {
                            if val == single_value {
                                return Ok(false);
                            }
                        }
                        Ok(true)
                    },
                    _ => Ok(true),
                },
            },
            None => Ok(false),
        }
    }
}
