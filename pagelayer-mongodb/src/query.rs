//! Query translation from pagelayer filter expressions to MongoDB syntax.
//!
//! This module translates the abstract filter AST into MongoDB BSON
//! operator documents for execution by the MongoDB query engine.

use bson::{Bson, Document, doc};

use pagelayer_core::{
    error::SourceError,
    query::{Expr, FieldOp, QueryVisitor},
};

/// Translates filter expressions into MongoDB query documents.
///
/// This struct implements the [`QueryVisitor`] trait to convert abstract
/// filter expressions into MongoDB's native BSON query syntax.
pub(crate) struct MongoQueryTranslator;

impl QueryVisitor for MongoQueryTranslator {
    type Output = Document;
    type Error = SourceError;

    fn visit_and(&mut self, exprs: &[Expr]) -> Result<Self::Output, Self::Error> {
        Ok(doc! {
            "$and": exprs
                .iter()
                .map(|expr| self.visit_expr(expr))
                .collect::<Result<Vec<_>, _>>()?,
        })
    }

    fn visit_or(&mut self, exprs: &[Expr]) -> Result<Self::Output, Self::Error> {
        Ok(doc! {
            "$or": exprs
                .iter()
                .map(|expr| self.visit_expr(expr))
                .collect::<Result<Vec<_>, _>>()?,
        })
    }

    fn visit_not(&mut self, expr: &Expr) -> Result<Self::Output, Self::Error> {
        Ok(doc! {
            "$not": self.visit_expr(expr)?,
        })
    }

    fn visit_exists(&mut self, field: &str, should_exist: bool) -> Result<Self::Output, Self::Error> {
        Ok(doc! {
            field: { "$exists": should_exist },
        })
    }

    fn visit_field(&mut self, field: &str, op: &FieldOp, value: &Bson) -> Result<Self::Output, Self::Error> {
        Ok(doc! {
            field: match op {
                FieldOp::Eq => doc! { "$eq": value },
                FieldOp::Ne => doc! { "$ne": value },
                FieldOp::Gt => doc! { "$gt": value },
                FieldOp::Gte => doc! { "$gte": value },
                FieldOp::Lt => doc! { "$lt": value },
                FieldOp::Lte => doc! { "$lte": value },
                FieldOp::Contains => match value {
                    Bson::String(s) => doc! { "$regex": format!(".*{}.*", s), "$options": "i" },
                    Bson::Array(arr) => doc! { "$all": arr },
                    _ => return Err(SourceError::new("Contains operator requires a string or array value")),
                },
                FieldOp::NotContains => match value {
                    Bson::String(s) => doc! { "$not": { "$regex": format!(".*{}.*", s), "$options": "i" } },
                    Bson::Array(arr) => doc! { "$nin": arr },
                    _ => return Err(SourceError::new("NotContains operator requires a string or array value")),
                },
                FieldOp::StartsWith => match value {
                    Bson::String(s) => doc! { "$regex": format!("^{}", s), "$options": "i" },
                    _ => return Err(SourceError::new("StartsWith operator requires a string value")),
                },
                FieldOp::EndsWith => match value {
                    Bson::String(s) => doc! { "$regex": format!("{}$", s), "$options": "i" },
                    _ => return Err(SourceError::new("EndsWith operator requires a string value")),
                },
                FieldOp::AnyOf => doc! { "$in": value },
                FieldOp::NoneOf => doc! { "$nin": value },
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagelayer_core::query::Filter;

    #[test]
    fn seek_bound_translates_to_operator_documents() {
        let expr = Filter::or([
            Filter::gt("ts", 100_i64),
            Filter::and([Filter::eq("ts", 100_i64), Filter::gt("_id", 7_i64)]),
        ]);

        let translated = MongoQueryTranslator.visit_expr(&expr).unwrap();
        assert_eq!(
            translated,
            doc! {
                "$or": [
                    { "ts": { "$gt": 100_i64 } },
                    { "$and": [
                        { "ts": { "$eq": 100_i64 } },
                        { "_id": { "$gt": 7_i64 } },
                    ] },
                ],
            }
        );
    }

    #[test]
    fn contains_requires_string_or_array() {
        let expr = Filter::contains("tags", 3_i32);
        assert!(MongoQueryTranslator.visit_expr(&expr).is_err());
    }
}
