//! Filter evaluation against BSON documents held in memory.

use std::cmp::Ordering;
use bson::{Bson, datetime::DateTime};

use storecat_core::{
    query::{QueryVisitor, Expr, FieldOp},
    error::{DocumentStoreError, DocumentStoreResult},
};


/// Comparable view over a BSON value.
///
/// All numeric types are normalized to f64 so an Int32 quantity compares against
/// a Double bound the same way MongoDB does.
#[derive(Debug)]
pub(crate) enum Comparable<'a> {
    Null,
    Bool(bool),
    Number(f64),
    DateTime(DateTime),
    String(&'a str),
    Binary(&'a [u8]),
    Array(Vec<Comparable<'a>>),
    /// Values with no meaningful ordering (embedded documents, regexes, ...).
    Opaque,
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
            Bson::String(value) => Comparable::String(value),
            Bson::Binary(binary) => Comparable::Binary(&binary.bytes),
            Bson::Array(arr) => Comparable::Array(
                arr
                    .iter()
                    .map(Comparable::from)
                    .collect::<Vec<_>>()
            ),
            _ => Comparable::Opaque,
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
            (Comparable::String(a), Comparable::String(b)) => a == b,
            (Comparable::Binary(a), Comparable::Binary(b)) => a == b,
            (Comparable::Array(a), Comparable::Array(b)) => a == b,
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
            (Comparable::String(a), Comparable::String(b)) => a.partial_cmp(b),
            _ => None,
        }
    }
}


pub(crate) struct DocumentEvaluator<'a> {
    document: &'a bson::Document,
}

impl<'a> DocumentEvaluator<'a> {
    pub fn new(document: &'a bson::Document) -> Self {
        Self { document }
    }

    pub fn evaluate(&mut self, expr: &Expr) -> DocumentStoreResult<bool> {
        self.visit_expr(expr)
    }

    /// Keeps the documents matching `expr`. Non-document values never match.
    pub fn filter_documents(
        documents: impl IntoIterator<Item = &'a Bson>,
        expr: &Expr,
    ) -> Vec<Bson> {
        documents
            .into_iter()
            .filter(|bson| match bson.as_document() {
                Some(doc) => DocumentEvaluator::new(doc)
                    .evaluate(expr)
                    .unwrap_or(false),
                None => false,
            })
            .cloned()
            .collect::<Vec<_>>()
    }
}

impl<'a> QueryVisitor for DocumentEvaluator<'a> {
    type Output = bool;
    type Error = DocumentStoreError;

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

    fn visit_field(&mut self, field: &str, op: FieldOp, value: &Bson) -> Result<Self::Output, Self::Error> {
        let Some(field_value) = self.document.get(field) else {
            // A missing field only satisfies "not equal".
            return Ok(op == FieldOp::Ne);
        };

        let left = Comparable::from(field_value);
        let right = Comparable::from(value);

        Ok(match op {
            FieldOp::Eq => left == right,
            FieldOp::Ne => left != right,
            FieldOp::Gt => left.partial_cmp(&right) == Some(Ordering::Greater),
            FieldOp::Gte => matches!(left.partial_cmp(&right), Some(Ordering::Greater | Ordering::Equal)),
            FieldOp::Lt => left.partial_cmp(&right) == Some(Ordering::Less),
            FieldOp::Lte => matches!(left.partial_cmp(&right), Some(Ordering::Less | Ordering::Equal)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;
    use storecat_core::query::Filter;

    fn matches(document: &bson::Document, expr: &Expr) -> bool {
        DocumentEvaluator::new(document).evaluate(expr).unwrap()
    }

    #[test]
    fn strict_bounds_exclude_endpoints() {
        let range = Filter::gt("price", 10.0).and(Filter::lt("price", 20.0));

        assert!(!matches(&doc! { "price": 10.0 }, &range));
        assert!(matches(&doc! { "price": 10.5 }, &range));
        assert!(!matches(&doc! { "price": 20.0 }, &range));
    }

    #[test]
    fn integers_compare_against_doubles() {
        assert!(matches(&doc! { "quantity": 5_i32 }, &Filter::gt("quantity", 4.5)));
        assert!(matches(&doc! { "quantity": 5_i64 }, &Filter::eq("quantity", 5.0)));
    }

    #[test]
    fn mismatched_types_never_order() {
        let doc = doc! { "price": "cheap" };

        assert!(!matches(&doc, &Filter::gt("price", 1.0)));
        assert!(!matches(&doc, &Filter::lt("price", 1.0)));
    }

    #[test]
    fn missing_field_only_satisfies_ne() {
        let doc = doc! { "name": "lamp" };

        assert!(!matches(&doc, &Filter::eq("price", 1.0)));
        assert!(!matches(&doc, &Filter::gt("price", 1.0)));
        assert!(matches(&doc, &Filter::ne("price", 1.0)));
    }

    #[test]
    fn or_and_not_combine() {
        let doc = doc! { "status": true, "price": 3.0 };
        let expr = Filter::or([Filter::eq("status", false), Filter::lt("price", 5.0)]);

        assert!(matches(&doc, &expr));
        assert!(!matches(&doc, &expr.not()));
    }

    #[test]
    fn filter_skips_non_documents() {
        let docs = vec![Bson::Document(doc! { "price": 15.0 }), Bson::Int32(15)];
        let found = DocumentEvaluator::filter_documents(&docs, &Filter::gt("price", 10.0));

        assert_eq!(found.len(), 1);
    }
}
