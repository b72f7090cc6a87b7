//! Attribute resolution for one execution.
//!
//! Both steps are pure and run fresh on every call; nothing here is written
//! back into the query.

use crate::{query::OrderBy, schema::Schema};
use std::sync::Arc;

/// Append every order-by attribute the selection does not already contain.
///
/// Matching ignores case. Appended names keep the casing used in `order_by`.
#[must_use]
pub fn merge_order_attributes(attributes: &[String], order_by: &OrderBy) -> Vec<String> {
    let mut merged = attributes.to_vec();

    for attribute in order_by.attributes() {
        if !merged
            .iter()
            .any(|selected| selected.eq_ignore_ascii_case(attribute))
        {
            merged.push(attribute.to_string());
        }
    }

    merged
}

/// Translate attribute names to directory-native names.
///
/// Only the first schema is consulted; with no schemas the list passes
/// through untouched.
#[must_use]
pub fn translate_attributes(attributes: Vec<String>, schemas: &[Arc<dyn Schema>]) -> Vec<String> {
    let Some(schema) = schemas.first() else {
        return attributes;
    };

    attributes
        .iter()
        .map(|attribute| schema.translate_attribute_name(attribute))
        .collect()
}
