//! Search criteria
//!
//! [`Criteria`] is the raw, caller-supplied filter: field name → list of
//! textual values, typically straight from a query string. Normalizing it
//! against a [`Schema`] yields a [`CriteriaSet`] of typed terms.
//!
//! ## Semantics
//!
//! - Values of one field are ORed: `field ∈ {v1, v2, …}`
//! - Fields are ANDed
//! - Empty criteria match every key
//! - A field listed with no values matches nothing

use crate::error::{Error, Result};
use crate::types::Schema;
use crate::value::{Object, Value};
use std::collections::BTreeMap;

/// Raw field → values filter
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Criteria {
    terms: BTreeMap<String, Vec<String>>,
}

impl Criteria {
    /// Create empty criteria (matches everything)
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one allowed value for `field`
    pub fn add(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.terms.entry(field.into()).or_default().push(value.into());
    }

    /// Builder-style [`Criteria::add`]
    pub fn with(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.add(field, value);
        self
    }

    /// Replace the allowed values for `field`
    pub fn set(&mut self, field: impl Into<String>, values: Vec<String>) {
        self.terms.insert(field.into(), values);
    }

    /// Build from `(field, value)` pairs, e.g. a decoded query string
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut criteria = Criteria::new();
        for (field, value) in pairs {
            criteria.add(field, value);
        }
        criteria
    }

    /// Field names mentioned by the criteria
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.terms.keys().map(String::as_str)
    }

    /// True when no field is constrained
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Validate and type the criteria against `schema`
    ///
    /// Terms come out in schema order.
    ///
    /// # Errors
    ///
    /// - `UnknownField` if a field is not declared by the schema
    /// - `InvalidField` if a value does not parse as the field's type
    pub fn normalize(&self, schema: &Schema) -> Result<CriteriaSet> {
        if let Some(unknown) = self.fields().find(|name| schema.field(name).is_none()) {
            return Err(Error::UnknownField(unknown.to_string()));
        }

        let mut terms = Vec::with_capacity(self.terms.len());
        for field in schema {
            let Some(raw_values) = self.terms.get(&field.name) else {
                continue;
            };
            let values = raw_values
                .iter()
                .map(|raw| {
                    field
                        .data_type
                        .parse(raw)
                        .ok_or_else(|| Error::InvalidField(field.name.clone()))
                })
                .collect::<Result<Vec<_>>>()?;
            terms.push(Term {
                field: field.name.clone(),
                values,
            });
        }
        Ok(CriteriaSet { terms })
    }
}

/// One normalized term: `field ∈ values`
#[derive(Debug, Clone, PartialEq)]
pub struct Term {
    /// Schema field name
    pub field: String,
    /// Typed allowed values (ORed)
    pub values: Vec<Value>,
}

/// Normalized criteria: conjunction of [`Term`]s
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CriteriaSet {
    terms: Vec<Term>,
}

impl CriteriaSet {
    /// Terms in schema order
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    /// True when every key matches
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Check the terms still fit `schema`
    ///
    /// A set normalized against an earlier schema may name a field that no
    /// longer exists or carry values of the field's former type.
    ///
    /// # Errors
    ///
    /// - `UnknownField` if a term's field is not declared by `schema`
    /// - `InvalidField` if a term value is not of the field's type
    pub fn check(&self, schema: &Schema) -> Result<()> {
        for term in &self.terms {
            let field = schema
                .field(&term.field)
                .ok_or_else(|| Error::UnknownField(term.field.clone()))?;
            if !term.values.iter().all(|v| field.data_type.accepts(v)) {
                return Err(Error::InvalidField(term.field.clone()));
            }
        }
        Ok(())
    }

    /// True when some term has no allowed values, so nothing can match
    pub fn is_unsatisfiable(&self) -> bool {
        self.terms.iter().any(|t| t.values.is_empty())
    }

    /// Evaluate against a stored object
    ///
    /// A null or absent member never matches a term.
    pub fn matches(&self, obj: &Object) -> bool {
        self.terms.iter().all(|term| match obj.get_present(&term.field) {
            Some(actual) => term.values.iter().any(|v| v == actual),
            None => false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DataType, Field};
    use proptest::prelude::*;

    fn users_schema() -> Schema {
        Schema::new(vec![
            Field::new("age", DataType::Number).required(),
            Field::new("active", DataType::Bool),
            Field::new("name", DataType::String),
        ])
    }

    #[test]
    fn test_normalize_types_values_in_schema_order() {
        let criteria = Criteria::new()
            .with("name", "bob")
            .with("age", "30")
            .with("age", "31");
        let set = criteria.normalize(&users_schema()).unwrap();
        assert_eq!(set.terms().len(), 2);
        assert_eq!(set.terms()[0].field, "age");
        assert_eq!(
            set.terms()[0].values,
            vec![Value::Number(30.0), Value::Number(31.0)]
        );
        assert_eq!(set.terms()[1].field, "name");
    }

    #[test]
    fn test_normalize_unknown_field() {
        let criteria = Criteria::new().with("height", "2");
        let err = criteria.normalize(&users_schema()).unwrap_err();
        assert!(matches!(err, Error::UnknownField(f) if f == "height"));
    }

    #[test]
    fn test_normalize_unparseable_value() {
        let criteria = Criteria::new().with("active", "maybe");
        let err = criteria.normalize(&users_schema()).unwrap_err();
        assert!(matches!(err, Error::InvalidField(f) if f == "active"));
    }

    #[test]
    fn test_empty_criteria_matches_everything() {
        let set = Criteria::new().normalize(&users_schema()).unwrap();
        assert!(set.is_empty());
        assert!(set.matches(&Object::new()));
    }

    #[test]
    fn test_empty_value_list_is_unsatisfiable() {
        let mut criteria = Criteria::new();
        criteria.set("age", Vec::new());
        let set = criteria.normalize(&users_schema()).unwrap();
        assert!(set.is_unsatisfiable());
        assert!(!set.matches(&Object::new().with("age", 30.0)));
    }

    #[test]
    fn test_matches_and_of_or() {
        let set = Criteria::new()
            .with("age", "30")
            .with("age", "40")
            .with("active", "true")
            .normalize(&users_schema())
            .unwrap();

        assert!(set.matches(&Object::new().with("age", 30.0).with("active", true)));
        assert!(set.matches(&Object::new().with("age", 40.0).with("active", true)));
        assert!(!set.matches(&Object::new().with("age", 30.0).with("active", false)));
        assert!(!set.matches(&Object::new().with("age", 35.0).with("active", true)));
        assert!(!set.matches(&Object::new().with("age", 30.0)));
    }

    #[test]
    fn test_check_against_changed_schema() {
        let set = Criteria::new()
            .with("age", "30")
            .normalize(&users_schema())
            .unwrap();
        set.check(&users_schema()).unwrap();

        let retyped = Schema::new(vec![Field::new("age", DataType::String)]);
        assert!(matches!(set.check(&retyped), Err(Error::InvalidField(f)) if f == "age"));

        let renamed = Schema::new(vec![Field::new("years", DataType::Number)]);
        assert!(matches!(set.check(&renamed), Err(Error::UnknownField(f)) if f == "age"));
    }

    proptest! {
        #[test]
        fn prop_number_criteria_match_their_own_value(n in -1.0e9f64..1.0e9f64) {
            let set = Criteria::new()
                .with("age", n.to_string())
                .normalize(&users_schema())
                .unwrap();
            prop_assert!(set.matches(&Object::new().with("age", n)));
        }
    }
}
