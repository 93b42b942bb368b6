// Union schema

use super::{BoxedSchema, Kind, Schema, SchemaOptions, TypeSchema, schema_of};
use crate::codes;
use crate::errors::{Result, ValidationError};
use crate::presence::{Presence, Required};
use crate::value::Value;
use std::sync::Arc;

/// The first of several member schemas that accepts the value.
///
/// Members share one output type `M`; map members onto a common type (usually
/// an enum) before combining them. Absent values are handled by the union's
/// own presence, not by its members.
pub struct UnionKind<M> {
    members: Vec<BoxedSchema<M>>,
}

pub type UnionSchema<M, O = M, P = Required> = TypeSchema<UnionKind<M>, O, P>;

impl<M> UnionKind<M> {
    pub fn new(first: BoxedSchema<M>) -> Self {
        Self { members: vec![first] }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl<M> Clone for UnionKind<M> {
    fn clone(&self) -> Self {
        Self {
            members: self.members.clone(),
        }
    }
}

impl<M> std::fmt::Debug for UnionKind<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UnionKind")
            .field("members", &self.members.len())
            .finish()
    }
}

impl<M: 'static> Kind for UnionKind<M> {
    type Input = M;

    const NAME: &'static str = "union";
    const TYPE: &'static str = codes::UNION_TYPE;
    const REQUIRED: &'static str = codes::UNION_REQUIRED;
    const CUSTOM: &'static str = codes::UNION_CUSTOM;

    fn type_message(&self) -> String {
        "The value does not match any of the allowed types.".to_string()
    }

    fn check(&self, value: &Value, options: &SchemaOptions) -> Result<M> {
        let mut failures: Vec<ValidationError> = Vec::with_capacity(self.members.len());
        for member in &self.members {
            match member.parse(value) {
                Ok(output) => return Ok(output),
                Err(error) => failures.push(error),
            }
        }

        let failed: Vec<String> = failures.iter().map(|error| error.code().to_string()).collect();
        let error = self.type_error(value, options).with_detail("codes", failed);
        Err(match failures.pop() {
            Some(last) => error.with_cause(last),
            None => error,
        })
    }
}

impl<M: 'static> TypeSchema<UnionKind<M>, M, Required> {
    pub fn create<S>(first: S) -> Self
    where
        S: Schema<Output = M> + 'static,
    {
        Self::create_with(first, SchemaOptions::default())
    }

    pub fn create_with<S>(first: S, options: SchemaOptions) -> Self
    where
        S: Schema<Output = M> + 'static,
    {
        schema_of(UnionKind::new(Arc::new(first)), options)
    }
}

impl<M: 'static, O: 'static, P: Presence> TypeSchema<UnionKind<M>, O, P> {
    /// Add a member, tried after the existing ones.
    pub fn or<S>(&self, next: S) -> Self
    where
        S: Schema<Output = M> + 'static,
    {
        let next: BoxedSchema<M> = Arc::new(next);
        self.with_kind(|kind| kind.members.push(next))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{BooleanSchema, NumberSchema, StringSchema};
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq)]
    enum Id {
        Numeric(f64),
        Text(String),
    }

    fn id_schema() -> UnionSchema<Id> {
        UnionSchema::create(NumberSchema::create().int().map(Id::Numeric))
            .or(StringSchema::create().not_empty().map(Id::Text))
    }

    #[test]
    fn test_first_accepting_member_wins() {
        let schema = id_schema();
        assert_eq!(schema.parse(&Value::from(7)), Ok(Id::Numeric(7.0)));
        assert_eq!(schema.parse(&Value::from("abc")), Ok(Id::Text("abc".to_string())));
        assert_eq!(schema.kind().len(), 2);
    }

    #[test]
    fn test_failure_collects_member_codes() {
        let error = id_schema().parse(&Value::from(true)).unwrap_err();
        assert_eq!(error.code(), codes::UNION_TYPE);
        assert_eq!(error.message, "The value does not match any of the allowed types.");
        assert_eq!(error.detail("codes"), Some(&json!([codes::NUMBER_TYPE, codes::STRING_TYPE])));
        assert_eq!(error.cause.as_deref().map(ValidationError::code), Some(codes::STRING_TYPE));
    }

    #[test]
    fn test_member_rules_apply() {
        let error = id_schema().parse(&Value::from(1.5)).unwrap_err();
        assert_eq!(error.detail("codes"), Some(&json!([codes::NUMBER_INT, codes::STRING_TYPE])));

        let error = id_schema().parse(&Value::from("")).unwrap_err();
        assert_eq!(error.root_cause().code(), codes::STRING_NOT_EMPTY);
    }

    #[test]
    fn test_presence_belongs_to_the_union() {
        let schema = id_schema();
        assert_eq!(schema.parse(&Value::Null).unwrap_err().code(), codes::UNION_REQUIRED);
        assert_eq!(schema.optional().parse(&Value::Undefined), Ok(None));
    }

    #[test]
    fn test_or_does_not_mutate_receiver() {
        let base = UnionSchema::create(BooleanSchema::create().map(|b| b.to_string()));
        let wider = base.or(StringSchema::create());

        assert!(!base.is_valid(&Value::from("yes")));
        assert_eq!(wider.parse(&Value::from("yes")), Ok("yes".to_string()));
        assert_eq!(wider.parse(&Value::from(false)), Ok("false".to_string()));
    }

    #[test]
    fn test_custom_type_error() {
        let schema = UnionSchema::create_with(
            NumberSchema::create(),
            SchemaOptions::new().with_type_error("number or numeric text expected"),
        )
        .or(NumberSchema::create_with(SchemaOptions::new().with_cast(true)));

        assert_eq!(schema.parse(&Value::from("12")), Ok(12.0));
        assert_eq!(
            schema.parse(&Value::from("twelve")).unwrap_err().message,
            "number or numeric text expected"
        );
    }
}
