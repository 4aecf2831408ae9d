//! Dialect function catalog model.
//!
//! These records describe what a dialect claims to implement: which kernels
//! each function accepts, which option values it mandates, and how the local
//! call has to be spelled. They are built once and never mutated.

use crate::error::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;

/// One concrete overload a dialect supports for a function.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DialectKernel {
    /// Declared argument types. Concrete names or wildcards (`any`, `any1`, ...).
    pub arg_types: Vec<String>,
    pub result_type: String,
}

impl DialectKernel {
    pub fn new<I, S>(arg_types: I, result_type: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            arg_types: arg_types.into_iter().map(Into::into).collect(),
            result_type: result_type.into(),
        }
    }

    pub fn arity(&self) -> usize {
        self.arg_types.len()
    }
}

/// How the dialect-local call has to be rendered. The flags are independent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FunctionShape {
    /// `a <op> b`
    pub infix: bool,
    /// `a <op>`
    pub postfix: bool,
    /// `a BETWEEN b AND c`
    pub between: bool,
    pub aggregate: bool,
    /// Present in the catalog, but every call is expected to fail
    pub unsupported: bool,
    /// `EXTRACT(<component> FROM a)`
    pub extract: bool,
}

/// A single catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialectFunction {
    /// Canonical name, possibly prefixed (`ns.add`)
    pub name: String,
    /// Spelling used by the dialect
    pub local_name: String,
    #[serde(flatten)]
    pub shape: FunctionShape,
    /// Option key -> the only value the dialect accepts. Absent keys are unconstrained.
    #[serde(default)]
    pub required_options: BTreeMap<String, String>,
    /// Minimum argument count for variadic functions, `None` when not variadic.
    /// Serialized as `-1` for non-variadic functions.
    #[serde(
        default,
        serialize_with = "serialize_variadic_min",
        deserialize_with = "deserialize_variadic_min"
    )]
    pub variadic_min: Option<usize>,
    #[serde(default)]
    pub supported_kernels: Vec<DialectKernel>,
}

impl DialectFunction {
    /// A scalar function spelled `local_name` by the dialect.
    pub fn scalar(name: impl Into<String>, local_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            local_name: local_name.into(),
            shape: FunctionShape::default(),
            required_options: BTreeMap::new(),
            variadic_min: None,
            supported_kernels: Vec::new(),
        }
    }

    /// An aggregate function spelled `local_name` by the dialect.
    pub fn aggregate(name: impl Into<String>, local_name: impl Into<String>) -> Self {
        let mut func = Self::scalar(name, local_name);
        func.shape.aggregate = true;
        func
    }

    pub fn with_shape(mut self, shape: FunctionShape) -> Self {
        self.shape = shape;
        self
    }

    pub fn infix(mut self) -> Self {
        self.shape.infix = true;
        self
    }

    pub fn postfix(mut self) -> Self {
        self.shape.postfix = true;
        self
    }

    pub fn between(mut self) -> Self {
        self.shape.between = true;
        self
    }

    pub fn extract(mut self) -> Self {
        self.shape.extract = true;
        self
    }

    pub fn unsupported(mut self) -> Self {
        self.shape.unsupported = true;
        self
    }

    /// Mark the function variadic with the given minimum argument count.
    pub fn variadic(mut self, min_args: usize) -> Self {
        self.variadic_min = Some(min_args);
        self
    }

    /// Require `key` to be requested with exactly `value`.
    pub fn requiring(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.required_options.insert(key.into(), value.into());
        self
    }

    /// Append a supported kernel. Catalog order is match order.
    pub fn with_kernel<I, S>(mut self, arg_types: I, result_type: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.supported_kernels.push(DialectKernel::new(arg_types, result_type));
        self
    }

    pub fn is_variadic(&self) -> bool {
        self.variadic_min.is_some()
    }

    /// Check the invariants the resolver relies on.
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(Error::invalid_catalog("<unnamed>", "function name is empty"));
        }
        if self.local_name.is_empty() {
            return Err(Error::invalid_catalog(&self.name, "local name is empty"));
        }
        if let Some(idx) = self
            .supported_kernels
            .iter()
            .position(|kernel| kernel.result_type.is_empty())
        {
            return Err(Error::invalid_catalog(
                &self.name,
                format!("kernel #{idx} has an empty result type"),
            ));
        }
        Ok(())
    }
}

fn serialize_variadic_min<S>(
    value: &Option<usize>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(min) => serializer.serialize_u64(*min as u64),
        None => serializer.serialize_i64(-1),
    }
}

/// A missing field, `null` and `-1` all mean "not variadic".
fn deserialize_variadic_min<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<usize>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<i64>::deserialize(deserializer)? {
        None | Some(-1) => Ok(None),
        Some(min) => usize::try_from(min).map(Some).map_err(|_| {
            <D::Error as serde::de::Error>::custom(format!(
                "invalid variadic_min {min}, expected -1 or a non-negative count"
            ))
        }),
    }
}

/// A named dialect catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialectFile {
    pub name: String,
    /// Dialect type tag, e.g. `sql`
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub scalar_functions: Vec<DialectFunction>,
    #[serde(default)]
    pub aggregate_functions: Vec<DialectFunction>,
    /// Extension URI -> function name prefix
    #[serde(default)]
    pub uri_to_func_prefix: BTreeMap<String, String>,
}

impl DialectFile {
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            scalar_functions: Vec::new(),
            aggregate_functions: Vec::new(),
            uri_to_func_prefix: BTreeMap::new(),
        }
    }

    pub fn with_scalar(mut self, func: DialectFunction) -> Self {
        self.scalar_functions.push(func);
        self
    }

    pub fn with_aggregate(mut self, func: DialectFunction) -> Self {
        self.aggregate_functions.push(func);
        self
    }

    /// Look functions from `uri` up as `prefix.name`.
    pub fn with_prefix(mut self, uri: impl Into<String>, prefix: impl Into<String>) -> Self {
        self.uri_to_func_prefix.insert(uri.into(), prefix.into());
        self
    }

    /// Validate every function in the catalog.
    pub fn validate(&self) -> Result<()> {
        self.scalar_functions
            .iter()
            .chain(&self.aggregate_functions)
            .try_for_each(DialectFunction::validate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_shape_and_constraints() {
        let func = DialectFunction::scalar("add", "+")
            .infix()
            .requiring("overflow", "SILENT")
            .with_kernel(["i32", "i32"], "i32")
            .with_kernel(["i64", "i64"], "i64");

        assert!(func.shape.infix);
        assert!(!func.shape.aggregate);
        assert!(!func.is_variadic());
        assert_eq!(func.required_options.get("overflow").map(String::as_str), Some("SILENT"));
        assert_eq!(func.supported_kernels[1], DialectKernel::new(["i64", "i64"], "i64"));
        assert!(func.validate().is_ok());
    }

    #[test]
    fn aggregate_constructor_sets_flag() {
        let func = DialectFunction::aggregate("sum", "SUM").with_kernel(["fp64"], "fp64");
        assert!(func.shape.aggregate);
        assert_eq!(func.supported_kernels[0].arity(), 1);
    }

    #[test]
    fn validation_rejects_incomplete_entries() {
        let err = DialectFunction::scalar("concat", "").validate().unwrap_err();
        assert_eq!(err, Error::invalid_catalog("concat", "local name is empty"));

        let file = DialectFile::new("sqlite", "sql").with_aggregate(
            DialectFunction::aggregate("count", "COUNT").with_kernel(["any"], ""),
        );
        assert_eq!(
            file.validate(),
            Err(Error::invalid_catalog("count", "kernel #0 has an empty result type"))
        );
    }

    #[test]
    fn function_deserializes_with_flattened_shape() {
        let func: DialectFunction = serde_json::from_str(
            r#"{
                "name": "is_null",
                "local_name": "IS NULL",
                "postfix": true,
                "supported_kernels": [{"arg_types": ["any1"], "result_type": "boolean"}]
            }"#,
        )
        .expect("function should deserialize");
        assert!(func.shape.postfix);
        assert!(!func.shape.infix);
        assert!(func.required_options.is_empty());
        assert_eq!(func.variadic_min, None);
        assert_eq!(func.supported_kernels[0].arg_types, vec!["any1".to_string()]);
    }

    #[test]
    fn variadic_marker_accepts_minus_one() {
        let parse = |marker: &str| {
            serde_json::from_str::<DialectFunction>(&format!(
                r#"{{"name": "concat", "local_name": "||", "variadic_min": {marker}}}"#
            ))
        };
        assert_eq!(parse("-1").expect("-1 parses").variadic_min, None);
        assert_eq!(parse("null").expect("null parses").variadic_min, None);
        assert_eq!(parse("2").expect("2 parses").variadic_min, Some(2));
        assert!(parse("-3").is_err());
    }

    #[test]
    fn variadic_marker_serializes_as_minus_one() {
        let fixed = serde_json::to_value(DialectFunction::scalar("abs", "ABS"))
            .expect("function serializes");
        assert_eq!(fixed["variadic_min"], -1);

        let variadic = serde_json::to_value(DialectFunction::scalar("concat", "||").variadic(1))
            .expect("function serializes");
        assert_eq!(variadic["variadic_min"], 1);
    }
}
