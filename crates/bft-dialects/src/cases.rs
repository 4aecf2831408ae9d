//! Test case model.
//!
//! Cases are produced by an external loader and only read here.

use crate::types::display_type;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A typed value used as a function argument or an expected result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Literal {
    /// The value as written in the case definition. Never inspected by matching.
    pub value: serde_json::Value,
    /// Canonical type name, e.g. `i32` or `decimal<38,2>`
    #[serde(rename = "type")]
    pub type_name: String,
}

impl Literal {
    pub fn new(value: impl Into<serde_json::Value>, type_name: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            type_name: type_name.into(),
        }
    }

    /// A typed SQL NULL
    pub fn null(type_name: impl Into<String>) -> Self {
        Self::new(serde_json::Value::Null, type_name)
    }
}

/// Expected outcome of a case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseResult {
    /// A concrete expected value
    Value(Literal),
    /// Execution is expected to raise an error
    Error,
    /// The result is undefined behavior
    Undefined,
}

impl CaseResult {
    /// Type name of the expected value, if the result is not a sentinel.
    pub fn type_name(&self) -> Option<&str> {
        match self {
            CaseResult::Value(literal) => Some(&literal.type_name),
            CaseResult::Error | CaseResult::Undefined => None,
        }
    }
}

impl From<Literal> for CaseResult {
    fn from(literal: Literal) -> Self {
        CaseResult::Value(literal)
    }
}

/// A single function-behavior scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Case {
    /// URI of the extension file defining the function
    pub base_uri: String,
    /// Canonical function name
    pub function: String,
    pub args: Vec<Literal>,
    pub result: CaseResult,
    /// Requested `(key, value)` execution options
    #[serde(default)]
    pub options: Vec<(String, String)>,
}

impl Case {
    pub fn new(
        base_uri: impl Into<String>,
        function: impl Into<String>,
        args: Vec<Literal>,
        result: impl Into<CaseResult>,
    ) -> Self {
        Self {
            base_uri: base_uri.into(),
            function: function.into(),
            args,
            result: result.into(),
            options: Vec::new(),
        }
    }

    /// Add a requested option
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.push((key.into(), value.into()));
        self
    }

    /// Render the case as a kernel signature, e.g. `add(i32, i32) -> i32`.
    pub fn kernel_signature(&self) -> KernelSignature<'_> {
        self.kernel_signature_as(&self.function)
    }

    /// Render the case's types under another function name, such as the
    /// prefixed catalog name it resolved to.
    pub fn kernel_signature_as<'a>(&'a self, function: &'a str) -> KernelSignature<'a> {
        KernelSignature {
            function,
            case: self,
        }
    }
}

/// Display adapter returned by [`Case::kernel_signature`].
pub struct KernelSignature<'a> {
    function: &'a str,
    case: &'a Case,
}

impl fmt::Display for KernelSignature<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let case = self.case;
        write!(f, "{}(", self.function)?;
        for (i, arg) in case.args.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(display_type(&arg.type_name))?;
        }
        f.write_str(") -> ")?;
        match &case.result {
            CaseResult::Value(literal) => f.write_str(display_type(&literal.type_name)),
            CaseResult::Error => f.write_str("<error>"),
            CaseResult::Undefined => f.write_str("<undefined>"),
        }
    }
}
