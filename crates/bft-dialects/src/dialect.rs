//! Dialect resolver.
//!
//! Answers whether a dialect supports a case, and why not when it doesn't.
//! Resolution has three outcomes that are never conflated:
//!
//! - [`Resolution::Unmapped`]: the function is absent from both catalogs.
//! - [`Resolution::Mapped`] with `should_pass == false`: a kernel or option
//!   mismatch, with a reason meant for test output.
//! - [`Error::KernelArity`]: the case and the catalog disagree on the
//!   function's arity, a defect in one of the definitions.

use crate::cases::Case;
use crate::catalog::{DialectFile, DialectFunction, FunctionShape};
use crate::error::{Error, Result};
use crate::types::is_wildcard;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};

/// How a case maps onto a dialect function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SqlMapping {
    pub local_name: String,
    #[serde(flatten)]
    pub shape: FunctionShape,
    pub should_pass: bool,
    /// Why the case is expected to fail. `None` iff `should_pass`.
    pub reason: Option<String>,
}

impl SqlMapping {
    fn passing(func: &DialectFunction) -> Self {
        Self {
            local_name: func.local_name.clone(),
            shape: func.shape,
            should_pass: true,
            reason: None,
        }
    }

    fn failing(func: &DialectFunction, reason: String) -> Self {
        Self {
            local_name: func.local_name.clone(),
            shape: func.shape,
            should_pass: false,
            reason: Some(reason),
        }
    }
}

/// Outcome of resolving a case against a dialect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Resolution {
    /// Neither catalog has an entry for the function
    Unmapped,
    Mapped(SqlMapping),
}

impl Resolution {
    pub fn mapping(&self) -> Option<&SqlMapping> {
        match self {
            Resolution::Mapped(mapping) => Some(mapping),
            Resolution::Unmapped => None,
        }
    }

    pub fn is_unmapped(&self) -> bool {
        matches!(self, Resolution::Unmapped)
    }

    /// Mapped and expected to pass.
    pub fn should_pass(&self) -> bool {
        self.mapping().is_some_and(|m| m.should_pass)
    }
}

/// Resolver for a single dialect catalog.
#[derive(Debug, Clone)]
pub struct Dialect {
    name: String,
    kind: String,
    scalar_functions: HashMap<String, DialectFunction>,
    aggregate_functions: HashMap<String, DialectFunction>,
    func_prefixes: HashMap<String, String>,
}

impl Dialect {
    /// Index a catalog by function name. Later duplicates replace earlier ones.
    pub fn new(file: DialectFile) -> Self {
        let DialectFile {
            name,
            kind,
            scalar_functions,
            aggregate_functions,
            uri_to_func_prefix,
        } = file;

        let scalar_functions = index_by_name(&name, "scalar", scalar_functions);
        let aggregate_functions = index_by_name(&name, "aggregate", aggregate_functions);

        Self {
            name,
            kind,
            scalar_functions,
            aggregate_functions,
            func_prefixes: uri_to_func_prefix.into_iter().collect(),
        }
    }

    /// Validate the catalog before indexing it.
    pub fn try_new(file: DialectFile) -> Result<Self> {
        file.validate()?;
        Ok(Self::new(file))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Dialect type tag
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Catalog entry for a (possibly prefixed) name, scalar first.
    pub fn function(&self, name: &str) -> Option<&DialectFunction> {
        self.scalar_functions
            .get(name)
            .or_else(|| self.aggregate_functions.get(name))
    }

    /// Name under which the case's function is looked up.
    pub fn resolve_local_name<'c>(&self, case: &'c Case) -> Cow<'c, str> {
        match self.func_prefixes.get(&case.base_uri) {
            Some(prefix) if !prefix.is_empty() => {
                Cow::Owned(format!("{}.{}", prefix, case.function))
            }
            _ => Cow::Borrowed(case.function.as_str()),
        }
    }

    /// Options the dialect mandates for a function, scalar catalog first.
    pub fn required_options(&self, function_name: &str) -> Option<&BTreeMap<String, String>> {
        self.function(function_name).map(|func| &func.required_options)
    }

    /// Whether the scalar catalog declares exactly this argument type list.
    ///
    /// Plain positional equality: wildcards are compared as names and no
    /// variadic or aggregate arity rules apply.
    pub fn supports_kernel_exact<S: AsRef<str>>(
        &self,
        function_name: &str,
        arg_types: &[S],
    ) -> bool {
        let Some(func) = self.scalar_functions.get(function_name) else {
            return false;
        };
        func.supported_kernels.iter().any(|kernel| {
            kernel.arg_types.len() == arg_types.len()
                && kernel
                    .arg_types
                    .iter()
                    .zip(arg_types)
                    .all(|(declared, actual)| declared == actual.as_ref())
        })
    }

    /// Resolve a case against this dialect.
    pub fn resolve(&self, case: &Case) -> Result<Resolution> {
        let func_name = self.resolve_local_name(case);
        let Some(func) = self.function(&func_name) else {
            tracing::debug!(
                dialect = %self.name,
                function = %func_name,
                base_uri = %case.base_uri,
                "no catalog entry"
            );
            return Ok(Resolution::Unmapped);
        };

        let failure = match self.match_kernel(func, case)? {
            Some(reason) => Some(reason),
            None => self.match_options(func, case),
        };

        let mapping = match failure {
            Some(reason) => {
                tracing::debug!(
                    dialect = %self.name,
                    function = %func_name,
                    %reason,
                    "case expected to fail"
                );
                SqlMapping::failing(func, reason)
            }
            None => {
                tracing::debug!(dialect = %self.name, function = %func_name, "case supported");
                SqlMapping::passing(func)
            }
        };
        Ok(Resolution::Mapped(mapping))
    }

    /// Find a declared kernel of `func` accepting the case's arguments.
    ///
    /// Returns `Ok(None)` on the first matching kernel and `Ok(Some(reason))`
    /// when no kernel matches.
    pub fn match_kernel(&self, func: &DialectFunction, case: &Case) -> Result<Option<String>> {
        let args = &case.args;
        // aggregates reduce over a single column regardless of literal count
        let arity = if func.shape.aggregate { 1 } else { args.len() };
        let mut arity_matched = false;

        for kernel in &func.supported_kernels {
            if kernel.arg_types.len() != arity && !func.is_variadic() {
                continue;
            }
            arity_matched = true;

            let broadcast = func.is_variadic() && kernel.arg_types.len() == 1;
            let declared: Box<dyn Iterator<Item = &String> + '_> = if broadcast {
                Box::new(std::iter::repeat(&kernel.arg_types[0]).take(args.len()))
            } else {
                Box::new(kernel.arg_types.iter())
            };

            let mut bindings: HashMap<&str, &str> = HashMap::new();
            let unified = declared.zip(args).all(|(ktype, arg)| {
                if is_wildcard(ktype) {
                    let bound = *bindings.entry(ktype.as_str()).or_insert(arg.type_name.as_str());
                    bound == arg.type_name
                } else {
                    *ktype == arg.type_name
                }
            });
            if unified {
                return Ok(None);
            }
        }

        if !arity_matched {
            tracing::error!(
                dialect = %self.name,
                function = %func.name,
                arity,
                kernels = func.supported_kernels.len(),
                "no declared kernel has the case's arity"
            );
            return Err(Error::kernel_arity(&self.name, &func.name, arity));
        }

        Ok(Some(format!(
            "The dialect {} does not support the kernel {}",
            self.name,
            case.kernel_signature_as(&func.name)
        )))
    }

    /// Check the case's requested options against the function's mandated values.
    pub fn match_options(&self, func: &DialectFunction, case: &Case) -> Option<String> {
        case.options.iter().find_map(|(key, requested)| {
            let mandated = func.required_options.get(key)?;
            (mandated != requested).then(|| {
                format!(
                    "The dialect {} expects {}={} but {}={} was requested",
                    self.name, key, mandated, key, requested
                )
            })
        })
    }
}

fn index_by_name(
    dialect: &str,
    catalog: &str,
    functions: Vec<DialectFunction>,
) -> HashMap<String, DialectFunction> {
    let mut by_name = HashMap::with_capacity(functions.len());
    for func in functions {
        if let Some(previous) = by_name.insert(func.name.clone(), func) {
            tracing::warn!(
                dialect,
                catalog,
                function = %previous.name,
                "duplicate function name, keeping the last definition"
            );
        }
    }
    by_name
}
