//! bft-dialects - dialect catalogs and case resolution for cross-dialect
//! SQL function tests
//!
//! A canonical test case names a function, typed argument literals, an
//! expected result and optional execution options. Each dialect declares the
//! kernels (argument/result type signatures), option values and call
//! spellings it implements. This crate decides, per dialect, whether a case
//! is expected to pass and why not.
//!
//! # Architecture
//!
//! 1. **Types** - shorthand codes for canonical type names
//! 2. **Catalog** - immutable dialect function records
//! 3. **Dialect** - kernel and option matching against a catalog
//! 4. **Library** - dialect lookup by name
//!
//! Loading catalogs and cases from files, and acting on the verdicts, is
//! left to the caller.
//!
//! # Example
//! ```
//! use bft_dialects::{Case, Dialect, DialectFile, DialectFunction, Literal};
//!
//! let dialect = Dialect::new(
//!     DialectFile::new("sqlite", "sql").with_scalar(
//!         DialectFunction::scalar("add", "+")
//!             .infix()
//!             .with_kernel(["any1", "any1"], "any1"),
//!     ),
//! );
//! let case = Case::new(
//!     "/extensions/functions_arithmetic.yaml",
//!     "add",
//!     vec![Literal::new(1, "i32"), Literal::new(2, "i32")],
//!     Literal::new(3, "i32"),
//! );
//! assert!(dialect.resolve(&case).unwrap().should_pass());
//! ```

pub mod cases;
pub mod catalog;
pub mod dialect;
pub mod error;
pub mod harness;
pub mod library;
pub mod types;

pub use cases::{Case, CaseResult, KernelSignature, Literal};
pub use catalog::{DialectFile, DialectFunction, DialectKernel, FunctionShape};
pub use dialect::{Dialect, Resolution, SqlMapping};
pub use error::{Error, Result};
pub use harness::{CaseVerdict, HarnessOptions, UnmappedPolicy};
pub use library::DialectsLibrary;
pub use types::{display_type, is_wildcard, to_canonical, to_short};
