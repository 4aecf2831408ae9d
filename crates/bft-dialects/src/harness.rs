//! Test-runner boundary.
//!
//! The resolver always reports an unmapped function the same way. Whether
//! that becomes a skipped or a failed test is decided here, by the caller's
//! options.

use crate::cases::Case;
use crate::dialect::Resolution;
use serde::{Deserialize, Serialize};

/// What to do with a case whose function has no catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnmappedPolicy {
    #[default]
    Skip,
    Fail,
}

/// Options for turning resolutions into test verdicts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessOptions {
    pub unmapped: UnmappedPolicy,
}

/// How a test runner should treat a resolved case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaseVerdict {
    /// Run it and expect the documented result
    Pass,
    /// Run it and expect the dialect to diverge, for the given reason
    ExpectFailure(String),
    Skip(String),
    Fail(String),
}

impl HarnessOptions {
    pub fn verdict(&self, case: &Case, resolution: &Resolution) -> CaseVerdict {
        match resolution {
            Resolution::Mapped(mapping) if mapping.should_pass => CaseVerdict::Pass,
            Resolution::Mapped(mapping) => {
                CaseVerdict::ExpectFailure(mapping.reason.clone().unwrap_or_default())
            }
            Resolution::Unmapped => {
                let message = format!(
                    "Skipping unsupported function. {}/{}",
                    case.base_uri, case.function
                );
                match self.unmapped {
                    UnmappedPolicy::Skip => CaseVerdict::Skip(message),
                    UnmappedPolicy::Fail => CaseVerdict::Fail(message),
                }
            }
        }
    }
}
