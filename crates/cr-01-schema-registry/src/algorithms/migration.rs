//! # Migration Chain Runner
//!
//! Walks versions `from + 1 ..= to`, applying each destination version's
//! step function to the accumulated payload. Pure: the caller decides
//! whether to persist the result.

use crate::domain::{MigrateFn, MigrationError};
use shared_types::{Payload, SchemaVersion};
use tracing::debug;

/// Run the forward chain for `code`.
///
/// `step_to(v)` returns the function lifting a payload from `v - 1` to `v`.
/// Every step is resolved before any is applied, so a gap is reported
/// without running partial work.
pub fn run_chain<F>(
    code: &str,
    from: SchemaVersion,
    to: SchemaVersion,
    data: Payload,
    step_to: F,
) -> Result<Payload, MigrationError>
where
    F: Fn(SchemaVersion) -> Option<MigrateFn>,
{
    if from == to {
        return Ok(data);
    }
    if to < from {
        return Err(MigrationError::Downgrade {
            code: code.to_string(),
            from,
            to,
        });
    }

    let mut steps = Vec::with_capacity((to - from) as usize);
    for version in (from + 1)..=to {
        let step = step_to(version).ok_or_else(|| MigrationError::Gap {
            code: code.to_string(),
            from,
            to,
            missing: version,
        })?;
        steps.push((version, step));
    }

    steps.into_iter().try_fold(data, |acc, (version, step)| {
        debug!("[cr-01] Migrating {} to v{}", code, version);
        step(acc).map_err(|source| MigrationError::StepFailed {
            code: code.to_string(),
            version,
            source,
        })
    })
}
