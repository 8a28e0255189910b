/*!
 * Core Types
 * Common types used across the admission engine
 */

/// Process (job) ID type
///
/// Caller-supplied; unique while the process is registered.
pub type Pid = u32;

/// Common result type for admission operations
pub type WardenResult<T> = Result<T, super::errors::WardenError>;
