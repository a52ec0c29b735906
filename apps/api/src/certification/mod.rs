// Certification readiness: requirement-name resolution and readiness scoring
// against a worker's held skill ids.

pub mod handlers;
pub mod readiness;
pub mod resolver;
