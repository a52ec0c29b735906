// Per-worker profiles: extract skills from a worker's task lines, persist them
// through the profile store, and report readiness against the certification catalog.

pub mod handlers;
