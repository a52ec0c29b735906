// Skill taxonomy matching: reference data, normalization, similarity scoring,
// task-to-skill mapping, and per-worker / per-batch extraction.
// Everything except `handlers` is pure and synchronous.

pub mod batch;
pub mod catalog;
pub mod extractor;
pub mod handlers;
pub mod mapper;
pub mod normalize;
pub mod similarity;
