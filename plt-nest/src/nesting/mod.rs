//! Greedy bottom-left strip nesting on axis-aligned bounding boxes.

mod engine;
pub mod search;

#[doc(inline)]
pub use engine::NestingEngine;
