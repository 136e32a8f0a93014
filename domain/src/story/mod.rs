//! Story request domain.
//!
//! - [`value_objects`]: the closed-choice slots: [`AgeGroup`], [`Genre`], [`StoryLength`]
//! - [`params`]: [`StoryParams`] and the [`StoryParamsBuilder`] that fills it slot by slot
//! - [`keywords`]: multilingual keyword tables used to recognise slot answers

pub mod keywords;
pub mod params;
pub mod value_objects;

pub use params::{Slot, StoryParams, StoryParamsBuilder};
pub use value_objects::{AgeGroup, Genre, StoryLength};
