//! Core construct model for workflow definitions
//!
//! This module defines the construct tree, the node kinds that live in it
//! (workflow, job, step), and the validation and synthesis passes that turn
//! a tree into a workflow document.

pub mod action;
pub mod config;
pub mod construct;
pub mod error;
pub mod job;
pub mod keys;
pub mod pipeline;
pub mod settings;
pub mod step;
pub mod synthesis;
pub mod trigger;
pub mod validation;
pub mod value;

pub use action::*;
pub use error::*;
pub use job::*;
pub use pipeline::*;
pub use settings::*;
pub use step::*;
pub use trigger::*;
pub use value::*;
