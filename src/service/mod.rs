//! Operations behind the REST endpoints
//!
//! This module contains:
//! - Shopping-list item operations (add, remove, update, check)
//! - Recipe and recipe-collection operations
//! - Meal-plan event creation
//!
//! Every operation logs in through the upstream client before touching data.

mod lists;
mod meal_plan;
mod recipes;

pub use lists::*;
pub use meal_plan::*;
pub use recipes::*;

use crate::anylist::UpstreamError;

#[derive(Debug, thiserror::Error)]
pub enum OperationError {
    #[error("List not found")]
    ListNotFound,
    #[error("Item not found")]
    ItemNotFound,
    #[error("Recipe not found")]
    RecipeNotFound,
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

/// Whether an operation changed anything upstream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Changed,
    Unchanged,
}
