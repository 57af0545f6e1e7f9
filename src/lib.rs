//! REST server exposing an AnyList account's shopping lists, recipes and
//! meal plan over plain JSON endpoints.

pub mod anylist;
pub mod api;
pub mod cli;
pub mod config;
pub mod constants;
pub mod errors;
pub mod service;
pub mod utils;
pub mod validation;
