//! Domain logic for the restaurant directory.
//!
//! Everything in this crate is free of database dependencies so it can be
//! unit tested in isolation and shared by the repository and API layers.

pub mod error;
pub mod pagination;
pub mod representative;
pub mod restaurant;
pub mod storage;
pub mod types;
