//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` + `Validate` create DTO for inserts
//! - A `Deserialize` + `Validate` update DTO (all `Option` fields) for patches

pub mod article;
pub mod category;
pub mod cuisine_type;
pub mod region;
pub mod restaurant;
pub mod restaurant_image;
pub mod restaurant_menu;
pub mod tag;
