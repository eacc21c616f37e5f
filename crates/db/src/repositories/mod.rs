//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod article_repo;
pub mod category_repo;
pub mod cuisine_type_repo;
pub mod region_repo;
pub mod restaurant_image_repo;
pub mod restaurant_menu_repo;
pub mod restaurant_repo;
pub mod tag_repo;

pub use article_repo::ArticleRepo;
pub use category_repo::RestaurantCategoryRepo;
pub use cuisine_type_repo::CuisineTypeRepo;
pub use region_repo::RegionRepo;
pub use restaurant_image_repo::RestaurantImageRepo;
pub use restaurant_menu_repo::RestaurantMenuRepo;
pub use restaurant_repo::RestaurantRepo;
pub use tag_repo::TagRepo;
