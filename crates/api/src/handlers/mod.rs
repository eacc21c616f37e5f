pub mod articles;
pub mod categories;
pub mod cuisine_types;
pub mod media;
pub mod regions;
pub mod restaurant_images;
pub mod restaurant_menus;
pub mod restaurants;
pub mod tags;
