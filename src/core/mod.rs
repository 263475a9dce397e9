pub mod index;
pub mod listing;
pub mod render;
