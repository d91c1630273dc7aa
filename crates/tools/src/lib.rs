pub mod render;
pub mod seed;
