pub mod navigation;
pub mod render;
pub mod screens;
pub mod types;
