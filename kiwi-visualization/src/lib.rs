//! Scene side of kiwi
//!
//! This crate provides what an interactive volume view needs on top of the
//! data crates:
//! - Camera and renderer with world/display projection
//! - Actors and shader programs
//! - Plain and textured-plane representations
//! - The touch gesture contract
//! - The three-plane [`ImageWidget`]

pub mod actor;
pub mod camera;
pub mod config;
pub mod image_plane;
pub mod image_widget;
pub mod interaction;
pub mod poly_data;
pub mod renderer;
pub mod representation;
pub mod shaders;

pub use actor::*;
pub use camera::*;
pub use config::*;
pub use image_plane::*;
pub use image_widget::*;
pub use interaction::*;
pub use poly_data::*;
pub use renderer::*;
pub use representation::*;
pub use shaders::ShaderProgram;
