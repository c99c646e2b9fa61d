pub mod camera;
pub mod controls;
pub mod hud;
pub mod lamp;
pub mod scene;
