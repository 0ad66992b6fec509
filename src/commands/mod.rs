pub mod color;
pub mod control;
pub mod devices;
pub mod scenes;
pub mod state;
pub mod taxonomy;
