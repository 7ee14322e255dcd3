pub mod assets;
pub mod audio;
pub mod compute;
pub mod config;
pub mod entities;
pub mod input;
pub mod scene;
pub mod session;
pub mod ticker;
