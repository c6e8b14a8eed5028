pub mod app;
pub mod artwork;
pub mod audio;
pub mod catalog;
pub mod logging;
pub mod player;
pub mod ui;
