pub mod action;
pub mod app;
pub mod config;
pub mod event;
pub mod format;
pub mod gpu;
pub mod trace;
pub mod ui;
