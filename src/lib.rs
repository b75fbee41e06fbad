pub mod action;
pub mod app;
pub mod cli;
pub mod components;
pub mod config;
pub mod docker;
pub mod logging;
pub mod menu;
pub mod models;
pub mod tui;
pub mod ui;
