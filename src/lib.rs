//! JudgeFlow: typed client for the JudgeFlow judge backend and a terminal UI
//! on top of it.
//!
//! - [`api::JudgeApi`] is the typed client; every call goes through the
//!   bearer-token wrapper in [`auth`], which refreshes once on a 401
//! - [`session`] tracks whether the user is signed in
//! - [`app`] and [`ui`] make up the interactive terminal client

pub mod adapters;
pub mod api;
pub mod app;
pub mod auth;
pub mod cli;
pub mod clipboard;
pub mod config;
pub mod error;
pub mod files;
pub mod filters;
pub mod logging;
pub mod markdown;
pub mod models;
pub mod notifications;
pub mod review;
pub mod session;
pub mod terminal;
pub mod timer;
pub mod traits;
pub mod ui;
pub mod validation;
pub mod widgets;
