//! `yurucamp` -- terminal front-end over the Yurucamp backend API.
//!
//! Browses activities, camp areas and events with the same
//! filter-then-paginate pipeline as the web views, and runs the event
//! participant gacha.

pub mod cli;
pub mod commands;
pub mod config;
pub mod render;
