//! Client-side data shaping shared by the Yurucamp list views and the
//! event participant picker.
//!
//! Everything here is synchronous and free of I/O: fetching lives in
//! `yurucamp-client`, real timers in `yurucamp-picker`.

pub mod error;
pub mod filter;
pub mod gacha;
pub mod list_view;
pub mod models;
pub mod pagination;
pub mod types;
