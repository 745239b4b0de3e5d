//! Legal deadline tracker: a deadline store, countdown and urgency
//! classification, bucketed views, a timeline layout and alert schedules,
//! with a terminal dashboard on top.

pub mod app;
pub mod config;
pub mod domain;
pub mod input;
pub mod logging;
pub mod persistence;
pub mod ticker;
pub mod ui;
