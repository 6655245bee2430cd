//! HR analytics dashboard: load an employee table, filter it by department,
//! job role, gender and experience, and aggregate the filtered view into the
//! tables behind each dashboard section.
//!
//! The [`data`] and [`analytics`] modules carry no UI dependency; [`app`],
//! [`state`] and [`ui`] render them with egui.

pub mod analytics;
pub mod app;
pub mod color;
pub mod config;
pub mod data;
pub mod state;
pub mod ui;
