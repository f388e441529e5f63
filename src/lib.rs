//! Reaction energy profiles from quantum-chemistry spreadsheets.
//!
//! [`data`] turns the sheet into an [`data::diagram::EnergyDiagram`],
//! [`render`] exports it, and [`app`] shows it in a preview window.

pub mod app;
pub mod color;
pub mod config;
pub mod data;
pub mod render;
pub mod state;
pub mod ui;
