//! Domain services used by the HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own the floorplan logic (snapping, routing, schedule
//! ingest, congestion, persistence) so route handlers stay focused on request
//! parsing and response shapes.

pub mod congestion;
pub mod hallway;
pub mod persistence;
pub mod route;
pub mod schedule;
pub mod space;
pub mod upload;
