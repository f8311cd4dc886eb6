//! View engine for the floorplan editor and congestion viewer.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It maps
//! between normalized image coordinates and screen pixels under zoom and pan,
//! hit-tests hallways and space markers, turns pointer events into
//! [`engine::Action`]s for the host page, and draws the scene to a 2D canvas.
//! The host JavaScript layer wires DOM events through [`bindings`] and sends
//! the resulting edits to the server.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`bindings`] | `wasm-bindgen` surface used by the host page |
//! | [`scene`] | Spaces, hallways, and congestion/route overlays |
//! | [`transform`] | Viewport value type and coordinate conversions |
//! | [`input`] | Tools, view presets, and the gesture state machine |
//! | [`hit`] | Nearest hallway / marker under a screen point |
//! | [`render`] | Canvas drawing and hallway styling |
//! | [`consts`] | Shared numeric constants (zoom limits, pixel thresholds) |

pub mod bindings;
pub mod consts;
pub mod engine;
pub mod hit;
pub mod input;
pub mod render;
pub mod scene;
pub mod transform;
