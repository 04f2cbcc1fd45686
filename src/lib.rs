pub mod api;
pub mod config;
pub mod error;
pub mod form;
pub mod normalize;
pub mod orchestrator;
pub mod render;
pub mod session;
pub mod validate;
// cmd and reports belong to the binary (see main.rs).
