//! GPU Resource Lifecycle
//!
//! Everything between the window and the per-frame draw call: the device
//! and surface ([`context`]), shader objects and pipelines ([`shader`],
//! [`pipeline`]), vertex record layouts ([`vertex`]), and the staged
//! buffer upload path ([`upload`]).

pub mod context;
pub mod pipeline;
pub mod shader;
pub mod upload;
pub mod vertex;
