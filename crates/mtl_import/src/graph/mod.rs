//! Shader node graph model
//!
//! A small fixed-schema node graph: the six node kinds the MTL translator
//! emits, typed sockets with default values, links, and a deterministic
//! first-fit layout. This stands in for a host application's shading
//! node-graph API.

pub mod layout;
pub mod node;
pub mod tree;

pub use layout::{NodeLayout, NODE_SIZE};
pub use node::{InputSocket, NodeKind, OutputSocket, ShaderNode, SocketType, SocketValue};
pub use tree::{ImageHandle, Link, NodeHandle, ShaderTree};
