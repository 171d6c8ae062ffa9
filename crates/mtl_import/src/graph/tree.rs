//! Shader tree storage and construction API
//!
//! Socket lookups are only ever made against the fixed schemas in
//! [`NodeKind`](crate::graph::NodeKind); a failed lookup or a type mismatch
//! is a programming error and panics rather than returning a recoverable
//! error.

use std::fmt;

use crate::assets::ImageData;
use crate::foundation::collections::{HandleMap, TypedHandle};
use crate::foundation::math::Vec3;
use crate::graph::node::{NodeKind, ShaderNode, SocketValue};

/// Stable handle to a node in a [`ShaderTree`]
pub type NodeHandle = TypedHandle<ShaderNode>;

/// Stable handle to an image owned by a [`ShaderTree`]
pub type ImageHandle = TypedHandle<ImageData>;

/// Directed connection between an output socket and an input socket
#[derive(Debug, Clone, Copy)]
pub struct Link {
    /// Source node
    pub from_node: NodeHandle,
    /// Output socket name on the source node
    pub from_socket: &'static str,
    /// Sink node
    pub to_node: NodeHandle,
    /// Input socket name on the sink node
    pub to_socket: &'static str,
}

/// A shader node graph under construction or finished
#[derive(Debug, Default, Clone)]
pub struct ShaderTree {
    nodes: HandleMap<ShaderNode>,
    links: Vec<Link>,
    images: HandleMap<ImageData>,
    active: Option<NodeHandle>,
}

impl ShaderTree {
    /// Create an empty tree
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node of the given kind
    pub fn add_node(&mut self, kind: NodeKind) -> NodeHandle {
        let handle = NodeHandle::new(self.nodes.insert(ShaderNode::new(kind)));
        log::trace!("added {} node", kind.label());
        handle
    }

    /// Borrow a node; panics on a stale handle
    pub fn node(&self, handle: NodeHandle) -> &ShaderNode {
        self.nodes.get(handle.key()).expect("stale node handle")
    }

    /// Borrow a node mutably; panics on a stale handle
    pub fn node_mut(&mut self, handle: NodeHandle) -> &mut ShaderNode {
        self.nodes.get_mut(handle.key()).expect("stale node handle")
    }

    fn set_value(&mut self, handle: NodeHandle, name: &str, value: SocketValue) {
        let node = self.nodes.get_mut(handle.key()).expect("stale node handle");
        let kind = node.kind;
        let socket = node.input_mut(name).unwrap_or_else(|| {
            panic!("no input socket '{}' on {} node", name, kind.label())
        });
        assert!(
            socket.ty == value.socket_type(),
            "socket '{}' on {} node is {:?}, not {:?}",
            name,
            kind.label(),
            socket.ty,
            value.socket_type()
        );
        socket.value = Some(value);
    }

    /// Set a float input socket's default value
    pub fn set_float(&mut self, handle: NodeHandle, name: &str, value: f32) {
        self.set_value(handle, name, SocketValue::Float(value));
    }

    /// Set a vector input socket's default value
    pub fn set_vector(&mut self, handle: NodeHandle, name: &str, value: Vec3) {
        self.set_value(handle, name, SocketValue::Vector(value));
    }

    /// Set a color input socket's default value (alpha is implicitly 1.0)
    pub fn set_color(&mut self, handle: NodeHandle, name: &str, value: Vec3) {
        self.set_value(handle, name, SocketValue::Color(value));
    }

    /// Connect an output socket to an input socket
    pub fn link(
        &mut self,
        from_node: NodeHandle,
        from_socket: &'static str,
        to_node: NodeHandle,
        to_socket: &'static str,
    ) {
        let from = self.node(from_node);
        assert!(
            from.output(from_socket).is_some(),
            "no output socket '{}' on {} node",
            from_socket,
            from.kind.label()
        );
        let to = self.node(to_node);
        assert!(
            to.input(to_socket).is_some(),
            "no input socket '{}' on {} node",
            to_socket,
            to.kind.label()
        );
        self.links.push(Link {
            from_node,
            from_socket,
            to_node,
            to_socket,
        });
    }

    /// Take ownership of image data, yielding a handle nodes can reference
    pub fn add_image(&mut self, image: ImageData) -> ImageHandle {
        ImageHandle::new(self.images.insert(image))
    }

    /// Attach an owned image to an image-texture node
    pub fn set_image(&mut self, handle: NodeHandle, image: ImageHandle) {
        let node = self.node_mut(handle);
        assert!(
            node.kind == NodeKind::ImageTexture,
            "cannot attach an image to a {} node",
            node.kind.label()
        );
        node.image = Some(image);
    }

    /// Borrow an owned image
    pub fn image(&self, handle: ImageHandle) -> &ImageData {
        self.images.get(handle.key()).expect("stale image handle")
    }

    /// Mark a node as the active one
    pub fn set_active(&mut self, handle: NodeHandle) {
        self.active = Some(handle);
    }

    /// The active node, if one was marked
    pub fn active(&self) -> Option<NodeHandle> {
        self.active
    }

    /// Iterate nodes with their handles
    pub fn nodes(&self) -> impl Iterator<Item = (NodeHandle, &ShaderNode)> {
        self.nodes.iter().map(|(k, n)| (NodeHandle::new(k), n))
    }

    /// All links in creation order
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of links
    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    /// Count nodes of one kind
    pub fn count_kind(&self, kind: NodeKind) -> usize {
        self.nodes.values().filter(|n| n.kind == kind).count()
    }

    /// Handle of the first node of a kind, if any
    pub fn find_kind(&self, kind: NodeKind) -> Option<NodeHandle> {
        self.nodes()
            .find(|(_, n)| n.kind == kind)
            .map(|(h, _)| h)
    }

    fn node_tag(&self, handle: NodeHandle) -> String {
        let index = self
            .nodes()
            .position(|(h, _)| h == handle)
            .expect("stale node handle");
        format!("{}#{}", self.node(handle).kind.label(), index)
    }
}

impl fmt::Display for ShaderTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "shader tree: {} nodes, {} links",
            self.node_count(),
            self.link_count()
        )?;
        for (handle, node) in self.nodes() {
            let active = if self.active == Some(handle) { " (active)" } else { "" };
            writeln!(
                f,
                "  {} at ({:.0}, {:.0}){}",
                self.node_tag(handle),
                node.location.0,
                node.location.1,
                active
            )?;
            for socket in &node.inputs {
                match socket.value {
                    Some(SocketValue::Float(v)) => {
                        writeln!(f, "    {} = {:.3}", socket.name, v)?;
                    }
                    Some(SocketValue::Vector(v) | SocketValue::Color(v)) => {
                        writeln!(
                            f,
                            "    {} = ({:.3}, {:.3}, {:.3})",
                            socket.name, v.x, v.y, v.z
                        )?;
                    }
                    None => {}
                }
            }
            if let Some(image) = node.image {
                let image = self.image(image);
                writeln!(f, "    image: {}x{}", image.width, image.height)?;
            }
        }
        for link in &self.links {
            writeln!(
                f,
                "  {}.{} -> {}.{}",
                self.node_tag(link.from_node),
                link.from_socket,
                self.node_tag(link.to_node),
                link.to_socket
            )?;
        }
        Ok(())
    }
}
