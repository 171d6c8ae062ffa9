//! Shader node types and their fixed socket schemas

use crate::foundation::math::Vec3;
use crate::graph::tree::ImageHandle;

/// Data type carried by a socket
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SocketType {
    /// Scalar float
    Float,
    /// 3-component vector
    Vector,
    /// RGB color (alpha is implicitly 1.0)
    Color,
    /// Closure/shader connection, link-only
    Shader,
}

/// Default value stored on an unlinked input socket
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SocketValue {
    /// Scalar float value
    Float(f32),
    /// Vector value
    Vector(Vec3),
    /// Color value
    Color(Vec3),
}

impl SocketValue {
    /// The socket type this value belongs to
    pub fn socket_type(&self) -> SocketType {
        match self {
            Self::Float(_) => SocketType::Float,
            Self::Vector(_) => SocketType::Vector,
            Self::Color(_) => SocketType::Color,
        }
    }
}

/// Named input slot on a shader node
#[derive(Debug, Clone)]
pub struct InputSocket {
    /// Socket name, unique per node
    pub name: &'static str,
    /// Socket data type
    pub ty: SocketType,
    /// Default value; `None` for link-only (shader) sockets
    pub value: Option<SocketValue>,
}

/// Named output slot on a shader node
#[derive(Debug, Clone)]
pub struct OutputSocket {
    /// Socket name, unique per node
    pub name: &'static str,
    /// Socket data type
    pub ty: SocketType,
}

/// The node types the translator can emit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Principal physically-based shading node
    PrincipledBsdf,
    /// Material output node
    OutputMaterial,
    /// Image texture sampler
    ImageTexture,
    /// Tangent-space normal map decoder
    NormalMap,
    /// UV placement transform
    Mapping,
    /// Texture coordinate source
    TextureCoord,
}

impl NodeKind {
    /// Display label, matching the conventional node names
    pub fn label(self) -> &'static str {
        match self {
            Self::PrincipledBsdf => "Principled BSDF",
            Self::OutputMaterial => "Material Output",
            Self::ImageTexture => "Image Texture",
            Self::NormalMap => "Normal Map",
            Self::Mapping => "Mapping",
            Self::TextureCoord => "Texture Coordinate",
        }
    }

    fn inputs(self) -> Vec<InputSocket> {
        let float = |name, v| InputSocket {
            name,
            ty: SocketType::Float,
            value: Some(SocketValue::Float(v)),
        };
        let vector = |name, x, y, z| InputSocket {
            name,
            ty: SocketType::Vector,
            value: Some(SocketValue::Vector(Vec3::new(x, y, z))),
        };
        let color = |name, r, g, b| InputSocket {
            name,
            ty: SocketType::Color,
            value: Some(SocketValue::Color(Vec3::new(r, g, b))),
        };
        let shader = |name| InputSocket {
            name,
            ty: SocketType::Shader,
            value: None,
        };

        match self {
            Self::PrincipledBsdf => vec![
                color("Base Color", 0.8, 0.8, 0.8),
                float("Metallic", 0.0),
                float("Roughness", 0.5),
                float("Specular", 0.5),
                color("Emission", 0.0, 0.0, 0.0),
                float("Emission Strength", 0.0),
                float("Alpha", 1.0),
                float("IOR", 1.45),
                vector("Normal", 0.0, 0.0, 0.0),
            ],
            Self::OutputMaterial => vec![shader("Surface")],
            Self::ImageTexture => vec![vector("Vector", 0.0, 0.0, 0.0)],
            Self::NormalMap => vec![float("Strength", 1.0), color("Color", 0.5, 0.5, 1.0)],
            Self::Mapping => vec![
                vector("Vector", 0.0, 0.0, 0.0),
                vector("Location", 0.0, 0.0, 0.0),
                vector("Rotation", 0.0, 0.0, 0.0),
                vector("Scale", 1.0, 1.0, 1.0),
            ],
            Self::TextureCoord => Vec::new(),
        }
    }

    fn outputs(self) -> Vec<OutputSocket> {
        let out = |name, ty| OutputSocket { name, ty };

        match self {
            Self::PrincipledBsdf => vec![out("BSDF", SocketType::Shader)],
            Self::OutputMaterial => Vec::new(),
            Self::ImageTexture => vec![
                out("Color", SocketType::Color),
                out("Alpha", SocketType::Float),
            ],
            Self::NormalMap => vec![out("Normal", SocketType::Vector)],
            Self::Mapping => vec![out("Vector", SocketType::Vector)],
            Self::TextureCoord => vec![
                out("UV", SocketType::Vector),
                out("Generated", SocketType::Vector),
                out("Object", SocketType::Vector),
            ],
        }
    }
}

/// One node instance in a shader tree
#[derive(Debug, Clone)]
pub struct ShaderNode {
    /// Node type
    pub kind: NodeKind,
    /// Input sockets with their current default values
    pub inputs: Vec<InputSocket>,
    /// Output sockets
    pub outputs: Vec<OutputSocket>,
    /// Editor placement assigned by the layout allocator
    pub location: (f32, f32),
    /// Image attached to an `ImageTexture` node
    pub image: Option<ImageHandle>,
}

impl ShaderNode {
    /// Instantiate a node of the given kind with its schema sockets
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            inputs: kind.inputs(),
            outputs: kind.outputs(),
            location: (0.0, 0.0),
            image: None,
        }
    }

    /// Look up an input socket by name
    pub fn input(&self, name: &str) -> Option<&InputSocket> {
        self.inputs.iter().find(|s| s.name == name)
    }

    /// Look up an input socket by name, mutably
    pub fn input_mut(&mut self, name: &str) -> Option<&mut InputSocket> {
        self.inputs.iter_mut().find(|s| s.name == name)
    }

    /// Look up an output socket by name
    pub fn output(&self, name: &str) -> Option<&OutputSocket> {
        self.outputs.iter().find(|s| s.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_principled_schema() {
        let node = ShaderNode::new(NodeKind::PrincipledBsdf);
        for name in [
            "Base Color",
            "Metallic",
            "Roughness",
            "Specular",
            "Emission",
            "Emission Strength",
            "Alpha",
            "IOR",
            "Normal",
        ] {
            assert!(node.input(name).is_some(), "missing input {name}");
        }
        assert_eq!(node.output("BSDF").unwrap().ty, SocketType::Shader);
    }

    #[test]
    fn test_image_texture_outputs() {
        let node = ShaderNode::new(NodeKind::ImageTexture);
        assert_eq!(node.output("Color").unwrap().ty, SocketType::Color);
        assert_eq!(node.output("Alpha").unwrap().ty, SocketType::Float);
        assert!(node.output("Normal").is_none());
    }

    #[test]
    fn test_mapping_defaults() {
        let node = ShaderNode::new(NodeKind::Mapping);
        let scale = node.input("Scale").unwrap();
        assert_eq!(scale.value, Some(SocketValue::Vector(Vec3::new(1.0, 1.0, 1.0))));
    }

    #[test]
    fn test_shader_socket_has_no_value() {
        let node = ShaderNode::new(NodeKind::OutputMaterial);
        let surface = node.input("Surface").unwrap();
        assert_eq!(surface.ty, SocketType::Shader);
        assert!(surface.value.is_none());
    }
}
