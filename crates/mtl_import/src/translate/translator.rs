//! The material translator
//!
//! One builder per MTL record. The whole fixed-topology graph is
//! constructed in [`ShaderTreeBuilder::new`]; the caller then takes the
//! finished tree with [`ShaderTreeBuilder::into_tree`]. The tree must be
//! taken - a builder dropped while still holding its tree panics, because
//! silently discarding a graph the material is about to reference is a
//! caller bug, not a runtime condition.

use crate::assets::ImageLoader;
use crate::graph::{NodeHandle, NodeKind, NodeLayout, ShaderTree};
use crate::material::{BlendMethod, Material};
use crate::mtl::{MtlMaterial, TexMapKind};
use crate::translate::illum::{shading_flags, ShadingFlags};
use crate::translate::resolve::load_texture_image;
use crate::translate::scalars::derive_scalars;

/// Builds the principled shader tree for one MTL material
pub struct ShaderTreeBuilder {
    tree: Option<ShaderTree>,
    bsdf: NodeHandle,
    output: NodeHandle,
    layout: NodeLayout,
}

impl ShaderTreeBuilder {
    /// Translate `mtl` into a shader tree, updating `material`'s blend
    /// mode along the way
    ///
    /// Translation never fails: unsupported illumination codes fall back
    /// to unset flags and unresolvable texture maps are skipped, both with
    /// a log record.
    pub fn new(
        mtl: &MtlMaterial,
        material: &mut Material,
        loader: &mut dyn ImageLoader,
    ) -> Self {
        let mut tree = ShaderTree::new();
        let bsdf = tree.add_node(NodeKind::PrincipledBsdf);
        let output = tree.add_node(NodeKind::OutputMaterial);

        let mut builder = Self {
            tree: Some(tree),
            bsdf,
            output,
            layout: NodeLayout::new(),
        };
        builder.set_bsdf_socket_values(mtl, material);
        builder.add_image_textures(mtl, material, loader);
        builder.link_sockets(bsdf, "BSDF", output, "Surface", 4);
        builder.tree_mut().set_active(output);
        builder
    }

    /// Take ownership of the finished tree
    ///
    /// Consumes the builder; the tree can only be taken once.
    pub fn into_tree(mut self) -> ShaderTree {
        self.tree.take().expect("shader tree already taken")
    }

    fn tree_mut(&mut self) -> &mut ShaderTree {
        self.tree.as_mut().expect("shader tree already taken")
    }

    /// Link two sockets and place both nodes, the source at `from_column`
    /// and the sink one column to its right
    fn link_sockets(
        &mut self,
        from_node: NodeHandle,
        from_socket: &'static str,
        to_node: NodeHandle,
        to_socket: &'static str,
        from_column: i32,
    ) {
        let from_location = self.layout.place(from_column);
        let to_location = self.layout.place(from_column + 1);
        let tree = self.tree_mut();
        tree.node_mut(from_node).location = from_location;
        tree.node_mut(to_node).location = to_location;
        tree.link(from_node, from_socket, to_node, to_socket);
    }

    fn set_bsdf_socket_values(&mut self, mtl: &MtlMaterial, material: &mut Material) {
        let flags = shading_flags(mtl.illum);
        let scalars = derive_scalars(mtl, flags);
        let has_emission_map = mtl.texture_maps.contains_key(&TexMapKind::Emission);

        let bsdf = self.bsdf;
        let tree = self.tree_mut();
        tree.set_color(bsdf, "Base Color", scalars.base_color);
        tree.set_color(bsdf, "Emission", scalars.emission_color);
        // The directive alone enables emission, even when its image never
        // resolves.
        if has_emission_map {
            tree.set_float(bsdf, "Emission Strength", 1.0);
        }
        tree.set_float(bsdf, "Specular", scalars.specular);
        tree.set_float(bsdf, "Roughness", scalars.roughness);
        tree.set_float(bsdf, "Metallic", scalars.metallic);
        tree.set_float(bsdf, "IOR", scalars.ior);
        tree.set_float(bsdf, "Alpha", scalars.alpha);

        if flags.contains(ShadingFlags::TRANSPARENCY) {
            material.blend_method = BlendMethod::Blend;
        }
    }

    fn add_image_textures(
        &mut self,
        mtl: &MtlMaterial,
        material: &mut Material,
        loader: &mut dyn ImageLoader,
    ) {
        let bsdf = self.bsdf;
        for kind in TexMapKind::ALL {
            let Some(tex_map) = mtl.texture_maps.get(&kind) else {
                continue;
            };
            if tex_map.image_path.is_empty() {
                // No image texture node of this map type can be added.
                continue;
            }

            let Some(image) = load_texture_image(loader, tex_map) else {
                // Image could not be resolved; don't add or link further
                // nodes for this map.
                continue;
            };

            let tree = self.tree_mut();
            let image_texture = tree.add_node(NodeKind::ImageTexture);
            let image = tree.add_image(image);
            tree.set_image(image_texture, image);

            // Normal map decoder sits between a bump texture and the
            // principled node.
            let normal_map = if kind == TexMapKind::Bump {
                let normal_map = tree.add_node(NodeKind::NormalMap);
                tree.set_float(normal_map, "Strength", mtl.normal_strength.max(0.0));
                Some(normal_map)
            } else {
                None
            };

            // UV mapping and coordinate nodes only when the placement
            // deviates from identity.
            if tex_map.has_transform() {
                let tree = self.tree_mut();
                let mapping = tree.add_node(NodeKind::Mapping);
                let texture_coordinate = tree.add_node(NodeKind::TextureCoord);
                tree.set_vector(mapping, "Location", tex_map.translation);
                tree.set_vector(mapping, "Scale", tex_map.scale);

                self.link_sockets(texture_coordinate, "UV", mapping, "Vector", 0);
                self.link_sockets(mapping, "Vector", image_texture, "Vector", 1);
            }

            if let Some(normal_map) = normal_map {
                self.link_sockets(image_texture, "Color", normal_map, "Color", 2);
                self.link_sockets(normal_map, "Normal", bsdf, "Normal", 3);
            } else if kind == TexMapKind::Alpha {
                self.link_sockets(image_texture, "Alpha", bsdf, kind.dest_socket(), 2);
                material.blend_method = BlendMethod::Blend;
            } else {
                self.link_sockets(image_texture, "Color", bsdf, kind.dest_socket(), 2);
            }
        }
    }
}

impl Drop for ShaderTreeBuilder {
    fn drop(&mut self) {
        // Ownership must be taken with into_tree() before the builder goes
        // away.
        assert!(
            self.tree.is_none(),
            "shader tree discarded without ownership transfer"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{AssetError, ImageData, NullImageLoader};
    use crate::foundation::math::Vec3;
    use crate::graph::{SocketValue, NODE_SIZE};
    use crate::mtl::TextureMap;
    use approx::assert_relative_eq;

    /// Loader that accepts a fixed set of paths
    struct MockLoader {
        known: Vec<String>,
    }

    impl MockLoader {
        fn accepting(paths: &[&str]) -> Self {
            Self {
                known: paths.iter().map(|p| (*p).to_string()).collect(),
            }
        }
    }

    impl ImageLoader for MockLoader {
        fn load(&mut self, path: &str) -> Result<ImageData, AssetError> {
            if self.known.iter().any(|k| k == path) {
                Ok(ImageData::solid_color(2, 2, [255, 255, 255, 255]))
            } else {
                Err(AssetError::NotFound(path.to_string()))
            }
        }
    }

    fn with_map(mtl: &mut MtlMaterial, kind: TexMapKind, path: &str) {
        let mut map = TextureMap::new(kind);
        map.image_path = path.to_string();
        mtl.texture_maps.insert(kind, map);
    }

    fn translate(mtl: &MtlMaterial, loader: &mut dyn ImageLoader) -> (Material, ShaderTree) {
        let mut material = Material::new(mtl.name.clone());
        let tree = ShaderTreeBuilder::new(mtl, &mut material, loader).into_tree();
        (material, tree)
    }

    fn float_input(tree: &ShaderTree, node: NodeHandle, name: &str) -> f32 {
        match tree.node(node).input(name).unwrap().value {
            Some(SocketValue::Float(v)) => v,
            other => panic!("socket {name} is {other:?}"),
        }
    }

    #[test]
    fn test_skeleton_for_bare_material() {
        let (_, tree) = translate(&MtlMaterial::default(), &mut NullImageLoader::new());

        assert_eq!(tree.node_count(), 2);
        assert_eq!(tree.link_count(), 1);
        assert_eq!(tree.count_kind(NodeKind::PrincipledBsdf), 1);
        assert_eq!(tree.count_kind(NodeKind::OutputMaterial), 1);

        let link = tree.links()[0];
        assert_eq!(link.from_socket, "BSDF");
        assert_eq!(link.to_socket, "Surface");

        let output = tree.find_kind(NodeKind::OutputMaterial).unwrap();
        assert_eq!(tree.active(), Some(output));
    }

    #[test]
    fn test_skeleton_locations() {
        let (_, tree) = translate(&MtlMaterial::default(), &mut NullImageLoader::new());

        let bsdf = tree.find_kind(NodeKind::PrincipledBsdf).unwrap();
        let output = tree.find_kind(NodeKind::OutputMaterial).unwrap();
        assert_eq!(tree.node(bsdf).location, (4.0 * NODE_SIZE, 0.0));
        assert_eq!(tree.node(output).location, (5.0 * NODE_SIZE, 0.0));
    }

    #[test]
    #[should_panic(expected = "discarded without ownership transfer")]
    fn test_drop_without_take_panics() {
        let mtl = MtlMaterial::default();
        let mut material = Material::new("m");
        let builder = ShaderTreeBuilder::new(&mtl, &mut material, &mut NullImageLoader::new());
        drop(builder);
    }

    #[test]
    fn test_scalar_sockets_populated() {
        let mut mtl = MtlMaterial::default();
        mtl.diffuse = Vec3::new(0.8, 0.2, 0.2);
        mtl.specular = Vec3::new(0.9, 0.9, 0.9);
        mtl.specular_exponent = 1000.0;
        mtl.illum = 2;

        let (_, tree) = translate(&mtl, &mut NullImageLoader::new());
        let bsdf = tree.find_kind(NodeKind::PrincipledBsdf).unwrap();

        assert_relative_eq!(float_input(&tree, bsdf, "Specular"), 0.9);
        assert_relative_eq!(float_input(&tree, bsdf, "Roughness"), 0.0);
        assert_relative_eq!(float_input(&tree, bsdf, "Metallic"), 0.0);
        assert_eq!(
            tree.node(bsdf).input("Base Color").unwrap().value,
            Some(SocketValue::Color(Vec3::new(0.8, 0.2, 0.2)))
        );
    }

    #[test]
    fn test_transparency_sets_blend_method() {
        let mut mtl = MtlMaterial::default();
        mtl.illum = 4;

        let (material, _) = translate(&mtl, &mut NullImageLoader::new());
        assert_eq!(material.blend_method, BlendMethod::Blend);
        // Glass fallback wins over the transparency fallback.
        let mtl_tree = {
            let (_, tree) = translate(&mtl, &mut NullImageLoader::new());
            tree
        };
        let bsdf = mtl_tree.find_kind(NodeKind::PrincipledBsdf).unwrap();
        assert_relative_eq!(float_input(&mtl_tree, bsdf, "IOR"), 1.5);
    }

    #[test]
    fn test_opaque_material_stays_opaque() {
        let mut mtl = MtlMaterial::default();
        mtl.illum = 2;

        let (material, _) = translate(&mtl, &mut NullImageLoader::new());
        assert_eq!(material.blend_method, BlendMethod::Opaque);
    }

    #[test]
    fn test_empty_image_path_adds_no_node() {
        let mut mtl = MtlMaterial::default();
        with_map(&mut mtl, TexMapKind::Diffuse, "");

        let (_, tree) = translate(&mtl, &mut NullImageLoader::new());
        assert_eq!(tree.count_kind(NodeKind::ImageTexture), 0);
        assert_eq!(tree.node_count(), 2);
    }

    #[test]
    fn test_unresolvable_image_skips_map() {
        let mut mtl = MtlMaterial::default();
        with_map(&mut mtl, TexMapKind::Diffuse, "gone.png");

        let (_, tree) = translate(&mtl, &mut NullImageLoader::new());
        assert_eq!(tree.count_kind(NodeKind::ImageTexture), 0);
        assert_eq!(tree.node_count(), 2);
        assert_eq!(tree.link_count(), 1);
    }

    #[test]
    fn test_diffuse_texture_links_color_to_base_color() {
        let mut mtl = MtlMaterial::default();
        with_map(&mut mtl, TexMapKind::Diffuse, "tex.png");

        let (_, tree) = translate(&mtl, &mut MockLoader::accepting(&["tex.png"]));

        assert_eq!(tree.count_kind(NodeKind::ImageTexture), 1);
        assert_eq!(tree.count_kind(NodeKind::Mapping), 0);
        assert_eq!(tree.count_kind(NodeKind::TextureCoord), 0);

        let texture = tree.find_kind(NodeKind::ImageTexture).unwrap();
        assert!(tree.node(texture).image.is_some());
        let link = tree
            .links()
            .iter()
            .find(|l| l.from_node == texture)
            .unwrap();
        assert_eq!(link.from_socket, "Color");
        assert_eq!(link.to_socket, "Base Color");
    }

    #[test]
    fn test_ambient_texture_feeds_metallic() {
        let mut mtl = MtlMaterial::default();
        with_map(&mut mtl, TexMapKind::Ambient, "ao.png");

        let (_, tree) = translate(&mtl, &mut MockLoader::accepting(&["ao.png"]));
        let texture = tree.find_kind(NodeKind::ImageTexture).unwrap();
        let link = tree
            .links()
            .iter()
            .find(|l| l.from_node == texture)
            .unwrap();
        assert_eq!(link.to_socket, "Metallic");
    }

    #[test]
    fn test_bump_map_inserts_normal_map_node() {
        let mut mtl = MtlMaterial::default();
        mtl.normal_strength = 0.8;
        with_map(&mut mtl, TexMapKind::Bump, "normal.png");

        let (_, tree) = translate(&mtl, &mut MockLoader::accepting(&["normal.png"]));

        assert_eq!(tree.count_kind(NodeKind::NormalMap), 1);
        let normal_map = tree.find_kind(NodeKind::NormalMap).unwrap();
        assert_relative_eq!(float_input(&tree, normal_map, "Strength"), 0.8);

        let texture = tree.find_kind(NodeKind::ImageTexture).unwrap();
        let bsdf = tree.find_kind(NodeKind::PrincipledBsdf).unwrap();
        let into_decoder = tree
            .links()
            .iter()
            .any(|l| l.from_node == texture && l.to_node == normal_map && l.to_socket == "Color");
        let into_bsdf = tree.links().iter().any(|l| {
            l.from_node == normal_map
                && l.from_socket == "Normal"
                && l.to_node == bsdf
                && l.to_socket == "Normal"
        });
        assert!(into_decoder);
        assert!(into_bsdf);
    }

    #[test]
    fn test_negative_bump_strength_clamped() {
        let mut mtl = MtlMaterial::default();
        with_map(&mut mtl, TexMapKind::Bump, "normal.png");

        let (_, tree) = translate(&mtl, &mut MockLoader::accepting(&["normal.png"]));
        let normal_map = tree.find_kind(NodeKind::NormalMap).unwrap();
        assert_relative_eq!(float_input(&tree, normal_map, "Strength"), 0.0);
    }

    #[test]
    fn test_alpha_map_links_alpha_output_and_blends() {
        let mut mtl = MtlMaterial::default();
        mtl.illum = 2;
        with_map(&mut mtl, TexMapKind::Alpha, "mask.png");

        let (material, tree) = translate(&mtl, &mut MockLoader::accepting(&["mask.png"]));

        assert_eq!(material.blend_method, BlendMethod::Blend);
        let texture = tree.find_kind(NodeKind::ImageTexture).unwrap();
        let link = tree
            .links()
            .iter()
            .find(|l| l.from_node == texture)
            .unwrap();
        assert_eq!(link.from_socket, "Alpha");
        assert_eq!(link.to_socket, "Alpha");
    }

    #[test]
    fn test_texture_transform_inserts_mapping_chain() {
        let mut mtl = MtlMaterial::default();
        let mut map = TextureMap::new(TexMapKind::Diffuse);
        map.image_path = "tex.png".to_string();
        map.translation = Vec3::new(0.5, 0.0, 0.0);
        map.scale = Vec3::new(2.0, 2.0, 1.0);
        mtl.texture_maps.insert(TexMapKind::Diffuse, map);

        let (_, tree) = translate(&mtl, &mut MockLoader::accepting(&["tex.png"]));

        assert_eq!(tree.count_kind(NodeKind::Mapping), 1);
        assert_eq!(tree.count_kind(NodeKind::TextureCoord), 1);

        let mapping = tree.find_kind(NodeKind::Mapping).unwrap();
        assert_eq!(
            tree.node(mapping).input("Location").unwrap().value,
            Some(SocketValue::Vector(Vec3::new(0.5, 0.0, 0.0)))
        );
        assert_eq!(
            tree.node(mapping).input("Scale").unwrap().value,
            Some(SocketValue::Vector(Vec3::new(2.0, 2.0, 1.0)))
        );

        let coord = tree.find_kind(NodeKind::TextureCoord).unwrap();
        let texture = tree.find_kind(NodeKind::ImageTexture).unwrap();
        assert!(tree.links().iter().any(|l| {
            l.from_node == coord && l.from_socket == "UV" && l.to_node == mapping
        }));
        assert!(tree.links().iter().any(|l| {
            l.from_node == mapping && l.to_node == texture && l.to_socket == "Vector"
        }));
    }

    #[test]
    fn test_emission_strength_follows_map_presence() {
        // Entry present with an empty path: strength still set, no node.
        let mut mtl = MtlMaterial::default();
        with_map(&mut mtl, TexMapKind::Emission, "");

        let (_, tree) = translate(&mtl, &mut NullImageLoader::new());
        let bsdf = tree.find_kind(NodeKind::PrincipledBsdf).unwrap();
        assert_relative_eq!(float_input(&tree, bsdf, "Emission Strength"), 1.0);
        assert_eq!(tree.count_kind(NodeKind::ImageTexture), 0);

        // No entry: the schema default stays.
        let (_, tree) = translate(&MtlMaterial::default(), &mut NullImageLoader::new());
        let bsdf = tree.find_kind(NodeKind::PrincipledBsdf).unwrap();
        assert_relative_eq!(float_input(&tree, bsdf, "Emission Strength"), 0.0);
    }

    #[test]
    fn test_two_textures_stack_rows_in_texture_column() {
        let mut mtl = MtlMaterial::default();
        with_map(&mut mtl, TexMapKind::Diffuse, "a.png");
        with_map(&mut mtl, TexMapKind::Specular, "b.png");

        let (_, tree) = translate(&mtl, &mut MockLoader::accepting(&["a.png", "b.png"]));

        assert_eq!(tree.count_kind(NodeKind::ImageTexture), 2);
        let mut xs: Vec<f32> = tree
            .nodes()
            .filter(|(_, n)| n.kind == NodeKind::ImageTexture)
            .map(|(_, n)| n.location.0)
            .collect();
        xs.sort_by(f32::total_cmp);
        // Both texture nodes sit in the texture column, on distinct rows.
        assert_eq!(xs, vec![2.0 * NODE_SIZE, 2.0 * NODE_SIZE]);
        let mut ys: Vec<f32> = tree
            .nodes()
            .filter(|(_, n)| n.kind == NodeKind::ImageTexture)
            .map(|(_, n)| n.location.1)
            .collect();
        ys.sort_by(f32::total_cmp);
        assert_ne!(ys[0], ys[1]);
    }
}
