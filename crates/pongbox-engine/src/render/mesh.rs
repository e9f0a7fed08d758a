use bytemuck::{Pod, Zeroable};

use super::{Attribute, ProgramBindings};

/// Primitive topology of a mesh.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Topology {
    Triangles,
    Lines,
}

/// Interleaved vertex (48 bytes).
///
///  offset  0  position   [f32; 3]
///  offset 12  color      [f32; 4]
///  offset 28  normal     [f32; 3]
///  offset 40  tex_coord  [f32; 2]
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
    pub normal: [f32; 3],
    pub tex_coord: [f32; 2],
}

impl Vertex {
    const OFFSETS: [(Attribute, u64, wgpu::VertexFormat); 4] = [
        (Attribute::Position, 0, wgpu::VertexFormat::Float32x3),
        (Attribute::Color, 12, wgpu::VertexFormat::Float32x4),
        (Attribute::Normal, 28, wgpu::VertexFormat::Float32x3),
        (Attribute::TextureCoord, 40, wgpu::VertexFormat::Float32x2),
    ];

    /// Vertex attributes placed at the shader locations resolved in `bindings`.
    ///
    /// Unresolved attributes are left out of the layout.
    pub(crate) fn attributes(bindings: &ProgramBindings) -> Vec<wgpu::VertexAttribute> {
        Self::OFFSETS
            .iter()
            .filter_map(|&(attr, offset, format)| {
                bindings.attribute(attr).map(|shader_location| wgpu::VertexAttribute {
                    format,
                    offset,
                    shader_location,
                })
            })
            .collect()
    }
}

/// CPU-side mesh produced by the geometry builders.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshData {
    pub label: &'static str,
    pub topology: Topology,
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u16>,
}

impl MeshData {
    pub fn new(label: &'static str, topology: Topology) -> Self {
        Self {
            label,
            topology,
            vertices: Vec::new(),
            indices: Vec::new(),
        }
    }

    /// Appends a vertex and returns its index.
    pub fn push_vertex(&mut self, vertex: Vertex) -> u16 {
        let index = self.vertices.len() as u16;
        self.vertices.push(vertex);
        index
    }

    /// True if every index points at an existing vertex and the index count
    /// fits the topology.
    pub fn is_well_formed(&self) -> bool {
        let per_primitive = match self.topology {
            Topology::Triangles => 3,
            Topology::Lines => 2,
        };
        !self.indices.is_empty()
            && self.indices.len() % per_primitive == 0
            && self
                .indices
                .iter()
                .all(|&i| (i as usize) < self.vertices.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<Vertex>(), 48);
    }

    #[test]
    fn attributes_follow_resolved_locations() {
        let program = crate::render::ProgramInterface {
            label: "test",
            attributes: &[("vertexPosition", 4), ("vertexTextureCoord", 1)],
            uniforms: &[],
        };
        let attrs = Vertex::attributes(&ProgramBindings::resolve(&program));
        assert_eq!(attrs.len(), 2);
        assert_eq!((attrs[0].shader_location, attrs[0].offset), (4, 0));
        assert_eq!((attrs[1].shader_location, attrs[1].offset), (1, 40));
    }

    #[test]
    fn well_formed_checks_indices() {
        let mut m = MeshData::new("tri", Topology::Triangles);
        for _ in 0..3 {
            m.push_vertex(Vertex::default());
        }
        m.indices = vec![0, 1, 2];
        assert!(m.is_well_formed());

        m.indices = vec![0, 1, 3];
        assert!(!m.is_well_formed());

        m.indices = vec![0, 1];
        assert!(!m.is_well_formed());
    }
}
