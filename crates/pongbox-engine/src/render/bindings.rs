//! Name → slot resolution for the mesh shader program.
//!
//! wgpu has no reflection API, so a program publishes its interface as a
//! [`ProgramInterface`] table next to its WGSL source. Resolution happens once
//! at startup; names the program does not declare are logged and stay
//! unbound (writes to them are ignored).

/// Per-vertex inputs.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Attribute {
    Position,
    Color,
    Normal,
    TextureCoord,
}

impl Attribute {
    pub const ALL: [Attribute; 4] = [
        Attribute::Position,
        Attribute::Color,
        Attribute::Normal,
        Attribute::TextureCoord,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Attribute::Position => "vertexPosition",
            Attribute::Color => "vertexColor",
            Attribute::Normal => "vertexNormal",
            Attribute::TextureCoord => "vertexTextureCoord",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Uniform slots.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Uniform {
    ModelViewMatrix,
    ProjectionMatrix,
    NormalMatrix,
    TextureMatrix,
    Sampler,
    EnableTexture,
    LightPosition,
    LightColor,
    EnableLighting,
}

impl Uniform {
    pub const ALL: [Uniform; 9] = [
        Uniform::ModelViewMatrix,
        Uniform::ProjectionMatrix,
        Uniform::NormalMatrix,
        Uniform::TextureMatrix,
        Uniform::Sampler,
        Uniform::EnableTexture,
        Uniform::LightPosition,
        Uniform::LightColor,
        Uniform::EnableLighting,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Uniform::ModelViewMatrix => "modelViewMatrix",
            Uniform::ProjectionMatrix => "projectionMatrix",
            Uniform::NormalMatrix => "normalMatrix",
            Uniform::TextureMatrix => "textureMatrix",
            Uniform::Sampler => "sampler",
            Uniform::EnableTexture => "enableTexture",
            Uniform::LightPosition => "lightPosition",
            Uniform::LightColor => "lightColor",
            Uniform::EnableLighting => "enableLighting",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// The inputs a compiled program declares.
#[derive(Debug, Clone, Copy)]
pub struct ProgramInterface {
    pub label: &'static str,
    /// `(name, shader location)` pairs.
    pub attributes: &'static [(&'static str, u32)],
    /// Uniform names, in declaration order.
    pub uniforms: &'static [&'static str],
}

impl ProgramInterface {
    pub fn resolve_attribute(&self, name: &str) -> Option<u32> {
        self.attributes
            .iter()
            .find(|(n, _)| *n == name)
            .map(|&(_, location)| location)
    }

    pub fn resolve_uniform(&self, name: &str) -> Option<Uniform> {
        if !self.uniforms.contains(&name) {
            return None;
        }
        Uniform::ALL.into_iter().find(|u| u.name() == name)
    }
}

/// Resolved slots for one program. Read-only after [`resolve`](Self::resolve).
#[derive(Debug, Clone, PartialEq)]
pub struct ProgramBindings {
    attributes: [Option<u32>; 4],
    uniforms: [bool; 9],
}

impl ProgramBindings {
    pub fn resolve(program: &ProgramInterface) -> Self {
        let mut attributes = [None; 4];
        for attr in Attribute::ALL {
            attributes[attr.index()] = program.resolve_attribute(attr.name());
            if attributes[attr.index()].is_none() {
                log::warn!("{}: attribute `{}` not found", program.label, attr.name());
            }
        }

        let mut uniforms = [false; 9];
        for uniform in Uniform::ALL {
            uniforms[uniform.index()] = program.resolve_uniform(uniform.name()).is_some();
            if !uniforms[uniform.index()] {
                log::warn!("{}: uniform `{}` not found", program.label, uniform.name());
            }
        }

        Self { attributes, uniforms }
    }

    pub fn attribute(&self, attr: Attribute) -> Option<u32> {
        self.attributes[attr.index()]
    }

    pub fn has_uniform(&self, uniform: Uniform) -> bool {
        self.uniforms[uniform.index()]
    }
}
