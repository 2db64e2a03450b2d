//! Inline WGSL sources and their stage interfaces.
//!
//! Sources are parsed and validated with naga before they reach the device, so
//! a syntax error surfaces as an `Err` naming the shader instead of a device
//! validation panic.

use std::borrow::Cow;

use anyhow::{anyhow, Context, Result};

/// Maps a 2D position at location 0 to clip space.
pub const TRIANGLE_VERTEX_WGSL: &str = include_str!("shaders/triangle_vs.wgsl");

/// Emits opaque red at location 0.
pub const TRIANGLE_FRAGMENT_WGSL: &str = include_str!("shaders/triangle_fs.wgsl");

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Stage {
    Vertex,
    Fragment,
}

impl Stage {
    fn to_naga(self) -> naga::ShaderStage {
        match self {
            Stage::Vertex => naga::ShaderStage::Vertex,
            Stage::Fragment => naga::ShaderStage::Fragment,
        }
    }
}

/// Format of a location-bound stage input or output.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum IoFormat {
    Float32,
    Float32x2,
    Float32x3,
    Float32x4,
    /// Anything that is not a 32-bit float scalar or vector.
    Other,
}

/// Location-bound inputs and outputs of one entry point, in declaration order.
///
/// Built-ins such as `@builtin(position)` are not listed.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct StageInterface {
    pub inputs: Vec<(u32, IoFormat)>,
    pub outputs: Vec<(u32, IoFormat)>,
}

/// One shader stage: WGSL text plus the entry point the pipeline will use.
#[derive(Debug, Clone)]
pub struct ShaderSource {
    pub label: &'static str,
    pub stage: Stage,
    pub entry_point: &'static str,
    pub wgsl: Cow<'static, str>,
}

impl ShaderSource {
    pub fn triangle_vertex() -> Self {
        Self {
            label: "trigon triangle vs",
            stage: Stage::Vertex,
            entry_point: "main",
            wgsl: Cow::Borrowed(TRIANGLE_VERTEX_WGSL),
        }
    }

    pub fn triangle_fragment() -> Self {
        Self {
            label: "trigon triangle fs",
            stage: Stage::Fragment,
            entry_point: "main",
            wgsl: Cow::Borrowed(TRIANGLE_FRAGMENT_WGSL),
        }
    }

    /// Parses and validates the source, then reports the entry point's interface.
    pub fn reflect(&self) -> Result<StageInterface> {
        let module = naga::front::wgsl::parse_str(&self.wgsl).map_err(|e| {
            anyhow!(
                "WGSL parse error in `{}`:\n{}",
                self.label,
                e.emit_to_string(&self.wgsl)
            )
        })?;

        let mut validator = naga::valid::Validator::new(
            naga::valid::ValidationFlags::all(),
            naga::valid::Capabilities::all(),
        );
        validator.validate(&module).map_err(|e| {
            anyhow!(
                "WGSL validation error in `{}`:\n{}",
                self.label,
                e.emit_to_string(&self.wgsl)
            )
        })?;

        let stage = self.stage.to_naga();
        let entry = module
            .entry_points
            .iter()
            .find(|ep| ep.stage == stage && ep.name == self.entry_point)
            .with_context(|| {
                format!(
                    "`{}` has no {:?} entry point named `{}`",
                    self.label, self.stage, self.entry_point
                )
            })?;

        let mut interface = StageInterface::default();
        for arg in &entry.function.arguments {
            collect_locations(&module, arg.ty, arg.binding.as_ref(), &mut interface.inputs);
        }
        if let Some(result) = &entry.function.result {
            collect_locations(&module, result.ty, result.binding.as_ref(), &mut interface.outputs);
        }

        Ok(interface)
    }
}

fn collect_locations(
    module: &naga::Module,
    ty: naga::Handle<naga::Type>,
    binding: Option<&naga::Binding>,
    out: &mut Vec<(u32, IoFormat)>,
) {
    match binding {
        Some(naga::Binding::Location { location, .. }) => {
            out.push((*location, io_format(&module.types[ty].inner)));
        }
        Some(naga::Binding::BuiltIn(_)) => {}
        // Unbound arguments are structs whose members carry the bindings.
        None => {
            if let naga::TypeInner::Struct { members, .. } = &module.types[ty].inner {
                for member in members {
                    collect_locations(module, member.ty, member.binding.as_ref(), out);
                }
            }
        }
    }
}

fn io_format(inner: &naga::TypeInner) -> IoFormat {
    match *inner {
        naga::TypeInner::Scalar(scalar) if scalar == naga::Scalar::F32 => IoFormat::Float32,
        naga::TypeInner::Vector { size, scalar } if scalar == naga::Scalar::F32 => match size {
            naga::VectorSize::Bi => IoFormat::Float32x2,
            naga::VectorSize::Tri => IoFormat::Float32x3,
            naga::VectorSize::Quad => IoFormat::Float32x4,
        },
        _ => IoFormat::Other,
    }
}
