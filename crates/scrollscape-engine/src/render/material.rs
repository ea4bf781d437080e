use std::fmt;

/// Declarations shared by every stage: uniform structs, bindings and the
/// vertex input/output structs.
pub const PRELUDE: &str = include_str!("shaders/prelude.wgsl");

const VERTEX_ENTRY: &str = "vs_main";
const FRAGMENT_ENTRY: &str = "fs_main";

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    fn entry_point(self) -> &'static str {
        match self {
            ShaderStage::Vertex => VERTEX_ENTRY,
            ShaderStage::Fragment => FRAGMENT_ENTRY,
        }
    }

    fn naga_stage(self) -> naga::ShaderStage {
        match self {
            ShaderStage::Vertex => naga::ShaderStage::Vertex,
            ShaderStage::Fragment => naga::ShaderStage::Fragment,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// Rejected shader program.
#[derive(Debug, Clone, PartialEq)]
pub enum MaterialError {
    EmptySource {
        label: String,
        stage: ShaderStage,
    },
    MissingEntryPoint {
        label: String,
        stage: ShaderStage,
        entry_point: &'static str,
    },
    Parse {
        label: String,
        stage: ShaderStage,
        message: String,
    },
    Validation {
        label: String,
        stage: ShaderStage,
        message: String,
    },
}

impl fmt::Display for MaterialError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaterialError::EmptySource { label, stage } => {
                write!(f, "shader `{label}`: {stage} source is empty")
            }
            MaterialError::MissingEntryPoint {
                label,
                stage,
                entry_point,
            } => write!(
                f,
                "shader `{label}`: {stage} source has no @{stage} entry point `{entry_point}`"
            ),
            MaterialError::Parse {
                label,
                stage,
                message,
            } => write!(f, "shader `{label}`: {stage} source failed to parse:\n{message}"),
            MaterialError::Validation {
                label,
                stage,
                message,
            } => write!(f, "shader `{label}`: {stage} source failed validation: {message}"),
        }
    }
}

impl std::error::Error for MaterialError {}

/// A validated vertex + fragment WGSL pair.
///
/// Both stages are stored with [`PRELUDE`] already prepended, so user sources
/// refer to `camera`, `uniforms`, `VertexInput` and `VertexOutput` directly.
/// The vertex stage must define `vs_main`, the fragment stage `fs_main`.
#[derive(Debug, Clone)]
pub struct ShaderSource {
    label: String,
    vertex: String,
    fragment: String,
}

impl ShaderSource {
    /// Composes and validates both stages with naga.
    pub fn new(
        label: impl Into<String>,
        vertex: &str,
        fragment: &str,
    ) -> Result<Self, MaterialError> {
        let label = label.into();

        let vertex = compose(&label, ShaderStage::Vertex, vertex)?;
        let fragment = compose(&label, ShaderStage::Fragment, fragment)?;

        log::debug!("shader `{label}` validated");

        Ok(Self {
            label,
            vertex,
            fragment,
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Full vertex stage WGSL, prelude included.
    pub fn vertex(&self) -> &str {
        &self.vertex
    }

    /// Full fragment stage WGSL, prelude included.
    pub fn fragment(&self) -> &str {
        &self.fragment
    }
}

fn compose(label: &str, stage: ShaderStage, body: &str) -> Result<String, MaterialError> {
    if body.trim().is_empty() {
        return Err(MaterialError::EmptySource {
            label: label.to_string(),
            stage,
        });
    }

    let source = format!("{PRELUDE}\n{body}");

    let module = naga::front::wgsl::parse_str(&source).map_err(|err| MaterialError::Parse {
        label: label.to_string(),
        stage,
        message: err.emit_to_string(&source),
    })?;

    let has_entry = module
        .entry_points
        .iter()
        .any(|ep| ep.name == stage.entry_point() && ep.stage == stage.naga_stage());
    if !has_entry {
        return Err(MaterialError::MissingEntryPoint {
            label: label.to_string(),
            stage,
            entry_point: stage.entry_point(),
        });
    }

    naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::default(),
    )
    .validate(&module)
    .map_err(|err| MaterialError::Validation {
        label: label.to_string(),
        stage,
        message: err.to_string(),
    })?;

    Ok(source)
}

#[cfg(test)]
mod tests {
    use super::*;

    const VERTEX: &str = r#"
@vertex
fn vs_main(in: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    out.uv = in.uv;
    out.clip_position = camera.view_proj * uniforms.model * vec4<f32>(in.position, 1.0);
    return out;
}
"#;

    const FRAGMENT: &str = r#"
@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let m = uniforms.mouse.xy * 0.5 + 0.5;
    return vec4<f32>(in.uv * m, sin(uniforms.time) * 0.5 + 0.5, 1.0);
}
"#;

    #[test]
    fn accepts_a_minimal_pair() {
        let source = ShaderSource::new("minimal", VERTEX, FRAGMENT).unwrap();
        assert_eq!(source.label(), "minimal");
        assert!(source.vertex().starts_with(PRELUDE));
        assert!(source.fragment().contains("fs_main"));
    }

    #[test]
    fn rejects_empty_stage() {
        let err = ShaderSource::new("blank", "  \n", FRAGMENT).unwrap_err();
        assert_eq!(
            err,
            MaterialError::EmptySource {
                label: "blank".to_string(),
                stage: ShaderStage::Vertex,
            }
        );
    }

    #[test]
    fn rejects_missing_entry_point() {
        let renamed = FRAGMENT.replace("fs_main", "main");
        let err = ShaderSource::new("renamed", VERTEX, &renamed).unwrap_err();
        assert!(matches!(
            err,
            MaterialError::MissingEntryPoint {
                stage: ShaderStage::Fragment,
                entry_point: "fs_main",
                ..
            }
        ));
    }

    #[test]
    fn entry_point_must_match_the_stage() {
        // A fragment entry named vs_main does not count as the vertex stage.
        let wrong = FRAGMENT.replace("fs_main", "vs_main");
        let err = ShaderSource::new("swapped", &wrong, FRAGMENT).unwrap_err();
        assert!(matches!(err, MaterialError::MissingEntryPoint { .. }));
    }

    #[test]
    fn reports_parse_errors_with_label_and_stage() {
        let err = ShaderSource::new("broken", VERTEX, "@fragment fn fs_main( {").unwrap_err();
        assert!(matches!(err, MaterialError::Parse { stage: ShaderStage::Fragment, .. }));
        assert!(err.to_string().starts_with("shader `broken`: fragment"));
    }

    #[test]
    fn reports_validation_errors() {
        // Parses, but returns the wrong type for the declared output.
        let bad = r#"
@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    return in.uv;
}
"#;
        let err = ShaderSource::new("mistyped", VERTEX, bad).unwrap_err();
        assert!(matches!(
            err,
            MaterialError::Parse { .. } | MaterialError::Validation { .. }
        ));
    }
}
