//! Shader builder tests
//!
//! Tests for the device-independent half of shader construction:
//! - Stage inference from file-name tags
//! - Shader-format negotiation against an accepted set
//! - On-disk path convention
//! - Copy-then-override compute descriptor building

use glint::gpu::shader::{infer_stage, negotiate_format, shader_path};
use glint::{ComputePipelineDesc, GlintError, ShaderBindings, ShaderFormat, ShaderFormats, ShaderStage};

// ============================================================================
// Stage inference
// ============================================================================

#[test]
fn vert_tag_infers_vertex_stage() {
    assert_eq!(infer_stage("foo.vert").unwrap(), ShaderStage::Vertex);
    assert_eq!(infer_stage("position.vert").unwrap(), ShaderStage::Vertex);
}

#[test]
fn frag_tag_infers_fragment_stage() {
    assert_eq!(infer_stage("foo.frag").unwrap(), ShaderStage::Fragment);
    assert_eq!(infer_stage("solid_color.frag").unwrap(), ShaderStage::Fragment);
}

#[test]
fn other_tags_are_invalid_stage() {
    for name in ["foo.comp", "foo", "foo.wgsl", "vertfoo_without_dot"] {
        let err = infer_stage(name);
        assert!(matches!(err, Err(GlintError::InvalidStage(_))), "{name}: {err:?}");
    }
}

// ============================================================================
// Format negotiation
// ============================================================================

#[test]
fn wgsl_is_negotiated_when_accepted() {
    let format = negotiate_format(ShaderFormats::WGSL).unwrap();
    assert_eq!(format, ShaderFormat::Wgsl);
    assert_eq!(format.extension(), "wgsl");
}

#[test]
fn wgsl_is_preferred_over_spirv() {
    let accepted = ShaderFormats::WGSL | ShaderFormats::SPIRV;
    assert_eq!(negotiate_format(accepted).unwrap(), ShaderFormat::Wgsl);
}

#[test]
fn spirv_only_set_negotiates_spirv() {
    assert_eq!(
        negotiate_format(ShaderFormats::SPIRV).unwrap(),
        ShaderFormat::SpirV
    );
}

#[test]
fn empty_set_is_unsupported_backend() {
    let err = negotiate_format(ShaderFormats::empty());
    assert!(matches!(err, Err(GlintError::UnsupportedBackend)), "{err:?}");
}

#[test]
fn shader_path_follows_convention() {
    assert_eq!(
        shader_path("position.vert", ShaderFormat::Wgsl),
        "shaders/compiled/position.vert.wgsl"
    );
    assert_eq!(
        shader_path("solid_color.frag", ShaderFormat::SpirV),
        "shaders/compiled/solid_color.frag.spv"
    );
}

// ============================================================================
// Compute descriptor
// ============================================================================

#[test]
fn compute_desc_builders_never_mutate_the_base() {
    let base = ComputePipelineDesc::default()
        .with_label("gradient")
        .with_bindings(ShaderBindings::uniform_buffers(1));

    let derived = base
        .clone()
        .with_entry_point("reduce")
        .with_bindings(ShaderBindings {
            storage_buffers: 2,
            ..ShaderBindings::default()
        });

    // The base keeps its original fields.
    assert_eq!(base.label.as_deref(), Some("gradient"));
    assert_eq!(base.entry_point, "main");
    assert_eq!(base.bindings, ShaderBindings::uniform_buffers(1));

    // The derived value carries only the overridden fields.
    assert_eq!(derived.label.as_deref(), Some("gradient"));
    assert_eq!(derived.entry_point, "reduce");
    assert_eq!(derived.bindings.storage_buffers, 2);
    assert_eq!(derived.bindings.uniform_buffers, 0);
}
