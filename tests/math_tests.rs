//! Matrix and vector math tests
//!
//! Tests for:
//! - Multiply identity/associativity and composition order
//! - Normalize, dot, cross conventions
//! - Translation, rotation, orthographic and look-at factories

use std::f32::consts::FRAC_PI_2;

use glint::{Matrix4x4, Vector3};

// ============================================================================
// Helpers
// ============================================================================

const EPSILON: f32 = 1e-5;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn vec3_approx(a: Vector3, b: Vector3) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y) && approx_eq(a.z, b.z)
}

fn mat_approx(a: Matrix4x4, b: Matrix4x4) -> bool {
    let a: [f32; 16] = bytemuck::cast(a);
    let b: [f32; 16] = bytemuck::cast(b);
    a.iter().zip(b.iter()).all(|(x, y)| approx_eq(*x, *y))
}

/// An arbitrary non-degenerate transform for algebra tests.
fn sample_matrix() -> Matrix4x4 {
    Matrix4x4::rotation_z(0.7).multiply(Matrix4x4::translation(1.5, -2.0, 3.25))
}

// ============================================================================
// Multiply
// ============================================================================

#[test]
fn multiply_identity_left_and_right() {
    let m = sample_matrix();
    assert!(mat_approx(Matrix4x4::IDENTITY.multiply(m), m));
    assert!(mat_approx(m.multiply(Matrix4x4::IDENTITY), m));
}

#[test]
fn multiply_is_associative() {
    let a = Matrix4x4::rotation_z(0.3);
    let b = Matrix4x4::translation(2.0, 0.5, -1.0);
    let c = Matrix4x4::orthographic_off_center(-2.0, 2.0, -2.0, 2.0, 0.1, 10.0);
    assert!(mat_approx(a.multiply(b).multiply(c), a.multiply(b.multiply(c))));
}

#[test]
fn multiply_applies_left_factor_first() {
    // Row-vector convention: p * a.multiply(b) == (p * a) * b.
    let a = Matrix4x4::rotation_z(FRAC_PI_2);
    let b = Matrix4x4::translation(10.0, 0.0, 0.0);
    let p = Vector3::new(1.0, 0.0, 0.0);

    let combined = a.multiply(b).transform_point(p);
    let sequential = b.transform_point(a.transform_point(p));
    assert!(vec3_approx(combined, sequential));
    // Rotate (1,0,0) to (0,1,0), then translate.
    assert!(vec3_approx(combined, Vector3::new(10.0, 1.0, 0.0)));
}

#[test]
fn mul_operator_matches_multiply() {
    let a = sample_matrix();
    let b = Matrix4x4::rotation_z(-1.2);
    assert!(mat_approx(a * b, a.multiply(b)));
}

// ============================================================================
// Vectors
// ============================================================================

#[test]
fn normalize_produces_unit_magnitude() {
    for v in [
        Vector3::new(3.0, 4.0, 0.0),
        Vector3::new(-1.0, 2.0, -2.0),
        Vector3::new(0.001, 0.0, 0.0),
    ] {
        let n = v.normalize();
        assert!(approx_eq(n.dot(n), 1.0), "not unit: {n:?}");
    }
}

#[test]
fn cross_is_anti_commutative() {
    let a = Vector3::new(1.0, 2.0, 3.0);
    let b = Vector3::new(-4.0, 0.5, 2.0);
    let ab = a.cross(b);
    let ba = b.cross(a);
    assert!(vec3_approx(ab, Vector3::new(-ba.x, -ba.y, -ba.z)));
}

#[test]
fn cross_follows_library_convention() {
    // X cross Y yields +Z under the library's fixed sign convention.
    let x = Vector3::new(1.0, 0.0, 0.0);
    let y = Vector3::new(0.0, 1.0, 0.0);
    assert!(vec3_approx(x.cross(y), Vector3::new(0.0, 0.0, 1.0)));
    // The negated-difference Y component, written out literally.
    let a = Vector3::new(1.0, 2.0, 3.0);
    let b = Vector3::new(4.0, 5.0, 6.0);
    let c = a.cross(b);
    assert!(approx_eq(c.y, -(a.x * b.z - b.x * a.z)));
}

// ============================================================================
// Factories
// ============================================================================

#[test]
fn translation_moves_origin() {
    let m = Matrix4x4::translation(4.0, -5.0, 6.5);
    let p = m.transform_point(Vector3::ZERO);
    assert!(vec3_approx(p, Vector3::new(4.0, -5.0, 6.5)));
}

#[test]
fn rotation_z_quarter_turn() {
    let m = Matrix4x4::rotation_z(FRAC_PI_2);
    let p = m.transform_point(Vector3::new(1.0, 0.0, 0.0));
    assert!(vec3_approx(p, Vector3::new(0.0, 1.0, 0.0)));
}

#[test]
fn orthographic_unit_volume_literal_output() {
    let m = Matrix4x4::orthographic_off_center(-1.0, 1.0, -1.0, 1.0, 0.0, 1.0);
    let center = m.transform_point(Vector3::ZERO);
    assert!(vec3_approx(center, Vector3::ZERO));

    let corner = m.transform_point(Vector3::new(1.0, 1.0, 1.0));
    assert!(vec3_approx(corner, Vector3::new(1.0, 1.0, -1.0)));
}

#[test]
fn perspective_maps_near_plane_to_zero_depth() {
    let m = Matrix4x4::perspective_fov(FRAC_PI_2, 1.0, 1.0, 100.0);
    // A point on the near plane straight ahead of the camera.
    let p = Vector3::new(0.0, 0.0, -1.0);
    let clip = m.transform_point(p);
    assert!(approx_eq(clip.z, 0.0));
}

#[test]
fn look_at_straight_down_z_is_translation() {
    // Eye on +Z looking at the origin reduces to a pure translation;
    // this pins the cross/rotation sign coupling the view basis relies on.
    let m = Matrix4x4::look_at(
        Vector3::new(0.0, 0.0, 5.0),
        Vector3::ZERO,
        Vector3::UP,
    );
    assert!(mat_approx(m, Matrix4x4::translation(0.0, 0.0, -5.0)));
}

#[test]
fn look_at_basis_is_orthonormal() {
    let m = Matrix4x4::look_at(
        Vector3::new(3.0, 2.0, 4.0),
        Vector3::new(0.0, 1.0, -1.0),
        Vector3::UP,
    );
    let x = Vector3::new(m.m11, m.m21, m.m31);
    let y = Vector3::new(m.m12, m.m22, m.m32);
    let z = Vector3::new(m.m13, m.m23, m.m33);
    assert!(approx_eq(x.dot(x), 1.0));
    assert!(approx_eq(y.dot(y), 1.0));
    assert!(approx_eq(z.dot(z), 1.0));
    assert!(approx_eq(x.dot(y), 0.0));
    assert!(approx_eq(x.dot(z), 0.0));
    assert!(approx_eq(y.dot(z), 0.0));
}
