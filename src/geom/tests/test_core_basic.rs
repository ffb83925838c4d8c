use std::f64::consts::PI;

use crate::geom::{Point3, Vec3, acos_clamped};

#[test]
fn vec3_dot_and_length() {
    let a = Vec3::new(1.0, 2.0, 2.0);
    let b = Vec3::new(2.0, -1.0, 0.0);
    assert_eq!(a.dot(b), 0.0);
    assert_eq!(a.length(), 3.0);
    assert_eq!(a.length_squared(), 9.0);
    assert_eq!(-a, Vec3::new(-1.0, -2.0, -2.0));
    assert_eq!(a + b, Vec3::new(3.0, 1.0, 2.0));
    assert_eq!(a - b, Vec3::new(-1.0, 3.0, 2.0));
}

#[test]
fn point3_distances() {
    let a = Point3::new(1.0, 2.0, 3.0);
    let b = Point3::new(4.0, 6.0, 3.0);
    assert_eq!(a.distance_to(b), 5.0);
    assert_eq!(b.distance_to(a), 5.0);
    assert_eq!(a.sub_point(b), Vec3::new(-3.0, -4.0, 0.0));
    assert_eq!(Point3::from_array([1.0, 2.0, 3.0]), a);
}

#[test]
fn acos_is_clamped_at_both_ends() {
    assert_eq!(acos_clamped(1.0 + 1e-12), 0.0);
    assert_eq!(acos_clamped(1.0), 0.0);
    assert_eq!(acos_clamped(-1.0 - 1e-12), PI);
    assert_eq!(acos_clamped(-1.0), PI);
    assert!((acos_clamped(0.0) - PI / 2.0).abs() < 1e-15);
    assert!((acos_clamped(0.5) - PI / 3.0).abs() < 1e-15);
}

#[test]
fn bit_keys_separate_distinct_coordinates() {
    let a = Point3::new(0.0, 1.0, 2.0);
    let b = Point3::new(0.0, 1.0, 2.0);
    assert_eq!(a.bit_key(), b.bit_key());

    // bit equality distinguishes the two zero signs
    let pos = Point3::new(0.0, 0.0, 0.0);
    let neg = Point3::new(-0.0, 0.0, 0.0);
    assert_ne!(pos.bit_key(), neg.bit_key());
}
