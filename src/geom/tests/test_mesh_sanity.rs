use std::collections::hash_map::DefaultHasher;
use std::f64::consts::PI;
use std::hash::{Hash, Hasher};

use crate::geom::{EdgeKey, MeshError, Point3, Triangle, TriangleMesh};

fn tetrahedron() -> TriangleMesh {
    let points = vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(0.0, 1.0, 0.0),
        Point3::new(0.0, 0.0, 1.0),
    ];
    let triangles = vec![
        Triangle::new(0, 1, 2),
        Triangle::new(0, 1, 3),
        Triangle::new(0, 2, 3),
        Triangle::new(1, 2, 3),
    ];
    TriangleMesh::new(points, triangles).expect("tetrahedron is a valid closed mesh")
}

#[test]
fn tetrahedron_adjacency() {
    let mesh = tetrahedron();
    assert_eq!(mesh.vertex_count(), 4);
    assert_eq!(mesh.face_count(), 4);

    // every vertex sits on three faces, every edge on exactly two
    for v in 0..4 {
        assert_eq!(mesh.incident_faces(v).len(), 3, "vertex {v}");
    }
    assert_eq!(mesh.edges().count(), 6);
    for (edge, faces) in mesh.edges() {
        assert_ne!(faces[0], faces[1], "edge {edge:?} must touch two distinct faces");
    }

    let faces = mesh.edge_faces(1, 2);
    assert_eq!(mesh.edge_faces(2, 1), faces);
}

#[test]
fn tetrahedron_geometry_queries() {
    let mesh = tetrahedron();
    assert!((mesh.distance(0, 1) - 1.0).abs() < 1e-15);
    assert!((mesh.distance(1, 2) - f64::sqrt(2.0)).abs() < 1e-15);

    // right angle at the origin corner, 60 degrees in the far face
    assert!((mesh.corner_angle(1, 0, 2) - PI / 2.0).abs() < 1e-15);
    assert!((mesh.corner_angle(2, 1, 3) - PI / 3.0).abs() < 1e-12);
}

#[test]
fn duplicate_points_are_rejected() {
    let points = vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
    ];
    let err = TriangleMesh::new(points, vec![Triangle::new(0, 1, 2)]).unwrap_err();
    assert!(matches!(err, MeshError::DuplicatePoint(2)));
}

#[test]
fn open_surface_is_a_floating_edge() {
    let points = vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(0.0, 1.0, 0.0),
    ];
    let err = TriangleMesh::new(points, vec![Triangle::new(0, 1, 2)]).unwrap_err();
    assert!(matches!(err, MeshError::FloatingEdge(..)));
}

#[test]
fn three_faces_on_one_edge_are_rejected() {
    let points = vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(0.0, 1.0, 0.0),
        Point3::new(0.0, 0.0, 1.0),
        Point3::new(1.0, 1.0, 1.0),
    ];
    let triangles = vec![
        Triangle::new(0, 1, 2),
        Triangle::new(1, 0, 3),
        Triangle::new(0, 1, 4),
    ];
    let err = TriangleMesh::new(points, triangles).unwrap_err();
    assert!(matches!(err, MeshError::ThreeFacesOnEdge(0, 1, 2)));
}

#[test]
fn unreferenced_vertex_is_rejected() {
    let points = vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(0.0, 1.0, 0.0),
        Point3::new(0.0, 0.0, 1.0),
        Point3::new(2.0, 2.0, 2.0),
    ];
    let triangles = vec![
        Triangle::new(0, 1, 2),
        Triangle::new(0, 1, 3),
        Triangle::new(0, 2, 3),
        Triangle::new(1, 2, 3),
    ];
    let err = TriangleMesh::new(points, triangles).unwrap_err();
    assert!(matches!(err, MeshError::FloatingVertex(4)));
}

#[test]
fn out_of_range_face_index_is_rejected() {
    let points = vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(0.0, 1.0, 0.0),
    ];
    let err = TriangleMesh::new(points, vec![Triangle::new(0, 1, 9)]).unwrap_err();
    assert!(matches!(err, MeshError::MissingVertex(0, 9)));
}

fn hash_of(key: EdgeKey) -> u64 {
    let mut hasher = DefaultHasher::new();
    key.hash(&mut hasher);
    hasher.finish()
}

#[test]
fn edge_keys_are_unordered() {
    assert_eq!(EdgeKey::new(3, 7), EdgeKey::new(7, 3));
    assert_eq!(hash_of(EdgeKey::new(3, 7)), hash_of(EdgeKey::new(7, 3)));
    assert_ne!(EdgeKey::new(3, 7), EdgeKey::new(3, 8));
}

#[test]
fn triangle_opposite_vertex() {
    let tri = Triangle::new(4, 9, 2);
    assert_eq!(tri.vertex_opposite(4, 9), 2);
    assert_eq!(tri.vertex_opposite(9, 4), 2);
    assert_eq!(tri.vertex_opposite(2, 4), 9);
    assert_eq!(tri.vertices(), [4, 9, 2]);
}
