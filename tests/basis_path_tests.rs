/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

use approx::assert_relative_eq;
use rstest::rstest;
use sqw_rs::lattice::{
    to_conventional, to_primitive, Conventional, LatticeVector, PrimitiveMatrix,
};
use sqw_rs::path::{sample, sample_offsets, QPath};

#[rstest]
#[case(PrimitiveMatrix::fcc())]
#[case(PrimitiveMatrix::identity())]
#[case(PrimitiveMatrix::new([[-0.5, 0.5, 0.5], [0.5, -0.5, 0.5], [0.5, 0.5, -0.5]]).unwrap())]
#[case(PrimitiveMatrix::new([[1.0, 0.2, 0.0], [0.0, 2.0, 0.3], [0.1, 0.0, 0.7]]).unwrap())]
fn test_basis_round_trip(#[case] matrix: PrimitiveMatrix) {
    let vectors = [
        [3.0, 3.0, 3.0],
        [0.5, 0.5, 0.5],
        [-1.25, 0.0, 7.5],
        [1e-3, -2.0, 0.333],
    ];
    for [x, y, z] in vectors {
        let v = LatticeVector::<Conventional>::new(x, y, z);
        let back = to_conventional(&to_primitive(&v, &matrix), &matrix).components();
        assert_relative_eq!(back.x, x, epsilon = 1e-12);
        assert_relative_eq!(back.y, y, epsilon = 1e-12);
        assert_relative_eq!(back.z, z, epsilon = 1e-12);
    }
}

#[test]
fn test_singular_primitive_matrix() {
    assert!(PrimitiveMatrix::new([[1.0, 0.0, 0.0], [2.0, 0.0, 0.0], [0.0, 0.0, 1.0]]).is_err());
}

#[rstest]
#[case(2)]
#[case(3)]
#[case(51)]
#[case(200)]
fn test_sample_offsets(#[case] n_points: usize) {
    let offsets = sample_offsets(n_points);
    assert_eq!(offsets.len(), n_points - 1);
    assert_relative_eq!(offsets[0], 1.0 / (n_points - 1) as f64, epsilon = 1e-15);
    assert_eq!(offsets[offsets.len() - 1], 1.0);
    assert!(offsets.iter().all(|&x| x > 0.0));
    assert!(offsets.windows(2).all(|pair| pair[1] > pair[0]));
}

#[rstest]
#[case(0)]
#[case(1)]
fn test_degenerate_sample_counts(#[case] n_points: usize) {
    assert!(sample_offsets(n_points).is_empty());
}

#[test]
fn test_sampled_points() {
    let origin = LatticeVector::new(3.0, 3.0, 3.0);
    let direction = LatticeVector::new(0.5, 0.5, 0.5);
    let points = sample(&origin, &direction, 6);

    assert_eq!(points.len(), 5);
    for (index, point) in points.iter().enumerate() {
        assert_eq!(point.index, index);
        let expected = 0.1 * (index + 1) as f64;
        assert_relative_eq!(point.q.components().x, expected, epsilon = 1e-12);
        assert_relative_eq!(point.momentum_transfer.components().z, 3.0 + expected, epsilon = 1e-12);
    }
}

#[test]
fn test_path_conventional_coordinates() {
    let matrix = PrimitiveMatrix::fcc();
    let path = QPath::new(
        LatticeVector::new(3.0, 3.0, 3.0),
        LatticeVector::new(0.5, 0.5, 0.5),
        51,
        &matrix,
    );
    assert_eq!(path.len(), 50);

    let last = path.points()[49];
    let q = to_conventional(&last.momentum_transfer, &matrix).components();
    assert_relative_eq!(q.x, 3.5, epsilon = 1e-12);
    assert_relative_eq!(q.y, 3.5, epsilon = 1e-12);
    assert_relative_eq!(q.z, 3.5, epsilon = 1e-12);

    let first = to_conventional(&path.points()[0].momentum_transfer, &matrix).components();
    assert_relative_eq!(first.x, 3.01, epsilon = 1e-12);
}
