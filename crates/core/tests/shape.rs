//! # Shape and Catalog Tests
//!
//! Tests for the shape arithmetic behind every chain step:
//! - Rendering of shapes as they appear in the text
//! - Compatibility rules of each operation
//! - Mismatch detection for broken companions

use matrixshapes_core::{Companion, Operation, Shape, ShapeError};

fn arr(dims: &[usize]) -> Companion {
    Companion::Array(Shape::new(dims.to_vec()))
}

// ============================================================================
// Display Tests
// ============================================================================

#[test]
fn test_shape_display() {
    assert_eq!(Shape::matrix(3, 4).to_string(), "(3,4)");
    assert_eq!(Shape::from([2, 3, 4]).to_string(), "(2,3,4)");
    assert_eq!(Shape::from([10, 2]).to_string(), "(10,2)");
}

// ============================================================================
// Arithmetic Tests
// ============================================================================

#[test]
fn test_matmul_chain_scenario() {
    let s0 = Shape::from([2, 3]);
    let s1 = Operation::Multiply.apply(&s0, &arr(&[3, 4])).unwrap();
    assert_eq!(s1, Shape::from([2, 4]));
    let s2 = Operation::Multiply.apply(&s1, &arr(&[4, 2])).unwrap();
    assert_eq!(s2, Shape::from([2, 2]));
}

#[test]
fn test_rank_preserving_ops() {
    let a = Shape::from([2, 3, 4]);
    for (op, companion) in [
        (Operation::Transpose, Companion::None),
        (Operation::Hadamard, arr(&[2, 3, 4])),
        (Operation::Add, arr(&[2, 3, 4])),
        (Operation::Subtract, arr(&[2, 3, 4])),
        (Operation::Multiply, arr(&[2, 4, 1])),
        (Operation::Kronecker, arr(&[2, 2, 2])),
    ] {
        assert_eq!(op.apply(&a, &companion).unwrap().rank(), 3, "{}", op);
    }
    assert_eq!(
        Operation::SumAxis
            .apply(&a, &Companion::Axis(0))
            .unwrap()
            .rank(),
        2
    );
}

// ============================================================================
// Mismatch Tests
// ============================================================================

#[test]
fn test_second_last_axis_breaks_every_invalidatable_op() {
    let a = Shape::from([2, 3, 4]);
    let cases = [
        (Operation::Multiply, arr(&[2, 5, 1])),
        (Operation::Hadamard, arr(&[2, 5, 4])),
        (Operation::Add, arr(&[2, 1, 4])),
        (Operation::Subtract, arr(&[2, 2, 4])),
    ];
    for (op, companion) in cases {
        let err = op.apply(&a, &companion).unwrap_err();
        assert!(matches!(err, ShapeError::Incompatible { .. }), "{}", op);
    }
}

#[test]
fn test_mismatch_error_message() {
    let err = Operation::Add
        .apply(&Shape::from([2, 3]), &arr(&[2, 5]))
        .unwrap_err();
    assert_eq!(err.to_string(), "add cannot combine (2,3) with (2,5)");
}
