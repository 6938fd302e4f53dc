//! Sensitivity of a fattening cycle's results to purchase and sale prices
//!
//! Rows perturb the purchase price per kg, columns perturb the sale price.
//! Every cell re-runs the profit model and, for the IRR metrics, the return
//! solver; cells are independent and rows are spread across the rayon pool.
//!
//! # Example
//!
//! ```rust
//! use livestock_returns::FatteningInputs;
//! use livestock_returns::sensitivity::{evaluate_matrix, MatrixMetric, DEFAULT_VARIATIONS};
//!
//! let matrix = evaluate_matrix(
//!     &FatteningInputs::default(),
//!     &DEFAULT_VARIATIONS,
//!     &DEFAULT_VARIATIONS,
//!     MatrixMetric::AnnualIrr,
//! );
//! assert_eq!(matrix.cells.len(), 5);
//! assert!(matrix.min <= matrix.max);
//! ```

mod matrix;

pub use matrix::{
    evaluate_matrix, evaluate_matrix_with, MatrixMetric, SensitivityMatrix, DEFAULT_VARIATIONS,
};
