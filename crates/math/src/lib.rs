#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/sintra/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod regression;
pub use regression::{DEGENERATE_TOLERANCE, OlsFit, simple_ols};

mod moments;
pub use moments::{excess_kurtosis, mean, sample_std, sample_variance, skewness};

mod quantile;
pub use quantile::{
    assign_bin, bin_count, quantile, quantile_bin_edges, quantile_sorted, sorted_finite,
};

mod weights;
pub use weights::{magnitude_weights, weighted_mean};

mod error;
pub use error::MathError;
