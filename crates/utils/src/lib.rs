#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/sintra/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod columns;
pub use columns::RawColumns;

mod clean;
pub use clean::{classify_industries, clean_numeric, clean_numeric_columns};

mod risk_free;
pub use risk_free::{attach_risk_free, with_excess_returns};

mod sample;
pub use sample::{SamplingConfig, sample_evaluation_set};

mod error;
pub use error::UtilsError;
