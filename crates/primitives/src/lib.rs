#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/sintra/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod security;
pub use security::{EvaluationKey, SecurityId};

mod industry;
pub use industry::Industry;

mod observation;
pub use observation::{Lookback, Observation};

mod exposure;
pub use exposure::{Exposure, ExposureRecord, VolatilityTriple, WindowEstimate};

mod portfolio;
pub use portfolio::{Field, PortfolioField, PortfolioRecord, Weighting};

/// Re-export common date type.
pub type Date = chrono::NaiveDate;
