#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/sintra/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod summary;
pub use summary::{IndustrySummary, Summary, describe, describe_by_industry};

mod frame;
pub use frame::{EXCESS_STOCK, INDUSTRY, MARKET_CAP, PERMNO, YEAR, exposure_frame};

mod tables;
pub use tables::{annual_stats, missing_exposures, volatility_trends};

mod error;
pub use error::ReportError;
