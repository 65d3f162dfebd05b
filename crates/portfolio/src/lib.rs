#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/sintra/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod spec;
pub use spec::SortSpec;

mod sorter;
pub use sorter::{QuintileSort, QuintileSorter, assign_buckets};

mod spread;
pub use spread::{BOTTOM_QUINTILE, TOP_QUINTILE, period_spreads, spread, spread_between};

mod error;
pub use error::PortfolioError;

/// Re-export commonly used types.
pub mod prelude {
    pub use sintra_traits::CrossSectionEntity;

    pub use super::{QuintileSort, QuintileSorter, SortSpec, spread};
}
