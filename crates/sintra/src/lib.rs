//! # sintra
//!
//! Rolling market-beta estimation, volatility decomposition and
//! characteristic-sorted portfolios for equity panels.
//!
//! This crate provides a unified interface to the sintra crates.
//! Individual components can be enabled via feature flags.
//!
//! ## Features
//!
//! - `full` (default): Enables all components
//! - `primitives`: Core type definitions
//! - `traits`: Trait abstractions
//! - `math`: Regression, moments and quantiles
//! - `model`: Panel index, exposure estimation and volatility decomposition
//! - `portfolio`: Quintile sorts and spreads
//! - `utils`: Data preparation
//! - `report`: Descriptive statistics and report tables
//! - `cli`: The `analyze` binary
//!
//! ## Example
//!
//! ```rust,ignore
//! use sintra::model::{ExposurePipeline, PanelIndex, attach_exposures, evaluation_keys};
//! use sintra::portfolio::{QuintileSorter, spread};
//!
//! let panel = PanelIndex::new(observations);
//! let keys = evaluation_keys(&sample);
//! let records = ExposurePipeline::new().run(&panel, &keys);
//! let rows = attach_exposures(sample, &records);
//! let sorts = QuintileSorter::default().sort(&rows);
//! ```

#![doc(issue_tracker_base_url = "https://github.com/factordynamics/sintra/issues/")]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

#[cfg(feature = "primitives")]
#[doc(inline)]
pub use sintra_primitives as primitives;
#[cfg(feature = "traits")]
#[doc(inline)]
pub use sintra_traits as traits;
#[cfg(feature = "math")]
#[doc(inline)]
pub use sintra_math as math;
#[cfg(feature = "model")]
#[doc(inline)]
pub use sintra_model as model;
#[cfg(feature = "portfolio")]
#[doc(inline)]
pub use sintra_portfolio as portfolio;
#[cfg(feature = "utils")]
#[doc(inline)]
pub use sintra_utils as utils;
#[cfg(feature = "report")]
#[doc(inline)]
pub use sintra_report as report;
