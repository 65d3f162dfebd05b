#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/sintra/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod window;
pub use window::{Window, WindowSelector};

mod estimator;
pub use estimator::{ExposureError, ExposureModel, FittedExposure};

mod entity;
pub use entity::CrossSectionEntity;
