#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/sintra/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod panel;
pub use panel::{PanelIndex, PanelSchema};

mod estimator;
pub use estimator::{EstimatorConfig, OlsExposureModel};

mod pipeline;
pub use pipeline::{ExposurePipeline, PipelineConfig};

mod sampled;
pub use sampled::{SampledRow, attach_exposures, evaluation_keys};

mod error;
pub use error::ModelError;

/// Re-export commonly used types.
pub mod prelude {
    pub use sintra_traits::{ExposureModel, WindowSelector};

    pub use super::{
        ExposurePipeline, ModelError, OlsExposureModel, PanelIndex, PipelineConfig, SampledRow,
    };
}
