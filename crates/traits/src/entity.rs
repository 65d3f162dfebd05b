//! Cross-sectional entity trait definitions.

use sintra_primitives::Field;

/// Something that belongs to one evaluation period and carries
/// characteristics that can be sorted on, averaged, or used as weights.
pub trait CrossSectionEntity: Sync {
    /// Evaluation period the entity belongs to.
    fn period(&self) -> i32;

    /// Value of a characteristic, `None` when missing or undefined.
    fn field(&self, field: Field) -> Option<f64>;
}
