//! Non-finite detection on a filled staging bank.

use vef_arena::DynamicFields;
use vef_core::StepError;

/// Scan every dynamic buffer for NaN or infinity.
///
/// Fields are checked in [`Field::DYNAMIC`](vef_core::Field::DYNAMIC)
/// order and cells in flat index order; the first hit is reported.
pub fn check_finite(fields: &DynamicFields) -> Result<(), StepError> {
    for (field, buf) in fields.iter() {
        if let Some(cell_index) = buf.iter().position(|v| !v.is_finite()) {
            return Err(StepError::NonFinite { field, cell_index });
        }
    }
    Ok(())
}
