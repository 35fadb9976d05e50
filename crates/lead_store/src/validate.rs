//! Field checks applied at the storage boundary, before any store call.

use entities::{LeadPatch, NewLead};

use crate::{LeadStoreError, LeadStoreResult};

/// Checks the fields of a lead about to be created.
pub fn new_lead(fields: &NewLead) -> LeadStoreResult<()> {
    required("name", &fields.name)?;
    required("company", &fields.company)?;
    required("email", &fields.email)?;
    if fields.status.is_none() {
        return Err(LeadStoreError::validation("status is required"));
    }
    if fields.temperature.is_none() {
        return Err(LeadStoreError::validation("temperature is required"));
    }
    if let Some(value) = fields.value {
        deal_value(value)?;
    }
    Ok(())
}

/// Checks a partial update. Required strings may be omitted but not blanked.
pub fn patch(patch: &LeadPatch) -> LeadStoreResult<()> {
    for (field, value) in [
        ("name", &patch.name),
        ("company", &patch.company),
        ("email", &patch.email),
    ] {
        if let Some(value) = value {
            required(field, value)?;
        }
    }
    if let Some(value) = patch.value {
        deal_value(value)?;
    }
    Ok(())
}

fn required(field: &str, value: &str) -> LeadStoreResult<()> {
    if value.trim().is_empty() {
        return Err(LeadStoreError::validation(format!("{field} is required")));
    }
    Ok(())
}

fn deal_value(value: f64) -> LeadStoreResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(LeadStoreError::validation(format!(
            "value must be a non-negative number, got {value}"
        )));
    }
    Ok(())
}
