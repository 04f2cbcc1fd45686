use crate::api::RequestPayload;
use crate::config::ValidationBounds;
use crate::validate::{self, ValidationError};
use strum_macros::{Display, EnumIter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum Field {
    NumCustomers,
    NumFcCandidates,
    K,
}

/// Progressive-disclosure stages. A field becomes editable once every field
/// before it passes its rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Display)]
pub enum FormStage {
    EnteringCustomers,
    EnteringFcCandidates,
    EnteringK,
    Ready,
}

impl FormStage {
    /// The earliest stage at which `field` accepts input.
    pub fn unlocking(field: Field) -> Self {
        match field {
            Field::NumCustomers => FormStage::EnteringCustomers,
            Field::NumFcCandidates => FormStage::EnteringFcCandidates,
            Field::K => FormStage::EnteringK,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub num_customers: String,
    pub num_fc_candidates: String,
    pub k: String,
    pub validation_error: Option<String>,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::NumCustomers => &self.num_customers,
            Field::NumFcCandidates => &self.num_fc_candidates,
            Field::K => &self.k,
        }
    }

    fn slot(&mut self, field: Field) -> &mut String {
        match field {
            Field::NumCustomers => &mut self.num_customers,
            Field::NumFcCandidates => &mut self.num_fc_candidates,
            Field::K => &mut self.k,
        }
    }

    /// Runs the guards in order and reports the first stage whose guard fails,
    /// along with that guard's message.
    pub fn evaluate(&self, bounds: &ValidationBounds) -> (FormStage, Option<ValidationError>) {
        let customers_ok = match validate::validate_customer_count(&self.num_customers, bounds) {
            Ok(_) => true,
            Err(e) => return (FormStage::EnteringCustomers, Some(e)),
        };
        let candidates = match validate::validate_fc_candidate_count(
            &self.num_fc_candidates,
            customers_ok,
        ) {
            Ok(n) => n,
            Err(e) => return (FormStage::EnteringFcCandidates, Some(e)),
        };
        match validate::validate_k(&self.k, Some(candidates)) {
            Ok(_) => (FormStage::Ready, None),
            Err(e) => (FormStage::EnteringK, Some(e)),
        }
    }

    pub fn stage(&self, bounds: &ValidationBounds) -> FormStage {
        self.evaluate(bounds).0
    }

    /// Applies one edit. Any previous validation error is cleared first; the
    /// edit is refused (value untouched) when an earlier field still fails.
    pub fn edit(
        &mut self,
        field: Field,
        raw: impl Into<String>,
        bounds: &ValidationBounds,
    ) -> Result<FormStage, ValidationError> {
        self.validation_error = None;

        let (stage, gate_error) = self.evaluate(bounds);
        if stage < FormStage::unlocking(field) {
            let err = gate_error
                .unwrap_or_else(|| ValidationError::new("Complete the previous field first"));
            self.validation_error = Some(err.to_string());
            return Err(err);
        }

        *self.slot(field) = raw.into();
        Ok(self.stage(bounds))
    }

    /// Submit-time check. On failure the message is stored for display.
    pub fn prepare_submission(
        &mut self,
        bounds: &ValidationBounds,
    ) -> Result<RequestPayload, ValidationError> {
        match validate::validate_submission(self, bounds) {
            Ok(payload) => {
                self.validation_error = None;
                Ok(payload)
            }
            Err(e) => {
                self.validation_error = Some(e.to_string());
                Err(e)
            }
        }
    }
}
