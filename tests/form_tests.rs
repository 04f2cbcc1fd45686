use fcopt::config::ValidationBounds;
use fcopt::form::{Field, FormStage, FormState};
use strum::IntoEnumIterator;

fn bounds() -> ValidationBounds {
    ValidationBounds::default()
}

#[test]
fn test_new_form_is_empty() {
    let form = FormState::new();
    for field in Field::iter() {
        assert_eq!(form.value(field), "");
    }
    assert_eq!(form.validation_error, None);
    assert_eq!(form.stage(&bounds()), FormStage::EnteringCustomers);
}

#[test]
fn test_stages_advance_in_order() {
    let b = bounds();
    let mut form = FormState::new();

    assert_eq!(
        form.edit(Field::NumCustomers, "500", &b),
        Ok(FormStage::EnteringFcCandidates)
    );
    assert_eq!(
        form.edit(Field::NumFcCandidates, "20", &b),
        Ok(FormStage::EnteringK)
    );
    assert_eq!(form.edit(Field::K, "3", &b), Ok(FormStage::Ready));
    assert_eq!(form.validation_error, None);
}

#[test]
fn test_later_field_locked_until_customers_valid() {
    let b = bounds();
    let mut form = FormState::new();
    form.edit(Field::NumCustomers, "50", &b).unwrap();

    let err = form.edit(Field::NumFcCandidates, "20", &b).unwrap_err();
    assert!(err.message().contains("between"));
    assert_eq!(form.num_fc_candidates, "", "refused edit must not be stored");
    assert_eq!(form.validation_error.as_deref(), Some(err.message()));
}

#[test]
fn test_k_locked_until_candidates_valid() {
    let b = bounds();
    let mut form = FormState::new();
    form.edit(Field::NumCustomers, "500", &b).unwrap();
    form.edit(Field::NumFcCandidates, "0", &b).unwrap();

    assert!(form.edit(Field::K, "3", &b).is_err());
    assert_eq!(form.k, "");
}

#[test]
fn test_edit_clears_previous_error() {
    let b = bounds();
    let mut form = FormState::new();
    form.edit(Field::NumCustomers, "5", &b).unwrap();
    assert!(form.edit(Field::K, "3", &b).is_err());
    assert!(form.validation_error.is_some());

    form.edit(Field::NumCustomers, "500", &b).unwrap();
    assert_eq!(form.validation_error, None);
}

#[test]
fn test_stage_falls_back_when_earlier_field_breaks() {
    let b = bounds();
    let mut form = FormState::new();
    form.edit(Field::NumCustomers, "500", &b).unwrap();
    form.edit(Field::NumFcCandidates, "20", &b).unwrap();
    form.edit(Field::K, "3", &b).unwrap();

    assert_eq!(
        form.edit(Field::NumCustomers, "5000", &b),
        Ok(FormStage::EnteringCustomers)
    );
    // Later values survive so the user can fix the first field only
    assert_eq!(form.k, "3");
}

#[test]
fn test_k_above_candidates_stays_in_entering_k() {
    let b = bounds();
    let mut form = FormState::new();
    form.edit(Field::NumCustomers, "500", &b).unwrap();
    form.edit(Field::NumFcCandidates, "5", &b).unwrap();
    assert_eq!(form.edit(Field::K, "6", &b), Ok(FormStage::EnteringK));

    let (stage, err) = form.evaluate(&b);
    assert_eq!(stage, FormStage::EnteringK);
    let msg = err.unwrap().to_string();
    assert!(msg.contains('6') && msg.contains('5'));
}

#[test]
fn test_prepare_submission_sets_and_clears_error() {
    let b = bounds();
    let mut form = FormState::new();
    form.edit(Field::NumCustomers, "500", &b).unwrap();

    assert!(form.prepare_submission(&b).is_err());
    assert!(form.validation_error.is_some());

    form.edit(Field::NumFcCandidates, "20", &b).unwrap();
    form.edit(Field::K, "3", &b).unwrap();
    let payload = form.prepare_submission(&b).unwrap();
    assert_eq!(payload.k, 3);
    assert_eq!(form.validation_error, None);
}
