//! End-to-end tests for the tracker service, exercised through the public
//! `MedTracker` API only.

use chrono::NaiveDate;
use medtrack_core::{
    DosageInput, DosagePatch, MedTracker, MedicationInput, MedicationPatch, PatientInput,
    PatientPatch, ServiceConfig, TrackerError,
};

fn tracker() -> MedTracker {
    MedTracker::open_in_memory().unwrap()
}

fn med_input(name: &str, stock: i64, threshold: i64) -> MedicationInput {
    MedicationInput {
        name: name.into(),
        description: None,
        current_stock: stock,
        threshold,
    }
}

fn patient_input(mrn: &str) -> PatientInput {
    PatientInput {
        first_name: "Jane".into(),
        last_name: "Doe".into(),
        date_of_birth: NaiveDate::from_ymd_opt(1984, 6, 2).unwrap(),
        medical_record_number: mrn.into(),
    }
}

fn dosage_input(medication_id: &str, patient_id: &str) -> DosageInput {
    serde_json::from_value(serde_json::json!({
        "medication_id": medication_id,
        "patient_id": patient_id,
        "dosage_amount": 5.0,
        "dosage_time": "2026-08-25 14:30:00",
        "administered_by": "Nurse Joy",
    }))
    .unwrap()
}

#[test]
fn alerts_include_exactly_the_low_stock_medications() {
    let t = tracker();
    let aspirin = t.create_medication(med_input("Aspirin", 5, 10)).unwrap();
    t.create_medication(med_input("Ibuprofen", 20, 10)).unwrap();
    t.create_medication(med_input("Boundary", 10, 10)).unwrap();

    let alerts = t.low_stock_alerts().unwrap();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].medication_id, aspirin.id);
    assert_eq!(alerts[0].name, "Aspirin");
    assert_eq!(alerts[0].current_stock, 5);
    assert_eq!(alerts[0].threshold, 10);
    assert_eq!(alerts[0].difference, -5);
}

#[test]
fn alert_polling_has_no_side_effects() {
    let t = tracker();
    t.create_medication(med_input("Aspirin", 5, 10)).unwrap();

    let first = t.low_stock_alerts().unwrap();
    for _ in 0..10 {
        assert_eq!(t.low_stock_alerts().unwrap(), first);
    }
}

#[test]
fn dosage_with_unknown_medication_persists_nothing() {
    let t = tracker();
    let patient = t.create_patient(patient_input("MRN-001")).unwrap();

    let result = t.record_dosage(dosage_input("999", &patient.id));
    assert!(matches!(result, Err(TrackerError::NotFound(_))));
    assert!(t.list_dosages().unwrap().is_empty());
}

#[test]
fn dosage_with_unknown_patient_persists_nothing() {
    let t = tracker();
    let med = t.create_medication(med_input("Aspirin", 50, 10)).unwrap();

    let result = t.record_dosage(dosage_input(&med.id, "999"));
    assert!(matches!(result, Err(TrackerError::NotFound(_))));
    assert!(t.list_dosages().unwrap().is_empty());
}

#[test]
fn negative_dosage_amount_is_a_validation_error() {
    let t = tracker();
    let med = t.create_medication(med_input("Aspirin", 50, 10)).unwrap();
    let patient = t.create_patient(patient_input("MRN-001")).unwrap();

    let mut input = dosage_input(&med.id, &patient.id);
    input.dosage_amount = -5.0;

    let result = t.record_dosage(input);
    match result {
        Err(TrackerError::Validation { field, .. }) => assert_eq!(field, "dosage_amount"),
        other => panic!("expected validation error, got {:?}", other.map(|d| d.id)),
    }
    assert!(t.list_dosages().unwrap().is_empty());
}

#[test]
fn update_then_read_round_trips_the_merged_result() {
    let t = tracker();
    let med = t.create_medication(med_input("Aspirin", 50, 10)).unwrap();

    let updated = t
        .update_medication(
            &med.id,
            MedicationPatch {
                current_stock: Some(4),
                description: Some("low".into()),
                ..Default::default()
            },
        )
        .unwrap();

    let read_back = t.get_medication(&med.id).unwrap();
    assert_eq!(read_back, updated);
    assert_eq!(read_back.name, "Aspirin");
    assert_eq!(read_back.description, Some("low".into()));
    assert_eq!(read_back.current_stock, 4);
    assert_eq!(read_back.threshold, 10);
}

#[test]
fn delete_then_read_is_not_found() {
    let t = tracker();
    let med = t.create_medication(med_input("Aspirin", 50, 10)).unwrap();

    t.delete_medication(&med.id).unwrap();
    assert!(matches!(
        t.get_medication(&med.id),
        Err(TrackerError::NotFound(_))
    ));
}

#[test]
fn duplicate_medical_record_number_is_a_conflict() {
    let t = tracker();
    t.create_patient(patient_input("MRN-001")).unwrap();

    let result = t.create_patient(patient_input("MRN-001"));
    assert!(matches!(result, Err(TrackerError::Conflict(_))));
    assert_eq!(t.list_patients().unwrap().len(), 1);
}

#[test]
fn update_cannot_steal_another_patients_mrn() {
    let t = tracker();
    t.create_patient(patient_input("MRN-001")).unwrap();
    let second = t.create_patient(patient_input("MRN-002")).unwrap();

    let result = t.update_patient(
        &second.id,
        PatientPatch {
            medical_record_number: Some("MRN-001".into()),
            ..Default::default()
        },
    );
    assert!(matches!(result, Err(TrackerError::Conflict(_))));

    // Updating a patient's own record keeping their MRN is fine
    let renamed = t
        .update_patient(
            &second.id,
            PatientPatch {
                last_name: Some("Smith".into()),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(renamed.medical_record_number, "MRN-002");
}

#[test]
fn deleting_entities_with_dosage_history_is_blocked() {
    let t = tracker();
    let med = t.create_medication(med_input("Aspirin", 50, 10)).unwrap();
    let patient = t.create_patient(patient_input("MRN-001")).unwrap();
    let dosage = t.record_dosage(dosage_input(&med.id, &patient.id)).unwrap();

    assert!(matches!(
        t.delete_medication(&med.id),
        Err(TrackerError::Conflict(_))
    ));
    assert!(matches!(
        t.delete_patient(&patient.id),
        Err(TrackerError::Conflict(_))
    ));

    // Removing the dosage history unblocks both
    t.delete_dosage(&dosage.id).unwrap();
    t.delete_medication(&med.id).unwrap();
    t.delete_patient(&patient.id).unwrap();
}

#[test]
fn dosage_update_repoints_only_to_existing_records() {
    let t = tracker();
    let med = t.create_medication(med_input("Aspirin", 50, 10)).unwrap();
    let other = t.create_medication(med_input("Ibuprofen", 20, 10)).unwrap();
    let patient = t.create_patient(patient_input("MRN-001")).unwrap();
    let dosage = t.record_dosage(dosage_input(&med.id, &patient.id)).unwrap();

    // Repointing to a real medication works
    let moved = t
        .update_dosage(
            &dosage.id,
            DosagePatch {
                medication_id: Some(other.id.clone()),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(moved.medication_id, other.id);

    // Repointing to a missing one is rejected and changes nothing
    let result = t.update_dosage(
        &dosage.id,
        DosagePatch {
            medication_id: Some("999".into()),
            ..Default::default()
        },
    );
    assert!(matches!(result, Err(TrackerError::NotFound(_))));
    assert_eq!(t.get_dosage(&dosage.id).unwrap().medication_id, other.id);
}

#[test]
fn stock_decrement_is_opt_in_and_moves_alerts() {
    let config = ServiceConfig {
        decrement_stock_on_dosage: true,
    };
    let t = MedTracker::open_in_memory_with_config(config).unwrap();

    let med = t.create_medication(med_input("Aspirin", 10, 10)).unwrap();
    let patient = t.create_patient(patient_input("MRN-001")).unwrap();
    assert!(t.low_stock_alerts().unwrap().is_empty());

    t.record_dosage(dosage_input(&med.id, &patient.id)).unwrap();

    assert_eq!(t.get_medication(&med.id).unwrap().current_stock, 9);
    let alerts = t.low_stock_alerts().unwrap();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].difference, -1);
}

#[test]
fn default_config_does_not_touch_stock() {
    let t = tracker();
    let med = t.create_medication(med_input("Aspirin", 10, 10)).unwrap();
    let patient = t.create_patient(patient_input("MRN-001")).unwrap();

    t.record_dosage(dosage_input(&med.id, &patient.id)).unwrap();
    assert_eq!(t.get_medication(&med.id).unwrap().current_stock, 10);
}
