//! Static mock fixtures for demo fallback
//!
//! Hand-authored payloads substituted for failed reads of critical resources
//! when fallback is enabled. Field shapes match the backend serializers so the
//! dashboards render them exactly like live data.

use serde_json::{json, Value};

/// Returns the mock payload for a resource name, if one exists.
///
/// Resource names match [`ResourcePolicy::name`](super::ResourcePolicy):
/// doctors, patients, appointments, schedules, doctor-schedules, lab-tests.
pub fn fixture_for(resource: &str) -> Option<Value> {
    match resource {
        "doctors" => Some(doctors()),
        "patients" => Some(patients()),
        "appointments" => Some(appointments()),
        "schedules" | "doctor-schedules" => Some(schedules()),
        "lab-tests" => Some(lab_tests()),
        _ => None,
    }
}

fn doctors() -> Value {
    json!([
        {
            "doctor_id": 1,
            "first_name": "Asha",
            "last_name": "Rao",
            "specialization": "Cardiology",
            "department": "Cardiology",
            "email": "asha.rao@hospital.example"
        },
        {
            "doctor_id": 2,
            "first_name": "Daniel",
            "last_name": "Okafor",
            "specialization": "Pediatrics",
            "department": "Pediatrics",
            "email": "daniel.okafor@hospital.example"
        },
        {
            "doctor_id": 3,
            "first_name": "Maria",
            "last_name": "Santos",
            "specialization": "Orthopedics",
            "department": "Surgery",
            "email": "maria.santos@hospital.example"
        }
    ])
}

fn patients() -> Value {
    json!([
        {
            "patient_id": 1,
            "reg_num": "P-0001",
            "first_name": "Liam",
            "last_name": "Chen",
            "gender": "M",
            "date_of_birth": "1985-03-12",
            "contact_number": "555-0101",
            "email": "liam.chen@example.com"
        },
        {
            "patient_id": 2,
            "reg_num": "P-0002",
            "first_name": "Sofia",
            "last_name": "Novak",
            "gender": "F",
            "date_of_birth": "1992-11-04",
            "contact_number": "555-0102",
            "email": "sofia.novak@example.com"
        }
    ])
}

fn appointments() -> Value {
    json!([
        {
            "appointment_id": 1,
            "doctor": 1,
            "doctor_name": "Asha Rao",
            "patient": 1,
            "patient_name": "Liam Chen",
            "appointment_date": "2025-06-02T09:30:00Z",
            "reason": "Follow-up consultation",
            "status": "CONFIRMED"
        },
        {
            "appointment_id": 2,
            "doctor": 2,
            "doctor_name": "Daniel Okafor",
            "patient": 2,
            "patient_name": "Sofia Novak",
            "appointment_date": "2025-06-03T14:00:00Z",
            "reason": "Annual check-up",
            "status": "REQUESTED"
        }
    ])
}

fn schedules() -> Value {
    json!([
        {
            "schedule_id": 1,
            "doctor": 1,
            "doctor_name": "Asha Rao",
            "day_of_week": "Monday",
            "start_time": "09:00",
            "end_time": "13:00"
        },
        {
            "schedule_id": 2,
            "doctor": 2,
            "doctor_name": "Daniel Okafor",
            "day_of_week": "Wednesday",
            "start_time": "10:00",
            "end_time": "16:00"
        }
    ])
}

fn lab_tests() -> Value {
    json!([
        {
            "id": 1,
            "doctor": 1,
            "doctor_name": "Asha Rao",
            "patient": 1,
            "patient_name": "Liam Chen",
            "test_name": "Complete Blood Count",
            "notes": "Fasting not required",
            "status": "PENDING_SAMPLE",
            "requested_at": "2025-06-01T08:15:00Z"
        }
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_critical_resource_has_a_fixture() {
        for resource in [
            "doctors",
            "patients",
            "appointments",
            "schedules",
            "doctor-schedules",
            "lab-tests",
        ] {
            let fixture = fixture_for(resource);
            assert!(fixture.is_some(), "Missing fixture for {resource}");
            assert!(
                fixture.unwrap().is_array(),
                "Fixture for {resource} should be a list payload"
            );
        }
    }

    #[test]
    fn test_unknown_resource_has_no_fixture() {
        assert!(fixture_for("logs").is_none());
        assert!(fixture_for("statistics").is_none());
        assert!(fixture_for("receptionists").is_none());
    }

    #[test]
    fn test_doctor_fixture_matches_serializer_shape() {
        let doctors = fixture_for("doctors").unwrap();
        let first = &doctors[0];
        for field in ["doctor_id", "first_name", "last_name", "specialization", "department", "email"] {
            assert!(first.get(field).is_some(), "doctor fixture missing {field}");
        }
    }

    #[test]
    fn test_appointment_fixture_carries_display_names() {
        let appointments = fixture_for("appointments").unwrap();
        assert!(appointments[0].get("doctor_name").is_some());
        assert!(appointments[0].get("patient_name").is_some());
        assert!(appointments[0].get("status").is_some());
    }
}
