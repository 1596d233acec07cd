use std::fmt::Write;

use appointment_cell::{Appointment, AppointmentStore};

pub fn render(store: &AppointmentStore) -> String {
    let mut out = String::from("My appointments\n");

    if store.is_loading() {
        out.push_str("Loading appointments...\n");
        return out;
    }

    let appointments = store.snapshot();
    if appointments.is_empty() {
        out.push_str("No appointments found.\n");
        return out;
    }

    for appointment in &appointments {
        render_row(&mut out, appointment);
    }
    out
}

fn render_row(out: &mut String, appointment: &Appointment) {
    let doctor = &appointment.doctor;
    let stage = appointment.stage();

    let _ = writeln!(out, "----------------------------------------");
    let _ = writeln!(out, "{} [{}]", doctor.name, appointment.id);
    let _ = writeln!(out, "{}", doctor.speciality);
    let _ = writeln!(out, "Address: {}, {}", doctor.address.line1, doctor.address.line2);
    let _ = writeln!(out, "Date & Time: {}", appointment.schedule_label());

    match stage.badge() {
        Some(badge) => {
            let _ = writeln!(out, "Status: {}", badge);
        }
        None => {
            let actions: Vec<&str> = appointment
                .available_actions()
                .iter()
                .map(|action| action.label())
                .collect();
            let _ = writeln!(out, "Actions: {}", actions.join(" | "));
        }
    }
}
