// libs/appointment-cell/src/services/schedule.rs
use tracing::warn;

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun",
    "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

pub fn month_abbrev(month: u32) -> Option<&'static str> {
    month
        .checked_sub(1)
        .and_then(|index| MONTHS.get(index as usize))
        .copied()
}

/// Turns the backend's `"D_M_Y"` slot encoding into `"D Mon Y"`.
///
/// The backend contract guarantees the shape. Anything else is logged and
/// returned verbatim rather than guessed at.
pub fn format_slot_date(slot_date: &str) -> String {
    let parts: Vec<&str> = slot_date.split('_').collect();

    let formatted = match parts.as_slice() {
        [day, month, year] => day
            .parse::<u32>()
            .ok()
            .zip(month.parse::<u32>().ok().and_then(month_abbrev))
            .map(|(day, month)| format!("{} {} {}", day, month, year)),
        _ => None,
    };

    formatted.unwrap_or_else(|| {
        warn!("Unexpected slot date encoding: {:?}", slot_date);
        slot_date.to_string()
    })
}
