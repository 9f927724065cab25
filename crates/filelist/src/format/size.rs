use crate::record::Record;

use super::PLACEHOLDER;

const UNITS: [&str; 6] = ["B", "KB", "MB", "GB", "TB", "PB"];
const STEP: u128 = 1024;

/// Renders a byte count with a binary unit suffix.
///
/// The unit is chosen by repeated division by 1024. The displayed value is
/// derived from `value * 1000 / 1024^unit` and shown with 0, 1, or 2
/// decimals depending on its magnitude.
pub fn format_size(value: Option<u128>) -> String {
    let Some(value) = value else {
        return PLACEHOLDER.to_string();
    };

    let mut remaining = value;
    let mut unit = 0;
    while remaining >= STEP && unit < UNITS.len() - 1 {
        remaining /= STEP;
        unit += 1;
    }

    let thousandths = scaled_thousandths(value, unit);
    let precision = if thousandths >= 100_000 {
        0
    } else if thousandths >= 10_000 {
        1
    } else {
        2
    };
    format!("{} {}", render_fixed(thousandths, precision), UNITS[unit])
}

/// Size column of a record; directories never show a size.
pub fn format_record_size(record: &Record) -> String {
    if record.is_directory() {
        return PLACEHOLDER.to_string();
    }
    format_size(record.size())
}

/// Total of all present, non-directory sizes.
pub fn sum_sizes<'a>(records: impl IntoIterator<Item = &'a Record>) -> u128 {
    records
        .into_iter()
        .filter(|record| !record.is_directory())
        .filter_map(Record::size)
        .fold(0u128, u128::saturating_add)
}

/// Rendered aggregate; a zero total shows the placeholder.
pub fn aggregate_size<'a>(records: impl IntoIterator<Item = &'a Record>) -> String {
    match sum_sizes(records) {
        0 => PLACEHOLDER.to_string(),
        total => format_size(Some(total)),
    }
}

fn scaled_thousandths(value: u128, unit: usize) -> u128 {
    let divisor = STEP.pow(unit as u32);
    match value.checked_mul(1000) {
        Some(scaled) => scaled / divisor,
        // Only reachable near u128::MAX; divide first and accept the lost digits.
        None => (value / divisor).saturating_mul(1000),
    }
}

/// Rounds thousandths half-up to `precision` decimals and renders them.
fn render_fixed(thousandths: u128, precision: u32) -> String {
    let drop = 10u128.pow(3 - precision);
    let rounded = (thousandths + drop / 2) / drop;
    if precision == 0 {
        return rounded.to_string();
    }
    let scale = 10u128.pow(precision);
    format!(
        "{}.{:0width$}",
        rounded / scale,
        rounded % scale,
        width = precision as usize
    )
}
