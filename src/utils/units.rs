use serde_json::Value;

const GIB: f64 = (1u64 << 30) as f64;

/// Convert a raw byte count to whole gibibytes for memory columns.
///
/// Only numeric source values convert; anything else (missing, string,
/// null) renders as the canonical missing marker.
pub fn whole_gib(value: Option<&Value>) -> String {
    match value.and_then(Value::as_f64) {
        Some(bytes) => format!("{}", (bytes / GIB).round_ties_even() as i64),
        None => "N/A".to_string(),
    }
}

/// Convert a raw byte count to gibibytes with two decimals for capacity and
/// allocation columns. Zero or absent values render blank so the column can
/// feed totals arithmetic unchanged.
pub fn frac_gib(value: Option<&Value>) -> String {
    let bytes = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match bytes {
        Some(b) if b != 0.0 => format_gib(b / GIB),
        _ => String::new(),
    }
}

/// Round to two decimals, keeping at least one decimal place, so values
/// render as "10.0" or "12.35" rather than "10".
pub fn format_gib(gib: f64) -> String {
    let rounded = (gib * 100.0).round_ties_even() / 100.0;
    let two = format!("{:.2}", rounded);
    match two.strip_suffix('0') {
        Some(trimmed) => trimmed.to_string(),
        None => two,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn whole_gib_rounds_half_to_even() {
        assert_eq!(whole_gib(Some(&json!(2147483648_u64))), "2");
        assert_eq!(whole_gib(Some(&json!(1610612736_u64))), "2"); // 1.5 GiB
        assert_eq!(whole_gib(Some(&json!(536870912_u64))), "0"); // 0.5 GiB
        assert_eq!(whole_gib(Some(&json!(3221225472_u64))), "3");
    }

    #[test]
    fn whole_gib_non_numeric_is_na() {
        assert_eq!(whole_gib(None), "N/A");
        assert_eq!(whole_gib(Some(&json!(null))), "N/A");
        assert_eq!(whole_gib(Some(&json!("2147483648"))), "N/A");
    }

    #[test]
    fn frac_gib_two_decimals() {
        assert_eq!(frac_gib(Some(&json!(10737418240_u64))), "10.0");
        assert_eq!(frac_gib(Some(&json!(5368709120_u64))), "5.0");
        assert_eq!(frac_gib(Some(&json!(13260287970_u64))), "12.35");
    }

    #[test]
    fn frac_gib_zero_or_absent_is_blank() {
        assert_eq!(frac_gib(Some(&json!(0))), "");
        assert_eq!(frac_gib(None), "");
        assert_eq!(frac_gib(Some(&json!(null))), "");
    }

    #[test]
    fn frac_gib_accepts_numeric_strings() {
        assert_eq!(frac_gib(Some(&json!("10737418240"))), "10.0");
        assert_eq!(frac_gib(Some(&json!("not a number"))), "");
    }

    #[test]
    fn format_gib_keeps_one_decimal() {
        assert_eq!(format_gib(10.0), "10.0");
        assert_eq!(format_gib(12.3), "12.3");
        assert_eq!(format_gib(12.348), "12.35");
        assert_eq!(format_gib(0.0), "0.0");
    }
}
