pub(crate) fn now_ms() -> i64 {
    js_sys::Date::now().round() as i64
}

/// `YYYY-MM-DDTHH-mm-ss`; colons are not allowed in page names.
pub(crate) fn format_page_timestamp(
    year: u32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
) -> String {
    format!("{year:04}-{month:02}-{day:02}T{hour:02}-{minute:02}-{second:02}")
}

/// Suggested name for a new page, from the browser's local time.
pub(crate) fn default_page_name() -> String {
    let d = js_sys::Date::new_0();
    format_page_timestamp(
        d.get_full_year(),
        d.get_month() + 1,
        d.get_date(),
        d.get_hours(),
        d.get_minutes(),
        d.get_seconds(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paths::validate_page_name;

    #[test]
    fn test_format_page_timestamp_pads_fields() {
        assert_eq!(
            format_page_timestamp(2024, 3, 7, 9, 5, 1),
            "2024-03-07T09-05-01"
        );
    }

    #[test]
    fn test_timestamp_is_a_valid_page_name() {
        assert!(validate_page_name(&format_page_timestamp(2025, 12, 31, 23, 59, 59)).is_ok());
    }
}
