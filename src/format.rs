use chrono::NaiveDate;

pub const DEFAULT_NO_DUE_DATE_LABEL: &str = "No due date";

/// Drop a single trailing ".0" so whole-number grades read as integers.
pub fn format_grade(grade: &str) -> String {
    grade.strip_suffix(".0").unwrap_or(grade).to_string()
}

/// `25.0` -> `"25%"`, `87.456` -> `"87.46%"`.
pub fn format_percentage(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    let text = format!("{:.2}", rounded);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    let text = if text == "-0" { "0" } else { text };
    format!("{}%", text)
}

/// Category weights are stored as fractions.
pub fn format_weight(weight: Option<f64>) -> Option<String> {
    weight.map(|w| format_percentage(w * 100.0))
}

pub fn format_due_date(due: Option<NaiveDate>, no_due_date_label: &str) -> String {
    match due {
        Some(d) => d.format("%b %-d, %Y").to_string(),
        None => no_due_date_label.to_string(),
    }
}
