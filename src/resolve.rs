use crate::model::CourseGradeMap;

/// Merge calculated course grades with manually entered overrides.
///
/// A non-blank entered grade wins. Blank or whitespace-only entries never
/// replace or remove a calculated grade, and a student missing from both maps
/// stays missing.
pub fn resolve_course_grades(
    calculated: &CourseGradeMap,
    entered: &CourseGradeMap,
) -> CourseGradeMap {
    let mut resolved = calculated.clone();
    for (student_id, grade) in entered {
        if grade.trim().is_empty() {
            continue;
        }
        resolved.insert(student_id.clone(), grade.clone());
    }
    resolved
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> CourseGradeMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn entered_grade_overrides_calculated() {
        let calculated = map(&[("s1", "B+")]);
        let entered = map(&[("s1", ""), ("s2", "A")]);
        let resolved = resolve_course_grades(&calculated, &entered);
        assert_eq!(resolved, map(&[("s1", "B+"), ("s2", "A")]));
    }

    #[test]
    fn whitespace_override_keeps_calculated() {
        let calculated = map(&[("s1", "C")]);
        let entered = map(&[("s1", "   \t")]);
        let resolved = resolve_course_grades(&calculated, &entered);
        assert_eq!(resolved.get("s1").map(String::as_str), Some("C"));
    }

    #[test]
    fn non_blank_override_replaces_calculated() {
        let calculated = map(&[("s1", "C"), ("s2", "D")]);
        let entered = map(&[("s2", "B-")]);
        let resolved = resolve_course_grades(&calculated, &entered);
        assert_eq!(resolved, map(&[("s1", "C"), ("s2", "B-")]));
    }

    #[test]
    fn blank_only_student_is_not_fabricated() {
        let resolved = resolve_course_grades(&map(&[]), &map(&[("s9", "")]));
        assert!(!resolved.contains_key("s9"));
        assert!(resolved.is_empty());
    }

    #[test]
    fn resolution_is_repeatable() {
        let calculated = map(&[("s1", "A-"), ("s2", "F")]);
        let entered = map(&[("s2", "D"), ("s3", " ")]);
        let a = resolve_course_grades(&calculated, &entered);
        let b = resolve_course_grades(&calculated, &entered);
        assert_eq!(a, b);
    }
}
