use crate::format::{format_due_date, format_grade, format_percentage, format_weight};
use crate::model::{
    Assignment, AssignmentSummary, Category, CategoryId, CategoryKey, CategorySummary,
    StudentGradeRow,
};
use std::collections::HashMap;

/// Everything the per-student category view needs, already fetched.
#[derive(Debug, Clone, Copy)]
pub struct SummaryRequest<'a> {
    pub row: &'a StudentGradeRow,
    pub assignments: &'a [Assignment],
    pub categories: &'a [Category],
    /// categoryId -> average (0-100), precomputed by the store.
    pub category_averages: &'a HashMap<CategoryId, f64>,
    pub no_due_date_label: &'a str,
}

/// Group assignments into category buckets, ordered by category name.
///
/// Assignments without a category go to [`CategoryKey::Uncategorized`],
/// which never merges with a real category that happens to share its label.
/// Averages are read from `category_averages`, not recomputed.
pub fn summarize_categories(req: &SummaryRequest<'_>) -> Vec<CategorySummary> {
    let mut order: Vec<CategoryKey> = Vec::new();
    let mut buckets: HashMap<CategoryKey, Vec<&Assignment>> = HashMap::new();
    for a in req.assignments {
        let key = CategoryKey::for_assignment(a);
        buckets
            .entry(key.clone())
            .or_insert_with(|| {
                order.push(key);
                Vec::new()
            })
            .push(a);
    }

    order.sort_by(|a, b| a.display_name().cmp(b.display_name()).then(a.cmp(b)));

    order
        .into_iter()
        .map(|key| {
            let members = buckets.remove(&key).unwrap_or_default();
            summarize_bucket(req, key, &members)
        })
        .collect()
}

fn summarize_bucket(
    req: &SummaryRequest<'_>,
    key: CategoryKey,
    members: &[&Assignment],
) -> CategorySummary {
    // First definition with an exact name match; duplicates are not merged.
    let definition = match &key {
        CategoryKey::Named(name) => req.categories.iter().find(|c| &c.name == name),
        CategoryKey::Uncategorized => None,
    };

    let average_score = definition.and_then(|c| req.category_averages.get(&c.id).copied());
    let weight = definition.and_then(|c| format_weight(c.weight));

    CategorySummary {
        name: key.display_name().to_string(),
        category_id: definition.map(|c| c.id.clone()),
        average_score,
        average: average_score.map(format_percentage),
        weight,
        assignments: members
            .iter()
            .map(|a| summarize_assignment(req, a))
            .collect(),
        key,
    }
}

fn summarize_assignment(req: &SummaryRequest<'_>, a: &Assignment) -> AssignmentSummary {
    let cell = req.row.cell(&a.id);
    let grade = cell.and_then(|c| c.graded_value()).map(format_grade);
    let comment = cell.and_then(|c| c.comment.clone()).unwrap_or_default();

    AssignmentSummary {
        assignment_id: a.id.clone(),
        name: a.name.clone(),
        out_of: grade.as_ref().map(|_| a.points),
        grade,
        comment,
        extra_credit: a.extra_credit,
        not_counted: !a.counted,
        not_released: !a.released,
        due_date: a.due_date,
        due_date_label: format_due_date(a.due_date, req.no_due_date_label),
    }
}
