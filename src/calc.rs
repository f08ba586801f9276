use crate::model::{Assignment, Category, CategoryId};
use std::collections::HashMap;

/// Default letter scale: minimum percent for each letter, highest first.
pub const LETTER_SCALE: &[(&str, f64)] = &[
    ("A+", 100.0),
    ("A", 95.0),
    ("A-", 90.0),
    ("B+", 87.0),
    ("B", 83.0),
    ("B-", 80.0),
    ("C+", 77.0),
    ("C", 73.0),
    ("C-", 70.0),
    ("D+", 67.0),
    ("D", 63.0),
    ("D-", 60.0),
    ("F", 0.0),
];

/// Points earned for a stored grade. Blank or non-numeric grades count as
/// ungraded.
pub fn parse_points(grade: &str) -> Option<f64> {
    let t = grade.trim();
    if t.is_empty() {
        return None;
    }
    t.parse::<f64>().ok().filter(|v| v.is_finite())
}

pub fn letter_grade(percent: f64) -> &'static str {
    for (letter, min) in LETTER_SCALE {
        if percent >= *min {
            return *letter;
        }
    }
    "F"
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct PointsTotal {
    earned: f64,
    possible: f64,
}

impl PointsTotal {
    fn add(&mut self, a: &Assignment, earned: f64) {
        self.earned += earned;
        // Extra credit raises the numerator only.
        if !a.extra_credit {
            self.possible += a.points;
        }
    }

    fn percent(&self) -> Option<f64> {
        if self.possible > 0.0 {
            Some(100.0 * self.earned / self.possible)
        } else {
            None
        }
    }
}

/// Inputs for one student's calculation.
#[derive(Debug, Clone, Copy)]
pub struct CalcContext<'a> {
    pub assignments: &'a [Assignment],
    pub categories: &'a [Category],
    /// assignmentId -> raw grade for the student.
    pub grades: &'a HashMap<String, String>,
}

fn counted_scores<'a>(
    ctx: &'a CalcContext<'a>,
) -> impl Iterator<Item = (&'a Assignment, f64)> + 'a {
    ctx.assignments.iter().filter(|a| a.counted).filter_map(move |a| {
        let earned = ctx.grades.get(&a.id).and_then(|g| parse_points(g))?;
        Some((a, earned))
    })
}

fn category_for<'a>(categories: &'a [Category], a: &Assignment) -> Option<&'a Category> {
    let name = a.category_name.as_deref()?;
    categories.iter().find(|c| c.name == name)
}

/// Average percent per category definition. Categories with no counted,
/// graded work are absent.
pub fn category_averages(ctx: &CalcContext<'_>) -> HashMap<CategoryId, f64> {
    let mut totals: HashMap<&str, PointsTotal> = HashMap::new();
    for (a, earned) in counted_scores(ctx) {
        let Some(category) = category_for(ctx.categories, a) else {
            continue;
        };
        totals.entry(category.id.as_str()).or_default().add(a, earned);
    }

    totals
        .into_iter()
        .filter_map(|(id, total)| total.percent().map(|p| (id.to_string(), p)))
        .collect()
}

/// Weighted category mean when any category carries a weight, total points
/// otherwise.
pub fn course_percent(ctx: &CalcContext<'_>) -> Option<f64> {
    let weighted = ctx
        .categories
        .iter()
        .any(|c| c.weight.map(|w| w > 0.0).unwrap_or(false));

    if weighted {
        let averages = category_averages(ctx);
        let mut sum = 0.0_f64;
        let mut denom = 0.0_f64;
        for c in ctx.categories {
            let weight = c.weight.unwrap_or(0.0);
            if weight <= 0.0 {
                continue;
            }
            if let Some(avg) = averages.get(&c.id) {
                sum += avg * weight;
                denom += weight;
            }
        }
        if denom > 0.0 {
            Some(sum / denom)
        } else {
            None
        }
    } else {
        let mut total = PointsTotal::default();
        for (a, earned) in counted_scores(ctx) {
            total.add(a, earned);
        }
        total.percent()
    }
}

pub fn calculated_course_grade(ctx: &CalcContext<'_>) -> Option<String> {
    course_percent(ctx).map(|p| letter_grade(p).to_string())
}
