use crate::calc::{self, CalcContext};
use crate::model::{Assignment, Category, CategoryId, Course, CourseGradeMap, GradeCell, Student};
use crate::store::{GradeStore, SaveGradeError, StoreError};
use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension};
use std::collections::HashMap;
use std::path::Path;
use uuid::Uuid;

pub const DB_FILE_NAME: &str = "gradebook.sqlite3";

pub fn open_db(workspace: &Path) -> anyhow::Result<Connection> {
    std::fs::create_dir_all(workspace)?;
    let conn = Connection::open(workspace.join(DB_FILE_NAME))?;
    init_schema(&conn)?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> anyhow::Result<()> {
    conn.execute("PRAGMA foreign_keys = ON", [])?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS courses(
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            course_grade_displayed INTEGER NOT NULL DEFAULT 1
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS students(
            course_id TEXT NOT NULL,
            id TEXT NOT NULL,
            display_name TEXT NOT NULL,
            sort_order INTEGER NOT NULL,
            PRIMARY KEY(course_id, id),
            FOREIGN KEY(course_id) REFERENCES courses(id)
        )",
        [],
    )?;
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_students_course_sort ON students(course_id, sort_order)",
        [],
    )?;

    // Category names are not unique; lookups take the first by sort_order.
    conn.execute(
        "CREATE TABLE IF NOT EXISTS categories(
            id TEXT PRIMARY KEY,
            course_id TEXT NOT NULL,
            name TEXT NOT NULL,
            weight REAL,
            sort_order INTEGER NOT NULL,
            FOREIGN KEY(course_id) REFERENCES courses(id)
        )",
        [],
    )?;
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_categories_course ON categories(course_id)",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS assignments(
            id TEXT PRIMARY KEY,
            course_id TEXT NOT NULL,
            name TEXT NOT NULL,
            category_name TEXT,
            points REAL NOT NULL,
            extra_credit INTEGER NOT NULL DEFAULT 0,
            counted INTEGER NOT NULL DEFAULT 1,
            released INTEGER NOT NULL DEFAULT 1,
            due_date TEXT,
            sort_order INTEGER NOT NULL,
            FOREIGN KEY(course_id) REFERENCES courses(id)
        )",
        [],
    )?;
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_assignments_course ON assignments(course_id, sort_order)",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS grades(
            id TEXT PRIMARY KEY,
            course_id TEXT NOT NULL,
            assignment_id TEXT NOT NULL,
            student_id TEXT NOT NULL,
            grade TEXT,
            comment TEXT,
            updated_at TEXT,
            FOREIGN KEY(course_id) REFERENCES courses(id),
            FOREIGN KEY(assignment_id) REFERENCES assignments(id),
            UNIQUE(assignment_id, student_id)
        )",
        [],
    )?;
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_grades_course ON grades(course_id)",
        [],
    )?;
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_grades_student ON grades(course_id, student_id)",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS course_grade_overrides(
            course_id TEXT NOT NULL,
            student_id TEXT NOT NULL,
            entered_grade TEXT NOT NULL,
            updated_at TEXT,
            PRIMARY KEY(course_id, student_id),
            FOREIGN KEY(course_id) REFERENCES courses(id)
        )",
        [],
    )?;

    Ok(())
}

fn parse_due_date(raw: Option<String>) -> Option<NaiveDate> {
    let raw = raw?;
    match NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d") {
        Ok(d) => Some(d),
        Err(e) => {
            tracing::warn!(due_date = %raw, error = %e, "ignoring unparseable due date");
            None
        }
    }
}

fn now_stamp() -> String {
    chrono::Utc::now().to_rfc3339()
}

fn next_sort_order(conn: &Connection, table: &str, course_id: &str) -> Result<i64, StoreError> {
    let sql = format!(
        "SELECT COALESCE(MAX(sort_order), -1) + 1 FROM {} WHERE course_id = ?",
        table
    );
    Ok(conn.query_row(&sql, [course_id], |r| r.get(0))?)
}

pub struct NewAssignment<'a> {
    pub name: &'a str,
    pub category_name: Option<&'a str>,
    pub points: f64,
    pub extra_credit: bool,
    pub counted: bool,
    pub released: bool,
    pub due_date: Option<NaiveDate>,
}

/// [`GradeStore`] over a workspace SQLite connection.
pub struct SqliteGradeStore<'a> {
    conn: &'a Connection,
}

impl<'a> SqliteGradeStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    fn require_course(&self, course_id: &str) -> Result<(), StoreError> {
        let exists: Option<i64> = self
            .conn
            .query_row("SELECT 1 FROM courses WHERE id = ?", [course_id], |r| {
                r.get(0)
            })
            .optional()?;
        match exists {
            Some(_) => Ok(()),
            None => Err(StoreError::not_found("course", course_id)),
        }
    }

    pub fn list_courses(&self) -> Result<Vec<Course>, StoreError> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, course_grade_displayed FROM courses ORDER BY name")?;
        let courses = stmt
            .query_map([], |r| {
                Ok(Course {
                    id: r.get(0)?,
                    name: r.get(1)?,
                    course_grade_displayed: r.get::<_, i64>(2)? != 0,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(courses)
    }

    pub fn create_course(
        &self,
        name: &str,
        course_grade_displayed: bool,
    ) -> Result<String, StoreError> {
        let id = Uuid::new_v4().to_string();
        self.conn.execute(
            "INSERT INTO courses(id, name, course_grade_displayed) VALUES(?, ?, ?)",
            (&id, name, course_grade_displayed as i64),
        )?;
        Ok(id)
    }

    pub fn create_student(
        &self,
        course_id: &str,
        student_id: Option<&str>,
        display_name: &str,
    ) -> Result<String, StoreError> {
        self.require_course(course_id)?;
        let id = student_id
            .map(str::to_string)
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        let sort_order = next_sort_order(self.conn, "students", course_id)?;
        self.conn.execute(
            "INSERT INTO students(course_id, id, display_name, sort_order) VALUES(?, ?, ?, ?)",
            (course_id, &id, display_name, sort_order),
        )?;
        Ok(id)
    }

    pub fn create_category(
        &self,
        course_id: &str,
        name: &str,
        weight: Option<f64>,
    ) -> Result<String, StoreError> {
        self.require_course(course_id)?;
        let id = Uuid::new_v4().to_string();
        let sort_order = next_sort_order(self.conn, "categories", course_id)?;
        self.conn.execute(
            "INSERT INTO categories(id, course_id, name, weight, sort_order) VALUES(?, ?, ?, ?, ?)",
            (&id, course_id, name, weight, sort_order),
        )?;
        Ok(id)
    }

    pub fn create_assignment(
        &self,
        course_id: &str,
        new: &NewAssignment<'_>,
    ) -> Result<String, StoreError> {
        self.require_course(course_id)?;
        let id = Uuid::new_v4().to_string();
        let sort_order = next_sort_order(self.conn, "assignments", course_id)?;
        self.conn.execute(
            "INSERT INTO assignments(
                id, course_id, name, category_name, points,
                extra_credit, counted, released, due_date, sort_order
             ) VALUES(?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            (
                &id,
                course_id,
                new.name,
                new.category_name,
                new.points,
                new.extra_credit as i64,
                new.counted as i64,
                new.released as i64,
                new.due_date.map(|d| d.format("%Y-%m-%d").to_string()),
                sort_order,
            ),
        )?;
        Ok(id)
    }

    /// studentId -> (assignmentId -> grade) for non-null grades.
    fn grades_by_student(
        &self,
        course_id: &str,
    ) -> Result<HashMap<String, HashMap<String, String>>, StoreError> {
        let mut out: HashMap<String, HashMap<String, String>> = HashMap::new();
        for cell in self.fetch_grade_cells(course_id)? {
            if let Some(grade) = cell.grade {
                out.entry(cell.student_id)
                    .or_default()
                    .insert(cell.assignment_id, grade);
            }
        }
        Ok(out)
    }
}

impl GradeStore for SqliteGradeStore<'_> {
    fn fetch_course(&self, course_id: &str) -> Result<Course, StoreError> {
        let course = self
            .conn
            .query_row(
                "SELECT id, name, course_grade_displayed FROM courses WHERE id = ?",
                [course_id],
                |r| {
                    Ok(Course {
                        id: r.get(0)?,
                        name: r.get(1)?,
                        course_grade_displayed: r.get::<_, i64>(2)? != 0,
                    })
                },
            )
            .optional()?;
        course.ok_or_else(|| StoreError::not_found("course", course_id))
    }

    fn fetch_roster(&self, course_id: &str) -> Result<Vec<Student>, StoreError> {
        self.require_course(course_id)?;
        let mut stmt = self.conn.prepare(
            "SELECT id, display_name FROM students WHERE course_id = ? ORDER BY sort_order",
        )?;
        let students = stmt
            .query_map([course_id], |r| {
                Ok(Student {
                    id: r.get(0)?,
                    display_name: r.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(students)
    }

    fn fetch_assignments(&self, course_id: &str) -> Result<Vec<Assignment>, StoreError> {
        self.require_course(course_id)?;
        let mut stmt = self.conn.prepare(
            "SELECT id, name, category_name, points, extra_credit, counted, released, due_date
             FROM assignments
             WHERE course_id = ?
             ORDER BY sort_order",
        )?;
        let rows = stmt
            .query_map([course_id], |r| {
                Ok((
                    r.get::<_, String>(0)?,
                    r.get::<_, String>(1)?,
                    r.get::<_, Option<String>>(2)?,
                    r.get::<_, f64>(3)?,
                    r.get::<_, i64>(4)?,
                    r.get::<_, i64>(5)?,
                    r.get::<_, i64>(6)?,
                    r.get::<_, Option<String>>(7)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(rows
            .into_iter()
            .map(
                |(id, name, category_name, points, extra_credit, counted, released, due)| {
                    Assignment {
                        id,
                        name,
                        category_name,
                        points,
                        extra_credit: extra_credit != 0,
                        counted: counted != 0,
                        released: released != 0,
                        due_date: parse_due_date(due),
                    }
                },
            )
            .collect())
    }

    fn fetch_categories(&self, course_id: &str) -> Result<Vec<Category>, StoreError> {
        self.require_course(course_id)?;
        let mut stmt = self.conn.prepare(
            "SELECT id, name, weight FROM categories WHERE course_id = ? ORDER BY sort_order",
        )?;
        let categories = stmt
            .query_map([course_id], |r| {
                Ok(Category {
                    id: r.get(0)?,
                    name: r.get(1)?,
                    weight: r.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(categories)
    }

    fn fetch_grade_cell(
        &self,
        course_id: &str,
        assignment_id: &str,
        student_id: &str,
    ) -> Result<Option<GradeCell>, StoreError> {
        let cell = self
            .conn
            .query_row(
                "SELECT grade, comment FROM grades
                 WHERE course_id = ? AND assignment_id = ? AND student_id = ?",
                (course_id, assignment_id, student_id),
                |r| {
                    Ok(GradeCell {
                        student_id: student_id.to_string(),
                        assignment_id: assignment_id.to_string(),
                        grade: r.get(0)?,
                        comment: r.get(1)?,
                    })
                },
            )
            .optional()?;
        Ok(cell)
    }

    fn fetch_grade_cells(&self, course_id: &str) -> Result<Vec<GradeCell>, StoreError> {
        self.require_course(course_id)?;
        let mut stmt = self.conn.prepare(
            "SELECT student_id, assignment_id, grade, comment FROM grades WHERE course_id = ?",
        )?;
        let cells = stmt
            .query_map([course_id], |r| {
                Ok(GradeCell {
                    student_id: r.get(0)?,
                    assignment_id: r.get(1)?,
                    grade: r.get(2)?,
                    comment: r.get(3)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(cells)
    }

    fn fetch_calculated_course_grades(
        &self,
        course_id: &str,
    ) -> Result<CourseGradeMap, StoreError> {
        let roster = self.fetch_roster(course_id)?;
        let assignments = self.fetch_assignments(course_id)?;
        let categories = self.fetch_categories(course_id)?;
        let grades = self.grades_by_student(course_id)?;
        let empty = HashMap::new();

        let mut out = CourseGradeMap::new();
        for s in &roster {
            let ctx = CalcContext {
                assignments: &assignments,
                categories: &categories,
                grades: grades.get(&s.id).unwrap_or(&empty),
            };
            if let Some(letter) = calc::calculated_course_grade(&ctx) {
                out.insert(s.id.clone(), letter);
            }
        }
        Ok(out)
    }

    fn fetch_entered_course_grades(&self, course_id: &str) -> Result<CourseGradeMap, StoreError> {
        self.require_course(course_id)?;
        let mut stmt = self.conn.prepare(
            "SELECT student_id, entered_grade FROM course_grade_overrides WHERE course_id = ?",
        )?;
        let entered = stmt
            .query_map([course_id], |r| {
                Ok((r.get::<_, String>(0)?, r.get::<_, String>(1)?))
            })?
            .collect::<Result<CourseGradeMap, _>>()?;
        Ok(entered)
    }

    fn fetch_category_averages(
        &self,
        course_id: &str,
        student_id: &str,
    ) -> Result<HashMap<CategoryId, f64>, StoreError> {
        let assignments = self.fetch_assignments(course_id)?;
        let categories = self.fetch_categories(course_id)?;
        let mut stmt = self.conn.prepare(
            "SELECT assignment_id, grade FROM grades
             WHERE course_id = ? AND student_id = ? AND grade IS NOT NULL",
        )?;
        let grades = stmt
            .query_map((course_id, student_id), |r| {
                Ok((r.get::<_, String>(0)?, r.get::<_, String>(1)?))
            })?
            .collect::<Result<HashMap<_, _>, _>>()?;

        Ok(calc::category_averages(&CalcContext {
            assignments: &assignments,
            categories: &categories,
            grades: &grades,
        }))
    }

    fn save_grade(
        &self,
        course_id: &str,
        assignment_id: &str,
        student_id: &str,
        grade: &str,
        comment: Option<&str>,
    ) -> Result<(), SaveGradeError> {
        match self.require_course(course_id) {
            Ok(()) => {}
            Err(StoreError::NotFound { .. }) => {
                return Err(SaveGradeError::GradebookNotFound(course_id.to_string()))
            }
            Err(StoreError::Db(e)) => return Err(SaveGradeError::Db(e)),
        }

        let assignment: Option<i64> = self
            .conn
            .query_row(
                "SELECT 1 FROM assignments WHERE id = ? AND course_id = ?",
                (assignment_id, course_id),
                |r| r.get(0),
            )
            .optional()?;
        if assignment.is_none() {
            return Err(SaveGradeError::AssignmentNotFound(assignment_id.to_string()));
        }

        let student: Option<i64> = self
            .conn
            .query_row(
                "SELECT 1 FROM students WHERE course_id = ? AND id = ?",
                (course_id, student_id),
                |r| r.get(0),
            )
            .optional()?;
        if student.is_none() {
            return Err(SaveGradeError::StudentNotFound(student_id.to_string()));
        }

        // Blank clears the grade; anything else must be a non-negative number.
        let trimmed = grade.trim();
        let stored_grade = if trimmed.is_empty() {
            None
        } else {
            match calc::parse_points(trimmed) {
                Some(v) if v >= 0.0 => Some(trimmed.to_string()),
                Some(_) => {
                    return Err(SaveGradeError::InvalidGrade {
                        grade: grade.to_string(),
                        reason: "negative grades are not allowed",
                    })
                }
                None => {
                    return Err(SaveGradeError::InvalidGrade {
                        grade: grade.to_string(),
                        reason: "grade must be numeric",
                    })
                }
            }
        };

        self.conn.execute(
            "INSERT INTO grades(id, course_id, assignment_id, student_id, grade, comment, updated_at)
             VALUES(?, ?, ?, ?, ?, ?, ?)
             ON CONFLICT(assignment_id, student_id) DO UPDATE SET
               grade = excluded.grade,
               comment = excluded.comment,
               updated_at = excluded.updated_at",
            (
                Uuid::new_v4().to_string(),
                course_id,
                assignment_id,
                student_id,
                stored_grade,
                comment,
                now_stamp(),
            ),
        )?;
        Ok(())
    }

    fn save_entered_course_grade(
        &self,
        course_id: &str,
        student_id: &str,
        grade: &str,
    ) -> Result<(), StoreError> {
        self.require_course(course_id)?;
        let student: Option<i64> = self
            .conn
            .query_row(
                "SELECT 1 FROM students WHERE course_id = ? AND id = ?",
                (course_id, student_id),
                |r| r.get(0),
            )
            .optional()?;
        if student.is_none() {
            return Err(StoreError::not_found("student", student_id));
        }
        self.conn.execute(
            "INSERT INTO course_grade_overrides(course_id, student_id, entered_grade, updated_at)
             VALUES(?, ?, ?, ?)
             ON CONFLICT(course_id, student_id) DO UPDATE SET
               entered_grade = excluded.entered_grade,
               updated_at = excluded.updated_at",
            (course_id, student_id, grade, now_stamp()),
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> (Connection, String) {
        let conn = Connection::open_in_memory().expect("open in-memory db");
        init_schema(&conn).expect("schema");
        let course_id = SqliteGradeStore::new(&conn)
            .create_course("Biology 101", true)
            .expect("create course");
        (conn, course_id)
    }

    fn new_assignment<'a>(
        name: &'a str,
        category: Option<&'a str>,
        points: f64,
    ) -> NewAssignment<'a> {
        NewAssignment {
            name,
            category_name: category,
            points,
            extra_credit: false,
            counted: true,
            released: true,
            due_date: None,
        }
    }

    #[test]
    fn unknown_course_is_not_found() {
        let (conn, _) = seeded();
        let store = SqliteGradeStore::new(&conn);
        let err = store.fetch_roster("nope").expect_err("missing course");
        assert!(err.is_not_found());
        assert!(store.fetch_assignments("nope").is_err());
        assert!(store.fetch_entered_course_grades("nope").is_err());
    }

    #[test]
    fn roster_and_assignments_keep_insert_order() {
        let (conn, course) = seeded();
        let store = SqliteGradeStore::new(&conn);
        store.create_student(&course, Some("zed"), "Zed").expect("zed");
        store.create_student(&course, Some("amy"), "Amy").expect("amy");
        let mut quiz = new_assignment("Quiz", Some("Quizzes"), 10.0);
        quiz.due_date = NaiveDate::from_ymd_opt(2026, 2, 1);
        let a1 = store.create_assignment(&course, &quiz).expect("quiz");
        let a2 = store
            .create_assignment(&course, &new_assignment("Essay", None, 50.0))
            .expect("essay");

        let roster = store.fetch_roster(&course).expect("roster");
        let ids: Vec<&str> = roster.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["zed", "amy"]);

        let assignments = store.fetch_assignments(&course).expect("assignments");
        assert_eq!(assignments[0].id, a1);
        assert_eq!(assignments[0].due_date, NaiveDate::from_ymd_opt(2026, 2, 1));
        assert_eq!(assignments[1].id, a2);
        assert_eq!(assignments[1].category_name, None);
        assert!(assignments[1].released);
    }

    #[test]
    fn save_grade_validates_and_upserts() {
        let (conn, course) = seeded();
        let store = SqliteGradeStore::new(&conn);
        store.create_student(&course, Some("s1"), "Ada").expect("student");
        let a1 = store
            .create_assignment(&course, &new_assignment("Lab", None, 10.0))
            .expect("assignment");

        store
            .save_grade(&course, &a1, "s1", "7", Some("ok"))
            .expect("first save");
        store
            .save_grade(&course, &a1, "s1", "8.5", Some("better"))
            .expect("second save");
        let cell = store
            .fetch_grade_cell(&course, &a1, "s1")
            .expect("fetch")
            .expect("cell");
        assert_eq!(cell.grade.as_deref(), Some("8.5"));
        assert_eq!(cell.comment.as_deref(), Some("better"));
        assert_eq!(store.fetch_grade_cells(&course).expect("cells").len(), 1);

        assert!(matches!(
            store.save_grade(&course, &a1, "s1", "abc", None),
            Err(SaveGradeError::InvalidGrade { .. })
        ));
        assert!(matches!(
            store.save_grade(&course, &a1, "s1", "-1", None),
            Err(SaveGradeError::InvalidGrade { .. })
        ));
        assert!(matches!(
            store.save_grade(&course, "missing", "s1", "1", None),
            Err(SaveGradeError::AssignmentNotFound(_))
        ));
        assert!(matches!(
            store.save_grade(&course, &a1, "ghost", "1", None),
            Err(SaveGradeError::StudentNotFound(_))
        ));
        assert!(matches!(
            store.save_grade("nope", &a1, "s1", "1", None),
            Err(SaveGradeError::GradebookNotFound(_))
        ));

        store
            .save_grade(&course, &a1, "s1", "  ", Some("cleared"))
            .expect("clear");
        let cleared = store
            .fetch_grade_cell(&course, &a1, "s1")
            .expect("fetch")
            .expect("cell");
        assert_eq!(cleared.grade, None);
        assert_eq!(cleared.comment.as_deref(), Some("cleared"));
    }

    #[test]
    fn calculated_grades_and_category_averages() {
        let (conn, course) = seeded();
        let store = SqliteGradeStore::new(&conn);
        store.create_student(&course, Some("s1"), "Ada").expect("s1");
        store.create_student(&course, Some("s2"), "Bo").expect("s2");
        let labs = store
            .create_category(&course, "Labs", Some(0.5))
            .expect("labs");
        let tests = store
            .create_category(&course, "Tests", Some(0.5))
            .expect("tests");
        let a1 = store
            .create_assignment(&course, &new_assignment("Lab 1", Some("Labs"), 10.0))
            .expect("a1");
        let a2 = store
            .create_assignment(&course, &new_assignment("Test 1", Some("Tests"), 100.0))
            .expect("a2");

        store.save_grade(&course, &a1, "s1", "10", None).expect("g1");
        store.save_grade(&course, &a2, "s1", "80", None).expect("g2");

        let averages = store
            .fetch_category_averages(&course, "s1")
            .expect("averages");
        assert!((averages[&labs] - 100.0).abs() < 1e-9);
        assert!((averages[&tests] - 80.0).abs() < 1e-9);

        let calculated = store
            .fetch_calculated_course_grades(&course)
            .expect("calculated");
        assert_eq!(calculated.get("s1").map(String::as_str), Some("A-"));
        assert!(!calculated.contains_key("s2"));
    }

    #[test]
    fn entered_grades_are_stored_verbatim() {
        let (conn, course) = seeded();
        let store = SqliteGradeStore::new(&conn);
        store.create_student(&course, Some("s1"), "Ada").expect("s1");
        store.create_student(&course, Some("s2"), "Bo").expect("s2");
        store
            .save_entered_course_grade(&course, "s1", "A")
            .expect("override");
        store
            .save_entered_course_grade(&course, "s2", "")
            .expect("blank override");
        store
            .save_entered_course_grade(&course, "s1", "A-")
            .expect("replace override");

        let entered = store.fetch_entered_course_grades(&course).expect("entered");
        assert_eq!(entered.get("s1").map(String::as_str), Some("A-"));
        assert_eq!(entered.get("s2").map(String::as_str), Some(""));
    }

    #[test]
    fn overrides_for_students_off_the_roster_are_rejected() {
        let (conn, course) = seeded();
        let store = SqliteGradeStore::new(&conn);
        store.create_student(&course, Some("s1"), "Ada").expect("s1");

        let err = store
            .save_entered_course_grade(&course, "ghost", "A")
            .expect_err("unenrolled student");
        assert!(err.is_not_found());
        assert!(store
            .fetch_entered_course_grades(&course)
            .expect("entered")
            .is_empty());
    }

    #[test]
    fn reopening_schema_is_idempotent() {
        let (conn, course) = seeded();
        init_schema(&conn).expect("second init");
        let store = SqliteGradeStore::new(&conn);
        let mut hidden = new_assignment("Draft", None, 5.0);
        hidden.released = false;
        store.create_assignment(&course, &hidden).expect("assignment");
        let assignments = store.fetch_assignments(&course).expect("assignments");
        assert_eq!(assignments.len(), 1);
        assert!(!assignments[0].released);
    }
}
