use serde_json::json;
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_dir(prefix: &str) -> PathBuf {
    let p = std::env::temp_dir().join(format!(
        "{}-{}",
        prefix,
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos()
    ));
    std::fs::create_dir_all(&p).expect("create temp dir");
    p
}

fn spawn_sidecar() -> (Child, ChildStdin, BufReader<ChildStdout>) {
    let exe = env!("CARGO_BIN_EXE_gradebookd");
    let mut child = Command::new(exe)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("spawn gradebookd");
    let stdin = child.stdin.take().expect("child stdin");
    let stdout = child.stdout.take().expect("child stdout");
    (child, stdin, BufReader::new(stdout))
}

fn request(
    stdin: &mut ChildStdin,
    reader: &mut BufReader<ChildStdout>,
    id: &str,
    method: &str,
    params: serde_json::Value,
) -> serde_json::Value {
    let payload = json!({
        "id": id,
        "method": method,
        "params": params,
    });
    writeln!(stdin, "{}", payload).expect("write request");
    stdin.flush().expect("flush request");

    let mut line = String::new();
    reader.read_line(&mut line).expect("read response line");
    let value: serde_json::Value = serde_json::from_str(line.trim()).expect("parse response json");
    assert_eq!(value.get("id").and_then(|v| v.as_str()), Some(id));
    value
}

fn request_ok(
    stdin: &mut ChildStdin,
    reader: &mut BufReader<ChildStdout>,
    id: &str,
    method: &str,
    params: serde_json::Value,
) -> serde_json::Value {
    let value = request(stdin, reader, id, method, params);
    assert_eq!(
        value.get("ok").and_then(|v| v.as_bool()),
        Some(true),
        "{} failed: {}",
        method,
        value
    );
    value.get("result").cloned().unwrap_or_else(|| json!({}))
}

fn create(
    stdin: &mut ChildStdin,
    reader: &mut BufReader<ChildStdout>,
    id: &str,
    method: &str,
    params: serde_json::Value,
    key: &str,
) -> String {
    request_ok(stdin, reader, id, method, params)
        .get(key)
        .and_then(|v| v.as_str())
        .unwrap_or_else(|| panic!("{} missing from {}", key, method))
        .to_string()
}

#[test]
fn entered_grades_override_calculated_unless_blank() {
    let workspace = temp_dir("gradebook-course-grades");
    let (mut child, mut stdin, mut reader) = spawn_sidecar();
    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "workspace.select",
        json!({ "path": workspace.to_string_lossy() }),
    );

    let course_id = create(
        &mut stdin,
        &mut reader,
        "2",
        "courses.create",
        json!({ "name": "Chemistry" }),
        "courseId",
    );
    for (i, sid) in ["ada", "ben", "cy"].iter().enumerate() {
        let _ = request_ok(
            &mut stdin,
            &mut reader,
            &format!("s{}", i),
            "students.create",
            json!({ "courseId": course_id, "studentId": sid, "displayName": sid.to_uppercase() }),
        );
    }
    let assignment_id = create(
        &mut stdin,
        &mut reader,
        "3",
        "assignments.create",
        json!({ "courseId": course_id, "name": "Lab 1", "points": 10 }),
        "assignmentId",
    );
    for (i, (sid, grade)) in [("ada", "9"), ("ben", "8")].iter().enumerate() {
        let saved = request_ok(
            &mut stdin,
            &mut reader,
            &format!("g{}", i),
            "grades.save",
            json!({
                "courseId": course_id,
                "assignmentId": assignment_id,
                "studentId": sid,
                "grade": grade
            }),
        );
        assert_eq!(saved["saved"].as_bool(), Some(true));
    }

    let calculated = request_ok(
        &mut stdin,
        &mut reader,
        "4",
        "courseGrades.get",
        json!({ "courseId": course_id }),
    );
    assert_eq!(
        calculated["courseGrades"],
        json!({ "ada": "A-", "ben": "B-" })
    );

    for (i, (sid, grade)) in [("ada", "   "), ("ben", "A"), ("cy", "P")].iter().enumerate() {
        let _ = request_ok(
            &mut stdin,
            &mut reader,
            &format!("o{}", i),
            "courseGrades.override",
            json!({ "courseId": course_id, "studentId": sid, "grade": grade }),
        );
    }

    let resolved = request_ok(
        &mut stdin,
        &mut reader,
        "5",
        "courseGrades.get",
        json!({ "courseId": course_id }),
    );
    assert_eq!(
        resolved["courseGrades"],
        json!({ "ada": "A-", "ben": "A", "cy": "P" })
    );

    // Re-entering an override replaces the previous one.
    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "6",
        "courseGrades.override",
        json!({ "courseId": course_id, "studentId": "ben", "grade": "" }),
    );
    let cleared = request_ok(
        &mut stdin,
        &mut reader,
        "7",
        "courseGrades.get",
        json!({ "courseId": course_id }),
    );
    assert_eq!(cleared["courseGrades"]["ben"].as_str(), Some("B-"));

    let unenrolled = request(
        &mut stdin,
        &mut reader,
        "8",
        "courseGrades.override",
        json!({ "courseId": course_id, "studentId": "ghost", "grade": "A" }),
    );
    assert_eq!(unenrolled["error"]["code"].as_str(), Some("not_found"));
    assert_eq!(unenrolled["error"]["details"]["entity"].as_str(), Some("student"));
    let after = request_ok(
        &mut stdin,
        &mut reader,
        "9",
        "courseGrades.get",
        json!({ "courseId": course_id }),
    );
    assert!(after["courseGrades"].get("ghost").is_none());

    drop(stdin);
    let _ = child.wait();
    let _ = std::fs::remove_dir_all(workspace);
}

#[test]
fn unknown_course_resolves_to_empty_map() {
    let workspace = temp_dir("gradebook-course-grades-missing");
    let (mut child, mut stdin, mut reader) = spawn_sidecar();
    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "workspace.select",
        json!({ "path": workspace.to_string_lossy() }),
    );

    let grades = request_ok(
        &mut stdin,
        &mut reader,
        "2",
        "courseGrades.get",
        json!({ "courseId": "no-such-course" }),
    );
    assert_eq!(grades["courseGrades"], json!({}));

    let overridden = request(
        &mut stdin,
        &mut reader,
        "3",
        "courseGrades.override",
        json!({ "courseId": "no-such-course", "studentId": "ada", "grade": "A" }),
    );
    assert_eq!(overridden["ok"].as_bool(), Some(false));
    assert_eq!(overridden["error"]["code"].as_str(), Some("not_found"));

    drop(stdin);
    let _ = child.wait();
    let _ = std::fs::remove_dir_all(workspace);
}
