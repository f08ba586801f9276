use serde_json::json;

pub fn ok(id: &str, result: serde_json::Value) -> serde_json::Value {
    json!({
        "id": id,
        "ok": true,
        "result": result
    })
}

pub fn err(
    id: &str,
    code: &str,
    message: impl Into<String>,
    details: Option<serde_json::Value>,
) -> serde_json::Value {
    let mut error = json!({
        "code": code,
        "message": message.into(),
    });
    if let Some(d) = details {
        error["details"] = d;
    }
    json!({
        "id": id,
        "ok": false,
        "error": error,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_envelope_includes_details_only_when_given() {
        let plain = err("7", "bad_params", "missing courseId", None);
        assert_eq!(plain["ok"], json!(false));
        assert_eq!(plain["error"]["code"], json!("bad_params"));
        assert!(plain["error"].get("details").is_none());

        let detailed = err("8", "not_found", "student not found", Some(json!({ "id": "s1" })));
        assert_eq!(detailed["error"]["details"]["id"], json!("s1"));
    }
}
