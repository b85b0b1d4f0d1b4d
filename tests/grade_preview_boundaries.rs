use serde_json::json;
use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

fn spawn_sidecar() -> (Child, ChildStdin, BufReader<ChildStdout>) {
    let exe = env!("CARGO_BIN_EXE_trackerd");
    let mut cmd = Command::new(exe);
    for (key, _) in std::env::vars_os() {
        if key.to_string_lossy().starts_with("TRACKERD_") {
            cmd.env_remove(key);
        }
    }
    let mut child = cmd
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("spawn trackerd");
    let stdin = child.stdin.take().expect("child stdin");
    let stdout = child.stdout.take().expect("child stdout");
    (child, stdin, BufReader::new(stdout))
}

fn send(
    stdin: &mut ChildStdin,
    reader: &mut BufReader<ChildStdout>,
    id: &str,
    method: &str,
    params: serde_json::Value,
) -> serde_json::Value {
    let payload = json!({ "id": id, "method": method, "params": params });
    writeln!(stdin, "{}", payload).expect("write request");
    stdin.flush().expect("flush request");
    let mut line = String::new();
    reader.read_line(&mut line).expect("read response line");
    serde_json::from_str(line.trim()).expect("parse response json")
}

#[test]
fn preview_grades_match_thresholds() {
    let (mut child, mut stdin, mut reader) = spawn_sidecar();

    let cases = [
        (json!(0), json!(100), "Fail"),
        (json!(75), json!(100), "A"),
        (json!(74.99), json!(100), "B"),
        (json!(60), json!(100), "B"),
        (json!(59.99), json!(100), "C"),
        (json!(50), json!(100), "C"),
        (json!(49.99), json!(100), "D"),
        (json!(40), json!(100), "D"),
        (json!(39.99), json!(100), "Fail"),
        (json!(30), json!(40), "A"),
        // Entry form sends the raw text field.
        (json!("18"), json!(20), "A"),
        (json!(" 9 "), json!("20"), "D"),
    ];
    for (i, (obtained, total, expected)) in cases.iter().enumerate() {
        let resp = send(
            &mut stdin,
            &mut reader,
            &format!("c{}", i),
            "grade.preview",
            json!({ "obtained": obtained, "total": total }),
        );
        assert_eq!(resp["ok"], json!(true), "{}", resp);
        assert_eq!(
            resp["result"]["grade"],
            json!(expected),
            "obtained {} total {}",
            obtained,
            total
        );
    }

    let pct = send(
        &mut stdin,
        &mut reader,
        "pct",
        "grade.preview",
        json!({ "obtained": 45, "total": 50 }),
    );
    assert_eq!(pct["result"]["percentage"], json!(90.0));

    drop(stdin);
    let _ = child.wait();
}

#[test]
fn preview_without_input_is_not_gradable() {
    let (mut child, mut stdin, mut reader) = spawn_sidecar();

    for (i, params) in [
        json!({ "total": 100 }),
        json!({ "obtained": null, "total": 100 }),
        json!({ "obtained": "", "total": 100 }),
        json!({ "obtained": 50, "total": 0 }),
        json!({ "obtained": 50 }),
    ]
    .into_iter()
    .enumerate()
    {
        let resp = send(&mut stdin, &mut reader, &format!("n{}", i), "grade.preview", params);
        assert_eq!(resp["ok"], json!(true), "{}", resp);
        assert_eq!(resp["result"]["grade"], json!("-"));
        assert_eq!(resp["result"]["percentage"], serde_json::Value::Null);
    }

    let bad = send(
        &mut stdin,
        &mut reader,
        "bad",
        "grade.preview",
        json!({ "obtained": "ten", "total": 100 }),
    );
    assert_eq!(bad["ok"], json!(false));
    assert_eq!(bad["error"]["code"], json!("bad_params"));

    let bad_kind = send(
        &mut stdin,
        &mut reader,
        "bad2",
        "grade.preview",
        json!({ "obtained": [1], "total": 100 }),
    );
    assert_eq!(bad_kind["error"]["code"], json!("bad_params"));

    drop(stdin);
    let _ = child.wait();
}
