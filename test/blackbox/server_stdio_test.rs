use crate::common::{new_ods_path, path_arg, seed_roster};
use ods_records::mcp::server::McpServer;
use serde_json::{json, Value};
use std::io::{BufRead, BufReader, Cursor, Write};
use std::process::{Command, Stdio};

fn serve_lines(requests: &[String]) -> Vec<Value> {
    let input = requests.join("\n");
    let mut output = Vec::new();
    McpServer::serve(Cursor::new(input.into_bytes()), &mut output).expect("serve");
    String::from_utf8(output)
        .expect("utf8")
        .lines()
        .map(|line| serde_json::from_str(line).expect("json line"))
        .collect()
}

#[test]
fn serve_answers_requests_and_skips_notifications() {
    let responses = serve_lines(&[
        json!({"jsonrpc":"2.0","id":1,"method":"initialize","params":{}}).to_string(),
        json!({"jsonrpc":"2.0","method":"notifications/initialized"}).to_string(),
        String::new(),
        json!({"jsonrpc":"2.0","id":2,"method":"tools/list"}).to_string(),
    ]);
    assert_eq!(responses.len(), 2);
    assert_eq!(responses[0]["id"], 1);
    assert_eq!(responses[0]["result"]["serverInfo"]["name"], "ods-records");
    assert_eq!(responses[1]["id"], 2);
    assert!(responses[1]["error"].is_null());
}

#[test]
fn serve_reports_parse_and_application_errors() {
    let responses = serve_lines(&[
        "not json".to_string(),
        json!({"jsonrpc":"2.0","id":"t","method":"tools/call","params":{"name":"missing_tool"}})
            .to_string(),
    ]);
    assert_eq!(responses.len(), 2);
    assert!(responses[0]["id"].is_null());
    assert_eq!(responses[0]["error"]["code"], -32700);
    assert_eq!(responses[1]["id"], "t");
    assert_eq!(responses[1]["error"]["code"], 1011);
}

#[test]
fn serve_runs_a_record_lookup() {
    let (_dir, path) = new_ods_path("serve.ods");
    seed_roster(&path);

    let responses = serve_lines(&[json!({
        "jsonrpc": "2.0",
        "id": 9,
        "method": "tools/call",
        "params": {
            "name": "next_record",
            "arguments": {
                "path": path_arg(&path),
                "row": 4,
                "lookup": { "by": "id", "column": "A" }
            }
        }
    })
    .to_string()]);
    assert_eq!(
        responses[0]["result"]["structuredContent"]["record_set"],
        json!({ "start": 7, "end": 7 })
    );
}

#[test]
fn binary_supports_initialize_and_tools_list() {
    let exe = env!("CARGO_BIN_EXE_ods-records");
    let mut child = Command::new(exe)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("spawn server");

    let mut stdin = child.stdin.take().expect("stdin");
    writeln!(
        stdin,
        "{}",
        json!({"jsonrpc":"2.0","id":1,"method":"initialize","params":{}})
    )
    .expect("init");
    writeln!(
        stdin,
        "{}",
        json!({"jsonrpc":"2.0","method":"notifications/initialized"})
    )
    .expect("notification");
    writeln!(
        stdin,
        "{}",
        json!({"jsonrpc":"2.0","id":2,"method":"tools/list","params":{}})
    )
    .expect("list");
    drop(stdin);

    let stdout = child.stdout.take().expect("stdout");
    let lines: Vec<String> = BufReader::new(stdout)
        .lines()
        .collect::<Result<_, _>>()
        .expect("read lines");
    let status = child.wait().expect("wait");
    assert!(status.success());
    assert_eq!(lines.len(), 2);

    let init: Value = serde_json::from_str(&lines[0]).expect("json");
    assert_eq!(init["id"], 1);
    assert_eq!(init["result"]["serverInfo"]["name"], "ods-records");

    let list: Value = serde_json::from_str(&lines[1]).expect("json");
    assert_eq!(list["id"], 2);
    assert_eq!(list["result"]["tools"].as_array().expect("tools").len(), 9);
}
