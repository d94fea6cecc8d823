use std::fs;
use std::io::Write;
use std::process::{Command, Stdio};

/// Helper function to run statgraph with arguments and a payload on stdin
fn run_statgraph(args: &[&str], stdin_payload: &str) -> Result<Vec<u8>, String> {
    let mut cargo_args = vec!["run", "--bin", "statgraph", "--quiet", "--"];
    cargo_args.extend_from_slice(args);

    let mut child = Command::new("cargo")
        .args(&cargo_args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| format!("Failed to spawn process: {}", e))?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(stdin_payload.as_bytes())
            .map_err(|e| format!("Failed to write to stdin: {}", e))?;
    }

    let output = child
        .wait_with_output()
        .map_err(|e| format!("Failed to wait for process: {}", e))?;

    if output.status.success() {
        Ok(output.stdout)
    } else {
        Err(String::from_utf8_lossy(&output.stderr).to_string())
    }
}

/// Check if bytes are a valid PNG
fn is_valid_png(bytes: &[u8]) -> bool {
    bytes.len() > 8 && &bytes[0..8] == &[137, 80, 78, 71, 13, 10, 26, 10]
}

#[test]
fn test_end_to_end_demo_chart() {
    let payload = fs::read_to_string("test/klime_payload.json").expect("Failed to read payload");
    let result = run_statgraph(&["demo", "--input", "-"], &payload);
    assert!(result.is_ok(), "Failed: {:?}", result.err());
    assert!(is_valid_png(&result.unwrap()), "Output is not a valid PNG");
}

#[test]
fn test_end_to_end_demo_ignores_payload_content() {
    // The demo chart never decodes the body
    let result = run_statgraph(&["demo", "--input", "-"], "this is not json");
    assert!(result.is_ok(), "Failed: {:?}", result.err());
    assert!(is_valid_png(&result.unwrap()));
}

#[test]
fn test_end_to_end_klime_chart() {
    let payload = fs::read_to_string("test/klime_payload.json").expect("Failed to read payload");
    let result = run_statgraph(&["klime", "--input", "-"], &payload);
    assert!(result.is_ok(), "Failed: {:?}", result.err());
    assert!(is_valid_png(&result.unwrap()));
}

#[test]
fn test_end_to_end_klime_svg() {
    let payload = fs::read_to_string("test/klime_payload.json").expect("Failed to read payload");
    let result = run_statgraph(&["klime", "--input", "-", "--format", "svg"], &payload);
    assert!(result.is_ok(), "Failed: {:?}", result.err());
    let svg = String::from_utf8(result.unwrap()).expect("SVG output is not UTF-8");
    assert!(svg.contains("<svg"));
}

#[test]
fn test_end_to_end_klime_html() {
    let payload = fs::read_to_string("test/klime_payload.json").expect("Failed to read payload");
    let result = run_statgraph(&["klime", "--input", "-", "--format", "html"], &payload);
    assert!(result.is_ok(), "Failed: {:?}", result.err());
    let html = String::from_utf8(result.unwrap()).expect("HTML output is not UTF-8");
    assert!(html.contains(r#"<div id="main""#));
    assert!(html.contains("myChart.setOption(option)"));
    assert!(html.contains("model_pred"));
    assert!(html.contains("klime_pred"));
    assert!(html.contains("rc_age"));
    assert!(html.contains("rc_fare"));
    assert!(!html.contains("\"other\""));
}

#[test]
fn test_end_to_end_klime_from_payload_file() {
    let result = run_statgraph(&["klime", "--input", "test/klime_payload.json"], "");
    assert!(result.is_ok(), "Failed: {:?}", result.err());
    assert!(is_valid_png(&result.unwrap()));
}

#[test]
fn test_end_to_end_title_override() {
    let payload = fs::read_to_string("test/klime_payload.json").expect("Failed to read payload");
    let result = run_statgraph(
        &[
            "klime",
            "--input",
            "-",
            "--format",
            "html",
            "--title",
            "Survival predictions",
        ],
        &payload,
    );
    assert!(result.is_ok(), "Failed: {:?}", result.err());
    let html = String::from_utf8(result.unwrap()).unwrap();
    assert!(html.contains("Survival predictions"));
}

#[test]
fn test_end_to_end_klime_missing_column() {
    let payload = fs::read_to_string("test/missing_idx.json").expect("Failed to read payload");
    let result = run_statgraph(&["klime", "--input", "-"], &payload);
    assert!(result.is_err(), "Should have failed with a decode error");
    let stderr = result.unwrap_err();
    assert!(stderr.contains("idx"), "stderr was: {}", stderr);
}

#[test]
fn test_end_to_end_klime_garbage_payload() {
    let result = run_statgraph(&["klime", "--input", "-"], "not json at all");
    assert!(result.is_err(), "Should have failed with a decode error");
    assert!(result.unwrap_err().contains("decode"));
}

#[test]
fn test_end_to_end_output_dir_missing() {
    let payload = fs::read_to_string("test/klime_payload.json").expect("Failed to read payload");
    let result = run_statgraph(
        &[
            "klime",
            "--input",
            "-",
            "--output",
            "/no-such-statgraph-dir/chart.png",
        ],
        &payload,
    );
    assert!(result.is_err(), "Should have failed with a target error");
    assert!(result.unwrap_err().contains("render target"));
}

/// Runs only when a live stats endpoint is available.
#[test]
fn test_end_to_end_live_endpoint() {
    let Ok(url) = std::env::var("STATGRAPH_LIVE_URL") else {
        eprintln!("STATGRAPH_LIVE_URL not set; skipping live endpoint test");
        return;
    };
    let result = run_statgraph(&["demo", "--url", &url, "--timeout", "10"], "");
    assert!(result.is_ok(), "Failed: {:?}", result.err());
    assert!(is_valid_png(&result.unwrap()));
}
