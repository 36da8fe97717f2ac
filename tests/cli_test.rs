mod common;

use std::thread;

use common::CentreTest;
use tiny_http::{Header, Response, Server};

fn json_response(status: u16, body: &str) -> Response<std::io::Cursor<Vec<u8>>> {
    Response::from_string(body)
        .with_status_code(status)
        .with_header(
            Header::from_bytes("Content-Type", "application/json")
                .expect("valid content type header"),
        )
}

#[test]
fn test_config_set_then_get() {
    let centre = CentreTest::new();

    let output = centre.run_success(&["config", "set", "page_size", "50"]);
    assert!(output.contains("page_size"));
    assert_eq!(centre.run_success(&["config", "get", "page_size"]).trim(), "50");

    centre.run_success(&["config", "set", "auto_refresh", "off"]);
    assert_eq!(
        centre.run_success(&["config", "get", "auto_refresh"]).trim(),
        "false"
    );
    assert!(centre.read_config().contains("page_size: 50"));
}

#[test]
fn test_config_set_rejects_bad_values() {
    let centre = CentreTest::new();

    let stderr = centre.run_failure(&["config", "set", "page_size", "0"]);
    assert!(stderr.contains("page_size must be greater than 0"));

    let stderr = centre.run_failure(&["config", "set", "auto_refresh", "maybe"]);
    assert!(stderr.contains("auto_refresh expects true/false"));

    let stderr = centre.run_failure(&["config", "get", "colour"]);
    assert!(stderr.contains("unknown config key 'colour'"));
}

#[test]
fn test_config_show_json_hides_token() {
    let centre = CentreTest::new();
    centre.write_config(
        "api_base_url: https://ops.example.com\nauth:\n  access_token: tok-secret\n  email: ops@example.com\n",
    );

    let output = centre.run_success(&["config", "show", "--json"]);
    let json: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(json["auth"]["logged_in"], true);
    assert_eq!(json["auth"]["email"], "ops@example.com");
    assert!(!output.contains("tok-secret"));
}

#[test]
fn test_bookings_ls_requires_login() {
    let centre = CentreTest::new();
    centre.write_config("api_base_url: https://ops.example.com\n");

    let stderr = centre.run_failure(&["bookings", "ls"]);
    assert!(stderr.contains("not logged in"));
}

#[test]
fn test_logout_without_session() {
    let centre = CentreTest::new();
    let output = centre.run_success(&["logout", "--json"]);
    let json: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(json["logged_out"], false);
}

#[test]
fn test_page_size_outside_offered_sizes_is_rejected() {
    let centre = CentreTest::new();
    let stderr = centre.run_failure(&["bookings", "ls", "--page-size", "30"]);
    assert!(stderr.contains("Invalid page size"));
}

#[test]
fn test_unknown_filter_is_rejected() {
    let centre = CentreTest::new();
    let stderr = centre.run_failure(&["bookings", "ls", "--filter", "pending"]);
    assert!(stderr.contains("pending"));
}

#[test]
fn test_completions_bash() {
    let centre = CentreTest::new();
    let output = centre.run_success(&["completions", "bash"]);
    assert!(output.contains("command-centre"));
    assert!(output.contains("bookings"));
}

#[test]
fn test_login_then_list_bookings() {
    let server = Server::http("127.0.0.1:0").expect("start mock server");
    let base = format!("http://{}", server.server_addr());

    let handle = thread::spawn(move || {
        let request = server.recv().expect("login request expected");
        assert_eq!(request.url(), "/pht/v1/api/customers/action/ops-login");
        request
            .respond(json_response(
                200,
                r#"{"status":"SUCCESS","data":{"accessToken":{"access_token":"tok-fresh"}}}"#,
            ))
            .expect("response should succeed");

        let request = server.recv().expect("list request expected");
        assert!(request.url().contains("booking_filter=NEW_BOOKINGS"));
        assert!(request.url().contains("limit=10"));
        let auth = request
            .headers()
            .iter()
            .find(|h| h.field.equiv("Authorization"))
            .map(|h| h.value.as_str().to_string());
        assert_eq!(auth.as_deref(), Some("tok-fresh"));
        request
            .respond(json_response(
                200,
                r#"{"status":"SUCCESS","data":{"bookings":[
                    {"bookingId":"B17","customerName":"Asha","bookingStatus":"NEW"}
                ],"totalItems":1}}"#,
            ))
            .expect("response should succeed");
    });

    let centre = CentreTest::new();
    centre.run_success(&["config", "set", "api_base_url", &base]);
    centre.run_success(&[
        "login",
        "--email",
        "ops@example.com",
        "--password",
        "hunter2",
    ]);
    assert!(centre.read_config().contains("tok-fresh"));

    let output = centre.run_success(&[
        "bookings",
        "ls",
        "--filter",
        "new",
        "--page-size",
        "10",
        "--json",
    ]);
    let json: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(json["filter"], "NEW_BOOKINGS");
    assert_eq!(json["total"], 1);
    assert_eq!(json["bookings"][0]["bookingId"], "B17");

    handle.join().expect("server thread should join");
}

#[test]
fn test_unauthorized_response_clears_stored_session() {
    let server = Server::http("127.0.0.1:0").expect("start mock server");
    let base = format!("http://{}", server.server_addr());

    let handle = thread::spawn(move || {
        let request = server.recv().expect("request expected");
        request
            .respond(json_response(401, r#"{"status":"FAILURE","data":"expired"}"#))
            .expect("response should succeed");
    });

    let centre = CentreTest::new();
    centre.write_config(&format!(
        "api_base_url: {base}\nauth:\n  access_token: tok-stale\n  email: ops@example.com\n"
    ));

    let stderr = centre.run_failure(&["staff", "ls"]);
    assert!(stderr.contains("unauthorized"));

    let config = centre.read_config();
    assert!(!config.contains("tok-stale"));
    assert!(config.contains("ops@example.com"));

    handle.join().expect("server thread should join");
}

#[test]
fn test_payments_ls_json() {
    let server = Server::http("127.0.0.1:0").expect("start mock server");
    let base = format!("http://{}", server.server_addr());

    let handle = thread::spawn(move || {
        let request = server.recv().expect("payments request expected");
        assert!(
            request
                .url()
                .starts_with("/pht/v1/api/bookings/action/list-payments?")
        );
        assert!(request.url().contains("limit=10"));
        request
            .respond(json_response(
                200,
                r#"{"status":"SUCCESS","data":{"payments":[
                    {"paymentId":901,"bookingId":"B17","amount":1499,"paymentStatus":"captured"}
                ],"totalItems":1}}"#,
            ))
            .expect("response should succeed");
    });

    let centre = CentreTest::new();
    centre.write_config(&format!(
        "api_base_url: {base}\npage_size: 10\nauth:\n  access_token: tok-1\n  email: ops@example.com\n"
    ));

    let output = centre.run_success(&["payments", "ls", "--json"]);
    let json: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(json["page_size"], 10);
    assert_eq!(json["total"], 1);
    assert_eq!(json["payments"][0]["paymentId"], "901");

    handle.join().expect("server thread should join");
}

#[test]
fn test_complete_asks_first_unless_yes() {
    let server = Server::http("127.0.0.1:0").expect("start mock server");
    let base = format!("http://{}", server.server_addr());

    let handle = thread::spawn(move || {
        let request = server.recv().expect("mark-complete request expected");
        assert_eq!(
            request.url(),
            "/pht/v1/api/bookings/action/mark-complete?booking_id=B17"
        );
        request
            .respond(json_response(200, r#"{"status":"SUCCESS","data":{}}"#))
            .expect("response should succeed");
    });

    let centre = CentreTest::new();
    centre.write_config(&format!(
        "api_base_url: {base}\nauth:\n  access_token: tok-1\n  email: ops@example.com\n"
    ));

    // No answer on stdin declines without touching the server
    let output = centre.run_success(&["bookings", "complete", "B17", "--json"]);
    let json: serde_json::Value = serde_json::from_str(
        output
            .find('{')
            .map(|start| &output[start..])
            .expect("json after the prompt"),
    )
    .unwrap();
    assert_eq!(json["performed"], false);

    let output = centre.run_success(&["bookings", "complete", "B17", "--yes", "--json"]);
    let json: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(json["performed"], true);
    assert_eq!(json["message"], "Marked as Completed successfully!");

    handle.join().expect("server thread should join");
}
