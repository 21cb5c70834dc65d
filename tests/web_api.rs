use intransparency::core::ConfigManager;
use intransparency::web::build_rocket;
use rocket::http::{ContentType, Status};
use rocket::local::blocking::Client;
use serde_json::Value;

const TEST_CONFIG: &str = r#"
local:
  server:
    port: 0
  service:
    search_url: "http://127.0.0.1:1"
    timeout_seconds: 2
    default_page_size: 20
    max_page_size: 50
"#;

fn client() -> Client {
    let config = ConfigManager::from_yaml_str(TEST_CONFIG, "local").expect("valid test config");
    let rocket = build_rocket(&config).expect("rocket builds");
    Client::tracked(rocket).expect("valid rocket instance")
}

fn post_json(client: &Client, path: &str, body: &str) -> (Status, Value) {
    let response = client
        .post(path)
        .header(ContentType::JSON)
        .body(body)
        .dispatch();
    let status = response.status();
    let json = response.into_json::<Value>().expect("JSON body");
    (status, json)
}

#[test]
fn health_returns_ok_envelope() {
    let client = client();
    let response = client.get("/api/health").dispatch();
    assert_eq!(response.status(), Status::Ok);
    assert_eq!(
        response.headers().get_one("Access-Control-Allow-Origin"),
        Some("*")
    );

    let json = response.into_json::<Value>().unwrap();
    assert_eq!(json["type"], "text");
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "OK");
}

#[test]
fn criteria_endpoint_extracts_and_projects() {
    let client = client();
    let (status, json) = post_json(
        &client,
        "/api/search/criteria",
        r#"{"query": "I need Data Science students from Politecnico di Milano, available immediately", "page": 2, "limit": 500, "conversation_id": "conv-42"}"#,
    );

    assert_eq!(status, Status::Ok);
    assert_eq!(json["success"], true);
    assert_eq!(json["type"], "data");
    assert_eq!(json["conversation_id"], "conv-42");

    let criteria = &json["data"]["criteria"];
    assert_eq!(
        criteria["universities"],
        serde_json::json!(["Politecnico di Milano", "Politecnico di Torino"])
    );
    assert_eq!(criteria["availability"], "Available immediately");
    assert_eq!(criteria["location"], "Milan");

    let params = json["data"]["params"].as_array().unwrap();
    let find = |name: &str| {
        params
            .iter()
            .find(|p| p["name"] == name)
            .map(|p| p["value"].as_str().unwrap().to_string())
    };
    assert_eq!(find("university").as_deref(), Some("Politecnico di Milano"));
    assert_eq!(find("major").as_deref(), Some("data science"));
    assert_eq!(find("page").as_deref(), Some("2"));
    assert_eq!(find("limit").as_deref(), Some("50"));
}

#[test]
fn criteria_endpoint_accepts_empty_query() {
    let client = client();
    let (status, json) = post_json(&client, "/api/search/criteria", r#"{"query": ""}"#);

    assert_eq!(status, Status::Ok);
    assert_eq!(json["data"]["criteria"]["search"], "");
    assert_eq!(json["data"]["criteria"]["skills"], serde_json::json!([]));
    assert!(json.get("conversation_id").is_none());
}

#[test]
fn criteria_endpoint_rejects_malformed_body() {
    let client = client();
    let response = client
        .post("/api/search/criteria")
        .header(ContentType::JSON)
        .body(r#"{"q": 1}"#)
        .dispatch();

    assert!(response.status().code >= 400);
    let json = response.into_json::<Value>().unwrap();
    assert_eq!(json["success"], false);
}

#[test]
fn candidates_endpoint_reports_unreachable_service() {
    let client = client();
    let (status, json) = post_json(
        &client,
        "/api/search/candidates",
        r#"{"query": "python students", "conversation_id": "c1"}"#,
    );

    assert_eq!(status, Status::Ok);
    assert_eq!(json["success"], false);
    assert_eq!(json["type"], "error");
    assert_eq!(json["error_code"], "SEARCH_SERVICE_ERROR");
    assert_eq!(json["conversation_id"], "c1");
}

#[test]
fn examples_endpoint_lists_queries() {
    let client = client();
    let response = client.get("/api/search/examples").dispatch();
    let json = response.into_json::<Value>().unwrap();
    let examples = json["data"]["examples"].as_array().unwrap();
    assert!(!examples.is_empty());
    assert!(examples
        .iter()
        .any(|q| q.as_str().unwrap().contains("Politecnico di Milano")));
}

#[test]
fn import_endpoint_returns_report() {
    let client = client();
    let body = serde_json::json!({
        "csv": "first_name,last_name,email,graduation_year\nGiulia,Rossi,giulia@polimi.it,2025\nMarco,,marco@polimi.it,2025\n",
        "university": "Politecnico di Milano"
    });
    let (status, json) = post_json(&client, "/api/students/import", &body.to_string());

    assert_eq!(status, Status::Ok);
    assert_eq!(json["success"], true);
    let report = &json["data"];
    assert_eq!(report["totalRows"], 2);
    assert_eq!(report["students"][0]["maskedEmail"], "g***@polimi.it");
    assert_eq!(report["students"][0]["graduationYear"], 2025);
    assert_eq!(report["errors"][0]["line"], 3);
    assert_eq!(report["errors"][0]["message"], "Missing last name");
    assert!(report["batchId"].is_string());
}

#[test]
fn import_endpoint_rejects_missing_columns() {
    let client = client();
    let body = serde_json::json!({ "csv": "name,email\nGiulia,giulia@polimi.it\n" });
    let (_, json) = post_json(&client, "/api/students/import", &body.to_string());

    assert_eq!(json["success"], false);
    assert_eq!(json["error_code"], "IMPORT_ERROR");
}

#[test]
fn unknown_route_uses_json_catcher() {
    let client = client();
    let response = client.get("/api/does-not-exist").dispatch();
    assert_eq!(response.status(), Status::NotFound);
    let json = response.into_json::<Value>().unwrap();
    assert_eq!(json["error_code"], "NOT_FOUND");
}

#[test]
fn options_preflight_is_accepted() {
    let client = client();
    let response = client.options("/api/search/criteria").dispatch();
    assert_eq!(response.status(), Status::Ok);
}
