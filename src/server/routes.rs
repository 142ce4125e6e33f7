use crate::server::api;
use crate::session::Session;

pub struct HttpResponse {
    pub status_code: u16,
    pub status_text: &'static str,
    pub content_type: &'static str,
    pub body: String,
}

impl HttpResponse {
    pub fn to_http_string(&self) -> String {
        format!(
            "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            self.status_code,
            self.status_text,
            self.content_type,
            self.body.len(),
            self.body
        )
    }
}

pub fn route_request(session: &mut Session, method: &str, path: &str) -> HttpResponse {
    let (path, query) = match path.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (path, None),
    };

    match (method, path) {
        ("GET", "/api/health") => json_or_error(api::health_payload()),
        ("GET", "/api/state") => json_or_error(api::state_payload(session)),
        ("GET", "/api/logs") => {
            let kind = query.and_then(|query| query_param(query, "kind"));
            json_or_error(api::logs_payload(session, kind.as_deref()))
        }
        ("POST", path) if path.starts_with("/api/actions/train/") => {
            let key = path.trim_start_matches("/api/actions/train/");
            json_or_error(api::train_payload(session, key))
        }
        ("POST", "/api/actions/raid") => json_or_error(api::raid_payload(session)),
        ("POST", "/api/targets/recalibrate") => json_or_error(api::recalibrate_payload(session)),
        _ => error_response(404, "Not Found", "no such route"),
    }
}

fn query_param(query: &str, name: &str) -> Option<String> {
    query.split('&').find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        (key == name).then(|| value.to_string())
    })
}

fn json_or_error(payload: Result<String, serde_json::Error>) -> HttpResponse {
    match payload {
        Ok(body) => HttpResponse {
            status_code: 200,
            status_text: "OK",
            content_type: "application/json",
            body,
        },
        Err(err) => error_response(500, "Internal Server Error", &err.to_string()),
    }
}

fn error_response(status_code: u16, status_text: &'static str, message: &str) -> HttpResponse {
    let body = serde_json::json!({
        "status": "error",
        "message": message,
    });
    HttpResponse {
        status_code,
        status_text,
        content_type: "application/json",
        body: serde_json::to_string_pretty(&body)
            .unwrap_or_else(|_| r#"{"status":"error"}"#.to_string()),
    }
}
