//! Minimal HTTP stub standing in for the campaign backend.

#![allow(dead_code)]

use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;

/// One request as the stub saw it.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    /// Path plus query string, e.g. `/api/logging?usuario=ana`.
    pub target: String,
    pub authorization: Option<String>,
}

/// Canned response: status code and JSON body.
pub type Reply = (u16, String);

pub struct StubServer {
    pub port: u16,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl StubServer {
    /// Serve every request with `route(method, target)` until the test exits.
    pub fn start<F>(route: F) -> Self
    where
        F: Fn(&str, &str) -> Reply + Send + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&requests);

        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(mut stream) = stream else { continue };
                let mut reader = BufReader::new(stream.try_clone().unwrap());

                let mut request_line = String::new();
                if reader.read_line(&mut request_line).is_err() {
                    continue;
                }
                let mut parts = request_line.split_whitespace();
                let method = parts.next().unwrap_or_default().to_string();
                let target = parts.next().unwrap_or_default().to_string();

                let mut authorization = None;
                loop {
                    let mut line = String::new();
                    if reader.read_line(&mut line).unwrap_or(0) == 0 {
                        break;
                    }
                    let line = line.trim_end();
                    if line.is_empty() {
                        break;
                    }
                    if let Some((name, value)) = line.split_once(':')
                        && name.eq_ignore_ascii_case("authorization")
                    {
                        authorization = Some(value.trim().to_string());
                    }
                }

                let (status, body) = route(&method, &target);
                seen.lock().unwrap().push(Recorded {
                    method,
                    target,
                    authorization,
                });

                let response = format!(
                    "HTTP/1.1 {status} Stub\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = stream.write_all(response.as_bytes());
                let _ = stream.flush();
            }
        });

        Self { port, requests }
    }

    /// Base URL to pass as `--api-url`.
    pub fn api_url(&self) -> String {
        format!("http://127.0.0.1:{}/api", self.port)
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }
}

/// `adtrail` pointed at `server`, isolated from the user's config and session.
pub fn adtrail(server: &StubServer, home: &std::path::Path) -> Command {
    let mut cmd = cargo_bin_cmd!("adtrail");
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env_remove("ADTRAIL_TOKEN")
        .env_remove("ADTRAIL_API_URL")
        .env_remove("ADTRAIL_LOG")
        .env("NO_COLOR", "1")
        .env("CLICOLOR", "0")
        .args(["--api-url", &server.api_url()]);
    cmd
}

/// Three logs for campaign 17 plus one login, newest first.
pub fn sample_logs() -> String {
    serde_json::json!([
        {
            "id": 4,
            "usuario": "ana",
            "rol": "Admin",
            "accion": "Archivar Campaña",
            "entidad": "Campaña",
            "entidadId": "17",
            "descripcion": "Campaña archivada",
            "timestamp": "2024-01-20T09:00:00"
        },
        {
            "id": 3,
            "usuario": "luis",
            "rol": "Trafficker",
            "accion": "Actualizar Métricas",
            "entidad": "Métricas",
            "entidadId": "17",
            "descripcion": "Reach, clicks",
            "detalles": "{\"campo\":\"Alcance\",\"antes\":1000,\"despues\":1250}",
            "timestamp": "2024-01-15T10:30:00"
        },
        {
            "id": 2,
            "usuario": "ana",
            "rol": "Admin",
            "accion": "Crear Campaña",
            "entidad": "Campaña",
            "entidadId": "17",
            "descripcion": "Nueva campaña, \"Verano\"",
            "timestamp": "2024-01-10T08:00:00"
        },
        {
            "id": 1,
            "usuario": "ana",
            "rol": "Admin",
            "accion": "Login",
            "entidad": "Sesión",
            "timestamp": null
        }
    ])
    .to_string()
}

/// Stub serving `sample_logs` on every GET and 200 on DELETE.
pub fn sample_server() -> StubServer {
    StubServer::start(|method, target| {
        if method == "DELETE" {
            return (200, String::new());
        }
        if target.starts_with("/api/logging/estadisticas") {
            return (200, sample_stats());
        }
        (200, sample_logs())
    })
}

pub fn sample_stats() -> String {
    serde_json::json!({
        "totalLogs": 4,
        "logsPorUsuario": {"ana": 3, "luis": 1},
        "logsPorAccion": {"Crear Campaña": 1, "Actualizar Métricas": 1, "Archivar Campaña": 1, "Login": 1},
        "logsPorEntidad": {"Campaña": 2, "Métricas": 1, "Sesión": 1},
        "actividadReciente": []
    })
    .to_string()
}
