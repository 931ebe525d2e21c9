#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::thread;
use tempfile::TempDir;

/// Isolated HOME (config + profile) and work directory for one test.
pub struct Sandbox {
    pub home: TempDir,
    pub work: TempDir,
}

impl Sandbox {
    pub fn new() -> Self {
        Self {
            home: tempfile::tempdir().expect("temp home"),
            work: tempfile::tempdir().expect("temp work dir"),
        }
    }

    pub fn work_path(&self, name: &str) -> PathBuf {
        self.work.path().join(name)
    }

    /// `rinvoicer --dir <work>` with HOME pointed at the sandbox and no
    /// Telegram credentials inherited from the environment.
    pub fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("rinvoicer");
        cmd.current_dir(self.work.path())
            .env("HOME", self.home.path())
            .env("APPDATA", self.home.path())
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG")
            .env_remove("TELEGRAM_BOT_TOKEN")
            .env_remove("TELEGRAM_CHAT_ID")
            .env_remove("TELEGRAM_API_BASE")
            .arg("--dir")
            .arg(self.work.path());
        cmd
    }

    /// Store a complete profile through the CLI.
    pub fn with_profile(&self, rate: &str) {
        self.cmd()
            .args([
                "profile",
                "--set-name",
                "Jane Doe",
                "--set-employee-id",
                "EMP-042",
                "--set-department",
                "AI Research",
                "--set-rate",
                rate,
            ])
            .assert()
            .success();
    }

    pub fn mark(&self, date: &str, status: &str) {
        self.cmd().args(["mark", date, status]).assert().success();
    }
}

/// Text of `word/document.xml` inside a generated DOCX.
pub fn docx_text(path: &Path) -> String {
    let file = std::fs::File::open(path).expect("open docx");
    let mut archive = zip::ZipArchive::new(file).expect("docx is a zip");
    let mut part = archive.by_name("word/document.xml").expect("document part");
    let mut xml = String::new();
    part.read_to_string(&mut xml).expect("utf-8 xml");
    xml
}

/// Minimal stand-in for the Telegram Bot API.
///
/// Answers 200 `{"ok":true}` to every call, except methods listed in
/// `failing`, which get 400. Request lines are recorded in arrival order.
pub struct TelegramStub {
    pub base: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl TelegramStub {
    pub fn start(failing: &[&'static str]) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub");
        let base = format!("http://{}", listener.local_addr().expect("addr"));
        let requests = Arc::new(Mutex::new(Vec::new()));
        let failing: Vec<&'static str> = failing.to_vec();

        let seen = Arc::clone(&requests);
        thread::spawn(move || {
            for stream in listener.incoming().flatten() {
                let _ = serve(stream, &failing, &seen);
            }
        });

        Self { base, requests }
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().expect("requests lock").clone()
    }

    pub fn count(&self, method: &str) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.ends_with(&format!("/{method}")))
            .count()
    }

    /// Sandbox command wired to this stub with dummy credentials.
    pub fn cmd(&self, sb: &Sandbox) -> Command {
        let mut cmd = sb.cmd();
        cmd.env("TELEGRAM_BOT_TOKEN", "123:TEST")
            .env("TELEGRAM_CHAT_ID", "42")
            .env("TELEGRAM_API_BASE", &self.base);
        for var in ["HTTP_PROXY", "http_proxy", "HTTPS_PROXY", "https_proxy", "ALL_PROXY", "all_proxy"] {
            cmd.env_remove(var);
        }
        cmd
    }
}

fn serve(stream: TcpStream, failing: &[&str], seen: &Mutex<Vec<String>>) -> Option<()> {
    let mut reader = BufReader::new(stream.try_clone().ok()?);

    let mut request_line = String::new();
    reader.read_line(&mut request_line).ok()?;
    let mut parts = request_line.split_whitespace();
    let method = parts.next()?.to_string();
    let path = parts.next()?.to_string();

    let mut content_length = 0usize;
    let mut chunked = false;
    loop {
        let mut header = String::new();
        if reader.read_line(&mut header).ok()? == 0 {
            break;
        }
        let header = header.trim_end();
        if header.is_empty() {
            break;
        }
        if let Some((name, value)) = header.split_once(':') {
            let name = name.trim().to_ascii_lowercase();
            let value = value.trim();
            if name == "content-length" {
                content_length = value.parse().unwrap_or(0);
            } else if name == "transfer-encoding" && value.eq_ignore_ascii_case("chunked") {
                chunked = true;
            }
        }
    }

    if chunked {
        let mut body = Vec::new();
        let mut byte = [0u8; 1];
        while !body.ends_with(b"\r\n0\r\n\r\n") && !body.starts_with(b"0\r\n\r\n") {
            if reader.read(&mut byte).ok()? == 0 {
                break;
            }
            body.push(byte[0]);
        }
    } else {
        let mut body = vec![0u8; content_length];
        reader.read_exact(&mut body).ok()?;
    }

    // record before answering
    seen.lock().ok()?.push(format!("{method} {path}"));

    let api_method = path.rsplit('/').next().unwrap_or_default();
    let (status, body) = if failing.contains(&api_method) {
        ("400 Bad Request", r#"{"ok":false,"description":"Bad Request: chat not found"}"#)
    } else {
        ("200 OK", r#"{"ok":true,"result":{}}"#)
    };

    let mut stream = stream;
    let response = format!(
        "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    stream.write_all(response.as_bytes()).ok()?;
    stream.flush().ok()?;
    Some(())
}
