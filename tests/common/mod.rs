//! Common test utilities for integration tests

use kaggle_connector::downloader::DatasetProvider;
use kaggle_connector::errors::{AppError, AppResult};
use kaggle_connector::Credentials;
use std::fs;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::thread::{self, JoinHandle};

/// Online Retail style rows with characters outside ASCII
#[allow(dead_code)]
pub const RETAIL_CSV: &str = "InvoiceNo,StockCode,Description,Quantity,Country\n\
536365,85123A,CAFÉ MUG,6,France\n\
536366,22633,HAND WARMER £,2,United Kingdom\n\
C536379,D,Discount,-1,España\n";

/// NBA players style rows
#[allow(dead_code)]
pub const PLAYERS_CSV: &str = "PERSON_ID,PLAYER_LAST_NAME,PLAYER_FIRST_NAME,TEAM_ABBREVIATION\n\
1630173,Achiuwa,Precious,TOR\n\
203500,Adams,Steven,MEM\n";

/// Encodes text as ISO-8859-1. Panics on characters above U+00FF.
#[allow(dead_code)]
pub fn latin1(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| u8::try_from(u32::from(c)).expect("character fits in ISO-8859-1"))
        .collect()
}

/// Builds an in-memory ZIP archive with the given entries
#[allow(dead_code)]
pub fn zip_bytes(files: &[(&str, &[u8])]) -> Vec<u8> {
    use zip::write::FileOptions;
    use zip::ZipWriter;

    let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));
    let options = FileOptions::default().compression_method(zip::CompressionMethod::Stored);
    for (name, content) in files {
        zip.start_file(*name, options).unwrap();
        zip.write_all(content).unwrap();
    }
    zip.finish().unwrap().into_inner()
}

/// Helper function to create a test ZIP file with specified files
#[allow(dead_code)]
pub fn create_test_zip(zip_path: &Path, files: &[(&str, &[u8])]) {
    if let Some(parent) = zip_path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(zip_path, zip_bytes(files)).unwrap();
}

/// Writes a secrets file and returns its path
#[allow(dead_code)]
pub fn write_env_file(dir: &Path, contents: &str) -> PathBuf {
    let path = dir.join(".env");
    fs::write(&path, contents).unwrap();
    path
}

#[allow(dead_code)]
pub fn test_credentials() -> Credentials {
    Credentials::new("alice", "s3cret").unwrap()
}

/// Serves exactly one HTTP response on a local port.
///
/// Returns the API base URL and a handle yielding the raw request head.
#[allow(dead_code)]
pub fn serve_once(status: &str, body: Vec<u8>) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let status = status.to_string();

    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = stream.read(&mut buf).unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }

        let head = format!(
            "HTTP/1.1 {status}\r\nContent-Length: {}\r\nContent-Type: application/zip\r\nConnection: close\r\n\r\n",
            body.len()
        );
        stream.write_all(head.as_bytes()).unwrap();
        stream.write_all(&body).unwrap();
        stream.flush().unwrap();

        String::from_utf8_lossy(&request).into_owned()
    });

    (format!("http://{addr}/api/v1"), handle)
}

/// One recorded `download` call
#[allow(dead_code)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadCall {
    pub dataset: String,
    pub path: Option<PathBuf>,
    pub unzip: bool,
}

/// Provider that records calls and writes fixture files instead of
/// touching the network.
#[allow(dead_code)]
#[derive(Default)]
pub struct MockProvider {
    /// Files written into the destination on every download
    pub files: Vec<(String, Vec<u8>)>,
    /// Error message returned by `download` when set
    pub fail_with: Option<String>,
    pub authenticated: Mutex<u32>,
    pub calls: Mutex<Vec<DownloadCall>>,
}

#[allow(dead_code)]
impl MockProvider {
    pub fn with_files(files: &[(&str, Vec<u8>)]) -> Self {
        Self {
            files: files
                .iter()
                .map(|(name, content)| (name.to_string(), content.clone()))
                .collect(),
            ..Self::default()
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            fail_with: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<DownloadCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn auth_count(&self) -> u32 {
        *self.authenticated.lock().unwrap()
    }
}

impl DatasetProvider for MockProvider {
    async fn authenticate(&self, _credentials: &Credentials) -> AppResult<()> {
        *self.authenticated.lock().unwrap() += 1;
        Ok(())
    }

    async fn download(
        &self,
        _credentials: &Credentials,
        dataset: &str,
        path: Option<&Path>,
        unzip: bool,
    ) -> AppResult<()> {
        self.calls.lock().unwrap().push(DownloadCall {
            dataset: dataset.to_string(),
            path: path.map(Path::to_path_buf),
            unzip,
        });

        if let Some(msg) = &self.fail_with {
            return Err(AppError::NetworkError(msg.clone()));
        }

        if let Some(dest) = path {
            fs::create_dir_all(dest)?;
            for (name, content) in &self.files {
                fs::write(dest.join(name), content)?;
            }
        }
        Ok(())
    }
}
