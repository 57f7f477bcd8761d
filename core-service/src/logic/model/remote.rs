//! Remote Classifier - prediction step behind an HTTP service boundary
//!
//! Contract: `POST url` with `{"features": [...], "feature_names": [...]}`,
//! answered by `{"label": <integer>}`. Calls are blocking; the web layer runs
//! them on a blocking worker.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_REMOTE_TIMEOUT_MS;
use crate::logic::features::{FeatureVector, FEATURE_LAYOUT};
use super::classifier::Classifier;
use super::error::PipelineError;

fn default_timeout_ms() -> u64 {
    DEFAULT_REMOTE_TIMEOUT_MS
}

/// Remote service reference from the model artifact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteSpec {
    pub url: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl RemoteSpec {
    pub fn check(&self) -> Result<(), String> {
        if !(self.url.starts_with("http://") || self.url.starts_with("https://")) {
            return Err(format!("remote url must be http(s), got {:?}", self.url));
        }
        if self.timeout_ms == 0 {
            return Err("timeout_ms must be positive".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct RemoteRequest<'a> {
    features: &'a [f64],
    feature_names: &'a [&'static str],
}

#[derive(Debug, Deserialize)]
struct RemoteResponse {
    label: i64,
}

#[derive(Debug)]
pub struct RemoteClassifier {
    spec: RemoteSpec,
    agent: ureq::Agent,
}

impl RemoteClassifier {
    pub fn new(spec: RemoteSpec) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_millis(spec.timeout_ms))
            .build();

        Self { spec, agent }
    }
}

impl Classifier for RemoteClassifier {
    fn predict(&self, vector: &FeatureVector) -> Result<i64, PipelineError> {
        let request = RemoteRequest {
            features: vector.as_slice(),
            feature_names: FEATURE_LAYOUT,
        };

        let response = self
            .agent
            .post(&self.spec.url)
            .send_json(&request)
            .map_err(|e| match e {
                ureq::Error::Status(code, response) => {
                    let body = response.into_string().unwrap_or_default();
                    PipelineError::Remote(format!("service answered {}: {}", code, body.trim()))
                }
                ureq::Error::Transport(transport) => PipelineError::Remote(transport.to_string()),
            })?;

        let body: RemoteResponse = response
            .into_json()
            .map_err(|e| PipelineError::Remote(format!("malformed response: {}", e)))?;

        log::debug!("Remote classifier {} answered label {}", self.spec.url, body.label);
        Ok(body.label)
    }

    fn name(&self) -> &'static str {
        "remote"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader, Read, Write};
    use std::net::TcpListener;
    use std::thread;

    /// Answer a single request and hand back the request body
    fn serve_once(status: &'static str, body: &'static str) -> (String, thread::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/predict", listener.local_addr().unwrap());

        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());

            let mut content_length = 0usize;
            loop {
                let mut line = String::new();
                reader.read_line(&mut line).unwrap();
                if line == "\r\n" || line.is_empty() {
                    break;
                }
                let lower = line.to_ascii_lowercase();
                if let Some(value) = lower.strip_prefix("content-length:") {
                    content_length = value.trim().parse().unwrap();
                }
            }
            let mut request_body = vec![0u8; content_length];
            reader.read_exact(&mut request_body).unwrap();

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).unwrap();
            String::from_utf8(request_body).unwrap()
        });

        (url, handle)
    }

    fn classifier(url: String) -> RemoteClassifier {
        RemoteClassifier::new(RemoteSpec { url, timeout_ms: 2_000 })
    }

    #[test]
    fn test_remote_predict() {
        let (url, server) = serve_once("200 OK", r#"{"label": 1}"#);
        let mut values = [0.0; 13];
        values[0] = 61.0;

        let label = classifier(url).predict(&FeatureVector::from(values)).unwrap();
        assert_eq!(label, 1);

        let sent: serde_json::Value = serde_json::from_str(&server.join().unwrap()).unwrap();
        assert_eq!(sent["features"][0], 61.0);
        assert_eq!(sent["features"].as_array().unwrap().len(), 13);
        assert_eq!(sent["feature_names"][12], "thal");
    }

    #[test]
    fn test_remote_error_status() {
        let (url, server) = serve_once("503 Service Unavailable", r#"{"error": "warming up"}"#);

        let err = classifier(url).predict(&FeatureVector::new()).unwrap_err();
        server.join().unwrap();

        match err {
            PipelineError::Remote(message) => assert!(message.contains("503")),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_remote_malformed_body() {
        let (url, server) = serve_once("200 OK", r#"{"prediction": "yes"}"#);

        let err = classifier(url).predict(&FeatureVector::new()).unwrap_err();
        server.join().unwrap();

        assert!(matches!(err, PipelineError::Remote(m) if m.contains("malformed")));
    }

    #[test]
    fn test_remote_unreachable() {
        let addr = TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap();
        let err = classifier(format!("http://{}/predict", addr))
            .predict(&FeatureVector::new())
            .unwrap_err();

        assert!(matches!(err, PipelineError::Remote(_)));
    }

    #[test]
    fn test_remote_settings_check() {
        let ok = RemoteSpec { url: "http://localhost:9000/predict".into(), timeout_ms: 100 };
        assert!(ok.check().is_ok());

        let bad_scheme = RemoteSpec { url: "ftp://host".into(), timeout_ms: 100 };
        assert!(bad_scheme.check().is_err());

        let no_timeout = RemoteSpec { timeout_ms: 0, ..ok };
        assert!(no_timeout.check().is_err());
    }
}
