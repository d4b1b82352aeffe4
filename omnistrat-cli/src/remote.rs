//! Synthesizer backed by an external strategy service over HTTP.
//!
//! Contract: `POST <endpoint>` with `{"idea": .., "businessModel": ..}`; the
//! response body is a report document in the export layout. Anything other
//! than a 2xx with a complete report is an error, so the wizard never sees a
//! partial report.

use anyhow::{Context, Result};
use omnistrat_core::{BusinessModel, StrategyReport, SynthesisError, Synthesizer};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct RemoteSynthesizer {
    endpoint: String,
    timeout: Duration,
    client: reqwest::Client,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StrategyRequest<'a> {
    idea: &'a str,
    business_model: BusinessModel,
}

impl RemoteSynthesizer {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("build http client")?;
        Ok(Self {
            endpoint: endpoint.into(),
            timeout,
            client,
        })
    }

    async fn request(&self, idea: &str, model: BusinessModel) -> Result<StrategyReport, SynthesisError> {
        debug!(endpoint = %self.endpoint, model = model.id(), "requesting strategy report");

        let resp = self
            .client
            .post(&self.endpoint)
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .json(&StrategyRequest {
                idea,
                business_model: model,
            })
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = resp.status();
        if !status.is_success() {
            let txt = resp.text().await.unwrap_or_default();
            return Err(SynthesisError::Backend(format!("{status} {}", txt.trim())));
        }

        let body = resp.text().await.map_err(|e| self.transport_error(e))?;
        let report: StrategyReport = serde_json::from_str(&body)
            .map_err(|e| SynthesisError::InvalidResponse(e.to_string()))?;

        let missing = report.missing_fields();
        if !missing.is_empty() {
            return Err(SynthesisError::Incomplete(
                missing.into_iter().map(String::from).collect(),
            ));
        }
        Ok(report)
    }

    fn transport_error(&self, e: reqwest::Error) -> SynthesisError {
        if e.is_timeout() {
            SynthesisError::Timeout {
                millis: self.timeout.as_millis() as u64,
            }
        } else {
            SynthesisError::Backend(e.to_string())
        }
    }
}

impl Synthesizer for RemoteSynthesizer {
    fn synthesize(&self, idea: &str, model: BusinessModel) -> Result<StrategyReport, SynthesisError> {
        // main runs under #[tokio::main]; a nested runtime would panic there.
        let result = if let Ok(handle) = tokio::runtime::Handle::try_current() {
            tokio::task::block_in_place(|| handle.block_on(self.request(idea, model)))
        } else {
            match tokio::runtime::Runtime::new() {
                Ok(rt) => rt.block_on(self.request(idea, model)),
                Err(e) => Err(SynthesisError::Backend(format!("create tokio runtime: {e}"))),
            }
        };

        if let Err(e) = &result {
            warn!(endpoint = %self.endpoint, error = %e, "remote synthesis failed");
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use omnistrat_core::{export, synthesize};
    use std::io::{BufRead, BufReader, Read, Write};
    use std::net::TcpListener;
    use std::sync::mpsc;
    use std::thread;

    /// One-shot HTTP server: answers a single request and hands back its body.
    fn serve_once(status: &'static str, body: String, delay: Duration) -> (String, mpsc::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream);

            let mut content_length = 0usize;
            loop {
                let mut line = String::new();
                reader.read_line(&mut line).unwrap();
                if line == "\r\n" || line.is_empty() {
                    break;
                }
                let lower = line.to_ascii_lowercase();
                if let Some(v) = lower.strip_prefix("content-length:") {
                    content_length = v.trim().parse().unwrap();
                }
            }
            let mut req_body = vec![0u8; content_length];
            reader.read_exact(&mut req_body).unwrap();
            let _ = tx.send(String::from_utf8(req_body).unwrap());

            thread::sleep(delay);
            let mut stream = reader.into_inner();
            let resp = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = stream.write_all(resp.as_bytes());
        });

        (format!("http://{addr}/strategy"), rx)
    }

    const IDEA: &str = "Remote team collaboration tool with async video messaging";

    #[test]
    fn test_returns_remote_report() {
        let expected = synthesize(IDEA, BusinessModel::B2B);
        let (url, rx) = serve_once("200 OK", export::to_document(&expected).unwrap(), Duration::ZERO);

        let remote = RemoteSynthesizer::new(url, Duration::from_secs(5)).unwrap();
        let report = remote.synthesize(IDEA, BusinessModel::B2B).unwrap();
        assert_eq!(report, expected);

        let sent: serde_json::Value = serde_json::from_str(&rx.recv().unwrap()).unwrap();
        assert_eq!(sent["idea"], IDEA);
        assert_eq!(sent["businessModel"], "b2b");
    }

    #[test]
    fn test_server_error_fails_closed() {
        let (url, _rx) = serve_once("503 Service Unavailable", "overloaded".into(), Duration::ZERO);
        let remote = RemoteSynthesizer::new(url, Duration::from_secs(5)).unwrap();
        let err = remote.synthesize(IDEA, BusinessModel::Consumer).unwrap_err();
        match err {
            SynthesisError::Backend(msg) => assert!(msg.contains("503"), "{msg}"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_garbage_body_is_invalid_response() {
        let (url, _rx) = serve_once("200 OK", "{\"vision\": 42}".into(), Duration::ZERO);
        let remote = RemoteSynthesizer::new(url, Duration::from_secs(5)).unwrap();
        let err = remote.synthesize(IDEA, BusinessModel::Consumer).unwrap_err();
        assert!(matches!(err, SynthesisError::InvalidResponse(_)));
    }

    #[test]
    fn test_partial_report_is_rejected() {
        let mut partial = synthesize(IDEA, BusinessModel::Platform);
        partial.go_to_market.pricing.clear();
        partial.go_to_market.channels.clear();
        let (url, _rx) = serve_once("200 OK", export::to_document(&partial).unwrap(), Duration::ZERO);

        let remote = RemoteSynthesizer::new(url, Duration::from_secs(5)).unwrap();
        let err = remote.synthesize(IDEA, BusinessModel::Platform).unwrap_err();
        assert_eq!(
            err,
            SynthesisError::Incomplete(vec!["gtm.pricing".into(), "gtm.channels".into()])
        );
    }

    #[test]
    fn test_slow_server_times_out() {
        let body = export::to_document(&synthesize(IDEA, BusinessModel::B2B)).unwrap();
        let (url, _rx) = serve_once("200 OK", body, Duration::from_millis(1500));
        let remote = RemoteSynthesizer::new(url, Duration::from_millis(200)).unwrap();
        let err = remote.synthesize(IDEA, BusinessModel::B2B).unwrap_err();
        assert_eq!(err, SynthesisError::Timeout { millis: 200 });
    }
}
