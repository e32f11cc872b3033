//! Submission of circuits to a remote statevector simulation service.
//!
//! The service exposes two routes relative to a base URL:
//! - `POST /simulate` takes `{"circuit": [gate, ...]}` and answers with
//!   `{"statevector": ["...", ...]}` (or, for circuits it refuses,
//!   `{"error": "..."}`).
//! - `GET /` answers with a `{"message": "..."}` greeting.
//!
//! [`SimulationClient::submit`] makes exactly one attempt per call, with no
//! retry and, unless configured otherwise, no timeout. Every failure folds
//! into [`Outcome::Failed`]; the detail is only logged.
//!
//! # Example
//!
//! ```no_run
//! use qcircuit_form::{
//!     circuit::Circuit,
//!     client::{ ClientConfig, SimulationClient },
//!     gate::Gate,
//! };
//!
//! let client = SimulationClient::new(ClientConfig::default())?;
//! let circuit: Circuit = [Gate::h(0), Gate::cnot(0, 1)].into_iter().collect();
//! for line in client.submit(&circuit).lines() {
//!     println!("{}", line);
//! }
//! # Ok::<(), qcircuit_form::client::ClientError>(())
//! ```

use std::time::Duration;
use serde::{ Deserialize, Serialize };
use thiserror::Error;
use crate::{
    circuit::Circuit,
    gate::Gate,
    outcome::Outcome,
};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("failed to build HTTP client: {0}")]
    Build(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("service answered with non-success status {0}")]
    Status(u16),

    #[error("failed to encode request: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("malformed response body: {0}")]
    Malformed(#[source] serde_json::Error),

    #[error("response body is not a JSON object")]
    NotAnObject,

    #[error("response is missing the '{0}' field")]
    MissingField(&'static str),
}
pub type ClientResult<T> = Result<T, ClientError>;
use ClientError::*;

/// Where and how to reach the simulation service.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Service root (default: `http://localhost:8000`). Both `http://` and
    /// `https://` (rustls) roots are supported.
    pub base_url: String,

    /// Route of the simulation endpoint, relative to `base_url` (default:
    /// `/simulate`).
    pub simulate_path: String,

    /// Request timeout in seconds; `None` waits indefinitely.
    pub request_timeout_seconds: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            simulate_path: "/simulate".to_string(),
            request_timeout_seconds: None,
        }
    }
}

impl ClientConfig {
    /// Set the service root.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the route of the simulation endpoint.
    pub fn with_simulate_path(mut self, path: impl Into<String>) -> Self {
        self.simulate_path = path.into();
        self
    }

    /// Set a request timeout.
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.request_timeout_seconds = Some(seconds);
        self
    }

    /// Return the request timeout, if any.
    pub fn timeout(&self) -> Option<Duration> {
        self.request_timeout_seconds.map(Duration::from_secs)
    }

    fn join(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/'),
        )
    }

    /// Return the full URL of the simulation endpoint.
    pub fn simulate_url(&self) -> String { self.join(&self.simulate_path) }

    /// Return the full URL of the service root.
    pub fn root_url(&self) -> String { self.join("") }
}

/// Status and body of an HTTP response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl RawResponse {
    /// Return `true` if the status is in the 2xx range.
    pub fn is_success(&self) -> bool { (200..300).contains(&self.status) }
}

/// Carries requests to the service.
///
/// Implementations report only transport-level failures as errors; any
/// status code that was actually received is returned in the
/// [`RawResponse`].
pub trait Transport {
    /// POST a JSON body.
    fn post_json(&self, url: &str, body: Vec<u8>) -> ClientResult<RawResponse>;

    /// GET a resource.
    fn get(&self, url: &str) -> ClientResult<RawResponse>;
}

/// [`Transport`] over HTTP, backed by a blocking `reqwest` client.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    /// Create a new transport honoring the configured timeout.
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client =
            reqwest::blocking::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| Build(e.to_string()))?;
        Ok(Self { client })
    }

    fn finish(response: reqwest::blocking::Response)
        -> ClientResult<RawResponse>
    {
        let status = response.status().as_u16();
        let body =
            response.bytes()
            .map_err(|e| Network(e.to_string()))?
            .to_vec();
        Ok(RawResponse { status, body })
    }
}

impl Transport for HttpTransport {
    fn post_json(&self, url: &str, body: Vec<u8>) -> ClientResult<RawResponse> {
        let response =
            self.client.post(url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .map_err(|e| Network(e.to_string()))?;
        Self::finish(response)
    }

    fn get(&self, url: &str) -> ClientResult<RawResponse> {
        let response =
            self.client.get(url)
            .send()
            .map_err(|e| Network(e.to_string()))?;
        Self::finish(response)
    }
}

#[derive(Serialize)]
struct SimulateRequest<'a> {
    circuit: &'a [Gate],
}

#[derive(Deserialize)]
struct SimulateResponse {
    #[serde(default)]
    statevector: Option<Vec<String>>,
    // only ever logged; its shape must not affect the outcome
    #[serde(default)]
    error: Option<serde_json::Value>,
}

#[derive(Deserialize)]
struct RootResponse {
    #[serde(default)]
    message: Option<String>,
}

// parse a body that must be a single JSON object
fn parse_object<T>(body: &[u8]) -> ClientResult<T>
where T: serde::de::DeserializeOwned
{
    let value: serde_json::Value =
        serde_json::from_slice(body).map_err(Malformed)?;
    if !value.is_object() {
        return Err(NotAnObject);
    }
    serde_json::from_value(value).map_err(Malformed)
}

/// Sends circuits to the simulation service over a [`Transport`].
#[derive(Clone, Debug)]
pub struct SimulationClient<T = HttpTransport> {
    config: ClientConfig,
    transport: T,
}

impl SimulationClient<HttpTransport> {
    /// Create a new client speaking HTTP.
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self { config, transport })
    }
}

impl<T> SimulationClient<T>
where T: Transport
{
    /// Create a new client over an arbitrary transport.
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self { config, transport }
    }

    /// Return a reference to the configuration.
    pub fn config(&self) -> &ClientConfig { &self.config }

    /// Return a reference to the transport.
    pub fn transport(&self) -> &T { &self.transport }

    /// Submit a circuit and return its displayable outcome.
    ///
    /// This never fails: network errors, non-success statuses and
    /// unparseable bodies all yield [`Outcome::Failed`].
    pub fn submit(&self, circuit: &Circuit) -> Outcome {
        match self.try_submit(circuit) {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::warn!(error = %err, "simulation request failed");
                Outcome::Failed
            },
        }
    }

    /// Submit a circuit, keeping the reason for any failure.
    ///
    /// A successful response without a usable statevector is not an error;
    /// it yields [`Outcome::NoStatevector`].
    pub fn try_submit(&self, circuit: &Circuit) -> ClientResult<Outcome> {
        let url = self.config.simulate_url();
        let body =
            serde_json::to_vec(&SimulateRequest { circuit: circuit.snapshot() })
            .map_err(Encode)?;
        tracing::info!(%url, gates = circuit.len(), "submitting circuit");
        let response = self.transport.post_json(&url, body)?;
        if !response.is_success() {
            return Err(Status(response.status));
        }
        let SimulateResponse { statevector, error }
            = parse_object(&response.body)?;
        match error {
            Some(serde_json::Value::String(msg)) =>
                tracing::warn!(error = %msg, "simulation service reported an error"),
            Some(serde_json::Value::Null) | None => { },
            Some(other) =>
                tracing::warn!(error = %other, "simulation service reported an error"),
        }
        let outcome =
            statevector.map(Outcome::from_statevector)
            .unwrap_or(Outcome::NoStatevector);
        tracing::debug!(?outcome, "simulation finished");
        Ok(outcome)
    }

    /// Fetch the service's greeting, confirming that it is reachable.
    pub fn ping(&self) -> ClientResult<String> {
        let response = self.transport.get(&self.config.root_url())?;
        if !response.is_success() {
            return Err(Status(response.status));
        }
        let RootResponse { message } = parse_object(&response.body)?;
        message.ok_or(MissingField("message"))
    }
}

#[cfg(test)]
mod test {
    use std::cell::RefCell;
    use super::*;

    // answers every request with a fixed response, recording what was sent
    struct Canned {
        answer: Result<RawResponse, String>,
        sent: RefCell<Vec<(String, Vec<u8>)>>,
    }

    impl Canned {
        fn ok(status: u16, body: &str) -> Self {
            Self {
                answer: Ok(RawResponse { status, body: body.as_bytes().to_vec() }),
                sent: RefCell::new(Vec::new()),
            }
        }

        fn unreachable() -> Self {
            Self {
                answer: Err("connection refused".to_string()),
                sent: RefCell::new(Vec::new()),
            }
        }

        fn respond(&self) -> ClientResult<RawResponse> {
            self.answer.clone().map_err(Network)
        }
    }

    impl Transport for Canned {
        fn post_json(&self, url: &str, body: Vec<u8>) -> ClientResult<RawResponse> {
            self.sent.borrow_mut().push((url.to_string(), body));
            self.respond()
        }

        fn get(&self, url: &str) -> ClientResult<RawResponse> {
            self.sent.borrow_mut().push((url.to_string(), Vec::new()));
            self.respond()
        }
    }

    fn client(transport: Canned) -> SimulationClient<Canned> {
        SimulationClient::with_transport(ClientConfig::default(), transport)
    }

    fn bell() -> Circuit {
        [Gate::h(0), Gate::cnot(0, 1)].into_iter().collect()
    }

    #[test]
    fn config_urls() {
        let config = ClientConfig::default();
        assert_eq!(config.simulate_url(), "http://localhost:8000/simulate");
        assert_eq!(config.root_url(), "http://localhost:8000/");
        assert_eq!(config.timeout(), None);
        let config =
            ClientConfig::default()
            .with_base_url("http://sim.local:9000/")
            .with_simulate_path("run")
            .with_timeout(5);
        assert_eq!(config.simulate_url(), "http://sim.local:9000/run");
        assert_eq!(config.timeout(), Some(Duration::from_secs(5)));
        let config = ClientConfig::default().with_base_url("https://sim.example.org");
        assert_eq!(config.simulate_url(), "https://sim.example.org/simulate");
        assert!(HttpTransport::new(&config).is_ok());
    }

    #[test]
    fn config_deserialize() {
        let config: ClientConfig =
            serde_json::from_str(r#"{"base_url":"http://10.0.0.2:8000"}"#)
            .unwrap();
        assert_eq!(config.base_url, "http://10.0.0.2:8000");
        assert_eq!(config.simulate_path, "/simulate");
        assert_eq!(config.request_timeout_seconds, None);
    }

    #[test]
    fn request_shape() {
        let client = client(Canned::ok(200, r#"{"statevector":["1|0>"]}"#));
        client.submit(&bell());
        let sent = client.transport().sent.borrow();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "http://localhost:8000/simulate");
        let body: serde_json::Value = serde_json::from_slice(&sent[0].1).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "circuit": [
                    { "gate": "H", "qubit": 0 },
                    { "gate": "CNOT", "control": 0, "target": 1 },
                ]
            }),
        );
    }

    #[test]
    fn statevector() {
        let expected =
            Outcome::Statevector(vec!["0.71|00>".into(), "0.71|11>".into()]);
        for body in [
            r#"{"statevector":["0.71|00>","0.71|11>"]}"#,
            r#"{"statevector":["0.71|00>","0.71|11>"],"error":{"code":1}}"#,
            r#"{"statevector":["0.71|00>","0.71|11>"],"error":"late warning"}"#,
            r#"{"statevector":["0.71|00>","0.71|11>"],"error":null,"message":7}"#,
        ] {
            let outcome = client(Canned::ok(200, body)).submit(&bell());
            assert!(outcome.is_statevector(), "{}", body);
            assert!(!outcome.is_failed(), "{}", body);
            assert_eq!(outcome, expected, "{}", body);
        }
    }

    #[test]
    fn no_statevector() {
        for body in [
            "{}",
            r#"{"statevector":null}"#,
            r#"{"statevector":[]}"#,
            r#"{"error":"Qubit index 4 out of range."}"#,
        ] {
            let client = client(Canned::ok(200, body));
            assert_eq!(client.submit(&bell()), Outcome::NoStatevector, "{}", body);
        }
    }

    #[test]
    fn failures() {
        let cases = [
            Canned::unreachable(),
            Canned::ok(500, r#"{"statevector":["1|0>"]}"#),
            Canned::ok(404, "not found"),
            Canned::ok(200, "not json"),
            Canned::ok(200, r#"["1|0>"]"#),
            Canned::ok(200, r#"{"statevector":[0.5, 0.5]}"#),
            Canned::ok(200, r#"{"statevector":"1|0>"}"#),
        ];
        for transport in cases {
            let outcome = client(transport).submit(&bell());
            assert!(outcome.is_failed());
            assert_eq!(outcome, Outcome::Failed);
        }
    }

    #[test]
    fn failure_detail() {
        assert!(matches!(
            client(Canned::unreachable()).try_submit(&bell()),
            Err(Network(_)),
        ));
        assert!(matches!(
            client(Canned::ok(503, "")).try_submit(&bell()),
            Err(Status(503)),
        ));
        assert!(matches!(
            client(Canned::ok(200, "{")).try_submit(&bell()),
            Err(Malformed(_)),
        ));
        assert!(matches!(
            client(Canned::ok(200, "42")).try_submit(&bell()),
            Err(NotAnObject),
        ));
    }

    #[test]
    fn ping() {
        let client =
            client(Canned::ok(200, r#"{"message":"Welcome to the Quantum Circuit Simulator!"}"#));
        assert_eq!(
            client.ping().unwrap(),
            "Welcome to the Quantum Circuit Simulator!",
        );
        assert_eq!(client.transport().sent.borrow()[0].0, "http://localhost:8000/");
        assert!(matches!(
            self::client(Canned::ok(200, "{}")).ping(),
            Err(MissingField("message")),
        ));
    }
}
