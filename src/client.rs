use crate::domain::constants::MULTIPART_FIELD;
use crate::error::{MalpediaError, Result};
use reqwest::blocking::{multipart, Client, RequestBuilder};
use reqwest::header::AUTHORIZATION;
use reqwest::{StatusCode, Url};
use std::fmt;
use tracing::debug;

/// Relative API paths. Operands are kept as separate segments so they are
/// percent-encoded when the URL is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    SampleRaw(String),
    Version,
    Actors,
    Actor(String),
    YaraZip(String),
    FindActor(String),
    Families,
    Family(String),
    FindFamily(String),
    FamilySamples(String),
    ScanBinary,
    ScanYara,
    ScanYaraFamily(String),
}

impl Endpoint {
    pub fn segments(&self) -> Vec<&str> {
        match self {
            Endpoint::SampleRaw(h) => vec!["get", "sample", h.as_str(), "raw"],
            Endpoint::Version => vec!["get", "version"],
            Endpoint::Actors => vec!["list", "actors"],
            Endpoint::Actor(n) => vec!["get", "actor", n.as_str()],
            Endpoint::YaraZip(s) => vec!["get", "yara", s.as_str(), "zip"],
            Endpoint::FindActor(q) => vec!["find", "actor", q.as_str()],
            Endpoint::Families => vec!["get", "families"],
            Endpoint::Family(n) => vec!["get", "family", n.as_str()],
            Endpoint::FindFamily(q) => vec!["find", "family", q.as_str()],
            Endpoint::FamilySamples(n) => vec!["list", "samples", n.as_str()],
            Endpoint::ScanBinary => vec!["scan", "binary"],
            Endpoint::ScanYara => vec!["scan", "yara"],
            Endpoint::ScanYaraFamily(n) => vec!["scan", "yara", n.as_str()],
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", self.segments().join("/"))
    }
}

/// The request surface the services depend on.
pub trait Transport {
    fn get(&self, endpoint: &Endpoint) -> Result<Vec<u8>>;

    fn post_multipart(&self, endpoint: &Endpoint, file_name: &str, body: Vec<u8>)
        -> Result<Vec<u8>>;

    fn post_raw(&self, endpoint: &Endpoint, body: Vec<u8>) -> Result<Vec<u8>>;
}

pub struct HttpClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl HttpClient {
    pub fn new(base_url: &str, api_key: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("malpedia_cli/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
        })
    }

    fn url(&self, endpoint: &Endpoint) -> Result<Url> {
        let mut url = Url::parse(&self.base_url).map_err(|e| {
            MalpediaError::invalid_argument(format!("base url {}: {e}", self.base_url))
        })?;
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                MalpediaError::invalid_argument(format!("base url {} cannot hold a path", self.base_url))
            })?;
            segments.pop_if_empty().extend(endpoint.segments());
        }
        Ok(url)
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        builder.header(AUTHORIZATION, format!("apitoken {}", self.api_key))
    }

    fn send(&self, endpoint: &Endpoint, builder: RequestBuilder) -> Result<Vec<u8>> {
        let resp = self.authorized(builder).send()?;
        let status = resp.status();
        debug!("{} -> {}", endpoint, status);
        if status == StatusCode::NOT_FOUND {
            return Err(MalpediaError::not_found(endpoint.to_string()));
        }
        if status != StatusCode::OK {
            return Err(MalpediaError::UnexpectedStatus(status.as_u16()));
        }
        Ok(resp.bytes()?.to_vec())
    }
}

impl Transport for HttpClient {
    fn get(&self, endpoint: &Endpoint) -> Result<Vec<u8>> {
        debug!("GET {}", endpoint);
        let url = self.url(endpoint)?;
        self.send(endpoint, self.client.get(url))
    }

    fn post_multipart(
        &self,
        endpoint: &Endpoint,
        file_name: &str,
        body: Vec<u8>,
    ) -> Result<Vec<u8>> {
        debug!("POST {} (multipart, {} bytes)", endpoint, body.len());
        let url = self.url(endpoint)?;
        let part = multipart::Part::bytes(body).file_name(file_name.to_string());
        let form = multipart::Form::new().part(MULTIPART_FIELD, part);
        self.send(endpoint, self.client.post(url).multipart(form))
    }

    fn post_raw(&self, endpoint: &Endpoint, body: Vec<u8>) -> Result<Vec<u8>> {
        debug!("POST {} (raw, {} bytes)", endpoint, body.len());
        let url = self.url(endpoint)?;
        self.send(endpoint, self.client.post(url).body(body))
    }
}
