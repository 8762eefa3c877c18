//! Fetching a JSON bconf document from an HTTP endpoint.
//!
//! The endpoint receives a form POST with optional `host` and `appl` fields
//! and must answer `200 OK` with a JSON body. There is no retry and no
//! timeout policy here; wrap the call if you need either.

use reqwest::blocking::Client;
use reqwest::StatusCode;
use tracing::debug;

use crate::error::{BconfError, Result};
use crate::tree::Bconf;

/// Where to fetch a bconf document from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HttpSource {
    pub url: String,
    /// Sent as the `host` form field unless empty.
    pub host: String,
    /// Sent as the `appl` form field unless empty.
    pub appl: String,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn appl(mut self, appl: impl Into<String>) -> Self {
        self.appl = appl.into();
        self
    }

    fn form(&self) -> Vec<(&'static str, &str)> {
        let mut form = Vec::new();
        if !self.host.is_empty() {
            form.push(("host", self.host.as_str()));
        }
        if !self.appl.is_empty() {
            form.push(("appl", self.appl.as_str()));
        }
        form
    }

    /// Fetch the document and load it into `tree`.
    pub fn load_into(&self, tree: &mut Bconf) -> Result<()> {
        debug!(url = %self.url, host = %self.host, appl = %self.appl, "fetching bconf");
        let response = Client::new().post(&self.url).form(&self.form()).send()?;

        let status = response.status();
        debug!(url = %self.url, %status, "bconf response");
        if status != StatusCode::OK {
            return Err(BconfError::HttpStatus { status });
        }
        tree.load_json_reader(response)
    }

    /// Fetch the document into a fresh tree.
    pub fn fetch(&self) -> Result<Bconf> {
        let mut tree = Bconf::new();
        self.load_into(&mut tree)?;
        Ok(tree)
    }
}

impl Bconf {
    /// Populate this tree from the JSON served at `url`.
    ///
    /// `host` and `appl` are passed as form fields when non-empty.
    pub fn load_http(&mut self, url: &str, host: &str, appl: &str) -> Result<()> {
        HttpSource::new(url).host(host).appl(appl).load_into(self)
    }
}
