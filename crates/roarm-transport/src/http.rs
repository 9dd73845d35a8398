use crate::{Result, Transport, TransportError};

/// [`Transport`] over the arm's HTTP bridge.
///
/// The bridge exposes one endpoint: `GET /js?json=<frame>` where the body of
/// the response is the feedback JSON. A send therefore completes the whole
/// round trip; `recv` hands back the body captured by the last send.
pub struct HttpTransport {
    client: reqwest::blocking::Client,
    url: String,
    pending: Option<Vec<u8>>,
}

impl HttpTransport {
    /// `host` is the bridge address, e.g. `192.168.4.1`.
    pub fn connect(host: &str) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .build()
            .map_err(|e| TransportError::Http(e.to_string()))?;
        Ok(Self {
            client,
            url: format!("http://{host}/js"),
            pending: None,
        })
    }
}

impl Transport for HttpTransport {
    fn send(&mut self, frame: &[u8]) -> Result<()> {
        let json = core::str::from_utf8(frame)
            .map_err(|_| TransportError::Http("frame is not UTF-8".to_string()))?
            .trim_end();
        let resp = self
            .client
            .get(&self.url)
            .query(&[("json", json)])
            .send()
            .map_err(|e| TransportError::Http(e.to_string()))?;
        if !resp.status().is_success() {
            return Err(TransportError::Http(format!("HTTP {}", resp.status())));
        }
        let body = resp
            .bytes()
            .map_err(|e| TransportError::Http(e.to_string()))?;
        tracing::debug!(len = body.len(), "bridge responded");
        self.pending = Some(body.to_vec());
        Ok(())
    }

    fn recv(&mut self) -> Result<Option<Vec<u8>>> {
        Ok(self.pending.take().filter(|b| !b.is_empty()))
    }

    fn reset(&mut self) -> Result<()> {
        self.pending = None;
        Ok(())
    }
}
