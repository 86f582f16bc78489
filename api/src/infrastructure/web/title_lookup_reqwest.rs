use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::application::ports::title_lookup::TitleLookup;

static TITLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<title[^>]*>(.*?)</title>").expect("valid title regex"));

static ENTITY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"&(?:#[0-9]+|#[xX][0-9a-fA-F]+|[A-Za-z][A-Za-z0-9]*);").expect("valid entity regex")
});

const MAX_REDIRECTS: usize = 5;

pub struct ReqwestTitleLookup {
    client: reqwest::Client,
    max_bytes: usize,
}

impl ReqwestTitleLookup {
    pub fn new(timeout: Duration, max_bytes: usize, user_agent: &str) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            // Redirects are followed by hand so every hop is host-checked.
            .redirect(reqwest::redirect::Policy::none())
            .build()?;
        Ok(Self { client, max_bytes })
    }

    async fn fetch_head(&self, url: &str) -> anyhow::Result<Option<String>> {
        let mut target = reqwest::Url::parse(url)?;
        let mut hops = 0;
        let mut resp = loop {
            ensure_public_host(&target).await?;
            let resp = self
                .client
                .get(target.clone())
                .send()
                .await
                .map_err(|e| anyhow::anyhow!("request failed: {e}"))?;
            if !resp.status().is_redirection() {
                break resp;
            }
            hops += 1;
            if hops > MAX_REDIRECTS {
                anyhow::bail!("more than {MAX_REDIRECTS} redirects");
            }
            let location = resp
                .headers()
                .get(reqwest::header::LOCATION)
                .and_then(|v| v.to_str().ok())
                .ok_or_else(|| anyhow::anyhow!("redirect {} without location", resp.status()))?;
            target = target.join(location)?;
        };
        if !resp.status().is_success() {
            anyhow::bail!("upstream returned status {}", resp.status());
        }
        let is_html = resp
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|ct| ct.to_ascii_lowercase().contains("html"))
            .unwrap_or(true);
        if !is_html {
            return Ok(None);
        }

        let mut body: Vec<u8> = Vec::new();
        while let Some(chunk) = resp
            .chunk()
            .await
            .map_err(|e| anyhow::anyhow!("failed to read body: {e}"))?
        {
            let room = self.max_bytes.saturating_sub(body.len());
            body.extend_from_slice(&chunk[..chunk.len().min(room)]);
            if body.len() >= self.max_bytes {
                break;
            }
        }
        Ok(Some(String::from_utf8_lossy(&body).into_owned()))
    }
}

/// Fails unless every address the url's host resolves to is publicly
/// routable.
async fn ensure_public_host(url: &reqwest::Url) -> anyhow::Result<()> {
    if !matches!(url.scheme(), "http" | "https") {
        anyhow::bail!("unsupported scheme {}", url.scheme());
    }
    let host = url
        .host_str()
        .ok_or_else(|| anyhow::anyhow!("url has no host"))?;
    let bare = host.trim_start_matches('[').trim_end_matches(']');
    let addrs: Vec<IpAddr> = match bare.parse::<IpAddr>() {
        Ok(ip) => vec![ip],
        Err(_) => {
            let port = url.port_or_known_default().unwrap_or(80);
            tokio::net::lookup_host((bare, port))
                .await
                .map_err(|e| anyhow::anyhow!("could not resolve {host}: {e}"))?
                .map(|addr| addr.ip())
                .collect()
        }
    };
    if addrs.is_empty() {
        anyhow::bail!("{host} resolved to no addresses");
    }
    if let Some(ip) = addrs.into_iter().find(|ip| !is_public_ip(*ip)) {
        anyhow::bail!("refusing non-public address {ip} for {host}");
    }
    Ok(())
}

/// False for loopback, private, link-local, shared, documentation,
/// multicast and unspecified ranges, including IPv4-mapped IPv6 forms.
pub fn is_public_ip(ip: IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => is_public_v4(v4),
        IpAddr::V6(v6) => match v6.to_ipv4_mapped() {
            Some(v4) => is_public_v4(v4),
            None => {
                let first = v6.segments()[0];
                !(v6.is_loopback()
                    || v6.is_unspecified()
                    || v6.is_multicast()
                    || first & 0xfe00 == 0xfc00
                    || first & 0xffc0 == 0xfe80)
            }
        },
    }
}

fn is_public_v4(ip: Ipv4Addr) -> bool {
    let [a, b, ..] = ip.octets();
    !(ip.is_loopback()
        || ip.is_private()
        || ip.is_link_local()
        || ip.is_unspecified()
        || ip.is_broadcast()
        || ip.is_multicast()
        || ip.is_documentation()
        || a == 0
        || (a == 100 && b & 0xc0 == 64))
}

/// First `<title>` of an HTML document, entity-decoded with whitespace
/// collapsed. Empty when there is none. Entities that do not decode are
/// kept as written.
pub fn extract_title(html: &str) -> String {
    let Some(raw) = TITLE_RE.captures(html).and_then(|c| c.get(1)) else {
        return String::new();
    };
    let decoded = ENTITY_RE.replace_all(raw.as_str(), |caps: &regex::Captures| {
        htmlescape::decode_html(&caps[0]).unwrap_or_else(|_| caps[0].to_string())
    });
    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[async_trait]
impl TitleLookup for ReqwestTitleLookup {
    async fn title_for(&self, url: &str) -> String {
        match self.fetch_head(url).await {
            Ok(Some(html)) => extract_title(&html),
            Ok(None) => {
                tracing::debug!(url = %url, "title_lookup_not_html");
                String::new()
            }
            Err(e) => {
                tracing::warn!(url = %url, error = ?e, "title_lookup_failed");
                String::new()
            }
        }
    }
}
