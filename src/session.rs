// src/session.rs
use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use log::warn;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use serde_json::Value;

use crate::dom;

/// Session-boundary failures. `Timeout` covers everything callers recover
/// from locally (a wait that expired, a navigation that failed, a request a
/// static snapshot cannot satisfy); `Fatal` means the browsing session
/// itself is unusable and the run cannot produce output.
#[derive(Debug, Clone)]
pub enum SessionError {
    Timeout(String),
    Fatal(String),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SessionError::Timeout(msg) => write!(f, "timeout: {}", msg),
            SessionError::Fatal(msg) => write!(f, "fatal: {}", msg),
        }
    }
}

impl std::error::Error for SessionError {}

/// A handle onto one element of the current page.
pub trait ElementHandle: Sized {
    fn text(&self) -> String;
    fn attribute(&self, name: &str) -> Option<String>;
    fn is_enabled(&self) -> bool;
    /// Scoped query inside this element's subtree.
    fn query_selector_all(&self, selector: &str) -> Vec<Self>;
    async fn click(&self) -> Result<(), SessionError>;
}

/// The page-rendering collaborator the extraction pipeline runs against.
/// One session is owned exclusively by a run; all navigation is sequential.
pub trait PageSession {
    type Handle: ElementHandle;

    async fn navigate(&mut self, url: &str, timeout_ms: u64) -> Result<(), SessionError>;
    async fn wait_for_selector(&mut self, selector: &str, timeout_ms: u64)
        -> Result<(), SessionError>;
    fn query_selector_all(&self, selector: &str) -> Vec<Self::Handle>;
    /// Serialized source of the current page.
    fn content(&self) -> String;
    /// Best-effort in-page script evaluation; may legitimately return Null.
    async fn evaluate_in_page(&mut self, script: &str) -> Result<Value, SessionError>;
}

/// Immutable snapshot of one element. Built either from a selector match on
/// the parsed document or from a string-level tag scan of a parent handle.
#[derive(Debug, Clone)]
pub struct DomHandle {
    text: String,
    html: String,
    open_tag: String,
    attrs: HashMap<String, String>,
}

impl DomHandle {
    pub fn from_element(el: &ElementRef) -> Self {
        let text = dom::normalize_ws(&el.text().collect::<Vec<_>>().join(" "));
        let attrs = el
            .value()
            .attrs()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        DomHandle {
            text,
            html: el.html(),
            open_tag: String::new(),
            attrs,
        }
    }

    pub fn from_block(block: &str) -> Self {
        let open_tag = block
            .find('>')
            .map(|end| block[..=end].to_string())
            .unwrap_or_default();
        DomHandle {
            text: dom::strip_tags(dom::inner_after_open_tag(block)),
            html: block.to_string(),
            open_tag,
            attrs: HashMap::new(),
        }
    }
}

impl ElementHandle for DomHandle {
    fn text(&self) -> String {
        self.text.clone()
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.attrs
            .get(name)
            .cloned()
            .or_else(|| dom::tag_attr(&self.open_tag, name))
    }

    fn is_enabled(&self) -> bool {
        self.attribute("disabled").is_none()
            && self.attribute("aria-disabled").as_deref() != Some("true")
    }

    fn query_selector_all(&self, selector: &str) -> Vec<Self> {
        // Bare tag names go through the string scanner: fragment re-parsing
        // fosters table innards (tr/td) out of orphaned subtrees.
        if selector.chars().all(|c| c.is_ascii_alphanumeric()) {
            return dom::tag_blocks(&self.html, selector)
                .into_iter()
                .map(DomHandle::from_block)
                .collect();
        }
        let sel = match Selector::parse(selector) {
            Ok(sel) => sel,
            Err(_) => return Vec::new(),
        };
        let fragment = Html::parse_fragment(&self.html);
        fragment
            .select(&sel)
            .map(|el| DomHandle::from_element(&el))
            .collect()
    }

    async fn click(&self) -> Result<(), SessionError> {
        Err(SessionError::Timeout(
            "click is not supported on a static page snapshot".to_string(),
        ))
    }
}

/// Plain-HTTP session: fetches each URL once and answers queries from the
/// static snapshot. No script engine, so `evaluate_in_page` yields Null and
/// the live-render strategy falls through to payload extraction; `click`
/// fails as a timeout, which pagination treats as an early stop.
pub struct HttpSession {
    client: Client,
    source: Option<String>,
}

impl HttpSession {
    pub fn new() -> Result<Self, SessionError> {
        let client = Client::builder()
            .user_agent("Mozilla/5.0 (compatible; RSEBLTracker/1.0)")
            .build()
            .map_err(|e| SessionError::Fatal(format!("failed to build HTTP client: {}", e)))?;
        Ok(HttpSession {
            client,
            source: None,
        })
    }
}

impl PageSession for HttpSession {
    type Handle = DomHandle;

    async fn navigate(&mut self, url: &str, timeout_ms: u64) -> Result<(), SessionError> {
        let response = self
            .client
            .get(url)
            .timeout(Duration::from_millis(timeout_ms))
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| SessionError::Timeout(format!("navigation to {} failed: {}", url, e)))?;
        let text = response
            .text()
            .await
            .map_err(|e| SessionError::Timeout(format!("reading {} failed: {}", url, e)))?;
        self.source = Some(text);
        Ok(())
    }

    async fn wait_for_selector(
        &mut self,
        selector: &str,
        _timeout_ms: u64,
    ) -> Result<(), SessionError> {
        // The snapshot is final: the selector either matches now or never will.
        if self.query_selector_all(selector).is_empty() {
            return Err(SessionError::Timeout(format!(
                "selector {:?} never appeared",
                selector
            )));
        }
        Ok(())
    }

    fn query_selector_all(&self, selector: &str) -> Vec<DomHandle> {
        let source = match &self.source {
            Some(source) => source,
            None => return Vec::new(),
        };
        let sel = match Selector::parse(selector) {
            Ok(sel) => sel,
            Err(_) => {
                warn!("unparseable selector {:?}", selector);
                return Vec::new();
            }
        };
        let doc = Html::parse_document(source);
        doc.select(&sel).map(|el| DomHandle::from_element(&el)).collect()
    }

    fn content(&self) -> String {
        self.source.clone().unwrap_or_default()
    }

    async fn evaluate_in_page(&mut self, _script: &str) -> Result<Value, SessionError> {
        Ok(Value::Null)
    }
}
