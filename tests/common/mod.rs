// Scripted stand-in for the page-rendering collaborator. Each route maps to
// a sequence of page states; a click on any handle advances the current
// route to its next state, which is how pagination is exercised without a
// real browser.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use scraper::{Html, Selector};
use serde_json::Value;

use rsebl_tracker::session::{DomHandle, ElementHandle, PageSession, SessionError};

#[derive(Debug, Default, Clone)]
pub struct Counters {
    pub navigations: usize,
    pub content_calls: usize,
    pub evaluate_calls: usize,
    pub clicks: usize,
}

struct Inner {
    routes: HashMap<String, Vec<String>>,
    current_url: Option<String>,
    version: usize,
    counters: Counters,
    eval_result: Value,
    fail_eval: bool,
}

pub struct MockSession {
    inner: Arc<Mutex<Inner>>,
}

impl MockSession {
    pub fn new() -> Self {
        MockSession {
            inner: Arc::new(Mutex::new(Inner {
                routes: HashMap::new(),
                current_url: None,
                version: 0,
                counters: Counters::default(),
                eval_result: Value::Null,
                fail_eval: false,
            })),
        }
    }

    pub fn route<P: AsRef<str>>(self, url: &str, pages: Vec<P>) -> Self {
        self.inner.lock().unwrap().routes.insert(
            url.to_string(),
            pages.iter().map(|p| p.as_ref().to_string()).collect(),
        );
        self
    }

    pub fn eval_result(self, value: Value) -> Self {
        self.inner.lock().unwrap().eval_result = value;
        self
    }

    pub fn fail_eval(self) -> Self {
        self.inner.lock().unwrap().fail_eval = true;
        self
    }

    pub fn counters(&self) -> Counters {
        self.inner.lock().unwrap().counters.clone()
    }

    fn current_page(&self) -> Option<String> {
        let inner = self.inner.lock().unwrap();
        let url = inner.current_url.as_ref()?;
        let pages = inner.routes.get(url)?;
        let idx = inner.version.min(pages.len().saturating_sub(1));
        pages.get(idx).cloned()
    }
}

pub struct MockHandle {
    dom: DomHandle,
    inner: Arc<Mutex<Inner>>,
}

impl ElementHandle for MockHandle {
    fn text(&self) -> String {
        self.dom.text()
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.dom.attribute(name)
    }

    fn is_enabled(&self) -> bool {
        self.dom.is_enabled()
    }

    fn query_selector_all(&self, selector: &str) -> Vec<Self> {
        self.dom
            .query_selector_all(selector)
            .into_iter()
            .map(|dom| MockHandle {
                dom,
                inner: self.inner.clone(),
            })
            .collect()
    }

    async fn click(&self) -> Result<(), SessionError> {
        let mut inner = self.inner.lock().unwrap();
        inner.counters.clicks += 1;
        inner.version += 1;
        Ok(())
    }
}

impl PageSession for MockSession {
    type Handle = MockHandle;

    async fn navigate(&mut self, url: &str, _timeout_ms: u64) -> Result<(), SessionError> {
        let mut inner = self.inner.lock().unwrap();
        inner.counters.navigations += 1;
        if inner.routes.contains_key(url) {
            inner.current_url = Some(url.to_string());
            inner.version = 0;
            Ok(())
        } else {
            Err(SessionError::Timeout(format!("no route for {}", url)))
        }
    }

    async fn wait_for_selector(
        &mut self,
        selector: &str,
        _timeout_ms: u64,
    ) -> Result<(), SessionError> {
        if self.query_selector_all(selector).is_empty() {
            return Err(SessionError::Timeout(format!(
                "selector {:?} never appeared",
                selector
            )));
        }
        Ok(())
    }

    fn query_selector_all(&self, selector: &str) -> Vec<MockHandle> {
        let page = match self.current_page() {
            Some(page) => page,
            None => return Vec::new(),
        };
        let sel = match Selector::parse(selector) {
            Ok(sel) => sel,
            Err(_) => return Vec::new(),
        };
        let doc = Html::parse_document(&page);
        doc.select(&sel)
            .map(|el| MockHandle {
                dom: DomHandle::from_element(&el),
                inner: self.inner.clone(),
            })
            .collect()
    }

    fn content(&self) -> String {
        let mut inner = self.inner.lock().unwrap();
        inner.counters.content_calls += 1;
        let url = match &inner.current_url {
            Some(url) => url.clone(),
            None => return String::new(),
        };
        let pages = match inner.routes.get(&url) {
            Some(pages) => pages,
            None => return String::new(),
        };
        let idx = inner.version.min(pages.len().saturating_sub(1));
        pages.get(idx).cloned().unwrap_or_default()
    }

    async fn evaluate_in_page(&mut self, _script: &str) -> Result<Value, SessionError> {
        let mut inner = self.inner.lock().unwrap();
        inner.counters.evaluate_calls += 1;
        if inner.fail_eval {
            return Err(SessionError::Timeout(
                "script evaluation timed out".to_string(),
            ));
        }
        Ok(inner.eval_result.clone())
    }
}
