//! Shared test helpers: scripted transport, XML bodies, in-process HTTP service

#![allow(dead_code)]

use async_trait::async_trait;
use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use sfa_classify::{ClassificationResponse, ClassifyTransport, KeyType, QueryKey, WorkCandidate};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

// ============================================================================
// Scripted transport
// ============================================================================

/// Transport answering from a per-key script
///
/// Each key has a sequence of responses; once exhausted, the last one
/// repeats. Unknown keys get the fallback response.
pub struct ScriptedTransport {
    scripts: HashMap<QueryKey, Vec<ClassificationResponse>>,
    fallback: ClassificationResponse,
    calls: Mutex<Vec<QueryKey>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self {
            scripts: HashMap::new(),
            fallback: ClassificationResponse::with_status(sfa_classify::ResponseStatus::NoMatch),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn on(self, key: QueryKey, response: ClassificationResponse) -> Self {
        self.on_sequence(key, vec![response])
    }

    pub fn on_sequence(mut self, key: QueryKey, responses: Vec<ClassificationResponse>) -> Self {
        assert!(!responses.is_empty());
        self.scripts.insert(key, responses);
        self
    }

    pub fn otherwise(mut self, response: ClassificationResponse) -> Self {
        self.fallback = response;
        self
    }

    /// Every key queried, in call order
    pub fn calls(&self) -> Vec<QueryKey> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls_for(&self, key: &QueryKey) -> usize {
        self.calls.lock().unwrap().iter().filter(|k| *k == key).count()
    }
}

#[async_trait]
impl ClassifyTransport for ScriptedTransport {
    async fn query(&self, key: &QueryKey) -> ClassificationResponse {
        let mut calls = self.calls.lock().unwrap();
        let previous = calls.iter().filter(|k| *k == key).count();
        calls.push(key.clone());

        match self.scripts.get(key) {
            Some(responses) => responses[previous.min(responses.len() - 1)].clone(),
            None => self.fallback.clone(),
        }
    }
}

pub fn issn(value: &str) -> QueryKey {
    QueryKey::new(KeyType::Issn, value)
}

pub fn oclc(value: &str) -> QueryKey {
    QueryKey::new(KeyType::Oclc, value)
}

pub fn work(owi: &str, wi: &str) -> WorkCandidate {
    WorkCandidate {
        owi: owi.to_string(),
        wi: wi.to_string(),
    }
}

// ============================================================================
// Classify XML bodies
// ============================================================================

pub fn single_xml(sfa: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<classify xmlns="http://classify.oclc.org">
  <response code="0"/>
  <work editions="12" holdings="345" owi="99999" wi="88888">Some title</work>
  <recommendations>
    <lcc>
      <mostPopular holdings="300" nsfa="XX0000" sfa="XX0000"/>
      <mostRecent holdings="300" sfa="{}"/>
    </lcc>
  </recommendations>
</classify>"#,
        sfa
    )
}

pub fn multi_xml(works: &[(&str, &str)]) -> String {
    let works: String = works
        .iter()
        .map(|(owi, wi)| format!(r#"    <work editions="1" owi="{}" wi="{}"/>"#, owi, wi))
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<classify xmlns="http://classify.oclc.org">
  <response code="4"/>
  <works>
{}
  </works>
</classify>"#,
        works
    )
}

pub fn status_xml(code: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<classify xmlns="http://classify.oclc.org"><response code="{}"/></classify>"#,
        code
    )
}

// ============================================================================
// In-process classification service
// ============================================================================

pub type Params = HashMap<String, String>;
type Responder = dyn Fn(&Params) -> (StatusCode, String) + Send + Sync;

#[derive(Clone)]
struct MockState {
    respond: Arc<Responder>,
    requests: Arc<Mutex<Vec<Params>>>,
}

/// Running mock service
pub struct MockService {
    pub base_url: String,
    requests: Arc<Mutex<Vec<Params>>>,
}

impl MockService {
    /// Query parameters of every request received, in arrival order
    pub fn requests(&self) -> Vec<Params> {
        self.requests.lock().unwrap().clone()
    }
}

async fn classify(
    State(state): State<MockState>,
    Query(params): Query<Params>,
) -> impl IntoResponse {
    state.requests.lock().unwrap().push(params.clone());
    let (status, body) = (state.respond)(&params);
    (status, [(header::CONTENT_TYPE, "text/xml; charset=UTF-8")], body)
}

/// Serve `respond` on an ephemeral localhost port
pub async fn spawn_service<F>(respond: F) -> MockService
where
    F: Fn(&Params) -> (StatusCode, String) + Send + Sync + 'static,
{
    let requests = Arc::new(Mutex::new(Vec::new()));
    let state = MockState {
        respond: Arc::new(respond),
        requests: requests.clone(),
    };

    let app = Router::new()
        .route("/classify2/Classify", get(classify))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    MockService {
        base_url: format!("http://{}/classify2/Classify", addr),
        requests,
    }
}
