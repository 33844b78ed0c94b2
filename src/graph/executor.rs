use std::cell::RefCell;
use std::collections::HashMap;

use neo4rs::{query, Graph};
use serde::de::DeserializeOwned;
use tokio::runtime::Runtime;

use super::GraphError;
use crate::config::GraphSettings;

/// A bound query parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryParam {
    Text(String),
    TextList(Vec<String>),
}

/// A Cypher statement with its named parameters.
///
/// `name` identifies the statement in logs and lets test executors
/// route canned rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CypherQuery {
    pub name: &'static str,
    pub statement: &'static str,
    pub params: Vec<(&'static str, QueryParam)>,
}

impl CypherQuery {
    pub fn new(name: &'static str, statement: &'static str) -> Self {
        Self {
            name,
            statement,
            params: Vec::new(),
        }
    }

    pub fn text(mut self, key: &'static str, value: &str) -> Self {
        self.params.push((key, QueryParam::Text(value.to_string())));
        self
    }

    pub fn text_list(mut self, key: &'static str, values: &[String]) -> Self {
        self.params.push((key, QueryParam::TextList(values.to_vec())));
        self
    }

    pub fn param(&self, key: &str) -> Option<&QueryParam> {
        self.params.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }
}

/// Runs read-only queries against the adverse event graph.
///
/// Rows come back in store order, each deserialized from its named
/// columns into `T`.
pub trait QueryExecutor {
    fn fetch<T: DeserializeOwned>(&self, query: &CypherQuery) -> Result<Vec<T>, GraphError>;
}

/// Neo4j executor over the Bolt protocol.
///
/// Owns a current-thread runtime and blocks on every call, so queries
/// run strictly one after another. The connection is released on drop.
pub struct Neo4jExecutor {
    // Dropped before `runtime`: the pool's sockets belong to its reactor.
    graph: Graph,
    runtime: Runtime,
    uri: String,
}

impl Neo4jExecutor {
    pub fn connect(settings: &GraphSettings) -> Result<Self, GraphError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| GraphError::Runtime(e.to_string()))?;

        tracing::info!(uri = %settings.uri, user = %settings.user, "Connecting to adverse event graph");

        let graph = runtime
            .block_on(Graph::new(
                settings.uri.as_str(),
                settings.user.as_str(),
                settings.password.as_str(),
            ))
            .map_err(|e| GraphError::Connection {
                uri: settings.uri.clone(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            graph,
            runtime,
            uri: settings.uri.clone(),
        })
    }
}

impl QueryExecutor for Neo4jExecutor {
    fn fetch<T: DeserializeOwned>(&self, cypher: &CypherQuery) -> Result<Vec<T>, GraphError> {
        let name = cypher.name;
        let mut q = query(cypher.statement);
        for (key, value) in &cypher.params {
            q = match value {
                QueryParam::Text(s) => q.param(key, s.as_str()),
                QueryParam::TextList(list) => q.param(key, list.clone()),
            };
        }

        let query_err = |e: neo4rs::Error| GraphError::Query {
            name,
            reason: e.to_string(),
        };

        self.runtime.block_on(async {
            let mut stream = self.graph.execute(q).await.map_err(query_err)?;
            let mut rows = Vec::new();
            while let Some(row) = stream.next().await.map_err(query_err)? {
                let parsed = row.to::<T>().map_err(|e| GraphError::Deserialize {
                    name,
                    reason: e.to_string(),
                })?;
                rows.push(parsed);
            }
            tracing::debug!(query = name, rows = rows.len(), "Query complete");
            Ok(rows)
        })
    }
}

impl Drop for Neo4jExecutor {
    fn drop(&mut self) {
        tracing::debug!(uri = %self.uri, "Closing graph connection");
    }
}

/// Mock executor for testing: serves canned JSON rows per query name and
/// records every query it receives.
#[derive(Default)]
pub struct MockQueryExecutor {
    rows: HashMap<&'static str, Vec<serde_json::Value>>,
    calls: RefCell<Vec<CypherQuery>>,
}

impl MockQueryExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(mut self, name: &'static str, rows: Vec<serde_json::Value>) -> Self {
        self.rows.insert(name, rows);
        self
    }

    /// Queries received so far, in call order.
    pub fn calls(&self) -> Vec<CypherQuery> {
        self.calls.borrow().clone()
    }
}

impl QueryExecutor for MockQueryExecutor {
    fn fetch<T: DeserializeOwned>(&self, query: &CypherQuery) -> Result<Vec<T>, GraphError> {
        self.calls.borrow_mut().push(query.clone());
        let rows = self
            .rows
            .get(query.name)
            .ok_or(GraphError::UnexpectedQuery(query.name))?;
        rows.iter()
            .map(|row| {
                serde_json::from_value(row.clone()).map_err(|e| GraphError::Deserialize {
                    name: query.name,
                    reason: e.to_string(),
                })
            })
            .collect()
    }
}
