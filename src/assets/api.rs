//! The assets endpoints.

use std::collections::HashSet;

use futures::stream::{self, StreamExt};
use serde_json::{json, Value};

use crate::assets::asset::{update_item, Asset};
use crate::clients::{HttpClient, HttpError, HttpRequest, HttpRequestBuilder, HttpResponse};
use crate::config::ClientConfig;
use crate::hierarchy::{
    self, AssetNode, Batch, CreatedAsset, HierarchyError, HierarchyOptions, HierarchyTransport,
    SubmitOutcome, ValidationReport,
};
use crate::identifier::Identifier;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WriteKind {
    Create,
    Update,
}

impl WriteKind {
    const fn path(self) -> &'static str {
        match self {
            Self::Create => "assets",
            Self::Update => "assets/update",
        }
    }
}

/// Access to `/assets` of one project.
///
/// Obtained from [`CogniteClient::assets`](crate::CogniteClient::assets).
/// Requests are split into chunks of `create_limit` items and at most
/// `max_workers` chunks are in flight at once. Results keep input order.
#[derive(Debug, Clone, Copy)]
pub struct AssetsApi<'a> {
    http: &'a HttpClient,
    config: &'a ClientConfig,
}

impl<'a> AssetsApi<'a> {
    #[must_use]
    pub const fn new(http: &'a HttpClient, config: &'a ClientConfig) -> Self {
        Self { http, config }
    }

    /// Creates assets. Parents must already exist or come earlier in the
    /// same chunk's dependency order; use
    /// [`create_hierarchy`](Self::create_hierarchy) for trees.
    ///
    /// # Errors
    ///
    /// Returns the first [`HttpError`] of any chunk. Other chunks may have
    /// been written.
    pub async fn create(&self, nodes: &[AssetNode]) -> Result<Vec<Asset>, HttpError> {
        let items: Vec<Value> = nodes.iter().map(|n| json!(n)).collect();
        self.write_all(WriteKind::Create, items).await
    }

    /// Updates assets by internal id; each node must carry `id`.
    ///
    /// # Errors
    ///
    /// Returns the first [`HttpError`] of any chunk.
    pub async fn update(&self, nodes: &[AssetNode]) -> Result<Vec<Asset>, HttpError> {
        let items: Vec<Value> = nodes
            .iter()
            .filter_map(|n| n.id.map(|id| update_item(n, id)))
            .collect();
        self.write_all(WriteKind::Update, items).await
    }

    /// Fetches assets by id or external id.
    ///
    /// With `ignore_unknown_ids`, identifiers that match nothing are left out
    /// of the result instead of failing the request.
    ///
    /// # Errors
    ///
    /// Returns an [`HttpError`] if a request fails.
    pub async fn retrieve(
        &self,
        ids: &[Identifier],
        ignore_unknown_ids: bool,
    ) -> Result<Vec<Asset>, HttpError> {
        let limit = self.config.create_limit();
        let requests = ids.chunks(limit).map(|chunk| {
            self.send(
                HttpRequest::post_items("assets/byids", chunk)
                    .field("ignoreUnknownIds", ignore_unknown_ids),
            )
        });

        let responses: Vec<Result<HttpResponse, HttpError>> = stream::iter(requests)
            .buffered(self.config.max_workers())
            .collect()
            .await;

        let mut assets = Vec::with_capacity(ids.len());
        for response in responses {
            assets.extend(response?.items::<Asset>()?);
        }
        Ok(assets)
    }

    /// Validates a hierarchy without contacting the API.
    ///
    /// Parents outside the input are reported as orphans.
    #[must_use]
    pub fn validate(&self, nodes: &[AssetNode]) -> ValidationReport {
        hierarchy::validate(nodes)
    }

    /// Validates, orders and writes a hierarchy of assets.
    ///
    /// See [`hierarchy::create_hierarchy`] for the full contract.
    ///
    /// # Errors
    ///
    /// Returns a [`HierarchyError`] if validation fails, the parent lookup
    /// fails, or any node was not created.
    pub async fn create_hierarchy(
        &self,
        nodes: &[AssetNode],
        options: &HierarchyOptions,
    ) -> Result<Vec<CreatedAsset>, HierarchyError> {
        hierarchy::create_hierarchy(self, nodes, options).await
    }

    async fn send(&self, request: HttpRequestBuilder) -> Result<HttpResponse, HttpError> {
        let request = request.tries(self.config.max_tries()).build()?;
        self.http.request(request).await
    }

    async fn write_chunk(&self, kind: WriteKind, items: Vec<Value>) -> Result<Vec<Asset>, HttpError> {
        let response = self
            .send(HttpRequest::post_items(kind.path(), &items))
            .await?;
        response.items::<Asset>().map_err(HttpError::from)
    }

    async fn write_all(&self, kind: WriteKind, items: Vec<Value>) -> Result<Vec<Asset>, HttpError> {
        let limit = self.config.create_limit();
        let chunks: Vec<Vec<Value>> = items.chunks(limit).map(<[Value]>::to_vec).collect();

        let results: Vec<Result<Vec<Asset>, HttpError>> = stream::iter(chunks)
            .map(|chunk| self.write_chunk(kind, chunk))
            .buffered(self.config.max_workers())
            .collect()
            .await;

        let mut assets = Vec::with_capacity(items.len());
        for result in results {
            assets.extend(result?);
        }
        Ok(assets)
    }

    /// Writes one chunk of a hierarchy batch and reports per-item outcomes.
    async fn submit_chunk(
        &self,
        kind: WriteKind,
        nodes: Vec<&AssetNode>,
    ) -> Vec<(String, SubmitOutcome)> {
        let items: Vec<Value> = nodes
            .iter()
            .map(|node| match (kind, node.id) {
                (WriteKind::Update, Some(id)) => update_item(node, id),
                _ => json!(node),
            })
            .collect();

        match self.write_chunk(kind, items).await {
            Ok(assets) => assets
                .into_iter()
                .filter_map(|asset| match asset.external_id {
                    Some(xid) => Some((xid, SubmitOutcome::Success { id: asset.id })),
                    None => {
                        tracing::warn!(
                            "Dropping item {} from {} reply: it has no externalId",
                            asset.id,
                            kind.path()
                        );
                        None
                    }
                })
                .collect(),
            Err(error) => {
                let outcome = classify_error(&error);
                tracing::warn!(
                    "Request to {} with {} item(s) failed: {error}",
                    kind.path(),
                    nodes.len()
                );
                nodes
                    .iter()
                    .map(|node| (node.xid().to_string(), outcome.clone()))
                    .collect()
            }
        }
    }
}

impl HierarchyTransport for AssetsApi<'_> {
    async fn submit(&self, batch: &Batch) -> Vec<(String, SubmitOutcome)> {
        let limit = self.config.create_limit();
        let creates: Vec<&AssetNode> = batch.creates().collect();
        let updates: Vec<&AssetNode> = batch.updates().collect();

        let requests = creates
            .chunks(limit)
            .map(|chunk| (WriteKind::Create, chunk.to_vec()))
            .chain(
                updates
                    .chunks(limit)
                    .map(|chunk| (WriteKind::Update, chunk.to_vec())),
            );

        let replies: Vec<Vec<(String, SubmitOutcome)>> = stream::iter(requests)
            .map(|(kind, chunk)| self.submit_chunk(kind, chunk))
            .buffer_unordered(self.config.max_workers())
            .collect()
            .await;

        replies.into_iter().flatten().collect()
    }

    async fn existing_external_ids(
        &self,
        external_ids: &[String],
    ) -> Result<HashSet<String>, HttpError> {
        let ids: Vec<Identifier> = external_ids.iter().map(Identifier::external_id).collect();
        let assets = self.retrieve(&ids, true).await?;
        Ok(assets.into_iter().filter_map(|a| a.external_id).collect())
    }

    fn preferred_batch_size(&self) -> usize {
        self.config.create_limit() * self.config.max_workers()
    }
}

/// Maps a failed request to the outcome of every item it carried.
///
/// A status of 500 or above leaves the items' state unknown; any other
/// status, including 429 after the last try, means they were not written.
#[must_use]
pub fn classify_error(error: &HttpError) -> SubmitOutcome {
    let from_status = |code: u16, reason: String| {
        if code >= 500 {
            SubmitOutcome::ServerError { code, reason }
        } else {
            SubmitOutcome::ClientError { code, reason }
        }
    };

    match error {
        HttpError::Response(e) => from_status(e.code, e.message.clone()),
        HttpError::MaxRetries(e) => from_status(e.last.code, e.last.message.clone()),
        HttpError::InvalidRequest(e) => SubmitOutcome::NotSent {
            reason: e.to_string(),
        },
        HttpError::Network(e) if e.is_timeout() => SubmitOutcome::Timeout,
        HttpError::Network(e) if e.is_connect() || e.is_builder() => SubmitOutcome::NotSent {
            reason: e.to_string(),
        },
        HttpError::Network(e) => SubmitOutcome::Interrupted {
            reason: e.to_string(),
        },
        HttpError::Decode(e) => SubmitOutcome::Interrupted {
            reason: e.to_string(),
        },
    }
}
