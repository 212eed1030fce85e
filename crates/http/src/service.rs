//! One stateless service per catalog resource.
//!
//! Every operation is a single round trip; results and failures are handed
//! back unchanged.

use std::marker::PhantomData;

use async_trait::async_trait;
use biblioteca_kernel::{CatalogEntity, EntityId, FilterShape, FilterSpec};

use crate::client::ApiClient;
use crate::error::{ApiError, ApiResult};

/// The CRUD surface a list view needs.
#[async_trait]
pub trait CatalogService<E: CatalogEntity>: Send + Sync {
    async fn list(&self) -> ApiResult<Vec<E>>;

    async fn get(&self, id: EntityId) -> ApiResult<E>;

    async fn create(&self, entity: &E) -> ApiResult<E>;

    async fn update(&self, id: EntityId, entity: &E) -> ApiResult<E>;

    async fn delete(&self, id: EntityId) -> ApiResult<()>;
}

/// REST wrapper for `/{resource}` of entity `E`.
#[derive(Debug, Clone)]
pub struct ResourceService<E> {
    client: ApiClient,
    _entity: PhantomData<fn() -> E>,
}

impl<E: CatalogEntity> ResourceService<E> {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            _entity: PhantomData,
        }
    }

    pub fn resource(&self) -> &'static str {
        E::KIND.resource()
    }

    /// Backend full-text search, `GET /{resource}/search?query=..`.
    pub async fn search(&self, query: &str) -> ApiResult<Vec<E>> {
        self.client
            .get(&[self.resource(), "search"], &[("query", query)])
            .await
    }

    /// `GET /{resource}/disponibles`.
    pub async fn available(&self) -> ApiResult<Vec<E>> {
        self.client.get(&[self.resource(), "disponibles"], &[]).await
    }

    /// Run a named field filter from the kind's filter table.
    pub async fn filter(&self, name: &str, value: &str) -> ApiResult<Vec<E>> {
        let spec = E::filter_by_name(name).ok_or_else(|| {
            let known: Vec<&str> = E::filters().iter().map(|filter| filter.name).collect();
            ApiError::InvalidRequest(format!(
                "{} cannot be filtered by '{}'; expected one of: {}",
                E::KIND,
                name,
                known.join(", ")
            ))
        })?;
        self.filter_with(spec, value).await
    }

    pub async fn filter_with(&self, spec: &FilterSpec, value: &str) -> ApiResult<Vec<E>> {
        let resource = self.resource();
        match spec.shape {
            FilterShape::Query => {
                self.client
                    .get(&[resource, spec.segment], &[(spec.segment, value)])
                    .await
            }
            // A single-entity lookup with no match reads as an empty result.
            FilterShape::Path => {
                match self.client.get(&[resource, spec.segment, value], &[]).await {
                    Ok(entity) => Ok(vec![entity]),
                    Err(err) if err.is_not_found() => Ok(Vec::new()),
                    Err(err) => Err(err),
                }
            }
            FilterShape::Range {
                min_param,
                max_param,
            } => {
                let (min, max) = parse_range(value)?;
                self.client
                    .get(
                        &[resource, spec.segment],
                        &[(min_param, min.as_str()), (max_param, max.as_str())],
                    )
                    .await
            }
        }
    }
}

#[async_trait]
impl<E: CatalogEntity> CatalogService<E> for ResourceService<E> {
    async fn list(&self) -> ApiResult<Vec<E>> {
        self.client.get(&[self.resource()], &[]).await
    }

    async fn get(&self, id: EntityId) -> ApiResult<E> {
        let id = id.to_string();
        self.client.get(&[self.resource(), id.as_str()], &[]).await
    }

    async fn create(&self, entity: &E) -> ApiResult<E> {
        self.client.post(&[self.resource()], entity).await
    }

    async fn update(&self, id: EntityId, entity: &E) -> ApiResult<E> {
        let id = id.to_string();
        self.client.put(&[self.resource(), id.as_str()], entity).await
    }

    async fn delete(&self, id: EntityId) -> ApiResult<()> {
        let id = id.to_string();
        self.client.delete(&[self.resource(), id.as_str()]).await
    }
}

/// `"90..120"` into its two integer bounds.
fn parse_range(value: &str) -> ApiResult<(String, String)> {
    let invalid =
        || ApiError::InvalidRequest(format!("expected a range like 90..120, got '{}'", value));
    let (min, max) = value.split_once("..").ok_or_else(invalid)?;
    let min: i64 = min.trim().parse().map_err(|_| invalid())?;
    let max: i64 = max.trim().parse().map_err(|_| invalid())?;
    if min > max {
        return Err(invalid());
    }
    Ok((min.to_string(), max.to_string()))
}
