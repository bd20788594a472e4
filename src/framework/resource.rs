//! Resource and data source lifecycle traits
//!
//! Implementations work on typed state structs. The `Dynamic*` traits erase
//! the state type to `serde_json::Value` so the provider can keep every
//! resource in one registry, the same JSON shape Terraform stores.

use futures::future::BoxFuture;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::future::Future;

use super::diagnostics::{DiagResult, Diagnostic};
use super::schema::Schema;

/// A managed resource type
pub trait Resource: Send + Sync {
    type State: Serialize + DeserializeOwned + Send + Sync;

    /// Type name, e.g. `segment_source`
    fn type_name(&self) -> &'static str;

    fn schema(&self) -> Schema;

    /// Create from the planned state; computed attributes come from the response
    fn create(&self, plan: Self::State) -> impl Future<Output = DiagResult<Self::State>> + Send;

    /// Refresh state. `Ok(None)` drops the resource from state.
    fn read(&self, state: Self::State)
        -> impl Future<Output = DiagResult<Option<Self::State>>> + Send;

    fn update(
        &self,
        plan: Self::State,
        prior: Self::State,
    ) -> impl Future<Output = DiagResult<Self::State>> + Send;

    fn delete(&self, state: Self::State) -> impl Future<Output = DiagResult<()>> + Send;
}

/// A read-only data source type
pub trait DataSource: Send + Sync {
    type Config: DeserializeOwned + Send;
    type State: Serialize + Send;

    fn type_name(&self) -> &'static str;

    fn schema(&self) -> Schema;

    fn read(&self, config: Self::Config) -> impl Future<Output = DiagResult<Self::State>> + Send;
}

/// Type-erased [`Resource`]
pub trait DynamicResource: Send + Sync {
    fn type_name(&self) -> &'static str;
    fn schema(&self) -> Schema;
    fn create(&self, plan: Value) -> BoxFuture<'_, DiagResult<Value>>;
    fn read(&self, state: Value) -> BoxFuture<'_, DiagResult<Option<Value>>>;
    fn update(&self, plan: Value, prior: Value) -> BoxFuture<'_, DiagResult<Value>>;
    fn delete(&self, state: Value) -> BoxFuture<'_, DiagResult<()>>;
}

/// Type-erased [`DataSource`]
pub trait DynamicDataSource: Send + Sync {
    fn type_name(&self) -> &'static str;
    fn schema(&self) -> Schema;
    fn read(&self, config: Value) -> BoxFuture<'_, DiagResult<Value>>;
}

fn from_json<T: DeserializeOwned>(value: Value, what: &str) -> DiagResult<T> {
    serde_json::from_value(value).map_err(|e| {
        Diagnostic::config(format!("Unable to decode {}: {}", what, e))
    })
}

fn to_json<T: Serialize>(state: &T) -> DiagResult<Value> {
    serde_json::to_value(state)
        .map_err(|e| Diagnostic::error("Unable to encode state", e.to_string()))
}

impl<R> DynamicResource for R
where
    R: Resource + 'static,
{
    fn type_name(&self) -> &'static str {
        Resource::type_name(self)
    }

    fn schema(&self) -> Schema {
        Resource::schema(self)
    }

    fn create(&self, plan: Value) -> BoxFuture<'_, DiagResult<Value>> {
        Box::pin(async move {
            Resource::schema(self).check_required(&plan)?;
            let plan: R::State = from_json(plan, "plan")?;
            let state = Resource::create(self, plan).await?;
            to_json(&state)
        })
    }

    fn read(&self, state: Value) -> BoxFuture<'_, DiagResult<Option<Value>>> {
        Box::pin(async move {
            let state: R::State = from_json(state, "state")?;
            match Resource::read(self, state).await? {
                Some(state) => to_json(&state).map(Some),
                None => Ok(None),
            }
        })
    }

    fn update(&self, plan: Value, prior: Value) -> BoxFuture<'_, DiagResult<Value>> {
        Box::pin(async move {
            Resource::schema(self).check_required(&plan)?;
            let plan: R::State = from_json(plan, "plan")?;
            let prior: R::State = from_json(prior, "prior state")?;
            let state = Resource::update(self, plan, prior).await?;
            to_json(&state)
        })
    }

    fn delete(&self, state: Value) -> BoxFuture<'_, DiagResult<()>> {
        Box::pin(async move {
            let state: R::State = from_json(state, "state")?;
            Resource::delete(self, state).await
        })
    }
}

impl<D> DynamicDataSource for D
where
    D: DataSource + 'static,
{
    fn type_name(&self) -> &'static str {
        DataSource::type_name(self)
    }

    fn schema(&self) -> Schema {
        DataSource::schema(self)
    }

    fn read(&self, config: Value) -> BoxFuture<'_, DiagResult<Value>> {
        Box::pin(async move {
            DataSource::schema(self).check_required(&config)?;
            let config: D::Config = from_json(config, "configuration")?;
            let state = DataSource::read(self, config).await?;
            to_json(&state)
        })
    }
}
