//! Persons API.

use super::{kwargs_with_defaults, list_method, lookup};
use crate::client::EvaClient;
use crate::entity::{Entity, Projection, fields};
use crate::error::Result;
use crate::models::Person;
use crate::query::{Kwargs, QueryBuilder};
use crate::rpc::RpcResponse;

/// Persons API client.
pub struct PersonsApi {
    client: EvaClient,
}

impl PersonsApi {
    pub(crate) fn new(client: EvaClient) -> Self {
        Self { client }
    }

    /// Get a person by id (`CmfPerson:<uuid>`).
    pub async fn get(&self, id: &str, columns: &[&str]) -> Result<RpcResponse<Option<Person>>> {
        self.query(lookup(Entity::Person, fields::ID, id, columns))
            .await
    }

    /// Get the first person matching `query` (`CmfPerson.get`).
    pub async fn query(&self, query: QueryBuilder) -> Result<RpcResponse<Option<Person>>> {
        let kwargs = kwargs_with_defaults(&self.client, &query, Entity::Person, Projection::Single);
        self.client
            .call("PersonsApi::query", Entity::Person.method("get"), kwargs)
            .await
    }

    /// List persons matching `query`.
    pub async fn list(&self, query: QueryBuilder) -> Result<RpcResponse<Vec<Person>>> {
        let method = list_method(&query, Entity::Person)?;
        let kwargs = kwargs_with_defaults(&self.client, &query, Entity::Person, Projection::List);
        self.client.call("PersonsApi::list", method, kwargs).await
    }

    /// Count persons matching `query`.
    pub async fn count(&self, query: QueryBuilder) -> Result<u64> {
        let response: RpcResponse<u64> = self
            .client
            .call(
                "PersonsApi::count",
                Entity::Person.method("count"),
                query.to_kwargs(),
            )
            .await?;
        Ok(response.result)
    }

    /// The person the API token belongs to.
    pub async fn current(&self, columns: &[&str]) -> Result<RpcResponse<Person>> {
        let mut kwargs = Kwargs::new();
        if !columns.is_empty() {
            kwargs.fields = Some(columns.iter().map(|f| f.to_string()).collect());
        }
        kwargs.default_fields(|| {
            self.client
                .field_defaults()
                .get(Entity::Person, Projection::Single)
        });
        self.client
            .call(
                "PersonsApi::current",
                Entity::Person.method("get_current"),
                kwargs,
            )
            .await
    }
}
