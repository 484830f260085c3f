//! CRUD and search over one user-defined mesh.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{MeshyError, Result};
use crate::http_client::HttpTransport;
use crate::query::MeshQuery;
use crate::request::{BodyFormat, RequestService};

/// One page of search results.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResult<D> {
    pub results: Vec<D>,
    pub page: i32,
    pub page_size: i32,
    pub total_records: i64,
}

/// Operations on a named mesh, shared through a connection's request service.
///
/// Document types are plain serde models. Mark the server-assigned id field
/// `#[serde(skip_serializing)]` so it stays out of create payloads while
/// still deserializing from responses.
pub struct MeshesResource<'c, T: HttpTransport> {
    requests: &'c RequestService<T>,
    name: String,
}

impl<T: HttpTransport> std::fmt::Debug for MeshesResource<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MeshesResource")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl<'c, T: HttpTransport> MeshesResource<'c, T> {
    pub(crate) fn new(requests: &'c RequestService<T>, mesh_name: &str) -> Self {
        Self {
            requests,
            // Mesh names are lowercase on the wire.
            name: mesh_name.trim().to_lowercase(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub async fn create<D>(&self, document: &D) -> Result<D>
    where
        D: Serialize + DeserializeOwned,
    {
        self.requests
            .post(&self.collection_path(), Some(document), BodyFormat::Json, None)
            .await
    }

    pub async fn get<D>(&self, id: &str) -> Result<D>
    where
        D: DeserializeOwned,
    {
        self.requests.get(&self.document_path(id), None).await
    }

    pub async fn update<D>(&self, id: &str, document: &D) -> Result<D>
    where
        D: Serialize + DeserializeOwned,
    {
        self.requests
            .put(&self.document_path(id), Some(document), BodyFormat::Json, None)
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.requests.delete(&self.document_path(id), None).await
    }

    /// Search the mesh; filter, ordering and paging go as query parameters.
    pub async fn search<D>(&self, query: &MeshQuery) -> Result<PageResult<D>>
    where
        D: DeserializeOwned,
    {
        let pairs = query.to_pairs();
        let path = if pairs.is_empty() {
            self.collection_path()
        } else {
            let encoded = serde_urlencoded::to_string(&pairs)
                .map_err(|err| MeshyError::Encode(err.to_string()))?;
            format!("{}?{}", self.collection_path(), encoded)
        };
        self.requests.get(&path, None).await
    }

    fn collection_path(&self) -> String {
        format!("meshes/{}", self.name)
    }

    fn document_path(&self, id: &str) -> String {
        format!("meshes/{}/{}", self.name, id)
    }
}
