//! Genie adapters - Databricks REST client and test double.

mod databricks_client;
mod dto;
mod mock_client;

pub use databricks_client::{DatabricksGenieClient, GenieClientConfig};
pub use mock_client::MockGenieClient;
