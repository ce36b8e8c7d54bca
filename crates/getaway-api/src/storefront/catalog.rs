// Catalog queries: the landing collection, tag-filtered products and
// the recently updated recommendations.

use serde_json::json;

use super::client::StorefrontClient;
use super::queries;
use super::types::{CollectionData, Product, ProductsData};
use crate::Error;

impl StorefrontClient {
    /// Products of the collection `handle`, first `first` of them.
    ///
    /// Returns `Ok(None)` when no collection has that handle.
    pub async fn collection_products(
        &self,
        handle: &str,
        first: u32,
    ) -> Result<Option<Vec<Product>>, Error> {
        let data: CollectionData = self
            .execute(
                "collection",
                queries::COLLECTION_PRODUCTS,
                json!({ "handle": handle, "first": first }),
            )
            .await?;
        Ok(data.collection.map(|c| c.products.nodes))
    }

    /// Products matching a storefront search query such as `tag:choice`.
    pub async fn products_by_query(&self, query: &str, first: u32) -> Result<Vec<Product>, Error> {
        let data: ProductsData = self
            .execute(
                "products",
                queries::PRODUCTS_BY_QUERY,
                json!({ "query": query, "first": first }),
            )
            .await?;
        Ok(data.products.nodes)
    }

    /// Most recently updated products.
    pub async fn recommended_products(&self, first: u32) -> Result<Vec<Product>, Error> {
        let data: ProductsData = self
            .execute(
                "recommendedProducts",
                queries::RECOMMENDED_PRODUCTS,
                json!({ "first": first }),
            )
            .await?;
        Ok(data.products.nodes)
    }
}
