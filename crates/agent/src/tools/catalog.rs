use std::sync::Arc;

use async_trait::async_trait;
use boutique_core::{NameQuery, ProductLookup, ProductNames, ToolResult};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{info, warn};

use super::{decode_args, Tool};
use crate::normalize;
use crate::services::CatalogService;

pub struct ListAllProducts {
    catalog: Arc<dyn CatalogService>,
}

impl ListAllProducts {
    pub fn new(catalog: Arc<dyn CatalogService>) -> Self {
        Self { catalog }
    }

    pub async fn run(&self) -> ToolResult<ProductNames> {
        match self.catalog.list_products().await {
            Ok(products) => {
                let products = normalize::product_names(&products);
                info!(
                    event_name = "tool.list_all_products.success",
                    product_count = products.len(),
                    "listed catalog products"
                );
                ToolResult::success(ProductNames { products })
            }
            Err(error) => {
                warn!(
                    event_name = "tool.list_all_products.remote_error",
                    service = %error.service,
                    rejected = error.is_rejection(),
                    error = %error,
                    "catalog listing failed"
                );
                ToolResult::error(format!("Network error: {error}"))
            }
        }
    }
}

#[async_trait]
impl Tool for ListAllProducts {
    fn name(&self) -> &'static str {
        "list_all_products"
    }

    fn description(&self) -> &'static str {
        "Lists the names of every product available in the Online Boutique catalog."
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {},
            "additionalProperties": false
        })
    }

    async fn execute(&self, _input: Value) -> ToolResult<Value> {
        self.run().await.into_json()
    }
}

#[derive(Deserialize)]
struct GetProductDetailsArgs {
    product_name: String,
}

pub struct GetProductDetails {
    catalog: Arc<dyn CatalogService>,
}

impl GetProductDetails {
    pub fn new(catalog: Arc<dyn CatalogService>) -> Self {
        Self { catalog }
    }

    /// Looks up one product by name. The catalog is fetched fresh on every call.
    pub async fn run(&self, product_name: &str) -> ToolResult<ProductLookup> {
        let products = match self.catalog.list_products().await {
            Ok(products) => products,
            Err(error) => {
                warn!(
                    event_name = "tool.get_product_details.remote_error",
                    service = %error.service,
                    rejected = error.is_rejection(),
                    error = %error,
                    "catalog listing failed"
                );
                return ToolResult::error(format!("Network error: {error}"));
            }
        };

        let query = NameQuery::new(product_name);
        let Some(found) = query.find_first(&products, |product| product.name.as_str()) else {
            info!(
                event_name = "tool.get_product_details.not_found",
                query = query.key(),
                catalog_size = products.len(),
                "product not found"
            );
            return ToolResult::error(format!("Product '{product_name}' not found."));
        };

        match normalize::product_details(found) {
            Ok(product) => {
                info!(
                    event_name = "tool.get_product_details.success",
                    product = %product.name,
                    "product details resolved"
                );
                ToolResult::success(ProductLookup { product })
            }
            Err(error) => {
                warn!(
                    event_name = "tool.get_product_details.invalid_data",
                    product = %found.name,
                    error = %error,
                    "catalog entry could not be normalized"
                );
                ToolResult::error(format!("Invalid catalog data: {error}"))
            }
        }
    }
}

#[async_trait]
impl Tool for GetProductDetails {
    fn name(&self) -> &'static str {
        "get_product_details"
    }

    fn description(&self) -> &'static str {
        "Gets the description, price and categories of one product, matched by exact name \
         ignoring case and surrounding whitespace."
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "product_name": {
                    "type": "string",
                    "description": "Name of the product as listed by list_all_products."
                }
            },
            "required": ["product_name"]
        })
    }

    async fn execute(&self, input: Value) -> ToolResult<Value> {
        match decode_args::<GetProductDetailsArgs>(self.name(), input) {
            Ok(args) => self.run(&args.product_name).await.into_json(),
            Err(message) => ToolResult::error(message),
        }
    }
}
