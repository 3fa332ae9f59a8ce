pub mod catalog;
pub mod config;
pub mod domain;
pub mod endpoint;
pub mod errors;
pub mod pricing;
pub mod tool_result;

pub use catalog::NameQuery;
pub use domain::order::{CheckoutDetails, OrderRequest, OrderResult, PaymentCard, ShippingAddress};
pub use domain::product::{Money, Product, ProductDetails};
pub use endpoint::ServiceEndpoint;
pub use errors::{NormalizeError, RemoteCallError, RemoteFailureKind, RemoteService};
pub use tool_result::{OrderConfirmation, ProductLookup, ProductNames, ToolResult};
