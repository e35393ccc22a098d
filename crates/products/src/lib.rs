//! Products module: the catalog entity, its repository boundary, and the
//! service the HTTP layer talks to.
//!
//! No IO lives here; storage is supplied through [`ProductRepository`].

pub mod product;
pub mod repository;
pub mod service;

pub use product::{PricingMetadata, Product, ProductId};
pub use repository::{ProductRepository, RepositoryError, RepositoryResult};
pub use service::ProductService;
