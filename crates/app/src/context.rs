//! App Context

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    path::Path,
    sync::Arc,
};

use thiserror::Error;

use crate::{
    catalog::{Catalog, CatalogError},
    domain::pricing::{DefaultPricingService, PricingService},
};

/// Failures while building the application context.
#[derive(Debug, Error)]
pub enum AppInitError {
    /// The catalog could not be loaded.
    #[error("failed to load catalog")]
    Catalog(#[source] CatalogError),
}

/// Services shared by the CLI commands.
#[derive(Clone)]
pub struct AppContext {
    /// Pricing service backed by the catalog
    pub pricing: Arc<dyn PricingService>,

    /// The loaded catalog
    pub catalog: Arc<Catalog>,
}

impl Debug for AppContext {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("AppContext")
            .field("catalog", &self.catalog)
            .finish_non_exhaustive()
    }
}

impl AppContext {
    /// Build application context from a catalog file.
    ///
    /// # Errors
    ///
    /// Returns an error when the catalog cannot be read or parsed.
    pub fn from_catalog_path(path: impl AsRef<Path>) -> Result<Self, AppInitError> {
        let catalog = Catalog::load(path).map_err(AppInitError::Catalog)?;

        Ok(Self::from_catalog(catalog))
    }

    /// Build application context around an already loaded catalog.
    pub fn from_catalog(catalog: Catalog) -> Self {
        let catalog = Arc::new(catalog);

        Self {
            pricing: Arc::new(DefaultPricingService::new(catalog.clone(), catalog.clone())),
            catalog,
        }
    }
}
