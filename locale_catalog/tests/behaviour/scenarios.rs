//! Binds the feature files to the catalogue step registry.

use crate::fixtures::{CatalogContext, catalog_context};
use rstest_bdd_macros::scenarios;

scenarios!(
    "tests/features/fallback.feature",
    fixtures = [catalog_context: CatalogContext]
);
scenarios!(
    "tests/features/locale_switching.feature",
    fixtures = [catalog_context: CatalogContext]
);
