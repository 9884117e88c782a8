//! Scenario state shared between catalogue steps.

use std::sync::{Arc, Mutex};

use locale_catalog::{CatalogError, Translator};
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;

/// Locale tags seen by one recording observer, in delivery order.
pub type Observations = Arc<Mutex<Vec<String>>>;

/// State threaded through resolution and switching scenarios.
#[derive(Debug, Default, ScenarioState)]
pub struct CatalogContext {
    /// Translator built from the sample catalogues.
    pub translator: Slot<Translator>,
    /// Recorders registered with the translator.
    pub observers: Slot<Vec<Observations>>,
    /// Most recent rendered scalar.
    pub text: Slot<String>,
    /// Most recent rendered list.
    pub lines: Slot<Vec<String>>,
    /// Most recent failure.
    pub error: Slot<CatalogError>,
}

/// Provides an empty context for each scenario.
#[fixture]
pub fn catalog_context() -> CatalogContext {
    CatalogContext::default()
}
