//! Steps covering active-locale switches and observer delivery.

use std::sync::{Arc, Mutex};

use crate::fixtures::{CatalogContext, Observations};
use anyhow::{Result, anyhow, ensure};
use locale_catalog::{CatalogError, LocaleChange, LocaleTag};
use rstest_bdd_macros::{given, then, when};

fn snapshot(observations: &Observations) -> Result<Vec<String>> {
    observations
        .lock()
        .map(|seen| seen.clone())
        .map_err(|_| anyhow!("observer recording poisoned"))
}

fn observed(catalog_context: &CatalogContext) -> Result<Vec<Vec<String>>> {
    catalog_context
        .observers
        .with_ref(|recorders| recorders.iter().map(snapshot).collect::<Result<Vec<_>>>())
        .ok_or_else(|| anyhow!("no observers were registered"))?
}

#[given("two recording observers")]
fn two_observers(catalog_context: &CatalogContext) -> Result<()> {
    let recorders: Vec<Observations> = (0..2).map(|_| Arc::new(Mutex::new(Vec::new()))).collect();
    catalog_context
        .translator
        .with_ref(|translator| {
            for recorder in &recorders {
                let sink = Arc::clone(recorder);
                translator.on_locale_change(move |change: &LocaleChange| {
                    if let Ok(mut seen) = sink.lock() {
                        seen.push(change.current.as_str().to_owned());
                    }
                });
            }
        })
        .ok_or_else(|| anyhow!("translator must be initialised"))?;
    catalog_context.observers.set(recorders);
    Ok(())
}

#[when("the active locale is set to {tag}")]
fn set_active(catalog_context: &CatalogContext, tag: String) -> Result<()> {
    let locale = LocaleTag::parse(&tag)?;
    catalog_context
        .translator
        .with_ref(|translator| translator.set_active(&locale))
        .ok_or_else(|| anyhow!("translator must be initialised"))??;
    Ok(())
}

#[when("I try to activate {tag}")]
fn try_activate(catalog_context: &CatalogContext, tag: String) -> Result<()> {
    let locale = LocaleTag::parse(&tag)?;
    let outcome = catalog_context
        .translator
        .with_ref(|translator| translator.set_active(&locale))
        .ok_or_else(|| anyhow!("translator must be initialised"))?;
    if let Err(error) = outcome {
        catalog_context.error.set(error);
    }
    Ok(())
}

#[then("every observer saw {sequence}")]
fn every_observer_saw(catalog_context: &CatalogContext, sequence: String) -> Result<()> {
    let expected: Vec<String> = sequence.split(" then ").map(str::to_owned).collect();
    let seen = observed(catalog_context)?;
    ensure!(!seen.is_empty(), "no observers were registered");
    for recorded in seen {
        ensure!(recorded == expected, "observer saw {recorded:?}; expected {expected:?}");
    }
    Ok(())
}

#[then("the switch fails as an unknown locale")]
fn switch_unknown(catalog_context: &CatalogContext) -> Result<()> {
    let error = catalog_context
        .error
        .take()
        .ok_or_else(|| anyhow!("expected the switch to fail"))?;
    ensure!(
        matches!(error, CatalogError::UnknownLocale { .. }),
        "unexpected error: {error:?}"
    );
    Ok(())
}

#[then("no observer was notified")]
fn nobody_notified(catalog_context: &CatalogContext) -> Result<()> {
    let seen = observed(catalog_context)?;
    ensure!(
        seen.iter().all(Vec::is_empty),
        "observers were notified: {seen:?}"
    );
    Ok(())
}
