//! Steps covering key resolution, fallback, and interpolation.

use crate::fixtures::CatalogContext;
use anyhow::{Result, anyhow, ensure};
use locale_catalog::{
    ArgValue, Catalog, CatalogError, CatalogResult, LocaleTag, TemplateArgs, Translator,
};
use rstest_bdd_macros::{given, then, when};
use test_helpers::catalogs;

fn sample_translator(default: &LocaleTag) -> Result<Translator> {
    let translator = Translator::builder()
        .with_catalog(
            LocaleTag::parse("en")?,
            Catalog::from_json_value(catalogs::english())?,
        )
        .with_catalog(
            LocaleTag::parse("zh")?,
            Catalog::from_json_value(catalogs::chinese())?,
        )
        .with_default_locale(default.clone())
        .try_build()?;
    Ok(translator)
}

fn record<T>(
    catalog_context: &CatalogContext,
    outcome: CatalogResult<T>,
    store: impl FnOnce(&CatalogContext, T),
) {
    match outcome {
        Ok(value) => store(catalog_context, value),
        Err(error) => catalog_context.error.set(error),
    }
}

fn with_translator<T>(
    catalog_context: &CatalogContext,
    f: impl FnOnce(&Translator) -> T,
) -> Result<T> {
    catalog_context
        .translator
        .with_ref(f)
        .ok_or_else(|| anyhow!("translator must be initialised"))
}

fn take_error(catalog_context: &CatalogContext) -> Result<CatalogError> {
    catalog_context
        .error
        .take()
        .ok_or_else(|| anyhow!("expected resolution to fail"))
}

#[given("the sample catalogues with {tag} as default")]
fn sample_catalogues(catalog_context: &CatalogContext, tag: String) -> Result<()> {
    let default = LocaleTag::parse(&tag)?;
    catalog_context.translator.set(sample_translator(&default)?);
    Ok(())
}

#[given("{tag} is the active locale")]
fn active_locale(catalog_context: &CatalogContext, tag: String) -> Result<()> {
    let locale = LocaleTag::parse(&tag)?;
    with_translator(catalog_context, |translator| translator.set_active(&locale))??;
    Ok(())
}

#[when("I resolve the scalar {path}")]
fn resolve_scalar(catalog_context: &CatalogContext, path: String) -> Result<()> {
    let outcome = with_translator(catalog_context, |translator| {
        translator.resolve(&path, &TemplateArgs::new())
    })?;
    record(catalog_context, outcome, |ctx, text| ctx.text.set(text));
    Ok(())
}

#[when("I render {path} for user {username}")]
fn render_for_user(catalog_context: &CatalogContext, path: String, username: String) -> Result<()> {
    let args = TemplateArgs::from([("username", ArgValue::from(username.as_str()))]);
    let outcome = with_translator(catalog_context, |translator| {
        translator.resolve(&path, &args)
    })?;
    record(catalog_context, outcome, |ctx, text| ctx.text.set(text));
    Ok(())
}

#[when("I resolve position {index} of {path}")]
fn resolve_position(catalog_context: &CatalogContext, index: usize, path: String) -> Result<()> {
    let outcome = with_translator(catalog_context, |translator| {
        translator.resolve_index(&path, index, &TemplateArgs::new())
    })?;
    record(catalog_context, outcome, |ctx, text| ctx.text.set(text));
    Ok(())
}

#[when("I resolve the list {path}")]
fn resolve_list(catalog_context: &CatalogContext, path: String) -> Result<()> {
    let outcome = with_translator(catalog_context, |translator| {
        translator.resolve_list(&path, &TemplateArgs::new())
    })?;
    record(catalog_context, outcome, |ctx, lines| ctx.lines.set(lines));
    Ok(())
}

#[then("the text is {expected}")]
fn text_is(catalog_context: &CatalogContext, expected: String) -> Result<()> {
    if let Some(error) = catalog_context.error.take() {
        return Err(anyhow!("resolution failed: {error}"));
    }
    let actual = catalog_context
        .text
        .take()
        .ok_or_else(|| anyhow!("expected rendered text"))?;
    ensure!(actual == expected, "rendered {actual:?}; expected {expected:?}");
    Ok(())
}

#[then("resolution fails with index {index} out of range")]
fn fails_out_of_range(catalog_context: &CatalogContext, index: usize) -> Result<()> {
    let error = take_error(catalog_context)?;
    ensure!(
        matches!(error, CatalogError::IndexOutOfRange { index: actual, .. } if actual == index),
        "unexpected error: {error:?}"
    );
    Ok(())
}

#[then("resolution fails naming the parameter {name}")]
fn fails_missing_param(catalog_context: &CatalogContext, name: String) -> Result<()> {
    let error = take_error(catalog_context)?;
    ensure!(
        matches!(&error, CatalogError::MissingParam { name: actual } if *actual == name),
        "unexpected error: {error:?}"
    );
    Ok(())
}

#[then("resolution fails with a missing key")]
fn fails_missing_key(catalog_context: &CatalogContext) -> Result<()> {
    let error = take_error(catalog_context)?;
    ensure!(
        matches!(error, CatalogError::MissingKey { .. }),
        "unexpected error: {error:?}"
    );
    Ok(())
}

#[then("{count} lines are rendered")]
fn lines_rendered(catalog_context: &CatalogContext, count: usize) -> Result<()> {
    if let Some(error) = catalog_context.error.take() {
        return Err(anyhow!("resolution failed: {error}"));
    }
    let lines = catalog_context
        .lines
        .take()
        .ok_or_else(|| anyhow!("expected rendered lines"))?;
    ensure!(lines.len() == count, "rendered {lines:?}; expected {count} lines");
    ensure!(
        lines.iter().all(|line| !line.is_empty()),
        "rendered an empty line: {lines:?}"
    );
    Ok(())
}
