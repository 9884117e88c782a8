//! Inspection commands writing plain text or JSON to any [`Write`] sink.

use std::io::Write;

use locale_catalog::{
    ArgValue, CoverageReport, LocaleTag, LocalisationSettings, RenderedEntry, TemplateArgs,
    Translator, coverage_report,
};
use tracing::debug;

use crate::cli::{Args, Command, CoverageArgs, ResolveArgs};
use crate::error::InspectError;

/// Runs the parsed command, writing its output to `out`.
///
/// # Errors
///
/// Returns [`InspectError`] when settings or catalogues cannot be loaded,
/// the requested entry cannot be rendered, or writing fails.
pub fn run(args: &Args, out: &mut impl Write) -> Result<(), InspectError> {
    let settings = settings_for(args)?;
    let translator = Translator::from_settings(&settings)?;
    match &args.command {
        Command::Resolve(resolve) => run_resolve(&translator, resolve, out),
        Command::Keys(_) => run_keys(&translator, out),
        Command::Coverage(coverage) => run_coverage(&translator, *coverage, out),
    }
}

/// Layers the command-line flags over the loaded settings.
///
/// # Errors
///
/// Returns [`InspectError::MissingCatalogDir`] when no catalogue directory
/// is configured, and [`InspectError::Catalog`] when the settings, the
/// `--default` tag, or the `--locale` tag cannot be parsed.
pub fn settings_for(args: &Args) -> Result<LocalisationSettings, InspectError> {
    let mut settings = LocalisationSettings::load(args.config.as_deref())?;
    if let Some(dir) = &args.dir {
        settings.catalog_dir = Some(dir.clone());
    }
    if let Some(raw) = &args.default_locale {
        settings.default_locale = LocaleTag::parse(raw)?;
    }
    if settings.catalog_dir.is_none() {
        return Err(InspectError::MissingCatalogDir);
    }
    if let Some(raw) = args.command.locale() {
        settings.active_locale = Some(LocaleTag::parse(raw)?);
    }
    debug!(?settings, "resolved inspector settings");
    Ok(settings)
}

fn run_resolve(
    translator: &Translator,
    resolve: &ResolveArgs,
    out: &mut impl Write,
) -> Result<(), InspectError> {
    let params: TemplateArgs<'_> = resolve
        .params
        .iter()
        .map(|(name, value)| (name.as_str(), ArgValue::from(value.as_str())))
        .collect();

    if let Some(index) = resolve.index {
        let text = translator.resolve_index(&resolve.path, index, &params)?;
        writeln!(out, "{text}")?;
        return Ok(());
    }
    match translator.resolve_entry(None, &resolve.path, &params)? {
        RenderedEntry::Scalar(text) => writeln!(out, "{text}")?,
        RenderedEntry::List(lines) => {
            for line in lines {
                writeln!(out, "{line}")?;
            }
        }
        RenderedEntry::Indexed(entries) => {
            for (key, text) in entries {
                writeln!(out, "{key}: {text}")?;
            }
        }
    }
    Ok(())
}

fn run_keys(translator: &Translator, out: &mut impl Write) -> Result<(), InspectError> {
    let catalog = translator.store().get(&translator.active()?)?;
    for path in catalog.entry_paths() {
        writeln!(out, "{path}")?;
    }
    Ok(())
}

fn run_coverage(
    translator: &Translator,
    coverage: CoverageArgs,
    out: &mut impl Write,
) -> Result<(), InspectError> {
    let report = coverage_report(translator.store());
    if coverage.json {
        serde_json::to_writer_pretty(&mut *out, &report)?;
        writeln!(out)?;
        return Ok(());
    }
    write_coverage(&report, out)
}

fn write_coverage(report: &CoverageReport, out: &mut impl Write) -> Result<(), InspectError> {
    for locale in &report.locales {
        let marker = if report.default_locale.as_ref() == Some(&locale.locale) {
            " (default)"
        } else {
            ""
        };
        writeln!(
            out,
            "{}{marker}: {}/{} present, {} fallback-only, {} missing",
            locale.locale,
            locale.present,
            report.total_paths,
            locale.fallback_only.len(),
            locale.missing.len(),
        )?;
        for path in &locale.fallback_only {
            writeln!(out, "  fallback {path}")?;
        }
        for path in &locale.missing {
            writeln!(out, "  missing  {path}")?;
        }
    }
    Ok(())
}
