//! Unit tests for the translator facade and the `Localizer` trait.

use super::*;
use crate::interpolate::ArgValue;
use rstest::{fixture, rstest};
use std::sync::Mutex;

fn tag(raw: &str) -> LocaleTag {
    LocaleTag::parse(raw).expect("valid tag")
}

fn english() -> Catalog {
    Catalog::builder()
        .namespace("common", |ns| {
            ns.scalar("loggedAs", "Logged as <b>{username}</b>")
                .scalar("about", "About")
        })
        .namespace("welcome", |ns| {
            ns.list("messages", ["There is no server.", "Hello {name}."])
        })
        .namespace("customRouting", |ns| {
            ns.indexed("messages", |m| {
                m.at(0, "first")
                    .at(1, "second")
                    .named("noSiteDatFileFound", "none found")
            })
        })
        .build()
        .expect("valid english")
}

fn chinese() -> Catalog {
    Catalog::builder()
        .namespace("common", |ns| {
            ns.scalar("loggedAs", "正在以 <b>{username}</b> 的身份登录")
        })
        .build()
        .expect("valid chinese")
}

#[fixture]
fn translator() -> Translator {
    Translator::builder()
        .with_catalog(tag("en"), english())
        .with_catalog(tag("zh"), chinese())
        .with_default_locale(tag("en"))
        .try_build()
        .expect("translator should build")
}

fn user(name: &str) -> TemplateArgs<'_> {
    TemplateArgs::from([("username", ArgValue::from(name))])
}

#[rstest]
fn noop_localizer_relies_on_fallback() {
    let localizer = NoOpLocalizer::new();
    assert_eq!(localizer.message("common.about", None, "fallback"), "fallback");
    assert_eq!(localizer.message_or_path("common.about", None), "common.about");
}

#[rstest]
fn resolves_against_the_active_locale(translator: Translator) {
    assert_eq!(
        translator.resolve("common.loggedAs", &user("alice")).expect("en"),
        "Logged as <b>alice</b>"
    );
    translator.set_active(&tag("zh")).expect("switch");
    assert_eq!(
        translator.resolve("common.loggedAs", &user("alice")).expect("zh"),
        "正在以 <b>alice</b> 的身份登录"
    );
    assert_eq!(
        translator.resolve("common.about", &TemplateArgs::new()).expect("fallback"),
        "About"
    );
}

#[rstest]
fn explicit_locales_must_be_registered(translator: Translator) {
    let err = translator
        .resolve_in(&tag("fr"), "common.about", &TemplateArgs::new())
        .expect_err("fr is unknown");
    assert!(matches!(err, CatalogError::UnknownLocale { .. }));
    assert_eq!(
        translator
            .resolve_in(&tag("zh"), "common.about", &TemplateArgs::new())
            .expect("fallback"),
        "About"
    );
}

#[rstest]
fn lists_render_each_item(translator: Translator) {
    let args = TemplateArgs::from([("name", ArgValue::from("<you>"))]);
    assert_eq!(
        translator.resolve_list("welcome.messages", &args).expect("list"),
        vec!["There is no server.", "Hello &lt;you&gt;."]
    );
    let err = translator
        .resolve("welcome.messages", &args)
        .expect_err("lists are not scalars");
    assert!(matches!(err, CatalogError::UnexpectedShape { .. }));
}

#[rstest]
fn indexed_maps_resolve_by_position_and_name(translator: Translator) {
    let none = TemplateArgs::new();
    assert_eq!(
        translator
            .resolve_index("customRouting.messages", 1, &none)
            .expect("index"),
        "second"
    );
    assert_eq!(
        translator
            .resolve("customRouting.messages.noSiteDatFileFound", &none)
            .expect("name"),
        "none found"
    );
    assert!(matches!(
        translator.resolve_index("customRouting.messages", 5, &none),
        Err(CatalogError::IndexOutOfRange { index: 5, .. })
    ));
}

#[rstest]
fn resolve_entry_keeps_the_authored_shape(translator: Translator) {
    let rendered = translator
        .resolve_entry(None, "customRouting.messages", &TemplateArgs::new())
        .expect("entry");
    assert_eq!(
        rendered,
        RenderedEntry::Indexed(vec![
            (IndexedKey::Index(0), "first".to_owned()),
            (IndexedKey::Index(1), "second".to_owned()),
            (IndexedKey::Name("noSiteDatFileFound".to_owned()), "none found".to_owned()),
        ])
    );
}

#[rstest]
fn lookup_reports_recoverable_issues() {
    let issues = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&issues);
    let translator = Translator::builder()
        .with_catalog(tag("en"), english())
        .with_default_locale(tag("en"))
        .with_issue_reporter(Arc::new(move |issue: &ResolutionIssue<'_>| {
            sink.lock()
                .expect("issue lock")
                .push((issue.path.to_owned(), issue.error.to_string()));
        }))
        .try_build()
        .expect("translator should build");

    assert_eq!(translator.message_or_path("common.missing", None), "common.missing");
    assert_eq!(translator.message("common.loggedAs", None, "Logged in"), "Logged in");
    assert_eq!(
        translator.lookup("common.loggedAs", Some(&user("bob"))).as_deref(),
        Some("Logged as <b>bob</b>")
    );

    let recorded = issues.lock().expect("issue lock");
    assert_eq!(recorded.len(), 2);
    assert!(recorded.iter().any(|(path, error)| path == "common.loggedAs"
        && error.contains("username")));
}

#[test]
fn uninitialised_translators_refuse_to_resolve() {
    let translator = Translator::builder()
        .with_catalog(tag("en"), english())
        .try_build()
        .expect("translator should build");
    assert!(matches!(
        translator.resolve("common.about", &TemplateArgs::new()),
        Err(CatalogError::NotInitialized)
    ));
    translator.set_default(&tag("en")).expect("default");
    assert!(translator.resolve("common.about", &TemplateArgs::new()).is_ok());
}

#[test]
fn builder_rejects_unregistered_defaults() {
    let err = Translator::builder()
        .with_catalog(tag("en"), english())
        .with_default_locale(tag("ja"))
        .try_build()
        .expect_err("ja has no catalogue");
    assert!(matches!(err, CatalogError::UnknownLocale { .. }));
}

#[test]
fn verbatim_escaping_passes_values_through() {
    let translator = Translator::builder()
        .with_catalog(tag("en"), english())
        .with_default_locale(tag("en"))
        .with_escaping(Escaping::Verbatim)
        .try_build()
        .expect("translator should build");
    assert_eq!(
        translator
            .resolve("common.loggedAs", &user("<i>root</i>"))
            .expect("render"),
        "Logged as <b><i>root</i></b>"
    );
}
