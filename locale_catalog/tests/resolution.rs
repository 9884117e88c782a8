//! Resolution properties checked against the sample catalogues.
#![expect(
    clippy::expect_used,
    reason = "tests panic to surface catalogue mistakes"
)]

use locale_catalog::{
    ArgValue, Catalog, CatalogError, Entry, KeyPath, LocaleTag, Localizer, RenderedEntry,
    ResolutionIssue, ResolutionIssueReporter, TemplateArgs, Translator,
};
use rstest::{fixture, rstest};
use std::sync::{Arc, Mutex};
use test_helpers::catalogs;

fn tag(value: &str) -> LocaleTag {
    LocaleTag::parse(value).expect("valid locale tag")
}

#[fixture]
fn translator() -> Translator {
    Translator::builder()
        .with_catalog(
            tag("en"),
            Catalog::from_json_value(catalogs::english()).expect("english catalogue"),
        )
        .with_catalog(
            tag("zh"),
            Catalog::from_json_value(catalogs::chinese()).expect("chinese catalogue"),
        )
        .with_default_locale(tag("en"))
        .with_active_locale(tag("zh"))
        .try_build()
        .expect("translator")
}

#[rstest]
fn every_placeholder_free_scalar_resolves_to_its_authored_text(translator: Translator) {
    for locale in ["en", "zh"] {
        let locale = tag(locale);
        let catalog = translator.store().get(&locale).expect("registered");
        for path in catalog.entry_paths() {
            let key = KeyPath::parse(&path).expect("catalogue paths parse");
            let lookup = translator
                .store()
                .lookup(&locale, &key, None)
                .expect("authored path resolves");
            assert!(!lookup.fell_back, "{path} should not fall back in {locale}");
            let Entry::Scalar(template) = lookup.entry else {
                continue;
            };
            if !template.placeholders().is_empty() {
                continue;
            }
            let rendered = translator
                .resolve_in(&locale, &path, &TemplateArgs::new())
                .expect("scalar renders");
            assert_eq!(rendered, template.as_str());
        }
    }
}

#[rstest]
fn supplying_every_parameter_leaves_no_tokens(translator: Translator) {
    let args = TemplateArgs::from([
        ("username", ArgValue::from("alice")),
        ("version", ArgValue::from("2.0")),
        ("V2RayLocationAsset", ArgValue::from("/usr/share/v2ray")),
        ("url", ArgValue::from("http://localhost:2017")),
    ]);
    let en = tag("en");
    for path in [
        "common.loggedAs",
        "welcome.docker",
        "customRouting.messages.noSiteDatFileFound",
        "axios.messages.noBackendFound",
    ] {
        let rendered = translator.resolve_in(&en, path, &args).expect("renders");
        assert!(
            !rendered.contains('{') && !rendered.contains('}'),
            "{path} rendered {rendered:?}"
        );
    }
}

#[rstest]
#[case("username")]
#[case("version")]
fn omitting_a_parameter_names_it(translator: Translator, #[case] omitted: &str) {
    let mut args = TemplateArgs::from([
        ("username", ArgValue::from("alice")),
        ("version", ArgValue::from("2.0")),
    ]);
    args.remove(omitted);
    let path = if omitted == "username" {
        "common.loggedAs"
    } else {
        "welcome.docker"
    };
    let error = translator
        .resolve_in(&tag("en"), path, &args)
        .expect_err("parameter is missing");
    assert!(
        matches!(&error, CatalogError::MissingParam { name } if name == omitted),
        "unexpected error: {error:?}"
    );
}

#[rstest]
#[case("common.v2rayCoreStatus", "Status of v2ray-core")]
#[case("setting.messages.gfwlist", "Based on modified time of file which sometimes is after latest version online.")]
#[case(
    "about",
    "<p>v2rayA is a web GUI client of V2Ray.</p><p class=\"about-small\">Default ports:</p>"
)]
fn untranslated_paths_fall_back_to_the_default(
    translator: Translator,
    #[case] path: &str,
    #[case] expected: &str,
) {
    let rendered = translator
        .resolve(path, &TemplateArgs::new())
        .expect("falls back");
    assert_eq!(rendered, expected);
}

#[rstest]
fn fallback_is_visible_on_lookups(translator: Translator) {
    let key = KeyPath::parse("common.v2rayCoreStatus").expect("path");
    let lookup = translator
        .store()
        .lookup(&tag("zh"), &key, None)
        .expect("falls back");
    assert!(lookup.fell_back);
    assert_eq!(lookup.locale, tag("en"));
}

#[rstest]
fn resolving_twice_is_idempotent(translator: Translator) {
    let args = TemplateArgs::from([("username", ArgValue::from("bob"))]);
    let first = translator.resolve("common.loggedAs", &args).expect("first");
    let second = translator.resolve("common.loggedAs", &args).expect("second");
    assert_eq!(first, second);
    assert_eq!(first, "正在以 <b>bob</b> 的身份登录");
}

#[rstest]
fn markup_around_placeholders_is_untouched(translator: Translator) {
    let args = TemplateArgs::from([("username", ArgValue::from("alice"))]);
    let rendered = translator
        .resolve_in(&tag("en"), "common.loggedAs", &args)
        .expect("renders");
    assert_eq!(rendered, "Logged as <b>alice</b>");
}

#[rstest]
fn indexed_map_is_addressed_by_position_and_name() {
    let catalog = Catalog::from_json_str(
        r#"{"m": {"0": "first", "1": "second", "noSiteDatFileFound": "none found"}}"#,
    )
    .expect("catalogue");
    let translator = Translator::builder()
        .with_catalog(tag("en"), catalog)
        .with_default_locale(tag("en"))
        .try_build()
        .expect("translator");
    let none = TemplateArgs::new();

    assert_eq!(translator.resolve_index("m", 1, &none).expect("position"), "second");
    assert_eq!(
        translator.resolve("m.noSiteDatFileFound", &none).expect("name"),
        "none found"
    );
    let error = translator
        .resolve_index("m", 5, &none)
        .expect_err("out of range");
    assert!(matches!(
        error,
        CatalogError::IndexOutOfRange { index: 5, .. }
    ));
}

#[rstest]
fn partial_indexed_maps_fall_back_per_position(translator: Translator) {
    let none = TemplateArgs::new();
    let translated = translator
        .resolve_index("customRouting.messages", 0, &TemplateArgs::from([(
            "V2RayLocationAsset",
            ArgValue::from("/opt"),
        )]))
        .expect("translated position");
    assert!(translated.starts_with("v2rayA将识别"));
    assert_eq!(
        translator
            .resolve_index("customRouting.messages", 2, &none)
            .expect("default position"),
        "Multi-select is supported."
    );
}

#[rstest]
fn whole_entries_keep_their_shape(translator: Translator) {
    let entry = translator
        .resolve_entry(Some(&tag("zh")), "welcome.messages", &TemplateArgs::new())
        .expect("list");
    let RenderedEntry::List(lines) = entry else {
        panic!("expected a list, got {entry:?}");
    };
    assert_eq!(lines.len(), 2);
}

#[rstest]
fn shape_mismatches_are_not_hidden_by_fallback(translator: Translator) {
    let error = translator
        .resolve("welcome.messages", &TemplateArgs::new())
        .expect_err("list is not a scalar");
    assert!(matches!(error, CatalogError::UnexpectedShape { .. }));
}

#[rstest]
fn the_localizer_reports_and_returns_nothing() {
    let issues = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&issues);
    let reporter: ResolutionIssueReporter = Arc::new(move |issue: &ResolutionIssue<'_>| {
        sink.lock()
            .expect("issue sink")
            .push((issue.path.to_owned(), issue.error.to_string()));
    });
    let translator = Translator::builder()
        .with_catalog(
            tag("en"),
            Catalog::from_json_value(catalogs::english()).expect("english catalogue"),
        )
        .with_default_locale(tag("en"))
        .with_issue_reporter(reporter)
        .try_build()
        .expect("translator");

    assert_eq!(translator.message_or_path("common.missing", None), "common.missing");
    assert_eq!(translator.message("v2ray.stop", None, "Stop!"), "Stop");

    let recorded = issues.lock().expect("issue sink");
    assert_eq!(
        recorded.as_slice(),
        [(
            "common.missing".to_owned(),
            "no entry found for 'common.missing'".to_owned()
        )]
    );
}
