use super::*;
use crate::bundle::BundleFormat;
use crate::plural::{PluralCategory, PluralForms, PluralRuleKind};
use chrono::NaiveDate;

fn loc(tag: &str) -> Locale {
    Locale::parse(tag).unwrap()
}

fn user_ctx(tag: &str) -> Context {
    let mut ctx = Context::builder();
    ctx.with_user_locale(Some(loc(tag))).unwrap();
    ctx.freeze()
}

fn catalog() -> Catalog {
    let mut catalog = Catalog::new();
    catalog.insert_single("greet.hello", loc("en"), "Hello, {0}!");
    catalog.insert_single("greet.hello", loc("fr"), "Bonjour, {0} !");
    catalog.insert_single("greet.only_root", Locale::root(), "root text");
    catalog.insert_plural(
        "cart.items",
        loc("en"),
        PluralForms::new("{0} items").with(PluralCategory::One, "{0} item"),
    );
    catalog.insert_plural(
        "cart.items",
        loc("ru"),
        PluralForms::new("{#} товаров").with(PluralCategory::One, "{#} товар"),
    );
    catalog.insert_plural(
        "race.place",
        loc("en"),
        PluralForms::new("{#}th place")
            .with(PluralCategory::One, "{#}st place")
            .with(PluralCategory::Two, "{#}nd place")
            .with(PluralCategory::Few, "{#}rd place")
            .with_kind(PluralRuleKind::Ordinal),
    );
    catalog.insert_single("event.when", loc("de"), "Am {0,date} um {0,time}");
    catalog.insert_single("broken.template", loc("en"), "Hello {0");
    catalog.insert_single("nested.outer", loc("en"), "Error in {0}: {1}");
    catalog.insert_single("nested.arg", loc("en"), "the user argument");
    catalog.insert_single("nested.arg", loc("fr"), "l''argument utilisateur");
    catalog.insert_single("nested.outer", loc("fr"), "Erreur dans {0} : {1}");
    catalog
}

fn localizer() -> Localizer {
    Localizer::builder().catalog(catalog()).build()
}

#[test]
fn test_resolve_falls_back_to_language() {
    let t = localizer().resolve(&Key::from("greet.hello"), &user_ctx("fr-CA"));
    assert_eq!(t.get(), "Bonjour, {0} !");
    assert_eq!(t.locale(), &loc("fr"));
    assert_eq!(t.requested_locale(), &loc("fr-CA"));
}

#[test]
fn test_resolve_falls_back_to_default_then_root() {
    let localizer = localizer();
    let t = localizer.resolve(&Key::from("greet.hello"), &user_ctx("ja"));
    assert_eq!(t.locale(), &loc("en"));
    assert_eq!(t.requested_locale(), &loc("ja"));

    let t = localizer.resolve(&Key::from("greet.only_root"), &user_ctx("ja"));
    assert_eq!(t.get(), "root text");
    assert!(t.locale().is_root());
}

#[test]
fn test_resolve_unknown() {
    let t = localizer().resolve(&Key::from("no.such.key"), &user_ctx("fr-CA"));
    assert!(t.is_unknown());
    assert_eq!(t.get(), "no.such.key");
    assert!(t.locale().is_root());
    assert_eq!(t.requested_locale(), &loc("fr-CA"));
}

#[test]
fn test_resolve_is_deterministic() {
    let localizer = localizer();
    let ctx = user_ctx("fr-CA");
    let first = localizer.resolve(&Key::from("greet.hello"), &ctx);
    for _ in 0..10 {
        assert_eq!(localizer.resolve(&Key::from("greet.hello"), &ctx), first);
    }
}

#[test]
fn test_guild_locale_used_when_user_has_none() {
    let mut ctx = Context::builder();
    ctx.with_guild_locale(Some(loc("fr"))).unwrap();
    let out = localizer()
        .render(&Text::single("greet.hello").arg("Sam"), &ctx)
        .unwrap();
    assert_eq!(out, "Bonjour, Sam !");
}

#[test]
fn test_render_single() {
    let out = localizer()
        .render(&Text::single("greet.hello").arg("Sam"), &user_ctx("en"))
        .unwrap();
    assert_eq!(out, "Hello, Sam!");
}

#[test]
fn test_render_plural() {
    let localizer = localizer();
    let ctx = user_ctx("en");
    let one = Text::plural("cart.items", 1).arg(1);
    let five = Text::plural("cart.items", 5).arg(5);
    assert_eq!(localizer.render(&one, &ctx).unwrap(), "1 item");
    assert_eq!(localizer.render(&five, &ctx).unwrap(), "5 items");
}

#[test]
fn test_render_plural_missing_category_uses_other() {
    // Russian 3 is "few"; the entry only has one/other.
    let out = localizer()
        .render(&Text::plural("cart.items", 3), &user_ctx("ru"))
        .unwrap();
    assert_eq!(out, "3 товаров");
}

#[test]
fn test_render_with_quantity() {
    let localizer = localizer();
    let ctx = user_ctx("en");
    let text = Text::single("cart.items").arg(1);
    // A single text over a plural entry uses `other` unless a quantity is given.
    assert_eq!(localizer.render(&text, &ctx).unwrap(), "1 items");
    assert_eq!(localizer.render_with_quantity(&text, &ctx, 1).unwrap(), "1 item");

    let plural = Text::plural("cart.items", 5).arg(1);
    assert_eq!(
        localizer.render_with_quantity(&plural, &ctx, 1).unwrap(),
        "1 item"
    );
}

#[test]
fn test_ordinal_entries() {
    let localizer = localizer();
    let ctx = user_ctx("en");
    let place = |n| localizer.render(&Text::plural("race.place", n), &ctx).unwrap();
    assert_eq!(place(1), "1st place");
    assert_eq!(place(2), "2nd place");
    assert_eq!(place(3), "3rd place");
    assert_eq!(place(11), "11th place");
    assert_eq!(place(22), "22nd place");
}

#[test]
fn test_text_kind_overrides_entry_kind() {
    let out = localizer()
        .render(
            &Text::plural("race.place", 2).with_kind(PluralRuleKind::Cardinal),
            &user_ctx("en"),
        )
        .unwrap();
    assert_eq!(out, "2th place");
}

#[test]
fn test_literal_is_identity() {
    let localizer = localizer();
    let text = Text::literal("Already {0} final");
    for ctx in [Context::EMPTY, user_ctx("fr"), user_ctx("ru")] {
        assert_eq!(localizer.render(&text, &ctx).unwrap(), "Already {0} final");
        assert_eq!(
            localizer.render_with_quantity(&text, &ctx, 3).unwrap(),
            "Already {0} final"
        );
    }
}

#[test]
fn test_unknown_key_echoed_without_formatting() {
    let out = localizer()
        .render(&Text::single("missing.{0}").arg("x"), &Context::EMPTY)
        .unwrap();
    assert_eq!(out, "missing.{0}");
}

#[test]
fn test_empty_key_is_an_error() {
    let err = localizer()
        .render(&Text::single(""), &Context::EMPTY)
        .unwrap_err();
    assert_eq!(err, FormatError::EmptyKey);
}

#[test]
fn test_template_errors_surface() {
    let err = localizer()
        .render(&Text::single("broken.template").arg("x"), &user_ctx("en"))
        .unwrap_err();
    assert!(matches!(err, FormatError::Template { ref key, .. } if key.as_str() == "broken.template"));

    let err = localizer()
        .render(&Text::single("greet.hello"), &user_ctx("en"))
        .unwrap_err();
    assert!(matches!(
        err,
        FormatError::Template {
            source: format::TemplateError::MissingArgument { index: 0, supplied: 0 },
            ..
        }
    ));
}

#[test]
fn test_nested_text_rendered_in_same_locale() {
    let localizer = localizer();
    let text = Text::single("nested.outer")
        .arg(Text::single("nested.arg"))
        .arg(Text::literal("bad value"));
    assert_eq!(
        localizer.render(&text, &user_ctx("en")).unwrap(),
        "Error in the user argument: bad value"
    );
    assert_eq!(
        localizer.render(&text, &user_ctx("fr-CA")).unwrap(),
        "Erreur dans l'argument utilisateur : bad value"
    );
}

#[test]
fn test_dates_follow_resolved_locale() {
    let dt = NaiveDate::from_ymd_opt(2024, 3, 7)
        .unwrap()
        .and_hms_opt(18, 45, 0)
        .unwrap();
    let out = localizer()
        .render(&Text::single("event.when").arg(dt), &user_ctx("de-AT"))
        .unwrap();
    assert_eq!(out, "Am 07.03.2024 um 18:45");
}

#[test]
fn test_with_policy_shares_store() {
    let localizer = localizer();
    let french_default = localizer.with_policy(Arc::new(DefaultLocalePolicy::new(
        loc("fr"),
        Locale::root(),
    )));
    let text = Text::single("greet.hello").arg("Sam");
    assert_eq!(french_default.render(&text, &Context::EMPTY).unwrap(), "Bonjour, Sam !");
    assert_eq!(localizer.render(&text, &Context::EMPTY).unwrap(), "Hello, Sam!");

    let mut replacement = Catalog::new();
    replacement.insert_single("greet.hello", loc("fr"), "Salut, {0} !");
    localizer.store().replace(replacement);
    assert_eq!(french_default.render(&text, &Context::EMPTY).unwrap(), "Salut, Sam !");
}

#[test]
fn test_custom_plural_rules() {
    let rules = CldrPluralRules::new().with_rule("en", PluralRuleKind::Cardinal, |_| {
        PluralCategory::One
    });
    let localizer = Localizer::builder()
        .catalog(catalog())
        .plural_rules(rules)
        .build();
    let out = localizer
        .render(&Text::plural("cart.items", 7).arg(7), &user_ctx("en"))
        .unwrap();
    assert_eq!(out, "7 item");
}

#[test]
fn test_from_config() {
    let dir = std::env::temp_dir().join("__parley_localizer_from_config__");
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("de.toml"), "[greet]\nhello = \"Hallo, {0}!\"\n").unwrap();

    let config = I18nConfig {
        default_locale: loc("de"),
        bundle_dirs: vec![dir.to_string_lossy().into_owned()],
        ..I18nConfig::default()
    };
    let localizer = Localizer::from_config(&config).unwrap();
    let out = localizer
        .render(&Text::single("greet.hello").arg("Sam"), &Context::EMPTY)
        .unwrap();
    assert_eq!(out, "Hallo, Sam!");
    assert_eq!(
        localizer
            .render(
                &Text::single(Key::library("exception.guild_only")),
                &Context::EMPTY
            )
            .unwrap(),
        "Dieser Befehl kann nur auf einem Server verwendet werden."
    );

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_reload_through_shared_store() {
    let localizer = localizer();
    let mut loader = BundleLoader::new();
    loader.add_source(loc("en"), "greet", BundleFormat::Toml, "hello = \"Hi, {0}.\"\n");
    localizer.store().reload(&loader).unwrap();

    let out = localizer
        .render(&Text::single("greet.hello").arg("Sam"), &user_ctx("en"))
        .unwrap();
    assert_eq!(out, "Hi, Sam.");
}

#[test]
fn test_localizer_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Localizer>();
}
