//! End-to-end resolution and rendering through the public `parley` API.

use std::thread;

use parley::{
    BundleFormat, BundleLoader, Catalog, Context, DefaultLocalePolicy, Key, Locale,
    LocalePolicy, LocalizedError, Localizer, PluralCategory, PluralForms, Text,
};

fn loc(tag: &str) -> Locale {
    Locale::parse(tag).unwrap()
}

fn user_ctx(tag: &str) -> Context {
    let mut ctx = Context::builder();
    ctx.with_user(10).unwrap().with_user_locale(Some(loc(tag))).unwrap();
    ctx.freeze()
}

fn loader() -> BundleLoader {
    let mut loader = BundleLoader::new();
    loader
        .add_source(
            loc("en"),
            "shop",
            BundleFormat::Toml,
            r#"
                greeting = "Hello, {0}!"
                [cart.items]
                one = "{0} item"
                other = "{0} items"
            "#,
        )
        .add_source(
            loc("fr"),
            "shop",
            BundleFormat::Json,
            r#"{"greeting": "Bonjour, {0} !", "cart": {"items": {"one": "{0} article", "other": "{0} articles"}}}"#,
        );
    loader.with_embedded_defaults()
}

fn localizer() -> Localizer {
    Localizer::builder()
        .catalog(loader().build().unwrap())
        .build()
}

#[test]
fn test_hello_sam() {
    let out = localizer()
        .render(&Text::single("shop.greeting").arg("Sam"), &user_ctx("en-US"))
        .unwrap();
    assert_eq!(out, "Hello, Sam!");
}

#[test]
fn test_one_item_five_items() {
    let localizer = localizer();
    let ctx = user_ctx("en");
    for (n, expected) in [(1, "1 item"), (5, "5 items"), (0, "0 items")] {
        let text = Text::plural("shop.cart.items", n).arg(n);
        assert_eq!(localizer.render(&text, &ctx).unwrap(), expected);
    }
    // French treats 0 as singular.
    let text = Text::plural("shop.cart.items", 0).arg(0);
    assert_eq!(localizer.render(&text, &user_ctx("fr")).unwrap(), "0 article");
}

#[test]
fn test_requested_versus_actual_locale() {
    let t = localizer().resolve(&Key::from("shop.greeting"), &user_ctx("fr-CA"));
    assert_eq!(t.requested_locale(), &loc("fr-CA"));
    assert_eq!(t.locale(), &loc("fr"));
    assert_eq!(t.get(), "Bonjour, {0} !");
}

#[test]
fn test_candidates_are_deduplicated() {
    let policy = DefaultLocalePolicy::new(loc("en"), Locale::root());
    let mut ctx = Context::builder();
    ctx.with_user_locale(Some(loc("en")))
        .unwrap()
        .with_guild_locale(Some(loc("en")))
        .unwrap();
    assert_eq!(policy.candidates(&ctx), vec![loc("en"), Locale::root()]);
}

#[test]
fn test_missing_plural_category_falls_back_to_other() {
    let mut catalog = Catalog::new();
    catalog.insert_plural(
        "files",
        loc("pl"),
        PluralForms::new("{#} plików").with(PluralCategory::One, "{#} plik"),
    );
    let localizer = Localizer::builder().catalog(catalog).build();
    // 3 is "few" in Polish.
    let out = localizer
        .render(&Text::plural("files", 3), &user_ctx("pl"))
        .unwrap();
    assert_eq!(out, "3 plików");
}

#[test]
fn test_resolution_is_deterministic() {
    let localizer = localizer();
    let ctx = user_ctx("fr-CA");
    let text = Text::plural("shop.cart.items", 2).arg(2);
    let first = localizer.render(&text, &ctx).unwrap();
    for _ in 0..20 {
        assert_eq!(localizer.render(&text, &ctx).unwrap(), first);
    }
}

#[test]
fn test_literal_rendering_is_idempotent() {
    let localizer = localizer();
    let text = Text::literal("{0} stays as is");
    for ctx in [Context::EMPTY, user_ctx("fr"), user_ctx("de")] {
        let once = localizer.render(&text, &ctx).unwrap();
        let twice = localizer.render(&Text::literal(once.clone()), &ctx).unwrap();
        assert_eq!(once, "{0} stays as is");
        assert_eq!(once, twice);
    }
}

#[test]
fn test_unknown_key_echoes() {
    let out = localizer()
        .render(&Text::single("shop.nope").arg("x"), &user_ctx("fr"))
        .unwrap();
    assert_eq!(out, "shop.nope");
}

#[test]
fn test_context_equality_ignores_flavor() {
    let mut mutable = Context::builder();
    mutable
        .with_user(1)
        .unwrap()
        .with_channel(2)
        .unwrap()
        .with_guild(3)
        .unwrap()
        .with_guild_locale(Some(loc("de")))
        .unwrap();
    let frozen = mutable.to_immutable();
    assert_eq!(mutable, frozen);
    assert_eq!(frozen.to_mutable(), frozen);

    let mut frozen = frozen;
    assert!(frozen.with_user(9).is_err());
    assert_eq!(frozen.user(), 1);
}

#[test]
fn test_localized_errors_use_library_bundle() {
    let localizer = localizer();
    let err = LocalizedError::guild_only();
    assert_eq!(
        err.render(&localizer, &user_ctx("en")).unwrap(),
        "This command can only be used in a server."
    );
    assert_ne!(
        err.render(&localizer, &user_ctx("fr")).unwrap(),
        err.render(&localizer, &user_ctx("en")).unwrap()
    );
}

#[test]
fn test_concurrent_readers_see_whole_catalogs() {
    let mut first = Catalog::new();
    first.insert_single("a", loc("en"), "old");
    first.insert_single("b", loc("en"), "old");
    let localizer = Localizer::builder().catalog(first).build();
    let ctx = user_ctx("en");

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let localizer = localizer.clone();
            let ctx = ctx.clone();
            thread::spawn(move || {
                for _ in 0..500 {
                    let catalog = localizer.store().snapshot();
                    let a = catalog.lookup(&Key::from("a"), &loc("en")).unwrap();
                    let b = catalog.lookup(&Key::from("b"), &loc("en")).unwrap();
                    assert_eq!(a.get(), b.get());
                    let rendered = localizer.render(&Text::single("a"), &ctx).unwrap();
                    assert!(rendered == "old" || rendered == "new");
                }
            })
        })
        .collect();

    for _ in 0..50 {
        let mut next = Catalog::new();
        next.insert_single("a", loc("en"), "new");
        next.insert_single("b", loc("en"), "new");
        localizer.store().replace(next);
    }

    for reader in readers {
        reader.join().unwrap();
    }
    assert_eq!(
        localizer.render(&Text::single("a"), &ctx).unwrap(),
        "new"
    );
}

#[test]
fn test_assembled_stack_reloads_its_own_loader() {
    let localizer = Localizer::builder().build();
    let parley = parley::Parley::new(
        localizer,
        DefaultLocalePolicy::new(loc("en"), Locale::root()),
        loader(),
        None,
    );
    assert!(parley.localizer().store().snapshot().is_empty());

    let entries = parley.reload().unwrap();
    assert!(entries > 0);
    assert_eq!(
        parley
            .localizer()
            .render(&Text::single("shop.greeting").arg("Sam"), &user_ctx("en"))
            .unwrap(),
        "Hello, Sam!"
    );
}

#[test]
fn test_cldr_many_category_for_whole_millions() {
    let mut catalog = Catalog::new();
    catalog.insert_plural(
        "files",
        loc("fr"),
        PluralForms::new("plusieurs fichiers")
            .with(PluralCategory::One, "un fichier")
            .with(PluralCategory::Many, "des millions de fichiers"),
    );
    let localizer = Localizer::builder().catalog(catalog).build();
    let ctx = user_ctx("fr");
    let render = |n| localizer.render(&Text::plural("files", n), &ctx).unwrap();
    assert_eq!(render(1), "un fichier");
    assert_eq!(render(7), "plusieurs fichiers");
    assert_eq!(render(3_000_000), "des millions de fichiers");
    assert_eq!(render(3_000_001), "plusieurs fichiers");
}
