//! Preferences stored on disk feeding locale resolution.

use parley::config::{self, Config};
use parley::{Context, EntryKind, Locale, Parley, Text};

fn loc(tag: &str) -> Locale {
    Locale::parse(tag).unwrap()
}

fn fresh_dir(name: &str) -> std::path::PathBuf {
    let dir = std::env::temp_dir().join(format!("__parley_it_{name}__"));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn config_for(dir: &std::path::Path, preferences: bool) -> Config {
    let text = format!(
        r#"
[i18n]
default_locale = "en"
bundle_dirs = ["{bundles}"]

[preferences]
enabled = {preferences}
db_path = "{db}"
"#,
        bundles = dir.join("langs").display(),
        db = dir.join("data").join("prefs.db").display(),
    );
    config::parse(&text).unwrap()
}

fn write_bundles(dir: &std::path::Path) {
    let langs = dir.join("langs");
    std::fs::create_dir_all(&langs).unwrap();
    std::fs::write(langs.join("en.toml"), "[greet]\nhello = \"Hello, {0}!\"\n").unwrap();
    std::fs::write(langs.join("de.toml"), "[greet]\nhello = \"Hallo, {0}!\"\n").unwrap();
    std::fs::write(langs.join("fr.toml"), "[greet]\nhello = \"Bonjour, {0} !\"\n").unwrap();
}

#[tokio::test]
async fn test_stored_preferences_outrank_platform_locales() {
    let dir = fresh_dir("prefs_rank");
    write_bundles(&dir);
    let parley = Parley::from_config(&config_for(&dir, true)).await.unwrap();
    let prefs = parley.preferences().unwrap();

    let mut ctx = Context::builder();
    ctx.with_user(100)
        .unwrap()
        .with_guild(300)
        .unwrap()
        .with_user_locale(Some(loc("fr")))
        .unwrap();
    let ctx = ctx.freeze();
    let text = Text::single("greet.hello").arg("Sam");

    // Nothing stored yet: the platform-reported user locale wins.
    let localizer = parley.localizer_for(&ctx).await.unwrap();
    assert_eq!(localizer.render(&text, &ctx).unwrap(), "Bonjour, Sam !");

    // A stored guild preference ranks below the reported user locale.
    prefs.set(300, EntryKind::Guild, Some(&loc("de"))).await.unwrap();
    let localizer = parley.localizer_for(&ctx).await.unwrap();
    assert_eq!(localizer.render(&text, &ctx).unwrap(), "Bonjour, Sam !");

    // A stored user preference ranks first.
    prefs.set(100, EntryKind::User, Some(&loc("de-AT"))).await.unwrap();
    let localizer = parley.localizer_for(&ctx).await.unwrap();
    let resolved = localizer.resolve(&"greet.hello".into(), &ctx);
    assert_eq!(resolved.requested_locale(), &loc("de-AT"));
    assert_eq!(resolved.locale(), &loc("de"));
    assert_eq!(localizer.render(&text, &ctx).unwrap(), "Hallo, Sam!");

    // The base localizer never consults the store.
    assert_eq!(
        parley.localizer().render(&text, &ctx).unwrap(),
        "Bonjour, Sam !"
    );

    prefs.pool().close().await;
    let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn test_preferences_disabled() {
    let dir = fresh_dir("prefs_off");
    write_bundles(&dir);
    let parley = Parley::from_config(&config_for(&dir, false)).await.unwrap();
    assert!(parley.preferences().is_none());

    let ctx = Context::new(1, 2, 3);
    let localizer = parley.localizer_for(&ctx).await.unwrap();
    assert_eq!(
        localizer
            .render(&Text::single("greet.hello").arg("Sam"), &ctx)
            .unwrap(),
        "Hello, Sam!"
    );
    assert!(!dir.join("data").exists());

    let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn test_reload_picks_up_edited_bundles() {
    let dir = fresh_dir("reload");
    write_bundles(&dir);
    let parley = Parley::from_config(&config_for(&dir, false)).await.unwrap();
    let text = Text::single("greet.hello").arg("Sam");

    std::fs::write(
        dir.join("langs").join("en.toml"),
        "[greet]\nhello = \"Hi there, {0}.\"\n",
    )
    .unwrap();
    assert_eq!(
        parley.localizer().render(&text, &Context::EMPTY).unwrap(),
        "Hello, Sam!"
    );

    parley.reload().unwrap();
    assert_eq!(
        parley.localizer().render(&text, &Context::EMPTY).unwrap(),
        "Hi there, Sam."
    );

    // A broken bundle keeps the last good catalog.
    std::fs::write(dir.join("langs").join("en.toml"), "[greet\n").unwrap();
    assert!(parley.reload().is_err());
    assert_eq!(
        parley.localizer().render(&text, &Context::EMPTY).unwrap(),
        "Hi there, Sam."
    );

    let _ = std::fs::remove_dir_all(&dir);
}
