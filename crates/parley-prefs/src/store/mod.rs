//! SQLite-backed locale preference store.


use std::fmt;
use std::str::FromStr;

use parley_core::config::PreferencesConfig;
use parley_core::{shellexpand, Context, Id, Locale, ParleyError};
use parley_i18n::DefaultLocalePolicy;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::policy::PreferencePolicy;

/// What a preference row is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    User,
    Channel,
    Guild,
}

impl EntryKind {
    pub const ALL: [EntryKind; 3] = [EntryKind::User, EntryKind::Channel, EntryKind::Guild];

    pub fn as_str(self) -> &'static str {
        match self {
            EntryKind::User => "user",
            EntryKind::Channel => "channel",
            EntryKind::Guild => "guild",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntryKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(EntryKind::User),
            "channel" => Ok(EntryKind::Channel),
            "guild" => Ok(EntryKind::Guild),
            other => Err(format!("unknown entry kind '{other}'")),
        }
    }
}

/// The stored preferences relevant to one request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoredLocales {
    pub user: Option<Locale>,
    pub channel: Option<Locale>,
    pub guild: Option<Locale>,
}

impl StoredLocales {
    pub fn is_empty(&self) -> bool {
        self.user.is_none() && self.channel.is_none() && self.guild.is_none()
    }
}

/// Persistent locale preferences backed by SQLite.
#[derive(Clone, Debug)]
pub struct PreferenceStore {
    pool: SqlitePool,
}

impl PreferenceStore {
    /// Open (or create) the database, running migrations on first use.
    pub async fn new(config: &PreferencesConfig) -> Result<Self, ParleyError> {
        let db_path = shellexpand(&config.db_path);

        if let Some(parent) = std::path::Path::new(&db_path).parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ParleyError::Preferences(format!("failed to create data dir: {e}"))
            })?;
        }

        let opts = SqliteConnectOptions::from_str(&format!("sqlite:{db_path}"))
            .map_err(|e| ParleyError::Preferences(format!("invalid db path: {e}")))?
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections.max(1))
            .connect_with(opts)
            .await
            .map_err(|e| ParleyError::Preferences(format!("failed to connect to sqlite: {e}")))?;

        Self::run_migrations(&pool).await?;

        info!("Preference store initialized at {db_path}");

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Run SQL migrations, tracking which have already been applied.
    async fn run_migrations(pool: &SqlitePool) -> Result<(), ParleyError> {
        sqlx::raw_sql(
            "CREATE TABLE IF NOT EXISTS _migrations (
                name TEXT PRIMARY KEY,
                applied_at TEXT NOT NULL DEFAULT (datetime('now'))
            );",
        )
        .execute(pool)
        .await
        .map_err(|e| {
            ParleyError::Preferences(format!("failed to create migrations table: {e}"))
        })?;

        let migrations: &[(&str, &str)] =
            &[("001_init", include_str!("../../migrations/001_init.sql"))];

        for (name, sql) in migrations {
            let applied: Option<(String,)> =
                sqlx::query_as("SELECT name FROM _migrations WHERE name = ?")
                    .bind(name)
                    .fetch_optional(pool)
                    .await
                    .map_err(|e| {
                        ParleyError::Preferences(format!("failed to check migration {name}: {e}"))
                    })?;

            if applied.is_some() {
                continue;
            }

            sqlx::raw_sql(sql)
                .execute(pool)
                .await
                .map_err(|e| ParleyError::Preferences(format!("migration {name} failed: {e}")))?;

            sqlx::query("INSERT INTO _migrations (name) VALUES (?)")
                .bind(name)
                .execute(pool)
                .await
                .map_err(|e| {
                    ParleyError::Preferences(format!("failed to record migration {name}: {e}"))
                })?;
            debug!("Applied preference migration {name}");
        }
        Ok(())
    }

    /// Store `locale` for `id`, or clear the preference when `locale` is `None`.
    pub async fn set(
        &self,
        id: Id,
        kind: EntryKind,
        locale: Option<&Locale>,
    ) -> Result<(), ParleyError> {
        if id == 0 {
            return Err(ParleyError::Preferences(format!(
                "cannot store a {kind} preference for id 0"
            )));
        }

        match locale {
            Some(locale) => {
                sqlx::query(
                    "INSERT INTO locale_config (entry_id, kind, locale) VALUES (?, ?, ?) \
                     ON CONFLICT(entry_id, kind) DO UPDATE SET locale = excluded.locale, updated_at = datetime('now')",
                )
                .bind(db_id(id))
                .bind(kind.as_str())
                .bind(locale.to_string())
                .execute(&self.pool)
                .await
                .map_err(|e| ParleyError::Preferences(format!("upsert locale failed: {e}")))?;
                info!("Stored {kind} locale {locale} for {id}");
            }
            None => {
                let result =
                    sqlx::query("DELETE FROM locale_config WHERE entry_id = ? AND kind = ?")
                        .bind(db_id(id))
                        .bind(kind.as_str())
                        .execute(&self.pool)
                        .await
                        .map_err(|e| ParleyError::Preferences(format!("delete failed: {e}")))?;
                if result.rows_affected() > 0 {
                    info!("Cleared {kind} locale for {id}");
                }
            }
        }
        Ok(())
    }

    /// The stored locale for `id`. Id `0` never has one.
    pub async fn get(&self, id: Id, kind: EntryKind) -> Result<Option<Locale>, ParleyError> {
        if id == 0 {
            return Ok(None);
        }

        let row: Option<(String,)> =
            sqlx::query_as("SELECT locale FROM locale_config WHERE entry_id = ? AND kind = ?")
                .bind(db_id(id))
                .bind(kind.as_str())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| ParleyError::Preferences(format!("query failed: {e}")))?;

        row.map(|(tag,)| {
            Locale::parse(&tag).map_err(|e| {
                ParleyError::Preferences(format!("stored {kind} locale for {id} is invalid: {e}"))
            })
        })
        .transpose()
    }

    /// Every stored preference of one kind, ordered by id.
    pub async fn entries(&self, kind: EntryKind) -> Result<Vec<(Id, Locale)>, ParleyError> {
        let rows: Vec<(i64, String)> = sqlx::query_as(
            "SELECT entry_id, locale FROM locale_config WHERE kind = ?",
        )
        .bind(kind.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ParleyError::Preferences(format!("query failed: {e}")))?;

        let mut entries = rows
            .into_iter()
            .map(|(id, tag)| {
                let locale = Locale::parse(&tag).map_err(|e| {
                    ParleyError::Preferences(format!("stored {kind} locale is invalid: {e}"))
                })?;
                Ok((id as Id, locale))
            })
            .collect::<Result<Vec<_>, ParleyError>>()?;
        // Signed storage order differs from id order above i64::MAX.
        entries.sort_by_key(|(id, _)| *id);
        Ok(entries)
    }

    /// Fetch the user, channel and guild preferences for `context` at once.
    pub async fn stored_locales(&self, context: &Context) -> Result<StoredLocales, ParleyError> {
        let (user, channel, guild) = tokio::try_join!(
            self.get(context.user(), EntryKind::User),
            self.get(context.channel(), EntryKind::Channel),
            self.get(context.guild(), EntryKind::Guild),
        )?;
        Ok(StoredLocales {
            user,
            channel,
            guild,
        })
    }

    /// A [`PreferencePolicy`] for `context`, falling back to `base`'s
    /// default and root locales.
    pub async fn policy_for(
        &self,
        context: &Context,
        base: &DefaultLocalePolicy,
    ) -> Result<PreferencePolicy, ParleyError> {
        let stored = self.stored_locales(context).await?;
        Ok(PreferencePolicy::new(
            stored,
            base.default_locale().clone(),
            base.root_locale().clone(),
        ))
    }
}

/// Platform ids are unsigned; SQLite integers are signed. Stored bit-for-bit.
fn db_id(id: Id) -> i64 {
    id as i64
}
