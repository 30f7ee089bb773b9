use parley_core::{Context, Key, Locale};
use thiserror::Error;

use crate::format::TemplateError;
use crate::localizer::Localizer;
use crate::text::Text;

/// Rendering a [`Text`] failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("translation key is empty")]
    EmptyKey,

    #[error("failed to format '{key}' for {locale}: {source}")]
    Template {
        key: Key,
        locale: Locale,
        #[source]
        source: TemplateError,
    },
}

/// What went wrong, for callers that react differently per case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Generic failure caused by the user; the text says what.
    User,
    NoPermission,
    GuildOnly,
    DmOnly,
    OwnerOnly,
    UserMissingPermission,
    BotMissingPermission,
    InvalidSyntax,
}

/// A user-facing error whose message is rendered in the user's locale.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind:?}: {text}")]
pub struct LocalizedError {
    kind: ErrorKind,
    text: Text,
}

impl LocalizedError {
    pub fn new(kind: ErrorKind, text: Text) -> Self {
        Self { kind, text }
    }

    pub fn user(text: impl Into<Text>) -> Self {
        Self::new(ErrorKind::User, text.into())
    }

    pub fn command_error() -> Self {
        Self::user(Text::single(Key::library("exception.command_error")))
    }

    pub fn no_permission() -> Self {
        Self::new(
            ErrorKind::NoPermission,
            Text::single(Key::library("exception.no_permission")),
        )
    }

    pub fn guild_only() -> Self {
        Self::new(
            ErrorKind::GuildOnly,
            Text::single(Key::library("exception.guild_only")),
        )
    }

    pub fn dm_only() -> Self {
        Self::new(
            ErrorKind::DmOnly,
            Text::single(Key::library("exception.dms_only")),
        )
    }

    pub fn owner_only() -> Self {
        Self::new(
            ErrorKind::OwnerOnly,
            Text::single(Key::library("exception.owner_only")),
        )
    }

    /// The invoking user lacks `permission` (a platform permission name).
    pub fn user_missing_permission(permission: impl Into<Text>) -> Self {
        Self::new(
            ErrorKind::UserMissingPermission,
            Text::single(Key::library("exception.user_missing_perm")).arg(permission.into()),
        )
    }

    pub fn bot_missing_permission(permission: impl Into<Text>) -> Self {
        Self::new(
            ErrorKind::BotMissingPermission,
            Text::single(Key::library("exception.bot_missing_perm")).arg(permission.into()),
        )
    }

    /// An argument failed to parse. `argument` is the key naming the argument;
    /// `None` falls back to a generic "argument" label.
    pub fn invalid_syntax(argument: Option<Key>, reason: impl Into<Text>) -> Self {
        let argument = argument.unwrap_or_else(|| Key::library("arg._unknown_"));
        Self::new(
            ErrorKind::InvalidSyntax,
            Text::single(Key::library("exception.invalid_syntax"))
                .arg(Text::single(argument))
                .arg(reason.into()),
        )
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn text(&self) -> &Text {
        &self.text
    }

    pub fn into_text(self) -> Text {
        self.text
    }

    /// Render the message for `context`.
    pub fn render(&self, localizer: &Localizer, context: &Context) -> Result<String, FormatError> {
        localizer.render(&self.text, context)
    }
}
