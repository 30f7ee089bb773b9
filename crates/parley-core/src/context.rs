//! Request-scoped localization context.
//!
//! A [`Context`] describes who is asking and where: user, channel and guild ids
//! plus any locale the platform reported for the user or the guild. Ids use `0`
//! for "none".
//!
//! Contexts come in two flavors with the same read contract. Mutable contexts
//! are built incrementally with the fluent `with_*` setters; immutable contexts
//! are snapshots and reject every setter with [`ContextError::Immutable`].
//! Pass immutable snapshots across task boundaries. Equality and hashing only
//! look at the five fields, never at the flavor.

use std::hash::{Hash, Hasher};

use crate::error::ContextError;
use crate::locale::Locale;

/// Platform identifier (user, channel, or guild). `0` means absent.
pub type Id = u64;

/// Whether a [`Context`] accepts setter calls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ContextFlavor {
    #[default]
    Immutable,
    Mutable,
}

#[derive(Debug, Clone)]
pub struct Context {
    user: Id,
    channel: Id,
    guild: Id,
    user_locale: Option<Locale>,
    guild_locale: Option<Locale>,
    flavor: ContextFlavor,
}

impl Context {
    /// The context used when nothing is known about the request.
    pub const EMPTY: Context = Context {
        user: 0,
        channel: 0,
        guild: 0,
        user_locale: None,
        guild_locale: None,
        flavor: ContextFlavor::Immutable,
    };

    /// Immutable snapshot of the three ids, without locale overrides.
    pub fn new(user: Id, channel: Id, guild: Id) -> Self {
        Self {
            user,
            channel,
            guild,
            ..Self::EMPTY
        }
    }

    /// An empty mutable context, ready for the `with_*` setters.
    pub fn builder() -> Self {
        Self {
            flavor: ContextFlavor::Mutable,
            ..Self::EMPTY
        }
    }

    pub fn user(&self) -> Id {
        self.user
    }

    pub fn channel(&self) -> Id {
        self.channel
    }

    pub fn guild(&self) -> Id {
        self.guild
    }

    pub fn user_locale(&self) -> Option<&Locale> {
        self.user_locale.as_ref()
    }

    pub fn guild_locale(&self) -> Option<&Locale> {
        self.guild_locale.as_ref()
    }

    pub fn has_user(&self) -> bool {
        self.user != 0
    }

    pub fn has_channel(&self) -> bool {
        self.channel != 0
    }

    pub fn has_guild(&self) -> bool {
        self.guild != 0
    }

    pub fn flavor(&self) -> ContextFlavor {
        self.flavor
    }

    pub fn is_mutable(&self) -> bool {
        self.flavor == ContextFlavor::Mutable
    }

    fn ensure_mutable(&self, field: &'static str) -> Result<(), ContextError> {
        match self.flavor {
            ContextFlavor::Mutable => Ok(()),
            ContextFlavor::Immutable => Err(ContextError::Immutable { field }),
        }
    }

    pub fn with_user(&mut self, user: Id) -> Result<&mut Self, ContextError> {
        self.ensure_mutable("user")?;
        self.user = user;
        Ok(self)
    }

    pub fn with_channel(&mut self, channel: Id) -> Result<&mut Self, ContextError> {
        self.ensure_mutable("channel")?;
        self.channel = channel;
        Ok(self)
    }

    pub fn with_guild(&mut self, guild: Id) -> Result<&mut Self, ContextError> {
        self.ensure_mutable("guild")?;
        self.guild = guild;
        Ok(self)
    }

    pub fn with_user_locale(&mut self, locale: Option<Locale>) -> Result<&mut Self, ContextError> {
        self.ensure_mutable("user_locale")?;
        self.user_locale = locale;
        Ok(self)
    }

    pub fn with_guild_locale(
        &mut self,
        locale: Option<Locale>,
    ) -> Result<&mut Self, ContextError> {
        self.ensure_mutable("guild_locale")?;
        self.guild_locale = locale;
        Ok(self)
    }

    /// Mutable copy carrying every field.
    pub fn to_mutable(&self) -> Self {
        Self {
            flavor: ContextFlavor::Mutable,
            ..self.clone()
        }
    }

    /// Immutable snapshot carrying every field.
    pub fn to_immutable(&self) -> Self {
        Self {
            flavor: ContextFlavor::Immutable,
            ..self.clone()
        }
    }

    /// Consume a context and return it as an immutable snapshot.
    pub fn freeze(mut self) -> Self {
        self.flavor = ContextFlavor::Immutable;
        self
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl PartialEq for Context {
    fn eq(&self, other: &Self) -> bool {
        self.user == other.user
            && self.channel == other.channel
            && self.guild == other.guild
            && self.user_locale == other.user_locale
            && self.guild_locale == other.guild_locale
    }
}

impl Eq for Context {}

impl Hash for Context {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.user.hash(state);
        self.channel.hash(state);
        self.guild.hash(state);
        self.user_locale.hash(state);
        self.guild_locale.hash(state);
    }
}
