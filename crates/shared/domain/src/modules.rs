use crate::ModelError;
use crate::constants::{COLOR_MODE, ICON, SUPABASE, TAILWINDCSS, VUEUSE};
use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A framework extension that can be listed in the bootstrap configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModuleId {
    /// Backend-as-a-service authentication/database integration.
    #[serde(rename = "@nuxtjs/supabase")]
    Supabase,
    /// CSS utility styling.
    #[serde(rename = "@nuxtjs/tailwindcss")]
    Tailwindcss,
    /// Color-mode switching.
    #[serde(rename = "@nuxtjs/color-mode")]
    ColorMode,
    #[serde(rename = "@nuxt/icon")]
    Icon,
    /// Reactive-utility helpers.
    #[serde(rename = "@vueuse/nuxt")]
    Vueuse,
}

impl ModuleId {
    /// Every known module, in the order of the stock bootstrap configuration.
    pub const ALL: [Self; 5] =
        [Self::Supabase, Self::Tailwindcss, Self::ColorMode, Self::Icon, Self::Vueuse];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Supabase => SUPABASE,
            Self::Tailwindcss => TAILWINDCSS,
            Self::ColorMode => COLOR_MODE,
            Self::Icon => ICON,
            Self::Vueuse => VUEUSE,
        }
    }

    #[must_use]
    pub const fn flag(self) -> ModuleSet {
        match self {
            Self::Supabase => ModuleSet::SUPABASE,
            Self::Tailwindcss => ModuleSet::TAILWINDCSS,
            Self::ColorMode => ModuleSet::COLOR_MODE,
            Self::Icon => ModuleSet::ICON,
            Self::Vueuse => ModuleSet::VUEUSE,
        }
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModuleId {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter().find(|module| module.as_str() == s).ok_or_else(|| {
            ModelError::UnknownModule { message: s.to_owned().into(), context: None }
        })
    }
}

bitflags! {
    /// Order-independent view over a set of active modules.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct ModuleSet: u8 {
        const SUPABASE = 1 << 0;
        const TAILWINDCSS = 1 << 1;
        const COLOR_MODE = 1 << 2;
        const ICON = 1 << 3;
        const VUEUSE = 1 << 4;

        const ALL = Self::SUPABASE.bits()
            | Self::TAILWINDCSS.bits()
            | Self::COLOR_MODE.bits()
            | Self::ICON.bits()
            | Self::VUEUSE.bits();
    }
}

impl ModuleSet {
    #[must_use]
    pub const fn has(self, module: ModuleId) -> bool {
        self.contains(module.flag())
    }
}

impl From<&str> for ModuleSet {
    fn from(s: &str) -> Self {
        match s {
            "all" | "*" => Self::ALL,
            other => other.parse::<ModuleId>().map_or_else(|_| Self::empty(), ModuleId::flag),
        }
    }
}

impl FromIterator<ModuleId> for ModuleSet {
    fn from_iter<I: IntoIterator<Item = ModuleId>>(iter: I) -> Self {
        iter.into_iter().fold(Self::empty(), |set, module| set | module.flag())
    }
}

impl<'a> FromIterator<&'a ModuleId> for ModuleSet {
    fn from_iter<I: IntoIterator<Item = &'a ModuleId>>(iter: I) -> Self {
        iter.into_iter().copied().collect()
    }
}
