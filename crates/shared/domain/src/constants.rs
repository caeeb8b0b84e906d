// Module identifiers, as listed in the bootstrap configuration.
pub const SUPABASE: &str = "@nuxtjs/supabase";
pub const TAILWINDCSS: &str = "@nuxtjs/tailwindcss";
pub const COLOR_MODE: &str = "@nuxtjs/color-mode";
pub const ICON: &str = "@nuxt/icon";
pub const VUEUSE: &str = "@vueuse/nuxt";

// Generation discriminators.
pub const IMAGE: &str = "image";
pub const TEXT: &str = "text";

// Color modes.
pub const SYSTEM: &str = "system";
pub const LIGHT: &str = "light";
pub const DARK: &str = "dark";

pub const DEFAULT_STYLESHEET: &str = "~/assets/css/main.css";
pub const DEFAULT_LOGIN_PATH: &str = "/login";
pub const DEFAULT_CALLBACK_PATH: &str = "/confirm";
