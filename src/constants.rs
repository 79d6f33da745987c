//! Constants used throughout the application
//!
//! Preference keys, file names, built-in defaults and user-facing messages.

use crate::models::Category;

// Directory and file names
pub const APP_DIR_NAME: &str = "vibeflow";
pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const LOCAL_CONFIG_FILE_NAME: &str = "vibeflow.toml";
pub const DATABASE_FILE_NAME: &str = "vibeflow.db";
pub const PREFERENCES_FILE_NAME: &str = "preferences.json";

// Preference keys
pub const SESSION_EMAIL_KEY: &str = "vibe_session_email";
pub const THEME_KEY: &str = "vibe_theme";

// Account defaults
pub const DEFAULT_USER_NAME: &str = "Power User";
pub const AVATAR_URL_BASE: &str = "https://picsum.photos/seed";
pub const INITIAL_STREAK: u32 = 1;

// Task defaults
pub const DEFAULT_TASK_POINTS: u32 = 50;
pub const DEFAULT_ICON: &str = "Zap";

// Sync defaults
pub const DEFAULT_INDICATOR_HOLD_MS: u64 = 500;
pub const MAX_INDICATOR_HOLD_MS: u64 = 10_000;

// Messages
pub const CONFIG_GENERATED: &str = "✅ Generated default configuration";
pub const WARN_IN_MEMORY_ONLY: &str = "⚠️ Record store unavailable, changes will only live for this session";

/// Built-in category set used when the store holds no categories yet.
pub fn default_categories() -> Vec<Category> {
    [
        ("cat-1", "Study", "GraduationCap", "#8B5CF6"),
        ("cat-2", "Skills", "Code", "#10B981"),
        ("cat-3", "Physical", "Dumbbell", "#F43F5E"),
        ("cat-4", "Fun", "Gamepad2", "#F59E0B"),
    ]
    .into_iter()
    .map(|(id, name, icon, color)| Category {
        id: id.to_string(),
        name: name.to_string(),
        icon: icon.to_string(),
        color: color.to_string(),
        enabled: true,
    })
    .collect()
}
