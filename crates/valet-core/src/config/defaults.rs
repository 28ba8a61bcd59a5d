//! Default value functions used by serde for config deserialization.

pub fn default_name() -> String {
    "Valet".to_string()
}

pub fn default_data_dir() -> String {
    "~/.valet".to_string()
}

pub fn default_log_level() -> String {
    "info".to_string()
}

pub fn default_true() -> bool {
    true
}

pub fn default_storage_path() -> String {
    "~/.valet/data/reminders.json".to_string()
}

pub fn default_poll_interval() -> u64 {
    10
}

pub fn default_error_backoff() -> u64 {
    60
}

pub fn default_dedup_window() -> u64 {
    300
}

pub fn default_watcher_interval() -> u64 {
    30
}

pub fn default_notify_command() -> String {
    "notify-send".to_string()
}

pub fn default_speech_command() -> String {
    "say".to_string()
}
