/// Fixed values shared between the CLI, the API client, and the normalizer.

/// Item types eligible for normalization, in the comma-joined form the Items
/// endpoint expects for `IncludeItemTypes`.
pub const ELIGIBLE_ITEM_TYPES: &str = "Movie,Series,Season,Episode";

/// Stop a library pass once this many items have been found with a matching
/// 'Date Added'. The server lists newest-created first, so a run of matching
/// items means a previous run already covered the rest of the library.
pub const ALREADY_CORRECT_STOP_THRESHOLD: u32 = 10;

/// Identifying header sent with every request unless overridden via
/// `EMBY_USER_AGENT`.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (compatible; GitHubActions; +https://github.com/)";

/// Optional config file holding the library list.
pub const CONFIG_FILE: &str = "config.toml";

/// Library identifiers of the reference deployment, used when neither the
/// CLI nor the config file supplies a list.
pub const DEFAULT_LIBRARY_IDS: [&str; 14] = [
    "1325", "2648", "5455", "13586", "2178", "2780", "17332", "17707", "19741", "17709", "20932",
    "20934", "20930", "20936",
];
