// Kaggle API
pub const KAGGLE_API_BASE_URL: &str = "https://www.kaggle.com/api/v1";

// Secrets file
pub const DEFAULT_ENV_FILE: &str = ".env";
pub const USERNAME_SECRET: &str = "kaggle_username";
pub const KEY_SECRET: &str = "kaggle_key";

// Variables read by Kaggle tooling
pub const KAGGLE_USERNAME_VAR: &str = "KAGGLE_USERNAME";
pub const KAGGLE_KEY_VAR: &str = "KAGGLE_KEY";

// Default download root when no destination is given (datasets/<owner>/<name>)
pub const DEFAULT_DATASETS_DIR: &str = "datasets";

// Online Retail dataset
pub const ONLINE_RETAIL_DATASET: &str = "vijayuv/onlineretail";
pub const ONLINE_RETAIL_DIR: &str = "online_retail_data";
pub const ONLINE_RETAIL_FILE: &str = "OnlineRetail.csv";

// NBA players dataset
pub const NBA_PLAYERS_DATASET: &str = "yagizfiratt/nba-players-database";
pub const NBA_PLAYERS_DIR: &str = "nba-players-database";
pub const NBA_PLAYERS_FILE: &str = "PlayerIndex_nba_stats.csv";

// Dataset identifier pattern (owner/name)
pub const DATASET_ID_PATTERN: &str = r"^[A-Za-z0-9_.-]+/[A-Za-z0-9_.-]+$";

// Dataset kind aliases
pub const ONLINE_RETAIL_ALIASES: &[&str] = &["online-retail", "retail", "or"];
pub const NBA_PLAYERS_ALIASES: &[&str] = &["nba-players", "nba", "players"];
