/// Meal types accepted by `POST /meal-plan`, compared case-insensitively
pub const MEAL_TYPES: [&str; 5] = ["breakfast", "lunch", "dinner", "snack", "meal"];

/// Title given to meal-plan events created without a meal type
pub const DEFAULT_MEAL_TITLE: &str = "Meal";

/// Lowercase fragments identifying a rate-limited upstream failure
pub const RATE_LIMIT_KEYWORDS: [&str; 5] = [
    "rate limit",
    "rate-limit",
    "too many requests",
    "throttl",
    "quota exceeded",
];

/// Seconds clients are told to wait after a rate-limited request
pub const RATE_LIMIT_RETRY_AFTER_SECS: u64 = 60;

pub const RATE_LIMIT_MESSAGE: &str = "Rate limit exceeded. Please try again later.";

pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

pub const RECIPE_ID_REQUIRED: &str = "Recipe ID is required";
pub const RECIPE_NOT_FOUND: &str = "Recipe not found";
pub const LIST_NAME_REQUIRED: &str = "List name is required";
pub const ITEM_NAME_REQUIRED: &str = "Item name is required";
pub const ITEM_ID_REQUIRED: &str = "Item ID is required";
pub const ITEM_NAME_OR_ID_REQUIRED: &str = "Item name or ID is required";
pub const CHECKED_REQUIRED: &str = "Checked state is required";
pub const BODY_NOT_OBJECT: &str = "Request body must be a JSON object";

/// Name of the secret file holding the account email
pub const EMAIL_SECRET: &str = "anylist_email";
/// Name of the secret file holding the account password
pub const PASSWORD_SECRET: &str = "anylist_password";

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_API_URL: &str = "https://www.anylist.com";
pub const DEFAULT_CREDENTIALS_FILE: &str = ".anylist_credentials";
