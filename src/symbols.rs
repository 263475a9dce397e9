// Visual symbols used in console output
// Using generic names that represent meaning rather than the specific emoji

/// Status and feedback symbols
pub const SYMBOL_INDICATOR_SUCCESS: &str = "✅";
pub const SYMBOL_INDICATOR_ERROR: &str = "❌";
pub const SYMBOL_INDICATOR_INFO: &str = "📋";

/// Process and action symbols
pub const SYMBOL_ACTION_LAUNCH: &str = "🚀";

/// Content and data symbols
pub const SYMBOL_CONTENT_FILE: &str = "📄";

/// Tool and platform symbols
pub const SYMBOL_TOOL_CONFIG: &str = "🔧";

/// Documentation and communication symbols
pub const SYMBOL_DOC_NOTE: &str = "📝";
pub const SYMBOL_DOC_BOOK: &str = "📖";
pub const SYMBOL_DOC_TAG: &str = "🏷️";

/// Experience and emotion symbols
pub const SYMBOL_EXPERIENCE_TIME: &str = "⏱️";

/// Connectivity and scope symbols
pub const SYMBOL_SCOPE_GLOBAL: &str = "🌐";
