//! API Constants for the Yeastar PBX OpenAPI

/// Versioned OpenAPI path prefix appended to the configured base URL
pub const API_PATH: &str = "/openapi/v1.0";

/// Token exchange endpoint
pub const GET_TOKEN_ENDPOINT: &str = "get_token";

/// System information endpoint
pub const SYSTEM_INFORMATION_ENDPOINT: &str = "system/information";

/// Extension list endpoint
pub const EXTENSION_LIST_ENDPOINT: &str = "extension/list";

/// Access tokens issued by the PBX are valid for 30 minutes
pub const DEFAULT_TOKEN_TTL_SECS: u64 = 1800;

/// Standard headers for PBX requests
pub mod headers {
    /// User agent the PBX expects on every OpenAPI call
    pub const USER_AGENT: &str = "OpenAPI";

    /// Content type for JSON requests
    pub const CONTENT_TYPE_JSON: &str = "application/json";
}

/// Response fields shared by every PBX reply
pub mod fields {
    pub const ERRCODE: &str = "errcode";
    pub const ERRMSG: &str = "errmsg";
    pub const ACCESS_TOKEN: &str = "access_token";
    pub const EXTENSION: &str = "extension";
}

/// Full API prefix for a base URL, ignoring a trailing slash on the base
pub fn api_prefix(base_url: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), API_PATH)
}

/// Build full endpoint URL
pub fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}/{}", api_prefix(base_url), path)
}
