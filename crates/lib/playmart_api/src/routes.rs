//! Route paths.

pub const GET_API_HEALTH: &str = "/api/health";
pub const POST_AUTH_REGISTER: &str = "/auth/register";
pub const POST_AUTH_LOGIN: &str = "/auth/login";
pub const GET_USERS_ME: &str = "/users/me";
pub const GET_USERS_ID: &str = "/users/{id}";
