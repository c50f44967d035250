use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: Option<String>,
    pub password: Option<String>,
}

// Context for the credential form; errors is non-empty after a failed
// submission.
#[derive(Serialize, Default)]
pub struct LoginPageResponse {
    pub errors: Vec<String>,
}
