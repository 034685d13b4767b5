/// Connection settings for a Moodle site's REST web services.
#[derive(Debug, Clone)]
pub struct MoodleConfig {
    /// Site root, without trailing slash (e.g. `https://campus.example.org`).
    pub url: String,
    /// Token of a web-service user allowed to call the copy and manual
    /// enrolment functions.
    pub ws_token: String,
    /// Per-request timeout in seconds (default: `30`).
    pub timeout_secs: u64,
}

impl MoodleConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var               | Default                 |
    /// |-----------------------|-------------------------|
    /// | `MOODLE_URL`          | `http://localhost:8080` |
    /// | `MOODLE_WS_TOKEN`     | (required)              |
    /// | `MOODLE_TIMEOUT_SECS` | `30`                    |
    ///
    /// # Panics
    ///
    /// Panics if `MOODLE_WS_TOKEN` is not set or `MOODLE_TIMEOUT_SECS` is
    /// not a valid `u64`.
    pub fn from_env() -> Self {
        let url = std::env::var("MOODLE_URL")
            .unwrap_or_else(|_| "http://localhost:8080".into())
            .trim_end_matches('/')
            .to_string();

        let ws_token = std::env::var("MOODLE_WS_TOKEN")
            .expect("MOODLE_WS_TOKEN environment variable must be set");

        let timeout_secs: u64 = std::env::var("MOODLE_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("MOODLE_TIMEOUT_SECS must be a valid u64");

        Self {
            url,
            ws_token,
            timeout_secs,
        }
    }
}
