use std::env;

const DEFAULT_SERVER_URL: &str = "http://localhost:5000";
const DEFAULT_CHECKOUT_URL: &str = "https://checkout.stripe.com/pay";

/// Endpoints the client talks to, taken from the environment with local
/// defaults.
#[derive(Debug, Clone)]
pub struct Config {
    pub server_url: String,
    pub checkout_url: String,
}

impl Config {
    pub fn from_env() -> Self {
        let server_url =
            env::var("ENDCARD_SERVER_URL").unwrap_or_else(|_| DEFAULT_SERVER_URL.to_string());
        let checkout_url =
            env::var("ENDCARD_CHECKOUT_URL").unwrap_or_else(|_| DEFAULT_CHECKOUT_URL.to_string());

        Self {
            server_url: normalize_url(&server_url),
            checkout_url: normalize_url(&checkout_url),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            checkout_url: DEFAULT_CHECKOUT_URL.to_string(),
        }
    }
}

/// Endpoint paths are appended with a leading slash, so a configured
/// trailing slash would produce `//upload/combined`.
fn normalize_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_stripped() {
        assert_eq!(
            normalize_url("https://endcard.example.com/ "),
            "https://endcard.example.com"
        );
    }

    #[test]
    fn plain_url_is_untouched() {
        assert_eq!(normalize_url("http://localhost:5000"), "http://localhost:5000");
    }
}
