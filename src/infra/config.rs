use std::net::SocketAddr;

use axum::http::HeaderValue;
use env_helpers::{get_env, get_env_default};
use secrecy::SecretString;
use time::Duration;
use url::Url;

pub struct AppConfig {
    pub jwt_secret: SecretString,
    pub session_ttl: Duration,
    /// Public origin of the web app, used to template invitation links.
    pub app_origin: Url,
    pub cors_origin: HeaderValue,
    pub bind_addr: SocketAddr,
    pub identity_base_url: Url,
    pub identity_api_key: SecretString,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let jwt_secret: SecretString = SecretString::new(get_env::<String>("JWT_SECRET").into());

        let session_ttl_secs: i64 = get_env_default("SESSION_TTL_SECS", 86_400);

        let app_origin: Url = get_env("APP_ORIGIN");
        let cors_origin: HeaderValue =
            get_env_default("CORS_ORIGIN", String::from("http://localhost:3000"))
                .parse()
                .expect("CORS_ORIGIN must be a valid header value");

        let bind_addr: SocketAddr = get_env_default("BIND_ADDR", "127.0.0.1:3001".parse().unwrap());

        let identity_base_url: Url = get_env("IDENTITY_BASE_URL");
        let identity_api_key: SecretString =
            SecretString::new(get_env::<String>("IDENTITY_API_KEY").into());

        Self {
            jwt_secret,
            session_ttl: Duration::seconds(session_ttl_secs),
            app_origin,
            cors_origin,
            bind_addr,
            identity_base_url,
            identity_api_key,
        }
    }
}
