use std::fs::File;
use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    adapters::{http::app_state::AppState, identity::HttpIdentityService},
    application::{
        ports::identity_service::IdentityServiceTrait,
        use_cases::{
            directory::DirectoryUseCases, invitation::InvitationUseCases,
            membership::MembershipUseCases,
        },
    },
    infra::config::AppConfig,
};

pub async fn init_app_state() -> anyhow::Result<AppState> {
    let config = AppConfig::from_env();

    let identity = Arc::new(HttpIdentityService::new(
        config.identity_base_url.clone(),
        config.identity_api_key.clone(),
    )) as Arc<dyn IdentityServiceTrait>;

    let directory_use_cases =
        DirectoryUseCases::new(identity.clone(), config.app_origin.to_string());

    let invitation_use_cases =
        InvitationUseCases::new(identity.clone(), directory_use_cases.clone());

    let membership_use_cases = MembershipUseCases::new(identity, directory_use_cases.clone());

    Ok(AppState {
        config: Arc::new(config),
        directory_use_cases: Arc::new(directory_use_cases),
        invitation_use_cases: Arc::new(invitation_use_cases),
        membership_use_cases: Arc::new(membership_use_cases),
    })
}

pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "opennews_membership=debug,tower_http=debug".into());

    // Console (pretty logs)
    let console_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .pretty();

    // File (structured JSON logs)
    let file = File::create("app.log").expect("cannot create log file");
    let json_layer = fmt::layer()
        .json()
        .with_writer(file)
        .with_current_span(true)
        .with_span_list(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(json_layer)
        .try_init()
        .ok();
}
