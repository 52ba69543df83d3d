use std::sync::Arc;

use crate::{
    application::use_cases::{
        directory::DirectoryUseCases, invitation::InvitationUseCases,
        membership::MembershipUseCases,
    },
    infra::config::AppConfig,
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub directory_use_cases: Arc<DirectoryUseCases>,
    pub invitation_use_cases: Arc<InvitationUseCases>,
    pub membership_use_cases: Arc<MembershipUseCases>,
}
