pub mod identity_service;
