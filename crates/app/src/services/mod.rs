mod character_resolver;
mod custodian_service;
mod marker_service;

pub use character_resolver::CharacterResolver;
pub use custodian_service::CustodianService;
pub use marker_service::MarkerService;
