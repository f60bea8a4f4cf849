//! Business logic services.

mod alias_service;
mod analytics_service;
mod redirect_service;

pub use alias_service::AliasService;
pub use analytics_service::AnalyticsService;
pub use redirect_service::RedirectService;
