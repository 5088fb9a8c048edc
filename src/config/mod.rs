//! Configuration module

mod site;

pub use site::CollectionsConfig;
pub use site::HomeConfig;
pub use site::LeadCaptureConfig;
pub use site::RedirectConfig;
pub use site::SeoConfig;
pub use site::ServerConfig;
pub use site::SiteConfig;
