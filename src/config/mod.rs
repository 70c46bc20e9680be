//! Configuration module

mod site;

pub use site::HashtagConfig;
pub use site::SearchConfig;
pub use site::SiteConfig;
pub use site::SITE_URL_ENV;
