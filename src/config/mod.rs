//! Configuration module

mod site;

pub use site::AboutConfig;
pub use site::Card;
pub use site::ContentLimits;
pub use site::CtaConfig;
pub use site::HighlightConfig;
pub use site::Messages;
pub use site::NavLink;
pub use site::ReadingConfig;
pub use site::SiteConfig;
pub use site::SocialLinks;
