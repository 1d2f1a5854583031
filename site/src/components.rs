//! Presentation components used by the provider template.
//!
//! Every component is a plain function returning [`Markup`](maud::Markup), styled with Tailwind utility classes.
mod banner;
mod description;
mod details;
mod hours;
mod layout;
mod list;
mod provider_bio;
mod scheduler;
mod static_map;

pub use banner::banner;
pub use description::description;
pub use details::details;
pub use hours::hours;
pub use layout::page_layout;
pub use list::list;
pub use provider_bio::provider_bio;
pub use scheduler::appointment_scheduler;
pub use static_map::static_map;

/// Files of the component library that Tailwind must scan for utility classes.
pub const STYLE_SOURCE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/src/components/**/*.rs");
