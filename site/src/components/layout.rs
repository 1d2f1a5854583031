use maud::{Markup, html};

use crate::record::SiteReference;

pub fn page_layout(site: Option<&SiteReference>, content: Markup) -> Markup {
    let site_name = site.and_then(|site| site.name.as_deref());

    html! {
        div.min-h-screen.flex.flex-col.font-sans.bg-gray-50 {
            header.bg-white.shadow {
                div.container.mx-auto.px-6.py-4.flex.items-center.gap-x-3 {
                    @if let Some(logo) = site.and_then(|site| site.logo.as_ref()) {
                        img.h-8 src=(logo.url) alt=(logo.alternate_text.as_deref().or(site_name).unwrap_or_default());
                    }
                    @if let Some(site_name) = site_name {
                        span.font-semibold.text-brand-primary { (site_name) }
                    }
                }
            }
            main.container.mx-auto.px-6.py-8.flex.flex-col.gap-y-6.grow {
                (content)
            }
            footer.text-center.text-sm.text-brand-secondary.py-6 {
                @if let Some(site_name) = site_name {
                    (site_name)
                }
            }
        }
    }
}
