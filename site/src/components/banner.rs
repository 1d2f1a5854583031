use maud::{Markup, html};

use crate::record::{Address, Image, ProviderStatus};

pub fn banner(
    name: &str,
    address: &Address,
    headshot: Option<&Image>,
    status: Option<ProviderStatus>,
) -> Markup {
    html! {
        section.bg-brand-primary.text-white.animate-fade-in data-section="banner" {
            div.container.mx-auto.px-6.py-10.flex.items-center.gap-x-6 {
                @if let Some(headshot) = headshot {
                    img.rounded-full.w-24.h-24.object-cover
                        src=(headshot.url)
                        alt=(headshot.alternate_text.as_deref().unwrap_or(name));
                }
                div {
                    h1.text-3xl.font-bold { (name) }
                    p.text-brand-muted { (address.city) ", " (address.region) }
                    @if let Some(status) = status {
                        span.inline-block.mt-2.px-3.py-1.rounded-card.bg-brand-accent.text-sm {
                            (status.label())
                        }
                    }
                }
            }
        }
    }
}
