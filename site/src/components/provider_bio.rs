use maud::{Markup, html};

use crate::record::Image;

pub fn provider_bio(name: &str, bio: Option<&str>, headshot: Option<&Image>) -> Markup {
    html! {
        section.rounded-card.bg-white.p-6.shadow.animate-slide-up data-section="bio" {
            h2.text-xl.font-semibold.mb-4 { "About " (name) }
            div.flex.gap-x-6 {
                @if let Some(headshot) = headshot {
                    img.rounded-card.w-32.h-32.object-cover
                        src=(headshot.url)
                        width=[headshot.width]
                        height=[headshot.height]
                        alt=(headshot.alternate_text.as_deref().unwrap_or(name));
                }
                p.text-brand-secondary { (bio.unwrap_or_default()) }
            }
        }
    }
}
