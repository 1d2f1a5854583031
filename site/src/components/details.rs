use maud::{Markup, html};

use crate::record::Address;

pub fn details(address: &Address, phone: Option<&str>) -> Markup {
    html! {
        section.rounded-card.bg-white.p-6.shadow data-section="details" {
            h2.text-xl.font-semibold.mb-4 { "Location" }
            address.not-italic {
                div { (address.line1) }
                @if let Some(line2) = &address.line2 {
                    div { (line2) }
                }
                div { (address.city) ", " (address.region) " " (address.postal_code) }
                @if !address.country_code.is_empty() {
                    div { (address.country_code) }
                }
            }
            @if let Some(phone) = phone {
                a.block.mt-4.text-brand-primary href=(format!("tel:{}", phone)) { (phone) }
            }
        }
    }
}
