use maud::{Markup, html};

pub fn appointment_scheduler(
    name: &str,
    first_slot: Option<&str>,
    second_slot: Option<&str>,
    phone: Option<&str>,
) -> Markup {
    let slots: Vec<&str> = [first_slot, second_slot].into_iter().flatten().collect();

    html! {
        section.rounded-card.bg-brand-muted.p-6.animate-slide-up data-section="scheduler" {
            h2.text-xl.font-semibold.mb-2 { "Book an appointment" }
            p.mb-4 { (name) " is accepting new patients." }
            @if !slots.is_empty() {
                ul.flex.gap-x-3.mb-4 {
                    @for slot in &slots {
                        li.px-3.py-1.rounded-card.bg-white.text-brand-primary { (slot) }
                    }
                }
            }
            @if let Some(phone) = phone {
                a.inline-block.px-4.py-2.rounded-card.bg-brand-accent.text-white href=(format!("tel:{}", phone)) {
                    "Call " (phone)
                }
            }
        }
    }
}
