use maud::{Markup, html};

pub fn list(title: &str, items: &[String]) -> Markup {
    html! {
        section.rounded-card.bg-white.p-6.shadow data-section="list" {
            h2.text-xl.font-semibold.mb-4 { (title) }
            ul.list-disc.pl-5 {
                @for item in items {
                    li { (item) }
                }
            }
        }
    }
}
