use maud::{Markup, html};

use crate::record::{EntityReference, InsuranceAccepted};

pub fn description(
    specialties: &[EntityReference],
    languages: &[String],
    insurance: Option<InsuranceAccepted>,
    rating: Option<f32>,
    review_count: Option<u32>,
) -> Markup {
    html! {
        section.rounded-card.bg-white.p-6.shadow data-section="description" {
            h2.text-xl.font-semibold.mb-4 { "At a glance" }
            dl.grid.grid-cols-2.gap-y-2 {
                dt.font-medium { "Specialties" }
                dd {
                    @for (i, specialty) in specialties.iter().enumerate() {
                        @if i > 0 { ", " }
                        @match &specialty.slug {
                            Some(slug) if !slug.is_empty() => {
                                a.text-brand-primary href=(format!("/{}", slug)) data-entity-id=[specialty.entity_id.as_deref()] { (specialty.name) }
                            }
                            _ => {
                                span data-entity-id=[specialty.entity_id.as_deref()] { (specialty.name) }
                            }
                        }
                    }
                }
                dt.font-medium { "Languages" }
                dd { (languages.join(", ")) }
                dt.font-medium { "Insurance" }
                dd { (insurance.map(|insurance| insurance.label()).unwrap_or_default()) }
                dt.font-medium { "Rating" }
                dd {
                    @if let Some(rating) = rating {
                        (format!("{rating:.1}"))
                    }
                    @if let Some(review_count) = review_count {
                        " (" (review_count) " reviews)"
                    }
                }
            }
        }
    }
}
