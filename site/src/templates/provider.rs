use kg_pages::template::prelude::*;
use maud::Render;

use crate::{components, record::Provider};

/// Fields fetched from the stream. Anything not listed here is stripped from the records.
const FIELDS: &[&str] = &[
    "id",
    "uid",
    "meta",
    "_site",
    "name",
    "address",
    "mainPhone",
    "c_providerBio",
    "c_specialtyPages.name",
    "c_specialtyPages.slug",
    "hours",
    "geocodedCoordinate",
    "services",
    "headshot",
    "acceptingNewPatients",
    "insuranceAccepted",
    "c_status",
    "c_rating",
    "c_reviewCount",
    "c_slot1",
    "c_slot2",
    "languages",
    "slug",
];

const FAVICON_PATH: &str = "/favicon.svg";

/// One page per published healthcare professional.
pub struct ProviderTemplate;

impl Template for ProviderTemplate {
    type Record = Provider;

    fn config(&self) -> TemplateConfig {
        TemplateConfig {
            stream: StreamConfig {
                id: "provider-pages".into(),
                fields: FIELDS.iter().map(|field| field.to_string()).collect(),
                filter: StreamFilter {
                    entity_types: vec!["healthcareProfessional".into()],
                    saved_filter_ids: vec!["provider-pages-published".into()],
                },
                localization: Localization {
                    locales: vec!["en".into()],
                    primary: false,
                },
            },
        }
    }

    fn path(&self, provider: &Provider) -> String {
        if let Some(slug) = provider.slug() {
            return slug.to_string();
        }

        format!(
            "{}/{}/{}/{}-{}",
            provider.meta.locale,
            provider.address.region,
            provider.address.city,
            provider.address.line1,
            provider.id
        )
    }

    fn redirects(&self, provider: &Provider) -> Vec<String> {
        vec![format!("index-old/{}", provider.id)]
    }

    fn head(&self, _ctx: &TemplateContext, provider: &Provider) -> HeadConfig {
        HeadConfig {
            title: provider.name.clone(),
            tags: vec![
                Tag::meta([
                    ("name", "description"),
                    ("content", provider.description.as_deref().unwrap_or_default()),
                ]),
                Tag::link([
                    ("rel", "icon"),
                    ("type", "image/svg+xml"),
                    ("href", FAVICON_PATH),
                ]),
            ],
            ..Default::default()
        }
    }

    fn render(&self, _ctx: &TemplateContext, provider: &Provider) -> impl Into<RenderResult> {
        compose(provider).render(provider)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Banner,
    Scheduler,
    Details,
    Services,
    Hours,
    Map,
    Bio,
    Description,
}

impl Section {
    /// Value of the `data-section` attribute of the section's root element.
    pub fn name(&self) -> &'static str {
        match self {
            Section::Banner => "banner",
            Section::Scheduler => "scheduler",
            Section::Details => "details",
            Section::Services => "list",
            Section::Hours => "hours",
            Section::Map => "map",
            Section::Bio => "bio",
            Section::Description => "description",
        }
    }
}

/// What a section turns into when its predicate does not hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Exclusion {
    Omit,
    /// Keep an empty element in the section's slot.
    Placeholder,
}

struct SectionSpec {
    section: Section,
    include: fn(&Provider) -> bool,
    when_excluded: Exclusion,
    render: fn(&Provider) -> Markup,
}

fn always(_: &Provider) -> bool {
    true
}

const SECTIONS: &[SectionSpec] = &[
    SectionSpec {
        section: Section::Banner,
        include: always,
        when_excluded: Exclusion::Omit,
        render: |p| {
            components::banner(&p.name, &p.address, p.headshot.as_ref(), p.status)
        },
    },
    SectionSpec {
        section: Section::Scheduler,
        include: |p| p.accepting_new_patients,
        when_excluded: Exclusion::Placeholder,
        render: |p| {
            components::appointment_scheduler(
                &p.name,
                p.first_slot.as_deref(),
                p.second_slot.as_deref(),
                p.main_phone.as_deref(),
            )
        },
    },
    SectionSpec {
        section: Section::Details,
        include: always,
        when_excluded: Exclusion::Omit,
        render: |p| components::details(&p.address, p.main_phone.as_deref()),
    },
    SectionSpec {
        section: Section::Services,
        include: |p| !p.services.is_empty(),
        when_excluded: Exclusion::Omit,
        render: |p| components::list("Services", &p.services),
    },
    SectionSpec {
        section: Section::Hours,
        include: |p| p.hours.is_some(),
        when_excluded: Exclusion::Omit,
        render: |p| match &p.hours {
            Some(hours) => components::hours("Office Hours", hours),
            None => html! {},
        },
    },
    SectionSpec {
        section: Section::Map,
        include: |p| p.coordinate.is_some(),
        when_excluded: Exclusion::Omit,
        render: |p| match p.coordinate {
            Some(coordinate) => components::static_map(coordinate.latitude, coordinate.longitude),
            None => html! {},
        },
    },
    SectionSpec {
        section: Section::Bio,
        include: always,
        when_excluded: Exclusion::Omit,
        render: |p| components::provider_bio(&p.name, p.bio.as_deref(), p.headshot.as_ref()),
    },
    SectionSpec {
        section: Section::Description,
        include: always,
        when_excluded: Exclusion::Omit,
        render: |p| {
            components::description(
                &p.specialty_pages,
                &p.languages,
                p.insurance_accepted,
                p.rating,
                p.review_count,
            )
        },
    },
];

#[derive(Debug)]
pub enum BlockContent {
    Rendered(Markup),
    Placeholder,
}

#[derive(Debug)]
pub struct Block {
    pub section: Section,
    pub content: BlockContent,
}

impl Render for Block {
    fn render(&self) -> Markup {
        match &self.content {
            BlockContent::Rendered(markup) => markup.clone(),
            BlockContent::Placeholder => html! { div data-section=(self.section.name()) {} },
        }
    }
}

/// The page body of a provider, as an ordered list of blocks.
#[derive(Debug)]
pub struct ComposedPage {
    pub blocks: Vec<Block>,
}

impl ComposedPage {
    #[cfg(test)]
    pub fn sections(&self) -> Vec<Section> {
        self.blocks.iter().map(|block| block.section).collect()
    }

    #[cfg(test)]
    pub fn block(&self, section: Section) -> Option<&Block> {
        self.blocks.iter().find(|block| block.section == section)
    }

    /// Renders the blocks inside the site layout.
    pub fn render(&self, provider: &Provider) -> Markup {
        components::page_layout(
            provider.site.as_ref(),
            html! {
                article.contents data-entity-id=(provider.id) data-entity-uid=[provider.uid.as_deref()] {
                    @for block in &self.blocks {
                        (block)
                    }
                }
            },
        )
    }
}

/// Evaluates every section against `provider`, in page order.
pub fn compose(provider: &Provider) -> ComposedPage {
    let blocks = SECTIONS
        .iter()
        .filter_map(|spec| {
            let content = if (spec.include)(provider) {
                BlockContent::Rendered((spec.render)(provider))
            } else {
                match spec.when_excluded {
                    Exclusion::Omit => return None,
                    Exclusion::Placeholder => BlockContent::Placeholder,
                }
            };

            Some(Block {
                section: spec.section,
                content,
            })
        })
        .collect();

    ComposedPage { blocks }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn provider(value: Value) -> Provider {
        serde_json::from_value(value).unwrap()
    }

    fn context() -> TemplateContext<'static> {
        TemplateContext {
            path: "",
            relative_prefix_to_root: "",
            locale: "en",
        }
    }

    fn la_provider() -> Provider {
        provider(json!({
            "id": "42",
            "meta": { "locale": "en" },
            "name": "Dr. Jane Smith",
            "slug": "",
            "address": { "line1": "1 Main St", "city": "LA", "region": "CA", "postalCode": "90001" }
        }))
    }

    #[test]
    fn test_path_uses_slug_verbatim() {
        let provider = provider(json!({
            "id": "42",
            "meta": { "locale": "en" },
            "slug": "dr-smith"
        }));

        assert_eq!(ProviderTemplate.path(&provider), "dr-smith");
        assert_eq!(ProviderTemplate.redirects(&provider), vec!["index-old/42"]);
    }

    #[test]
    fn test_path_falls_back_to_address() {
        assert_eq!(
            ProviderTemplate.path(&la_provider()),
            "en/CA/LA/1 Main St-42"
        );
    }

    #[test]
    fn test_path_fallback_keeps_empty_segments() {
        let provider = provider(json!({ "id": "7", "meta": { "locale": "en" } }));

        assert_eq!(ProviderTemplate.path(&provider), "en///-7");
    }

    #[test]
    fn test_redirects_are_exactly_one_legacy_path() {
        let redirects = ProviderTemplate.redirects(&la_provider());

        assert_eq!(redirects, vec!["index-old/42".to_string()]);
    }

    #[test]
    fn test_config_selects_published_providers() {
        let config = ProviderTemplate.config();

        assert_eq!(config.stream.id, "provider-pages");
        assert!(config.stream.fields.contains(&"c_specialtyPages.slug".to_string()));
        assert!(!config.stream.fields.contains(&"description".to_string()));
        assert!(config.stream.filter.matches(
            Some("healthcareProfessional"),
            &["provider-pages-published".to_string()]
        ));
        assert!(!config.stream.filter.matches(Some("location"), &["provider-pages-published".to_string()]));
        assert!(config.stream.localization.includes("en"));
        assert!(!config.stream.localization.primary);
    }

    #[test]
    fn test_head_title_is_name_verbatim() {
        let ctx = context();

        let head = ProviderTemplate.head(&ctx, &la_provider());
        assert_eq!(head.title, "Dr. Jane Smith");
        assert_eq!(head.charset, "UTF-8");
        assert_eq!(head.viewport, "width=device-width, initial-scale=1");

        let unnamed = provider(json!({ "id": "1", "meta": { "locale": "en" } }));
        assert_eq!(ProviderTemplate.head(&ctx, &unnamed).title, "");
    }

    #[test]
    fn test_head_tags_description_then_favicon() {
        let ctx = context();

        let head = ProviderTemplate.head(&ctx, &la_provider());

        assert_eq!(head.tags.len(), 2);
        assert_eq!(head.tags[0].kind, TagKind::Meta);
        assert_eq!(head.tags[0].attribute("name"), Some("description"));
        assert_eq!(head.tags[0].attribute("content"), Some(""));
        assert_eq!(head.tags[1].kind, TagKind::Link);
        assert_eq!(head.tags[1].attribute("href"), Some("/favicon.svg"));
        assert_eq!(head.tags[1].attribute("type"), Some("image/svg+xml"));
    }

    #[test]
    fn test_minimal_record_sections() {
        let page = compose(&la_provider());

        assert_eq!(
            page.sections(),
            vec![
                Section::Banner,
                Section::Scheduler,
                Section::Details,
                Section::Bio,
                Section::Description,
            ]
        );
        assert!(matches!(
            page.block(Section::Scheduler).unwrap().content,
            BlockContent::Placeholder
        ));
    }

    #[test]
    fn test_scheduler_only_when_accepting_new_patients() {
        let mut provider = la_provider();
        provider.accepting_new_patients = true;
        provider.first_slot = Some("Mon 9:00".into());

        let page = compose(&provider);
        let scheduler = page.block(Section::Scheduler).unwrap();
        assert!(matches!(scheduler.content, BlockContent::Rendered(_)));
        assert!(page.render(&provider).into_string().contains("Mon 9:00"));

        provider.accepting_new_patients = false;
        let html = compose(&provider).render(&provider).into_string();
        assert!(html.contains(r#"<div data-section="scheduler"></div>"#));
        assert!(!html.contains("Book an appointment"));
        assert!(html.contains(r#"data-section="banner""#));
        assert!(html.contains(r#"data-section="details""#));
        assert!(html.contains(r#"data-section="bio""#));
        assert!(html.contains(r#"data-section="description""#));
    }

    #[test]
    fn test_services_rendered_when_non_empty() {
        let mut provider = la_provider();
        assert!(compose(&provider).block(Section::Services).is_none());

        provider.services = vec!["Checkups".into(), "Vaccinations".into()];
        let page = compose(&provider);
        assert!(page.block(Section::Services).is_some());

        let html = page.render(&provider).into_string();
        assert!(html.contains("<li>Checkups</li>"));
        assert!(html.contains("<li>Vaccinations</li>"));
        assert!(html.contains("Services"));
    }

    #[test]
    fn test_hours_and_map_follow_their_fields() {
        let provider = provider(json!({
            "id": "42",
            "meta": { "locale": "en" },
            "hours": { "monday": { "openIntervals": [{ "start": "09:00", "end": "17:00" }] } },
            "geocodedCoordinate": { "latitude": 34.05, "longitude": -118.25 }
        }));

        let page = compose(&provider);
        assert_eq!(
            page.sections(),
            vec![
                Section::Banner,
                Section::Scheduler,
                Section::Details,
                Section::Hours,
                Section::Map,
                Section::Bio,
                Section::Description,
            ]
        );

        let html = page.render(&provider).into_string();
        assert!(html.contains("Office Hours"));
        assert!(html.contains(r#"data-latitude="34.05""#));
        assert!(html.contains(r#"data-longitude="-118.25""#));
    }

    #[test]
    fn test_missing_values_render_empty() {
        let provider = provider(json!({ "id": "1", "meta": { "locale": "en" } }));

        let result: RenderResult = ProviderTemplate.render(&context(), &provider).into();

        let RenderResult::Text(html) = result else {
            panic!("expected a text render");
        };
        assert!(html.contains("<h1 class=\"text-3xl font-bold\"></h1>"));
    }
}
