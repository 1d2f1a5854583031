//! Theme of the provider pages.
use kg_pages::assets::tailwind::{Keyframes, TailwindConfig};

use crate::components::STYLE_SOURCE;

const SITE_SOURCE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/src/**/*.rs");

fn tokens(values: &[(&str, &str)]) -> Vec<(String, String)> {
    values
        .iter()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect()
}

pub fn tailwind_config() -> TailwindConfig {
    TailwindConfig {
        sources: vec![SITE_SOURCE.to_string(), STYLE_SOURCE.to_string()],
        colors: tokens(&[
            ("brand-primary", "#0b4f8a"),
            ("brand-secondary", "#3c4a5c"),
            ("brand-accent", "#e0702b"),
            ("brand-muted", "#e8f0f7"),
        ]),
        radius: tokens(&[("card", "0.75rem")]),
        fonts: tokens(&[(
            "sans",
            "\"Source Sans 3\", ui-sans-serif, system-ui, sans-serif",
        )]),
        animations: tokens(&[
            ("fade-in", "fade-in 0.4s ease-out both"),
            ("slide-up", "slide-up 0.5s ease-out both"),
        ]),
        keyframes: vec![
            Keyframes {
                name: "fade-in".into(),
                steps: tokens(&[("from", "opacity: 0;"), ("to", "opacity: 1;")]),
            },
            Keyframes {
                name: "slide-up".into(),
                steps: tokens(&[
                    ("from", "opacity: 0; transform: translateY(1rem);"),
                    ("to", "opacity: 1; transform: translateY(0);"),
                ]),
            },
        ],
    }
}
