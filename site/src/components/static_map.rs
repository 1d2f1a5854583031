use maud::{Markup, html};

/// Zoom level of the embedded map.
const OPENSTREETMAP_ZOOM: u8 = 15;

fn embed_url(latitude: f64, longitude: f64) -> String {
    // Small bounding box around the point, the embed has no center+zoom parameters.
    let delta = 0.01;
    format!(
        "https://www.openstreetmap.org/export/embed.html?bbox={},{},{},{}&layer=mapnik&marker={},{}",
        longitude - delta,
        latitude - delta,
        longitude + delta,
        latitude + delta,
        latitude,
        longitude
    )
}

pub fn static_map(latitude: f64, longitude: f64) -> Markup {
    html! {
        section.rounded-card.overflow-hidden.shadow data-section="map"
            data-latitude=(latitude.to_string()) data-longitude=(longitude.to_string()) {
            iframe.w-full.h-64.border-0
                title="Map"
                loading="lazy"
                src=(embed_url(latitude, longitude)) {}
            a.block.p-2.text-sm.text-brand-primary
                href=(format!("https://www.openstreetmap.org/?mlat={latitude}&mlon={longitude}#map={OPENSTREETMAP_ZOOM}/{latitude}/{longitude}")) {
                "View larger map"
            }
        }
    }
}
