use rust_embed::RustEmbed;

/// Embedded static assets for the viewer page (CSS, JS)
#[derive(RustEmbed)]
#[folder = "web/static/"]
pub struct StaticAssets;
