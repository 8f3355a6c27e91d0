use dioxus::prelude::*;
use store::FleetConfig;
use tracing::{info, warn};

use views::{AuthenticatedLayout, DeletedVehicles, Login, PageNotFound, Users, Vehicles};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/")]
    Login {},
    #[layout(AuthenticatedLayout)]
        #[route("/vehicles")]
        Vehicles {},
        #[route("/deleted")]
        DeletedVehicles {},
        #[route("/users")]
        Users {},
    #[end_layout]
    #[route("/:..segments")]
    PageNotFound { segments: Vec<String> },
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

const FLEET_TOML: &str = include_str!("../Fleet.toml");

fn main() {
    if let Err(e) = dioxus::logger::init(tracing::Level::INFO) {
        eprintln!("failed to initialise logger: {e}");
    }
    dioxus::launch(App);
}

/// Parse the embedded `Fleet.toml`, falling back to defaults, then apply the
/// build-time base URL override if one was given.
fn resolve_config(raw: &str, base_url_override: Option<&str>) -> FleetConfig {
    let config = FleetConfig::from_toml(raw).unwrap_or_else(|e| {
        warn!("{}: {e}, using defaults", FleetConfig::filename());
        FleetConfig::default()
    });
    match base_url_override.map(str::trim) {
        Some(url) if !url.is_empty() => config.with_base_url(url),
        _ => config,
    }
}

#[component]
fn App() -> Element {
    let config = use_hook(|| {
        let config = resolve_config(FLEET_TOML, option_env!("FLEET_API_BASE_URL"));
        info!(base_url = %config.api.base_url, "loaded configuration");
        config
    });

    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        ui::SessionProvider {
            config,
            ui::ToastProvider {
                Router::<Route> {}
                ui::ActivityLogPanel {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_config_parses() {
        let config = resolve_config(FLEET_TOML, None);
        assert_eq!(config.list.page_size, 20);
        assert_eq!(config.image.max_dimension, 1450);
    }

    #[test]
    fn test_base_url_override() {
        let config = resolve_config(FLEET_TOML, Some(" https://fleet.example.com "));
        assert_eq!(config.api.base_url, "https://fleet.example.com");

        let config = resolve_config(FLEET_TOML, Some(""));
        assert_eq!(config.api.base_url, "http://localhost:3000");
    }

    #[test]
    fn test_invalid_config_falls_back_to_defaults() {
        let config = resolve_config("[list]\npage_size = 0", None);
        assert_eq!(config, FleetConfig::default());
    }
}
