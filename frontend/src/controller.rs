use web_sys::{Document, Window};

use crate::behaviors::{carousel, navigation, popups, scroll_effects, slider};
use crate::config::SiteConfig;

/// Wires every page behaviour. Each one is independent; a behaviour whose
/// markup is missing is skipped and the rest still run.
pub fn init(window: &Window, document: &Document, config: &SiteConfig) {
    let wired = [
        ("navigation", navigation::init(window, document, &config.navigation)),
        ("scroll effects", scroll_effects::init(document, &config.reveal)),
        ("comparison slider", slider::init(document)),
        ("testimonial carousel", carousel::init(document, &config.carousel)),
        ("popups", popups::init(window, document, &config.popups)),
    ];

    for (name, result) in &wired {
        match result {
            Some(()) => log::debug!("Wired {}", name),
            None => log::debug!("Skipped {}: markup not present", name),
        }
    }

    let count = wired.iter().filter(|(_, r)| r.is_some()).count();
    log::info!("Page interactions ready ({}/{} behaviours)", count, wired.len());
}
