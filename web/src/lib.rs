use clap::Parser;
use wasm_bindgen::prelude::*;

mod app;
mod session;
mod storage;

/// Options read from the page URL hash, e.g. `#-vv&--seed=42`.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Force a dice seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,
}

/// Seed from JavaScript's Math.random, one byte per call.
fn random_seed() -> u64 {
    use js_sys::Math::random;
    let bytes: [u8; 8] = core::array::from_fn(|_| (256. * random()) as u8);
    u64::from_be_bytes(bytes)
}

#[wasm_bindgen(start)]
pub fn run_app() {
    use gloo::utils::{document, window};

    #[cfg(feature = "console_error_panic_hook")]
    {
        console_error_panic_hook::set_once();
    }

    let location_hash = window().location().hash().unwrap_or_default();
    let args = Args::try_parse_from(location_hash.split(['#', '&'])).unwrap_or_else(|err| {
        gloo::console::warn!(format!("ignoring URL options: {}", err));
        Args::parse_from([""])
    });
    if let Some(log_level) = args.verbose.log_level() {
        if let Err(err) = console_log::init_with_level(log_level) {
            gloo::console::error!(format!("Error initializing logger: {}", err));
        }
    }

    let seed = args.seed.unwrap_or_else(random_seed);
    log::debug!("dice seed: {}", seed);

    let Some(root) = document().get_element_by_id("qwixx") else {
        log::error!("Could not find id=\"qwixx\" element");
        return;
    };

    log::debug!("App started");
    yew::Renderer::<app::ScorePad>::with_root_and_props(root, app::ScorePadProps { seed })
        .render();
}
