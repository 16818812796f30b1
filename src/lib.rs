//! ZenChain rain core crate.
//!
//! Fills a page container with "falling" columns of the letters of ZENCHAIN.
//! The crate only builds the DOM (one `div.column` per 60px slot, one
//! `span.letter` per character) and randomizes each column's animation
//! duration and delay; the motion itself is plain CSS owned by the page.
//!
//! `create_rain()` runs against the stock `#rain-container`. Library users can
//! call [`rain::populate`] with their own [`RainTarget`] and random source.

use wasm_bindgen::prelude::*;

pub mod config;
pub mod error;
pub mod logging;
pub mod rain;
pub mod rng;

pub use config::RainConfig;
pub use error::RainError;
pub use rain::{ColumnSpec, DomContainer, RainSummary, RainTarget, column_count, plan_columns, populate};
pub use rng::{RandomSource, SeededRandom};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    logging::init();
}

// -----------------------------------------------------------------------------
// JS entrypoints
// -----------------------------------------------------------------------------

/// Populate `#rain-container` with the default ZENCHAIN rain.
#[wasm_bindgen]
pub fn create_rain() -> Result<(), JsValue> {
    rain::start_rain(&RainConfig::default())?;
    Ok(())
}

/// Populate a container using a JSON config; missing fields take defaults.
/// Returns the number of columns appended.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn create_rain_with_config(json: &str) -> Result<usize, JsValue> {
    let config = RainConfig::from_json(json)?;
    let summary = rain::start_rain(&config)?;
    Ok(summary.columns)
}

/// Remove every child of `#rain-container`.
#[wasm_bindgen]
pub fn clear_rain() -> Result<(), JsValue> {
    rain::clear_rain(config::DEFAULT_CONTAINER_ID)?;
    Ok(())
}
