use clap::Parser;
use scratch_reveal_core::{PrizeEvent, ResultSet, ScratchConfig};
use wasm_bindgen::prelude::*;

pub mod canvas;
mod card;
mod result;
mod scratch;
mod utils;

/// Decoded result events handed over by the contract watcher.
#[derive(Clone, Debug, PartialEq)]
struct EventList(Vec<PrizeEvent>);

fn parse_events(json: &str) -> Result<EventList, String> {
    serde_json::from_str(json)
        .map(EventList)
        .map_err(|err| err.to_string())
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Erased fraction at which the result is revealed
    #[arg(long, default_value_t = ScratchConfig::DEFAULT.threshold_fraction)]
    threshold: f64,

    /// Sample coverage on every n-th pointer move
    #[arg(long, default_value_t = ScratchConfig::DEFAULT.throttle_every)]
    throttle_every: u32,

    /// Smallest brush radius in CSS pixels
    #[arg(long, default_value_t = ScratchConfig::DEFAULT.min_brush_radius_px)]
    min_brush_radius: f64,

    /// Brush radius relative to the shorter side of the card
    #[arg(long, default_value_t = ScratchConfig::DEFAULT.brush_radius_factor)]
    brush_radius_factor: f64,

    /// Prize label to reveal, may be repeated
    #[arg(short, long = "result")]
    results: Vec<String>,

    /// JSON list of result events, e.g. `[{"prize":1}]`; wins over --result
    #[arg(long, value_parser = parse_events)]
    events: Option<EventList>,
}

impl Args {
    /// Parses `#--flag&value&...` style location hashes, already URI-decoded.
    fn from_hash(hash: &str) -> Result<Self, clap::Error> {
        Self::try_parse_from(hash.split(['#', '&']))
    }

    fn scratch_config(&self) -> ScratchConfig {
        ScratchConfig::new(
            self.threshold,
            self.throttle_every,
            self.min_brush_radius,
            self.brush_radius_factor,
        )
    }

    fn result_set(&self) -> ResultSet {
        match &self.events {
            Some(EventList(events)) => ResultSet::from_events(events),
            None if !self.results.is_empty() => ResultSet::new(self.results.iter().cloned()),
            None => ResultSet::no_prize(),
        }
    }
}

#[wasm_bindgen(start)]
pub fn run_app() {
    use gloo::utils::{document, window};

    #[cfg(feature = "console_error_panic_hook")]
    {
        console_error_panic_hook::set_once();
    }

    let location_hash = window()
        .location()
        .hash()
        .unwrap_or_else(|_| "".to_string());
    let location_hash = js_sys::decode_uri_component(&location_hash)
        .map(String::from)
        .unwrap_or(location_hash);

    let parsed = Args::from_hash(&location_hash);
    let log_level = match &parsed {
        Ok(args) => args.verbose.log_level(),
        Err(_) => Some(log::Level::Warn),
    };
    if let Some(log_level) = log_level {
        console_log::init_with_level(log_level).expect("Error initializing logger");
    }
    let args = parsed.unwrap_or_else(|err| {
        log::warn!("ignoring location hash: {}", err);
        Args::from_hash("").expect("defaults must parse")
    });

    let props = card::CardProps {
        results: args.result_set(),
        config: args.scratch_config(),
    };
    log::debug!("config: {:?}", props.config);
    log::debug!("results: {:?}", props.results);

    let root = document()
        .get_element_by_id("scratch")
        .expect("Could not find id=\"scratch\" element");

    log::debug!("App started");
    yew::Renderer::<card::CardView>::with_root_and_props(root, props).render();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_hash_gives_defaults() {
        let args = Args::from_hash("").unwrap();

        assert_eq!(args.scratch_config(), ScratchConfig::default());
        assert_eq!(args.result_set(), ResultSet::no_prize());
    }

    #[test]
    fn hash_overrides_config() {
        let args = Args::from_hash("#--threshold&0.6&--throttle-every&5&-vv").unwrap();
        let config = args.scratch_config();

        assert_eq!(config.threshold_fraction, 0.6);
        assert_eq!(config.throttle_every, 5);
        assert_eq!(config.min_brush_radius_px, 18.0);
    }

    #[test]
    fn repeated_results_keep_order() {
        let args = Args::from_hash("#--result&大奖&-r&小奖").unwrap();

        assert_eq!(args.result_set().as_slice(), ["大奖", "小奖"]);
    }

    #[test]
    fn events_win_over_labels() {
        let args = Args::from_hash(r#"#--result&小奖&--events&[{"prize":1},{"prize":3}]"#).unwrap();

        assert_eq!(args.result_set().as_slice(), ["大奖", "幸运奖"]);
    }

    #[test]
    fn malformed_events_are_rejected() {
        assert!(Args::from_hash("#--events&not-json").is_err());
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let args = Args::from_hash("#--threshold&3&--throttle-every&0").unwrap();
        let config = args.scratch_config();

        assert_eq!(config.threshold_fraction, 1.0);
        assert_eq!(config.throttle_every, 1);
    }
}
