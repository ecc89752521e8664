use std::path::Path;

use log::LevelFilter;
use log4rs::{
    append::console::{ConsoleAppender, Target},
    config::{Appender, Config, Root},
    encode::pattern::PatternEncoder,
};
use log4rs_dynamic_filters::DynamicLevelFilter;

use crate::error::{Error, Result};

/// Name of the dynamic filter that `log4rs.yaml` attaches to the crate's output.
pub const DYNAMIC_FILTER: &str = "album_roulette";

const FALLBACK_PATTERN: &str = "{d(%H:%M:%S)} {h({l:5})} {t} - {m}{n}";

/// Set up logging from the given log4rs YAML file. If it doesn't exist, log
/// to stderr instead, at `warn` unless `verbose` is set.
pub fn init(path: &Path, verbose: bool) -> Result<()> {
    if path.exists() {
        log4rs::init_file(path, log4rs_dynamic_filters::default_deserializers())
            .map_err(|e| Error::Logging(e.to_string()))?;
        if verbose {
            DynamicLevelFilter::set(DYNAMIC_FILTER, LevelFilter::Debug);
        }
    } else {
        let level = if verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Warn
        };
        log4rs::init_config(fallback_config(level)?).map_err(|e| Error::Logging(e.to_string()))?;
    }
    info!("Initialised logging");
    Ok(())
}

/// A plain stderr configuration, for when no YAML config is present.
fn fallback_config(level: LevelFilter) -> Result<Config> {
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(FALLBACK_PATTERN)))
        .build();
    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(level))?;
    Ok(config)
}
