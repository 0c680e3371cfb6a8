//! Log sink setup and the debug-logging switch.
//!
//! With debug logging off only errors get through; with it on everything from
//! `debug` up is emitted. `RUST_LOG` can still narrow the sink further.

use log::LevelFilter;

/// Install the `env_logger` sink. Safe to call more than once.
pub fn init(debug_logging: bool) {
    // A second call finds the sink already installed and only updates the level.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug"))
        .format_timestamp_millis()
        .try_init()
        .ok();
    set_debug_logging(debug_logging);
}

pub fn set_debug_logging(enabled: bool) {
    log::set_max_level(level_for(enabled));
}

fn level_for(enabled: bool) -> LevelFilter {
    if enabled {
        LevelFilter::Debug
    } else {
        LevelFilter::Error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_always_pass() {
        assert_eq!(level_for(false), LevelFilter::Error);
        assert_eq!(level_for(true), LevelFilter::Debug);
    }

    #[test]
    fn init_twice_keeps_first_sink() {
        init(true);
        init(false);
        log::error!("still logging after a second init");
    }
}
