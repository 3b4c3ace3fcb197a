use clap::Parser;
use crate::prelude::*;

#[derive(Clone, Debug, Parser)]
#[command(version, about = "Plays Pylos over a line-based engine protocol on stdin/stdout")]
pub struct PTPServerOptions {
    #[arg(short, long)]
    pub log_level: Option<String>,

    #[arg(short, long, default_value_t = 4, value_parser = clap::value_parser!(u8).range(1..))]
    pub depth: u8,

    #[arg(long, default_value_t = false)]
    pub no_cache: bool,

    #[arg(long)]
    pub cache_entries: Option<usize>,

    #[arg(short, long, default_value_t = false)]
    pub reduce_adds: bool,

    #[arg(short, long, default_value_t = false)]
    pub opening: bool,

    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl PTPServerOptions {
    pub fn agent_config(&self) -> AgentConfig {
        let mut config = AgentConfig::default();

        config.search.depth = self.depth;
        config.search.reduce_adds = self.reduce_adds;
        config.search.opening = self.opening;
        if let Some(entries) = self.cache_entries {
            config.cache_entries = Some(entries);
        }
        if self.no_cache {
            config.cache_entries = None;
        }

        config
    }

    /// The logger spec string: an explicit level wins, then `--verbose`.
    pub fn log_spec(&self) -> String {
        match (&self.log_level, self.verbose) {
            (Some(level), _) => level.clone(),
            (None, true)     => "debug".into(),
            (None, false)    => "info".into(),
        }
    }
}
