//! [`Sleep`] command — pauses script execution.
//!
//! Script syntax: `sleep -t 250` (milliseconds; defaults to 1000)

use crate::command::{Command, Context};
use crate::options::parse_options;
use anyhow::{Context as _, Result};
use async_trait::async_trait;
use std::time::Duration;

/// Pauses for `-t` milliseconds, or one second when `-t` is absent or empty.
pub struct Sleep {
    pub duration: Duration,
}

impl Sleep {
    pub const NAME: &'static str = "sleep";
}

#[async_trait(?Send)]
impl Command for Sleep {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn parse(remainder: &str) -> Result<Self> {
        let opts = parse_options(remainder)?;
        let millis = match opts.get(&'t') {
            Some(t) if !t.is_empty() => t
                .parse::<u64>()
                .with_context(|| format!("Invalid sleep time (-t): {t}"))?,
            _ => 1000,
        };
        Ok(Self {
            duration: Duration::from_millis(millis),
        })
    }

    async fn execute(&self, _ctx: &mut Context) -> Result<()> {
        tokio::time::sleep(self.duration).await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_millis() {
        assert_eq!(
            Sleep::parse(" -t 250").unwrap().duration,
            Duration::from_millis(250)
        );
    }

    #[test]
    fn test_parse_default() {
        assert_eq!(Sleep::parse("").unwrap().duration, Duration::from_millis(1000));
        assert_eq!(Sleep::parse(" -t").unwrap().duration, Duration::from_millis(1000));
    }

    #[test]
    fn test_parse_invalid_time() {
        assert!(Sleep::parse(" -t soon").is_err());
    }
}
