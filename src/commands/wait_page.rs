//! [`WaitPage`] command — waits for navigation relative to a URL.
//!
//! Script syntax:
//! - `wait page -p /home` — wait until the browser is at `/home`
//! - `wait page -p /home -r` — additionally wait for the document to load
//! - `wait page -p /login -l` — wait until the browser has left `/login`

use crate::command::{Command, Context};
use crate::commands::required;
use crate::options::parse_options;
use anyhow::Result;
use async_trait::async_trait;

/// What to wait for, relative to the `-p` URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitPageMode {
    /// The current URL equals `-p`.
    Arrive,
    /// The current URL equals `-p` and the document has finished loading.
    Ready,
    /// The current URL no longer equals `-p`.
    Leave,
}

/// Blocks until the browser reaches, fully loads, or leaves a page.
///
/// `-r` takes precedence over `-l` when both flags are given.
pub struct WaitPage {
    pub url: String,
    pub mode: WaitPageMode,
}

impl WaitPage {
    pub const NAME: &'static str = "wait page";
}

#[async_trait(?Send)]
impl Command for WaitPage {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn parse(remainder: &str) -> Result<Self> {
        let opts = parse_options(remainder)?;
        let url = required(&opts, 'p', "target page")?;
        let mode = if opts.contains_key(&'r') {
            WaitPageMode::Ready
        } else if opts.contains_key(&'l') {
            WaitPageMode::Leave
        } else {
            WaitPageMode::Arrive
        };
        Ok(Self { url, mode })
    }

    async fn execute(&self, ctx: &mut Context) -> Result<()> {
        tracing::debug!(url = %self.url, mode = ?self.mode, "waiting on page");
        match self.mode {
            WaitPageMode::Arrive => ctx.wait_for_url(&self.url).await,
            WaitPageMode::Ready => {
                ctx.wait_for_url(&self.url).await?;
                ctx.wait_for_page_ready().await
            }
            WaitPageMode::Leave => ctx.wait_for_url_change(&self.url).await,
        }
    }
}
