//! [`GoPage`] command — navigates the browser to a URL.
//!
//! Script syntax: `goPage -p https://example.com/login`

use crate::command::{Command, Context};
use crate::commands::required;
use crate::options::parse_options;
use anyhow::Result;
use async_trait::async_trait;

/// Navigates the browser session to the page given by `-p`.
pub struct GoPage {
    pub url: String,
}

impl GoPage {
    pub const NAME: &'static str = "goPage";
}

#[async_trait(?Send)]
impl Command for GoPage {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn parse(remainder: &str) -> Result<Self> {
        let opts = parse_options(remainder)?;
        Ok(Self {
            url: required(&opts, 'p', "target page")?,
        })
    }

    async fn execute(&self, ctx: &mut Context) -> Result<()> {
        tracing::debug!(url = %self.url, "navigating");
        ctx.browser().goto(&self.url).await?;
        Ok(())
    }
}
