//! [`Refresh`] command — reloads the current page.
//!
//! Script syntax: `refresh`

use crate::command::{Command, Context};
use crate::options::parse_options;
use anyhow::Result;
use async_trait::async_trait;

/// Reloads the current page. Takes no options, but the option string is
/// still tokenized so malformed trailing text rejects the line.
pub struct Refresh;

impl Refresh {
    pub const NAME: &'static str = "refresh";
}

#[async_trait(?Send)]
impl Command for Refresh {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn parse(remainder: &str) -> Result<Self> {
        parse_options(remainder)?;
        Ok(Self)
    }

    async fn execute(&self, ctx: &mut Context) -> Result<()> {
        ctx.browser().refresh().await?;
        Ok(())
    }
}
