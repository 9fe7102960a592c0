//! [`Click`] command — clicks every element matching a locator.
//!
//! Script syntax: `click -b id -s "submit-btn"`
//!
//! `-b` names the lookup strategy (`id`, `cssSelector`, `xpath`, ...) and
//! `-s` the query for that strategy. Clicks go through injected JavaScript,
//! so overlapped or off-screen elements are still clickable.

use crate::browser::Locator;
use crate::command::{Command, Context};
use crate::commands::required;
use crate::options::parse_options;
use anyhow::Result;
use async_trait::async_trait;

/// JS-clicks every element matched by `-b`/`-s`. An unknown lookup strategy
/// matches nothing and the command does nothing.
pub struct Click {
    pub locator: Option<Locator>,
}

impl Click {
    pub const NAME: &'static str = "click";
}

#[async_trait(?Send)]
impl Command for Click {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn parse(remainder: &str) -> Result<Self> {
        let opts = parse_options(remainder)?;
        let strategy = required(&opts, 'b', "element lookup strategy")?;
        let query = required(&opts, 's', "element query")?;
        let locator = Locator::new(&strategy, &query);
        if locator.is_none() {
            tracing::warn!(%strategy, "unknown element lookup strategy, click will match nothing");
        }
        Ok(Self { locator })
    }

    async fn execute(&self, ctx: &mut Context) -> Result<()> {
        let Some(locator) = &self.locator else {
            return Ok(());
        };
        let elements = ctx.browser().find_all(locator).await?;
        tracing::debug!(?locator, count = elements.len(), "clicking matched elements");
        for element in elements {
            ctx.browser().click_js(element).await?;
        }
        Ok(())
    }
}
