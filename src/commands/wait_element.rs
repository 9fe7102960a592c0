//! [`WaitElement`] command — waits for an element to reach a state.
//!
//! Script syntax: `wait element -b id -s banner -c visible`
//!
//! The `-c` condition is one of `clickable`, `visible`, or `exist`. The
//! element is looked up in the document, not the rendered viewport.

use crate::browser::{Condition, Locator};
use crate::command::{Command, Context};
use crate::commands::required;
use crate::options::parse_options;
use anyhow::Result;
use async_trait::async_trait;

/// Blocks until an element matching `-b`/`-s` satisfies the `-c` condition.
///
/// Unknown strategies and conditions warn at parse and make the command a
/// no-op rather than failing the script.
pub struct WaitElement {
    pub locator: Option<Locator>,
    pub condition: Option<Condition>,
}

impl WaitElement {
    pub const NAME: &'static str = "wait element";
}

#[async_trait(?Send)]
impl Command for WaitElement {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn parse(remainder: &str) -> Result<Self> {
        let opts = parse_options(remainder)?;
        let strategy = required(&opts, 'b', "element lookup strategy")?;
        let query = required(&opts, 's', "element query")?;
        let condition_name = required(&opts, 'c', "wait condition")?;
        let locator = Locator::new(&strategy, &query);
        if locator.is_none() {
            tracing::warn!(%strategy, "unknown element lookup strategy, wait is a no-op");
        }
        let condition = Condition::new(&condition_name);
        if condition.is_none() {
            tracing::warn!(condition = %condition_name, "unknown wait condition, wait is a no-op");
        }
        Ok(Self { locator, condition })
    }

    async fn execute(&self, ctx: &mut Context) -> Result<()> {
        match (&self.locator, self.condition) {
            (Some(locator), Some(condition)) => ctx.wait_for_element(locator, condition).await,
            _ => Ok(()),
        }
    }
}
