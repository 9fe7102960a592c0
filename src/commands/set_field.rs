//! [`SetField`] command — populates form fields.
//!
//! Script syntax: `set field -b name -s user -v "alice liddell"`
//!
//! How the value is applied depends on the matched element:
//!
//! - `<select>`: waits for an option with that value to exist, then selects it
//! - `<input type="tel|text|password">`: cleared, then typed into
//! - `<input type="file">`: revealed first if hidden, then typed into
//! - `<input type="radio">`: JS-clicked when its `value` attribute matches
//! - `<input type="checkbox">`: JS-clicked
//!
//! Other tags and input types are left untouched.

use crate::browser::{ElementHandle, Locator};
use crate::command::{Command, Context};
use crate::commands::required;
use crate::options::parse_options;
use anyhow::Result;
use async_trait::async_trait;

/// Sets the value of every form field matched by `-b`/`-s`. A missing `-v`
/// is treated as the empty string.
pub struct SetField {
    pub locator: Option<Locator>,
    pub value: String,
}

impl SetField {
    pub const NAME: &'static str = "set field";

    async fn apply_to_input(&self, ctx: &mut Context, element: ElementHandle) -> Result<()> {
        let Some(input_type) = ctx.browser().attr(element, "type").await? else {
            return Ok(());
        };
        if input_type.eq_ignore_ascii_case("file") {
            if !ctx.browser().is_displayed(element).await? {
                ctx.browser().show(element).await?;
            }
            ctx.browser().send_keys(element, &self.value).await?;
        } else if input_type.eq_ignore_ascii_case("tel")
            || input_type.eq_ignore_ascii_case("text")
            || input_type.eq_ignore_ascii_case("password")
        {
            ctx.browser().clear(element).await?;
            ctx.browser().send_keys(element, &self.value).await?;
        } else if input_type.eq_ignore_ascii_case("radio") {
            let current = ctx.browser().attr(element, "value").await?;
            if current.as_deref() == Some(self.value.as_str()) {
                ctx.browser().click_js(element).await?;
            }
        } else if input_type.eq_ignore_ascii_case("checkbox") {
            ctx.browser().click_js(element).await?;
        }
        Ok(())
    }
}

#[async_trait(?Send)]
impl Command for SetField {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn parse(remainder: &str) -> Result<Self> {
        let opts = parse_options(remainder)?;
        let strategy = required(&opts, 'b', "element lookup strategy")?;
        let query = required(&opts, 's', "element query")?;
        let locator = Locator::new(&strategy, &query);
        if locator.is_none() {
            tracing::warn!(%strategy, "unknown element lookup strategy, set field will match nothing");
        }
        Ok(Self {
            locator,
            value: opts.get(&'v').cloned().unwrap_or_default(),
        })
    }

    async fn execute(&self, ctx: &mut Context) -> Result<()> {
        let Some(locator) = &self.locator else {
            return Ok(());
        };
        let elements = ctx.browser().find_all(locator).await?;
        tracing::debug!(?locator, count = elements.len(), "setting field value");
        for element in elements {
            let tag = ctx.browser().tag_name(element).await?;
            match tag.as_str() {
                "select" => {
                    ctx.wait_for_option(element, &self.value).await?;
                    ctx.browser().select_by_value(element, &self.value).await?;
                }
                "input" => self.apply_to_input(ctx, element).await?,
                _ => {}
            }
        }
        Ok(())
    }
}
