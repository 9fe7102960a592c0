mod click;
mod go_page;
mod refresh;
mod set_field;
mod sleep;
mod wait_element;
mod wait_page;

pub use click::Click;
pub use go_page::GoPage;
pub use refresh::Refresh;
pub use set_field::SetField;
pub use sleep::Sleep;
pub use wait_element::WaitElement;
pub use wait_page::{WaitPage, WaitPageMode};

use crate::options::OptionMap;
use anyhow::{Result, anyhow};

/// Fetch a required option, rejecting missing and empty values.
pub(crate) fn required(opts: &OptionMap, key: char, what: &str) -> Result<String> {
    match opts.get(&key) {
        Some(value) if !value.is_empty() => Ok(value.clone()),
        _ => Err(anyhow!("Missing {what} (-{key})")),
    }
}
