//! The [`Command`] trait and the [`Context`] type commands receive when executed.

use crate::browser::{Browser, Condition, ElementHandle, Locator};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::time::Duration;

/// How long polling waits keep trying before giving up.
pub const WAIT_TIMEOUT: Duration = Duration::from_secs(30);

/// How long polling waits sleep between checks.
pub const POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Execution context passed to [`Command::execute`].
///
/// Wraps the [`Browser`] the script drives and provides the polling waits
/// shared by the `wait page`, `wait element`, and `set field` commands.
pub struct Context {
    pub(crate) browser: Box<dyn Browser>,
}

impl Context {
    /// Wrap a browser session for script execution.
    pub fn new(browser: Box<dyn Browser>) -> Self {
        Self { browser }
    }

    /// Direct access to the underlying browser session.
    pub fn browser(&mut self) -> &mut dyn Browser {
        &mut *self.browser
    }

    /// Block until the current URL equals `url`.
    pub async fn wait_for_url(&mut self, url: &str) -> Result<()> {
        let deadline = tokio::time::Instant::now() + WAIT_TIMEOUT;
        loop {
            if self.browser.current_url().await? == url {
                return Ok(());
            }
            if tokio::time::Instant::now() >= deadline {
                return Err(anyhow!("Timed out waiting to reach page '{}'", url));
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    /// Block until the current URL no longer equals `url`.
    pub async fn wait_for_url_change(&mut self, url: &str) -> Result<()> {
        let deadline = tokio::time::Instant::now() + WAIT_TIMEOUT;
        loop {
            if self.browser.current_url().await? != url {
                return Ok(());
            }
            if tokio::time::Instant::now() >= deadline {
                return Err(anyhow!("Timed out waiting to leave page '{}'", url));
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    /// Block until the current document reports `readyState == "complete"`.
    pub async fn wait_for_page_ready(&mut self) -> Result<()> {
        let deadline = tokio::time::Instant::now() + WAIT_TIMEOUT;
        loop {
            if self.browser.page_ready().await? {
                return Ok(());
            }
            if tokio::time::Instant::now() >= deadline {
                return Err(anyhow!("Timed out waiting for the page to finish loading"));
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    /// Block until some element matching `locator` satisfies `condition`.
    pub async fn wait_for_element(
        &mut self,
        locator: &Locator,
        condition: Condition,
    ) -> Result<()> {
        let deadline = tokio::time::Instant::now() + WAIT_TIMEOUT;
        loop {
            if self.browser.element_state(locator, condition).await? {
                return Ok(());
            }
            if tokio::time::Instant::now() >= deadline {
                return Err(anyhow!(
                    "Timed out waiting for element {:?} to become {:?}",
                    locator,
                    condition
                ));
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    /// Block until a `<select>` element offers an option with `value`.
    pub async fn wait_for_option(&mut self, element: ElementHandle, value: &str) -> Result<()> {
        let deadline = tokio::time::Instant::now() + WAIT_TIMEOUT;
        loop {
            if self.browser.has_option(element, value).await? {
                return Ok(());
            }
            if tokio::time::Instant::now() >= deadline {
                return Err(anyhow!("Timed out waiting for option '{}' to appear", value));
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }
}

/// A single pagescript command.
///
/// Implement this trait to add a new command to the engine. Then:
///
/// 1. Define `pub const NAME: &'static str` on your struct — the script
///    keyword (e.g. `"click"`, `"wait page"`) matched by the resolver.
/// 2. Re-export the struct from `src/commands/mod.rs`.
/// 3. Add one entry to the `REGISTRY` in [`crate::parser`]:
///    `(MyCmd::NAME, MyCmd::parse_boxed)`.
///
/// Keyword resolution is longest-prefix, so multi-word keywords such as
/// `wait page` coexist with shorter ones.
#[async_trait(?Send)]
pub trait Command: 'static {
    /// The command keyword, accessible at runtime through a trait object.
    ///
    /// Implementations should return their `NAME` constant:
    /// `fn name(&self) -> &'static str { Self::NAME }`.
    fn name(&self) -> &'static str;

    /// Parse this command from the option string (everything after the
    /// command keyword on the script line). Implementations run the option
    /// tokenizer and validate that their required keys are present and
    /// non-empty; option values are otherwise uninterpreted here.
    fn parse(remainder: &str) -> Result<Self>
    where
        Self: Sized;

    /// Parse and box this command. Used as the function-pointer type stored
    /// in the command registry; the default implementation calls
    /// [`parse`](Self::parse) and boxes the result.
    fn parse_boxed(remainder: &str) -> Result<Box<dyn Command>>
    where
        Self: Sized,
    {
        Ok(Box::new(Self::parse(remainder)?))
    }

    /// Execute the command against the browser session in `ctx`.
    async fn execute(&self, ctx: &mut Context) -> Result<()>;
}
