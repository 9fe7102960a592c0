//! The [`Browser`] trait: the narrow surface commands drive.
//!
//! pagescript does not ship a browser client. Embedders implement this trait
//! over whatever automation backend they use (WebDriver, CDP, an in-process
//! test double) and hand it to [`crate::Engine`].

use async_trait::async_trait;
use thiserror::Error;

/// Errors surfaced by a [`Browser`] implementation.
#[derive(Debug, Error)]
pub enum BrowserError {
    /// Navigation to a URL failed.
    #[error("navigation failed: {reason}")]
    NavigationFailed { reason: String },

    /// An element handle is no longer valid (page changed, element removed).
    #[error("stale element handle {0:?}")]
    StaleElement(ElementHandle),

    /// An element could not be interacted with.
    #[error("element not interactable: {reason}")]
    NotInteractable { reason: String },

    /// Any backend-specific failure.
    #[error("browser backend error: {0}")]
    Backend(String),
}

/// Opaque handle to a DOM element, minted by a [`Browser`] implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementHandle(pub u64);

/// Element lookup strategy plus its query string.
///
/// Strategy names match the `-b` option values of the script grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Locator {
    ClassName(String),
    CssSelector(String),
    Id(String),
    LinkText(String),
    Name(String),
    PartialLinkText(String),
    TagName(String),
    XPath(String),
}

impl Locator {
    /// Build a locator from a strategy name and query. Unknown strategy
    /// names yield `None`; commands treat that as "matches nothing".
    pub fn new(strategy: &str, query: &str) -> Option<Self> {
        let query = query.to_string();
        match strategy {
            "className" => Some(Self::ClassName(query)),
            "cssSelector" => Some(Self::CssSelector(query)),
            "id" => Some(Self::Id(query)),
            "linkText" => Some(Self::LinkText(query)),
            "name" => Some(Self::Name(query)),
            "partialLinkText" => Some(Self::PartialLinkText(query)),
            "tagName" => Some(Self::TagName(query)),
            "xpath" => Some(Self::XPath(query)),
            _ => None,
        }
    }
}

/// A state an element can be waited on for, the `-c` option of
/// `wait element`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    /// Present in the DOM and clickable.
    Clickable,
    /// Present in the DOM and visible.
    Visible,
    /// Present in the DOM, visible or not.
    Exist,
}

impl Condition {
    /// Parse a condition name. Unknown names yield `None`; the wait command
    /// warns and does nothing, matching the permissive script grammar.
    pub fn new(name: &str) -> Option<Self> {
        match name {
            "clickable" => Some(Self::Clickable),
            "visible" => Some(Self::Visible),
            "exist" => Some(Self::Exist),
            _ => None,
        }
    }
}

/// The browser-automation surface pagescript commands are written against.
///
/// Navigation and lookup operate on the current page; element operations take
/// the opaque handles returned by [`find_all`](Browser::find_all). Handles
/// are only guaranteed valid until the next navigation.
#[async_trait]
pub trait Browser: Send {
    /// Navigate to `url`.
    async fn goto(&mut self, url: &str) -> Result<(), BrowserError>;

    /// Reload the current page.
    async fn refresh(&mut self) -> Result<(), BrowserError>;

    /// The URL of the current page.
    async fn current_url(&mut self) -> Result<String, BrowserError>;

    /// Whether the current document has finished loading
    /// (`document.readyState == "complete"`).
    async fn page_ready(&mut self) -> Result<bool, BrowserError>;

    /// All elements currently matching `locator`, possibly none.
    async fn find_all(&mut self, locator: &Locator) -> Result<Vec<ElementHandle>, BrowserError>;

    /// Whether some element matching `locator` satisfies `condition` right
    /// now. Used by polling waits; must not block.
    async fn element_state(
        &mut self,
        locator: &Locator,
        condition: Condition,
    ) -> Result<bool, BrowserError>;

    /// Click `element` through injected JavaScript, bypassing hit testing.
    async fn click_js(&mut self, element: ElementHandle) -> Result<(), BrowserError>;

    /// The lowercase tag name of `element`.
    async fn tag_name(&mut self, element: ElementHandle) -> Result<String, BrowserError>;

    /// The value of attribute `name` on `element`, if present.
    async fn attr(
        &mut self,
        element: ElementHandle,
        name: &str,
    ) -> Result<Option<String>, BrowserError>;

    /// Clear the current value of a text-like input.
    async fn clear(&mut self, element: ElementHandle) -> Result<(), BrowserError>;

    /// Type `text` into `element`.
    async fn send_keys(&mut self, element: ElementHandle, text: &str)
        -> Result<(), BrowserError>;

    /// Select the option with value `value` on a `<select>` element.
    async fn select_by_value(
        &mut self,
        element: ElementHandle,
        value: &str,
    ) -> Result<(), BrowserError>;

    /// Whether a `<select>` element currently offers an option with `value`.
    async fn has_option(
        &mut self,
        element: ElementHandle,
        value: &str,
    ) -> Result<bool, BrowserError>;

    /// Whether `element` is displayed (`style.display != "none"`).
    async fn is_displayed(&mut self, element: ElementHandle) -> Result<bool, BrowserError>;

    /// Force `element` visible by setting `style.display = "block"`.
    async fn show(&mut self, element: ElementHandle) -> Result<(), BrowserError>;
}
