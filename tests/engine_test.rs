//! End-to-end engine tests against a recording mock browser.

use async_trait::async_trait;
use pagescript::browser::{Browser, BrowserError, Condition, ElementHandle, Locator};
use pagescript::Engine;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Everything the mock knows about the fake page, plus a call log.
#[derive(Default)]
struct MockState {
    log: Vec<String>,
    url: String,
    /// Maps a locator query to the element ids it matches.
    elements: HashMap<String, Vec<u64>>,
    /// Tag name per element id.
    tags: HashMap<u64, String>,
    /// (element id, attribute name) -> value.
    attrs: HashMap<(u64, String), String>,
    /// Element ids whose style.display is not "none".
    displayed: Vec<u64>,
}

impl MockState {
    fn element(&mut self, query: &str, id: u64, tag: &str) -> &mut Self {
        self.elements.entry(query.to_string()).or_default().push(id);
        self.tags.insert(id, tag.to_string());
        self
    }

    fn attr(&mut self, id: u64, name: &str, value: &str) -> &mut Self {
        self.attrs.insert((id, name.to_string()), value.to_string());
        self
    }
}

#[derive(Clone)]
struct MockBrowser(Arc<Mutex<MockState>>);

impl MockBrowser {
    fn new() -> (Self, Arc<Mutex<MockState>>) {
        let state = Arc::new(Mutex::new(MockState::default()));
        (Self(state.clone()), state)
    }

    fn record(&self, entry: String) {
        self.0.lock().unwrap().log.push(entry);
    }
}

fn query_of(locator: &Locator) -> &str {
    match locator {
        Locator::ClassName(q)
        | Locator::CssSelector(q)
        | Locator::Id(q)
        | Locator::LinkText(q)
        | Locator::Name(q)
        | Locator::PartialLinkText(q)
        | Locator::TagName(q)
        | Locator::XPath(q) => q,
    }
}

#[async_trait]
impl Browser for MockBrowser {
    async fn goto(&mut self, url: &str) -> Result<(), BrowserError> {
        self.record(format!("goto {url}"));
        self.0.lock().unwrap().url = url.to_string();
        Ok(())
    }

    async fn refresh(&mut self) -> Result<(), BrowserError> {
        self.record("refresh".into());
        Ok(())
    }

    async fn current_url(&mut self) -> Result<String, BrowserError> {
        Ok(self.0.lock().unwrap().url.clone())
    }

    async fn page_ready(&mut self) -> Result<bool, BrowserError> {
        Ok(true)
    }

    async fn find_all(&mut self, locator: &Locator) -> Result<Vec<ElementHandle>, BrowserError> {
        let state = self.0.lock().unwrap();
        Ok(state
            .elements
            .get(query_of(locator))
            .map(|ids| ids.iter().map(|&id| ElementHandle(id)).collect())
            .unwrap_or_default())
    }

    async fn element_state(
        &mut self,
        locator: &Locator,
        condition: Condition,
    ) -> Result<bool, BrowserError> {
        self.record(format!("element_state {} {condition:?}", query_of(locator)));
        Ok(self.0.lock().unwrap().elements.contains_key(query_of(locator)))
    }

    async fn click_js(&mut self, element: ElementHandle) -> Result<(), BrowserError> {
        self.record(format!("click_js {}", element.0));
        Ok(())
    }

    async fn tag_name(&mut self, element: ElementHandle) -> Result<String, BrowserError> {
        Ok(self
            .0
            .lock()
            .unwrap()
            .tags
            .get(&element.0)
            .cloned()
            .unwrap_or_default())
    }

    async fn attr(
        &mut self,
        element: ElementHandle,
        name: &str,
    ) -> Result<Option<String>, BrowserError> {
        Ok(self
            .0
            .lock()
            .unwrap()
            .attrs
            .get(&(element.0, name.to_string()))
            .cloned())
    }

    async fn clear(&mut self, element: ElementHandle) -> Result<(), BrowserError> {
        self.record(format!("clear {}", element.0));
        Ok(())
    }

    async fn send_keys(
        &mut self,
        element: ElementHandle,
        text: &str,
    ) -> Result<(), BrowserError> {
        self.record(format!("send_keys {} {text}", element.0));
        Ok(())
    }

    async fn select_by_value(
        &mut self,
        element: ElementHandle,
        value: &str,
    ) -> Result<(), BrowserError> {
        self.record(format!("select_by_value {} {value}", element.0));
        Ok(())
    }

    async fn has_option(
        &mut self,
        _element: ElementHandle,
        _value: &str,
    ) -> Result<bool, BrowserError> {
        Ok(true)
    }

    async fn is_displayed(&mut self, element: ElementHandle) -> Result<bool, BrowserError> {
        Ok(self.0.lock().unwrap().displayed.contains(&element.0))
    }

    async fn show(&mut self, element: ElementHandle) -> Result<(), BrowserError> {
        self.record(format!("show {}", element.0));
        Ok(())
    }
}

fn log_of(state: &Arc<Mutex<MockState>>) -> Vec<String> {
    state.lock().unwrap().log.clone()
}

#[tokio::test]
async fn test_login_flow() {
    let (browser, state) = MockBrowser::new();
    {
        let mut s = state.lock().unwrap();
        s.element("username", 1, "input").attr(1, "type", "text");
        s.element("password", 2, "input").attr(2, "type", "password");
        s.element("submit-btn", 3, "button");
    }

    let script = r#"
-- sign in
goPage -p https://example.com/login
set field -b id -s username -v alice
set field -b id -s password -v "correct horse"
click -b id -s "submit-btn"
"#;

    let mut engine = Engine::new(Box::new(browser));
    engine.run_str(script).await.unwrap();

    assert_eq!(
        log_of(&state),
        vec![
            "goto https://example.com/login",
            "clear 1",
            "send_keys 1 alice",
            "clear 2",
            "send_keys 2 correct horse",
            "click_js 3",
        ]
    );
}

#[tokio::test]
async fn test_wait_page_after_navigation() {
    let (browser, state) = MockBrowser::new();
    let script = "goPage -p /home\nwait page -p /home -r\n";

    let mut engine = Engine::new(Box::new(browser));
    engine.run_str(script).await.unwrap();
    assert_eq!(state.lock().unwrap().url, "/home");
}

#[tokio::test]
async fn test_wait_page_leave() {
    let (browser, _state) = MockBrowser::new();
    // The mock starts on "" which already differs from /login.
    let mut engine = Engine::new(Box::new(browser));
    engine.run_str("wait page -p /login -l\n").await.unwrap();
}

#[tokio::test]
async fn test_wait_element_condition() {
    let (browser, state) = MockBrowser::new();
    state.lock().unwrap().element("banner", 7, "div");

    let mut engine = Engine::new(Box::new(browser));
    engine
        .run_str("wait element -b id -s banner -c visible\n")
        .await
        .unwrap();
    assert_eq!(log_of(&state), vec!["element_state banner Visible"]);
}

#[tokio::test]
async fn test_set_field_select_radio_checkbox() {
    let (browser, state) = MockBrowser::new();
    {
        let mut s = state.lock().unwrap();
        s.element("country", 1, "select");
        s.element("plan", 2, "input").attr(2, "type", "radio");
        s.attr(2, "value", "basic");
        s.element("plan", 3, "input").attr(3, "type", "radio");
        s.attr(3, "value", "pro");
        s.element("agree", 4, "input").attr(4, "type", "checkbox");
    }

    let script = "set field -b name -s country -v NZ\n\
                  set field -b name -s plan -v pro\n\
                  set field -b name -s agree\n";
    let mut engine = Engine::new(Box::new(browser));
    engine.run_str(script).await.unwrap();

    assert_eq!(
        log_of(&state),
        vec![
            "select_by_value 1 NZ",
            // only the radio whose value attribute matches is clicked
            "click_js 3",
            "click_js 4",
        ]
    );
}

#[tokio::test]
async fn test_set_field_hidden_file_input() {
    let (browser, state) = MockBrowser::new();
    state
        .lock()
        .unwrap()
        .element("upload", 9, "input")
        .attr(9, "type", "file");

    let mut engine = Engine::new(Box::new(browser));
    engine
        .run_str("set field -b id -s upload -v /tmp/report.pdf\n")
        .await
        .unwrap();

    // Hidden inputs are revealed before receiving the path.
    assert_eq!(
        log_of(&state),
        vec!["show 9", "send_keys 9 /tmp/report.pdf"]
    );
}

#[tokio::test]
async fn test_error_stops_remaining_lines() {
    let (browser, state) = MockBrowser::new();
    let script = "goPage -p /a\nteleport -p /b\ngoPage -p /c\n";

    let mut engine = Engine::new(Box::new(browser));
    let err = engine.run_str(script).await.unwrap_err();
    let msg = format!("{err:#}");
    assert!(msg.contains("line 2"), "got: {msg}");

    // The line before the failure already ran; the one after never does.
    assert_eq!(log_of(&state), vec!["goto /a"]);
}

#[tokio::test]
async fn test_unknown_strategy_is_noop() {
    let (browser, state) = MockBrowser::new();
    let mut engine = Engine::new(Box::new(browser));
    engine.run_str("click -b telepathy -s x\n").await.unwrap();
    assert!(log_of(&state).is_empty());
}

#[tokio::test]
async fn test_sibling_scripts_are_isolated() {
    let (good, good_state) = MockBrowser::new();
    let (bad, bad_state) = MockBrowser::new();

    let mut good_engine = Engine::new(Box::new(good));
    let mut bad_engine = Engine::new(Box::new(bad));

    let (good_result, bad_result) = tokio::join!(
        good_engine.run_str("goPage -p /ok\nrefresh\n"),
        bad_engine.run_str("goPage -p /start\nnot a command\n"),
    );

    assert!(good_result.is_ok());
    assert!(bad_result.is_err());
    assert_eq!(log_of(&good_state), vec!["goto /ok", "refresh"]);
    assert_eq!(log_of(&bad_state), vec!["goto /start"]);
}

#[tokio::test]
async fn test_execute_preparsed_commands() {
    let (browser, state) = MockBrowser::new();
    let commands = pagescript::parse_str("goPage -p /a\nrefresh\n").unwrap();

    let mut engine = Engine::new(Box::new(browser));
    engine.execute(commands).await.unwrap();
    assert_eq!(log_of(&state), vec!["goto /a", "refresh"]);
}
