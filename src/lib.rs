//! # pagescript
//!
//! A line-based scripting DSL for driving browser automation.
//!
//! pagescript turns scripts like the one below into structured command
//! invocations — a resolved command keyword plus a map of single-letter
//! option keys to decoded string values — and executes them against any
//! browser backend implementing the [`Browser`] trait.
//!
//! ```text
//! -- log in and land on the dashboard
//! goPage -p https://example.com/login
//! set field -b id -s username -v alice
//! set field -b id -s password -v "correct horse"
//! click -b id -s "submit-btn"
//! wait page -p https://example.com/home -r
//! ```
//!
//! ## Script syntax
//!
//! One command per line; blank lines and lines starting with `--` are
//! comments. Keyword resolution is longest-prefix, so multi-word keywords
//! such as `wait page` are matched before shorter ones.
//!
//! | Command | Description |
//! |---------|-------------|
//! | `goPage -p url` | Navigate to a URL |
//! | `refresh` | Reload the current page |
//! | `click -b strategy -s query` | JS-click every matched element |
//! | `wait page -p url [-r\|-l]` | Wait to reach (`-r`: and fully load) or leave a page |
//! | `wait element -b strategy -s query -c condition` | Wait until an element is `clickable`, `visible`, or `exist` |
//! | `set field -b strategy -s query [-v value]` | Populate a form field |
//! | `sleep [-t millis]` | Pause (default 1000 ms) |
//!
//! Options are `-K [V]` units: one dash, one or more single-character keys
//! sharing the following value. Values may be bare (`-p /home`), quoted with
//! `"` or `'` to carry spaces and dashes (`-s "submit-btn"`), and may contain
//! backslash escapes (`\t`, `\n`, `\"`, `\\`, ...) decoded when the value
//! closes. Unrecognized escapes pass through literally. An unterminated
//! quoted value is recovered, not rejected: its text up to the start of the
//! next `-` unit becomes the value and the rest parses as further options.
//!
//! ## Parsing scripts
//!
//! Use [`parse_str`] to parse a script from an in-memory string, or
//! [`parse_file`] to read one from a file path. Both return a
//! `Vec<Box<dyn `[`Command`]`>>`, which validates every line without touching
//! a browser. The option tokenizer is also usable on its own through
//! [`options::parse_options`].
//!
//! ## Executing scripts
//!
//! [`Engine::run_str`] resolves, parses, and executes a script line by line
//! against a [`Browser`] implementation you provide:
//!
//! ```ignore
//! use pagescript::Engine;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let browser = MyWebDriverSession::connect("http://localhost:4444").await?;
//!     let mut engine = Engine::new(Box::new(browser));
//!     engine.run_file("login.pagescript").await?;
//!     Ok(())
//! }
//! ```
//!
//! The crate ships no browser client of its own; the shipped binary
//! validates scripts without executing them. Engines are independent: run
//! one per script, each with its own session, and a failure in one never
//! affects the others.
//!
//! ## Implementing a custom command
//!
//! Implement [`Command`] to add new commands to the engine:
//!
//! ```no_run
//! use pagescript::command::{Command, Context};
//! use pagescript::options::parse_options;
//! use async_trait::async_trait;
//! use anyhow::Result;
//!
//! pub struct Back;
//!
//! impl Back {
//!     pub const NAME: &'static str = "back";
//! }
//!
//! #[async_trait(?Send)]
//! impl Command for Back {
//!     fn name(&self) -> &'static str { Self::NAME }
//!
//!     fn parse(remainder: &str) -> Result<Self> {
//!         parse_options(remainder)?;
//!         Ok(Self)
//!     }
//!
//!     async fn execute(&self, ctx: &mut Context) -> Result<()> {
//!         // drive ctx.browser() here
//!         Ok(())
//!     }
//! }
//! ```

pub mod browser;
pub mod command;
pub mod commands;
pub mod engine;
pub mod error;
pub mod options;
pub mod parser;

pub use browser::{Browser, BrowserError, Condition, ElementHandle, Locator};
pub use command::{Command, Context};
pub use commands::{Click, GoPage, Refresh, SetField, Sleep, WaitElement, WaitPage};
pub use engine::Engine;
pub use error::{ParseError, ResolveError};
pub use options::{OptionMap, parse_options};
pub use parser::{parse_file, parse_str, resolve};
