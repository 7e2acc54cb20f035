// Chunk: docs/chunks/key_dispatcher - Popup session and input state machine
//!
//! tabfzf-switcher: the engine of a keyboard-driven tab switcher popup.
//!
//! The popup lists the open tabs except the active one, filters them as the
//! user types, tracks a highlighted row and activates the chosen tab. The
//! query field understands readline chords (Ctrl+A/E/K/D, Alt+F/B/D).
//!
//! Everything the engine needs from its host sits behind traits:
//! [`TabPlatform`] for tabs and windows, [`FocusHost`] for keyboard focus and
//! timers, [`KeyValueStore`] for settings and [`CommandRegistry`] for the
//! shortcut. [`testing`] has in-memory implementations of each.
//!
//! # Example
//!
//! ```
//! use tabfzf_switcher::testing::{MockPlatform, RecordingFocusHost};
//! use tabfzf_switcher::{KeyEvent, Key, Popup, PopupEvent, PopupOutcome, SwitcherConfig, Tab, TabId};
//!
//! let mut platform = MockPlatform::new(vec![
//!     Tab::new(1, 1).with_title("Inbox"),
//!     Tab::new(2, 1).with_title("GitHub"),
//! ])
//! .with_active(TabId(1));
//! let mut host = RecordingFocusHost::new();
//!
//! let mut popup = Popup::open(&mut platform, &SwitcherConfig::default(), &mut host);
//! popup.handle_event(PopupEvent::Key(KeyEvent::char('g')), &mut host);
//! popup.handle_event(PopupEvent::Key(KeyEvent::plain(Key::Return)), &mut host);
//!
//! assert_eq!(popup.activate_pending(&mut platform), Some(Ok(())));
//! assert_eq!(popup.take_outcome(), Some(PopupOutcome::Close));
//! ```

pub mod config;
pub mod error;
pub mod filter;
pub mod focus;
pub mod focus_retry;
pub mod gateway;
pub mod input;
pub mod line_editor;
pub mod normalize;
pub mod popup;
pub mod selector;
pub mod settings;
pub mod status;
pub mod tab;
pub mod testing;
pub mod view;

pub use config::SwitcherConfig;
pub use error::{ActivationError, ConfigError, InitializationError, PlatformError, SettingsError};
pub use filter::{filter_tabs, MatchFields};
pub use focus::{FocusDeferral, FocusHost, Handled, TimerId};
pub use focus_retry::FocusRetry;
pub use gateway::{TabPlatform, TabQuery};
pub use input::{Key, KeyEvent, Modifiers, MouseEvent, MouseEventKind};
pub use normalize::normalize;
pub use popup::{resolve_action, Popup, PopupAction, PopupEvent, PopupOutcome};
pub use selector::{TabRow, TabSelector};
pub use settings::shortcut::CommandRegistry;
pub use settings::store::{FileStore, KeyValueStore, MemoryStore};
pub use settings::theme::{Theme, ThemeBook, ThemeColors};
pub use settings::SettingsPanel;
pub use status::{Status, StatusKind};
pub use tab::{Tab, TabId, WindowId};
pub use view::View;
