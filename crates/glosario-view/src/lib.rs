#![forbid(unsafe_code)]

//! Presentation layer for Glosario.
//!
//! - [`view`]: owned view models ([`GlossaryView`], [`DetailView`], ...) built
//!   from filter results and lookups.
//! - [`html`]: the escaping HTML adapter for those models.
//! - [`app`]: [`GlossaryApp`], the page state machine driven by [`Msg`]s.
//!
//! Nothing here touches a DOM; `glosario-web` forwards the produced markup
//! and [`Effect`]s to the browser.

pub mod app;
pub mod html;
pub mod view;

pub use app::{CloseReason, Effect, GlossaryApp, LoadState, Msg, PageTab};
pub use html::{
    MARK_STYLE, entry_html, escape_html, list_html, modal_html, render_highlighted, tabs_html,
};
pub use view::{
    DetailView, EntryPatch, EntryView, ExpandState, GlossaryView, SectionView, StatsView,
    TabView, render, render_entry, render_tabs,
};
