#![forbid(unsafe_code)]

//! Core model for the Glosario glossary browser.
//!
//! # Role in Glosario
//! `glosario-core` owns everything that is not presentation: the immutable
//! [`TermStore`], the [`filter`](filter::filter) engine that turns a
//! [`FilterState`] into a category-grouped result, the literal
//! [`QueryMatcher`] shared by filtering and [`Highlighter`], the
//! [`DetailLookup`] used by the term modal, the persisted [`FontScale`]
//! preference, and the validated [`GlossaryConfig`].
//!
//! # How it fits in the system
//! `glosario-view` renders the structures produced here; `glosario-web`
//! wires them to a browser page. Nothing in this crate depends on either, so
//! every operation is a plain function over owned or borrowed data and can be
//! tested without a host.

pub mod category;
pub mod config;
pub mod filter;
pub mod highlight;
pub mod lookup;
pub mod matcher;
pub mod prefs;
pub mod source;
pub mod store;
pub mod term;

pub use category::{Category, CategoryFilter, UnknownCategory};
pub use config::{ConfigError, FontConfig, GlossaryConfig, Labels};
pub use filter::{FilterOutcome, FilterState, GroupedResult, TermGroup, filter, filter_terms};
pub use highlight::{HighlightedText, Highlighter, Segment, highlight};
pub use lookup::{DetailLookup, TermDetail};
pub use matcher::QueryMatcher;
pub use prefs::{
    FilePreferences, FontAdjust, FontScale, MemoryPreferences, PreferenceStore, PrefsError,
    load_font_scale, save_font_scale,
};
pub use source::{EmbeddedSource, JsonSource, ParsedTerms, TermSource, parse_terms_json};
pub use store::{LoadIssue, LoadOptions, LoadReport, StoreError, TermStore};
pub use term::{CategoryTag, RawTerm, TermId, TermRecord};
