#![forbid(unsafe_code)]

//! Fixed category enumeration and the category selector filter.
//!
//! The enumeration order is significant: grouped results, the category
//! selector, and the color palette all iterate [`Category::ALL`] in this order.

use std::fmt;
use std::str::FromStr;

/// One of the six glossary categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Legal,
    Contable,
    Fiscal,
    Registral,
    Laboral,
    Institucional,
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Category; 6] = [
        Category::Legal,
        Category::Contable,
        Category::Fiscal,
        Category::Registral,
        Category::Laboral,
        Category::Institucional,
    ];

    /// Display label, identical to the label used in the source data.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Legal => "Legal",
            Self::Contable => "Contable",
            Self::Fiscal => "Fiscal",
            Self::Registral => "Registral",
            Self::Laboral => "Laboral",
            Self::Institucional => "Institucional",
        }
    }

    /// Position in [`Category::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Exact, case-sensitive label lookup.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.label() == label)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when a label names no category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown category: {:?}", self.0)
    }
}

impl std::error::Error for UnknownCategory {}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s).ok_or_else(|| UnknownCategory(s.to_owned()))
    }
}

/// Category selector state: the "all" sentinel or a single category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    /// Label shown on the "all" selector button.
    pub const ALL_LABEL: &'static str = "Todos";

    /// Selector options in button order: the sentinel first, then each category.
    #[must_use]
    pub fn options() -> [CategoryFilter; 7] {
        let mut out = [CategoryFilter::All; 7];
        for (slot, cat) in out[1..].iter_mut().zip(Category::ALL) {
            *slot = CategoryFilter::Only(cat);
        }
        out
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => Self::ALL_LABEL,
            Self::Only(cat) => cat.label(),
        }
    }

    /// Parse a selector label (`"Todos"` or a category label).
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        if label == Self::ALL_LABEL {
            return Some(Self::All);
        }
        Category::from_label(label).map(Self::Only)
    }

    /// Whether a record in `category` passes this selector.
    ///
    /// `None` stands for a record whose category is not part of the
    /// enumeration; such records pass only the "all" sentinel.
    #[must_use]
    pub fn admits(self, category: Option<Category>) -> bool {
        match self {
            Self::All => true,
            Self::Only(selected) => category == Some(selected),
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
