#![forbid(unsafe_code)]

//! HTML adapter for the view models.
//!
//! All record text passes through [`escape_html`] (`v_htmlescape`) before it
//! reaches markup. Highlighted text is escaped one segment at a time and only
//! then wrapped in `<mark>`, so a match can never split an entity.
//!
//! The markup keeps the class names the page stylesheet expects
//! (`card`, `card-header`, `modal-term-name`, ...). Cards carry a
//! `data-term-id` attribute so the host can route clicks back as
//! `toggleEntry(id)` and apply [`EntryPatch`](crate::view::EntryPatch)es.

use glosario_core::{HighlightedText, Labels};

use crate::view::{DetailView, EntryView, GlossaryView, SectionView, TabView};

/// Inline style for match marks.
pub const MARK_STYLE: &str = "background:#fef08a;padding:0 2px;border-radius:2px";

/// Escape text for use in element content and double-quoted attributes.
#[must_use]
pub fn escape_html(s: &str) -> String {
    v_htmlescape::escape(s).to_string()
}

/// Escaped text with marked segments wrapped.
#[must_use]
pub fn render_highlighted(text: &HighlightedText) -> String {
    let mut out = String::new();
    for segment in text.segments() {
        let escaped = escape_html(&segment.text);
        if segment.marked {
            out.push_str("<mark style=\"");
            out.push_str(MARK_STYLE);
            out.push_str("\">");
            out.push_str(&escaped);
            out.push_str("</mark>");
        } else {
            out.push_str(&escaped);
        }
    }
    out
}

/// Markup for the main list area.
#[must_use]
pub fn list_html(view: &GlossaryView, labels: &Labels) -> String {
    match view {
        GlossaryView::Loading { message } => {
            format!("<div class=\"loading\">{}</div>", escape_html(message))
        }
        GlossaryView::Failed { message } => {
            format!("<div class=\"load-error\">{}</div>", escape_html(message))
        }
        GlossaryView::Empty { message } => {
            format!("<div class=\"no-results\">{}</div>", escape_html(message))
        }
        GlossaryView::Sections(sections) => {
            let mut html = String::new();
            for section in sections {
                html.push_str(&section_html(section, labels));
            }
            html
        }
    }
}

fn section_html(section: &SectionView, labels: &Labels) -> String {
    let mut html = format!(
        "<div class=\"section-title\">{} <span class=\"count-badge\">{}</span></div>",
        section.label(),
        section.count
    );
    for entry in &section.entries {
        html.push_str(&entry_html(entry, labels));
    }
    html
}

/// Markup for one card. Also used by hosts that re-render a single entry.
#[must_use]
pub fn entry_html(entry: &EntryView, labels: &Labels) -> String {
    let label = entry.category.label();
    let open = if entry.expanded { " open" } else { "" };
    let mut examples = String::new();
    for example in &entry.examples {
        examples.push_str("<div class=\"example\">");
        examples.push_str(&render_highlighted(example));
        examples.push_str("</div>");
    }
    format!(
        "<div class=\"card cat-{label}{open}\" data-term-id=\"{id}\">\
         <div class=\"card-header\">\
         <span class=\"arrow\">▶</span>\
         <span class=\"cat-dot\"></span>\
         <h3>{name}</h3>\
         <span class=\"cat-label\">{label}</span>\
         </div>\
         <div class=\"card-body\">\
         <p class=\"desc\">{desc}</p>\
         <div class=\"examples\"><h4>{heading}</h4>{examples}</div>\
         </div>\
         </div>",
        id = entry.id,
        name = render_highlighted(&entry.name),
        desc = render_highlighted(&entry.description),
        heading = escape_html(&labels.examples_heading),
    )
}

/// Markup for the category selector.
#[must_use]
pub fn tabs_html(tabs: &[TabView]) -> String {
    let mut html = String::new();
    for tab in tabs {
        let active = if tab.active { " active" } else { "" };
        html.push_str(&format!(
            "<button class=\"tab{active}\" data-cat=\"{label}\">{label}</button>",
            label = tab.label()
        ));
    }
    html
}

/// Markup for the modal body.
#[must_use]
pub fn modal_html(detail: &DetailView, labels: &Labels) -> String {
    let mut html = format!(
        "<div class=\"modal-term-name\">{}</div>\
         <span class=\"modal-cat-badge\" style=\"background:{}\">{}</span>\
         <p class=\"modal-desc\">{}</p>",
        escape_html(&detail.name),
        escape_html(&detail.color),
        escape_html(&detail.category_label),
        escape_html(&detail.description),
    );
    if !detail.examples.is_empty() {
        html.push_str("<div class=\"modal-examples\"><h4>");
        html.push_str(&escape_html(&labels.examples_heading));
        html.push_str("</h4>");
        for example in &detail.examples {
            html.push_str("<div class=\"modal-example\">");
            html.push_str(&escape_html(example));
            html.push_str("</div>");
        }
        html.push_str("</div>");
    }
    if detail.has_diagram {
        html.push_str("<button class=\"modal-diagram-btn\" data-action=\"show-diagrams\">");
        html.push_str(&escape_html(&labels.diagram_button));
        html.push_str("</button>");
    }
    html
}
