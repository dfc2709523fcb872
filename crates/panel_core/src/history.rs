use crate::job::{non_empty, HistoryEntry};

pub const NOT_AVAILABLE: &str = "N/A";
const LINK_TEXT_LIMIT: usize = 50;
const LINK_TEXT_KEEP: usize = 47;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkCell {
    /// Clickable link; `href` always holds the full URL.
    Link { text: String, href: String },
    Text(String),
}

impl LinkCell {
    pub fn href(&self) -> Option<&str> {
        match self {
            LinkCell::Link { href, .. } => Some(href),
            LinkCell::Text(_) => None,
        }
    }
}

/// Which link column of a history row was targeted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkColumn {
    Source,
    Result,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRowView {
    pub timestamp: String,
    pub platform: &'static str,
    pub title: String,
    pub source: LinkCell,
    pub result: LinkCell,
}

impl HistoryRowView {
    pub fn from_entry(entry: &HistoryEntry) -> Self {
        Self {
            timestamp: entry.timestamp.clone().unwrap_or_default(),
            platform: platform_label(entry.platform.as_deref()),
            title: non_empty(entry.title.as_deref())
                .unwrap_or(NOT_AVAILABLE)
                .to_string(),
            source: link_cell(entry.source_url.as_deref()),
            result: link_cell(entry.result_url.as_deref()),
        }
    }

    pub fn cell(&self, column: LinkColumn) -> &LinkCell {
        match column {
            LinkColumn::Source => &self.source,
            LinkColumn::Result => &self.result,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum HistoryView {
    #[default]
    Disabled,
    Loading,
    Empty,
    Rows(Vec<HistoryRowView>),
    Failed(String),
    Cleared,
}

impl HistoryView {
    /// Text of the single placeholder row, when no entries are shown.
    pub fn placeholder(&self) -> Option<String> {
        match self {
            HistoryView::Disabled => Some("- Verlauf deaktiviert -".to_string()),
            HistoryView::Loading => Some("Lade Verlauf...".to_string()),
            HistoryView::Empty => Some("Keine Einträge im Verlauf.".to_string()),
            HistoryView::Failed(error) => Some(format!("Fehler Laden Verlauf: {error}")),
            HistoryView::Cleared => Some("Verlauf wurde gelöscht.".to_string()),
            HistoryView::Rows(_) => None,
        }
    }

    pub fn rows(&self) -> &[HistoryRowView] {
        match self {
            HistoryView::Rows(rows) => rows,
            _ => &[],
        }
    }
}

pub fn link_cell(url: Option<&str>) -> LinkCell {
    match non_empty(url) {
        Some(url) if url.starts_with("http://") || url.starts_with("https://") => LinkCell::Link {
            text: truncate_link_text(url),
            href: url.to_string(),
        },
        Some(other) => LinkCell::Text(other.to_string()),
        None => LinkCell::Text(NOT_AVAILABLE.to_string()),
    }
}

/// Shortens long URLs for display: 47 characters plus `...` beyond 50.
pub fn truncate_link_text(url: &str) -> String {
    if url.chars().count() > LINK_TEXT_LIMIT {
        let kept: String = url.chars().take(LINK_TEXT_KEEP).collect();
        format!("{kept}...")
    } else {
        url.to_string()
    }
}

pub fn platform_label(tag: Option<&str>) -> &'static str {
    match tag {
        Some("SoundCloud") => "SoundCloud",
        Some("YouTube") => "YouTube",
        Some("TikTok") => "TikTok",
        Some("Instagram") => "Instagram Reel",
        Some("Twitter") => "Twitter/X",
        _ => "Unbekannt",
    }
}
