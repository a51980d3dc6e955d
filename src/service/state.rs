//! Input and output records of one browse interaction.

use serde::{Deserialize, Serialize};

use crate::routes::{SortOrder, TableView};

/// What the user currently has selected. Immutable per request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Selection {
    /// Starting letter; `None` falls back to the configured default.
    pub letter: Option<String>,
    /// Chosen route; `None` (or a name not in the index) picks the first.
    pub route: Option<String>,
    pub sort: SortOrder,
    /// Allowed ratings; `None` means every rating present in the result.
    pub ratings: Option<Vec<f64>>,
    /// Allowed bus types; `None` means every bus type present in the result.
    pub bus_types: Option<Vec<String>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Warning,
    Error,
}

/// A message for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

/// Everything the presentation surface needs to draw one screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderState {
    pub notices: Vec<Notice>,
    pub letter: Option<String>,
    pub routes: Vec<String>,
    pub selected_route: Option<String>,
    pub sort: SortOrder,
    pub sort_label: String,
    /// Every row of the selected route.
    pub table: Option<TableView>,
    pub rating_options: Vec<f64>,
    pub bus_type_options: Vec<String>,
    pub selected_ratings: Vec<f64>,
    pub selected_bus_types: Vec<String>,
    /// Rows passing both filters; absent when either selection is empty.
    pub filtered: Option<TableView>,
}

impl RenderState {
    pub fn new(sort: SortOrder) -> Self {
        Self {
            notices: Vec::new(),
            letter: None,
            routes: Vec::new(),
            selected_route: None,
            sort,
            sort_label: sort.label().to_string(),
            table: None,
            rating_options: Vec::new(),
            bus_type_options: Vec::new(),
            selected_ratings: Vec::new(),
            selected_bus_types: Vec::new(),
            filtered: None,
        }
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.notices.push(Notice {
            level: NoticeLevel::Warning,
            message: message.into(),
        });
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.notices.push(Notice {
            level: NoticeLevel::Error,
            message: message.into(),
        });
    }

    pub fn has_errors(&self) -> bool {
        self.notices.iter().any(|n| n.level == NoticeLevel::Error)
    }
}
