//! Presentational projection of a single catalog entity.

use std::fmt;

/// Badge colour role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Primary,
    Secondary,
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Badge {
    pub label: String,
    pub tone: Tone,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardLine {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub id: Option<i64>,
    pub title: String,
    pub lines: Vec<CardLine>,
    pub badges: Vec<Badge>,
}

impl Card {
    pub fn new(id: Option<i64>, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            lines: Vec::new(),
            badges: Vec::new(),
        }
    }

    pub fn line(mut self, label: &'static str, value: impl Into<String>) -> Self {
        self.lines.push(CardLine {
            label,
            value: value.into(),
        });
        self
    }

    /// Adds the line only when a value is present.
    pub fn line_opt(self, label: &'static str, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(value) => self.line(label, value),
            None => self,
        }
    }

    pub fn badge(mut self, label: impl Into<String>, tone: Tone) -> Self {
        self.badges.push(Badge {
            label: label.into(),
            tone,
        });
        self
    }

    pub fn badge_opt(self, label: Option<impl Into<String>>, tone: Tone) -> Self {
        match label {
            Some(label) => self.badge(label, tone),
            None => self,
        }
    }

    pub fn availability(self, available: bool) -> Self {
        if available {
            self.badge("Available", Tone::Success)
        } else {
            self.badge("Not available", Tone::Error)
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.id {
            Some(id) => writeln!(f, "#{} {}", id, self.title)?,
            None => writeln!(f, "{}", self.title)?,
        }
        for line in &self.lines {
            writeln!(f, "  {}: {}", line.label, line.value)?;
        }
        if !self.badges.is_empty() {
            let badges: Vec<String> = self
                .badges
                .iter()
                .map(|badge| format!("[{}]", badge.label))
                .collect();
            writeln!(f, "  {}", badges.join(" "))?;
        }
        Ok(())
    }
}
