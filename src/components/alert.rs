use std::fmt;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AlertKind {
    #[default]
    Default,
    Destructive,
}

/// Transient notification raised by a screen after a submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Alert {
    pub kind: AlertKind,
    pub title: String,
    pub description: Option<String>,
}

impl Alert {
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::Default,
            title: title.into(),
            description: Some(description.into()),
        }
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::Destructive,
            title: title.into(),
            description: Some(description.into()),
        }
    }

    #[must_use]
    pub fn is_destructive(&self) -> bool {
        self.kind == AlertKind::Destructive
    }
}

impl fmt::Display for Alert {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.description {
            Some(description) => write!(formatter, "{}: {}", self.title, description),
            None => write!(formatter, "{}", self.title),
        }
    }
}
