/// Kind of legal deadline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DeadlineType {
    /// Court hearing. Also the fallback for records written before types existed.
    #[default]
    Hearing,
    /// Filing of a brief or document
    Filing,
    /// Limitation period expiry
    Limitation,
    /// Client meeting
    Meeting,
}

impl DeadlineType {
    /// Parse the stored tag. Unknown tags return None; callers decide the fallback.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_lowercase().as_str() {
            "hearing" => Some(Self::Hearing),
            "filing" => Some(Self::Filing),
            "limitation" => Some(Self::Limitation),
            "meeting" => Some(Self::Meeting),
            _ => None,
        }
    }

    /// Tag written to the snapshot
    pub fn to_tag(&self) -> &'static str {
        match self {
            Self::Hearing => "hearing",
            Self::Filing => "filing",
            Self::Limitation => "limitation",
            Self::Meeting => "meeting",
        }
    }

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Hearing => "Hearing",
            Self::Filing => "Filing",
            Self::Limitation => "Limitation",
            Self::Meeting => "Client meeting",
        }
    }

    /// Bucket this type is classified into
    pub fn bucket(&self) -> Bucket {
        match self {
            Self::Hearing | Self::Meeting => Bucket::Appointment,
            Self::Filing | Self::Limitation => Bucket::Filing,
        }
    }

    /// Next type in selector order (wraps)
    pub fn next(&self) -> Self {
        let all = Self::all();
        let pos = all.iter().position(|t| t == self).unwrap_or(0);
        all[(pos + 1) % all.len()]
    }

    /// Previous type in selector order (wraps)
    pub fn prev(&self) -> Self {
        let all = Self::all();
        let pos = all.iter().position(|t| t == self).unwrap_or(0);
        all[(pos + all.len() - 1) % all.len()]
    }

    /// All types, in selector order
    pub fn all() -> &'static [DeadlineType] {
        &[
            DeadlineType::Hearing,
            DeadlineType::Filing,
            DeadlineType::Limitation,
            DeadlineType::Meeting,
        ]
    }
}

/// Classification group derived from the deadline type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bucket {
    /// Hearings and meetings: something to attend
    Appointment,
    /// Filings and limitation periods: something to submit
    Filing,
}

impl Bucket {
    pub fn title(&self) -> &'static str {
        match self {
            Bucket::Appointment => "Hearings & Appointments",
            Bucket::Filing => "Filings & Limitation Periods",
        }
    }
}

/// Urgency tier of an upcoming deadline
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Urgency {
    Normal,
    /// Less than two days left
    Urgent,
    /// Less than twelve hours left
    VeryUrgent,
}

impl Urgency {
    pub fn is_urgent(&self) -> bool {
        matches!(self, Urgency::Urgent | Urgency::VeryUrgent)
    }

    pub fn is_very_urgent(&self) -> bool {
        matches!(self, Urgency::VeryUrgent)
    }
}

/// UI mode for the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Normal,
    /// Add/edit form is open
    Form,
    /// Waiting for y/n on a delete
    ConfirmDelete,
    /// An error or notice is shown and must be dismissed
    Message,
}
