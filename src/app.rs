use crate::config::Settings;
use crate::domain::{
    critical, flatten_buckets, parse_local_datetime, Deadline, DeadlinePatch, DeadlineType, FlatRow, NewDeadline,
    Summary, Timeline, UiMode, ValidationError, ALERT_PRESETS,
};
use crate::persistence::{DeadlineStore, StoreError};
use crate::ticker::RefreshTicker;
use chrono::{DateTime, Local, Utc};
use log::{info, warn};
use std::collections::BTreeSet;
use std::time::Instant;

/// Fields of the add/edit form, in tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    CaseTitle,
    CaseNumber,
    Date,
    Time,
    Kind,
    AssignedTo,
    Alerts,
    Notes,
}

impl FormField {
    const ORDER: [FormField; 8] = [
        FormField::CaseTitle,
        FormField::CaseNumber,
        FormField::Date,
        FormField::Time,
        FormField::Kind,
        FormField::AssignedTo,
        FormField::Alerts,
        FormField::Notes,
    ];

    fn position(&self) -> usize {
        Self::ORDER.iter().position(|f| f == self).unwrap_or(0)
    }

    pub fn next(&self) -> Self {
        Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
    }

    pub fn prev(&self) -> Self {
        Self::ORDER[(self.position() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }

    pub fn label(&self) -> &'static str {
        match self {
            FormField::CaseTitle => "Case title",
            FormField::CaseNumber => "Case number",
            FormField::Date => "Date (YYYY-MM-DD)",
            FormField::Time => "Time (HH:MM)",
            FormField::Kind => "Type",
            FormField::AssignedTo => "Assigned to",
            FormField::Alerts => "Alerts",
            FormField::Notes => "Notes",
        }
    }

    /// Free-text fields accept typed characters
    pub fn is_text(&self) -> bool {
        !matches!(self, FormField::Kind | FormField::Alerts)
    }

    pub fn all() -> &'static [FormField] {
        &Self::ORDER
    }
}

/// State of the add/edit form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeadlineForm {
    /// The deadline being edited as it was loaded, None when adding
    pub original: Option<Deadline>,
    pub case_title: String,
    pub case_number: String,
    pub date: String,
    pub time: String,
    pub kind: DeadlineType,
    pub assigned_to: String,
    pub alert_offsets: BTreeSet<u32>,
    pub notes: String,
    pub field: FormField,
    /// Last validation error, shown under the form
    pub error: Option<String>,
}

impl DeadlineForm {
    /// Empty form for a new deadline on `date` at `time`
    pub fn blank(date: impl Into<String>, time: impl Into<String>) -> Self {
        Self {
            original: None,
            case_title: String::new(),
            case_number: String::new(),
            date: date.into(),
            time: time.into(),
            kind: DeadlineType::default(),
            assigned_to: String::new(),
            alert_offsets: BTreeSet::new(),
            notes: String::new(),
            field: FormField::CaseTitle,
            error: None,
        }
    }

    /// Form prefilled from an existing deadline, in local time
    pub fn from_deadline(deadline: &Deadline) -> Self {
        let local = deadline.target_date.with_timezone(&Local);
        Self {
            original: Some(deadline.clone()),
            case_title: deadline.case_title.clone(),
            case_number: deadline.case_number.clone(),
            date: local.format("%Y-%m-%d").to_string(),
            time: local.format("%H:%M").to_string(),
            kind: deadline.kind,
            assigned_to: deadline.assigned_to.clone().unwrap_or_default(),
            alert_offsets: deadline.alert_offsets.clone(),
            notes: deadline.notes.clone().unwrap_or_default(),
            field: FormField::CaseTitle,
            error: None,
        }
    }

    pub fn is_editing(&self) -> bool {
        self.original.is_some()
    }

    fn current_text_mut(&mut self) -> Option<&mut String> {
        match self.field {
            FormField::CaseTitle => Some(&mut self.case_title),
            FormField::CaseNumber => Some(&mut self.case_number),
            FormField::Date => Some(&mut self.date),
            FormField::Time => Some(&mut self.time),
            FormField::AssignedTo => Some(&mut self.assigned_to),
            FormField::Notes => Some(&mut self.notes),
            FormField::Kind | FormField::Alerts => None,
        }
    }

    pub fn push_char(&mut self, c: char) {
        if let Some(text) = self.current_text_mut() {
            text.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(text) = self.current_text_mut() {
            text.pop();
        }
    }

    /// Toggle the alert preset at `index` (0-based)
    pub fn toggle_alert(&mut self, index: usize) {
        let Some(preset) = ALERT_PRESETS.get(index) else {
            return;
        };
        if !self.alert_offsets.remove(&preset.minutes) {
            self.alert_offsets.insert(preset.minutes);
        }
    }

    /// Creation data from the form fields
    pub fn to_new_deadline(&self) -> Result<NewDeadline, ValidationError> {
        let target = parse_local_datetime(&self.date, &self.time)?;
        let mut data = NewDeadline::new(self.case_title.trim(), self.case_number.trim(), target)
            .with_kind(self.kind)
            .with_alerts(self.alert_offsets.iter().copied());
        data.assigned_to = non_blank(&self.assigned_to);
        data.notes = non_blank(&self.notes);
        data.validate()?;
        Ok(data)
    }

    /// Update carrying only the fields that differ from `original`.
    ///
    /// The target is re-parsed only when the date or time text changed, so
    /// seconds the form cannot display survive an edit of other fields.
    pub fn to_patch(&self, original: &Deadline) -> Result<DeadlinePatch, ValidationError> {
        let shown = Self::from_deadline(original);
        let target_date = if self.date.trim() != shown.date || self.time.trim() != shown.time {
            Some(parse_local_datetime(&self.date, &self.time)?).filter(|t| *t != original.target_date)
        } else {
            None
        };

        let case_title = self.case_title.trim();
        let case_number = self.case_number.trim();
        let assigned_to = non_blank(&self.assigned_to);
        let notes = non_blank(&self.notes);

        let patch = DeadlinePatch {
            case_title: (case_title != original.case_title).then(|| case_title.to_string()),
            case_number: (case_number != original.case_number).then(|| case_number.to_string()),
            target_date,
            kind: (self.kind != original.kind).then_some(self.kind),
            assigned_to: (assigned_to != original.assigned_to).then_some(assigned_to),
            alert_offsets: (self.alert_offsets != original.alert_offsets).then(|| self.alert_offsets.clone()),
            notes: (notes != original.notes).then_some(notes),
            created_at: None,
        };
        patch.validate()?;
        Ok(patch)
    }
}

fn non_blank(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Main application state
pub struct AppState {
    store: Box<dyn DeadlineStore>,
    /// Snapshot in canonical order, as last read from the store
    pub deadlines: Vec<Deadline>,
    /// Reference instant for every countdown on screen
    pub now: DateTime<Utc>,
    /// Index into the flattened appointment + filing rows
    pub selected_index: usize,
    pub ui_mode: UiMode,
    pub form: Option<DeadlineForm>,
    pub pending_delete: Option<String>,
    pub message: Option<String>,
    pub show_timeline: bool,
    pub settings: Settings,
    pub ticker: RefreshTicker,
}

impl AppState {
    pub fn new(store: Box<dyn DeadlineStore>, settings: Settings) -> Self {
        let ticker = RefreshTicker::new(settings.refresh_interval());
        let mut app = Self {
            store,
            deadlines: Vec::new(),
            now: Utc::now(),
            selected_index: 0,
            ui_mode: UiMode::Normal,
            form: None,
            pending_delete: None,
            message: None,
            show_timeline: false,
            settings,
            ticker,
        };
        app.reload();
        app
    }

    /// Re-read the collection from the store
    pub fn reload(&mut self) {
        match self.store.try_list() {
            Ok(deadlines) => self.deadlines = deadlines,
            Err(err) => {
                warn!("event=app_reload module=app status=degraded error={}", err);
                self.deadlines.clear();
                self.show_message(format!("{err}. Showing an empty list."));
            }
        }
        self.clamp_selection();
    }

    /// Refresh countdowns when the ticker says so. Returns true if it fired.
    pub fn tick(&mut self, instant: Instant) -> bool {
        if self.ticker.poll(instant) {
            self.now = Utc::now();
            true
        } else {
            false
        }
    }

    pub fn set_now(&mut self, now: DateTime<Utc>) {
        self.now = now;
    }

    /// Stop the refresh cadence when the dashboard goes away
    pub fn shutdown(&mut self) {
        self.ticker.cancel();
        info!("event=app_shutdown module=app status=ok deadlines={}", self.deadlines.len());
    }

    pub fn rows(&self) -> Vec<FlatRow<'_>> {
        flatten_buckets(&self.deadlines)
    }

    pub fn selected_deadline(&self) -> Option<&Deadline> {
        self.rows().get(self.selected_index).map(|row| row.deadline)
    }

    pub fn critical(&self) -> Vec<&Deadline> {
        critical(&self.deadlines, self.now, self.settings.critical_count)
    }

    pub fn summary(&self) -> Summary {
        Summary::compute(&self.deadlines, self.now)
    }

    pub fn timeline(&self) -> Timeline {
        Timeline::layout(&self.deadlines, self.now)
    }

    pub fn move_selection_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    pub fn move_selection_down(&mut self) {
        if self.selected_index + 1 < self.rows().len() {
            self.selected_index += 1;
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.rows().len();
        if self.selected_index >= len {
            self.selected_index = len.saturating_sub(1);
        }
    }

    fn select_id(&mut self, id: &str) {
        if let Some(index) = self.rows().iter().position(|row| row.deadline.id == id) {
            self.selected_index = index;
        }
    }

    pub fn toggle_timeline(&mut self) {
        self.show_timeline = !self.show_timeline;
    }

    /// Open the form for a new deadline, dated today
    pub fn start_add(&mut self) {
        let today = Local::now().format("%Y-%m-%d").to_string();
        self.form = Some(DeadlineForm::blank(today, self.settings.default_time.clone()));
        self.ui_mode = UiMode::Form;
    }

    /// Open the form on the selected deadline
    pub fn start_edit(&mut self) {
        if let Some(deadline) = self.selected_deadline() {
            self.form = Some(DeadlineForm::from_deadline(deadline));
            self.ui_mode = UiMode::Form;
        }
    }

    pub fn form_next_field(&mut self) {
        if let Some(form) = &mut self.form {
            form.field = form.field.next();
        }
    }

    pub fn form_prev_field(&mut self) {
        if let Some(form) = &mut self.form {
            form.field = form.field.prev();
        }
    }

    pub fn form_add_char(&mut self, c: char) {
        if let Some(form) = &mut self.form {
            if form.field == FormField::Alerts {
                if let Some(digit) = c.to_digit(10) {
                    if digit >= 1 {
                        form.toggle_alert(digit as usize - 1);
                    }
                }
            } else {
                form.push_char(c);
            }
        }
    }

    pub fn form_backspace(&mut self) {
        if let Some(form) = &mut self.form {
            form.backspace();
        }
    }

    /// Cycle the deadline type while the type field is focused
    pub fn form_cycle_kind(&mut self, forward: bool) {
        if let Some(form) = &mut self.form {
            if form.field == FormField::Kind {
                form.kind = if forward { form.kind.next() } else { form.kind.prev() };
            }
        }
    }

    /// Validate the form and send it to the store
    pub fn submit_form(&mut self) {
        let Some(form) = self.form.as_mut() else {
            return;
        };

        let result = match form.original.clone() {
            None => match form.to_new_deadline() {
                Ok(data) => self.store.create(data).map(|created| created.id),
                Err(err) => {
                    form.error = Some(err.to_string());
                    return;
                }
            },
            Some(original) => match form.to_patch(&original) {
                // Nothing changed, nothing to write
                Ok(patch) if patch.is_empty() => Ok(original.id),
                Ok(patch) => self.store.update(&original.id, patch).map(|()| original.id),
                Err(err) => {
                    form.error = Some(err.to_string());
                    return;
                }
            },
        };

        match result {
            Ok(id) => {
                self.form = None;
                self.ui_mode = UiMode::Normal;
                self.reload();
                self.select_id(&id);
            }
            Err(StoreError::Validation(err)) => {
                if let Some(form) = self.form.as_mut() {
                    form.error = Some(err.to_string());
                }
            }
            // Keep the form open so the input isn't lost
            Err(err) => self.show_message(err.to_string()),
        }
    }

    pub fn cancel_form(&mut self) {
        self.form = None;
        self.ui_mode = UiMode::Normal;
    }

    /// Ask for confirmation before deleting the selected deadline
    pub fn request_delete(&mut self) {
        if let Some(id) = self.selected_deadline().map(|d| d.id.clone()) {
            self.pending_delete = Some(id);
            self.ui_mode = UiMode::ConfirmDelete;
        }
    }

    pub fn confirm_delete(&mut self) {
        let Some(id) = self.pending_delete.take() else {
            self.ui_mode = UiMode::Normal;
            return;
        };
        self.ui_mode = UiMode::Normal;

        match self.store.delete(&id) {
            Ok(()) => self.reload(),
            Err(err) => self.show_message(err.to_string()),
        }
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
        self.ui_mode = UiMode::Normal;
    }

    /// Case title of the deadline awaiting delete confirmation
    pub fn pending_delete_title(&self) -> Option<&str> {
        let id = self.pending_delete.as_deref()?;
        self.deadlines
            .iter()
            .find(|d| d.id == id)
            .map(|d| d.case_title.as_str())
    }

    pub fn show_message(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
        self.ui_mode = UiMode::Message;
    }

    /// Close the message and go back to whatever was open underneath
    pub fn dismiss_message(&mut self) {
        self.message = None;
        self.ui_mode = if self.form.is_some() { UiMode::Form } else { UiMode::Normal };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Bucket;
    use crate::persistence::{MemoryBackend, SnapshotStore};
    use chrono::{Duration, TimeZone};
    use pretty_assertions::assert_eq;

    fn base() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 8, 0, 0).unwrap()
    }

    fn seeded_store() -> SnapshotStore<MemoryBackend> {
        let mut store = SnapshotStore::new(MemoryBackend::new());
        store
            .create(NewDeadline::new("Hearing A", "H-1", base() + Duration::days(2)).with_created_at(base()))
            .unwrap();
        store
            .create(
                NewDeadline::new("Filing B", "F-1", base() + Duration::days(1))
                    .with_kind(DeadlineType::Filing)
                    .with_created_at(base()),
            )
            .unwrap();
        store
            .create(
                NewDeadline::new("Meeting C", "M-1", base() + Duration::hours(3))
                    .with_kind(DeadlineType::Meeting)
                    .with_created_at(base()),
            )
            .unwrap();
        store
    }

    fn create_test_app() -> AppState {
        let mut app = AppState::new(Box::new(seeded_store()), Settings::default());
        app.set_now(base());
        app
    }

    fn fill_form(app: &mut AppState, title: &str, number: &str) {
        let form = app.form.as_mut().unwrap();
        form.case_title = title.to_string();
        form.case_number = number.to_string();
        form.date = "2030-01-15".to_string();
        form.time = "10:30".to_string();
    }

    #[test]
    fn test_app_state_new() {
        let app = create_test_app();
        assert_eq!(app.deadlines.len(), 3);
        assert_eq!(app.selected_index, 0);
        assert_eq!(app.ui_mode, UiMode::Normal);
        assert!(app.message.is_none());
    }

    #[test]
    fn test_rows_list_appointments_before_filings() {
        let app = create_test_app();
        let rows: Vec<(Bucket, &str)> = app
            .rows()
            .iter()
            .map(|row| (row.bucket, row.deadline.case_title.as_str()))
            .collect();
        assert_eq!(
            rows,
            vec![
                (Bucket::Appointment, "Meeting C"),
                (Bucket::Appointment, "Hearing A"),
                (Bucket::Filing, "Filing B"),
            ]
        );
    }

    #[test]
    fn test_move_selection() {
        let mut app = create_test_app();

        app.move_selection_down();
        assert_eq!(app.selected_index, 1);
        app.move_selection_down();
        app.move_selection_down();
        assert_eq!(app.selected_index, 2);

        app.move_selection_up();
        assert_eq!(app.selected_index, 1);
        app.move_selection_up();
        app.move_selection_up();
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn test_critical_and_summary_use_now() {
        let mut app = create_test_app();
        let titles: Vec<&str> = app.critical().iter().map(|d| d.case_title.as_str()).collect();
        assert_eq!(titles, vec!["Meeting C", "Filing B", "Hearing A"]);

        app.set_now(base() + Duration::days(1) + Duration::hours(1));
        let summary = app.summary();
        assert_eq!(summary.past, 2);
        assert_eq!(summary.upcoming, 1);
        assert_eq!(app.critical().len(), 1);
    }

    #[test]
    fn test_add_through_form() {
        let mut app = create_test_app();
        app.start_add();
        assert_eq!(app.ui_mode, UiMode::Form);
        assert_eq!(app.form.as_ref().unwrap().time, "09:00");

        fill_form(&mut app, "Estate of Haddad", "2030/7");
        app.form_next_field();
        app.form_next_field();
        app.form_next_field();
        app.form_next_field();
        assert_eq!(app.form.as_ref().unwrap().field, FormField::Kind);
        app.form_cycle_kind(true);
        app.form_next_field();
        app.form_next_field();
        app.form_add_char('3');
        app.form_add_char('4');
        app.form_add_char('4');
        app.form_next_field();
        for c in "bring deed".chars() {
            app.form_add_char(c);
        }
        app.submit_form();

        assert_eq!(app.ui_mode, UiMode::Normal);
        assert!(app.form.is_none());
        assert_eq!(app.deadlines.len(), 4);

        let added = app.selected_deadline().unwrap();
        assert_eq!(added.case_title, "Estate of Haddad");
        assert_eq!(added.kind, DeadlineType::Filing);
        assert_eq!(added.alert_offsets, BTreeSet::from([1_440]));
        assert_eq!(added.notes.as_deref(), Some("bring deed"));
        assert_eq!(added.assigned_to, None);
        assert_eq!(added.target_date, parse_local_datetime("2030-01-15", "10:30").unwrap());
    }

    #[test]
    fn test_invalid_form_stays_open_with_error() {
        let mut app = create_test_app();
        app.start_add();
        fill_form(&mut app, "  ", "1");
        app.submit_form();

        assert_eq!(app.ui_mode, UiMode::Form);
        let form = app.form.as_ref().unwrap();
        assert_eq!(form.error.as_deref(), Some("case title is required"));
        assert_eq!(app.deadlines.len(), 3);

        let form = app.form.as_mut().unwrap();
        form.case_title = "Fixed".to_string();
        form.date = "15/01/2030".to_string();
        app.submit_form();
        assert!(app.form.as_ref().unwrap().error.as_deref().unwrap().contains("invalid date"));
    }

    #[test]
    fn test_edit_preserves_created_at() {
        let mut app = create_test_app();
        let original = app.selected_deadline().unwrap().clone();

        app.start_edit();
        let form = app.form.as_mut().unwrap();
        assert!(form.is_editing());
        assert_eq!(form.case_title, original.case_title);
        form.case_title = "Meeting C (moved)".to_string();
        app.submit_form();

        assert_eq!(app.ui_mode, UiMode::Normal);
        let edited = app.deadlines.iter().find(|d| d.id == original.id).unwrap();
        assert_eq!(edited.case_title, "Meeting C (moved)");
        assert_eq!(edited.created_at, original.created_at);
        assert_eq!(edited.target_date, original.target_date);
        assert_eq!(edited.kind, DeadlineType::Meeting);
    }

    fn app_with_one(target: DateTime<Utc>) -> AppState {
        let mut store = SnapshotStore::new(MemoryBackend::new());
        store
            .create(
                NewDeadline::new("Precise", "P-1", target)
                    .with_alerts([60])
                    .with_created_at(base()),
            )
            .unwrap();
        let mut app = AppState::new(Box::new(store), Settings::default());
        app.set_now(base());
        app
    }

    fn sub_minute_target() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2030, 6, 1, 8, 0, 42).unwrap() + Duration::milliseconds(500)
    }

    #[test]
    fn test_title_edit_keeps_sub_minute_target() {
        let mut app = app_with_one(sub_minute_target());

        app.start_edit();
        app.form.as_mut().unwrap().case_title = "Precise (renamed)".to_string();
        app.submit_form();

        assert_eq!(app.ui_mode, UiMode::Normal);
        let edited = &app.deadlines[0];
        assert_eq!(edited.case_title, "Precise (renamed)");
        assert_eq!(edited.target_date, sub_minute_target());
        assert_eq!(edited.alert_offsets, BTreeSet::from([60]));
    }

    #[test]
    fn test_time_edit_replaces_target() {
        let mut app = app_with_one(sub_minute_target());

        app.start_edit();
        let form = app.form.as_mut().unwrap();
        form.time = "17:45".to_string();
        let expected = parse_local_datetime(&form.date, "17:45").unwrap();
        app.submit_form();

        assert_eq!(app.ui_mode, UiMode::Normal);
        assert_eq!(app.deadlines[0].target_date, expected);
        assert_eq!(app.deadlines[0].case_title, "Precise");
    }

    #[test]
    fn test_edit_patch_lists_only_changed_fields() {
        let app = app_with_one(sub_minute_target());
        let original = app.deadlines[0].clone();

        let mut form = DeadlineForm::from_deadline(&original);
        assert!(form.to_patch(&original).unwrap().is_empty());

        form.notes = "  bring exhibits ".to_string();
        form.toggle_alert(0);
        assert_eq!(
            form.to_patch(&original).unwrap(),
            DeadlinePatch {
                alert_offsets: Some(BTreeSet::from([60, 43_200])),
                notes: Some(Some("bring exhibits".to_string())),
                ..Default::default()
            }
        );

        form.case_number = " ".to_string();
        assert_eq!(form.to_patch(&original), Err(ValidationError::MissingCaseNumber));
    }

    #[test]
    fn test_unchanged_edit_closes_without_writing() {
        let seeded = seeded_store();
        let mut backend = seeded.backend().clone();
        backend.fail_writes = true;
        let mut app = AppState::new(Box::new(SnapshotStore::new(backend)), Settings::default());

        app.start_edit();
        app.submit_form();

        assert_eq!(app.ui_mode, UiMode::Normal);
        assert!(app.form.is_none());
        assert!(app.message.is_none());
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let mut app = create_test_app();
        let doomed = app.selected_deadline().unwrap().id.clone();

        app.request_delete();
        assert_eq!(app.ui_mode, UiMode::ConfirmDelete);
        assert_eq!(app.pending_delete_title(), Some("Meeting C"));

        app.cancel_delete();
        assert_eq!(app.deadlines.len(), 3);

        app.request_delete();
        app.confirm_delete();
        assert_eq!(app.ui_mode, UiMode::Normal);
        assert_eq!(app.deadlines.len(), 2);
        assert!(app.deadlines.iter().all(|d| d.id != doomed));
    }

    #[test]
    fn test_selection_clamped_after_delete() {
        let mut app = create_test_app();
        app.move_selection_down();
        app.move_selection_down();
        app.request_delete();
        app.confirm_delete();
        assert_eq!(app.selected_index, 1);
    }

    #[test]
    fn test_write_failure_keeps_snapshot_and_form() {
        let seeded = seeded_store();
        let mut backend = seeded.backend().clone();
        backend.fail_writes = true;
        let mut app = AppState::new(Box::new(SnapshotStore::new(backend)), Settings::default());

        app.start_add();
        fill_form(&mut app, "Never saved", "X-1");
        app.submit_form();

        assert_eq!(app.ui_mode, UiMode::Message);
        assert!(app.message.as_deref().unwrap().contains("could not save deadlines"));
        assert_eq!(app.deadlines.len(), 3);

        app.dismiss_message();
        assert_eq!(app.ui_mode, UiMode::Form);
        assert_eq!(app.form.as_ref().unwrap().case_title, "Never saved");
    }

    #[test]
    fn test_corrupt_store_shows_notice_and_empty_list() {
        let store = SnapshotStore::new(MemoryBackend::with_payload("{broken"));
        let mut app = AppState::new(Box::new(store), Settings::default());

        assert!(app.deadlines.is_empty());
        assert_eq!(app.ui_mode, UiMode::Message);
        app.dismiss_message();
        assert_eq!(app.ui_mode, UiMode::Normal);
        assert!(app.selected_deadline().is_none());
    }

    #[test]
    fn test_alert_toggle_is_a_set() {
        let mut form = DeadlineForm::blank("2030-01-01", "09:00");
        form.toggle_alert(3);
        form.toggle_alert(0);
        assert_eq!(form.alert_offsets, BTreeSet::from([60, 43_200]));
        form.toggle_alert(3);
        assert_eq!(form.alert_offsets, BTreeSet::from([43_200]));
        form.toggle_alert(9);
        assert_eq!(form.alert_offsets, BTreeSet::from([43_200]));
    }

    #[test]
    fn test_form_field_cycle() {
        assert_eq!(FormField::CaseTitle.prev(), FormField::Notes);
        assert_eq!(FormField::Notes.next(), FormField::CaseTitle);
        assert!(!FormField::Kind.is_text());
        assert!(FormField::Date.is_text());
    }

    #[test]
    fn test_tick_refreshes_now_until_shutdown() {
        let mut app = create_test_app();
        let start = Instant::now();

        assert!(app.tick(start));
        assert!(app.now > base());

        app.set_now(base());
        assert!(!app.tick(start + std::time::Duration::from_secs(1)));
        assert_eq!(app.now, base());

        app.shutdown();
        assert!(!app.tick(start + std::time::Duration::from_secs(3600)));
        assert_eq!(app.now, base());
    }

    #[test]
    fn test_toggle_timeline() {
        let mut app = create_test_app();
        assert!(!app.show_timeline);
        app.toggle_timeline();
        assert!(app.show_timeline);
        assert_eq!(app.timeline().bars.len(), 3);
    }
}
