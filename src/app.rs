//! Application state management for the hospital management console
//!
//! This module contains the main application state, handling keyboard input,
//! data loading, and the transition between the login form and the per-role
//! dashboard.

use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent};
use tracing::warn;

use crate::api::ApiClient;
use crate::data::{admin, appointments, auth, doctors, lab_tests, patients, receptionists,
    schedules, Role};
use crate::session::StoredUser;

/// Application state enum representing the current view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppState {
    /// Login form
    Login,
    /// Per-role dashboard
    Dashboard,
}

/// A dashboard tab backed by one backend resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tab {
    Doctors,
    Patients,
    Receptionists,
    Appointments,
    Schedules,
    LabTests,
    Logs,
    Statistics,
}

impl Tab {
    /// The tab set shown for a role's dashboard
    pub fn for_role(role: Role) -> Vec<Tab> {
        match role {
            Role::Admin => vec![
                Tab::Doctors,
                Tab::Patients,
                Tab::Receptionists,
                Tab::Logs,
                Tab::Statistics,
            ],
            Role::Doctor => vec![
                Tab::Appointments,
                Tab::Schedules,
                Tab::LabTests,
                Tab::Patients,
            ],
            Role::Patient => vec![Tab::Appointments, Tab::LabTests, Tab::Doctors],
            Role::Receptionist => vec![Tab::Appointments, Tab::Patients, Tab::Doctors],
        }
    }

    /// Tab title for the dashboard header
    pub fn title(&self) -> &'static str {
        match self {
            Tab::Doctors => "Doctors",
            Tab::Patients => "Patients",
            Tab::Receptionists => "Receptionists",
            Tab::Appointments => "Appointments",
            Tab::Schedules => "Schedules",
            Tab::LabTests => "Lab Tests",
            Tab::Logs => "Logs",
            Tab::Statistics => "Statistics",
        }
    }

    /// Column headers matching the rows the tab's loader produces
    pub fn headers(&self) -> &'static [&'static str] {
        match self {
            Tab::Doctors => &["ID", "Name", "Specialization", "Department", "Email"],
            Tab::Patients => &["Reg #", "Name", "Gender", "Born", "Contact"],
            Tab::Receptionists => &["ID", "Username", "Name", "Email"],
            Tab::Appointments => &["ID", "Patient", "Doctor", "When", "Reason", "Status"],
            Tab::Schedules => &["ID", "Doctor", "Day", "Hours"],
            Tab::LabTests => &["ID", "Patient", "Test", "Status", "Requested"],
            Tab::Logs => &["Time", "Level", "User", "Message"],
            Tab::Statistics => &["Metric", "Value"],
        }
    }
}

/// Which login form field has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Username,
    Password,
}

/// State of the login form
#[derive(Debug, Clone)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    /// Index into Role::all()
    pub role_index: usize,
    pub focus: LoginField,
    /// Summarized error from the last failed attempt
    pub error: Option<String>,
}

impl LoginForm {
    fn new(initial_role: Option<Role>) -> Self {
        let role_index = initial_role
            .and_then(|role| Role::all().iter().position(|r| *r == role))
            .unwrap_or(0);
        Self {
            username: String::new(),
            password: String::new(),
            role_index,
            focus: LoginField::Username,
            error: None,
        }
    }

    /// The role currently selected on the form
    pub fn role(&self) -> Role {
        Role::all()[self.role_index]
    }

    fn cycle_role(&mut self, forward: bool) {
        let count = Role::all().len();
        self.role_index = if forward {
            (self.role_index + 1) % count
        } else {
            (self.role_index + count - 1) % count
        };
    }

    fn focused_field_mut(&mut self) -> &mut String {
        match self.focus {
            LoginField::Username => &mut self.username,
            LoginField::Password => &mut self.password,
        }
    }
}

/// Main application struct managing state and data
pub struct App {
    /// Current application state/view
    pub state: AppState,
    /// Login form state
    pub login: LoginForm,
    /// User from the active session, if any
    pub current_user: Option<StoredUser>,
    /// Tabs of the active dashboard
    pub tabs: Vec<Tab>,
    /// Index of the active tab
    pub active_tab: usize,
    /// Index of the selected row in the active tab
    pub selected_row: usize,
    /// Loaded table rows keyed by tab
    pub rows: HashMap<Tab, Vec<Vec<String>>>,
    /// Tabs whose last load failed; the dashboard shows a retry banner
    pub failed_tabs: HashMap<Tab, String>,
    /// Flag indicating a dashboard load is in flight
    pub loading: bool,
    /// Flag indicating the application should quit
    pub should_quit: bool,
    /// Flag indicating Enter was pressed on a filled login form
    pub login_requested: bool,
    /// Flag indicating Esc was pressed on the dashboard
    pub logout_requested: bool,
    /// Flag indicating a refresh has been requested
    pub refresh_requested: bool,
    /// Gateway client all dashboard loads go through
    client: ApiClient,
}

impl App {
    /// Creates a new App instance.
    ///
    /// When the session store already holds a user (persisted by a previous
    /// run), the app starts on that user's dashboard instead of the login
    /// form; the caller still triggers the initial load.
    pub fn new(client: ApiClient, initial_role: Option<Role>) -> Self {
        let current_user = client.session().current();
        let (state, tabs) = match &current_user {
            Some(user) => (AppState::Dashboard, Tab::for_role(user.role)),
            None => (AppState::Login, Vec::new()),
        };
        let resumed = current_user.is_some();
        Self {
            state,
            login: LoginForm::new(initial_role),
            current_user,
            tabs,
            active_tab: 0,
            selected_row: 0,
            rows: HashMap::new(),
            failed_tabs: HashMap::new(),
            loading: false,
            should_quit: false,
            login_requested: false,
            logout_requested: false,
            refresh_requested: resumed,
            client,
        }
    }

    /// The active tab, if the dashboard has any
    pub fn current_tab(&self) -> Option<Tab> {
        self.tabs.get(self.active_tab).copied()
    }

    /// Rows of the active tab
    pub fn current_rows(&self) -> &[Vec<String>] {
        self.current_tab()
            .and_then(|tab| self.rows.get(&tab))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Whether the active tab's last load failed
    pub fn current_tab_failed(&self) -> bool {
        self.current_tab()
            .map(|tab| self.failed_tabs.contains_key(&tab))
            .unwrap_or(false)
    }

    /// Attempts the login the form describes.
    ///
    /// On success the dashboard replaces the form and all of its tabs load.
    /// On failure the form stays up with a single summarized error.
    pub async fn perform_login(&mut self) {
        let role = self.login.role();
        let result = auth::login(
            &self.client,
            &self.login.username,
            &self.login.password,
            role,
        )
        .await;

        match result {
            Ok(user) => {
                self.login.error = None;
                self.login.password.clear();
                self.tabs = Tab::for_role(user.role);
                self.current_user = Some(user);
                self.active_tab = 0;
                self.selected_row = 0;
                self.state = AppState::Dashboard;
                self.load_all().await;
            }
            Err(err) => {
                self.login.error = Some(err.to_string());
            }
        }
    }

    /// Logs out and returns to the login form.
    ///
    /// The session is gone either way; a backend failure only affects the
    /// server-side token and is logged rather than shown.
    pub async fn perform_logout(&mut self) {
        if let Err(err) = auth::logout(&self.client).await {
            warn!(error = %err, "logout call failed; local session cleared anyway");
        }
        self.current_user = None;
        self.tabs.clear();
        self.rows.clear();
        self.failed_tabs.clear();
        self.active_tab = 0;
        self.selected_row = 0;
        self.login = LoginForm::new(Some(self.login.role()));
        self.state = AppState::Login;
    }

    /// Loads every tab of the active dashboard concurrently
    pub async fn load_all(&mut self) {
        self.loading = true;
        let client = &self.client;
        let loads = self.tabs.iter().map(|tab| {
            let tab = *tab;
            async move { (tab, load_tab(client, tab).await) }
        });
        let results = futures::future::join_all(loads).await;

        for (tab, result) in results {
            match result {
                Ok(rows) => {
                    self.failed_tabs.remove(&tab);
                    self.rows.insert(tab, rows);
                }
                Err(summary) => {
                    warn!(tab = tab.title(), error = %summary, "tab load failed");
                    self.failed_tabs.insert(tab, summary);
                }
            }
        }

        self.loading = false;
        self.clamp_selected_row();
    }

    /// Handles keyboard input and updates state accordingly
    ///
    /// # Key Bindings (login)
    /// - Printable characters / Backspace: edit the focused field
    /// - `Tab`/`Down` and `BackTab`/`Up`: move focus between fields
    /// - `Left`/`Right`: cycle the login role
    /// - `Enter`: submit the form
    /// - `Esc`: quit
    ///
    /// # Key Bindings (dashboard)
    /// - `q`: quit; `Esc`: log out
    /// - `Tab`/`Right` and `BackTab`/`Left`: cycle tabs
    /// - `Up`/`k` and `Down`/`j`: move the row selection
    /// - `r`: refresh all tabs
    pub fn handle_key(&mut self, key_event: KeyEvent) {
        match self.state {
            AppState::Login => self.handle_login_key(key_event),
            AppState::Dashboard => self.handle_dashboard_key(key_event),
        }
    }

    fn handle_login_key(&mut self, key_event: KeyEvent) {
        match key_event.code {
            KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Enter => {
                if self.login.username.is_empty() || self.login.password.is_empty() {
                    self.login.error = Some("username and password are required".to_string());
                } else {
                    self.login.error = None;
                    self.login_requested = true;
                }
            }
            KeyCode::Tab | KeyCode::Down => {
                self.login.focus = match self.login.focus {
                    LoginField::Username => LoginField::Password,
                    LoginField::Password => LoginField::Username,
                };
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.login.focus = match self.login.focus {
                    LoginField::Username => LoginField::Password,
                    LoginField::Password => LoginField::Username,
                };
            }
            KeyCode::Left => {
                self.login.cycle_role(false);
            }
            KeyCode::Right => {
                self.login.cycle_role(true);
            }
            KeyCode::Backspace => {
                self.login.focused_field_mut().pop();
            }
            KeyCode::Char(c) => {
                self.login.focused_field_mut().push(c);
            }
            _ => {}
        }
    }

    fn handle_dashboard_key(&mut self, key_event: KeyEvent) {
        match key_event.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
            }
            KeyCode::Esc => {
                self.logout_requested = true;
            }
            KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => {
                self.next_tab();
            }
            KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => {
                self.previous_tab();
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.move_selection_down();
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.move_selection_up();
            }
            KeyCode::Char('r') => {
                self.refresh_requested = true;
            }
            _ => {}
        }
    }

    /// Moves to the next tab, wrapping at the end
    fn next_tab(&mut self) {
        if self.tabs.is_empty() {
            return;
        }
        self.active_tab = (self.active_tab + 1) % self.tabs.len();
        self.selected_row = 0;
    }

    /// Moves to the previous tab, wrapping at the start
    fn previous_tab(&mut self) {
        if self.tabs.is_empty() {
            return;
        }
        if self.active_tab == 0 {
            self.active_tab = self.tabs.len() - 1;
        } else {
            self.active_tab -= 1;
        }
        self.selected_row = 0;
    }

    /// Moves the row selection up, wrapping to the bottom if at the top
    fn move_selection_up(&mut self) {
        let count = self.current_rows().len();
        if count == 0 {
            return;
        }
        if self.selected_row == 0 {
            self.selected_row = count - 1;
        } else {
            self.selected_row -= 1;
        }
    }

    /// Moves the row selection down, wrapping to the top if at the bottom
    fn move_selection_down(&mut self) {
        let count = self.current_rows().len();
        if count == 0 {
            return;
        }
        self.selected_row = (self.selected_row + 1) % count;
    }

    fn clamp_selected_row(&mut self) {
        let count = self.current_rows().len();
        if count == 0 {
            self.selected_row = 0;
        } else if self.selected_row >= count {
            self.selected_row = count - 1;
        }
    }
}

/// Fetches one tab's data and shapes it into table rows.
///
/// Failures come back as the summarized error string the status line can
/// show; the dashboard banner itself stays generic.
async fn load_tab(client: &ApiClient, tab: Tab) -> Result<Vec<Vec<String>>, String> {
    let rows = match tab {
        Tab::Doctors => doctors::list_doctors(client)
            .await
            .map_err(|e| e.summary())?
            .iter()
            .map(|d| d.to_row())
            .collect(),
        Tab::Patients => patients::list_patients(client)
            .await
            .map_err(|e| e.summary())?
            .iter()
            .map(|p| p.to_row())
            .collect(),
        Tab::Receptionists => receptionists::list_receptionists(client)
            .await
            .map_err(|e| e.summary())?
            .iter()
            .map(|r| r.to_row())
            .collect(),
        Tab::Appointments => appointments::list_appointments(client)
            .await
            .map_err(|e| e.summary())?
            .iter()
            .map(|a| a.to_row())
            .collect(),
        Tab::Schedules => schedules::list_schedules(client, None)
            .await
            .map_err(|e| e.summary())?
            .iter()
            .map(|s| s.to_row())
            .collect(),
        Tab::LabTests => lab_tests::list_lab_tests(client)
            .await
            .map_err(|e| e.summary())?
            .iter()
            .map(|t| t.to_row())
            .collect(),
        Tab::Logs => admin::fetch_logs(client)
            .await
            .map_err(|e| e.summary())?
            .iter()
            .map(|l| l.to_row())
            .collect(),
        Tab::Statistics => admin::fetch_statistics(client)
            .await
            .map_err(|e| e.summary())?
            .to_rows(),
    };
    Ok(rows)
}
