//! Dashboard list state
//!
//! Client-side state behind the employee dashboard: the full owned list is
//! fetched wholesale, search and pagination are computed locally, and every
//! mutation is followed by a reload.

use shared::Pagination;
use shared::models::{Employee, EmployeeUpdate, Role};

use crate::http::StaffhubClient;

/// Fixed page size of the dashboard table
pub const PAGE_SIZE: usize = 5;

/// Client-side dashboard state
///
/// # Behavior notes
///
/// - `load` replaces the list wholesale; there is no incremental patching.
/// - Search filters on every call (no debounce) by case-insensitive
///   substring over the stringified value of every field.
/// - Changing the search term does NOT reset the page index; an
///   out-of-range page shows an empty slice.
/// - Selection is single-valued even though the table renders a checkbox
///   per row.
/// - Deletion is two-phase: `request_delete` stages the id, the
///   confirmation dialog then calls `confirm_delete` or `cancel_delete`.
#[derive(Debug)]
pub struct DashboardState {
    employees: Vec<Employee>,
    loading: bool,
    error: Option<String>,
    search_term: String,
    current_page: usize,
    selected: Option<String>,
    pending_role: Option<Role>,
    pending_delete: Option<String>,
}

impl DashboardState {
    pub fn new() -> Self {
        Self {
            employees: Vec::new(),
            loading: false,
            error: None,
            search_term: String::new(),
            current_page: 1,
            selected: None,
            pending_role: None,
            pending_delete: None,
        }
    }

    // ========== Accessors ==========

    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn pending_delete(&self) -> Option<&str> {
        self.pending_delete.as_deref()
    }

    // ========== Fetch ==========

    /// Fetch the full owned list and replace local state wholesale.
    ///
    /// Called on mount and after every mutating action.
    pub async fn load(&mut self, client: &StaffhubClient) {
        self.loading = true;
        self.error = None;
        match client.list_employees().await {
            Ok(list) => {
                self.employees = list;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to fetch employees");
                self.error = Some("Something went wrong".to_string());
            }
        }
        self.loading = false;
    }

    // ========== Search & pagination ==========

    /// Update the search term.
    ///
    /// Recomputed on every keystroke, not debounced. Deliberately leaves
    /// the page index untouched.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    /// Employees matching the search term, in list (newest-first) order
    pub fn filtered(&self) -> Vec<&Employee> {
        if self.search_term.is_empty() {
            return self.employees.iter().collect();
        }
        let needle = self.search_term.to_lowercase();
        self.employees
            .iter()
            .filter(|emp| matches_search(emp, &needle))
            .collect()
    }

    /// Pagination over the filtered list
    pub fn pagination(&self) -> Pagination {
        Pagination::new(
            self.current_page as u32,
            PAGE_SIZE as u32,
            self.filtered().len() as u64,
        )
    }

    /// Total pages; an empty filtered list still renders one empty page
    pub fn total_pages(&self) -> usize {
        (self.pagination().total_pages as usize).max(1)
    }

    /// Switch to a page (1-based). Out-of-range pages are representable
    /// and simply show no rows.
    pub fn set_page(&mut self, page: usize) {
        self.current_page = page.max(1);
    }

    /// Rows of the current page
    pub fn page_items(&self) -> Vec<&Employee> {
        let filtered = self.filtered();
        let start = (self.current_page - 1) * PAGE_SIZE;
        if start >= filtered.len() {
            return Vec::new();
        }
        let end = (start + PAGE_SIZE).min(filtered.len());
        filtered[start..end].to_vec()
    }

    // ========== Selection & bulk role change ==========

    /// Toggle row selection. The table draws a checkbox per row but the
    /// selection is single-valued: picking another row replaces it.
    pub fn toggle_select(&mut self, id: &str) {
        if self.selected.as_deref() == Some(id) {
            self.selected = None;
        } else {
            self.selected = Some(id.to_string());
        }
    }

    /// Choose the role for the staged bulk change ("Change role" dropdown)
    pub fn choose_role(&mut self, role: Role) {
        self.pending_role = Some(role);
    }

    /// Apply the staged role change to the selected record.
    ///
    /// Issues a partial update carrying only the `role` field; on success
    /// clears the selection and reloads the full list.
    pub async fn apply_role_change(&mut self, client: &StaffhubClient) {
        let (Some(id), Some(role)) = (self.selected.clone(), self.pending_role) else {
            return;
        };

        match client
            .update_employee(&id, &EmployeeUpdate::role_only(role))
            .await
        {
            Ok(_) => {
                self.selected = None;
                self.pending_role = None;
                self.load(client).await;
            }
            Err(e) => {
                tracing::error!(error = %e, employee = %id, "Failed to update employee role");
                self.error = Some("Error updating employee role".to_string());
            }
        }
    }

    // ========== Delete (two-phase, interactive confirmation) ==========

    /// Stage a deletion; the UI shows the confirmation dialog
    pub fn request_delete(&mut self, id: &str) {
        self.pending_delete = Some(id.to_string());
    }

    /// Abandon the staged deletion
    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Issue the staged deletion. The list reloads after either success or
    /// failure; a failure message survives the reload.
    pub async fn confirm_delete(&mut self, client: &StaffhubClient) {
        let Some(id) = self.pending_delete.take() else {
            return;
        };

        self.loading = true;
        let result = client.delete_employee(&id).await;
        self.load(client).await;
        if let Err(e) = result {
            tracing::error!(error = %e, employee = %id, "Failed to delete employee");
            self.error = Some("Something went wrong".to_string());
        }
    }
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new()
    }
}

/// Case-insensitive substring match against the stringified value of every
/// field, mirroring the table's search box
fn matches_search(emp: &Employee, needle: &str) -> bool {
    let haystacks = [
        emp.id.as_str(),
        emp.first_name.as_str(),
        emp.last_name.as_str(),
        emp.email.as_str(),
        emp.phone.as_str(),
        emp.role.as_str(),
        emp.created_by.as_str(),
    ];
    if haystacks
        .iter()
        .any(|h| h.to_lowercase().contains(needle))
    {
        return true;
    }
    emp.created_at.to_string().contains(needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn employee(n: usize, role: Role) -> Employee {
        Employee {
            id: format!("employee:e{n}"),
            first_name: format!("First{n}"),
            last_name: format!("Last{n}"),
            email: format!("person{n}@example.com"),
            phone: format!("+12345678{n:02}"),
            role,
            created_by: "account:u1".to_string(),
            created_at: 1_700_000_000_000 + n as i64,
        }
    }

    fn state_with(count: usize) -> DashboardState {
        let mut state = DashboardState::new();
        state.employees = (0..count)
            .map(|n| employee(n, if n % 2 == 0 { Role::Staff } else { Role::Admin }))
            .collect();
        state
    }

    #[test]
    fn search_is_case_insensitive_across_fields() {
        let mut state = state_with(3);

        state.set_search_term("PERSON1@EXAMPLE");
        assert_eq!(state.filtered().len(), 1);
        assert_eq!(state.filtered()[0].first_name, "First1");

        // role field matches too
        state.set_search_term("admin");
        assert_eq!(state.filtered().len(), 1);

        // phone substring
        state.set_search_term("678 02");
        assert_eq!(state.filtered().len(), 0);
        state.set_search_term("67802");
        assert_eq!(state.filtered().len(), 1);
    }

    #[test]
    fn pagination_uses_filtered_length() {
        let mut state = state_with(11);
        assert_eq!(state.total_pages(), 3);
        assert_eq!(state.page_items().len(), PAGE_SIZE);

        state.set_page(3);
        assert_eq!(state.page_items().len(), 1);

        // Filter down to the 6 Staff rows: two pages
        state.set_search_term("Staff");
        assert_eq!(state.total_pages(), 2);
    }

    #[test]
    fn search_change_keeps_page_index() {
        let mut state = state_with(11);
        state.set_page(3);

        // Narrowing the result set does not reset the page; the now
        // out-of-range page renders empty rather than erroring
        state.set_search_term("First1");
        assert_eq!(state.current_page(), 3);
        assert!(state.page_items().is_empty());

        state.set_page(1);
        // "First1" matches First1 and First10
        assert_eq!(state.page_items().len(), 2);
    }

    #[test]
    fn no_match_collapses_to_single_empty_page() {
        let mut state = state_with(7);
        state.set_search_term("zzz-no-such-substring");
        assert!(state.filtered().is_empty());
        assert_eq!(state.total_pages(), 1);
        assert!(state.page_items().is_empty());
    }

    #[test]
    fn selection_is_single_valued() {
        let mut state = state_with(3);

        state.toggle_select("employee:e0");
        assert_eq!(state.selected(), Some("employee:e0"));

        // Checking another row replaces the selection
        state.toggle_select("employee:e1");
        assert_eq!(state.selected(), Some("employee:e1"));

        // Checking the same row clears it
        state.toggle_select("employee:e1");
        assert_eq!(state.selected(), None);
    }

    #[test]
    fn delete_is_two_phase() {
        let mut state = state_with(1);

        state.request_delete("employee:e0");
        assert_eq!(state.pending_delete(), Some("employee:e0"));

        state.cancel_delete();
        assert_eq!(state.pending_delete(), None);
    }
}
