//! # User & Branch Endpoints
//!
//! User administration plus the branch and department dropdowns.
//!
//! The branch and department listings answer with a bare JSON array rather
//! than the usual envelope, so they go through the raw GET path.
//!
//! Mutations are de-duplicated; `Ok(None)` means an identical call was
//! already in flight.

use serde_json::json;

use bpims_core::{ObjectRef, User};

use crate::error::ClientResult;
use crate::http::ApiClient;

/// User endpoint wrapper.
#[derive(Debug, Clone)]
pub struct UsersApi {
    client: ApiClient,
}

impl UsersApi {
    pub fn new(client: ApiClient) -> Self {
        UsersApi { client }
    }

    /// Users matching the search text.
    pub async fn get_users(&self, search: &str) -> ClientResult<Vec<User>> {
        self.client
            .get("getUsers", &[("search", search.to_string())])
            .await
    }

    /// One user by id.
    pub async fn get_user(&self, id: i64) -> ClientResult<User> {
        self.client.get("getUser", &[("id", id.to_string())]).await
    }

    /// Creates a user; returns the backend-issued id.
    pub async fn add_user(&self, user: &User) -> ClientResult<Option<i64>> {
        self.client.post("addUser", &json!({ "user": user })).await
    }

    /// Updates a user; returns the user's id.
    pub async fn edit_user(&self, user: &User) -> ClientResult<Option<i64>> {
        self.client.put("editUser", &json!({ "user": user })).await
    }

    /// Deactivates a user account.
    pub async fn set_user_inactive(&self, id: i64) -> ClientResult<Option<()>> {
        self.client
            .post_unit("setUserInactive", &json!({ "id": id }))
            .await
    }

    // =========================================================================
    // Branches & Departments
    // =========================================================================

    /// All departments, for the user form dropdown.
    pub async fn get_departments(&self) -> ClientResult<Vec<ObjectRef>> {
        self.client.get_raw("getDepartments", &[]).await
    }

    /// All active branches.
    pub async fn get_branches(&self) -> ClientResult<Vec<ObjectRef>> {
        self.client.get_raw("getBranches", &[]).await
    }

    /// Creates or renames a branch.
    pub async fn save_branch(&self, id: i64, name: &str) -> ClientResult<Option<()>> {
        self.client
            .put_unit("saveBranch", &json!({ "id": id, "name": name }))
            .await
    }

    /// Deactivates a branch.
    pub async fn set_branch_inactive(&self, id: i64) -> ClientResult<Option<()>> {
        self.client
            .put_unit("setBranchInactive", &json!({ "id": id }))
            .await
    }
}
