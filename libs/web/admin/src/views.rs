//! HTML for the admin users page.

use handlebars::Handlebars;
use serde::Serialize;
use uuid::Uuid;
use web_widgets::{FormField, FormFieldView, WidgetResult, register_partials};

use crate::permission::{Access, gate};
use crate::screen::ScreenState;

pub const LOADING_TEXT: &str = "Loading…";
pub const ACCESS_DENIED: &str = "Access denied";

const USERS_PAGE: &str = "admin_users";

const USERS_PAGE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="utf-8"><title>User management</title></head>
<body>
<main class="page">
{{#if loading}}<div class="page__status">{{loading}}</div>{{else}}{{#if error}}<div class="page__status page__status--error">{{error}}</div>{{else}}{{#if denied}}<div class="page__status">{{denied}}</div>{{else}}
<h1>User management</h1>
<section class="create-user">
  <h2>Create a new user</h2>
  <form method="post" action="{{action}}">
    {{#each fields}}{{> form_field}}{{/each}}
    <div class="form-field">
      <div class="form-field__label"><label for="groupIds">Groups</label></div>
      <div class="form-field__control">
        <select name="groupIds" id="groupIds" multiple>
          {{#each groups}}<option value="{{id}}"{{#if selected}} selected{{/if}}>{{name}}</option>{{/each}}
        </select>
      </div>
    </div>
    <button type="submit">Create user</button>
  </form>
</section>
<table class="users">
  <thead><tr><th>Name</th><th>Email</th><th>Groups</th></tr></thead>
  <tbody>
    {{#each users}}<tr><td>{{name}}</td><td>{{email}}</td><td>{{groups}}</td></tr>
    {{/each}}
  </tbody>
</table>
{{/if}}{{/if}}{{/if}}
</main>
</body>
</html>"#;

/// What the page shows, in precedence order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageView {
    Loading,
    Error(String),
    Denied,
    Content,
}

impl PageView {
    /// Loading wins over an error, an error wins over the permission gate.
    pub fn select(state: &ScreenState, access: Access) -> Self {
        if state.loading {
            PageView::Loading
        } else if let Some(message) = &state.error {
            PageView::Error(message.clone())
        } else {
            gate(access, || PageView::Content, || PageView::Denied)
        }
    }
}

#[derive(Serialize, Default)]
#[serde(rename_all = "camelCase")]
struct UsersPageContext {
    loading: Option<&'static str>,
    error: Option<String>,
    denied: Option<&'static str>,
    action: String,
    fields: Vec<FormFieldView>,
    groups: Vec<GroupOption>,
    users: Vec<UserRow>,
}

#[derive(Serialize)]
struct GroupOption {
    id: Uuid,
    name: String,
    selected: bool,
}

#[derive(Serialize)]
struct UserRow {
    name: String,
    email: String,
    /// Membership group names joined with ", ".
    groups: String,
}

pub struct AdminViews {
    handlebars: Handlebars<'static>,
}

impl AdminViews {
    pub fn new() -> WidgetResult<Self> {
        let mut handlebars = Handlebars::new();
        register_partials(&mut handlebars)?;
        handlebars.register_template_string(USERS_PAGE, USERS_PAGE_TEMPLATE)?;
        Ok(Self { handlebars })
    }

    /// Render the users page. `action` is the form's POST target.
    pub fn render_users_page(
        &self,
        state: &ScreenState,
        access: Access,
        action: &str,
    ) -> WidgetResult<String> {
        let context = match PageView::select(state, access) {
            PageView::Loading => UsersPageContext {
                loading: Some(LOADING_TEXT),
                ..Default::default()
            },
            PageView::Error(message) => UsersPageContext {
                error: Some(message),
                ..Default::default()
            },
            PageView::Denied => UsersPageContext {
                denied: Some(ACCESS_DENIED),
                ..Default::default()
            },
            PageView::Content => content_context(state, action),
        };

        Ok(self.handlebars.render(USERS_PAGE, &context)?)
    }
}

fn content_context(state: &ScreenState, action: &str) -> UsersPageContext {
    let draft = &state.draft;
    let fields = [
        FormField::new("Name", "name")
            .with_value(draft.name.as_str())
            .required(true),
        FormField::new("Email", "email")
            .with_type("email")
            .with_value(draft.email.as_str())
            .required(true),
        // The password is never echoed back into the page.
        FormField::new("Password", "password")
            .with_type("password")
            .required(true),
    ]
    .iter()
    .map(FormField::view)
    .collect();

    let groups = state
        .groups
        .iter()
        .map(|g| GroupOption {
            id: g.id,
            name: g.name.clone(),
            selected: draft.group_ids.contains(&g.id),
        })
        .collect();

    let users = state
        .users
        .iter()
        .map(|u| UserRow {
            name: u.name.clone(),
            email: u.email.clone(),
            groups: u.group_names().collect::<Vec<_>>().join(", "),
        })
        .collect();

    UsersPageContext {
        action: action.to_string(),
        fields,
        groups,
        users,
        ..Default::default()
    }
}
