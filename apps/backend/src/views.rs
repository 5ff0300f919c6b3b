//! Server-rendered pages.
//!
//! Plain string rendering: every dynamic value goes through [`escape`].
//! Chart data is embedded as a JSON island the client scripts read.

use std::fmt::Write;

use serde::Serialize;

use crate::entities::categories::{self, CategoryKind};
use crate::licensing;
use crate::services::dashboard::{DashboardSnapshot, TransactionView};

pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Whole units with thousands separators, sign first.
pub fn format_amount(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if amount < 0 {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

fn json_island<T: Serialize>(id: &str, value: &T) -> String {
    let json = serde_json::to_string(value)
        .unwrap_or_else(|_| "null".to_string())
        .replace("</", "<\\/");
    format!(r#"<script id="{id}" type="application/json">{json}</script>"#)
}

/// Page shell. `user` is the signed-in email, if any.
pub fn layout(title: &str, user: Option<&str>, body: &str) -> String {
    let license = licensing::registered_license().unwrap_or_default();
    let account = match user {
        Some(email) => format!(
            r#"<span class="user">{}</span><form method="post" action="/Identity/Account/Logout"><button type="submit">Logout</button></form>"#,
            escape(email)
        ),
        None => r#"<a href="/Identity/Account/Login">Login</a> <a href="/Identity/Account/Register">Register</a>"#
            .to_string(),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8" />
<meta name="viewport" content="width=device-width, initial-scale=1.0" />
<meta name="ui-license" content="{license}" />
<title>{title} - BudgetWise</title>
<link rel="stylesheet" href="/css/site.css" />
</head>
<body>
<nav><a href="/">BudgetWise</a> <a href="/Dashboard">Dashboard</a> <a href="/Category">Categories</a> <a href="/Transaction">Transactions</a> <a href="/DemoDashboard">Demo</a> {account}</nav>
<main>
{body}
</main>
<script src="/js/site.js"></script>
</body>
</html>"#,
        license = escape(license),
        title = escape(title),
    )
}

pub fn home(user: Option<&str>) -> String {
    let body = r#"<h1>BudgetWise</h1>
<p>Track where your money goes. Sign in to see your dashboard or try the <a href="/DemoDashboard">demo</a>.</p>"#;
    layout("Home", user, body)
}

pub fn privacy(user: Option<&str>) -> String {
    layout(
        "Privacy Policy",
        user,
        "<h1>Privacy Policy</h1>\n<p>Your data is only used to show your own budget.</p>",
    )
}

pub fn error_page(request_id: &str) -> String {
    let mut body = String::from(
        "<h1 class=\"text-danger\">Error.</h1>\n<h2 class=\"text-danger\">An error occurred while processing your request.</h2>\n",
    );
    if !request_id.is_empty() {
        let _ = write!(
            body,
            "<p><strong>Request ID:</strong> <code>{}</code></p>",
            escape(request_id)
        );
    }
    layout("Error", None, &body)
}

fn transaction_rows(txns: &[TransactionView]) -> String {
    txns.iter().fold(String::new(), |mut out, t| {
        let sign = match t.kind {
            CategoryKind::Income => "+",
            CategoryKind::Expense => "-",
        };
        let _ = write!(
            out,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td class=\"amount\">{sign}{}</td></tr>",
            t.date,
            escape(&t.category),
            escape(t.note.as_deref().unwrap_or_default()),
            format_amount(t.amount),
        );
        out
    })
}

pub fn dashboard(title: &str, user: Option<&str>, snapshot: &DashboardSnapshot) -> String {
    let summary = &snapshot.summary;
    let body = format!(
        r#"<h1>{title}</h1>
<p class="range">{start} to {end}</p>
<section class="summary">
<div class="income">Total Income <strong>{income}</strong></div>
<div class="expense">Total Expense <strong>{expense}</strong></div>
<div class="balance">Balance <strong>{balance}</strong></div>
</section>
<section><h2>Recent Transactions</h2>
<table><thead><tr><th>Date</th><th>Category</th><th>Note</th><th>Amount</th></tr></thead>
<tbody>{rows}</tbody></table></section>
{island}"#,
        title = escape(title),
        start = snapshot.range.start,
        end = snapshot.range.end,
        income = format_amount(summary.total_income),
        expense = format_amount(summary.total_expense),
        balance = format_amount(summary.balance),
        rows = transaction_rows(&snapshot.recent),
        island = json_island("dashboard-data", snapshot),
    );
    layout(title, user, &body)
}

pub fn category_index(user: Option<&str>, items: &[categories::Model]) -> String {
    let rows = items.iter().fold(String::new(), |mut out, c| {
        let _ = write!(
            out,
            r#"<tr><td>{title}</td><td>{kind:?}</td><td><a href="/Category/AddOrEdit/{id}">Edit</a> <form method="post" action="/Category/Delete/{id}"><button type="submit">Delete</button></form></td></tr>"#,
            title = escape(&c.title_with_icon()),
            kind = c.kind,
            id = c.id,
        );
        out
    });
    let body = format!(
        r#"<h1>Categories</h1>
<a href="/Category/AddOrEdit">New Category</a>
<table><thead><tr><th>Category</th><th>Type</th><th></th></tr></thead><tbody>{rows}</tbody></table>"#
    );
    layout("Categories", user, &body)
}

/// Values shown in the category form.
pub struct CategoryFormView<'a> {
    pub id: i32,
    pub title: &'a str,
    pub icon: &'a str,
    pub kind: CategoryKind,
    pub error: Option<&'a str>,
}

fn error_block(error: Option<&str>) -> String {
    error
        .map(|e| format!(r#"<div class="validation-summary">{}</div>"#, escape(e)))
        .unwrap_or_default()
}

pub fn category_form(user: Option<&str>, form: &CategoryFormView<'_>) -> String {
    let heading = if form.id == 0 { "Create a new Category" } else { "Edit Category" };
    let checked = |kind: CategoryKind| if form.kind == kind { " checked" } else { "" };
    let body = format!(
        r#"<h1>{heading}</h1>
{error}
<form method="post" action="/Category/AddOrEdit">
<input type="hidden" name="CategoryId" value="{id}" />
<label>Title <input name="Title" maxlength="50" value="{title}" /></label>
<label>Icon <input name="Icon" maxlength="5" value="{icon}" /></label>
<label><input type="radio" name="Type" value="Expense"{expense} /> Expense</label>
<label><input type="radio" name="Type" value="Income"{income} /> Income</label>
<button type="submit">Submit</button>
</form>"#,
        error = error_block(form.error),
        id = form.id,
        title = escape(form.title),
        icon = escape(form.icon),
        expense = checked(CategoryKind::Expense),
        income = checked(CategoryKind::Income),
    );
    layout(heading, user, &body)
}

pub fn transaction_index(user: Option<&str>, txns: &[TransactionView]) -> String {
    let rows = txns.iter().fold(String::new(), |mut out, t| {
        let _ = write!(
            out,
            r#"<tr><td>{date}</td><td>{category}</td><td>{note}</td><td class="amount">{amount}</td><td><a href="/Transaction/AddOrEdit/{id}">Edit</a> <form method="post" action="/Transaction/Delete/{id}"><button type="submit">Delete</button></form></td></tr>"#,
            date = t.date,
            category = escape(&t.category),
            note = escape(t.note.as_deref().unwrap_or_default()),
            amount = format_amount(t.amount),
            id = t.id,
        );
        out
    });
    let body = format!(
        r#"<h1>Transactions</h1>
<a href="/Transaction/AddOrEdit">New Transaction</a>
<table><thead><tr><th>Date</th><th>Category</th><th>Note</th><th>Amount</th><th></th></tr></thead><tbody>{rows}</tbody></table>"#
    );
    layout("Transactions", user, &body)
}

pub struct TransactionFormView<'a> {
    pub id: i32,
    pub category_id: i32,
    pub amount: i64,
    pub note: &'a str,
    pub date: String,
    pub categories: &'a [categories::Model],
    pub error: Option<&'a str>,
}

pub fn transaction_form(user: Option<&str>, form: &TransactionFormView<'_>) -> String {
    let heading = if form.id == 0 { "Create a new Transaction" } else { "Edit Transaction" };
    let options = form.categories.iter().fold(String::new(), |mut out, c| {
        let selected = if c.id == form.category_id { " selected" } else { "" };
        let _ = write!(
            out,
            r#"<option value="{}"{selected}>{}</option>"#,
            c.id,
            escape(&c.title_with_icon())
        );
        out
    });
    let body = format!(
        r#"<h1>{heading}</h1>
{error}
<form method="post" action="/Transaction/AddOrEdit">
<input type="hidden" name="TransactionId" value="{id}" />
<label>Category <select name="CategoryId"><option value="0">Select a Category</option>{options}</select></label>
<label>Amount <input name="Amount" type="number" min="1" value="{amount}" /></label>
<label>Note <textarea name="Note" maxlength="75">{note}</textarea></label>
<label>Date <input name="Date" type="date" value="{date}" /></label>
<button type="submit">Submit</button>
</form>"#,
        error = error_block(form.error),
        id = form.id,
        amount = form.amount,
        note = escape(form.note),
        date = escape(&form.date),
    );
    layout(heading, user, &body)
}

pub fn login(email: &str, error: Option<&str>) -> String {
    let body = format!(
        r#"<h1>Log in</h1>
{error}
<form method="post" action="/Identity/Account/Login">
<label>Email <input name="Email" type="email" value="{email}" /></label>
<label>Password <input name="Password" type="password" /></label>
<button type="submit">Log in</button>
</form>
<p><a href="/Identity/Account/Register">Register as a new user</a></p>"#,
        error = error_block(error),
        email = escape(email),
    );
    layout("Log in", None, &body)
}

pub fn register(email: &str, error: Option<&str>) -> String {
    let body = format!(
        r#"<h1>Register</h1>
{error}
<form method="post" action="/Identity/Account/Register">
<label>Email <input name="Email" type="email" value="{email}" /></label>
<label>Password <input name="Password" type="password" /></label>
<label>Confirm password <input name="ConfirmPassword" type="password" /></label>
<button type="submit">Register</button>
</form>"#,
        error = error_block(error),
        email = escape(email),
    );
    layout("Register", None, &body)
}
