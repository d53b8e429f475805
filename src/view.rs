//! Server-rendered panel page.
//!
//! The page is a single HTML document with three forms: run, status, and
//! finalize. The status and finalize forms are only emitted when the session
//! holds a job id. Every piece of dynamic text goes through `escape_html`.

use std::fmt::Write;

use crate::api::{Operation, Wave};
use crate::panel::{Level, Notice};
use crate::session::PanelSession;

pub const TITLE: &str = "Linux Patching Assistant (POC)";
const INTRO: &str = "Choose an operation to run via Ansible Automation Platform:";

const STYLE: &str = "\
body{font-family:system-ui,sans-serif;max-width:44rem;margin:2rem auto;padding:0 1rem;color:#262730}\
label{display:block;margin:1rem 0 .25rem;font-size:.9rem}\
select,input{width:100%;padding:.5rem;font-size:1rem;box-sizing:border-box}\
button{margin-top:1rem;padding:.5rem 1rem;font-size:1rem;cursor:pointer}\
.notice{padding:.75rem 1rem;margin:1rem 0;border-radius:.5rem}\
.success{background:#dff5e3;color:#1b5e20}\
.info{background:#e3f0fc;color:#0d47a1}\
.error{background:#fde4e4;color:#8b1a1a}\
.text{padding:0 0 .25rem}\
.actions form{display:inline-block;margin-right:.5rem}";

/// Where the notices of the last action are shown.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Feedback {
    #[default]
    None,
    /// Under the run form.
    Run(Vec<Notice>),
    /// Under the job actions.
    Job(Vec<Notice>),
}

/// Values the run form is pre-filled with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FormValues {
    pub operation: Operation,
    pub wave: Wave,
}

#[must_use]
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn level_class(level: Level) -> &'static str {
    match level {
        Level::Success => "notice success",
        Level::Info => "notice info",
        Level::Error => "notice error",
        Level::Text => "text",
    }
}

fn write_notices(html: &mut String, notices: &[Notice]) {
    for notice in notices {
        let role = if notice.level == Level::Error { " role=\"alert\"" } else { "" };
        let _ = write!(
            html,
            "<div class=\"{}\"{role}>{}</div>",
            level_class(notice.level),
            escape_html(&notice.text)
        );
    }
}

fn write_run_form(html: &mut String, form: FormValues) {
    html.push_str("<form method=\"post\" action=\"/run\">");
    html.push_str("<label for=\"operation\">Select Task</label><select id=\"operation\" name=\"operation\">");
    for op in Operation::ALL {
        let selected = if op == form.operation { " selected" } else { "" };
        let _ = write!(
            html,
            "<option value=\"{}\"{selected}>{}</option>",
            op.template_name(),
            escape_html(op.label())
        );
    }
    html.push_str("</select>");
    let _ = write!(
        html,
        "<label for=\"wave\">Enter Wave Number ({min}-{max})</label>\
         <input id=\"wave\" name=\"wave\" type=\"number\" min=\"{min}\" max=\"{max}\" step=\"1\" value=\"{value}\" required>",
        min = Wave::MIN,
        max = Wave::MAX,
        value = form.wave.get(),
    );
    html.push_str("<button type=\"submit\">Run Task</button></form>");
}

fn write_job_actions(html: &mut String, job_id: &str) {
    let _ = write!(html, "<h2>Check Status for Job ID {}</h2>", escape_html(job_id));
    html.push_str(
        "<div class=\"actions\">\
         <form method=\"post\" action=\"/status\"><button type=\"submit\">Check Status</button></form>\
         <form method=\"post\" action=\"/finalize\"><button type=\"submit\">Download Results</button></form>\
         </div>",
    );
}

/// Render the whole page for `session`.
#[must_use]
pub fn render_page(session: &PanelSession, form: FormValues, feedback: &Feedback) -> String {
    let mut html = String::with_capacity(4096);
    let _ = write!(
        html,
        "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">\
         <meta name=\"viewport\" content=\"width=device-width,initial-scale=1\">\
         <title>{TITLE}</title><style>{STYLE}</style></head><body>\
         <h1>{TITLE}</h1><p>{INTRO}</p>"
    );

    write_run_form(&mut html, form);
    if let Feedback::Run(notices) = feedback {
        write_notices(&mut html, notices);
    }

    if let Some(job_id) = session.job_id() {
        write_job_actions(&mut html, job_id);
    }
    // Job feedback is shown even when no job is stored (the "no job" refusal).
    if let Feedback::Job(notices) = feedback {
        write_notices(&mut html, notices);
    }

    html.push_str("</body></html>");
    html
}

#[cfg(test)]
#[path = "view_test.rs"]
mod tests;
