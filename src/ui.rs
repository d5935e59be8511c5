use crate::models::{Athlete, Catalog, Guard, Highlight, MasteryStatus, ProgressRecord, TechniqueCategory};
use crate::search::technique_search_url;
use crate::stats::{global_status_counts, guard_completion, learning_highlights};
use std::fmt::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Section {
    #[default]
    Guards,
    Athletes,
    Progress,
}

impl Section {
    const ALL: [Section; 3] = [Section::Guards, Section::Athletes, Section::Progress];

    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("athletes") => Self::Athletes,
            Some("progress") => Self::Progress,
            _ => Self::Guards,
        }
    }

    fn slug(self) -> &'static str {
        match self {
            Self::Guards => "guards",
            Self::Athletes => "athletes",
            Self::Progress => "progress",
        }
    }

    fn title(self) -> &'static str {
        match self {
            Self::Guards => "GUARDS",
            Self::Athletes => "ATHLETES",
            Self::Progress => "PROGRESS",
        }
    }
}

pub struct PageView<'a> {
    pub catalog: &'a Catalog,
    pub record: &'a ProgressRecord,
    pub section: Section,
    pub selected_guard: Option<u32>,
    pub notice: Option<&'a str>,
}

pub fn render_index(view: &PageView<'_>) -> String {
    let selected = view
        .selected_guard
        .and_then(|id| view.catalog.guard(id));

    PAGE_HTML
        .replace("{{NOTICE}}", &render_notice(view.notice))
        .replace("{{NAV}}", &render_nav(view.section))
        .replace("{{GUARDS_ACTIVE}}", active_class(view.section == Section::Guards))
        .replace("{{ATHLETES_ACTIVE}}", active_class(view.section == Section::Athletes))
        .replace("{{PROGRESS_ACTIVE}}", active_class(view.section == Section::Progress))
        .replace("{{GUARD_LIST}}", &render_guard_list(view.catalog, view.record, view.selected_guard))
        .replace(
            "{{GUARD_DETAILS}}",
            &selected
                .map(|guard| render_guard_details(guard, view.record))
                .unwrap_or_else(|| PLACEHOLDER_DETAILS.to_string()),
        )
        .replace("{{ATHLETES}}", &render_athletes(&view.catalog.athletes))
        .replace("{{PROGRESS}}", &render_progress(view.catalog, view.record))
}

fn active_class(active: bool) -> &'static str {
    if active { " active" } else { "" }
}

fn render_notice(notice: Option<&str>) -> String {
    match notice {
        Some(message) => format!(
            r#"<div class="notice" role="alertdialog">{}<br/>Fix the catalog file and reload the page.</div>"#,
            escape_html(message)
        ),
        None => String::new(),
    }
}

fn render_nav(current: Section) -> String {
    Section::ALL
        .iter()
        .map(|section| {
            format!(
                r#"<a class="nav-btn{}" href="/?section={}">{}</a>"#,
                active_class(*section == current),
                section.slug(),
                section.title()
            )
        })
        .collect()
}

pub fn render_guard_list(catalog: &Catalog, record: &ProgressRecord, selected: Option<u32>) -> String {
    if catalog.guards.is_empty() {
        return String::new();
    }

    let mut html = String::new();
    for (index, guard) in catalog.guards.iter().enumerate() {
        let completion = guard_completion(guard, record);
        let _ = write!(
            html,
            r#"<a class="guard-card{selected}" href="/?guard={id}" style="animation-delay: {delay:.2}s">
  <h3>{name}</h3>
  <div class="completion"><div class="completion-bar" style="width: {completion}%"></div></div>
  <span class="completion-label">{completion}% mastered</span>
</a>"#,
            selected = if selected == Some(guard.id) { " selected" } else { "" },
            id = guard.id,
            delay = index as f64 * 0.05,
            name = escape_html(&guard.name),
        );
    }
    html
}

pub fn render_guard_details(guard: &Guard, record: &ProgressRecord) -> String {
    let mut html = String::new();
    let _ = write!(
        html,
        r#"<div class="guard-detail-content">
  <h2>{name}</h2>
  {image}
  <div class="detail-section"><h3>DESCRIPTION</h3><p>{description}</p></div>
  <div class="detail-section"><h3>EXECUTION</h3><ul>{execution}</ul></div>
  <div class="pros-cons">
    <div class="pros"><h4>ADVANTAGES</h4><ul>{pros}</ul></div>
    <div class="cons"><h4>DISADVANTAGES</h4><ul>{cons}</ul></div>
  </div>
  <div class="detail-section"><h3>TIPS &amp; CONCEPTS</h3><ul>{tips}</ul></div>
"#,
        name = escape_html(&guard.name),
        image = if guard.image.is_empty() {
            String::new()
        } else {
            format!(
                r#"<img src="{}" alt="{}" class="guard-image">"#,
                escape_html(&guard.image),
                escape_html(&guard.name)
            )
        },
        description = escape_html(&guard.description),
        execution = list_items(&guard.execution),
        pros = list_items(&guard.pros),
        cons = list_items(&guard.cons),
        tips = list_items(&guard.tips),
    );

    let sections = [
        (TechniqueCategory::Sweep, "SWEEP TECHNIQUES", &guard.sweeps),
        (TechniqueCategory::Pass, "GUARD PASS TECHNIQUES", &guard.passes),
        (TechniqueCategory::Submission, "SUBMISSION TECHNIQUES", &guard.submissions),
    ];
    for (category, title, techniques) in sections {
        let Some(techniques) = techniques else {
            continue;
        };
        let _ = write!(
            html,
            r#"  <div class="detail-section techniques-section"><h3>{title}</h3><div class="technique-grid">"#
        );
        for (index, technique) in techniques.iter().enumerate() {
            let status = record.status(&guard.technique_id(technique));
            let _ = write!(
                html,
                r#"<div class="technique-card status-{status}" style="animation-delay: {delay:.1}s">
  <span class="technique-type {kind}">{label}</span>
  <h5><a href="{url}" target="_blank" rel="noopener">{name}</a></h5>
  <p>{description}</p>
  {buttons}
</div>"#,
                status = status.as_str(),
                delay = index as f64 * 0.1,
                kind = category.label().to_ascii_lowercase(),
                label = category.label(),
                url = escape_html(&technique_search_url(&technique.name, &guard.name)),
                name = escape_html(&technique.name),
                description = escape_html(&technique.description),
                buttons = render_status_buttons(guard.id, &technique.name, status),
            );
        }
        html.push_str("</div></div>\n");
    }

    let athletes: String = guard
        .athletes
        .iter()
        .map(|athlete| format!(r#"<span class="athlete-tag">{}</span>"#, escape_html(athlete)))
        .collect();
    let _ = write!(
        html,
        r#"  <div class="detail-section"><h3>NOTABLE ATHLETES</h3><div class="athletes-tag">{athletes}</div></div>
</div>"#
    );
    html
}

/// One form per status. The active button submits its own status, which the
/// toggle handler turns into a clear.
fn render_status_buttons(guard_id: u32, technique_name: &str, current: MasteryStatus) -> String {
    let mut html = String::from(r#"<div class="status-buttons">"#);
    for status in MasteryStatus::ASSIGNABLE {
        let _ = write!(
            html,
            r#"<form method="post" action="/progress/status">
  <input type="hidden" name="guard_id" value="{guard_id}">
  <input type="hidden" name="technique" value="{technique}">
  <button class="status-btn {slug}{active}" name="status" value="{slug}" type="submit">{label}</button>
</form>"#,
            technique = escape_html(technique_name),
            slug = status.as_str(),
            active = active_class(status == current),
            label = status.label(),
        );
    }
    html.push_str("</div>");
    html
}

pub fn render_athletes(athletes: &[Athlete]) -> String {
    let mut html = String::new();
    for (index, athlete) in athletes.iter().enumerate() {
        let moves = [
            ("GUARD", &athlete.signatures.guard),
            ("SWEEP", &athlete.signatures.sweep),
            ("PASS", &athlete.signatures.pass),
            ("SUBMISSION", &athlete.signatures.submission),
        ];
        let moves: String = moves
            .iter()
            .map(|(kind, name)| {
                format!(
                    r#"<div class="move-item"><span class="move-type">{kind}</span><span class="move-name">{}</span></div>"#,
                    escape_html(name)
                )
            })
            .collect();
        let _ = write!(
            html,
            r#"<div class="athlete-card" style="animation-delay: {delay:.1}s">
  <img src="{image}" alt="{name}" class="athlete-image">
  <div class="athlete-info">
    <h3>{name}</h3>
    <div class="signature-moves"><h4>SIGNATURE MOVES</h4>{moves}</div>
  </div>
</div>"#,
            delay = index as f64 * 0.1,
            image = escape_html(&athlete.image),
            name = escape_html(&athlete.name),
        );
    }
    html
}

pub fn render_progress(catalog: &Catalog, record: &ProgressRecord) -> String {
    let counts = global_status_counts(record);
    let mut html = format!(
        r#"<div class="panel">
  <div class="stat"><span class="label">Learning</span><span class="value" id="count-learning">{learning}</span></div>
  <div class="stat"><span class="label">Average</span><span class="value" id="count-average">{average}</span></div>
  <div class="stat"><span class="label">Mastered</span><span class="value" id="count-mastered">{mastered}</span></div>
  <div class="stat"><span class="label">Last visit</span><span class="value">{last_visit}</span></div>
</div>
<h3>GUARD COMPLETION</h3>
<div class="completion-list">"#,
        learning = counts.learning,
        average = counts.average,
        mastered = counts.mastered,
        last_visit = escape_html(&record.last_visit),
    );

    for guard in &catalog.guards {
        let completion = guard_completion(guard, record);
        let _ = write!(
            html,
            r#"<a class="completion-row" href="/?guard={id}"><span>{name}</span><div class="completion"><div class="completion-bar" style="width: {completion}%"></div></div><span>{completion}%</span></a>"#,
            id = guard.id,
            name = escape_html(&guard.name),
        );
    }
    html.push_str("</div>\n<h3>MOVES OF THE WEEK</h3>\n");
    html.push_str(&render_highlights(&learning_highlights(catalog, record)));
    html.push_str(RESET_FORM);
    html
}

pub fn render_highlights(highlights: &[Highlight]) -> String {
    if highlights.is_empty() {
        return r#"<p class="empty-state">No techniques selected. Mark a technique as Learning to see it here.</p>"#
            .to_string();
    }

    let mut html = String::from(r#"<div class="technique-grid highlights">"#);
    for highlight in highlights {
        let _ = write!(
            html,
            r#"<a class="technique-card highlight" href="/?guard={id}">
  <span class="technique-type {kind}">{label}</span>
  <h5>{name}</h5>
  <p>{guard}</p>
</a>"#,
            id = highlight.guard_id,
            kind = highlight.category.label().to_ascii_lowercase(),
            label = highlight.category.label(),
            name = escape_html(&highlight.technique.name),
            guard = escape_html(&highlight.guard_name),
        );
    }
    html.push_str("</div>");
    html
}

fn list_items(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("<li>{}</li>", escape_html(item)))
        .collect()
}

pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            // Braces would otherwise be read as page template placeholders.
            '{' => escaped.push_str("&#123;"),
            '}' => escaped.push_str("&#125;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

const PLACEHOLDER_DETAILS: &str =
    r#"<div class="placeholder"><p>SELECT A GUARD TO VIEW ITS TECHNIQUES</p></div>"#;

const RESET_FORM: &str = r#"
<form class="reset-form" method="post" action="/progress/reset"
      onsubmit="return confirm('Reset all progress? This cannot be undone.');">
  <input type="hidden" name="confirm" value="yes">
  <button class="btn-reset" type="submit">Reset progress</button>
</form>"#;

const PAGE_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Guard Dex</title>
  <style>
    :root {
      --bg: #0a0e14;
      --panel: #111823;
      --ink: #e6edf3;
      --muted: #7d8590;
      --primary-glow: #00ff88;
      --sweep: #3fb950;
      --pass: #58a6ff;
      --submission: #f85149;
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, #132235, var(--bg) 70%);
      color: var(--ink);
      font-family: "Rajdhani", "Segoe UI", sans-serif;
    }

    header {
      padding: 28px 32px 12px;
      display: flex;
      flex-wrap: wrap;
      align-items: center;
      justify-content: space-between;
      gap: 16px;
    }

    h1 {
      margin: 0;
      letter-spacing: 0.2em;
      color: var(--primary-glow);
      text-shadow: 0 0 12px rgba(0, 255, 136, 0.5);
    }

    nav {
      display: flex;
      gap: 10px;
    }

    .nav-btn {
      color: var(--muted);
      text-decoration: none;
      border: 1px solid #30363d;
      padding: 8px 18px;
      border-radius: 6px;
      letter-spacing: 0.12em;
    }

    .nav-btn.active {
      color: var(--bg);
      background: var(--primary-glow);
      border-color: var(--primary-glow);
    }

    .notice {
      margin: 0 32px 16px;
      padding: 16px 20px;
      border-radius: 8px;
      background: rgba(248, 81, 73, 0.15);
      border: 1px solid var(--submission);
    }

    main {
      padding: 0 32px 48px;
    }

    .section {
      display: none;
    }

    .section.active {
      display: block;
    }

    .guards-layout {
      display: grid;
      grid-template-columns: minmax(220px, 300px) 1fr;
      gap: 24px;
    }

    .guard-card,
    .completion-row {
      display: block;
      color: inherit;
      text-decoration: none;
      background: var(--panel);
      border: 1px solid #30363d;
      border-radius: 8px;
      padding: 12px 16px;
      margin-bottom: 10px;
      animation: rise 400ms ease both;
    }

    .guard-card.selected {
      border-color: var(--primary-glow);
      box-shadow: 0 0 16px rgba(0, 255, 136, 0.25);
    }

    .guard-card h3 {
      margin: 0 0 8px;
    }

    .completion {
      height: 6px;
      background: #21262d;
      border-radius: 999px;
      overflow: hidden;
    }

    .completion-bar {
      height: 100%;
      background: var(--primary-glow);
    }

    .completion-label {
      font-size: 0.8rem;
      color: var(--muted);
    }

    .completion-row {
      display: grid;
      grid-template-columns: 1fr 2fr auto;
      align-items: center;
      gap: 12px;
    }

    .guard-detail-content,
    .placeholder {
      background: var(--panel);
      border-radius: 8px;
      padding: 24px;
    }

    .guard-image,
    .athlete-image {
      max-width: 100%;
      border-radius: 8px;
    }

    .pros-cons {
      display: grid;
      grid-template-columns: 1fr 1fr;
      gap: 16px;
    }

    .technique-grid {
      display: grid;
      grid-template-columns: repeat(auto-fill, minmax(220px, 1fr));
      gap: 12px;
    }

    .technique-card {
      display: block;
      color: inherit;
      text-decoration: none;
      background: #0d1117;
      border: 1px solid #30363d;
      border-radius: 8px;
      padding: 14px;
      animation: rise 400ms ease both;
    }

    .technique-card h5 a {
      color: inherit;
    }

    .technique-card.status-mastered {
      border-color: var(--primary-glow);
    }

    .technique-type {
      font-size: 0.7rem;
      letter-spacing: 0.15em;
      font-weight: 700;
    }

    .technique-type.sweep { color: var(--sweep); }
    .technique-type.pass { color: var(--pass); }
    .technique-type.submission { color: var(--submission); }

    .status-buttons {
      display: flex;
      flex-wrap: wrap;
      gap: 6px;
    }

    .status-buttons form {
      margin: 0;
    }

    .status-btn,
    .btn-reset {
      appearance: none;
      border: 1px solid #30363d;
      background: transparent;
      color: var(--muted);
      border-radius: 999px;
      padding: 4px 10px;
      cursor: pointer;
    }

    .status-btn.active.bad { background: var(--submission); color: var(--bg); }
    .status-btn.active.learning { background: #d29922; color: var(--bg); }
    .status-btn.active.average { background: var(--pass); color: var(--bg); }
    .status-btn.active.mastered { background: var(--primary-glow); color: var(--bg); }

    .athlete-tag {
      display: inline-block;
      margin: 0 6px 6px 0;
      padding: 4px 10px;
      border-radius: 999px;
      border: 1px solid var(--primary-glow);
    }

    #athletes-container {
      display: grid;
      grid-template-columns: repeat(auto-fill, minmax(240px, 1fr));
      gap: 16px;
    }

    .athlete-card {
      background: var(--panel);
      border-radius: 8px;
      padding: 16px;
      animation: rise 400ms ease both;
    }

    .move-item {
      display: flex;
      justify-content: space-between;
      border-bottom: 1px solid #21262d;
      padding: 4px 0;
    }

    .move-type {
      color: var(--muted);
      font-size: 0.75rem;
      letter-spacing: 0.12em;
    }

    .panel {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(160px, 1fr));
      gap: 12px;
    }

    .stat {
      background: var(--panel);
      border-radius: 8px;
      padding: 16px;
      display: grid;
      gap: 6px;
    }

    .stat .label {
      font-size: 0.8rem;
      text-transform: uppercase;
      letter-spacing: 0.12em;
      color: var(--muted);
    }

    .stat .value {
      font-size: 1.6rem;
      font-weight: 600;
      color: var(--primary-glow);
    }

    .empty-state {
      color: var(--muted);
    }

    .reset-form {
      margin-top: 32px;
    }

    .btn-reset {
      border-color: var(--submission);
      color: var(--submission);
      padding: 10px 18px;
    }

    @keyframes rise {
      from {
        opacity: 0;
        transform: translateY(8px);
      }
      to {
        opacity: 1;
        transform: translateY(0);
      }
    }

    @media (max-width: 768px) {
      .guards-layout,
      .pros-cons {
        grid-template-columns: 1fr;
      }
      header,
      main {
        padding-left: 16px;
        padding-right: 16px;
      }
    }
  </style>
</head>
<body>
  <header>
    <h1>GUARD DEX</h1>
    <nav>{{NAV}}</nav>
  </header>
  {{NOTICE}}
  <main>
    <section id="guards-section" class="section{{GUARDS_ACTIVE}}">
      <div class="guards-layout">
        <div id="guards-container">{{GUARD_LIST}}</div>
        <div id="guard-details">{{GUARD_DETAILS}}</div>
      </div>
    </section>

    <section id="athletes-section" class="section{{ATHLETES_ACTIVE}}">
      <div id="athletes-container">{{ATHLETES}}</div>
    </section>

    <section id="progress-section" class="section{{PROGRESS_ACTIVE}}">
      <div id="progress-container">{{PROGRESS}}</div>
    </section>
  </main>
</body>
</html>
"#;
