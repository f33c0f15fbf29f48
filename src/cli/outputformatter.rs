use crate::error::Notice;
use crate::identity::Session;
use crate::navigation::{AccountAction, NavigationSet};
use crate::portal::View;
use crate::shell::ShellView;

// Render rows as an ASCII table. Column widths fit the widest cell, capped to keep lines readable.
pub fn render_table(cols: &[&str], rows: &[Vec<String>]) -> String {
    let max_col_width: usize = 48;
    let mut widths: Vec<usize> = cols.iter().map(|s| display_len(s).min(max_col_width)).collect();
    for r in rows {
        for (i, cell) in r.iter().enumerate().take(cols.len()) {
            let w = display_len(cell);
            if w > widths[i] { widths[i] = w.min(max_col_width); }
        }
    }
    let header: Vec<String> = cols.iter().map(|c| c.to_string()).collect();
    let sep = build_separator(&widths);
    let mut out = vec![sep.clone(), build_row(&header, &widths), sep.clone()];
    for r in rows {
        out.push(build_row(r, &widths));
    }
    out.push(sep);
    out.join("\n")
}

pub fn render_navigation(set: NavigationSet, active: Option<&str>) -> String {
    if set.is_empty() { return "(no navigation entries)".to_string(); }
    let rows: Vec<Vec<String>> = set
        .iter()
        .enumerate()
        .map(|(i, e)| {
            let mark = if Some(e.path) == active { "*" } else { "" };
            vec![(i + 1).to_string(), format!("{}{}", e.label, mark), e.path.to_string()]
        })
        .collect();
    render_table(&["#", "label", "path"], &rows)
}

pub fn render_session(session: &Session) -> String {
    match session.active() {
        None => "not logged in".to_string(),
        Some(a) => format!(
            "{} <{}> role={} id={} since={}",
            a.identity.display_name(),
            a.identity.email(),
            a.identity.role(),
            a.identity.id(),
            a.issued_at.format("%Y-%m-%d %H:%M:%S UTC")
        ),
    }
}

pub fn render_notice(n: &Notice) -> String {
    if n.destructive { format!("[!] {}", n) } else { format!("[ok] {}", n) }
}

fn render_shell(shell: &ShellView) -> String {
    let mut lines = Vec::new();
    let width = if shell.state.sidebar_collapsed { "collapsed" } else { "expanded" };
    let drawer = if shell.state.mobile_drawer_open { "open" } else { "closed" };
    lines.push(format!("sidebar: {} | drawer: {}{}", width, drawer, if shell.overlay_visible { " (overlay)" } else { "" }));
    let rows: Vec<Vec<String>> = shell
        .items
        .iter()
        .map(|i| {
            let label = i.label.unwrap_or("·");
            vec![if i.active { ">".into() } else { String::new() }, label.to_string(), i.path.to_string()]
        })
        .collect();
    lines.push(render_table(&["", "label", "path"], &rows));
    if let Some(b) = &shell.badge {
        lines.push(format!("{} ({})", b.name, b.role_label));
    }
    lines.join("\n")
}

pub fn render_view(view: &View) -> String {
    match view {
        View::Public { location, route, navbar } => {
            let links: Vec<&str> = navbar.links.iter().map(|l| l.label).collect();
            let account: Vec<String> = navbar
                .account
                .iter()
                .map(|a| match a {
                    AccountAction::Link { label, path } => format!("{} [{}]", label, path),
                    AccountAction::Logout => "Logout".to_string(),
                })
                .collect();
            let mut s = format!("{} ({:?})\nJobPortal | {} | {}", location, route, links.join(" · "), account.join(" · "));
            if let Some(name) = &navbar.user_name { s.push_str(&format!("\nsigned in as {}", name)); }
            if navbar.mobile_menu_open { s.push_str("\n(mobile menu open)"); }
            s
        }
        View::Protected { location, shell, .. } => format!("{}\n{}", location, render_shell(shell)),
        View::Blank { location } => format!("{} (nothing rendered)", location),
        View::Redirect { to, return_to } => match return_to {
            Some(r) => format!("redirect -> {} (return to {})", to, r),
            None => format!("redirect -> {}", to),
        },
        View::NotFound { location } => format!("404: {} not found", location),
    }
}

fn display_len(s: &str) -> usize { s.chars().count() }

fn build_separator(widths: &[usize]) -> String {
    let mut s = String::new();
    s.push('+');
    for w in widths {
        s.push_str(&"-".repeat(*w + 2));
        s.push('+');
    }
    s
}

fn build_row(cells: &[String], widths: &[usize]) -> String {
    let mut s = String::new();
    s.push('|');
    for (i, w) in widths.iter().enumerate() {
        let cell = cells.get(i).cloned().unwrap_or_default();
        let text = truncate(&cell, *w);
        s.push(' ');
        s.push_str(&text);
        s.push_str(&" ".repeat(w.saturating_sub(display_len(&text))));
        s.push(' ');
        s.push('|');
    }
    s
}

fn truncate(s: &str, max: usize) -> String {
    let len = s.chars().count();
    if len <= max { return s.to_string(); }
    if max <= 1 { return "…".to_string(); }
    s.chars().take(max - 1).collect::<String>() + "…"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::Role;
    use crate::navigation::resolve;

    #[test]
    fn table_layout() {
        let t = render_table(&["a", "bb"], &[vec!["xyz".into(), "1".into()]]);
        let lines: Vec<&str> = t.lines().collect();
        assert_eq!(lines[0], "+-----+----+");
        assert_eq!(lines[1], "| a   | bb |");
        assert_eq!(lines[3], "| xyz | 1  |");
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn navigation_marks_active() {
        let out = render_navigation(resolve(Role::Admin), Some("/admin/users"));
        assert!(out.contains("Users*"));
        assert!(!out.contains("Dashboard*"));
        assert_eq!(render_navigation(&[], None), "(no navigation entries)");
    }

    #[test]
    fn truncates_long_cells() {
        assert_eq!(truncate("abcdef", 4), "abc…");
        assert_eq!(truncate("abc", 4), "abc");
    }
}
