//! Self-contained HTML page: user panel, audit pie, XP line chart and project bars.
//!
//! Geometry comes straight from [`Dashboard`]; this module only serializes it. Hover labels
//! use SVG `<title>` elements, so the page needs no script.

use crate::dashboard::Dashboard;
use crate::geometry::{ProjectedPath, Sector};
use crate::summary::format_amount;

const STYLE: &str = "\
body{font-family:sans-serif;margin:0;background:#f4f4f8;color:#222}\
#header{display:flex;justify-content:space-between;align-items:center;padding:0 24px;background:#333;color:#fff}\
#crossContainer{display:flex;flex-wrap:wrap;gap:16px;padding:16px}\
#crossContainer>div{background:#fff;border-radius:8px;padding:16px;flex:1 1 300px}\
#userInfo span{display:block;margin:4px 0}\
.bar-graph-container{display:flex;align-items:flex-end;gap:5px;height:240px;margin:16px;padding:8px;background:#fff;border-radius:8px}\
.bar{position:relative;background:#4a90d9}\
.bar .bar-label{display:none;position:absolute;bottom:100%;white-space:nowrap;font-size:12px;background:#fff;border:1px solid #ccc;padding:2px 4px}\
.bar:hover .bar-label{display:block}\
.no-data{color:#888;font-style:italic}";

/// Render the full dashboard page.
pub fn render_page(d: &Dashboard) -> String {
    let mut out = String::with_capacity(16 * 1024);
    let s = &d.summary;
    out.push_str(&format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{} · XP dashboard</title>\n<style>{STYLE}</style>\n</head>\n<body>\n\
         <div id=\"graphPage\">\n<div id=\"header\"><h2>GraphQL</h2></div>\n\
         <div id=\"crossContainer\">\n",
        escape(&s.login)
    ));
    user_info(&mut out, d);
    audit_panel(&mut out, d);
    xp_panel(&mut out, d);
    out.push_str("</div>\n");
    bar_graph(&mut out, d);
    out.push_str("</div>\n</body>\n</html>\n");
    out
}

fn user_info(out: &mut String, d: &Dashboard) {
    let a = &d.attrs;
    let field = |v: &Option<String>, missing: &str| -> String {
        match v.as_deref().map(str::trim) {
            Some(s) if !s.is_empty() => escape(s),
            _ => missing.to_string(),
        }
    };
    let login = if d.summary.login.is_empty() {
        "Login not available".to_string()
    } else {
        escape(&d.summary.login)
    };
    out.push_str(&format!(
        "<div id=\"userInfo\">\n<h2>User: {login}</h2>\n\
         <span>First Name: {}</span>\n<span>Last Name: {}</span>\n\
         <span>Phone: {}</span>\n<span>Email: {}</span>\n\
         <span>Address:<br>{}</span>\n<span>{}</span>\n<span>{}</span>\n",
        field(&a.first_name, "First name not available"),
        field(&a.last_name, "Last name not available"),
        field(&a.tel, "Phone not available"),
        field(&a.email, "E-mail not available"),
        field(&a.address_country, "Country not available"),
        field(&a.address_city, "City not available"),
        field(&a.address_street, "Street info not available"),
    ));
    if !d.summary.skills.is_empty() {
        out.push_str("<h3>Skills</h3>\n<ul class=\"skills\">\n");
        for (name, level) in &d.summary.skills {
            out.push_str(&format!("<li>{}: {}</li>\n", escape(name), format_amount(*level)));
        }
        out.push_str("</ul>\n");
    }
    out.push_str("</div>\n");
}

fn audit_panel(out: &mut String, d: &Dashboard) {
    let s = &d.summary;
    out.push_str(&format!(
        "<div id=\"auditRatioDiv\">\n<h2>Audit Ratio: {}</h2>\n\
         <p>Total Received XP: {} MB</p>\n<p>Given XP: {} MB</p>\n",
        s.audit_ratio_text(),
        s.received_mb_text(),
        s.given_mb_text()
    ));
    if let Some(count) = s.audit_count {
        out.push_str(&format!("<p>Audits done: {count}</p>\n"));
    }
    out.push_str("<div id=\"pieChartDiv\">\n");
    match &d.audit_pie {
        Some(sectors) => pie_svg(out, sectors, d.config.pie_size),
        None => out.push_str("<p class=\"no-data\">No audit XP yet.</p>\n"),
    }
    out.push_str("</div>\n</div>\n");
}

fn pie_svg(out: &mut String, sectors: &[Sector; 2], size: f64) {
    out.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{size}\" height=\"{size}\">\n"
    ));
    for sector in sectors {
        out.push_str(&format!(
            "<path d=\"{}\" fill=\"{}\"/>\n",
            sector.svg_path(),
            sector.fill()
        ));
    }
    out.push_str("</svg>\n");
}

fn xp_panel(out: &mut String, d: &Dashboard) {
    out.push_str(&format!(
        "<div id=\"xpProgressionDiv\">\n<h2 style=\"font-weight:bold\">Total XP: {} KB</h2>\n",
        d.summary.total_xp_kb()
    ));
    match &d.xp_chart {
        Some(chart) => {
            let area = d.config.line_area;
            line_svg(out, chart, area.width, area.height)
        }
        None => out.push_str("<p class=\"no-data\">No XP progression to show.</p>\n"),
    }
    out.push_str("</div>\n");
}

fn line_svg(out: &mut String, chart: &ProjectedPath, width: f64, height: f64) {
    out.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\">\n"
    ));
    out.push_str(&format!(
        "<path d=\"{}\" stroke=\"blue\" fill=\"none\" stroke-width=\"2\"/>\n",
        chart.svg_path()
    ));
    for m in &chart.markers {
        out.push_str(&format!(
            "<circle cx=\"{}\" cy=\"{}\" r=\"5\" fill=\"blue\"><title>{}: {}B</title></circle>\n",
            m.x,
            m.y,
            escape(&m.label),
            format_amount(m.amount)
        ));
    }
    for axis in [chart.axes.x_axis, chart.axes.y_axis] {
        out.push_str(&format!(
            "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"black\"/>\n",
            axis.from.x, axis.from.y, axis.to.x, axis.to.y
        ));
    }
    out.push_str("</svg>\n");
}

fn bar_graph(out: &mut String, d: &Dashboard) {
    out.push_str("<div id=\"barGraphDiv\" class=\"bar-graph-container\">\n");
    if d.bars.is_empty() {
        out.push_str("<p class=\"no-data\">No projects yet.</p>\n");
    }
    for bar in &d.bars {
        out.push_str(&format!(
            "<div class=\"bar\" style=\"width:{};height:{}%\"><div class=\"bar-label\">{}: {}B</div></div>\n",
            bar.width.css(),
            bar.height_percent,
            escape(&bar.label),
            format_amount(bar.amount)
        ));
    }
    out.push_str("</div>\n");
}

/// Escape text for HTML element content and double-quoted attributes.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}
