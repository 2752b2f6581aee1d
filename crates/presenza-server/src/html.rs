//! Minimal HTML rendering for the upload surface.
//!
//! Hand-built pages; worker names come straight from uploaded files, so
//! every dynamic value passes through [`escape_html`].

use presenza_core::formatting::display_month;
use presenza_data::analysis::AnalysisResult;

/// Escape the five HTML-significant characters.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
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

/// The upload form page, with an optional flash message shown inline.
pub fn index_page(flash: Option<&str>) -> String {
    let flash_block = match flash {
        Some(message) => format!(
            "<div class=\"flash-messages\"><p class=\"error-message\">{}</p></div>\n",
            escape_html(message)
        ),
        None => String::new(),
    };

    format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head><title>Presenza</title></head>\n\
         <body>\n\
         <h1>Monthly Presence Report</h1>\n\
         {flash_block}\
         <div class=\"upload-section\">\n\
         <form action=\"/upload\" method=\"post\" enctype=\"multipart/form-data\">\n\
         <input type=\"file\" id=\"file\" name=\"file\" accept=\".txt\">\n\
         <button type=\"submit\">Upload</button>\n\
         </form>\n\
         <p>Upload an exported group-chat .txt file to generate the report.</p>\n\
         </div>\n\
         </body>\n\
         </html>\n"
    )
}

/// The finished report rendered as an HTML page.
pub fn report_page(result: &AnalysisResult) -> String {
    let mut body = String::new();

    for (month_key, stats) in &result.report {
        body.push_str(&format!(
            "<section class=\"month\">\n<h2>{}</h2>\n",
            escape_html(&display_month(month_key))
        ));
        body.push_str(&format!("<p>Joined: {}</p>\n", stats.joined));
        body.push_str(&format!("<p>Left: {}</p>\n", stats.left));
        body.push_str(&format!(
            "<p>Active Workers: {}</p>\n",
            stats.workers_count
        ));
        body.push_str("<h3>Presence Days</h3>\n<ul>\n");
        for (worker, days) in &stats.presence_days {
            body.push_str(&format!(
                "<li>{}: {} days</li>\n",
                escape_html(worker),
                days
            ));
        }
        body.push_str("</ul>\n</section>\n");
    }

    if result.report.is_empty() {
        body.push_str("<p>No presence events found in the uploaded file.</p>\n");
    }

    format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head><title>Presenza report</title></head>\n\
         <body>\n\
         <h1>Monthly Presence Report</h1>\n\
         <p class=\"meta\">{} events from {} lines</p>\n\
         {body}\
         <p><a href=\"/\">Upload another file</a></p>\n\
         </body>\n\
         </html>\n",
        result.metadata.events_extracted, result.metadata.lines_read,
    )
}

// ── Tests ─────────────────────────────────────────────────────────────────────
